//! Falling-block puzzle engine.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - static data and pure grid operations (piece catalog, board)
//! - [`engine`] - the simulation built on top of them (piece queue, falling
//!   piece controller, progression, session state machine)
//!
//! The engine never reads a clock and never draws anything. A host drives it
//! with [`GameSession::tick`] and [`GameSession::handle_command`], and reads the
//! state back through borrowed accessors or an owned [`GameSnapshot`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// The falling piece would overlap settled blocks or leave the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding with the board")]
pub struct PieceCollisionError;
