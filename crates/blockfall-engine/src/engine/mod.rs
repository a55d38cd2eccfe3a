//! Game simulation built on the core board and piece types.
//!
//! - [`PieceQueue`] - bag-randomized upcoming pieces
//! - [`GameField`] - the board plus the falling piece and its movement
//! - [`GameStats`] - score, level, lines and gravity speed
//! - [`GameSession`] - phase state machine and tick-driven gravity

pub use self::{
    command::*, game_field::*, game_session::*, game_stats::*, piece_queue::*, snapshot::*,
};

mod command;
mod game_field;
mod game_session;
mod game_stats;
mod piece_queue;
mod snapshot;
