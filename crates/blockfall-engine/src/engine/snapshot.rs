use serde::Serialize;

use crate::core::{
    board::Board,
    piece::{Piece, PieceKind, PiecePosition},
};

use super::{GameSession, SessionState};

/// Owned, serializable view of a [`GameSession`].
///
/// Cells use the numeric encoding of [`Block::value`](crate::Block::value):
/// `0` is empty and `1..=7` is a piece type.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Command, GameSession};
///
/// let mut session = GameSession::new();
/// session.handle_command(Command::Start);
///
/// let snapshot = session.snapshot();
/// assert!(snapshot.falling_piece.is_some());
/// assert_eq!(snapshot.level, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub state: SessionState,
    pub board: [[u8; Board::WIDTH]; Board::HEIGHT],
    pub falling_piece: Option<PieceSnapshot>,
    /// Position where the falling piece would land.
    pub ghost_position: Option<PiecePosition>,
    pub next_piece: Option<PieceKind>,
    pub score: usize,
    pub level: usize,
    pub lines: usize,
    pub completed_pieces: usize,
    pub play_time_ms: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub position: PiecePosition,
    /// Square shape matrix, row by row.
    pub shape: Vec<Vec<u8>>,
}

impl PieceSnapshot {
    fn new(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            position: piece.position(),
            shape: piece
                .shape()
                .rows()
                .map(|row| row.iter().map(|block| block.value()).collect())
                .collect(),
        }
    }
}

impl GameSnapshot {
    pub(crate) fn new(session: &GameSession) -> Self {
        let mut board = [[0; Board::WIDTH]; Board::HEIGHT];
        for (dst, src) in board.iter_mut().zip(session.board().rows()) {
            for (dst, block) in dst.iter_mut().zip(src) {
                *dst = block.value();
            }
        }
        let stats = session.stats();
        Self {
            state: session.session_state(),
            board,
            falling_piece: session.falling_piece().map(PieceSnapshot::new),
            ghost_position: session.simulate_drop_position().map(|p| p.position()),
            next_piece: session.next_piece(),
            score: stats.score(),
            level: stats.level(),
            lines: stats.total_cleared_lines(),
            completed_pieces: stats.completed_pieces(),
            play_time_ms: session.play_time().as_millis(),
        }
    }
}
