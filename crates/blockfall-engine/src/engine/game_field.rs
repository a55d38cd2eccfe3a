use crate::{
    PieceCollisionError,
    core::{
        board::Board,
        piece::{Piece, PieceKind, RotationDirection},
    },
};

use super::piece_queue::{PieceQueue, PieceSeed};

/// Result of moving the falling piece down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The piece moved one row down and is still falling.
    Moved,
    /// The piece locked, full rows were cleared and the next piece spawned.
    Locked { cleared_lines: usize },
    /// The piece locked, but the next piece collided right at spawn.
    ToppedOut { cleared_lines: usize },
}

impl DropOutcome {
    /// Number of rows cleared by the lock, `None` if the piece did not lock.
    #[must_use]
    pub const fn cleared_lines(self) -> Option<usize> {
        match self {
            DropOutcome::Moved => None,
            DropOutcome::Locked { cleared_lines } | DropOutcome::ToppedOut { cleared_lines } => {
                Some(cleared_lines)
            }
        }
    }
}

/// The board, the falling piece and the piece queue.
///
/// Owns the falling piece's lifecycle: spawning from the queue, moving,
/// rotating with wall kicks, dropping, and locking into the board.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling_piece: Piece,
    piece_queue: PieceQueue,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::from_queue(PieceQueue::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_queue(PieceQueue::with_seed(seed))
    }

    fn from_queue(mut piece_queue: PieceQueue) -> Self {
        let falling_piece = Piece::spawn(piece_queue.pop_next());
        Self {
            board: Board::INITIAL,
            falling_piece,
            piece_queue,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    /// The piece that spawns after the falling one locks.
    #[must_use]
    pub fn next_piece(&self) -> Option<PieceKind> {
        self.piece_queue.peek_next()
    }

    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.piece_queue.next_pieces()
    }

    /// Where the falling piece would lock on a hard drop.
    #[must_use]
    pub fn simulate_drop_position(&self) -> Piece {
        self.falling_piece.simulate_drop_position(&self.board)
    }

    /// Empties the board and the queue, then spawns a fresh piece.
    pub fn reset(&mut self) -> Result<(), PieceCollisionError> {
        self.board.clear();
        self.piece_queue.clear();
        self.spawn_next_piece()
    }

    /// Replaces the falling piece with the next one from the queue.
    ///
    /// The new piece becomes the falling piece even when it collides, so it can
    /// still be displayed; the error reports that the game is over.
    pub fn spawn_next_piece(&mut self) -> Result<(), PieceCollisionError> {
        self.falling_piece = Piece::spawn(self.piece_queue.pop_next());
        if self.board.is_colliding(&self.falling_piece) {
            return Err(PieceCollisionError);
        }
        Ok(())
    }

    fn try_set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.board.is_colliding(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_set_falling_piece(self.falling_piece.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_set_falling_piece(self.falling_piece.right())
    }

    /// Rotates the falling piece, kicking it sideways if needed.
    ///
    /// On error the piece keeps its previous shape and position.
    pub fn try_rotate(&mut self, direction: RotationDirection) -> Result<(), PieceCollisionError> {
        let piece = self
            .falling_piece
            .rotated_with_kick(direction, &self.board)
            .ok_or(PieceCollisionError)?;
        self.falling_piece = piece;
        Ok(())
    }

    /// Moves the falling piece one row down, locking it if it cannot move.
    pub fn soft_drop(&mut self) -> DropOutcome {
        if self.try_set_falling_piece(self.falling_piece.down()).is_ok() {
            return DropOutcome::Moved;
        }
        self.lock_falling_piece()
    }

    /// Drops the falling piece as far as it goes and locks it.
    ///
    /// Never returns [`DropOutcome::Moved`].
    pub fn hard_drop(&mut self) -> DropOutcome {
        self.falling_piece = self.simulate_drop_position();
        self.lock_falling_piece()
    }

    fn lock_falling_piece(&mut self) -> DropOutcome {
        self.board.fill_piece(&self.falling_piece);
        let cleared_lines = self.board.clear_lines();
        match self.spawn_next_piece() {
            Ok(()) => DropOutcome::Locked { cleared_lines },
            Err(PieceCollisionError) => DropOutcome::ToppedOut { cleared_lines },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Block, PiecePosition};

    const SEED: PieceSeed = PieceSeed::from_bytes([7; 16]);

    fn fill_row_except(board: &mut Board, y: usize, holes: &[usize]) {
        for x in 0..Board::WIDTH {
            if !holes.contains(&x) {
                board.fill_block_at(x, y, Block::Piece(PieceKind::Z));
            }
        }
    }

    fn field_with_piece(kind: PieceKind) -> GameField {
        let mut field = GameField::with_seed(SEED);
        field.falling_piece = Piece::spawn(kind);
        field
    }

    #[test]
    fn test_new_field_spawns_a_piece() {
        let field = GameField::with_seed(SEED);
        assert_eq!(field.falling_piece().position().y(), 0);
        assert!(!field.board().is_colliding(field.falling_piece()));
        assert!(field.next_piece().is_some());
    }

    #[test]
    fn test_move_reverts_on_collision() {
        let mut field = field_with_piece(PieceKind::O);
        for _ in 0..4 {
            field.try_move_left().unwrap();
        }
        assert_eq!(field.falling_piece().position().x(), 0);
        assert!(field.try_move_left().is_err());
        assert_eq!(field.falling_piece().position().x(), 0);

        for _ in 0..8 {
            field.try_move_right().unwrap();
        }
        assert!(field.try_move_right().is_err());
        assert_eq!(field.falling_piece().position().x(), 8);
    }

    #[test]
    fn test_soft_drop_moves_then_locks() {
        let mut field = field_with_piece(PieceKind::O);
        for y in 1..=18 {
            assert_eq!(field.soft_drop(), DropOutcome::Moved);
            assert_eq!(field.falling_piece().position().y(), y);
        }
        let next = field.next_piece().unwrap();
        assert_eq!(field.soft_drop(), DropOutcome::Locked { cleared_lines: 0 });
        assert_eq!(field.board().cell(4, 19), Block::Piece(PieceKind::O));
        assert_eq!(field.board().cell(5, 18), Block::Piece(PieceKind::O));
        assert_eq!(field.falling_piece().kind(), next);
        assert_eq!(field.falling_piece().position().y(), 0);
    }

    #[test]
    fn test_hard_drop_matches_repeated_soft_drops() {
        for kind in PieceKind::ALL {
            let mut soft = field_with_piece(kind);
            let mut hard = soft.clone();

            let mut lowest = soft.falling_piece().position().y();
            let soft_outcome = loop {
                match soft.soft_drop() {
                    DropOutcome::Moved => lowest = soft.falling_piece().position().y(),
                    outcome => break outcome,
                }
            };

            let landing = hard.simulate_drop_position().position().y();
            let hard_outcome = hard.hard_drop();

            assert!(landing >= lowest, "{kind:?}");
            assert_eq!(hard_outcome, soft_outcome, "{kind:?}");
            assert!(!hard_outcome.is_moved());
            assert_eq!(hard.board(), soft.board(), "{kind:?}");
        }
    }

    #[test]
    fn test_hard_drop_clears_lines() {
        let mut field = field_with_piece(PieceKind::I);
        // Bottom row with a 4-wide gap under the spawn columns of the I-piece.
        fill_row_except(&mut field.board, 19, &[3, 4, 5, 6]);
        fill_row_except(&mut field.board, 18, &[0, 3, 4, 5, 6]);

        assert_eq!(field.hard_drop(), DropOutcome::Locked { cleared_lines: 1 });
        // The I-piece completed row 19; row 18 shifted down intact.
        assert_eq!(field.board().cell(0, 19), Block::Empty);
        assert_eq!(field.board().cell(3, 19), Block::Empty);
        assert_eq!(field.board().cell(1, 19), Block::Piece(PieceKind::Z));
        assert!(field.board().rows().take(19).flatten().all(|b| b.is_empty()));
    }

    #[test]
    fn test_tetris() {
        let mut field = field_with_piece(PieceKind::I);
        field.falling_piece = field
            .falling_piece
            .rotated(RotationDirection::Clockwise)
            .with_position(PiecePosition::new(-2, 0));
        for y in 16..20 {
            fill_row_except(&mut field.board, y, &[0]);
        }
        assert_eq!(field.hard_drop(), DropOutcome::Locked { cleared_lines: 4 });
        assert_eq!(field.board(), &Board::INITIAL);
    }

    #[test]
    fn test_rotate_with_kick_at_left_wall() {
        let mut field = field_with_piece(PieceKind::I);
        field.try_rotate(RotationDirection::Clockwise).unwrap();
        while field.try_move_left().is_ok() {}
        assert_eq!(field.falling_piece().position().x(), -2);

        field.try_rotate(RotationDirection::Clockwise).unwrap();
        assert_eq!(field.falling_piece().position().x(), 0);
    }

    #[test]
    fn test_failed_rotation_restores_piece() {
        let mut field = field_with_piece(PieceKind::T);
        let before = *field.falling_piece();
        for y in 0..Board::HEIGHT {
            fill_row_except(&mut field.board, y, &[]);
        }
        for (x, y) in before.occupied_positions() {
            let (x, y) = (usize::try_from(x).unwrap(), usize::try_from(y).unwrap());
            field.board.fill_block_at(x, y, Block::Empty);
        }

        assert!(field.try_rotate(RotationDirection::Clockwise).is_err());
        assert_eq!(field.falling_piece(), &before);
    }

    #[test]
    fn test_top_out() {
        let mut field = field_with_piece(PieceKind::O);
        for y in 1..Board::HEIGHT {
            fill_row_except(&mut field.board, y, &[0]);
        }
        let outcome = field.hard_drop();
        assert!(outcome.is_topped_out(), "{outcome:?}");
        assert_eq!(outcome.cleared_lines(), Some(0));
    }

    #[test]
    fn test_reset() {
        let mut field = field_with_piece(PieceKind::O);
        fill_row_except(&mut field.board, 19, &[0]);
        field.reset().unwrap();
        assert_eq!(field.board(), &Board::INITIAL);
        assert_eq!(field.falling_piece().position().y(), 0);
        assert_eq!(field.piece_queue.len(), PieceKind::LEN - 1);
    }
}
