use super::piece::{Piece, PieceKind};

/// A single cell of the board or of a piece shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a piece of a specific type.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Block::Empty)
    }

    /// Numeric cell value: `0` for empty, `1..=7` for the piece type.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Piece(kind) => kind.value(),
        }
    }
}

type BoardRow = [Block; Board::WIDTH];

/// The arena: a fixed 10×20 grid of settled cells.
///
/// Row 0 is the top of the board. Collision treats the side walls and the floor
/// as solid but leaves the space above row 0 open, so a freshly spawned piece
/// may stick out above the visible grid.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::INITIAL;
/// let piece = Piece::spawn(PieceKind::I).simulate_drop_position(&board);
/// board.fill_piece(&piece);
/// assert_eq!(board.clear_lines(), 0);
/// assert_eq!(board.cell(3, 19).value(), PieceKind::I.value());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; Board::HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 20;

    pub const INITIAL: Self = Self {
        rows: [[Block::Empty; Self::WIDTH]; Self::HEIGHT],
    };

    #[must_use]
    pub const fn cell(&self, x: usize, y: usize) -> Block {
        self.rows[y][x]
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &BoardRow> {
        self.rows.iter()
    }

    /// Overwrites a single cell.
    pub fn fill_block_at(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y][x] = block;
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        *self = Self::INITIAL;
    }

    /// Returns whether any occupied cell of the piece hits a wall, the floor,
    /// or a settled block.
    ///
    /// Cells above the top row never collide.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece.occupied_positions().any(|(x, y)| {
            let Some(x) = usize::try_from(x).ok().filter(|x| *x < Self::WIDTH) else {
                return true;
            };
            let Ok(y) = usize::try_from(y) else {
                return false;
            };
            y >= Self::HEIGHT || !self.rows[y][x].is_empty()
        })
    }

    /// Writes the piece's cells into the board.
    ///
    /// This is called when a piece is locked into position, after checking it
    /// does not collide. Cells above the top row are dropped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        let block = Block::Piece(piece.kind());
        for (x, y) in piece.occupied_positions() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
                && x < Self::WIDTH
                && y < Self::HEIGHT
            {
                self.rows[y][x] = block;
            }
        }
    }

    fn is_row_filled(row: &BoardRow) -> bool {
        row.iter().all(|b| !b.is_empty())
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Filled rows are removed, the remaining rows shift down keeping their
    /// order, and the same number of empty rows appear at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..Self::HEIGHT).rev() {
            if Self::is_row_filled(&self.rows[y]) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill([Block::Empty; Self::WIDTH]);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PiecePosition, RotationDirection};

    const FULL: BoardRow = [Block::Piece(PieceKind::I); Board::WIDTH];

    fn row_with(xs: &[usize], kind: PieceKind) -> BoardRow {
        let mut row = [Block::Empty; Board::WIDTH];
        for &x in xs {
            row[x] = Block::Piece(kind);
        }
        row
    }

    #[test]
    fn test_initial_board_is_empty() {
        let board = Board::INITIAL;
        assert_eq!(board.rows().count(), Board::HEIGHT);
        assert!(board.rows().flatten().all(|b| b.value() == 0));
    }

    #[test]
    fn test_collision_with_walls_and_floor() {
        let board = Board::INITIAL;
        let piece = Piece::spawn(PieceKind::O);

        assert!(!board.is_colliding(&piece.with_position(PiecePosition::new(0, 0))));
        assert!(board.is_colliding(&piece.with_position(PiecePosition::new(-1, 0))));
        assert!(!board.is_colliding(&piece.with_position(PiecePosition::new(8, 0))));
        assert!(board.is_colliding(&piece.with_position(PiecePosition::new(9, 0))));
        assert!(!board.is_colliding(&piece.with_position(PiecePosition::new(4, 18))));
        assert!(board.is_colliding(&piece.with_position(PiecePosition::new(4, 19))));
    }

    #[test]
    fn test_top_is_open() {
        let board = Board::INITIAL;
        let piece = Piece::spawn(PieceKind::O).with_position(PiecePosition::new(4, -1));
        assert!(!board.is_colliding(&piece));
        let piece = piece.with_position(PiecePosition::new(4, -5));
        assert!(!board.is_colliding(&piece));

        // Walls still apply above the top row.
        let piece = piece.with_position(PiecePosition::new(-1, -5));
        assert!(board.is_colliding(&piece));
    }

    #[test]
    fn test_empty_matrix_cells_never_collide() {
        let board = Board::INITIAL;
        // The I-piece's bottom matrix rows are empty and may hang below the floor.
        let piece = Piece::spawn(PieceKind::I).with_position(PiecePosition::new(0, 18));
        assert!(!board.is_colliding(&piece));
        // Vertical I with its empty matrix columns hanging outside the left wall.
        let vertical = Piece::spawn(PieceKind::I)
            .rotated(RotationDirection::Clockwise)
            .with_position(PiecePosition::new(-2, 0));
        assert!(!board.is_colliding(&vertical));
    }

    #[test]
    fn test_collision_with_settled_blocks() {
        let mut board = Board::INITIAL;
        board.fill_block_at(5, 1, Block::Piece(PieceKind::Z));
        assert!(board.is_colliding(&Piece::spawn(PieceKind::T)));
        assert!(!board.is_colliding(&Piece::spawn(PieceKind::T).left().left()));
    }

    #[test]
    fn test_spawn_blocked_by_prefilled_top_rows() {
        let mut board = Board::INITIAL;
        for kind in PieceKind::ALL {
            assert!(!board.is_colliding(&Piece::spawn(kind)), "{kind:?}");
        }
        for y in 0..2 {
            board.rows[y] = row_with(&[3, 4, 5, 6], PieceKind::S);
        }
        for kind in PieceKind::ALL {
            assert!(board.is_colliding(&Piece::spawn(kind)), "{kind:?}");
        }
    }

    #[test]
    fn test_fill_piece() {
        let mut board = Board::INITIAL;
        let piece = Piece::spawn(PieceKind::T).with_position(PiecePosition::new(0, 18));
        board.fill_piece(&piece);
        assert_eq!(board.rows[18], row_with(&[1], PieceKind::T));
        assert_eq!(board.rows[19], row_with(&[0, 1, 2], PieceKind::T));
    }

    #[test]
    fn test_fill_piece_drops_cells_above_top() {
        let mut board = Board::INITIAL;
        let piece = Piece::spawn(PieceKind::T).with_position(PiecePosition::new(0, -1));
        board.fill_piece(&piece);
        assert_eq!(board.rows[0], row_with(&[0, 1, 2], PieceKind::T));
        assert!(board.rows[1..].iter().flatten().all(|b| b.is_empty()));
    }

    #[test]
    fn test_clear_lines_none() {
        let mut board = Board::INITIAL;
        board.rows[19] = row_with(&[0, 1, 2, 3, 4, 5, 6, 7, 8], PieceKind::L);
        let before = board.clone();
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_lines_preserves_order() {
        let mut board = Board::INITIAL;
        let marker_a = row_with(&[0], PieceKind::J);
        let marker_b = row_with(&[9], PieceKind::L);
        // Bottom of the board, top to bottom: A, full, empty, full, full, B.
        board.rows[14] = marker_a;
        board.rows[15] = FULL;
        board.rows[16] = [Block::Empty; Board::WIDTH];
        board.rows[17] = FULL;
        board.rows[18] = FULL;
        board.rows[19] = marker_b;

        assert_eq!(board.clear_lines(), 3);

        assert_eq!(board.rows[19], marker_b);
        assert_eq!(board.rows[18], [Block::Empty; Board::WIDTH]);
        assert_eq!(board.rows[17], marker_a);
        assert!(board.rows[..17].iter().flatten().all(|b| b.is_empty()));
    }

    #[test]
    fn test_clear_lines_full_partial_full_full() {
        let mut board = Board::INITIAL;
        let marker = row_with(&[2, 7], PieceKind::O);
        board.rows[0] = marker;
        board.rows[16] = FULL;
        board.rows[17] = row_with(&[4], PieceKind::T);
        board.rows[18] = FULL;
        board.rows[19] = FULL;

        assert_eq!(board.clear_lines(), 3);
        assert_eq!(board.rows[19], row_with(&[4], PieceKind::T));
        assert_eq!(board.rows[3], marker);
        assert!(board.rows[..3].iter().flatten().all(|b| b.is_empty()));
    }

    #[test]
    fn test_clear_two_of_four_rows() {
        // Rows [full, partial, full, partial] at the bottom: two removed, two empty
        // rows inserted on top, partial rows keep their relative order.
        let mut board = Board::INITIAL;
        let upper = row_with(&[1, 2], PieceKind::S);
        let lower = row_with(&[8], PieceKind::Z);
        board.rows[16] = FULL;
        board.rows[17] = upper;
        board.rows[18] = FULL;
        board.rows[19] = lower;

        assert_eq!(board.clear_lines(), 2);
        assert_eq!(board.rows[18], upper);
        assert_eq!(board.rows[19], lower);
        assert!(board.rows[..18].iter().flatten().all(|b| b.is_empty()));
    }

    #[test]
    fn test_clear_lines_all_filled() {
        let mut board = Board::INITIAL;
        board.rows = [FULL; Board::HEIGHT];
        assert_eq!(board.clear_lines(), Board::HEIGHT);
        assert_eq!(board, Board::INITIAL);
    }

    #[test]
    fn test_clear() {
        let mut board = Board::INITIAL;
        board.rows[10] = FULL;
        board.clear();
        assert_eq!(board, Board::INITIAL);
    }
}
