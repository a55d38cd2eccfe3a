use serde::{Deserialize, Serialize};

use super::board::{Block, Board};

/// Enum representing the type of piece.
///
/// The discriminant is the cell value a locked piece leaves on the board, so
/// settled cells always hold a value in `1..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 1,
    /// J-piece.
    J = 2,
    /// L-piece.
    L = 3,
    /// O-piece.
    O = 4,
    /// S-piece.
    S = 5,
    /// T-piece.
    T = 6,
    /// Z-piece.
    Z = 7,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece types in catalog order.
    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Returns the cell value this piece writes into the board.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Looks up a piece kind by its cell value.
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_value(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_value(0), None);
    /// ```
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Returns the single character representation of this piece kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Color identifier of the piece as an `#rrggbb` string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            PieceKind::I => "#00f5ff",
            PieceKind::J => "#4c6ef5",
            PieceKind::L => "#f59f00",
            PieceKind::O => "#ffd166",
            PieceKind::S => "#4ade80",
            PieceKind::T => "#a855f7",
            PieceKind::Z => "#f87171",
        }
    }

    /// Returns a fresh copy of the catalog shape in spawn orientation.
    #[must_use]
    pub const fn shape(self) -> PieceShape {
        use Block::Empty as E;
        const EEEE: [Block; 4] = [Block::Empty; 4];
        let c = Block::Piece(self);
        match self {
            PieceKind::I => PieceShape::new(4, [EEEE, [c, c, c, c], EEEE, EEEE]),
            PieceKind::J => PieceShape::new(3, [[c, E, E, E], [c, c, c, E], EEEE, EEEE]),
            PieceKind::L => PieceShape::new(3, [[E, E, c, E], [c, c, c, E], EEEE, EEEE]),
            PieceKind::O => PieceShape::new(2, [[c, c, E, E], [c, c, E, E], EEEE, EEEE]),
            PieceKind::S => PieceShape::new(3, [[E, c, c, E], [c, c, E, E], EEEE, EEEE]),
            PieceKind::T => PieceShape::new(3, [[E, c, E, E], [c, c, c, E], EEEE, EEEE]),
            PieceKind::Z => PieceShape::new(3, [[c, c, E, E], [E, c, c, E], EEEE, EEEE]),
        }
    }
}

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Square cell matrix of a piece.
///
/// Only the top-left `size × size` corner of the 4×4 storage is meaningful:
/// 4 for the I-piece, 2 for the O-piece and 3 for every other piece.
/// Rotations are computed in place on that corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    size: usize,
    cells: [[Block; PieceShape::MAX_SIZE]; PieceShape::MAX_SIZE],
}

impl PieceShape {
    pub const MAX_SIZE: usize = 4;

    const fn new(size: usize, cells: [[Block; Self::MAX_SIZE]; Self::MAX_SIZE]) -> Self {
        assert!(size <= Self::MAX_SIZE);
        Self { size, cells }
    }

    /// Width (and height) of the matrix.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at `(x, y)` within the matrix.
    #[must_use]
    pub const fn cell(&self, x: usize, y: usize) -> Block {
        self.cells[y][x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Block]> + '_ {
        self.cells[..self.size].iter().map(|row| &row[..self.size])
    }

    /// Offsets `(dx, dy)` of the non-empty cells.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_empty())
                .map(move |(dx, _)| (dx, dy))
        })
    }

    /// Rotates the matrix a quarter turn in place.
    ///
    /// The matrix is transposed, then each row is reversed for a clockwise
    /// turn, or the order of the rows is reversed for a counter-clockwise turn.
    ///
    /// ```
    /// use blockfall_engine::{PieceKind, RotationDirection};
    ///
    /// let mut shape = PieceKind::T.shape();
    /// for _ in 0..4 {
    ///     shape.rotate(RotationDirection::Clockwise);
    /// }
    /// assert_eq!(shape, PieceKind::T.shape());
    /// ```
    pub fn rotate(&mut self, direction: RotationDirection) {
        let size = self.size;
        for y in 0..size {
            for x in 0..y {
                let (a, b) = (self.cells[y][x], self.cells[x][y]);
                self.cells[x][y] = a;
                self.cells[y][x] = b;
            }
        }
        match direction {
            RotationDirection::Clockwise => {
                for row in &mut self.cells[..size] {
                    row[..size].reverse();
                }
            }
            RotationDirection::CounterClockwise => self.cells[..size].reverse(),
        }
    }

    #[must_use]
    pub fn rotated(mut self, direction: RotationDirection) -> Self {
        self.rotate(direction);
        self
    }
}

/// Position of a piece's top-left matrix corner in board coordinates.
///
/// Coordinates are signed: a piece matrix may hang past the left wall or above
/// the top row as long as its occupied cells do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn to_coord(n: usize) -> i32 {
    n as i32
}

/// A piece on the board: its kind, its own (possibly rotated) copy of the
/// shape, and its position.
///
/// Movement and rotation return new `Piece` values; whether a move is legal is
/// decided against a [`Board`].
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind, RotationDirection};
///
/// let board = Board::INITIAL;
/// let piece = Piece::spawn(PieceKind::T);
/// assert_eq!((piece.position().x(), piece.position().y()), (4, 0));
/// assert!(!board.is_colliding(&piece));
///
/// let rotated = piece.rotated_with_kick(RotationDirection::Clockwise, &board);
/// assert!(rotated.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: PieceShape,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece in spawn orientation, horizontally centered on the top row.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        let shape = kind.shape();
        let x = to_coord(Board::WIDTH / 2) - to_coord(shape.size() / 2);
        Self {
            kind,
            shape,
            position: PiecePosition::new(x, 0),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &PieceShape {
        &self.shape
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub const fn with_position(self, position: PiecePosition) -> Self {
        Self { position, ..self }
    }

    /// Board coordinates of the occupied cells.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.occupied_positions().map(move |(dx, dy)| {
            (
                self.position.x() + to_coord(dx),
                self.position.y() + to_coord(dy),
            )
        })
    }

    #[must_use]
    pub const fn shifted(self, dx: i32, dy: i32) -> Self {
        self.with_position(self.position.offset(dx, dy))
    }

    #[must_use]
    pub const fn left(self) -> Self {
        self.shifted(-1, 0)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        self.shifted(1, 0)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        self.shifted(0, 1)
    }

    /// Rotates the shape in place, keeping the position.
    #[must_use]
    pub fn rotated(self, direction: RotationDirection) -> Self {
        Self {
            shape: self.shape.rotated(direction),
            ..self
        }
    }

    /// Rotates the piece, kicking it sideways if the rotated shape collides.
    ///
    /// Kicks are applied cumulatively with offsets `+1, -2, +3, -4, ...`, so the
    /// tried columns are `x + 1`, `x - 1`, `x + 2`, ... The search stops once
    /// the next offset exceeds the shape width; `None` means the rotation is
    /// abandoned and the caller keeps the original piece.
    #[must_use]
    pub fn rotated_with_kick(self, direction: RotationDirection, board: &Board) -> Option<Self> {
        let mut piece = self.rotated(direction);
        let width = to_coord(piece.shape.size());
        let mut offset = 1;
        while board.is_colliding(&piece) {
            piece = piece.shifted(offset, 0);
            offset = -(offset + offset.signum());
            if offset > width {
                return None;
            }
        }
        Some(piece)
    }

    /// Returns where the piece would lock if dropped straight down.
    #[must_use]
    pub fn simulate_drop_position(&self, board: &Board) -> Self {
        let mut dropped = *self;
        while !board.is_colliding(&dropped.down()) {
            dropped = dropped.down();
        }
        dropped
    }
}
