use std::{array, iter};

use blockfall_engine::{Block, Board, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::BlockDisplay;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<Piece>,
    falling_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            falling_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: Option<Piece>) -> Self {
        Self {
            ghost: piece,
            ..self
        }
    }

    pub fn falling_piece(self, piece: Option<&Piece>) -> Self {
        Self {
            falling_piece: piece.copied(),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        10 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        20 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    /// Board cells with the ghost and the falling piece drawn on top.
    fn cells(&self) -> [[BlockDisplay; Board::WIDTH]; Board::HEIGHT] {
        let mut cells = array::from_fn(|y| {
            array::from_fn(|x| BlockDisplay::from_block(self.board.cell(x, y), true))
        });
        let mut paint = |piece: &Piece, display: BlockDisplay| {
            for (x, y) in piece.occupied_positions() {
                if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
                    && let Some(cell) = cells.get_mut(y).and_then(|row| row.get_mut(x))
                {
                    *cell = display;
                }
            }
        };
        if let Some(ghost) = &self.ghost {
            paint(ghost, BlockDisplay::ghost(ghost.kind()));
        }
        if let Some(piece) = &self.falling_piece {
            paint(piece, BlockDisplay::from_block(Block::Piece(piece.kind()), true));
        }
        cells
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..Board::WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..Board::HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Board::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Board::WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.cells()) {
            for (grid_cell, block_display) in iter::zip(grid_row, row) {
                block_display.render(grid_cell, buf);
            }
        }
    }
}
