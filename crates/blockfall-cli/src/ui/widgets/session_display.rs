use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// Full play field: stats on the left, board in the middle, next piece on the right.
///
/// Phases other than running get a popup over the board.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    show_ghost: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, show_ghost: bool) -> Self {
        Self {
            session,
            show_ghost,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    fn popup(&self) -> Option<(Vec<Line<'static>>, Style)> {
        match self.session.session_state() {
            SessionState::Running => None,
            SessionState::NotStarted => Some((
                vec![Line::from("PRESS SPACE"), Line::from("TO START")],
                Style::new().fg(color::BLACK).bg(color::WHITE),
            )),
            SessionState::Paused => Some((
                vec![Line::from("PAUSED")],
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            )),
            SessionState::GameOver => Some((
                vec![
                    Line::from("GAME OVER!!"),
                    Line::from(format!("SCORE: {}", self.session.stats().score())),
                ],
                Style::new().fg(color::WHITE).bg(color::RED),
            )),
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let style = style::DEFAULT;
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.session.session_state() {
            SessionState::NotStarted => color::GRAY,
            SessionState::Running => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };

        let game_board = {
            let ghost = if self.show_ghost {
                self.session.simulate_drop_position()
            } else {
                None
            };
            BoardDisplay::new(self.session.board())
                .falling_piece(self.session.falling_piece())
                .ghost(ghost)
                .block(Block::bordered().border_style(border_style).style(style))
        };
        let next_panel = PieceDisplay::new()
            .piece(self.session.next_piece())
            .block(
                Block::bordered()
                    .title(Line::from("NEXT").centered())
                    .padding(block_padding)
                    .border_style(border_style)
                    .style(style),
            );
        let session_stats = SessionStatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style),
        );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some((lines, style)) = self.popup() {
            let height = u16::try_from(lines.len()).unwrap_or(1);
            let block = Block::new().style(style);
            let text = Text::from(lines).style(style).centered();
            let area = board_area.centered(
                Constraint::Length(game_board_width),
                Constraint::Length(height + 2),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(height)), buf);
        }
    }
}
