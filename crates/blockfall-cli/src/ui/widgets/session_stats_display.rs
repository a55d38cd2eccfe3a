use std::time::Duration;

use blockfall_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Cell, Row, Table, Widget},
};

use crate::ui::widgets::style;

const LABEL_WIDTH: u16 = 8;
const VALUE_WIDTH: u16 = 11;

/// Stats panel: score and time, progression with the current fall speed, and
/// how many locks cleared one to four lines.
pub struct SessionStatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        LABEL_WIDTH + 1 + VALUE_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        let lines = u16::try_from(stat_lines(self.session).len()).unwrap_or(u16::MAX);
        lines + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Panel content; `None` is a spacer line between groups.
fn stat_lines(session: &GameSession) -> Vec<Option<(&'static str, String)>> {
    let stats = session.stats();
    let clears = stats.line_cleared_counter();
    vec![
        Some(("SCORE", stats.score().to_string())),
        Some(("TIME", format_play_time(session.play_time()))),
        None,
        Some(("LEVEL", stats.level().to_string())),
        Some(("LINES", stats.total_cleared_lines().to_string())),
        Some(("SPEED", format!("{}ms", stats.gravity_interval().as_millis()))),
        None,
        Some(("PIECES", stats.completed_pieces().to_string())),
        Some(("SINGLE", clears[1].to_string())),
        Some(("DOUBLE", clears[2].to_string())),
        Some(("TRIPLE", clears[3].to_string())),
        Some(("TETRIS", clears[4].to_string())),
    ]
}

/// `m:ss.cc`
fn format_play_time(time: Duration) -> String {
    let secs = time.as_secs();
    format!(
        "{}:{:02}.{:02}",
        secs / 60,
        secs % 60,
        time.subsec_millis() / 10
    )
}

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows = stat_lines(self.session).into_iter().map(|line| match line {
            None => Row::default(),
            Some((label, value)) => Row::new([
                Cell::from(label),
                Cell::from(Line::from(value).right_aligned()),
            ]),
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(LABEL_WIDTH),
                Constraint::Length(VALUE_WIDTH),
            ],
        )
        .column_spacing(1)
        .style(style::DEFAULT);

        Widget::render(table, area, buf);
    }
}
