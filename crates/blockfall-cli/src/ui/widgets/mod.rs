use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, key_binding_display::*, piece_display::*,
    session_display::*, session_stats_display::*,
};

mod block_display;
mod board_display;
mod key_binding_display;
mod piece_display;
mod session_display;
mod session_stats_display;

mod color {
    use blockfall_engine::PieceKind;
    use ratatui::style::Color;

    pub const YELLOW: Color = Color::Rgb(255, 209, 102);
    pub const RED: Color = Color::Rgb(248, 113, 113);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(60, 60, 60);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    /// Terminal color of a piece type, matching [`PieceKind::color`].
    pub const fn piece(kind: PieceKind) -> Color {
        match kind {
            PieceKind::I => Color::Rgb(0x00, 0xf5, 0xff),
            PieceKind::J => Color::Rgb(0x4c, 0x6e, 0xf5),
            PieceKind::L => Color::Rgb(0xf5, 0x9f, 0x00),
            PieceKind::O => Color::Rgb(0xff, 0xd1, 0x66),
            PieceKind::S => Color::Rgb(0x4a, 0xde, 0x80),
            PieceKind::T => Color::Rgb(0xa8, 0x55, 0xf7),
            PieceKind::Z => Color::Rgb(0xf8, 0x71, 0x71),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_piece_colors_match_engine_palette() {
            for kind in PieceKind::ALL {
                let parsed: Color = kind.color().parse().unwrap();
                assert_eq!(parsed, piece(kind), "{kind:?}");
            }
        }
    }
}

pub mod style {
    use blockfall_engine::PieceKind;
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::BLACK);

    pub const fn piece(kind: PieceKind) -> Style {
        bg_only(color::piece(kind))
    }

    /// Outline of the landing position, drawn in the piece's own color.
    pub const fn ghost(kind: PieceKind) -> Style {
        fg_bg(color::piece(kind), color::BLACK)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
