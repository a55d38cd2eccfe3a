use blockfall_engine::PieceSeed;

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;
mod input;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Frames (ticks and renders) per second
    #[clap(long, default_value_t = 60.0)]
    pub(crate) fps: f64,
    /// Seed for the piece sequence, as 32 hex digits (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Do not draw the landing position of the falling piece
    #[clap(long)]
    pub(crate) no_ghost: bool,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            fps: 60.0,
            seed: None,
            no_ghost: false,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        fps,
        seed,
        no_ghost,
    } = arg;

    anyhow::ensure!(
        fps.is_finite() && *fps > 0.0,
        "fps must be a positive number, got {fps}"
    );

    let mut app = PlayApp::new(*fps, *seed, !no_ghost);
    Tui::new().run(&mut app)
}
