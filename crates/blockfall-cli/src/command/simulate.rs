use std::time::Duration;

use blockfall_engine::{Command, GameSession, GameSnapshot, PieceSeed};
use rand::{Rng as _, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;

/// Commands issued on frames that do not hard-drop.
const STEERING: &[Command] = &[
    Command::MoveLeft,
    Command::MoveRight,
    Command::Rotate,
    Command::RotateCounterClockwise,
    Command::SoftDrop,
];

/// One frame in this many ends with a hard drop.
const HARD_DROP_ODDS: u32 = 12;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed for the piece sequence and the random input, as 32 hex digits
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Stop after this many pieces have locked
    #[clap(long, default_value_t = 500)]
    max_pieces: usize,
    /// Simulated time between frames, in milliseconds
    #[clap(long, default_value_t = 16)]
    frame_ms: u64,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        max_pieces,
        frame_ms,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let (frames, snapshot) = simulate(seed, *max_pieces, Duration::from_millis(*frame_ms));

    eprintln!("seed: {seed}, frames: {frames}");
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Plays one session with random input on a synthetic clock.
///
/// Returns the number of frames run and the final state.
fn simulate(seed: PieceSeed, max_pieces: usize, frame: Duration) -> (u64, GameSnapshot) {
    let mut session = GameSession::with_seed(seed);
    let mut rng = Pcg32::from_seed(seed.to_bytes());
    let mut now = Duration::ZERO;
    let mut frames = 0;

    session.handle_command(Command::Start);
    while session.session_state().is_running()
        && session.stats().completed_pieces() < max_pieces
    {
        session.tick(now);
        let command = if rng.random_ratio(1, HARD_DROP_ODDS) {
            Command::HardDrop
        } else {
            STEERING.choose(&mut rng).copied().unwrap_or(Command::SoftDrop)
        };
        session.handle_command(command);
        now += frame;
        frames += 1;
    }

    (frames, session.snapshot())
}

#[cfg(test)]
mod tests {
    use blockfall_engine::SessionState;

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([42; 16]);

    #[test]
    fn test_stops_at_piece_limit() {
        let (_, snapshot) = simulate(SEED, 3, Duration::from_millis(16));
        assert_eq!(snapshot.state, SessionState::Running);
        assert_eq!(snapshot.completed_pieces, 3);
    }

    #[test]
    fn test_runs_until_game_over() {
        let (frames, snapshot) = simulate(SEED, usize::MAX, Duration::from_millis(16));
        assert_eq!(snapshot.state, SessionState::GameOver);
        assert!(frames > 0);
    }

    #[test]
    fn test_is_deterministic() {
        let a = simulate(SEED, 50, Duration::from_millis(5));
        let b = simulate(SEED, 50, Duration::from_millis(5));
        assert_eq!(a, b);
    }
}
