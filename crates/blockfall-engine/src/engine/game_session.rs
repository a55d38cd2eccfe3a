use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{
    board::Board,
    piece::{Piece, PieceKind, RotationDirection},
};

use super::{
    Command, GameSnapshot, GameStats, PieceSeed,
    game_field::{DropOutcome, GameField},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::IsVariant)]
pub enum SessionState {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl SessionState {
    /// Returns whether a command has any effect in this state.
    ///
    /// ```
    /// use blockfall_engine::{Command, SessionState};
    ///
    /// assert!(SessionState::Running.accepts(Command::HardDrop));
    /// assert!(!SessionState::Paused.accepts(Command::HardDrop));
    /// assert!(SessionState::GameOver.accepts(Command::Restart));
    /// ```
    #[must_use]
    pub const fn accepts(self, command: Command) -> bool {
        match self {
            SessionState::NotStarted => matches!(command, Command::Start),
            SessionState::Running => {
                command.is_piece_control() || matches!(command, Command::TogglePause)
            }
            SessionState::Paused => matches!(command, Command::Resume | Command::TogglePause),
            SessionState::GameOver => matches!(command, Command::Restart),
        }
    }
}

/// One game session: the field, its progression and the phase state machine.
///
/// The session is driven from outside. The host calls [`tick`](Self::tick)
/// once per frame with a monotonic timestamp and forwards player input through
/// [`handle_command`](Self::handle_command).
///
/// # Timing
///
/// While running, the time between consecutive ticks accumulates in a drop
/// buffer. Once the buffer exceeds the gravity interval of the current level,
/// the falling piece moves down one row and the buffer restarts from zero.
/// The first tick after starting or resuming only records the time base, so
/// time spent paused never counts.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{Command, GameSession, SessionState};
///
/// let mut session = GameSession::new();
/// assert!(session.handle_command(Command::Start));
/// assert_eq!(session.session_state(), SessionState::Running);
///
/// session.tick(Duration::ZERO);
/// session.tick(Duration::from_millis(1001));
/// assert_eq!(session.falling_piece().unwrap().position().y(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    session_state: SessionState,
    last_tick: Option<Duration>,
    drop_buffer: Duration,
    play_time: Duration,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::from_field(GameField::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_field(GameField::with_seed(seed))
    }

    fn from_field(field: GameField) -> Self {
        Self {
            field,
            stats: GameStats::new(),
            session_state: SessionState::NotStarted,
            last_tick: None,
            drop_buffer: Duration::ZERO,
            play_time: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    /// The falling piece, or `None` before the first game starts.
    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        (!self.session_state.is_not_started()).then(|| self.field.falling_piece())
    }

    /// Landing position of the falling piece, for drawing a ghost.
    #[must_use]
    pub fn simulate_drop_position(&self) -> Option<Piece> {
        self.falling_piece()
            .map(|piece| piece.simulate_drop_position(self.field.board()))
    }

    /// The piece after the falling one, for a "next" preview.
    #[must_use]
    pub fn next_piece(&self) -> Option<PieceKind> {
        if self.session_state.is_not_started() {
            return None;
        }
        self.field.next_piece()
    }

    /// Total running time, excluding pauses.
    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    /// Owned copy of everything a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(self)
    }

    /// Advances the simulation to `now`.
    ///
    /// `now` must not go backwards between calls; a smaller value counts as no
    /// elapsed time. Does nothing unless the session is running.
    ///
    /// The first tick after a start, restart or resume only records `now` as the
    /// time base. Time between that command and the tick is not counted, since
    /// the session never reads a clock itself; hosts that tick every frame lose
    /// at most one frame.
    pub fn tick(&mut self, now: Duration) {
        if !self.session_state.is_running() {
            return;
        }
        let elapsed = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_tick = Some(now);
        self.play_time += elapsed;
        self.drop_buffer += elapsed;
        if self.drop_buffer > self.stats.gravity_interval() {
            self.soft_drop();
        }
    }

    /// Applies a player command.
    ///
    /// Returns `false` if the command is not accepted in the current state; it
    /// is then ignored. An accepted move or rotation may still be refused by
    /// the board, in which case the piece stays where it is.
    pub fn handle_command(&mut self, command: Command) -> bool {
        if !self.session_state.accepts(command) {
            return false;
        }
        match command {
            Command::Start | Command::Restart => self.restart(),
            Command::MoveLeft => _ = self.field.try_move_left(),
            Command::MoveRight => _ = self.field.try_move_right(),
            Command::Rotate => _ = self.field.try_rotate(RotationDirection::Clockwise),
            Command::RotateCounterClockwise => {
                _ = self.field.try_rotate(RotationDirection::CounterClockwise);
            }
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::TogglePause => self.toggle_pause(),
            Command::Resume => self.resume(),
        }
        true
    }

    /// Resets everything and starts a new game.
    fn restart(&mut self) {
        self.stats = GameStats::new();
        self.drop_buffer = Duration::ZERO;
        self.play_time = Duration::ZERO;
        self.last_tick = None;
        self.session_state = match self.field.reset() {
            Ok(()) => SessionState::Running,
            Err(_) => SessionState::GameOver,
        };
    }

    fn toggle_pause(&mut self) {
        match self.session_state {
            SessionState::Running => {
                self.session_state = SessionState::Paused;
                self.last_tick = None;
            }
            SessionState::Paused => self.resume(),
            SessionState::NotStarted | SessionState::GameOver => {}
        }
    }

    fn resume(&mut self) {
        self.session_state = SessionState::Running;
        self.last_tick = None;
    }

    fn soft_drop(&mut self) {
        let outcome = self.field.soft_drop();
        self.apply_drop(outcome);
    }

    fn hard_drop(&mut self) {
        let outcome = self.field.hard_drop();
        self.apply_drop(outcome);
    }

    fn apply_drop(&mut self, outcome: DropOutcome) {
        self.drop_buffer = Duration::ZERO;
        match outcome {
            DropOutcome::Moved => {}
            DropOutcome::Locked { cleared_lines } => self.stats.complete_piece_drop(cleared_lines),
            DropOutcome::ToppedOut { cleared_lines } => {
                self.stats.complete_piece_drop(cleared_lines);
                self.session_state = SessionState::GameOver;
            }
        }
    }
}
