use serde::{Deserialize, Serialize};

/// Player commands understood by [`GameSession`](super::GameSession).
///
/// Which commands take effect depends on the session state; see
/// [`SessionState::accepts`](super::SessionState::accepts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Command {
    /// Begin the first game.
    Start,
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    /// Rotate the falling piece a quarter turn clockwise.
    Rotate,
    /// Rotate the falling piece a quarter turn counter-clockwise.
    RotateCounterClockwise,
    /// Pause while running, resume while paused.
    TogglePause,
    Resume,
    /// Start over after game over.
    Restart,
}

impl Command {
    /// Returns whether this command manipulates the falling piece.
    #[must_use]
    pub const fn is_piece_control(self) -> bool {
        matches!(
            self,
            Command::MoveLeft
                | Command::MoveRight
                | Command::SoftDrop
                | Command::HardDrop
                | Command::Rotate
                | Command::RotateCounterClockwise
        )
    }
}
