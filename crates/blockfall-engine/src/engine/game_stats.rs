use std::time::Duration;

/// Score values for line clears, before the level multiplier.
///
/// Index corresponds to number of lines cleared simultaneously.
const SCORE_TABLE: [usize; 5] = [0, 40, 100, 300, 1200];

/// Gravity interval per level, starting at level 1.
const GRAVITY_TABLE: [Duration; 10] = [
    Duration::from_millis(1000),
    Duration::from_millis(850),
    Duration::from_millis(700),
    Duration::from_millis(550),
    Duration::from_millis(450),
    Duration::from_millis(350),
    Duration::from_millis(275),
    Duration::from_millis(200),
    Duration::from_millis(150),
    Duration::from_millis(100),
];

/// Game progression: score, level, lines and the speed curve.
///
/// # Scoring
///
/// A lock that clears `n` rows adds `SCORE_TABLE[n] * level` points, using the
/// level the rows were cleared at. After adding the lines, the level goes up by
/// one if `lines / 10 >= level`, up to [`MAX_LEVEL`](Self::MAX_LEVEL).
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    total_cleared_lines: usize,
    completed_pieces: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Highest reachable level; one per gravity table entry.
    pub const MAX_LEVEL: usize = GRAVITY_TABLE.len();

    /// Creates a tracker at level 1 with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            total_cleared_lines: 0,
            completed_pieces: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns a histogram of locks by number of lines cleared (`[0]` to `[4]`).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Time between automatic one-row drops at the current level.
    #[must_use]
    pub const fn gravity_interval(&self) -> Duration {
        let index = self.level.saturating_sub(1);
        if index < GRAVITY_TABLE.len() {
            GRAVITY_TABLE[index]
        } else {
            GRAVITY_TABLE[GRAVITY_TABLE.len() - 1]
        }
    }

    /// Updates progression after a piece locks.
    ///
    /// # Arguments
    ///
    /// * `cleared_lines` - Number of lines cleared by the lock (0-4)
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        if let Some(counter) = self.line_cleared_counter.get_mut(cleared_lines) {
            *counter += 1;
        }
        if cleared_lines == 0 {
            return;
        }

        let base = SCORE_TABLE[cleared_lines.min(SCORE_TABLE.len() - 1)];
        self.score += base * self.level;
        self.total_cleared_lines += cleared_lines;
        if self.total_cleared_lines / 10 >= self.level && self.level < Self::MAX_LEVEL {
            self.level += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_stats() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.total_cleared_lines(), 0);
        assert_eq!(stats.gravity_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_single_at_level_1() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(1);
        assert_eq!(stats.score(), 40);
        assert_eq!(stats.total_cleared_lines(), 1);
    }

    #[test]
    fn test_tetris_at_level_3() {
        let mut stats = GameStats::new();
        for _ in 0..5 {
            stats.complete_piece_drop(4);
        }
        assert_eq!(stats.level(), 3);
        let before = stats.score();
        stats.complete_piece_drop(4);
        assert_eq!(stats.score() - before, 3600);
    }

    #[test]
    fn test_zero_line_lock_only_counts_piece() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(0);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.completed_pieces(), 1);
        assert_eq!(stats.line_cleared_counter(), &[1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_level_up_at_ten_lines() {
        let mut stats = GameStats::new();
        for _ in 0..9 {
            stats.complete_piece_drop(1);
        }
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.gravity_interval(), Duration::from_millis(1000));

        stats.complete_piece_drop(1);
        assert_eq!(stats.total_cleared_lines(), 10);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.gravity_interval(), Duration::from_millis(850));
        // The tenth line was scored at level 1.
        assert_eq!(stats.score(), 400);
    }

    #[test]
    fn test_at_most_one_level_per_lock() {
        let mut stats = GameStats::new();
        for _ in 0..7 {
            stats.complete_piece_drop(4);
        }
        // 28 lines would be level 3 by lines alone, one step per lock gets there too.
        assert_eq!(stats.level(), 3);

        let mut stats = GameStats::new();
        stats.total_cleared_lines = 29;
        stats.complete_piece_drop(1);
        assert_eq!(stats.level(), 2);
    }

    #[test]
    fn test_level_caps_at_table_length() {
        let mut stats = GameStats::new();
        for _ in 0..100 {
            stats.complete_piece_drop(4);
        }
        assert_eq!(stats.level(), GameStats::MAX_LEVEL);
        assert_eq!(stats.gravity_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_gravity_interval_clamps() {
        let stats = GameStats {
            level: 42,
            ..GameStats::new()
        };
        assert_eq!(stats.gravity_interval(), Duration::from_millis(100));
    }
}
