use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the queue's random number generator. Using the same seed
/// produces the same sequence of pieces. The textual form is 32 hexadecimal
/// digits, used both by [`FromStr`]/[`Display`](fmt::Display) and by serde.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceQueue, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut queue1 = PieceQueue::with_seed(seed);
/// let mut queue2 = PieceQueue::with_seed(seed.to_string().parse().unwrap());
///
/// assert_eq!(queue1.pop_next(), queue2.pop_next());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

/// Error returned when parsing a [`PieceSeed`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid seed: expected 32 hex digits, got {len} characters")]
    InvalidLength { len: usize },
    #[display("invalid seed: {text:?} is not hexadecimal")]
    InvalidDigit { text: String },
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::InvalidLength { len: s.len() });
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError::InvalidDigit { text: s.to_owned() });
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|_| ParsePieceSeedError::InvalidDigit { text: s.to_owned() })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Upcoming pieces, generated with bag randomization.
///
/// # Bag randomization
///
/// Each refill appends one shuffled permutation of all seven piece types, so
/// every type shows up once per bag and no type is ever absent for long.
/// The queue refills itself before a pop whenever fewer than
/// [`LOOKAHEAD`](Self::LOOKAHEAD) pieces remain.
///
/// A new queue is empty; the first [`pop_next`](Self::pop_next) fills it.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
///
/// use blockfall_engine::PieceQueue;
///
/// let mut queue = PieceQueue::new();
/// let bag: HashSet<_> = (0..7).map(|_| queue.pop_next()).collect();
/// assert_eq!(bag.len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    queue: VecDeque<PieceKind>,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceQueue {
    /// Minimum number of queued pieces kept before popping.
    pub const LOOKAHEAD: usize = 5;

    /// Creates an empty queue with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            queue: VecDeque::with_capacity(PieceKind::LEN + Self::LOOKAHEAD),
        }
    }

    /// Appends one shuffled bag of all seven piece types.
    pub fn fill(&mut self) {
        let mut bag = PieceKind::ALL;
        bag.shuffle(&mut self.rng);
        self.queue.extend(bag);
    }

    /// Takes the next piece, refilling first if the queue is below the lookahead.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty after refilling (should never happen).
    pub fn pop_next(&mut self) -> PieceKind {
        if self.queue.len() < Self::LOOKAHEAD {
            self.fill();
        }
        self.queue
            .pop_front()
            .expect("piece queue should never be empty after refill")
    }

    /// Returns the head of the queue, i.e. the piece after the falling one.
    #[must_use]
    pub fn peek_next(&self) -> Option<PieceKind> {
        self.queue.front().copied()
    }

    /// Returns an iterator over the queued pieces in order.
    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drops all queued pieces. The random generator keeps its state.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
