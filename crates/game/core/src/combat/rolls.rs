//! Injectable randomness for battles.
//!
//! The simulator never owns a generator. Callers pass a [`RollSource`]:
//! [`SeededRolls`] for live battles (deterministic per seed) or
//! [`FixedRolls`] to replay a recorded sequence.

/// Source of uniform rolls in `[0, 100)`.
pub trait RollSource {
    fn roll(&mut self) -> f64;

    /// `true` with probability `percent / 100`.
    fn chance(&mut self, percent: u32) -> bool {
        self.roll() < f64::from(percent)
    }
}

impl<R: RollSource + ?Sized> RollSource for &mut R {
    fn roll(&mut self) -> f64 {
        (**self).roll()
    }
}

/// PCG-XSH-RR stream over a 64-bit seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededRolls {
    state: u64,
}

impl SeededRolls {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        let state = self.state;
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RollSource for SeededRolls {
    fn roll(&mut self) -> f64 {
        f64::from(self.next_u32()) * 100.0 / 4_294_967_296.0
    }
}

/// Replays a recorded roll sequence, wrapping around when exhausted.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedRolls {
    rolls: Vec<f64>,
    cursor: usize,
}

impl FixedRolls {
    pub fn new(rolls: impl Into<Vec<f64>>) -> Self {
        Self {
            rolls: rolls.into(),
            cursor: 0,
        }
    }

    /// Rolls handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RollSource for FixedRolls {
    fn roll(&mut self) -> f64 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let value = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        value
    }
}

/// Derives an independent seed for one battle.
///
/// * `owner_seed` - per-creature or per-session seed
/// * `nonce` - battle sequence number
/// * `stream` - separates multiple roll streams in one battle (e.g. injury roll)
pub fn battle_seed(owner_seed: u64, nonce: u64, stream: u32) -> u64 {
    let mut hash = owner_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(stream).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
