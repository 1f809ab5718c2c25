//! Park–Miller "minimal standard" generator.
//!
//! The recurrence is `seed = 16807 * seed mod (2^31 - 1)`, evaluated with
//! Schrage's decomposition so no intermediate leaves the `i32` range. The
//! sequence is fixed forever: benchmark instances generated today must be
//! the same instances generated tomorrow.
//!
//! # References
//!
//! - Park & Miller (1988), "Random Number Generators: Good Ones Are Hard to Find"
//! - Schrage (1979), "A More Portable Fortran Random Number Generator"

use rand::RngCore;

const MODULUS: i32 = 2_147_483_647;
const MULTIPLIER: i32 = 16_807;
const QUOTIENT: i32 = 127_773; // MODULUS / MULTIPLIER
const REMAINDER: i32 = 2_836; // MODULUS % MULTIPLIER

/// Deterministic linear congruential generator with explicit seed state.
///
/// # Examples
///
/// ```
/// use u_tsp_exact::instance::MinStd;
///
/// let mut rng = MinStd::new(1);
/// assert_eq!(rng.next_below(20_000), 16_807);
/// assert_eq!(rng.next_below(20_000), 15_249);
/// assert_eq!(rng.seed(), 282_475_249);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinStd {
    state: i32,
}

impl MinStd {
    /// Default seed.
    pub const DEFAULT_SEED: u32 = 1;

    /// Creates a generator. Seeds are reduced modulo `2^31 - 1`; a seed that
    /// reduces to 0 (a fixed point of the recurrence) is replaced by 1.
    pub fn new(seed: u32) -> Self {
        let reduced = (seed % MODULUS as u32) as i32;
        Self {
            state: if reduced == 0 { 1 } else { reduced },
        }
    }

    /// Current seed state. Feeding it back into [`MinStd::new`] resumes the
    /// sequence exactly where it stopped.
    pub fn seed(&self) -> u32 {
        self.state as u32
    }

    /// Advances the state and returns it, in `[1, 2^31 - 2]`.
    pub fn step(&mut self) -> i32 {
        let next = MULTIPLIER * (self.state % QUOTIENT) - REMAINDER * (self.state / QUOTIENT);
        self.state = if next > 0 { next } else { next + MODULUS };
        self.state
    }

    /// Returns a value in `[0, bound - 1]`.
    ///
    /// # Panics
    /// Panics if `bound` is zero.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "next_below requires a positive bound");
        self.step() as u32 % bound
    }
}

impl Default for MinStd {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

/// Exposes the raw 31-bit state sequence to the `rand` ecosystem.
impl RngCore for MinStd {
    fn next_u32(&mut self) -> u32 {
        self.step() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
