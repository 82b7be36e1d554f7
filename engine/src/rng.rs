//! xorshift64* generator used by every worker
//!
//! Single u64 of state, a handful of shifts and one multiply per output.
//! Not cryptographically secure; plenty for hand sampling and frequency checks.

/// Multiplier applied to the scrambled state on every output.
const MULTIPLIER: u64 = 0x2545_F491_4F6C_DD1D;

/// Replacement for a zero seed. An all-zero xorshift state is a fixed point.
const ZERO_SEED_REPLACEMENT: u64 = 0x9E37_79B9_7F4A_7C15;

/// xorshift64* pseudo-random generator
#[derive(Debug, Clone)]
pub struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    /// Create from seed. A zero seed is remapped to a fixed non-zero constant.
    #[inline]
    pub fn new(seed: u64) -> Self {
        XorShift64Star { state: heal(seed) }
    }

    /// Replace the state, remapping zero like `new`.
    #[inline]
    pub fn reseed(&mut self, seed: u64) {
        self.state = heal(seed);
    }

    /// Current raw state (never zero)
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Generate next u64.
    #[inline(always)]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(MULTIPLIER)
    }

    /// Value in `[0, bound)`. `bound` must be non-zero.
    #[inline(always)]
    pub fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

#[inline(always)]
fn heal(seed: u64) -> u64 {
    if seed == 0 {
        ZERO_SEED_REPLACEMENT
    } else {
        seed
    }
}

/// SplitMix64 finalizer: spreads a (seed, stream) pair over the whole u64 range.
///
/// Used to derive uncorrelated per-worker and per-chunk seeds from one base seed.
pub fn mix(seed: u64, stream: u64) -> u64 {
    let mut z = seed ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
