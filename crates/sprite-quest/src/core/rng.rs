//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, so mini-game targets are reproducible in tests.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        (self.next_u64() % upper_bound.max(1) as u64) as u32
    }

    /// Generate a random integer in [low, high).
    pub fn range(&mut self, low: i32, high: i32) -> i32 {
        let span = (high - low).max(1) as u32;
        low + self.next_int(span) as i32
    }
}
