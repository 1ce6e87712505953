//! Thread-local RNG adapter (seer-label-map seeding, tie-break jitter).
//! Implements `RandomPort` using `rand::thread_rng()`.

use rand::Rng;

use nightfall_engine_ports::RandomPort;

#[derive(Debug, Clone, Default)]
pub struct ThreadRandomPort;

impl ThreadRandomPort {
    pub fn new() -> Self {
        Self
    }
}

impl RandomPort for ThreadRandomPort {
    fn random_f64(&self) -> f64 {
        rand::thread_rng().gen()
    }

    fn random_range(&self, min: i32, max: i32) -> i32 {
        rand::thread_rng().gen_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_range_stays_in_bounds() {
        let rng = ThreadRandomPort::new();
        for _ in 0..100 {
            let value = rng.random_range(1, 6);
            assert!((1..=6).contains(&value));
        }
    }
}
