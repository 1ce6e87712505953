//! Random number generation port for engine-side services.
//!
//! Abstracts RNG so seer-label-map seeding and wolf-vote tie-break jitter
//! stay deterministic under test.
//!
//! Implementations:
//! - `ThreadRandomPort` in engine-adapters (production, uses `rand::thread_rng()`)
//! - `MockRandomPort` via mockall (testing)
//! - `FixedRandomPort` for deterministic testing (returns fixed values)
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Generate a random f64 in range [0.0, 1.0).
    fn random_f64(&self) -> f64;

    /// Generate a random i32 in range [min, max] (inclusive on both ends).
    fn random_range(&self, min: i32, max: i32) -> i32;
}

/// Returns values from a provided sequence, cycling if needed.
#[derive(Debug)]
pub struct FixedRandomPort {
    values: Vec<i32>,
    index: std::sync::atomic::AtomicUsize,
}

impl Clone for FixedRandomPort {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            index: std::sync::atomic::AtomicUsize::new(
                self.index.load(std::sync::atomic::Ordering::SeqCst),
            ),
        }
    }
}

impl FixedRandomPort {
    pub fn new(values: Vec<i32>) -> Self {
        Self {
            values,
            index: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn constant(value: i32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomPort for FixedRandomPort {
    fn random_f64(&self) -> f64 {
        let idx = self.index.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let value = self.values[idx % self.values.len()];
        (value as f64 / 100.0).clamp(0.0, 0.999999)
    }

    fn random_range(&self, min: i32, max: i32) -> i32 {
        let idx = self.index.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let value = self.values[idx % self.values.len()];
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_random_port_constant() {
        let rng = FixedRandomPort::constant(10);
        assert_eq!(rng.random_range(1, 20), 10);
        assert_eq!(rng.random_range(1, 6), 6);
        assert_eq!(rng.random_range(15, 20), 15);
    }

    #[test]
    fn fixed_random_port_sequence_cycles() {
        let rng = FixedRandomPort::new(vec![1, 5, 10, 20]);
        assert_eq!(rng.random_range(1, 20), 1);
        assert_eq!(rng.random_range(1, 20), 5);
        assert_eq!(rng.random_range(1, 20), 10);
        assert_eq!(rng.random_range(1, 20), 20);
        assert_eq!(rng.random_range(1, 20), 1);
    }
}
