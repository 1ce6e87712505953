//! System clock adapter. The Host's clock is the only source of truth
//! for the wolf-vote deadline.

use chrono::{DateTime, Utc};

use nightfall_engine_ports::ClockPort;

/// Production `ClockPort` backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClockPort;

impl SystemClockPort {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClockPort {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_monotonic_enough_for_two_calls() {
        let clock = SystemClockPort::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
