//! Identifier newtypes.
//!
//! `Uid` stays a plain `String` since uids are supplied by an external
//! identity provider, not minted here; `Seat`/`Revision` are bare integers
//! since they are ordinal, not opaque.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, globally unique participant identifier handed to us by the
/// identity provider.
pub type Uid = String;

/// Seat number, unique within a room. `0..N-1`.
pub type Seat = u8;

/// Monotonically increasing broadcast revision.
pub type Revision = u64;

/// A 4-digit decimal room code, unique among ongoing rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomCode(u16);

impl RoomCode {
    /// Construct from a raw numeric value, failing if it does not fit the
    /// 4-digit decimal format (`0000..=9999`).
    pub fn new(value: u16) -> Option<Self> {
        if value <= 9999 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomCodeParseError;

impl fmt::Display for RoomCodeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room code must be a 4-digit number")
    }
}

impl std::error::Error for RoomCodeParseError {}

impl std::str::FromStr for RoomCode {
    type Err = RoomCodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u16 = s.parse().map_err(|_| RoomCodeParseError)?;
        Self::new(value).ok_or(RoomCodeParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_zero_padded_four_digits() {
        let code = RoomCode::new(7).unwrap();
        assert_eq!(code.to_string(), "0007");
    }

    #[test]
    fn rejects_values_above_four_digits() {
        assert!(RoomCode::new(10_000).is_none());
        assert!(RoomCode::new(9_999).is_some());
    }
}
