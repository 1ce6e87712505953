//! Wire-shape types shared verbatim by engine and player crates. No
//! game logic lives here -- only the envelopes and the closed intent set.

pub mod audio;
pub mod envelope;
pub mod intent;

pub use audio::{resolve_seer_audio_key, AudioEffect};
pub use envelope::{ClientEnvelope, ClientEnvelopeTag, ServerEnvelope};
pub use intent::Intent;
