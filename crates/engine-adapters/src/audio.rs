//! Audio dispatch adapter. The real BGM/audio player is an external
//! collaborator reachable only through this port; this adapter logs the
//! descriptor and resolves immediately, standing in for "play this key,
//! await its end" until a real audio player is wired in.

use async_trait::async_trait;

use nightfall_engine_ports::AudioDispatchPort;
use nightfall_protocol::AudioEffect;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingAudioDispatchPort;

impl LoggingAudioDispatchPort {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioDispatchPort for LoggingAudioDispatchPort {
    async fn dispatch(&self, effect: AudioEffect) {
        if effect.is_end_audio {
            tracing::debug!(key = %effect.key, step = ?effect.step_id, "audio end");
        } else {
            tracing::debug!(key = %effect.key, step = ?effect.step_id, "audio begin");
        }
    }
}
