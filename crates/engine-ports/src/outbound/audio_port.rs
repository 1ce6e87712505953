//! Audio dispatch port: the engine emits `AudioEffect` descriptors and
//! never awaits playback itself -- the Host dispatches them here, and
//! completion comes back through the `SET_AUDIO_PLAYING` intent, not
//! through this port's return value.

use async_trait::async_trait;

use nightfall_protocol::AudioEffect;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AudioDispatchPort: Send + Sync {
    async fn dispatch(&self, effect: AudioEffect);
}
