//! Audio effect descriptors emitted by the Night Flow Controller.
//! The engine never awaits playback inline -- it emits a descriptor, the
//! Host dispatches it to the `AudioDispatchPort`, and playback
//! completion comes back as a `SET_AUDIO_PLAYING` reducer action.

use serde::{Deserialize, Serialize};

use nightfall_domain::SchemaId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioEffect {
    pub key: String,
    pub is_end_audio: bool,
    pub step_id: Option<SchemaId>,
    pub delay_ms: Option<u32>,
}

impl AudioEffect {
    pub fn begin(key: impl Into<String>, step_id: SchemaId) -> Self {
        Self {
            key: key.into(),
            is_end_audio: false,
            step_id: Some(step_id),
            delay_ms: None,
        }
    }

    pub fn end(key: impl Into<String>, step_id: SchemaId) -> Self {
        Self {
            key: key.into(),
            is_end_audio: true,
            step_id: Some(step_id),
            delay_ms: None,
        }
    }

    pub fn night_end(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            is_end_audio: true,
            step_id: None,
            delay_ms: None,
        }
    }
}

/// Maps `seer`/`mirrorSeer` to `seer_1`/`seer_2` audio keys when both roles
/// are present and a label map was assigned.
pub fn resolve_seer_audio_key(
    role: nightfall_domain::RoleId,
    label_map: &std::collections::BTreeMap<nightfall_domain::RoleId, u8>,
) -> String {
    match label_map.get(&role) {
        Some(1) => "seer_1".to_string(),
        Some(2) => "seer_2".to_string(),
        _ => "seer".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightfall_domain::RoleId;

    #[test]
    fn falls_back_to_plain_seer_key_without_label_map() {
        let map = std::collections::BTreeMap::new();
        assert_eq!(resolve_seer_audio_key(RoleId::Seer, &map), "seer");
    }

    #[test]
    fn resolves_labeled_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(RoleId::Seer, 1u8);
        map.insert(RoleId::MirrorSeer, 2u8);
        assert_eq!(resolve_seer_audio_key(RoleId::Seer, &map), "seer_1");
        assert_eq!(resolve_seer_audio_key(RoleId::MirrorSeer, &map), "seer_2");
    }
}
