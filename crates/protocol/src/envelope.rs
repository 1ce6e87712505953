//! Wire envelopes: public broadcast, private effect, and the client's
//! intent submission.

use serde::{Deserialize, Serialize};

use nightfall_domain::{BroadcastGameState, PrivatePayload, Revision, Uid};

use crate::intent::Intent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEnvelope {
    #[serde(rename = "STATE_UPDATE")]
    StateUpdate {
        revision: Revision,
        state: BroadcastGameState,
    },
    #[serde(rename = "PRIVATE_EFFECT")]
    PrivateEffect {
        #[serde(rename = "toUid")]
        to_uid: Uid,
        revision: Revision,
        payload: PrivatePayload,
    },
}

/// Singleton tag so the envelope serializes with a literal `"type": "INTENT"`
/// field without requiring serde's enum-only `tag` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientEnvelopeTag {
    #[serde(rename = "INTENT")]
    Intent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEnvelope {
    #[serde(rename = "type")]
    pub tag: ClientEnvelopeTag,
    pub intent: Intent,
    pub client_revision: Revision,
}

impl ClientEnvelope {
    pub fn new(intent: Intent, client_revision: Revision) -> Self {
        Self {
            tag: ClientEnvelopeTag::Intent,
            intent,
            client_revision,
        }
    }
}
