//! Closed set of client-submitted intents. Intents are the only
//! write path; handlers in `nightfall-engine` dispatch on this tag
//! exhaustively as a sum type rather than a dynamic discriminated union.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use nightfall_domain::{RoleId, Seat, SchemaId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Intent {
    TakeSeat { seat: Seat },
    LeaveSeat,
    ClearAllSeats,
    UpdateTemplate { roles: Vec<RoleId> },
    AssignRoles,
    StartNight,
    MarkViewedRole,
    SubmitAction {
        schema_id: SchemaId,
        #[serde(default)]
        target: Option<Seat>,
        #[serde(default)]
        targets: Option<Vec<Seat>>,
        #[serde(default)]
        step_results: Option<BTreeMap<String, Option<Seat>>>,
    },
    SubmitWolfVote {
        #[serde(default)]
        target: Option<Seat>,
    },
    SubmitRevealAck,
    RequestSnapshot { request_id: String },
    SetAudioPlaying { playing: bool },
    EndNight,
    RestartGame,
    ForceSync,
}

impl Intent {
    pub fn kind(&self) -> nightfall_domain::IntentKind {
        use nightfall_domain::IntentKind as K;
        match self {
            Intent::TakeSeat { .. } => K::TakeSeat,
            Intent::LeaveSeat => K::LeaveSeat,
            Intent::ClearAllSeats => K::ClearAllSeats,
            Intent::UpdateTemplate { .. } => K::UpdateTemplate,
            Intent::AssignRoles => K::AssignRoles,
            Intent::StartNight => K::StartNight,
            Intent::MarkViewedRole => K::MarkViewedRole,
            Intent::SubmitAction { .. } => K::SubmitAction,
            Intent::SubmitWolfVote { .. } => K::SubmitWolfVote,
            Intent::SubmitRevealAck => K::SubmitRevealAck,
            Intent::RequestSnapshot { .. } => K::RequestSnapshot,
            Intent::SetAudioPlaying { .. } => K::SetAudioPlaying,
            Intent::EndNight => K::EndNight,
            Intent::RestartGame => K::RestartGame,
            Intent::ForceSync => K::ForceSync,
        }
    }
}
