//! Private payloads delivered to a single uid.

use serde::{Deserialize, Serialize};

use crate::broadcast::BroadcastGameState;
use crate::ids::{Revision, Seat, Uid};
use crate::role::RoleId;
use crate::state::CheckResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockedReason {
    Nightmare,
}

/// Machine-readable rejection reasons. Never a free-form string -- the UI
/// layer localizes these, the engine never emits display copy beyond
/// `BLOCKED_UI_DEFAULTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    HostOnly,
    NoState,
    NotInRole,
    NotYourTurn,
    InvalidTarget,
    DuplicateVote,
    CanSkipViolation,
    ConstraintViolation,
    GameInProgress,
    StaleRevision,
    UnknownSchema,
    UnknownRole,
    BlockedByNightmare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentKind {
    TakeSeat,
    LeaveSeat,
    ClearAllSeats,
    UpdateTemplate,
    AssignRoles,
    StartNight,
    MarkViewedRole,
    SubmitAction,
    SubmitWolfVote,
    SubmitRevealAck,
    RequestSnapshot,
    SetAudioPlaying,
    EndNight,
    RestartGame,
    ForceSync,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivatePayload {
    WitchContext {
        killed_seat: Option<Seat>,
        can_save: bool,
        can_poison: bool,
    },
    SeerReveal {
        target_seat: Seat,
        result: CheckResult,
    },
    PsychicReveal {
        target_seat: Seat,
        result: CheckResult,
    },
    WolfRobotReveal {
        target_seat: Seat,
        is_hunter: bool,
    },
    GargoyleReveal {
        target_seat: Seat,
        result: CheckResult,
    },
    PureWhiteReveal {
        role: RoleId,
    },
    Blocked {
        reason: BlockedReason,
    },
    ActionRejected {
        action: IntentKind,
        reason: RejectReason,
    },
    /// Carries the caller's own view of the room so a reconnecting client
    /// can resync without waiting for the next broadcast. `request_id`
    /// echoes `REQUEST_SNAPSHOT`'s id (absent for `FORCE_SYNC`) so a
    /// client can discard a response older than its latest request.
    Snapshot {
        request_id: Option<String>,
        full_state: Box<BroadcastGameState>,
        own_role: Option<RoleId>,
    },
    /// Delivered once per seat at `ASSIGN_ROLES` time so a player learns
    /// their own role without it ever riding the recurring public
    /// broadcast (`players[seat].role` is only visible post-`Ended`).
    RoleAssigned {
        role: RoleId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateMessage {
    pub to_uid: Uid,
    pub revision: Revision,
    pub payload: PrivatePayload,
}
