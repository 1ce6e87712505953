//! Core domain types for the night-one werewolf host engine: the
//! schema-driven action model and the authoritative `GameState` it
//! operates on. Pure data + invariants; no I/O, no async.

pub mod broadcast;
pub mod error;
pub mod ids;
pub mod night_plan;
pub mod player;
pub mod private;
pub mod role;
pub mod schema;
pub mod state;

pub use broadcast::{BroadcastGameState, PlayerPublic, WolfVoteStatusEntry, SENSITIVE_FIELD_NAMES};
pub use error::DomainError;
pub use ids::{Revision, RoomCode, RoomCodeParseError, Seat, Uid};
pub use night_plan::{NightPlan, NightPlanStep};
pub use player::Player;
pub use private::{BlockedReason, IntentKind, PrivateMessage, PrivatePayload, RejectReason};
pub use role::{role_spec, Faction, Night1Descriptor, RoleId, RoleSpec};
pub use schema::{
    ActionSchema, ActionSchemaKind, CompoundStep, CompoundStepKind, RevealKind, SchemaId,
    SchemaUi, SeatConstraint, VoteResolution,
};
pub use state::{
    AckKey, ActionInput, CheckResult, ConfirmStatus, CurrentNightResults, GameState,
    RecordedAction, RoomStatus, WitchContext,
};
