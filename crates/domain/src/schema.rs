//! Action schemas: the single source of truth for both validation rules and
//! UI copy. A schema never stores display strings beyond the neutral
//! `SchemaUi` -- wording localization is an external collaborator.

use serde::{Deserialize, Serialize};

/// Closed set of action schema identifiers. A tagged union rather than a
/// free-form string, matched exhaustively instead of dispatched on a
/// discriminant string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemaId {
    NightmareBlock,
    WolfKill,
    GuardProtect,
    WitchAction,
    SeerCheck,
    PsychicCheck,
    PiperHypnotize,
    MagicianSwap,
    GargoyleCheck,
    WolfRobotLearn,
    DreamcatcherBind,
    PureWhiteCheck,
    HunterConfirm,
    DarkWolfKingConfirm,
    BloodMoonConfirm,
}

impl SchemaId {
    pub const ALL: &'static [SchemaId] = &[
        SchemaId::NightmareBlock,
        SchemaId::WolfKill,
        SchemaId::GuardProtect,
        SchemaId::WitchAction,
        SchemaId::SeerCheck,
        SchemaId::PsychicCheck,
        SchemaId::PiperHypnotize,
        SchemaId::MagicianSwap,
        SchemaId::GargoyleCheck,
        SchemaId::WolfRobotLearn,
        SchemaId::DreamcatcherBind,
        SchemaId::PureWhiteCheck,
        SchemaId::HunterConfirm,
        SchemaId::DarkWolfKingConfirm,
        SchemaId::BloodMoonConfirm,
    ];
}

/// Reveal kinds carried by a schema's UI descriptor and by private
/// payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealKind {
    SeerReveal,
    PsychicReveal,
    WolfRobotReveal,
    GargoyleReveal,
    PureWhiteReveal,
    WitchContext,
}

/// Validation constraints attachable to a seat-targeting schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatConstraint {
    NotSelf,
    NotWolfFaction,
    NotAlreadyHypnotized,
}

/// How a `wolfVote` meeting resolves simultaneous votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteResolution {
    /// The first recorded vote wins on a tie (decision recorded in
    /// DESIGN.md).
    FirstVote,
    Majority,
}

/// UI copy + audio key carried by a schema. The UI layer (an external
/// collaborator) must not invent semantic strings beyond these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaUi {
    pub label: &'static str,
    pub prompt: &'static str,
    pub bottom_action_text: &'static str,
    pub audio_key: &'static str,
    pub reveal_kind: Option<RevealKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundStep {
    pub key: &'static str,
    pub kind: CompoundStepKind,
    pub can_skip: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompoundStepKind {
    ChooseSeat { constraints: Vec<SeatConstraint> },
    Inline,
}

/// One of the five schema shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSchemaKind {
    ChooseSeat {
        constraints: Vec<SeatConstraint>,
        can_skip: bool,
    },
    WolfVote {
        can_see_each_other: bool,
        resolution: VoteResolution,
        allow_empty_vote: bool,
    },
    Confirm {
        can_skip: bool,
    },
    Compound {
        steps: Vec<CompoundStep>,
    },
    ChooseMultipleSeats {
        min_targets: u8,
        max_targets: u8,
        constraints: Vec<SeatConstraint>,
        can_skip: bool,
    },
}

impl ActionSchemaKind {
    /// Whether this schema accepts a null/skip submission at the top
    /// level.
    pub fn can_skip(&self) -> bool {
        match self {
            ActionSchemaKind::ChooseSeat { can_skip, .. } => *can_skip,
            ActionSchemaKind::WolfVote { allow_empty_vote, .. } => *allow_empty_vote,
            ActionSchemaKind::Confirm { can_skip } => *can_skip,
            ActionSchemaKind::Compound { steps } => steps.iter().all(|s| s.can_skip),
            ActionSchemaKind::ChooseMultipleSeats { can_skip, .. } => *can_skip,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSchema {
    pub id: SchemaId,
    pub kind: ActionSchemaKind,
    pub ui: SchemaUi,
}
