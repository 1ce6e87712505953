//! Role identifiers and specs.

use serde::{Deserialize, Serialize};

use crate::schema::SchemaId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Wolf,
    Villager,
    God,
    Third,
}

/// Closed set of role identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleId {
    Wolf,
    WolfQueen,
    WolfKing,
    DarkWolfKing,
    WolfRobot,
    WolfWitch,
    Gargoyle,
    Nightmare,
    SpiritKnight,
    BloodMoon,
    Magician,
    Dreamcatcher,
    Slacker,
    Seer,
    MirrorSeer,
    Psychic,
    Witch,
    Guard,
    Hunter,
    Villager,
    PureWhite,
    Piper,
    SilenceElder,
    VotebanElder,
}

impl RoleId {
    pub const ALL: &'static [RoleId] = &[
        RoleId::Wolf,
        RoleId::WolfQueen,
        RoleId::WolfKing,
        RoleId::DarkWolfKing,
        RoleId::WolfRobot,
        RoleId::WolfWitch,
        RoleId::Gargoyle,
        RoleId::Nightmare,
        RoleId::SpiritKnight,
        RoleId::BloodMoon,
        RoleId::Magician,
        RoleId::Dreamcatcher,
        RoleId::Slacker,
        RoleId::Seer,
        RoleId::MirrorSeer,
        RoleId::Psychic,
        RoleId::Witch,
        RoleId::Guard,
        RoleId::Hunter,
        RoleId::Villager,
        RoleId::PureWhite,
        RoleId::Piper,
        RoleId::SilenceElder,
        RoleId::VotebanElder,
    ];

    /// Parse from the wire-format camelCase name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.wire_name() == name)
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            RoleId::Wolf => "wolf",
            RoleId::WolfQueen => "wolfQueen",
            RoleId::WolfKing => "wolfKing",
            RoleId::DarkWolfKing => "darkWolfKing",
            RoleId::WolfRobot => "wolfRobot",
            RoleId::WolfWitch => "wolfWitch",
            RoleId::Gargoyle => "gargoyle",
            RoleId::Nightmare => "nightmare",
            RoleId::SpiritKnight => "spiritKnight",
            RoleId::BloodMoon => "bloodMoon",
            RoleId::Magician => "magician",
            RoleId::Dreamcatcher => "dreamcatcher",
            RoleId::Slacker => "slacker",
            RoleId::Seer => "seer",
            RoleId::MirrorSeer => "mirrorSeer",
            RoleId::Psychic => "psychic",
            RoleId::Witch => "witch",
            RoleId::Guard => "guard",
            RoleId::Hunter => "hunter",
            RoleId::Villager => "villager",
            RoleId::PureWhite => "pureWhite",
            RoleId::Piper => "piper",
            RoleId::SilenceElder => "silenceElder",
            RoleId::VotebanElder => "votebanElder",
        }
    }
}

/// The night-one descriptor on a role spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Night1Descriptor {
    pub has_action: bool,
    pub order: i32,
    pub acts_solo: bool,
    pub schema_id: SchemaId,
}

#[derive(Debug, Clone, Copy)]
pub struct RoleSpec {
    pub faction: Faction,
    pub display_name: &'static str,
    pub description: &'static str,
    pub is_wolf: bool,
    pub can_see_wolves: bool,
    pub participates_in_wolf_vote: bool,
    pub night1: Option<Night1Descriptor>,
}

const fn no_night_action() -> Option<Night1Descriptor> {
    None
}

const fn meeting_wolf(order: i32) -> Option<Night1Descriptor> {
    Some(Night1Descriptor {
        has_action: true,
        order,
        acts_solo: false,
        schema_id: SchemaId::WolfKill,
    })
}

/// Static, immutable role table -- the single source of truth for what can
/// happen at night. Order values encode the night-plan sequencing: nightmare
/// acts before the wolves, who act before seer/guard/witch/etc.
pub fn role_spec(role: RoleId) -> RoleSpec {
    use Faction::*;
    match role {
        RoleId::Wolf => RoleSpec {
            faction: Wolf,
            display_name: "Wolf",
            description: "A member of the wolf pack. Votes each night to kill a villager.",
            is_wolf: true,
            can_see_wolves: true,
            participates_in_wolf_vote: true,
            night1: meeting_wolf(20),
        },
        RoleId::WolfQueen => RoleSpec {
            faction: Wolf,
            display_name: "Wolf Queen",
            description: "A wolf who can link her fate to a player's with a kiss (day phase).",
            is_wolf: true,
            can_see_wolves: true,
            participates_in_wolf_vote: true,
            night1: meeting_wolf(20),
        },
        RoleId::WolfKing => RoleSpec {
            faction: Wolf,
            display_name: "Wolf King",
            description: "A wolf who may take a voter down with him when lynched (day phase).",
            is_wolf: true,
            can_see_wolves: true,
            participates_in_wolf_vote: true,
            night1: meeting_wolf(20),
        },
        RoleId::DarkWolfKing => RoleSpec {
            faction: Wolf,
            display_name: "Dark Wolf King",
            description: "A wolf king variant who may shoot on death (day phase).",
            is_wolf: true,
            can_see_wolves: true,
            participates_in_wolf_vote: true,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 22,
                acts_solo: true,
                schema_id: SchemaId::DarkWolfKingConfirm,
            }),
        },
        RoleId::WolfRobot => RoleSpec {
            faction: Wolf,
            display_name: "Wolf Robot",
            description: "A non-meeting wolf who can learn a player's role once per night.",
            is_wolf: true,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 60,
                acts_solo: true,
                schema_id: SchemaId::WolfRobotLearn,
            }),
        },
        RoleId::WolfWitch => RoleSpec {
            faction: Wolf,
            display_name: "Wolf Witch",
            description: "A wolf who also holds a witch-like save/poison pair (day phase twist).",
            is_wolf: true,
            can_see_wolves: true,
            participates_in_wolf_vote: true,
            night1: meeting_wolf(20),
        },
        RoleId::Gargoyle => RoleSpec {
            faction: Wolf,
            display_name: "Gargoyle",
            description: "A non-meeting wolf who checks one seat's faction each night.",
            is_wolf: true,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 55,
                acts_solo: true,
                schema_id: SchemaId::GargoyleCheck,
            }),
        },
        RoleId::Nightmare => RoleSpec {
            faction: Wolf,
            display_name: "Nightmare",
            description: "Blocks one seat's night action before anyone else acts.",
            is_wolf: true,
            can_see_wolves: true,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 10,
                acts_solo: true,
                schema_id: SchemaId::NightmareBlock,
            }),
        },
        RoleId::SpiritKnight => RoleSpec {
            faction: Villager,
            display_name: "Spirit Knight",
            description: "Reflects a wolf kill back the following day; no night-one action.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: no_night_action(),
        },
        RoleId::BloodMoon => RoleSpec {
            faction: Third,
            display_name: "Blood Moon",
            description: "Acknowledges the rising blood moon before the wolves act.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 15,
                acts_solo: true,
                schema_id: SchemaId::BloodMoonConfirm,
            }),
        },
        RoleId::Magician => RoleSpec {
            faction: Third,
            display_name: "Magician",
            description: "Swaps two seats' identities before any other resolution this night.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 5,
                acts_solo: true,
                schema_id: SchemaId::MagicianSwap,
            }),
        },
        RoleId::Dreamcatcher => RoleSpec {
            faction: God,
            display_name: "Dreamcatcher",
            description: "Binds one seat's dream each night; no direct kill effect.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 65,
                acts_solo: true,
                schema_id: SchemaId::DreamcatcherBind,
            }),
        },
        RoleId::Slacker => RoleSpec {
            faction: Villager,
            display_name: "Slacker",
            description: "A villager variant with no night action.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: no_night_action(),
        },
        RoleId::Seer => RoleSpec {
            faction: God,
            display_name: "Seer",
            description: "Checks one seat's faction each night.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 40,
                acts_solo: true,
                schema_id: SchemaId::SeerCheck,
            }),
        },
        RoleId::MirrorSeer => RoleSpec {
            faction: God,
            display_name: "Mirror Seer",
            description: "A second seer-like role; shares the seer audio/label slot.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 40,
                acts_solo: true,
                schema_id: SchemaId::SeerCheck,
            }),
        },
        RoleId::Psychic => RoleSpec {
            faction: God,
            display_name: "Psychic",
            description: "Checks one seat's faction each night, psychic-flavored.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 45,
                acts_solo: true,
                schema_id: SchemaId::PsychicCheck,
            }),
        },
        RoleId::Witch => RoleSpec {
            faction: God,
            display_name: "Witch",
            description: "May save the wolves' kill target and/or poison another seat.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 30,
                acts_solo: true,
                schema_id: SchemaId::WitchAction,
            }),
        },
        RoleId::Guard => RoleSpec {
            faction: God,
            display_name: "Guard",
            description: "Protects one seat (including self) from the wolves' kill.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 25,
                acts_solo: true,
                schema_id: SchemaId::GuardProtect,
            }),
        },
        RoleId::Hunter => RoleSpec {
            faction: Villager,
            display_name: "Hunter",
            description: "May shoot a seat on death (day phase); acknowledges readiness at night.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 80,
                acts_solo: true,
                schema_id: SchemaId::HunterConfirm,
            }),
        },
        RoleId::Villager => RoleSpec {
            faction: Villager,
            display_name: "Villager",
            description: "No special ability.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: no_night_action(),
        },
        RoleId::PureWhite => RoleSpec {
            faction: Third,
            display_name: "Pure White",
            description: "Wins if voted out by day; confirms readiness at night.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 70,
                acts_solo: true,
                schema_id: SchemaId::PureWhiteCheck,
            }),
        },
        RoleId::Piper => RoleSpec {
            faction: Third,
            display_name: "Piper",
            description: "Hypnotizes up to two seats per night, accumulating victims.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: Some(Night1Descriptor {
                has_action: true,
                order: 50,
                acts_solo: true,
                schema_id: SchemaId::PiperHypnotize,
            }),
        },
        RoleId::SilenceElder => RoleSpec {
            faction: Villager,
            display_name: "Silence Elder",
            description: "A day-phase villager variant with no night action.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: no_night_action(),
        },
        RoleId::VotebanElder => RoleSpec {
            faction: Villager,
            display_name: "Voteban Elder",
            description: "A day-phase villager variant with no night action.",
            is_wolf: false,
            can_see_wolves: false,
            participates_in_wolf_vote: false,
            night1: no_night_action(),
        },
    }
}
