//! Role/schema registry. Pure, total lookups over the closed
//! `RoleId`/`SchemaId` sets defined in `nightfall-domain` -- no I/O.

use nightfall_domain::{
    ActionSchema, ActionSchemaKind, CompoundStep, CompoundStepKind, DomainError, RevealKind,
    RoleId, SchemaId, SchemaUi, SeatConstraint, VoteResolution,
};

pub fn get_role_spec(role: RoleId) -> nightfall_domain::RoleSpec {
    nightfall_domain::role_spec(role)
}

pub fn is_valid_role_id(name: &str) -> bool {
    RoleId::parse(name).is_some()
}

pub fn is_wolf_role(role: RoleId) -> bool {
    get_role_spec(role).is_wolf
}

pub fn has_night_action(role: RoleId) -> bool {
    get_role_spec(role).night1.is_some()
}

pub fn get_schema(schema_id: SchemaId) -> Result<ActionSchema, DomainError> {
    Ok(schema_table(schema_id))
}

fn schema_table(schema_id: SchemaId) -> ActionSchema {
    use SchemaId::*;
    match schema_id {
        NightmareBlock => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::ChooseSeat {
                constraints: vec![SeatConstraint::NotSelf],
                can_skip: true,
            },
            ui: SchemaUi {
                label: "Nightmare".into(),
                prompt: "Choose a seat to silence tomorrow.".into(),
                bottom_action_text: "Block".into(),
                audio_key: "nightmare".into(),
                reveal_kind: None,
            },
        },
        WolfKill => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::WolfVote {
                can_see_each_other: true,
                resolution: VoteResolution::FirstVote,
                allow_empty_vote: true,
            },
            ui: SchemaUi {
                label: "Wolves".into(),
                prompt: "Choose tonight's kill target.".into(),
                bottom_action_text: "Vote".into(),
                audio_key: "wolf".into(),
                reveal_kind: None,
            },
        },
        GuardProtect => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::ChooseSeat {
                constraints: vec![],
                can_skip: true,
            },
            ui: SchemaUi {
                label: "Guard".into(),
                prompt: "Choose a seat to protect.".into(),
                bottom_action_text: "Protect".into(),
                audio_key: "guard".into(),
                reveal_kind: None,
            },
        },
        WitchAction => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::Compound {
                steps: vec![
                    CompoundStep {
                        key: "save".into(),
                        kind: CompoundStepKind::Inline,
                        can_skip: true,
                    },
                    CompoundStep {
                        key: "poison".into(),
                        kind: CompoundStepKind::ChooseSeat {
                            constraints: vec![SeatConstraint::NotSelf],
                        },
                        can_skip: true,
                    },
                ],
            },
            ui: SchemaUi {
                label: "Witch".into(),
                prompt: "Save tonight's victim, or poison a seat.".into(),
                bottom_action_text: "Confirm".into(),
                audio_key: "witch".into(),
                reveal_kind: Some(RevealKind::WitchContext),
            },
        },
        SeerCheck => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::ChooseSeat {
                constraints: vec![SeatConstraint::NotSelf],
                can_skip: false,
            },
            ui: SchemaUi {
                label: "Seer".into(),
                prompt: "Choose a seat to check.".into(),
                bottom_action_text: "Check".into(),
                audio_key: "seer".into(),
                reveal_kind: Some(RevealKind::SeerReveal),
            },
        },
        PsychicCheck => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::ChooseSeat {
                constraints: vec![SeatConstraint::NotSelf],
                can_skip: false,
            },
            ui: SchemaUi {
                label: "Psychic".into(),
                prompt: "Choose a seat to read.".into(),
                bottom_action_text: "Read".into(),
                audio_key: "psychic".into(),
                reveal_kind: Some(RevealKind::PsychicReveal),
            },
        },
        PiperHypnotize => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::ChooseMultipleSeats {
                min_targets: 0,
                max_targets: 2,
                constraints: vec![SeatConstraint::NotSelf, SeatConstraint::NotAlreadyHypnotized],
                can_skip: true,
            },
            ui: SchemaUi {
                label: "Piper".into(),
                prompt: "Choose up to two seats to hypnotize.".into(),
                bottom_action_text: "Hypnotize".into(),
                audio_key: "piper".into(),
                reveal_kind: None,
            },
        },
        MagicianSwap => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::ChooseMultipleSeats {
                min_targets: 2,
                max_targets: 2,
                constraints: vec![SeatConstraint::NotSelf],
                can_skip: true,
            },
            ui: SchemaUi {
                label: "Magician".into(),
                prompt: "Choose two seats to swap identities.".into(),
                bottom_action_text: "Swap".into(),
                audio_key: "magician".into(),
                reveal_kind: None,
            },
        },
        GargoyleCheck => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::ChooseSeat {
                constraints: vec![SeatConstraint::NotSelf],
                can_skip: false,
            },
            ui: SchemaUi {
                label: "Gargoyle".into(),
                prompt: "Choose a seat to check.".into(),
                bottom_action_text: "Check".into(),
                audio_key: "gargoyle".into(),
                reveal_kind: Some(RevealKind::GargoyleReveal),
            },
        },
        WolfRobotLearn => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::Confirm { can_skip: false },
            ui: SchemaUi {
                label: "Wolf Robot".into(),
                prompt: "Learn the hunter's identity.".into(),
                bottom_action_text: "Confirm".into(),
                audio_key: "wolf_robot".into(),
                reveal_kind: Some(RevealKind::WolfRobotReveal),
            },
        },
        DreamcatcherBind => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::ChooseSeat {
                constraints: vec![SeatConstraint::NotSelf],
                can_skip: true,
            },
            ui: SchemaUi {
                label: "Dreamcatcher".into(),
                prompt: "Choose a seat to bind dreams with.".into(),
                bottom_action_text: "Bind".into(),
                audio_key: "dreamcatcher".into(),
                reveal_kind: None,
            },
        },
        PureWhiteCheck => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::ChooseSeat {
                constraints: vec![SeatConstraint::NotSelf],
                can_skip: false,
            },
            ui: SchemaUi {
                label: "Pure White".into(),
                prompt: "Choose a seat to bind your fate to.".into(),
                bottom_action_text: "Bind".into(),
                audio_key: "pure_white".into(),
                reveal_kind: Some(RevealKind::PureWhiteReveal),
            },
        },
        HunterConfirm => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::Confirm { can_skip: false },
            ui: SchemaUi {
                label: "Hunter".into(),
                prompt: "Acknowledge your ability.".into(),
                bottom_action_text: "Confirm".into(),
                audio_key: "hunter".into(),
                reveal_kind: None,
            },
        },
        DarkWolfKingConfirm => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::Confirm { can_skip: false },
            ui: SchemaUi {
                label: "Dark Wolf King".into(),
                prompt: "Acknowledge your ability.".into(),
                bottom_action_text: "Confirm".into(),
                audio_key: "dark_wolf_king".into(),
                reveal_kind: None,
            },
        },
        BloodMoonConfirm => ActionSchema {
            id: schema_id,
            kind: ActionSchemaKind::Confirm { can_skip: false },
            ui: SchemaUi {
                label: "Blood Moon Apostle".into(),
                prompt: "Acknowledge your ability.".into(),
                bottom_action_text: "Confirm".into(),
                audio_key: "blood_moon".into(),
                reveal_kind: None,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_id_resolves() {
        for schema_id in SchemaId::ALL {
            assert!(get_schema(*schema_id).is_ok());
        }
    }

    #[test]
    fn unknown_role_name_is_rejected() {
        assert!(!is_valid_role_id("not-a-role"));
    }

    #[test]
    fn wolf_role_flag_matches_faction() {
        assert!(is_wolf_role(RoleId::Wolf));
        assert!(!is_wolf_role(RoleId::Villager));
    }
}
