//! Broadcast protocol & visibility filter: derives the public
//! `BroadcastGameState` from the internal `GameState`, stripping every
//! sensitive field.

use std::collections::BTreeMap;

use nightfall_domain::{
    BroadcastGameState, GameState, PlayerPublic, PrivateMessage, PrivatePayload, RoomStatus,
    WolfVoteStatusEntry,
};

/// Builds the whitelisted public snapshot. A player's own `role` never
/// appears here -- it is delivered once as a private `ROLE_ASSIGNED`
/// message at `ASSIGN_ROLES` time -- except once the night has ended,
/// when every role is revealed to everyone.
pub fn to_broadcast(state: &GameState) -> BroadcastGameState {
    let reveal_all_roles = state.status == RoomStatus::Ended;

    let players: BTreeMap<_, _> = state
        .players
        .iter()
        .map(|(seat, player)| {
            let public = player.as_ref().map(|p| PlayerPublic {
                uid: p.uid.clone(),
                seat: p.seat,
                display_name: p.display_name.clone(),
                avatar_url: p.avatar_url.clone(),
                has_viewed_role: p.has_viewed_role,
                role: reveal_all_roles.then_some(p.role).flatten(),
            });
            (*seat, public)
        })
        .collect();

    let wolf_vote_status: BTreeMap<_, _> = state
        .players
        .iter()
        .filter_map(|(seat, player)| {
            let role = player.as_ref()?.role?;
            crate::registry::get_role_spec(role)
                .participates_in_wolf_vote
                .then(|| {
                    let has_voted = state.wolf_votes_by_seat.contains_key(seat);
                    (*seat, WolfVoteStatusEntry { has_voted })
                })
        })
        .collect();

    BroadcastGameState {
        room_code: state.room_code,
        host_uid: state.host_uid.clone(),
        status: state.status,
        template_roles: state.template_roles.clone(),
        players,
        current_step_index: state.current_step_index,
        current_step_id: state.current_step_id,
        is_audio_playing: state.is_audio_playing,
        wolf_vote_status,
        wolf_vote_deadline: state.wolf_vote_deadline,
        seer_label_map: state.seer_label_map.clone(),
        last_night_deaths: (state.status == RoomStatus::Ended).then(|| state.last_night_deaths.clone()),
        revision: state.revision,
    }
}

/// Wraps a payload destined for a single uid into the envelope shape the
/// transport publishes.
pub fn private_message(to_uid: impl Into<String>, revision: nightfall_domain::Revision, payload: PrivatePayload) -> PrivateMessage {
    PrivateMessage {
        to_uid: to_uid.into(),
        revision,
        payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightfall_domain::{Player, RoleId, RoomCode};

    fn fresh() -> GameState {
        let mut state = GameState::new(RoomCode::new(1).unwrap(), "host".into(), 2);
        state.players.insert(0, Some({
            let mut p = Player::new("u0".into(), 0);
            p.role = Some(RoleId::Seer);
            p
        }));
        state
    }

    #[test]
    fn ongoing_broadcast_never_reveals_role() {
        let state = fresh();
        let broadcast = to_broadcast(&state);
        let seat0 = broadcast.players.get(&0).unwrap().as_ref().unwrap();
        assert_eq!(seat0.role, None);
    }

    #[test]
    fn ended_broadcast_reveals_every_role() {
        let mut state = fresh();
        state.status = RoomStatus::Ended;
        let broadcast = to_broadcast(&state);
        let seat0 = broadcast.players.get(&0).unwrap().as_ref().unwrap();
        assert_eq!(seat0.role, Some(RoleId::Seer));
    }

    #[test]
    fn last_night_deaths_absent_before_end() {
        let state = fresh();
        assert_eq!(to_broadcast(&state).last_night_deaths, None);
    }
}
