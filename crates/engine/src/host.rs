//! The Host: sequences intent -> handler -> reducer -> persist -> broadcast
//! -> inline progression. The only place in this crate that performs I/O --
//! everything it calls into (`handlers`, `reducer`, `flow`, `broadcast`)
//! stays pure and synchronous.

use std::sync::Arc;

use nightfall_domain::{GameState, PrivatePayload};
use nightfall_engine_ports::{
    AudioDispatchPort, ClockPort, HandlerContext, PersistencePort, PortError, RandomPort,
    TransportPort,
};
use nightfall_protocol::Intent;

use crate::broadcast::{private_message, to_broadcast};
use crate::reducer::apply_all;

/// Wires the pure engine core to its outbound ports. Cloned cheaply
/// (every field is an `Arc`) so a server can share one `Host` per room
/// across connection tasks.
#[derive(Clone)]
pub struct Host {
    transport: Arc<dyn TransportPort>,
    persistence: Arc<dyn PersistencePort>,
    audio: Arc<dyn AudioDispatchPort>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl Host {
    pub fn new(
        transport: Arc<dyn TransportPort>,
        persistence: Arc<dyn PersistencePort>,
        audio: Arc<dyn AudioDispatchPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self { transport, persistence, audio, clock, random }
    }

    /// Handles one client intent end to end: loads the room, dispatches to
    /// the handler, applies any resulting actions, persists and broadcasts
    /// exactly once, then drains as much inline progression as the new
    /// state allows.
    pub async fn handle(&self, ctx: HandlerContext, intent: Intent) -> Result<(), PortError> {
        let state = self.persistence.load(ctx.room_code).await?;
        let now = self.clock.now();
        let rng_tie_break = self.random.random_f64() >= 0.5;

        let output = crate::handlers::handle_intent(&intent, &ctx, &state, now, rng_tie_break);

        if !output.success {
            if !output.private_messages.is_empty() {
                // The handler already built its own private payload for this
                // rejection (e.g. `BLOCKED`) -- send that instead of
                // synthesizing a generic `ACTION_REJECTED`.
                for mut message in output.private_messages {
                    message.revision = state.revision;
                    self.transport.publish_private(ctx.room_code, message).await;
                }
            } else if let Some(reason) = output.reason {
                let message = private_message(
                    ctx.caller_uid.clone(),
                    state.revision,
                    PrivatePayload::ActionRejected { action: intent.kind(), reason },
                );
                self.transport.publish_private(ctx.room_code, message).await;
            }
            return Ok(());
        }

        if output.actions.is_empty() {
            for message in output.private_messages {
                self.transport.publish_private(ctx.room_code, message).await;
            }
            return Ok(());
        }

        let mut state = apply_all(state, output.actions);
        state.revision += 1;

        for mut message in output.private_messages {
            message.revision = state.revision;
            self.transport.publish_private(ctx.room_code, message).await;
        }

        self.persistence.save(&state).await?;
        self.transport.publish_state(ctx.room_code, to_broadcast(&state)).await;

        self.run_progression(state).await
    }

    /// Drains one round of inline progression: as many auto-resolved
    /// steps as `run_inline_progression` can fold into a single pass,
    /// persisted and broadcast once, with its audio effects dispatched in
    /// order afterward.
    async fn run_progression(&self, state: GameState) -> Result<(), PortError> {
        let now = self.clock.now();
        let outcome = crate::flow::run_inline_progression(&state, now);

        if outcome.actions.is_empty() {
            return Ok(());
        }

        let room_code = state.room_code;
        let mut state = apply_all(state, outcome.actions);
        state.revision += 1;

        self.persistence.save(&state).await?;
        self.transport.publish_state(room_code, to_broadcast(&state)).await;

        for effect in outcome.audio_effects {
            self.audio.dispatch(effect).await;
        }

        Ok(())
    }
}
