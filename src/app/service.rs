use rand::rngs::StdRng;
use rand::Rng;

use crate::app::command;
use crate::app::update::update;
use crate::app::TeamupState;
use crate::auth::AdminPolicy;
use crate::event::{ChatContext, InboundMessage};
use crate::store::StateStore;

/// Owns the in-memory state and persists it after every mutating command.
///
/// Commands run one at a time to completion through `&mut self`; a host that
/// dispatches concurrently must wrap the service in a lock.
pub struct TeamupService<R = StdRng> {
    state: TeamupState,
    store: StateStore,
    policy: AdminPolicy,
    rng: R,
}

impl<R: Rng> TeamupService<R> {
    pub fn new(state: TeamupState, store: StateStore, policy: AdminPolicy, rng: R) -> Self {
        Self {
            state,
            store,
            policy,
            rng,
        }
    }

    /// Load state from `store` (empty on failure) and build the service.
    pub fn open(store: StateStore, policy: AdminPolicy, rng: R) -> Self {
        let state = store.load_or_default();
        Self::new(state, store, policy, rng)
    }

    pub fn state(&self) -> &TeamupState {
        &self.state
    }

    pub fn policy(&self) -> &AdminPolicy {
        &self.policy
    }

    /// Handle one host message. `None` when the text is not a teamup command
    /// or the sender cannot be identified.
    pub fn handle(&mut self, message: &InboundMessage) -> Option<String> {
        let ctx = match message.context(&self.policy) {
            Ok(ctx) => ctx,
            Err(e) => {
                tracing::warn!(error = %e, "dropping message without usable sender");
                return None;
            }
        };
        self.handle_text(&ctx, &message.text)
    }

    /// Parse, apply, and persist if anything changed. A failed save is logged;
    /// the reply still reports the in-memory result.
    pub fn handle_text(&mut self, ctx: &ChatContext, text: &str) -> Option<String> {
        let command = command::parse(text)?;
        let reply = update(&mut self.state, ctx, command, &mut self.rng);
        if reply.mutated {
            if let Err(e) = self.store.save(&self.state) {
                tracing::error!(path = %self.store.path().display(), error = ?e, "failed to save state");
            }
        }
        Some(reply.text)
    }
}
