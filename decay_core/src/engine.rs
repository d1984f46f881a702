//! Engine entry point - processing decay damage events

use crate::classify::classify;
use crate::config::DecayConfig;
use crate::entity::{EntityView, Surroundings};
use crate::evaluate::{evaluate, DecayOutcome};
use crate::event::{DamageEvent, DamageKind};
use crate::permission::PermissionStore;

/// The decay damage decision engine
///
/// Holds no state of its own; all durable state lives in the injected
/// configuration and permission collaborators, so one engine value can serve
/// concurrent events as long as those collaborators are read-safe.
pub struct DecayEngine<'a> {
    config: &'a DecayConfig,
    permissions: &'a dyn PermissionStore,
}

impl<'a> DecayEngine<'a> {
    pub fn new(config: &'a DecayConfig, permissions: &'a dyn PermissionStore) -> Self {
        DecayEngine {
            config,
            permissions,
        }
    }

    /// Process one damage event against the entity it was delivered to
    ///
    /// Events without a decay component and entities that do not classify as
    /// supported vehicles pass through unmodified. `now` is the engine clock
    /// used to interpret absolute last-use timestamps.
    pub fn process(
        &self,
        entity: &dyn EntityView,
        event: &mut DamageEvent,
        now: f64,
    ) -> DecayOutcome {
        if !event.has(DamageKind::Decay) {
            return DecayOutcome::pass();
        }

        let Some(classification) = classify(entity, now) else {
            return DecayOutcome::pass();
        };

        let config = self.config.for_kind(classification.kind);
        let surroundings: &dyn Surroundings = entity;
        evaluate(&classification, config, self.permissions, surroundings).apply(event)
    }
}
