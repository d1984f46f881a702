//! Decay rule evaluation - layered suppression and environmental multipliers

use crate::classify::Classification;
use crate::config::VehicleConfig;
use crate::entity::Surroundings;
use crate::event::{DamageEvent, DamageKind};
use crate::permission::{self, PermissionStore};
use log::debug;

/// The engine's verdict for one decay damage event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayOutcome {
    /// Scale applied to the event's decay component
    pub multiplier: f64,
    /// Set when previously nonzero decay damage was scaled to exactly zero:
    /// the event must not count as an attack for repair bookkeeping
    pub suppress_repair_reset: bool,
}

impl DecayOutcome {
    /// Pass-through outcome: no scaling, no repair suppression
    pub fn pass() -> Self {
        DecayOutcome {
            multiplier: 1.0,
            suppress_repair_reset: false,
        }
    }

    fn scaled(multiplier: f64) -> Self {
        DecayOutcome {
            multiplier,
            suppress_repair_reset: false,
        }
    }

    /// Whether the event is returned unmodified
    pub fn is_pass(&self) -> bool {
        self.multiplier == 1.0
    }

    /// Scale the event's decay component and flag repair suppression
    ///
    /// A multiplier of exactly 1 mutates nothing. Only the decay component is
    /// touched; other damage kinds on the event keep their amounts.
    pub fn apply(mut self, event: &mut DamageEvent) -> DecayOutcome {
        if self.multiplier == 1.0 {
            return self;
        }

        let had_decay = event.has(DamageKind::Decay);
        event.scale(DamageKind::Decay, self.multiplier);
        if had_decay && !event.has(DamageKind::Decay) {
            self.suppress_repair_reset = true;
        }
        self
    }
}

/// Everything a rule may consult
struct RuleContext<'a> {
    classification: &'a Classification,
    config: &'a VehicleConfig,
    permissions: &'a dyn PermissionStore,
    surroundings: &'a dyn Surroundings,
}

/// A guard+effect pair: returns the decided multiplier, or `None` to fall
/// through to the next rule
struct Rule {
    name: &'static str,
    decide: fn(&RuleContext) -> Option<f64>,
}

/// Evaluated in order; the first rule to decide wins.
///
/// The three suppression rules are mutually exclusive with everything below
/// them; only the final environment rule composes multipliers.
const RULES: &[Rule] = &[
    Rule {
        name: "recent_use",
        decide: recent_use,
    },
    Rule {
        name: "owner_permission",
        decide: owner_permission,
    },
    Rule {
        name: "lock_owner_permission",
        decide: lock_owner_permission,
    },
    Rule {
        name: "environment",
        decide: environment,
    },
];

/// Evaluate the decay rules for one classified entity
///
/// Pure in its inputs: identical classification, configuration, permission
/// and surroundings snapshots always produce the identical outcome.
pub fn evaluate(
    classification: &Classification,
    config: &VehicleConfig,
    permissions: &dyn PermissionStore,
    surroundings: &dyn Surroundings,
) -> DecayOutcome {
    let ctx = RuleContext {
        classification,
        config,
        permissions,
        surroundings,
    };

    for rule in RULES {
        if let Some(multiplier) = (rule.decide)(&ctx) {
            debug!(
                "{:?}: rule {} set decay multiplier to {}",
                classification.kind, rule.name, multiplier
            );
            return DecayOutcome::scaled(multiplier);
        }
    }

    DecayOutcome::pass()
}

/// Recent activity fully suppresses decay regardless of ownership
fn recent_use(ctx: &RuleContext) -> Option<f64> {
    let elapsed = ctx.classification.time_since_last_used?;
    let window = 60.0 * ctx.config.protection_minutes_after_use;
    (elapsed < window).then_some(0.0)
}

fn owner_permission(ctx: &RuleContext) -> Option<f64> {
    let owner = ctx.classification.owner?;
    permission::grants_no_decay(ctx.permissions, owner, ctx.classification.kind).then_some(0.0)
}

/// Lock owners identical to the vehicle owner were dropped at classification,
/// so a hit here is always a second, distinct principal
fn lock_owner_permission(ctx: &RuleContext) -> Option<f64> {
    let lock_owner = ctx.classification.lock_owner?;
    permission::grants_no_decay(ctx.permissions, lock_owner, ctx.classification.kind).then_some(0.0)
}

/// Environmental multipliers compose; everything above is all-or-nothing
fn environment(ctx: &RuleContext) -> Option<f64> {
    let mut multiplier = 1.0;

    if ctx.config.decay_multiplier_inside != 1.0 && ctx.surroundings.is_inside() {
        multiplier *= ctx.config.decay_multiplier_inside;
    }

    // Once the running multiplier is zero the proximity probe is not
    // consulted at all.
    if multiplier != 0.0
        && ctx.config.decay_multiplier_near_protection != 1.0
        && ctx.surroundings.is_near_protection()
    {
        multiplier *= ctx.config.decay_multiplier_near_protection;
    }

    (multiplier != 1.0).then_some(multiplier)
}
