//! DamageEvent - the mutable damage sink carried by the host dispatcher

use serde::{Deserialize, Serialize};

/// Damage categories an event can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    Generic,
    Bullet,
    Blunt,
    Explosion,
    Heat,
    Decay,
}

/// Damage of a single kind on an event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageAmount {
    pub kind: DamageKind,
    pub amount: f64,
}

/// A damage event delivered to an entity
///
/// Carries one amount per damage kind. The decay engine only ever scales the
/// `Decay` component; other kinds on the same event are never touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    damages: Vec<DamageAmount>,
}

impl DamageEvent {
    /// Create a new empty event
    pub fn new() -> Self {
        DamageEvent { damages: Vec::new() }
    }

    /// An event carrying only decay damage
    pub fn decay(amount: f64) -> Self {
        let mut event = DamageEvent::new();
        event.add(DamageKind::Decay, amount);
        event
    }

    /// Add damage of a kind, merging into an existing entry
    pub fn add(&mut self, kind: DamageKind, amount: f64) {
        if let Some(existing) = self.damages.iter_mut().find(|d| d.kind == kind) {
            existing.amount += amount;
        } else {
            self.damages.push(DamageAmount { kind, amount });
        }
    }

    /// Damage carried for a specific kind
    pub fn of_kind(&self, kind: DamageKind) -> f64 {
        self.damages
            .iter()
            .filter(|d| d.kind == kind)
            .map(|d| d.amount)
            .sum()
    }

    /// Whether the event carries nonzero damage of a kind
    pub fn has(&self, kind: DamageKind) -> bool {
        self.of_kind(kind) > 0.0
    }

    /// Total damage across all kinds
    pub fn total(&self) -> f64 {
        self.damages.iter().map(|d| d.amount).sum()
    }

    /// Whether any damage remains on the event
    pub fn has_any(&self) -> bool {
        self.total() > 0.0
    }

    /// Scale one damage kind, leaving the others untouched
    pub fn scale(&mut self, kind: DamageKind, factor: f64) {
        for damage in self.damages.iter_mut().filter(|d| d.kind == kind) {
            damage.amount *= factor;
        }
    }
}
