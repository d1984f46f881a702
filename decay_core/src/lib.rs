//! decay_core - Decay damage decision engine for vehicle-like entities
//!
//! This library provides:
//! - Vehicle classification: mapping damaged entities to supported kinds
//! - Decay rule evaluation: recent use, owner and lock-owner permissions,
//!   environmental multipliers
//! - Per-kind configuration with JSON loading and stored-file upgrades
//! - No-decay permission keys and the permission lookup seam

pub mod classify;
pub mod config;
pub mod engine;
pub mod entity;
pub mod evaluate;
pub mod event;
pub mod permission;
pub mod types;

// Re-export core types for convenience
pub use classify::{classify, Classification};
pub use config::{ConfigError, DecayConfig, VehicleConfig, VehicleConfigMap};
pub use engine::DecayEngine;
pub use entity::{EntityTag, EntityView, Surroundings, UseSignal};
pub use evaluate::{evaluate, DecayOutcome};
pub use event::{DamageAmount, DamageEvent, DamageKind};
pub use permission::{
    grants_no_decay, no_decay_permission, PermissionRegistry, PermissionStore,
    NODECAY_ALL_VEHICLES, NODECAY_PERMISSIONS,
};
pub use types::{PrincipalId, VehicleKind};
