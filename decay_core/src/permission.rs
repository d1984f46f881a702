//! No-decay permission keys and the permission lookup seam

use crate::types::{PrincipalId, VehicleKind};
use std::collections::{HashMap, HashSet};

/// Blanket permission implying every kind-specific no-decay permission
pub const NODECAY_ALL_VEHICLES: &str = "decayprotection.nodecay.allvehicles";

const NODECAY_DUO_SUBMARINE: &str = "decayprotection.nodecay.duosubmarine";
const NODECAY_HOT_AIR_BALLOON: &str = "decayprotection.nodecay.hotairballoon";
const NODECAY_KAYAK: &str = "decayprotection.nodecay.kayak";
const NODECAY_MINICOPTER: &str = "decayprotection.nodecay.minicopter";
const NODECAY_MODULAR_CAR: &str = "decayprotection.nodecay.modularcar";
const NODECAY_RHIB: &str = "decayprotection.nodecay.rhib";
const NODECAY_RIDABLE_HORSE: &str = "decayprotection.nodecay.ridablehorse";
const NODECAY_ROWBOAT: &str = "decayprotection.nodecay.rowboat";
const NODECAY_SCRAP_HELICOPTER: &str = "decayprotection.nodecay.scraptransporthelicopter";
const NODECAY_SNOWMOBILE: &str = "decayprotection.nodecay.snowmobile";
const NODECAY_SOLO_SUBMARINE: &str = "decayprotection.nodecay.solosubmarine";
const NODECAY_TOMAHA: &str = "decayprotection.nodecay.tomahasnowmobile";

/// Every permission key a hosting plugin registers at startup
pub const NODECAY_PERMISSIONS: &[&str] = &[
    NODECAY_ALL_VEHICLES,
    NODECAY_DUO_SUBMARINE,
    NODECAY_HOT_AIR_BALLOON,
    NODECAY_KAYAK,
    NODECAY_MINICOPTER,
    NODECAY_MODULAR_CAR,
    NODECAY_RHIB,
    NODECAY_RIDABLE_HORSE,
    NODECAY_ROWBOAT,
    NODECAY_SCRAP_HELICOPTER,
    NODECAY_SNOWMOBILE,
    NODECAY_SOLO_SUBMARINE,
    NODECAY_TOMAHA,
];

/// The kind-specific no-decay permission key
pub fn no_decay_permission(kind: VehicleKind) -> &'static str {
    match kind {
        VehicleKind::DuoSubmarine => NODECAY_DUO_SUBMARINE,
        VehicleKind::HotAirBalloon => NODECAY_HOT_AIR_BALLOON,
        VehicleKind::Kayak => NODECAY_KAYAK,
        VehicleKind::MiniCopter => NODECAY_MINICOPTER,
        VehicleKind::ModularCar => NODECAY_MODULAR_CAR,
        VehicleKind::Rhib => NODECAY_RHIB,
        VehicleKind::RidableHorse => NODECAY_RIDABLE_HORSE,
        VehicleKind::Rowboat => NODECAY_ROWBOAT,
        VehicleKind::ScrapHelicopter => NODECAY_SCRAP_HELICOPTER,
        VehicleKind::Snowmobile => NODECAY_SNOWMOBILE,
        VehicleKind::SoloSubmarine => NODECAY_SOLO_SUBMARINE,
        VehicleKind::Tomaha => NODECAY_TOMAHA,
    }
}

/// Side-effect-free answer to "does this principal hold this permission?"
pub trait PermissionStore: Send + Sync {
    fn has_permission(&self, principal: PrincipalId, permission: &str) -> bool;
}

/// Blanket-first no-decay check
///
/// The blanket key is always tried before the kind-specific one, from this
/// single call site, so the two checks can never disagree.
pub fn grants_no_decay(
    store: &dyn PermissionStore,
    principal: PrincipalId,
    kind: VehicleKind,
) -> bool {
    store.has_permission(principal, NODECAY_ALL_VEHICLES)
        || store.has_permission(principal, no_decay_permission(kind))
}

/// In-memory permission store for tests and hosts without a real backend
#[derive(Debug, Clone, Default)]
pub struct PermissionRegistry {
    grants: HashMap<PrincipalId, HashSet<String>>,
}

impl PermissionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        PermissionRegistry {
            grants: HashMap::new(),
        }
    }

    /// Grant a permission to a principal
    pub fn grant(&mut self, principal: PrincipalId, permission: &str) {
        self.grants
            .entry(principal)
            .or_default()
            .insert(permission.to_string());
    }

    /// Revoke a previously granted permission
    pub fn revoke(&mut self, principal: PrincipalId, permission: &str) {
        if let Some(held) = self.grants.get_mut(&principal) {
            held.remove(permission);
        }
    }
}

impl PermissionStore for PermissionRegistry {
    fn has_permission(&self, principal: PrincipalId, permission: &str) -> bool {
        self.grants
            .get(&principal)
            .map_or(false, |held| held.contains(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registration_list_covers_every_kind() {
        let keys: HashSet<_> = NODECAY_PERMISSIONS.iter().collect();
        assert_eq!(keys.len(), NODECAY_PERMISSIONS.len());
        assert!(keys.contains(&NODECAY_ALL_VEHICLES));
        for kind in VehicleKind::all() {
            assert!(keys.contains(&no_decay_permission(*kind)));
        }
    }

    #[test]
    fn test_specific_permission_grants() {
        let mut registry = PermissionRegistry::new();
        let player = PrincipalId(42);
        registry.grant(player, no_decay_permission(VehicleKind::Kayak));

        assert!(grants_no_decay(&registry, player, VehicleKind::Kayak));
        assert!(!grants_no_decay(&registry, player, VehicleKind::Rhib));
    }

    #[test]
    fn test_blanket_permission_implies_every_kind() {
        let mut registry = PermissionRegistry::new();
        let player = PrincipalId(42);
        registry.grant(player, NODECAY_ALL_VEHICLES);

        for kind in VehicleKind::all() {
            assert!(grants_no_decay(&registry, player, *kind));
        }
    }

    #[test]
    fn test_revoke_removes_the_grant() {
        let mut registry = PermissionRegistry::new();
        let player = PrincipalId(7);
        let perm = no_decay_permission(VehicleKind::RidableHorse);

        registry.grant(player, perm);
        assert!(registry.has_permission(player, perm));

        registry.revoke(player, perm);
        assert!(!registry.has_permission(player, perm));
    }
}
