//! Core types shared across the decay engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported vehicle archetypes
///
/// Classification into a kind is total and deterministic: a given concrete
/// entity type always resolves to exactly one kind (see [`crate::classify`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    DuoSubmarine,
    HotAirBalloon,
    Kayak,
    MiniCopter,
    ModularCar,
    Rhib,
    RidableHorse,
    Rowboat,
    ScrapHelicopter,
    Snowmobile,
    SoloSubmarine,
    Tomaha,
}

impl VehicleKind {
    /// Get all supported kinds
    pub fn all() -> &'static [VehicleKind] {
        &[
            VehicleKind::DuoSubmarine,
            VehicleKind::HotAirBalloon,
            VehicleKind::Kayak,
            VehicleKind::MiniCopter,
            VehicleKind::ModularCar,
            VehicleKind::Rhib,
            VehicleKind::RidableHorse,
            VehicleKind::Rowboat,
            VehicleKind::ScrapHelicopter,
            VehicleKind::Snowmobile,
            VehicleKind::SoloSubmarine,
            VehicleKind::Tomaha,
        ]
    }
}

/// Unique player/account identifier used for ownership and permission checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId(pub u64);

impl PrincipalId {
    /// Convert a raw engine owner id; zero means "unowned"
    pub fn from_raw(raw: u64) -> Option<PrincipalId> {
        if raw == 0 {
            None
        } else {
            Some(PrincipalId(raw))
        }
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_kinds_distinct() {
        let kinds: HashSet<_> = VehicleKind::all().iter().collect();
        assert_eq!(kinds.len(), 12);
    }

    #[test]
    fn test_zero_owner_id_is_unowned() {
        assert_eq!(PrincipalId::from_raw(0), None);
        assert_eq!(PrincipalId::from_raw(76_561_197_960_287_930), Some(PrincipalId(76_561_197_960_287_930)));
    }
}
