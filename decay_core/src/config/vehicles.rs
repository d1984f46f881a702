//! Per-vehicle decay protection settings

use crate::types::VehicleKind;
use serde::{Deserialize, Serialize};

/// Decay tuning for one vehicle kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// Minutes of full decay suppression after the vehicle was last used
    #[serde(
        rename = "ProtectionMinutesAfterUse",
        default = "default_protection_minutes"
    )]
    pub protection_minutes_after_use: f64,
    /// Decay scale while within range of an active protective structure
    #[serde(
        rename = "DecayMultiplierNearProtection",
        default = "default_multiplier"
    )]
    pub decay_multiplier_near_protection: f64,
    /// Decay scale while sheltered
    #[serde(rename = "DecayMultiplierInside", default = "default_multiplier")]
    pub decay_multiplier_inside: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        VehicleConfig {
            protection_minutes_after_use: 10.0,
            decay_multiplier_near_protection: 1.0,
            decay_multiplier_inside: 1.0,
        }
    }
}

impl VehicleConfig {
    /// Default for water vehicles, which keep protection much longer
    fn water() -> Self {
        VehicleConfig {
            protection_minutes_after_use: 45.0,
            ..Default::default()
        }
    }
}

fn default_protection_minutes() -> f64 {
    10.0
}

fn default_multiplier() -> f64 {
    1.0
}

/// Settings for every supported vehicle kind
///
/// Field names follow the stable wire keys of the stored JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfigMap {
    #[serde(rename = "DuoSubmarine")]
    pub duo_submarine: VehicleConfig,
    #[serde(rename = "HotAirBalloon")]
    pub hot_air_balloon: VehicleConfig,
    #[serde(rename = "Kayak")]
    pub kayak: VehicleConfig,
    #[serde(rename = "Minicopter")]
    pub mini_copter: VehicleConfig,
    #[serde(rename = "ModularCar")]
    pub modular_car: VehicleConfig,
    #[serde(rename = "RHIB")]
    pub rhib: VehicleConfig,
    #[serde(rename = "RidableHorse")]
    pub ridable_horse: VehicleConfig,
    #[serde(rename = "Rowboat")]
    pub rowboat: VehicleConfig,
    #[serde(rename = "ScrapTransportHelicopter")]
    pub scrap_helicopter: VehicleConfig,
    #[serde(rename = "Snowmobile")]
    pub snowmobile: VehicleConfig,
    #[serde(rename = "SoloSubmarine")]
    pub solo_submarine: VehicleConfig,
    #[serde(rename = "TomahaSnowmobile")]
    pub tomaha: VehicleConfig,
}

impl Default for VehicleConfigMap {
    fn default() -> Self {
        VehicleConfigMap {
            duo_submarine: VehicleConfig::water(),
            hot_air_balloon: VehicleConfig::default(),
            kayak: VehicleConfig::water(),
            mini_copter: VehicleConfig::default(),
            modular_car: VehicleConfig::default(),
            rhib: VehicleConfig::water(),
            ridable_horse: VehicleConfig::default(),
            rowboat: VehicleConfig::water(),
            scrap_helicopter: VehicleConfig::default(),
            snowmobile: VehicleConfig::default(),
            solo_submarine: VehicleConfig::water(),
            tomaha: VehicleConfig::default(),
        }
    }
}

impl VehicleConfigMap {
    /// Settings for a vehicle kind; total over [`VehicleKind`]
    pub fn for_kind(&self, kind: VehicleKind) -> &VehicleConfig {
        match kind {
            VehicleKind::DuoSubmarine => &self.duo_submarine,
            VehicleKind::HotAirBalloon => &self.hot_air_balloon,
            VehicleKind::Kayak => &self.kayak,
            VehicleKind::MiniCopter => &self.mini_copter,
            VehicleKind::ModularCar => &self.modular_car,
            VehicleKind::Rhib => &self.rhib,
            VehicleKind::RidableHorse => &self.ridable_horse,
            VehicleKind::Rowboat => &self.rowboat,
            VehicleKind::ScrapHelicopter => &self.scrap_helicopter,
            VehicleKind::Snowmobile => &self.snowmobile,
            VehicleKind::SoloSubmarine => &self.solo_submarine,
            VehicleKind::Tomaha => &self.tomaha,
        }
    }
}
