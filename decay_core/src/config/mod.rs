//! Configuration store - JSON loading, defaults, and stored-file upgrades

mod vehicles;

pub use vehicles::{VehicleConfig, VehicleConfigMap};

use crate::types::VehicleKind;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Top-level configuration record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    #[serde(rename = "Vehicles")]
    pub vehicles: VehicleConfigMap,
}

impl DecayConfig {
    /// Settings for a vehicle kind, looked up at evaluation time
    pub fn for_kind(&self, kind: VehicleKind) -> &VehicleConfig {
        self.vehicles.for_kind(kind)
    }

    /// Load from a JSON file, filling in defaults for missing keys
    ///
    /// Returns the config and whether the stored file was missing keys and
    /// should be written back.
    pub fn load(path: &Path) -> Result<(DecayConfig, bool), ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut stored: Value = serde_json::from_str(&content)?;
        let defaults = serde_json::to_value(DecayConfig::default())?;
        let upgraded = merge_defaults(&mut stored, &defaults);
        let config = serde_json::from_value(stored)?;
        Ok((config, upgraded))
    }

    /// Write as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Load with full file lifecycle: a missing file is created with
    /// defaults, an outdated file is upgraded and written back, an invalid
    /// file is left alone and defaults are used.
    pub fn load_or_default(path: &Path) -> DecayConfig {
        if !path.exists() {
            let config = DecayConfig::default();
            match config.save(path) {
                Ok(()) => info!("created default config at {}", path.display()),
                Err(err) => warn!(
                    "could not write default config to {}: {}",
                    path.display(),
                    err
                ),
            }
            return config;
        }

        match Self::load(path) {
            Ok((config, upgraded)) => {
                if upgraded {
                    warn!(
                        "config {} appears to be outdated; updating and saving",
                        path.display()
                    );
                    if let Err(err) = config.save(path) {
                        warn!("could not save upgraded config {}: {}", path.display(), err);
                    }
                }
                config
            }
            Err(err) => {
                warn!("config {} is invalid; using defaults: {}", path.display(), err);
                DecayConfig::default()
            }
        }
    }
}

/// Recursively add keys present in `defaults` but missing from `stored`
///
/// Existing scalar values are never overwritten; a scalar stored where an
/// object is expected is replaced wholesale.
fn merge_defaults(stored: &mut Value, defaults: &Value) -> bool {
    let (Value::Object(stored), Value::Object(defaults)) = (stored, defaults) else {
        return false;
    };

    let mut changed = false;
    for (key, default_value) in defaults {
        match stored.get_mut(key) {
            None => {
                stored.insert(key.clone(), default_value.clone());
                changed = true;
            }
            Some(existing) => {
                if default_value.is_object() {
                    if existing.is_object() {
                        changed |= merge_defaults(existing, default_value);
                    } else {
                        *existing = default_value.clone();
                        changed = true;
                    }
                }
            }
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let json = r#"
        {
            "Vehicles": {
                "Kayak": { "ProtectionMinutesAfterUse": 120 }
            }
        }
        "#;

        let config: DecayConfig = serde_json::from_str(json).unwrap();
        assert!((config.for_kind(VehicleKind::Kayak).protection_minutes_after_use - 120.0).abs()
            < f64::EPSILON);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DecayProtection.json");

        let mut config = DecayConfig::default();
        config.vehicles.rhib.decay_multiplier_near_protection = 0.25;
        config.save(&path).unwrap();

        let (loaded, upgraded) = DecayConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!upgraded);
    }

    #[test]
    fn test_load_upgrades_missing_keys_without_touching_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DecayProtection.json");

        // A file from an older version: one vehicle entry, one stale scalar.
        fs::write(
            &path,
            r#"{ "Vehicles": { "Kayak": { "ProtectionMinutesAfterUse": 5 } } }"#,
        )
        .unwrap();

        let (config, upgraded) = DecayConfig::load(&path).unwrap();
        assert!(upgraded);
        assert!((config.for_kind(VehicleKind::Kayak).protection_minutes_after_use - 5.0).abs()
            < f64::EPSILON);
        // Keys the old file never had arrive with their defaults.
        assert!((config.for_kind(VehicleKind::Rhib).protection_minutes_after_use - 45.0).abs()
            < f64::EPSILON);
        assert!((config.for_kind(VehicleKind::Kayak).decay_multiplier_inside - 1.0).abs()
            < f64::EPSILON);
    }

    #[test]
    fn test_load_or_default_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DecayProtection.json");

        let config = DecayConfig::load_or_default(&path);
        assert_eq!(config, DecayConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_load_or_default_falls_back_on_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DecayProtection.json");
        fs::write(&path, "not json {").unwrap();

        let config = DecayConfig::load_or_default(&path);
        assert_eq!(config, DecayConfig::default());
        // The broken file is left alone for the operator to inspect.
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json {");
    }

    #[test]
    fn test_load_or_default_writes_back_upgrades() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DecayProtection.json");
        fs::write(&path, r#"{ "Vehicles": {} }"#).unwrap();

        DecayConfig::load_or_default(&path);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("TomahaSnowmobile"));
        assert!(written.contains("ProtectionMinutesAfterUse"));
    }

    #[test]
    fn test_merge_defaults_reports_unchanged_for_complete_value() {
        let mut stored = serde_json::to_value(DecayConfig::default()).unwrap();
        let defaults = stored.clone();
        assert!(!merge_defaults(&mut stored, &defaults));
    }
}
