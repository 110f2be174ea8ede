//! # Run Configuration
//!
//! JSON description of one perturbation run, so a run can be saved and
//! repeated exactly.
//!
//! ```json
//! {
//!   "offset_percent": 10.0,
//!   "toggles": { "driveforce": true, "drag": true },
//!   "seed": 42,
//!   "parse_mode": "strict"
//! }
//! ```

use crate::error::{HandlingError, Result};
use crate::parser::ParseMode;
use crate::perturb::{PerturbConfig, Toggles};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Jitter bound in percent
    pub offset_percent: f64,
    pub toggles: Toggles,
    /// Fixed RNG seed; `None` draws from OS entropy
    pub seed: Option<u64>,
    pub parse_mode: ParseMode,
}

impl RunConfig {
    /// Every field group at the given offset
    pub fn all_groups(offset_percent: f64) -> Self {
        Self {
            offset_percent,
            toggles: Toggles::all(),
            ..Self::default()
        }
    }

    /// Seeded and strict, for tests and reproducible batch runs
    pub fn deterministic(offset_percent: f64, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            parse_mode: ParseMode::Strict,
            ..Self::all_groups(offset_percent)
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.perturb_config().validate().map_err(|e| match e {
            HandlingError::InvalidOffset(v) => {
                HandlingError::Config(format!("offset_percent must be finite and >= 0, got {v}"))
            }
            other => other,
        })
    }

    pub fn perturb_config(&self) -> PerturbConfig {
        PerturbConfig::new(self.offset_percent, self.toggles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perturb::FieldGroup;

    #[test]
    fn test_default_config() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.offset_percent, 0.0);
        assert!(!cfg.toggles.any());
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.parse_mode, ParseMode::Permissive);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let all = RunConfig::all_groups(12.5);
        assert_eq!(all.toggles.enabled().count(), 5);

        let det = RunConfig::deterministic(5.0, 7);
        assert_eq!(det.seed, Some(7));
        assert_eq!(det.parse_mode, ParseMode::Strict);
        assert!(det.toggles.is_enabled(FieldGroup::Drag));
    }

    #[test]
    fn test_from_json_partial() {
        let cfg = RunConfig::from_json(
            r#"{"offset_percent": 10.0, "toggles": {"driveforce": true, "drag": true}, "seed": 42}"#,
        )
        .unwrap();

        assert_eq!(cfg.offset_percent, 10.0);
        assert_eq!(
            cfg.toggles.enabled().collect::<Vec<_>>(),
            vec![FieldGroup::DriveForce, FieldGroup::Drag]
        );
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.parse_mode, ParseMode::Permissive);
    }

    #[test]
    fn test_json_round_trip() {
        let cfg = RunConfig::deterministic(3.0, 11);
        let back = RunConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn test_invalid_json_and_offset() {
        assert!(matches!(
            RunConfig::from_json("{ not json"),
            Err(HandlingError::Config(_))
        ));

        let cfg = RunConfig {
            offset_percent: -3.0,
            ..RunConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(HandlingError::Config(_))));
    }
}
