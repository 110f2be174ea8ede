//! # Perturbation Engine
//!
//! Applies bounded random jitter to a whitelist of field groups:
//!
//! | Toggle | Field | Rule |
//! |---|---|---|
//! | `driveforce` | drive force | `v * (1 + u)` |
//! | `brakeforce` | brake force | `v * (1 + u)` |
//! | `traction` | traction curve min | `v * (1 + u)` |
//! | `maxVelocity` | max velocity | `v * (1 + u)` |
//! | `drag` | drag mult | `v / (1 + u)` |
//!
//! `u` is uniform in `[0, offset_fraction)` and drawn fresh for every
//! (vehicle, group) pair. The RNG is always passed in; use [`seeded_rng`]
//! for reproducible runs.

mod engine;
mod toggles;

pub use engine::{apply_group, perturb, sample_offset, PerturbStats};
pub use toggles::{FieldGroup, Toggles};

use crate::error::{HandlingError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Offset and toggles for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerturbConfig {
    /// Upper bound of the jitter, in percent (10.0 = up to +10%)
    pub offset_percent: f64,
    pub toggles: Toggles,
}

impl PerturbConfig {
    pub fn new(offset_percent: f64, toggles: Toggles) -> Self {
        Self {
            offset_percent,
            toggles,
        }
    }

    /// Validated constructor. Rejects negative and non-finite offsets.
    pub fn try_new(offset_percent: f64, toggles: Toggles) -> Result<Self> {
        let config = Self::new(offset_percent, toggles);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.offset_percent.is_finite() || self.offset_percent < 0.0 {
            return Err(HandlingError::InvalidOffset(self.offset_percent));
        }
        Ok(())
    }

    /// Offset normalized to a fraction (10.0% → 0.1)
    pub fn offset_fraction(&self) -> f64 {
        self.offset_percent / 100.0
    }
}

/// RNG for a run: seeded when a seed is given, from OS entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
