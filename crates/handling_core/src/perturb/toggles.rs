//! Field groups and the toggles that select them

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A perturbable field group. Anything not listed here is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldGroup {
    DriveForce,
    BrakeForce,
    /// Traction curve min (Wc-)
    Traction,
    MaxVelocity,
    /// Drag multiplier, inverse-scaled
    Drag,
}

impl FieldGroup {
    /// Application order within one record. Fixed so seeded runs reproduce.
    pub const ALL: [FieldGroup; 5] = [
        FieldGroup::DriveForce,
        FieldGroup::BrakeForce,
        FieldGroup::Traction,
        FieldGroup::MaxVelocity,
        FieldGroup::Drag,
    ];

    /// Toggle key as sent by the front end
    pub fn key(self) -> &'static str {
        match self {
            FieldGroup::DriveForce => "driveforce",
            FieldGroup::BrakeForce => "brakeforce",
            FieldGroup::Traction => "traction",
            FieldGroup::MaxVelocity => "maxVelocity",
            FieldGroup::Drag => "drag",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.key() == key)
    }

    /// Drag is divided by the jitter factor, every other group multiplied.
    pub fn is_inverse(self) -> bool {
        matches!(self, FieldGroup::Drag)
    }
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which field groups a run perturbs.
///
/// Serialized with the front end's key names so a `{"driveforce": true, ...}`
/// map deserializes directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggles {
    pub driveforce: bool,
    pub brakeforce: bool,
    pub traction: bool,
    #[serde(rename = "maxVelocity")]
    pub max_velocity: bool,
    pub drag: bool,
}

impl Toggles {
    pub fn all() -> Self {
        Self {
            driveforce: true,
            brakeforce: true,
            traction: true,
            max_velocity: true,
            drag: true,
        }
    }

    pub fn only(group: FieldGroup) -> Self {
        let mut toggles = Self::default();
        toggles.set(group, true);
        toggles
    }

    /// Build from a loose key map. Unknown keys are ignored.
    pub fn from_map(map: &HashMap<String, bool>) -> Self {
        let mut toggles = Self::default();
        for (key, &enabled) in map {
            match FieldGroup::from_key(key) {
                Some(group) => toggles.set(group, enabled),
                None => log::debug!("Ignoring unknown toggle '{}'", key),
            }
        }
        toggles
    }

    pub fn is_enabled(&self, group: FieldGroup) -> bool {
        match group {
            FieldGroup::DriveForce => self.driveforce,
            FieldGroup::BrakeForce => self.brakeforce,
            FieldGroup::Traction => self.traction,
            FieldGroup::MaxVelocity => self.max_velocity,
            FieldGroup::Drag => self.drag,
        }
    }

    pub fn set(&mut self, group: FieldGroup, enabled: bool) {
        match group {
            FieldGroup::DriveForce => self.driveforce = enabled,
            FieldGroup::BrakeForce => self.brakeforce = enabled,
            FieldGroup::Traction => self.traction = enabled,
            FieldGroup::MaxVelocity => self.max_velocity = enabled,
            FieldGroup::Drag => self.drag = enabled,
        }
    }

    /// Enabled groups in application order
    pub fn enabled(&self) -> impl Iterator<Item = FieldGroup> + '_ {
        FieldGroup::ALL
            .into_iter()
            .filter(move |group| self.is_enabled(*group))
    }

    pub fn any(&self) -> bool {
        self.enabled().next().is_some()
    }
}
