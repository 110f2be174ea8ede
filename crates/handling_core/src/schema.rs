//! Vehicle handling record schema
//!
//! One record per line, whitespace separated, in this fixed order:
//!
//! - Identity (1): name
//! - Physical (6): mass, drag mult, percent submerged, centre of mass x/y/z
//! - Transmission (9): drive bias, gears, drive force, inertia, max velocity,
//!   brake force, brake bias, brake aux, steering lock
//! - Traction (5): curve max, curve min, curve lateral, spring delta max, bias
//! - Suspension (7): force, comp damp, rebound damp, upper, lower, raise, bias
//! - Damage (4): collision, weapon, deformation, engine
//! - Misc (6): seat offset, monetary value, model flags, handling flags, anim group
//!
//! The order lives in [`FIELD_NAMES`] and [`Vehicle::fields`]; the parser and
//! serializer both go through them.

use serde::{Deserialize, Serialize};

/// Minimum token count for a record line (everything up to handling flags).
pub const REQUIRED_TOKENS: usize = 36;

/// Token count of a complete record line, anim group included.
pub const FIELD_COUNT: usize = 37;

/// Field names in token order. Used for diagnostics and strict-mode errors.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "name",
    "mass",
    "drag_mult",
    "percent_submerged",
    "centre_of_mass_x",
    "centre_of_mass_y",
    "centre_of_mass_z",
    "drive_bias",
    "drive_gears",
    "drive_force",
    "drive_inertia",
    "max_velocity",
    "brake_force",
    "brake_bias",
    "brake_aux",
    "steering_lock",
    "traction_curve_max",
    "traction_curve_min",
    "traction_curve_lateral",
    "traction_spring_delta_max",
    "traction_bias",
    "suspension_force",
    "suspension_comp_damp",
    "suspension_rebound_damp",
    "suspension_upper_limit",
    "suspension_lower_limit",
    "suspension_raise",
    "suspension_bias",
    "collision_damage_mult",
    "weapon_damage_mult",
    "deformation_damage_mult",
    "engine_damage_mult",
    "seat_offset_dist",
    "monetary_value",
    "model_flags",
    "handling_flags",
    "anim_group",
];

/// Token positions the parser and perturbation engine refer to by name.
pub mod position {
    pub const NAME: usize = 0;
    pub const DRAG_MULT: usize = 2;
    pub const DRIVE_GEARS: usize = 8;
    pub const DRIVE_FORCE: usize = 9;
    pub const MAX_VELOCITY: usize = 11;
    pub const BRAKE_FORCE: usize = 12;
    pub const TRACTION_CURVE_MIN: usize = 17;
    pub const MONETARY_VALUE: usize = 33;
    pub const MODEL_FLAGS: usize = 34;
    pub const HANDLING_FLAGS: usize = 35;
    pub const ANIM_GROUP: usize = 36;
}

/// One typed field, borrowed from a [`Vehicle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(i64),
    Float(f64),
}

/// A single four-wheeled vehicle's handling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Identifier, conventionally at most 14 characters (not enforced)
    pub name: String,

    // Physical
    pub mass: f64,
    pub drag_mult: f64,
    pub percent_submerged: f64,
    pub centre_of_mass: [f64; 3],

    // Transmission
    /// 1.0 = front wheel drive, 0.0 = rear wheel drive
    pub drive_bias: f64,
    pub drive_gears: i32,
    pub drive_force: f64,
    pub drive_inertia: f64,
    pub max_velocity: f64,
    pub brake_force: f64,
    pub brake_bias: f64,
    /// Undocumented brake scalar that sits between brake bias and steering lock
    pub brake_aux: f64,
    pub steering_lock: f64,

    // Traction
    pub traction_curve_max: f64,
    pub traction_curve_min: f64,
    pub traction_curve_lateral: f64,
    pub traction_spring_delta_max: f64,
    pub traction_bias: f64,

    // Suspension
    pub suspension_force: f64,
    pub suspension_comp_damp: f64,
    pub suspension_rebound_damp: f64,
    pub suspension_upper_limit: f64,
    pub suspension_lower_limit: f64,
    pub suspension_raise: f64,
    pub suspension_bias: f64,

    // Damage
    pub collision_damage_mult: f64,
    pub weapon_damage_mult: f64,
    pub deformation_damage_mult: f64,
    pub engine_damage_mult: f64,

    // Misc
    pub seat_offset_dist: f64,
    pub monetary_value: i64,
    /// Model flags, hex bitmask carried as-is
    pub model_flags: String,
    /// Handling flags, hex bitmask carried as-is
    pub handling_flags: String,
    /// Missing on short (36-token) lines
    pub anim_group: Option<String>,

    /// Tokens past the anim group, kept verbatim
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trailing: Vec<String>,
}

impl Vehicle {
    /// The required fields (positions 0..36) in token order.
    ///
    /// The optional anim group and trailing tokens are not included; see
    /// [`Vehicle::tail`].
    pub fn fields(&self) -> [FieldValue<'_>; REQUIRED_TOKENS] {
        use FieldValue::{Float, Int, Text};
        [
            Text(&self.name),
            Float(self.mass),
            Float(self.drag_mult),
            Float(self.percent_submerged),
            Float(self.centre_of_mass[0]),
            Float(self.centre_of_mass[1]),
            Float(self.centre_of_mass[2]),
            Float(self.drive_bias),
            Int(i64::from(self.drive_gears)),
            Float(self.drive_force),
            Float(self.drive_inertia),
            Float(self.max_velocity),
            Float(self.brake_force),
            Float(self.brake_bias),
            Float(self.brake_aux),
            Float(self.steering_lock),
            Float(self.traction_curve_max),
            Float(self.traction_curve_min),
            Float(self.traction_curve_lateral),
            Float(self.traction_spring_delta_max),
            Float(self.traction_bias),
            Float(self.suspension_force),
            Float(self.suspension_comp_damp),
            Float(self.suspension_rebound_damp),
            Float(self.suspension_upper_limit),
            Float(self.suspension_lower_limit),
            Float(self.suspension_raise),
            Float(self.suspension_bias),
            Float(self.collision_damage_mult),
            Float(self.weapon_damage_mult),
            Float(self.deformation_damage_mult),
            Float(self.engine_damage_mult),
            Float(self.seat_offset_dist),
            Int(self.monetary_value),
            Text(&self.model_flags),
            Text(&self.handling_flags),
        ]
    }

    /// Anim group followed by any trailing tokens, all opaque text.
    pub fn tail(&self) -> impl Iterator<Item = &str> {
        self.anim_group
            .as_deref()
            .into_iter()
            .chain(self.trailing.iter().map(String::as_str))
    }

    /// Whether every numeric field is finite.
    pub fn is_finite(&self) -> bool {
        self.fields().iter().all(|field| match field {
            FieldValue::Float(v) => v.is_finite(),
            _ => true,
        })
    }
}
