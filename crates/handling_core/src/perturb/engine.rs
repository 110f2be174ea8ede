// Bounded multiplicative jitter
use super::toggles::FieldGroup;
use super::PerturbConfig;
use crate::schema::Vehicle;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How many times each group was touched in one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerturbStats {
    pub vehicles: u32,
    pub drive_force: u32,
    pub brake_force: u32,
    pub traction: u32,
    pub max_velocity: u32,
    pub drag: u32,
}

impl PerturbStats {
    fn record(&mut self, group: FieldGroup) {
        match group {
            FieldGroup::DriveForce => self.drive_force += 1,
            FieldGroup::BrakeForce => self.brake_force += 1,
            FieldGroup::Traction => self.traction += 1,
            FieldGroup::MaxVelocity => self.max_velocity += 1,
            FieldGroup::Drag => self.drag += 1,
        }
    }

    pub fn total_applications(&self) -> u32 {
        self.drive_force + self.brake_force + self.traction + self.max_velocity + self.drag
    }
}

/// Perturb every vehicle in place.
///
/// Each enabled group draws its own sample `u` in `[0, offset_fraction)` per
/// vehicle. Forward groups are multiplied by `1 + u`, drag is divided by it.
pub fn perturb<R: Rng + ?Sized>(
    vehicles: &mut [Vehicle],
    config: &PerturbConfig,
    rng: &mut R,
) -> PerturbStats {
    let mut stats = PerturbStats::default();

    for vehicle in vehicles.iter_mut() {
        for group in config.toggles.enabled() {
            let u = sample_offset(rng, config.offset_fraction());
            apply_group(vehicle, group, u);
            stats.record(group);
        }
        stats.vehicles += 1;
    }

    log::debug!(
        "Perturbed {} vehicles with offset {:.4} ({} field applications)",
        stats.vehicles,
        config.offset_fraction(),
        stats.total_applications()
    );

    stats
}

/// Uniform draw in `[0, offset_fraction)`; exactly zero when the bound is zero.
pub fn sample_offset<R: Rng + ?Sized>(rng: &mut R, offset_fraction: f64) -> f64 {
    rng.gen::<f64>() * offset_fraction
}

/// Apply one group with a given draw `u`.
pub fn apply_group(vehicle: &mut Vehicle, group: FieldGroup, u: f64) {
    let factor = 1.0 + u;
    let field = field_mut(vehicle, group);
    if group.is_inverse() {
        *field /= factor;
    } else {
        *field *= factor;
    }
}

fn field_mut(vehicle: &mut Vehicle, group: FieldGroup) -> &mut f64 {
    match group {
        FieldGroup::DriveForce => &mut vehicle.drive_force,
        FieldGroup::BrakeForce => &mut vehicle.brake_force,
        FieldGroup::Traction => &mut vehicle.traction_curve_min,
        FieldGroup::MaxVelocity => &mut vehicle.max_velocity,
        FieldGroup::Drag => &mut vehicle.drag_mult,
    }
}
