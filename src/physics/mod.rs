//! Physics simulation for the body set.
//!
//! Gravity and integration are plain functions over slices of [`Body`].
//! The plugin drives them once per rendered frame through the
//! [`StepScheduler`], which turns variable frame time into fixed ticks.
//!
//! [`Body`]: crate::types::Body

mod gravity;
mod integrator;

#[cfg(test)]
mod proptest_physics;

use bevy::math::DVec3;
use bevy::prelude::*;

pub use gravity::{
    acceleration_at, compute_acceleration, compute_accelerations, compute_accelerations_into,
    potential_at, potential_energy, total_energy,
};
pub use integrator::{integrate, kick_drift, validate_dt};

use crate::registry::BodyRegistry;
use crate::time::StepScheduler;
use crate::types::{SimulationSet, SimulationSettings};

/// Errors raised at the physics boundaries.
///
/// Numerical singularities are not errors: coincident bodies are skipped
/// inside the gravity sum.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum PhysicsError {
    #[error("body mass must be positive and finite, got {0}")]
    InvalidMass(f64),

    #[error("body position and velocity must be finite")]
    NonFiniteState,

    #[error("invalid time step: {0} (must be finite and non-negative)")]
    InvalidTimeStep(f64),

    #[error("invalid fixed step: {0} (must be finite and positive)")]
    InvalidFixedStep(f64),

    #[error("unknown body id {0}")]
    UnknownBody(usize),
}

/// Plugin providing the physics step.
///
/// Also fixes the order of the per-frame pipeline:
/// physics, then prediction, then transform sync.
///
/// The step runs in `Update` rather than `FixedUpdate`: [`StepScheduler`]
/// owns the accumulator so it can apply the time multiplier, pause, and the
/// per-frame tick cap in one place.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StepScheduler>()
            .init_resource::<BodyRegistry>()
            .init_resource::<SimulationSettings>()
            .configure_sets(
                Update,
                (
                    SimulationSet::Physics,
                    SimulationSet::Prediction,
                    SimulationSet::Sync,
                )
                    .chain(),
            )
            .add_systems(Update, physics_step.in_set(SimulationSet::Physics));
    }
}

/// Run one physics tick over the whole registry.
///
/// All accelerations are computed from the pre-tick state before any body
/// moves, so the result does not depend on body order. `scratch` holds the
/// accelerations and is reused between ticks.
pub fn tick(
    registry: &mut BodyRegistry,
    dt: f64,
    scratch: &mut Vec<DVec3>,
) -> Result<(), PhysicsError> {
    validate_dt(dt)?;

    compute_accelerations_into(registry.bodies(), scratch);

    for (body, acc) in registry.bodies_mut().iter_mut().zip(scratch.iter()) {
        integrate(body, *acc, dt)?;
    }

    Ok(())
}

/// Main physics system.
///
/// Feeds the frame's real delta into the scheduler, which runs as many
/// fixed ticks as the accumulated (scaled) time allows.
fn physics_step(
    time: Res<Time>,
    settings: Res<SimulationSettings>,
    mut scheduler: ResMut<StepScheduler>,
    mut registry: ResMut<BodyRegistry>,
) {
    match scheduler.advance(
        time.delta_secs_f64(),
        &settings,
        registry.bypass_change_detection(),
    ) {
        Ok(report) => {
            if report.ticks > 0 {
                registry.set_changed();
            }
            if report.dropped_time > 0.0 {
                warn!(
                    "Tick cap reached ({} ticks), dropped {:.3} s of simulation time",
                    report.ticks, report.dropped_time
                );
            }
        }
        Err(err) => error!("Physics tick failed: {err}"),
    }
}
