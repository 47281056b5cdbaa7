//! Orbit prediction for the running bodies.
//!
//! Each refresh integrates every body forward from its live state for a fixed
//! horizon and stores the visited positions as a trail. The other bodies are
//! frozen at their live positions for the whole horizon. That keeps the
//! prediction O(steps·N) per body, and it is what the trails are meant to
//! show: the path this body would take around the system as it is now.
//!
//! Prediction works on copies. Live state is only ever read.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::physics::{PhysicsError, acceleration_at, kick_drift, validate_dt};
use crate::registry::{BodyId, BodyRegistry};
use crate::types::{SimulationSet, SimulationSettings};

/// Plugin providing orbit prediction.
pub struct PredictionPlugin;

impl Plugin for PredictionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PredictionSettings>()
            .init_resource::<PredictionState>()
            .init_resource::<OrbitTrails>()
            .add_systems(
                Update,
                (
                    track_prediction_triggers,
                    update_orbit_trails.run_if(should_run_prediction),
                )
                    .chain()
                    .in_set(SimulationSet::Prediction),
            );
    }
}

/// Configuration for orbit prediction.
#[derive(Resource, Clone, Debug)]
pub struct PredictionSettings {
    /// Integration steps per prediction (one trail point per step).
    pub steps: usize,
    /// Simulation seconds per prediction step.
    pub time_step: f64,
    /// How often to recalculate trails (frames).
    pub update_interval: u32,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            steps: 300,
            time_step: 1000.0,
            update_interval: 5,
        }
    }
}

/// State for the prediction system.
#[derive(Resource, Default)]
pub struct PredictionState {
    /// Set when trails must be rebuilt on the next frame.
    needs_update: bool,
    /// Frames since the last refresh.
    frame_counter: u32,
    /// Orbit display flag seen last frame.
    last_show_orbit: bool,
}

/// Predicted trail per body, indexed by [`BodyId`].
#[derive(Resource, Default, Clone, Debug)]
pub struct OrbitTrails {
    trails: Vec<Vec<DVec3>>,
}

impl OrbitTrails {
    pub fn get(&self, id: BodyId) -> Option<&[DVec3]> {
        self.trails.get(id.index()).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &[DVec3])> {
        self.trails
            .iter()
            .enumerate()
            .map(|(i, t)| (BodyId::from_index(i), t.as_slice()))
    }

    /// Number of trails stored (one per body after a refresh).
    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    /// Sum of all trail lengths.
    pub fn total_points(&self) -> usize {
        self.trails.iter().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        self.trails.clear();
    }

    /// Recompute every trail from the registry, reusing existing buffers.
    ///
    /// On error the trail of the failing body is left empty and the first
    /// error is returned after all other bodies were processed.
    pub fn rebuild(
        &mut self,
        registry: &BodyRegistry,
        settings: &PredictionSettings,
    ) -> Result<(), PhysicsError> {
        self.trails.resize_with(registry.len(), Vec::new);

        let mut first_error = None;
        for (id, trail) in registry.ids().zip(self.trails.iter_mut()) {
            if let Err(err) = predict_orbit_into(registry, id, settings, trail) {
                trail.clear();
                first_error.get_or_insert(err);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

/// Predict the future path of one body.
///
/// Integrates a private copy of the target's state for `settings.steps`
/// steps of `settings.time_step`, using the same semi-implicit Euler update
/// as the live simulation, against the live positions of every other body.
/// One position is recorded per step. If the copied state stops being
/// finite, the sequence ends there so every returned point is finite.
///
/// # Arguments
/// * `registry` - Live bodies, only read
/// * `target` - Body to predict
/// * `settings` - Horizon and step
///
/// # Errors
/// [`PhysicsError::UnknownBody`] if `target` is not in the registry,
/// [`PhysicsError::InvalidTimeStep`] if the step is negative or non-finite.
pub fn predict_orbit(
    registry: &BodyRegistry,
    target: BodyId,
    settings: &PredictionSettings,
) -> Result<Vec<DVec3>, PhysicsError> {
    let mut samples = Vec::with_capacity(settings.steps);
    predict_orbit_into(registry, target, settings, &mut samples)?;
    Ok(samples)
}

/// [`predict_orbit`] writing into a caller-owned buffer, which is cleared first.
pub fn predict_orbit_into(
    registry: &BodyRegistry,
    target: BodyId,
    settings: &PredictionSettings,
    out: &mut Vec<DVec3>,
) -> Result<(), PhysicsError> {
    out.clear();

    let body = registry
        .get(target)
        .ok_or(PhysicsError::UnknownBody(target.index()))?;
    let dt = settings.time_step;
    validate_dt(dt)?;

    let bodies = registry.bodies();
    let mut pos = body.position;
    let mut vel = body.velocity;

    for _ in 0..settings.steps {
        let acc = acceleration_at(pos, bodies, Some(target));
        kick_drift(&mut pos, &mut vel, acc, dt);

        if !pos.is_finite() || !vel.is_finite() {
            break;
        }
        out.push(pos);
    }

    Ok(())
}

/// Mark trails as needing an immediate rebuild.
pub fn mark_prediction_dirty(state: &mut PredictionState) {
    state.needs_update = true;
}

/// Advance the refresh counter and react to the orbit toggle.
fn track_prediction_triggers(
    settings: Res<SimulationSettings>,
    registry: Res<BodyRegistry>,
    mut state: ResMut<PredictionState>,
) {
    state.frame_counter = state.frame_counter.saturating_add(1);

    // Trails went stale while hidden
    if settings.show_orbit && !state.last_show_orbit {
        state.needs_update = true;
    }
    state.last_show_orbit = settings.show_orbit;

    // A replaced registry (scenario reset) must not keep old trails
    if registry.is_added() {
        state.needs_update = true;
    }
}

/// Run condition: should trails be rebuilt this frame?
fn should_run_prediction(
    state: Res<PredictionState>,
    settings: Res<PredictionSettings>,
    sim_settings: Res<SimulationSettings>,
) -> bool {
    sim_settings.show_orbit
        && (state.needs_update || state.frame_counter >= settings.update_interval)
}

/// Rebuild all trails from the live registry.
fn update_orbit_trails(
    registry: Res<BodyRegistry>,
    settings: Res<PredictionSettings>,
    mut state: ResMut<PredictionState>,
    mut trails: ResMut<OrbitTrails>,
) {
    state.needs_update = false;
    state.frame_counter = 0;

    if let Err(err) = trails.rebuild(&registry, &settings) {
        error!("Orbit prediction failed: {err}");
    }

    debug!(
        "Predicted {} trails ({} points)",
        trails.len(),
        trails.total_points()
    );
}
