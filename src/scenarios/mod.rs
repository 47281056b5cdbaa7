//! Scenario system: preset body configurations and simulation resets.
//!
//! A scenario is the full initial state of a run. Loading one, or resetting
//! the current one, replaces the body registry wholesale between frames.

pub mod presets;

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::physics::PhysicsError;
use crate::prediction::{OrbitTrails, PredictionState, mark_prediction_dirty};
use crate::registry::{BodyId, BodyRegistry};
use crate::time::{SchedulerConfig, StepScheduler};
use crate::types::{Body, BodyKind, SimulationSet, SimulationSettings};

/// Initial state and look of one body.
#[derive(Clone, Debug)]
pub struct BodySpec {
    pub name: &'static str,
    pub kind: BodyKind,
    /// Initial position (simulation units).
    pub position: DVec3,
    /// Initial velocity (simulation units per second).
    pub velocity: DVec3,
    pub mass: f64,
    /// Visual sphere radius (simulation units).
    pub radius: f64,
    pub color: Color,
}

/// A predefined scenario configuration.
#[derive(Clone, Debug)]
pub struct Scenario {
    /// Unique identifier for the scenario.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Brief description of the scenario.
    pub description: &'static str,
    /// Bodies in registry order: spec `i` becomes `BodyId` `i`.
    pub bodies: Vec<BodySpec>,
    /// Recommended scheduler step (simulation seconds).
    pub fixed_step: f64,
    /// Initial time multiplier.
    pub time_multiplier: f64,
}

impl Default for Scenario {
    fn default() -> Self {
        presets::solar_system()
    }
}

impl Scenario {
    /// Validate every body and build a fresh registry.
    pub fn build_registry(&self) -> Result<BodyRegistry, PhysicsError> {
        self.bodies
            .iter()
            .map(|spec| Body::new(spec.position, spec.velocity, spec.mass))
            .collect::<Result<Vec<_>, _>>()
            .map(BodyRegistry::from_iter)
    }

    /// Scheduler config for this scenario.
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig::default().with_fixed_step(self.fixed_step)
    }

    /// Visual description of a body.
    pub fn spec(&self, id: BodyId) -> Option<&BodySpec> {
        self.bodies.get(id.index())
    }
}

/// Resource holding the running scenario.
#[derive(Resource, Clone, Debug, Default)]
pub struct ActiveScenario(pub Scenario);

/// Message: restart the active scenario from its initial conditions.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ResetSimulation;

/// Message to switch to another preset.
#[derive(Message, Clone, Copy, Debug)]
pub struct LoadScenario {
    /// Id of the preset to load.
    pub scenario_id: &'static str,
}

/// Plugin providing scenario management.
pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveScenario>()
            .add_message::<ResetSimulation>()
            .add_message::<LoadScenario>()
            .add_systems(Startup, start_active_scenario)
            .add_systems(
                Update,
                (handle_load_scenario, handle_reset)
                    .chain()
                    .before(SimulationSet::Physics),
            );
    }
}

/// Restore the registry and clocks to the scenario's initial state.
///
/// Leaves every resource untouched if the scenario does not validate.
pub fn apply_scenario(
    scenario: &Scenario,
    registry: &mut BodyRegistry,
    scheduler: &mut StepScheduler,
    trails: &mut OrbitTrails,
) -> Result<(), PhysicsError> {
    let fresh = scenario.build_registry()?;
    scheduler.set_config(scenario.scheduler_config())?;
    *registry = fresh;
    trails.clear();
    Ok(())
}

/// Build the registry for the scenario present at startup.
fn start_active_scenario(
    active: Res<ActiveScenario>,
    mut settings: ResMut<SimulationSettings>,
    mut registry: ResMut<BodyRegistry>,
    mut scheduler: ResMut<StepScheduler>,
    mut trails: ResMut<OrbitTrails>,
) {
    let scenario = &active.0;
    match apply_scenario(scenario, &mut registry, &mut scheduler, &mut trails) {
        Ok(()) => {
            settings.set_time_multiplier(scenario.time_multiplier);
            info!(
                "Scenario started: {} ({} bodies)",
                scenario.name,
                registry.len()
            );
        }
        Err(err) => error!("Invalid scenario {}: {err}", scenario.id),
    }
}

/// Handle scenario loading messages.
fn handle_load_scenario(
    mut messages: MessageReader<LoadScenario>,
    mut active: ResMut<ActiveScenario>,
    mut settings: ResMut<SimulationSettings>,
    mut resets: MessageWriter<ResetSimulation>,
) {
    for message in messages.read() {
        let Some(scenario) = presets::find(message.scenario_id) else {
            warn!("Unknown scenario ID: {}", message.scenario_id);
            continue;
        };

        info!("Loading scenario: {} ({})", scenario.name, scenario.id);
        settings.set_time_multiplier(scenario.time_multiplier);
        active.0 = scenario;
        resets.write(ResetSimulation);
    }
}

/// Handle reset messages. Several resets in one frame collapse into one.
fn handle_reset(
    mut messages: MessageReader<ResetSimulation>,
    active: Res<ActiveScenario>,
    mut registry: ResMut<BodyRegistry>,
    mut scheduler: ResMut<StepScheduler>,
    mut trails: ResMut<OrbitTrails>,
    mut prediction_state: ResMut<PredictionState>,
) {
    if messages.read().count() == 0 {
        return;
    }

    let scenario = &active.0;
    match apply_scenario(scenario, &mut registry, &mut scheduler, &mut trails) {
        Ok(()) => {
            mark_prediction_dirty(&mut prediction_state);
            info!("Simulation reset: {}", scenario.name);
        }
        Err(err) => error!("Reset failed for {}: {err}", scenario.id),
    }
}
