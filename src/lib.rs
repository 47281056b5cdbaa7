//! Gravwell - Interactive N-body Gravity Simulator
//!
//! A library crate providing the simulation core (bodies, gravity,
//! integration, fixed-step scheduling, orbit prediction) and the Bevy
//! plugins that render and control it.

pub mod camera;
pub mod input;
pub mod physics;
pub mod prediction;
pub mod registry;
pub mod render;
pub mod scenarios;
pub mod time;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

/// Simulation plugins that need neither a window nor a GPU.
///
/// Physics, prediction and scenario handling. Rendering, camera, input and
/// UI are added separately by the application.
pub struct SimulationPlugins;

impl PluginGroup for SimulationPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(physics::PhysicsPlugin)
            .add(prediction::PredictionPlugin)
            .add(scenarios::ScenarioPlugin)
    }
}
