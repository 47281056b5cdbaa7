//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use bevy::math::DVec3;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use gravwell::SimulationPlugins;
use gravwell::registry::BodyRegistry;
use gravwell::types::{Body, G};

/// Star mass of the reference system.
pub const STAR_MASS: f64 = 2.5e10;

/// Planet mass of the reference system.
pub const PLANET_MASS: f64 = 5000.0;

/// Real seconds per frame in the headless app.
pub const FRAME_SECONDS: f64 = 1.0 / 60.0;

/// The reference system: star at rest at the origin, planet at
/// (-2000, 0, 0) moving at 0.03 along +z. Star is id 0, planet id 1.
pub fn reference_registry() -> BodyRegistry {
    let star = Body::new(DVec3::ZERO, DVec3::ZERO, STAR_MASS).unwrap();
    let planet = Body::new(
        DVec3::new(-2000.0, 0.0, 0.0),
        DVec3::new(0.0, 0.0, 0.03),
        PLANET_MASS,
    )
    .unwrap();
    [star, planet].into_iter().collect()
}

/// Specific orbital energy of `body` around `primary`.
pub fn orbital_energy(body: &Body, primary: &Body) -> f64 {
    let r = (body.position - primary.position).length();
    let v = (body.velocity - primary.velocity).length();
    0.5 * v * v - G * primary.mass() / r
}

/// Total angular momentum about the origin.
pub fn angular_momentum(registry: &BodyRegistry) -> DVec3 {
    registry
        .bodies()
        .iter()
        .map(|b| b.mass() * b.position.cross(b.velocity))
        .sum()
}

/// Distance between two bodies of a registry.
pub fn distance(registry: &BodyRegistry, a: usize, b: usize) -> f64 {
    let bodies = registry.bodies();
    (bodies[a].position - bodies[b].position).length()
}

/// Headless app with the simulation plugins and a fixed 1/60 s frame.
///
/// The first `update` only runs startup; simulation time starts flowing on
/// the second.
pub fn create_simulation_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(
            Duration::from_secs_f64(FRAME_SECONDS),
        ));
    app.update();
    app
}

/// Run `frames` updates.
pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}
