//! Rendering systems for the gravity simulator.
//!
//! Body spheres, predicted orbit trails and the gravity well grid. Everything
//! here reads simulation state; nothing writes back to it.

pub mod bodies;
pub mod gravity_well;
pub mod orbits;

use bevy::prelude::*;

use self::bodies::{BodyRenderPlugin, sync_body_transforms};
use self::gravity_well::{GravityWellPlugin, draw_gravity_well};
use self::orbits::draw_orbit_trails;
use crate::types::SimulationSet;

pub use self::bodies::BodyMarker;
pub use self::gravity_well::{GravityWellSettings, build_gravity_well};

/// Background clear color.
const SPACE_COLOR: Color = Color::srgb(0.01, 0.01, 0.03);

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(SPACE_COLOR))
            .add_plugins((BodyRenderPlugin, GravityWellPlugin))
            // Positions first, then everything drawn relative to them
            .add_systems(
                Update,
                (
                    sync_body_transforms,
                    (draw_orbit_trails, draw_gravity_well),
                )
                    .chain()
                    .in_set(SimulationSet::Sync),
            );
    }
}
