//! Body rendering and spawning.
//!
//! One sphere per registry body. Stars glow and carry the scene's light.

use bevy::prelude::*;

use crate::camera::{RENDER_SCALE, to_render};
use crate::registry::{BodyId, BodyRegistry};
use crate::scenarios::{ActiveScenario, BodySpec};
use crate::types::{BodyKind, SimulationSet};

/// Smallest sphere radius drawn, in render units.
pub const MIN_RENDER_RADIUS: f32 = 0.15;

/// Component linking a render entity to its body.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyMarker(pub BodyId);

/// Plugin providing body spawning functionality.
pub struct BodyRenderPlugin;

impl Plugin for BodyRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            spawn_scenario_bodies
                .run_if(resource_changed::<ActiveScenario>)
                .before(SimulationSet::Sync),
        );
    }
}

/// Sphere radius in render units.
pub fn render_radius(spec: &BodySpec) -> f32 {
    ((spec.radius * RENDER_SCALE) as f32).max(MIN_RENDER_RADIUS)
}

/// Material for a body; stars are emissive.
pub fn body_material(spec: &BodySpec) -> StandardMaterial {
    let emissive = match spec.kind {
        BodyKind::Star => spec.color.to_linear() * 4.0,
        BodyKind::Planet => LinearRgba::BLACK,
    };

    StandardMaterial {
        base_color: spec.color,
        emissive,
        ..default()
    }
}

/// Replace all body entities with the active scenario's bodies.
///
/// Runs on startup and whenever another scenario is loaded.
fn spawn_scenario_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    active: Res<ActiveScenario>,
    existing: Query<Entity, With<BodyMarker>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn();
    }

    for (i, spec) in active.0.bodies.iter().enumerate() {
        let mesh = meshes.add(Sphere::new(render_radius(spec)));
        let material = materials.add(body_material(spec));

        let mut entity = commands.spawn((
            Name::new(spec.name),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(to_render(spec.position)),
            BodyMarker(BodyId::from_index(i)),
        ));

        if spec.kind == BodyKind::Star {
            entity.with_child(PointLight {
                color: spec.color,
                intensity: 5.0e8,
                range: 500.0,
                shadows_enabled: false,
                ..default()
            });
        }
    }

    info!("Spawned {} bodies", active.0.bodies.len());
}

/// Copy registry positions into body transforms.
pub fn sync_body_transforms(
    registry: Res<BodyRegistry>,
    mut query: Query<(&BodyMarker, &mut Transform)>,
) {
    for (marker, mut transform) in &mut query {
        if let Some(body) = registry.get(marker.0) {
            transform.translation = to_render(body.position);
        }
    }
}
