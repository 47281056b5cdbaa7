//! Gravity well visualization.
//!
//! A square grid on a horizontal plane, following the camera, where each
//! vertex sinks in proportion to the gravitational potential of all bodies
//! at that point. Massive bodies show up as funnels.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::camera::{MainCamera, from_render, to_render};
use crate::physics::potential_at;
use crate::registry::BodyRegistry;
use crate::types::{Body, SimulationSettings};

/// Plugin providing the gravity well grid.
pub struct GravityWellPlugin;

impl Plugin for GravityWellPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GravityWellSettings>();
    }
}

/// Grid layout and depth mapping. Lengths are in simulation units.
#[derive(Resource, Clone, Debug)]
pub struct GravityWellSettings {
    /// Distance between neighbouring vertices.
    pub spacing: f64,
    /// Vertices per side.
    pub extent: usize,
    /// Height of the undisturbed plane.
    pub plane_height: f64,
    /// Depth per unit of `Σ G·m/r`.
    pub depth_scale: f64,
    /// Deepest a vertex may sink below the plane.
    pub max_depth: f64,
    pub color: Color,
}

impl Default for GravityWellSettings {
    fn default() -> Self {
        Self {
            spacing: 250.0,
            extent: 33,
            plane_height: -400.0,
            depth_scale: 2.0e5,
            max_depth: 2500.0,
            color: Color::srgba(0.45, 0.55, 0.75, 0.25),
        }
    }
}

/// Vertices of one grid, row-major, `extent × extent`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GravityWellGrid {
    pub extent: usize,
    pub points: Vec<DVec3>,
}

impl GravityWellGrid {
    /// Vertex at column `i`, row `j`.
    pub fn point(&self, i: usize, j: usize) -> Option<DVec3> {
        if i >= self.extent || j >= self.extent {
            return None;
        }
        self.points.get(j * self.extent + i).copied()
    }

    /// Every line between horizontal and vertical neighbours.
    pub fn segments(&self) -> impl Iterator<Item = (DVec3, DVec3)> + '_ {
        let n = self.extent;
        let rows = (0..n).flat_map(move |j| (1..n).map(move |i| (j * n + i - 1, j * n + i)));
        let cols = (1..n).flat_map(move |j| (0..n).map(move |i| ((j - 1) * n + i, j * n + i)));
        rows.chain(cols)
            .map(|(a, b)| (self.points[a], self.points[b]))
    }
}

/// Depth below the plane at `point`.
///
/// `depth_scale · Σ G·m/r`, skipping bodies exactly at `point`, capped at
/// `max_depth`.
pub fn well_depth(point: DVec3, bodies: &[Body], settings: &GravityWellSettings) -> f64 {
    (-settings.depth_scale * potential_at(point, bodies)).min(settings.max_depth)
}

/// Build the grid around `center`.
///
/// The grid origin snaps to multiples of `spacing` so the lines stay put
/// while the camera moves.
pub fn build_gravity_well(
    center: DVec3,
    bodies: &[Body],
    settings: &GravityWellSettings,
) -> GravityWellGrid {
    let n = settings.extent;
    let spacing = settings.spacing;
    if n == 0 || !(spacing.is_finite() && spacing > 0.0) || !center.is_finite() {
        return GravityWellGrid::default();
    }

    let half = (n as f64 - 1.0) / 2.0;
    let snapped_x = (center.x / spacing).round() * spacing;
    let snapped_z = (center.z / spacing).round() * spacing;
    let origin_x = snapped_x - half.floor() * spacing;
    let origin_z = snapped_z - half.floor() * spacing;

    let mut points = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            let mut p = DVec3::new(
                origin_x + i as f64 * spacing,
                settings.plane_height,
                origin_z + j as f64 * spacing,
            );
            p.y -= well_depth(p, bodies, settings);
            points.push(p);
        }
    }

    GravityWellGrid { extent: n, points }
}

/// Draw the grid around the camera.
pub fn draw_gravity_well(
    sim_settings: Res<SimulationSettings>,
    settings: Res<GravityWellSettings>,
    registry: Res<BodyRegistry>,
    camera: Query<&Transform, With<MainCamera>>,
    mut gizmos: Gizmos,
) {
    if !sim_settings.show_gravity_well {
        return;
    }
    let Ok(camera_transform) = camera.single() else {
        return;
    };

    let center = from_render(camera_transform.translation);
    let grid = build_gravity_well(center, registry.bodies(), &settings);

    for (a, b) in grid.segments() {
        gizmos.line(to_render(a), to_render(b), settings.color);
    }
}
