//! Orbit trail rendering using Bevy Gizmos.
//!
//! Trails come from the predictor; this module only draws them, starting at
//! the body's live position and fading toward the end of the horizon.

use bevy::prelude::*;

use crate::camera::to_render;
use crate::prediction::OrbitTrails;
use crate::registry::BodyRegistry;
use crate::scenarios::ActiveScenario;
use crate::types::SimulationSettings;

/// Alpha at the start of a trail.
const TRAIL_ALPHA_START: f32 = 0.9;

/// Alpha at the end of a trail.
const TRAIL_ALPHA_END: f32 = 0.1;

/// Opacity of the segment at `index` out of `total` segments.
pub fn trail_alpha(index: usize, total: usize) -> f32 {
    if total <= 1 {
        return TRAIL_ALPHA_START;
    }
    let t = index as f32 / (total - 1) as f32;
    TRAIL_ALPHA_START + (TRAIL_ALPHA_END - TRAIL_ALPHA_START) * t
}

/// Draw the predicted trail of every body.
pub fn draw_orbit_trails(
    settings: Res<SimulationSettings>,
    trails: Res<OrbitTrails>,
    registry: Res<BodyRegistry>,
    active: Res<ActiveScenario>,
    mut gizmos: Gizmos,
) {
    if !settings.show_orbit {
        return;
    }

    for (id, samples) in trails.iter() {
        let (Some(body), Some(spec)) = (registry.get(id), active.0.spec(id)) else {
            continue;
        };
        if samples.is_empty() {
            continue;
        }

        let mut prev = to_render(body.position);
        for (i, sample) in samples.iter().enumerate() {
            let point = to_render(*sample);
            gizmos.line(prev, point, spec.color.with_alpha(trail_alpha(i, samples.len())));
            prev = point;
        }
    }
}
