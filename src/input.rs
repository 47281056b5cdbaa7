//! Keyboard shortcuts for simulation control.
//!
//! Space pauses, `[`/`]` halve/double the time multiplier, 1-4 pick preset
//! multipliers, O and G toggle the overlays, R restarts the scenario.

use bevy::prelude::*;

use crate::scenarios::ResetSimulation;
use crate::types::SimulationSettings;

/// Multipliers bound to the digit keys 1-4.
pub const MULTIPLIER_PRESETS: [f64; 4] = [1_000.0, 10_000.0, 50_000.0, 200_000.0];

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, keyboard_shortcuts);
    }
}

/// Handle keyboard shortcuts for simulation control.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<SimulationSettings>,
    mut resets: MessageWriter<ResetSimulation>,
) {
    // Space: toggle pause
    if keys.just_pressed(KeyCode::Space) {
        let paused = settings.toggle_pause();
        info!("Simulation {}", if paused { "paused" } else { "running" });
    }

    // Time controls: [ and ] to adjust simulation speed
    if keys.just_pressed(KeyCode::BracketLeft) {
        settings.scale_time_multiplier(0.5);
        info!("Time multiplier: {}x", settings.time_multiplier);
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        settings.scale_time_multiplier(2.0);
        info!("Time multiplier: {}x", settings.time_multiplier);
    }

    // Quick multiplier selection with number keys
    let digits = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
    ];
    for (key, multiplier) in digits.into_iter().zip(MULTIPLIER_PRESETS) {
        if keys.just_pressed(key) {
            settings.set_time_multiplier(multiplier);
            info!("Time multiplier: {}x", settings.time_multiplier);
        }
    }

    if keys.just_pressed(KeyCode::KeyO) {
        settings.show_orbit = !settings.show_orbit;
        info!("Orbit trails {}", on_off(settings.show_orbit));
    }
    if keys.just_pressed(KeyCode::KeyG) {
        settings.show_gravity_well = !settings.show_gravity_well;
        info!("Gravity well {}", on_off(settings.show_gravity_well));
    }

    // R: restart the active scenario
    if keys.just_pressed(KeyCode::KeyR) {
        resets.write(ResetSimulation);
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
