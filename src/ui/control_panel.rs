//! Control window with all simulation controls.
//!
//! - Play/Pause, reset, scenario picker
//! - Time multiplier slider and preset buttons
//! - Orbit trail and gravity well toggles
//! - Elapsed time and tick count
//! - Per-body table

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::format::{format_duration, format_mass, format_multiplier, format_vec3};
use super::icons;
use crate::input::MULTIPLIER_PRESETS;
use crate::registry::BodyRegistry;
use crate::scenarios::{ActiveScenario, LoadScenario, ResetSimulation, presets};
use crate::time::StepScheduler;
use crate::types::{BodyKind, MAX_TIME_MULTIPLIER, MIN_TIME_MULTIPLIER, SimulationSettings};

/// Colors for the panel.
mod colors {
    use bevy_egui::egui::Color32;

    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const STAR: Color32 = Color32::from_rgb(255, 210, 110);
    pub const TEXT_DIM: Color32 = Color32::from_rgb(150, 150, 165);
}

/// Resource for the help section visibility.
#[derive(Resource, Default)]
pub struct HelpState {
    pub visible: bool,
}

/// System that renders the control window.
pub fn control_panel_system(
    mut contexts: EguiContexts,
    mut settings: ResMut<SimulationSettings>,
    mut help: ResMut<HelpState>,
    scheduler: Res<StepScheduler>,
    registry: Res<BodyRegistry>,
    active: Res<ActiveScenario>,
    mut resets: MessageWriter<ResetSimulation>,
    mut loads: MessageWriter<LoadScenario>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("Simulation")
        .default_pos([12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                render_play_pause(ui, &mut settings);

                if ui
                    .button(egui::RichText::new(icons::RESET).size(18.0))
                    .on_hover_text("Reset scenario (R)")
                    .clicked()
                {
                    resets.write(ResetSimulation);
                }

                render_scenario_picker(ui, &active, &mut loads);

                if ui
                    .selectable_label(help.visible, egui::RichText::new(icons::HELP).size(18.0))
                    .on_hover_text("Keyboard shortcuts")
                    .clicked()
                {
                    help.visible = !help.visible;
                }
            });

            ui.separator();
            render_time_controls(ui, &mut settings);

            ui.horizontal(|ui| {
                ui.checkbox(&mut settings.show_orbit, format!("{} Orbits (O)", icons::ORBIT));
                ui.checkbox(
                    &mut settings.show_gravity_well,
                    format!("{} Gravity well (G)", icons::GRID),
                );
            });

            ui.separator();
            ui.label(format!(
                "{} {}   ticks: {}",
                icons::CLOCK,
                format_duration(scheduler.elapsed()),
                scheduler.total_ticks()
            ));

            ui.separator();
            render_body_table(ui, &registry, &active);

            if help.visible {
                ui.separator();
                render_shortcuts(ui);
            }
        });
}

/// Render the play/pause toggle button.
fn render_play_pause(ui: &mut egui::Ui, settings: &mut SimulationSettings) {
    let (icon, color, hint) = if settings.paused {
        (icons::PLAY, colors::PLAY_ICON, "Play (Space)")
    } else {
        (icons::PAUSE, colors::PAUSE_ICON, "Pause (Space)")
    };

    let button = egui::Button::new(egui::RichText::new(icon).size(20.0).color(color));
    if ui.add(button).on_hover_text(hint).clicked() {
        let paused = settings.toggle_pause();
        info!("Simulation {}", if paused { "paused" } else { "running" });
    }
}

fn render_scenario_picker(
    ui: &mut egui::Ui,
    active: &ActiveScenario,
    loads: &mut MessageWriter<LoadScenario>,
) {
    egui::ComboBox::from_id_salt("scenario_picker")
        .selected_text(format!("{} {}", icons::SCENARIO, active.0.name))
        .show_ui(ui, |ui| {
            for scenario in presets::all() {
                let selected = scenario.id == active.0.id;
                if ui
                    .selectable_label(selected, scenario.name)
                    .on_hover_text(scenario.description)
                    .clicked()
                    && !selected
                {
                    loads.write(LoadScenario {
                        scenario_id: scenario.id,
                    });
                }
            }
        });
}

fn render_time_controls(ui: &mut egui::Ui, settings: &mut SimulationSettings) {
    let mut multiplier = settings.time_multiplier;
    let slider = egui::Slider::new(&mut multiplier, MIN_TIME_MULTIPLIER..=MAX_TIME_MULTIPLIER)
        .logarithmic(true)
        .text("time x");
    if ui.add(slider).changed() {
        settings.set_time_multiplier(multiplier);
    }

    ui.horizontal(|ui| {
        for (i, preset) in MULTIPLIER_PRESETS.iter().enumerate() {
            let is_selected = (settings.time_multiplier - preset).abs() < 0.5;
            if ui
                .selectable_label(is_selected, format_multiplier(*preset))
                .on_hover_text(format!("Key {}", i + 1))
                .clicked()
            {
                settings.set_time_multiplier(*preset);
                info!("Time multiplier: {}x", settings.time_multiplier);
            }
        }
    });
}

fn render_body_table(ui: &mut egui::Ui, registry: &BodyRegistry, active: &ActiveScenario) {
    egui::Grid::new("body_table")
        .num_columns(4)
        .striped(true)
        .spacing([14.0, 4.0])
        .show(ui, |ui| {
            for header in ["Body", "Mass", "Position", "Speed"] {
                ui.label(egui::RichText::new(header).strong());
            }
            ui.end_row();

            for (id, body) in registry.iter() {
                let Some(spec) = active.0.spec(id) else {
                    continue;
                };
                let (icon, color) = match spec.kind {
                    BodyKind::Star => (icons::SUN, colors::STAR),
                    BodyKind::Planet => (icons::PLANET, colors::TEXT_DIM),
                };

                ui.label(egui::RichText::new(format!("{icon} {}", spec.name)).color(color))
                    .on_hover_text(spec.kind.label());
                ui.label(egui::RichText::new(format_mass(body.mass())).monospace());
                ui.label(egui::RichText::new(format_vec3(body.position)).monospace());
                ui.label(egui::RichText::new(format!("{:.4}", body.speed())).monospace());
                ui.end_row();
            }
        });

    if let Some(com) = registry.center_of_mass() {
        ui.label(
            egui::RichText::new(format!(
                "Total {}  center of mass {}",
                format_mass(registry.total_mass()),
                format_vec3(com)
            ))
            .color(colors::TEXT_DIM)
            .small(),
        );
    }
}

/// Keyboard shortcut reference.
fn render_shortcuts(ui: &mut egui::Ui) {
    let shortcuts = [
        ("Space", "Play/Pause"),
        ("[ / ]", "Halve/double time multiplier"),
        ("1-4", "Time multiplier presets"),
        ("O", "Toggle orbit trails"),
        ("G", "Toggle gravity well"),
        ("R", "Reset scenario"),
        ("RMB + mouse", "Look around"),
        ("WASD / E Q", "Fly (Shift: faster)"),
    ];

    egui::Grid::new("shortcuts_grid")
        .num_columns(2)
        .spacing([20.0, 4.0])
        .show(ui, |ui| {
            for (key, action) in shortcuts {
                ui.label(egui::RichText::new(key).strong().monospace());
                ui.label(action);
                ui.end_row();
            }
        });
}
