//! Gravwell - Interactive N-body Gravity Simulator
//!
//! A desktop application simulating a small star system under mutual
//! Newtonian gravity, with orbit trails and a gravity well grid.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use gravwell::SimulationPlugins;
use gravwell::camera::CameraPlugin;
use gravwell::input::InputPlugin;
use gravwell::render::RenderPlugin;
use gravwell::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Gravwell".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Simulation core first: the other plugins read its resources
        .add_plugins(SimulationPlugins)
        .add_plugins((CameraPlugin, InputPlugin, RenderPlugin, UiPlugin))
        .run();
}
