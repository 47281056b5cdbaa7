//! Preset scenario definitions.
//!
//! Three systems sharing one unit scale: a 2.5e10 star, planets a few
//! thousand units out, periods of a few simulated days.

use bevy::color::Color;
use bevy::math::DVec3;

use super::{BodySpec, Scenario};
use crate::types::{BodyKind, DEFAULT_TIME_MULTIPLIER, G};

/// Mass of the central star in the single-star presets.
pub const STAR_MASS: f64 = 2.5e10;

/// Tick length shared by the presets (simulation seconds).
///
/// Ten seconds keeps the innermost orbit above ten thousand ticks per
/// revolution.
pub const PRESET_FIXED_STEP: f64 = 10.0;

/// Identifiers of every preset, in menu order.
pub const SCENARIO_IDS: [&str; 3] = ["solar_system", "star_and_planet", "binary_star"];

/// Look up a preset by id.
pub fn find(id: &str) -> Option<Scenario> {
    match id {
        "solar_system" => Some(solar_system()),
        "star_and_planet" => Some(star_and_planet()),
        "binary_star" => Some(binary_star()),
        _ => None,
    }
}

/// All presets, in menu order.
pub fn all() -> Vec<Scenario> {
    SCENARIO_IDS.iter().filter_map(|id| find(id)).collect()
}

/// Speed of a circular orbit of radius `r` around `central_mass`.
pub fn circular_speed(central_mass: f64, r: f64) -> f64 {
    (G * central_mass / r).sqrt()
}

fn sun(mass: f64, position: DVec3, velocity: DVec3, name: &'static str) -> BodySpec {
    BodySpec {
        name,
        kind: BodyKind::Star,
        position,
        velocity,
        mass,
        radius: 120.0,
        color: Color::srgb(1.0, 0.85, 0.4),
    }
}

/// Planet on a circular orbit around a star at the origin.
///
/// Starts on -x and moves along +z, with the orbit plane tilted about the x
/// axis by `inclination_deg`.
fn circular_planet(
    name: &'static str,
    central_mass: f64,
    r: f64,
    inclination_deg: f64,
    mass: f64,
    radius: f64,
    color: Color,
) -> BodySpec {
    let v = circular_speed(central_mass, r);
    let tilt = inclination_deg.to_radians();

    BodySpec {
        name,
        kind: BodyKind::Planet,
        position: DVec3::new(-r, 0.0, 0.0),
        velocity: DVec3::new(0.0, v * tilt.sin(), v * tilt.cos()),
        mass,
        radius,
        color,
    }
}

/// One star and one planet: the reference two-body system.
pub fn star_and_planet() -> Scenario {
    Scenario {
        id: "star_and_planet",
        name: "Star and Planet",
        description: "A single planet on a slightly eccentric orbit.",
        bodies: vec![
            sun(STAR_MASS, DVec3::ZERO, DVec3::ZERO, "Star"),
            BodySpec {
                name: "Planet",
                kind: BodyKind::Planet,
                position: DVec3::new(-2000.0, 0.0, 0.0),
                velocity: DVec3::new(0.0, 0.0, 0.03),
                mass: 5000.0,
                radius: 40.0,
                color: Color::srgb(0.3, 0.5, 1.0),
            },
        ],
        fixed_step: PRESET_FIXED_STEP,
        time_multiplier: DEFAULT_TIME_MULTIPLIER,
    }
}

/// A star with four planets, the outer one inclined.
pub fn solar_system() -> Scenario {
    Scenario {
        id: "solar_system",
        name: "Solar System",
        description: "Four planets on near-circular orbits around one star.",
        bodies: vec![
            sun(STAR_MASS, DVec3::ZERO, DVec3::ZERO, "Sun"),
            circular_planet(
                "Ember",
                STAR_MASS,
                800.0,
                0.0,
                2000.0,
                25.0,
                Color::srgb(0.8, 0.45, 0.3),
            ),
            circular_planet(
                "Azure",
                STAR_MASS,
                1400.0,
                0.0,
                6000.0,
                45.0,
                Color::srgb(0.3, 0.5, 1.0),
            ),
            circular_planet(
                "Verdant",
                STAR_MASS,
                2000.0,
                0.0,
                5000.0,
                40.0,
                Color::srgb(0.35, 0.8, 0.45),
            ),
            circular_planet(
                "Drift",
                STAR_MASS,
                3200.0,
                12.0,
                8000.0,
                55.0,
                Color::srgb(0.75, 0.7, 0.9),
            ),
        ],
        fixed_step: PRESET_FIXED_STEP,
        time_multiplier: DEFAULT_TIME_MULTIPLIER,
    }
}

/// Two equal stars around their barycenter plus a circumbinary planet.
pub fn binary_star() -> Scenario {
    const STAR: f64 = 1.2e10;
    const HALF_SEPARATION: f64 = 300.0;

    // Each star feels G·m/(2d)² and moves on a circle of radius d:
    // v² / d = G·m / (4d²)
    let v_star = (G * STAR / (4.0 * HALF_SEPARATION)).sqrt();

    Scenario {
        id: "binary_star",
        name: "Binary Star",
        description: "Two stars orbiting each other with a distant planet.",
        bodies: vec![
            sun(
                STAR,
                DVec3::new(-HALF_SEPARATION, 0.0, 0.0),
                DVec3::new(0.0, 0.0, v_star),
                "Alpha",
            ),
            BodySpec {
                color: Color::srgb(1.0, 0.6, 0.35),
                ..sun(
                    STAR,
                    DVec3::new(HALF_SEPARATION, 0.0, 0.0),
                    DVec3::new(0.0, 0.0, -v_star),
                    "Beta",
                )
            },
            circular_planet(
                "Wanderer",
                2.0 * STAR,
                2600.0,
                0.0,
                5000.0,
                40.0,
                Color::srgb(0.4, 0.75, 0.95),
            ),
        ],
        fixed_step: PRESET_FIXED_STEP,
        time_multiplier: DEFAULT_TIME_MULTIPLIER,
    }
}
