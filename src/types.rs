//! Core physics types and constants for the gravity simulator.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::physics::PhysicsError;

/// System set for ordering the per-frame simulation pipeline.
///
/// Physics must finish its ticks before trails are predicted from the new
/// state, and both must finish before transforms are synced for drawing.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Step scheduler and physics ticks
    Physics,
    /// Orbit trail regeneration
    Prediction,
    /// Copy body state into render transforms
    Sync,
}

/// Gravitational constant in simulation units.
///
/// Scenarios pick their own mass/length/time scale; only the mutual
/// consistency of those units matters, not their SI meaning.
pub const G: f64 = 6.67e-11;

/// Default time multiplier (simulation seconds per real second).
pub const DEFAULT_TIME_MULTIPLIER: f64 = 10_000.0;

/// Lowest multiplier reachable from the controls.
pub const MIN_TIME_MULTIPLIER: f64 = 1.0;

/// Highest multiplier reachable from the controls.
pub const MAX_TIME_MULTIPLIER: f64 = 1.0e6;

/// A massive point body.
///
/// Mass is private so the "strictly positive" invariant can only be
/// established through [`Body::new`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Position in simulation length units
    pub position: DVec3,
    /// Velocity in length units per second
    pub velocity: DVec3,
    mass: f64,
}

impl Body {
    /// Create a body, rejecting non-positive mass and non-finite state.
    pub fn new(position: DVec3, velocity: DVec3, mass: f64) -> Result<Self, PhysicsError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidMass(mass));
        }
        if !position.is_finite() || !velocity.is_finite() {
            return Err(PhysicsError::NonFiniteState);
        }

        Ok(Self {
            position,
            velocity,
            mass,
        })
    }

    /// Mass in simulation mass units (always > 0).
    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Magnitude of the velocity.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Whether position and velocity are both free of NaN/Inf.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Kinetic energy, m·v²/2.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Momentum vector, m·v.
    pub fn momentum(&self) -> DVec3 {
        self.velocity * self.mass
    }
}

/// Visual classification of a body.
///
/// Only rendering and UI look at this; gravity treats every body alike.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BodyKind {
    #[default]
    Planet,
    Star,
}

impl BodyKind {
    pub fn label(&self) -> &'static str {
        match self {
            BodyKind::Planet => "Planet",
            BodyKind::Star => "Star",
        }
    }
}

/// User-facing simulation toggles, shared by input, UI, physics and rendering.
#[derive(Resource, Clone, Debug)]
pub struct SimulationSettings {
    /// Freeze simulation time while rendering continues.
    pub paused: bool,
    /// Simulation seconds per real second.
    pub time_multiplier: f64,
    /// Run the orbit predictor and draw trails.
    pub show_orbit: bool,
    /// Draw the gravity well grid.
    pub show_gravity_well: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            paused: false,
            time_multiplier: DEFAULT_TIME_MULTIPLIER,
            show_orbit: true,
            show_gravity_well: true,
        }
    }
}

impl SimulationSettings {
    /// Flip the pause flag, returning the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Set the multiplier, clamped to the supported range. NaN is ignored.
    pub fn set_time_multiplier(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.time_multiplier = value.clamp(MIN_TIME_MULTIPLIER, MAX_TIME_MULTIPLIER);
    }

    /// Multiply the current multiplier by `factor`, staying in range.
    pub fn scale_time_multiplier(&mut self, factor: f64) {
        self.set_time_multiplier(self.time_multiplier * factor);
    }

    /// Factor applied to real frame time before accumulation.
    ///
    /// Zero while paused. A corrupted multiplier (negative or non-finite)
    /// also yields zero so it can never reach the integrator.
    pub fn effective_time_scale(&self) -> f64 {
        if self.paused || !self.time_multiplier.is_finite() || self.time_multiplier < 0.0 {
            0.0
        } else {
            self.time_multiplier
        }
    }
}
