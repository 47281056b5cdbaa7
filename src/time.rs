//! Fixed-step scheduling of simulation time.
//!
//! Real frame time varies from frame to frame; the physics step must not.
//! Each frame the real delta is scaled by the time multiplier and added to
//! an accumulator, which is then drained in whole fixed steps. Whatever is
//! left over (always less than one step) carries into the next frame.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::physics::{self, PhysicsError};
use crate::registry::BodyRegistry;
use crate::types::SimulationSettings;

/// Default simulation seconds per tick.
///
/// Sized for [`DEFAULT_TIME_MULTIPLIER`](crate::types::DEFAULT_TIME_MULTIPLIER):
/// about 17 ticks per 60 fps frame, far below the tick cap.
pub const DEFAULT_FIXED_STEP: f64 = 10.0;

/// Default limit on ticks run in a single frame.
pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 1000;

/// Default clamp on one frame's real delta (seconds).
///
/// A window drag or a debugger pause otherwise arrives as one huge delta.
pub const DEFAULT_MAX_FRAME_DELTA: f64 = 0.25;

/// Scheduler tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// Simulation seconds advanced by one tick. Must be finite and > 0.
    pub fixed_step: f64,
    /// Most ticks run per frame before backlog is discarded.
    pub max_ticks_per_frame: u32,
    /// Largest real frame delta accepted, in seconds.
    pub max_frame_delta: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            fixed_step: DEFAULT_FIXED_STEP,
            max_ticks_per_frame: DEFAULT_MAX_TICKS_PER_FRAME,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
        }
    }
}

impl SchedulerConfig {
    /// Same config with a different tick length.
    pub fn with_fixed_step(self, fixed_step: f64) -> Self {
        Self { fixed_step, ..self }
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.fixed_step.is_finite() && self.fixed_step > 0.0 {
            Ok(())
        } else {
            Err(PhysicsError::InvalidFixedStep(self.fixed_step))
        }
    }
}

/// Outcome of one scheduling pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Ticks run this frame.
    pub ticks: u32,
    /// Scaled time thrown away because the tick cap was hit.
    pub dropped_time: f64,
}

/// Resource turning frame time into fixed physics ticks.
///
/// Invariant: `0 <= accumulator < fixed_step` after every pass.
#[derive(Resource, Clone, Debug)]
pub struct StepScheduler {
    config: SchedulerConfig,
    accumulator: f64,
    elapsed: f64,
    total_ticks: u64,
    /// Per-tick acceleration buffer, kept to avoid reallocating each tick
    scratch: Vec<DVec3>,
}

impl Default for StepScheduler {
    fn default() -> Self {
        Self {
            config: SchedulerConfig::default(),
            accumulator: 0.0,
            elapsed: 0.0,
            total_ticks: 0,
            scratch: Vec::new(),
        }
    }
}

impl StepScheduler {
    /// Create a scheduler, rejecting a non-positive or non-finite step.
    pub fn new(config: SchedulerConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Swap in a new config. The clock is reset so the invariant holds for
    /// the new step.
    pub fn set_config(&mut self, config: SchedulerConfig) -> Result<(), PhysicsError> {
        config.validate()?;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Scaled time not yet consumed by a tick.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Total simulation time advanced by ticks since the last reset.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Zero the clock (accumulator, elapsed time and tick count).
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.elapsed = 0.0;
        self.total_ticks = 0;
    }

    /// Add one frame's worth of time and decide how many ticks to run.
    ///
    /// Does not touch any body; [`advance`](Self::advance) runs the ticks.
    ///
    /// # Arguments
    /// * `frame_dt` - Real seconds since the previous frame
    /// * `time_scale` - Simulation seconds per real second (0 while paused)
    pub fn plan(&mut self, frame_dt: f64, time_scale: f64) -> FrameReport {
        let real = sanitize_frame_delta(frame_dt, self.config.max_frame_delta);
        let scale = if time_scale.is_finite() && time_scale > 0.0 {
            time_scale
        } else {
            0.0
        };
        self.accumulator += real * scale;

        let step = self.config.fixed_step;
        let cap = self.config.max_ticks_per_frame;
        let mut report = FrameReport::default();

        while self.accumulator >= step && report.ticks < cap {
            self.accumulator -= step;
            report.ticks += 1;
        }

        // Cap hit: keep only the sub-step remainder
        if self.accumulator >= step {
            let kept = self.accumulator.rem_euclid(step);
            report.dropped_time = self.accumulator - kept;
            self.accumulator = kept;
        }

        report
    }

    /// Run one frame: accumulate scaled time, then tick the registry.
    pub fn advance(
        &mut self,
        frame_dt: f64,
        settings: &SimulationSettings,
        registry: &mut BodyRegistry,
    ) -> Result<FrameReport, PhysicsError> {
        let report = self.plan(frame_dt, settings.effective_time_scale());
        let step = self.config.fixed_step;

        for _ in 0..report.ticks {
            physics::tick(registry, step, &mut self.scratch)?;
            self.elapsed += step;
            self.total_ticks += 1;
        }

        Ok(report)
    }
}

/// Map a raw frame delta to the amount of real time that may be simulated.
///
/// Negative and non-finite deltas count as zero; large deltas are clamped
/// to `max_frame_delta`.
pub fn sanitize_frame_delta(frame_dt: f64, max_frame_delta: f64) -> f64 {
    if !frame_dt.is_finite() || frame_dt <= 0.0 {
        return 0.0;
    }
    if frame_dt > max_frame_delta {
        max_frame_delta.max(0.0)
    } else {
        frame_dt
    }
}
