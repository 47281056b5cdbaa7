//! Semi-implicit (symplectic) Euler integration.
//!
//! One step is a kick followed by a drift:
//!
//! ```text
//! v' = v + a·dt
//! x' = x + v'·dt
//! ```
//!
//! The drift uses the *updated* velocity. That ordering is what makes the
//! scheme symplectic and keeps orbital energy bounded instead of spiralling
//! outward the way explicit Euler does.

use bevy::math::DVec3;

use super::PhysicsError;
use crate::types::Body;

/// Check that a time step is usable (finite and non-negative).
#[inline]
pub fn validate_dt(dt: f64) -> Result<(), PhysicsError> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidTimeStep(dt))
    }
}

/// Kick-drift update of a bare position/velocity pair.
///
/// Shared by the live tick and the orbit predictor. Callers validate `dt`.
#[inline]
pub fn kick_drift(pos: &mut DVec3, vel: &mut DVec3, acc: DVec3, dt: f64) {
    *vel += acc * dt;
    *pos += *vel * dt;
}

/// Advance one body by `dt` under the given acceleration.
///
/// `dt == 0` leaves the body untouched. Negative or non-finite `dt` is
/// rejected before anything is modified.
pub fn integrate(body: &mut Body, acceleration: DVec3, dt: f64) -> Result<(), PhysicsError> {
    validate_dt(dt)?;
    kick_drift(&mut body.position, &mut body.velocity, acceleration, dt);
    Ok(())
}
