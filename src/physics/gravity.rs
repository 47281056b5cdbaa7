//! Gravity calculation for the body set.
//!
//! Every body attracts every other body with Newtonian gravity. There is no
//! softening: a pair at exactly zero separation is skipped, everything else
//! contributes the full `G·m/r²`.

use bevy::math::DVec3;

use crate::registry::BodyId;
use crate::types::{Body, G};

/// Compute gravitational acceleration at a point.
///
/// Sums the pull of every body in `bodies` except the one identified by
/// `skip`. Identity is by index, never by value: two bodies sharing position
/// and mass are still distinct.
///
/// A body at exactly the same position as `pos` contributes nothing.
///
/// # Arguments
/// * `pos` - Point to evaluate, in simulation length units
/// * `bodies` - The full body set
/// * `skip` - Body whose own gravity must be ignored (usually the one at `pos`)
#[inline]
pub fn acceleration_at(pos: DVec3, bodies: &[Body], skip: Option<BodyId>) -> DVec3 {
    let mut acc = DVec3::ZERO;

    for (i, other) in bodies.iter().enumerate() {
        if skip.is_some_and(|id| id.index() == i) {
            continue;
        }

        let delta = other.position - pos;
        let r_squared = delta.length_squared();

        // Coincident points: no defined direction, skip the pair.
        if r_squared == 0.0 {
            continue;
        }

        let r = r_squared.sqrt();
        // a = G·m/r² along the unit vector toward the other body
        acc += (delta / r) * (G * other.mass() / r_squared);
    }

    acc
}

/// Net acceleration on one body of the set.
///
/// Returns zero for an id outside the set.
#[inline]
pub fn compute_acceleration(target: BodyId, bodies: &[Body]) -> DVec3 {
    bodies
        .get(target.index())
        .map_or(DVec3::ZERO, |body| acceleration_at(body.position, bodies, Some(target)))
}

/// Accelerations for every body, all taken from the same state of `bodies`.
///
/// `out` is cleared and refilled so a caller can reuse its allocation
/// across ticks.
pub fn compute_accelerations_into(bodies: &[Body], out: &mut Vec<DVec3>) {
    out.clear();
    out.extend(
        bodies
            .iter()
            .enumerate()
            .map(|(i, body)| acceleration_at(body.position, bodies, Some(BodyId::from_index(i)))),
    );
}

/// Allocating form of [`compute_accelerations_into`].
pub fn compute_accelerations(bodies: &[Body]) -> Vec<DVec3> {
    let mut out = Vec::with_capacity(bodies.len());
    compute_accelerations_into(bodies, &mut out);
    out
}

/// Gravitational potential at a point, `-Σ G·m/r` (coincident bodies skipped).
pub fn potential_at(pos: DVec3, bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .filter_map(|body| {
            let r = (body.position - pos).length();
            (r > 0.0).then(|| -G * body.mass() / r)
        })
        .sum()
}

/// Total pairwise potential energy of the set, `-Σ G·mᵢ·mⱼ/rᵢⱼ` over i < j.
pub fn potential_energy(bodies: &[Body]) -> f64 {
    let mut energy = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let r = (b.position - a.position).length();
            if r > 0.0 {
                energy -= G * a.mass() * b.mass() / r;
            }
        }
    }
    energy
}

/// Kinetic plus potential energy of the whole set.
pub fn total_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum::<f64>() + potential_energy(bodies)
}
