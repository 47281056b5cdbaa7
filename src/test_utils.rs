//! Test utilities for gravity simulation tests.
//!
//! Provides fixtures for common body configurations and assertions for
//! verifying physical invariants like energy and angular momentum
//! conservation.

use bevy::math::DVec3;

use crate::registry::BodyRegistry;
use crate::types::{Body, G};

/// Star mass used across tests (simulation units).
pub const STAR_MASS: f64 = 2.5e10;

/// Planet mass used across tests.
pub const PLANET_MASS: f64 = 5000.0;

/// Fixtures for creating test bodies.
pub mod fixtures {
    use super::*;

    /// A star at rest at the origin.
    pub fn star() -> Body {
        Body::new(DVec3::ZERO, DVec3::ZERO, STAR_MASS).unwrap()
    }

    /// The reference system: star at the origin, planet at (-2000, 0, 0)
    /// moving at 0.03 along +z.
    ///
    /// Returns `(star, planet)`.
    pub fn star_and_planet() -> (Body, Body) {
        let planet = Body::new(
            DVec3::new(-2000.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 0.03),
            PLANET_MASS,
        )
        .unwrap();
        (star(), planet)
    }

    /// [`star_and_planet`] as a registry: star is id 0, planet is id 1.
    pub fn star_and_planet_registry() -> BodyRegistry {
        let (star, planet) = star_and_planet();
        [star, planet].into_iter().collect()
    }

    /// A planet on a circular orbit of radius `r` around a star of `star_mass`
    /// at the origin.
    ///
    /// The planet sits on +x and moves along +z.
    pub fn circular_orbit(r: f64, star_mass: f64) -> Body {
        // v = sqrt(GM/r)
        let v = (G * star_mass / r).sqrt();
        Body::new(DVec3::new(r, 0.0, 0.0), DVec3::new(0.0, 0.0, v), PLANET_MASS).unwrap()
    }

    /// A planet at periapsis of an ellipse with the given eccentricity.
    pub fn elliptical_orbit(periapsis: f64, eccentricity: f64, star_mass: f64) -> Body {
        assert!(
            (0.0..1.0).contains(&eccentricity),
            "Eccentricity must be in [0, 1) for elliptical orbit"
        );

        // a = r_p / (1 - e), then vis-viva at periapsis
        let a = periapsis / (1.0 - eccentricity);
        let v = (G * star_mass * (2.0 / periapsis - 1.0 / a)).sqrt();

        Body::new(
            DVec3::new(periapsis, 0.0, 0.0),
            DVec3::new(0.0, 0.0, v),
            PLANET_MASS,
        )
        .unwrap()
    }

    /// A planet moving at 1.1x escape speed.
    pub fn escape_trajectory(r: f64, star_mass: f64) -> Body {
        let v = (2.0 * G * star_mass / r).sqrt() * 1.1;
        Body::new(DVec3::new(r, 0.0, 0.0), DVec3::new(0.0, 0.0, v), PLANET_MASS).unwrap()
    }
}

/// Assertions for verifying physical invariants.
pub mod assertions {
    use super::*;

    /// Specific orbital energy of `body` relative to `primary`.
    ///
    /// E = v²/2 - G·M/r, with v and r measured relative to the primary.
    pub fn specific_orbital_energy(body: &Body, primary: &Body) -> f64 {
        let r = (body.position - primary.position).length();
        let v = (body.velocity - primary.velocity).length();
        0.5 * v * v - G * primary.mass() / r
    }

    /// Specific angular momentum of `body` about `primary`, h = r × v.
    pub fn specific_angular_momentum(body: &Body, primary: &Body) -> DVec3 {
        let r = body.position - primary.position;
        let v = body.velocity - primary.velocity;
        r.cross(v)
    }

    /// Total angular momentum of a body set about the origin.
    pub fn total_angular_momentum(bodies: &[Body]) -> DVec3 {
        bodies
            .iter()
            .map(|b| b.position.cross(b.velocity) * b.mass())
            .sum()
    }

    /// Assert that energy is conserved within tolerance.
    ///
    /// # Panics
    /// Panics if relative energy drift exceeds tolerance.
    pub fn assert_energy_conserved(initial_energy: f64, final_energy: f64, tolerance: f64) {
        let drift = relative_drift(initial_energy, final_energy);
        assert!(
            drift <= tolerance,
            "Energy not conserved: initial={initial_energy:.6e}, final={final_energy:.6e}, drift={drift:.6e}, tolerance={tolerance:.6e}"
        );
    }

    /// Assert that an angular momentum vector is conserved within tolerance.
    ///
    /// # Panics
    /// Panics if the relative length of the difference exceeds tolerance.
    pub fn assert_angular_momentum_conserved(initial_l: DVec3, final_l: DVec3, tolerance: f64) {
        let scale = initial_l.length();
        let drift = if scale > 1e-10 {
            (final_l - initial_l).length() / scale
        } else {
            (final_l - initial_l).length()
        };
        assert!(
            drift <= tolerance,
            "Angular momentum not conserved: initial={initial_l:?}, final={final_l:?}, drift={drift:.6e}, tolerance={tolerance:.6e}"
        );
    }

    /// Assert that every body has a finite position and velocity.
    pub fn assert_all_finite(bodies: &[Body]) {
        for (i, body) in bodies.iter().enumerate() {
            assert!(body.is_finite(), "Body {i} became non-finite: {body:?}");
        }
    }

    /// Orbital period from Kepler's third law: T = 2π·sqrt(a³/GM).
    pub fn orbital_period(semi_major_axis: f64, primary_mass: f64) -> f64 {
        use std::f64::consts::TAU;
        TAU * (semi_major_axis.powi(3) / (G * primary_mass)).sqrt()
    }

    /// Semi-major axis from specific energy, `None` for unbound orbits.
    pub fn semi_major_axis_from_energy(energy: f64, primary_mass: f64) -> Option<f64> {
        if energy >= 0.0 {
            None
        } else {
            Some(-G * primary_mass / (2.0 * energy))
        }
    }

    pub fn is_bound(body: &Body, primary: &Body) -> bool {
        specific_orbital_energy(body, primary) < 0.0
    }

    fn relative_drift(initial: f64, last: f64) -> f64 {
        if initial.abs() > 1e-10 {
            ((last - initial) / initial).abs()
        } else {
            (last - initial).abs()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circular_orbit_has_correct_velocity() {
        let body = fixtures::circular_orbit(1500.0, STAR_MASS);
        let expected_v = (G * STAR_MASS / 1500.0).sqrt();
        assert_relative_eq!(body.speed(), expected_v, max_relative = 1e-12);
    }

    #[test]
    fn test_reference_planet_is_bound() {
        let (star, planet) = fixtures::star_and_planet();
        assert!(assertions::is_bound(&planet, &star));
    }

    #[test]
    fn test_escape_trajectory_is_unbound() {
        let star = fixtures::star();
        let body = fixtures::escape_trajectory(1000.0, STAR_MASS);
        assert!(!assertions::is_bound(&body, &star));
    }

    #[test]
    fn test_elliptical_orbit_semi_major_axis() {
        let star = fixtures::star();
        let body = fixtures::elliptical_orbit(1000.0, 0.5, STAR_MASS);
        let energy = assertions::specific_orbital_energy(&body, &star);
        let a = assertions::semi_major_axis_from_energy(energy, STAR_MASS).unwrap();
        assert_relative_eq!(a, 2000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_angular_momentum_perpendicular_to_plane() {
        let star = fixtures::star();
        let body = fixtures::circular_orbit(1000.0, STAR_MASS);
        let h = assertions::specific_angular_momentum(&body, &star);
        // r along +x, v along +z: h = x × z = -y
        assert_eq!(h.x, 0.0);
        assert_eq!(h.z, 0.0);
        assert_relative_eq!(h.y, -1000.0 * body.speed(), max_relative = 1e-12);
    }
}
