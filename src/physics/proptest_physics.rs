//! Property-based tests for the physics core using proptest.
//!
//! These tests verify gravity, integration and scheduling invariants across a
//! wide range of body configurations.

use bevy::math::DVec3;
use proptest::prelude::*;

use super::{acceleration_at, compute_accelerations, integrate, kick_drift};
use crate::prediction::{PredictionSettings, predict_orbit};
use crate::registry::{BodyId, BodyRegistry};
use crate::test_utils::{STAR_MASS, assertions, fixtures};
use crate::time::{SchedulerConfig, StepScheduler};
use crate::types::{Body, G};

fn vec3(range: f64) -> impl Strategy<Value = DVec3> {
    (-range..range, -range..range, -range..range).prop_map(|(x, y, z)| DVec3::new(x, y, z))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The pull on a body points at the other body with magnitude G·m/r².
    #[test]
    fn prop_two_body_attraction(
        p1 in vec3(1.0e4),
        p2 in vec3(1.0e4),
        m1 in 1.0f64..1.0e12,
        m2 in 1.0f64..1.0e12,
    ) {
        let delta = p2 - p1;
        prop_assume!(delta.length_squared() > 1.0e-6);

        let bodies = [
            Body::new(p1, DVec3::ZERO, m1).unwrap(),
            Body::new(p2, DVec3::ZERO, m2).unwrap(),
        ];
        let acc = compute_accelerations(&bodies);

        let expected = G * m2 / delta.length_squared();
        let relative_error = ((acc[0].length() - expected) / expected).abs();
        prop_assert!(relative_error < 1e-9, "magnitude off by {relative_error:e}");

        let alignment = acc[0].normalize().dot(delta.normalize());
        prop_assert!(alignment > 1.0 - 1e-9, "not pointing toward the other body: {alignment}");

        // Opposite direction on the other body
        prop_assert!(acc[1].dot(delta) < 0.0);
    }

    /// Any number of coincident bodies still yields finite accelerations.
    #[test]
    fn prop_coincident_bodies_finite(
        pos in vec3(1.0e6),
        count in 2usize..6,
        mass in 1.0f64..1.0e14,
    ) {
        let bodies: Vec<Body> = (0..count)
            .map(|_| Body::new(pos, DVec3::ZERO, mass).unwrap())
            .collect();

        for acc in compute_accelerations(&bodies) {
            prop_assert!(acc.is_finite());
            prop_assert_eq!(acc, DVec3::ZERO);
        }
    }

    /// Without force the integrator is an exact drift.
    #[test]
    fn prop_zero_force_exact_drift(
        pos in vec3(1.0e6),
        vel in vec3(1.0e3),
        dt in 0.0f64..1.0e3,
    ) {
        let mut body = Body::new(pos, vel, 1.0).unwrap();
        integrate(&mut body, DVec3::ZERO, dt).unwrap();

        prop_assert_eq!(body.velocity, vel);
        prop_assert_eq!(body.position, pos + vel * dt);
    }

    /// A central force leaves r × v unchanged under semi-implicit Euler.
    #[test]
    fn prop_central_force_conserves_angular_momentum(
        radius in 1000.0f64..3000.0,
        speed_factor in 0.8f64..1.2,
    ) {
        let star = fixtures::star();
        let mut planet = fixtures::circular_orbit(radius, STAR_MASS);
        planet.velocity *= speed_factor;
        let stars = [star];

        let initial_h = assertions::specific_angular_momentum(&planet, &star);
        let dt = assertions::orbital_period(radius, STAR_MASS) / 2000.0;

        for _ in 0..2000 {
            let acc = acceleration_at(planet.position, &stars, None);
            kick_drift(&mut planet.position, &mut planet.velocity, acc, dt);
        }

        let final_h = assertions::specific_angular_momentum(&planet, &star);
        let drift = (final_h - initial_h).length() / initial_h.length();
        prop_assert!(drift < 1e-9, "angular momentum drift {drift:e}");
    }

    /// Circular orbits keep their energy over one period.
    #[test]
    fn prop_circular_orbit_energy_bounded(radius in 1000.0f64..3000.0) {
        let star = fixtures::star();
        let mut planet = fixtures::circular_orbit(radius, STAR_MASS);
        let stars = [star];

        let initial = assertions::specific_orbital_energy(&planet, &star);
        let dt = assertions::orbital_period(radius, STAR_MASS) / 2000.0;

        for _ in 0..2000 {
            let acc = acceleration_at(planet.position, &stars, None);
            integrate(&mut planet, acc, dt).unwrap();
        }

        let last = assertions::specific_orbital_energy(&planet, &star);
        let drift = ((last - initial) / initial).abs();
        prop_assert!(drift < 0.01, "energy drift {:.4}%", drift * 100.0);
    }

    /// The accumulator stays in [0, step) and ticks match the total input.
    #[test]
    fn prop_scheduler_invariant(
        frames in prop::collection::vec((0u32..16, 0u32..4), 1..200),
    ) {
        // Power-of-two step and sixty-fourths keep the sums exact
        let step = 0.25;
        let config = SchedulerConfig::default().with_fixed_step(step);
        let mut sched = StepScheduler::new(config).unwrap();
        let mut total_input = 0.0;
        let mut ticks = 0u64;

        for (sixty_fourths, scale_pow) in frames {
            let frame_dt = f64::from(sixty_fourths) / 64.0;
            let scale = f64::from(1u32 << scale_pow);
            total_input += frame_dt * scale;

            let report = sched.plan(frame_dt, scale);
            ticks += u64::from(report.ticks);

            prop_assert!(sched.accumulator() >= 0.0);
            prop_assert!(sched.accumulator() < step);
            prop_assert_eq!(report.dropped_time, 0.0);
        }

        prop_assert_eq!(ticks, (total_input / step).floor() as u64);
    }

    /// Predicting an orbit never touches live state.
    #[test]
    fn prop_prediction_is_pure(
        positions in prop::collection::vec(vec3(5.0e3), 2..6),
        velocities in prop::collection::vec(vec3(0.1), 6),
        target in 0usize..6,
    ) {
        let registry: BodyRegistry = positions
            .iter()
            .zip(&velocities)
            .map(|(p, v)| Body::new(*p, *v, STAR_MASS).unwrap())
            .collect();
        let target = BodyId::from_index(target % registry.len());
        let before = registry.clone();

        let settings = PredictionSettings { steps: 50, ..Default::default() };
        let samples = predict_orbit(&registry, target, &settings).unwrap();

        prop_assert!(samples.len() <= 50);
        prop_assert!(samples.iter().all(|p| p.is_finite()));
        prop_assert_eq!(registry.bodies(), before.bodies());
    }
}
