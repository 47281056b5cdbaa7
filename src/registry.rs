//! Body registry: the single owner of every simulated body.
//!
//! Bodies are stored densely and addressed by [`BodyId`]. The set is fixed
//! for the lifetime of a run, so ids stay valid until the registry is
//! replaced wholesale by a scenario reset.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::types::Body;

/// Stable identity of a body inside its registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

impl BodyId {
    /// Id for the body at slice position `index`.
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Position of the body in [`BodyRegistry::bodies`].
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Resource holding all bodies of the running simulation.
#[derive(Resource, Clone, Debug, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body and return its id. Only used while setting up a scenario.
    pub fn insert(&mut self, body: Body) -> BodyId {
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// Read-only view of the whole body set, in id order.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable view for the physics tick. Length cannot change through it.
    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> + use<> {
        (0..self.bodies.len()).map(BodyId)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Sum of all masses.
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    /// Mass-weighted mean position.
    pub fn center_of_mass(&self) -> Option<DVec3> {
        let total = self.total_mass();
        if self.bodies.is_empty() || total <= 0.0 {
            return None;
        }
        let weighted = self
            .bodies
            .iter()
            .fold(DVec3::ZERO, |acc, b| acc + b.position * b.mass());
        Some(weighted / total)
    }

    /// Total linear momentum of the system.
    pub fn total_momentum(&self) -> DVec3 {
        self.bodies.iter().map(Body::momentum).sum()
    }
}

impl FromIterator<Body> for BodyRegistry {
    fn from_iter<I: IntoIterator<Item = Body>>(iter: I) -> Self {
        Self {
            bodies: iter.into_iter().collect(),
        }
    }
}
