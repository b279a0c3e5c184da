pub mod distance;

use crate::particle::ParticleSet;
use distance::DistanceConstraint;

/// A constraint of the particle graph.
///
/// Only distance constraints exist today; the enum leaves room for volume
/// preservation without touching the solver's storage or call sites.
#[derive(Clone, Debug)]
pub enum Constraint {
    Distance(DistanceConstraint),
}

impl Constraint {
    /// Distance constraint between particles `i` and `j`.
    pub fn distance(i: u32, j: u32, rest_length: f32, compliance: f32) -> Self {
        Self::Distance(DistanceConstraint::new(i, j, rest_length, compliance))
    }

    pub(crate) fn reset_lambda(&mut self) {
        match self {
            Self::Distance(c) => c.lambda = 0.0,
        }
    }

    /// Solve this constraint in place (one Gauss-Seidel visit).
    pub(crate) fn solve(&mut self, particles: &mut ParticleSet, dt: f32) {
        match self {
            Self::Distance(c) => c.solve(particles, dt),
        }
    }
}
