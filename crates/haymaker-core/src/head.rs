use crate::constraints::Constraint;
use crate::particle::Particle;
use crate::solver::XpbdSolver;
use crate::zones::HitZoneClassifier;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Proportions and lattice resolution of the opponent's deformable head.
///
/// The head is an ellipsoidal shell of particle rings tethered to an
/// anchored axial column (the "skull"): the shell wobbles, the column never
/// moves. Compliances pick the feel: soft shell edges for the jelly wobble,
/// stiff spokes so the head snaps back to shape.
#[derive(Clone, Copy, Debug)]
pub struct HeadShape {
    pub radius_x: f32,
    pub radius_y: f32,
    pub radius_z: f32,
    /// Latitudinal ring count (poles excluded).
    pub rings: usize,
    /// Particles per ring.
    pub segments: usize,
    pub shell_inv_mass: f32,
    /// Compliance of ring and meridian edges.
    pub shell_compliance: f32,
    /// Compliance of shell-to-column spokes.
    pub spoke_compliance: f32,
}

impl Default for HeadShape {
    fn default() -> Self {
        Self {
            radius_x: 0.8,
            radius_y: 1.0,
            radius_z: 0.85,
            rings: 6,
            segments: 12,
            shell_inv_mass: 1.0,
            shell_compliance: 0.01,
            spoke_compliance: 0.001,
        }
    }
}

impl HeadShape {
    /// Zone thresholds matched to these proportions, so the classifier's
    /// labels line up with the lattice the player actually sees.
    pub fn classifier(&self) -> HitZoneClassifier {
        let unit = HitZoneClassifier::default();
        HitZoneClassifier {
            upper_y: unit.upper_y * self.radius_y,
            lower_y: unit.lower_y * self.radius_y,
            forehead_half_width: unit.forehead_half_width * self.radius_x,
            front_z: unit.front_z * self.radius_z,
            nose_half_width: unit.nose_half_width * self.radius_x,
            ear_min_abs_x: unit.ear_min_abs_x * self.radius_x,
        }
    }

}

/// Latitude angle of ring `k` out of `rings`, poles excluded.
fn ring_theta(k: usize, rings: usize) -> f32 {
    PI * (k + 1) as f32 / (rings + 1) as f32
}

impl XpbdSolver {
    /// Populate the solver with the head lattice described by `shape`.
    ///
    /// Local space: Y up, Z toward the player, origin at the head center.
    /// May be called on a non-empty solver; new indices start past the
    /// existing particles.
    pub fn build_head(&mut self, shape: &HeadShape) {
        let rings = shape.rings.max(2);
        let segments = shape.segments.max(3);

        // Anchored axial column, one fixed node per ring height.
        let mut anchors = Vec::with_capacity(rings);
        for k in 0..rings {
            let y = shape.radius_y * ring_theta(k, rings).cos();
            anchors.push(self.add_particle(Particle::fixed(Vec3::new(0.0, y, 0.0))) as u32);
        }

        // Shell rings around the Y axis. phi = PI/2 faces the player (+Z).
        let shell_start = self.particle_count();
        for k in 0..rings {
            let theta = ring_theta(k, rings);
            let y = shape.radius_y * theta.cos();
            let sin_t = theta.sin();
            for m in 0..segments {
                let phi = TAU * m as f32 / segments as f32;
                let pos = Vec3::new(
                    shape.radius_x * sin_t * phi.cos(),
                    y,
                    shape.radius_z * sin_t * phi.sin(),
                );
                self.add_particle(Particle::new(pos, shape.shell_inv_mass));
            }
        }

        let shell = |k: usize, m: usize| (shell_start + k * segments + (m % segments)) as u32;
        let rest = |a: u32, b: u32| {
            (self.particles.rest_position[a as usize] - self.particles.rest_position[b as usize])
                .length()
        };

        let mut constraints = Vec::new();
        for k in 0..rings {
            for m in 0..segments {
                let a = shell(k, m);

                // Ring edge to the next segment (wrapping).
                let b = shell(k, m + 1);
                constraints.push(Constraint::distance(a, b, rest(a, b), shape.shell_compliance));

                // Meridian edge down to the next ring.
                if k + 1 < rings {
                    let c = shell(k + 1, m);
                    constraints.push(Constraint::distance(
                        a,
                        c,
                        rest(a, c),
                        shape.shell_compliance,
                    ));
                }

                // Spoke to the ring's anchor.
                let anchor = anchors[k];
                constraints.push(Constraint::distance(
                    a,
                    anchor,
                    rest(a, anchor),
                    shape.spoke_compliance,
                ));
            }
        }
        self.add_constraints(constraints);
    }
}

/// Particle count `build_head` produces for a given shape.
pub fn head_particle_count(shape: &HeadShape) -> usize {
    let rings = shape.rings.max(2);
    let segments = shape.segments.max(3);
    rings + rings * segments
}

/// Constraint count `build_head` produces for a given shape.
pub fn head_constraint_count(shape: &HeadShape) -> usize {
    let rings = shape.rings.max(2);
    let segments = shape.segments.max(3);
    // ring edges + meridians + spokes
    rings * segments + (rings - 1) * segments + rings * segments
}
