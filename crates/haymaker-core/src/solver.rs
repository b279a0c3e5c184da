use crate::config::SolverConfig;
use crate::constraints::Constraint;
use crate::forces::impact::ImpactImpulse;
use crate::particle::{Particle, ParticleSet};
use glam::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Substepped XPBD integrator over the head's particle/constraint graph.
///
/// One `step` call advances a full frame: the delta is split into
/// `config.substeps` equal sub-intervals, and each substep runs
/// forces -> predict -> one constraint sweep -> derive velocities -> damp.
/// Constraints are solved once per substep, not iterated to convergence;
/// stability comes from the substep count, which keeps the per-frame cost
/// flat on mobile frame rates.
pub struct XpbdSolver {
    pub particles: ParticleSet,
    pub config: SolverConfig,
    constraints: Vec<Constraint>,
    /// Impacts queued for the next `step` only; drained afterwards.
    pending_impacts: Vec<ImpactImpulse>,
    /// Reused buffer backing `displacements_flat`.
    displacement_scratch: Vec<Vec3>,
}

impl XpbdSolver {
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            particles: ParticleSet::new(),
            config,
            constraints: Vec::new(),
            pending_impacts: Vec::new(),
            displacement_scratch: Vec::new(),
        }
    }

    /// Register one particle; returns its index, the identifier constraints
    /// refer to. No dedup check; that is the caller's responsibility.
    pub fn add_particle(&mut self, p: Particle) -> usize {
        self.particles.push(p)
    }

    pub fn add_particles(&mut self, list: &[Particle]) {
        for &p in list {
            self.particles.push(p);
        }
    }

    /// Append a constraint. Constraints are evaluated in insertion order
    /// each substep (Gauss-Seidel: later ones see earlier corrections).
    pub fn add_constraint(&mut self, c: Constraint) {
        self.constraints.push(c);
    }

    pub fn add_constraints(&mut self, list: impl IntoIterator<Item = Constraint>) {
        self.constraints.extend(list);
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Queue an impact to be applied during the next `step` call only.
    pub fn apply_impact(&mut self, impact: ImpactImpulse) {
        self.pending_impacts.push(impact);
    }

    /// Advance the simulation by one frame.
    pub fn step(&mut self, dt: f32) {
        if dt.abs() < 1.0e-9 {
            return;
        }

        let substeps = self.config.substeps.max(1);
        let sub_dt = dt / substeps as f32;
        let count = self.particles.len();
        let damping = self.config.global_damping;

        for _substep in 0..substeps {
            // STEP 1: external forces -> update velocities
            self.apply_external_forces(sub_dt);

            // STEP 2: predict positions (explicit Euler)
            for i in 0..count {
                if self.particles.inv_mass[i] == 0.0 {
                    continue;
                }
                self.particles.prev_position[i] = self.particles.position[i];
                let v = self.particles.velocity[i];
                self.particles.position[i] += v * sub_dt;
            }

            // STEP 3: one Gauss-Seidel sweep in insertion order
            for c in self.constraints.iter_mut() {
                c.reset_lambda();
            }
            for c in self.constraints.iter_mut() {
                c.solve(&mut self.particles, sub_dt);
            }

            // STEP 4 + 5: derive velocities from the position change, then
            // damp. Velocity is derived, never integrated separately, which
            // keeps it consistent with the constraint corrections.
            for i in 0..count {
                if self.particles.inv_mass[i] == 0.0 {
                    continue;
                }
                let v = (self.particles.position[i] - self.particles.prev_position[i]) / sub_dt;
                self.particles.velocity[i] = v * damping;
            }
        }

        self.pending_impacts.clear();
    }

    /// Gravity plus the queued radial impulse kicks, velocities only.
    fn apply_external_forces(&mut self, sub_dt: f32) {
        let gravity = self.config.gravity;
        let impacts = &self.pending_impacts;
        let ParticleSet {
            position,
            velocity,
            inv_mass,
            ..
        } = &mut self.particles;

        #[cfg(feature = "parallel")]
        velocity
            .par_iter_mut()
            .zip(position.par_iter().zip(inv_mass.par_iter()))
            .for_each(|(vel, (pos, w))| {
                if *w == 0.0 {
                    return;
                }
                *vel += gravity * sub_dt;
                for imp in impacts {
                    *vel += imp.velocity_kick(*pos);
                }
            });

        #[cfg(not(feature = "parallel"))]
        for (vel, (pos, w)) in velocity
            .iter_mut()
            .zip(position.iter().zip(inv_mass.iter()))
        {
            if *w == 0.0 {
                continue;
            }
            *vel += gravity * sub_dt;
            for imp in impacts {
                *vel += imp.velocity_kick(*pos);
            }
        }
    }

    /// Clamp particles to the floor plane with restitution and friction.
    ///
    /// Callers invoke this separately from `step`: bodies with no floor
    /// concept (a floating head) simply never call it.
    pub fn enforce_floor_collision(&mut self) {
        let floor_y = self.config.floor_y;
        let restitution = self.config.floor_restitution;
        let friction = self.config.floor_friction;

        for i in 0..self.particles.len() {
            if self.particles.inv_mass[i] == 0.0 {
                continue;
            }
            if self.particles.position[i].y < floor_y {
                self.particles.position[i].y = floor_y;
                let v = &mut self.particles.velocity[i];
                v.y = -v.y * restitution;
                v.x *= friction;
                v.z *= friction;
            }
        }
    }

    /// Restore every particle to its rest position with zero velocity and
    /// drop pending impacts. Constraints are unaffected.
    pub fn reset(&mut self) {
        for i in 0..self.particles.len() {
            let rest = self.particles.rest_position[i];
            self.particles.position[i] = rest;
            self.particles.prev_position[i] = rest;
            self.particles.velocity[i] = Vec3::ZERO;
        }
        self.pending_impacts.clear();
    }

    /// Drop all particles and constraints.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.constraints.clear();
        self.pending_impacts.clear();
        self.displacement_scratch.clear();
    }

    /// Current positions as a flat buffer (x, y, z per particle, insertion
    /// order). Zero-copy view for the rendering collaborator.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.particles.position)
    }

    /// Displacements from rest (x, y, z per particle, insertion order),
    /// written into a reused scratch buffer.
    pub fn displacements_flat(&mut self) -> &[f32] {
        self.displacement_scratch.clear();
        self.displacement_scratch.extend(
            self.particles
                .position
                .iter()
                .zip(self.particles.rest_position.iter())
                .map(|(p, r)| *p - *r),
        );
        bytemuck::cast_slice(&self.displacement_scratch)
    }
}

impl Default for XpbdSolver {
    fn default() -> Self {
        Self::new()
    }
}
