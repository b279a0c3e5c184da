use crate::effects::CartoonEffects;
use crate::forces::impact::ImpactImpulse;
use crate::head::HeadShape;
use crate::impacts::ImpactManager;
use crate::solver::XpbdSolver;
use crate::zones::{HitZone, HitZoneClassifier};
use glam::Vec3;

/// Everything one opponent needs for one bout, explicitly owned.
///
/// There is no global state anywhere in this crate: collaborators hold a
/// reference to the session they were given. Lifecycle is create on scene
/// entry, `reset` on opponent change, drop on scene exit.
///
/// A session wires the four subsystems together: `punch` fans a single
/// physical hit out to the ring buffer, the effect orchestrator and the
/// solver; `frame` advances them in the order the components expect
/// (ingestion first, then decay ticks, then integration).
pub struct BoutSession {
    pub impacts: ImpactManager,
    pub effects: CartoonEffects,
    pub solver: XpbdSolver,
    classifier: HitZoneClassifier,
    /// Base magnitude of the solver-side velocity kick per punch.
    pub punch_force: f32,
    /// Radius of the solver-side kick around the contact point.
    pub punch_radius: f32,
    /// Run the floor pass after each step. Off for a floating head.
    pub floor_enabled: bool,
}

impl BoutSession {
    /// Build a session around a head lattice.
    pub fn new(shape: &HeadShape) -> Self {
        let mut solver = XpbdSolver::new();
        solver.build_head(shape);
        Self {
            impacts: ImpactManager::new(),
            effects: CartoonEffects::new(),
            solver,
            classifier: shape.classifier(),
            punch_force: 6.0,
            punch_radius: 0.5,
            floor_enabled: false,
        }
    }

    pub fn classifier(&self) -> &HitZoneClassifier {
        &self.classifier
    }

    /// Classify a local-space point without ingesting anything.
    pub fn classify(&self, point: Vec3) -> HitZone {
        self.classifier.classify(point)
    }

    /// Ingest one punch at a local-space contact point.
    ///
    /// Records the impact, routes the classified hit through the effect
    /// rules, and queues a solver impulse directed at the head center so
    /// the lattice caves in around the contact. Returns the zone so the
    /// caller can react (scoring, audio) without re-classifying.
    pub fn punch(&mut self, point: Vec3, strength: f32) -> HitZone {
        let strength = strength.clamp(0.0, 1.0);
        let zone = self.classifier.classify(point);

        self.impacts.add_impact(point, strength);
        self.effects.process_hit(zone, strength);

        let inward = -point.normalize_or_zero();
        self.solver.apply_impact(ImpactImpulse::new(
            point,
            inward * self.punch_force,
            self.punch_radius,
            strength,
        ));

        zone
    }

    /// Advance one frame. Call after any `punch` ingestion for the frame.
    pub fn frame(&mut self, dt: f32) {
        self.impacts.tick(dt);
        self.effects.tick(dt);
        self.solver.step(dt);
        if self.floor_enabled {
            self.solver.enforce_floor_collision();
        }
    }

    /// Fresh opponent: empty ring buffer (subscribers dropped), idle
    /// effects, lattice back at rest.
    pub fn reset(&mut self) {
        self.impacts.reset();
        self.effects.reset();
        self.solver.reset();
    }
}
