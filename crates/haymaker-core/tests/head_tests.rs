use glam::Vec3;
use haymaker_core::effects::EffectKind;
use haymaker_core::head::{head_constraint_count, head_particle_count, HeadShape};
use haymaker_core::session::BoutSession;
use haymaker_core::solver::XpbdSolver;
use haymaker_core::zones::HitZone;

#[test]
fn test_head_lattice_counts() {
    let shape = HeadShape::default();
    let mut solver = XpbdSolver::new();
    solver.build_head(&shape);

    assert_eq!(solver.particle_count(), head_particle_count(&shape));
    assert_eq!(solver.constraint_count(), head_constraint_count(&shape));

    // Default lattice: 6 anchor nodes + 6 rings of 12.
    assert_eq!(solver.particle_count(), 78);
    assert_eq!(solver.constraint_count(), 204);
}

#[test]
fn test_anchored_column_is_fixed() {
    let shape = HeadShape::default();
    let mut solver = XpbdSolver::new();
    solver.build_head(&shape);

    let fixed: Vec<usize> = (0..solver.particle_count())
        .filter(|&i| solver.particles.inv_mass[i] == 0.0)
        .collect();
    assert_eq!(fixed.len(), shape.rings, "one anchor per ring");
    for &i in &fixed {
        let p = solver.particles.position[i];
        assert!(p.x == 0.0 && p.z == 0.0, "anchors sit on the Y axis");
    }
}

#[test]
fn test_shell_stays_on_head_scale_under_gravity() {
    let mut solver = XpbdSolver::new();
    solver.build_head(&HeadShape::default());

    for _ in 0..120 {
        solver.step(1.0 / 60.0);
    }

    // The spokes hold the jelly against gravity: nothing sags off the head.
    for i in 0..solver.particle_count() {
        let p = solver.particles.position[i];
        assert!(
            p.length() < 2.5,
            "shell particle {} drifted to {:?}",
            i,
            p
        );
        assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
    }
}

#[test]
fn test_frontal_punch_deforms_front_more_than_back() {
    let mut session = BoutSession::new(&HeadShape::default());
    session.solver.config.gravity = Vec3::ZERO;

    session.punch(Vec3::new(0.0, 0.0, 0.85), 1.0);
    session.frame(1.0 / 60.0);

    let solver = &mut session.solver;
    let mut front_max = 0.0f32;
    let mut back_max = 0.0f32;
    for i in 0..solver.particle_count() {
        let rest = solver.particles.rest_position[i];
        let disp = (solver.particles.position[i] - rest).length();
        if rest.z > 0.4 {
            front_max = front_max.max(disp);
        } else if rest.z < -0.4 {
            back_max = back_max.max(disp);
        }
    }

    assert!(front_max > 0.0, "the punched side must deform");
    assert!(
        front_max > back_max * 2.0,
        "deformation should localize around the contact: front={}, back={}",
        front_max,
        back_max
    );
}

#[test]
fn test_session_punch_fans_out_to_all_subsystems() {
    let mut session = BoutSession::new(&HeadShape::default());
    session.solver.config.gravity = Vec3::ZERO;

    let zone = session.punch(Vec3::new(0.0, 0.0, 0.85), 0.3);
    assert_eq!(zone, HitZone::Nose);

    // Ring buffer recorded it.
    assert_eq!(session.impacts.impacts().len(), 1);
    assert!((session.impacts.impacts()[0].strength - 0.3).abs() < 1e-6);

    // The effect rules ran: light jab scenario.
    let nose = session.effects.intensity_of(EffectKind::NoseSquash);
    assert!((nose - 0.45).abs() < 1e-5);

    // The solver got the impulse and deforms on the next frame.
    session.frame(1.0 / 60.0);
    let moved = session
        .solver
        .displacements_flat()
        .iter()
        .any(|d| d.abs() > 1e-4);
    assert!(moved, "the lattice should deform within the same frame");
}

#[test]
fn test_session_frame_advances_decay_and_state() {
    let mut session = BoutSession::new(&HeadShape::default());

    session.punch(Vec3::new(0.0, -0.5, 0.3), 1.0); // jaw haymaker
    assert!(session.effects.jaw_detached());
    let strength_before = session.impacts.impacts()[0].strength;

    session.frame(0.1);

    assert!(session.impacts.impacts()[0].strength < strength_before);
    assert!(session.effects.jaw_detach_progress() > 0.0);
}

#[test]
fn test_session_reset_restores_everything() {
    let mut session = BoutSession::new(&HeadShape::default());

    session.punch(Vec3::new(0.0, -0.5, 0.3), 1.0);
    for _ in 0..10 {
        session.frame(1.0 / 60.0);
    }

    session.reset();

    assert!(session.impacts.impacts().is_empty());
    assert!(session.effects.active_effects().is_empty());
    assert!(!session.effects.jaw_detached());
    assert!(
        session
            .solver
            .displacements_flat()
            .iter()
            .all(|d| *d == 0.0),
        "reset must put the lattice back at rest"
    );
}

#[test]
fn test_classifier_agrees_with_lattice_proportions() {
    let shape = HeadShape::default();
    let mut solver = XpbdSolver::new();
    solver.build_head(&shape);
    let clf = shape.classifier();

    // The frontmost shell particle should classify as a frontal zone.
    let mut front_idx = 0;
    let mut best_z = f32::MIN;
    for i in 0..solver.particle_count() {
        let p = solver.particles.rest_position[i];
        if p.z > best_z {
            best_z = p.z;
            front_idx = i;
        }
    }
    let zone = clf.classify(solver.particles.rest_position[front_idx]);
    assert!(
        matches!(zone, HitZone::Nose | HitZone::LeftEye | HitZone::RightEye),
        "frontmost lattice point landed in {:?}",
        zone
    );
}
