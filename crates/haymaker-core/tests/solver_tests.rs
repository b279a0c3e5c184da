use glam::Vec3;
use haymaker_core::forces::impact::ImpactImpulse;
use haymaker_core::particle::Particle;
use haymaker_core::solver::XpbdSolver;

/// Solver with no gravity, no damping, one substep: pure mechanics.
fn bare_solver() -> XpbdSolver {
    let mut solver = XpbdSolver::new();
    solver.config.gravity = Vec3::ZERO;
    solver.config.global_damping = 1.0;
    solver.config.substeps = 1;
    solver
}

#[test]
fn test_fixed_particle_never_moves() {
    let mut solver = XpbdSolver::new(); // default gravity on
    let anchor = solver.add_particle(Particle::fixed(Vec3::new(0.5, 1.0, -0.25)));
    solver.add_particle(Particle::new(Vec3::ZERO, 1.0));

    solver.apply_impact(ImpactImpulse::new(
        Vec3::new(0.5, 1.0, -0.25),
        Vec3::new(0.0, 0.0, -10.0),
        2.0,
        1.0,
    ));
    for _ in 0..120 {
        solver.step(1.0 / 60.0);
    }

    assert_eq!(
        solver.particles.position[anchor],
        Vec3::new(0.5, 1.0, -0.25),
        "inv_mass == 0 particles move only through explicit reset"
    );
    assert_eq!(solver.particles.velocity[anchor], Vec3::ZERO);
}

#[test]
fn test_gravity_accelerates_free_particle() {
    let mut solver = XpbdSolver::new();
    solver.config.global_damping = 1.0;
    let p = solver.add_particle(Particle::new(Vec3::ZERO, 1.0));

    solver.step(1.0 / 60.0);

    assert!(
        solver.particles.position[p].y < 0.0,
        "free particle should fall under gravity"
    );
    assert!(solver.particles.velocity[p].y < 0.0);
}

#[test]
fn test_impact_kick_uses_quadratic_falloff() {
    let mut solver = bare_solver();
    let near = solver.add_particle(Particle::new(Vec3::ZERO, 1.0));
    let far = solver.add_particle(Particle::new(Vec3::new(0.0, 0.0, -3.0), 1.0));

    // Contact 1 unit in front of `near`, radius 2: falloff (1 - 0.5)^2 = 0.25.
    solver.apply_impact(ImpactImpulse::new(
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 0.0, -1.0),
        2.0,
        1.0,
    ));
    solver.step(0.1);

    let v_near = solver.particles.velocity[near].z;
    assert!(
        (v_near + 0.25).abs() < 1e-5,
        "expected quadratic-falloff kick of -0.25, got {}",
        v_near
    );
    // `far` sits 4 units from the contact, outside the radius.
    assert_eq!(solver.particles.velocity[far], Vec3::ZERO);
}

#[test]
fn test_impact_queue_drains_after_one_step() {
    let mut solver = bare_solver();
    let p = solver.add_particle(Particle::new(Vec3::ZERO, 1.0));

    solver.apply_impact(ImpactImpulse::new(
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 0.0, -1.0),
        2.0,
        1.0,
    ));
    solver.step(0.1);
    let v_after_first = solver.particles.velocity[p].z;

    // No re-application: velocity only coasts on the second step.
    solver.step(0.1);
    let v_after_second = solver.particles.velocity[p].z;
    assert!(
        (v_after_first - v_after_second).abs() < 1e-6,
        "queued impact must only apply to the step after it was queued"
    );
}

#[test]
fn test_floor_bounce_restitution_and_friction() {
    let mut solver = bare_solver();
    let p = solver.add_particle(Particle::new(Vec3::new(0.0, -1.0, 0.0), 1.0));
    solver.particles.velocity[p] = Vec3::new(2.0, -5.0, 1.0);

    solver.enforce_floor_collision();

    let pos = solver.particles.position[p];
    let vel = solver.particles.velocity[p];
    assert_eq!(pos.y, 0.0, "particle clamps to the floor plane");
    assert!((vel.y - 2.5).abs() < 1e-6, "vertical bounce: -5 * -0.5 = 2.5");
    assert!((vel.x - 1.6).abs() < 1e-6, "friction: 2.0 * 0.8");
    assert!((vel.z - 0.8).abs() < 1e-6, "friction: 1.0 * 0.8");
}

#[test]
fn test_floor_pass_is_not_part_of_step() {
    let mut solver = bare_solver();
    let p = solver.add_particle(Particle::new(Vec3::new(0.0, -1.0, 0.0), 1.0));

    solver.step(1.0 / 60.0);

    assert!(
        solver.particles.position[p].y < 0.0,
        "step alone must not enforce the floor"
    );
}

#[test]
fn test_reset_restores_rest_layout() {
    let mut solver = XpbdSolver::new();
    let p = solver.add_particle(Particle::new(Vec3::new(1.0, 2.0, 3.0), 1.0));

    for _ in 0..30 {
        solver.step(1.0 / 60.0);
    }
    assert_ne!(solver.particles.position[p], Vec3::new(1.0, 2.0, 3.0));

    solver.reset();
    assert_eq!(solver.particles.position[p], Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(solver.particles.velocity[p], Vec3::ZERO);
}

#[test]
fn test_reset_discards_pending_impacts() {
    let mut solver = bare_solver();
    let p = solver.add_particle(Particle::new(Vec3::ZERO, 1.0));

    solver.apply_impact(ImpactImpulse::new(
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 0.0, -1.0),
        2.0,
        1.0,
    ));
    solver.reset();
    solver.step(0.1);

    assert_eq!(
        solver.particles.velocity[p],
        Vec3::ZERO,
        "reset must drop queued impacts"
    );
}

#[test]
fn test_flat_buffers_follow_insertion_order() {
    let mut solver = bare_solver();
    solver.add_particle(Particle::new(Vec3::new(1.0, 2.0, 3.0), 1.0));
    solver.add_particle(Particle::new(Vec3::new(4.0, 5.0, 6.0), 1.0));

    assert_eq!(solver.positions_flat(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    // Move the first particle and check the displacement view.
    solver.particles.position[0] += Vec3::new(0.5, 0.0, -0.5);
    let disp = solver.displacements_flat().to_vec();
    assert_eq!(disp, vec![0.5, 0.0, -0.5, 0.0, 0.0, 0.0]);
}

#[test]
fn test_zero_dt_step_is_a_noop() {
    let mut solver = XpbdSolver::new();
    let p = solver.add_particle(Particle::new(Vec3::ZERO, 1.0));

    solver.step(0.0);

    assert_eq!(solver.particles.position[p], Vec3::ZERO);
    assert_eq!(solver.particles.velocity[p], Vec3::ZERO);
}

#[test]
fn test_substep_count_does_not_change_stiffness_feel() {
    // Same scene stepped with 2 and with 8 substeps: compliance scales with
    // subdt^2, so the end-of-frame stretch should land in the same
    // neighborhood rather than diverging with the substep count.
    let run = |substeps: u32| -> f32 {
        let mut solver = XpbdSolver::new();
        solver.config.gravity = Vec3::ZERO;
        solver.config.global_damping = 0.9;
        solver.config.substeps = substeps;
        solver.add_particle(Particle::fixed(Vec3::ZERO));
        solver.add_particle(Particle::new(Vec3::new(1.5, 0.0, 0.0), 1.0));
        solver.add_constraint(haymaker_core::constraints::Constraint::distance(
            0, 1, 1.0, 0.001,
        ));
        for _ in 0..60 {
            solver.step(1.0 / 60.0);
        }
        (solver.particles.position[1] - solver.particles.position[0]).length()
    };

    let d2 = run(2);
    let d8 = run(8);
    assert!(
        (d2 - d8).abs() < 0.05,
        "stiffness should be substep-independent: 2 substeps -> {}, 8 -> {}",
        d2,
        d8
    );
}

#[test]
fn test_no_nan_after_heavy_stepping() {
    let mut solver = XpbdSolver::new();
    solver.build_head(&haymaker_core::head::HeadShape::default());

    for k in 0..100 {
        if k % 10 == 0 {
            solver.apply_impact(ImpactImpulse::new(
                Vec3::new(0.0, 0.0, 0.85),
                Vec3::new(0.0, 0.0, -8.0),
                0.6,
                1.0,
            ));
        }
        solver.step(1.0 / 60.0);
    }

    for i in 0..solver.particle_count() {
        let p = solver.particles.position[i];
        let v = solver.particles.velocity[i];
        assert!(
            p.x.is_finite() && p.y.is_finite() && p.z.is_finite(),
            "non-finite position at particle {}",
            i
        );
        assert!(
            v.x.is_finite() && v.y.is_finite() && v.z.is_finite(),
            "non-finite velocity at particle {}",
            i
        );
    }
}
