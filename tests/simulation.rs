use accretion::prelude::*;

const DT: f64 = 1.0 / 60.0;

fn two_bodies() -> Simulation {
    let mut simulation = Simulation::default();

    simulation
        .add_body(1.0, 100.0, Vector2::new(250.0, 250.0), Vector2::new(2.0, 30.0), false)
        .unwrap();
    simulation
        .add_body(2.0, 2005.0, Vector2::new(350.0, 300.0), Vector2::ZERO, true)
        .unwrap();

    simulation
}

#[test]
fn deterministic_trajectories() {
    let mut a = two_bodies();
    let mut b = two_bodies();

    for _ in 0..600 {
        a.tick(DT, 1);
        b.tick(DT, 1);

        assert_eq!(a.bodies(), b.bodies());
    }
}

#[test]
fn steps_match_repeated_ticks() {
    let mut stepped = two_bodies();
    let mut repeated = two_bodies();

    stepped.tick(DT, 5);
    for _ in 0..5 {
        repeated.tick(DT, 1);
    }

    assert_eq!(stepped.bodies(), repeated.bodies());
}

#[test]
fn circular_orbit_stays_bounded() {
    let config = SimulationConfig {
        gravitational_constant: 6.67,
        distance_scale: 1.0,
        max_force: f64::MAX,
        max_velocity: f64::MAX,
    };

    let center = Vector2::new(350.0, 300.0);
    let center_mass = 2_005_000.0;
    let distance = 100.0;
    let speed = orbital_speed(&config, center_mass, distance);

    let mut simulation = Simulation::new(config).unwrap();
    simulation
        .add_body(radius_for_mass(center_mass), center_mass, center, Vector2::ZERO, true)
        .unwrap();
    simulation
        .add_body(
            radius_for_mass(1.0),
            1.0,
            center + Vector2::new(distance, 0.0),
            Vector2::new(0.0, -speed),
            false,
        )
        .unwrap();

    for _ in 0..10_000 {
        assert_eq!(simulation.tick(DT, 1), 0);

        let separation = simulation.bodies()[0].distance_from(&simulation.bodies()[1]);
        assert!(
            (0.8 * distance..1.2 * distance).contains(&separation),
            "separation {separation} out of bounds"
        );
    }

    assert_eq!(simulation.bodies()[0].position(), center);
}

#[test]
fn seeded_disk_evolves_identically() {
    let disk = AccretionDisk {
        radius: 120.0,
        body_count: 150,
        ..Default::default()
    };

    let run = || {
        let mut simulation = Simulation::default();
        simulation.add_accretion_disk_seeded(&disk, 1234).unwrap();

        for _ in 0..20 {
            simulation.tick(DT, 1);
        }

        simulation
    };

    assert_eq!(run().bodies(), run().bodies());
}

#[test]
fn disk_invariants_over_time() {
    let disk = AccretionDisk {
        radius: 100.0,
        body_count: 200,
        mass_range: (0.5, 4.0),
        ..Default::default()
    };

    let mut simulation = Simulation::default();
    simulation.add_accretion_disk_seeded(&disk, 99).unwrap();

    let mut total_mass = simulation.total_mass();

    for _ in 0..120 {
        let before = simulation.len();
        let merges = simulation.tick(DT, 1);

        assert_eq!(simulation.len(), before - merges);
        assert!(simulation.total_mass() <= total_mass);
        assert!(simulation.bodies().iter().all(|body| {
            body.mass() >= 0.0
                && body.position().is_finite()
                && body.velocity().length() <= simulation.config().max_velocity + 1E-9
        }));

        total_mass = simulation.total_mass();
    }

    // The heaviest body is the rigid center, it never moves.
    assert!(simulation
        .bodies()
        .iter()
        .any(|body| body.is_rigid() && body.position() == disk.position));
}
