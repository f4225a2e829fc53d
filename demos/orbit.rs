use accretion::prelude::*;

const DT: f64 = 1.0 / 60.0;

// Scheduler-side controls, applied when calling `tick`.
const SPEED: f64 = 2.0;
const STEPS: usize = 4;

fn main() -> Result<(), accretion::error::Error> {
    let mut simulation = Simulation::new(SimulationConfig {
        gravitational_constant: 6.67,
        max_force: 1E6,
        max_velocity: 1E4,
        ..Default::default()
    })?;

    simulation.add_accretion_disk_seeded(
        &AccretionDisk {
            position: Vector2::new(500.0, 300.0),
            radius: 200.0,
            body_count: 300,
            ..Default::default()
        },
        42,
    )?;

    let camera = Camera::default();
    let viewport = Viewport::new(1000.0, 600.0);

    for frame in 0_u64.. {
        // Run forward for 10 seconds, then rewind.
        if frame == 600 {
            simulation.toggle_reverse();
        }

        let merges = simulation.tick(DT * SPEED / STEPS as f64, STEPS);
        let visible = simulation.render(&camera, viewport).count();

        print!("\x1B[2J\x1B[1;1H");
        println!(
            "Simulation {{\n\
            \x20   frame: {frame}\n\
            \x20   reversed: {}\n\
            \x20   bodies: {}\n\
            \x20   visible: {visible}\n\
            \x20   merges: {merges}\n\
            \x20   total mass: {:.3}\n\
            }}",
            simulation.is_reversed(),
            simulation.len(),
            simulation.total_mass(),
        );

        std::thread::sleep(std::time::Duration::from_millis(16))
    }

    Ok(())
}
