use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    body::radius_for_mass,
    config::SimulationConfig,
    error::{Error, Result},
    simulation::Simulation,
    vector::{Planar, Vector2},
};

/// Ratio between the mass of the central body of a disk and the heaviest satellite mass.
pub const CENTER_MASS_FACTOR: f64 = 1_000_000.0;

/// Direction in which the satellites of an [`AccretionDisk`] orbit, as seen on a screen whose
/// vertical axis points down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Spin {
    /// Clockwise orbits.
    Clockwise,
    /// Counter-clockwise orbits.
    #[default]
    CounterClockwise,
}

impl Spin {
    /// `1` for counter-clockwise orbits, `-1` for clockwise ones.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Spin::Clockwise => -1.0,
            Spin::CounterClockwise => 1.0,
        }
    }
}

/// Speed of a circular orbit at `distance` from an `enclosed_mass`, for the gravity computed with
/// the given [`SimulationConfig`].
///
/// With `G` the gravitational constant and `s` the distance scale, this is
/// `sqrt((G / s²) * enclosed_mass / (distance * s))`. A non-positive distance gives a speed of
/// zero.
///
/// ```
/// # use accretion::prelude::*;
/// let config = SimulationConfig {
///     gravitational_constant: 1.0,
///     ..Default::default()
/// };
///
/// assert_eq!(orbital_speed(&config, 400.0, 4.0), 10.0);
/// ```
pub fn orbital_speed(config: &SimulationConfig, enclosed_mass: f64, distance: f64) -> f64 {
    if distance <= 0.0 {
        return 0.0;
    }

    let SimulationConfig {
        gravitational_constant: g,
        distance_scale: s,
        ..
    } = *config;

    ((g / (s * s)) * enclosed_mass.max(0.0) / (distance * s)).sqrt()
}

/// Description of an accretion disk: a heavy central body orbited by lighter satellites.
///
/// The satellites are denser and heavier near the center and are given the speed of a circular
/// orbit around the mass of the whole disk.
///
/// ```
/// # use accretion::prelude::*;
/// let disk = AccretionDisk {
///     position: Vector2::new(500.0, 300.0),
///     radius: 200.0,
///     body_count: 100,
///     ..Default::default()
/// };
///
/// let mut simulation = Simulation::default();
/// simulation.add_accretion_disk_seeded(&disk, 42)?;
///
/// assert_eq!(simulation.len(), 101);
/// # Ok::<(), accretion::error::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccretionDisk {
    /// Position of the central body.
    pub position: Vector2,
    /// Bulk velocity of the whole disk.
    pub velocity: Vector2,
    /// Radius of the disk.
    pub radius: f64,
    /// Number of satellites.
    pub body_count: usize,
    /// Minimum and maximum satellite mass.
    pub mass_range: (f64, f64),
    /// Orbit direction of the satellites.
    pub spin: Spin,
    /// Whether the central body is rigid.
    pub rigid: bool,
}

impl Default for AccretionDisk {
    fn default() -> Self {
        Self {
            position: Vector2::new(500.0, 300.0),
            velocity: Vector2::ZERO,
            radius: 250.0,
            body_count: 500,
            mass_range: (1.0, 2.0),
            spin: Spin::default(),
            rigid: true,
        }
    }
}

impl AccretionDisk {
    /// Checks that the disk can be generated.
    pub fn validate(&self) -> Result<()> {
        let (min_mass, max_mass) = self.mass_range;

        let reason = if !self.radius.is_finite() || self.radius <= 0.0 {
            format!("radius must be finite and positive, got {}", self.radius)
        } else if !self.position.is_finite() || !self.velocity.is_finite() {
            "position and velocity must be finite".to_owned()
        } else if !min_mass.is_finite() || !max_mass.is_finite() || min_mass < 0.0 {
            format!("masses must be finite and non-negative, got {min_mass}..{max_mass}")
        } else if min_mass > max_mass {
            format!("minimum mass {min_mass} is greater than maximum mass {max_mass}")
        } else {
            return Ok(());
        };

        Err(Error::InvalidDisk { reason })
    }

    /// Adds the central body then every satellite to the simulation.
    ///
    /// Each satellite is placed at a uniform angle and at a distance `U₁ * U₂ * radius` from the
    /// center, with `U₁` and `U₂` uniform in `[0, 1)`, which concentrates satellites toward the
    /// center. Its mass decreases linearly with the distance, from `min + max` at the center to
    /// `min` on the edge.
    pub fn generate<R: Rng + ?Sized>(&self, simulation: &mut Simulation, rng: &mut R) -> Result<()> {
        self.validate()?;

        let (min_mass, max_mass) = self.mass_range;
        let center_mass = max_mass * CENTER_MASS_FACTOR;

        simulation.add_body(
            radius_for_mass(center_mass),
            center_mass,
            self.position,
            self.velocity,
            self.rigid,
        )?;

        // Coarse estimate, only used to calibrate orbital speeds.
        let total_mass = center_mass + self.body_count as f64 * (max_mass / 2.0);
        let config = *simulation.config();

        for _ in 0..self.body_count {
            let angle = rng.gen_range(0.0..TAU);
            let magnitude = rng.gen::<f64>() * rng.gen::<f64>() * self.radius;
            let (sin, cos) = angle.sin_cos();

            let position = self.position + Vector2::new(cos, sin) * magnitude;
            let mass = min_mass + max_mass * ((self.radius - magnitude) / self.radius);

            let speed = orbital_speed(&config, total_mass - mass, magnitude);
            let mut velocity = Vector2::new(sin, -cos) * self.spin.sign();
            velocity.normalize_to(speed);

            simulation.add_body(
                radius_for_mass(mass),
                mass,
                position,
                velocity + self.velocity,
                false,
            )?;
        }

        info!(
            bodies = self.body_count + 1,
            center_mass,
            radius = self.radius,
            "generated accretion disk"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::PointMass;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn disk() -> AccretionDisk {
        AccretionDisk {
            position: Vector2::new(100.0, -50.0),
            velocity: Vector2::new(3.0, 4.0),
            radius: 150.0,
            body_count: 300,
            mass_range: (2.0, 10.0),
            spin: Spin::CounterClockwise,
            rigid: true,
        }
    }

    fn generated(disk: &AccretionDisk, seed: u64) -> Simulation {
        let mut simulation = Simulation::default();
        simulation
            .add_accretion_disk(disk, &mut ChaCha8Rng::seed_from_u64(seed))
            .unwrap();
        simulation
    }

    #[test]
    fn central_body() {
        let disk = disk();
        let simulation = generated(&disk, 1);
        let center = &simulation.bodies()[0];

        assert_eq!(simulation.len(), disk.body_count + 1);
        assert_eq!(center.mass(), 10.0 * CENTER_MASS_FACTOR);
        assert_eq!(center.radius(), radius_for_mass(center.mass()));
        assert_eq!(center.position(), disk.position);
        assert_eq!(center.velocity(), disk.velocity);
        assert!(center.is_rigid());
    }

    #[test]
    fn satellites_within_disk() {
        let disk = disk();
        let simulation = generated(&disk, 2);
        let (min_mass, max_mass) = disk.mass_range;

        for satellite in &simulation.bodies()[1..] {
            let distance = (satellite.position() - disk.position).length();

            assert!(distance <= disk.radius + 1E-9);
            assert!(satellite.mass() >= min_mass - 1E-9);
            assert!(satellite.mass() <= min_mass + max_mass + 1E-9);
            assert_relative_eq!(satellite.radius(), radius_for_mass(satellite.mass()));
            assert!(!satellite.is_rigid());
        }
    }

    #[test]
    fn satellites_are_denser_near_center() {
        let disk = disk();
        let simulation = generated(&disk, 3);

        let inner = simulation.bodies()[1..]
            .iter()
            .filter(|satellite| (satellite.position() - disk.position).length() < disk.radius / 2.0)
            .count();

        assert!(inner > disk.body_count / 2);
    }

    #[test]
    fn satellites_orbit_at_circular_speed() {
        let disk = disk();
        let simulation = generated(&disk, 4);
        let (_, max_mass) = disk.mass_range;
        let total_mass = max_mass * CENTER_MASS_FACTOR + disk.body_count as f64 * max_mass / 2.0;

        for satellite in &simulation.bodies()[1..] {
            let offset = satellite.position() - disk.position;
            let relative = satellite.velocity() - disk.velocity;
            let expected = orbital_speed(
                simulation.config(),
                total_mass - satellite.mass(),
                offset.length(),
            );

            assert_relative_eq!(relative.length(), expected, epsilon = 1E-6, max_relative = 1E-9);
            assert!(relative.dot(offset).abs() <= 1E-6 * relative.length() * offset.length());
        }
    }

    #[test]
    fn spin_direction() {
        for spin in [Spin::Clockwise, Spin::CounterClockwise] {
            let disk = AccretionDisk { spin, ..disk() };
            let simulation = generated(&disk, 5);

            for satellite in &simulation.bodies()[1..] {
                let offset = satellite.position() - disk.position;
                let relative = satellite.velocity() - disk.velocity;

                // Screen space, y pointing down: counter-clockwise is a negative cross product.
                assert!(offset.perp_dot(relative) * spin.sign() <= 0.0);
            }
        }
    }

    #[test]
    fn same_seed_same_disk() {
        let disk = disk();

        assert_eq!(generated(&disk, 9).bodies(), generated(&disk, 9).bodies());
        assert_ne!(generated(&disk, 9).bodies(), generated(&disk, 10).bodies());
    }

    #[test]
    fn invalid_disks() {
        let mut simulation = Simulation::default();
        let rng = &mut ChaCha8Rng::seed_from_u64(0);

        let invalid = [
            AccretionDisk {
                radius: 0.0,
                ..disk()
            },
            AccretionDisk {
                mass_range: (5.0, 1.0),
                ..disk()
            },
            AccretionDisk {
                mass_range: (-1.0, 1.0),
                ..disk()
            },
            AccretionDisk {
                position: Vector2::new(f64::INFINITY, 0.0),
                ..disk()
            },
        ];

        for disk in invalid {
            assert!(matches!(
                simulation.add_accretion_disk(&disk, rng),
                Err(Error::InvalidDisk { .. })
            ));
        }

        assert!(simulation.is_empty());
    }

    #[test]
    fn zero_distance_has_no_speed() {
        assert_eq!(orbital_speed(&SimulationConfig::default(), 1E6, 0.0), 0.0);
    }

    #[test]
    fn deserialize() {
        let disk: AccretionDisk = serde_json::from_str(
            r#"{ "radius": 80.0, "body_count": 12, "spin": "clockwise", "rigid": false }"#,
        )
        .unwrap();

        assert_eq!(disk.radius, 80.0);
        assert_eq!(disk.body_count, 12);
        assert_eq!(disk.spin, Spin::Clockwise);
        assert!(!disk.rigid);
        assert_eq!(disk.mass_range, AccretionDisk::default().mass_range);
    }
}
