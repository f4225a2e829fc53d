use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::{IntoParallelRefMutIterator, ParallelIterator};

use crate::{
    body::{Body, PointMass},
    config::SimulationConfig,
    disk::AccretionDisk,
    error::{Error, Result},
    render::{Circle, Transform, Viewport},
    vector::{Planar, Vector2},
};

/// The structure owning the bodies and advancing them in time.
///
/// Each [`tick`](Simulation::tick) computes the pairwise gravitational acceleration of every
/// body, merges the bodies that overlap and finally integrates their motion.
///
/// ```
/// # use accretion::prelude::*;
/// let mut simulation = Simulation::new(SimulationConfig::default())?;
///
/// simulation.add_body(1.0, 100.0, Vector2::new(250.0, 250.0), Vector2::new(2.0, 30.0), false)?;
/// simulation.add_body(2.0, 2005.0, Vector2::new(350.0, 300.0), Vector2::ZERO, true)?;
///
/// for _ in 0..60 {
///     simulation.tick(1.0 / 60.0, 1);
/// }
///
/// assert_eq!(simulation.len(), 2);
/// assert_eq!(simulation.bodies()[1].position(), Vector2::new(350.0, 300.0));
/// # Ok::<(), accretion::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    bodies: Vec<Body>,
    arena: Vec<Option<Body>>,
    config: SimulationConfig,
    reverse: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::with_config(SimulationConfig::default())
    }
}

impl Simulation {
    /// Creates an empty simulation after validating its configuration.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self::with_config(config))
    }

    fn with_config(config: SimulationConfig) -> Self {
        Self {
            bodies: Vec::new(),
            arena: Vec::new(),
            config,
            reverse: false,
        }
    }

    /// Adds a [`Body`] to the simulation.
    ///
    /// Negative or non-finite masses, negative radii and non-finite vectors are rejected and
    /// nothing is added.
    pub fn add_body(
        &mut self,
        radius: f64,
        mass: f64,
        position: Vector2,
        velocity: Vector2,
        rigid: bool,
    ) -> Result<()> {
        if let Err(error) = check_body(radius, mass, position, velocity) {
            warn!(%error, "rejected body");
            return Err(error);
        }

        self.bodies.push(
            Body::new(radius, mass, rigid)
                .with_position(position)
                .with_velocity(velocity),
        );

        Ok(())
    }

    /// Populates the simulation with an [`AccretionDisk`] using the given random number generator.
    #[inline]
    pub fn add_accretion_disk<R: Rng + ?Sized>(
        &mut self,
        disk: &AccretionDisk,
        rng: &mut R,
    ) -> Result<()> {
        disk.generate(self, rng)
    }

    /// Populates the simulation with an [`AccretionDisk`], seeding the generator with `seed`.
    ///
    /// The same seed always produces the same disk.
    #[inline]
    pub fn add_accretion_disk_seeded(&mut self, disk: &AccretionDisk, seed: u64) -> Result<()> {
        disk.generate(self, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    /// Advances the simulation `steps` times by `dt` and returns the number of merges.
    ///
    /// A `steps` of zero is treated as one. Every step is a force and collision pass over all
    /// the bodies followed by an integration pass, so that no body moves before every
    /// acceleration of the step has been computed.
    pub fn tick(&mut self, dt: f64, steps: usize) -> usize {
        let steps = steps.max(1);
        let mut merges = 0;

        for _ in 0..steps {
            merges += self.accelerate_and_merge();
            self.integrate(dt);
        }

        trace!(dt, steps, merges, bodies = self.bodies.len(), "tick");

        merges
    }

    /// Computes the acceleration of every body and merges colliding bodies.
    ///
    /// Bodies are visited in order. A body overlapping another one is replaced, together with the
    /// other body, by their merged body appended at the end of the arena, which is visited later
    /// in the same pass and can merge again. Removed bodies are left as empty slots until the
    /// pass is over.
    fn accelerate_and_merge(&mut self) -> usize {
        let SimulationConfig {
            gravitational_constant,
            distance_scale,
            max_force,
            ..
        } = self.config;

        let arena = &mut self.arena;
        arena.clear();
        arena.extend(self.bodies.drain(..).map(Some));

        let mut merges = 0;
        let mut b = 0;

        while b < arena.len() {
            let Some(body) = arena[b] else {
                b += 1;
                continue;
            };

            let mut acceleration = Vector2::ZERO;
            let mut collision = None;

            for (c, other) in arena.iter().enumerate() {
                if c == b {
                    continue;
                }

                let Some(other) = other else {
                    continue;
                };

                if other.distance_from(&body) < body.radius() + other.radius() {
                    collision = Some(c);
                    break;
                }

                acceleration -=
                    other.force_at(body.position(), distance_scale) * gravitational_constant;
            }

            match collision {
                Some(c) => {
                    arena[b] = None;

                    if let Some(other) = arena[c].take() {
                        let merged = body.merge_with(&other);

                        debug!(
                            masses = ?(body.mass(), other.mass()),
                            mass = merged.mass(),
                            position = ?merged.position(),
                            "merged bodies"
                        );

                        arena.push(Some(merged));
                        merges += 1;
                    }
                }
                None => {
                    acceleration.clamp_magnitude(max_force);

                    if let Some(body) = &mut arena[b] {
                        body.accelerate(acceleration);
                    }
                }
            }

            b += 1;
        }

        self.bodies.extend(arena.drain(..).flatten());

        merges
    }

    #[inline]
    #[cfg(not(feature = "parallel"))]
    fn integrate(&mut self, dt: f64) {
        let (reverse, max_velocity) = (self.reverse, self.config.max_velocity);

        self.bodies
            .iter_mut()
            .for_each(|body| body.update(dt, reverse, max_velocity));
    }

    #[inline]
    #[cfg(feature = "parallel")]
    fn integrate(&mut self, dt: f64) {
        let (reverse, max_velocity) = (self.reverse, self.config.max_velocity);

        self.bodies
            .par_iter_mut()
            .for_each(|body| body.update(dt, reverse, max_velocity));
    }

    /// Returns the screen-space circle of every body overlapping the viewport.
    ///
    /// ```
    /// # use accretion::prelude::*;
    /// let mut simulation = Simulation::default();
    /// simulation.add_body(1.0, 1.0, Vector2::new(10.0, 10.0), Vector2::ZERO, false)?;
    /// simulation.add_body(1.0, 1.0, Vector2::new(-50.0, 10.0), Vector2::ZERO, false)?;
    ///
    /// let circles: Vec<_> = simulation
    ///     .render(&Camera::default(), Viewport::new(100.0, 100.0))
    ///     .collect();
    ///
    /// assert_eq!(circles, [Circle { x: 10.0, y: 10.0, radius: 1.0 }]);
    /// # Ok::<(), accretion::error::Error>(())
    /// ```
    pub fn render<'a, T>(
        &'a self,
        transform: &'a T,
        viewport: Viewport,
    ) -> impl Iterator<Item = Circle> + 'a
    where
        T: Transform + ?Sized,
    {
        self.bodies
            .iter()
            .map(move |body| Circle::project(transform, body.position(), body.radius()))
            .filter(move |circle| viewport.overlaps(circle))
    }

    /// The bodies of the simulation.
    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Number of bodies in the simulation.
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the simulation has no bodies.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// The constants of the simulation.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Whether time currently flows backwards.
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.reverse
    }

    /// Sets the direction of time for the following ticks.
    #[inline]
    pub fn set_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
    }

    /// Flips the direction of time for the following ticks.
    #[inline]
    pub fn toggle_reverse(&mut self) {
        self.reverse = !self.reverse;
    }

    /// Sum of the masses of all the bodies.
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(PointMass::mass).sum()
    }

    /// Sum of the momenta of all the bodies.
    pub fn total_momentum(&self) -> Vector2 {
        self.bodies.iter().map(Body::momentum).sum()
    }
}

fn check_body(radius: f64, mass: f64, position: Vector2, velocity: Vector2) -> Result<()> {
    let reason = if !mass.is_finite() || mass < 0.0 {
        format!("mass must be finite and non-negative, got {mass}")
    } else if !radius.is_finite() || radius < 0.0 {
        format!("radius must be finite and non-negative, got {radius}")
    } else if !position.is_finite() {
        format!("position must be finite, got {position}")
    } else if !velocity.is_finite() {
        format!("velocity must be finite, got {velocity}")
    } else {
        return Ok(());
    };

    Err(Error::InvalidBody { reason })
}
