use crate::vector::{Planar, Vector2};

/// Fraction of the combined mass kept by the body resulting from a collision.
pub const MERGE_MASS_RETENTION: f64 = 0.99;

/// Smallest separation, after scaling, used when computing a gravitational force.
///
/// Keeps [`force_at`](PointMass::force_at) finite for coincident or nearly coincident bodies.
pub const MIN_SEPARATION: f64 = 1e-9;

/// Radius of a body of the given mass, `1 + ln(max(1, mass)) / 5`.
///
/// Every mass below `1` maps to a radius of `1` and the radius grows logarithmically above it.
///
/// ```
/// # use accretion::body::radius_for_mass;
/// assert_eq!(radius_for_mass(0.0), 1.0);
/// assert_eq!(radius_for_mass(1.0), 1.0);
/// assert!(radius_for_mass(1E6) > radius_for_mass(1E3));
/// ```
#[inline]
pub fn radius_for_mass(mass: f64) -> f64 {
    1.0 + mass.max(1.0).ln() / 5.0
}

/// Speed of a circular orbit of the given radius around the given mass, `sqrt(mass / radius)`.
///
/// The gravitational constant is expected to be folded into `mass`.
#[inline]
pub fn orbital_velocity(mass: f64, radius: f64) -> f64 {
    (mass / radius).sqrt()
}

/// Trait to describe an object which consists of a [position](PointMass::position) and a
/// [mass](PointMass::mass) and therefore attracts other objects.
///
/// It is implemented for [`Body`] and for tuples of a position and a mass, which is convenient for
/// probing the field of a fixed mass without creating a body.
///
/// ```
/// # use accretion::prelude::*;
/// let point_mass = (Vector2::ZERO, 4.0);
/// let force = point_mass.force_at(Vector2::new(2.0, 0.0), 1.0);
///
/// assert_eq!(force, Vector2::new(1.0, 0.0));
/// ```
pub trait PointMass {
    /// The position of the object in world space.
    fn position(&self) -> Vector2;

    /// The mass of the object.
    fn mass(&self) -> f64;

    /// Euclidean distance between the positions of the two objects.
    #[inline]
    fn distance_from<P: PointMass + ?Sized>(&self, other: &P) -> f64 {
        (other.position() - self.position()).magnitude()
    }

    /// Gravitational contribution of this object at `point`, without the gravitational constant.
    ///
    /// The separation `r` is the distance to `point` multiplied by `scale` and the result is
    /// `(point - position) / r * mass / r²`: it points from this object toward `point`, so it has
    /// to be subtracted to obtain an attraction. A massless object exerts no force and a point
    /// coinciding with the object receives the zero vector.
    #[inline]
    fn force_at(&self, point: Vector2, scale: f64) -> Vector2 {
        let mass = self.mass();

        if mass == 0.0 {
            return Vector2::ZERO;
        }

        let dir = point - self.position();
        let r = (dir.magnitude() * scale).max(MIN_SEPARATION);

        dir / r * (mass / (r * r))
    }
}

impl PointMass for (Vector2, f64) {
    #[inline]
    fn position(&self) -> Vector2 {
        self.0
    }

    #[inline]
    fn mass(&self) -> f64 {
        self.1
    }
}

impl<P: PointMass> PointMass for &P {
    #[inline]
    fn position(&self) -> Vector2 {
        (**self).position()
    }

    #[inline]
    fn mass(&self) -> f64 {
        (**self).mass()
    }
}

/// A simulated point mass.
///
/// A rigid body is never moved by [`update`](Body::update) and acts as a fixed gravitational
/// anchor.
///
/// ```
/// # use accretion::prelude::*;
/// let body = Body::new(2.0, 2005.0, true)
///     .with_position(Vector2::new(350.0, 300.0))
///     .with_velocity(Vector2::ZERO);
///
/// assert!(body.is_rigid());
/// assert_eq!(body.position(), Vector2::new(350.0, 300.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    position: Vector2,
    velocity: Vector2,
    acceleration: Vector2,
    radius: f64,
    mass: f64,
    rigid: bool,
}

impl Body {
    /// Creates a body at the origin, at rest.
    ///
    /// Negative masses are clamped to zero.
    pub fn new(radius: f64, mass: f64, rigid: bool) -> Self {
        Self {
            position: Vector2::ZERO,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            radius,
            mass: mass.max(0.0),
            rigid,
        }
    }

    /// Creates a body whose radius is derived from its mass with [`radius_for_mass`].
    pub fn with_mass(mass: f64, rigid: bool) -> Self {
        Self::new(radius_for_mass(mass), mass, rigid)
    }

    /// Returns the body placed at `position`.
    #[inline]
    pub fn with_position(mut self, position: Vector2) -> Self {
        self.position = position;
        self
    }

    /// Returns the body moving at `velocity`.
    #[inline]
    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    /// The velocity of the body.
    #[inline]
    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    /// The acceleration set by the last call to [`accelerate`](Body::accelerate).
    #[inline]
    pub fn acceleration(&self) -> Vector2 {
        self.acceleration
    }

    /// The collision and display radius of the body.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Whether the body is excluded from integration.
    #[inline]
    pub fn is_rigid(&self) -> bool {
        self.rigid
    }

    /// Linear momentum, `velocity * mass`.
    #[inline]
    pub fn momentum(&self) -> Vector2 {
        self.velocity * self.mass
    }

    /// Overwrites the acceleration used by the next [`update`](Body::update).
    #[inline]
    pub fn accelerate(&mut self, acceleration: Vector2) {
        self.acceleration = acceleration;
    }

    /// Advances the body by `dt` using semi-implicit Euler integration.
    ///
    /// The velocity is updated first and clamped to `max_velocity`, then used to move the body.
    /// When `reverse` is set, time flows backwards. Rigid bodies are left untouched.
    pub fn update(&mut self, dt: f64, reverse: bool, max_velocity: f64) {
        if self.rigid {
            return;
        }

        let direction = if reverse { -1.0 } else { 1.0 };

        self.velocity += self.acceleration * dt * direction;
        self.velocity.clamp_magnitude(max_velocity);
        self.position += self.velocity * dt * direction;
    }

    /// Returns the body resulting from an inelastic collision between `self` and `other`.
    ///
    /// The merged body keeps [`MERGE_MASS_RETENTION`] of the combined mass, sits at the position of
    /// the heavier body (`self` on ties), inherits its rigidity and moves with the combined
    /// momentum divided by the retained mass. Neither input is modified.
    ///
    /// ```
    /// # use accretion::prelude::*;
    /// let a = Body::with_mass(100.0, false).with_velocity(Vector2::new(1.0, 0.0));
    /// let b = Body::with_mass(300.0, false)
    ///     .with_position(Vector2::new(1.0, 1.0))
    ///     .with_velocity(Vector2::new(0.0, 1.0));
    ///
    /// let merged = a.merge_with(&b);
    ///
    /// assert!((merged.mass() - 396.0).abs() < 1E-9);
    /// assert_eq!(merged.position(), b.position());
    /// ```
    pub fn merge_with(&self, other: &Body) -> Body {
        let larger = if self.mass >= other.mass { self } else { other };

        let mass = (self.mass + other.mass) * MERGE_MASS_RETENTION;
        let velocity = if mass > 0.0 {
            (self.momentum() + other.momentum()) / mass
        } else {
            self.velocity.average_with(&other.velocity)
        };

        Body::with_mass(mass, larger.rigid)
            .with_position(larger.position)
            .with_velocity(velocity)
    }
}

impl PointMass for Body {
    #[inline]
    fn position(&self) -> Vector2 {
        self.position
    }

    #[inline]
    fn mass(&self) -> f64 {
        self.mass
    }
}
