/// Two-dimensional vector used for positions, velocities and accelerations.
///
/// This is [`glam::DVec2`]; the operations the simulation needs on top of it are provided by the
/// [`Planar`] trait.
pub type Vector2 = glam::DVec2;

/// Operations on [`Vector2`] used throughout the simulation.
///
/// # Example
///
/// ```
/// # use accretion::prelude::*;
/// let mut velocity = Vector2::new(3.0, 4.0);
/// assert_eq!(velocity.magnitude(), 5.0);
///
/// velocity.normalize_to(10.0);
/// assert_eq!(velocity, Vector2::new(6.0, 8.0));
/// ```
pub trait Planar: Sized {
    /// Adds `dx` and `dy` to the components of the vector.
    fn translate(&mut self, dx: f64, dy: f64) -> &mut Self;

    /// Overwrites both components of the vector.
    fn set(&mut self, x: f64, y: f64) -> &mut Self;

    /// Euclidean norm, `sqrt(x² + y²)`.
    fn magnitude(&self) -> f64;

    /// Rescales the vector so that its magnitude equals `max`.
    ///
    /// A vector of magnitude zero has no direction and is left unchanged.
    fn normalize_to(&mut self, max: f64) -> &mut Self;

    /// Rescales the vector to `max` only if its magnitude is greater than `max`.
    #[inline]
    fn clamp_magnitude(&mut self, max: f64) -> &mut Self {
        if self.magnitude() > max {
            self.normalize_to(max);
        }
        self
    }

    /// Component-wise mean of the two vectors.
    fn average_with(&self, other: &Self) -> Self;
}

impl Planar for Vector2 {
    #[inline]
    fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.x += dx;
        self.y += dy;
        self
    }

    #[inline]
    fn set(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    #[inline]
    fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    fn normalize_to(&mut self, max: f64) -> &mut Self {
        let magnitude = self.magnitude();

        if magnitude > 0.0 {
            *self *= max / magnitude;
        }
        self
    }

    #[inline]
    fn average_with(&self, other: &Self) -> Self {
        Vector2::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}
