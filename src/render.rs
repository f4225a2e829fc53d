use serde::{Deserialize, Serialize};

use crate::vector::Vector2;

/// Mapping from world space to screen space.
///
/// Implemented for [`Camera`] and for any closure taking a world position and radius and
/// returning a screen position and radius.
pub trait Transform {
    /// Maps a world-space circle to a screen-space circle.
    fn transform(&self, position: Vector2, radius: f64) -> (Vector2, f64);
}

impl<F> Transform for F
where
    F: Fn(Vector2, f64) -> (Vector2, f64),
{
    #[inline]
    fn transform(&self, position: Vector2, radius: f64) -> (Vector2, f64) {
        self(position, radius)
    }
}

/// A pan and zoom camera.
///
/// `offset` is the world position drawn at the top-left corner of the screen and `zoom` the
/// number of screen units per world unit.
///
/// ```
/// # use accretion::prelude::*;
/// let camera = Camera::new(Vector2::new(100.0, 50.0), 2.0);
/// let (position, radius) = camera.transform(Vector2::new(110.0, 60.0), 1.5);
///
/// assert_eq!(position, Vector2::new(20.0, 20.0));
/// assert_eq!(radius, 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World position at the screen origin.
    pub offset: Vector2,
    /// Screen units per world unit.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vector2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Creates a camera.
    pub fn new(offset: Vector2, zoom: f64) -> Self {
        Self { offset, zoom }
    }

    /// Moves the camera by a screen-space displacement.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset += Vector2::new(dx, dy) / self.zoom;
    }

    /// Multiplies the zoom by `factor` while keeping the world point under `anchor` (in screen
    /// space) in place.
    pub fn zoom_at(&mut self, anchor: Vector2, factor: f64) {
        let world = self.offset + anchor / self.zoom;
        self.zoom *= factor;
        self.offset = world - anchor / self.zoom;
    }
}

impl Transform for Camera {
    #[inline]
    fn transform(&self, position: Vector2, radius: f64) -> (Vector2, f64) {
        ((position - self.offset) * self.zoom, radius * self.zoom)
    }
}

/// Screen rectangle `[0, width] × [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width of the screen.
    pub width: f64,
    /// Height of the screen.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the circle overlaps the viewport.
    #[inline]
    pub fn overlaps(&self, circle: &Circle) -> bool {
        circle.x + circle.radius > 0.0
            && circle.x - circle.radius < self.width
            && circle.y + circle.radius > 0.0
            && circle.y - circle.radius < self.height
    }
}

/// A filled circle in screen space, ready to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Horizontal screen position of the center.
    pub x: f64,
    /// Vertical screen position of the center.
    pub y: f64,
    /// Screen radius.
    pub radius: f64,
}

impl Circle {
    /// Projects a world-space circle to screen space.
    #[inline]
    pub fn project<T: Transform + ?Sized>(transform: &T, position: Vector2, radius: f64) -> Self {
        let (position, radius) = transform.transform(position, radius);

        Self {
            x: position.x,
            y: position.y,
            radius,
        }
    }
}
