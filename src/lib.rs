//! # Accretion
//!
//! Accretion is a crate providing a simple way to simulate a 2D gravitational N-body system in
//! Rust, where bodies attract each other, move and merge when they collide.
//!
//! ## Goals
//!
//! The main goal of this crate is to provide a small, deterministic simulation kernel that a
//! renderer or a game loop can drive one frame at a time. It does not draw anything, does not own
//! a clock and does not read input: the caller supplies the time step, reads the bodies back and
//! decides when to reverse time.
//!
//! Accelerations are computed by brute force, summing the contribution of every other body. When
//! two bodies overlap they are replaced by a single, slightly lighter body carrying their
//! combined momentum.
//!
//! The integration pass can run on multiple CPU threads thanks to
//! [rayon](https://github.com/rayon-rs/rayon). Enable the "parallel" feature to use it.
//!
//! # Using Accretion
//!
//! ## Setting up the simulation
//!
//! Create a [`Simulation`](simulation::Simulation) from a
//! [`SimulationConfig`](config::SimulationConfig) and add bodies to it, either one by one or by
//! generating an [`AccretionDisk`](disk::AccretionDisk).
//!
//! ```
//! # use accretion::prelude::*;
//! let config = SimulationConfig {
//!     gravitational_constant: 6.67,
//!     ..Default::default()
//! };
//!
//! let mut simulation = Simulation::new(config)?;
//!
//! simulation.add_body(1.0, 100.0, Vector2::new(250.0, 250.0), Vector2::new(2.0, 30.0), false)?;
//! simulation.add_accretion_disk_seeded(&AccretionDisk::default(), 7)?;
//! # Ok::<(), accretion::error::Error>(())
//! ```
//!
//! ## Advancing and drawing the simulation
//!
//! Call [`tick`](simulation::Simulation::tick) once per frame, then use
//! [`render`](simulation::Simulation::render) to get the screen-space circles of the visible
//! bodies.
//!
//! ```
//! # use accretion::prelude::*;
//! # const DT: f64 = 1.0 / 60.0;
//! # let mut simulation = Simulation::default();
//! let camera = Camera::default();
//! let viewport = Viewport::new(1000.0, 600.0);
//!
//! simulation.tick(DT, 1);
//!
//! for circle in simulation.render(&camera, viewport) {
//!     // draw a filled circle at (circle.x, circle.y) of radius circle.radius
//! #   let _ = circle;
//! }
//! ```

#![warn(missing_docs)]

/// Bodies and the point-mass gravity they exert.
pub mod body;

/// Constants of a simulation.
pub mod config;

/// Procedural generation of accretion disks.
pub mod disk;

/// Errors returned by the crate.
pub mod error;

/// Screen-space projection of the bodies.
pub mod render;

/// Storage of the bodies and time integration.
pub mod simulation;

/// Two-dimensional vector operations.
pub mod vector;

/// Everything needed to use the crate.
pub mod prelude {
    pub use crate::body::{radius_for_mass, Body, PointMass};
    pub use crate::config::SimulationConfig;
    pub use crate::disk::{orbital_speed, AccretionDisk, Spin};
    pub use crate::render::{Camera, Circle, Transform, Viewport};
    pub use crate::simulation::Simulation;
    pub use crate::vector::{Planar, Vector2};
}
