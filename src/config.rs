use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Global constants of a [`Simulation`](crate::simulation::Simulation).
///
/// The values are fixed once the simulation is created. Missing fields fall back to their
/// [`Default`] value when deserializing.
///
/// ```
/// # use accretion::prelude::*;
/// let config = SimulationConfig {
///     gravitational_constant: 6.67,
///     ..Default::default()
/// };
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_force, 500.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gravitational constant `G` multiplying every pairwise force.
    pub gravitational_constant: f64,
    /// Divisor applied to separations before computing forces.
    pub distance_scale: f64,
    /// Maximum magnitude of a body's acceleration.
    pub max_force: f64,
    /// Maximum magnitude of a body's velocity.
    pub max_velocity: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 66.7,
            distance_scale: 1.0,
            max_force: 500.0,
            max_velocity: 1000.0,
        }
    }
}

impl SimulationConfig {
    /// Checks that every constant is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("gravitational_constant", self.gravitational_constant),
            ("distance_scale", self.distance_scale),
            ("max_force", self.max_force),
            ("max_velocity", self.max_velocity),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig { field, value });
            }
        }

        Ok(())
    }
}
