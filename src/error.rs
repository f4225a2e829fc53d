use thiserror::Error;

/// Result type returned by fallible operations of this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when the simulation is given values it cannot work with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A [`SimulationConfig`](crate::config::SimulationConfig) field is not finite or not positive.
    #[error("invalid simulation config: `{field}` must be finite and positive, got {value}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Value that was rejected.
        value: f64,
    },

    /// A body was rejected by [`Simulation::add_body`](crate::simulation::Simulation::add_body).
    #[error("invalid body: {reason}")]
    InvalidBody {
        /// What is wrong with the body.
        reason: String,
    },

    /// An [`AccretionDisk`](crate::disk::AccretionDisk) cannot be generated.
    #[error("invalid accretion disk: {reason}")]
    InvalidDisk {
        /// What is wrong with the disk.
        reason: String,
    },
}
