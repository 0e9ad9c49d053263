//! slotsage_supervisor
//!
//! Outside-world facing orchestration layer for `slotsage_core`.
//!
//! Responsibilities:
//! - own validated machine profiles, keyed by machine id
//! - sanitize raw form-field input into `Observation`s via adapters
//! - invoke the core estimator
//!
//! Non-goals:
//! - no IO (callers load JSON and hand us strings)
//! - no async
//! - no estimation policy (lives in core)

pub mod adapter;
pub mod registry;

pub use adapter::{
    BasicObservationBuilder,
    CountSanitizer,
    FieldReading,
    ObservationBuilder,
};

pub use registry::{EstimateReport, ProfileRegistry, RegistryError};
