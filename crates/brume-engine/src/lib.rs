//! Simulation loop for the Brume particle simulator.
//!
//! [`BdSimulator`] owns a particle space, a reaction model, and a random
//! source, and advances them in fixed Brownian-dynamics steps. Observers
//! record species counts at scheduled times or after every step; their
//! firings are ordered against the stepping with an
//! [`EventScheduler`](brume_queue::EventScheduler).
//!
//! Configuration is validated up front by
//! [`SimulatorConfig::validate`]; runtime failures surface as
//! [`SimulationError`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod simulator;

pub use config::{determine_dt, ConfigError, SimulatorConfig};
pub use error::SimulationError;
pub use metrics::StepMetrics;
pub use observer::{FixedIntervalNumberObserver, NumberObserver, Observer};
pub use simulator::BdSimulator;
