//! Infrastructure adapters: artifact persistence, document output and telemetry.

pub mod artifacts;
pub mod error;
pub mod output;
pub mod telemetry;
