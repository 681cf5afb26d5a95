//! Execution Backend Adapters

pub mod simulated;

pub use simulated::{INSUFFICIENT_FUNDS, SimulatedExecutionBackend};
