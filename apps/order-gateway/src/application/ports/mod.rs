//! Application Ports (Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! Adapters live in the infrastructure layer.

mod execution_backend_port;
mod identity_port;
mod signal_evaluator_port;

pub use execution_backend_port::{BackendError, ExecutionBackendPort, ExecutionReceipt};
pub use identity_port::{IdentityError, IdentityResolverPort};
pub use signal_evaluator_port::{EvaluatorError, SignalEvaluatorPort};

#[cfg(test)]
pub use identity_port::MockIdentityResolverPort;
#[cfg(test)]
pub use signal_evaluator_port::MockSignalEvaluatorPort;
