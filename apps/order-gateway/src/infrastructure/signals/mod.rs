//! Signal Evaluator Adapters

pub mod registry;

pub use registry::InMemorySignalRegistry;
