//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the application layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for collaborators
//!   - `execution/`: Simulated execution backend
//!   - `identity/`: Static identity resolver
//!   - `signals/`: In-memory signal evaluator registry
//!   - `persistence/`: In-memory dedup store and rule repository
//!
//! - **Driver Adapters (Inbound)**: Expose application to external world
//!   - `http/`: REST API controllers
//!
//! - **Wiring**
//!   - `config/`: Dependency injection container

pub mod config;
pub mod execution;
pub mod http;
pub mod identity;
pub mod persistence;
pub mod signals;
