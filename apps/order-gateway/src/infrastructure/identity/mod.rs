//! Identity Resolver Adapters

pub mod static_resolver;

pub use static_resolver::StaticIdentityResolver;
