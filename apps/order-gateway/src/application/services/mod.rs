//! Application Services
//!
//! Application services coordinate domain logic and infrastructure adapters.
//! They are composed by use cases rather than called from the HTTP layer.

mod keyed_lock;
mod order_router;

pub use keyed_lock::{KeyedLockGuard, KeyedLocks};
pub use order_router::{OrderRouter, RoutingError};
