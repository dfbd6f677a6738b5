//! Best-effort cleanup of an account's files when the account is removed.
//!
//! Files and accounts may live in different processes, so cleanup is a
//! compensating action rather than a transaction: the account removal
//! always completes, and any file that could not be cleaned up is logged
//! and left behind.

pub mod bus;
pub mod coordinator;
pub mod listener;
pub mod local;
#[cfg(feature = "redis-events")]
pub mod redis_bus;

pub use bus::{EventPublisher, MemoryEventBus};
pub use coordinator::{CascadeReport, CascadingDeleteCoordinator};
pub use listener::CascadeListener;
pub use local::LocalCascade;
#[cfg(feature = "redis-events")]
pub use redis_bus::RedisEventBus;
