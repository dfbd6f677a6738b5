//! Account registration, login, listing, and removal.

pub mod service;

pub use service::{AccountService, Registration};
