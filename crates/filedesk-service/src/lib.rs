//! # filedesk-service
//!
//! Business logic for FileDesk. Services receive their stores, byte
//! storage and auth primitives as `Arc`s at construction time.

pub mod account;
pub mod bounded;
pub mod cascade;
pub mod context;
pub mod file;

pub use account::AccountService;
pub use cascade::{
    CascadeListener, CascadeReport, CascadingDeleteCoordinator, EventPublisher, LocalCascade,
    MemoryEventBus,
};
pub use context::Principal;
pub use file::FileService;
