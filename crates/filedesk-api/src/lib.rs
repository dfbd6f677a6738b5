//! # filedesk-api
//!
//! HTTP API layer for FileDesk built on Axum.
//!
//! Provides the users and files service routers, the gateway router that
//! mounts both, the access gate middleware, extractors, DTOs and the
//! error-to-response mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{ServiceKind, Stores, build_files_state, build_users_state, run};
pub use router::{files_router, gateway_router, users_router};
pub use state::{FilesState, UsersState};
