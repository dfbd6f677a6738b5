//! Custom Axum extractors.

pub mod json;
pub mod path;
pub mod principal;

pub use json::AppJson;
pub use principal::AuthPrincipal;
