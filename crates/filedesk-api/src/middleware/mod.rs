//! Request middleware.

pub mod cors;
pub mod gate;
pub mod logging;
pub mod timeout;
