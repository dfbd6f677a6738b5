//! # filedesk-entity
//!
//! Domain entity models for FileDesk. Every struct in this crate is either
//! a database row or a value object derived from one. Row types derive
//! `sqlx::FromRow`.

pub mod account;
pub mod file;
