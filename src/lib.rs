#![forbid(unsafe_code)]

//! TaskBuddy backend library.
//!
//! Task CRUD with a per-task append-only activity log, owner-scoped
//! listing, multi-criteria filtering, best-effort bulk status updates,
//! and image attachment storage, exposed over a JSON HTTP API.

pub mod config;
pub mod errors;
pub mod filter;
pub mod http;
pub mod models;
pub mod persistence;
pub mod store;
pub mod uploads;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
