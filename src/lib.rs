//! Business dashboard server library.
//!
//! Exposes the store, configuration and HTTP layers so the binary and the
//! end-to-end tests share one wiring.

pub mod config;
pub mod dashboard_store;
pub mod server;
pub mod sqlite_persistence;

pub use dashboard_store::{DashboardStore, SqliteDashboardStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
