//! Shared constants for end-to-end tests

// ============================================================================
// Sample data inserted by `TestServer::spawn_seeded`
// ============================================================================

pub const SEEDED_EMPLOYEE_COUNT: i64 = 2;
pub const SEEDED_SALES_COUNT: i64 = 2;
pub const SEEDED_REVENUE: f64 = 2050.50;
pub const SEEDED_AVERAGE_SALE: f64 = 1025.25;

/// Most recently inserted sample sale.
pub const SEEDED_LATEST_PRODUCT: &str = "Product B";

// ============================================================================
// Timeouts
// ============================================================================

/// How long to wait for a spawned server to answer `/health`.
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;

pub const REQUEST_TIMEOUT_SECS: u64 = 10;
