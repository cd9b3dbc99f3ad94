//! SQLite schema definitions for the dashboard database.
//!
//! Three independent tables, no foreign keys between them.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

const CURRENT_TIMESTAMP: Option<&str> = Some("CURRENT_TIMESTAMP");

/// Metrics table - one row per metric name, upserted on write
const METRICS_TABLE_V1: Table = Table {
    name: "metrics",
    columns: &[
        sqlite_column!("name", &SqlType::Text, is_primary_key = true),
        sqlite_column!("value", &SqlType::Real, non_null = true),
        sqlite_column!(
            "updated_at",
            &SqlType::Timestamp,
            default_value = CURRENT_TIMESTAMP
        ),
    ],
};

/// Employees table - append-only
const EMPLOYEES_TABLE_V1: Table = Table {
    name: "employees",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_autoincrement = true
        ),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("position", &SqlType::Text, non_null = true),
        sqlite_column!("salary", &SqlType::Real, non_null = true),
        sqlite_column!(
            "hired_date",
            &SqlType::Timestamp,
            default_value = CURRENT_TIMESTAMP
        ),
    ],
};

/// Sales table - append-only
const SALES_TABLE_V1: Table = Table {
    name: "sales",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_autoincrement = true
        ),
        sqlite_column!("product", &SqlType::Text, non_null = true),
        sqlite_column!("amount", &SqlType::Real, non_null = true),
        sqlite_column!("customer", &SqlType::Text, non_null = true),
        sqlite_column!(
            "sale_date",
            &SqlType::Timestamp,
            default_value = CURRENT_TIMESTAMP
        ),
    ],
};

pub const DASHBOARD_SCHEMA: VersionedSchema = VersionedSchema {
    version: 1,
    tables: &[METRICS_TABLE_V1, EMPLOYEES_TABLE_V1, SALES_TABLE_V1],
};
