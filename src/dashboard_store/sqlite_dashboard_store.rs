use super::models::{Employee, Metric, NewEmployee, NewSale, Sale};
use super::schema::DASHBOARD_SCHEMA;
use super::validation::{validate_metric, validate_new_employee, validate_new_sale};
use super::{DashboardStore, WriteError, SALES_LISTING_LIMIT};
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed store. Every operation opens its own connection and drops it
/// when done; SQLite serializes concurrent writers.
pub struct SqliteDashboardStore {
    db_path: PathBuf,
}

impl SqliteDashboardStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let store = Self {
            db_path: db_path.as_ref().to_path_buf(),
        };

        let mut conn = store
            .connect()
            .with_context(|| format!("Failed to open dashboard database {:?}", store.db_path))?;

        // Tables are created and checked in one transaction, a refused file is left as found.
        let tx = conn.transaction()?;
        let raw_version: i64 = tx.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let unstamped = raw_version == 0;
        if unstamped {
            info!("Creating dashboard tables in {:?}", store.db_path);
            DASHBOARD_SCHEMA.create_tables(&tx)?;
        } else {
            let db_version = raw_version - BASE_DB_VERSION as i64;
            if db_version != DASHBOARD_SCHEMA.version as i64 {
                bail!(
                    "Dashboard database version {} is not supported (expected {})",
                    db_version,
                    DASHBOARD_SCHEMA.version
                );
            }
        }

        DASHBOARD_SCHEMA.validate(&tx).with_context(|| {
            format!(
                "Dashboard database schema validation failed for {:?}",
                store.db_path
            )
        })?;

        if unstamped {
            DASHBOARD_SCHEMA.stamp_version(&tx)?;
        }
        tx.commit()?;

        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    fn read_connection(&self) -> Result<Connection> {
        self.connect()
            .with_context(|| format!("Failed to open dashboard database {:?}", self.db_path))
    }

    /// Runs a single write statement on a fresh connection. Storage errors are
    /// logged and handed back to the caller, never raised further.
    fn write<F>(&self, what: &str, statement: F) -> Result<(), WriteError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<usize>,
    {
        let result = self.connect().and_then(|conn| statement(&conn));
        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                warn!("Failed to add {}: {}", what, err);
                Err(WriteError::Storage(err))
            }
        }
    }

    fn format_datetime(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339()
    }

    fn row_to_metric(row: &rusqlite::Row) -> rusqlite::Result<Metric> {
        Ok(Metric {
            name: row.get("name")?,
            value: row.get("value")?,
            updated_at: row
                .get::<_, Option<String>>("updated_at")?
                .unwrap_or_default(),
        })
    }

    fn row_to_employee(row: &rusqlite::Row) -> rusqlite::Result<Employee> {
        Ok(Employee {
            id: row.get("id")?,
            name: row.get("name")?,
            position: row.get("position")?,
            salary: row.get("salary")?,
            hired_date: row
                .get::<_, Option<String>>("hired_date")?
                .unwrap_or_default(),
        })
    }

    fn row_to_sale(row: &rusqlite::Row) -> rusqlite::Result<Sale> {
        Ok(Sale {
            id: row.get("id")?,
            product: row.get("product")?,
            amount: row.get("amount")?,
            customer: row.get("customer")?,
            sale_date: row
                .get::<_, Option<String>>("sale_date")?
                .unwrap_or_default(),
        })
    }

    fn count_rows(&self, table: &str) -> Result<i64> {
        let conn = self.read_connection()?;
        let count = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }
}

impl DashboardStore for SqliteDashboardStore {
    fn add_metric(&self, name: &str, value: f64) -> Result<(), WriteError> {
        if let Err(err) = validate_metric(name, value) {
            debug!("Rejected metric {:?}: {}", name, err);
            return Err(err.into());
        }
        let now = Self::format_datetime(&Utc::now());

        self.write("metric", |conn| {
            conn.execute(
                "INSERT INTO metrics (name, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(name) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![name, value, now],
            )
        })?;
        debug!("Metric {} set to {}", name, value);
        Ok(())
    }

    fn get_metric(&self, name: &str) -> Result<Option<f64>> {
        let conn = self.read_connection()?;
        let value = conn
            .query_row(
                "SELECT value FROM metrics WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn get_all_metrics(&self) -> Result<BTreeMap<String, f64>> {
        let conn = self.read_connection()?;
        let mut stmt = conn.prepare("SELECT name, value FROM metrics")?;
        let metrics = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<BTreeMap<String, f64>>>()?;
        Ok(metrics)
    }

    fn get_metric_entries(&self) -> Result<Vec<Metric>> {
        let conn = self.read_connection()?;
        let mut stmt = conn.prepare("SELECT name, value, updated_at FROM metrics ORDER BY name")?;
        let metrics = stmt
            .query_map([], Self::row_to_metric)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(metrics)
    }

    fn add_employee(&self, employee: &NewEmployee) -> Result<(), WriteError> {
        if let Err(err) = validate_new_employee(employee) {
            debug!("Rejected employee {:?}: {}", employee.name, err);
            return Err(err.into());
        }
        let now = Self::format_datetime(&Utc::now());

        self.write("employee", |conn| {
            conn.execute(
                "INSERT INTO employees (name, position, salary, hired_date)
                 VALUES (?1, ?2, ?3, ?4)",
                params![employee.name, employee.position, employee.salary, now],
            )
        })?;
        debug!("Added employee {} ({})", employee.name, employee.position);
        Ok(())
    }

    fn get_employees(&self) -> Result<Vec<Employee>> {
        let conn = self.read_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, position, salary, hired_date FROM employees ORDER BY id DESC",
        )?;
        let employees = stmt
            .query_map([], Self::row_to_employee)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(employees)
    }

    fn get_employee_count(&self) -> Result<i64> {
        self.count_rows("employees")
    }

    fn add_sale(&self, sale: &NewSale) -> Result<(), WriteError> {
        if let Err(err) = validate_new_sale(sale) {
            debug!("Rejected sale of {:?}: {}", sale.product, err);
            return Err(err.into());
        }
        let now = Self::format_datetime(&Utc::now());

        self.write("sale", |conn| {
            conn.execute(
                "INSERT INTO sales (product, amount, customer, sale_date)
                 VALUES (?1, ?2, ?3, ?4)",
                params![sale.product, sale.amount, sale.customer, now],
            )
        })?;
        debug!("Recorded sale of {} to {}", sale.product, sale.customer);
        Ok(())
    }

    fn get_sales(&self) -> Result<Vec<Sale>> {
        let conn = self.read_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, product, amount, customer, sale_date FROM sales
             ORDER BY id DESC LIMIT ?1",
        )?;
        let sales = stmt
            .query_map(params![SALES_LISTING_LIMIT as i64], Self::row_to_sale)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sales)
    }

    fn get_sales_count(&self) -> Result<i64> {
        self.count_rows("sales")
    }

    fn get_total_revenue(&self) -> Result<f64> {
        let conn = self.read_connection()?;
        let total = conn.query_row("SELECT COALESCE(SUM(amount), 0.0) FROM sales", [], |row| {
            row.get(0)
        })?;
        Ok(total)
    }

    fn get_average_sale(&self) -> Result<f64> {
        let conn = self.read_connection()?;
        let average: Option<f64> =
            conn.query_row("SELECT AVG(amount) FROM sales", [], |row| row.get(0))?;
        Ok(average.unwrap_or(0.0))
    }
}
