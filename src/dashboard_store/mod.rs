mod models;
mod schema;
pub mod seed;
mod sqlite_dashboard_store;
pub mod validation;

pub use models::*;
pub use schema::DASHBOARD_SCHEMA;
pub use sqlite_dashboard_store::SqliteDashboardStore;
pub use validation::ValidationError;

use anyhow::Result;
use std::collections::BTreeMap;

/// Maximum number of sales returned by [`DashboardStore::get_sales`].
pub const SALES_LISTING_LIMIT: usize = 100;

/// Why a write did not happen. Either way nothing was persisted.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("invalid record: {0}")]
    Invalid(#[from] ValidationError),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub trait DashboardStore: Send + Sync {
    // Metrics
    fn add_metric(&self, name: &str, value: f64) -> Result<(), WriteError>;
    fn get_metric(&self, name: &str) -> Result<Option<f64>>;
    fn get_all_metrics(&self) -> Result<BTreeMap<String, f64>>;
    fn get_metric_entries(&self) -> Result<Vec<Metric>>;

    // Employees
    fn add_employee(&self, employee: &NewEmployee) -> Result<(), WriteError>;
    fn get_employees(&self) -> Result<Vec<Employee>>;
    fn get_employee_count(&self) -> Result<i64>;

    // Sales
    fn add_sale(&self, sale: &NewSale) -> Result<(), WriteError>;
    /// The most recent [`SALES_LISTING_LIMIT`] sales, newest first.
    fn get_sales(&self) -> Result<Vec<Sale>>;
    fn get_sales_count(&self) -> Result<i64>;
    fn get_total_revenue(&self) -> Result<f64>;
    fn get_average_sale(&self) -> Result<f64>;

    fn get_dashboard_summary(&self, include_metrics: bool) -> Result<DashboardSummary> {
        let metrics = if include_metrics {
            Some(self.get_all_metrics()?)
        } else {
            None
        };
        Ok(DashboardSummary {
            total_employees: self.get_employee_count()?,
            total_sales: self.get_sales_count()?,
            total_revenue: self.get_total_revenue()?,
            average_sale: self.get_average_sale()?,
            metrics,
        })
    }
}
