//! Sample data written on the first start of an empty dashboard.

use super::{DashboardStore, NewEmployee, NewSale};
use anyhow::Result;
use tracing::{info, warn};

pub const SAMPLE_METRICS: &[(&str, f64)] =
    &[("customer_satisfaction", 4.5), ("monthly_growth", 12.5)];

pub const SAMPLE_EMPLOYEES: &[(&str, &str, f64)] = &[
    ("John Doe", "Manager", 75000.0),
    ("Jane Smith", "Developer", 85000.0),
];

pub const SAMPLE_SALES: &[(&str, f64, &str)] = &[
    ("Product A", 1200.50, "Acme Corp"),
    ("Product B", 850.00, "Tech Industries"),
];

/// Seeds the sample data when there are no employees yet.
///
/// Returns whether seeding happened. Individual failed writes are logged and
/// skipped.
pub fn seed_if_empty(store: &dyn DashboardStore) -> Result<bool> {
    if store.get_employee_count()? > 0 {
        return Ok(false);
    }

    info!("Empty dashboard, inserting sample data");
    for (name, value) in SAMPLE_METRICS {
        if let Err(err) = store.add_metric(name, *value) {
            warn!("Could not seed metric {}: {}", name, err);
        }
    }
    for (name, position, salary) in SAMPLE_EMPLOYEES {
        if let Err(err) = store.add_employee(&NewEmployee::new(*name, *position, *salary)) {
            warn!("Could not seed employee {}: {}", name, err);
        }
    }
    for (product, amount, customer) in SAMPLE_SALES {
        if let Err(err) = store.add_sale(&NewSale::new(*product, *amount, *customer)) {
            warn!("Could not seed sale of {}: {}", product, err);
        }
    }
    Ok(true)
}
