use serde::Serialize;
use std::collections::BTreeMap;

/// A named business metric. One row per name; writes replace the value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
    /// RFC 3339, refreshed on every write.
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub salary: f64,
    /// RFC 3339, set once at creation.
    pub hired_date: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sale {
    pub id: i64,
    pub product: String,
    pub amount: f64,
    pub customer: String,
    /// RFC 3339, set once at creation.
    pub sale_date: String,
}

/// Input for [`super::DashboardStore::add_employee`].
#[derive(Clone, Debug)]
pub struct NewEmployee {
    pub name: String,
    pub position: String,
    pub salary: f64,
}

impl NewEmployee {
    pub fn new(name: impl Into<String>, position: impl Into<String>, salary: f64) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            salary,
        }
    }
}

/// Input for [`super::DashboardStore::add_sale`].
#[derive(Clone, Debug)]
pub struct NewSale {
    pub product: String,
    pub amount: f64,
    pub customer: String,
}

impl NewSale {
    pub fn new(product: impl Into<String>, amount: f64, customer: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            amount,
            customer: customer.into(),
        }
    }
}

/// Aggregates computed on demand from the current store contents.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_employees: i64,
    pub total_sales: i64,
    pub total_revenue: f64,
    pub average_sale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BTreeMap<String, f64>>,
}
