//! Validation for dashboard records.
//!
//! Every write goes through these checks before touching the database, so a
//! rejected record never produces a row.

use super::models::{NewEmployee, NewSale};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyField { field: &'static str },
    NotFinite { field: &'static str },
    NegativeValue { field: &'static str, value: f64 },
    NonPositiveValue { field: &'static str, value: f64 },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::NotFinite { field }
            | ValidationError::NegativeValue { field, .. }
            | ValidationError::NonPositiveValue { field, .. } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "Field '{}' is required but was empty", field)
            }
            ValidationError::NotFinite { field } => {
                write!(f, "Field '{}' must be a finite number", field)
            }
            ValidationError::NegativeValue { field, value } => {
                write!(f, "Field '{}' must be non-negative, got {}", field, value)
            }
            ValidationError::NonPositiveValue { field, value } => {
                write!(f, "Field '{}' must be positive, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, ValidationError>;

fn require_text(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

fn require_finite(field: &'static str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    Ok(())
}

pub fn validate_metric(name: &str, value: f64) -> ValidationResult<()> {
    require_text("name", name)?;
    require_finite("value", value)
}

pub fn validate_new_employee(employee: &NewEmployee) -> ValidationResult<()> {
    require_text("name", &employee.name)?;
    require_text("position", &employee.position)?;
    require_finite("salary", employee.salary)?;
    if employee.salary < 0.0 {
        return Err(ValidationError::NegativeValue {
            field: "salary",
            value: employee.salary,
        });
    }
    Ok(())
}

pub fn validate_new_sale(sale: &NewSale) -> ValidationResult<()> {
    require_text("product", &sale.product)?;
    require_text("customer", &sale.customer)?;
    require_finite("amount", sale.amount)?;
    if sale.amount <= 0.0 {
        return Err(ValidationError::NonPositiveValue {
            field: "amount",
            value: sale.amount,
        });
    }
    Ok(())
}
