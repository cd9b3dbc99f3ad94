//! JSON API handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

use super::api_error::{ApiError, RecordKind};
use super::request_body::JsonObject;
use super::state::{GuardedDashboardStore, ServerState};
use crate::dashboard_store::{DashboardSummary, Employee, NewEmployee, NewSale, Sale, WriteError};

#[derive(Serialize)]
struct MetricsResponse {
    metrics: BTreeMap<String, f64>,
}

#[derive(Serialize)]
struct EmployeesResponse {
    employees: Vec<Employee>,
    count: usize,
}

#[derive(Serialize)]
struct SalesResponse {
    sales: Vec<Sale>,
    count: usize,
}

fn created(kind: RecordKind, result: Result<(), WriteError>) -> Result<Response, ApiError> {
    result.map_err(|err| kind.rejection(&err))?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": kind.created_message() })),
    )
        .into_response())
}

pub async fn get_dashboard(
    State(state): State<ServerState>,
) -> Result<Json<DashboardSummary>, ApiError> {
    let summary = state
        .dashboard_store
        .get_dashboard_summary(state.config.summary_includes_metrics)?;
    Ok(Json(summary))
}

pub async fn get_metrics(
    State(store): State<GuardedDashboardStore>,
) -> Result<impl IntoResponse, ApiError> {
    let metrics = store.get_all_metrics()?;
    Ok(Json(MetricsResponse { metrics }))
}

pub async fn post_metric(
    State(store): State<GuardedDashboardStore>,
    body: JsonObject,
) -> Result<Response, ApiError> {
    let name = body.required_text("name")?;
    let value = body.required_number("value")?;
    created(RecordKind::Metric, store.add_metric(&name, value))
}

pub async fn get_employees(
    State(store): State<GuardedDashboardStore>,
) -> Result<impl IntoResponse, ApiError> {
    let employees = store.get_employees()?;
    let count = employees.len();
    Ok(Json(EmployeesResponse { employees, count }))
}

pub async fn post_employee(
    State(store): State<GuardedDashboardStore>,
    body: JsonObject,
) -> Result<Response, ApiError> {
    let employee = NewEmployee {
        name: body.required_text("name")?,
        position: body.required_text("position")?,
        salary: body.required_number("salary")?,
    };
    created(RecordKind::Employee, store.add_employee(&employee))
}

pub async fn get_sales(
    State(store): State<GuardedDashboardStore>,
) -> Result<impl IntoResponse, ApiError> {
    let sales = store.get_sales()?;
    let count = sales.len();
    Ok(Json(SalesResponse { sales, count }))
}

pub async fn post_sale(
    State(store): State<GuardedDashboardStore>,
    body: JsonObject,
) -> Result<Response, ApiError> {
    let sale = NewSale {
        product: body.required_text("product")?,
        amount: body.required_number("amount")?,
        customer: body.required_text("customer")?,
    };
    created(RecordKind::Sale, store.add_sale(&sale))
}
