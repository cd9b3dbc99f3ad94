//! Server-rendered HTML pages built from the same data the JSON API serves.

use axum::{extract::State, response::Html};
use chrono::DateTime;
use std::fmt::Write;

use super::api_error::ApiError;
use super::state::{GuardedDashboardStore, ServerState};
use crate::dashboard_store::{DashboardSummary, Employee, Metric, Sale};

pub const DASHBOARD_TITLE: &str = "Business Management Dashboard";

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;color:#222}\
nav a{margin-right:1rem}\
.cards{display:flex;gap:1rem;margin:1rem 0}\
.card{border:1px solid #ccc;border-radius:6px;padding:1rem;min-width:10rem}\
.card .value{font-size:1.5rem;font-weight:bold}\
table{border-collapse:collapse;margin-bottom:2rem}\
th,td{border:1px solid #ddd;padding:.4rem .8rem;text-align:left}\
td.num{text-align:right}";

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

fn format_timestamp(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

fn page(title: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n\
         <nav><a href=\"/\">Dashboard</a><a href=\"/employees\">Employees</a><a href=\"/sales\">Sales</a></nav>\n\
         {content}</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn summary_cards(out: &mut String, summary: &DashboardSummary) {
    let cards = [
        ("Employees", summary.total_employees.to_string()),
        ("Sales", summary.total_sales.to_string()),
        ("Total Revenue", format_amount(summary.total_revenue)),
        ("Average Sale", format_amount(summary.average_sale)),
    ];
    out.push_str("<div class=\"cards\">\n");
    for (label, value) in cards {
        let _ = writeln!(
            out,
            "<div class=\"card\"><div>{}</div><div class=\"value\">{}</div></div>",
            label, value
        );
    }
    out.push_str("</div>\n");
}

fn metrics_table(out: &mut String, metrics: &[Metric]) {
    out.push_str("<h2>Metrics</h2>\n");
    if metrics.is_empty() {
        out.push_str("<p>No metrics recorded.</p>\n");
        return;
    }
    out.push_str("<table>\n<tr><th>Name</th><th>Value</th><th>Updated</th></tr>\n");
    for metric in metrics {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td class=\"num\">{}</td><td>{}</td></tr>",
            escape_html(&metric.name),
            metric.value,
            escape_html(&format_timestamp(&metric.updated_at)),
        );
    }
    out.push_str("</table>\n");
}

fn employees_table(out: &mut String, employees: &[Employee]) {
    let _ = writeln!(out, "<h2>Employees ({})</h2>", employees.len());
    if employees.is_empty() {
        out.push_str("<p>No employees yet.</p>\n");
        return;
    }
    out.push_str(
        "<table>\n<tr><th>ID</th><th>Name</th><th>Position</th><th>Salary</th><th>Hired</th></tr>\n",
    );
    for employee in employees {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">{}</td><td>{}</td></tr>",
            employee.id,
            escape_html(&employee.name),
            escape_html(&employee.position),
            format_amount(employee.salary),
            escape_html(&format_timestamp(&employee.hired_date)),
        );
    }
    out.push_str("</table>\n");
}

fn sales_table(out: &mut String, sales: &[Sale]) {
    let _ = writeln!(out, "<h2>Recent Sales ({})</h2>", sales.len());
    if sales.is_empty() {
        out.push_str("<p>No sales yet.</p>\n");
        return;
    }
    out.push_str(
        "<table>\n<tr><th>ID</th><th>Product</th><th>Amount</th><th>Customer</th><th>Date</th></tr>\n",
    );
    for sale in sales {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td>{}</td><td>{}</td></tr>",
            sale.id,
            escape_html(&sale.product),
            format_amount(sale.amount),
            escape_html(&sale.customer),
            escape_html(&format_timestamp(&sale.sale_date)),
        );
    }
    out.push_str("</table>\n");
}

pub fn render_dashboard(
    summary: &DashboardSummary,
    metrics: Option<&[Metric]>,
    employees: &[Employee],
    sales: &[Sale],
) -> String {
    let mut content = String::new();
    summary_cards(&mut content, summary);
    if let Some(metrics) = metrics {
        metrics_table(&mut content, metrics);
    }
    employees_table(&mut content, employees);
    sales_table(&mut content, sales);
    page(DASHBOARD_TITLE, &content)
}

pub fn render_employees(employees: &[Employee]) -> String {
    let mut content = String::new();
    employees_table(&mut content, employees);
    page("Employees", &content)
}

pub fn render_sales(summary: &DashboardSummary, sales: &[Sale]) -> String {
    let mut content = String::new();
    summary_cards(&mut content, summary);
    sales_table(&mut content, sales);
    page("Sales", &content)
}

pub async fn dashboard_page(State(state): State<ServerState>) -> Result<Html<String>, ApiError> {
    let store = &state.dashboard_store;
    let include_metrics = state.config.summary_includes_metrics;

    let summary = store.get_dashboard_summary(include_metrics)?;
    let metrics = if include_metrics {
        Some(store.get_metric_entries()?)
    } else {
        None
    };
    let employees = store.get_employees()?;
    let sales = store.get_sales()?;

    Ok(Html(render_dashboard(
        &summary,
        metrics.as_deref(),
        &employees,
        &sales,
    )))
}

pub async fn employees_page(
    State(store): State<GuardedDashboardStore>,
) -> Result<Html<String>, ApiError> {
    let employees = store.get_employees()?;
    Ok(Html(render_employees(&employees)))
}

pub async fn sales_page(
    State(store): State<GuardedDashboardStore>,
) -> Result<Html<String>, ApiError> {
    let summary = store.get_dashboard_summary(false)?;
    let sales = store.get_sales()?;
    Ok(Html(render_sales(&summary, &sales)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> DashboardSummary {
        DashboardSummary {
            total_employees: 1,
            total_sales: 1,
            total_revenue: 1200.5,
            average_sale: 1200.5,
            metrics: None,
        }
    }

    fn employee(name: &str) -> Employee {
        Employee {
            id: 1,
            name: name.to_string(),
            position: "Engineer".to_string(),
            salary: 90000.0,
            hired_date: "2024-01-15T10:30:00+00:00".to_string(),
        }
    }

    fn sale() -> Sale {
        Sale {
            id: 7,
            product: "Product X".to_string(),
            amount: 1200.5,
            customer: "Client A".to_string(),
            sale_date: "2024-01-15T10:30:00+00:00".to_string(),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn dashboard_contains_title_and_rows() {
        let metrics = vec![Metric {
            name: "monthly_growth".to_string(),
            value: 12.5,
            updated_at: "2024-01-15T10:30:00+00:00".to_string(),
        }];
        let html = render_dashboard(
            &summary(),
            Some(metrics.as_slice()),
            &[employee("Alice")],
            &[sale()],
        );

        assert!(html.contains(DASHBOARD_TITLE));
        assert!(html.contains("monthly_growth"));
        assert!(html.contains("<td>Alice</td>"));
        assert!(html.contains("<td>Product X</td>"));
        assert!(html.contains("1200.50"));
        assert!(html.contains("2024-01-15 10:30"));
    }

    #[test]
    fn dashboard_without_metrics_omits_section() {
        let html = render_dashboard(&summary(), None, &[], &[]);

        assert!(!html.contains("<h2>Metrics</h2>"));
        assert!(html.contains("No employees yet."));
        assert!(html.contains("No sales yet."));
    }

    #[test]
    fn user_text_is_escaped() {
        let html = render_employees(&[employee("<script>alert(1)</script>")]);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn unparseable_timestamp_is_shown_verbatim() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn sales_page_shows_totals() {
        let html = render_sales(&summary(), &[sale()]);

        assert!(html.contains("<title>Sales</title>"));
        assert!(html.contains("Recent Sales (1)"));
        assert!(html.contains("Total Revenue"));
    }
}
