//! Dashboard module
//!
//! Summarises items for the dashboard: totals per category, overall income
//! versus expenses and a month-by-month trend. All three can be restricted to
//! a single user.

mod aggregation;
mod handlers;
mod queries;

pub use aggregation::{DashboardData, DashboardSection, get_dashboard_data};
pub use handlers::get_dashboard_data_endpoint;
pub use queries::{CategoryTotal, IncomeVsExpenses, MonthlyTotal};
