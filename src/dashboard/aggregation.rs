//! Combines the dashboard aggregates into a single response.

use std::fmt::Display;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error, UserFilter,
    dashboard::queries::{
        CategoryTotal, IncomeVsExpenses, MonthlyTotal, category_totals, monthly_trend,
        overall_totals,
    },
};

/// Everything the dashboard shows, computed from one consistent snapshot of the items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// Expenses and income per category.
    pub categories: Vec<CategoryTotal>,
    /// Overall expenses and income.
    pub income_vs_expenses: IncomeVsExpenses,
    /// Expenses and income per month, oldest first.
    pub monthly: Vec<MonthlyTotal>,
}

/// The parts of the dashboard, named as they appear in [DashboardData]'s JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardSection {
    /// The per-category totals.
    Categories,
    /// The overall totals.
    IncomeVsExpenses,
    /// The per-month totals.
    Monthly,
}

impl Display for DashboardSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DashboardSection::Categories => "categories",
            DashboardSection::IncomeVsExpenses => "incomeVsExpenses",
            DashboardSection::Monthly => "monthly",
        };

        write!(f, "{name}")
    }
}

/// Run the three dashboard aggregates for the items matching `filter`.
///
/// The aggregates are read inside a single transaction so that they agree
/// with each other.
///
/// # Errors
/// Returns an [Error::DashboardQuery] naming the first section whose query
/// failed, in which case no partial data is returned.
pub fn get_dashboard_data(
    filter: UserFilter,
    connection: &Connection,
) -> Result<DashboardData, Error> {
    let transaction = connection.unchecked_transaction()?;

    let categories =
        category_totals(filter, &transaction).map_err(|source| Error::DashboardQuery {
            section: DashboardSection::Categories,
            source,
        })?;

    let income_vs_expenses =
        overall_totals(filter, &transaction).map_err(|source| Error::DashboardQuery {
            section: DashboardSection::IncomeVsExpenses,
            source,
        })?;

    let monthly = monthly_trend(filter, &transaction).map_err(|source| Error::DashboardQuery {
        section: DashboardSection::Monthly,
        source,
    })?;

    transaction.commit()?;

    Ok(DashboardData {
        categories,
        income_vs_expenses,
        monthly,
    })
}
