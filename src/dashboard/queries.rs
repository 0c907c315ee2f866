//! Database queries for the dashboard aggregates.
//!
//! Expenses are the summed cost of debit items and income is the summed cost
//! of credit items. The queries return [rusqlite::Error] so that the caller can
//! record which part of the dashboard failed.

use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};

use crate::UserFilter;

/// The expenses and income recorded under a single category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The name of the category.
    pub category: String,
    /// The total cost of debit items in the category.
    pub expenses: f64,
    /// The total cost of credit items in the category.
    pub income: f64,
}

/// The overall expenses and income.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeVsExpenses {
    /// The total cost of all debit items.
    pub expenses: f64,
    /// The total cost of all credit items.
    pub income: f64,
}

/// The expenses and income recorded in a calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// The two-digit month, e.g. "01" for January.
    pub month: String,
    /// The four-digit year, e.g. "2024".
    pub year: String,
    /// The total cost of debit items created in the month.
    pub expenses: f64,
    /// The total cost of credit items created in the month.
    pub income: f64,
}

/// Sum expenses and income per category, ordered by category name.
///
/// Categories without any matching items are left out.
pub(super) fn category_totals(
    filter: UserFilter,
    connection: &Connection,
) -> Result<Vec<CategoryTotal>, rusqlite::Error> {
    connection
        .prepare(
            "SELECT
                c.name AS category,
                SUM(CASE WHEN i.type = 'debit' THEN i.cost ELSE 0.0 END) AS expenses,
                SUM(CASE WHEN i.type = 'credit' THEN i.cost ELSE 0.0 END) AS income
            FROM item i
            INNER JOIN category c ON c.id = i.category_id
            WHERE :user_id IS NULL OR i.user_id = :user_id
            GROUP BY c.id, c.name
            ORDER BY c.name ASC",
        )?
        .query_map(named_params! { ":user_id": filter.user_id }, |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                expenses: row.get(1)?,
                income: row.get(2)?,
            })
        })?
        .collect()
}

/// Sum expenses and income over every matching item.
///
/// Both totals are zero when there are no matching items.
pub(super) fn overall_totals(
    filter: UserFilter,
    connection: &Connection,
) -> Result<IncomeVsExpenses, rusqlite::Error> {
    connection
        .prepare(
            "SELECT
                COALESCE(SUM(CASE WHEN i.type = 'debit' THEN i.cost ELSE 0.0 END), 0.0) AS expenses,
                COALESCE(SUM(CASE WHEN i.type = 'credit' THEN i.cost ELSE 0.0 END), 0.0) AS income
            FROM item i
            WHERE :user_id IS NULL OR i.user_id = :user_id",
        )?
        .query_one(named_params! { ":user_id": filter.user_id }, |row| {
            Ok(IncomeVsExpenses {
                expenses: row.get(0)?,
                income: row.get(1)?,
            })
        })
}

/// Sum expenses and income per calendar month of the items' creation time,
/// in chronological order.
pub(super) fn monthly_trend(
    filter: UserFilter,
    connection: &Connection,
) -> Result<Vec<MonthlyTotal>, rusqlite::Error> {
    connection
        .prepare(
            "SELECT
                strftime('%m', i.created_at) AS month,
                strftime('%Y', i.created_at) AS year,
                SUM(CASE WHEN i.type = 'debit' THEN i.cost ELSE 0.0 END) AS expenses,
                SUM(CASE WHEN i.type = 'credit' THEN i.cost ELSE 0.0 END) AS income
            FROM item i
            WHERE :user_id IS NULL OR i.user_id = :user_id
            GROUP BY year, month
            ORDER BY year ASC, month ASC",
        )?
        .query_map(named_params! { ":user_id": filter.user_id }, |row| {
            Ok(MonthlyTotal {
                month: row.get(0)?,
                year: row.get(1)?,
                expenses: row.get(2)?,
                income: row.get(3)?,
            })
        })?
        .collect()
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::{OffsetDateTime, macros::datetime};

    use super::{
        CategoryTotal, IncomeVsExpenses, MonthlyTotal, category_totals, overall_totals,
        monthly_trend,
    };
    use crate::{
        CategoryId, UserFilter, UserId,
        category::{CategoryName, create_category},
        db::initialize,
        item::{Item, ItemType, create_item},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn create_test_category(name: &str, conn: &Connection) -> CategoryId {
        create_category(CategoryName::new_unchecked(name), conn)
            .expect("Could not create test category")
            .id
    }

    fn insert(
        cost: f64,
        type_: ItemType,
        category_id: CategoryId,
        user_id: UserId,
        created_at: OffsetDateTime,
        conn: &Connection,
    ) {
        create_item(
            Item::build("test", cost, type_, category_id, user_id).created_at(created_at),
            conn,
        )
        .expect("Could not create test item");
    }

    #[test]
    fn empty_store_has_no_category_totals() {
        let conn = get_test_connection();
        create_test_category("Food", &conn);

        let totals = category_totals(UserFilter::all(), &conn).unwrap();

        assert!(totals.is_empty());
    }

    #[test]
    fn empty_store_has_zero_income_and_expenses() {
        let conn = get_test_connection();

        let totals = overall_totals(UserFilter::all(), &conn).unwrap();

        assert_eq!(
            totals,
            IncomeVsExpenses {
                expenses: 0.0,
                income: 0.0
            }
        );
    }

    #[test]
    fn empty_store_has_no_monthly_totals() {
        let conn = get_test_connection();

        let totals = monthly_trend(UserFilter::all(), &conn).unwrap();

        assert!(totals.is_empty());
    }

    #[test]
    fn sums_debits_and_credits_per_category() {
        let conn = get_test_connection();
        let food = create_test_category("Food", &conn);
        let salary = create_test_category("Salary", &conn);
        let date = datetime!(2024-01-15 10:00 UTC);
        insert(5.0, ItemType::Debit, food, 1, date, &conn);
        insert(2000.0, ItemType::Credit, salary, 1, date, &conn);

        let totals = category_totals(UserFilter::all(), &conn).unwrap();

        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: "Food".to_owned(),
                    expenses: 5.0,
                    income: 0.0
                },
                CategoryTotal {
                    category: "Salary".to_owned(),
                    expenses: 0.0,
                    income: 2000.0
                },
            ]
        );
    }

    #[test]
    fn category_with_both_types_reports_both_sums() {
        let conn = get_test_connection();
        let misc = create_test_category("Misc", &conn);
        let date = datetime!(2024-01-15 10:00 UTC);
        insert(30.0, ItemType::Debit, misc, 1, date, &conn);
        insert(12.5, ItemType::Debit, misc, 1, date, &conn);
        insert(10.0, ItemType::Credit, misc, 1, date, &conn);

        let totals = category_totals(UserFilter::all(), &conn).unwrap();

        assert_eq!(
            totals,
            vec![CategoryTotal {
                category: "Misc".to_owned(),
                expenses: 42.5,
                income: 10.0
            }]
        );
    }

    #[test]
    fn income_vs_expenses_sums_by_type() {
        let conn = get_test_connection();
        let food = create_test_category("Food", &conn);
        let salary = create_test_category("Salary", &conn);
        let date = datetime!(2024-01-15 10:00 UTC);
        insert(5.0, ItemType::Debit, food, 1, date, &conn);
        insert(20.0, ItemType::Debit, food, 1, date, &conn);
        insert(2000.0, ItemType::Credit, salary, 1, date, &conn);

        let totals = overall_totals(UserFilter::all(), &conn).unwrap();

        assert_eq!(
            totals,
            IncomeVsExpenses {
                expenses: 25.0,
                income: 2000.0
            }
        );
    }

    #[test]
    fn items_in_same_month_share_a_bucket() {
        let conn = get_test_connection();
        let food = create_test_category("Food", &conn);
        insert(5.0, ItemType::Debit, food, 1, datetime!(2024-01-01 00:00 UTC), &conn);
        insert(7.0, ItemType::Debit, food, 1, datetime!(2024-01-31 23:59 UTC), &conn);
        insert(100.0, ItemType::Credit, food, 1, datetime!(2024-01-15 12:00 UTC), &conn);

        let totals = monthly_trend(UserFilter::all(), &conn).unwrap();

        assert_eq!(
            totals,
            vec![MonthlyTotal {
                month: "01".to_owned(),
                year: "2024".to_owned(),
                expenses: 12.0,
                income: 100.0
            }]
        );
    }

    #[test]
    fn monthly_totals_are_in_chronological_order() {
        let conn = get_test_connection();
        let food = create_test_category("Food", &conn);
        insert(1.0, ItemType::Debit, food, 1, datetime!(2024-01-10 09:00 UTC), &conn);
        insert(2.0, ItemType::Debit, food, 1, datetime!(2023-12-10 09:00 UTC), &conn);
        insert(3.0, ItemType::Debit, food, 1, datetime!(2023-02-10 09:00 UTC), &conn);

        let totals = monthly_trend(UserFilter::all(), &conn).unwrap();

        let buckets: Vec<(&str, &str)> = totals
            .iter()
            .map(|total| (total.year.as_str(), total.month.as_str()))
            .collect();
        assert_eq!(
            buckets,
            vec![("2023", "02"), ("2023", "12"), ("2024", "01")]
        );
    }

    #[test]
    fn aggregates_respect_user_filter() {
        let conn = get_test_connection();
        let food = create_test_category("Food", &conn);
        let rent = create_test_category("Rent", &conn);
        let date = datetime!(2024-05-05 10:00 UTC);
        insert(5.0, ItemType::Debit, food, 1, date, &conn);
        insert(900.0, ItemType::Debit, rent, 2, date, &conn);

        let categories = category_totals(UserFilter::user(1), &conn).unwrap();
        let overall = overall_totals(UserFilter::user(1), &conn).unwrap();
        let monthly = monthly_trend(UserFilter::user(1), &conn).unwrap();

        assert_eq!(
            categories,
            vec![CategoryTotal {
                category: "Food".to_owned(),
                expenses: 5.0,
                income: 0.0
            }]
        );
        assert_eq!(
            overall,
            IncomeVsExpenses {
                expenses: 5.0,
                income: 0.0
            }
        );
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].expenses, 5.0);
    }

    #[test]
    fn unknown_user_has_zero_totals() {
        let conn = get_test_connection();
        let food = create_test_category("Food", &conn);
        insert(5.0, ItemType::Debit, food, 1, datetime!(2024-05-05 10:00 UTC), &conn);

        let overall = overall_totals(UserFilter::user(42), &conn).unwrap();

        assert_eq!(overall, IncomeVsExpenses::default());
        assert!(category_totals(UserFilter::user(42), &conn).unwrap().is_empty());
        assert!(monthly_trend(UserFilter::user(42), &conn).unwrap().is_empty());
    }
}
