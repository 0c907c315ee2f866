//! Defines the core data models and database queries for items.

use std::fmt::Display;

use rusqlite::{
    Connection, Row, ToSql, named_params, params_from_iter,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{CategoryId, Error, ItemId, UserFilter, UserId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether an item is money spent or money earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Money spent, i.e. an expense.
    Debit,
    /// Money earned, i.e. income.
    Credit,
}

impl ItemType {
    /// The string stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Debit => "debit",
            ItemType::Credit => "credit",
        }
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for ItemType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for ItemType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "debit" => Ok(ItemType::Debit),
            "credit" => Ok(ItemType::Credit),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// A single expense or income record owned by a user.
///
/// To create a new `Item`, use [Item::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// The ID of the item.
    pub id: ItemId,
    /// A short description of what the money was spent on or earned from.
    pub name: String,
    /// The amount of money, always zero or greater. The sign is given by `type_`.
    pub cost: f64,
    /// Whether the item is an expense or income.
    #[serde(rename = "type")]
    pub type_: ItemType,
    /// The category the item is grouped under.
    pub category_id: CategoryId,
    /// The user that owns the item.
    pub user_id: UserId,
    /// When the item was recorded.
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Item {
    /// Create a new item.
    ///
    /// Shortcut for [NewItem] for discoverability.
    pub fn build(
        name: &str,
        cost: f64,
        type_: ItemType,
        category_id: CategoryId,
        user_id: UserId,
    ) -> NewItem {
        NewItem {
            id: None,
            name: name.to_owned(),
            cost,
            type_,
            category_id,
            user_id,
            created_at: None,
        }
    }
}

/// The data needed to create an [Item].
///
/// The ID and creation time are assigned by [create_item] unless they are set
/// explicitly. Clients may supply an ID, but the creation time can only be set
/// in code, e.g. when seeding a database.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewItem {
    /// An optional client-chosen ID.
    #[serde(default)]
    pub id: Option<ItemId>,
    /// A short description of the item.
    pub name: String,
    /// The amount of money.
    pub cost: f64,
    /// Whether the item is an expense or income.
    #[serde(rename = "type")]
    pub type_: ItemType,
    /// The ID of the category the item belongs to.
    pub category_id: CategoryId,
    /// The ID of the user that owns the item.
    pub user_id: UserId,
    /// When the item was recorded, defaults to now.
    #[serde(skip)]
    pub created_at: Option<OffsetDateTime>,
}

impl NewItem {
    /// Set the ID for the item.
    pub fn id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the creation time for the item.
    pub fn created_at(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// A partial update to an [Item]. Fields left as `None` are not changed.
///
/// The ID and creation time of an item cannot be changed, so a request body
/// containing either is rejected along with any other unknown field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemPatch {
    /// The new name.
    pub name: Option<String>,
    /// The new cost.
    pub cost: Option<f64>,
    /// The new item type.
    #[serde(rename = "type")]
    pub type_: Option<ItemType>,
    /// The new category.
    pub category_id: Option<CategoryId>,
    /// The new owner.
    pub user_id: Option<UserId>,
}

impl ItemPatch {
    /// Whether the patch would leave an item unchanged.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cost.is_none()
            && self.type_.is_none()
            && self.category_id.is_none()
            && self.user_id.is_none()
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new item in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCost] if the cost is negative, infinite or NaN,
/// - or [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::DuplicateItemId] if an item with the given ID already exists,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_item(new_item: NewItem, connection: &Connection) -> Result<Item, Error> {
    validate_cost(new_item.cost)?;

    let id = new_item.id.unwrap_or_else(Uuid::new_v4);
    let created_at = new_item.created_at.unwrap_or_else(OffsetDateTime::now_utc);

    let item = connection
        .prepare(
            "INSERT INTO item (id, name, cost, type, category_id, user_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, name, cost, type, category_id, user_id, created_at",
        )?
        .query_row(
            (
                id,
                &new_item.name,
                new_item.cost,
                new_item.type_,
                new_item.category_id,
                new_item.user_id,
                created_at,
            ),
            map_item_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(new_item.category_id),
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY,
                },
                _,
            ) => Error::DuplicateItemId(id),
            error => error.into(),
        })?;

    Ok(item)
}

/// Retrieve the items in the database in the order they were created,
/// keeping only those that match `filter`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn list_items(filter: UserFilter, connection: &Connection) -> Result<Vec<Item>, Error> {
    connection
        .prepare(
            "SELECT id, name, cost, type, category_id, user_id, created_at FROM item
             WHERE :user_id IS NULL OR user_id = :user_id
             ORDER BY rowid ASC",
        )?
        .query_map(named_params! { ":user_id": filter.user_id }, map_item_row)?
        .map(|maybe_item| maybe_item.map_err(|error| error.into()))
        .collect()
}

/// Retrieve an item from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid item,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_item(id: ItemId, connection: &Connection) -> Result<Item, Error> {
    let item = connection
        .prepare(
            "SELECT id, name, cost, type, category_id, user_id, created_at FROM item WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_item_row)?;

    Ok(item)
}

/// Overwrite the fields of the item `id` that are set in `patch`.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyPatch] if `patch` does not set any fields,
/// - or [Error::InvalidCost] if the new cost is negative, infinite or NaN,
/// - or [Error::InvalidCategory] if the new category ID does not refer to a real category,
/// - or [Error::UpdateMissingItem] if `id` does not refer to a valid item,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_item(id: ItemId, patch: ItemPatch, connection: &Connection) -> Result<(), Error> {
    if patch.is_empty() {
        return Err(Error::EmptyPatch);
    }

    if let Some(cost) = patch.cost {
        validate_cost(cost)?;
    }

    let mut columns: Vec<(&str, &dyn ToSql)> = Vec::new();

    if let Some(name) = &patch.name {
        columns.push(("name", name));
    }
    if let Some(cost) = &patch.cost {
        columns.push(("cost", cost));
    }
    if let Some(type_) = &patch.type_ {
        columns.push(("type", type_));
    }
    if let Some(category_id) = &patch.category_id {
        columns.push(("category_id", category_id));
    }
    if let Some(user_id) = &patch.user_id {
        columns.push(("user_id", user_id));
    }

    let assignments = columns
        .iter()
        .enumerate()
        .map(|(index, (column, _))| format!("{column} = ?{}", index + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let query = format!(
        "UPDATE item SET {assignments} WHERE id = ?{}",
        columns.len() + 1
    );
    let params = columns
        .iter()
        .map(|(_, value)| *value)
        .chain(std::iter::once(&id as &dyn ToSql));

    let rows_affected = connection
        .execute(&query, params_from_iter(params))
        .map_err(|error| match (error, patch.category_id) {
            (
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error {
                        code: _,
                        extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                    },
                    _,
                ),
                Some(category_id),
            ) => Error::InvalidCategory(category_id),
            (error, _) => error.into(),
        })?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingItem);
    }

    Ok(())
}

/// Delete the item `id` if it exists.
///
/// Deleting an item that does not exist is not an error.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn delete_item(id: ItemId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM item WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        tracing::debug!("Tried to delete item {id} but it does not exist");
    }

    Ok(())
}

/// Create the item table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_item_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS item (
            id BLOB PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            cost REAL NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('debit', 'credit')),
            category_id BLOB NOT NULL,
            user_id INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE RESTRICT
        );

        CREATE INDEX IF NOT EXISTS idx_item_user_id ON item(user_id);
        CREATE INDEX IF NOT EXISTS idx_item_category_id ON item(category_id);",
    )
}

/// Map a database row to an Item.
pub fn map_item_row(row: &Row) -> Result<Item, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let cost = row.get(2)?;
    let type_ = row.get(3)?;
    let category_id = row.get(4)?;
    let user_id = row.get(5)?;
    let created_at = row.get(6)?;

    Ok(Item {
        id,
        name,
        cost,
        type_,
        category_id,
        user_id,
        created_at,
    })
}

fn validate_cost(cost: f64) -> Result<(), Error> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidCost(cost))
    }
}

// ============================================================================
// TESTS
// ============================================================================
