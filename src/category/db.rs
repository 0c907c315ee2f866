//! Database operations for categories.

use rusqlite::{Connection, Row};
use uuid::Uuid;

use crate::{
    CategoryId, Error,
    category::{Category, CategoryName},
};

/// Create a category with a freshly generated ID and return it.
pub fn create_category(name: CategoryName, connection: &Connection) -> Result<Category, Error> {
    let id = Uuid::new_v4();

    connection.execute(
        "INSERT INTO category (id, name) VALUES (?1, ?2);",
        (id, name.as_ref()),
    )?;

    Ok(Category { id, name })
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name FROM category ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id BLOB PRIMARY KEY NOT NULL,
            name TEXT NOT NULL UNIQUE
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);

    Ok(Category { id, name })
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;
    use uuid::Uuid;

    use crate::{
        Error,
        category::{CategoryName, create_category, get_all_categories, get_category},
    };

    use super::create_category_table;

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create category table");
        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();
        let name = CategoryName::new("Groceries").unwrap();

        let category = create_category(name.clone(), &connection);

        let got_category = category.expect("Could not create category");
        assert_eq!(got_category.name, name);
    }

    #[test]
    fn create_category_fails_on_duplicate_name() {
        let connection = get_test_db_connection();
        create_category(CategoryName::new_unchecked("Rent"), &connection)
            .expect("Could not create test category");

        let result = create_category(CategoryName::new_unchecked("Rent"), &connection);

        assert!(matches!(result, Err(Error::SqlError(_))), "{result:?}");
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_db_connection();
        let inserted_category = create_category(CategoryName::new_unchecked("Foo"), &connection)
            .expect("Could not create test category");

        let selected_category = get_category(inserted_category.id, &connection);

        assert_eq!(Ok(inserted_category), selected_category);
    }

    #[test]
    fn get_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        create_category(CategoryName::new_unchecked("Foo"), &connection)
            .expect("Could not create test category");

        let selected_category = get_category(Uuid::new_v4(), &connection);

        assert_eq!(selected_category, Err(Error::NotFound));
    }

    #[test]
    fn get_all_categories_orders_by_name() {
        let connection = get_test_db_connection();
        let salary = create_category(CategoryName::new_unchecked("Salary"), &connection).unwrap();
        let food = create_category(CategoryName::new_unchecked("Food"), &connection).unwrap();

        let categories = get_all_categories(&connection).expect("Could not get all categories");

        assert_eq!(categories, vec![food, salary]);
    }
}
