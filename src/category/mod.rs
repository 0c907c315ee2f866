//! Categories group items, e.g. 'Food', 'Rent' or 'Salary'.

mod db;
mod domain;
mod list;

pub use db::{create_category, create_category_table, get_all_categories, get_category};
pub use domain::{Category, CategoryName};
pub use list::get_categories_endpoint;
