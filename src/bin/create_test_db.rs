use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{CategoryName, Item, ItemType, create_category, create_item, initialize_db};

/// A utility for creating a test database for the expense tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The ID of the user that owns the sample items.
    #[arg(long, short, default_value_t = 1)]
    user_id: i64,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating categories...");
    let food = create_category(CategoryName::new("Food")?, &conn)?;
    let transport = create_category(CategoryName::new("Transport")?, &conn)?;
    let rent = create_category(CategoryName::new("Rent")?, &conn)?;
    let salary = create_category(CategoryName::new("Salary")?, &conn)?;

    println!("Creating items for user {}...", args.user_id);
    let now = OffsetDateTime::now_utc();

    for months_ago in 0..6 {
        let created_at = now - Duration::days(30 * months_ago);

        let items = [
            ("Groceries", 120.0, ItemType::Debit, food.id),
            ("Coffee", 4.5, ItemType::Debit, food.id),
            ("Bus fare", 32.0, ItemType::Debit, transport.id),
            ("Rent", 1500.0, ItemType::Debit, rent.id),
            ("Salary", 4200.0, ItemType::Credit, salary.id),
        ];

        for (name, cost, type_, category_id) in items {
            create_item(
                Item::build(name, cost, type_, category_id, args.user_id).created_at(created_at),
                &conn,
            )?;
        }
    }

    println!("Success!");

    Ok(())
}
