#![allow(dead_code)]

use oxide_sqlc_core::{Column, Command, Param, Query, Schema, Settings, Table};
use oxide_sqlc_mysql::{Generator, Output};
use serde::Deserialize;

/// Parser output plus settings, as stored in `tests/fixtures`.
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    pub schema: Schema,
    #[serde(default)]
    pub settings: Settings,
    pub queries: Vec<Option<Query>>,
}

pub fn load_snapshot(name: &str) -> Snapshot {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let json = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {path}: {e}"));
    serde_json::from_str(&json).unwrap_or_else(|e| panic!("Failed to decode {path}: {e}"))
}

/// Routes `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub fn job_status() -> Column {
    Column::enumeration(
        "job_status",
        ["'APPLIED'", "'PENDING'", "'ACCEPTED'", "'REJECTED'"],
    )
    .not_null()
}

pub fn users() -> Table {
    Table::new("users")
        .column(Column::new("id", "int").not_null())
        .column(Column::new("first_name", "varchar").not_null())
        .column(Column::new("last_name", "varchar"))
        .column(Column::new("age", "int").not_null())
        .column(job_status())
}

pub fn orders() -> Table {
    Table::new("orders")
        .column(Column::new("id", "int").not_null())
        .column(Column::new("price", "decimal(13,4)").not_null())
        .column(Column::new("user_id", "int").not_null())
}

pub fn schema() -> Schema {
    Schema::new().table(users()).table(orders())
}

/// Result columns selecting every column of `table`, in order.
pub fn select_all(query: Query, table: &Table) -> Query {
    table
        .columns
        .iter()
        .cloned()
        .fold(query, |q, column| q.column(column))
}

pub fn list_users() -> Query {
    select_all(
        Query::new("ListUsers", Command::Many, "SELECT * FROM users"),
        &users(),
    )
}

pub fn get_user() -> Query {
    select_all(
        Query::new("GetUser", Command::One, "SELECT * FROM users WHERE id = ?"),
        &users(),
    )
    .param(Param::new("id", "int"))
}

pub fn generate(queries: &[Option<Query>]) -> Output {
    let schema = schema();
    let settings = Settings::new();
    Generator::new(&schema, &settings)
        .generate(queries)
        .unwrap_or_else(|e| panic!("Generation failed: {e}"))
}
