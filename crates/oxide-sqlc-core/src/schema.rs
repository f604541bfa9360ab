//! Schema definitions handed over by the SQL parser.
//!
//! A [`Schema`] maps table names to [`Table`]s; each table owns its
//! [`Column`]s in declaration order. Iteration over a schema is always
//! lexicographic by table name so every derived descriptor set is stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A column of a table or of a query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name. `None` for computed result columns without an alias.
    #[serde(default)]
    pub name: Option<String>,
    /// Native MySQL type name (`varchar`, `int`, `enum`, `decimal(10,2)`, ...).
    pub native_type: String,
    /// Whether the column is declared NOT NULL.
    #[serde(default)]
    pub not_null: bool,
    /// Name of the table the column belongs to. Empty when unknown.
    #[serde(default)]
    pub table: String,
    /// Enum literals as written in the DDL, quotes included.
    #[serde(default)]
    pub enum_values: Vec<String>,
}

impl Column {
    /// Creates a new nullable column.
    #[must_use]
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            native_type: native_type.into(),
            not_null: false,
            table: String::new(),
            enum_values: Vec::new(),
        }
    }

    /// Creates a result column without a name (e.g. `SELECT COUNT(*)`).
    #[must_use]
    pub fn unnamed(native_type: impl Into<String>) -> Self {
        Self {
            name: None,
            ..Self::new("", native_type)
        }
    }

    /// Creates an `enum` column with the given quoted literals.
    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enum_values: values.into_iter().map(Into::into).collect(),
            ..Self::new(name, "enum")
        }
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Sets the owning table.
    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Returns the column name, or an empty string for unnamed columns.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Returns whether the column may hold NULL.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        !self.not_null
    }

    /// Returns whether the column is a MySQL `enum`.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.native_type.eq_ignore_ascii_case("enum")
    }
}

/// A table: a name and its columns in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Appends a column, stamping it with this table's name.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        let column = column.table(self.name.clone());
        self.columns.push(column);
        self
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }
}

/// A database schema (multiple tables), keyed by table name.
///
/// Loading a schema re-keys every table by its own name and stamps that
/// name onto its columns, as [`Table::column`] does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Table>", into = "BTreeMap<String, Table>")]
pub struct Schema {
    tables: BTreeMap<String, Table>,
}

impl From<BTreeMap<String, Table>> for Schema {
    fn from(tables: BTreeMap<String, Table>) -> Self {
        let mut schema = Self::new();
        for mut table in tables.into_values() {
            for column in &mut table.columns {
                column.table.clone_from(&table.name);
            }
            schema.insert(table);
        }
        schema
    }
}

impl From<Schema> for BTreeMap<String, Table> {
    fn from(schema: Schema) -> Self {
        schema.tables
    }
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table, replacing any table with the same name.
    #[must_use]
    pub fn table(mut self, table: Table) -> Self {
        self.insert(table);
        self
    }

    /// Inserts a table, replacing any table with the same name.
    pub fn insert(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Iterates tables ordered by name.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Returns the number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns whether the schema has no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
