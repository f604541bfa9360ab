//! Analyzed queries handed over by the SQL parser.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::naming::arg_name;
use crate::schema::Column;

/// The command annotation of a query (`-- name: GetUser :one`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Returns exactly one row.
    #[serde(rename = ":one")]
    One,
    /// Returns any number of rows.
    #[serde(rename = ":many")]
    Many,
    /// Returns nothing.
    #[serde(rename = ":exec")]
    Exec,
    /// Returns the number of affected rows.
    #[serde(rename = ":execrows")]
    ExecRows,
    /// Returns the driver's raw result.
    #[serde(rename = ":execresult")]
    ExecResult,
}

impl Command {
    /// Returns the annotation text, colon included.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::One => ":one",
            Self::Many => ":many",
            Self::Exec => ":exec",
            Self::ExecRows => ":execrows",
            Self::ExecResult => ":execresult",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ":one" => Ok(Self::One),
            ":many" => Ok(Self::Many),
            ":exec" => Ok(Self::Exec),
            ":execrows" => Ok(Self::ExecRows),
            ":execresult" => Ok(Self::ExecResult),
            other => Err(format!("unknown query command: {other}")),
        }
    }
}

/// Marks a parameter bound inside a `LIKE ... IN (...)` pattern.
///
/// The parser leaves the placeholder quoted in the SQL text (`IN ("?")`)
/// so the statement still parses; code generation removes the quotes so
/// the runtime can expand the placeholder into one bind value per element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeIn {
    /// Placeholder text as it appears between the double quotes.
    pub placeholder: String,
}

impl LikeIn {
    /// Creates a marker for the given placeholder.
    #[must_use]
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    /// Returns the `(old, new)` texts of the rewrite.
    ///
    /// `old` is the quoted placeholder. `new` is `replacement`, or the bare
    /// placeholder when `replacement` is empty. Returns `None` when there
    /// is no placeholder to replace.
    #[must_use]
    pub fn replace(&self, replacement: &str) -> Option<(String, String)> {
        if self.placeholder.is_empty() {
            return None;
        }
        let old = format!("\"{}\"", self.placeholder);
        let new = if replacement.is_empty() {
            self.placeholder.clone()
        } else {
            replacement.to_string()
        };
        Some((old, new))
    }
}

/// A query parameter with its inferred type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Source name, usually the compared column (`user_id`).
    pub name: String,
    /// Inferred target type name.
    pub type_name: String,
    /// Set when the parameter sits in a `LIKE ... IN (...)` pattern.
    #[serde(default)]
    pub like_in: Option<LikeIn>,
}

impl Param {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            like_in: None,
        }
    }

    /// Marks the parameter as bound inside a `LIKE ... IN` pattern.
    #[must_use]
    pub fn like_in(mut self, placeholder: impl Into<String>) -> Self {
        self.like_in = Some(LikeIn::new(placeholder));
        self
    }

    /// Returns the variable name used in generated code (`userID`).
    #[must_use]
    pub fn variable_name(&self) -> String {
        arg_name(&self.name)
    }

    /// Returns whether the parameter needs the `LIKE ... IN` rewrite.
    #[must_use]
    pub const fn is_like_in(&self) -> bool {
        self.like_in.is_some()
    }
}

/// Per-query annotations that steer naming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryMeta {
    /// Custom name for the row struct, replacing `<Method>Row`.
    #[serde(default)]
    pub row_struct_name: Option<String>,
}

impl QueryMeta {
    /// Returns the custom row struct name, or `default`.
    #[must_use]
    pub fn row_struct_name(&self, default: String) -> String {
        match &self.row_struct_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => default,
        }
    }
}

/// An analyzed query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Query name (`GetUser`). Queries without a name are skipped.
    #[serde(default)]
    pub name: String,
    /// Command kind. Queries without one are skipped.
    #[serde(default)]
    pub cmd: Option<Command>,
    /// Source file the query was read from.
    #[serde(default)]
    pub filename: String,
    /// Raw SQL text.
    pub sql: String,
    /// Parameters in declaration order.
    #[serde(default)]
    pub params: Vec<Param>,
    /// Result columns in select-list order.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Naming annotations.
    #[serde(default)]
    pub meta: QueryMeta,
}

impl Query {
    /// Creates a query with no parameters and no result columns.
    #[must_use]
    pub fn new(name: impl Into<String>, cmd: Command, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cmd: Some(cmd),
            filename: String::new(),
            sql: sql.into(),
            params: Vec::new(),
            columns: Vec::new(),
            meta: QueryMeta::default(),
        }
    }

    /// Sets the source file name.
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Appends a result column.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets a custom row struct name.
    #[must_use]
    pub fn row_struct_name(mut self, name: impl Into<String>) -> Self {
        self.meta.row_struct_name = Some(name.into());
        self
    }
}
