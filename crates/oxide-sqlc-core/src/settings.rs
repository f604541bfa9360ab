//! Generator settings and type override rules.
//!
//! Settings are normally decoded from the project's configuration file by
//! the caller; [`Settings::from_json`] covers the common JSON case.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::Column;

/// Forces a target type for matching columns.
///
/// Rules are evaluated in declaration order and the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideRule {
    /// Matches a (table, column) pair.
    Column {
        /// Owning table name.
        table: String,
        /// Column name.
        column: String,
        /// Target type emitted verbatim.
        target_type: String,
    },
    /// Matches a (native type, nullability) combination.
    Type {
        /// Native MySQL type name.
        db_type: String,
        /// Nullability the rule applies to.
        #[serde(default)]
        nullable: bool,
        /// Target type emitted verbatim.
        target_type: String,
    },
}

impl OverrideRule {
    /// Creates a type-based rule.
    #[must_use]
    pub fn for_type(
        db_type: impl Into<String>,
        nullable: bool,
        target_type: impl Into<String>,
    ) -> Self {
        Self::Type {
            db_type: db_type.into(),
            nullable,
            target_type: target_type.into(),
        }
    }

    /// Creates a column-based rule.
    #[must_use]
    pub fn for_column(
        table: impl Into<String>,
        column: impl Into<String>,
        target_type: impl Into<String>,
    ) -> Self {
        Self::Column {
            table: table.into(),
            column: column.into(),
            target_type: target_type.into(),
        }
    }

    /// Returns the target type.
    #[must_use]
    pub fn target_type(&self) -> &str {
        match self {
            Self::Column { target_type, .. } | Self::Type { target_type, .. } => target_type,
        }
    }

    /// Returns whether this rule applies to `column`.
    #[must_use]
    pub fn matches(&self, column: &Column) -> bool {
        match self {
            Self::Type {
                db_type, nullable, ..
            } => {
                !db_type.is_empty()
                    && db_type.eq_ignore_ascii_case(&column.native_type)
                    && *nullable == column.is_nullable()
            }
            Self::Column {
                table, column: name, ..
            } => !name.is_empty() && name == column.name() && *table == column.table,
        }
    }
}

/// Per-column settings inside a [`TableSettings`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSettings {
    /// Field name replacing the case-converted column name.
    pub rename: Option<String>,
    /// Serialization tag replacing the column name.
    pub json_tag: Option<String>,
    /// Custom enum type name for an `enum` column.
    pub enum_name: Option<String>,
}

/// Per-table settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Struct name replacing the case-converted table name.
    pub struct_name: Option<String>,
    /// Column settings keyed by column name.
    pub columns: BTreeMap<String, ColumnSettings>,
}

impl TableSettings {
    fn column(&self, column: &str) -> Option<&ColumnSettings> {
        self.columns.get(column)
    }

    /// Returns the custom field name of a column, if any.
    #[must_use]
    pub fn column_rename(&self, column: &str) -> Option<&str> {
        self.column(column)
            .and_then(|c| c.rename.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Returns the serialization tag of a column.
    #[must_use]
    pub fn json_tag<'a>(&'a self, column: &'a str) -> &'a str {
        self.column(column)
            .and_then(|c| c.json_tag.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(column)
    }

    /// Returns the custom enum name of a column, if any.
    #[must_use]
    pub fn enum_name(&self, column: &str) -> Option<&str> {
        self.column(column)
            .and_then(|c| c.enum_name.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Settings shared by every stage of one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Type overrides in declaration order.
    pub overrides: Vec<OverrideRule>,
    /// Identifier renames applied before case conversion.
    pub rename: BTreeMap<String, String>,
    /// Table settings keyed by table name.
    pub tables: BTreeMap<String, TableSettings>,
}

impl Settings {
    /// Creates empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes settings from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Appends an override rule.
    #[must_use]
    pub fn override_rule(mut self, rule: OverrideRule) -> Self {
        self.overrides.push(rule);
        self
    }

    /// Adds a global rename.
    #[must_use]
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.rename.insert(from.into(), to.into());
        self
    }

    /// Sets the settings of a table.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>, settings: TableSettings) -> Self {
        self.tables.insert(table.into(), settings);
        self
    }

    /// Returns the settings of a table, if configured.
    #[must_use]
    pub fn table(&self, table: &str) -> Option<&TableSettings> {
        self.tables.get(table)
    }

    /// Returns the target type of the first override matching `column`.
    #[must_use]
    pub fn resolve_override(&self, column: &Column) -> Option<&str> {
        self.overrides
            .iter()
            .find(|rule| rule.matches(column))
            .map(OverrideRule::target_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_rule_matches_stated_nullability() {
        let rule = OverrideRule::for_type("decimal", true, "decimal.NullDecimal");

        assert!(rule.matches(&Column::new("price", "decimal")));
        assert!(!rule.matches(&Column::new("price", "decimal").not_null()));
        assert!(!rule.matches(&Column::new("price", "float")));
    }

    #[test]
    fn test_type_rule_ignores_case() {
        let rule = OverrideRule::for_type("decimal(13,4)", false, "decimal.Decimal");

        assert!(rule.matches(&Column::new("price", "DECIMAL(13,4)").not_null()));
        assert!(!rule.matches(&Column::new("price", "DECIMAL(10,2)").not_null()));
    }

    #[test]
    fn test_column_rule_needs_table_and_column() {
        let rule = OverrideRule::for_column("users", "meta", "json.RawMessage");

        assert!(rule.matches(&Column::new("meta", "text").table("users")));
        assert!(!rule.matches(&Column::new("meta", "text").table("orders")));
        assert!(!rule.matches(&Column::new("data", "text").table("users")));
    }

    #[test]
    fn test_first_override_wins() {
        let settings = Settings::new()
            .override_rule(OverrideRule::for_column("users", "age", "uint8"))
            .override_rule(OverrideRule::for_type("int", false, "int32"));

        let age = Column::new("age", "int").not_null().table("users");
        assert_eq!(settings.resolve_override(&age), Some("uint8"));

        let id = Column::new("id", "int").not_null().table("users");
        assert_eq!(settings.resolve_override(&id), Some("int32"));

        let nullable = Column::new("score", "int").table("users");
        assert_eq!(settings.resolve_override(&nullable), None);
    }

    #[test]
    fn test_table_settings_lookups() {
        let mut table = TableSettings::default();
        table.columns.insert(
            "status".into(),
            ColumnSettings {
                rename: Some("State".into()),
                json_tag: Some("state".into()),
                enum_name: Some("UserState".into()),
            },
        );

        assert_eq!(table.column_rename("status"), Some("State"));
        assert_eq!(table.json_tag("status"), "state");
        assert_eq!(table.json_tag("id"), "id");
        assert_eq!(table.enum_name("status"), Some("UserState"));
        assert_eq!(table.enum_name("id"), None);
    }

    #[test]
    fn test_from_json() {
        let settings = Settings::from_json(
            r#"{
                "overrides": [
                    {"table": "users", "column": "meta", "target_type": "json.RawMessage"},
                    {"db_type": "bigint", "nullable": true, "target_type": "sql.NullInt64"}
                ],
                "rename": {"url": "URL"},
                "tables": {
                    "users": {"columns": {"status": {"enum_name": "UserStatus"}}}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.overrides.len(), 2);
        assert!(matches!(settings.overrides[0], OverrideRule::Column { .. }));
        assert!(matches!(
            settings.overrides[1],
            OverrideRule::Type { nullable: true, .. }
        ));
        assert_eq!(settings.rename.get("url").map(String::as_str), Some("URL"));
        assert_eq!(
            settings.table("users").and_then(|t| t.enum_name("status")),
            Some("UserStatus")
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Settings::from_json("{\"overrides\": 3}").is_err());
    }
}
