//! Descriptors handed to the template emitter.
//!
//! Descriptors are plain data: the emitter renders them verbatim and
//! never re-derives names or types.

use std::sync::Arc;

use serde::Serialize;

use crate::query::Command;

/// One constant of an [`EnumDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumConstant {
    /// Constant identifier (`JobStatusTypeApplied`).
    pub name: String,
    /// Literal value (`APPLIED`).
    pub value: String,
    /// Name of the enum type the constant belongs to.
    pub type_name: String,
}

/// An enum type synthesized from an `enum` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDescriptor {
    /// Type name (`JobStatusType`).
    pub name: String,
    /// Doc comment for the type; empty when none.
    pub comment: String,
    /// Constants; the `NULL` sentinel comes first for nullable columns.
    pub constants: Vec<EnumConstant>,
    /// Whether the source column is NOT NULL.
    pub not_null: bool,
}

impl EnumDescriptor {
    /// Returns whether the enum carries a `NULL` sentinel constant.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        !self.not_null
    }
}

/// A field of a [`StructDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field identifier.
    pub name: String,
    /// Target type name.
    pub type_name: String,
    /// Serialization tag.
    pub tag: String,
    /// Doc comment for the field; empty when none.
    pub comment: String,
}

impl FieldDescriptor {
    /// Creates a field without a comment.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            tag: tag.into(),
            comment: String::new(),
        }
    }
}

/// A record type, derived from a table or synthesized for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDescriptor {
    /// Type name.
    pub name: String,
    /// Fields in source column order.
    pub fields: Vec<FieldDescriptor>,
    /// Table the struct mirrors; `None` for query-specific structs.
    pub table: Option<String>,
}

impl StructDescriptor {
    /// Returns whether the struct mirrors a schema table.
    #[must_use]
    pub const fn is_table_struct(&self) -> bool {
        self.table.is_some()
    }

    /// Structural equivalence: same field count and, position by position,
    /// the same field name, field type and origin table. The struct name
    /// does not take part.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.table == other.table
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.name == b.name && a.type_name == b.type_name)
    }
}

/// What a query takes or returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryValue {
    /// No parameters, or no result columns.
    #[default]
    Absent,
    /// A single named value.
    Scalar {
        /// Variable name.
        name: String,
        /// Target type name.
        type_name: String,
    },
    /// A struct value.
    Struct {
        /// Variable name (`arg` or `i`).
        name: String,
        /// The struct; shared with the table structs when reused.
        descriptor: Arc<StructDescriptor>,
        /// Whether this query introduces the struct and the emitter must
        /// define it.
        emit: bool,
    },
}

impl QueryValue {
    /// Returns whether there is no value.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the variable name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Scalar { name, .. } | Self::Struct { name, .. } => Some(name.as_str()),
        }
    }

    /// Returns the type name: the scalar type or the struct name.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Scalar { type_name, .. } => Some(type_name.as_str()),
            Self::Struct { descriptor, .. } => Some(descriptor.name.as_str()),
        }
    }

    /// Returns the struct descriptor, if this is a struct value.
    #[must_use]
    pub fn descriptor(&self) -> Option<&Arc<StructDescriptor>> {
        match self {
            Self::Struct { descriptor, .. } => Some(descriptor),
            _ => None,
        }
    }

    /// Returns whether the emitter must define the struct.
    #[must_use]
    pub const fn emits_struct(&self) -> bool {
        matches!(self, Self::Struct { emit: true, .. })
    }
}

/// A query bound to the types it takes and returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDescriptor {
    /// Command kind.
    pub cmd: Command,
    /// Name of the SQL text constant (`GetUserSQL`).
    pub constant_name: String,
    /// Name of the prepared statement field (`getUserStmt`).
    pub field_name: String,
    /// Method name (`GetUser`).
    pub method_name: String,
    /// Source file the query was read from.
    pub source_name: String,
    /// SQL text as parsed.
    pub sql: String,
    /// SQL text after the `LIKE ... IN` rewrite, when one happened.
    pub rewritten_sql: Option<String>,
    /// Parameter value.
    pub arg: QueryValue,
    /// Return value.
    pub ret: QueryValue,
}

impl QueryDescriptor {
    /// Returns the SQL text to embed: the rewritten text when present.
    #[must_use]
    pub fn sql(&self) -> &str {
        self.rewritten_sql.as_deref().unwrap_or(&self.sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(table: Option<&str>) -> StructDescriptor {
        StructDescriptor {
            name: "User".into(),
            fields: vec![
                FieldDescriptor::new("ID", "int", "id"),
                FieldDescriptor::new("Name", "string", "name"),
            ],
            table: table.map(str::to_string),
        }
    }

    #[test]
    fn test_equivalence_ignores_struct_name() {
        let mut renamed = user(Some("users"));
        renamed.name = "Account".into();
        assert!(user(Some("users")).is_equivalent(&renamed));
    }

    #[test]
    fn test_equivalence_checks_table_and_fields() {
        let base = user(Some("users"));
        assert!(!base.is_equivalent(&user(Some("admins"))));
        assert!(!base.is_equivalent(&user(None)));

        let mut retyped = user(Some("users"));
        retyped.fields[1].type_name = "NullString".into();
        assert!(!base.is_equivalent(&retyped));

        let mut shorter = user(Some("users"));
        shorter.fields.pop();
        assert!(!base.is_equivalent(&shorter));
    }

    #[test]
    fn test_query_value_accessors() {
        let absent = QueryValue::Absent;
        assert!(absent.is_absent());
        assert_eq!(absent.name(), None);

        let scalar = QueryValue::Scalar {
            name: "id".into(),
            type_name: "int".into(),
        };
        assert_eq!(scalar.type_name(), Some("int"));
        assert!(!scalar.emits_struct());

        let value = QueryValue::Struct {
            name: "i".into(),
            descriptor: Arc::new(user(None)),
            emit: true,
        };
        assert_eq!(value.name(), Some("i"));
        assert_eq!(value.type_name(), Some("User"));
        assert!(value.emits_struct());
        assert!(value.descriptor().is_some());
    }

    #[test]
    fn test_sql_prefers_rewrite() {
        let mut query = QueryDescriptor {
            cmd: Command::Many,
            constant_name: "ListUsersSQL".into(),
            field_name: "listUsersStmt".into(),
            method_name: "ListUsers".into(),
            source_name: "users.sql".into(),
            sql: "SELECT * FROM users WHERE id IN (\"?\")".into(),
            rewritten_sql: None,
            arg: QueryValue::Absent,
            ret: QueryValue::Absent,
        };
        assert_eq!(query.sql(), "SELECT * FROM users WHERE id IN (\"?\")");

        query.rewritten_sql = Some("SELECT * FROM users WHERE id IN (?)".into());
        assert_eq!(query.sql(), "SELECT * FROM users WHERE id IN (?)");
    }

    #[test]
    fn test_struct_value_serializes_inline() {
        let value = QueryValue::Struct {
            name: "i".into(),
            descriptor: Arc::new(user(Some("users"))),
            emit: false,
        };
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["kind"], "struct");
        assert_eq!(json["descriptor"]["name"], "User");
        assert_eq!(json["descriptor"]["fields"][0]["tag"], "id");
    }
}
