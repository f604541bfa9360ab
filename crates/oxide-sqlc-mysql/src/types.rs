//! MySQL type inference.

use oxide_sqlc_core::{Column, Diagnostic, Diagnostics, Settings, TypeMapping};
use tracing::warn;

use crate::enums::enum_type_name;

/// Target type used when a native type is not recognized.
pub const OPAQUE_TYPE: &str = "interface{}";

/// Category of a MySQL native type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeType {
    /// `char`, `varchar` and the `text` family.
    Text,
    /// Integer types, including `year`.
    Integer,
    /// `binary`, `varbinary` and the `blob` family.
    Binary,
    /// `float` and `decimal(p, s)`.
    Float,
    /// `enum(...)`.
    Enum,
    /// Dates, times and timestamps.
    Temporal,
    /// `bool`, `boolean` and `tinyint`.
    Boolean,
    /// Anything else (`json`, `point`, ...).
    Unknown(String),
}

impl NativeType {
    /// Classifies a native type name, ignoring case.
    #[must_use]
    pub fn classify(native_type: &str) -> Self {
        let t = native_type.to_ascii_lowercase();
        match t.as_str() {
            "varchar" | "text" | "char" | "tinytext" | "mediumtext" | "longtext" => Self::Text,
            "int" | "integer" | "smallint" | "mediumint" | "bigint" | "year" => Self::Integer,
            "blob" | "binary" | "varbinary" | "tinyblob" | "mediumblob" | "longblob" => {
                Self::Binary
            }
            "float" => Self::Float,
            "enum" => Self::Enum,
            "date" | "timestamp" | "datetime" | "time" => Self::Temporal,
            "boolean" | "bool" | "tinyint" => Self::Boolean,
            s if s.starts_with("decimal") => Self::Float,
            _ => Self::Unknown(native_type.to_string()),
        }
    }

    /// Returns the target type for a non-enum category.
    ///
    /// Enums are named per column and unknown types have no mapping, so
    /// both return `None`.
    #[must_use]
    pub const fn target_type(&self, nullable: bool) -> Option<&'static str> {
        let (plain, wrapped) = match self {
            Self::Text => ("string", "NullString"),
            Self::Integer => ("int", "NullInt64"),
            Self::Binary => ("[]byte", "[]byte"),
            Self::Float => ("float64", "NullFloat64"),
            Self::Temporal => ("time.Time", "NullTime"),
            Self::Boolean => ("bool", "NullBool"),
            Self::Enum | Self::Unknown(_) => return None,
        };
        Some(if nullable { wrapped } else { plain })
    }
}

/// Resolves MySQL columns to target types.
///
/// Overrides from the settings are consulted first, in declaration order;
/// the first match is returned verbatim.
#[derive(Debug, Clone, Copy)]
pub struct MySqlTypeMapper<'a> {
    settings: &'a Settings,
}

impl<'a> MySqlTypeMapper<'a> {
    /// Creates a mapper over the given settings.
    #[must_use]
    pub const fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }
}

impl TypeMapping for MySqlTypeMapper<'_> {
    fn column_type(&self, column: &Column, diagnostics: &mut Diagnostics) -> String {
        if let Some(target) = self.settings.resolve_override(column) {
            return target.to_string();
        }

        let native = NativeType::classify(&column.native_type);
        if let Some(target) = native.target_type(column.is_nullable()) {
            return target.to_string();
        }
        match native {
            NativeType::Enum => enum_type_name(&column.table, column.name(), self.settings).0,
            _ => {
                warn!(
                    table = %column.table,
                    column = column.name(),
                    native_type = %column.native_type,
                    "unknown MySQL type"
                );
                diagnostics.push(Diagnostic::UnknownType {
                    table: column.table.clone(),
                    column: column.name().to_string(),
                    native_type: column.native_type.clone(),
                });
                OPAQUE_TYPE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_sqlc_core::OverrideRule;

    fn map(settings: &Settings, column: &Column) -> (String, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let ty = MySqlTypeMapper::new(settings).column_type(column, &mut diagnostics);
        (ty, diagnostics)
    }

    #[test]
    fn test_classify() {
        assert_eq!(NativeType::classify("VARCHAR"), NativeType::Text);
        assert_eq!(NativeType::classify("year"), NativeType::Integer);
        assert_eq!(NativeType::classify("decimal(10,2)"), NativeType::Float);
        assert_eq!(NativeType::classify("tinyint"), NativeType::Boolean);
        assert_eq!(NativeType::classify("longblob"), NativeType::Binary);
        assert_eq!(
            NativeType::classify("point"),
            NativeType::Unknown("point".into())
        );
    }

    #[test]
    fn test_plain_and_nullable_types() {
        let settings = Settings::new();
        let cases = [
            ("varchar", "string", "NullString"),
            ("bigint", "int", "NullInt64"),
            ("blob", "[]byte", "[]byte"),
            ("float", "float64", "NullFloat64"),
            ("decimal(10,2)", "float64", "NullFloat64"),
            ("datetime", "time.Time", "NullTime"),
            ("bool", "bool", "NullBool"),
        ];
        for (native, plain, wrapped) in cases {
            let column = Column::new("c", native).table("t");
            assert_eq!(map(&settings, &column.clone().not_null()).0, plain, "{native}");
            assert_eq!(map(&settings, &column).0, wrapped, "{native}");
        }
    }

    #[test]
    fn test_enum_type_ignores_nullability() {
        let settings = Settings::new();
        let column = Column::enumeration("job_status", ["'APPLIED'"]).table("users");

        assert_eq!(map(&settings, &column).0, "JobStatusType");
        assert_eq!(map(&settings, &column.not_null()).0, "JobStatusType");
    }

    #[test]
    fn test_unknown_type_is_opaque_and_reported() {
        let settings = Settings::new();
        let column = Column::new("location", "point").table("shops");
        let (ty, diagnostics) = map(&settings, &column);

        assert_eq!(ty, OPAQUE_TYPE);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next(),
            Some(&Diagnostic::UnknownType {
                table: "shops".into(),
                column: "location".into(),
                native_type: "point".into(),
            })
        );
    }

    #[test]
    fn test_override_beats_mapping() {
        let settings = Settings::new()
            .override_rule(OverrideRule::for_type("point", true, "geo.Point"))
            .override_rule(OverrideRule::for_column("users", "age", "uint8"));

        let (ty, diagnostics) = map(&settings, &Column::new("location", "point"));
        assert_eq!(ty, "geo.Point");
        assert!(diagnostics.is_empty());

        let age = Column::new("age", "int").not_null().table("users");
        assert_eq!(map(&settings, &age).0, "uint8");
    }

    #[test]
    fn test_only_first_matching_override_applies() {
        let settings = Settings::new()
            .override_rule(OverrideRule::for_type("int", false, "int32"))
            .override_rule(OverrideRule::for_column("users", "id", "uint64"));

        let id = Column::new("id", "int").not_null().table("users");
        assert_eq!(map(&settings, &id).0, "int32");
    }

    #[test]
    fn test_type_override_respects_nullability() {
        let settings =
            Settings::new().override_rule(OverrideRule::for_type("int", true, "sql.NullInt32"));

        assert_eq!(map(&settings, &Column::new("n", "int")).0, "sql.NullInt32");
        assert_eq!(map(&settings, &Column::new("n", "int").not_null()).0, "int");
    }
}
