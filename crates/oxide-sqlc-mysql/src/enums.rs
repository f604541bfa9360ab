//! Enum types synthesized from MySQL `enum` columns.

use oxide_sqlc_core::naming::{enum_constant_name, strip_inner_quotes, struct_name, title};
use oxide_sqlc_core::{Column, EnumConstant, EnumDescriptor, Schema, Settings};

/// Literal value of the sentinel constant of a nullable enum.
pub const NULL_VALUE: &str = "NULL";

/// Returns the last `_` segment of a multi-segment table name, or an empty
/// string when the name has a single segment.
///
/// `app_users` gives `users`; `users` gives the empty string, so enums of
/// single-word tables are named after the column alone.
#[must_use]
pub fn table_tail(table: &str) -> &str {
    match table.rsplit_once('_') {
        Some((_, tail)) => tail,
        None => "",
    }
}

/// Returns the enum type name of a column and whether it is custom.
///
/// A custom name configured for the column wins; otherwise the name is
/// `<Tail><Column>Type` with the table tail from [`table_tail`].
#[must_use]
pub fn enum_type_name(table: &str, column: &str, settings: &Settings) -> (String, bool) {
    if let Some(custom) = settings.table(table).and_then(|t| t.enum_name(column)) {
        return (custom.to_string(), true);
    }
    let base = struct_name(&format!("{}_{column}", table_tail(table)), settings);
    (format!("{base}Type"), false)
}

/// Builds the descriptor of one `enum` column.
#[must_use]
pub fn enum_descriptor(table: &str, column: &Column, settings: &Settings) -> EnumDescriptor {
    let (type_name, custom) = enum_type_name(table, column.name(), settings);
    let prefix = format!("{}_{}", table_tail(table), column.name());
    let constant_name = |value: &str| {
        if custom {
            format!("{}{}", title(&type_name), title(value))
        } else {
            enum_constant_name(&prefix, value)
        }
    };

    let null = column.is_nullable().then(|| NULL_VALUE.to_string());
    let constants = null
        .into_iter()
        .chain(column.enum_values.iter().map(|v| strip_inner_quotes(v)))
        .map(|value| EnumConstant {
            name: constant_name(&value),
            value,
            type_name: type_name.clone(),
        })
        .collect();

    EnumDescriptor {
        name: type_name.clone(),
        comment: String::new(),
        constants,
        not_null: column.not_null,
    }
}

/// Synthesizes one enum per `enum` column, tables in schema order and
/// columns in declaration order.
#[must_use]
pub fn synthesize_enums(schema: &Schema, settings: &Settings) -> Vec<EnumDescriptor> {
    schema
        .tables()
        .flat_map(|table| {
            table
                .columns
                .iter()
                .filter(|c| c.is_enum())
                .map(move |c| enum_descriptor(&table.name, c, settings))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_sqlc_core::{ColumnSettings, Table, TableSettings};

    fn names(e: &EnumDescriptor) -> Vec<&str> {
        e.constants.iter().map(|c| c.name.as_str()).collect()
    }

    fn values(e: &EnumDescriptor) -> Vec<&str> {
        e.constants.iter().map(|c| c.value.as_str()).collect()
    }

    #[test]
    fn test_table_tail() {
        assert_eq!(table_tail("users"), "");
        assert_eq!(table_tail("app_users"), "users");
        assert_eq!(table_tail("a_b_c"), "c");
    }

    #[test]
    fn test_enum_type_name() {
        let settings = Settings::new();
        assert_eq!(
            enum_type_name("users", "job_status", &settings),
            ("JobStatusType".to_string(), false)
        );
        assert_eq!(
            enum_type_name("app_users", "status", &settings),
            ("UsersStatusType".to_string(), false)
        );
    }

    #[test]
    fn test_nullable_enum_gets_null_sentinel_first() {
        let settings = Settings::new();
        let column = Column::enumeration("status", ["'on'", "'off'"]).table("devices");
        let e = enum_descriptor("devices", &column, &settings);

        assert_eq!(e.name, "StatusType");
        assert!(e.is_nullable());
        assert_eq!(e.constants.len(), 3);
        assert_eq!(names(&e), ["StatusTypeNULL", "StatusTypeOn", "StatusTypeOff"]);
        assert_eq!(values(&e), ["NULL", "on", "off"]);
        assert!(e.constants.iter().all(|c| c.type_name == "StatusType"));
    }

    #[test]
    fn test_not_null_enum_has_only_literals() {
        let settings = Settings::new();
        let column = Column::enumeration("status", ["'on'", "'off'"])
            .not_null()
            .table("devices");
        let e = enum_descriptor("devices", &column, &settings);

        assert!(!e.is_nullable());
        assert_eq!(e.constants.len(), 2);
        assert_eq!(values(&e), ["on", "off"]);
    }

    #[test]
    fn test_table_tail_prefixes_constants() {
        let settings = Settings::new();
        let column = Column::enumeration("disabled", ["'true'", "'false'"]).not_null();
        let e = enum_descriptor("app_flags", &column, &settings);

        assert_eq!(e.name, "FlagsDisabledType");
        assert_eq!(
            names(&e),
            ["FlagsDisabledTypeTrue", "FlagsDisabledTypeFalse"]
        );
    }

    #[test]
    fn test_custom_enum_name() {
        let mut devices = TableSettings::default();
        devices.columns.insert(
            "status".into(),
            ColumnSettings {
                enum_name: Some("power".into()),
                ..ColumnSettings::default()
            },
        );
        let settings = Settings::new().with_table("devices", devices);
        let column = Column::enumeration("status", ["'on'", "'off'"]).table("devices");
        let e = enum_descriptor("devices", &column, &settings);

        assert_eq!(e.name, "power");
        assert_eq!(names(&e), ["PowerNULL", "PowerOn", "PowerOff"]);
        assert!(e.constants.iter().all(|c| c.type_name == "power"));
    }

    #[test]
    fn test_synthesize_enums_is_ordered() {
        let schema = Schema::new()
            .table(
                Table::new("users")
                    .column(Column::new("id", "int").not_null())
                    .column(Column::enumeration("role", ["'admin'", "'member'"]).not_null())
                    .column(Column::enumeration("job_status", ["'APPLIED'"])),
            )
            .table(
                Table::new("devices")
                    .column(Column::enumeration("power", ["'on'", "'off'"]).not_null()),
            );

        let settings = Settings::new();
        let enums = synthesize_enums(&schema, &settings);
        let enum_names: Vec<_> = enums.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(enum_names, ["PowerType", "RoleType", "JobStatusType"]);
        assert_eq!(synthesize_enums(&schema, &settings), enums);
    }
}
