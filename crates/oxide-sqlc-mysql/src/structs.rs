//! Row and parameter structs.

use std::sync::Arc;

use oxide_sqlc_core::naming::{column_name, struct_name, table_struct_name, FieldNamer};
use oxide_sqlc_core::{
    Diagnostics, FieldDescriptor, Schema, Settings, StructDescriptor, Table, TypeMapping,
};

/// Source of one field of a query-specific struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructItem {
    /// Source name (column or parameter name).
    pub name: String,
    /// Target type name.
    pub type_name: String,
}

impl StructItem {
    /// Creates an item.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Builds the struct mirroring `table`, fields in column order.
pub fn table_struct(
    table: &Table,
    settings: &Settings,
    mapper: &impl TypeMapping,
    diagnostics: &mut Diagnostics,
) -> StructDescriptor {
    let table_settings = settings.table(&table.name);
    let fields = table
        .columns
        .iter()
        .map(|column| {
            let source = column.name();
            let tag = table_settings.map_or(source, |t| t.json_tag(source));
            FieldDescriptor::new(
                column_name(source, &table.name, settings),
                mapper.column_type(column, diagnostics),
                tag,
            )
        })
        .collect();

    StructDescriptor {
        name: table_struct_name(&table.name, settings),
        fields,
        table: Some(table.name.clone()),
    }
}

/// Builds one struct per table, sorted by struct name.
pub fn synthesize_structs(
    schema: &Schema,
    settings: &Settings,
    mapper: &impl TypeMapping,
    diagnostics: &mut Diagnostics,
) -> Vec<Arc<StructDescriptor>> {
    let mut structs: Vec<_> = schema
        .tables()
        .map(|table| Arc::new(table_struct(table, settings, mapper, diagnostics)))
        .collect();
    structs.sort_by(|a, b| a.name.cmp(&b.name));
    structs
}

/// Builds a query-specific struct. Repeated field names get a `_<n>`
/// suffix on both field name and tag.
#[must_use]
pub fn columns_to_struct(
    name: String,
    items: &[StructItem],
    settings: &Settings,
) -> StructDescriptor {
    let mut namer = FieldNamer::new();
    let fields = items
        .iter()
        .map(|item| {
            let field = struct_name(&item.name, settings);
            let (field, tag) = namer.next(field, &item.name);
            FieldDescriptor::new(field, item.type_name.clone(), tag)
        })
        .collect();

    StructDescriptor {
        name,
        fields,
        table: None,
    }
}
