//! One generation pass over a schema and its queries.

use std::sync::Arc;

use oxide_sqlc_core::{
    Diagnostics, EnumDescriptor, Query, QueryDescriptor, Result, Schema, Settings,
    StructDescriptor,
};
use serde::Serialize;
use tracing::debug;

use crate::enums::synthesize_enums;
use crate::queries::QueryBinder;
use crate::structs::synthesize_structs;
use crate::types::MySqlTypeMapper;

/// Everything a template emitter needs.
///
/// `structs` holds only the table-derived structs. Parameter and row
/// structs introduced by a query live on that query's descriptor; use
/// [`Output::emitted_structs`] for them in query order, or
/// [`Output::all_structs`] for every struct in one list sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Output {
    /// Enum types, tables in schema order and columns in declaration order.
    pub enums: Vec<EnumDescriptor>,
    /// Table structs, sorted by name.
    pub structs: Vec<Arc<StructDescriptor>>,
    /// Queries, sorted by method name.
    pub queries: Vec<QueryDescriptor>,
    /// Non-fatal findings, in the order they were made.
    pub diagnostics: Diagnostics,
}

impl Output {
    /// Iterates the query-specific structs the emitter must define, in
    /// query order, parameter struct before row struct.
    pub fn emitted_structs(&self) -> impl Iterator<Item = &Arc<StructDescriptor>> {
        self.queries.iter().flat_map(|q| {
            [&q.arg, &q.ret]
                .into_iter()
                .filter(|v| v.emits_struct())
                .filter_map(|v| v.descriptor())
        })
    }

    /// Returns table structs and emitted query structs together, sorted by
    /// name. [`StructDescriptor::is_table_struct`] tells their origin
    /// apart; on equal names table structs come first.
    #[must_use]
    pub fn all_structs(&self) -> Vec<&Arc<StructDescriptor>> {
        let mut all: Vec<_> = self.structs.iter().chain(self.emitted_structs()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }
}

/// Generates descriptors for a MySQL schema.
///
/// ```rust
/// use oxide_sqlc_core::{Column, Command, Query, Schema, Settings, Table};
/// use oxide_sqlc_mysql::Generator;
///
/// let schema = Schema::new().table(
///     Table::new("users")
///         .column(Column::new("id", "int").not_null())
///         .column(Column::new("name", "varchar").not_null()),
/// );
/// let settings = Settings::new();
/// let query = Query::new("ListUsers", Command::Many, "SELECT id, name FROM users")
///     .column(Column::new("id", "int").not_null().table("users"))
///     .column(Column::new("name", "varchar").not_null().table("users"));
///
/// let output = Generator::new(&schema, &settings).generate(&[Some(query)])?;
/// assert_eq!(output.structs[0].name, "User");
/// assert_eq!(output.queries[0].ret.type_name(), Some("User"));
/// # Ok::<(), oxide_sqlc_core::GenerateError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    schema: &'a Schema,
    settings: &'a Settings,
    mapper: MySqlTypeMapper<'a>,
}

impl<'a> Generator<'a> {
    /// Creates a generator over a schema and its settings.
    #[must_use]
    pub const fn new(schema: &'a Schema, settings: &'a Settings) -> Self {
        Self {
            schema,
            settings,
            mapper: MySqlTypeMapper::new(settings),
        }
    }

    /// Synthesizes the enum types.
    #[must_use]
    pub fn enums(&self) -> Vec<EnumDescriptor> {
        synthesize_enums(self.schema, self.settings)
    }

    /// Synthesizes the table structs, sorted by name.
    pub fn structs(&self, diagnostics: &mut Diagnostics) -> Vec<Arc<StructDescriptor>> {
        synthesize_structs(self.schema, self.settings, &self.mapper, diagnostics)
    }

    /// Binds queries against freshly synthesized table structs.
    pub fn queries(
        &self,
        queries: &[Option<Query>],
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<QueryDescriptor>> {
        let structs = self.structs(diagnostics);
        QueryBinder::new(self.settings, &self.mapper, &structs).build(queries, diagnostics)
    }

    /// Runs a full pass. Table structs are synthesized once and shared by
    /// every query that reuses them.
    pub fn generate(&self, queries: &[Option<Query>]) -> Result<Output> {
        let mut diagnostics = Diagnostics::new();
        let enums = self.enums();
        let structs = self.structs(&mut diagnostics);
        let binder = QueryBinder::new(self.settings, &self.mapper, &structs);
        let queries = binder.build(queries, &mut diagnostics)?;

        debug!(
            enums = enums.len(),
            structs = structs.len(),
            queries = queries.len(),
            diagnostics = diagnostics.len(),
            "generated descriptors"
        );
        Ok(Output {
            enums,
            structs,
            queries,
            diagnostics,
        })
    }
}
