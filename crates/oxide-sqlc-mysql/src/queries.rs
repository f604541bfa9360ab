//! Binds analyzed queries to the types they take and return.
//!
//! For every query this decides:
//!
//! - how its parameters are passed: nothing, one scalar, or a
//!   `<Method>Params` struct,
//! - what it returns: nothing, one scalar, a table struct that matches the
//!   result columns exactly, or a new `<Method>Row` struct,
//! - whether its SQL text needs the `LIKE ... IN` rewrite.

use std::sync::Arc;

use oxide_sqlc_core::naming::{column_name, lower_title, result_column_name, title};
use oxide_sqlc_core::{
    Column, Diagnostics, FieldDescriptor, GenerateError, Param, Query, QueryDescriptor,
    QueryValue, Result, Settings, StructDescriptor, TypeMapping,
};
use tracing::{debug, trace};

use crate::structs::{columns_to_struct, StructItem};

/// Variable name of a parameter struct.
const ARG_NAME: &str = "arg";

/// Variable name of a returned row struct.
const ROW_NAME: &str = "i";

/// Builds query descriptors against a fixed set of table structs.
#[derive(Debug)]
pub struct QueryBinder<'a, M> {
    settings: &'a Settings,
    mapper: &'a M,
    table_structs: &'a [Arc<StructDescriptor>],
}

impl<'a, M: TypeMapping> QueryBinder<'a, M> {
    /// Creates a binder. `table_structs` are the candidates for row struct
    /// reuse, searched in order.
    #[must_use]
    pub const fn new(
        settings: &'a Settings,
        mapper: &'a M,
        table_structs: &'a [Arc<StructDescriptor>],
    ) -> Self {
        Self {
            settings,
            mapper,
            table_structs,
        }
    }

    /// Builds the descriptors of all queries, sorted by method name.
    ///
    /// Queries without a name or a command are skipped. An empty slot
    /// aborts the whole build with [`GenerateError::MissingQuery`].
    pub fn build(
        &self,
        queries: &[Option<Query>],
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<QueryDescriptor>> {
        let mut descriptors = Vec::with_capacity(queries.len());
        for (index, slot) in queries.iter().enumerate() {
            let query = slot.as_ref().ok_or(GenerateError::MissingQuery {
                index,
                len: queries.len(),
            })?;
            if let Some(descriptor) = self.bind(query, diagnostics) {
                descriptors.push(descriptor);
            }
        }
        descriptors.sort_by(|a, b| a.method_name.cmp(&b.method_name));
        debug!(
            queries = queries.len(),
            bound = descriptors.len(),
            "bound queries"
        );
        Ok(descriptors)
    }

    /// Builds the descriptor of one query, or `None` when the query has
    /// no name or no command.
    pub fn bind(&self, query: &Query, diagnostics: &mut Diagnostics) -> Option<QueryDescriptor> {
        if query.name.is_empty() {
            return None;
        }
        let cmd = query.cmd?;
        let method_name = query.name.clone();

        let (arg, rewritten_sql) = self.bind_params(&method_name, query);
        let ret = self.bind_columns(&method_name, query, diagnostics);

        Some(QueryDescriptor {
            cmd,
            constant_name: title(&format!("{}SQL", query.name)),
            field_name: format!("{}Stmt", lower_title(&query.name)),
            method_name,
            source_name: query.filename.clone(),
            sql: query.sql.clone(),
            rewritten_sql,
            arg,
            ret,
        })
    }

    // ================================================================
    // Parameters
    // ================================================================

    fn bind_params(&self, method_name: &str, query: &Query) -> (QueryValue, Option<String>) {
        match query.params.as_slice() {
            [] => (QueryValue::Absent, None),
            [param] => bind_scalar_param(param, &query.sql),
            params => self.bind_param_struct(method_name, params, &query.sql),
        }
    }

    fn bind_param_struct(
        &self,
        method_name: &str,
        params: &[Param],
        sql: &str,
    ) -> (QueryValue, Option<String>) {
        let items: Vec<_> = params
            .iter()
            .map(|p| StructItem::new(p.name.clone(), p.type_name.clone()))
            .collect();
        let descriptor = columns_to_struct(format!("{method_name}Params"), &items, self.settings);

        let mut local_sql = sql.to_string();
        for (param, field) in params.iter().zip(&descriptor.fields) {
            let replacement = format!("{ARG_NAME}.{}", field.name);
            if let Some((old, new)) = param.like_in.as_ref().and_then(|l| l.replace(&replacement))
            {
                local_sql = local_sql.replacen(&old, &new, 1);
            }
        }

        let value = QueryValue::Struct {
            name: ARG_NAME.to_string(),
            descriptor: Arc::new(descriptor),
            emit: true,
        };
        (value, (local_sql != sql).then_some(local_sql))
    }

    // ================================================================
    // Result columns
    // ================================================================

    fn bind_columns(
        &self,
        method_name: &str,
        query: &Query,
        diagnostics: &mut Diagnostics,
    ) -> QueryValue {
        let types: Vec<String> = query
            .columns
            .iter()
            .map(|c| self.mapper.column_type(c, diagnostics))
            .collect();

        match query.columns.as_slice() {
            [] => QueryValue::Absent,
            [column] => QueryValue::Scalar {
                name: result_column_name(column, 0),
                type_name: types[0].clone(),
            },
            columns => {
                if let Some(reused) = self.find_table_struct(columns, &types) {
                    trace!(query = method_name, row = %reused.name, "reusing table struct");
                    return QueryValue::Struct {
                        name: ROW_NAME.to_string(),
                        descriptor: reused,
                        emit: false,
                    };
                }
                let items: Vec<_> = columns
                    .iter()
                    .zip(types)
                    .enumerate()
                    .map(|(i, (c, ty))| StructItem::new(result_column_name(c, i), ty))
                    .collect();
                let name = query.meta.row_struct_name(format!("{method_name}Row"));
                QueryValue::Struct {
                    name: ROW_NAME.to_string(),
                    descriptor: Arc::new(columns_to_struct(name, &items, self.settings)),
                    emit: true,
                }
            }
        }
    }

    /// Returns the first table struct equivalent to the result columns.
    ///
    /// Only columns that all come from one table can match, and only the
    /// struct of that table can be equivalent to them.
    fn find_table_struct(
        &self,
        columns: &[Column],
        types: &[String],
    ) -> Option<Arc<StructDescriptor>> {
        let table = columns.first()?.table.as_str();
        if table.is_empty() || columns.iter().any(|c| c.table != table) {
            return None;
        }

        let fields = columns
            .iter()
            .zip(types)
            .enumerate()
            .map(|(i, (c, ty))| {
                FieldDescriptor::new(
                    column_name(&result_column_name(c, i), table, self.settings),
                    ty.clone(),
                    String::new(),
                )
            })
            .collect();
        let candidate = StructDescriptor {
            name: String::new(),
            fields,
            table: Some(table.to_string()),
        };

        self.table_structs
            .iter()
            .filter(|s| s.fields.len() == candidate.fields.len())
            .find(|s| s.is_equivalent(&candidate))
            .cloned()
    }
}

/// Binds a single parameter, removing the quotes around its placeholder
/// when it sits in a `LIKE ... IN` pattern.
fn bind_scalar_param(param: &Param, sql: &str) -> (QueryValue, Option<String>) {
    let value = QueryValue::Scalar {
        name: param.variable_name(),
        type_name: param.type_name.clone(),
    };
    let rewritten = param
        .like_in
        .as_ref()
        .and_then(|l| l.replace(""))
        .map(|(old, new)| sql.replacen(&old, &new, 1))
        .filter(|local| local != sql);
    (value, rewritten)
}

/// Builds query descriptors; see [`QueryBinder::build`].
pub fn build_queries<M: TypeMapping>(
    queries: &[Option<Query>],
    table_structs: &[Arc<StructDescriptor>],
    settings: &Settings,
    mapper: &M,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<QueryDescriptor>> {
    QueryBinder::new(settings, mapper, table_structs).build(queries, diagnostics)
}
