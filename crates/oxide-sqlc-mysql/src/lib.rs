//! # oxide-sqlc-mysql
//!
//! MySQL backend for `oxide-sqlc-core`: infers enum, row and parameter
//! types from a parsed schema and binds every query to them.
//!
//! # How MySQL shapes the generated types
//!
//! - **[ENUM]**: MySQL columns may declare an inline list of literals.
//!   Each such column becomes its own enum type, named after the column
//!   (and the last segment of a multi-word table name) unless a custom
//!   name is configured. A nullable enum gains a `NULL` sentinel constant.
//! - **[Data types]**: native types fall into text, integer, binary,
//!   float/decimal, temporal and boolean categories. `tinyint` is treated
//!   as a boolean, `year` as an integer, and any `decimal(p, s)` as a
//!   float. Nullable columns map to the category's null wrapper.
//! - **Multi-value `IN`**: MySQL has no array binds, so a parameter used
//!   in `IN (...)` is left quoted by the parser and unquoted here, letting
//!   the runtime expand it into one placeholder per element.
//!
//! [ENUM]: https://dev.mysql.com/doc/refman/8.0/en/enum.html
//! [Data types]: https://dev.mysql.com/doc/refman/8.0/en/data-types.html
//!
//! ## Example
//!
//! ```rust
//! use oxide_sqlc_core::{Column, Command, Param, Query, Schema, Settings, Table};
//! use oxide_sqlc_mysql::Generator;
//!
//! let schema = Schema::new().table(
//!     Table::new("users")
//!         .column(Column::new("id", "int").not_null())
//!         .column(Column::enumeration("job_status", ["'APPLIED'", "'PENDING'"])),
//! );
//! let settings = Settings::new();
//! let query = Query::new("GetStatus", Command::One, "SELECT job_status FROM users WHERE id = ?")
//!     .param(Param::new("id", "int"))
//!     .column(Column::enumeration("job_status", ["'APPLIED'", "'PENDING'"]).table("users"));
//!
//! let output = Generator::new(&schema, &settings)
//!     .generate(&[Some(query)])
//!     .unwrap();
//!
//! assert_eq!(output.enums[0].name, "JobStatusType");
//! assert_eq!(output.enums[0].constants.len(), 3);
//! assert_eq!(output.queries[0].ret.type_name(), Some("JobStatusType"));
//! ```

pub mod enums;
pub mod generator;
pub mod queries;
pub mod structs;
pub mod types;

pub use enums::{enum_type_name, synthesize_enums};
pub use generator::{Generator, Output};
pub use queries::{build_queries, QueryBinder};
pub use structs::{columns_to_struct, synthesize_structs, StructItem};
pub use types::{MySqlTypeMapper, NativeType, OPAQUE_TYPE};
