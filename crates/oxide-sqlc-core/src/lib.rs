//! # oxide-sqlc-core
//!
//! Dialect-neutral model for typed SQL code generation.
//!
//! This crate provides:
//! - The input model produced by an upstream SQL parser: [`Schema`],
//!   [`Table`], [`Column`], [`Query`] and [`Param`]
//! - The output model consumed by a template emitter: [`EnumDescriptor`],
//!   [`StructDescriptor`] and [`QueryDescriptor`]
//! - Pure naming helpers shared by every dialect backend
//! - Generator [`Settings`] with ordered [`OverrideRule`]s
//! - The [`TypeMapping`] trait a dialect backend implements
//!
//! ## Building a schema
//!
//! ```rust
//! use oxide_sqlc_core::{Column, Schema, Table};
//!
//! let schema = Schema::new().table(
//!     Table::new("users")
//!         .column(Column::new("id", "int").not_null())
//!         .column(Column::new("last_name", "varchar")),
//! );
//!
//! let users = schema.get("users").unwrap();
//! assert_eq!(users.columns[0].table, "users");
//! assert!(users.columns[1].is_nullable());
//! ```
//!
//! ## Naming
//!
//! ```rust
//! use oxide_sqlc_core::naming::{arg_name, enum_constant_name};
//!
//! assert_eq!(arg_name("get_users_by_id"), "getUsersByID");
//! assert_eq!(enum_constant_name("status", "on"), "StatusTypeOn");
//! ```

pub mod descriptor;
pub mod diagnostics;
pub mod error;
pub mod mapping;
pub mod naming;
pub mod query;
pub mod schema;
pub mod settings;

pub use descriptor::{
    EnumConstant, EnumDescriptor, FieldDescriptor, QueryDescriptor, QueryValue,
    StructDescriptor,
};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{GenerateError, Result};
pub use mapping::TypeMapping;
pub use query::{Command, LikeIn, Param, Query, QueryMeta};
pub use schema::{Column, Schema, Table};
pub use settings::{ColumnSettings, OverrideRule, Settings, TableSettings};
