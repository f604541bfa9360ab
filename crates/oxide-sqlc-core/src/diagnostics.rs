//! Non-fatal findings collected during a generation pass.

use core::fmt;

use serde::Serialize;

/// A problem that did not stop generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A column's native type has no mapping; an opaque type was used.
    UnknownType {
        /// Owning table, empty when unknown.
        table: String,
        /// Column name, empty for unnamed result columns.
        column: String,
        /// The unrecognized native type.
        native_type: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType {
                table,
                column,
                native_type,
            } => {
                if table.is_empty() {
                    write!(f, "unknown MySQL type `{native_type}` for column `{column}`")
                } else {
                    write!(
                        f,
                        "unknown MySQL type `{native_type}` for column `{table}.{column}`"
                    )
                }
            }
        }
    }
}

/// Ordered collection of [`Diagnostic`]s, scoped to one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Returns whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterates diagnostics in recording order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = core::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
