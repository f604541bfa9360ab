//! The seam where a dialect backend plugs its type inference in.

use crate::diagnostics::Diagnostics;
use crate::schema::Column;

/// Maps a column to the name of its target type.
///
/// Implementations must be total: a column they cannot classify still
/// gets an (opaque) type, with the problem recorded in `diagnostics`.
pub trait TypeMapping {
    /// Returns the target type name for `column`.
    fn column_type(&self, column: &Column, diagnostics: &mut Diagnostics) -> String;
}

impl<T: TypeMapping + ?Sized> TypeMapping for &T {
    fn column_type(&self, column: &Column, diagnostics: &mut Diagnostics) -> String {
        (**self).column_type(column, diagnostics)
    }
}
