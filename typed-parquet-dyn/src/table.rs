//! Ordered set of equal-length, uniquely named dynamic columns.

use std::collections::HashSet;

use crate::{DynColumn, DynError};

/// A dynamic table.
#[derive(Debug, Clone, PartialEq)]
pub struct DynTable {
    columns: Vec<DynColumn>,
    num_rows: usize,
}

impl DynTable {
    /// Assemble a table, checking that names are unique and lengths agree.
    ///
    /// # Errors
    /// Returns [`DynError::DuplicateColumn`] or [`DynError::LengthMismatch`].
    pub fn try_new(columns: Vec<DynColumn>) -> Result<Self, DynError> {
        let num_rows = columns.first().map_or(0, DynColumn::len);
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(DynError::DuplicateColumn {
                    name: column.name().to_string(),
                });
            }
            if column.len() != num_rows {
                return Err(DynError::LengthMismatch {
                    column: column.name().to_string(),
                    expected: num_rows,
                    actual: column.len(),
                });
            }
        }
        Ok(Self { columns, num_rows })
    }

    /// Number of rows shared by every column.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Columns in order.
    #[inline]
    pub fn columns(&self) -> &[DynColumn] {
        &self.columns
    }

    /// Column at position `index`, if any.
    pub fn column(&self, index: usize) -> Option<&DynColumn> {
        self.columns.get(index)
    }

    /// Column named `name`.
    ///
    /// # Errors
    /// Returns [`DynError::InvalidColumn`] when no column has that name.
    pub fn column_by_name(&self, name: &str) -> Result<&DynColumn, DynError> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| DynError::InvalidColumn {
                name: name.to_string(),
            })
    }

    /// Consume the table, returning its columns.
    pub fn into_columns(self) -> Vec<DynColumn> {
        self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnData, ColumnKind};

    #[test]
    fn rejects_duplicates_and_ragged_columns() {
        let a = DynColumn::new_null("a", &ColumnKind::Int32, 2);
        let err = DynTable::try_new(vec![a.clone(), a.clone()]).unwrap_err();
        assert!(matches!(err, DynError::DuplicateColumn { ref name } if name == "a"));

        let b = DynColumn::new("b", ColumnData::Bool(vec![true].into()));
        let err = DynTable::try_new(vec![a, b]).unwrap_err();
        assert!(matches!(
            err,
            DynError::LengthMismatch { expected: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn lookup_by_name() {
        let table = DynTable::try_new(vec![DynColumn::new_null("x", &ColumnKind::Utf8, 3)])
            .unwrap();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.column_by_name("x").unwrap().kind(), ColumnKind::Utf8);
        assert!(matches!(
            table.column_by_name("y"),
            Err(DynError::InvalidColumn { .. })
        ));
        assert_eq!(DynTable::try_new(Vec::new()).unwrap().num_rows(), 0);
    }
}
