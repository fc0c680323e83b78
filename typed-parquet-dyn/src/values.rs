//! Fixed-length, nullable value storage backing a dynamic column.

use std::fmt;

use arrow_buffer::{BooleanBufferBuilder, NullBuffer};

use crate::DynError;

/// Values of one backing type plus a validity bitmap.
///
/// Null slots hold `N::default()` so the value vector stays dense and randomly
/// addressable.
pub struct ColumnValues<N> {
    values: Vec<N>,
    validity: BooleanBufferBuilder,
    null_count: usize,
}

impl<N: Clone + Default> ColumnValues<N> {
    /// Create `len` null slots.
    pub fn new_null(len: usize) -> Self {
        let mut validity = BooleanBufferBuilder::new(len);
        validity.append_n(len, false);
        Self {
            values: vec![N::default(); len],
            validity,
            null_count: len,
        }
    }

    /// Create an empty storage with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            validity: BooleanBufferBuilder::new(capacity),
            null_count: 0,
        }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of null slots.
    #[inline]
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    /// Whether slot `index` holds a value. Out-of-range indices are reported as null.
    #[inline]
    pub fn is_valid(&self, index: usize) -> bool {
        index < self.len() && self.validity.get_bit(index)
    }

    /// Read slot `index`.
    ///
    /// # Errors
    /// Returns [`DynError::OutOfBounds`] when `index >= len`.
    pub fn get(&self, index: usize) -> Result<Option<&N>, DynError> {
        if index >= self.len() {
            return Err(DynError::out_of_bounds("row", index, self.len()));
        }
        Ok(self.validity.get_bit(index).then(|| &self.values[index]))
    }

    /// Overwrite slot `index`; `None` makes it null.
    ///
    /// # Errors
    /// Returns [`DynError::OutOfBounds`] when `index >= len`.
    pub fn set(&mut self, index: usize, value: Option<N>) -> Result<(), DynError> {
        if index >= self.len() {
            return Err(DynError::out_of_bounds("row", index, self.len()));
        }
        let was_valid = self.validity.get_bit(index);
        match value {
            Some(v) => {
                self.values[index] = v;
                self.validity.set_bit(index, true);
                if !was_valid {
                    self.null_count -= 1;
                }
            }
            None => {
                self.values[index] = N::default();
                self.validity.set_bit(index, false);
                if was_valid {
                    self.null_count += 1;
                }
            }
        }
        Ok(())
    }

    /// Append a slot.
    pub fn push(&mut self, value: Option<N>) {
        match value {
            Some(v) => {
                self.values.push(v);
                self.validity.append(true);
            }
            None => {
                self.values.push(N::default());
                self.validity.append(false);
                self.null_count += 1;
            }
        }
    }

    /// Iterate over the slots.
    pub fn iter(&self) -> impl Iterator<Item = Option<&N>> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| self.validity.get_bit(i).then_some(v))
    }

    /// Dense values, with `N::default()` in null slots.
    #[inline]
    pub fn values(&self) -> &[N] {
        &self.values
    }

    /// Arrow validity buffer, `None` when no slot is null.
    pub fn nulls(&self) -> Option<NullBuffer> {
        (self.null_count > 0).then(|| NullBuffer::new(self.validity.finish_cloned()))
    }
}

impl<N: Clone + Default> Clone for ColumnValues<N> {
    fn clone(&self) -> Self {
        self.iter().map(|v| v.cloned()).collect()
    }
}

impl<N: Clone + Default + fmt::Debug> fmt::Debug for ColumnValues<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<N: Clone + Default + PartialEq> PartialEq for ColumnValues<N> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<N: Clone + Default> FromIterator<Option<N>> for ColumnValues<N> {
    fn from_iter<I: IntoIterator<Item = Option<N>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = Self::with_capacity(iter.size_hint().0);
        for value in iter {
            out.push(value);
        }
        out
    }
}

impl<N: Clone + Default> From<Vec<Option<N>>> for ColumnValues<N> {
    fn from(values: Vec<Option<N>>) -> Self {
        values.into_iter().collect()
    }
}

impl<N: Clone + Default> From<Vec<N>> for ColumnValues<N> {
    fn from(values: Vec<N>) -> Self {
        let mut validity = BooleanBufferBuilder::new(values.len());
        validity.append_n(values.len(), true);
        Self {
            values,
            validity,
            null_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_null_is_all_null() {
        let values = ColumnValues::<i32>::new_null(3);
        assert_eq!(values.len(), 3);
        assert_eq!(values.null_count(), 3);
        assert!(values.iter().all(|v| v.is_none()));
    }

    #[test]
    fn set_tracks_null_count() {
        let mut values = ColumnValues::<String>::new_null(2);
        values.set(0, Some("a".into())).unwrap();
        assert_eq!(values.null_count(), 1);
        values.set(0, Some("b".into())).unwrap();
        assert_eq!(values.null_count(), 1);
        values.set(0, None).unwrap();
        values.set(1, None).unwrap();
        assert_eq!(values.null_count(), 2);
        assert!(matches!(
            values.set(2, None),
            Err(DynError::OutOfBounds { index: 2, len: 2, .. })
        ));
    }

    #[test]
    fn zero_is_not_null() {
        let values = ColumnValues::from(vec![Some(0i64), None, Some(0)]);
        assert_eq!(values.get(0).unwrap(), Some(&0));
        assert_eq!(values.get(1).unwrap(), None);
        assert_eq!(values.null_count(), 1);
        let nulls = values.nulls().unwrap();
        assert!(nulls.is_valid(0));
        assert!(nulls.is_null(1));
        assert!(ColumnValues::from(vec![1u8, 2]).nulls().is_none());
    }

    #[test]
    fn clone_and_eq_ignore_placeholders() {
        let a = ColumnValues::from(vec![Some(1u16), None]);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, ColumnValues::from(vec![1u16, 0]));
    }
}
