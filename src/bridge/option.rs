//! `LogicalElement` for nullable elements.
//!
//! `Option<T>` maps `None` to a Parquet null (definition level below the maximum)
//! and `Some(v)` to a present value, so absent values are distinguishable from every
//! present one including zero and the empty string.

use super::{LogicalElement, ParquetBinding};

impl<T> LogicalElement for Option<T>
where
    T: ParquetBinding,
{
    type Value = T;
    const NULLABLE: bool = true;

    #[inline]
    fn from_option(value: Option<T>) -> Option<Self> {
        Some(value)
    }

    #[inline]
    fn as_option(&self) -> Option<&T> {
        self.as_ref()
    }
}
