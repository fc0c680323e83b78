//! Bridge from Rust element types to Parquet physical values.
//!
//! This module provides a compile-time mapping from Rust value types to the
//! `parquet` crate's physical [`DataType`]s, so a typed column stream never has to
//! match on a physical type per value.
//!
//! - Core trait: [`ParquetBinding`] (Rust type ↔ physical value).
//! - Element shape: [`LogicalElement`], implemented for every binding `T` (required
//!   columns) and for `Option<T>` (nullable columns).
//! - Primitives: `bool`, `i{8,16,32,64}`, `u{8,16,32,64}`, `f16`, `f32`, `f64`.
//! - Byte strings: `String` (UTF-8 validated) and `Vec<u8>`.
//! - Decimals: [`Decimal<S>`] over any of the four decimal storages.
//! - Temporal: [`Date`], [`Time<U>`] and [`Timestamp<U>`] with unit markers
//!   ([`Millisecond`], [`Microsecond`], [`Nanosecond`]).
//! - Identifiers: `uuid::Uuid` on 16-byte fixed-length arrays.
//!
//! [`column`] holds the typed streams built on these traits.

use std::fmt::Debug;

use parquet::data_type::DataType;

use crate::error::Result;

/// Binding from a Rust value type to a Parquet physical type.
///
/// Conversions are fallible in both directions: a physical value may not fit the
/// element type (a narrow integer out of range, invalid UTF-8, a wrong byte width),
/// and some element values have no physical encoding.
pub trait ParquetBinding: Sized + Clone + Debug + PartialEq {
    /// Parquet physical type the values are stored as.
    type Physical: DataType;

    /// Short name used in conversion errors.
    const NAME: &'static str;

    /// Convert a decoded physical value into this element type.
    ///
    /// # Errors
    /// Returns [`Error::InvalidValue`](crate::error::Error::InvalidValue) when the
    /// physical value is not representable.
    fn from_physical(value: &<Self::Physical as DataType>::T) -> Result<Self>;

    /// Convert this element into the physical value written to the file.
    ///
    /// # Errors
    /// Returns [`Error::InvalidValue`](crate::error::Error::InvalidValue) when the
    /// value has no physical encoding.
    fn to_physical(&self) -> Result<<Self::Physical as DataType>::T>;
}

/// Shape of a batch element: a required value or a nullable one.
pub trait LogicalElement: Sized + Clone + Debug {
    /// Underlying non-null value type.
    type Value: ParquetBinding;

    /// Whether this element shape can represent an absent value.
    const NULLABLE: bool;

    /// Wrap a decoded value. Returns `None` when `value` is absent and this shape is
    /// required.
    fn from_option(value: Option<Self::Value>) -> Option<Self>;

    /// Borrow the present value, if any.
    fn as_option(&self) -> Option<&Self::Value>;
}

macro_rules! impl_required_element {
    ($($rust:ty),* $(,)?) => {
        $(
            impl $crate::bridge::LogicalElement for $rust {
                type Value = $rust;
                const NULLABLE: bool = false;
                #[inline]
                fn from_option(value: Option<Self::Value>) -> Option<Self> {
                    value
                }
                #[inline]
                fn as_option(&self) -> Option<&Self::Value> {
                    Some(self)
                }
            }
        )*
    };
}

pub mod column;

mod binary;
mod decimals;
mod identifiers;
mod option;
mod primitives;
mod strings;
mod temporal;

// Public re-exports for convenience
pub use column::{LogicalColumnReader, LogicalColumnWriter, TypedBatch};
pub use decimals::{
    Decimal, DecimalBytes, DecimalFixed, DecimalInt32, DecimalInt64, DecimalStorage,
};
pub use temporal::{
    Date, Microsecond, Millisecond, Nanosecond, Time, TimeStorage, TimeUnitSpec, Timestamp,
};
