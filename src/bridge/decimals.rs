//! Decimal bindings over the four Parquet decimal storages.
//!
//! A decimal value is an unscaled `i128`; precision and scale live on the column
//! descriptor, not on the value. Byte-array storages hold big-endian two's
//! complement integers of any width up to 16 bytes and are sign-extended on read.

use std::{fmt, marker::PhantomData};

use parquet::data_type::{
    ByteArray, ByteArrayType, DataType, FixedLenByteArray, FixedLenByteArrayType, Int32Type,
    Int64Type,
};

use super::{LogicalElement, ParquetBinding};
use crate::{
    error::{Error, Result},
    schema::DECIMAL_BYTE_WIDTH,
};

/// Marker describing how a decimal column is physically stored.
pub trait DecimalStorage: 'static {
    /// Physical Parquet type of the storage.
    type Physical: DataType;
    /// Decode a physical value into an unscaled integer.
    fn decode(value: &<Self::Physical as DataType>::T) -> Result<i128>;
    /// Encode an unscaled integer.
    fn encode(value: i128) -> Result<<Self::Physical as DataType>::T>;
}

/// `FIXED_LEN_BYTE_ARRAY` storage; writes use 16 bytes.
pub enum DecimalFixed {}
impl DecimalStorage for DecimalFixed {
    type Physical = FixedLenByteArrayType;
    fn decode(value: &FixedLenByteArray) -> Result<i128> {
        from_be_bytes(value.data())
    }
    fn encode(value: i128) -> Result<FixedLenByteArray> {
        Ok(FixedLenByteArray::from(value.to_be_bytes().to_vec()))
    }
}

/// `BYTE_ARRAY` storage with minimal-width encoding.
pub enum DecimalBytes {}
impl DecimalStorage for DecimalBytes {
    type Physical = ByteArrayType;
    fn decode(value: &ByteArray) -> Result<i128> {
        from_be_bytes(value.data())
    }
    fn encode(value: i128) -> Result<ByteArray> {
        let bytes = value.to_be_bytes();
        let pad = if value < 0 { 0xff } else { 0x00 };
        // Keep one sign byte: drop leading pad bytes while the next byte keeps the sign.
        let mut start = 0;
        while start < bytes.len() - 1
            && bytes[start] == pad
            && (bytes[start + 1] & 0x80 == pad & 0x80)
        {
            start += 1;
        }
        Ok(ByteArray::from(bytes[start..].to_vec()))
    }
}

/// `INT32` storage (precision up to 9).
pub enum DecimalInt32 {}
impl DecimalStorage for DecimalInt32 {
    type Physical = Int32Type;
    fn decode(value: &i32) -> Result<i128> {
        Ok(i128::from(*value))
    }
    fn encode(value: i128) -> Result<i32> {
        i32::try_from(value)
            .map_err(|_| Error::invalid_value("Decimal", format!("{value} does not fit INT32")))
    }
}

/// `INT64` storage (precision up to 18).
pub enum DecimalInt64 {}
impl DecimalStorage for DecimalInt64 {
    type Physical = Int64Type;
    fn decode(value: &i64) -> Result<i128> {
        Ok(i128::from(*value))
    }
    fn encode(value: i128) -> Result<i64> {
        i64::try_from(value)
            .map_err(|_| Error::invalid_value("Decimal", format!("{value} does not fit INT64")))
    }
}

fn from_be_bytes(bytes: &[u8]) -> Result<i128> {
    let width = DECIMAL_BYTE_WIDTH as usize;
    if bytes.is_empty() || bytes.len() > width {
        return Err(Error::invalid_value(
            "Decimal",
            format!("unsupported byte width {}", bytes.len()),
        ));
    }
    let pad = if bytes[0] & 0x80 != 0 { 0xff } else { 0x00 };
    let mut buf = [pad; 16];
    buf[width - bytes.len()..].copy_from_slice(bytes);
    Ok(i128::from_be_bytes(buf))
}

/// Fixed-point decimal held as an unscaled 128-bit integer.
pub struct Decimal<S: DecimalStorage = DecimalFixed>(i128, PhantomData<S>);

impl<S: DecimalStorage> Decimal<S> {
    /// Construct a decimal from an unscaled integer value.
    #[inline]
    #[must_use]
    pub fn new(value: i128) -> Self {
        Self(value, PhantomData)
    }
    /// Return the unscaled integer value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> i128 {
        self.0
    }
}

impl<S: DecimalStorage> Clone for Decimal<S> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<S: DecimalStorage> Copy for Decimal<S> {}

impl<S: DecimalStorage> PartialEq for Decimal<S> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<S: DecimalStorage> fmt::Debug for Decimal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Decimal").field(&self.0).finish()
    }
}

impl<S: DecimalStorage> ParquetBinding for Decimal<S> {
    type Physical = S::Physical;
    const NAME: &'static str = "Decimal";
    fn from_physical(value: &<S::Physical as DataType>::T) -> Result<Self> {
        S::decode(value).map(Self::new)
    }
    fn to_physical(&self) -> Result<<S::Physical as DataType>::T> {
        S::encode(self.0)
    }
}

impl<S: DecimalStorage> LogicalElement for Decimal<S> {
    type Value = Self;
    const NULLABLE: bool = false;
    fn from_option(value: Option<Self>) -> Option<Self> {
        value
    }
    fn as_option(&self) -> Option<&Self> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_storage_round_trips_sign() {
        for v in [0i128, 1, -1, 12_345_678_901_234_567_890, i128::MIN, i128::MAX] {
            let stored = Decimal::<DecimalFixed>::new(v).to_physical().unwrap();
            assert_eq!(stored.data().len(), 16);
            assert_eq!(Decimal::<DecimalFixed>::from_physical(&stored).unwrap().value(), v);
        }
    }

    #[test]
    fn short_byte_arrays_are_sign_extended() {
        let negative = ByteArray::from(vec![0xff, 0x85]);
        assert_eq!(Decimal::<DecimalBytes>::from_physical(&negative).unwrap().value(), -123);
        let positive = FixedLenByteArray::from(vec![0x00, 0x80]);
        assert_eq!(Decimal::<DecimalFixed>::from_physical(&positive).unwrap().value(), 128);
    }

    #[test]
    fn byte_storage_uses_minimal_width() {
        assert_eq!(DecimalBytes::encode(127).unwrap().data(), &[0x7f]);
        assert_eq!(DecimalBytes::encode(128).unwrap().data(), &[0x00, 0x80]);
        assert_eq!(DecimalBytes::encode(-128).unwrap().data(), &[0x80]);
        assert_eq!(DecimalBytes::encode(-129).unwrap().data(), &[0xff, 0x7f]);
        assert_eq!(DecimalBytes::encode(0).unwrap().data(), &[0x00]);
    }

    #[test]
    fn integer_storages_check_width() {
        assert_eq!(DecimalInt32::decode(&-5).unwrap(), -5);
        assert!(DecimalInt32::encode(i128::from(i32::MAX) + 1).is_err());
        assert_eq!(DecimalInt64::encode(-7).unwrap(), -7);
        assert!(from_be_bytes(&[0; 17]).is_err());
    }
}
