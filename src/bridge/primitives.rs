//! Primitive Parquet bindings (integers, floats, bool, f16).

use half::f16;
use parquet::data_type::{
    BoolType, DoubleType, FixedLenByteArray, FixedLenByteArrayType, FloatType, Int32Type,
    Int64Type,
};

use super::ParquetBinding;
use crate::error::{Error, Result};

// Values whose physical representation is the Rust type itself
macro_rules! impl_identity_binding {
    ($rust:ty, $ptype:ty) => {
        impl ParquetBinding for $rust {
            type Physical = $ptype;
            const NAME: &'static str = stringify!($rust);
            #[inline]
            fn from_physical(value: &$rust) -> Result<Self> {
                Ok(*value)
            }
            #[inline]
            fn to_physical(&self) -> Result<$rust> {
                Ok(*self)
            }
        }
    };
}

impl_identity_binding!(bool, BoolType);
impl_identity_binding!(i32, Int32Type);
impl_identity_binding!(i64, Int64Type);
impl_identity_binding!(f32, FloatType);
impl_identity_binding!(f64, DoubleType);

// Narrow integers widened into INT32; reading checks the range
macro_rules! impl_narrow_binding {
    ($rust:ty) => {
        impl ParquetBinding for $rust {
            type Physical = Int32Type;
            const NAME: &'static str = stringify!($rust);
            #[inline]
            fn from_physical(value: &i32) -> Result<Self> {
                <$rust>::try_from(*value).map_err(|_| {
                    Error::invalid_value(Self::NAME, format!("{value} is out of range"))
                })
            }
            #[inline]
            fn to_physical(&self) -> Result<i32> {
                Ok(i32::from(*self))
            }
        }
    };
}

impl_narrow_binding!(i8);
impl_narrow_binding!(i16);
impl_narrow_binding!(u8);
impl_narrow_binding!(u16);

// Full-width unsigned integers share the bit pattern of their signed storage
impl ParquetBinding for u32 {
    type Physical = Int32Type;
    const NAME: &'static str = "u32";
    #[inline]
    fn from_physical(value: &i32) -> Result<Self> {
        Ok(*value as u32)
    }
    #[inline]
    fn to_physical(&self) -> Result<i32> {
        Ok(*self as i32)
    }
}

impl ParquetBinding for u64 {
    type Physical = Int64Type;
    const NAME: &'static str = "u64";
    #[inline]
    fn from_physical(value: &i64) -> Result<Self> {
        Ok(*value as u64)
    }
    #[inline]
    fn to_physical(&self) -> Result<i64> {
        Ok(*self as i64)
    }
}

// Float16 (half-precision), two little-endian bytes
impl ParquetBinding for f16 {
    type Physical = FixedLenByteArrayType;
    const NAME: &'static str = "f16";
    fn from_physical(value: &FixedLenByteArray) -> Result<Self> {
        let bytes: [u8; 2] = value.data().try_into().map_err(|_| {
            Error::invalid_value(
                Self::NAME,
                format!("expected 2 bytes, got {}", value.data().len()),
            )
        })?;
        Ok(f16::from_le_bytes(bytes))
    }
    fn to_physical(&self) -> Result<FixedLenByteArray> {
        Ok(FixedLenByteArray::from(self.to_le_bytes().to_vec()))
    }
}

impl_required_element!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f16, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_integers_reject_out_of_range() {
        assert_eq!(u8::from_physical(&255).unwrap(), 255);
        assert!(u8::from_physical(&256).is_err());
        assert!(u8::from_physical(&-1).is_err());
        assert_eq!(i8::from_physical(&-128).unwrap(), -128);
        let err = i16::from_physical(&40_000).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { target: "i16", .. }));
    }

    #[test]
    fn unsigned_full_width_preserves_bits() {
        let stored = u32::MAX.to_physical().unwrap();
        assert_eq!(stored, -1);
        assert_eq!(u32::from_physical(&stored).unwrap(), u32::MAX);
        let stored = u64::MAX.to_physical().unwrap();
        assert_eq!(u64::from_physical(&stored).unwrap(), u64::MAX);
    }

    #[test]
    fn f16_uses_two_little_endian_bytes() {
        let value = f16::from_f32(1.5);
        let stored = value.to_physical().unwrap();
        assert_eq!(stored.data(), &value.to_le_bytes());
        assert_eq!(f16::from_physical(&stored).unwrap(), value);
        assert!(f16::from_physical(&FixedLenByteArray::from(vec![1, 2, 3])).is_err());
    }
}
