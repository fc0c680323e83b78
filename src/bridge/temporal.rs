//! Temporal types: Date, Time and Timestamp.

use std::{fmt, marker::PhantomData};

use parquet::data_type::{DataType, Int32Type, Int64Type};

use super::{LogicalElement, ParquetBinding};
use crate::{
    error::{Error, Result},
    schema::TimeUnit,
};

// ---------- Units ----------

/// Marker describing a temporal unit.
pub trait TimeUnitSpec: 'static {
    /// The catalogue unit of this marker.
    const UNIT: TimeUnit;
}

/// Marker describing how a time-of-day of a given unit is stored.
pub trait TimeStorage: TimeUnitSpec {
    /// Physical type: `INT32` for milliseconds, `INT64` otherwise.
    type Physical: DataType;
    /// Widen a stored value.
    fn decode(value: &<Self::Physical as DataType>::T) -> i64;
    /// Narrow a value into storage.
    fn encode(value: i64) -> Result<<Self::Physical as DataType>::T>;
}

/// Milliseconds.
pub enum Millisecond {}
impl TimeUnitSpec for Millisecond {
    const UNIT: TimeUnit = TimeUnit::Millis;
}
impl TimeStorage for Millisecond {
    type Physical = Int32Type;
    fn decode(value: &i32) -> i64 {
        i64::from(*value)
    }
    fn encode(value: i64) -> Result<i32> {
        i32::try_from(value).map_err(|_| {
            Error::invalid_value("Time", format!("{value} ms does not fit INT32 storage"))
        })
    }
}

/// Microseconds.
pub enum Microsecond {}
impl TimeUnitSpec for Microsecond {
    const UNIT: TimeUnit = TimeUnit::Micros;
}
impl TimeStorage for Microsecond {
    type Physical = Int64Type;
    fn decode(value: &i64) -> i64 {
        *value
    }
    fn encode(value: i64) -> Result<i64> {
        Ok(value)
    }
}

/// Nanoseconds.
pub enum Nanosecond {}
impl TimeUnitSpec for Nanosecond {
    const UNIT: TimeUnit = TimeUnit::Nanos;
}
impl TimeStorage for Nanosecond {
    type Physical = Int64Type;
    fn decode(value: &i64) -> i64 {
        *value
    }
    fn encode(value: i64) -> Result<i64> {
        Ok(value)
    }
}

// ---------- Date ----------

/// Days since the UNIX epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(pub i32);

impl ParquetBinding for Date {
    type Physical = Int32Type;
    const NAME: &'static str = "Date";
    fn from_physical(value: &i32) -> Result<Self> {
        Ok(Self(*value))
    }
    fn to_physical(&self) -> Result<i32> {
        Ok(self.0)
    }
}

impl_required_element!(Date);

// ---------- Time / Timestamp ----------

macro_rules! unit_value {
    ($(#[$doc:meta])* $name:ident, $bound:ident) => {
        $(#[$doc])*
        pub struct $name<U: $bound>(pub i64, pub PhantomData<U>);

        impl<U: $bound> $name<U> {
            /// Construct from a count of units.
            #[inline]
            #[must_use]
            pub fn new(value: i64) -> Self {
                Self(value, PhantomData)
            }
        }

        impl<U: $bound> Clone for $name<U> {
            fn clone(&self) -> Self {
                *self
            }
        }
        impl<U: $bound> Copy for $name<U> {}

        impl<U: $bound> PartialEq for $name<U> {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl<U: $bound> fmt::Debug for $name<U> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}{})", stringify!($name), self.0, U::UNIT)
            }
        }

        impl<U: $bound> LogicalElement for $name<U> {
            type Value = Self;
            const NULLABLE: bool = false;
            fn from_option(value: Option<Self>) -> Option<Self> {
                value
            }
            fn as_option(&self) -> Option<&Self> {
                Some(self)
            }
        }
    };
}

unit_value!(
    /// Time of day since midnight, in units of `U`.
    Time,
    TimeStorage
);
unit_value!(
    /// Instant since the UNIX epoch, in units of `U`.
    Timestamp,
    TimeUnitSpec
);

impl<U: TimeStorage> ParquetBinding for Time<U> {
    type Physical = U::Physical;
    const NAME: &'static str = "Time";
    fn from_physical(value: &<U::Physical as DataType>::T) -> Result<Self> {
        Ok(Self::new(U::decode(value)))
    }
    fn to_physical(&self) -> Result<<U::Physical as DataType>::T> {
        U::encode(self.0)
    }
}

impl<U: TimeUnitSpec> ParquetBinding for Timestamp<U> {
    type Physical = Int64Type;
    const NAME: &'static str = "Timestamp";
    fn from_physical(value: &i64) -> Result<Self> {
        Ok(Self::new(*value))
    }
    fn to_physical(&self) -> Result<i64> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millisecond_time_narrows_to_int32() {
        let t = Time::<Millisecond>::new(86_399_999);
        assert_eq!(t.to_physical().unwrap(), 86_399_999i32);
        assert!(Time::<Millisecond>::new(i64::MAX).to_physical().is_err());
        assert_eq!(Time::<Nanosecond>::new(i64::MAX).to_physical().unwrap(), i64::MAX);
    }

    #[test]
    fn debug_shows_unit() {
        assert_eq!(format!("{:?}", Timestamp::<Microsecond>::new(5)), "Timestamp(5us)");
    }
}
