//! UUID binding on 16-byte fixed-length arrays.

use parquet::data_type::{FixedLenByteArray, FixedLenByteArrayType};
use uuid::Uuid;

use super::ParquetBinding;
use crate::error::{Error, Result};

impl ParquetBinding for Uuid {
    type Physical = FixedLenByteArrayType;
    const NAME: &'static str = "Uuid";
    fn from_physical(value: &FixedLenByteArray) -> Result<Self> {
        Uuid::from_slice(value.data()).map_err(|e| Error::invalid_value(Self::NAME, e.to_string()))
    }
    fn to_physical(&self) -> Result<FixedLenByteArray> {
        Ok(FixedLenByteArray::from(self.as_bytes().to_vec()))
    }
}

impl_required_element!(Uuid);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_bytes_are_stored_in_order() {
        let id = Uuid::from_u128(0x0011_2233_4455_6677_8899_aabb_ccdd_eeff);
        let stored = id.to_physical().unwrap();
        assert_eq!(stored.data()[0], 0x00);
        assert_eq!(stored.data()[15], 0xff);
        assert_eq!(Uuid::from_physical(&stored).unwrap(), id);
        assert!(Uuid::from_physical(&FixedLenByteArray::from(vec![0; 15])).is_err());
    }
}
