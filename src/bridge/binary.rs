//! Opaque byte string binding (`Vec<u8>` on un-annotated `BYTE_ARRAY`).

use parquet::data_type::{ByteArray, ByteArrayType};

use super::ParquetBinding;
use crate::error::Result;

impl ParquetBinding for Vec<u8> {
    type Physical = ByteArrayType;
    const NAME: &'static str = "Vec<u8>";
    fn from_physical(value: &ByteArray) -> Result<Self> {
        Ok(value.data().to_vec())
    }
    fn to_physical(&self) -> Result<ByteArray> {
        Ok(ByteArray::from(self.clone()))
    }
}

impl_required_element!(Vec<u8>);
