//! UTF-8 string binding.

use parquet::data_type::{ByteArray, ByteArrayType};

use super::ParquetBinding;
use crate::error::{Error, Result};

impl ParquetBinding for String {
    type Physical = ByteArrayType;
    const NAME: &'static str = "String";
    fn from_physical(value: &ByteArray) -> Result<Self> {
        std::str::from_utf8(value.data())
            .map(str::to_owned)
            .map_err(|e| Error::invalid_value(Self::NAME, e.to_string()))
    }
    fn to_physical(&self) -> Result<ByteArray> {
        Ok(ByteArray::from(self.as_bytes().to_vec()))
    }
}

impl_required_element!(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_is_rejected() {
        let bytes = ByteArray::from(vec![0xff, 0xfe]);
        assert!(matches!(
            String::from_physical(&bytes),
            Err(Error::InvalidValue { target: "String", .. })
        ));
        let ok = "héllo".to_string().to_physical().unwrap();
        assert_eq!(String::from_physical(&ok).unwrap(), "héllo");
    }
}
