//! Core type definitions for expected and stored column types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column data type, as declared in a schema or inferred from values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Whole numbers.
    Int,
    /// Decimal numbers.
    Float,
    /// Free text. Every value is valid.
    Str,
    /// Boolean literals (true/false, yes/no, 1/0, ...).
    Bool,
    /// Calendar dates in one of the recognised layouts.
    Datetime,
}

impl DataType {
    /// Name used in reports and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Str => "str",
            DataType::Bool => "bool",
            DataType::Datetime => "datetime",
        }
    }

    /// Storage representations that satisfy this declared type.
    pub fn storage_types(&self) -> &'static [StorageType] {
        match self {
            DataType::Int => &[StorageType::Int64, StorageType::Int32],
            DataType::Float => &[StorageType::Float64, StorageType::Float32],
            DataType::Str => &[StorageType::Object, StorageType::String],
            DataType::Bool => &[StorageType::Bool],
            DataType::Datetime => &[StorageType::Datetime64],
        }
    }

    /// Returns true if a column stored as `storage` satisfies this type.
    pub fn accepts_storage(&self, storage: StorageType) -> bool {
        self.storage_types().contains(&storage)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a loaded column is represented, analogous to a dataframe dtype.
///
/// The loader only ever produces `Int64`, `Float64`, `Bool`, `Datetime64`
/// and `Object`; the narrower variants exist so declared types map onto
/// the full set of names a caller may see from other tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageType {
    #[serde(rename = "int64")]
    Int64,
    #[serde(rename = "int32")]
    Int32,
    #[serde(rename = "float64")]
    Float64,
    #[serde(rename = "float32")]
    Float32,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "datetime64[ns]")]
    Datetime64,
    #[serde(rename = "string")]
    String,
    /// Untyped text storage.
    #[serde(rename = "object")]
    Object,
}

impl StorageType {
    /// Name used in reports and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Int64 => "int64",
            StorageType::Int32 => "int32",
            StorageType::Float64 => "float64",
            StorageType::Float32 => "float32",
            StorageType::Bool => "bool",
            StorageType::Datetime64 => "datetime64[ns]",
            StorageType::String => "string",
            StorageType::Object => "object",
        }
    }

    /// Returns true if this storage holds numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            StorageType::Int64 | StorageType::Int32 | StorageType::Float64 | StorageType::Float32
        )
    }

    /// Returns true if values are kept as untyped text.
    pub fn is_untyped(&self) -> bool {
        matches!(self, StorageType::Object | StorageType::String)
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mapping() {
        assert!(DataType::Int.accepts_storage(StorageType::Int64));
        assert!(DataType::Int.accepts_storage(StorageType::Int32));
        assert!(!DataType::Int.accepts_storage(StorageType::Float64));
        assert!(DataType::Str.accepts_storage(StorageType::Object));
        assert!(!DataType::Datetime.accepts_storage(StorageType::Object));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&DataType::Datetime).unwrap(), "\"datetime\"");
        assert_eq!(
            serde_json::to_string(&StorageType::Datetime64).unwrap(),
            "\"datetime64[ns]\""
        );
        let parsed: DataType = serde_json::from_str("\"int\"").unwrap();
        assert_eq!(parsed, DataType::Int);
        assert!(serde_json::from_str::<DataType>("\"integer\"").is_err());
    }
}
