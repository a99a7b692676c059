//! Run configuration and its JSON loaders.

use std::fs::File;
use std::io::BufReader;
use std::num::NonZeroUsize;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};
use crate::input::ParserConfig;
use crate::schema::{DataType, ValueRule};

/// Expected type per column.
pub type Schema = IndexMap<String, DataType>;

/// Value rules per column.
pub type Rules = IndexMap<String, ValueRule>;

/// Full configuration for a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SieveConfig {
    /// How the table is loaded.
    pub parser: ParserConfig,
    /// Which checks run and against what.
    pub checks: CheckConfig,
}

impl SieveConfig {
    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_json(path.as_ref(), "configuration")
    }
}

/// Optional check inputs.
///
/// Omitting `schema` or `rules` disables that check. An empty map is the
/// same as omitting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Rules>,
    pub min_rows: NonZeroUsize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            schema: None,
            rules: None,
            min_rows: NonZeroUsize::MIN,
        }
    }
}

impl CheckConfig {
    /// Load check configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_json(path.as_ref(), "check configuration")
    }

    /// Load a bare `{column: type}` map.
    pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
        load_json(path.as_ref(), "schema")
    }

    /// Load a bare `{column: {min, max, allowed}}` map.
    pub fn load_rules(path: impl AsRef<Path>) -> Result<Rules> {
        load_json(path.as_ref(), "rules")
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_min_rows(mut self, min_rows: NonZeroUsize) -> Self {
        self.min_rows = min_rows;
        self
    }

    /// The schema, if one was given and is not empty.
    pub fn active_schema(&self) -> Option<&Schema> {
        self.schema.as_ref().filter(|s| !s.is_empty())
    }

    /// The rules, if any were given and are not empty.
    pub fn active_rules(&self) -> Option<&Rules> {
        self.rules.as_ref().filter(|r| !r.is_empty())
    }
}

fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let file = File::open(path).map_err(|e| SieveError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        SieveError::Config(format!(
            "Failed to parse {} '{}': {}",
            what,
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.min_rows.get(), 1);
        assert!(config.active_schema().is_none());
        assert!(config.active_rules().is_none());
    }

    #[test]
    fn test_empty_maps_are_inactive() {
        let config = CheckConfig::default()
            .with_schema(Schema::new())
            .with_rules(Rules::new());
        assert!(config.active_schema().is_none());
        assert!(config.active_rules().is_none());
    }

    #[test]
    fn test_load_check_config() {
        let file = write_json(
            r#"{
                "schema": {"age": "int", "name": "str"},
                "rules": {"age": {"min": 0, "max": 120}},
                "min_rows": 5
            }"#,
        );
        let config = CheckConfig::load(file.path()).unwrap();

        assert_eq!(config.min_rows.get(), 5);
        let schema = config.active_schema().unwrap();
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["age", "name"]);
        assert_eq!(schema["age"], DataType::Int);
        assert_eq!(config.active_rules().unwrap()["age"].max, Some(120.0));
    }

    #[test]
    fn test_zero_min_rows_rejected() {
        let file = write_json(r#"{"min_rows": 0}"#);
        assert!(matches!(
            CheckConfig::load(file.path()),
            Err(SieveError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let file = write_json(r#"{"age": "integer"}"#);
        assert!(CheckConfig::load_schema(file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CheckConfig::load_rules("/nonexistent/rules.json"),
            Err(SieveError::Io { .. })
        ));
    }

    #[test]
    fn test_load_full_config() {
        let file = write_json(
            r#"{"parser": {"na_values": ["NaN"]}, "checks": {"min_rows": 2}}"#,
        );
        let config = SieveConfig::load(file.path()).unwrap();

        assert_eq!(config.parser.na_values, vec!["NaN"]);
        assert!(config.parser.has_header);
        assert_eq!(config.checks.min_rows.get(), 2);
    }
}
