//! Database environment configuration.
//!
//! Environments are named entries in a `db_config.json` file next to the
//! binary, each pointing at a DuckDB database file:
//!
//! ```json
//! {
//!   "environments": {
//!     "local_phil_earthquakes": { "path": "db/earthquakes.duckdb" }
//!   }
//! }
//! ```

use crate::error::ScrapeError;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path, path::PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub environments: HashMap<String, DbEnvironment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DbEnvironment {
    /// Path of the DuckDB database file for this environment.
    pub path: PathBuf,
}

impl DbConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Look up a named environment.
    pub fn environment(&self, name: &str) -> Result<&DbEnvironment, ScrapeError> {
        self.environments
            .get(name)
            .ok_or_else(|| ScrapeError::UnknownEnvironment {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_environments() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"{{"environments": {{"local_phil_earthquakes": {{"path": "db/eq.duckdb"}}}}}}"#
        )
        .unwrap();

        let cfg = DbConfig::load(tmp.path()).unwrap();
        let env = cfg.environment("local_phil_earthquakes").unwrap();
        assert_eq!(env.path, PathBuf::from("db/eq.duckdb"));
    }

    #[test]
    fn unknown_environment_is_an_error() {
        let cfg = DbConfig {
            environments: HashMap::new(),
        };
        let err = cfg.environment("prod").unwrap_err();
        assert!(matches!(err, ScrapeError::UnknownEnvironment { .. }));
    }
}
