//! Application Configuration
//!
//! Resolved once at startup from the app directories and environment.

use std::path::{Path, PathBuf};

/// Overrides the database file location
pub const DB_PATH_ENV: &str = "FLOW_CRM_DB";
/// Set to `1` to insert demo rows into empty tables
pub const SEED_ENV: &str = "FLOW_CRM_SEED";

const DB_FILE_NAME: &str = "flow_crm.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub seed_demo_data: bool,
}

impl AppConfig {
    /// Build from the platform directories, applying environment overrides
    pub fn resolve(app_data_dir: &Path, log_dir: &Path) -> Self {
        Self::from_lookup(app_data_dir, log_dir, |key| std::env::var(key).ok())
    }

    fn from_lookup(app_data_dir: &Path, log_dir: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup(DB_PATH_ENV)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| app_data_dir.join(DB_FILE_NAME));
        let seed_demo_data = lookup(SEED_ENV).is_some_and(|v| v.trim() == "1");

        Self {
            db_path,
            log_dir: log_dir.to_path_buf(),
            seed_demo_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve_with(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(Path::new("/data"), Path::new("/logs"), |k| vars.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = resolve_with(&[]);
        assert_eq!(config.db_path, PathBuf::from("/data/flow_crm.db"));
        assert_eq!(config.log_dir, PathBuf::from("/logs"));
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_env_overrides() {
        let config = resolve_with(&[(DB_PATH_ENV, "/tmp/other.db"), (SEED_ENV, "1")]);
        assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
        assert!(config.seed_demo_data);

        let config = resolve_with(&[(DB_PATH_ENV, "  "), (SEED_ENV, "yes")]);
        assert_eq!(config.db_path, PathBuf::from("/data/flow_crm.db"));
        assert!(!config.seed_demo_data);
    }
}
