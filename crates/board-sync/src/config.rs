//! Board Configuration
//!
//! Column definitions for one entity type. Column order is fixed here and
//! never derived from the data.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ConfigError;

/// One status column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Status value stored on the remote (e.g. "PROPOSAL SENT")
    pub key: String,
    /// Display title
    pub title: String,
    /// Accent color (hex)
    pub color: String,
}

impl ColumnDef {
    pub fn new(key: &str, title: &str, color: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            color: color.to_string(),
        }
    }
}

/// Ordered columns plus the fallback column for unknown statuses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    name: String,
    columns: Vec<ColumnDef>,
    default_index: usize,
}

impl BoardConfig {
    pub fn new(name: &str, columns: Vec<ColumnDef>, default_key: &str) -> Result<Self, ConfigError> {
        if columns.is_empty() {
            return Err(ConfigError::NoColumns(name.to_string()));
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key.to_ascii_uppercase()) {
                return Err(ConfigError::DuplicateColumn(column.key.clone()));
            }
        }

        let default_index = columns
            .iter()
            .position(|c| c.key == default_key)
            .ok_or_else(|| ConfigError::UnknownDefault(default_key.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            columns,
            default_index,
        })
    }

    /// Board name, used in logs
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn default_column(&self) -> &ColumnDef {
        &self.columns[self.default_index]
    }

    /// Exact lookup of a column by key
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// Column an item with this raw status belongs in.
    ///
    /// Matching ignores surrounding whitespace and ASCII case; anything
    /// unrecognized lands in the default column.
    pub fn resolve_status(&self, status: &str) -> usize {
        let status = status.trim();
        self.columns
            .iter()
            .position(|c| c.key.eq_ignore_ascii_case(status))
            .unwrap_or(self.default_index)
    }
}
