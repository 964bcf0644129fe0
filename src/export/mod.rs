//! Roster export for downstream simulation runs.
//!
//! A built `Roster` holds live strategy instances, which cannot be serialized.
//! This module snapshots what consumers need to reproduce it (names, codes,
//! classifiers and the two games) as JSON.

use crate::catalog::StrategyFilter;
use crate::config::GamesConfig;
use crate::roster::Roster;
use crate::strategy::Classifier;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

const SCHEMA_VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to access export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode or decode export JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializable snapshot of a roster.
#[derive(Serialize, Deserialize, Debug)]
pub struct RosterExport {
    /// Schema version for forward/backward compatibility
    pub schema_version: String,
    /// Unix timestamp when export was generated
    pub generated_at: u64,
    /// Filter the catalog was queried with
    pub filter: StrategyFilter,
    /// One entry per unique name, in code order
    pub entries: Vec<RosterEntry>,
    pub games: GamesConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub code: String,
    pub name: String,
    pub classifier: Classifier,
}

impl RosterExport {
    pub fn new(roster: &Roster, filter: StrategyFilter) -> Self {
        let entries = roster
            .name_to_code()
            .iter()
            .filter_map(|(name, code)| {
                let instance = roster.instance(name)?;
                Some(RosterEntry {
                    code: code.clone(),
                    name: name.clone(),
                    classifier: instance.classifier(),
                })
            })
            .collect();

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().timestamp() as u64,
            filter,
            entries,
            games: GamesConfig {
                stag: *roster.stag(),
                high_temptation: *roster.high_temptation(),
            },
        }
    }

    /// Looks up an entry by its decimal code.
    pub fn entry_by_code(&self, code: &str) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.code == code)
    }
}

/// Writes roster export to a JSON file.
pub fn write_export_to_json(export: &RosterExport, output_path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(export)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// Reads roster export from a JSON file.
pub fn read_export_from_json(input_path: &Path) -> Result<RosterExport, ExportError> {
    let content = std::fs::read_to_string(input_path)?;
    let export: RosterExport = serde_json::from_str(&content)?;
    Ok(export)
}
