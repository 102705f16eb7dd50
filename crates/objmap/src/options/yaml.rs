// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML options loader.
//!
//! # Example YAML
//!
//! ```yaml
//! # mapping.yaml
//! strategies:
//!   - convention
//!   - attribute
//!   - audit_trail        # custom, factory registered in code
//! conflict_policy: last_write_wins   # or: reject
//! ```
//!
//! Custom strategy names only select factories; the factories themselves
//! are registered on the returned options with
//! [`MappingOptions::register_strategy`].

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::options::{ConflictPolicy, MappingOptions};
use crate::strategy::StrategyId;

/// YAML options loader.
pub struct YamlLoader;

/// Root YAML document structure.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct YamlOptionsDocument {
    /// Strategy names, in execution order. Absent means default order.
    pub strategies: Option<Vec<String>>,

    /// `last_write_wins` or `reject`.
    pub conflict_policy: Option<String>,
}

impl YamlLoader {
    /// Load options from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<MappingOptions> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read YAML file {}: {}", path.display(), e))
        })?;
        let options = Self::parse_yaml(&content)?;
        log::info!(
            "[YamlLoader] Loaded mapping options from {}: {:?}",
            path.display(),
            options.strategies()
        );
        Ok(options)
    }

    /// Parse options from a YAML string.
    pub fn parse_yaml(yaml_content: &str) -> Result<MappingOptions> {
        let doc: YamlOptionsDocument = serde_yaml::from_str(yaml_content)
            .map_err(|e| Error::Config(format!("Failed to parse YAML: {}", e)))?;
        Self::document_to_options(&doc)
    }

    /// Convert a parsed document into options.
    pub fn document_to_options(doc: &YamlOptionsDocument) -> Result<MappingOptions> {
        let mut options = MappingOptions::default();

        if let Some(names) = &doc.strategies {
            let mut ids = Vec::with_capacity(names.len());
            for name in names {
                let name = name.trim();
                if name.is_empty() {
                    return Err(Error::Config("Empty strategy name".to_string()));
                }
                ids.push(StrategyId::from_name(name));
            }
            options.set_strategies(ids);
        }

        if let Some(policy) = &doc.conflict_policy {
            options.set_conflict_policy(parse_conflict_policy(policy)?);
        }

        Ok(options)
    }
}

fn parse_conflict_policy(value: &str) -> Result<ConflictPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "last_write_wins" | "lastwritewins" => Ok(ConflictPolicy::LastWriteWins),
        "reject" => Ok(ConflictPolicy::Reject),
        other => Err(Error::Config(format!(
            "Unknown conflict_policy '{}' (expected last_write_wins or reject)",
            other
        ))),
    }
}
