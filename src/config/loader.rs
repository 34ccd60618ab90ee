//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory rule
//! sets from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::StatutoryRuleSet;

/// Loads and provides access to statutory rule sets.
///
/// # Directory Structure
///
/// ```text
/// config/india/
/// ├── rules.yaml            # Rule set used when no override exists
/// └── jurisdictions/
///     └── KA.yaml           # Full rule set for jurisdiction "KA"
/// ```
///
/// The `jurisdictions` directory is optional. Jurisdiction codes are the file
/// stems and are matched case-insensitively.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/india").unwrap();
/// let rules = loader.rules_for("KA");
/// assert!(rules.professional_tax.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    default_rules: StatutoryRuleSet,
    jurisdictions: HashMap<String, StatutoryRuleSet>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `rules.yaml` is missing, or if any file contains
    /// invalid YAML or is missing required fields. Rule sets are only parsed
    /// here; well-formedness is checked when a calculator is built.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let default_rules = Self::load_yaml::<StatutoryRuleSet>(&path.join("rules.yaml"))?;

        let jurisdictions_dir = path.join("jurisdictions");
        let jurisdictions = if jurisdictions_dir.exists() {
            Self::load_jurisdictions(&jurisdictions_dir)?
        } else {
            HashMap::new()
        };

        debug!(
            path = %path.display(),
            jurisdictions = jurisdictions.len(),
            "Loaded statutory rule configuration"
        );

        Ok(Self {
            default_rules,
            jurisdictions,
        })
    }

    /// Creates a loader from an in-memory default rule set with no overrides.
    pub fn from_rules(default_rules: StatutoryRuleSet) -> Self {
        Self {
            default_rules,
            jurisdictions: HashMap::new(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all jurisdiction override files.
    fn load_jurisdictions(dir: &Path) -> EngineResult<HashMap<String, StatutoryRuleSet>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut jurisdictions = HashMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yaml") {
                continue;
            }

            let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let rules = Self::load_yaml::<StatutoryRuleSet>(&path)?;
            jurisdictions.insert(code.to_uppercase(), rules);
        }

        Ok(jurisdictions)
    }

    /// Returns the directory-wide default rule set.
    pub fn default_rules(&self) -> &StatutoryRuleSet {
        &self.default_rules
    }

    /// Returns the jurisdiction codes that have their own rule file.
    pub fn jurisdictions(&self) -> impl Iterator<Item = &str> {
        self.jurisdictions.keys().map(String::as_str)
    }

    /// Returns the rule set for a jurisdiction, falling back to the default.
    pub fn rules_for(&self, jurisdiction: &str) -> &StatutoryRuleSet {
        self.jurisdictions
            .get(&jurisdiction.to_uppercase())
            .unwrap_or(&self.default_rules)
    }
}
