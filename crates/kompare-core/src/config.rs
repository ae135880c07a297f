//! Comparison configuration loaded from YAML.
//!
//! ```yaml
//! verbosity: 1
//! differ:
//!   max_diff: 20
//!   float_precision: 6
//! criteria:
//!   deploy: [Spec.Template.Spec.Containers, Name]
//!   cm: [Data]
//! ```
//!
//! Every key is optional. Criteria are keyed by any kind alias and replace
//! the catalog defaults for that kind.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diff::deep::{DeepDiffer, DifferOptions};
use crate::diff::model::Verbosity;
use crate::errors::{KompareError, Result};
use crate::kinds::ResourceKind;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
    pub verbosity: u8,
    pub differ: DifferOptions,
    /// Kind alias to dotted paths
    pub criteria: BTreeMap<String, Vec<String>>,
}

impl CompareConfig {
    /// Parse and validate a YAML document. An empty document is the default
    /// configuration.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for malformed YAML, unknown keys or unknown kind
    /// aliases under `criteria`.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: CompareConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file.
    ///
    /// # Errors
    ///
    /// `Io` when the file cannot be read, otherwise as
    /// [`from_yaml_str`](Self::from_yaml_str).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| KompareError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&text)
    }

    /// Every criteria key must name a catalog kind; no two keys may name
    /// the same kind.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the offending key.
    pub fn validate(&self) -> Result<()> {
        let mut seen: BTreeMap<ResourceKind, &str> = BTreeMap::new();
        for alias in self.criteria.keys() {
            let kind = ResourceKind::from_alias(alias).ok_or_else(|| {
                KompareError::InvalidConfig {
                    reason: format!("unknown resource kind '{alias}' under criteria"),
                }
            })?;
            if let Some(previous) = seen.insert(kind, alias) {
                return Err(KompareError::InvalidConfig {
                    reason: format!("criteria keys '{previous}' and '{alias}' both name {kind}"),
                });
            }
        }
        Ok(())
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from(self.verbosity)
    }

    pub fn differ(&self) -> DeepDiffer {
        DeepDiffer::new(self.differ)
    }

    /// Criteria for `kind`: the configured override, else the catalog
    /// defaults.
    pub fn criteria_for(&self, kind: ResourceKind) -> Vec<String> {
        self.criteria
            .iter()
            .find(|(alias, _)| ResourceKind::from_alias(alias) == Some(kind))
            .map(|(_, paths)| paths.clone())
            .unwrap_or_else(|| {
                kind.default_criteria()
                    .iter()
                    .map(|path| path.to_string())
                    .collect()
            })
    }
}
