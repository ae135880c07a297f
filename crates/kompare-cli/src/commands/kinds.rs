//! Kinds command
//!
//! Usage: kompare kinds [KIND...] [--config <FILE>]

use std::path::PathBuf;

use clap::Args;
use kompare_core::{validate_kinds, CompareConfig, KompareError, ResourceKind};

#[derive(Debug, Args)]
pub struct KindsArgs {
    /// Only show these kinds (any alias)
    pub kinds: Vec<String>,

    /// Show criteria as overridden by this YAML configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute kinds command
pub fn execute(args: KindsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => CompareConfig::from_path(path)?,
        None => CompareConfig::default(),
    };
    let selected = select_kinds(&args.kinds)?;
    print!("{}", describe_kinds(&selected, &config));
    Ok(())
}

/// Every catalog kind when `requested` is empty, otherwise the requested
/// ones in catalog order.
pub fn select_kinds(requested: &[String]) -> Result<Vec<ResourceKind>, KompareError> {
    if requested.is_empty() {
        return Ok(ResourceKind::ALL.to_vec());
    }
    let (valid, invalid) = validate_kinds(requested);
    if let Some(alias) = invalid.into_iter().next() {
        return Err(KompareError::UnknownResourceKind { alias });
    }
    Ok(ResourceKind::ALL
        .into_iter()
        .filter(|kind| valid.iter().any(|name| name == kind.canonical_name()))
        .collect())
}

pub fn describe_kinds(kinds: &[ResourceKind], config: &CompareConfig) -> String {
    let mut out = String::new();
    for kind in kinds {
        out.push_str(&format!("{} ({})\n", kind.canonical_name(), kind.list_kind()));
        out.push_str(&format!("  aliases:  {}\n", kind.aliases().join(", ")));
        out.push_str(&format!(
            "  criteria: {}\n",
            config.criteria_for(*kind).join(", ")
        ));
    }
    out
}
