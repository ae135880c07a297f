//! Diff command
//!
//! Usage: kompare diff --source <FILE> --target <FILE> [--kind <KIND>] [--filter <PATHS>]

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use kompare_core::collection::view::NAME_FIELD;
use kompare_core::diff::{render, render_outcome, Comparator, ComparisonOutcome, Verbosity};
use kompare_core::logging_facility::{self, Profile};
use kompare_core::provider::load_json_file;
use kompare_core::{parse_criteria, CompareConfig, ResourceKind, ShapeRegistry};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// JSON export of the source collection
    #[arg(long)]
    pub source: PathBuf,

    /// JSON export of the target collection
    #[arg(long)]
    pub target: PathBuf,

    /// Resource kind or alias (e.g. deploy, svc, cm); selects default criteria
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Comma-separated dotted paths to compare, overriding kind defaults
    #[arg(short, long)]
    pub filter: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity: -v narrates progress, -vv adds the full report
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Enable logging to stderr with this profile (development, production)
    #[arg(long)]
    pub log_profile: Option<String>,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(profile) = &args.log_profile {
        logging_facility::init(profile.parse::<Profile>()?);
    }

    let config = match &args.config {
        Some(path) => CompareConfig::from_path(path)?,
        None => CompareConfig::default(),
    };
    let kind = args
        .kind
        .as_deref()
        .map(str::parse::<ResourceKind>)
        .transpose()?;
    let criteria = resolve_criteria(args.filter.as_deref(), kind, &config);
    let verbosity = Verbosity::from(args.verbose).max(config.verbosity());

    tracing::debug!(?kind, ?criteria, ?verbosity, "starting diff");

    let source = load_json_file(&args.source)?;
    let target = load_json_file(&args.target)?;

    let comparator = Comparator::new(ShapeRegistry::builtin(), config.differ());
    let outcome = comparator.compare_detailed(&source, &target, &criteria, verbosity)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_outcome(&mut out, &outcome, verbosity)?;
    Ok(())
}

/// Criteria precedence: `--filter`, then configured or catalog criteria for
/// `--kind`, then just `Name`.
pub fn resolve_criteria(
    filter: Option<&str>,
    kind: Option<ResourceKind>,
    config: &CompareConfig,
) -> Vec<String> {
    if let Some(parsed) = filter.map(parse_criteria).filter(|c| !c.is_empty()) {
        return parsed;
    }
    match kind {
        Some(kind) => config.criteria_for(kind),
        None => vec![NAME_FIELD.to_string()],
    }
}

fn write_outcome<W: Write>(
    out: &mut W,
    outcome: &ComparisonOutcome,
    verbosity: Verbosity,
) -> std::io::Result<()> {
    for line in &outcome.narration {
        writeln!(out, "{line}")?;
    }
    let body = match verbosity {
        Verbosity::Quiet => render_outcome(outcome),
        Verbosity::Narrate => render(&outcome.records),
        Verbosity::Report => outcome.report.clone().unwrap_or_default(),
    };
    if body.is_empty() && outcome.is_clean() {
        writeln!(out, "No differences found.")?;
    } else {
        write!(out, "{body}")?;
    }
    out.flush()
}
