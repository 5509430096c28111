//! Command line entry point run by the build after bundling completes.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use webext_dist::{ExtensionReconciler, ProjectConfig, ReconcileReport};

#[derive(Debug, Parser)]
#[command(
  name = "webext-dist",
  version,
  about = "Reconcile bundler output into a loadable browser extension"
)]
struct Cli {
  /// Project root containing the output directory, template and manifest.
  #[arg(long, default_value = ".")]
  root: PathBuf,

  /// Load configuration from this file instead of discovering webext.config.json.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Override the output directory (relative to the root).
  #[arg(long)]
  out_dir: Option<String>,

  /// Print the report as JSON on stdout.
  #[arg(long)]
  json: bool,

  /// Increase log verbosity (-v debug, -vv trace).
  #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
  verbose: u8,

  /// Only log warnings.
  #[arg(short, long)]
  quiet: bool,
}

impl Cli {
  fn default_level(&self) -> &'static str {
    if self.quiet {
      return "warn";
    }
    match self.verbose {
      0 => "info",
      1 => "debug",
      _ => "trace",
    }
  }
}

fn init_tracing(default_level: &str) {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

fn load_config(cli: &Cli) -> Result<ProjectConfig> {
  let mut config = match &cli.config {
    Some(path) => ProjectConfig::from_path(path)
      .with_context(|| format!("could not load configuration from {}", path.display()))?,
    None => ProjectConfig::discover(&cli.root),
  };
  if let Some(out_dir) = &cli.out_dir {
    config.output_dir = out_dir.clone();
  }
  Ok(config)
}

fn print_report(report: &ReconcileReport) -> Result<()> {
  let json = serde_json::to_string_pretty(report).context("failed to serialise report")?;
  println!("{json}");
  Ok(())
}

fn run(cli: &Cli) -> Result<()> {
  let layout = load_config(cli)?.into_layout(&cli.root);
  let report = ExtensionReconciler::new(layout).run();

  if cli.json {
    print_report(&report)?;
  }

  let warnings = report.diagnostics.warnings().count();
  if warnings > 0 {
    tracing::warn!("finished with {warnings} warning(s)");
  }
  Ok(())
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.default_level());

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("Error: {err:#}");
      ExitCode::FAILURE
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn verbosity_maps_to_levels() {
    let cli = Cli::parse_from(["webext-dist", "-vv"]);
    assert_eq!(cli.default_level(), "trace");
    let cli = Cli::parse_from(["webext-dist", "--quiet"]);
    assert_eq!(cli.default_level(), "warn");
  }

  #[test]
  fn out_dir_overrides_config() {
    let cli = Cli::parse_from(["webext-dist", "--root", "/nonexistent", "--out-dir", "build"]);
    let config = load_config(&cli).unwrap();
    assert_eq!(config.output_dir, "build");
  }
}
