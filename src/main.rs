use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use envsync::pairs::{FilePair, PairOptions, collect_pairs};
use envsync::sync::{Direction, PairDiff, PairOutcome, SyncOptions, sync_pair};

#[derive(Parser)]
#[command(
  name = "envsync",
  about = "Keeps keys synced between .env* files and their respective .env*.example files",
  version,
  author,
  disable_version_flag = true
)]
struct Cli {
  /// Path to one or more .env files (repeat flag or use comma)
  #[arg(short, long = "env", value_name = "PATH")]
  env: Vec<String>,

  /// Path to the .env.example file (only for a single .env)
  #[arg(short = 'x', long, value_name = "PATH")]
  example: Option<PathBuf>,

  /// Don't modify files, exit with code 1 if not in sync
  #[arg(short, long)]
  check: bool,

  /// Suppress non-essential output
  #[arg(short, long)]
  silent: bool,

  /// Update .env files from examples
  #[arg(long, conflicts_with = "from_env")]
  from_example: bool,

  /// Sync from actual variables to examples (default)
  #[arg(long)]
  from_env: bool,

  /// Print the CLI version
  #[arg(short = 'v', long = "version", action = ArgAction::Version, value_parser = clap::value_parser!(bool))]
  version: Option<bool>,
}

/// Console output gate: info and warnings respect --silent, errors and check
/// reports always print.
struct Reporter {
  silent: bool,
}

impl Reporter {
  fn info(&self, message: &str) {
    if !self.silent {
      println!("{message}");
    }
  }

  fn warn(&self, message: &str) {
    if !self.silent {
      eprintln!("{message}");
    }
  }
}

fn setup_tracing() {
  use tracing_subscriber::fmt;
  use tracing_subscriber::prelude::*;

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(tracing_subscriber::EnvFilter::new(
      std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
    ))
    .init();
}

fn main() -> ExitCode {
  // Usage errors exit 1; help and version exit 0.
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) => {
      let _ = err.print();
      return match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::from(1),
      };
    }
  };

  setup_tracing();

  run(&cli)
}

fn run(cli: &Cli) -> ExitCode {
  // Each --env occurrence may carry a comma-separated list; an occurrence
  // that yields no usable path is a usage error.
  let mut env_paths: Vec<String> = Vec::new();
  for raw in &cli.env {
    let values: Vec<String> = raw
      .split(',')
      .map(str::trim)
      .filter(|path| !path.is_empty())
      .map(String::from)
      .collect();

    if values.is_empty() {
      eprintln!("[EnvSync] Option --env requires at least one valid path.");
      return ExitCode::from(1);
    }

    env_paths.extend(values);
  }

  let cwd = match std::env::current_dir() {
    Ok(cwd) => cwd,
    Err(err) => {
      eprintln!("[EnvSync] Failed to resolve the current directory: {err}");
      return ExitCode::from(1);
    }
  };

  let pair_options = PairOptions {
    env_paths,
    example_path: cli.example.clone(),
  };

  let pairs = match collect_pairs(&cwd, &pair_options) {
    Ok(pairs) => pairs,
    Err(err) => {
      eprintln!("[EnvSync] {err}");
      return ExitCode::from(1);
    }
  };

  let direction = if cli.from_example {
    Direction::FromExample
  } else {
    Direction::FromEnv
  };
  let options = SyncOptions {
    direction,
    check: cli.check,
  };
  let reporter = Reporter { silent: cli.silent };

  let mut had_differences = false;
  let mut processed = 0usize;

  for pair in &pairs {
    match sync_pair(pair, &options) {
      Ok(PairOutcome::Skipped) => match direction {
        Direction::FromEnv => reporter.warn(&format!(
          "[EnvSync] No file found for {}, skipping.",
          pair.env_display
        )),
        Direction::FromExample => reporter.warn(&format!(
          "[EnvSync] No example file found for {}, skipping.",
          pair.example_display
        )),
      },
      Ok(PairOutcome::Checked(diff)) => {
        processed += 1;
        if diff.is_in_sync() {
          reporter.info(&format!(
            "[Check] {} is synced with {}.",
            pair.env_display, pair.example_display
          ));
        } else {
          had_differences = true;
          print_check_report(pair, &diff, direction);
        }
      }
      Ok(PairOutcome::Applied { diff, .. }) => {
        processed += 1;
        report_applied(&reporter, pair, &diff, direction);
      }
      Err(err) => {
        // Hard error: pairs already written keep their changes.
        eprintln!("[EnvSync] {err}");
        return ExitCode::from(1);
      }
    }
  }

  if cli.check {
    if !had_differences && processed > 0 {
      reporter.info("[EnvSync] Everything synced!");
    }
    return if had_differences {
      ExitCode::from(1)
    } else {
      ExitCode::SUCCESS
    };
  }

  reporter.info("[EnvSync] Operation completed.");
  ExitCode::SUCCESS
}

fn print_check_report(pair: &FilePair, diff: &PairDiff, direction: Direction) {
  match direction {
    Direction::FromEnv => {
      println!("[Check] {} → {}", pair.env_display, pair.example_display);
      if !diff.missing.is_empty() {
        println!("  Keys missing in example:");
        for key in &diff.missing {
          println!("    + {key}");
        }
      }
      if !diff.extra.is_empty() {
        println!("  Obsolete keys in .env (not present in example):");
        for key in &diff.extra {
          println!("    - {key}");
        }
      }
    }
    Direction::FromExample => {
      println!("[Check] {} → {}", pair.example_display, pair.env_display);
      if !diff.missing.is_empty() {
        println!("  Keys missing in .env:");
        for key in &diff.missing {
          println!("    + {key}");
        }
      }
      if !diff.extra.is_empty() {
        println!("  Extra keys in .env (remove them or add to example):");
        for key in &diff.extra {
          println!("    - {key}");
        }
      }
    }
  }
}

fn report_applied(reporter: &Reporter, pair: &FilePair, diff: &PairDiff, direction: Direction) {
  match direction {
    Direction::FromEnv => {
      if diff.missing.is_empty() {
        reporter.info(&format!(
          "[EnvSync] {}: no new keys to add.",
          pair.example_display
        ));
      } else {
        reporter.info(&format!(
          "[EnvSync] {}: added {} keys from {}.",
          pair.example_display,
          diff.missing.len(),
          pair.env_display
        ));
      }
      if !diff.extra.is_empty() {
        reporter.warn(&format!(
          "[EnvSync] {}: keys present in example but not in {}:",
          pair.example_display, pair.env_display
        ));
        for key in &diff.extra {
          reporter.warn(&format!("  - {key}"));
        }
      }
    }
    Direction::FromExample => {
      if !diff.extra.is_empty() {
        reporter.info(&format!(
          "[EnvSync] {}: removed {} keys no longer present in example.",
          pair.env_display,
          diff.extra.len()
        ));
      }
      if !diff.missing.is_empty() {
        reporter.info(&format!(
          "[EnvSync] {}: added {} new keys from example.",
          pair.env_display,
          diff.missing.len()
        ));
      }
      if diff.is_in_sync() {
        reporter.info(&format!(
          "[EnvSync] {}: no changes needed.",
          pair.env_display
        ));
      }
    }
  }
}
