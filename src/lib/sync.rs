//! Key-set reconciliation between an env file and its example file.
//!
//! # Sync logic
//!
//! Forward (`Direction::FromEnv`, the default): the env file is the source of
//! truth for key existence. Every env key missing from the example is appended
//! as a bare `KEY=` stub — real values are never copied into a template.
//! Example keys absent from the env file are reported as obsolete but never
//! removed.
//!
//! Reverse (`Direction::FromExample`): the example defines the required key
//! set. Env lines declaring keys the example no longer lists are dropped, and
//! a `KEY=` stub is appended for every example key the env file lacks. Values
//! of keys present on both sides are left untouched.
//!
//! Both directions preserve unrelated lines byte-for-byte, keep the target's
//! line-ending style, and end the file with a terminator. Applying the same
//! direction twice is a no-op on the second run.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

#[cfg(feature = "tracing")]
use tracing::{debug, info};

use crate::diff::diff_keys;
use crate::keys::{extract_keys, match_key};
use crate::pairs::FilePair;
use crate::text::{Text, compose, ensure_final_newline};

/// Which side of a pair drives the reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
  /// Propagate key existence from the env file to the example.
  #[default]
  FromEnv,
  /// Bring the env file into conformance with the example.
  FromExample,
}

/// Read-only options shared by every pair in a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
  pub direction: Direction,
  /// Report differences without writing anything.
  pub check: bool,
}

/// Key differences for one pair, as seen from the sync target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PairDiff {
  /// Keys the target lacks; appended as `KEY=` stubs on apply.
  pub missing: Vec<String>,
  /// Forward: example keys absent from the env file (reported, never removed).
  /// Reverse: env keys absent from the example (removed on apply).
  pub extra: Vec<String>,
}

impl PairDiff {
  pub fn is_in_sync(&self) -> bool {
    self.missing.is_empty() && self.extra.is_empty()
  }
}

/// Result of reconciling one pair's content in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
  pub diff: PairDiff,
  /// New content for the target file; `None` when no write is needed.
  pub new_content: Option<String>,
}

/// Outcome of processing one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairOutcome {
  /// The pair's source file is absent and was not explicitly requested.
  Skipped,
  /// Check mode: differences computed, nothing written.
  Checked(PairDiff),
  /// Apply mode: `wrote` tells whether the target file was rewritten.
  Applied { diff: PairDiff, wrote: bool },
}

/// Errors that abort the run. Implicitly missing source files are not errors,
/// they surface as [`PairOutcome::Skipped`].
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
  /// An explicitly provided env file does not exist.
  #[error("Cannot find source file: {0}")]
  SourceMissing(String),
  /// An explicitly provided example file does not exist.
  #[error("Cannot find example file: {0}")]
  ExampleMissing(String),
  #[error("Failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("Failed to write {path}: {source}")]
  Write {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("Failed to create directory {path}: {source}")]
  CreateDir {
    path: PathBuf,
    source: std::io::Error,
  },
}

/// Computes the forward reconciliation of one pair's content.
///
/// `example` is `None` when the example file does not exist yet; that case
/// always produces new content so the file gets created.
pub fn reconcile_forward(env: &str, example: Option<&str>) -> Reconciled {
  let env_text = Text::from(env);
  let env_keys = extract_keys(env_text.lines.iter().map(String::as_str));

  let example_text = example.map(Text::from).unwrap_or_default();
  let example_keys = extract_keys(example_text.lines.iter().map(String::as_str));

  let key_diff = diff_keys(&env_keys, &example_keys);
  let diff = PairDiff {
    missing: key_diff.only_in_source,
    extra: key_diff.only_in_target,
  };

  #[cfg(feature = "tracing")]
  debug!(
    "Forward diff: {} missing in example, {} obsolete in env",
    diff.missing.len(),
    diff.extra.len()
  );

  if diff.missing.is_empty() && example.is_some() {
    return Reconciled {
      diff,
      new_content: None,
    };
  }

  let mut lines = example_text.lines;

  // Insert before a trailing blank line so new keys don't land after a
  // deliberate separator.
  let mut insert_at = if lines.last().is_some_and(|line| line.is_empty()) {
    lines.len() - 1
  } else {
    lines.len()
  };

  for key in &diff.missing {
    lines.insert(insert_at, format!("{key}="));
    insert_at += 1;
  }

  ensure_final_newline(&mut lines);

  let eol = if example.is_some() {
    example_text.eol
  } else {
    env_text.eol
  };

  Reconciled {
    diff,
    new_content: Some(compose(&lines, eol, true)),
  }
}

/// Computes the reverse reconciliation of one pair's content.
///
/// `env` is `None` when the env file does not exist yet; that case always
/// produces new content so the file gets created.
pub fn reconcile_reverse(example: &str, env: Option<&str>) -> Reconciled {
  let example_text = Text::from(example);
  let example_keys = extract_keys(example_text.lines.iter().map(String::as_str));

  let env_text = env.map(Text::from).unwrap_or_default();
  let env_keys = extract_keys(env_text.lines.iter().map(String::as_str));

  let key_diff = diff_keys(&example_keys, &env_keys);
  let diff = PairDiff {
    missing: key_diff.only_in_source,
    extra: key_diff.only_in_target,
  };

  #[cfg(feature = "tracing")]
  debug!(
    "Reverse diff: {} missing in env, {} extra in env",
    diff.missing.len(),
    diff.extra.len()
  );

  let mut lines = env_text.lines;
  let mut changed = false;

  if !diff.extra.is_empty() {
    // Whole-line removal: an inline comment sharing the line goes with it.
    let extra: HashSet<&str> = diff.extra.iter().map(String::as_str).collect();
    lines.retain(|line| !match_key(line).is_some_and(|key| extra.contains(key)));
    changed = true;
  }

  if !diff.missing.is_empty() {
    if lines.last().is_some_and(|line| !line.is_empty()) {
      lines.push(String::new());
    }
    for key in &diff.missing {
      lines.push(format!("{key}="));
    }
    changed = true;
  }

  if !changed && env.is_some() {
    return Reconciled {
      diff,
      new_content: None,
    };
  }

  ensure_final_newline(&mut lines);

  let eol = if env.is_some() {
    env_text.eol
  } else {
    example_text.eol
  };

  Reconciled {
    diff,
    new_content: Some(compose(&lines, eol, true)),
  }
}

/// Reconciles one pair on disk (or just computes its diff in check mode).
///
/// The write is a single whole-file replace; there is no temp-file or fsync
/// safety net, and no rollback of pairs already processed in the run.
pub fn sync_pair(pair: &FilePair, options: &SyncOptions) -> Result<PairOutcome, SyncError> {
  #[cfg(feature = "tracing")]
  info!(
    "Syncing {} ({:?}, check={})",
    pair.env_display, options.direction, options.check
  );

  match options.direction {
    Direction::FromEnv => sync_forward(pair, options),
    Direction::FromExample => sync_reverse(pair, options),
  }
}

fn sync_forward(pair: &FilePair, options: &SyncOptions) -> Result<PairOutcome, SyncError> {
  if !pair.env_exists {
    if pair.env_provided {
      return Err(SyncError::SourceMissing(pair.env_display.clone()));
    }
    return Ok(PairOutcome::Skipped);
  }

  let env_content = read(&pair.env_path)?;
  let example_content = if pair.example_exists {
    Some(read(&pair.example_path)?)
  } else {
    None
  };

  let reconciled = reconcile_forward(&env_content, example_content.as_deref());

  if options.check {
    return Ok(PairOutcome::Checked(reconciled.diff));
  }

  let wrote = match reconciled.new_content {
    Some(content) => {
      write_target(&pair.example_path, pair.example_exists, &content)?;
      true
    }
    None => false,
  };

  Ok(PairOutcome::Applied {
    diff: reconciled.diff,
    wrote,
  })
}

fn sync_reverse(pair: &FilePair, options: &SyncOptions) -> Result<PairOutcome, SyncError> {
  if !pair.example_exists {
    if pair.example_provided {
      return Err(SyncError::ExampleMissing(pair.example_display.clone()));
    }
    return Ok(PairOutcome::Skipped);
  }

  let example_content = read(&pair.example_path)?;
  let env_content = if pair.env_exists {
    Some(read(&pair.env_path)?)
  } else {
    None
  };

  let reconciled = reconcile_reverse(&example_content, env_content.as_deref());

  if options.check {
    return Ok(PairOutcome::Checked(reconciled.diff));
  }

  let wrote = match reconciled.new_content {
    Some(content) => {
      write_target(&pair.env_path, pair.env_exists, &content)?;
      true
    }
    None => false,
  };

  Ok(PairOutcome::Applied {
    diff: reconciled.diff,
    wrote,
  })
}

fn read(path: &std::path::Path) -> Result<String, SyncError> {
  fs::read_to_string(path).map_err(|source| SyncError::Read {
    path: path.to_path_buf(),
    source,
  })
}

fn write_target(
  path: &std::path::Path,
  target_existed: bool,
  content: &str,
) -> Result<(), SyncError> {
  if !target_existed
    && let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).map_err(|source| SyncError::CreateDir {
      path: parent.to_path_buf(),
      source,
    })?;
  }

  fs::write(path, content).map_err(|source| SyncError::Write {
    path: path.to_path_buf(),
    source,
  })
}
