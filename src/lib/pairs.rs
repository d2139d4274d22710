//! Discovery and pairing of env files with their example files.
//!
//! A pair is either built from explicitly provided paths or discovered by
//! scanning the working directory: any immediate file whose name starts with
//! `.env` and does not contain `.example` is an env file, and any name
//! starting with `.env` and ending with `.example` is a template paired with
//! the env path obtained by stripping the suffix.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "tracing")]
use tracing::debug;

pub const EXAMPLE_SUFFIX: &str = ".example";

/// One env/example association to reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
  pub env_path: PathBuf,
  pub env_display: String,
  pub env_exists: bool,
  /// True when the env path was named explicitly rather than discovered.
  pub env_provided: bool,
  pub example_path: PathBuf,
  pub example_display: String,
  pub example_exists: bool,
  /// True when the example path was named explicitly rather than derived.
  pub example_provided: bool,
}

/// Inputs to pair resolution, straight from the command line.
#[derive(Debug, Clone, Default)]
pub struct PairOptions {
  /// Explicit env file paths; empty means auto-discovery in the cwd.
  pub env_paths: Vec<String>,
  /// Explicit example path; only valid when a single pair is in play.
  pub example_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum PairError {
  #[error("Cannot use --example when multiple .env files are involved. Specify a single file with --env.")]
  ExampleWithMultiplePairs,
  #[error("No .env files found. Use --env to specify the path.")]
  NoFilesFound,
  #[error("Failed to read directory {path}: {source}")]
  ReadDir {
    path: PathBuf,
    source: std::io::Error,
  },
}

#[derive(Default)]
struct PairSeed {
  env_hint: Option<String>,
  env_provided: bool,
  example_path: Option<PathBuf>,
  example_hint: Option<String>,
}

/// Resolves the set of pairs to operate on.
///
/// A deterministic function from the options and the directory's file names to
/// an ordered pair list: pairs come out sorted by resolved env path.
pub fn collect_pairs(cwd: &Path, options: &PairOptions) -> Result<Vec<FilePair>, PairError> {
  let mut seeds: BTreeMap<PathBuf, PairSeed> = BTreeMap::new();

  if options.env_paths.is_empty() {
    for name in list_file_names(cwd)? {
      if is_env_file_name(&name) {
        let seed = seeds.entry(cwd.join(&name)).or_default();
        seed.env_hint.get_or_insert(name);
      } else if is_example_file_name(&name) {
        let env_name = &name[..name.len() - EXAMPLE_SUFFIX.len()];
        let seed = seeds.entry(cwd.join(env_name)).or_default();
        seed.example_path = Some(cwd.join(&name));
        seed.example_hint.get_or_insert(name);
      }
    }
  } else {
    for relative in &options.env_paths {
      let seed = seeds.entry(cwd.join(relative)).or_default();
      seed.env_hint.get_or_insert(relative.clone());
      seed.env_provided = true;
    }
  }

  if options.example_path.is_some() && seeds.len() > 1 {
    return Err(PairError::ExampleWithMultiplePairs);
  }

  let pairs: Vec<FilePair> = seeds
    .into_iter()
    .map(|(env_path, seed)| {
      let example_path = match &options.example_path {
        Some(path) => cwd.join(path),
        None => seed
          .example_path
          .unwrap_or_else(|| append_example_suffix(&env_path)),
      };

      let env_display = seed
        .env_hint
        .unwrap_or_else(|| display_path(cwd, &env_path));
      let example_display = seed
        .example_hint
        .unwrap_or_else(|| display_path(cwd, &example_path));

      FilePair {
        env_exists: env_path.is_file(),
        env_display,
        env_provided: seed.env_provided,
        example_exists: example_path.is_file(),
        example_display,
        example_provided: options.example_path.is_some(),
        env_path,
        example_path,
      }
    })
    .collect();

  #[cfg(feature = "tracing")]
  debug!("Resolved {} file pairs", pairs.len());

  if pairs.is_empty() {
    return Err(PairError::NoFilesFound);
  }

  Ok(pairs)
}

fn list_file_names(cwd: &Path) -> Result<Vec<String>, PairError> {
  let read_dir = fs::read_dir(cwd).map_err(|source| PairError::ReadDir {
    path: cwd.to_path_buf(),
    source,
  })?;

  let mut names = Vec::new();
  for entry in read_dir {
    let entry = entry.map_err(|source| PairError::ReadDir {
      path: cwd.to_path_buf(),
      source,
    })?;
    if entry.file_type().is_ok_and(|kind| kind.is_file()) {
      names.push(entry.file_name().to_string_lossy().into_owned());
    }
  }

  Ok(names)
}

fn is_env_file_name(name: &str) -> bool {
  name.starts_with(".env") && !name.contains(EXAMPLE_SUFFIX)
}

fn is_example_file_name(name: &str) -> bool {
  name.starts_with(".env") && name.ends_with(EXAMPLE_SUFFIX)
}

fn append_example_suffix(env_path: &Path) -> PathBuf {
  let mut raw = env_path.as_os_str().to_os_string();
  raw.push(EXAMPLE_SUFFIX);
  PathBuf::from(raw)
}

/// Human-readable name for reporting: relative to the cwd when under it,
/// otherwise just the file name.
fn display_path(cwd: &Path, path: &Path) -> String {
  match path.strip_prefix(cwd) {
    Ok(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
    _ => path
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_else(|| path.display().to_string()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  #[test]
  fn test_discovers_env_and_example_pairs() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "FOO=1\n").unwrap();
    fs::write(dir.path().join(".env.example"), "FOO=\n").unwrap();
    fs::write(dir.path().join(".env.local"), "BAR=2\n").unwrap();
    fs::write(dir.path().join("README.md"), "not an env file\n").unwrap();

    let pairs = collect_pairs(dir.path(), &PairOptions::default()).unwrap();

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].env_display, ".env");
    assert_eq!(pairs[0].example_display, ".env.example");
    assert!(pairs[0].env_exists);
    assert!(pairs[0].example_exists);
    assert!(!pairs[0].env_provided);

    assert_eq!(pairs[1].env_display, ".env.local");
    assert_eq!(pairs[1].example_display, ".env.local.example");
    assert!(!pairs[1].example_exists);
  }

  #[test]
  fn test_discovers_orphan_example() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env.example"), "FOO=\n").unwrap();

    let pairs = collect_pairs(dir.path(), &PairOptions::default()).unwrap();

    assert_eq!(pairs.len(), 1);
    assert!(!pairs[0].env_exists);
    assert!(pairs[0].example_exists);
    assert_eq!(pairs[0].env_path, dir.path().join(".env"));
  }

  #[test]
  fn test_explicit_env_paths_skip_discovery() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "FOO=1\n").unwrap();

    let options = PairOptions {
      env_paths: vec!["config/.env.prod".to_string()],
      example_path: None,
    };
    let pairs = collect_pairs(dir.path(), &options).unwrap();

    assert_eq!(pairs.len(), 1);
    assert!(pairs[0].env_provided);
    assert!(!pairs[0].env_exists);
    assert_eq!(pairs[0].env_display, "config/.env.prod");
    assert_eq!(
      pairs[0].example_path,
      dir.path().join("config/.env.prod.example")
    );
  }

  #[test]
  fn test_explicit_example_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "FOO=1\n").unwrap();

    let options = PairOptions {
      env_paths: vec![".env".to_string()],
      example_path: Some(PathBuf::from("template.env")),
    };
    let pairs = collect_pairs(dir.path(), &options).unwrap();

    assert_eq!(pairs.len(), 1);
    assert!(pairs[0].example_provided);
    assert_eq!(pairs[0].example_path, dir.path().join("template.env"));
  }

  #[test]
  fn test_example_with_multiple_pairs_is_an_error() {
    let dir = TempDir::new().unwrap();

    let options = PairOptions {
      env_paths: vec![".env".to_string(), ".env.local".to_string()],
      example_path: Some(PathBuf::from(".env.example")),
    };

    assert!(matches!(
      collect_pairs(dir.path(), &options),
      Err(PairError::ExampleWithMultiplePairs)
    ));
  }

  #[test]
  fn test_no_files_found() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("unrelated.txt"), "x\n").unwrap();

    assert!(matches!(
      collect_pairs(dir.path(), &PairOptions::default()),
      Err(PairError::NoFilesFound)
    ));
  }
}
