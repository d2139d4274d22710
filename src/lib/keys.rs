use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

#[cfg(feature = "tracing")]
use tracing::trace;

/// A declaration line: optional leading whitespace, optional `export`, a key
/// made of `[A-Za-z_][A-Za-z0-9_.-]*`, then `=`. The value part is opaque.
static KEY_LINE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\s*(?:export\s+)?([A-Za-z_][A-Za-z0-9_.-]*)\s*=").expect("key pattern is valid")
});

/// Returns the declared key when the line is a `KEY=` style assignment.
///
/// Lines that do not match are not an error, they are simply opaque to the
/// sync and pass through file edits unchanged.
pub fn match_key(line: &str) -> Option<&str> {
  KEY_LINE
    .captures(line)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str())
}

/// Extracts the unique keys declared in a line sequence, in first-seen order.
/// Later duplicate declarations are ignored for set purposes.
pub fn extract_keys<'a, I>(lines: I) -> Vec<String>
where
  I: IntoIterator<Item = &'a str>,
{
  let mut keys = Vec::new();
  let mut seen: HashSet<&str> = HashSet::new();

  for line in lines {
    if let Some(key) = match_key(line)
      && seen.insert(key)
    {
      keys.push(key.to_string());
    }
  }

  #[cfg(feature = "tracing")]
  trace!("Extracted {} unique keys", keys.len());

  keys
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_match_key_plain() {
    assert_eq!(match_key("FOO=bar"), Some("FOO"));
    assert_eq!(match_key("FOO="), Some("FOO"));
    assert_eq!(match_key("FOO = bar"), Some("FOO"));
  }

  #[test]
  fn test_match_key_export_and_whitespace() {
    assert_eq!(match_key("export FOO=bar"), Some("FOO"));
    assert_eq!(match_key("  export  FOO=bar"), Some("FOO"));
    assert_eq!(match_key("\tFOO=bar"), Some("FOO"));
  }

  #[test]
  fn test_match_key_charset() {
    assert_eq!(match_key("_PRIVATE=1"), Some("_PRIVATE"));
    assert_eq!(match_key("app.port=8080"), Some("app.port"));
    assert_eq!(match_key("MY-KEY=x"), Some("MY-KEY"));
    // Keys cannot start with a digit
    assert_eq!(match_key("1FOO=bar"), None);
  }

  #[test]
  fn test_match_key_non_declarations() {
    assert_eq!(match_key("# FOO=bar"), None);
    assert_eq!(match_key(""), None);
    assert_eq!(match_key("just some text"), None);
    assert_eq!(match_key("=value"), None);
  }

  #[test]
  fn test_extract_keys_dedup_first_seen() {
    let lines = ["FOO=1", "BAR=2", "FOO=3", "# comment", "", "BAZ="];
    assert_eq!(extract_keys(lines), vec!["FOO", "BAR", "BAZ"]);
  }

  #[test]
  fn test_extract_keys_case_sensitive() {
    let lines = ["foo=1", "FOO=2"];
    assert_eq!(extract_keys(lines), vec!["foo", "FOO"]);
  }
}
