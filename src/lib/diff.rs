use std::collections::HashSet;

/// Set difference between two ordered unique-key lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyDiff {
  /// Keys in the source list absent from the target, in source order.
  pub only_in_source: Vec<String>,
  /// Keys in the target list absent from the source, in target order.
  pub only_in_target: Vec<String>,
}

impl KeyDiff {
  pub fn is_empty(&self) -> bool {
    self.only_in_source.is_empty() && self.only_in_target.is_empty()
  }
}

/// Computes both one-sided differences in one pass per list.
pub fn diff_keys(source: &[String], target: &[String]) -> KeyDiff {
  let source_set: HashSet<&str> = source.iter().map(String::as_str).collect();
  let target_set: HashSet<&str> = target.iter().map(String::as_str).collect();

  KeyDiff {
    only_in_source: source
      .iter()
      .filter(|key| !target_set.contains(key.as_str()))
      .cloned()
      .collect(),
    only_in_target: target
      .iter()
      .filter(|key| !source_set.contains(key.as_str()))
      .cloned()
      .collect(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn keys(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn test_diff_preserves_input_order() {
    let source = keys(&["C", "A", "B"]);
    let target = keys(&["B", "D", "E"]);

    let diff = diff_keys(&source, &target);
    assert_eq!(diff.only_in_source, keys(&["C", "A"]));
    assert_eq!(diff.only_in_target, keys(&["D", "E"]));
  }

  #[test]
  fn test_diff_identical_lists() {
    let source = keys(&["A", "B"]);
    let diff = diff_keys(&source, &source);
    assert!(diff.is_empty());
  }

  #[test]
  fn test_diff_empty_sides() {
    let some = keys(&["A"]);
    let none: Vec<String> = Vec::new();

    let diff = diff_keys(&some, &none);
    assert_eq!(diff.only_in_source, keys(&["A"]));
    assert!(diff.only_in_target.is_empty());

    let diff = diff_keys(&none, &some);
    assert!(diff.only_in_source.is_empty());
    assert_eq!(diff.only_in_target, keys(&["A"]));
  }
}
