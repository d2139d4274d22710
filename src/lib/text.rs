use std::fmt;

#[cfg(feature = "tracing")]
use tracing::trace;

/// Line-ending marker detected in a file.
///
/// `CrLf` wins as soon as any line in the original text carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Eol {
  #[default]
  Lf,
  CrLf,
}

impl Eol {
  pub fn as_str(self) -> &'static str {
    match self {
      Eol::Lf => "\n",
      Eol::CrLf => "\r\n",
    }
  }

  pub fn detect(text: &str) -> Self {
    if text.contains("\r\n") { Eol::CrLf } else { Eol::Lf }
  }
}

impl fmt::Display for Eol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Raw file content split into terminator-free lines plus the metadata needed
/// to write it back the way it was read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
  pub lines: Vec<String>,
  pub eol: Eol,
  pub has_trailing_newline: bool,
}

impl From<&str> for Text {
  fn from(raw: &str) -> Self {
    let eol = Eol::detect(raw);

    // Empty input is an empty sequence, not a single empty line.
    let lines: Vec<String> = if raw.is_empty() {
      Vec::new()
    } else {
      raw
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
    };

    #[cfg(feature = "tracing")]
    trace!("Split text into {} lines, eol={:?}", lines.len(), eol);

    Self {
      lines,
      eol,
      has_trailing_newline: raw.ends_with('\n'),
    }
  }
}

/// Joins lines with the given marker, appending one trailing marker when
/// `ensure_final` is set and the join does not already end with it.
pub fn compose(lines: &[String], eol: Eol, ensure_final: bool) -> String {
  if lines.is_empty() {
    return String::new();
  }

  let mut text = lines.join(eol.as_str());

  if ensure_final && !text.ends_with(eol.as_str()) {
    text.push_str(eol.as_str());
  }

  text
}

/// Appends an empty line unless the sequence is empty or already ends with
/// one, so that composing yields a trailing terminator.
pub fn ensure_final_newline(lines: &mut Vec<String>) {
  if lines.is_empty() {
    return;
  }

  if lines.last().is_some_and(|line| !line.is_empty()) {
    lines.push(String::new());
  }
}
