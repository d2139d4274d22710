//! Key-set reconciliation between `.env` files and their `.env.example` templates.
//!
//! This library keeps the set of variable names declared in an env file in sync
//! with the corresponding example file, in either direction, without ever
//! copying real values into a template and without touching unrelated lines.
//!
//! # Features
//!
//! - **Byte-fidelity editing**: comments, blanks and unknown lines pass through
//!   untouched; line-ending style and trailing-newline convention are preserved
//! - **Forward sync**: append `KEY=` stubs to the example for keys the env file
//!   declares, never pruning the example
//! - **Reverse sync**: bring an env file into conformance with its example,
//!   keeping existing values for keys present in both
//! - **Check mode**: read-only comparison producing a diff, no writes
//! - **Optional tracing**: detailed logging when the `tracing` feature is enabled
//!
//! # Example
//!
//! ```rust,no_run
//! use envsync::pairs::{PairOptions, collect_pairs};
//! use envsync::sync::{Direction, SyncOptions, sync_pair};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let pairs = collect_pairs(&cwd, &PairOptions::default()).unwrap();
//!
//! let options = SyncOptions {
//!   direction: Direction::FromEnv,
//!   check: false,
//! };
//!
//! for pair in &pairs {
//!   sync_pair(pair, &options).unwrap();
//! }
//! ```

pub mod diff;
pub mod keys;
pub mod pairs;
pub mod sync;
pub mod text;
