//! Snapshot comparison engine
//!
//! Walks two snapshot directories in lockstep and collects a `DiffResult`:
//!
//! - `traversal`: pairs entries by name, reports one-sided entries, recurses
//!   into shared subdirectories
//! - `classify`: groups files by base name and picks the comparison for each
//! - `comparator`: validates input and drives a traversal
//! - `result`: the accumulated report
//!
//! Names starting with `__` are invisible everywhere.

mod classify;
mod comparator;
mod config;
mod result;
mod traversal;

// Re-export public types
pub use classify::{CFG_EXT, JSON_EXT, OUTPUT_EXT, Resolution, group_by_base, resolve};
pub use comparator::{SnapshotComparator, compare_snapshots};
pub use config::{CompareConfig, UnmatchedPolicy};
pub use result::DiffResult;
