//! Test utilities for building pairs of temporary snapshots.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use crate::logger::DiffLogger;

/// Two sibling snapshot directories, `a` and `b`, inside one temporary directory.
///
/// Everything is cleaned up when dropped.
pub struct SnapshotPair {
    dir: TempDir,
}

impl SnapshotPair {
    /// Create empty `a` and `b` snapshots.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(dir.path().join("a")).expect("Failed to create snapshot a");
        fs::create_dir(dir.path().join("b")).expect("Failed to create snapshot b");
        Self { dir }
    }

    /// Get the directory holding both snapshots.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn a(&self) -> PathBuf {
        self.dir.path().join("a")
    }

    pub fn b(&self) -> PathBuf {
        self.dir.path().join("b")
    }

    /// Write a file into snapshot `a`, creating parent directories as needed.
    pub fn add_a(&self, path: &str, content: &str) -> PathBuf {
        write_file(&self.a().join(path), content.as_bytes())
    }

    /// Write a file into snapshot `b`, creating parent directories as needed.
    pub fn add_b(&self, path: &str, content: &str) -> PathBuf {
        write_file(&self.b().join(path), content.as_bytes())
    }

    /// Write the same file into both snapshots.
    pub fn add_both(&self, path: &str, content: &str) {
        self.add_a(path, content);
        self.add_b(path, content);
    }

    /// Write raw bytes into snapshot `a`.
    pub fn add_a_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        write_file(&self.a().join(path), content)
    }

    /// Create a directory in snapshot `a`.
    pub fn mkdir_a(&self, path: &str) -> PathBuf {
        let full_path = self.a().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create a directory in snapshot `b`.
    pub fn mkdir_b(&self, path: &str) -> PathBuf {
        let full_path = self.b().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

impl Default for SnapshotPair {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(full_path: &Path, content: &[u8]) -> PathBuf {
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    fs::write(full_path, content).expect("Failed to write file");
    full_path.to_path_buf()
}

/// Logger that keeps every message for later assertions.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    messages: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages logged at the given level ("info", "error" or "debug").
    pub fn messages(&self, level: &str) -> Vec<String> {
        self.messages
            .lock()
            .expect("logger mutex poisoned")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, level: &'static str, message: &str) {
        self.messages
            .lock()
            .expect("logger mutex poisoned")
            .push((level, message.to_string()));
    }
}

impl DiffLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.push("info", message);
    }

    fn error(&self, message: &str) {
        self.push("error", message);
    }

    fn debug(&self, message: &str) {
        self.push("debug", message);
    }
}
