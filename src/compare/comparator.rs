//! SnapshotComparator - public entry point for comparing two snapshots

use std::path::Path;
use std::sync::Arc;

use crate::error::{CompareError, Result};
use crate::logger::{DiffLogger, TracingLogger};

use super::config::CompareConfig;
use super::result::DiffResult;
use super::traversal::SnapshotTraversal;

/// Compares two snapshot directories.
///
/// A comparator holds no per-comparison state, so one instance can be reused
/// for any number of comparisons.
pub struct SnapshotComparator {
    config: CompareConfig,
    logger: Arc<dyn DiffLogger>,
}

impl SnapshotComparator {
    pub fn new(config: CompareConfig) -> Self {
        Self {
            config,
            logger: Arc::new(TracingLogger),
        }
    }

    /// Report through the given logger instead of `tracing`.
    pub fn with_logger(mut self, logger: Arc<dyn DiffLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare two snapshots, logging invalid input and returning an empty result for it.
    pub fn compare(&self, snapshot_a: impl AsRef<Path>, snapshot_b: impl AsRef<Path>) -> DiffResult {
        match self.try_compare(snapshot_a, snapshot_b) {
            Ok(result) => result,
            Err(e) => {
                self.logger.error(&e.to_string());
                DiffResult::default()
            }
        }
    }

    /// Compare two snapshots.
    ///
    /// Fails only when a path is empty, missing, or not a directory. Unreadable
    /// or unparsable files inside the snapshots are logged and skipped.
    pub fn try_compare(
        &self,
        snapshot_a: impl AsRef<Path>,
        snapshot_b: impl AsRef<Path>,
    ) -> Result<DiffResult> {
        let (root_a, root_b) = (snapshot_a.as_ref(), snapshot_b.as_ref());
        validate_snapshots(root_a, root_b)?;

        let mut diff = DiffResult::default();
        SnapshotTraversal::new(&self.config, &*self.logger, root_a)
            .compare_directories(root_a, root_b, &mut diff);

        self.logger.info("Snapshots compared.");
        if diff.is_empty() {
            self.logger
                .info("No differences found between the snapshots.");
            return Ok(DiffResult::default());
        }

        self.logger.info("Differences found between the snapshots.");
        self.logger.debug(&format!(
            "File differences: {}",
            serde_json::to_string(&diff.file_diffs).unwrap_or_default()
        ));
        self.logger.debug(&format!(
            "Object differences: {}",
            serde_json::to_string(&diff.object_diffs).unwrap_or_default()
        ));
        Ok(diff)
    }
}

impl Default for SnapshotComparator {
    fn default() -> Self {
        Self::new(CompareConfig::default())
    }
}

fn validate_snapshots(root_a: &Path, root_b: &Path) -> Result<()> {
    if root_a.as_os_str().is_empty() || root_b.as_os_str().is_empty() {
        return Err(CompareError::invalid_input(
            "Both snapshot paths must be provided.",
        ));
    }
    for root in [root_a, root_b] {
        if !root.is_dir() {
            return Err(CompareError::invalid_input(format!(
                "Both paths must be valid directories; {} is not.",
                root.display()
            )));
        }
    }
    Ok(())
}

/// Compare two snapshot directories with default settings.
///
/// Invalid input is logged through `tracing` and yields an empty result.
pub fn compare_snapshots(
    snapshot_a: impl AsRef<Path>,
    snapshot_b: impl AsRef<Path>,
    show_all_objects: bool,
    show_all_files: bool,
) -> DiffResult {
    SnapshotComparator::new(CompareConfig::with_verbosity(show_all_objects, show_all_files))
        .compare(snapshot_a, snapshot_b)
}
