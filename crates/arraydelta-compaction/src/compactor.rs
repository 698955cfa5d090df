//! Batch compaction orchestrator.
//!
//! The Compactor wraps [`compact`](crate::compact) with optional
//! precondition checks, capacity trimming and running statistics, so a
//! producer handling many batches can account for what compaction saves.

use crate::compact::merge_sorted;
use crate::error::Result;
use crate::validate;
use arraydelta_core::Update;
use serde::{Deserialize, Serialize};

/// Configuration for the compactor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactionConfig {
    /// Reject batches whose per-index updates do not chain.
    pub verify_lineage: bool,

    /// Reject batches where an index ends absent below a surviving one.
    pub verify_tail_anchored: bool,

    /// Release spare capacity after truncating a batch.
    pub shrink_to_fit: bool,
}

impl Default for CompactionConfig {
    fn default() -> Self {
        CompactionConfig {
            verify_lineage: cfg!(debug_assertions),
            verify_tail_anchored: cfg!(debug_assertions),
            shrink_to_fit: false,
        }
    }
}

impl CompactionConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// A configuration that trusts every batch.
    pub fn unchecked() -> Self {
        CompactionConfig {
            verify_lineage: false,
            verify_tail_anchored: false,
            shrink_to_fit: false,
        }
    }
}

/// Statistics about compaction runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionStats {
    /// Batches compacted.
    pub batches: u64,

    /// Raw updates received across all batches.
    pub updates_in: u64,

    /// Updates surviving compaction across all batches.
    pub updates_out: u64,

    /// Batches that compacted away entirely.
    pub empty_results: u64,
}

impl CompactionStats {
    /// Fraction of raw updates removed by compaction.
    pub fn reduction_ratio(&self) -> f64 {
        if self.updates_in == 0 {
            0.0
        } else {
            1.0 - self.updates_out as f64 / self.updates_in as f64
        }
    }
}

/// Outcome of compacting one batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompactionReport {
    /// Length of the batch before compaction.
    pub input_len: usize,

    /// Length of the batch after compaction.
    pub output_len: usize,
}

impl CompactionReport {
    /// Number of updates removed.
    pub fn dropped(&self) -> usize {
        self.input_len - self.output_len
    }
}

/// Compacts batches and keeps running statistics.
#[derive(Clone, Debug, Default)]
pub struct Compactor {
    /// Configuration.
    config: CompactionConfig,

    /// Statistics.
    stats: CompactionStats,
}

impl Compactor {
    /// Create a compactor with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compactor with custom configuration.
    pub fn with_config(config: CompactionConfig) -> Self {
        Compactor {
            config,
            stats: CompactionStats::default(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CompactionConfig {
        &self.config
    }

    /// Get statistics.
    pub fn stats(&self) -> &CompactionStats {
        &self.stats
    }

    /// Clear accumulated statistics.
    pub fn reset_stats(&mut self) {
        self.stats = CompactionStats::default();
    }

    /// Compact `batch` in place.
    ///
    /// With verification enabled a malformed batch is reported and left
    /// sorted but otherwise untouched; statistics are not updated for it.
    pub fn compact<V: PartialEq>(
        &mut self,
        batch: &mut Vec<Update<V>>,
    ) -> Result<CompactionReport> {
        let input_len = batch.len();
        batch.sort_by_key(|update| update.index);

        if let Err(err) = self.verify(batch) {
            tracing::warn!(error = %err, len = input_len, "rejected malformed batch");
            return Err(err);
        }

        let kept = merge_sorted(batch);
        batch.truncate(kept);
        if self.config.shrink_to_fit {
            batch.shrink_to_fit();
        }

        let report = CompactionReport {
            input_len,
            output_len: kept,
        };

        self.stats.batches += 1;
        self.stats.updates_in += input_len as u64;
        self.stats.updates_out += kept as u64;
        if kept == 0 {
            self.stats.empty_results += 1;
        }

        tracing::debug!(
            input = report.input_len,
            output = report.output_len,
            dropped = report.dropped(),
            "compacted batch"
        );

        Ok(report)
    }

    fn verify<V: PartialEq>(&self, batch: &[Update<V>]) -> Result<()> {
        if self.config.verify_lineage {
            validate::check_lineage(batch)?;
        }
        if self.config.verify_tail_anchored {
            validate::check_tail_anchored(batch)?;
        }
        Ok(())
    }
}
