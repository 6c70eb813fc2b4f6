//! Data exports tab.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::data_export::Model as DataExportModel;

/// Number of jobs shown on the exports tab.
pub const RECENT_EXPORTS_LIMIT: u64 = 50;

/// Job counts by status over the listed jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExportStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

pub fn stats(jobs: &[DataExportModel]) -> ExportStats {
    jobs.iter().fold(
        ExportStats {
            total: jobs.len(),
            ..ExportStats::default()
        },
        |mut stats, job| {
            match job.status.as_str() {
                "pending" => stats.pending += 1,
                "processing" => stats.processing += 1,
                "completed" => stats.completed += 1,
                "failed" => stats.failed += 1,
                _ => {}
            }
            stats
        },
    )
}
