//! Result types for bulk index submissions.

use crate::errors::SearchIndexError;

/// Outcome of a single action within a bulk submission.
#[derive(Debug, Clone)]
pub struct BulkItemResult {
    /// The target index name.
    pub index: String,
    /// The external document id.
    pub doc_id: String,
    /// Whether the action was applied.
    pub success: bool,
    /// Error if the action was rejected.
    pub error: Option<SearchIndexError>,
}

/// Summary of a bulk submission containing aggregate statistics and
/// individual results.
///
/// The bulk protocol can fail per item while the submission as a whole
/// succeeds; callers inspect the summary to report partial failures.
#[derive(Debug, Clone)]
pub struct BulkSummary {
    /// Total number of actions in the submission.
    pub total: usize,
    /// Number of actions applied successfully.
    pub succeeded: usize,
    /// Number of actions rejected.
    pub failed: usize,
    /// Individual results for each action.
    pub results: Vec<BulkItemResult>,
}

impl BulkSummary {
    /// Whether every action in the submission was applied.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Iterate the rejected items.
    pub fn failures(&self) -> impl Iterator<Item = &BulkItemResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_succeeded() {
        let summary = BulkSummary {
            total: 2,
            succeeded: 2,
            failed: 0,
            results: vec![],
        };
        assert!(summary.all_succeeded());

        let summary = BulkSummary {
            total: 2,
            succeeded: 1,
            failed: 1,
            results: vec![],
        };
        assert!(!summary.all_succeeded());
    }

    #[test]
    fn test_failures_filters_rejected_items() {
        let summary = BulkSummary {
            total: 2,
            succeeded: 1,
            failed: 1,
            results: vec![
                BulkItemResult {
                    index: "person".to_string(),
                    doc_id: "7".to_string(),
                    success: true,
                    error: None,
                },
                BulkItemResult {
                    index: "person".to_string(),
                    doc_id: "8".to_string(),
                    success: false,
                    error: Some(SearchIndexError::bulk_item("mapping conflict")),
                },
            ],
        };

        let failures: Vec<_> = summary.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].doc_id, "8");
    }
}
