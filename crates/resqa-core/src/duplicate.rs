//! Duplicate detection trait

use crate::ResultRecord;

/// Trait for finding previously seen results with overlapping content
pub trait DuplicateDetector: Send + Sync {
    /// Ids of other remembered results duplicating `result`. A result never
    /// duplicates itself.
    fn find_duplicates(&self, result: &ResultRecord) -> Vec<String>;

    /// Index `result` so later lookups can match it. Called once its
    /// assessment has been stored; remembering an id again replaces its entry.
    fn remember(&self, result: &ResultRecord);
}
