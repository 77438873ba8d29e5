//! Repository implementations

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use resqa_core::{AssessmentStore, Error, IssueType, QualityAssessment, Result};

/// Process-local assessment store.
///
/// Nothing is persisted or evicted. Each call takes the lock once, so a save
/// is atomic; concurrent assessments of the same result resolve to whichever
/// save lands last.
#[derive(Default)]
pub struct InMemoryAssessmentStore {
    assessments: RwLock<HashMap<String, QualityAssessment>>,
}

impl InMemoryAssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssessmentStore for InMemoryAssessmentStore {
    async fn get(&self, result_id: &str) -> Result<Option<QualityAssessment>> {
        Ok(self.assessments.read().await.get(result_id).cloned())
    }

    async fn save(&self, assessment: QualityAssessment) -> Result<()> {
        let mut assessments = self.assessments.write().await;
        if assessments
            .insert(assessment.result_id.clone(), assessment)
            .is_some()
        {
            debug!("Replaced previous assessment");
        }
        Ok(())
    }

    async fn all(&self) -> Result<Vec<QualityAssessment>> {
        let mut all: Vec<QualityAssessment> =
            self.assessments.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.result_id.cmp(&b.result_id));
        Ok(all)
    }

    async fn resolve_issue(&self, result_id: &str, issue_type: IssueType) -> Result<usize> {
        let mut assessments = self.assessments.write().await;
        let assessment = assessments
            .get_mut(result_id)
            .ok_or_else(|| Error::NotFound(result_id.to_string()))?;

        let resolved = assessment.resolve_issues(issue_type, Utc::now());
        debug!(result_id, %issue_type, resolved, "Issues resolved");
        Ok(resolved)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.assessments.read().await.len())
    }
}
