//! Use cases - application-level operations over stored assessments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use resqa_core::{
    AssessmentStore, Disposition, IssueType, QAConfig, QualityAssessment, QualityStatistics,
    Result, ResultRecord,
};

/// Use case: Keep only results whose stored assessment meets a threshold
pub struct FilterByQualityUseCase<'a, S: AssessmentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: AssessmentStore + ?Sized> FilterByQualityUseCase<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        results: &[ResultRecord],
        min_score: f64,
    ) -> Result<Vec<(ResultRecord, QualityAssessment)>> {
        self.store.filter_by_quality(results, min_score).await
    }
}

/// Use case: Mark every open issue of one type as resolved
pub struct ResolveIssueUseCase<'a, S: AssessmentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: AssessmentStore + ?Sized> ResolveIssueUseCase<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn execute(&self, result_id: &str, issue_type: IssueType) -> Result<usize> {
        self.store.resolve_issue(result_id, issue_type).await
    }
}

/// Store-wide summary with the results that need attention
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityReport {
    pub statistics: QualityStatistics,
    /// Below the quality threshold but above auto-removal
    pub flagged: Vec<String>,
    pub to_remove: Vec<String>,
    pub due_for_recheck: Vec<String>,
}

/// Use case: Summarize everything the store knows
pub struct QualityReportUseCase<'a, S: AssessmentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: AssessmentStore + ?Sized> QualityReportUseCase<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn execute(&self, config: &QAConfig, now: DateTime<Utc>) -> Result<QualityReport> {
        let assessments = self.store.all().await?;

        let mut flagged = Vec::new();
        let mut to_remove = Vec::new();
        for assessment in &assessments {
            match assessment.disposition(config) {
                Disposition::Flag => flagged.push(assessment.result_id.clone()),
                Disposition::Remove => to_remove.push(assessment.result_id.clone()),
                Disposition::Accept => {}
            }
        }

        let due_for_recheck = self
            .store
            .due_for_recheck(now)
            .await?
            .into_iter()
            .map(|assessment| assessment.result_id)
            .collect();

        Ok(QualityReport {
            statistics: QualityStatistics::from_assessments(&assessments),
            flagged,
            to_remove,
            due_for_recheck,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use resqa_core::{CheckFrequency, Dimension, Severity};

    use crate::infrastructure::InMemoryAssessmentStore;

    fn assessment(id: &str, score: f64) -> QualityAssessment {
        let record = ResultRecord::new(id, id, format!("https://example.com/{}", id), "");
        let mut assessment = QualityAssessment::new(&record, CheckFrequency::Daily);
        for dimension in Dimension::ALL {
            assessment.metrics.set(dimension, score);
        }
        assessment
    }

    async fn seeded_store() -> InMemoryAssessmentStore {
        let store = InMemoryAssessmentStore::new();
        store.save(assessment("good", 0.9)).await.unwrap();
        store.save(assessment("meh", 0.5)).await.unwrap();

        let mut bad = assessment("bad", 0.1);
        bad.add_issue(IssueType::Spam, Severity::Critical, "spam");
        bad.check_frequency = CheckFrequency::Hourly;
        store.save(bad).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_report_sorts_results_by_disposition() {
        let store = seeded_store().await;
        let report = QualityReportUseCase::new(&store)
            .execute(&QAConfig::default(), Utc::now() + Duration::hours(3))
            .await
            .unwrap();

        assert_eq!(report.statistics.total, 3);
        assert_eq!(report.statistics.top_issues, vec![(IssueType::Spam, 1)]);
        assert_eq!(report.flagged, vec!["meh".to_string()]);
        assert_eq!(report.to_remove, vec!["bad".to_string()]);
        assert_eq!(report.due_for_recheck, vec!["bad".to_string()]);
    }

    #[tokio::test]
    async fn test_filter_and_resolve_through_trait_object() {
        let store: Box<dyn AssessmentStore> = Box::new(seeded_store().await);

        let results = vec![
            ResultRecord::new("bad", "t", "https://example.com/bad", ""),
            ResultRecord::new("good", "t", "https://example.com/good", ""),
        ];
        let passing = FilterByQualityUseCase::new(store.as_ref())
            .execute(&results, 0.7)
            .await
            .unwrap();
        assert_eq!(passing.len(), 1);
        assert_eq!(passing[0].0.id, "good");

        let resolve = ResolveIssueUseCase::new(store.as_ref());
        assert_eq!(resolve.execute("bad", IssueType::Spam).await.unwrap(), 1);
        assert_eq!(resolve.execute("bad", IssueType::Spam).await.unwrap(), 0);
        assert!(resolve.execute("missing", IssueType::Spam).await.is_err());
    }
}
