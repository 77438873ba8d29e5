//! Assessment store trait and reporting types

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{IssueType, QualityAssessment, Result, ResultRecord};

const TOP_ISSUE_LIMIT: usize = 5;

/// Histogram of overall scores
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualityDistribution {
    /// overall >= 0.9
    pub excellent: usize,
    /// 0.7 <= overall < 0.9
    pub good: usize,
    /// 0.5 <= overall < 0.7
    pub fair: usize,
    /// overall < 0.5
    pub poor: usize,
}

impl QualityDistribution {
    fn record(&mut self, overall: f64) {
        if overall >= 0.9 {
            self.excellent += 1;
        } else if overall >= 0.7 {
            self.good += 1;
        } else if overall >= 0.5 {
            self.fair += 1;
        } else {
            self.poor += 1;
        }
    }
}

/// Aggregate view over every stored assessment
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QualityStatistics {
    pub total: usize,
    pub average_score: f64,
    pub distribution: QualityDistribution,
    /// Most frequent issue types, most common first
    pub top_issues: Vec<(IssueType, usize)>,
}

impl QualityStatistics {
    pub fn from_assessments<'a, I>(assessments: I) -> Self
    where
        I: IntoIterator<Item = &'a QualityAssessment>,
    {
        let mut stats = QualityStatistics::default();
        let mut score_sum = 0.0;
        let mut issue_counts: HashMap<IssueType, usize> = HashMap::new();

        for assessment in assessments {
            stats.total += 1;
            score_sum += assessment.overall();
            stats.distribution.record(assessment.overall());
            for issue in &assessment.issues {
                *issue_counts.entry(issue.issue_type).or_insert(0) += 1;
            }
        }

        if stats.total > 0 {
            stats.average_score = score_sum / stats.total as f64;
        }

        let mut top_issues: Vec<(IssueType, usize)> = issue_counts.into_iter().collect();
        top_issues.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        top_issues.truncate(TOP_ISSUE_LIMIT);
        stats.top_issues = top_issues;

        stats
    }
}

/// Trait for assessment storage (in-memory map, database, cache, ...)
///
/// The store owns the mapping from result id to its latest assessment. Saving
/// an assessment for an id that already has one replaces it.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    async fn get(&self, result_id: &str) -> Result<Option<QualityAssessment>>;

    /// Insert or replace the assessment for its result id
    async fn save(&self, assessment: QualityAssessment) -> Result<()>;

    async fn all(&self) -> Result<Vec<QualityAssessment>>;

    /// Resolve every unresolved issue of `issue_type` on a result's assessment.
    ///
    /// Returns the number of issues that changed state. Fails with
    /// `Error::NotFound` when the result has never been assessed.
    async fn resolve_issue(&self, result_id: &str, issue_type: IssueType) -> Result<usize>;

    async fn count(&self) -> Result<usize> {
        Ok(self.all().await?.len())
    }

    /// Results whose stored assessment scores at least `threshold`.
    ///
    /// Input order is kept; results without an assessment are left out.
    async fn filter_by_quality(
        &self,
        results: &[ResultRecord],
        threshold: f64,
    ) -> Result<Vec<(ResultRecord, QualityAssessment)>> {
        let mut passing = Vec::new();
        for result in results {
            match self.get(&result.id).await? {
                Some(assessment) if assessment.overall() >= threshold => {
                    passing.push((result.clone(), assessment));
                }
                _ => {}
            }
        }
        Ok(passing)
    }

    async fn statistics(&self) -> Result<QualityStatistics> {
        let assessments = self.all().await?;
        Ok(QualityStatistics::from_assessments(&assessments))
    }

    /// Assessments whose check frequency says they are stale at `now`
    async fn due_for_recheck(&self, now: DateTime<Utc>) -> Result<Vec<QualityAssessment>> {
        let mut due: Vec<QualityAssessment> = self
            .all()
            .await?
            .into_iter()
            .filter(|assessment| assessment.is_due(now))
            .collect();
        due.sort_by_key(|assessment| assessment.next_check_at());
        Ok(due)
    }
}
