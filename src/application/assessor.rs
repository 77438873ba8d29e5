//! Quality assessor - runs the enabled checks and merges them into one verdict

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use resqa_core::{
    AssessmentStore, AuthorityChecker, Dimension, DuplicateDetector, IssueType, LinkChecker,
    NEUTRAL_SCORE, QAConfig, QualityAssessment, Result, ResultRecord, Severity,
    authority::LOW_AUTHORITY_THRESHOLD,
};

use crate::analysis::{ContentAnalyzer, ShingleDuplicateDetector, SpamDetector};
use crate::infrastructure::StaticAuthorityChecker;

const BROKEN_LINK_PENALTY: f64 = 0.3;
const FAILED_LINK_CHECK_PENALTY: f64 = 0.2;
const DUPLICATE_PENALTY: f64 = 0.1;
const DAYS_PER_YEAR: f64 = 365.0;

const READABILITY_RECOMMENDATION: &str =
    "Improve readability: use shorter sentences and plainer wording";
const FRESHNESS_RECOMMENDATION: &str =
    "Update content: the information may be outdated";
const AUTHORITY_RECOMMENDATION: &str =
    "Consider higher-authority sources for this topic";

/// Recency bucket of a publication date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Up to one year old
    Fresh,
    /// Older than one year, up to two
    Aging,
    /// Older than two years
    Stale,
}

impl Freshness {
    pub fn at(published_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let age_days = (now - published_at).num_seconds() as f64 / 86_400.0;
        let age_years = age_days / DAYS_PER_YEAR;

        if age_years > 2.0 {
            Freshness::Stale
        } else if age_years > 1.0 {
            Freshness::Aging
        } else {
            Freshness::Fresh
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Freshness::Fresh => 0.9,
            Freshness::Aging => 0.5,
            Freshness::Stale => 0.2,
        }
    }
}

/// Orchestrates the individual checks for one result at a time.
///
/// Every metric starts at neutral; checks run in a fixed order (link, content,
/// freshness, authority, duplicates, spam) and only lower their dimension or,
/// for content and freshness, set it outright. A failing check never aborts
/// the assessment: it degrades a metric or records an issue instead.
pub struct QualityAssessor {
    store: Arc<dyn AssessmentStore>,
    link_checker: Arc<dyn LinkChecker>,
    authority_checker: Arc<dyn AuthorityChecker>,
    duplicate_detector: Arc<dyn DuplicateDetector>,
    content_analyzer: ContentAnalyzer,
    spam_detector: SpamDetector,
}

impl QualityAssessor {
    /// Assessor with the default authority table, duplicate index and heuristics
    pub fn new(store: Arc<dyn AssessmentStore>, link_checker: Arc<dyn LinkChecker>) -> Self {
        Self {
            store,
            link_checker,
            authority_checker: Arc::new(StaticAuthorityChecker::new()),
            duplicate_detector: Arc::new(ShingleDuplicateDetector::new()),
            content_analyzer: ContentAnalyzer::new(),
            spam_detector: SpamDetector::new(),
        }
    }

    pub fn with_authority_checker(mut self, checker: Arc<dyn AuthorityChecker>) -> Self {
        self.authority_checker = checker;
        self
    }

    pub fn with_duplicate_detector(mut self, detector: Arc<dyn DuplicateDetector>) -> Self {
        self.duplicate_detector = detector;
        self
    }

    pub fn with_content_analyzer(mut self, analyzer: ContentAnalyzer) -> Self {
        self.content_analyzer = analyzer;
        self
    }

    pub fn store(&self) -> &Arc<dyn AssessmentStore> {
        &self.store
    }

    /// Assess a result and store the verdict, replacing any earlier one.
    ///
    /// Only malformed input (`Error::InvalidInput`) and store failures are
    /// returned as errors.
    pub async fn assess(&self, result: &ResultRecord, config: &QAConfig) -> Result<QualityAssessment> {
        result.validate()?;

        let mut assessment = QualityAssessment::new(result, config.check_frequency);

        if config.check_links {
            self.check_link(result, config, &mut assessment).await;
        }
        if config.analyze_content {
            self.analyze_content(result, &mut assessment);
        }
        if let Some(published_at) = result.published_at {
            apply_freshness(published_at, Utc::now(), &mut assessment);
        }
        if config.check_authority {
            self.check_authority(result, config, &mut assessment).await;
        }
        if config.detect_duplicates {
            self.check_duplicates(result, &mut assessment);
        }
        if config.detect_spam {
            self.check_spam(result, &mut assessment);
        }

        add_recommendations(&mut assessment);
        assessment.last_checked = Utc::now();

        info!(
            result_id = %assessment.result_id,
            overall = assessment.overall(),
            issues = assessment.issues.len(),
            "Result assessed"
        );

        self.store.save(assessment.clone()).await?;

        // only stored results become duplicate candidates
        if config.detect_duplicates {
            self.duplicate_detector.remember(result);
        }
        Ok(assessment)
    }

    /// Assess results one after another, one outcome per input in order
    pub async fn assess_batch(
        &self,
        results: &[ResultRecord],
        config: &QAConfig,
    ) -> Vec<Result<QualityAssessment>> {
        let mut outcomes = Vec::with_capacity(results.len());
        for result in results {
            let outcome = self.assess(result, config).await;
            if let Err(e) = &outcome {
                warn!(result_id = %result.id, error = %e, "Assessment failed");
            }
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn check_link(&self, result: &ResultRecord, config: &QAConfig, assessment: &mut QualityAssessment) {
        match timeout(config.link_timeout, self.link_checker.check(&result.url)).await {
            Ok(Ok(check)) if check.valid => {
                debug!(url = %result.url, status = ?check.status_code, "Link reachable");
            }
            Ok(Ok(check)) => {
                let severity = if check.is_not_found() {
                    Severity::Critical
                } else {
                    Severity::High
                };
                let description = match check.status_code {
                    Some(code) => format!("Link returned HTTP {}", code),
                    None => "Link is not reachable".to_string(),
                };
                assessment.add_issue(IssueType::BrokenLink, severity, description);
                assessment.metrics.penalize(Dimension::Accuracy, BROKEN_LINK_PENALTY);
            }
            Ok(Err(e)) => {
                warn!(url = %result.url, error = %e, "Link check failed");
                assessment.add_issue(
                    IssueType::BrokenLink,
                    Severity::High,
                    format!("Link check failed: {}", e),
                );
                assessment.metrics.penalize(Dimension::Accuracy, FAILED_LINK_CHECK_PENALTY);
            }
            Err(_) => {
                warn!(url = %result.url, timeout = ?config.link_timeout, "Link check timed out");
                assessment.add_issue(
                    IssueType::BrokenLink,
                    Severity::High,
                    format!("Link unreachable: no response within {:?}", config.link_timeout),
                );
                assessment.metrics.penalize(Dimension::Accuracy, FAILED_LINK_CHECK_PENALTY);
            }
        }
    }

    fn analyze_content(&self, result: &ResultRecord, assessment: &mut QualityAssessment) {
        let analysis = self.content_analyzer.analyze(&result.content);

        // a broken link keeps counting against accuracy once fact-checking sets it
        let link_penalty = NEUTRAL_SCORE - assessment.metrics.accuracy();

        let metrics = &mut assessment.metrics;
        metrics.set(Dimension::Readability, analysis.readability.score / 100.0);
        metrics.set(Dimension::Accuracy, analysis.accuracy.score - link_penalty);
        metrics.set(Dimension::Completeness, analysis.completeness.score);

        assessment.issues.extend(analysis.issues());
        assessment
            .recommendations
            .extend(analysis.seo.suggestions.iter().cloned());
    }

    async fn check_authority(&self, result: &ResultRecord, config: &QAConfig, assessment: &mut QualityAssessment) {
        let host = match result.host() {
            Ok(host) => host,
            Err(e) => {
                warn!(url = %result.url, error = %e, "No host to check authority for");
                return;
            }
        };

        match timeout(config.authority_timeout, self.authority_checker.authority(&host)).await {
            Ok(Ok(raw)) => {
                let raw = raw.clamp(0.0, 100.0);
                assessment.metrics.set(Dimension::Authority, raw / 100.0);
                if raw < LOW_AUTHORITY_THRESHOLD {
                    assessment.add_issue(
                        IssueType::LowQuality,
                        Severity::Medium,
                        format!("Low domain authority for {} ({:.0}/100)", host, raw),
                    );
                }
            }
            Ok(Err(e)) => {
                warn!(host = %host, error = %e, "Authority check failed, using neutral score");
                assessment.metrics.set(Dimension::Authority, NEUTRAL_SCORE);
            }
            Err(_) => {
                warn!(host = %host, timeout = ?config.authority_timeout, "Authority check timed out, using neutral score");
                assessment.metrics.set(Dimension::Authority, NEUTRAL_SCORE);
            }
        }
    }

    fn check_duplicates(&self, result: &ResultRecord, assessment: &mut QualityAssessment) {
        let duplicates = self.duplicate_detector.find_duplicates(result);
        for id in &duplicates {
            assessment.add_issue(
                IssueType::Duplicate,
                Severity::Medium,
                format!("Content duplicates result '{}'", id),
            );
        }
        assessment
            .metrics
            .penalize(Dimension::Diversity, DUPLICATE_PENALTY * duplicates.len() as f64);
    }

    fn check_spam(&self, result: &ResultRecord, assessment: &mut QualityAssessment) {
        let analysis = self.spam_detector.analyze(&result.content);
        if let Some((severity, penalty)) = analysis.verdict() {
            assessment.add_issue(
                IssueType::Spam,
                severity,
                format!("Content is likely spam (score {:.2})", analysis.score),
            );
            assessment.metrics.penalize(Dimension::Usefulness, penalty);
        }
    }
}

fn apply_freshness(published_at: DateTime<Utc>, now: DateTime<Utc>, assessment: &mut QualityAssessment) {
    let freshness = Freshness::at(published_at, now);
    assessment.metrics.set(Dimension::Freshness, freshness.score());
    if freshness == Freshness::Stale {
        assessment.add_issue(
            IssueType::OutdatedContent,
            Severity::Medium,
            format!("Content published {} is over two years old", published_at.date_naive()),
        );
    }
}

fn add_recommendations(assessment: &mut QualityAssessment) {
    let metrics = &assessment.metrics;
    let mut recommendations = Vec::new();
    if metrics.readability() < 0.5 {
        recommendations.push(READABILITY_RECOMMENDATION.to_string());
    }
    if metrics.freshness() < 0.5 {
        recommendations.push(FRESHNESS_RECOMMENDATION.to_string());
    }
    if metrics.authority() < 0.5 {
        recommendations.push(AUTHORITY_RECOMMENDATION.to_string());
    }
    assessment.recommendations.extend(recommendations);
}
