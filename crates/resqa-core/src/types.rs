//! Data model shared across the assessment pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::config::{CheckFrequency, QAConfig};
use crate::{Error, Result};

/// Value every dimension starts from before any check runs
pub const NEUTRAL_SCORE: f64 = 0.5;

const ACCURACY_WEIGHT: f64 = 0.20;
const COMPLETENESS_WEIGHT: f64 = 0.15;
const FRESHNESS_WEIGHT: f64 = 0.15;
const AUTHORITY_WEIGHT: f64 = 0.20;
const DIVERSITY_WEIGHT: f64 = 0.10;
const USEFULNESS_WEIGHT: f64 = 0.10;
const READABILITY_WEIGHT: f64 = 0.10;

/// One of the seven independent quality dimensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Accuracy,
    Completeness,
    Freshness,
    Authority,
    Diversity,
    Usefulness,
    Readability,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Accuracy,
        Dimension::Completeness,
        Dimension::Freshness,
        Dimension::Authority,
        Dimension::Diversity,
        Dimension::Usefulness,
        Dimension::Readability,
    ];

    /// Weight of this dimension in the overall score
    pub fn weight(&self) -> f64 {
        match self {
            Dimension::Accuracy => ACCURACY_WEIGHT,
            Dimension::Completeness => COMPLETENESS_WEIGHT,
            Dimension::Freshness => FRESHNESS_WEIGHT,
            Dimension::Authority => AUTHORITY_WEIGHT,
            Dimension::Diversity => DIVERSITY_WEIGHT,
            Dimension::Usefulness => USEFULNESS_WEIGHT,
            Dimension::Readability => READABILITY_WEIGHT,
        }
    }
}

/// Multi-dimensional quality vector.
///
/// Every dimension lives in `[0, 1]`. `overall` is derived: it is recomputed
/// from the weighted dimensions on every mutation and cannot be set directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "MetricsRepr")]
pub struct QualityMetrics {
    accuracy: f64,
    completeness: f64,
    freshness: f64,
    authority: f64,
    diversity: f64,
    usefulness: f64,
    readability: f64,
    overall: f64,
}

#[derive(Deserialize)]
struct MetricsRepr {
    accuracy: f64,
    completeness: f64,
    freshness: f64,
    authority: f64,
    diversity: f64,
    usefulness: f64,
    readability: f64,
}

impl From<MetricsRepr> for QualityMetrics {
    fn from(repr: MetricsRepr) -> Self {
        let mut metrics = QualityMetrics::neutral();
        metrics.set(Dimension::Accuracy, repr.accuracy);
        metrics.set(Dimension::Completeness, repr.completeness);
        metrics.set(Dimension::Freshness, repr.freshness);
        metrics.set(Dimension::Authority, repr.authority);
        metrics.set(Dimension::Diversity, repr.diversity);
        metrics.set(Dimension::Usefulness, repr.usefulness);
        metrics.set(Dimension::Readability, repr.readability);
        metrics
    }
}

impl QualityMetrics {
    /// All dimensions at the neutral baseline
    pub fn neutral() -> Self {
        let mut metrics = Self {
            accuracy: NEUTRAL_SCORE,
            completeness: NEUTRAL_SCORE,
            freshness: NEUTRAL_SCORE,
            authority: NEUTRAL_SCORE,
            diversity: NEUTRAL_SCORE,
            usefulness: NEUTRAL_SCORE,
            readability: NEUTRAL_SCORE,
            overall: 0.0,
        };
        metrics.recompute();
        metrics
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Accuracy => self.accuracy,
            Dimension::Completeness => self.completeness,
            Dimension::Freshness => self.freshness,
            Dimension::Authority => self.authority,
            Dimension::Diversity => self.diversity,
            Dimension::Usefulness => self.usefulness,
            Dimension::Readability => self.readability,
        }
    }

    /// Set a dimension, clamped to `[0, 1]`. NaN is treated as 0.
    pub fn set(&mut self, dimension: Dimension, value: f64) {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        match dimension {
            Dimension::Accuracy => self.accuracy = value,
            Dimension::Completeness => self.completeness = value,
            Dimension::Freshness => self.freshness = value,
            Dimension::Authority => self.authority = value,
            Dimension::Diversity => self.diversity = value,
            Dimension::Usefulness => self.usefulness = value,
            Dimension::Readability => self.readability = value,
        }
        self.recompute();
    }

    /// Lower a dimension by `amount`, flooring at 0
    pub fn penalize(&mut self, dimension: Dimension, amount: f64) {
        self.set(dimension, self.get(dimension) - amount);
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn completeness(&self) -> f64 {
        self.completeness
    }

    pub fn freshness(&self) -> f64 {
        self.freshness
    }

    pub fn authority(&self) -> f64 {
        self.authority
    }

    pub fn diversity(&self) -> f64 {
        self.diversity
    }

    pub fn usefulness(&self) -> f64 {
        self.usefulness
    }

    pub fn readability(&self) -> f64 {
        self.readability
    }

    /// Weighted combination of all dimensions
    pub fn overall(&self) -> f64 {
        self.overall
    }

    fn recompute(&mut self) {
        let sum: f64 = Dimension::ALL
            .iter()
            .map(|dimension| self.get(*dimension) * dimension.weight())
            .sum();
        self.overall = sum.clamp(0.0, 1.0);
    }
}

impl Default for QualityMetrics {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Closed set of defect categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    BrokenLink,
    OutdatedContent,
    LowQuality,
    Duplicate,
    Spam,
    Bias,
    Inaccuracy,
    Accessibility,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::BrokenLink => "broken_link",
            IssueType::OutdatedContent => "outdated_content",
            IssueType::LowQuality => "low_quality",
            IssueType::Duplicate => "duplicate",
            IssueType::Spam => "spam",
            IssueType::Bias => "bias",
            IssueType::Inaccuracy => "inaccuracy",
            IssueType::Accessibility => "accessibility",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IssueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "broken_link" => Ok(IssueType::BrokenLink),
            "outdated_content" => Ok(IssueType::OutdatedContent),
            "low_quality" => Ok(IssueType::LowQuality),
            "duplicate" => Ok(IssueType::Duplicate),
            "spam" => Ok(IssueType::Spam),
            "bias" => Ok(IssueType::Bias),
            "inaccuracy" => Ok(IssueType::Inaccuracy),
            "accessibility" => Ok(IssueType::Accessibility),
            other => Err(Error::InvalidInput(format!("unknown issue type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// A detected defect
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub description: String,
    pub detected_at: DateTime<Utc>,
    pub resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl QualityIssue {
    /// Create an unresolved issue detected now
    pub fn new(issue_type: IssueType, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            issue_type,
            severity,
            description: description.into(),
            detected_at: Utc::now(),
            resolved: false,
            resolved_at: None,
        }
    }

    /// Mark the issue resolved. Returns false if it already was.
    pub fn resolve(&mut self, at: DateTime<Utc>) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        self.resolved_at = Some(at);
        true
    }
}

/// Candidate content item submitted for assessment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl ResultRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            content: content.into(),
            published_at: None,
        }
    }

    pub fn published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    /// Reject records no check could meaningfully run against
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidInput("result id must not be empty".to_string()));
        }
        self.parsed_url().map(|_| ())
    }

    /// Hostname of the result URL
    pub fn host(&self) -> Result<String> {
        let url = self.parsed_url()?;
        url.host_str()
            .map(|host| host.to_lowercase())
            .ok_or_else(|| Error::InvalidInput(format!("url '{}' has no host", self.url)))
    }

    fn parsed_url(&self) -> Result<Url> {
        let url = Url::parse(self.url.trim())
            .map_err(|e| Error::InvalidInput(format!("malformed url '{}': {}", self.url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::InvalidInput(format!(
                "url '{}' must use http or https",
                self.url
            )));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(Error::InvalidInput(format!("url '{}' has no host", self.url)));
        }
        Ok(url)
    }
}

/// What a caller should do with a result given its overall score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Accept,
    Flag,
    Remove,
}

/// Complete quality verdict for one result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityAssessment {
    pub result_id: String,
    pub title: String,
    pub url: String,
    pub metrics: QualityMetrics,
    pub issues: Vec<QualityIssue>,
    pub recommendations: Vec<String>,
    pub last_checked: DateTime<Utc>,
    pub check_frequency: CheckFrequency,
}

impl QualityAssessment {
    /// Empty assessment for a result, metrics at neutral
    pub fn new(result: &ResultRecord, check_frequency: CheckFrequency) -> Self {
        Self {
            result_id: result.id.clone(),
            title: result.title.clone(),
            url: result.url.clone(),
            metrics: QualityMetrics::neutral(),
            issues: Vec::new(),
            recommendations: Vec::new(),
            last_checked: Utc::now(),
            check_frequency,
        }
    }

    pub fn overall(&self) -> f64 {
        self.metrics.overall()
    }

    pub fn add_issue(&mut self, issue_type: IssueType, severity: Severity, description: impl Into<String>) {
        self.issues.push(QualityIssue::new(issue_type, severity, description));
    }

    pub fn has_issue(&self, issue_type: IssueType) -> bool {
        self.issues.iter().any(|issue| issue.issue_type == issue_type)
    }

    pub fn unresolved_issues(&self) -> impl Iterator<Item = &QualityIssue> {
        self.issues.iter().filter(|issue| !issue.resolved)
    }

    /// Resolve every unresolved issue of `issue_type`, returning how many changed
    pub fn resolve_issues(&mut self, issue_type: IssueType, at: DateTime<Utc>) -> usize {
        self.issues
            .iter_mut()
            .filter(|issue| issue.issue_type == issue_type)
            .map(|issue| issue.resolve(at))
            .filter(|changed| *changed)
            .count()
    }

    pub fn disposition(&self, config: &QAConfig) -> Disposition {
        let overall = self.overall();
        if overall < config.auto_remove_threshold {
            Disposition::Remove
        } else if overall < config.quality_threshold {
            Disposition::Flag
        } else {
            Disposition::Accept
        }
    }

    /// When this result should be assessed again
    pub fn next_check_at(&self) -> DateTime<Utc> {
        self.last_checked + self.check_frequency.period()
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_check_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn weighted_sum(metrics: &QualityMetrics) -> f64 {
        metrics.accuracy() * 0.20
            + metrics.completeness() * 0.15
            + metrics.freshness() * 0.15
            + metrics.authority() * 0.20
            + metrics.diversity() * 0.10
            + metrics.usefulness() * 0.10
            + metrics.readability() * 0.10
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = Dimension::ALL.iter().map(|d| d.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_tracks_every_mutation() {
        let mut metrics = QualityMetrics::neutral();
        assert!((metrics.overall() - 0.5).abs() < 1e-9);

        metrics.set(Dimension::Accuracy, 0.9);
        metrics.penalize(Dimension::Usefulness, 0.3);
        metrics.set(Dimension::Freshness, 0.2);

        assert!((metrics.overall() - weighted_sum(&metrics)).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_penalties_floor_at_zero() {
        let mut metrics = QualityMetrics::neutral();
        for _ in 0..12 {
            metrics.penalize(Dimension::Diversity, 0.1);
        }
        assert_eq!(metrics.diversity(), 0.0);

        metrics.set(Dimension::Readability, 4.2);
        assert_eq!(metrics.readability(), 1.0);
        metrics.set(Dimension::Authority, f64::NAN);
        assert_eq!(metrics.authority(), 0.0);
    }

    #[test]
    fn test_deserialized_overall_is_recomputed() {
        let json = r#"{
            "accuracy": 1.0, "completeness": 1.0, "freshness": 1.0, "authority": 1.0,
            "diversity": 1.0, "usefulness": 1.0, "readability": 1.0, "overall": 0.01
        }"#;
        let metrics: QualityMetrics = serde_json::from_str(json).unwrap();
        assert!((metrics.overall() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let result = ResultRecord::new("r1", "Title", "https://example.com/a", "body");
        let mut assessment = QualityAssessment::new(&result, CheckFrequency::Daily);
        assessment.add_issue(IssueType::Spam, Severity::High, "spammy");

        let first = Utc::now();
        assert_eq!(assessment.resolve_issues(IssueType::Spam, first), 1);
        let later = first + Duration::hours(1);
        assert_eq!(assessment.resolve_issues(IssueType::Spam, later), 0);
        assert_eq!(assessment.issues[0].resolved_at, Some(first));

        assert_eq!(assessment.resolve_issues(IssueType::Bias, later), 0);
        assert_eq!(assessment.issues.len(), 1);
    }

    #[test]
    fn test_disposition_thresholds() {
        let result = ResultRecord::new("r1", "Title", "https://example.com/a", "body");
        let mut assessment = QualityAssessment::new(&result, CheckFrequency::Daily);
        let config = QAConfig::default();

        assert_eq!(assessment.disposition(&config), Disposition::Flag);

        for dimension in Dimension::ALL {
            assessment.metrics.set(dimension, 1.0);
        }
        assert_eq!(assessment.disposition(&config), Disposition::Accept);

        for dimension in Dimension::ALL {
            assessment.metrics.set(dimension, 0.1);
        }
        assert_eq!(assessment.disposition(&config), Disposition::Remove);
    }

    #[test]
    fn test_next_check_follows_frequency() {
        let result = ResultRecord::new("r1", "Title", "https://example.com/a", "body");
        let assessment = QualityAssessment::new(&result, CheckFrequency::Weekly);

        assert_eq!(assessment.next_check_at(), assessment.last_checked + Duration::days(7));
        assert!(!assessment.is_due(assessment.last_checked + Duration::days(6)));
        assert!(assessment.is_due(assessment.last_checked + Duration::days(7)));
    }

    #[test]
    fn test_validate_rejects_bad_records() {
        let ok = ResultRecord::new("r1", "t", "https://Example.com/path", "");
        assert!(ok.validate().is_ok());
        assert_eq!(ok.host().unwrap(), "example.com");

        let empty_id = ResultRecord::new("  ", "t", "https://example.com", "");
        assert!(matches!(empty_id.validate(), Err(Error::InvalidInput(_))));

        let malformed = ResultRecord::new("r2", "t", "not a url", "");
        assert!(matches!(malformed.validate(), Err(Error::InvalidInput(_))));

        let ftp = ResultRecord::new("r3", "t", "ftp://example.com/file", "");
        assert!(matches!(ftp.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_issue_type_round_trips_through_str() {
        for issue_type in [IssueType::BrokenLink, IssueType::OutdatedContent, IssueType::Accessibility] {
            let parsed: IssueType = issue_type.as_str().parse().unwrap();
            assert_eq!(parsed, issue_type);
        }
        assert!("nonsense".parse::<IssueType>().is_err());
    }
}
