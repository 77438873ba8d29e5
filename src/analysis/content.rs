//! Content analyzer: readability, fact-check accuracy, completeness and SEO

use serde::{Deserialize, Serialize};
use tracing::debug;

use resqa_core::{ClaimVerifier, IssueType, NEUTRAL_SCORE, QualityIssue, Severity};

use super::claims::{AttributionVerifier, ClaimExtractor};
use super::readability::ReadabilityAnalysis;
use super::text::{distinct_words, terminated_sentence_count, words};

const LOW_READABILITY: f64 = 50.0;
const MANY_UNVERIFIED_CLAIMS: usize = 3;
const MIN_CONTENT_CHARS: usize = 100;
const MIN_BODY_WORDS: usize = 50;
const MIN_VOCABULARY: usize = 20;
const MIN_SENTENCES: usize = 2;
const SEO_MIN_WORDS: usize = 300;
const SEO_MIN_DISTINCT_TERMS: usize = 50;

/// Canonical checklist a complete piece of content satisfies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentElement {
    SufficientLength,
    ParagraphStructure,
    SentenceStructure,
    SubstantiveBody,
    VocabularyVariety,
}

impl ContentElement {
    pub const CHECKLIST: [ContentElement; 5] = [
        ContentElement::SufficientLength,
        ContentElement::ParagraphStructure,
        ContentElement::SentenceStructure,
        ContentElement::SubstantiveBody,
        ContentElement::VocabularyVariety,
    ];

    /// How the element reads when it is missing
    pub fn missing_description(&self) -> &'static str {
        match self {
            ContentElement::SufficientLength => "insufficient content",
            ContentElement::ParagraphStructure => "lacks paragraph structure",
            ContentElement::SentenceStructure => "lacks complete sentences",
            ContentElement::SubstantiveBody => "body too thin",
            ContentElement::VocabularyVariety => "limited vocabulary",
        }
    }

    fn is_present(&self, text: &str) -> bool {
        match self {
            ContentElement::SufficientLength => text.trim().chars().count() >= MIN_CONTENT_CHARS,
            ContentElement::ParagraphStructure => text.contains("\n\n") || text.contains("\r\n\r\n"),
            ContentElement::SentenceStructure => terminated_sentence_count(text) >= MIN_SENTENCES,
            ContentElement::SubstantiveBody => words(text).count() >= MIN_BODY_WORDS,
            ContentElement::VocabularyVariety => distinct_words(text) >= MIN_VOCABULARY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccuracyAnalysis {
    /// Verified fraction of extracted claims; neutral when nothing was claimed
    pub score: f64,
    pub claims: usize,
    pub unverified: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletenessAnalysis {
    pub score: f64,
    pub missing: Vec<ContentElement>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeoAnalysis {
    /// 0-100, 20 points off per finding
    pub score: f64,
    pub word_count: usize,
    pub distinct_terms: usize,
    pub suggestions: Vec<String>,
}

/// The four independent sub-scores of a content analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentQualityAnalysis {
    pub readability: ReadabilityAnalysis,
    pub accuracy: AccuracyAnalysis,
    pub completeness: CompletenessAnalysis,
    pub seo: SeoAnalysis,
}

impl ContentQualityAnalysis {
    /// Issues raised by readability, fact-checking and completeness, in that order
    pub fn issues(&self) -> Vec<QualityIssue> {
        let mut issues = Vec::new();

        if self.readability.score < LOW_READABILITY {
            issues.push(QualityIssue::new(
                IssueType::LowQuality,
                Severity::Medium,
                format!(
                    "Low readability score ({:.1}, {} level)",
                    self.readability.score, self.readability.grade_level
                ),
            ));
        }

        let unverified = self.accuracy.unverified.len();
        if unverified > 0 {
            let severity = if unverified > MANY_UNVERIFIED_CLAIMS {
                Severity::High
            } else {
                Severity::Medium
            };
            issues.push(QualityIssue::new(
                IssueType::Inaccuracy,
                severity,
                format!(
                    "{} of {} factual claims could not be verified",
                    unverified, self.accuracy.claims
                ),
            ));
        }

        if !self.completeness.missing.is_empty() {
            let missing: Vec<&str> = self
                .completeness
                .missing
                .iter()
                .map(ContentElement::missing_description)
                .collect();
            issues.push(QualityIssue::new(
                IssueType::LowQuality,
                Severity::Low,
                format!("Incomplete content: {}", missing.join(", ")),
            ));
        }

        issues
    }
}

/// Heuristic content analyzer with a pluggable claim verifier
pub struct ContentAnalyzer {
    extractor: ClaimExtractor,
    verifier: Box<dyn ClaimVerifier>,
}

impl ContentAnalyzer {
    pub fn new() -> Self {
        Self {
            extractor: ClaimExtractor::new(),
            verifier: Box::new(AttributionVerifier::new()),
        }
    }

    pub fn with_verifier(verifier: impl ClaimVerifier + 'static) -> Self {
        Self {
            extractor: ClaimExtractor::new(),
            verifier: Box::new(verifier),
        }
    }

    pub fn analyze(&self, text: &str) -> ContentQualityAnalysis {
        let analysis = ContentQualityAnalysis {
            readability: ReadabilityAnalysis::of(text),
            accuracy: self.check_facts(text),
            completeness: check_completeness(text),
            seo: analyze_seo(text),
        };

        debug!(
            readability = analysis.readability.score,
            accuracy = analysis.accuracy.score,
            completeness = analysis.completeness.score,
            seo = analysis.seo.score,
            "Content analyzed"
        );

        analysis
    }

    fn check_facts(&self, text: &str) -> AccuracyAnalysis {
        let claims = self.extractor.extract(text);
        if claims.is_empty() {
            return AccuracyAnalysis {
                score: NEUTRAL_SCORE,
                claims: 0,
                unverified: Vec::new(),
            };
        }

        let total = claims.len();
        let unverified: Vec<String> = claims
            .into_iter()
            .filter(|claim| !self.verifier.verify(claim))
            .collect();

        AccuracyAnalysis {
            score: (total - unverified.len()) as f64 / total as f64,
            claims: total,
            unverified,
        }
    }
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn check_completeness(text: &str) -> CompletenessAnalysis {
    let missing: Vec<ContentElement> = ContentElement::CHECKLIST
        .iter()
        .copied()
        .filter(|element| !element.is_present(text))
        .collect();

    CompletenessAnalysis {
        score: 1.0 - missing.len() as f64 / ContentElement::CHECKLIST.len() as f64,
        missing,
    }
}

fn analyze_seo(text: &str) -> SeoAnalysis {
    let word_count = words(text).count();
    let distinct_terms = distinct_words(text);
    let mut suggestions = Vec::new();

    if word_count < SEO_MIN_WORDS {
        suggestions.push(format!(
            "Content is too short for search visibility ({} words); aim for at least {}",
            word_count, SEO_MIN_WORDS
        ));
    }
    if distinct_terms < SEO_MIN_DISTINCT_TERMS {
        suggestions.push(format!(
            "Low keyword density: only {} distinct terms; broaden the topical vocabulary",
            distinct_terms
        ));
    }

    SeoAnalysis {
        score: (100.0 - 20.0 * suggestions.len() as f64).max(0.0),
        word_count,
        distinct_terms,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RejectAll;

    impl ClaimVerifier for RejectAll {
        fn verify(&self, _claim: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_empty_content_is_analyzed_without_panicking() {
        let analysis = ContentAnalyzer::new().analyze("");

        assert_eq!(analysis.readability.score, 0.0);
        assert!(analysis.completeness.missing.contains(&ContentElement::SufficientLength));
        assert!(analysis.completeness.missing.contains(&ContentElement::ParagraphStructure));
        assert!(analysis.completeness.score <= 0.6);
        assert_eq!(analysis.accuracy.score, NEUTRAL_SCORE);
        assert_eq!(analysis.seo.score, 60.0);

        let issues = analysis.issues();
        assert!(issues.iter().any(|i| i.severity == Severity::Low
            && i.description.contains("insufficient content")
            && i.description.contains("lacks paragraph structure")));
    }

    #[test]
    fn test_unverified_claim_severity() {
        let analyzer = ContentAnalyzer::with_verifier(RejectAll);

        let few = analyzer.analyze("Prices rose 5 percent. Rents rose 7 percent.");
        let issue = few
            .issues()
            .into_iter()
            .find(|i| i.issue_type == IssueType::Inaccuracy)
            .unwrap();
        assert_eq!(issue.severity, Severity::Medium);
        assert_eq!(few.accuracy.score, 0.0);

        let many = analyzer.analyze(
            "Sales grew 1 percent. Costs grew 2 percent. Rents grew 3 percent. Wages grew 4 percent.",
        );
        let issue = many
            .issues()
            .into_iter()
            .find(|i| i.issue_type == IssueType::Inaccuracy)
            .unwrap();
        assert_eq!(issue.severity, Severity::High);
    }

    #[test]
    fn test_partial_verification_score() {
        let text = "According to the survey, 40 percent agreed. Another 10 percent disagreed.";
        let analysis = ContentAnalyzer::new().analyze(text);
        assert_eq!(analysis.accuracy.claims, 2);
        assert_eq!(analysis.accuracy.score, 0.5);
    }

    #[test]
    fn test_complete_content_passes_checklist() {
        let paragraph = "Morning light fell across the quiet harbor as fishing boats returned. \
                         Gulls circled above the docks while traders set out fresh bread, \
                         cheese, apples and honey for early visitors.";
        let text = format!("{}\n\n{}\n\n{}", paragraph, paragraph, paragraph);
        let analysis = ContentAnalyzer::new().analyze(&text);

        assert!(analysis.completeness.missing.is_empty());
        assert_eq!(analysis.completeness.score, 1.0);
        assert!(!analysis
            .issues()
            .iter()
            .any(|i| i.description.starts_with("Incomplete content")));
    }

    #[test]
    fn test_seo_suggestions_for_short_text() {
        let analysis = ContentAnalyzer::new().analyze("Short note about gardens.");
        assert_eq!(analysis.seo.suggestions.len(), 2);
        assert_eq!(analysis.seo.score, 60.0);
        assert!(analysis.seo.suggestions[0].contains("too short"));
    }
}
