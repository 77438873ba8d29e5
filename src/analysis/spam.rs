//! Lexical spam detection

use regex::Regex;
use serde::{Deserialize, Serialize};

use resqa_core::Severity;

/// Scores are accumulated in tenths so the 1.0 ceiling is exact
const MAX_POINTS: usize = 10;
const PHRASE_POINTS: usize = 2;
const PATTERN_POINTS: usize = 1;
const CAPS_POINTS: usize = 1;
const EXCLAMATION_POINTS: usize = 1;

const CAPS_RATIO_LIMIT: f64 = 0.3;
const EXCLAMATION_DENSITY_LIMIT: f64 = 0.05;

const SPAM_PHRASES: &[&str] = &[
    "buy now",
    "click here",
    "act now",
    "limited time",
    "amazing offer",
    "order now",
    "risk free",
    "100% free",
    "free money",
    "earn money fast",
    "work from home",
    "no credit check",
    "once in a lifetime",
    "double your",
    "you have been selected",
    "miracle cure",
];

/// Breakdown of a spam score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpamAnalysis {
    /// Spam likelihood in [0, 1]
    pub score: f64,
    /// Distinct spam phrases present, however often each repeats
    pub phrase_hits: usize,
    pub pattern_hits: usize,
    pub caps_ratio: f64,
    pub exclamation_density: f64,
}

impl SpamAnalysis {
    /// Issue severity and usefulness penalty warranted by the score, if any
    pub fn verdict(&self) -> Option<(Severity, f64)> {
        if self.score > 0.7 {
            Some((Severity::Critical, 0.5))
        } else if self.score > 0.4 {
            Some((Severity::High, 0.3))
        } else {
            None
        }
    }
}

pub struct SpamDetector {
    phrases: Vec<&'static str>,
    patterns: Vec<Regex>,
}

impl SpamDetector {
    pub fn new() -> Self {
        let patterns = vec![
            // "50% off", "20 % discount"
            r"(?i)\b\d{1,3}\s?%\s*(off|discount)\b",
            r"(?i)\b(discounts?|clearance|bargains?|sale)\b",
            r"(?i)\bfree\b",
            r"(?i)\b(buy|order|shop|call|subscribe)\s+(now|today)\b",
            // "now!", "FREE!"
            r"(?i)\b(now|today|free)\s*!",
            r"!{3,}",
            r"\$\s?\d+(\.\d{2})?",
        ];

        let patterns = patterns
            .into_iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect();

        Self {
            phrases: SPAM_PHRASES.to_vec(),
            patterns,
        }
    }

    pub fn analyze(&self, text: &str) -> SpamAnalysis {
        let lower = text.to_lowercase();

        let phrase_hits = self
            .phrases
            .iter()
            .filter(|phrase| lower.contains(*phrase))
            .count();
        let pattern_hits: usize = self.patterns.iter().map(|re| re.find_iter(text).count()).sum();
        let caps_ratio = caps_ratio(text);
        let exclamation_density = exclamation_density(text);

        let mut points = phrase_hits
            .saturating_mul(PHRASE_POINTS)
            .saturating_add(pattern_hits.saturating_mul(PATTERN_POINTS));
        if caps_ratio > CAPS_RATIO_LIMIT {
            points = points.saturating_add(CAPS_POINTS);
        }
        if exclamation_density > EXCLAMATION_DENSITY_LIMIT {
            points = points.saturating_add(EXCLAMATION_POINTS);
        }

        SpamAnalysis {
            score: points.min(MAX_POINTS) as f64 / MAX_POINTS as f64,
            phrase_hits,
            pattern_hits,
            caps_ratio,
            exclamation_density,
        }
    }

    pub fn score(&self, text: &str) -> f64 {
        self.analyze(text).score
    }
}

impl Default for SpamDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn caps_ratio(text: &str) -> f64 {
    let (letters, upper) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(letters, upper), c| {
            (letters + 1, upper + usize::from(c.is_uppercase()))
        });
    if letters == 0 {
        0.0
    } else {
        upper as f64 / letters as f64
    }
}

fn exclamation_density(text: &str) -> f64 {
    let (chars, marks) = text.chars().fold((0usize, 0usize), |(chars, marks), c| {
        (chars + 1, marks + usize::from(c == '!'))
    });
    if chars == 0 {
        0.0
    } else {
        marks as f64 / chars as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shouted_call_to_action_clamps_at_one() {
        let detector = SpamDetector::new();
        let analysis = detector.analyze("Buy now! Buy now! FREE!!!!!");

        assert_eq!(analysis.phrase_hits, 1);
        assert!(analysis.caps_ratio > 0.3);
        assert!(analysis.exclamation_density > 0.05);
        assert_eq!(analysis.score, 1.0);
        assert_eq!(analysis.verdict(), Some((Severity::Critical, 0.5)));
    }

    #[test]
    fn test_repeated_phrases_never_exceed_one() {
        let detector = SpamDetector::new();
        let text = "buy now click here amazing offer ".repeat(25);
        assert_eq!(detector.score(&text), 1.0);
    }

    #[test]
    fn test_repeated_phrase_counts_once() {
        let detector = SpamDetector::new();
        let text = "Many teams now work from home most of the week. \
                    Managers say work from home needs clear goals. \
                    Some staff work from home to avoid long commutes. \
                    Others find that work from home blurs their evenings. \
                    Either way, work from home is here to stay.";
        let analysis = detector.analyze(text);

        assert_eq!(analysis.phrase_hits, 1);
        assert_eq!(analysis.pattern_hits, 0);
        assert_eq!(analysis.score, 0.2);
        assert_eq!(analysis.verdict(), None);
    }

    #[test]
    fn test_huge_input_saturates_instead_of_overflowing() {
        let detector = SpamDetector::new();
        let text = "buy now! ".repeat(50_000);
        assert_eq!(detector.score(&text), 1.0);
    }

    #[test]
    fn test_plain_prose_is_not_spam() {
        let detector = SpamDetector::new();
        let text = "The library opens at nine and closes after the evening lecture. \
                    Visitors can borrow up to five books for a free period of two weeks.";
        let analysis = detector.analyze(text);
        assert_eq!(analysis.score, 0.1);
        assert_eq!(analysis.verdict(), None);
    }

    #[test]
    fn test_verdict_boundaries() {
        let at = |score: f64| SpamAnalysis {
            score,
            phrase_hits: 0,
            pattern_hits: 0,
            caps_ratio: 0.0,
            exclamation_density: 0.0,
        };
        assert_eq!(at(0.4).verdict(), None);
        assert_eq!(at(0.5).verdict(), Some((Severity::High, 0.3)));
        assert_eq!(at(0.7).verdict(), Some((Severity::High, 0.3)));
        assert_eq!(at(0.8).verdict(), Some((Severity::Critical, 0.5)));
    }

    #[test]
    fn test_discount_language() {
        let detector = SpamDetector::new();
        let analysis = detector.analyze("Huge sale today: 50% off everything, only $19.99.");
        // sale, 50% off, $19.99
        assert_eq!(analysis.pattern_hits, 3);
        assert_eq!(analysis.score, 0.3);
    }
}
