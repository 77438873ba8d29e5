//! Content heuristics: readability, fact-checking, completeness, SEO, spam and duplicates

mod claims;
mod content;
mod duplicate;
mod readability;
mod spam;
mod text;

pub use claims::{AttributionVerifier, ClaimExtractor};
pub use content::{
    AccuracyAnalysis, CompletenessAnalysis, ContentAnalyzer, ContentElement,
    ContentQualityAnalysis, SeoAnalysis,
};
pub use duplicate::ShingleDuplicateDetector;
pub use readability::{GradeLevel, ReadabilityAnalysis, count_syllables, flesch_reading_ease};
pub use spam::{SpamAnalysis, SpamDetector};
