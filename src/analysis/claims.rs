//! Factual claim extraction and attribution-based verification

use regex::Regex;

use resqa_core::ClaimVerifier;

use super::text::sentences;

/// Phrases that present a sentence as backed by evidence
const EVIDENCE_MARKERS: &[&str] = &[
    "studies show",
    "research shows",
    "research proves",
    "experts agree",
    "scientists say",
    "data shows",
    "clinically proven",
    "statistics show",
    "according to a survey",
];

/// Picks out sentences that state checkable facts.
///
/// A sentence is a claim when it pairs a figure with a quantity ("40 percent",
/// "3 million", "12%") or leans on evidence ("studies show"). Bare numbers
/// such as years and absolutes such as "never" are ordinary prose.
pub struct ClaimExtractor {
    markers: Vec<&'static str>,
    quantity_patterns: Vec<Regex>,
}

impl ClaimExtractor {
    pub fn new() -> Self {
        let patterns = vec![
            // 40 percent, 12.5 per cent, 12%
            r"(?i)\d[\d,.]*\s*(%|percent\b|per\s+cent\b)",
            // 3 million, 2 billion users
            r"(?i)\d[\d,.]*\s*(thousand|million|billion|trillion)s?\b",
            // 4 times more, 10-fold
            r"(?i)\d[\d,.]*\s*(times\b|-?fold\b)",
        ];

        let quantity_patterns = patterns
            .into_iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect();

        Self {
            markers: EVIDENCE_MARKERS.to_vec(),
            quantity_patterns,
        }
    }

    pub fn is_claim(&self, sentence: &str) -> bool {
        let lower = sentence.to_lowercase();
        self.quantity_patterns.iter().any(|re| re.is_match(sentence))
            || self.markers.iter().any(|marker| lower.contains(marker))
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        sentences(text)
            .filter(|sentence| self.is_claim(sentence))
            .map(str::to_string)
            .collect()
    }
}

impl Default for ClaimExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Treats a claim as verified when it names where it comes from
pub struct AttributionVerifier {
    attribution_phrases: Vec<&'static str>,
    citation_patterns: Vec<Regex>,
}

impl AttributionVerifier {
    pub fn new() -> Self {
        let patterns = vec![
            // [3], [12]
            r"\[\d+\]",
            // (Smith 2019), (Smith et al., 2019)
            r"\([A-Z][^()]*\b(19|20)\d{2}\)",
            r"https?://\S+",
        ];

        let citation_patterns = patterns
            .into_iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect();

        Self {
            attribution_phrases: vec![
                "according to",
                "source:",
                "cited in",
                "reported by",
                "published in",
                "data from",
                "study by",
            ],
            citation_patterns,
        }
    }
}

impl Default for AttributionVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimVerifier for AttributionVerifier {
    fn verify(&self, claim: &str) -> bool {
        let lower = claim.to_lowercase();
        self.attribution_phrases.iter().any(|phrase| lower.contains(phrase))
            || self.citation_patterns.iter().any(|re| re.is_match(claim))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_quantities_and_evidence() {
        let text = "The sky was grey. Sales rose 40 percent last year. Experts agree it will rain. \
                    Nothing else happened.";
        let claims = ClaimExtractor::new().extract(text);
        assert_eq!(
            claims,
            vec![
                "Sales rose 40 percent last year".to_string(),
                "Experts agree it will rain".to_string(),
            ]
        );
    }

    #[test]
    fn test_plain_prose_has_no_claims() {
        let extractor = ClaimExtractor::new();
        assert!(extractor.extract("We walked home and cooked dinner together").is_empty());
        assert!(extractor.extract("").is_empty());
    }

    #[test]
    fn test_dates_and_absolutes_are_not_claims() {
        let extractor = ClaimExtractor::new();
        let text = "The garden first opened in 2019. We never skip a spring planting. \
                    Volunteers always meet at 9 on Saturdays.";
        assert!(extractor.extract(text).is_empty());
    }

    #[test]
    fn test_quantity_forms() {
        let extractor = ClaimExtractor::new();
        assert!(extractor.is_claim("Turnout rose to 12% this spring"));
        assert!(extractor.is_claim("The city now has 3 million residents"));
        assert!(extractor.is_claim("Yields were 4 times higher"));
        assert!(extractor.is_claim("Research shows gardens lower stress"));
        assert!(!extractor.is_claim("Sometimes we plant 3 rows"));
    }

    #[test]
    fn test_attribution_verifies_claim() {
        let verifier = AttributionVerifier::new();
        assert!(verifier.verify("According to the census, 12 million people moved"));
        assert!(verifier.verify("Growth reached 3% [4]"));
        assert!(verifier.verify("The effect doubled (Nguyen et al., 2021)"));
        assert!(!verifier.verify("Studies show this always works"));
    }
}
