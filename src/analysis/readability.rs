//! Flesch reading-ease scoring

use serde::{Deserialize, Serialize};
use std::fmt;

use super::text::{sentences, words};

/// Coarse reading level derived from the reading-ease score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GradeLevel {
    Elementary,
    MiddleSchool,
    HighSchool,
    College,
}

impl GradeLevel {
    pub fn from_score(score: f64) -> Self {
        if score > 80.0 {
            GradeLevel::Elementary
        } else if score > 60.0 {
            GradeLevel::MiddleSchool
        } else if score > 40.0 {
            GradeLevel::HighSchool
        } else {
            GradeLevel::College
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GradeLevel::Elementary => "Elementary",
            GradeLevel::MiddleSchool => "Middle School",
            GradeLevel::HighSchool => "High School",
            GradeLevel::College => "College",
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReadabilityAnalysis {
    /// Reading ease in [0, 100]; higher reads easier
    pub score: f64,
    pub grade_level: GradeLevel,
}

impl ReadabilityAnalysis {
    pub fn of(text: &str) -> Self {
        let score = flesch_reading_ease(text);
        Self {
            score,
            grade_level: GradeLevel::from_score(score),
        }
    }
}

/// Flesch reading ease clamped to [0, 100]. Text without words scores 0.
pub fn flesch_reading_ease(text: &str) -> f64 {
    let (word_count, syllable_count) = words(text).fold((0usize, 0usize), |(w, s), word| {
        (w + 1, s + count_syllables(word))
    });
    if word_count == 0 {
        return 0.0;
    }

    let sentence_count = sentences(text).count().max(1);
    let words_per_sentence = word_count as f64 / sentence_count as f64;
    let syllables_per_word = syllable_count as f64 / word_count as f64;

    let score = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    score.clamp(0.0, 100.0)
}

/// Vowel-group syllable estimate, at least one per word
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut in_group = false;
    for &c in &letters {
        if is_vowel(c) {
            if !in_group {
                groups += 1;
            }
            in_group = true;
        } else {
            in_group = false;
        }
    }

    // silent trailing e ("make"), but not "-le" ("table")
    let len = letters.len();
    if groups > 1 && letters[len - 1] == 'e' && !(len >= 2 && letters[len - 2] == 'l') {
        groups -= 1;
    }

    groups.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllable_estimates() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("garden"), 2);
        assert_eq!(count_syllables("readability"), 5);
        assert_eq!(count_syllables("2024"), 1);
    }

    #[test]
    fn test_simple_prose_reads_easily() {
        let text = "The cat sat on the mat. The dog ran to the park. We had fun in the sun.";
        let analysis = ReadabilityAnalysis::of(text);
        assert!(analysis.score > 80.0);
        assert_eq!(analysis.grade_level, GradeLevel::Elementary);
    }

    #[test]
    fn test_unpunctuated_run_on_clamps_to_zero() {
        let text = "buy now click here amazing offer ".repeat(20);
        assert_eq!(flesch_reading_ease(&text), 0.0);
        assert_eq!(ReadabilityAnalysis::of(&text).grade_level, GradeLevel::College);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(flesch_reading_ease(""), 0.0);
        assert_eq!(flesch_reading_ease("   \n\n "), 0.0);
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(GradeLevel::from_score(80.5), GradeLevel::Elementary);
        assert_eq!(GradeLevel::from_score(80.0), GradeLevel::MiddleSchool);
        assert_eq!(GradeLevel::from_score(60.0), GradeLevel::HighSchool);
        assert_eq!(GradeLevel::from_score(40.0), GradeLevel::College);
    }
}
