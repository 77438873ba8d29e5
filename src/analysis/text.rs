//! Tokenization shared by the content heuristics

/// Word tokens with surrounding punctuation stripped
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
}

/// Sentence fragments split on terminal punctuation, empty fragments dropped
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| sentence.chars().any(char::is_alphanumeric))
}

/// Number of sentences closed by terminal punctuation
pub fn terminated_sentence_count(text: &str) -> usize {
    let mut count = 0;
    let mut previous: Option<char> = None;
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?') && previous.is_some_and(char::is_alphanumeric) {
            count += 1;
        }
        previous = Some(c);
    }
    count
}

/// Distinct lowercase word count
pub fn distinct_words(text: &str) -> usize {
    let mut seen: Vec<String> = words(text).map(str::to_lowercase).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_strip_punctuation() {
        let tokens: Vec<&str> = words("Hello, world! (really) -- ok").collect();
        assert_eq!(tokens, vec!["Hello", "world", "really", "ok"]);
    }

    #[test]
    fn test_sentences_and_terminators() {
        let text = "First one. Second one! Third?? trailing";
        assert_eq!(sentences(text).count(), 4);
        assert_eq!(terminated_sentence_count(text), 3);
        assert_eq!(terminated_sentence_count("no punctuation at all"), 0);
        assert_eq!(terminated_sentence_count("..."), 0);
    }

    #[test]
    fn test_distinct_words_ignores_case() {
        assert_eq!(distinct_words("The the THE cat"), 2);
        assert_eq!(distinct_words(""), 0);
    }
}
