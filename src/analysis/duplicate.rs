//! Shingle-based duplicate detection

use std::collections::{HashMap, HashSet};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::RwLock;

use tracing::debug;

use resqa_core::{DuplicateDetector, ResultRecord};

use super::text::words;

const DEFAULT_SHINGLE_SIZE: usize = 5;
const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

struct Fingerprint {
    digest: md5::Digest,
    shingles: HashSet<u64>,
}

impl Fingerprint {
    fn of(content: &str, shingle_size: usize) -> Option<Self> {
        let tokens: Vec<String> = words(content).map(str::to_lowercase).collect();
        if tokens.is_empty() {
            return None;
        }

        let normalized = tokens.join(" ");
        let shingles = tokens
            .windows(shingle_size.min(tokens.len()))
            .map(|window| {
                let mut hasher = DefaultHasher::new();
                window.hash(&mut hasher);
                hasher.finish()
            })
            .collect();

        Some(Self {
            digest: md5::compute(normalized.as_bytes()),
            shingles,
        })
    }

    fn similarity(&self, other: &Fingerprint) -> f64 {
        if self.digest == other.digest {
            return 1.0;
        }
        let intersection = self.shingles.intersection(&other.shingles).count();
        let union = self.shingles.len() + other.shingles.len() - intersection;
        if union == 0 {
            0.0
        } else {
            intersection as f64 / union as f64
        }
    }
}

/// Remembers stored results and reports near-identical content.
///
/// Content is normalized to lowercase word tokens; identical normalized text
/// is caught by its md5 digest, near copies by Jaccard similarity of word
/// shingles.
pub struct ShingleDuplicateDetector {
    index: RwLock<HashMap<String, Fingerprint>>,
    shingle_size: usize,
    threshold: f64,
}

impl ShingleDuplicateDetector {
    pub fn new() -> Self {
        Self {
            index: RwLock::new(HashMap::new()),
            shingle_size: DEFAULT_SHINGLE_SIZE,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    /// Minimum Jaccard similarity for two results to count as duplicates
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_shingle_size(mut self, shingle_size: usize) -> Self {
        self.shingle_size = shingle_size.max(1);
        self
    }

    pub fn len(&self) -> usize {
        self.index.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ShingleDuplicateDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DuplicateDetector for ShingleDuplicateDetector {
    fn find_duplicates(&self, result: &ResultRecord) -> Vec<String> {
        let Some(fingerprint) = Fingerprint::of(&result.content, self.shingle_size) else {
            return Vec::new();
        };

        let index = self.index.read().unwrap_or_else(|e| e.into_inner());
        let mut duplicates: Vec<String> = index
            .iter()
            .filter(|(id, _)| id.as_str() != result.id)
            .filter(|(_, other)| fingerprint.similarity(other) >= self.threshold)
            .map(|(id, _)| id.clone())
            .collect();
        duplicates.sort();

        if !duplicates.is_empty() {
            debug!(result_id = %result.id, duplicates = ?duplicates, "Duplicate content found");
        }
        duplicates
    }

    fn remember(&self, result: &ResultRecord) {
        let mut index = self.index.write().unwrap_or_else(|e| e.into_inner());
        match Fingerprint::of(&result.content, self.shingle_size) {
            Some(fingerprint) => {
                index.insert(result.id.clone(), fingerprint);
            }
            None => {
                index.remove(&result.id);
            }
        }
    }
}
