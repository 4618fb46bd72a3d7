//! Descriptive terms that one side's winning sentences link to it.

use crate::entity::Entity;
use crate::error::CollaboratorError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Terms extracted per side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedTerms {
    pub a: Vec<String>,
    pub b: Vec<String>,
}

/// Extracts the words that characterise each side of a comparison.
pub trait LinkExtractor: Send + Sync {
    fn extract(
        &self,
        sentences_a: &[String],
        sentences_b: &[String],
        entity_a: &Entity,
        entity_b: &Entity,
    ) -> Result<LinkedTerms, CollaboratorError>;
}

/// Tuning for [`FrequencyLinkExtractor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Maximum number of terms returned per side.
    #[serde(default = "default_max_terms")]
    pub max_terms: usize,
    /// Words shorter than this are ignored.
    #[serde(default = "default_min_term_length")]
    pub min_term_length: usize,
    /// Extra words to ignore on top of the built-in stopwords.
    #[serde(default)]
    pub stopwords: Vec<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            max_terms: default_max_terms(),
            min_term_length: default_min_term_length(),
            stopwords: Vec::new(),
        }
    }
}

fn default_max_terms() -> usize {
    10
}

fn default_min_term_length() -> usize {
    3
}

const STOPWORDS: &[&str] = &[
    "the", "and", "than", "that", "this", "with", "for", "are", "was", "were", "has", "have",
    "had", "but", "its", "it's", "from", "they", "their", "them", "there", "then", "much", "more",
    "most", "very", "also", "just", "some", "any", "all", "can", "will", "would", "could",
    "should", "been", "being", "which", "what", "when", "where", "who", "why", "how", "you",
    "your", "our", "his", "her", "she", "him", "not", "out", "into", "about", "over", "even",
    "still", "only", "both", "each", "other", "such", "way", "one", "two", "get", "got", "use",
    "used", "using", "is", "a", "an", "of", "to", "in", "on", "or", "as", "at", "by", "be", "it",
];

/// Frequency-ranked words that occur on one side but never on the other.
#[derive(Debug, Clone)]
pub struct FrequencyLinkExtractor {
    config: LinksConfig,
    ignored: HashSet<String>,
}

impl FrequencyLinkExtractor {
    /// `markers` are excluded from the output alongside the stopwords. A
    /// multi-word marker excludes each of its words.
    pub fn new<'a>(config: LinksConfig, markers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut ignored: HashSet<String> = STOPWORDS.iter().map(|w| w.to_string()).collect();
        ignored.extend(config.stopwords.iter().map(|w| w.trim().to_lowercase()));
        ignored.extend(markers.into_iter().flat_map(tokenize));
        Self { config, ignored }
    }

    fn counts(&self, sentences: &[String], names: &HashSet<&str>) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for sentence in sentences {
            for word in tokenize(sentence) {
                if word.chars().count() < self.config.min_term_length
                    || self.ignored.contains(&word)
                    || names.contains(word.as_str())
                    || word.chars().all(|c| c.is_numeric())
                {
                    continue;
                }
                *counts.entry(word).or_insert(0) += 1;
            }
        }
        counts
    }

    fn rank(&self, own: &IndexMap<String, usize>, other: &IndexMap<String, usize>) -> Vec<String> {
        let mut exclusive: Vec<(usize, &String, usize)> = own
            .iter()
            .enumerate()
            .filter(|(_, (word, _))| !other.contains_key(*word))
            .map(|(order, (word, count))| (order, word, *count))
            .collect();
        exclusive.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
        exclusive
            .into_iter()
            .take(self.config.max_terms)
            .map(|(_, word, _)| word.clone())
            .collect()
    }
}

impl LinkExtractor for FrequencyLinkExtractor {
    fn extract(
        &self,
        sentences_a: &[String],
        sentences_b: &[String],
        entity_a: &Entity,
        entity_b: &Entity,
    ) -> Result<LinkedTerms, CollaboratorError> {
        let names: HashSet<&str> = entity_a
            .name
            .split_whitespace()
            .chain(entity_b.name.split_whitespace())
            .collect();
        let counts_a = self.counts(sentences_a, &names);
        let counts_b = self.counts(sentences_b, &names);
        Ok(LinkedTerms {
            a: self.rank(&counts_a, &counts_b),
            b: self.rank(&counts_b, &counts_a),
        })
    }
}

fn tokenize(sentence: &str) -> impl Iterator<Item = String> + '_ {
    sentence
        .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .map(|w| w.trim_matches(|c: char| c == '\'' || c == '-').to_lowercase())
        .filter(|w| !w.is_empty())
}
