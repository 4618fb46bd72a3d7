//! Sentence relevance scores and the in-memory corpus that serves them.

use crate::error::{CollaboratorError, Result};
use crate::lexicon::{MarkerFamily, MarkerLexicon};
use crate::locator::{EntityPositionLocator, MarkerLocator, RegexMarkerLocator, SubstringLocator};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// Sentence text mapped to its relevance score, in retrieval order.
pub type SentenceScores = IndexMap<String, f64>;

/// Supplies scored sentences that mention both entities.
pub trait SentenceScoreProvider: Send + Sync {
    /// Retrieve candidate sentences for the pair.
    fn fetch(&self, name_a: &str, name_b: &str) -> std::result::Result<SentenceScores, CollaboratorError>;

    /// Drop sentences the rule engine cannot analyze. The default keeps everything.
    fn clear(&self, scores: SentenceScores, _name_a: &str, _name_b: &str) -> SentenceScores {
        scores
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CorpusFile {
    Map(IndexMap<String, f64>),
    List(Vec<CorpusEntry>),
}

#[derive(Deserialize)]
struct CorpusEntry {
    text: String,
    score: f64,
}

/// A fixed set of scored sentences held in memory.
#[derive(Debug, Clone)]
pub struct Corpus {
    sentences: SentenceScores,
    markers: RegexMarkerLocator,
}

impl Corpus {
    /// Build a corpus; a sentence listed twice keeps its highest score.
    pub fn new(
        entries: impl IntoIterator<Item = (String, f64)>,
        lexicon: &MarkerLexicon,
    ) -> Result<Self> {
        let mut sentences = SentenceScores::new();
        for (text, score) in entries {
            let text = text.trim().to_string();
            if text.is_empty() {
                continue;
            }
            if !score.is_finite() {
                tracing::warn!(sentence = %text, "skipping sentence with non-finite score");
                continue;
            }
            sentences
                .entry(text)
                .and_modify(|s| *s = s.max(score))
                .or_insert(score);
        }
        Ok(Self {
            sentences,
            markers: RegexMarkerLocator::new(lexicon)?,
        })
    }

    /// Parse either `{"sentence": score, ...}` or `[{"text": ..., "score": ...}, ...]`.
    pub fn from_json_str(json: &str, lexicon: &MarkerLexicon) -> Result<Self> {
        let entries: Vec<(String, f64)> = match serde_json::from_str::<CorpusFile>(json)? {
            CorpusFile::Map(map) => map.into_iter().collect(),
            CorpusFile::List(list) => list.into_iter().map(|e| (e.text, e.score)).collect(),
        };
        Self::new(entries, lexicon)
    }

    pub fn load(path: &Path, lexicon: &MarkerLexicon) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let corpus = Self::from_json_str(&json, lexicon)?;
        tracing::info!(path = %path.display(), sentences = corpus.len(), "loaded corpus");
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// True when a polarity marker lies strictly between the first
    /// occurrences of both names and the sentence is not a question.
    fn is_analyzable(&self, sentence: &str, name_a: &str, name_b: &str) -> bool {
        if sentence.trim_end().ends_with('?') {
            return false;
        }
        let lowered = sentence.to_lowercase();
        let (Some(pos_a), Some(pos_b)) = (
            SubstringLocator.locate(&lowered, name_a),
            SubstringLocator.locate(&lowered, name_b),
        ) else {
            return false;
        };
        let (first, second) = (pos_a.min(pos_b), pos_a.max(pos_b));
        [MarkerFamily::Positive, MarkerFamily::Negative]
            .into_iter()
            .any(|family| self.markers.scan(&lowered, first, second, family).found())
    }
}

impl SentenceScoreProvider for Corpus {
    fn fetch(
        &self,
        name_a: &str,
        name_b: &str,
    ) -> std::result::Result<SentenceScores, CollaboratorError> {
        let (a, b) = (name_a.to_lowercase(), name_b.to_lowercase());
        Ok(self
            .sentences
            .iter()
            .filter(|(text, _)| {
                let lowered = text.to_lowercase();
                lowered.contains(&a) && lowered.contains(&b)
            })
            .map(|(text, score)| (text.clone(), *score))
            .collect())
    }

    fn clear(&self, scores: SentenceScores, name_a: &str, name_b: &str) -> SentenceScores {
        let before = scores.len();
        let kept: SentenceScores = scores
            .into_iter()
            .filter(|(text, _)| self.is_analyzable(text, name_a, name_b))
            .collect();
        tracing::debug!(before, after = kept.len(), "cleared sentences");
        kept
    }
}
