//! Position lookups inside a sentence: where an entity is first named, and
//! where markers of a given family occur between two offsets.
//!
//! All offsets are byte offsets into the sentence as passed in. Callers that
//! lowercase a sentence must hand the same lowercased text to every locator.

use crate::error::ConfigError;
use crate::lexicon::{MarkerFamily, MarkerLexicon};
use regex::Regex;

/// Finds the first occurrence of an entity name in a sentence.
pub trait EntityPositionLocator: Send + Sync {
    fn locate(&self, sentence: &str, name: &str) -> Option<usize>;
}

/// Result of scanning a span for one marker family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerHit {
    /// Offset of the first marker inside the span.
    pub first: Option<usize>,
    /// Number of marker occurrences inside the span.
    pub count: usize,
}

impl MarkerHit {
    pub fn found(&self) -> bool {
        self.first.is_some()
    }
}

/// Scans the open span `(span_start, span_end)` of a sentence for markers.
pub trait MarkerLocator: Send + Sync {
    fn scan(
        &self,
        sentence: &str,
        span_start: usize,
        span_end: usize,
        family: MarkerFamily,
    ) -> MarkerHit;
}

/// Case-insensitive substring lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringLocator;

impl EntityPositionLocator for SubstringLocator {
    fn locate(&self, sentence: &str, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        sentence.to_lowercase().find(&name.to_lowercase())
    }
}

/// Marker locator backed by one compiled alternation per family.
#[derive(Debug, Clone)]
pub struct RegexMarkerLocator {
    positive: Option<Regex>,
    negative: Option<Regex>,
    opposite: Option<Regex>,
    negation: Option<Regex>,
}

impl RegexMarkerLocator {
    pub fn new(lexicon: &MarkerLexicon) -> Result<Self, ConfigError> {
        Ok(Self {
            positive: compile(lexicon.markers(MarkerFamily::Positive))?,
            negative: compile(lexicon.markers(MarkerFamily::Negative))?,
            opposite: compile(lexicon.markers(MarkerFamily::Opposite))?,
            negation: compile(lexicon.markers(MarkerFamily::Negation))?,
        })
    }

    fn pattern(&self, family: MarkerFamily) -> Option<&Regex> {
        match family {
            MarkerFamily::Positive => self.positive.as_ref(),
            MarkerFamily::Negative => self.negative.as_ref(),
            MarkerFamily::Opposite => self.opposite.as_ref(),
            MarkerFamily::Negation => self.negation.as_ref(),
        }
    }
}

impl MarkerLocator for RegexMarkerLocator {
    fn scan(
        &self,
        sentence: &str,
        span_start: usize,
        span_end: usize,
        family: MarkerFamily,
    ) -> MarkerHit {
        let Some(re) = self.pattern(family) else {
            return MarkerHit::default();
        };
        let mut hit = MarkerHit::default();
        for m in re.find_iter(sentence) {
            if m.end() > span_end {
                break;
            }
            if m.start() <= span_start {
                continue;
            }
            if hit.first.is_none() {
                hit.first = Some(m.start());
            }
            hit.count += 1;
        }
        hit
    }
}

/// Builds `(?i)(?:m1|m2|...)` with word boundaries on alphanumeric edges.
/// Longer markers come first so a phrase wins over its own prefix.
fn compile(markers: &[String]) -> Result<Option<Regex>, ConfigError> {
    let mut sorted: Vec<&str> = markers
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .collect();
    if sorted.is_empty() {
        return Ok(None);
    }
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternatives: Vec<String> = sorted
        .iter()
        .map(|m| {
            let lead = if starts_with_word_char(m) { r"\b" } else { "" };
            let trail = if ends_with_word_char(m) { r"\b" } else { "" };
            format!("{lead}{}{trail}", regex::escape(m))
        })
        .collect();
    let pattern = format!("(?i)(?:{})", alternatives.join("|"));

    Regex::new(&pattern)
        .map(Some)
        .map_err(|e| ConfigError::Invalid {
            message: format!("marker pattern failed to compile: {e}"),
        })
}

fn starts_with_word_char(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_alphanumeric() || c == '_')
}

fn ends_with_word_char(s: &str) -> bool {
    s.chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}
