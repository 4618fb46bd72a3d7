//! Per-request state of one compared entity.

use crate::error::ContractError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel label for sentences matching two or more aspects.
pub const MULTIPLE_BUCKET: &str = "multiple";
/// Sentinel label for sentences matching no aspect.
pub const NONE_BUCKET: &str = "none";

/// True when `name` collides with a sentinel bucket label.
pub fn is_reserved_label(name: &str) -> bool {
    name == MULTIPLE_BUCKET || name == NONE_BUCKET
}

/// Aggregation key for an entity's points and sentences.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Bucket {
    Aspect(String),
    Multiple,
    None,
}

impl Bucket {
    /// Map key in results. An aspect named like a sentinel would share its key.
    pub fn label(&self) -> &str {
        match self {
            Bucket::Aspect(name) => name,
            Bucket::Multiple => MULTIPLE_BUCKET,
            Bucket::None => NONE_BUCKET,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the two objects being compared, with its accumulated evidence.
///
/// Buckets keep first-insertion order so results list them the way the
/// sentences arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    points: IndexMap<String, f64>,
    sentences: IndexMap<String, Vec<String>>,
}

impl Entity {
    /// Create an entity from a raw name; the name is trimmed and lowercased.
    pub fn new(name: &str) -> Result<Self, ContractError> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(ContractError::EmptyEntityName);
        }
        Ok(Self {
            name,
            points: IndexMap::new(),
            sentences: IndexMap::new(),
        })
    }

    pub fn add_points(&mut self, bucket: &Bucket, points: f64) {
        *self.points.entry(bucket.label().to_string()).or_insert(0.0) += points;
    }

    pub fn add_sentence(&mut self, bucket: &Bucket, sentence: &str) {
        self.sentences
            .entry(bucket.label().to_string())
            .or_default()
            .push(sentence.to_string());
    }

    pub fn points(&self) -> &IndexMap<String, f64> {
        &self.points
    }

    pub fn sentences(&self) -> &IndexMap<String, Vec<String>> {
        &self.sentences
    }

    /// Sum over every bucket.
    pub fn total_points(&self) -> f64 {
        self.points.values().sum()
    }

    /// All sentences, bucket by bucket, in append order within each bucket.
    pub fn all_sentences(&self) -> Vec<String> {
        self.sentences.values().flatten().cloned().collect()
    }
}
