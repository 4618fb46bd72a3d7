//! The comparison result record and its assembly.
//!
//! Field names are the JSON contract consumed by the presentation layer and
//! must stay as they are.

use crate::entity::Entity;
use crate::error::CollaboratorError;
use crate::links::LinkExtractor;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What the winner field holds when neither side scores strictly higher.
pub const NO_WINNER: &str = "No winner found";

/// Overall outcome of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Winner {
    Entity(String),
    NoWinner,
}

impl From<String> for Winner {
    fn from(value: String) -> Self {
        if value == NO_WINNER {
            Winner::NoWinner
        } else {
            Winner::Entity(value)
        }
    }
}

impl From<Winner> for String {
    fn from(value: Winner) -> Self {
        match value {
            Winner::Entity(name) => name,
            Winner::NoWinner => NO_WINNER.to_string(),
        }
    }
}

/// Immutable outcome of one comparison request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub winner: Winner,
    pub object1: String,
    pub object2: String,
    #[serde(rename = "totalScoreObject1")]
    pub total_score_object1: f64,
    #[serde(rename = "totalScoreObject2")]
    pub total_score_object2: f64,
    #[serde(rename = "scoreObject1")]
    pub score_object1: IndexMap<String, f64>,
    #[serde(rename = "scoreObject2")]
    pub score_object2: IndexMap<String, f64>,
    #[serde(rename = "extractedAspectsObject1")]
    pub extracted_aspects_object1: Vec<String>,
    #[serde(rename = "extractedAspectsObject2")]
    pub extracted_aspects_object2: Vec<String>,
    #[serde(rename = "sentencesObject1")]
    pub sentences_object1: IndexMap<String, Vec<String>>,
    #[serde(rename = "sentencesObject2")]
    pub sentences_object2: IndexMap<String, Vec<String>>,
}

/// The entity with strictly more points, or [`Winner::NoWinner`] on a tie.
pub fn pick_winner(a: &Entity, b: &Entity) -> Winner {
    let (total_a, total_b) = (a.total_points(), b.total_points());
    if total_a > total_b {
        Winner::Entity(a.name.clone())
    } else if total_b > total_a {
        Winner::Entity(b.name.clone())
    } else {
        Winner::NoWinner
    }
}

/// Assemble the final record once every sentence has been aggregated.
pub fn build_result(
    a: &Entity,
    b: &Entity,
    links: &dyn LinkExtractor,
) -> Result<ComparisonResult, CollaboratorError> {
    let winner = pick_winner(a, b);
    let terms = links.extract(&a.all_sentences(), &b.all_sentences(), a, b)?;

    Ok(ComparisonResult {
        winner,
        object1: a.name.clone(),
        object2: b.name.clone(),
        total_score_object1: a.total_points(),
        total_score_object2: b.total_points(),
        score_object1: a.points().clone(),
        score_object2: b.points().clone(),
        extracted_aspects_object1: terms.a,
        extracted_aspects_object2: terms.b,
        sentences_object1: a.sentences().clone(),
        sentences_object2: b.sentences().clone(),
    })
}
