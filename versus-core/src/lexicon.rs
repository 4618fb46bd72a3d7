//! Marker lexicon: the four word lists the rule engine reasons over.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The family a marker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerFamily {
    /// Comparative praise ("better", "faster").
    Positive,
    /// Comparative criticism ("worse", "slower").
    Negative,
    /// Words that reverse the direction of a comparative ("less").
    Opposite,
    /// Plain negations ("not", "never").
    Negation,
}

impl MarkerFamily {
    pub const ALL: [MarkerFamily; 4] = [
        MarkerFamily::Positive,
        MarkerFamily::Negative,
        MarkerFamily::Opposite,
        MarkerFamily::Negation,
    ];
}

impl fmt::Display for MarkerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerFamily::Positive => write!(f, "positive"),
            MarkerFamily::Negative => write!(f, "negative"),
            MarkerFamily::Opposite => write!(f, "opposite"),
            MarkerFamily::Negation => write!(f, "negation"),
        }
    }
}

/// Four disjoint sets of lowercase markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLexicon {
    #[serde(default = "default_positive")]
    pub positive: Vec<String>,
    #[serde(default = "default_negative")]
    pub negative: Vec<String>,
    #[serde(default = "default_opposite")]
    pub opposite: Vec<String>,
    #[serde(default = "default_negation")]
    pub negation: Vec<String>,
}

impl Default for MarkerLexicon {
    fn default() -> Self {
        Self {
            positive: default_positive(),
            negative: default_negative(),
            opposite: default_opposite(),
            negation: default_negation(),
        }
    }
}

impl MarkerLexicon {
    /// Markers of one family.
    pub fn markers(&self, family: MarkerFamily) -> &[String] {
        match family {
            MarkerFamily::Positive => &self.positive,
            MarkerFamily::Negative => &self.negative,
            MarkerFamily::Opposite => &self.opposite,
            MarkerFamily::Negation => &self.negation,
        }
    }

    /// Every marker across all families.
    pub fn all_markers(&self) -> impl Iterator<Item = &str> {
        MarkerFamily::ALL
            .into_iter()
            .flat_map(move |family| self.markers(family).iter().map(String::as_str))
    }

    /// Lowercase and trim every entry, dropping blanks and duplicates within a family.
    pub fn normalized(mut self) -> Self {
        for list in [
            &mut self.positive,
            &mut self.negative,
            &mut self.opposite,
            &mut self.negation,
        ] {
            let mut seen = std::collections::HashSet::new();
            *list = list
                .iter()
                .map(|m| m.trim().to_lowercase())
                .filter(|m| !m.is_empty() && seen.insert(m.clone()))
                .collect();
        }
        self
    }

    /// Check that no marker belongs to more than one family.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut owner: HashMap<String, MarkerFamily> = HashMap::new();
        for family in MarkerFamily::ALL {
            for marker in self.markers(family) {
                let key = marker.trim().to_lowercase();
                if let Some(first) = owner.get(&key) {
                    if *first != family {
                        return Err(ConfigError::OverlappingMarkers {
                            marker: key,
                            first: first.to_string(),
                            second: family.to_string(),
                        });
                    }
                    continue;
                }
                owner.insert(key, family);
            }
        }
        if self.positive.is_empty() && self.negative.is_empty() {
            return Err(ConfigError::Invalid {
                message: "lexicon needs at least one positive or negative marker".into(),
            });
        }
        Ok(())
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_positive() -> Vec<String> {
    owned(&[
        "better", "easier", "faster", "nicer", "wiser", "cooler", "decent", "safer", "superior",
        "solid", "terrific", "cheaper", "stronger", "smarter",
    ])
}

fn default_negative() -> Vec<String> {
    owned(&[
        "worse", "harder", "slower", "poorly", "uglier", "poorer", "lousy", "nastier", "inferior",
        "mediocre", "weaker", "costlier",
    ])
}

fn default_opposite() -> Vec<String> {
    owned(&["less", "fewer"])
}

fn default_negation() -> Vec<String> {
    owned(&[
        "not", "no", "never", "neither", "nor", "cannot", "hardly", "isn't", "aren't", "wasn't",
        "weren't", "doesn't", "don't", "didn't", "can't", "couldn't", "won't", "wouldn't",
        "shouldn't",
    ])
}
