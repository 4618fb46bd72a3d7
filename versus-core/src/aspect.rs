//! User-supplied weighted aspects and matching them against sentences.

use crate::entity::is_reserved_label;
use crate::error::ContractError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A weighted dimension of comparison, e.g. `price` with weight 3.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aspect {
    pub name: String,
    pub weight: i64,
}

impl Aspect {
    pub fn new(name: &str, weight: i64) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            weight,
        }
    }
}

/// Returns the aspects that textually occur in a sentence.
pub trait AspectMatcher: Send + Sync {
    fn matching<'a>(&self, sentence: &str, aspects: &'a [Aspect]) -> Vec<&'a Aspect>;
}

/// Case-insensitive substring matching, in the caller's aspect order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringAspectMatcher;

impl AspectMatcher for SubstringAspectMatcher {
    fn matching<'a>(&self, sentence: &str, aspects: &'a [Aspect]) -> Vec<&'a Aspect> {
        let sentence = sentence.to_lowercase();
        aspects
            .iter()
            .filter(|a| !a.name.is_empty() && sentence.contains(&a.name))
            .collect()
    }
}

/// Read `aspect1`/`weight1`, `aspect2`/`weight2`, ... from request
/// parameters, stopping at the first index where either key is missing.
pub fn parse_aspects(params: &HashMap<String, String>) -> Result<Vec<Aspect>, ContractError> {
    let mut aspects = Vec::new();
    for i in 1.. {
        let (Some(name), Some(weight)) = (
            params.get(&format!("aspect{i}")),
            params.get(&format!("weight{i}")),
        ) else {
            break;
        };
        let weight = weight
            .trim()
            .parse::<i64>()
            .map_err(|_| ContractError::InvalidWeight {
                aspect: name.clone(),
                value: weight.clone(),
            })?;
        aspects.push(checked(Aspect::new(name, weight))?);
    }
    Ok(aspects)
}

fn checked(aspect: Aspect) -> Result<Aspect, ContractError> {
    if is_reserved_label(&aspect.name) {
        return Err(ContractError::ReservedAspectName {
            aspect: aspect.name,
        });
    }
    Ok(aspect)
}

/// Parse a `name=weight` pair as given on the command line.
pub fn parse_aspect_arg(arg: &str) -> Result<Aspect, ContractError> {
    let (name, weight) = arg.rsplit_once('=').unwrap_or((arg, "1"));
    let parsed = weight
        .trim()
        .parse::<i64>()
        .map_err(|_| ContractError::InvalidWeight {
            aspect: name.to_string(),
            value: weight.to_string(),
        })?;
    checked(Aspect::new(name, parsed))
}
