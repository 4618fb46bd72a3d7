//! Per-sentence decision: which of the two entities a sentence favours.
//!
//! The rule reads a sentence of the shape `... X ... marker ... Y ...`. With a
//! positive marker the first-named entity wins, with a negative marker it
//! loses, and an opposite or negation word between the first entity and the
//! marker flips the reading ("A is not better than B").
//!
//! [`decide_winner`] is the pure rule over already-located offsets;
//! [`SentenceComparator`] does the lookups and feeds it.

use crate::error::ContractError;
use crate::lexicon::MarkerFamily;
use crate::locator::{EntityPositionLocator, MarkerLocator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One of the two compared entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Which comparative marker family drives the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
}

/// Everything the rule needs, with offsets already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionInput {
    pub polarity: Polarity,
    /// Offset of whichever entity is named first.
    pub first_pos: usize,
    /// True when entity A is the one named first.
    pub a_named_first: bool,
    /// Offset of the first polarity marker in the span.
    pub marker_pos: usize,
    pub opposite_pos: Option<usize>,
    pub negation_pos: Option<usize>,
}

impl DecisionInput {
    /// An opposite marker between the first entity and the polarity marker
    /// inverts the reading; only when there is none does a negation count.
    pub fn is_inverted(&self) -> bool {
        let between = |pos: usize| self.first_pos < pos && pos < self.marker_pos;
        if self.opposite_pos.is_some_and(between) {
            return true;
        }
        self.negation_pos.is_some_and(between)
    }
}

/// Pure winner rule.
pub fn decide_winner(input: &DecisionInput) -> Side {
    let inverted = input.is_inverted();
    let a_wins = match input.polarity {
        Polarity::Positive => input.a_named_first ^ inverted,
        Polarity::Negative => !(input.a_named_first ^ inverted),
    };
    if a_wins { Side::A } else { Side::B }
}

/// Outcome for one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub winner: Side,
    /// Number of markers of the deciding family inside the span.
    pub marker_count: usize,
    pub polarity: Polarity,
    pub inverted: bool,
}

/// Locates entities and markers in a sentence and applies [`decide_winner`].
#[derive(Clone)]
pub struct SentenceComparator {
    positions: Arc<dyn EntityPositionLocator>,
    markers: Arc<dyn MarkerLocator>,
}

impl std::fmt::Debug for SentenceComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceComparator").finish_non_exhaustive()
    }
}

impl SentenceComparator {
    pub fn new(
        positions: Arc<dyn EntityPositionLocator>,
        markers: Arc<dyn MarkerLocator>,
    ) -> Self {
        Self { positions, markers }
    }

    /// Decide the winner of `sentence` between `name_a` and `name_b`.
    ///
    /// Both names must occur in the sentence and a positive or negative
    /// marker must lie strictly between their first occurrences; anything
    /// else is a contract violation of the filtering stage. If both polarity
    /// families are present, the positive one decides.
    pub fn decide(
        &self,
        sentence: &str,
        name_a: &str,
        name_b: &str,
    ) -> Result<Decision, ContractError> {
        let sentence = sentence.to_lowercase();

        let pos_a = self.locate(&sentence, name_a)?;
        let pos_b = self.locate(&sentence, name_b)?;
        let first_pos = pos_a.min(pos_b);
        let second_pos = pos_a.max(pos_b);
        let a_named_first = first_pos == pos_a;

        let scan = |family| self.markers.scan(&sentence, first_pos, second_pos, family);
        let opposite = scan(MarkerFamily::Opposite);
        let negation = scan(MarkerFamily::Negation);
        let positive = scan(MarkerFamily::Positive);

        let (polarity, hit) = match positive.first {
            Some(_) => (Polarity::Positive, positive),
            None => (Polarity::Negative, scan(MarkerFamily::Negative)),
        };
        let Some(marker_pos) = hit.first else {
            return Err(ContractError::NoPolarityMarker { sentence });
        };

        let input = DecisionInput {
            polarity,
            first_pos,
            a_named_first,
            marker_pos,
            opposite_pos: opposite.first,
            negation_pos: negation.first,
        };
        Ok(Decision {
            winner: decide_winner(&input),
            marker_count: hit.count,
            polarity,
            inverted: input.is_inverted(),
        })
    }

    fn locate(&self, sentence: &str, name: &str) -> Result<usize, ContractError> {
        self.positions
            .locate(sentence, name)
            .ok_or_else(|| ContractError::EntityNotFound {
                entity: name.to_string(),
                sentence: sentence.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::MarkerLexicon;
    use crate::locator::{RegexMarkerLocator, SubstringLocator};

    fn comparator() -> SentenceComparator {
        let markers = RegexMarkerLocator::new(&MarkerLexicon::default()).unwrap();
        SentenceComparator::new(Arc::new(SubstringLocator), Arc::new(markers))
    }

    fn input(polarity: Polarity, a_named_first: bool) -> DecisionInput {
        DecisionInput {
            polarity,
            first_pos: 0,
            a_named_first,
            marker_pos: 10,
            opposite_pos: None,
            negation_pos: None,
        }
    }

    #[test]
    fn test_positive_first_named_wins() {
        assert_eq!(decide_winner(&input(Polarity::Positive, true)), Side::A);
        assert_eq!(decide_winner(&input(Polarity::Positive, false)), Side::B);
    }

    #[test]
    fn test_negative_first_named_loses() {
        assert_eq!(decide_winner(&input(Polarity::Negative, true)), Side::B);
        assert_eq!(decide_winner(&input(Polarity::Negative, false)), Side::A);
    }

    #[test]
    fn test_negation_before_marker_inverts() {
        let mut i = input(Polarity::Positive, true);
        i.negation_pos = Some(5);
        assert!(i.is_inverted());
        assert_eq!(decide_winner(&i), Side::B);

        i.polarity = Polarity::Negative;
        assert_eq!(decide_winner(&i), Side::A);
    }

    #[test]
    fn test_opposite_before_marker_inverts() {
        let mut i = input(Polarity::Positive, false);
        i.opposite_pos = Some(3);
        assert_eq!(decide_winner(&i), Side::A);
    }

    #[test]
    fn test_markers_after_polarity_marker_do_not_invert() {
        let mut i = input(Polarity::Positive, true);
        i.negation_pos = Some(12);
        i.opposite_pos = Some(10);
        assert!(!i.is_inverted());
        assert_eq!(decide_winner(&i), Side::A);
    }

    #[test]
    fn test_opposite_and_negation_do_not_cancel() {
        let mut i = input(Polarity::Positive, true);
        i.opposite_pos = Some(2);
        i.negation_pos = Some(4);
        assert!(i.is_inverted());
        assert_eq!(decide_winner(&i), Side::B);
    }

    #[test]
    fn test_out_of_range_opposite_falls_back_to_negation() {
        let mut i = input(Polarity::Positive, true);
        i.opposite_pos = Some(15);
        i.negation_pos = Some(4);
        assert!(i.is_inverted());
    }

    #[test]
    fn test_apple_better_than_orange() {
        let d = comparator()
            .decide("Apple is better than Orange.", "apple", "orange")
            .unwrap();
        assert_eq!(d.winner, Side::A);
        assert_eq!(d.marker_count, 1);
        assert_eq!(d.polarity, Polarity::Positive);
        assert!(!d.inverted);
    }

    #[test]
    fn test_apple_not_better_than_orange() {
        let d = comparator()
            .decide("Apple is not better than Orange.", "apple", "orange")
            .unwrap();
        assert_eq!(d.winner, Side::B);
        assert!(d.inverted);
    }

    #[test]
    fn test_second_entity_named_first() {
        let d = comparator()
            .decide("Orange is faster and safer than apple", "apple", "orange")
            .unwrap();
        assert_eq!(d.winner, Side::B);
        assert_eq!(d.marker_count, 2);
    }

    #[test]
    fn test_negative_marker_sentence() {
        let c = comparator();
        let d = c.decide("Apple is worse than orange", "apple", "orange").unwrap();
        assert_eq!(d.winner, Side::B);
        assert_eq!(d.polarity, Polarity::Negative);

        let d = c
            .decide("Apple is less slower than orange", "apple", "orange")
            .unwrap();
        assert_eq!(d.winner, Side::A);
        assert!(d.inverted);
    }

    #[test]
    fn test_positive_takes_precedence_over_negative() {
        let d = comparator()
            .decide("apple is worse looking but better than orange", "apple", "orange")
            .unwrap();
        assert_eq!(d.polarity, Polarity::Positive);
        assert_eq!(d.winner, Side::A);
        assert_eq!(d.marker_count, 1);
    }

    #[test]
    fn test_missing_entity_is_contract_violation() {
        let err = comparator()
            .decide("apple is better than pear", "apple", "orange")
            .unwrap_err();
        assert!(matches!(err, ContractError::EntityNotFound { ref entity, .. } if entity == "orange"));
    }

    #[test]
    fn test_missing_marker_is_contract_violation() {
        let err = comparator()
            .decide("apple and orange are fruit", "apple", "orange")
            .unwrap_err();
        assert!(matches!(err, ContractError::NoPolarityMarker { .. }));
    }

    #[test]
    fn test_marker_outside_span_is_ignored() {
        let err = comparator()
            .decide("better apple and orange", "apple", "orange")
            .unwrap_err();
        assert!(matches!(err, ContractError::NoPolarityMarker { .. }));
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.other(), Side::A);
    }
}
