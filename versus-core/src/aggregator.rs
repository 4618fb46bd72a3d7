//! Turns one sentence decision into points on the winning entity.

use crate::aspect::Aspect;
use crate::entity::{Bucket, Entity};

/// Normalizes sentence scores against the request's maximum and credits
/// them to aspect buckets.
#[derive(Debug, Clone, Copy)]
pub struct ScoreAggregator {
    max_score: f64,
}

impl ScoreAggregator {
    /// `max_score` is the largest relevance score among the request's sentences.
    pub fn new(max_score: f64) -> Self {
        if max_score == 0.0 {
            tracing::warn!("all sentence scores are zero, every contribution counts as 0");
        }
        Self { max_score }
    }

    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    /// `score / max_score`, or 0 when the maximum is zero.
    pub fn normalize(&self, score: f64) -> f64 {
        if self.max_score == 0.0 {
            0.0
        } else {
            score / self.max_score
        }
    }

    /// Credit `sentence` to `winner`.
    ///
    /// - no aspect: `norm * marker_count` into `none`
    /// - one aspect: `norm * (weight + marker_count)` into that aspect
    /// - several: the same term per aspect, summed into `multiple`; the
    ///   sentence is recorded there once
    ///
    /// Returns the points added.
    pub fn add(
        &self,
        winner: &mut Entity,
        matched: &[&Aspect],
        sentence: &str,
        score: f64,
        marker_count: usize,
    ) -> f64 {
        let norm = self.normalize(score);
        let markers = marker_count as f64;

        let (bucket, points) = match matched {
            [] => (Bucket::None, norm * markers),
            [aspect] => (
                Bucket::Aspect(aspect.name.clone()),
                norm * (aspect.weight as f64 + markers),
            ),
            many => {
                let mut sum = 0.0;
                for aspect in many {
                    let term = norm * (aspect.weight as f64 + markers);
                    winner.add_points(&Bucket::Multiple, term);
                    sum += term;
                }
                winner.add_sentence(&Bucket::Multiple, sentence);
                return sum;
            }
        };

        winner.add_points(&bucket, points);
        winner.add_sentence(&bucket, sentence);
        points
    }
}
