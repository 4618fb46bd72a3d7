//! Runs a whole comparison: decide every sentence, aggregate, build the result.

use crate::aggregator::ScoreAggregator;
use crate::aspect::{Aspect, AspectMatcher, SubstringAspectMatcher};
use crate::comparator::{SentenceComparator, Side};
use crate::config::VersusConfig;
use crate::context::{RequestContext, Stage};
use crate::corpus::{SentenceScoreProvider, SentenceScores};
use crate::entity::Entity;
use crate::error::{ContractError, Result};
use crate::links::{FrequencyLinkExtractor, LinkExtractor};
use crate::locator::{RegexMarkerLocator, SubstringLocator};
use crate::result::{ComparisonResult, build_result};
use std::sync::Arc;

/// The comparison pipeline with its collaborators wired in.
///
/// Holds no per-request state; one instance can serve concurrent requests.
#[derive(Clone)]
pub struct Comparison {
    comparator: SentenceComparator,
    aspects: Arc<dyn AspectMatcher>,
    links: Arc<dyn LinkExtractor>,
}

impl std::fmt::Debug for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Comparison")
            .field("comparator", &self.comparator)
            .finish_non_exhaustive()
    }
}

impl Comparison {
    pub fn new(
        comparator: SentenceComparator,
        aspects: Arc<dyn AspectMatcher>,
        links: Arc<dyn LinkExtractor>,
    ) -> Self {
        Self {
            comparator,
            aspects,
            links,
        }
    }

    /// Default collaborators built from configuration.
    pub fn from_config(config: &VersusConfig) -> Result<Self> {
        let lexicon = config.lexicon.clone().normalized();
        lexicon.validate()?;
        let markers = RegexMarkerLocator::new(&lexicon)?;
        let links = FrequencyLinkExtractor::new(config.links.clone(), lexicon.all_markers());
        Ok(Self::new(
            SentenceComparator::new(Arc::new(SubstringLocator), Arc::new(markers)),
            Arc::new(SubstringAspectMatcher),
            Arc::new(links),
        ))
    }

    /// Fetch sentences from `provider`, clear them, then [`run`](Self::run).
    pub fn compare(
        &self,
        ctx: &mut RequestContext,
        provider: &dyn SentenceScoreProvider,
        name_a: &str,
        name_b: &str,
        aspects: &[Aspect],
    ) -> Result<ComparisonResult> {
        let a = Entity::new(name_a)?;
        let b = Entity::new(name_b)?;

        ctx.advance(Stage::RequestSentences);
        let fetched = provider.fetch(&a.name, &b.name)?;

        ctx.advance(Stage::ClearSentences);
        let cleared = provider.clear(fetched.clone(), &a.name, &b.name);
        if let Some(unknown) = cleared.keys().find(|s| !fetched.contains_key(*s)) {
            return Err(ContractError::UnknownSentence {
                sentence: unknown.clone(),
            }
            .into());
        }

        self.run_entities(ctx, &cleared, a, b, aspects)
    }

    /// Compare `name_a` and `name_b` over already-filtered `scores`.
    ///
    /// Every sentence must name both entities with a polarity marker between
    /// them; the first violation aborts the request.
    pub fn run(
        &self,
        ctx: &mut RequestContext,
        scores: &SentenceScores,
        name_a: &str,
        name_b: &str,
        aspects: &[Aspect],
    ) -> Result<ComparisonResult> {
        let a = Entity::new(name_a)?;
        let b = Entity::new(name_b)?;
        self.run_entities(ctx, scores, a, b, aspects)
    }

    fn run_entities(
        &self,
        ctx: &mut RequestContext,
        scores: &SentenceScores,
        mut a: Entity,
        mut b: Entity,
        aspects: &[Aspect],
    ) -> Result<ComparisonResult> {
        let span = tracing::info_span!("comparison", request_id = %ctx.id, a = %a.name, b = %b.name);
        let _guard = span.enter();

        ctx.advance(Stage::FindWinner);
        let max_score = scores.values().copied().reduce(f64::max).unwrap_or(0.0);
        let aggregator = ScoreAggregator::new(max_score);

        for (sentence, score) in scores {
            let decision = self.comparator.decide(sentence, &a.name, &b.name)?;
            let matched = self.aspects.matching(sentence, aspects);
            let winner = match decision.winner {
                Side::A => &mut a,
                Side::B => &mut b,
            };
            let added = aggregator.add(winner, &matched, sentence, *score, decision.marker_count);
            tracing::debug!(
                winner = %winner.name,
                markers = decision.marker_count,
                aspects = matched.len(),
                points = added,
                "sentence decided"
            );
        }

        let result = build_result(&a, &b, self.links.as_ref())?;
        ctx.advance(Stage::Done);
        tracing::info!(
            sentences = scores.len(),
            total_a = result.total_score_object1,
            total_b = result.total_score_object2,
            winner = %String::from(result.winner.clone()),
            elapsed_ms = ctx.elapsed_ms(),
            "comparison finished"
        );
        Ok(result)
    }
}
