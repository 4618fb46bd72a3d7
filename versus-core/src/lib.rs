//! # Versus Core
//!
//! Core library for Versus, which compares two objects across a corpus of
//! sentences and decides which one the sentences favour. Provides the
//! comparative rule engine, score aggregation, result assembly, the default
//! collaborators (marker lexicon, locators, aspect matcher, link extractor,
//! in-memory corpus), the rating export converter and an HTTP gateway.

pub mod aggregator;
pub mod aspect;
pub mod comparator;
pub mod config;
pub mod context;
pub mod corpus;
pub mod engine;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod lexicon;
pub mod links;
pub mod locator;
pub mod ratings;
pub mod result;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used types at the crate root.
pub use aggregator::ScoreAggregator;
pub use aspect::{Aspect, AspectMatcher, SubstringAspectMatcher, parse_aspects};
pub use comparator::{Decision, DecisionInput, Polarity, SentenceComparator, Side, decide_winner};
pub use config::{VersusConfig, config_exists, load_config};
pub use context::{RequestContext, Stage};
pub use corpus::{Corpus, SentenceScoreProvider, SentenceScores};
pub use engine::Comparison;
pub use entity::{Bucket, Entity};
pub use error::{Result, VersusError};
pub use lexicon::{MarkerFamily, MarkerLexicon};
pub use links::{FrequencyLinkExtractor, LinkExtractor, LinkedTerms};
pub use locator::{EntityPositionLocator, MarkerHit, MarkerLocator, RegexMarkerLocator, SubstringLocator};
pub use result::{ComparisonResult, NO_WINNER, Winner};
