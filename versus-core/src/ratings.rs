//! Converts raw user rating exports into per-aspect verdicts.
//!
//! Input lines look like `aspect;rating;objectA;objectB` with rating `1`
//! (good) or `0` (bad). Ratings are grouped by object pair and aspect, in
//! first-seen order, and each group becomes one output row.
//!
//! The pair is keyed by re-encoding every `;` after the rating as
//! [`PAIR_SEPARATOR`] and splitting at its first occurrence. An object name
//! that already contains [`PAIR_SEPARATOR`] does not survive that round trip.

use crate::error::{RatingError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, Write};

/// Token that stands in for `;` inside a pair key.
pub const PAIR_SEPARATOR: &str = "///";

/// Header of the converted file.
pub const HEADER: &str = "OBJECT A;OBJECT B;ASPECT;MOST FREQUENT RATING;CONFIDENCE;AMOUNT OF GOOD RATINGS;AMOUNT OF BAD RATINGS";

/// Majority label of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RatingLabel {
    Good,
    Bad,
    None,
}

impl fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingLabel::Good => f.write_str("GOOD"),
            RatingLabel::Bad => f.write_str("BAD"),
            RatingLabel::None => f.write_str("NONE"),
        }
    }
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRow {
    pub object_a: String,
    pub object_b: String,
    pub aspect: String,
    pub label: RatingLabel,
    /// `None` when the group holds neither good nor bad ratings.
    pub confidence: Option<f64>,
    pub good: usize,
    pub bad: usize,
}

impl RatingRow {
    fn from_ratings(object_a: &str, object_b: &str, aspect: &str, ratings: &[i64]) -> Self {
        let good = ratings.iter().filter(|r| **r == 1).count();
        let bad = ratings.iter().filter(|r| **r == 0).count();
        let total = (good + bad) as f64;

        let (label, winning) = match good.cmp(&bad) {
            std::cmp::Ordering::Greater => (RatingLabel::Good, good),
            std::cmp::Ordering::Less => (RatingLabel::Bad, bad),
            std::cmp::Ordering::Equal => (RatingLabel::None, good),
        };
        let confidence = if total > 0.0 {
            Some(winning as f64 / total)
        } else {
            tracing::warn!(object_a, object_b, aspect, "no good or bad ratings in group");
            None
        };

        Self {
            object_a: object_a.to_string(),
            object_b: object_b.to_string(),
            aspect: aspect.to_string(),
            label,
            confidence,
            good,
            bad,
        }
    }

    /// Semicolon-separated line without trailing newline.
    pub fn to_line(&self) -> String {
        let confidence = self
            .confidence
            .map(|c| format!("{c:?}"))
            .unwrap_or_default();
        format!(
            "{};{};{};{};{};{};{}",
            self.object_a, self.object_b, self.aspect, self.label, confidence, self.good, self.bad
        )
    }
}

/// Read raw rating records and produce one row per (pair, aspect) group.
pub fn convert_ratings(reader: impl BufRead) -> Result<Vec<RatingRow>> {
    let mut groups: IndexMap<String, IndexMap<String, Vec<i64>>> = IndexMap::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.splitn(3, ';');
        let (Some(aspect), Some(rating), Some(rest)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(RatingError::MalformedRecord {
                line: line_no,
                content: line.to_string(),
            }
            .into());
        };
        let rating: i64 = rating
            .trim()
            .parse()
            .map_err(|_| RatingError::InvalidRating {
                line: line_no,
                value: rating.to_string(),
            })?;

        let pair = rest.replace(';', PAIR_SEPARATOR);
        groups
            .entry(pair)
            .or_default()
            .entry(aspect.to_string())
            .or_default()
            .push(rating);
    }

    let mut rows = Vec::new();
    for (pair, aspects) in &groups {
        let (object_a, object_b) = pair
            .split_once(PAIR_SEPARATOR)
            .unwrap_or((pair.as_str(), ""));
        for (aspect, ratings) in aspects {
            rows.push(RatingRow::from_ratings(object_a, object_b, aspect, ratings));
        }
    }
    tracing::info!(groups = rows.len(), "converted ratings");
    Ok(rows)
}

/// Write the header followed by one line per row.
pub fn write_rows(mut writer: impl Write, rows: &[RatingRow]) -> Result<()> {
    writeln!(writer, "{HEADER}")?;
    for row in rows {
        writeln!(writer, "{}", row.to_line())?;
    }
    writer.flush()?;
    Ok(())
}
