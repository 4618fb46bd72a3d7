//! Request-scoped progress tracking.
//!
//! Every comparison request owns one [`RequestContext`]. Progress is recorded
//! on it and logged, never kept in process-wide state, so concurrent requests
//! cannot observe each other's stage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Pipeline stage of a comparison request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    RequestSentences,
    ClearSentences,
    FindWinner,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::RequestSentences => "Request sentences",
            Stage::ClearSentences => "Clear sentences",
            Stage::FindWinner => "Find winner",
            Stage::Done => "Done",
        };
        f.write_str(label)
    }
}

/// When a stage was entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub at: DateTime<Utc>,
}

/// Per-request identity and progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    stages: Vec<StageRecord>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            stages: Vec::new(),
        }
    }

    /// Record entry into `stage`.
    pub fn advance(&mut self, stage: Stage) {
        tracing::debug!(request_id = %self.id, stage = %stage, "stage");
        self.stages.push(StageRecord {
            stage,
            at: Utc::now(),
        });
    }

    pub fn current_stage(&self) -> Option<Stage> {
        self.stages.last().map(|r| r.stage)
    }

    pub fn stages(&self) -> &[StageRecord] {
        &self.stages
    }

    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }
}
