pub mod builder;
pub mod classify;
pub mod curves;
pub mod engine;
pub mod loader;
pub mod types;

pub use self::builder::ScorerBuilder;
pub use self::types::{ChartPoint, DemocracyScore, DimensionBreakdown, DimensionScore, ScoreDetails};
use crate::config::{Config, ScoringWeights};
use crate::dimensions::DIMENSION_COUNT;
use crate::error::DsResult;
use crate::history::HistoryWindow;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::warn;

/// Whether malformed events are rejected or tolerated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ValidationMode {
    /// Events are assumed pre-validated; odd fields are sanitized.
    #[default]
    Trust,
    /// The first malformed event fails the whole call.
    Strict,
}

/// Stateless scoring engine. Cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub weights: ScoringWeights,
    pub dimension_weights: [f32; DIMENSION_COUNT],
    pub validation: ValidationMode,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            dimension_weights: [1.0; DIMENSION_COUNT],
            validation: ValidationMode::Trust,
        }
    }
}

impl Scorer {
    pub fn new(config: &Config) -> DsResult<Self> {
        ScorerBuilder::new()
            .with_weights(config.weights.clone())
            .strict(config.history.strict)
            .build()
    }

    /// Scores a history. An absent history scores like an empty one.
    ///
    /// Only fails in [`ValidationMode::Strict`], on the first malformed event.
    pub fn score(&self, history: Option<&HistoryWindow>) -> DsResult<DemocracyScore> {
        engine::score_full(self, history)
    }

    /// Same as [`Scorer::score`] plus the per-dimension signal breakdown.
    pub fn score_details(&self, history: Option<&HistoryWindow>) -> DsResult<ScoreDetails> {
        engine::score_details(self, history)
    }

    /// Never fails: a rejected history degrades to the neutral profile.
    pub fn score_or_baseline(&self, history: Option<&HistoryWindow>) -> DemocracyScore {
        match self.score(history) {
            Ok(score) => score,
            Err(e) => {
                warn!("Falling back to neutral profile: {}", e);
                DemocracyScore::neutral()
            }
        }
    }
}
