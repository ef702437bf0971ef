use crate::dimensions::{Dimension, DIMENSION_COUNT, FULL_MARK, NEUTRAL_OVERALL};
use serde::{Deserialize, Serialize};

/// Integer score in `[0, 100]`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DimensionScore(u8);

impl DimensionScore {
    pub fn new(value: u8) -> Self {
        Self(value.min(FULL_MARK))
    }

    /// Rounds to the nearest integer and clamps into range. Non-finite input maps to 0.
    pub fn from_exact(value: f64) -> Self {
        if !value.is_finite() {
            return Self(0);
        }
        Self(value.round().clamp(0.0, FULL_MARK as f64) as u8)
    }

    #[inline(always)]
    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScores {
    pub media_freedom: DimensionScore,
    pub electoral_process: DimensionScore,
    pub civil_liberties: DimensionScore,
    pub rule_of_law: DimensionScore,
    pub deliberation: DimensionScore,
}

impl DimensionScores {
    pub fn from_array(values: [DimensionScore; DIMENSION_COUNT]) -> Self {
        Self {
            media_freedom: values[Dimension::MediaFreedom.index()],
            electoral_process: values[Dimension::ElectoralProcess.index()],
            civil_liberties: values[Dimension::CivilLiberties.index()],
            rule_of_law: values[Dimension::RuleOfLaw.index()],
            deliberation: values[Dimension::Deliberation.index()],
        }
    }

    pub fn get(&self, dim: Dimension) -> DimensionScore {
        match dim {
            Dimension::MediaFreedom => self.media_freedom,
            Dimension::ElectoralProcess => self.electoral_process,
            Dimension::CivilLiberties => self.civil_liberties,
            Dimension::RuleOfLaw => self.rule_of_law,
            Dimension::Deliberation => self.deliberation,
        }
    }

    /// Chart order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, DimensionScore)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemocracyScore {
    pub dimensions: DimensionScores,
    pub overall: DimensionScore,
}

impl DemocracyScore {
    /// The profile shown when there is no history at all.
    pub fn neutral() -> Self {
        let mut values = [DimensionScore::default(); DIMENSION_COUNT];
        for dim in Dimension::ALL {
            values[dim.index()] = DimensionScore::new(dim.baseline());
        }
        Self {
            dimensions: DimensionScores::from_array(values),
            overall: DimensionScore::new(NEUTRAL_OVERALL),
        }
    }

    pub fn get(&self, dim: Dimension) -> u8 {
        self.dimensions.get(dim).value()
    }

    pub fn overall(&self) -> u8 {
        self.overall.value()
    }

    /// Renderer-facing records, always five, always in chart order.
    pub fn chart_data(&self) -> Vec<ChartPoint> {
        self.dimensions
            .iter()
            .map(|(dim, score)| ChartPoint {
                dimension: dim.to_string(),
                value: score.value(),
                full_mark: FULL_MARK,
            })
            .collect()
    }
}

impl Default for DemocracyScore {
    fn default() -> Self {
        Self::neutral()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub dimension: String,
    pub value: u8,
    pub full_mark: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionBreakdown {
    pub dimension: Dimension,

    // Inputs
    pub events: usize,
    pub distinct_sources: usize,
    pub distinct_leanings: usize,

    // Signals (already recency/engagement weighted)
    pub frequency_signal: f64,
    pub diversity_signal: f64,
    pub balance_signal: f64,
    pub raw_signal: f64,

    // Curve output
    pub saturation: f64,
    pub exact_value: f64,
    pub value: DimensionScore,
    pub used_baseline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    pub score: DemocracyScore,
    pub dimensions: Vec<DimensionBreakdown>,

    pub total_events: usize,
    pub classified_events: usize,
    pub skipped_events: usize,
    #[serde(default)]
    pub unknown_tags: Vec<String>,
    pub recency_applied: bool,
}

impl ScoreDetails {
    pub fn breakdown(&self, dim: Dimension) -> Option<&DimensionBreakdown> {
        self.dimensions.iter().find(|b| b.dimension == dim)
    }
}
