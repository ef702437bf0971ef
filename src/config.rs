use crate::dimensions::DIMENSION_COUNT;
use crate::error::{DemocracyError, DsResult};
use crate::history::DEFAULT_HISTORY_LIMIT;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub history: HistoryParams,
    #[command(flatten)]
    #[serde(default)]
    pub weights: ScoringWeights,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryParams {
    /// Most recent events requested from the history source
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    pub limit: usize,
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Reject malformed events instead of tolerating them
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

impl Default for HistoryParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
            offset: 0,
            strict: false,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringWeights {
    // === SIGNAL MIX ===
    #[arg(long, default_value_t = 1.0)]
    pub weight_frequency: f32,
    #[arg(long, default_value_t = 2.0)]
    pub weight_diversity: f32,
    // Only applies to dimensions that reward reading across leanings
    #[arg(long, default_value_t = 3.0)]
    pub weight_balance: f32,

    // === CURVES ===
    #[arg(long, default_value_t = 30.0)]
    pub recency_half_life_days: f32,
    #[arg(long, default_value_t = 20.0)]
    pub saturation_scale: f32,

    // === ENGAGEMENT ===
    #[arg(long, default_value_t = 180.0)]
    pub full_read_seconds: f32,
    #[arg(long, default_value_t = 0.25)]
    pub min_engagement: f32,
    #[arg(long, default_value_t = 0.5)]
    pub partial_read_weight: f32,

    // === OVERALL ===
    // Chart order: media, electoral, civil, law, deliberation
    #[arg(long, default_value = "1.0,1.0,1.0,1.0,1.0")]
    pub dimension_weights: String,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            weight_frequency: 1.0,
            weight_diversity: 2.0,
            weight_balance: 3.0,
            recency_half_life_days: 30.0,
            saturation_scale: 20.0,
            full_read_seconds: 180.0,
            min_engagement: 0.25,
            partial_read_weight: 0.5,
            dimension_weights: "1.0,1.0,1.0,1.0,1.0".to_string(),
        }
    }
}

impl ScoringWeights {
    pub fn get_dimension_weights(&self) -> DsResult<[f32; DIMENSION_COUNT]> {
        let arr = parse_f32_array::<DIMENSION_COUNT>(&self.dimension_weights, "dimension_weights")?;
        if arr.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DemocracyError::Config(format!(
                "dimension_weights must be non-negative: '{}'",
                self.dimension_weights
            )));
        }
        Ok(arr)
    }

    /// Rejects weights the curves cannot work with.
    pub fn validate(&self) -> DsResult<()> {
        let non_negative = [
            ("weight_frequency", self.weight_frequency),
            ("weight_diversity", self.weight_diversity),
            ("weight_balance", self.weight_balance),
            ("partial_read_weight", self.partial_read_weight),
        ];
        for (name, val) in non_negative {
            if !val.is_finite() || val < 0.0 {
                return Err(DemocracyError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, val
                )));
            }
        }

        let positive = [
            ("recency_half_life_days", self.recency_half_life_days),
            ("saturation_scale", self.saturation_scale),
            ("full_read_seconds", self.full_read_seconds),
        ];
        for (name, val) in positive {
            if !val.is_finite() || val <= 0.0 {
                return Err(DemocracyError::Config(format!(
                    "{} must be positive, got {}",
                    name, val
                )));
            }
        }

        if !(self.min_engagement > 0.0 && self.min_engagement <= 1.0) {
            return Err(DemocracyError::Config(format!(
                "min_engagement must be in (0, 1], got {}",
                self.min_engagement
            )));
        }

        self.get_dimension_weights()?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DsResult<Self> {
        let content = fs::read_to_string(path)?;
        let weights: Self = serde_json::from_str(&content)?;
        Ok(weights)
    }

    pub fn merge_from_cli(&mut self, cli_weights: &ScoringWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field.clone();
                }
            };
        }

        update_if_present!(weight_frequency, "weight_frequency");
        update_if_present!(weight_diversity, "weight_diversity");
        update_if_present!(weight_balance, "weight_balance");

        update_if_present!(recency_half_life_days, "recency_half_life_days");
        update_if_present!(saturation_scale, "saturation_scale");

        update_if_present!(full_read_seconds, "full_read_seconds");
        update_if_present!(min_engagement, "min_engagement");
        update_if_present!(partial_read_weight, "partial_read_weight");

        update_if_present!(dimension_weights, "dimension_weights");
    }
}

fn parse_f32_array<const N: usize>(s: &str, name: &str) -> DsResult<[f32; N]> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != N {
        return Err(DemocracyError::Config(format!(
            "--{} requires {} values",
            name, N
        )));
    }
    let mut arr = [0.0; N];
    for (i, p) in parts.iter().enumerate() {
        arr[i] = p.trim().parse().map_err(|_| {
            DemocracyError::Config(format!("Invalid number '{}' in {}", p.trim(), name))
        })?;
    }
    Ok(arr)
}
