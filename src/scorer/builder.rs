use crate::config::ScoringWeights;
use crate::error::DsResult;
use crate::scorer::{Scorer, ValidationMode};
use tracing::debug;

#[derive(Debug, Default)]
pub struct ScorerBuilder {
    weights: ScoringWeights,
    validation: ValidationMode,
}

impl ScorerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn strict(self, strict: bool) -> Self {
        if strict {
            self.with_validation(ValidationMode::Strict)
        } else {
            self.with_validation(ValidationMode::Trust)
        }
    }

    pub fn build(self) -> DsResult<Scorer> {
        self.weights.validate()?;
        let dimension_weights = self.weights.get_dimension_weights()?;

        debug!(
            "Scorer ready: freq={} div={} bal={} half_life={}d scale={} validation={}",
            self.weights.weight_frequency,
            self.weights.weight_diversity,
            self.weights.weight_balance,
            self.weights.recency_half_life_days,
            self.weights.saturation_scale,
            self.validation
        );

        Ok(Scorer {
            weights: self.weights,
            dimension_weights,
            validation: self.validation,
        })
    }
}
