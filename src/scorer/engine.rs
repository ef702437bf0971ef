use super::classify;
use super::curves::{engagement_weight, lift, recency_weight, saturate};
use super::types::{DemocracyScore, DimensionBreakdown, DimensionScore, DimensionScores, ScoreDetails};
use super::{Scorer, ValidationMode};
use crate::dimensions::{Dimension, DIMENSION_COUNT};
use crate::error::{DemocracyError, DsResult};
use crate::history::{HistoryWindow, Leaning, ReadEvent};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Per-dimension running totals for one scoring pass.
#[derive(Debug, Default, Clone)]
struct Accumulator<'a> {
    events: usize,
    frequency: f64,
    // Strongest single read per outlet; BTreeMap keeps the sum order stable.
    per_source: BTreeMap<&'a str, f64>,
    leanings: BTreeSet<Leaning>,
}

impl<'a> Accumulator<'a> {
    fn add(&mut self, event: &'a ReadEvent, weight: f64) {
        self.events += 1;
        self.frequency += weight;
        let best = self.per_source.entry(event.source_id.as_str()).or_insert(0.0);
        if weight > *best {
            *best = weight;
        }
        if event.leaning.is_known() {
            self.leanings.insert(event.leaning);
        }
    }

    fn diversity(&self) -> f64 {
        self.per_source.values().sum()
    }
}

fn breakdown(scorer: &Scorer, dim: Dimension, acc: &Accumulator) -> DimensionBreakdown {
    let baseline = dim.baseline();

    if acc.events == 0 {
        return DimensionBreakdown {
            dimension: dim,
            events: 0,
            distinct_sources: 0,
            distinct_leanings: 0,
            frequency_signal: 0.0,
            diversity_signal: 0.0,
            balance_signal: 0.0,
            raw_signal: 0.0,
            saturation: 0.0,
            exact_value: baseline as f64,
            value: DimensionScore::new(baseline),
            used_baseline: true,
        };
    }

    let w = &scorer.weights;
    let frequency_signal = acc.frequency;
    let diversity_signal = acc.diversity();
    let balance_signal = if dim.rewards_balance() {
        acc.leanings.len() as f64
    } else {
        0.0
    };

    let raw_signal = w.weight_frequency as f64 * frequency_signal
        + w.weight_diversity as f64 * diversity_signal
        + w.weight_balance as f64 * balance_signal;

    let saturation = saturate(raw_signal, w.saturation_scale);
    let exact_value = lift(baseline, saturation);

    DimensionBreakdown {
        dimension: dim,
        events: acc.events,
        distinct_sources: acc.per_source.len(),
        distinct_leanings: acc.leanings.len(),
        frequency_signal,
        diversity_signal,
        balance_signal,
        raw_signal,
        saturation,
        exact_value,
        value: DimensionScore::from_exact(exact_value),
        used_baseline: false,
    }
}

/// Weighted mean of the unrounded dimension values. All-zero weights fall
/// back to the plain mean.
fn overall(scorer: &Scorer, exact: &[f64; DIMENSION_COUNT]) -> DimensionScore {
    let weights = &scorer.dimension_weights;
    let total_weight: f64 = weights.iter().map(|&w| w as f64).sum();

    let mean = if total_weight > 0.0 {
        exact
            .iter()
            .zip(weights.iter())
            .map(|(v, &w)| v * w as f64)
            .sum::<f64>()
            / total_weight
    } else {
        exact.iter().sum::<f64>() / DIMENSION_COUNT as f64
    };

    DimensionScore::from_exact(mean)
}

pub fn score_details(scorer: &Scorer, history: Option<&HistoryWindow>) -> DsResult<ScoreDetails> {
    let empty = HistoryWindow::empty();
    let window = history.unwrap_or(&empty);
    let as_of = window.as_of();

    let mut accs: [Accumulator; DIMENSION_COUNT] = Default::default();
    let mut unknown_tags = BTreeSet::new();
    let mut classified_events = 0;
    let mut skipped_events = 0;

    for (index, event) in window.events().iter().enumerate() {
        if scorer.validation == ValidationMode::Strict {
            event
                .validate()
                .map_err(|reason| DemocracyError::Validation {
                    index,
                    article_id: event.article_id.clone(),
                    reason,
                })?;
        }

        let classification = classify::classify(event);
        unknown_tags.extend(classification.unknown_tags);

        if classification.dimensions.is_empty() {
            debug!(
                "Skipping event '{}' from '{}': no recognised tags",
                event.article_id, event.source_id
            );
            skipped_events += 1;
            continue;
        }
        classified_events += 1;

        let weight = recency_weight(event.read_at, as_of, scorer.weights.recency_half_life_days)
            * engagement_weight(event.engagement.as_ref(), &scorer.weights);

        for dim in classification.dimensions.iter() {
            accs[dim.index()].add(event, weight);
        }
    }

    if !unknown_tags.is_empty() {
        debug!("Unrecognised tags: {:?}", unknown_tags);
    }

    let dimensions: Vec<DimensionBreakdown> = Dimension::ALL
        .iter()
        .map(|&dim| breakdown(scorer, dim, &accs[dim.index()]))
        .collect();

    let mut exact = [0.0; DIMENSION_COUNT];
    let mut values = [DimensionScore::default(); DIMENSION_COUNT];
    for b in &dimensions {
        exact[b.dimension.index()] = b.exact_value;
        values[b.dimension.index()] = b.value;
    }

    // Nothing classified: the neutral profile, whatever the dimension weights.
    let score = if dimensions.iter().all(|b| b.used_baseline) {
        DemocracyScore::neutral()
    } else {
        DemocracyScore {
            dimensions: DimensionScores::from_array(values),
            overall: overall(scorer, &exact),
        }
    };

    Ok(ScoreDetails {
        score,
        dimensions,
        total_events: window.len(),
        classified_events,
        skipped_events,
        unknown_tags: unknown_tags.into_iter().collect(),
        recency_applied: as_of.is_some(),
    })
}

pub fn score_full(scorer: &Scorer, history: Option<&HistoryWindow>) -> DsResult<DemocracyScore> {
    score_details(scorer, history).map(|d| d.score)
}
