use crate::config::ScoringWeights;
use crate::dimensions::FULL_MARK;
use crate::history::Engagement;
use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Half-life decay: `0.5^(age_days / half_life_days)`.
///
/// Without a reference time every event weighs 1.0, so scoring stays
/// independent of the wall clock. Events dated after `as_of` count as fresh.
#[inline(always)]
pub fn recency_weight(
    read_at: DateTime<Utc>,
    as_of: Option<DateTime<Utc>>,
    half_life_days: f32,
) -> f64 {
    let Some(now) = as_of else {
        return 1.0;
    };
    let age_days = (now - read_at).num_seconds().max(0) as f64 / SECONDS_PER_DAY;
    0.5f64.powf(age_days / half_life_days as f64)
}

/// How much of a read actually happened, in `[0, 1]` for sane weights.
///
/// Completion wins over dwell time; dwell time wins over an explicit
/// "not completed"; no signal at all counts as a full read.
pub fn engagement_weight(engagement: Option<&Engagement>, weights: &ScoringWeights) -> f64 {
    let Some(e) = engagement else {
        return 1.0;
    };

    if e.completed == Some(true) {
        return 1.0;
    }

    if let Some(dwell) = e.dwell_seconds.filter(|d| d.is_finite() && *d >= 0.0) {
        let ratio = dwell as f64 / weights.full_read_seconds as f64;
        return ratio.clamp(weights.min_engagement as f64, 1.0);
    }

    match e.completed {
        Some(false) => weights.partial_read_weight as f64,
        _ => 1.0,
    }
}

/// Diminishing returns: `1 - exp(-raw / scale)`, in `[0, 1)`.
#[inline(always)]
pub fn saturate(raw: f64, scale: f32) -> f64 {
    if !(raw > 0.0) {
        return 0.0;
    }
    1.0 - (-raw / scale as f64).exp()
}

/// Lifts a saturation level from the dimension's baseline toward the full mark.
#[inline(always)]
pub fn lift(baseline: u8, saturation: f64) -> f64 {
    let base = baseline as f64;
    base + (FULL_MARK as f64 - base) * saturation.clamp(0.0, 1.0)
}
