use crate::config::HistoryParams;
use crate::history::{HistorySource, HistoryWindow};
use crate::scorer::{ChartPoint, DemocracyScore, Scorer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{info, warn};

/// Identifies one scored history snapshot: the same user scored over a
/// different page or reference time is a different entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileKey {
    pub user_id: String,
    pub limit: usize,
    pub offset: usize,
    pub as_of: Option<DateTime<Utc>>,
}

impl ProfileKey {
    pub fn new(user_id: &str, params: &HistoryParams, as_of: Option<DateTime<Utc>>) -> Self {
        Self {
            user_id: user_id.to_string(),
            limit: params.limit,
            offset: params.offset,
            as_of,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedScore {
    pub score: DemocracyScore,
    pub events_scored: usize,
}

/// Shared service state: one scorer plus a per-snapshot score cache.
pub struct EngagementState {
    pub scorer: Scorer,
    cache: RwLock<HashMap<ProfileKey, CachedScore>>,
}

impl EngagementState {
    pub fn new(scorer: Scorer) -> Self {
        Self {
            scorer,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn cached(&self, key: &ProfileKey) -> Option<CachedScore> {
        self.cache
            .read()
            .ok()
            .and_then(|guard| guard.get(key).copied())
    }

    /// Drop every cached snapshot of a user, e.g. after new reads were recorded.
    pub fn invalidate(&self, user_id: &str) -> bool {
        match self.cache.write() {
            Ok(mut guard) => {
                let before = guard.len();
                guard.retain(|key, _| key.user_id != user_id);
                guard.len() != before
            }
            Err(_) => false,
        }
    }

    fn store(&self, key: ProfileKey, entry: CachedScore) {
        if let Ok(mut guard) = self.cache.write() {
            guard.insert(key, entry);
        }
    }
}

impl Default for EngagementState {
    fn default() -> Self {
        Self::new(Scorer::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileOrigin {
    Computed,
    Cached,
    /// Source or validation failure; the neutral profile is shown instead.
    Fallback,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EngagementProfile {
    pub user_id: String,
    pub score: DemocracyScore,
    pub chart: Vec<ChartPoint>,
    pub events_scored: usize,
    pub origin: ProfileOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl EngagementProfile {
    fn new(
        user_id: &str,
        score: DemocracyScore,
        events_scored: usize,
        origin: ProfileOrigin,
        fallback_reason: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            chart: score.chart_data(),
            score,
            events_scored,
            origin,
            fallback_reason,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.origin == ProfileOrigin::Fallback
    }
}

/// Service: fetch a page of history, score it, cache it.
///
/// Never fails. An unavailable source scores as an empty history and a
/// rejected history (strict validation) yields the neutral profile; both are
/// flagged as [`ProfileOrigin::Fallback`] and are not cached. Successful scores
/// are cached per user, page and `as_of`.
pub fn load_profile(
    state: &EngagementState,
    source: &dyn HistorySource,
    user_id: &str,
    params: &HistoryParams,
    as_of: Option<DateTime<Utc>>,
) -> EngagementProfile {
    let key = ProfileKey::new(user_id, params, as_of);
    if let Some(hit) = state.cached(&key) {
        return EngagementProfile::new(
            user_id,
            hit.score,
            hit.events_scored,
            ProfileOrigin::Cached,
            None,
        );
    }

    let (events, fetch_error) = match source.fetch_history(user_id, params.limit, params.offset) {
        Ok(events) => (events, None),
        Err(e) => {
            warn!("History for '{}' unavailable: {}", user_id, e);
            (Vec::new(), Some(e))
        }
    };

    let mut window = HistoryWindow::from_page(events, params.limit, params.offset);
    if let Some(t) = as_of {
        window = window.with_as_of(t);
    }

    match state.scorer.score(Some(&window)) {
        Ok(score) => match fetch_error {
            Some(e) => EngagementProfile::new(
                user_id,
                score,
                0,
                ProfileOrigin::Fallback,
                Some(e.to_string()),
            ),
            None => {
                info!("Scored {} events for '{}'", window.len(), user_id);
                state.store(
                    key,
                    CachedScore {
                        score,
                        events_scored: window.len(),
                    },
                );
                EngagementProfile::new(user_id, score, window.len(), ProfileOrigin::Computed, None)
            }
        },
        Err(e) => {
            let reason = e.to_string();
            warn!("Rejected history for '{}': {}", user_id, reason);
            EngagementProfile::new(
                user_id,
                DemocracyScore::neutral(),
                0,
                ProfileOrigin::Fallback,
                Some(reason),
            )
        }
    }
}
