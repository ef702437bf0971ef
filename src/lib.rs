pub mod api;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod history;
pub mod scorer;
// cmd and reports are binary modules (see main.rs).

use history::HistoryWindow;
use scorer::{DemocracyScore, Scorer};

/// Scores a history with the default weights. Absent or empty history yields
/// the neutral profile; this never fails.
pub fn compute_score(history: Option<&HistoryWindow>) -> DemocracyScore {
    Scorer::default().score_or_baseline(history)
}
