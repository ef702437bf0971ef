use super::parse_as_of;
use crate::reports;
use clap::Args;
use democracy_score::config::Config;
use democracy_score::error::DsResult;
use democracy_score::history::{latest_page, HistoryWindow};
use democracy_score::scorer::loader::load_history_from_file;
use democracy_score::scorer::{ChartPoint, DemocracyScore, Scorer};
use serde::Serialize;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    /// History file (.json or .csv)
    #[arg(short = 'H', long)]
    pub history: String,

    /// Reference time for recency decay (RFC 3339 or "now")
    #[arg(long)]
    pub as_of: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Print the per-dimension signal breakdown
    #[arg(long, default_value_t = false)]
    pub explain: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreOutput<'a> {
    #[serde(flatten)]
    score: &'a DemocracyScore,
    chart: Vec<ChartPoint>,
}

pub fn run(args: ScoreArgs, scorer: Arc<Scorer>) -> DsResult<()> {
    let params = &args.config.history;
    let events = load_history_from_file(&args.history)?;
    let page = latest_page(events, params.limit, params.offset);

    let mut window = HistoryWindow::from_page(page, params.limit, params.offset);
    if let Some(t) = parse_as_of(args.as_of.as_deref())? {
        window = window.with_as_of(t);
    }

    let details = scorer.score_details(Some(&window))?;

    if args.json {
        let out = if args.explain {
            serde_json::to_string_pretty(&details)?
        } else {
            serde_json::to_string_pretty(&ScoreOutput {
                score: &details.score,
                chart: details.score.chart_data(),
            })?
        };
        println!("{}", out);
        return Ok(());
    }

    reports::print_chart("Democratic Engagement", &details.score);
    if args.explain {
        reports::print_breakdown(&details);
    }
    Ok(())
}
