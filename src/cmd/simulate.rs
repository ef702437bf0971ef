use super::parse_as_of;
use crate::reports;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use democracy_score::config::Config;
use democracy_score::error::DsResult;
use democracy_score::history::{latest_page, HistoryWindow, Leaning, ReadEvent};
use democracy_score::scorer::classify::TAG_TABLE;
use democracy_score::scorer::Scorer;
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::info;

const SIM_SPAN_MINUTES: i64 = 90 * 24 * 60;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    #[arg(short = 'e', long, default_value_t = 30)]
    pub events: usize,

    /// Number of distinct outlets to draw from
    #[arg(long, default_value_t = 8)]
    pub sources: usize,

    #[arg(long)]
    pub as_of: Option<String>,

    /// Write the generated history to this JSON file
    #[arg(long)]
    pub dump: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub explain: bool,
}

fn random_tag(rng: &mut fastrand::Rng) -> &'static str {
    TAG_TABLE[rng.usize(..TAG_TABLE.len())].0
}

pub fn generate_history(
    rng: &mut fastrand::Rng,
    count: usize,
    sources: usize,
    anchor: DateTime<Utc>,
) -> Vec<ReadEvent> {
    let leanings: Vec<Leaning> = Leaning::iter().collect();
    let sources = sources.max(1);

    (0..count)
        .map(|i| {
            let category = random_tag(rng);
            let topics: Vec<&str> = (0..rng.usize(0..3)).map(|_| random_tag(rng)).collect();
            let source = format!("outlet-{}", rng.usize(..sources));
            let age = Duration::minutes(rng.i64(0..SIM_SPAN_MINUTES));

            let event = ReadEvent::new(&format!("sim-{:04}", i), &source, category, anchor - age)
                .with_topics(&topics)
                .with_leaning(leanings[rng.usize(..leanings.len())]);

            match rng.u8(0..3) {
                0 => event.with_completed(rng.bool()),
                1 => event.with_dwell(rng.f32() * 300.0),
                _ => event,
            }
        })
        .collect()
}

pub fn run(args: SimulateArgs, scorer: Arc<Scorer>) -> DsResult<()> {
    let as_of = parse_as_of(args.as_of.as_deref())?;
    let mut rng = match args.seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };

    let anchor = as_of.unwrap_or_else(Utc::now);
    let events = generate_history(&mut rng, args.events, args.sources, anchor);
    info!("Generated {} synthetic events", events.len());

    if let Some(path) = &args.dump {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &events)?;
        info!("Wrote synthetic history to {}", path);
    }

    let params = &args.config.history;
    let page = latest_page(events, params.limit, params.offset);
    let mut window = HistoryWindow::from_page(page, params.limit, params.offset);
    if let Some(t) = as_of {
        window = window.with_as_of(t);
    }

    let details = scorer.score_details(Some(&window))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&details.score)?);
        return Ok(());
    }

    reports::print_chart("Simulated Democratic Engagement", &details.score);
    if args.explain {
        reports::print_breakdown(&details);
    }
    Ok(())
}
