use super::parse_as_of;
use crate::reports;
use clap::Args;
use democracy_score::api::{self, EngagementProfile, EngagementState};
use democracy_score::config::Config;
use democracy_score::error::DsResult;
use democracy_score::history::DirectorySource;
use democracy_score::scorer::Scorer;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short = 'd', long)]
    pub data_dir: String,

    #[arg(long)]
    pub as_of: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: BatchArgs, scorer: Arc<Scorer>) -> DsResult<()> {
    let as_of = parse_as_of(args.as_of.as_deref())?;
    let source = DirectorySource::new(&args.data_dir);
    let users = source.users()?;
    let state = EngagementState::new((*scorer).clone());

    info!(
        "Scoring {} users from {} on {} threads",
        users.len(),
        args.data_dir,
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let mut profiles: Vec<EngagementProfile> = users
        .par_iter()
        .map(|user| api::load_profile(&state, &source, user, &args.config.history, as_of))
        .collect();

    // Best overall first; ties keep alphabetical order.
    profiles.sort_by(|a, b| {
        b.score
            .overall()
            .cmp(&a.score.overall())
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    info!("Batch finished in {:.2?}", start.elapsed());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
    } else {
        reports::print_batch_report(&profiles);
    }
    Ok(())
}
