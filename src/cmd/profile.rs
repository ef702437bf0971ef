use super::parse_as_of;
use crate::reports;
use clap::Args;
use democracy_score::api::{self, EngagementState};
use democracy_score::config::Config;
use democracy_score::error::DsResult;
use democracy_score::history::DirectorySource;
use democracy_score::scorer::Scorer;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub config: Config,

    /// Directory holding `<user>.json` / `<user>.csv` histories
    #[arg(short = 'd', long)]
    pub data_dir: String,

    #[arg(short, long)]
    pub user: String,

    #[arg(long)]
    pub as_of: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: ProfileArgs, scorer: Arc<Scorer>) -> DsResult<()> {
    let as_of = parse_as_of(args.as_of.as_deref())?;
    let source = DirectorySource::new(&args.data_dir);
    let state = EngagementState::new((*scorer).clone());

    let profile = api::load_profile(&state, &source, &args.user, &args.config.history, as_of);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        reports::print_profile(&profile);
    }
    Ok(())
}
