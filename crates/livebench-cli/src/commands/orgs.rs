//! The `livebench orgs` command.

use anyhow::Result;

use livebench_core::traits::load_snapshot;
use livebench_core::Leaderboard;

use super::SourceArgs;

pub async fn execute(source_args: SourceArgs) -> Result<()> {
    let (_config, source) = source_args.open()?;

    let mut board = Leaderboard::new();
    board.replace_rows(load_snapshot(source.as_ref()).await);

    let facets = board.facets();
    if facets.organizations.is_empty() {
        println!("No organizations found.");
    }
    for org in &facets.organizations {
        println!("{org}");
    }
    println!("Global average ceiling: {}", facets.max_global_average);

    Ok(())
}
