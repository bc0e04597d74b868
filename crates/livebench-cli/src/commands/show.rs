//! The `livebench show` command.

use anyhow::Result;

use livebench_core::traits::load_snapshot;
use livebench_core::Leaderboard;

use super::{check_threshold, SourceArgs};
use crate::render;

pub async fn execute(
    source_args: SourceArgs,
    search: String,
    org: String,
    min_global: f64,
    format: String,
) -> Result<()> {
    let min_global = check_threshold(min_global)?;
    anyhow::ensure!(
        matches!(format.as_str(), "table" | "json"),
        "unknown format '{format}', expected table or json"
    );

    let (_config, source) = source_args.open()?;

    let mut board = Leaderboard::new();
    board.replace_rows(load_snapshot(source.as_ref()).await);
    board.set_search_term(search);
    board.set_organization_filter(org);
    board.set_min_global_average(min_global);

    let view = board.view();
    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(view.visible_rows)?);
        }
        _ => {
            println!("{}", render::results(&view));
        }
    }

    Ok(())
}
