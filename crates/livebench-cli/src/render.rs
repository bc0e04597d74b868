//! Text rendering of leaderboard views.

use std::fmt::Write;

use comfy_table::{Cell, Table};

use livebench_core::model::ScoreField;
use livebench_core::{BenchmarkRow, LeaderboardView};

pub const LOADING_MESSAGE: &str = "Loading Live Bench...";
pub const NO_MATCHES_MESSAGE: &str = "No models match your filters yet.";

/// Scores are shown as stored, without rounding.
fn format_score(value: f64) -> String {
    value.to_string()
}

pub fn rows_table(rows: &[BenchmarkRow]) -> Table {
    let mut table = Table::new();
    let mut header = vec!["Model", "Organization"];
    header.extend(ScoreField::ALL.iter().map(|f| f.label()));
    table.set_header(header);

    for row in rows {
        let mut cells = vec![Cell::new(&row.model), Cell::new(&row.organization)];
        cells.extend(
            ScoreField::ALL
                .iter()
                .map(|f| Cell::new(format_score(row.score(*f)))),
        );
        table.add_row(cells);
    }
    table
}

/// Summary line plus the visible rows, or the empty-state message.
pub fn results(view: &LeaderboardView<'_>) -> String {
    let mut out = format!(
        "Showing {} of {} models\n",
        view.visible_rows.len(),
        view.total_rows
    );
    if view.visible_rows.is_empty() {
        out.push_str(NO_MATCHES_MESSAGE);
    } else {
        let _ = write!(out, "{}", rows_table(view.visible_rows));
    }
    out
}

/// A full interactive frame: filter controls followed by the results.
pub fn frame(view: &LeaderboardView<'_>, search_echo: &str) -> String {
    if view.loading {
        return LOADING_MESSAGE.to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Search: \"{}\"  Organization: {}  Min Global Avg: {:.0} (0-{})",
        search_echo,
        view.criteria.organization_filter,
        view.criteria.min_global_average,
        view.max_global_average
    );
    if !view.organizations.is_empty() {
        let _ = writeln!(out, "Organizations: {}", view.organizations.join(", "));
    }
    out.push_str(&results(view));
    out
}
