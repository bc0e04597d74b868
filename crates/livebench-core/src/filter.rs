//! The filter predicate engine.
//!
//! A single stable pass over the snapshot: rows keep their original order and
//! a row is visible only if it passes the search, organization and score-floor
//! clauses together.

use crate::criteria::{FilterCriteria, OrganizationFilter};
use crate::model::BenchmarkRow;

/// Criteria prepared for repeated row checks.
#[derive(Debug, Clone)]
pub struct RowPredicate<'a> {
    needle: String,
    organization: &'a OrganizationFilter,
    min_global_average: f64,
}

impl<'a> RowPredicate<'a> {
    pub fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            needle: criteria.normalized_search(),
            organization: &criteria.organization_filter,
            min_global_average: criteria.min_global_average,
        }
    }

    pub fn matches(&self, row: &BenchmarkRow) -> bool {
        self.matches_search(row) && self.matches_organization(row) && self.matches_floor(row)
    }

    fn matches_search(&self, row: &BenchmarkRow) -> bool {
        self.needle.is_empty()
            || row.model.to_lowercase().contains(&self.needle)
            || row.organization.to_lowercase().contains(&self.needle)
    }

    fn matches_organization(&self, row: &BenchmarkRow) -> bool {
        self.organization.allows(&row.organization)
    }

    // Raw float comparison; only the displayed ceiling is rounded.
    fn matches_floor(&self, row: &BenchmarkRow) -> bool {
        row.global_average >= self.min_global_average
    }
}

/// Rows visible under `criteria`, in snapshot order.
pub fn compute_visible_rows(rows: &[BenchmarkRow], criteria: &FilterCriteria) -> Vec<BenchmarkRow> {
    let predicate = RowPredicate::new(criteria);
    rows.iter()
        .filter(|row| predicate.matches(row))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_rows() -> Vec<BenchmarkRow> {
        vec![
            BenchmarkRow::new("GPT-X", "OpenAI", 80.0),
            BenchmarkRow::new("Claude-Y", "Anthropic", 60.0),
        ]
    }

    fn models(rows: &[BenchmarkRow]) -> Vec<&str> {
        rows.iter().map(|r| r.model.as_str()).collect()
    }

    #[test]
    fn default_criteria_show_everything_in_order() {
        let visible = compute_visible_rows(&scenario_rows(), &FilterCriteria::default());
        assert_eq!(models(&visible), vec!["GPT-X", "Claude-Y"]);
    }

    #[test]
    fn score_floor_hides_lower_rows() {
        let criteria = FilterCriteria {
            min_global_average: 70.0,
            ..Default::default()
        };
        let visible = compute_visible_rows(&scenario_rows(), &criteria);
        assert_eq!(models(&visible), vec!["GPT-X"]);
    }

    #[test]
    fn search_matches_organization_case_insensitively() {
        let criteria = FilterCriteria {
            search_term: "anthropic".into(),
            ..Default::default()
        };
        let visible = compute_visible_rows(&scenario_rows(), &criteria);
        assert_eq!(models(&visible), vec!["Claude-Y"]);
    }

    #[test]
    fn search_matches_model_substring() {
        let criteria = FilterCriteria {
            search_term: "  gpt ".into(),
            ..Default::default()
        };
        let visible = compute_visible_rows(&scenario_rows(), &criteria);
        assert_eq!(models(&visible), vec!["GPT-X"]);
    }

    #[test]
    fn whitespace_only_search_passes_everything() {
        let criteria = FilterCriteria {
            search_term: "   ".into(),
            ..Default::default()
        };
        assert_eq!(compute_visible_rows(&scenario_rows(), &criteria).len(), 2);
    }

    #[test]
    fn organization_filter_is_exact() {
        let mut criteria = FilterCriteria {
            organization_filter: OrganizationFilter::from("OpenAI"),
            ..Default::default()
        };
        let visible = compute_visible_rows(&scenario_rows(), &criteria);
        assert_eq!(models(&visible), vec!["GPT-X"]);

        criteria.organization_filter = OrganizationFilter::from("openai");
        assert!(compute_visible_rows(&scenario_rows(), &criteria).is_empty());
    }

    #[test]
    fn empty_snapshot_yields_nothing() {
        assert!(compute_visible_rows(&[], &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn floor_uses_unrounded_scores() {
        let rows = vec![BenchmarkRow::new("a", "x", 69.9)];
        let criteria = FilterCriteria {
            min_global_average: 70.0,
            ..Default::default()
        };
        assert!(compute_visible_rows(&rows, &criteria).is_empty());
    }

    #[test]
    fn clauses_combine() {
        let rows = vec![
            BenchmarkRow::new("GPT-X", "OpenAI", 80.0),
            BenchmarkRow::new("GPT-Mini", "OpenAI", 50.0),
            BenchmarkRow::new("Claude-Y", "Anthropic", 90.0),
        ];
        let criteria = FilterCriteria {
            search_term: "gpt".into(),
            organization_filter: OrganizationFilter::from("OpenAI"),
            min_global_average: 60.0,
        };
        assert_eq!(models(&compute_visible_rows(&rows, &criteria)), vec!["GPT-X"]);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let rows = scenario_rows();
        let criteria = FilterCriteria {
            search_term: "x".into(),
            ..Default::default()
        };
        assert_eq!(
            compute_visible_rows(&rows, &criteria),
            compute_visible_rows(&rows, &criteria)
        );
    }

    #[test]
    fn raising_threshold_never_grows_result() {
        let rows: Vec<_> = (0..50)
            .map(|i| BenchmarkRow::new(format!("m{i}"), "org", (i * 7 % 97) as f64 + 0.5))
            .collect();
        let mut previous = usize::MAX;
        for threshold in 0..=100 {
            let criteria = FilterCriteria {
                min_global_average: threshold as f64,
                ..Default::default()
            };
            let count = compute_visible_rows(&rows, &criteria).len();
            assert!(count <= previous, "threshold {threshold} grew the result");
            previous = count;
        }
    }
}
