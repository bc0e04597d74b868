//! Core data model types for livebench.
//!
//! A [`BenchmarkRow`] is one model's line on the leaderboard. The wire names
//! match the backend's JSON (`"Global Average"`, `"IF Average"`, ...), and
//! deserialization is lenient: a missing or null score reads as `0.0` and a
//! missing or null name reads as an empty string.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::DataUnavailable;

/// One model's benchmark scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkRow {
    /// Model identifier. Not guaranteed unique.
    #[serde(rename = "Model", deserialize_with = "lenient_string")]
    pub model: String,
    /// Organization that published the model.
    #[serde(rename = "Organization", deserialize_with = "lenient_string")]
    pub organization: String,
    #[serde(rename = "Global Average", deserialize_with = "lenient_score")]
    pub global_average: f64,
    #[serde(rename = "Reasoning Average", deserialize_with = "lenient_score")]
    pub reasoning_average: f64,
    #[serde(rename = "Coding Average", deserialize_with = "lenient_score")]
    pub coding_average: f64,
    #[serde(rename = "Agentic Coding Average", deserialize_with = "lenient_score")]
    pub agentic_coding_average: f64,
    #[serde(rename = "Mathematics Average", deserialize_with = "lenient_score")]
    pub mathematics_average: f64,
    #[serde(rename = "Data Analysis Average", deserialize_with = "lenient_score")]
    pub data_analysis_average: f64,
    #[serde(rename = "Language Average", deserialize_with = "lenient_score")]
    pub language_average: f64,
    #[serde(rename = "IF Average", deserialize_with = "lenient_score")]
    pub instruction_following_average: f64,
}

impl BenchmarkRow {
    /// Convenience constructor for a row with only the global average set.
    pub fn new(model: impl Into<String>, organization: impl Into<String>, global: f64) -> Self {
        Self {
            model: model.into(),
            organization: organization.into(),
            global_average: global,
            ..Default::default()
        }
    }

    /// Read one score column.
    pub fn score(&self, field: ScoreField) -> f64 {
        match field {
            ScoreField::GlobalAverage => self.global_average,
            ScoreField::Reasoning => self.reasoning_average,
            ScoreField::Coding => self.coding_average,
            ScoreField::AgenticCoding => self.agentic_coding_average,
            ScoreField::Mathematics => self.mathematics_average,
            ScoreField::DataAnalysis => self.data_analysis_average,
            ScoreField::Language => self.language_average,
            ScoreField::InstructionFollowing => self.instruction_following_average,
        }
    }
}

/// The eight score columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreField {
    GlobalAverage,
    Reasoning,
    Coding,
    AgenticCoding,
    Mathematics,
    DataAnalysis,
    Language,
    InstructionFollowing,
}

impl ScoreField {
    pub const ALL: [ScoreField; 8] = [
        ScoreField::GlobalAverage,
        ScoreField::Reasoning,
        ScoreField::Coding,
        ScoreField::AgenticCoding,
        ScoreField::Mathematics,
        ScoreField::DataAnalysis,
        ScoreField::Language,
        ScoreField::InstructionFollowing,
    ];

    /// Short column header used by table renderers.
    pub fn label(self) -> &'static str {
        match self {
            ScoreField::GlobalAverage => "Global Avg",
            ScoreField::Reasoning => "Reasoning",
            ScoreField::Coding => "Coding",
            ScoreField::AgenticCoding => "Agentic Coding",
            ScoreField::Mathematics => "Math",
            ScoreField::DataAnalysis => "Data Analysis",
            ScoreField::Language => "Language",
            ScoreField::InstructionFollowing => "IF",
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse a backend payload into a row snapshot.
///
/// The payload must be a JSON array of objects. Individual fields are
/// normalized rather than rejected.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<BenchmarkRow>, DataUnavailable> {
    serde_json::from_slice(bytes).map_err(|e| DataUnavailable::Malformed(e.to_string()))
}

fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_f64())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(s),
        _ => Ok(String::new()),
    }
}
