use serde::{Deserialize, Serialize};

use super::AdvisorError;

/// One suggested counter, as the model writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "名前")]
    pub name: String,
    #[serde(rename = "もちもの")]
    pub held_item: String,
    #[serde(rename = "理由")]
    pub rationale: String,
    #[serde(rename = "技")]
    pub moves: Vec<String>,
    /// Turn-by-turn chart; order matters.
    #[serde(rename = "チャート")]
    pub plan: Vec<String>,
}

/// Slice from the first `[` to the last `]`, the same span a greedy,
/// dot-matches-newline `\[.*\]` would select.
pub fn extract_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

pub fn parse_recommendations(text: &str) -> Result<Vec<Recommendation>, AdvisorError> {
    let json = extract_array(text)
        .ok_or_else(|| AdvisorError::Format("no JSON array in reply".to_string()))?;

    serde_json::from_str(json)
        .map_err(|e| AdvisorError::Format(format!("invalid recommendation array: {}", e)))
}
