pub mod parse;
pub mod prompt;
pub mod query;

use std::time::Instant;

use crate::instrumentation::AdviceLog;
use crate::llm::TextGenerator;

pub use parse::{parse_recommendations, Recommendation};
pub use prompt::{build_user_prompt, SYSTEM_PROMPT};
pub use query::{DifficultyRank, ElementalType, Query};

/// Number of counters the prompt asks for.
pub const EXPECTED_RECOMMENDATIONS: usize = 3;
/// Moves per counter the prompt asks for.
pub const EXPECTED_MOVES: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("incomplete query: {0}")]
    Validation(&'static str),
    #[error("generative service request failed: {0}")]
    Network(String),
    #[error("unusable reply: {0}")]
    Format(String),
}

impl AdvisorError {
    fn network(err: anyhow::Error) -> Self {
        Self::Network(format!("{:#}", err))
    }
}

pub struct Advisor<G> {
    llm: G,
}

impl<G: TextGenerator> Advisor<G> {
    pub fn new(llm: G) -> Self {
        Self { llm }
    }

    #[cfg(test)]
    pub fn llm(&self) -> &G {
        &self.llm
    }

    /// Ask the model for counters to `query`. Rejects an incomplete query before
    /// touching the network. One attempt, no retries.
    pub async fn fetch_advice(&self, query: &Query) -> Result<Vec<Recommendation>, AdvisorError> {
        let tera_type = query.validate()?;

        let prompt = build_user_prompt(&query.target_name, tera_type, query.rank);
        tracing::debug!(model = self.llm.model(), %prompt, "Requesting advice");

        let start = Instant::now();
        let response = self
            .llm
            .complete(Some(SYSTEM_PROMPT), &prompt)
            .await
            .map_err(AdvisorError::network)?;
        let latency = start.elapsed().as_millis() as u64;

        let recommendations = parse_recommendations(&response.text).inspect_err(|e| {
            tracing::debug!(error = %e, reply = %response.text, "Reply could not be parsed");
        })?;
        warn_on_unexpected_shape(&recommendations);

        let mut log = AdviceLog::new(
            self.llm.model(),
            &query.target_name,
            tera_type.label(),
            query.rank.label(),
        );
        log.latency_ms = latency;
        log.input_tokens = response.input_tokens;
        log.output_tokens = response.output_tokens;
        log.recommendations = recommendations.len();
        log.emit();

        Ok(recommendations)
    }
}

// Short or oddly shaped replies are still shown; just note them.
fn warn_on_unexpected_shape(recommendations: &[Recommendation]) {
    if recommendations.len() != EXPECTED_RECOMMENDATIONS {
        tracing::warn!(
            count = recommendations.len(),
            expected = EXPECTED_RECOMMENDATIONS,
            "Model returned an unexpected number of recommendations"
        );
    }
    for rec in recommendations {
        if rec.moves.len() != EXPECTED_MOVES {
            tracing::warn!(
                name = %rec.name,
                moves = rec.moves.len(),
                "Recommendation does not list exactly four moves"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::MockGenerator;

    const THREE_COUNTERS: &str = r#"以下の3体がおすすめです。
[
  {"名前": "ドオー", "もちもの": "たべのこし", "理由": "でんき技が効かない",
   "技": ["じしん", "どくどく", "じこさいせい", "あくび"], "チャート": ["1T目: あくび", "2T目以降: じしん"]},
  {"名前": "ガブリアス", "もちもの": "シェルベル", "理由": "高火力",
   "技": ["じしん", "つるぎのまい", "ドラゴンクロー", "ストーンエッジ"], "チャート": ["1T目: つるぎのまい"]},
  {"名前": "カバルドン", "もちもの": "オボンのみ", "理由": "耐久が高い",
   "技": ["じしん", "なまける", "あくび", "ステルスロック"], "チャート": ["1T目: あくび", "ピンチ時: なまける"]}
]
以上です。"#;

    fn pikachu_query() -> Query {
        Query::new("ピカチュウ", Some(ElementalType::Electric), DifficultyRank::Six)
    }

    #[tokio::test]
    async fn empty_target_fails_without_network() {
        let advisor = Advisor::new(MockGenerator::replying(THREE_COUNTERS));
        let query = Query::new("", Some(ElementalType::Electric), DifficultyRank::Six);

        let err = advisor.fetch_advice(&query).await.unwrap_err();
        assert!(matches!(err, AdvisorError::Validation(_)));
        assert_eq!(advisor.llm().calls(), 0);
    }

    #[tokio::test]
    async fn missing_type_fails_without_network() {
        let advisor = Advisor::new(MockGenerator::replying(THREE_COUNTERS));
        let query = Query::new("ピカチュウ", None, DifficultyRank::Six);

        let err = advisor.fetch_advice(&query).await.unwrap_err();
        assert!(matches!(err, AdvisorError::Validation(_)));
        assert_eq!(advisor.llm().calls(), 0);
    }

    #[tokio::test]
    async fn parses_reply_in_service_order() {
        let advisor = Advisor::new(MockGenerator::replying(THREE_COUNTERS));

        let recs = advisor.fetch_advice(&pikachu_query()).await.unwrap();
        let names: Vec<&str> = recs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["ドオー", "ガブリアス", "カバルドン"]);
        assert_eq!(recs[0].moves, vec!["じしん", "どくどく", "じこさいせい", "あくび"]);
        assert_eq!(recs[2].plan, vec!["1T目: あくび", "ピンチ時: なまける"]);
        assert_eq!(advisor.llm().calls(), 1);
    }

    #[tokio::test]
    async fn prompt_carries_query_fields() {
        let advisor = Advisor::new(MockGenerator::replying("[]"));
        let query = Query::new("ピカチュウ", Some(ElementalType::Ground), DifficultyRank::Seven);

        advisor.fetch_advice(&query).await.unwrap();
        let prompt = advisor.llm().last_prompt().unwrap();
        assert!(prompt.contains("ピカチュウ"));
        assert!(prompt.contains("じめん"));
        assert!(prompt.contains("★7(最強レイド)"));
    }

    #[tokio::test]
    async fn reply_without_array_is_format_error() {
        let advisor = Advisor::new(MockGenerator::replying("ごめんなさい、答えられません。"));
        let err = advisor.fetch_advice(&pikachu_query()).await.unwrap_err();
        assert!(matches!(err, AdvisorError::Format(_)));
    }

    #[tokio::test]
    async fn invalid_bracketed_text_is_format_error() {
        let advisor = Advisor::new(MockGenerator::replying("答え: [ドオー, ガブリアス]"));
        let err = advisor.fetch_advice(&pikachu_query()).await.unwrap_err();
        assert!(matches!(err, AdvisorError::Format(_)));
    }

    #[tokio::test]
    async fn transport_failure_is_network_error() {
        let advisor = Advisor::new(MockGenerator::failing("connection refused"));
        let err = advisor.fetch_advice(&pikachu_query()).await.unwrap_err();
        match err {
            AdvisorError::Network(message) => assert!(message.contains("connection refused")),
            other => panic!("expected network error, got {other:?}"),
        }
        assert_eq!(advisor.llm().calls(), 1);
    }
}
