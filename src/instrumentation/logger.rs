/// One completed advisory request. Emitted through `tracing`, never written to disk.
#[derive(Debug, Clone)]
pub struct AdviceLog {
    pub id: String,
    pub timestamp: String,
    pub model: String,
    pub target_name: String,
    pub tera_type: String,
    pub rank: String,
    pub latency_ms: u64,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub recommendations: usize,
}

impl AdviceLog {
    pub fn new(model: &str, target_name: &str, tera_type: &str, rank: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            model: model.to_string(),
            target_name: target_name.to_string(),
            tera_type: tera_type.to_string(),
            rank: rank.to_string(),
            latency_ms: 0,
            input_tokens: 0,
            output_tokens: 0,
            recommendations: 0,
        }
    }

    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }

    pub fn summary(&self) -> String {
        format!(
            "{} vs {} ({}, {}) | Latency: {:.1}s | Tokens: {} | Recommendations: {}",
            self.model,
            self.target_name,
            self.tera_type,
            self.rank,
            self.latency_ms as f64 / 1000.0,
            self.total_tokens(),
            self.recommendations,
        )
    }

    pub fn emit(&self) {
        tracing::info!(
            request_id = %self.id,
            timestamp = %self.timestamp,
            model = %self.model,
            latency_ms = self.latency_ms,
            input_tokens = self.input_tokens,
            output_tokens = self.output_tokens,
            recommendations = self.recommendations,
            "{}",
            self.summary()
        );
    }
}
