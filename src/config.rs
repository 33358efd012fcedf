pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub model: String,
    pub base_url: String,
}

impl Config {
    /// A missing key is not an error here; the service rejects the request
    /// and the caller sees the usual failure notice.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_override_replaces_default() {
        let config = Config {
            gemini_api_key: String::new(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
        };

        let kept = config.clone().with_model(None);
        assert_eq!(kept.model, DEFAULT_MODEL);

        let replaced = config.with_model(Some("gemini-2.0-flash".into()));
        assert_eq!(replaced.model, "gemini-2.0-flash");
    }
}
