use std::env;

/// Application configuration loaded from environment variables.
///
/// API keys are optional at load time: a missing key degrades the matching
/// pipeline stage at call time instead of failing boot.
#[derive(Debug, Clone)]
pub struct Config {
    // AI provider
    pub groq_api_key: Option<String>,
    pub groq_model: String,

    // Video search
    pub youtube_api_key: Option<String>,

    // Movie metadata
    pub tmdb_api_key: Option<String>,

    // Web server
    pub api_host: String,
    pub api_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message only for malformed values, never for
    /// missing keys.
    pub fn from_env() -> Self {
        Self {
            groq_api_key: optional_env("GROQ_API_KEY"),
            groq_model: env::var("GROQ_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            youtube_api_key: optional_env("YOUTUBE_API_KEY"),
            tmdb_api_key: optional_env("TMDB_API_KEY"),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("API_PORT must be a number"),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}
