//! Analysis client configuration.

use std::time::Duration;

/// Default analysis backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default OpenAI-compatible API base.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Analysis client configuration.
#[derive(Clone)]
pub struct AnalysisConfig {
    /// Base URL of the analysis backend
    pub backend_url: String,
    /// Timeout for `POST /analyze-video`
    pub analyze_timeout: Duration,
    /// Timeout for `GET /health`
    pub health_timeout: Duration,
    /// OpenAI settings (vision + transcription)
    pub openai: OpenAiConfig,
    /// Other provider credentials, reported by the availability check
    pub providers: ProviderCredentials,
}

/// Direct vision/transcription API settings.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// API key; `None` disables direct analysis
    pub api_key: Option<String>,
    pub base_url: String,
    pub vision_model: String,
    pub vision_timeout: Duration,
    pub transcribe_timeout: Duration,
}

/// Credentials for providers that are only probed, never called.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    pub google_cloud_api_key: Option<String>,
    pub azure_api_key: Option<String>,
    pub azure_endpoint: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_region: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            analyze_timeout: Duration::from_secs(60),
            health_timeout: Duration::from_secs(5),
            openai: OpenAiConfig::default(),
            providers: ProviderCredentials {
                aws_region: "us-east-1".to_string(),
                ..Default::default()
            },
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            vision_model: "gpt-4o".to_string(),
            vision_timeout: Duration::from_secs(30),
            transcribe_timeout: Duration::from_secs(60),
        }
    }
}

impl AnalysisConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            backend_url: std::env::var("MONTAGE_BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
            analyze_timeout: Duration::from_secs(
                std::env::var("MONTAGE_ANALYZE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            health_timeout: Duration::from_secs(
                std::env::var("MONTAGE_HEALTH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            openai: OpenAiConfig {
                api_key: non_empty_var("OPENAI_API_KEY"),
                base_url: std::env::var("OPENAI_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
                vision_model: std::env::var("OPENAI_VISION_MODEL")
                    .unwrap_or_else(|_| "gpt-4o".to_string()),
                vision_timeout: Duration::from_secs(
                    std::env::var("OPENAI_VISION_TIMEOUT_SECS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(30),
                ),
                transcribe_timeout: Duration::from_secs(
                    std::env::var("OPENAI_TRANSCRIBE_TIMEOUT_SECS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(60),
                ),
            },
            providers: ProviderCredentials {
                google_cloud_api_key: non_empty_var("GOOGLE_CLOUD_API_KEY"),
                azure_api_key: non_empty_var("AZURE_API_KEY"),
                azure_endpoint: non_empty_var("AZURE_ENDPOINT"),
                aws_access_key_id: non_empty_var("AWS_ACCESS_KEY_ID"),
                aws_secret_access_key: non_empty_var("AWS_SECRET_ACCESS_KEY"),
                aws_region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            },
        }
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    pub fn with_analyze_timeout(mut self, timeout: Duration) -> Self {
        self.analyze_timeout = timeout;
        self
    }

    pub fn with_openai_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.openai.api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai.base_url = url.into();
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "<set>"
    } else {
        "<unset>"
    }
}

// Credentials never reach the logs.
impl std::fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("backend_url", &self.backend_url)
            .field("analyze_timeout", &self.analyze_timeout)
            .field("health_timeout", &self.health_timeout)
            .field("openai", &self.openai)
            .field("providers", &self.providers)
            .finish()
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("vision_model", &self.vision_model)
            .field("vision_timeout", &self.vision_timeout)
            .field("transcribe_timeout", &self.transcribe_timeout)
            .finish()
    }
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("google_cloud_api_key", &redact(&self.google_cloud_api_key))
            .field("azure_api_key", &redact(&self.azure_api_key))
            .field("azure_endpoint", &self.azure_endpoint)
            .field("aws_access_key_id", &redact(&self.aws_access_key_id))
            .field("aws_secret_access_key", &redact(&self.aws_secret_access_key))
            .field("aws_region", &self.aws_region)
            .finish()
    }
}
