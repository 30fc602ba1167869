use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Pane A language code (ISO)
    #[serde(default = "default_pane_a_language")]
    pub pane_a_language: String,

    /// Pane B language code (ISO)
    #[serde(default = "default_pane_b_language")]
    pub pane_b_language: String,

    /// Sync behavior config
    #[serde(default)]
    pub sync: SyncConfig,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Synchronization mode applied when a pane changes
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    // @mode: Retranslate the entire pane on every edit
    Full,
    // @mode: Diff against the previous snapshot and retranslate changed sentences only
    #[default]
    Partial,
}

impl SyncMode {
    // @returns: Capitalized mode name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Full => "Full replace",
            Self::Partial => "Partial sync",
        }
    }

    // @returns: Lowercase mode identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Full => "full".to_string(),
            Self::Partial => "partial".to_string(),
        }
    }
}

// Implement Display trait for SyncMode
impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for SyncMode
impl std::str::FromStr for SyncMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "partial" => Ok(Self::Partial),
            _ => Err(anyhow!("Invalid sync mode: {}", s)),
        }
    }
}

/// Synchronization configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SyncConfig {
    /// Sync mode
    #[serde(default)]
    pub mode: SyncMode,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: DeepL REST API
    #[default]
    DeepL,
    // @provider: In-memory mock (tests and dry runs)
    Mock,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::DeepL => "DeepL",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::DeepL => "deepl".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "deepl" => Ok(Self::DeepL),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL (empty = derived from the API key tier)
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Max concurrent requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::DeepL => Self {
                provider_type: "deepl".to_string(),
                api_key: String::new(),
                endpoint: String::new(),
                concurrent_requests: default_concurrent_requests(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Mock => Self {
                provider_type: "mock".to_string(),
                api_key: String::new(),
                endpoint: String::new(),
                concurrent_requests: default_concurrent_requests(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_pane_a_language() -> String {
    "EN".to_string()
}

fn default_pane_b_language() -> String {
    "KO".to_string()
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        let _pane_a_name = crate::language_utils::get_language_name(&self.pane_a_language)?;
        let _pane_b_name = crate::language_utils::get_language_name(&self.pane_b_language)?;

        if crate::language_utils::language_codes_match(&self.pane_a_language, &self.pane_b_language) {
            return Err(anyhow!(
                "Pane languages must differ, got '{}' and '{}'",
                self.pane_a_language, self.pane_b_language
            ));
        }

        // Validate API key (the mock provider does not use one)
        if self.translation.provider == TranslationProvider::DeepL {
            let api_key = self.translation.get_api_key();
            if api_key.is_empty() {
                return Err(anyhow!(
                    "Translation API key is required for DeepL provider (config or DEEPL_API_KEY)"
                ));
            }
        }

        // Validate endpoint override if one is set
        let endpoint = self.translation.get_endpoint();
        if !endpoint.is_empty() {
            url::Url::parse(&endpoint)
                .map_err(|e| anyhow!("Invalid endpoint URL '{}': {}", endpoint, e))?;
        }

        if let Some(provider_config) = self.translation.get_active_provider_config() {
            if provider_config.concurrent_requests == 0 {
                return Err(anyhow!("concurrent_requests must be at least 1"));
            }
        }

        Ok(())
    }


}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            pane_a_language: default_pane_a_language(),
            pane_b_language: default_pane_b_language(),
            sync: SyncConfig::default(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}


impl TranslationConfig {
    pub fn optimal_concurrent_requests(&self) -> usize {
        // Check if the provider exists in the available_providers
        if let Some(provider_config) = self.get_active_provider_config() {
            return provider_config.concurrent_requests;
        }

        // Default fallback
        default_concurrent_requests()
    }

    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get a specific provider configuration by type for testing
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the API key for the active provider
    ///
    /// An empty configured key falls back to the DEEPL_API_KEY environment
    /// variable for the DeepL provider.
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        if self.provider == TranslationProvider::DeepL {
            if let Ok(key) = std::env::var("DEEPL_API_KEY") {
                return key;
            }
        }

        // Default fallback - the mock provider doesn't use API keys
        String::new()
    }

    /// Get the endpoint for the active provider
    ///
    /// Empty means the provider derives it (DeepL picks the free or paid
    /// host from the API key suffix).
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        String::new()
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.timeout_secs > 0 {
                return provider_config.timeout_secs;
            }
        }

        // Default fallback
        default_timeout_secs()
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let mut config = Self {
            provider: TranslationProvider::default(),
            available_providers: Vec::new(),
        };

        // Add default providers
        config.available_providers.push(ProviderConfig::new(TranslationProvider::DeepL));
        config.available_providers.push(ProviderConfig::new(TranslationProvider::Mock));

        config
    }
}
