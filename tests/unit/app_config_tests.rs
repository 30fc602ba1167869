/*!
 * Tests for application configuration functionality
 */

use promptsync::app_config::{
    Config, LogLevel, ProviderConfig, SyncMode, TranslationProvider,
};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    // Test default values
    assert_eq!(config.pane_a_language, "EN");
    assert_eq!(config.pane_b_language, "KO");
    assert_eq!(config.sync.mode, SyncMode::Partial);
    assert_eq!(config.translation.provider, TranslationProvider::DeepL);
    assert_eq!(config.log_level, LogLevel::Info);

    // Test provider config values
    let deepl_config = config
        .translation
        .get_provider_config(&TranslationProvider::DeepL)
        .expect("DeepL provider config should exist");
    assert_eq!(deepl_config.concurrent_requests, 4); // default_concurrent_requests()
    assert_eq!(deepl_config.timeout_secs, 30); // default_timeout_secs()
    assert_eq!(deepl_config.api_key, "");
    assert_eq!(deepl_config.endpoint, "");

    // Both providers are listed
    assert!(config
        .translation
        .get_provider_config(&TranslationProvider::Mock)
        .is_some());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    // Start with a valid config on the mock provider (no API key needed)
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;
    assert!(config.validate().is_ok());

    // Invalid pane A language
    config.pane_a_language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.pane_a_language = "EN".to_string();

    // Empty pane B language
    config.pane_b_language = "".to_string();
    assert!(config.validate().is_err());
    config.pane_b_language = "KO".to_string();

    // Matching pane languages, case and region insensitive
    config.pane_b_language = "en-US".to_string();
    assert!(config.validate().is_err());
    config.pane_b_language = "KO".to_string();

    // Invalid endpoint override
    if let Some(provider) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "mock")
    {
        provider.endpoint = "not a url".to_string();
    }
    assert!(config.validate().is_err());
    if let Some(provider) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "mock")
    {
        provider.endpoint = "http://localhost:8080".to_string();
    }
    assert!(config.validate().is_ok());

    // Zero concurrent requests
    if let Some(provider) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "mock")
    {
        provider.concurrent_requests = 0;
    }
    assert!(config.validate().is_err());
}

/// Test the API key lookup and its environment fallback
///
/// All DEEPL_API_KEY manipulation lives in this single test so parallel
/// test execution cannot race on the variable.
#[test]
fn test_get_api_key_withConfigAndEnvironment_shouldPreferConfigValue() {
    let mut config = Config::default();

    unsafe { std::env::remove_var("DEEPL_API_KEY") };
    assert_eq!(config.translation.get_api_key(), "");
    // DeepL without any key fails validation
    assert!(config.validate().is_err());

    // Environment fallback
    unsafe { std::env::set_var("DEEPL_API_KEY", "env-key:fx") };
    assert_eq!(config.translation.get_api_key(), "env-key:fx");
    assert!(config.validate().is_ok());

    // A configured key wins over the environment
    if let Some(provider) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "deepl")
    {
        provider.api_key = "config-key".to_string();
    }
    assert_eq!(config.translation.get_api_key(), "config-key");
    unsafe { std::env::remove_var("DEEPL_API_KEY") };

    // The mock provider never needs a key
    config.translation.provider = TranslationProvider::Mock;
    assert!(config.validate().is_ok());
}

/// Test accessor fallbacks when the active provider is not listed
#[test]
fn test_translationConfig_withoutActiveProviderEntry_shouldFallBackToDefaults() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;
    config.translation.available_providers.clear();

    assert!(config.translation.get_active_provider_config().is_none());
    assert_eq!(config.translation.optimal_concurrent_requests(), 4);
    assert_eq!(config.translation.get_timeout_secs(), 30);
    assert_eq!(config.translation.get_endpoint(), "");
}

/// Test provider config construction
#[test]
fn test_providerConfig_new_shouldUseProviderIdentifier() {
    let deepl_config = ProviderConfig::new(TranslationProvider::DeepL);
    assert_eq!(deepl_config.provider_type, "deepl");

    let mock_config = ProviderConfig::new(TranslationProvider::Mock);
    assert_eq!(mock_config.provider_type, "mock");
}

/// Test serialization round trip
#[test]
fn test_config_serializedAndReloaded_shouldRoundTrip() {
    let mut config = Config::default();
    config.pane_a_language = "DE".to_string();
    config.sync.mode = SyncMode::Full;
    config.log_level = LogLevel::Debug;

    let json = serde_json::to_string_pretty(&config).unwrap();
    let reloaded: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(reloaded.pane_a_language, "DE");
    assert_eq!(reloaded.sync.mode, SyncMode::Full);
    assert_eq!(reloaded.log_level, LogLevel::Debug);
}

/// Test that missing fields fall back to defaults when deserializing
#[test]
fn test_config_fromPartialJson_shouldFillDefaults() {
    let json = r#"{ "translation": { "provider": "mock" } }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.pane_a_language, "EN");
    assert_eq!(config.pane_b_language, "KO");
    assert_eq!(config.sync.mode, SyncMode::Partial);
    assert_eq!(config.translation.provider, TranslationProvider::Mock);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test loading a configuration file from disk
#[test]
fn test_config_loadedFromFile_shouldParse() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let config_json = r#"{
    "pane_a_language": "EN",
    "pane_b_language": "KO",
    "sync": { "mode": "full" },
    "translation": { "provider": "mock", "available_providers": [] },
    "log_level": "debug"
}"#;
    let path = common::create_test_file(&dir, "conf.json", config_json).unwrap();

    let file = std::fs::File::open(path).unwrap();
    let config: Config = serde_json::from_reader(std::io::BufReader::new(file)).unwrap();

    assert_eq!(config.sync.mode, SyncMode::Full);
    assert_eq!(config.log_level, LogLevel::Debug);
}

/// Test string conversions for sync modes and providers
#[test]
fn test_enumConversions_shouldRoundTripThroughStrings() {
    assert_eq!("full".parse::<SyncMode>().unwrap(), SyncMode::Full);
    assert_eq!("PARTIAL".parse::<SyncMode>().unwrap(), SyncMode::Partial);
    assert!("half".parse::<SyncMode>().is_err());
    assert_eq!(SyncMode::Full.to_string(), "full");
    assert_eq!(SyncMode::Partial.display_name(), "Partial sync");

    assert_eq!(
        "deepl".parse::<TranslationProvider>().unwrap(),
        TranslationProvider::DeepL
    );
    assert_eq!(
        "Mock".parse::<TranslationProvider>().unwrap(),
        TranslationProvider::Mock
    );
    assert!("chatgpt".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::DeepL.to_string(), "deepl");
    assert_eq!(TranslationProvider::DeepL.display_name(), "DeepL");
}
