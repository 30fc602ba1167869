/*!
 * Tests for error types and conversions
 */

use promptsync::errors::{ProviderError, SyncError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_providerError_parseError_shouldDisplayCorrectly() {
    let error = ProviderError::ParseError("Invalid JSON".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Failed to parse API response"));
    assert!(display.contains("Invalid JSON"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 456,
        message: "Quota exceeded".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("456"));
    assert!(display.contains("Quota exceeded"));
}

#[test]
fn test_providerError_connectionError_shouldDisplayCorrectly() {
    let error = ProviderError::ConnectionError("Host unreachable".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Connection error"));
    assert!(display.contains("Host unreachable"));
}

#[test]
fn test_providerError_rateLimitExceeded_shouldDisplayCorrectly() {
    let error = ProviderError::RateLimitExceeded("Retry after 60s".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Rate limit exceeded"));
    assert!(display.contains("Retry after 60s"));
}

#[test]
fn test_providerError_authenticationError_shouldDisplayCorrectly() {
    let error = ProviderError::AuthenticationError("Invalid API key".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Authentication error"));
    assert!(display.contains("Invalid API key"));
}

#[test]
fn test_syncError_fromProviderError_shouldWrapCorrectly() {
    let provider_error = ProviderError::RequestFailed("Test error".to_string());
    let sync_error: SyncError = provider_error.into();
    let display = format!("{}", sync_error);
    assert!(display.contains("Translation failed"));
    assert!(display.contains("Test error"));
}

#[test]
fn test_providerError_debug_shouldBeImplemented() {
    let error = ProviderError::RequestFailed("test".to_string());
    let debug = format!("{:?}", error);
    assert!(debug.contains("RequestFailed"));
}

#[test]
fn test_syncError_debug_shouldBeImplemented() {
    let provider_error = ProviderError::ParseError("test".to_string());
    let sync_error: SyncError = provider_error.into();
    let debug = format!("{:?}", sync_error);
    assert!(debug.contains("Translation"));
}
