/*!
 * Error types for the promptsync application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting or quota exhaustion
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur during a sync operation
///
/// A sync either commits completely or not at all: when any variant of this
/// error is returned, both panes and both snapshots still hold their
/// pre-sync values.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A unit translation failed, aborting the whole sync
    #[error("Translation failed: {0}")]
    Translation(#[from] ProviderError),
}
