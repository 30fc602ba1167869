/*!
 * Translation provider clients.
 *
 * Providers implement the [`Translator`] trait, the object-safe surface the
 * sync engine drives. Two implementations ship with the application:
 *
 * - `deepl`: DeepL REST API client
 * - `mock`: In-memory provider for tests and dry runs
 */

use std::fmt::Debug;

use async_trait::async_trait;

use crate::errors::ProviderError;

/// Common interface to a translation backend
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate `text` between the given language codes.
    ///
    /// Codes use the uppercase wire format ("EN", "KO"). Implementations
    /// return the translated text without trailing whitespace and never
    /// partially succeed: any failure is an error and nothing else.
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;

    /// Check that the backend is reachable with the configured credentials
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Short lowercase provider name for logs
    fn name(&self) -> &'static str;
}

pub mod deepl;
pub mod mock;

pub use deepl::DeepL;
pub use mock::{MockBehavior, MockTranslator};
