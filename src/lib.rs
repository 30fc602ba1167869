/*!
 * # promptsync - Bidirectional prompt translation
 *
 * A Rust library for keeping two text panes in different languages in sync
 * through a translation provider, retranslating only what changed.
 *
 * ## Features
 *
 * - Two-level segmentation into paragraphs and sentence units
 * - Edit-script alignment between the previous and the current text
 * - Incremental patching: unchanged units keep their existing translation
 * - Word-level change markup for human review
 * - Full-replace mode as a fallback to per-unit patching
 * - DeepL provider plus an in-memory mock for tests and dry runs
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `sync`: Incremental synchronization machinery:
 *   - `sync::segment`: Paragraph and sentence unit segmentation
 *   - `sync::align`: Edit scripts between unit sequences
 *   - `sync::patch`: Patch planning and application
 *   - `sync::highlight`: Word-level change markup
 *   - `sync::engine`: Session state and sync orchestration
 * - `providers`: Translation provider clients:
 *   - `providers::deepl`: DeepL API client
 *   - `providers::mock`: Mock translator for tests
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod sync;

// Re-export main types for easier usage
pub use app_config::{Config, SyncMode, TranslationProvider};
pub use errors::{ProviderError, SyncError};
pub use language_utils::{get_language_name, language_codes_match, normalize_code};
pub use providers::Translator;
pub use sync::{Pane, SessionSnapshot, SyncEngine, SyncOutcome};
