/*!
 * Bidirectional sync orchestration.
 *
 * The engine owns the session state of a pane pair: the current text,
 * previous snapshot, revision counter and status of each pane. Edits enter
 * through [`SyncEngine::on_pane_edited`], which translates the change and
 * writes the result into the opposite pane.
 *
 * Concurrency model: edits are recorded immediately under a short state
 * lock, but the read-plan-translate-commit sequence runs under a single
 * async gate, so at most one sync is in flight across both panes. A pane
 * revision is bumped on every edit and on every write into the pane; a sync
 * whose recorded revision no longer matches at commit time discards its
 * result instead of overwriting newer input.
 */

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, error, info};
use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;

use crate::app_config::SyncMode;
use crate::errors::{ProviderError, SyncError};
use crate::providers::Translator;
use crate::sync::highlight::highlight_words;
use crate::sync::patch;

/// One side of the synchronized pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    A,
    B,
}

impl Pane {
    /// The opposite pane
    pub fn other(self) -> Pane {
        match self {
            Pane::A => Pane::B,
            Pane::B => Pane::A,
        }
    }
}

impl std::fmt::Display for Pane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pane::A => write!(f, "A"),
            Pane::B => write!(f, "B"),
        }
    }
}

/// Whether a pane currently has a sync in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneStatus {
    Idle,
    Syncing,
}

/// Result of a completed sync operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The translation was committed to the other pane
    Committed {
        /// Number of translate calls the sync issued
        provider_calls: usize,
    },
    /// A newer edit arrived first; this sync committed nothing
    Superseded,
}

/// Point-in-time copy of the whole session state
///
/// Used by the debug surface and by tests to assert on all four text
/// strings at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub pane_a_text: String,
    pub pane_b_text: String,
    pub pane_a_snapshot: String,
    pub pane_b_snapshot: String,
    pub pane_a_status: PaneStatus,
    pub pane_b_status: PaneStatus,
    pub mode: SyncMode,
}

/// Mutable state of one pane
#[derive(Debug)]
struct PaneSlot {
    /// Current text of the pane
    text: String,
    /// Text as of the last completed sync of this pane
    previous_snapshot: String,
    /// Bumped on every edit of this pane and on every write into it
    revision: u64,
    /// Sync status, for the debug surface
    status: PaneStatus,
}

impl PaneSlot {
    fn new() -> Self {
        Self {
            text: String::new(),
            previous_snapshot: String::new(),
            revision: 0,
            status: PaneStatus::Idle,
        }
    }

    /// Replace text and snapshot wholesale, discarding in-flight syncs
    fn load(&mut self, text: &str) {
        self.text = text.to_string();
        self.previous_snapshot = text.to_string();
        self.revision += 1;
        self.status = PaneStatus::Idle;
    }
}

#[derive(Debug)]
struct SessionState {
    a: PaneSlot,
    b: PaneSlot,
    mode: SyncMode,
}

impl SessionState {
    fn pane(&self, pane: Pane) -> &PaneSlot {
        match pane {
            Pane::A => &self.a,
            Pane::B => &self.b,
        }
    }

    fn pane_mut(&mut self, pane: Pane) -> &mut PaneSlot {
        match pane {
            Pane::A => &mut self.a,
            Pane::B => &mut self.b,
        }
    }
}

/// Engine keeping a pane pair in sync through a translation provider
#[derive(Debug)]
pub struct SyncEngine {
    /// Provider used for all unit translations
    translator: Arc<dyn Translator>,
    /// Language code of pane A, uppercase wire format
    pane_a_language: String,
    /// Language code of pane B, uppercase wire format
    pane_b_language: String,
    /// Bound on parallel translate calls within one sync
    concurrent_requests: usize,
    /// Session state, held only for short non-await sections
    state: Mutex<SessionState>,
    /// Serializes the read-translate-commit sequence across both panes
    sync_gate: AsyncMutex<()>,
}

impl SyncEngine {
    /// Create an engine with the default translation concurrency
    pub fn new(
        translator: Arc<dyn Translator>,
        pane_a_language: impl Into<String>,
        pane_b_language: impl Into<String>,
        mode: SyncMode,
    ) -> Self {
        Self::new_with_config(translator, pane_a_language, pane_b_language, mode, 4)
    }

    /// Create an engine with an explicit bound on parallel translate calls
    pub fn new_with_config(
        translator: Arc<dyn Translator>,
        pane_a_language: impl Into<String>,
        pane_b_language: impl Into<String>,
        mode: SyncMode,
        concurrent_requests: usize,
    ) -> Self {
        SyncEngine {
            translator,
            pane_a_language: pane_a_language.into(),
            pane_b_language: pane_b_language.into(),
            concurrent_requests,
            state: Mutex::new(SessionState {
                a: PaneSlot::new(),
                b: PaneSlot::new(),
                mode,
            }),
            sync_gate: AsyncMutex::new(()),
        }
    }

    /// Seed both panes without translating anything.
    ///
    /// Texts and snapshots are set to the given values, so the next edit of
    /// either pane diffs against this baseline. Any in-flight sync is
    /// discarded at its commit.
    pub fn preload(&self, pane_a_text: &str, pane_b_text: &str) {
        let mut state = self.state.lock();
        state.a.load(pane_a_text);
        state.b.load(pane_b_text);
        info!(
            "Session preloaded: pane A {} chars, pane B {} chars",
            pane_a_text.len(),
            pane_b_text.len()
        );
    }

    /// Handle one edit of a pane and sync it into the other pane.
    ///
    /// Returns [`SyncOutcome::Superseded`] when a newer edit of the same
    /// pane (or a sync writing into it) arrived before this one could
    /// commit. On a provider error nothing is committed: all four state
    /// strings keep their pre-sync values.
    pub async fn on_pane_edited(
        &self,
        pane: Pane,
        new_text: &str,
    ) -> Result<SyncOutcome, SyncError> {
        // Record the edit before queueing on the gate, so syncs already in
        // flight for this pane can detect that they are stale.
        let my_revision = {
            let mut state = self.state.lock();
            let slot = state.pane_mut(pane);
            slot.revision += 1;
            slot.revision
        };

        debug!("Pane {} edited, {} chars", pane, new_text.len());

        let _gate = self.sync_gate.lock().await;

        // A burst of edits queues one sync each; only the newest runs.
        let (previous_snapshot, existing_translated, mode) = {
            let mut state = self.state.lock();
            if state.pane(pane).revision != my_revision {
                debug!("Pane {} edit superseded before translation", pane);
                return Ok(SyncOutcome::Superseded);
            }
            state.pane_mut(pane).status = PaneStatus::Syncing;
            (
                state.pane(pane).previous_snapshot.clone(),
                state.pane(pane.other()).text.clone(),
                state.mode,
            )
        };

        let (source_language, target_language) = self.direction(pane);
        let result = match mode {
            SyncMode::Full => self.translate_full(new_text, source_language, target_language).await,
            SyncMode::Partial => {
                self.translate_partial(
                    &previous_snapshot,
                    new_text,
                    &existing_translated,
                    source_language,
                    target_language,
                )
                .await
            }
        };

        let (translated, provider_calls) = match result {
            Ok(translated) => translated,
            Err(provider_error) => {
                self.state.lock().pane_mut(pane).status = PaneStatus::Idle;
                error!("Sync of pane {} failed: {}", pane, provider_error);
                return Err(SyncError::Translation(provider_error));
            }
        };

        let mut state = self.state.lock();
        if state.pane(pane).revision != my_revision {
            state.pane_mut(pane).status = PaneStatus::Idle;
            info!("Discarding stale sync result for pane {}", pane);
            return Ok(SyncOutcome::Superseded);
        }

        {
            let edited = state.pane_mut(pane);
            edited.text = new_text.to_string();
            edited.previous_snapshot = new_text.to_string();
            edited.status = PaneStatus::Idle;
        }
        {
            let other = state.pane_mut(pane.other());
            other.text = translated;
            // Queued syncs of the other pane captured a baseline that
            // predates this write; the bump makes them discard.
            other.revision += 1;
        }

        info!(
            "Pane {} synced into pane {}: {} translate call(s)",
            pane,
            pane.other(),
            provider_calls
        );
        Ok(SyncOutcome::Committed { provider_calls })
    }

    /// Switch the sync mode for subsequent edits
    pub fn set_mode(&self, mode: SyncMode) {
        let mut state = self.state.lock();
        if state.mode != mode {
            info!("Sync mode changed from {} to {}", state.mode, mode);
            state.mode = mode;
        }
    }

    /// Currently configured sync mode
    pub fn mode(&self) -> SyncMode {
        self.state.lock().mode
    }

    /// Current text of a pane
    pub fn pane_text(&self, pane: Pane) -> String {
        self.state.lock().pane(pane).text.clone()
    }

    /// Text of a pane as of its last completed sync
    pub fn previous_snapshot(&self, pane: Pane) -> String {
        self.state.lock().pane(pane).previous_snapshot.clone()
    }

    /// Word-level markup of the change a pane accumulated since its last
    /// completed sync
    pub fn change_markup(&self, pane: Pane) -> String {
        let (previous, current) = {
            let state = self.state.lock();
            let slot = state.pane(pane);
            (slot.previous_snapshot.clone(), slot.text.clone())
        };
        highlight_words(&previous, &current)
    }

    /// Copy of the full session state
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            pane_a_text: state.a.text.clone(),
            pane_b_text: state.b.text.clone(),
            pane_a_snapshot: state.a.previous_snapshot.clone(),
            pane_b_snapshot: state.b.previous_snapshot.clone(),
            pane_a_status: state.a.status,
            pane_b_status: state.b.status,
            mode: state.mode,
        }
    }

    /// Source and target language for an edit of the given pane
    fn direction(&self, pane: Pane) -> (&str, &str) {
        match pane {
            Pane::A => (self.pane_a_language.as_str(), self.pane_b_language.as_str()),
            Pane::B => (self.pane_b_language.as_str(), self.pane_a_language.as_str()),
        }
    }

    /// Full mode: translate the whole text in one call
    async fn translate_full(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<(String, usize), ProviderError> {
        if text.trim().is_empty() {
            return Ok((String::new(), 0));
        }

        let translated = self
            .translator
            .translate(text, source_language, target_language)
            .await?;
        Ok((translated, 1))
    }

    /// Partial mode: plan a patch and translate only the scheduled units
    async fn translate_partial(
        &self,
        previous_snapshot: &str,
        new_text: &str,
        existing_translated: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<(String, usize), ProviderError> {
        let plan = patch::plan(previous_snapshot, new_text, existing_translated);
        let provider_calls = plan.pending_units().len();

        if plan.is_noop() {
            debug!("Edit requires no retranslation");
        }

        let texts: Vec<String> = plan
            .pending_units()
            .iter()
            .map(|unit| unit.text.clone())
            .collect();
        let translations = self
            .translate_units(texts, source_language, target_language)
            .await?;

        Ok((plan.apply(translations), provider_calls))
    }

    /// Translate unit texts with bounded concurrency, preserving order.
    ///
    /// The first failure aborts the whole batch, so a partially translated
    /// plan is never applied.
    async fn translate_units(
        &self,
        texts: Vec<String>,
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let concurrency = self.concurrent_requests.max(1);
        let requests: Vec<_> = texts
            .into_iter()
            .map(|text| {
                let translator = Arc::clone(&self.translator);
                let source = source_language.to_string();
                let target = target_language.to_string();
                async move { translator.translate(&text, &source, &target).await }
            })
            .collect();

        stream::iter(requests)
            .buffered(concurrency)
            .try_collect()
            .await
    }
}
