//! App core for the exercise visibility engine.
//!
//! Wires the store, settings, reconciler and header aggregation together and
//! runs the page-init sequence against a [`TimelinePage`].

use std::path::Path;

use tracing::{debug, info};

use crate::database::{PersistentStore, StateWriter};
use crate::managers::visibility_reconciler::VisibilityReconciler;
use crate::services::date_group_aggregator;
use crate::services::expansion::{self, ExpansionSource};
use crate::services::identity_extractor::{self, Extraction};
use crate::services::settings_engine::SettingsEngine;
use crate::types::entry::RawEntry;
use crate::types::errors::AppError;
use crate::types::settings::EngineConfig;
use crate::types::timeline::{DateGroup, RenderPlan};
use crate::types::visibility::{DecisionMap, VisibilityState};

/// The page layer the engine runs against.
///
/// Implementors scrape the rendered timeline; the engine never sees selectors.
pub trait TimelinePage: ExpansionSource {
    /// Every timeline item currently rendered, in document order.
    fn raw_entries(&self) -> Vec<RawEntry>;
    /// Date headers with the raw positions of their items.
    fn date_groups(&self) -> Vec<DateGroup>;
}

/// Last render pass, kept so toggles can re-derive headers.
#[derive(Default)]
struct Snapshot {
    extraction: Extraction,
    groups: Vec<DateGroup>,
    decisions: DecisionMap,
}

/// Central struct owning the engine for one page.
pub struct App {
    pub store: PersistentStore,
    pub settings: SettingsEngine,
    config: EngineConfig,
    reconciler: VisibilityReconciler<StateWriter>,
    snapshot: Snapshot,
}

impl App {
    /// Opens the store at `db_path` and loads configuration from its settings.
    pub async fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, AppError> {
        Self::from_store(PersistentStore::open(db_path)?).await
    }

    pub async fn open_in_memory() -> Result<Self, AppError> {
        Self::from_store(PersistentStore::open_in_memory()?).await
    }

    /// Builds the app on an existing store, reading `debug` and
    /// `initWaitTime` from the settings table.
    pub async fn from_store(store: PersistentStore) -> Result<Self, AppError> {
        let settings = SettingsEngine::new(store.clone());
        let config = settings.load_config().await;
        Self::assemble(store, settings, config)
    }

    /// Builds the app with an explicit configuration.
    ///
    /// # Errors
    /// Returns [`AppError::StateWriterTaken`] if another reconciler already
    /// owns this store's state writer.
    pub fn with_config(store: PersistentStore, config: EngineConfig) -> Result<Self, AppError> {
        let settings = SettingsEngine::new(store.clone());
        Self::assemble(store, settings, config)
    }

    fn assemble(store: PersistentStore, settings: SettingsEngine, config: EngineConfig) -> Result<Self, AppError> {
        let writer = store.take_state_writer().ok_or(AppError::StateWriterTaken)?;
        let reconciler = VisibilityReconciler::new(writer, &config);
        Ok(Self {
            store,
            settings,
            config,
            reconciler,
            snapshot: Snapshot::default(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Re-reads the settings table into the running configuration.
    pub async fn reload_config(&mut self) {
        self.config = self.settings.load_config().await;
        self.reconciler.set_debug(self.config.debug);
    }

    /// Page-init sequence: wait for the timeline, expand it fully, let it
    /// settle, then reconcile everything it rendered.
    pub async fn startup<P: TimelinePage + ?Sized>(&mut self, page: &mut P) -> RenderPlan {
        debug!(wait = ?self.config.init_wait, "Waiting before first pass");
        tokio::time::sleep(self.config.init_wait).await;

        let outcome = expansion::expand_all(page, self.config.expand_max_attempts);
        if outcome.clicks > 0 {
            tokio::time::sleep(self.config.settle_delay).await;
        }

        self.reconcile(&page.raw_entries(), page.date_groups()).await
    }

    /// Reconciles one fully expanded render pass.
    pub async fn reconcile(&mut self, raw_entries: &[RawEntry], groups: Vec<DateGroup>) -> RenderPlan {
        let extraction = identity_extractor::extract_all(raw_entries);
        let decisions = self.reconciler.reconcile(&extraction.entries).await;
        info!(
            entries = extraction.entries.len(),
            hidden = decisions.values().filter(|d| !d.is_visible()).count(),
            "Timeline reconciled"
        );
        self.snapshot = Snapshot {
            extraction,
            groups,
            decisions,
        };
        self.render_plan()
    }

    /// Applies a user edit and returns the updated plan.
    ///
    /// The new decision and header visibility are computed before the write
    /// starts; the write itself is best effort.
    pub async fn toggle(&mut self, key: &str, hide: bool) -> RenderPlan {
        let decision = self.reconciler.mutate(key, hide);
        if let Some(current) = self.snapshot.decisions.get_mut(key) {
            *current = decision;
        }
        let plan = self.render_plan();
        self.reconciler.persist().await;
        plan
    }

    /// Decisions and header visibility for the last pass.
    pub fn render_plan(&self) -> RenderPlan {
        let headers = date_group_aggregator::derive(
            &self.snapshot.groups,
            &self.snapshot.extraction,
            &self.snapshot.decisions,
        );
        RenderPlan {
            entries: self.snapshot.extraction.entries.clone(),
            decisions: self.snapshot.decisions.clone(),
            headers,
        }
    }

    pub fn state(&self) -> &VisibilityState {
        self.reconciler.state()
    }
}
