//! Visibility Reconciler.
//!
//! Sole owner of the in-memory [`VisibilityState`] and of the store's write
//! path. Each page load runs [`VisibilityReconciler::reconcile`] once; each
//! user edit goes through [`VisibilityReconciler::toggle`] (or the
//! `mutate` + `persist` pair when the caller must render in between).
//!
//! Storage is best effort: a failed load means nothing is hidden, a failed
//! save is logged and the in-memory decision stands.

use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::database::StateStoreTrait;
use crate::types::entry::Entry;
use crate::types::settings::EngineConfig;
use crate::types::visibility::{Decision, DecisionMap, VisibilityState};

pub struct VisibilityReconciler<S: StateStoreTrait> {
    store: S,
    state: VisibilityState,
    /// Set when the last load failed; prune then leaves storage untouched.
    load_failed: bool,
    debug: bool,
}

impl<S: StateStoreTrait> VisibilityReconciler<S> {
    /// Creates a reconciler with an empty in-memory state. Call
    /// [`reconcile`](Self::reconcile) or [`load`](Self::load) before use.
    pub fn new(store: S, config: &EngineConfig) -> Self {
        Self {
            store,
            state: VisibilityState::new(),
            load_failed: false,
            debug: config.debug,
        }
    }

    /// Replaces the in-memory state with the stored one.
    pub async fn load(&mut self) -> &VisibilityState {
        self.state = match self.store.load().await {
            Ok(state) => {
                self.load_failed = false;
                state
            }
            Err(e) => {
                warn!(error = %e, "Failed to load visibility state, showing everything");
                self.load_failed = true;
                VisibilityState::new()
            }
        };
        if self.debug {
            let hidden: Vec<&str> = self.state.hidden_keys().collect();
            debug!(?hidden, "Loaded visibility state");
        }
        &self.state
    }

    /// Decision for every entry, from the in-memory state only.
    pub fn apply(&self, entries: &[Entry]) -> DecisionMap {
        entries
            .iter()
            .map(|entry| (entry.unique_key.clone(), self.state.decision(&entry.unique_key)))
            .collect()
    }

    /// Drops every stored key not rendered in this pass and persists the
    /// result, even when nothing changed. Returns the number of dropped keys.
    ///
    /// After a failed load the in-memory state is not the stored one, so the
    /// write is skipped rather than overwriting stored decisions with nothing.
    pub async fn prune(&mut self, entries: &[Entry]) -> usize {
        let active: HashSet<&str> = entries.iter().map(|e| e.unique_key.as_str()).collect();
        let dropped = self.state.retain_active(&active);
        if dropped > 0 {
            info!(dropped, kept = self.state.len(), "Pruned stale visibility keys");
        }
        if self.load_failed {
            warn!("Skipping prune write after failed load");
        } else {
            self.persist().await;
        }
        dropped
    }

    /// Load, apply, prune and persist for one fully expanded render pass.
    pub async fn reconcile(&mut self, entries: &[Entry]) -> DecisionMap {
        self.load().await;
        let decisions = self.apply(entries);
        self.prune(entries).await;
        if self.debug {
            for (key, decision) in &decisions {
                debug!(key = %key, ?decision, "Applied decision");
            }
        }
        decisions
    }

    /// Updates the in-memory state for a user edit without touching storage.
    ///
    /// Hiding records `false`; un-hiding deletes the key.
    pub fn mutate(&mut self, key: &str, hide: bool) -> Decision {
        if hide {
            self.state.hide(key);
        } else {
            self.state.show(key);
        }
        if self.debug {
            debug!(key, hide, "Visibility toggled");
        }
        self.state.decision(key)
    }

    /// Writes the whole in-memory state. Failures are logged and swallowed.
    pub async fn persist(&self) {
        if let Err(e) = self.store.save(&self.state).await {
            error!(error = %e, "Failed to save visibility state");
        }
    }

    /// [`mutate`](Self::mutate) followed by [`persist`](Self::persist).
    pub async fn toggle(&mut self, key: &str, hide: bool) -> Decision {
        let decision = self.mutate(key, hide);
        self.persist().await;
        decision
    }

    pub fn decision(&self, key: &str) -> Decision {
        self.state.decision(key)
    }

    pub fn state(&self) -> &VisibilityState {
        &self.state
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }
}
