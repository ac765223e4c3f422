//! One monitoring cycle: fetch, evaluate, notify, persist.

use chrono::{DateTime, Utc};
use simwatch_adapters::html::{ElementIdExtractor, FieldExtractor};
use simwatch_types::{AlertEvent, PortSnapshot};
use tracing::{debug, error, info, warn};

use crate::data::{build_snapshot, DebouncePolicy};
use crate::notify::{deliver, message, Notifier};
use crate::source::StatusSource;
use crate::store::StateStore;

/// Outcome of a single cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleReport {
    /// The page could not be read. State was neither loaded nor saved.
    FetchFailed {
        error: String,
        auth: bool,
        notified: bool,
    },
    /// The page was read and every channel evaluated.
    Evaluated {
        snapshot: PortSnapshot,
        events: Vec<AlertEvent>,
        notified: bool,
        persisted: bool,
    },
}

impl CycleReport {
    /// Alert events emitted by the cycle.
    pub fn events(&self) -> &[AlertEvent] {
        match self {
            CycleReport::Evaluated { events, .. } => events,
            CycleReport::FetchFailed { .. } => &[],
        }
    }

    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, CycleReport::FetchFailed { .. })
    }
}

/// Watches one port of the device.
///
/// Owns everything a cycle touches, so the binary only decides how often
/// to call [`Monitor::run_cycle`].
pub struct Monitor {
    source: Box<dyn StatusSource>,
    notifier: Box<dyn Notifier>,
    store: StateStore,
    policy: DebouncePolicy,
    port: u16,
    extractor: Box<dyn FieldExtractor>,
    persist: bool,
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("source", &self.source)
            .field("notifier", &self.notifier)
            .field("store", &self.store)
            .field("policy", &self.policy)
            .field("port", &self.port)
            .field("persist", &self.persist)
            .finish_non_exhaustive()
    }
}

impl Monitor {
    pub fn new(
        source: Box<dyn StatusSource>,
        notifier: Box<dyn Notifier>,
        store: StateStore,
        policy: DebouncePolicy,
        port: u16,
    ) -> Self {
        Self {
            source,
            notifier,
            store,
            policy,
            port,
            extractor: Box::new(ElementIdExtractor),
            persist: true,
        }
    }

    /// Replace the page extractor.
    pub fn with_extractor(mut self, extractor: Box<dyn FieldExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// When set, cycles evaluate and notify but never write the state file.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.persist = !dry_run;
        self
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Run a cycle at the current time.
    pub async fn run_cycle(&self) -> CycleReport {
        self.run_cycle_at(Utc::now()).await
    }

    /// Run a cycle as if the clock read `now`.
    pub async fn run_cycle_at(&self, now: DateTime<Utc>) -> CycleReport {
        debug!(source = self.source.description(), port = self.port, "Starting cycle");

        let page = match self.source.fetch().await {
            Ok(page) => page,
            Err(e) => {
                let auth = e.is_auth();
                if auth {
                    error!(source = self.source.description(), "Device rejected credentials");
                } else {
                    error!(
                        source = self.source.description(),
                        timeout = e.is_timeout(),
                        error = %e,
                        "Failed to fetch status page"
                    );
                }
                let notified = deliver(self.notifier.as_ref(), &message::fetch_failure(&e)).await;
                return CycleReport::FetchFailed {
                    error: e.to_string(),
                    auth,
                    notified,
                };
            }
        };

        let snapshot = build_snapshot(&page, self.port, self.extractor.as_ref());
        for (key, reading) in snapshot.iter() {
            debug!(key = %key, value = %reading, "Reading");
        }

        let prior = self.store.load();
        let evaluation = self.policy.evaluate(&snapshot, &prior, now);
        if !evaluation.changed.is_empty() {
            info!(channels = ?evaluation.changed, "Channel values changed");
        }

        let notified = match message::alert_message(
            &evaluation.events,
            &snapshot,
            self.policy.grace_period,
        ) {
            Some(text) => deliver(self.notifier.as_ref(), &text).await,
            None => {
                info!("No changes or grace period not elapsed");
                false
            }
        };

        let persisted = if !self.persist {
            debug!("Dry run, state file left untouched");
            false
        } else {
            match self.store.save(&evaluation.states) {
                Ok(()) => true,
                Err(e) => {
                    error!(path = %self.store.path().display(), error = %format_args!("{e:#}"), "Failed to save state");
                    false
                }
            }
        };

        if !evaluation.events.is_empty() && !notified {
            warn!(events = evaluation.events.len(), "Alerts were not delivered");
        }

        CycleReport::Evaluated {
            snapshot,
            events: evaluation.events,
            notified,
            persisted,
        }
    }
}
