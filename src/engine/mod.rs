//! Aggregation engine - the cached ledger snapshot and its refresh contract.
//!
//! [`LedgerEngine`] owns the only mutable state in the read path: the most
//! recently applied [`Snapshot`] and the outcome of the latest reload. A reload
//! fetches donations, expenses and settings concurrently and swaps in a new
//! snapshot only once all three have arrived, so readers never observe a
//! partially refreshed view.
//!
//! Reloads may overlap. Each takes a sequence number when it starts, and its
//! result (success or failure) is applied only if no later-started reload has
//! already been applied. Late results from older reloads are dropped.

/// Admin writes followed by a reload
pub mod actions;
/// Background refresh scheduler
pub mod refresh;
/// Immutable ledger snapshot
pub mod snapshot;

pub use refresh::{RefreshHandle, spawn_refresh};
pub use snapshot::Snapshot;

use crate::{
    core::records::{Donation, Expense, FestivalSettings},
    errors::{Error, Result},
    store::LedgerStore,
};
use chrono::{DateTime, Utc};
use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// What happened to a reload's result.
#[derive(Clone, Debug, PartialEq)]
pub enum ReloadOutcome {
    /// The result became the current snapshot
    Applied(Arc<Snapshot>),
    /// A later-started reload had already been applied; this result was dropped
    Superseded,
}

/// The most recent reload failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReloadFailure {
    /// Sequence number of the failed reload
    pub sequence: u64,
    /// Rendered error
    pub message: String,
    /// When the failure was recorded
    pub at: DateTime<Utc>,
}

/// What readers should show.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    /// No data yet and no failure yet
    Loading,
    /// No data yet and the last attempt failed
    Unavailable(ReloadFailure),
    /// Data present and the last attempt succeeded
    Ready(Arc<Snapshot>),
    /// Data present but the last attempt failed; the snapshot is the last good one
    Stale {
        /// Last good snapshot
        snapshot: Arc<Snapshot>,
        /// Why the newer reload failed
        failure: ReloadFailure,
    },
}

impl LoadState {
    /// The snapshot to render, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        match self {
            Self::Ready(snapshot) | Self::Stale { snapshot, .. } => Some(snapshot),
            Self::Loading | Self::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Default)]
struct EngineState {
    snapshot: Option<Arc<Snapshot>>,
    applied_sequence: u64,
    last_failure: Option<ReloadFailure>,
}

type Fetched = (Vec<Donation>, Vec<Expense>, Option<FestivalSettings>);

/// Cached ledger snapshot over a [`LedgerStore`].
pub struct LedgerEngine {
    store: Arc<dyn LedgerStore>,
    fetch_timeout: Duration,
    next_sequence: AtomicU64,
    state: RwLock<EngineState>,
}

impl std::fmt::Debug for LedgerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerEngine")
            .field("fetch_timeout", &self.fetch_timeout)
            .field("next_sequence", &self.next_sequence)
            .finish_non_exhaustive()
    }
}

impl LedgerEngine {
    /// Creates an engine with no snapshot. Call [`reload`](Self::reload) or
    /// start the refresh scheduler to populate it.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>, fetch_timeout: Duration) -> Self {
        Self {
            store,
            fetch_timeout,
            next_sequence: AtomicU64::new(0),
            state: RwLock::new(EngineState::default()),
        }
    }

    /// Fetches everything and, unless superseded, replaces the snapshot.
    ///
    /// # Errors
    /// The first fetch error, [`Error::Timeout`], or
    /// [`Error::AmountOverflow`] from the summary, when this reload is the
    /// newest to resolve. The previous snapshot stays in place. A failure from a
    /// superseded reload is dropped and reported as
    /// [`ReloadOutcome::Superseded`].
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<ReloadOutcome> {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Reload {} started", sequence);

        let fetched = self.fetch_all().await;

        let mut state = self.state.write().await;
        if sequence <= state.applied_sequence {
            debug!(
                "Reload {} superseded by {}, dropping its result",
                sequence, state.applied_sequence
            );
            return Ok(ReloadOutcome::Superseded);
        }
        state.applied_sequence = sequence;

        let built = fetched.and_then(|(donations, expenses, settings)| {
            Snapshot::new(sequence, donations, expenses, settings)
        });
        match built {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                info!(
                    "Reload {} applied: {} donations, {} expenses, balance {}",
                    sequence,
                    snapshot.summary.donation_count,
                    snapshot.summary.expense_count,
                    snapshot.summary.remaining_balance
                );
                state.snapshot = Some(Arc::clone(&snapshot));
                state.last_failure = None;
                Ok(ReloadOutcome::Applied(snapshot))
            }
            Err(err) => {
                warn!("Reload {} failed, keeping previous snapshot: {}", sequence, err);
                state.last_failure = Some(ReloadFailure {
                    sequence,
                    message: err.to_string(),
                    at: Utc::now(),
                });
                Err(err)
            }
        }
    }

    /// Current load state.
    pub async fn state(&self) -> LoadState {
        let state = self.state.read().await;
        match (&state.snapshot, &state.last_failure) {
            (None, None) => LoadState::Loading,
            (None, Some(failure)) => LoadState::Unavailable(failure.clone()),
            (Some(snapshot), None) => LoadState::Ready(Arc::clone(snapshot)),
            (Some(snapshot), Some(failure)) => LoadState::Stale {
                snapshot: Arc::clone(snapshot),
                failure: failure.clone(),
            },
        }
    }

    /// The last applied snapshot, regardless of later failures.
    pub async fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.state.read().await.snapshot.clone()
    }

    async fn fetch_all(&self) -> Result<Fetched> {
        tokio::try_join!(
            self.bounded("list donations", self.store.list_donations()),
            self.bounded("list expenses", self.store.list_expenses()),
            self.bounded("get settings", self.store.get_settings()),
        )
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fetch: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::time::timeout(self.fetch_timeout, fetch)
            .await
            .map_err(|_| Error::Timeout { operation })?
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::money::Money;
    use crate::test_utils::*;

    fn engine_over(store: &Arc<ScriptedStore>) -> LedgerEngine {
        let store: Arc<dyn LedgerStore> = Arc::clone(store) as Arc<dyn LedgerStore>;
        LedgerEngine::new(store, Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_initial_state_is_loading() {
        let engine = engine_over(&Arc::new(ScriptedStore::new()));
        assert_eq!(engine.state().await, LoadState::Loading);
        assert!(engine.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_reload_builds_summary() -> Result<()> {
        init_test_tracing();
        let mut anonymous = sample_donation("d-2", Money::from_major_units(1000));
        anonymous.is_anonymous = true;
        let store = Arc::new(ScriptedStore::with_records(
            vec![sample_donation("d-1", Money::from_major_units(500)), anonymous],
            vec![sample_expense("e-1", Money::from_major_units(300))],
            Some(sample_settings(2000)),
        ));
        let engine = engine_over(&store);

        let ReloadOutcome::Applied(snapshot) = engine.reload().await? else {
            panic!("first reload should apply");
        };
        assert_eq!(snapshot.summary.total_donations, Money::from_major_units(1500));
        assert_eq!(snapshot.summary.total_expenses, Money::from_major_units(300));
        assert_eq!(snapshot.summary.remaining_balance, Money::from_major_units(1200));
        assert_eq!(snapshot.summary.donation_count, 2);
        assert_eq!(snapshot.summary.expense_count, 1);
        assert_eq!(snapshot.donations[1].display_name(), "Anonymous Donor");
        assert!(matches!(engine.state().await, LoadState::Ready(_)));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_started_reload_wins() -> Result<()> {
        init_test_tracing();
        let store = Arc::new(ScriptedStore::new());
        let older = vec![sample_donation("d-1", Money::from_major_units(500))];
        let newer = vec![
            sample_donation("d-1", Money::from_major_units(500)),
            sample_donation("d-2", Money::from_major_units(1000)),
        ];
        // First reload resolves after the second one.
        store.script_donations(Duration::from_millis(200), older);
        store.script_donations(Duration::from_millis(10), newer);
        let engine = engine_over(&store);

        let (first, second) = tokio::join!(engine.reload(), async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            engine.reload().await
        });

        assert_eq!(first?, ReloadOutcome::Superseded);
        assert!(matches!(second?, ReloadOutcome::Applied(_)));
        let snapshot = engine.snapshot().await.unwrap();
        assert_eq!(snapshot.summary.donation_count, 2);
        assert_eq!(snapshot.summary.total_donations, Money::from_major_units(1500));
        assert_eq!(snapshot.sequence, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_reload_after_success_is_stale() -> Result<()> {
        init_test_tracing();
        let store = Arc::new(ScriptedStore::with_records(
            vec![sample_donation("d-1", Money::from_major_units(500))],
            vec![],
            None,
        ));
        let engine = engine_over(&store);
        engine.reload().await?;
        let good = engine.snapshot().await.unwrap();

        store.fail_next_donations(Duration::ZERO);
        assert!(matches!(engine.reload().await, Err(Error::Database(_))));

        match engine.state().await {
            LoadState::Stale { snapshot, failure } => {
                assert_eq!(snapshot, good);
                assert_eq!(failure.sequence, 2);
                assert!(failure.message.contains("connection reset"));
            }
            other => panic!("expected Stale, got {other:?}"),
        }

        // A later success clears the failure.
        engine.reload().await?;
        assert!(matches!(engine.state().await, LoadState::Ready(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_first_reload_is_unavailable() {
        let store = Arc::new(ScriptedStore::new());
        store.fail_next_donations(Duration::ZERO);
        let engine = engine_over(&store);

        assert!(engine.reload().await.is_err());
        let state = engine.state().await;
        assert!(matches!(state, LoadState::Unavailable(_)));
        assert!(state.snapshot().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_fetch_times_out() -> Result<()> {
        let store = Arc::new(ScriptedStore::with_records(
            vec![sample_donation("d-1", Money::from_major_units(1))],
            vec![],
            None,
        ));
        let engine = engine_over(&store);
        engine.reload().await?;

        store.script_expenses(Duration::from_secs(60), vec![]);
        let result = engine.reload().await;
        assert!(matches!(
            result,
            Err(Error::Timeout {
                operation: "list expenses"
            })
        ));
        assert!(matches!(engine.state().await, LoadState::Stale { .. }));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_settings_fetch_fails_whole_reload() -> Result<()> {
        let store = Arc::new(ScriptedStore::with_records(
            vec![sample_donation("d-1", Money::from_major_units(500))],
            vec![sample_expense("e-1", Money::from_major_units(200))],
            Some(sample_settings(2000)),
        ));
        let engine = engine_over(&store);
        engine.reload().await?;
        let good = engine.snapshot().await.unwrap();

        // Donations changed, but the settings read stalls: nothing of this reload lands.
        store.set_donations(vec![]);
        store.script_settings(Duration::from_secs(60), None);
        assert!(matches!(
            engine.reload().await,
            Err(Error::Timeout {
                operation: "get settings"
            })
        ));
        match engine.state().await {
            LoadState::Stale { snapshot, failure } => {
                assert_eq!(snapshot, good);
                assert_eq!(snapshot.summary.donation_count, 1);
                assert!(snapshot.settings.is_some());
                assert!(failure.message.contains("get settings"));
            }
            other => panic!("expected Stale, got {other:?}"),
        }

        store.fail_next_settings(Duration::ZERO);
        assert!(matches!(engine.reload().await, Err(Error::Database(_))));
        assert_eq!(engine.snapshot().await.unwrap(), good);
        Ok(())
    }

    #[tokio::test]
    async fn test_overflowing_totals_fail_the_reload() -> Result<()> {
        let huge = Money::from_minor(i64::MAX / 2 + 1);
        let store = Arc::new(ScriptedStore::with_records(
            vec![sample_donation("d-1", huge), sample_donation("d-2", huge)],
            vec![],
            None,
        ));
        let engine = engine_over(&store);

        assert!(matches!(
            engine.reload().await,
            Err(Error::AmountOverflow {
                context: "total donations"
            })
        ));
        assert!(matches!(engine.state().await, LoadState::Unavailable(_)));

        store.set_donations(vec![sample_donation("d-1", Money::from_major_units(5))]);
        engine.reload().await?;
        let snapshot = engine.snapshot().await.unwrap();
        assert_eq!(snapshot.summary.total_donations, Money::from_major_units(5));
        assert!(matches!(engine.state().await, LoadState::Ready(_)));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_failure_from_superseded_reload_is_dropped() -> Result<()> {
        let store = Arc::new(ScriptedStore::new());
        store.fail_next_donations(Duration::from_millis(100));
        store.script_donations(
            Duration::from_millis(5),
            vec![sample_donation("d-1", Money::from_major_units(1))],
        );
        let engine = engine_over(&store);

        let (first, second) = tokio::join!(engine.reload(), async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            engine.reload().await
        });

        assert_eq!(first?, ReloadOutcome::Superseded);
        assert!(matches!(second?, ReloadOutcome::Applied(_)));
        assert!(matches!(engine.state().await, LoadState::Ready(_)));
        Ok(())
    }
}
