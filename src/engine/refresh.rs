//! Background refresh scheduler.
//!
//! Two producers, the store's change feed and a polling interval, raise the
//! same trigger. A single consumer waits on the trigger and runs
//! [`LedgerEngine::reload`]. The trigger is a [`Notify`] permit, so any number
//! of triggers raised while a reload is in flight collapse into one follow-up
//! reload.

use super::LedgerEngine;
use crate::store::{ChangeNotice, ChangeSubscription};
use std::{sync::Arc, time::Duration};
use tokio::{sync::Notify, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, error, info, trace, warn};

/// Owns the scheduler tasks. Dropping the handle stops them.
#[derive(Debug)]
pub struct RefreshHandle {
    trigger: Arc<Notify>,
    tasks: Vec<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Asks for a reload as soon as the consumer is free.
    pub fn request_refresh(&self) {
        self.trigger.notify_one();
    }

    /// Stops the producers and the consumer.
    pub fn shutdown(mut self) {
        self.abort_all();
        info!("Refresh scheduler stopped");
    }

    fn abort_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.abort_all();
    }
}

/// Starts the scheduler. The first poll tick fires immediately, so the engine
/// is loaded without waiting a full interval.
#[must_use]
pub fn spawn_refresh(
    engine: Arc<LedgerEngine>,
    changes: ChangeSubscription,
    poll_interval: Duration,
) -> RefreshHandle {
    let trigger = Arc::new(Notify::new());

    let consumer = tokio::spawn(run_reloads(engine, Arc::clone(&trigger)));
    let feed = tokio::spawn(forward_changes(changes, Arc::clone(&trigger)));
    let poller = tokio::spawn(poll(poll_interval, Arc::clone(&trigger)));

    info!(
        "Refresh scheduler started (poll every {}s)",
        poll_interval.as_secs()
    );
    RefreshHandle {
        trigger,
        tasks: vec![consumer, feed, poller],
    }
}

async fn run_reloads(engine: Arc<LedgerEngine>, trigger: Arc<Notify>) {
    loop {
        trigger.notified().await;
        // Failures are recorded by the engine; the loop keeps going.
        match engine.reload().await {
            Ok(_) => {}
            Err(e) if e.is_transient() => warn!("Background reload failed: {}", e),
            Err(e) => error!("Background reload rejected the stored data: {}", e),
        }
    }
}

async fn forward_changes(mut changes: ChangeSubscription, trigger: Arc<Notify>) {
    while let Some(notice) = changes.recv().await {
        match notice {
            ChangeNotice::Changed(event) => trace!("Change received: {:?}", event),
            ChangeNotice::Missed(count) => debug!("Missed {} change events", count),
        }
        trigger.notify_one();
    }
    warn!("Change feed closed; relying on polling only");
}

async fn poll(period: Duration, trigger: Arc<Notify>) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        trace!("Poll tick");
        trigger.notify_one();
    }
}
