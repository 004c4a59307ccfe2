//! Change notification feed.
//!
//! A thin wrapper over `tokio::sync::broadcast`. Subscribers that fall behind
//! lose events and are told how many they missed; since consumers re-fetch
//! full lists on any notice, a missed event is handled like a received one.

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::trace;

/// Which table changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeTable {
    /// `donations`
    Donations,
    /// `expenses`
    Expenses,
    /// `festival_settings`
    Settings,
}

/// What happened to the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Row inserted
    Insert,
    /// Row updated (or settings upserted)
    Update,
    /// Row deleted
    Delete,
}

/// One change notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    /// Table that changed
    pub table: ChangeTable,
    /// Kind of change
    pub kind: ChangeKind,
}

impl ChangeEvent {
    /// Shorthand constructor.
    #[must_use]
    pub const fn new(table: ChangeTable, kind: ChangeKind) -> Self {
        Self { table, kind }
    }
}

/// What a subscriber sees when it polls the feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeNotice {
    /// A change was delivered
    Changed(ChangeEvent),
    /// The subscriber lagged and this many events were dropped
    Missed(u64),
}

/// Publishing side of the feed, owned by the store.
#[derive(Clone, Debug)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    /// Creates a feed that buffers up to `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Notifies every current subscriber. Having no subscribers is fine.
    pub fn publish(&self, event: ChangeEvent) {
        match self.sender.send(event) {
            Ok(receivers) => trace!("Published {:?} to {} subscriber(s)", event, receivers),
            Err(_) => trace!("Published {:?} with no subscribers", event),
        }
    }

    /// Registers a new subscriber.
    #[must_use]
    pub fn subscribe(&self) -> ChangeSubscription {
        ChangeSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Receiving side of the feed. Dropping it unsubscribes.
#[derive(Debug)]
pub struct ChangeSubscription {
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl ChangeSubscription {
    /// Waits for the next notice; `None` once the feed is gone.
    pub async fn recv(&mut self) -> Option<ChangeNotice> {
        match self.receiver.recv().await {
            Ok(event) => Some(ChangeNotice::Changed(event)),
            Err(RecvError::Lagged(missed)) => Some(ChangeNotice::Missed(missed)),
            Err(RecvError::Closed) => None,
        }
    }

    /// Explicitly stops receiving notifications.
    pub fn unsubscribe(self) {
        drop(self);
    }
}
