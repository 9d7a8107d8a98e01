//! Process-wide subscriber registry and event fan-out.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{AnsError, Result};
use crate::model::{
    EnabledNotificationCallbackData, Notification, NotificationDoNotDisturbDate,
    NotificationSortingMap, NotificationSubscribeInfo, RemoveReason,
};

use super::NotificationEvent;

/// Opaque identity of a registered subscriber.
///
/// Re-registration with the same id is idempotent; the registry never
/// holds two entries with the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscriber-{}", self.0)
    }
}

/// Create a subscriber delivery channel.
///
/// The [`SubscriberPort`] is handed to the registry; the [`Subscription`]
/// is kept by the consumer and drained for events.
pub fn subscriber_channel() -> (SubscriberPort, Subscription) {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    let id = SubscriberId(NEXT_ID.fetch_add(1, Ordering::Relaxed));
    let (sender, receiver) = mpsc::channel();
    (
        SubscriberPort { id, sender },
        Subscription {
            id,
            events: receiver,
        },
    )
}

/// The registrable half of a subscriber channel.
#[derive(Debug, Clone)]
pub struct SubscriberPort {
    id: SubscriberId,
    sender: Sender<NotificationEvent>,
}

impl SubscriberPort {
    pub fn id(&self) -> SubscriberId {
        self.id
    }
}

/// The consuming half of a subscriber channel.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    events: Receiver<NotificationEvent>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Take the next pending event, if any.
    pub fn try_recv(&self) -> Option<NotificationEvent> {
        self.events.try_recv().ok()
    }

    /// Block up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<NotificationEvent> {
        self.events.recv_timeout(timeout).ok()
    }
}

struct Entry {
    id: SubscriberId,
    /// Accepted bundle names; empty accepts everything.
    filter: HashSet<String>,
    sender: Sender<NotificationEvent>,
}

/// Registry mapping subscriber identity to filter criteria.
///
/// Every mutation and every fan-out iteration runs under the single
/// internal mutex. Entries keep insertion order. Callbacks never re-enter
/// the manager: delivery is a channel send, consumed elsewhere.
#[derive(Default)]
pub struct SubscriberManager {
    entries: Mutex<Vec<Entry>>,
}

impl SubscriberManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a subscriber or update its filter.
    ///
    /// Idempotent: registering an already-known id replaces its filter
    /// and leaves exactly one entry.
    pub fn add_subscriber(
        &self,
        subscriber: Option<&SubscriberPort>,
        info: Option<&NotificationSubscribeInfo>,
    ) -> Result<()> {
        let port = subscriber.ok_or(AnsError::InvalidParam)?;
        let filter: HashSet<String> = info
            .map(|info| info.app_names.iter().cloned().collect())
            .unwrap_or_default();

        let mut entries = self.lock();
        if let Some(entry) = entries.iter_mut().find(|entry| entry.id == port.id) {
            entry.filter = filter;
            entry.sender = port.sender.clone();
            debug!(subscriber = %port.id, "Updated subscriber filter");
        } else {
            entries.push(Entry {
                id: port.id,
                filter,
                sender: port.sender.clone(),
            });
            info!(subscriber = %port.id, total = entries.len(), "Registered subscriber");
        }
        Ok(())
    }

    /// Remove a subscriber.
    ///
    /// Removing an id that is not registered is not an error.
    pub fn remove_subscriber(
        &self,
        subscriber: Option<SubscriberId>,
        _info: Option<&NotificationSubscribeInfo>,
    ) -> Result<()> {
        let id = subscriber.ok_or(AnsError::InvalidParam)?;
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() != before {
            info!(subscriber = %id, total = entries.len(), "Removed subscriber");
        }
        Ok(())
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    /// Deliver an event to every entry whose filter accepts it.
    ///
    /// Events without an owning bundle bypass filters. A receiver that has
    /// been dropped is skipped; fan-out continues with the remaining
    /// entries.
    pub fn dispatch(&self, event: NotificationEvent) {
        let entries = self.lock();
        let bundle = event.bundle().map(str::to_owned);
        for entry in entries.iter() {
            if let Some(ref bundle) = bundle {
                if !entry.filter.is_empty() && !entry.filter.contains(bundle) {
                    continue;
                }
            }
            if entry.sender.send(event.clone()).is_err() {
                debug!(subscriber = %entry.id, "Subscription dropped, skipping delivery");
            }
        }
    }

    pub fn notify_connected(&self) {
        self.dispatch(NotificationEvent::Connected);
    }

    pub fn notify_disconnected(&self) {
        self.dispatch(NotificationEvent::Disconnected);
    }

    pub fn notify_consumed(
        &self,
        notification: Notification,
        sorting_map: Option<NotificationSortingMap>,
    ) {
        self.dispatch(NotificationEvent::Consumed {
            notification,
            sorting_map,
        });
    }

    pub fn notify_canceled(
        &self,
        notification: Notification,
        sorting_map: Option<NotificationSortingMap>,
        reason: RemoveReason,
    ) {
        self.dispatch(NotificationEvent::Canceled {
            notification,
            sorting_map,
            reason,
        });
    }

    pub fn notify_updated(&self, sorting_map: NotificationSortingMap) {
        self.dispatch(NotificationEvent::Updated { sorting_map });
    }

    pub fn notify_do_not_disturb_changed(&self, date: NotificationDoNotDisturbDate) {
        self.dispatch(NotificationEvent::DoNotDisturbChanged { date });
    }

    pub fn notify_enabled_changed(&self, data: EnabledNotificationCallbackData) {
        self.dispatch(NotificationEvent::EnabledChanged { data });
    }

    /// Broadcast that the service connection died.
    pub fn notify_died(&self) {
        self.dispatch(NotificationEvent::Died);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationRequest;

    fn consumed_for(bundle: &str) -> NotificationEvent {
        NotificationEvent::Consumed {
            notification: Notification::new("key", bundle, NotificationRequest::new(1)),
            sorting_map: None,
        }
    }

    #[test]
    fn test_add_subscriber_null_is_invalid_param() {
        let manager = SubscriberManager::new();
        assert_eq!(
            manager.add_subscriber(None, None),
            Err(AnsError::InvalidParam)
        );
        assert_eq!(manager.subscriber_count(), 0);
    }

    #[test]
    fn test_add_twice_keeps_one_entry_with_latest_filter() {
        let manager = SubscriberManager::new();
        let (port, subscription) = subscriber_channel();

        let first = NotificationSubscribeInfo::for_app("com.example.mail");
        let second = NotificationSubscribeInfo::for_app("com.example.chat");
        manager.add_subscriber(Some(&port), Some(&first)).unwrap();
        manager.add_subscriber(Some(&port), Some(&second)).unwrap();
        assert_eq!(manager.subscriber_count(), 1);

        // Latest filter wins: mail events are no longer accepted.
        manager.dispatch(consumed_for("com.example.mail"));
        assert_eq!(subscription.try_recv(), None);
        manager.dispatch(consumed_for("com.example.chat"));
        assert!(subscription.try_recv().is_some());
    }

    #[test]
    fn test_remove_subscriber_null_is_invalid_param() {
        let manager = SubscriberManager::new();
        assert_eq!(
            manager.remove_subscriber(None, Some(&NotificationSubscribeInfo::default())),
            Err(AnsError::InvalidParam)
        );
    }

    #[test]
    fn test_remove_subscriber_clears_matching_entry() {
        let manager = SubscriberManager::new();
        let (port, _subscription) = subscriber_channel();
        manager.add_subscriber(Some(&port), None).unwrap();
        assert_eq!(manager.subscriber_count(), 1);

        manager.remove_subscriber(Some(port.id()), None).unwrap();
        assert_eq!(manager.subscriber_count(), 0);
    }

    #[test]
    fn test_remove_absent_subscriber_succeeds() {
        let manager = SubscriberManager::new();
        let (port, _subscription) = subscriber_channel();
        assert_eq!(manager.remove_subscriber(Some(port.id()), None), Ok(()));
    }

    #[test]
    fn test_filtered_fanout_skips_non_matching_entries() {
        let manager = SubscriberManager::new();
        let (all_port, all_events) = subscriber_channel();
        let (mail_port, mail_events) = subscriber_channel();
        manager.add_subscriber(Some(&all_port), None).unwrap();
        manager
            .add_subscriber(
                Some(&mail_port),
                Some(&NotificationSubscribeInfo::for_app("com.example.mail")),
            )
            .unwrap();

        manager.dispatch(consumed_for("com.example.chat"));
        assert!(all_events.try_recv().is_some());
        assert_eq!(mail_events.try_recv(), None);

        // Bundle-less events bypass filters.
        manager.notify_connected();
        assert_eq!(all_events.try_recv(), Some(NotificationEvent::Connected));
        assert_eq!(mail_events.try_recv(), Some(NotificationEvent::Connected));
    }

    #[test]
    fn test_dropped_subscription_is_skipped() {
        let manager = SubscriberManager::new();
        let (dead_port, dead_events) = subscriber_channel();
        let (live_port, live_events) = subscriber_channel();
        manager.add_subscriber(Some(&dead_port), None).unwrap();
        manager.add_subscriber(Some(&live_port), None).unwrap();
        drop(dead_events);

        manager.notify_updated(NotificationSortingMap::default());
        assert!(live_events.try_recv().is_some());
        assert_eq!(manager.subscriber_count(), 2);
    }
}
