//! Inbound event path: subscriber stub and event fan-out.
//!
//! The service pushes notification lifecycle changes as one-way
//! transactions. [`SubscriberStub`] is the single inbound entry point: it
//! validates the interface token, decodes the payload into a
//! [`NotificationEvent`], and hands it to the [`SubscriberManager`], which
//! fans it out to every registered subscription whose filter accepts the
//! owning application.

use std::sync::Arc;

use tracing::{error, warn};

use crate::error::{AnsError, Result};
use crate::model::{
    EnabledNotificationCallbackData, Notification, NotificationDoNotDisturbDate,
    NotificationSortingMap, RemoveReason,
};
use crate::parcel::Parcel;

pub mod manager;

pub use manager::{subscriber_channel, SubscriberId, SubscriberManager, SubscriberPort, Subscription};

/// Interface-descriptor token carried by every inbound transaction.
pub const SUBSCRIBER_INTERFACE_TOKEN: &str = "notibus.NotificationSubscriber";

/// Transaction codes of the subscriber interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SubscriberRequest {
    OnConnected = 1,
    OnDisconnected,
    OnConsumed,
    OnConsumedWithSortingMap,
    OnCanceled,
    OnCanceledWithSortingMap,
    OnUpdated,
    OnDoNotDisturbDateChange,
    OnEnabledNotificationChanged,
}

impl SubscriberRequest {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(SubscriberRequest::OnConnected),
            2 => Some(SubscriberRequest::OnDisconnected),
            3 => Some(SubscriberRequest::OnConsumed),
            4 => Some(SubscriberRequest::OnConsumedWithSortingMap),
            5 => Some(SubscriberRequest::OnCanceled),
            6 => Some(SubscriberRequest::OnCanceledWithSortingMap),
            7 => Some(SubscriberRequest::OnUpdated),
            8 => Some(SubscriberRequest::OnDoNotDisturbDateChange),
            9 => Some(SubscriberRequest::OnEnabledNotificationChanged),
            _ => None,
        }
    }
}

/// A notification lifecycle event delivered to subscribers.
///
/// The closed set of variants replaces per-callback virtual hooks;
/// consumers drain a [`Subscription`] and `match` on the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    /// The subscription became active on the service side.
    Connected,
    /// The subscription was torn down on the service side.
    Disconnected,
    /// A notification was posted or updated.
    Consumed {
        notification: Notification,
        sorting_map: Option<NotificationSortingMap>,
    },
    /// A notification was removed.
    Canceled {
        notification: Notification,
        sorting_map: Option<NotificationSortingMap>,
        reason: RemoveReason,
    },
    /// The ranking changed; the full map is pushed wholesale.
    Updated { sorting_map: NotificationSortingMap },
    /// The do-not-disturb window changed.
    DoNotDisturbChanged { date: NotificationDoNotDisturbDate },
    /// A bundle's notification enablement changed.
    EnabledChanged { data: EnabledNotificationCallbackData },
    /// The connection to the service died.
    Died,
}

impl NotificationEvent {
    /// The owning application this event is about, if it has one.
    ///
    /// Events without a bundle (connection lifecycle, ranking pushes)
    /// bypass subscriber filters.
    pub fn bundle(&self) -> Option<&str> {
        match self {
            NotificationEvent::Consumed { notification, .. }
            | NotificationEvent::Canceled { notification, .. } => {
                Some(notification.bundle_name.as_str())
            }
            _ => None,
        }
    }
}

/// Inbound stub: decodes pushed transactions and forwards them.
///
/// Performs no business logic of its own; all side effects live in the
/// consumers draining their subscriptions.
pub struct SubscriberStub {
    manager: Arc<SubscriberManager>,
}

impl SubscriberStub {
    pub fn new(manager: Arc<SubscriberManager>) -> Self {
        Self { manager }
    }

    /// Handle one inbound transaction.
    ///
    /// Deliveries are fire-and-forget for the service; the returned error
    /// only reaches the transport layer.
    pub fn on_remote_request(&self, code: u32, data: &mut Parcel) -> Result<()> {
        if data.read_interface_token(SUBSCRIBER_INTERFACE_TOKEN).is_err() {
            error!(code, "Rejected inbound transaction: interface token mismatch");
            return Err(AnsError::ParcelableFailed);
        }
        let Some(request) = SubscriberRequest::from_code(code) else {
            warn!(code, "Unknown subscriber transaction code");
            return Err(AnsError::InvalidParam);
        };
        match Self::decode(request, data) {
            Ok(event) => {
                self.manager.dispatch(event);
                Ok(())
            }
            Err(err) => {
                error!(code, error = %err, "Failed to decode inbound event");
                Err(err)
            }
        }
    }

    fn decode(request: SubscriberRequest, data: &mut Parcel) -> Result<NotificationEvent> {
        match request {
            SubscriberRequest::OnConnected => Ok(NotificationEvent::Connected),
            SubscriberRequest::OnDisconnected => Ok(NotificationEvent::Disconnected),
            SubscriberRequest::OnConsumed => Ok(NotificationEvent::Consumed {
                notification: data.read_parcelable()?,
                sorting_map: None,
            }),
            SubscriberRequest::OnConsumedWithSortingMap => Ok(NotificationEvent::Consumed {
                notification: data.read_parcelable()?,
                sorting_map: Some(data.read_parcelable()?),
            }),
            SubscriberRequest::OnCanceled => {
                let notification = data.read_parcelable()?;
                let reason = RemoveReason::from_i32(data.read_i32()?);
                Ok(NotificationEvent::Canceled {
                    notification,
                    sorting_map: None,
                    reason,
                })
            }
            SubscriberRequest::OnCanceledWithSortingMap => {
                let notification = data.read_parcelable()?;
                let sorting_map = data.read_parcelable()?;
                let reason = RemoveReason::from_i32(data.read_i32()?);
                Ok(NotificationEvent::Canceled {
                    notification,
                    sorting_map: Some(sorting_map),
                    reason,
                })
            }
            SubscriberRequest::OnUpdated => Ok(NotificationEvent::Updated {
                sorting_map: data.read_parcelable()?,
            }),
            SubscriberRequest::OnDoNotDisturbDateChange => {
                Ok(NotificationEvent::DoNotDisturbChanged {
                    date: data.read_parcelable()?,
                })
            }
            SubscriberRequest::OnEnabledNotificationChanged => {
                Ok(NotificationEvent::EnabledChanged {
                    data: data.read_parcelable()?,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NotificationRequest, NotificationSorting};
    use crate::parcel::Parcelable;

    fn stub_with_subscription() -> (SubscriberStub, Subscription) {
        let manager = Arc::new(SubscriberManager::new());
        let (port, subscription) = subscriber_channel();
        manager.add_subscriber(Some(&port), None).unwrap();
        (SubscriberStub::new(manager), subscription)
    }

    fn inbound(f: impl FnOnce(&mut Parcel)) -> Parcel {
        let mut parcel = Parcel::new();
        parcel
            .write_interface_token(SUBSCRIBER_INTERFACE_TOKEN)
            .unwrap();
        f(&mut parcel);
        parcel
    }

    fn sample_notification() -> Notification {
        Notification::new("key_1", "com.example.mail", NotificationRequest::new(1))
    }

    #[test]
    fn test_connected_event_is_dispatched() {
        let (stub, subscription) = stub_with_subscription();
        let mut data = inbound(|_| {});
        stub.on_remote_request(SubscriberRequest::OnConnected as u32, &mut data)
            .unwrap();
        assert_eq!(subscription.try_recv(), Some(NotificationEvent::Connected));
    }

    #[test]
    fn test_consumed_event_carries_notification() {
        let (stub, subscription) = stub_with_subscription();
        let notification = sample_notification();
        let expected = notification.clone();
        let mut data = inbound(|parcel| {
            notification.write_to(parcel).unwrap();
        });
        stub.on_remote_request(SubscriberRequest::OnConsumed as u32, &mut data)
            .unwrap();
        assert_eq!(
            subscription.try_recv(),
            Some(NotificationEvent::Consumed {
                notification: expected,
                sorting_map: None,
            })
        );
    }

    #[test]
    fn test_canceled_with_map_decodes_reason() {
        let (stub, subscription) = stub_with_subscription();
        let notification = sample_notification();
        let map = NotificationSortingMap::new(vec![NotificationSorting {
            key: "key_1".to_string(),
            ranking: 0,
            importance: 3,
            is_display_badge: true,
        }]);
        let (n, m) = (notification.clone(), map.clone());
        let mut data = inbound(move |parcel| {
            n.write_to(parcel).unwrap();
            m.write_to(parcel).unwrap();
            parcel.write_i32(RemoveReason::Click.as_i32()).unwrap();
        });
        stub.on_remote_request(SubscriberRequest::OnCanceledWithSortingMap as u32, &mut data)
            .unwrap();
        assert_eq!(
            subscription.try_recv(),
            Some(NotificationEvent::Canceled {
                notification,
                sorting_map: Some(map),
                reason: RemoveReason::Click,
            })
        );
    }

    #[test]
    fn test_token_mismatch_never_reaches_dispatch() {
        let (stub, subscription) = stub_with_subscription();
        let mut data = Parcel::new();
        data.write_interface_token("some.other.Interface").unwrap();
        let result = stub.on_remote_request(SubscriberRequest::OnConnected as u32, &mut data);
        assert_eq!(result, Err(AnsError::ParcelableFailed));
        assert_eq!(subscription.try_recv(), None);
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let (stub, _subscription) = stub_with_subscription();
        let mut data = inbound(|_| {});
        assert_eq!(
            stub.on_remote_request(999, &mut data),
            Err(AnsError::InvalidParam)
        );
    }

    #[test]
    fn test_truncated_payload_is_parcelable_failed() {
        let (stub, subscription) = stub_with_subscription();
        let mut data = inbound(|_| {});
        assert_eq!(
            stub.on_remote_request(SubscriberRequest::OnConsumed as u32, &mut data),
            Err(AnsError::ParcelableFailed)
        );
        assert_eq!(subscription.try_recv(), None);
    }
}
