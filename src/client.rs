//! Application-facing client facade.
//!
//! [`NotificationClient`] owns the connection lifecycle and forwards each
//! call one-to-one to the proxy. It is explicitly constructed and passed
//! by reference to call sites; there is no ambient global instance.
//!
//! While disconnected every operation fails with
//! [`AnsError::ServiceNotConnected`]. If a forwarded call observes a dead
//! remote the facade drops the connection, broadcasts
//! [`NotificationEvent::Died`] to subscribers, and later calls fail fast
//! until `connect` is called again.
//!
//! [`NotificationEvent::Died`]: crate::subscriber::NotificationEvent::Died

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{AnsError, Result};
use crate::model::{
    Notification, NotificationBundleOption, NotificationDoNotDisturbDate, NotificationRequest,
    NotificationSlot, NotificationSortingMap, NotificationSubscribeInfo, RemoveReason, SlotType,
};
use crate::proxy::NotificationProxy;
use crate::subscriber::{subscriber_channel, SubscriberManager, SubscriberStub, Subscription};
use crate::transport::{RemoteHandle, ServiceConnector};

struct Connection {
    id: Uuid,
    proxy: NotificationProxy,
}

/// Client handle for the notification service.
pub struct NotificationClient {
    config: ClientConfig,
    connector: Box<dyn ServiceConnector>,
    connection: Mutex<Option<Connection>>,
    subscribers: Arc<SubscriberManager>,
    stub: Arc<SubscriberStub>,
    stub_handle: RemoteHandle,
}

impl NotificationClient {
    /// Create a disconnected client.
    pub fn new(config: ClientConfig, connector: Box<dyn ServiceConnector>) -> Self {
        let subscribers = Arc::new(SubscriberManager::new());
        let stub = Arc::new(SubscriberStub::new(subscribers.clone()));
        Self {
            config,
            connector,
            connection: Mutex::new(None),
            subscribers,
            stub,
            stub_handle: RemoteHandle::allocate(),
        }
    }

    fn lock_connection(&self) -> std::sync::MutexGuard<'_, Option<Connection>> {
        self.connection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Establish the service connection. Idempotent while connected.
    pub fn connect(&self) -> Result<()> {
        let mut guard = self.lock_connection();
        if guard.is_some() {
            return Ok(());
        }
        let remote = self.connector.connect(&self.config.service)?;
        let id = Uuid::new_v4();
        info!(
            connection = %id,
            service = %self.config.service.name,
            "Connected to notification service"
        );
        *guard = Some(Connection {
            id,
            proxy: NotificationProxy::new(remote),
        });
        Ok(())
    }

    /// Drop the service connection. Subsequent operations fail with
    /// [`AnsError::ServiceNotConnected`] until `connect` is called again.
    pub fn shutdown(&self) {
        if let Some(connection) = self.lock_connection().take() {
            info!(connection = %connection.id, "Disconnected from notification service");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.lock_connection().is_some()
    }

    /// The inbound stub the transport should route subscriber pushes to.
    pub fn subscriber_stub(&self) -> Arc<SubscriberStub> {
        self.stub.clone()
    }

    /// The handle identifying this client's subscriber callback object.
    pub fn subscriber_handle(&self) -> RemoteHandle {
        self.stub_handle
    }

    fn with_proxy<R>(&self, op: impl FnOnce(&NotificationProxy) -> Result<R>) -> Result<R> {
        let mut guard = self.lock_connection();
        let Some(connection) = guard.as_ref() else {
            return Err(AnsError::ServiceNotConnected);
        };
        let result = op(&connection.proxy);
        if matches!(result, Err(AnsError::DeadObject)) {
            warn!(connection = %connection.id, "Remote service died; dropping connection");
            *guard = None;
            self.subscribers.notify_died();
        }
        result
    }

    // ========================================================================
    // Subscription
    // ========================================================================

    /// Subscribe to notification events, optionally filtered by `info`.
    ///
    /// Returns the [`Subscription`] to drain for events. Local
    /// registration only happens after the service accepted the
    /// subscription.
    pub fn subscribe(&self, info: Option<&NotificationSubscribeInfo>) -> Result<Subscription> {
        let (port, subscription) = subscriber_channel();
        self.with_proxy(|proxy| proxy.subscribe(Some(self.stub_handle), info))?;
        self.subscribers.add_subscriber(Some(&port), info)?;
        Ok(subscription)
    }

    /// End a subscription.
    pub fn unsubscribe(
        &self,
        subscription: &Subscription,
        info: Option<&NotificationSubscribeInfo>,
    ) -> Result<()> {
        self.with_proxy(|proxy| proxy.unsubscribe(Some(self.stub_handle), info))?;
        self.subscribers.remove_subscriber(Some(subscription.id()), info)
    }

    // ========================================================================
    // Publish / cancel
    // ========================================================================

    pub fn publish(&self, label: &str, request: Option<&NotificationRequest>) -> Result<()> {
        self.with_proxy(|proxy| proxy.publish(label, request))
    }

    pub fn publish_to_device(
        &self,
        request: Option<&NotificationRequest>,
        device_id: &str,
    ) -> Result<()> {
        self.with_proxy(|proxy| proxy.publish_to_device(request, device_id))
    }

    pub fn publish_as_bundle(
        &self,
        request: Option<&NotificationRequest>,
        representative_bundle: &str,
    ) -> Result<()> {
        self.with_proxy(|proxy| proxy.publish_as_bundle(request, representative_bundle))
    }

    pub fn can_publish_as_bundle(&self, representative_bundle: &str) -> Result<bool> {
        self.with_proxy(|proxy| proxy.can_publish_as_bundle(representative_bundle))
    }

    pub fn publish_continuous_task(&self, request: Option<&NotificationRequest>) -> Result<()> {
        self.with_proxy(|proxy| proxy.publish_continuous_task(request))
    }

    pub fn cancel_continuous_task(&self, label: &str, notification_id: i32) -> Result<()> {
        self.with_proxy(|proxy| proxy.cancel_continuous_task(label, notification_id))
    }

    pub fn cancel(&self, notification_id: i32, label: &str) -> Result<()> {
        self.with_proxy(|proxy| proxy.cancel(notification_id, label))
    }

    pub fn cancel_all(&self) -> Result<()> {
        self.with_proxy(|proxy| proxy.cancel_all())
    }

    pub fn cancel_as_bundle(
        &self,
        notification_id: i32,
        representative_bundle: &str,
        user_id: i32,
    ) -> Result<()> {
        self.with_proxy(|proxy| {
            proxy.cancel_as_bundle(notification_id, representative_bundle, user_id)
        })
    }

    pub fn cancel_group(&self, group_name: &str) -> Result<()> {
        self.with_proxy(|proxy| proxy.cancel_group(group_name))
    }

    pub fn delete(&self, key: &str, remove_reason: RemoveReason) -> Result<()> {
        self.with_proxy(|proxy| proxy.delete(key, remove_reason))
    }

    pub fn delete_by_bundle(&self, bundle: Option<&NotificationBundleOption>) -> Result<()> {
        self.with_proxy(|proxy| proxy.delete_by_bundle(bundle))
    }

    pub fn delete_all(&self) -> Result<()> {
        self.with_proxy(|proxy| proxy.delete_all())
    }

    pub fn delete_all_by_user(&self, user_id: i32) -> Result<()> {
        self.with_proxy(|proxy| proxy.delete_all_by_user(user_id))
    }

    pub fn remove_notification(
        &self,
        bundle: Option<&NotificationBundleOption>,
        notification_id: i32,
        label: &str,
        remove_reason: RemoveReason,
    ) -> Result<()> {
        self.with_proxy(|proxy| {
            proxy.remove_notification(bundle, notification_id, label, remove_reason)
        })
    }

    pub fn remove_all_notifications(
        &self,
        bundle: Option<&NotificationBundleOption>,
    ) -> Result<()> {
        self.with_proxy(|proxy| proxy.remove_all_notifications(bundle))
    }

    pub fn remove_group_by_bundle(
        &self,
        bundle: Option<&NotificationBundleOption>,
        group_name: &str,
    ) -> Result<()> {
        self.with_proxy(|proxy| proxy.remove_group_by_bundle(bundle, group_name))
    }

    // ========================================================================
    // Slots
    // ========================================================================

    pub fn add_slot_by_type(&self, slot_type: SlotType) -> Result<()> {
        self.with_proxy(|proxy| proxy.add_slot_by_type(slot_type))
    }

    pub fn add_slots(&self, slots: &[NotificationSlot]) -> Result<()> {
        self.with_proxy(|proxy| proxy.add_slots(slots))
    }

    pub fn remove_slot_by_type(&self, slot_type: SlotType) -> Result<()> {
        self.with_proxy(|proxy| proxy.remove_slot_by_type(slot_type))
    }

    pub fn remove_all_slots(&self) -> Result<()> {
        self.with_proxy(|proxy| proxy.remove_all_slots())
    }

    pub fn get_slot_by_type(&self, slot_type: SlotType) -> Result<NotificationSlot> {
        self.with_proxy(|proxy| proxy.get_slot_by_type(slot_type))
    }

    pub fn get_slots(&self) -> Result<Vec<NotificationSlot>> {
        self.with_proxy(|proxy| proxy.get_slots())
    }

    pub fn get_slots_by_bundle(
        &self,
        bundle: Option<&NotificationBundleOption>,
    ) -> Result<Vec<NotificationSlot>> {
        self.with_proxy(|proxy| proxy.get_slots_by_bundle(bundle))
    }

    pub fn update_slots(
        &self,
        bundle: Option<&NotificationBundleOption>,
        slots: &[NotificationSlot],
    ) -> Result<()> {
        self.with_proxy(|proxy| proxy.update_slots(bundle, slots))
    }

    pub fn get_slot_num_as_bundle(
        &self,
        bundle: Option<&NotificationBundleOption>,
    ) -> Result<u64> {
        self.with_proxy(|proxy| proxy.get_slot_num_as_bundle(bundle))
    }

    pub fn set_enabled_for_bundle_slot(
        &self,
        bundle: Option<&NotificationBundleOption>,
        slot_type: SlotType,
        enabled: bool,
    ) -> Result<()> {
        self.with_proxy(|proxy| proxy.set_enabled_for_bundle_slot(bundle, slot_type, enabled))
    }

    pub fn get_enabled_for_bundle_slot(
        &self,
        bundle: Option<&NotificationBundleOption>,
        slot_type: SlotType,
    ) -> Result<bool> {
        self.with_proxy(|proxy| proxy.get_enabled_for_bundle_slot(bundle, slot_type))
    }

    // ========================================================================
    // Active notifications
    // ========================================================================

    pub fn get_active_notifications(&self) -> Result<Vec<NotificationRequest>> {
        self.with_proxy(|proxy| proxy.get_active_notifications())
    }

    pub fn get_active_notification_nums(&self) -> Result<u64> {
        self.with_proxy(|proxy| proxy.get_active_notification_nums())
    }

    pub fn get_all_active_notifications(&self) -> Result<Vec<Notification>> {
        self.with_proxy(|proxy| proxy.get_all_active_notifications())
    }

    pub fn get_current_app_sorting(&self) -> Result<NotificationSortingMap> {
        self.with_proxy(|proxy| proxy.get_current_app_sorting())
    }

    // ========================================================================
    // Enablement / badges
    // ========================================================================

    pub fn request_enable_notification(&self, device_id: &str) -> Result<()> {
        self.with_proxy(|proxy| proxy.request_enable_notification(device_id))
    }

    pub fn set_notifications_enabled_for_bundle(
        &self,
        device_id: &str,
        enabled: bool,
    ) -> Result<()> {
        self.with_proxy(|proxy| proxy.set_notifications_enabled_for_bundle(device_id, enabled))
    }

    pub fn set_notifications_enabled_for_all_bundles(
        &self,
        device_id: &str,
        enabled: bool,
    ) -> Result<()> {
        self.with_proxy(|proxy| {
            proxy.set_notifications_enabled_for_all_bundles(device_id, enabled)
        })
    }

    pub fn set_notifications_enabled_for_special_bundle(
        &self,
        device_id: &str,
        bundle: Option<&NotificationBundleOption>,
        enabled: bool,
    ) -> Result<()> {
        self.with_proxy(|proxy| {
            proxy.set_notifications_enabled_for_special_bundle(device_id, bundle, enabled)
        })
    }

    pub fn set_notifications_enabled_by_user(&self, user_id: i32, enabled: bool) -> Result<()> {
        self.with_proxy(|proxy| proxy.set_notifications_enabled_by_user(user_id, enabled))
    }

    pub fn is_allowed_notify(&self) -> Result<bool> {
        self.with_proxy(|proxy| proxy.is_allowed_notify())
    }

    pub fn is_allowed_notify_self(&self) -> Result<bool> {
        self.with_proxy(|proxy| proxy.is_allowed_notify_self())
    }

    pub fn is_special_bundle_allowed_notify(
        &self,
        bundle: Option<&NotificationBundleOption>,
    ) -> Result<bool> {
        self.with_proxy(|proxy| proxy.is_special_bundle_allowed_notify(bundle))
    }

    pub fn is_special_user_allowed_notify(&self, user_id: i32) -> Result<bool> {
        self.with_proxy(|proxy| proxy.is_special_user_allowed_notify(user_id))
    }

    pub fn set_show_badge_enabled_for_bundle(
        &self,
        bundle: Option<&NotificationBundleOption>,
        enabled: bool,
    ) -> Result<()> {
        self.with_proxy(|proxy| proxy.set_show_badge_enabled_for_bundle(bundle, enabled))
    }

    pub fn get_show_badge_enabled_for_bundle(
        &self,
        bundle: Option<&NotificationBundleOption>,
    ) -> Result<bool> {
        self.with_proxy(|proxy| proxy.get_show_badge_enabled_for_bundle(bundle))
    }

    pub fn get_show_badge_enabled(&self) -> Result<bool> {
        self.with_proxy(|proxy| proxy.get_show_badge_enabled())
    }

    pub fn set_badge_number(&self, num: i32) -> Result<()> {
        self.with_proxy(|proxy| proxy.set_badge_number(num))
    }

    pub fn get_bundle_importance(&self) -> Result<i32> {
        self.with_proxy(|proxy| proxy.get_bundle_importance())
    }

    pub fn is_support_template(&self, template_name: &str) -> Result<bool> {
        self.with_proxy(|proxy| proxy.is_support_template(template_name))
    }

    // ========================================================================
    // Do not disturb
    // ========================================================================

    pub fn set_do_not_disturb_date(
        &self,
        date: Option<&NotificationDoNotDisturbDate>,
    ) -> Result<()> {
        self.with_proxy(|proxy| proxy.set_do_not_disturb_date(date))
    }

    pub fn get_do_not_disturb_date(&self) -> Result<NotificationDoNotDisturbDate> {
        self.with_proxy(|proxy| proxy.get_do_not_disturb_date())
    }

    pub fn set_do_not_disturb_date_by_user(
        &self,
        user_id: i32,
        date: Option<&NotificationDoNotDisturbDate>,
    ) -> Result<()> {
        self.with_proxy(|proxy| proxy.set_do_not_disturb_date_by_user(user_id, date))
    }

    pub fn get_do_not_disturb_date_by_user(
        &self,
        user_id: i32,
    ) -> Result<NotificationDoNotDisturbDate> {
        self.with_proxy(|proxy| proxy.get_do_not_disturb_date_by_user(user_id))
    }

    pub fn does_support_do_not_disturb_mode(&self) -> Result<bool> {
        self.with_proxy(|proxy| proxy.does_support_do_not_disturb_mode())
    }
}
