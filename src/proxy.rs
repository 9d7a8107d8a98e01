//! Client-side proxy for the notification manager interface.
//!
//! Every method follows the same shape: write the interface token, write
//! the arguments in wire order, run one blocking transaction, read the
//! leading result code, then read any out-parameters. Failures map to the
//! fixed [`AnsError`] taxonomy:
//! - absent required object arguments fail with `InvalidParam` before any
//!   transport call
//! - a dead remote maps to `DeadObject`, any other transport rejection to
//!   `TransactFailed`
//! - a non-zero leading reply code is surfaced verbatim
//! - a success code with a missing out-parameter is `ParcelableFailed`

use std::sync::Arc;

use tracing::{debug, error};

use crate::error::{code, AnsError, Result};
use crate::model::{
    Notification, NotificationBundleOption, NotificationDoNotDisturbDate, NotificationRequest,
    NotificationSlot, NotificationSortingMap, NotificationSubscribeInfo, RemoveReason, SlotType,
};
use crate::parcel::Parcel;
use crate::transport::{RemoteHandle, RemoteObject};

/// Interface-descriptor token written at the start of every request.
pub const MANAGER_INTERFACE_TOKEN: &str = "notibus.NotificationManager";

/// Transaction codes of the manager interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ManagerRequest {
    Publish = 1,
    PublishToDevice,
    Cancel,
    CancelAll,
    CancelAsBundle,
    AddSlotByType,
    AddSlots,
    RemoveSlotByType,
    RemoveAllSlots,
    GetSlotByType,
    GetSlots,
    GetSlotNumAsBundle,
    GetActiveNotifications,
    GetActiveNotificationNums,
    GetAllActiveNotifications,
    CanPublishAsBundle,
    PublishAsBundle,
    SetNotificationBadgeNum,
    GetBundleImportance,
    RemoveNotification,
    RemoveAllNotifications,
    Delete,
    DeleteByBundle,
    DeleteAll,
    GetSlotsByBundle,
    UpdateSlots,
    RequestEnableNotification,
    SetNotificationsEnabledForBundle,
    SetNotificationsEnabledForAllBundles,
    SetNotificationsEnabledForSpecialBundle,
    SetShowBadgeEnabledForBundle,
    GetShowBadgeEnabledForBundle,
    GetShowBadgeEnabled,
    Subscribe,
    Unsubscribe,
    IsAllowedNotify,
    IsAllowedNotifySelf,
    IsSpecialBundleAllowedNotify,
    SetDoNotDisturbDate,
    GetDoNotDisturbDate,
    DoesSupportDoNotDisturbMode,
    CancelGroup,
    RemoveGroupByBundle,
    IsSupportTemplate,
    IsSpecialUserAllowedNotify,
    SetNotificationsEnabledByUser,
    DeleteAllByUser,
    SetDoNotDisturbDateByUser,
    GetDoNotDisturbDateByUser,
    SetEnabledForBundleSlot,
    GetEnabledForBundleSlot,
    GetCurrentAppSorting,
    PublishContinuousTask,
    CancelContinuousTask,
}

/// Proxy over a connected remote object.
///
/// Holds no state beyond the remote reference; concurrent calls are passed
/// straight to the transport.
pub struct NotificationProxy {
    remote: Arc<dyn RemoteObject>,
}

impl NotificationProxy {
    pub fn new(remote: Arc<dyn RemoteObject>) -> Self {
        Self { remote }
    }

    fn begin_request(&self) -> Result<Parcel> {
        let mut data = Parcel::new();
        if data.write_interface_token(MANAGER_INTERFACE_TOKEN).is_err() {
            error!("Failed to write interface token");
            return Err(AnsError::ParcelableFailed);
        }
        Ok(data)
    }

    fn transact(&self, request: ManagerRequest, data: Parcel) -> Result<Parcel> {
        let code_value = request as u32;
        let mut reply = Parcel::new();
        if let Err(err) = self.remote.transact(code_value, &data, &mut reply) {
            error!(code = code_value, error = %err, "Transact failed");
            return Err(err.into());
        }
        let result = reply.read_i32()?;
        if result != code::ERR_OK {
            debug!(code = code_value, result, "Service reported an error");
            return Err(AnsError::from_code(result));
        }
        Ok(reply)
    }

    // ========================================================================
    // Publish
    // ========================================================================

    /// Publish a notification under `label`.
    pub fn publish(&self, label: &str, request: Option<&NotificationRequest>) -> Result<()> {
        let request = request.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_string(label)?;
        data.write_parcelable(request)?;
        self.transact(ManagerRequest::Publish, data).map(drop)
    }

    /// Publish a notification to a specific device.
    pub fn publish_to_device(
        &self,
        request: Option<&NotificationRequest>,
        device_id: &str,
    ) -> Result<()> {
        let request = request.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(request)?;
        data.write_string(device_id)?;
        self.transact(ManagerRequest::PublishToDevice, data).map(drop)
    }

    /// Publish on behalf of `representative_bundle`.
    pub fn publish_as_bundle(
        &self,
        request: Option<&NotificationRequest>,
        representative_bundle: &str,
    ) -> Result<()> {
        let request = request.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(request)?;
        data.write_string(representative_bundle)?;
        self.transact(ManagerRequest::PublishAsBundle, data).map(drop)
    }

    /// Whether the caller may publish on behalf of `representative_bundle`.
    pub fn can_publish_as_bundle(&self, representative_bundle: &str) -> Result<bool> {
        let mut data = self.begin_request()?;
        data.write_string(representative_bundle)?;
        let mut reply = self.transact(ManagerRequest::CanPublishAsBundle, data)?;
        reply.read_bool()
    }

    /// Publish a continuous-task notification.
    pub fn publish_continuous_task(&self, request: Option<&NotificationRequest>) -> Result<()> {
        let request = request.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(request)?;
        self.transact(ManagerRequest::PublishContinuousTask, data)
            .map(drop)
    }

    /// Cancel a continuous-task notification.
    pub fn cancel_continuous_task(&self, label: &str, notification_id: i32) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_string(label)?;
        data.write_i32(notification_id)?;
        self.transact(ManagerRequest::CancelContinuousTask, data)
            .map(drop)
    }

    // ========================================================================
    // Cancel / remove
    // ========================================================================

    /// Cancel the caller's notification with the given id and label.
    pub fn cancel(&self, notification_id: i32, label: &str) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_i32(notification_id)?;
        data.write_string(label)?;
        self.transact(ManagerRequest::Cancel, data).map(drop)
    }

    /// Cancel all of the caller's notifications.
    pub fn cancel_all(&self) -> Result<()> {
        let data = self.begin_request()?;
        self.transact(ManagerRequest::CancelAll, data).map(drop)
    }

    /// Cancel a notification published on behalf of another bundle.
    pub fn cancel_as_bundle(
        &self,
        notification_id: i32,
        representative_bundle: &str,
        user_id: i32,
    ) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_i32(notification_id)?;
        data.write_string(representative_bundle)?;
        data.write_i32(user_id)?;
        self.transact(ManagerRequest::CancelAsBundle, data).map(drop)
    }

    /// Cancel every notification in a group.
    pub fn cancel_group(&self, group_name: &str) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_string(group_name)?;
        self.transact(ManagerRequest::CancelGroup, data).map(drop)
    }

    /// Delete one notification by its stable key.
    pub fn delete(&self, key: &str, remove_reason: RemoveReason) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_string(key)?;
        data.write_i32(remove_reason.as_i32())?;
        self.transact(ManagerRequest::Delete, data).map(drop)
    }

    /// Delete every notification of a bundle.
    pub fn delete_by_bundle(&self, bundle: Option<&NotificationBundleOption>) -> Result<()> {
        let bundle = bundle.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(bundle)?;
        self.transact(ManagerRequest::DeleteByBundle, data).map(drop)
    }

    /// Delete all notifications.
    pub fn delete_all(&self) -> Result<()> {
        let data = self.begin_request()?;
        self.transact(ManagerRequest::DeleteAll, data).map(drop)
    }

    /// Delete all notifications of a user.
    pub fn delete_all_by_user(&self, user_id: i32) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_i32(user_id)?;
        self.transact(ManagerRequest::DeleteAllByUser, data).map(drop)
    }

    /// Remove a single notification of a bundle.
    pub fn remove_notification(
        &self,
        bundle: Option<&NotificationBundleOption>,
        notification_id: i32,
        label: &str,
        remove_reason: RemoveReason,
    ) -> Result<()> {
        let bundle = bundle.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(bundle)?;
        data.write_i32(notification_id)?;
        data.write_string(label)?;
        data.write_i32(remove_reason.as_i32())?;
        self.transact(ManagerRequest::RemoveNotification, data)
            .map(drop)
    }

    /// Remove every notification of a bundle.
    pub fn remove_all_notifications(
        &self,
        bundle: Option<&NotificationBundleOption>,
    ) -> Result<()> {
        let bundle = bundle.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(bundle)?;
        self.transact(ManagerRequest::RemoveAllNotifications, data)
            .map(drop)
    }

    /// Remove a notification group of a bundle.
    pub fn remove_group_by_bundle(
        &self,
        bundle: Option<&NotificationBundleOption>,
        group_name: &str,
    ) -> Result<()> {
        let bundle = bundle.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(bundle)?;
        data.write_string(group_name)?;
        self.transact(ManagerRequest::RemoveGroupByBundle, data)
            .map(drop)
    }

    // ========================================================================
    // Slots
    // ========================================================================

    /// Create the default slot for a category.
    pub fn add_slot_by_type(&self, slot_type: SlotType) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_i32(slot_type.as_i32())?;
        self.transact(ManagerRequest::AddSlotByType, data).map(drop)
    }

    /// Create or update a batch of slots.
    pub fn add_slots(&self, slots: &[NotificationSlot]) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_parcelable_vec(slots)?;
        self.transact(ManagerRequest::AddSlots, data).map(drop)
    }

    /// Remove the slot of a category.
    pub fn remove_slot_by_type(&self, slot_type: SlotType) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_i32(slot_type.as_i32())?;
        self.transact(ManagerRequest::RemoveSlotByType, data).map(drop)
    }

    /// Remove all of the caller's slots.
    pub fn remove_all_slots(&self) -> Result<()> {
        let data = self.begin_request()?;
        self.transact(ManagerRequest::RemoveAllSlots, data).map(drop)
    }

    /// Fetch the slot of a category.
    pub fn get_slot_by_type(&self, slot_type: SlotType) -> Result<NotificationSlot> {
        let mut data = self.begin_request()?;
        data.write_i32(slot_type.as_i32())?;
        let mut reply = self.transact(ManagerRequest::GetSlotByType, data)?;
        reply
            .read_optional_parcelable()?
            .ok_or(AnsError::ParcelableFailed)
    }

    /// Fetch all of the caller's slots.
    pub fn get_slots(&self) -> Result<Vec<NotificationSlot>> {
        let data = self.begin_request()?;
        let mut reply = self.transact(ManagerRequest::GetSlots, data)?;
        reply.read_parcelable_vec()
    }

    /// Fetch another bundle's slots.
    pub fn get_slots_by_bundle(
        &self,
        bundle: Option<&NotificationBundleOption>,
    ) -> Result<Vec<NotificationSlot>> {
        let bundle = bundle.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(bundle)?;
        let mut reply = self.transact(ManagerRequest::GetSlotsByBundle, data)?;
        reply.read_parcelable_vec()
    }

    /// Replace slots of a bundle.
    pub fn update_slots(
        &self,
        bundle: Option<&NotificationBundleOption>,
        slots: &[NotificationSlot],
    ) -> Result<()> {
        let bundle = bundle.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(bundle)?;
        data.write_parcelable_vec(slots)?;
        self.transact(ManagerRequest::UpdateSlots, data).map(drop)
    }

    /// Number of slots a bundle has.
    pub fn get_slot_num_as_bundle(&self, bundle: Option<&NotificationBundleOption>) -> Result<u64> {
        let bundle = bundle.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(bundle)?;
        let mut reply = self.transact(ManagerRequest::GetSlotNumAsBundle, data)?;
        reply.read_u64()
    }

    /// Enable or disable one slot of a bundle.
    pub fn set_enabled_for_bundle_slot(
        &self,
        bundle: Option<&NotificationBundleOption>,
        slot_type: SlotType,
        enabled: bool,
    ) -> Result<()> {
        let bundle = bundle.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(bundle)?;
        data.write_i32(slot_type.as_i32())?;
        data.write_bool(enabled)?;
        self.transact(ManagerRequest::SetEnabledForBundleSlot, data)
            .map(drop)
    }

    /// Whether one slot of a bundle is enabled.
    pub fn get_enabled_for_bundle_slot(
        &self,
        bundle: Option<&NotificationBundleOption>,
        slot_type: SlotType,
    ) -> Result<bool> {
        let bundle = bundle.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(bundle)?;
        data.write_i32(slot_type.as_i32())?;
        let mut reply = self.transact(ManagerRequest::GetEnabledForBundleSlot, data)?;
        reply.read_bool()
    }

    // ========================================================================
    // Active notifications
    // ========================================================================

    /// The caller's own active notification requests.
    pub fn get_active_notifications(&self) -> Result<Vec<NotificationRequest>> {
        let data = self.begin_request()?;
        let mut reply = self.transact(ManagerRequest::GetActiveNotifications, data)?;
        reply.read_parcelable_vec()
    }

    /// Number of the caller's active notifications.
    pub fn get_active_notification_nums(&self) -> Result<u64> {
        let data = self.begin_request()?;
        let mut reply = self.transact(ManagerRequest::GetActiveNotificationNums, data)?;
        reply.read_u64()
    }

    /// All active notifications in the system.
    pub fn get_all_active_notifications(&self) -> Result<Vec<Notification>> {
        let data = self.begin_request()?;
        let mut reply = self.transact(ManagerRequest::GetAllActiveNotifications, data)?;
        reply.read_parcelable_vec()
    }

    /// The current ranking of the caller's notifications.
    pub fn get_current_app_sorting(&self) -> Result<NotificationSortingMap> {
        let data = self.begin_request()?;
        let mut reply = self.transact(ManagerRequest::GetCurrentAppSorting, data)?;
        reply
            .read_optional_parcelable()?
            .ok_or(AnsError::ParcelableFailed)
    }

    // ========================================================================
    // Enablement / badges
    // ========================================================================

    /// Ask the service to prompt the user for notification permission.
    pub fn request_enable_notification(&self, device_id: &str) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_string(device_id)?;
        self.transact(ManagerRequest::RequestEnableNotification, data)
            .map(drop)
    }

    /// Enable or disable notifications of the calling bundle on a device.
    pub fn set_notifications_enabled_for_bundle(
        &self,
        device_id: &str,
        enabled: bool,
    ) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_string(device_id)?;
        data.write_bool(enabled)?;
        self.transact(ManagerRequest::SetNotificationsEnabledForBundle, data)
            .map(drop)
    }

    /// Enable or disable notifications for every bundle on a device.
    pub fn set_notifications_enabled_for_all_bundles(
        &self,
        device_id: &str,
        enabled: bool,
    ) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_string(device_id)?;
        data.write_bool(enabled)?;
        self.transact(ManagerRequest::SetNotificationsEnabledForAllBundles, data)
            .map(drop)
    }

    /// Enable or disable notifications of one bundle on a device.
    pub fn set_notifications_enabled_for_special_bundle(
        &self,
        device_id: &str,
        bundle: Option<&NotificationBundleOption>,
        enabled: bool,
    ) -> Result<()> {
        let bundle = bundle.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_string(device_id)?;
        data.write_parcelable(bundle)?;
        data.write_bool(enabled)?;
        self.transact(
            ManagerRequest::SetNotificationsEnabledForSpecialBundle,
            data,
        )
        .map(drop)
    }

    /// Enable or disable notifications for a user.
    pub fn set_notifications_enabled_by_user(&self, user_id: i32, enabled: bool) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_i32(user_id)?;
        data.write_bool(enabled)?;
        self.transact(ManagerRequest::SetNotificationsEnabledByUser, data)
            .map(drop)
    }

    /// Whether the caller may publish notifications.
    pub fn is_allowed_notify(&self) -> Result<bool> {
        let data = self.begin_request()?;
        let mut reply = self.transact(ManagerRequest::IsAllowedNotify, data)?;
        reply.read_bool()
    }

    /// Whether the calling bundle may publish notifications.
    pub fn is_allowed_notify_self(&self) -> Result<bool> {
        let data = self.begin_request()?;
        let mut reply = self.transact(ManagerRequest::IsAllowedNotifySelf, data)?;
        reply.read_bool()
    }

    /// Whether a specific bundle may publish notifications.
    pub fn is_special_bundle_allowed_notify(
        &self,
        bundle: Option<&NotificationBundleOption>,
    ) -> Result<bool> {
        let bundle = bundle.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(bundle)?;
        let mut reply = self.transact(ManagerRequest::IsSpecialBundleAllowedNotify, data)?;
        reply.read_bool()
    }

    /// Whether a specific user may receive notifications.
    pub fn is_special_user_allowed_notify(&self, user_id: i32) -> Result<bool> {
        let mut data = self.begin_request()?;
        data.write_i32(user_id)?;
        let mut reply = self.transact(ManagerRequest::IsSpecialUserAllowedNotify, data)?;
        reply.read_bool()
    }

    /// Show or hide the badge of a bundle.
    pub fn set_show_badge_enabled_for_bundle(
        &self,
        bundle: Option<&NotificationBundleOption>,
        enabled: bool,
    ) -> Result<()> {
        let bundle = bundle.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(bundle)?;
        data.write_bool(enabled)?;
        self.transact(ManagerRequest::SetShowBadgeEnabledForBundle, data)
            .map(drop)
    }

    /// Whether a bundle's badge is shown.
    pub fn get_show_badge_enabled_for_bundle(
        &self,
        bundle: Option<&NotificationBundleOption>,
    ) -> Result<bool> {
        let bundle = bundle.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(bundle)?;
        let mut reply = self.transact(ManagerRequest::GetShowBadgeEnabledForBundle, data)?;
        reply.read_bool()
    }

    /// Whether the caller's badge is shown.
    pub fn get_show_badge_enabled(&self) -> Result<bool> {
        let data = self.begin_request()?;
        let mut reply = self.transact(ManagerRequest::GetShowBadgeEnabled, data)?;
        reply.read_bool()
    }

    /// Set the caller's badge number.
    pub fn set_badge_number(&self, num: i32) -> Result<()> {
        let mut data = self.begin_request()?;
        data.write_i32(num)?;
        self.transact(ManagerRequest::SetNotificationBadgeNum, data)
            .map(drop)
    }

    /// The caller's importance setting.
    pub fn get_bundle_importance(&self) -> Result<i32> {
        let data = self.begin_request()?;
        let mut reply = self.transact(ManagerRequest::GetBundleImportance, data)?;
        reply.read_i32()
    }

    /// Whether a template is supported by the service.
    pub fn is_support_template(&self, template_name: &str) -> Result<bool> {
        let mut data = self.begin_request()?;
        data.write_string(template_name)?;
        let mut reply = self.transact(ManagerRequest::IsSupportTemplate, data)?;
        reply.read_bool()
    }

    // ========================================================================
    // Subscription
    // ========================================================================

    /// Register a subscriber callback object, optionally filtered.
    pub fn subscribe(
        &self,
        subscriber: Option<RemoteHandle>,
        info: Option<&NotificationSubscribeInfo>,
    ) -> Result<()> {
        let subscriber = subscriber.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_remote_handle(subscriber)?;
        data.write_bool(info.is_some())?;
        if let Some(info) = info {
            data.write_parcelable(info)?;
        }
        self.transact(ManagerRequest::Subscribe, data).map(drop)
    }

    /// Remove a subscriber callback object.
    pub fn unsubscribe(
        &self,
        subscriber: Option<RemoteHandle>,
        info: Option<&NotificationSubscribeInfo>,
    ) -> Result<()> {
        let subscriber = subscriber.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_remote_handle(subscriber)?;
        data.write_bool(info.is_some())?;
        if let Some(info) = info {
            data.write_parcelable(info)?;
        }
        self.transact(ManagerRequest::Unsubscribe, data).map(drop)
    }

    // ========================================================================
    // Do not disturb
    // ========================================================================

    /// Set the global do-not-disturb window.
    pub fn set_do_not_disturb_date(
        &self,
        date: Option<&NotificationDoNotDisturbDate>,
    ) -> Result<()> {
        let date = date.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_parcelable(date)?;
        self.transact(ManagerRequest::SetDoNotDisturbDate, data)
            .map(drop)
    }

    /// The global do-not-disturb window.
    pub fn get_do_not_disturb_date(&self) -> Result<NotificationDoNotDisturbDate> {
        let data = self.begin_request()?;
        let mut reply = self.transact(ManagerRequest::GetDoNotDisturbDate, data)?;
        reply
            .read_optional_parcelable()?
            .ok_or(AnsError::ParcelableFailed)
    }

    /// Set a user's do-not-disturb window.
    pub fn set_do_not_disturb_date_by_user(
        &self,
        user_id: i32,
        date: Option<&NotificationDoNotDisturbDate>,
    ) -> Result<()> {
        let date = date.ok_or(AnsError::InvalidParam)?;
        let mut data = self.begin_request()?;
        data.write_i32(user_id)?;
        data.write_parcelable(date)?;
        self.transact(ManagerRequest::SetDoNotDisturbDateByUser, data)
            .map(drop)
    }

    /// A user's do-not-disturb window.
    pub fn get_do_not_disturb_date_by_user(
        &self,
        user_id: i32,
    ) -> Result<NotificationDoNotDisturbDate> {
        let mut data = self.begin_request()?;
        data.write_i32(user_id)?;
        let mut reply = self.transact(ManagerRequest::GetDoNotDisturbDateByUser, data)?;
        reply
            .read_optional_parcelable()?
            .ok_or(AnsError::ParcelableFailed)
    }

    /// Whether the device supports do-not-disturb mode.
    pub fn does_support_do_not_disturb_mode(&self) -> Result<bool> {
        let data = self.begin_request()?;
        let mut reply = self.transact(ManagerRequest::DoesSupportDoNotDisturbMode, data)?;
        reply.read_bool()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{MockRemote, TransportError};

    fn proxy_with_mock() -> (Arc<MockRemote>, NotificationProxy) {
        let remote = Arc::new(MockRemote::new());
        let proxy = NotificationProxy::new(remote.clone());
        (remote, proxy)
    }

    #[test]
    fn test_null_request_short_circuits_without_transport_call() {
        let (remote, proxy) = proxy_with_mock();
        assert_eq!(proxy.publish("label", None), Err(AnsError::InvalidParam));
        assert_eq!(
            proxy.remove_all_notifications(None),
            Err(AnsError::InvalidParam)
        );
        assert_eq!(proxy.subscribe(None, None), Err(AnsError::InvalidParam));
        assert_eq!(remote.request_count(), 0);
    }

    #[test]
    fn test_dead_object_maps_to_dead_object() {
        let (remote, proxy) = proxy_with_mock();
        remote.queue_error(TransportError::DeadObject);
        assert_eq!(proxy.cancel_all(), Err(AnsError::DeadObject));
    }

    #[test]
    fn test_other_transport_failure_maps_to_transact_failed() {
        let (remote, proxy) = proxy_with_mock();
        remote.queue_error(TransportError::Failed(-1));
        assert_eq!(proxy.cancel_all(), Err(AnsError::TransactFailed(-1)));
    }

    #[test]
    fn test_leading_error_code_is_surfaced_verbatim() {
        let (remote, proxy) = proxy_with_mock();
        remote.queue_result_code(code::ERR_INVALID_BUNDLE);
        remote.queue_result_code(1000);
        assert_eq!(proxy.cancel_all(), Err(AnsError::InvalidBundle));
        assert_eq!(proxy.cancel_all(), Err(AnsError::Remote(1000)));
    }

    #[test]
    fn test_can_publish_as_bundle_reads_out_param() {
        let (remote, proxy) = proxy_with_mock();
        remote.queue_ok_with(|reply| {
            reply.write_bool(true).unwrap();
        });
        assert_eq!(proxy.can_publish_as_bundle("Bundle"), Ok(true));
    }

    #[test]
    fn test_success_code_with_missing_payload_is_parcelable_failed() {
        let (remote, proxy) = proxy_with_mock();
        remote.queue_result_code(code::ERR_OK);
        assert_eq!(
            proxy.can_publish_as_bundle("Bundle"),
            Err(AnsError::ParcelableFailed)
        );
    }

    #[test]
    fn test_absent_object_out_param_is_parcelable_failed() {
        let (remote, proxy) = proxy_with_mock();
        remote.queue_ok_with(|reply| {
            reply.write_i32(0).unwrap();
        });
        assert_eq!(
            proxy.get_do_not_disturb_date(),
            Err(AnsError::ParcelableFailed)
        );
    }

    #[test]
    fn test_request_sequencing_token_then_args() {
        let (remote, proxy) = proxy_with_mock();
        proxy.cancel(9, "mail").unwrap();

        let requests = remote.take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].code, ManagerRequest::Cancel as u32);

        let mut data = requests[0].data.clone();
        data.read_interface_token(MANAGER_INTERFACE_TOKEN).unwrap();
        assert_eq!(data.read_i32().unwrap(), 9);
        assert_eq!(data.read_string().unwrap(), "mail");
        assert!(!data.has_remaining());
    }

    #[test]
    fn test_subscribe_writes_handle_and_filter_flag() {
        let (remote, proxy) = proxy_with_mock();
        let handle = RemoteHandle(41);
        let info = NotificationSubscribeInfo::for_app("com.example.mail");
        proxy.subscribe(Some(handle), Some(&info)).unwrap();
        proxy.subscribe(Some(handle), None).unwrap();

        let requests = remote.take_requests();
        let mut first = requests[0].data.clone();
        first.read_interface_token(MANAGER_INTERFACE_TOKEN).unwrap();
        assert_eq!(first.read_remote_handle().unwrap(), handle);
        assert!(first.read_bool().unwrap());
        assert_eq!(
            first.read_parcelable::<NotificationSubscribeInfo>().unwrap(),
            info
        );

        let mut second = requests[1].data.clone();
        second.read_interface_token(MANAGER_INTERFACE_TOKEN).unwrap();
        second.read_remote_handle().unwrap();
        assert!(!second.read_bool().unwrap());
        assert!(!second.has_remaining());
    }

    #[test]
    fn test_slot_collection_round_trip() {
        let (remote, proxy) = proxy_with_mock();
        let slots: Vec<NotificationSlot> = [
            SlotType::SocialCommunication,
            SlotType::ServiceReminder,
            SlotType::ContentInformation,
        ]
        .into_iter()
        .map(NotificationSlot::new)
        .collect();
        let reply_slots = slots.clone();
        remote.queue_ok_with(move |reply| {
            reply.write_parcelable_vec(&reply_slots).unwrap();
        });

        let fetched = proxy.get_slots().unwrap();
        assert_eq!(fetched.len(), 3);
        assert_eq!(fetched, slots);
    }

    #[test]
    fn test_get_slot_by_type_reads_flagged_slot() {
        let (remote, proxy) = proxy_with_mock();
        let slot = NotificationSlot::new(SlotType::ServiceReminder);
        let reply_slot = slot.clone();
        remote.queue_ok_with(move |reply| {
            reply.write_optional_parcelable(Some(&reply_slot)).unwrap();
        });
        assert_eq!(proxy.get_slot_by_type(SlotType::ServiceReminder), Ok(slot));
    }
}
