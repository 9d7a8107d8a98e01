//! Notification requests and their content payloads.

use crate::error::{AnsError, Result};
use crate::parcel::{Parcel, Parcelable};

use super::slot::SlotType;

/// Plain title/text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicContent {
    pub title: String,
    pub text: String,
    pub additional_text: String,
}

/// Content with an expanded long-form body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongTextContent {
    pub title: String,
    pub text: String,
    pub long_text: String,
    pub brief_text: String,
    pub expanded_title: String,
}

/// The content payload of a notification, tagged on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationContent {
    Basic(BasicContent),
    LongText(LongTextContent),
}

impl NotificationContent {
    fn tag(&self) -> i32 {
        match self {
            NotificationContent::Basic(_) => 0,
            NotificationContent::LongText(_) => 1,
        }
    }
}

impl Default for NotificationContent {
    fn default() -> Self {
        NotificationContent::Basic(BasicContent::default())
    }
}

impl Parcelable for NotificationContent {
    fn write_to(&self, parcel: &mut Parcel) -> Result<()> {
        parcel.write_i32(self.tag())?;
        match self {
            NotificationContent::Basic(content) => {
                parcel.write_string(&content.title)?;
                parcel.write_string(&content.text)?;
                parcel.write_string(&content.additional_text)
            }
            NotificationContent::LongText(content) => {
                parcel.write_string(&content.title)?;
                parcel.write_string(&content.text)?;
                parcel.write_string(&content.long_text)?;
                parcel.write_string(&content.brief_text)?;
                parcel.write_string(&content.expanded_title)
            }
        }
    }

    fn read_from(parcel: &mut Parcel) -> Result<Self> {
        match parcel.read_i32()? {
            0 => Ok(NotificationContent::Basic(BasicContent {
                title: parcel.read_string()?,
                text: parcel.read_string()?,
                additional_text: parcel.read_string()?,
            })),
            1 => Ok(NotificationContent::LongText(LongTextContent {
                title: parcel.read_string()?,
                text: parcel.read_string()?,
                long_text: parcel.read_string()?,
                brief_text: parcel.read_string()?,
                expanded_title: parcel.read_string()?,
            })),
            _ => Err(AnsError::ParcelableFailed),
        }
    }
}

/// A notification as published by an application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationRequest {
    pub notification_id: i32,
    pub label: String,
    pub owner_bundle_name: String,
    pub creator_bundle_name: String,
    pub creator_uid: i32,
    pub creator_user_id: i32,
    pub slot_type: SlotType,
    pub group_name: String,
    /// Delivery time in milliseconds since the epoch; 0 means immediate.
    pub delivery_time: i64,
    /// Auto-delete time in milliseconds since the epoch; 0 means never.
    pub auto_deleted_time: i64,
    pub content: NotificationContent,
    pub unremovable: bool,
    pub in_progress: bool,
}

impl NotificationRequest {
    pub fn new(notification_id: i32) -> Self {
        Self {
            notification_id,
            ..Self::default()
        }
    }
}

impl Parcelable for NotificationRequest {
    fn write_to(&self, parcel: &mut Parcel) -> Result<()> {
        parcel.write_i32(self.notification_id)?;
        parcel.write_string(&self.label)?;
        parcel.write_string(&self.owner_bundle_name)?;
        parcel.write_string(&self.creator_bundle_name)?;
        parcel.write_i32(self.creator_uid)?;
        parcel.write_i32(self.creator_user_id)?;
        parcel.write_i32(self.slot_type.as_i32())?;
        parcel.write_string(&self.group_name)?;
        parcel.write_i64(self.delivery_time)?;
        parcel.write_i64(self.auto_deleted_time)?;
        parcel.write_parcelable(&self.content)?;
        parcel.write_bool(self.unremovable)?;
        parcel.write_bool(self.in_progress)
    }

    fn read_from(parcel: &mut Parcel) -> Result<Self> {
        Ok(Self {
            notification_id: parcel.read_i32()?,
            label: parcel.read_string()?,
            owner_bundle_name: parcel.read_string()?,
            creator_bundle_name: parcel.read_string()?,
            creator_uid: parcel.read_i32()?,
            creator_user_id: parcel.read_i32()?,
            slot_type: SlotType::from_i32(parcel.read_i32()?)?,
            group_name: parcel.read_string()?,
            delivery_time: parcel.read_i64()?,
            auto_deleted_time: parcel.read_i64()?,
            content: parcel.read_parcelable()?,
            unremovable: parcel.read_bool()?,
            in_progress: parcel.read_bool()?,
        })
    }
}
