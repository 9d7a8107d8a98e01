//! Notification slots: per-application, per-category channel configuration.

use crate::error::{AnsError, Result};
use crate::parcel::{Parcel, Parcelable};

/// Category a slot belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SlotType {
    #[default]
    Custom,
    SocialCommunication,
    ServiceReminder,
    ContentInformation,
    Other,
}

impl SlotType {
    pub fn as_i32(self) -> i32 {
        match self {
            SlotType::Custom => 0,
            SlotType::SocialCommunication => 1,
            SlotType::ServiceReminder => 2,
            SlotType::ContentInformation => 3,
            SlotType::Other => 0xFFFF,
        }
    }

    pub fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(SlotType::Custom),
            1 => Ok(SlotType::SocialCommunication),
            2 => Ok(SlotType::ServiceReminder),
            3 => Ok(SlotType::ContentInformation),
            0xFFFF => Ok(SlotType::Other),
            _ => Err(AnsError::ParcelableFailed),
        }
    }
}

/// Interruption level of a slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlotLevel {
    None,
    Min,
    Low,
    #[default]
    Default,
    High,
}

impl SlotLevel {
    pub fn as_i32(self) -> i32 {
        match self {
            SlotLevel::None => 0,
            SlotLevel::Min => 1,
            SlotLevel::Low => 2,
            SlotLevel::Default => 3,
            SlotLevel::High => 4,
        }
    }

    pub fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(SlotLevel::None),
            1 => Ok(SlotLevel::Min),
            2 => Ok(SlotLevel::Low),
            3 => Ok(SlotLevel::Default),
            4 => Ok(SlotLevel::High),
            _ => Err(AnsError::ParcelableFailed),
        }
    }
}

/// A notification channel configuration record.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationSlot {
    pub slot_type: SlotType,
    pub name: String,
    pub description: String,
    pub level: SlotLevel,
    pub show_badge: bool,
    pub enable_sound: bool,
    pub sound: String,
    pub enable_vibration: bool,
    pub enable_lights: bool,
    pub led_light_color: i32,
    pub bypass_do_not_disturb: bool,
}

impl NotificationSlot {
    /// A slot with the defaults for its category.
    pub fn new(slot_type: SlotType) -> Self {
        let name = match slot_type {
            SlotType::Custom => "custom",
            SlotType::SocialCommunication => "social_communication",
            SlotType::ServiceReminder => "service_reminder",
            SlotType::ContentInformation => "content_information",
            SlotType::Other => "other",
        };
        Self {
            slot_type,
            name: name.to_string(),
            description: String::new(),
            level: SlotLevel::Default,
            show_badge: false,
            enable_sound: false,
            sound: String::new(),
            enable_vibration: false,
            enable_lights: false,
            led_light_color: 0,
            bypass_do_not_disturb: false,
        }
    }
}

impl Default for NotificationSlot {
    fn default() -> Self {
        Self::new(SlotType::Custom)
    }
}

impl Parcelable for NotificationSlot {
    fn write_to(&self, parcel: &mut Parcel) -> Result<()> {
        parcel.write_i32(self.slot_type.as_i32())?;
        parcel.write_string(&self.name)?;
        parcel.write_string(&self.description)?;
        parcel.write_i32(self.level.as_i32())?;
        parcel.write_bool(self.show_badge)?;
        parcel.write_bool(self.enable_sound)?;
        parcel.write_string(&self.sound)?;
        parcel.write_bool(self.enable_vibration)?;
        parcel.write_bool(self.enable_lights)?;
        parcel.write_i32(self.led_light_color)?;
        parcel.write_bool(self.bypass_do_not_disturb)
    }

    fn read_from(parcel: &mut Parcel) -> Result<Self> {
        Ok(Self {
            slot_type: SlotType::from_i32(parcel.read_i32()?)?,
            name: parcel.read_string()?,
            description: parcel.read_string()?,
            level: SlotLevel::from_i32(parcel.read_i32()?)?,
            show_badge: parcel.read_bool()?,
            enable_sound: parcel.read_bool()?,
            sound: parcel.read_string()?,
            enable_vibration: parcel.read_bool()?,
            enable_lights: parcel.read_bool()?,
            led_light_color: parcel.read_i32()?,
            bypass_do_not_disturb: parcel.read_bool()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_type_rejects_unknown_value() {
        assert_eq!(SlotType::from_i32(42), Err(AnsError::ParcelableFailed));
    }

    #[test]
    fn test_new_slot_carries_category_name() {
        let slot = NotificationSlot::new(SlotType::ServiceReminder);
        assert_eq!(slot.name, "service_reminder");
        assert_eq!(slot.level, SlotLevel::Default);
    }
}
