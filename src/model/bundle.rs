//! Bundle identity types.

use crate::error::Result;
use crate::parcel::{Parcel, Parcelable};

/// Identifies an application: package name plus numeric owner uid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NotificationBundleOption {
    pub bundle_name: String,
    pub uid: i32,
}

impl NotificationBundleOption {
    pub fn new(bundle_name: impl Into<String>, uid: i32) -> Self {
        Self {
            bundle_name: bundle_name.into(),
            uid,
        }
    }
}

impl Parcelable for NotificationBundleOption {
    fn write_to(&self, parcel: &mut Parcel) -> Result<()> {
        parcel.write_string(&self.bundle_name)?;
        parcel.write_i32(self.uid)
    }

    fn read_from(parcel: &mut Parcel) -> Result<Self> {
        Ok(Self {
            bundle_name: parcel.read_string()?,
            uid: parcel.read_i32()?,
        })
    }
}

/// Payload of an enabled-notification change pushed to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnabledNotificationCallbackData {
    pub bundle: String,
    pub uid: i32,
    pub enable: bool,
}

impl EnabledNotificationCallbackData {
    pub fn new(bundle: impl Into<String>, uid: i32, enable: bool) -> Self {
        Self {
            bundle: bundle.into(),
            uid,
            enable,
        }
    }
}

impl Parcelable for EnabledNotificationCallbackData {
    fn write_to(&self, parcel: &mut Parcel) -> Result<()> {
        parcel.write_string(&self.bundle)?;
        parcel.write_i32(self.uid)?;
        parcel.write_bool(self.enable)
    }

    fn read_from(parcel: &mut Parcel) -> Result<Self> {
        Ok(Self {
            bundle: parcel.read_string()?,
            uid: parcel.read_i32()?,
            enable: parcel.read_bool()?,
        })
    }
}
