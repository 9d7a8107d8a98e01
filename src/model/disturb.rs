//! Do-not-disturb schedule records.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{AnsError, Result};
use crate::parcel::{Parcel, Parcelable};

/// Recurrence mode of a do-not-disturb window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DoNotDisturbType {
    #[default]
    None,
    Once,
    Daily,
    Clearly,
}

impl DoNotDisturbType {
    pub fn as_i32(self) -> i32 {
        match self {
            DoNotDisturbType::None => 0,
            DoNotDisturbType::Once => 1,
            DoNotDisturbType::Daily => 2,
            DoNotDisturbType::Clearly => 3,
        }
    }

    pub fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(DoNotDisturbType::None),
            1 => Ok(DoNotDisturbType::Once),
            2 => Ok(DoNotDisturbType::Daily),
            3 => Ok(DoNotDisturbType::Clearly),
            _ => Err(AnsError::ParcelableFailed),
        }
    }
}

/// A do-not-disturb window. Timestamps travel as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDoNotDisturbDate {
    pub disturb_type: DoNotDisturbType,
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl NotificationDoNotDisturbDate {
    pub fn new(disturb_type: DoNotDisturbType, begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            disturb_type,
            begin,
            end,
        }
    }
}

impl Default for NotificationDoNotDisturbDate {
    fn default() -> Self {
        Self {
            disturb_type: DoNotDisturbType::None,
            begin: DateTime::<Utc>::UNIX_EPOCH,
            end: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or(AnsError::ParcelableFailed)
}

impl Parcelable for NotificationDoNotDisturbDate {
    fn write_to(&self, parcel: &mut Parcel) -> Result<()> {
        parcel.write_i32(self.disturb_type.as_i32())?;
        parcel.write_i64(self.begin.timestamp_millis())?;
        parcel.write_i64(self.end.timestamp_millis())
    }

    fn read_from(parcel: &mut Parcel) -> Result<Self> {
        Ok(Self {
            disturb_type: DoNotDisturbType::from_i32(parcel.read_i32()?)?,
            begin: millis_to_datetime(parcel.read_i64()?)?,
            end: millis_to_datetime(parcel.read_i64()?)?,
        })
    }
}
