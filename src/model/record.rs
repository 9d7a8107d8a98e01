//! Published notification records and removal reasons.

use crate::error::Result;
use crate::parcel::{Parcel, Parcelable};

use super::request::NotificationRequest;

/// Why a notification was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveReason {
    Click,
    Cancel,
    CancelAll,
    Error,
    PackageChanged,
    UserStopped,
    AppCancel,
    AppCancelAll,
    /// A reason code this client has no name for; carried verbatim.
    Other(i32),
}

impl RemoveReason {
    pub fn as_i32(self) -> i32 {
        match self {
            RemoveReason::Click => 1,
            RemoveReason::Cancel => 2,
            RemoveReason::CancelAll => 3,
            RemoveReason::Error => 4,
            RemoveReason::PackageChanged => 5,
            RemoveReason::UserStopped => 6,
            RemoveReason::AppCancel => 8,
            RemoveReason::AppCancelAll => 9,
            RemoveReason::Other(value) => value,
        }
    }

    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => RemoveReason::Click,
            2 => RemoveReason::Cancel,
            3 => RemoveReason::CancelAll,
            4 => RemoveReason::Error,
            5 => RemoveReason::PackageChanged,
            6 => RemoveReason::UserStopped,
            8 => RemoveReason::AppCancel,
            9 => RemoveReason::AppCancelAll,
            other => RemoveReason::Other(other),
        }
    }
}

/// A published notification as seen by subscribers.
///
/// The service owns the authoritative record; clients hold transient
/// copies keyed by the stable `key` string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notification {
    /// Stable key assigned by the service at publish time.
    pub key: String,
    /// Owning application's bundle name.
    pub bundle_name: String,
    pub request: NotificationRequest,
    /// Post time in milliseconds since the epoch.
    pub post_time: i64,
}

impl Notification {
    pub fn new(
        key: impl Into<String>,
        bundle_name: impl Into<String>,
        request: NotificationRequest,
    ) -> Self {
        Self {
            key: key.into(),
            bundle_name: bundle_name.into(),
            request,
            post_time: 0,
        }
    }
}

impl Parcelable for Notification {
    fn write_to(&self, parcel: &mut Parcel) -> Result<()> {
        parcel.write_string(&self.key)?;
        parcel.write_string(&self.bundle_name)?;
        parcel.write_parcelable(&self.request)?;
        parcel.write_i64(self.post_time)
    }

    fn read_from(parcel: &mut Parcel) -> Result<Self> {
        Ok(Self {
            key: parcel.read_string()?,
            bundle_name: parcel.read_string()?,
            request: parcel.read_parcelable()?,
            post_time: parcel.read_i64()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_reason_preserves_unknown_codes() {
        assert_eq!(RemoveReason::from_i32(77), RemoveReason::Other(77));
        assert_eq!(RemoveReason::Other(77).as_i32(), 77);
    }

    #[test]
    fn test_known_reason_codes_round_trip() {
        for reason in [RemoveReason::Click, RemoveReason::AppCancelAll] {
            assert_eq!(RemoveReason::from_i32(reason.as_i32()), reason);
        }
    }
}
