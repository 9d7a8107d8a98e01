//! Subscription filter criteria.

use crate::error::Result;
use crate::parcel::{Parcel, Parcelable};

/// Filter attached at subscribe time.
///
/// An empty `app_names` list means "receive events for all applications".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSubscribeInfo {
    pub app_names: Vec<String>,
    pub user_id: i32,
}

/// Sentinel for "not scoped to a particular user".
pub(crate) const SUBSCRIBE_USER_ALL: i32 = -1;

impl NotificationSubscribeInfo {
    pub fn new(app_names: Vec<String>) -> Self {
        Self {
            app_names,
            user_id: SUBSCRIBE_USER_ALL,
        }
    }

    /// Restrict the subscription to a single application.
    pub fn for_app(app_name: impl Into<String>) -> Self {
        Self::new(vec![app_name.into()])
    }
}

impl Default for NotificationSubscribeInfo {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Parcelable for NotificationSubscribeInfo {
    fn write_to(&self, parcel: &mut Parcel) -> Result<()> {
        parcel.write_string_vec(&self.app_names)?;
        parcel.write_i32(self.user_id)
    }

    fn read_from(parcel: &mut Parcel) -> Result<Self> {
        Ok(Self {
            app_names: parcel.read_string_vec()?,
            user_id: parcel.read_i32()?,
        })
    }
}
