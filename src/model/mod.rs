//! Value objects exchanged with the notification service.
//!
//! All of these are transient client-side copies; the service owns the
//! authoritative records. Each type carries its own [`Parcelable`]
//! implementation, which is the single definition of its field order on
//! the wire.
//!
//! [`Parcelable`]: crate::parcel::Parcelable

mod bundle;
mod disturb;
mod record;
mod request;
mod slot;
mod sorting;
mod subscribe;

pub use bundle::{EnabledNotificationCallbackData, NotificationBundleOption};
pub use disturb::{DoNotDisturbType, NotificationDoNotDisturbDate};
pub use record::{Notification, RemoveReason};
pub use request::{BasicContent, LongTextContent, NotificationContent, NotificationRequest};
pub use slot::{NotificationSlot, SlotLevel, SlotType};
pub use sorting::{NotificationSorting, NotificationSortingMap};
pub use subscribe::NotificationSubscribeInfo;
