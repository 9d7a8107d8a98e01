//! Notibus - notification service client bindings
//!
//! Synchronous client layer for an out-of-process notification service:
//! - `proxy`: typed operations marshaled over a remote-object transport
//! - `subscriber`: inbound event stub, registry, and fan-out
//! - `client`: facade with an explicit connect/shutdown lifecycle
//! - `parcel`/`transport`: wire buffer and the pluggable IPC seam

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod parcel;
pub mod proxy;
pub mod subscriber;
pub mod transport;

pub use client::NotificationClient;
pub use config::ClientConfig;
pub use error::{AnsError, Result};
pub use subscriber::{NotificationEvent, Subscription};
