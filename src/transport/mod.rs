//! Remote-object transport seam.
//!
//! The real IPC channel is owned by the platform; this crate only depends
//! on the [`RemoteObject`] trait, a synchronous request/reply round-trip.
//! Tests and embedded use plug in [`mock::MockRemote`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::error::{AnsError, Result};
use crate::parcel::Parcel;

pub mod mock;

pub use mock::{MockConnector, MockRemote};

/// Errors reported by the transport for a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The remote object no longer exists.
    #[error("remote object is dead")]
    DeadObject,

    /// The transport rejected the transaction with a non-zero status.
    #[error("transaction rejected with status {0}")]
    Failed(i32),
}

impl From<TransportError> for AnsError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::DeadObject => AnsError::DeadObject,
            TransportError::Failed(status) => AnsError::TransactFailed(status),
        }
    }
}

/// A connected remote object capable of synchronous transactions.
///
/// `transact` blocks the calling thread until the remote process replies.
/// Concurrent calls from multiple threads are passed straight through; any
/// per-connection serialization is the transport's own contract.
pub trait RemoteObject: Send + Sync {
    /// Perform one request/reply round-trip.
    ///
    /// On success the reply parcel holds the leading result code followed
    /// by any out-parameters; interpreting it is the caller's job.
    fn transact(
        &self,
        code: u32,
        data: &Parcel,
        reply: &mut Parcel,
    ) -> std::result::Result<(), TransportError>;
}

/// Opaque identity of a callback object registered with the transport.
///
/// Uniqueness is handle identity, not value equality of the object behind
/// it; the service keys its subscriber registry off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RemoteHandle(pub u64);

impl RemoteHandle {
    /// Mint a process-unique handle.
    pub fn allocate() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        RemoteHandle(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Resolves and connects to the notification service.
///
/// Implementations wrap the platform's service registry. A failed lookup
/// surfaces as [`AnsError::ServiceNotConnected`].
pub trait ServiceConnector: Send + Sync {
    /// Connect to the service described by `service`.
    fn connect(&self, service: &ServiceConfig) -> Result<Arc<dyn RemoteObject>>;
}
