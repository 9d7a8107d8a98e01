//! Shared fixtures for integration tests.

use std::sync::Arc;

use notibus::model::{Notification, NotificationRequest};
use notibus::parcel::Parcel;
use notibus::subscriber::SUBSCRIBER_INTERFACE_TOKEN;
use notibus::transport::{MockConnector, MockRemote};
use notibus::{ClientConfig, NotificationClient};

/// Initialize test logging once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// A client wired to a fresh mock remote.
pub fn mock_client() -> (Arc<MockRemote>, NotificationClient) {
    init_tracing();
    let remote = Arc::new(MockRemote::new());
    let client = NotificationClient::new(
        ClientConfig::default(),
        Box::new(MockConnector::new(remote.clone())),
    );
    (remote, client)
}

/// An inbound subscriber parcel: token first, then the payload from `f`.
pub fn inbound_parcel(f: impl FnOnce(&mut Parcel)) -> Parcel {
    let mut parcel = Parcel::new();
    parcel
        .write_interface_token(SUBSCRIBER_INTERFACE_TOKEN)
        .unwrap();
    f(&mut parcel);
    parcel
}

/// A published notification owned by `bundle`.
pub fn notification_for(bundle: &str, id: i32) -> Notification {
    Notification::new(
        format!("{bundle}_{id}"),
        bundle,
        NotificationRequest::new(id),
    )
}
