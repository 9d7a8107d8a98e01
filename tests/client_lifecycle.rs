//! Connection lifecycle behavior of the client facade.

mod common;

use notibus::error::code;
use notibus::transport::TransportError;
use notibus::{AnsError, NotificationEvent};

use common::mock_client;

#[test]
fn operations_before_connect_never_reach_the_transport() {
    let (remote, client) = mock_client();

    assert_eq!(client.cancel_all(), Err(AnsError::ServiceNotConnected));
    assert_eq!(client.get_slots(), Err(AnsError::ServiceNotConnected));
    assert_eq!(
        client.can_publish_as_bundle("Bundle"),
        Err(AnsError::ServiceNotConnected)
    );
    assert_eq!(remote.request_count(), 0);
}

#[test]
fn connected_client_forwards_operations() {
    let (remote, client) = mock_client();
    client.connect().unwrap();

    remote.queue_ok_with(|reply| {
        reply.write_bool(true).unwrap();
    });
    assert_eq!(client.can_publish_as_bundle("Bundle"), Ok(true));
    assert_eq!(remote.request_count(), 1);
}

#[test]
fn missing_out_param_with_success_code_is_parcelable_failed() {
    let (remote, client) = mock_client();
    client.connect().unwrap();

    remote.queue_result_code(code::ERR_OK);
    assert_eq!(
        client.can_publish_as_bundle("Bundle"),
        Err(AnsError::ParcelableFailed)
    );
}

#[test]
fn shutdown_returns_client_to_disconnected_state() {
    let (_remote, client) = mock_client();
    client.connect().unwrap();
    assert!(client.is_connected());

    client.shutdown();
    assert!(!client.is_connected());
    assert_eq!(client.delete_all(), Err(AnsError::ServiceNotConnected));
}

#[test]
fn dead_object_drops_connection_and_broadcasts_died() {
    let (remote, client) = mock_client();
    client.connect().unwrap();
    let subscription = client.subscribe(None).unwrap();

    remote.queue_error(TransportError::DeadObject);
    assert_eq!(client.cancel_all(), Err(AnsError::DeadObject));

    // Connection was demoted; later calls fail fast until reconnect.
    assert!(!client.is_connected());
    assert_eq!(client.cancel_all(), Err(AnsError::ServiceNotConnected));

    // The subscription registered before the death sees the broadcast.
    assert_eq!(subscription.try_recv(), Some(NotificationEvent::Died));

    client.connect().unwrap();
    assert_eq!(client.cancel_all(), Ok(()));
}

#[test]
fn transact_failure_does_not_drop_connection() {
    let (remote, client) = mock_client();
    client.connect().unwrap();

    remote.queue_error(TransportError::Failed(-22));
    assert_eq!(client.cancel_all(), Err(AnsError::TransactFailed(-22)));
    assert!(client.is_connected());
}
