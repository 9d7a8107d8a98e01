//! End-to-end subscribe flow: proxy registration, inbound events, fan-out.

mod common;

use notibus::model::{NotificationSortingMap, NotificationSubscribeInfo, RemoveReason};
use notibus::parcel::Parcelable;
use notibus::proxy::ManagerRequest;
use notibus::subscriber::SubscriberRequest;
use notibus::{AnsError, NotificationEvent};

use common::{inbound_parcel, mock_client, notification_for};

#[test]
fn subscribe_registers_callback_handle_with_service() {
    let (remote, client) = mock_client();
    client.connect().unwrap();

    let _subscription = client.subscribe(None).unwrap();

    let requests = remote.take_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].code, ManagerRequest::Subscribe as u32);

    let mut data = requests[0].data.clone();
    data.read_interface_token(notibus::proxy::MANAGER_INTERFACE_TOKEN)
        .unwrap();
    assert_eq!(
        data.read_remote_handle().unwrap(),
        client.subscriber_handle()
    );
    assert!(!data.read_bool().unwrap());
}

#[test]
fn subscribe_fails_while_disconnected() {
    let (remote, client) = mock_client();
    assert_eq!(
        client.subscribe(None).map(drop),
        Err(AnsError::ServiceNotConnected)
    );
    assert_eq!(remote.request_count(), 0);
}

#[test]
fn inbound_consumed_event_reaches_subscription() {
    let (_remote, client) = mock_client();
    client.connect().unwrap();
    let subscription = client.subscribe(None).unwrap();

    let notification = notification_for("com.example.mail", 1);
    let pushed = notification.clone();
    let mut data = inbound_parcel(move |parcel| {
        pushed.write_to(parcel).unwrap();
    });
    client
        .subscriber_stub()
        .on_remote_request(SubscriberRequest::OnConsumed as u32, &mut data)
        .unwrap();

    assert_eq!(
        subscription.try_recv(),
        Some(NotificationEvent::Consumed {
            notification,
            sorting_map: None,
        })
    );
}

#[test]
fn filtered_subscription_only_sees_matching_bundles() {
    let (_remote, client) = mock_client();
    client.connect().unwrap();
    let info = NotificationSubscribeInfo::for_app("com.example.mail");
    let subscription = client.subscribe(Some(&info)).unwrap();
    let stub = client.subscriber_stub();

    let other = notification_for("com.example.chat", 2);
    let mut data = inbound_parcel(move |parcel| {
        other.write_to(parcel).unwrap();
    });
    stub.on_remote_request(SubscriberRequest::OnConsumed as u32, &mut data)
        .unwrap();
    assert_eq!(subscription.try_recv(), None);

    let matching = notification_for("com.example.mail", 3);
    let pushed = matching.clone();
    let mut data = inbound_parcel(move |parcel| {
        pushed.write_to(parcel).unwrap();
        NotificationSortingMap::default().write_to(parcel).unwrap();
        parcel.write_i32(RemoveReason::Cancel.as_i32()).unwrap();
    });
    stub.on_remote_request(SubscriberRequest::OnCanceledWithSortingMap as u32, &mut data)
        .unwrap();
    assert_eq!(
        subscription.try_recv(),
        Some(NotificationEvent::Canceled {
            notification: matching,
            sorting_map: Some(NotificationSortingMap::default()),
            reason: RemoveReason::Cancel,
        })
    );
}

#[test]
fn unsubscribe_stops_delivery() {
    let (remote, client) = mock_client();
    client.connect().unwrap();
    let subscription = client.subscribe(None).unwrap();
    client.unsubscribe(&subscription, None).unwrap();

    let requests = remote.take_requests();
    assert_eq!(requests[1].code, ManagerRequest::Unsubscribe as u32);

    let notification = notification_for("com.example.mail", 4);
    let mut data = inbound_parcel(move |parcel| {
        notification.write_to(parcel).unwrap();
    });
    client
        .subscriber_stub()
        .on_remote_request(SubscriberRequest::OnConsumed as u32, &mut data)
        .unwrap();
    assert_eq!(subscription.try_recv(), None);
}

#[test]
fn connection_lifecycle_events_bypass_filters() {
    let (_remote, client) = mock_client();
    client.connect().unwrap();
    let info = NotificationSubscribeInfo::for_app("com.example.mail");
    let subscription = client.subscribe(Some(&info)).unwrap();

    let mut data = inbound_parcel(|_| {});
    client
        .subscriber_stub()
        .on_remote_request(SubscriberRequest::OnConnected as u32, &mut data)
        .unwrap();
    assert_eq!(subscription.try_recv(), Some(NotificationEvent::Connected));
}
