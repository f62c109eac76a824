use crate::integration::{init_tracing, join_client, start_host};
use crate::utils::HostEvent;
use std::sync::Arc;
use wordbowl_net::MemoryStore;

#[tokio::test(flavor = "multi_thread")]
async fn test_client_disconnect_notifies_host() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());

    let (room, host, host_behavior) = start_host(store.clone()).await;
    let (peer_id, client, _client_behavior) = join_client(store, &room).await;
    assert!(host_behavior.wait_for_events(1, 10_000).await);

    client.disconnect().await;

    assert!(
        host_behavior.wait_for_events(2, 10_000).await,
        "host never saw the leave"
    );
    let events = host_behavior.get_events().await;
    assert!(
        events
            .iter()
            .any(|e| matches!(e, HostEvent::Left(id) if *id == peer_id)),
        "expected a leave event for {peer_id}"
    );
    assert!(!host.context().is_open(&peer_id));

    host.disconnect().await;
}
