use crate::integration::{init_tracing, join_client, start_host};
use std::sync::Arc;
use wordbowl_net::MemoryStore;

#[tokio::test(flavor = "multi_thread")]
async fn test_host_disconnect() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());

    let (room, host, host_behavior) = start_host(store.clone()).await;
    let (peer_id, client, _client_behavior) = join_client(store, &room).await;
    assert!(host_behavior.wait_for_events(1, 10_000).await);

    host.disconnect().await;
    assert!(host.room_id().await.is_none());
    assert!(!host.context().is_open(&peer_id));

    // disconnect is idempotent
    host.disconnect().await;
    client.disconnect().await;
}
