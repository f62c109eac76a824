use crate::integration::{init_tracing, join_client, start_host};
use std::sync::Arc;
use wordbowl_net::MemoryStore;

#[tokio::test(flavor = "multi_thread")]
async fn test_client_joins_room() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());

    let (room, host, host_behavior) = start_host(store.clone()).await;
    let (peer_id, client, client_behavior) = join_client(store, &room).await;

    assert!(
        host_behavior.wait_for_events(1, 10_000).await,
        "host never saw the join"
    );
    assert!(host_behavior.has_join(&peer_id).await);
    assert!(host.context().is_open(&peer_id));
    assert!(client_behavior.opened().await);
    assert_eq!(client.peer_id().await, Some(peer_id));

    client.disconnect().await;
    host.disconnect().await;
}
