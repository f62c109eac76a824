use crate::integration::{init_tracing, join_client, start_host};
use std::sync::Arc;
use wordbowl_net::MemoryStore;

#[tokio::test(flavor = "multi_thread")]
async fn test_two_clients_join() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());

    let (room, host, host_behavior) = start_host(store.clone()).await;
    let (first_id, first, _) = join_client(store.clone(), &room).await;
    let (second_id, second, _) = join_client(store, &room).await;
    assert_ne!(first_id, second_id);

    assert!(host_behavior.wait_for_events(2, 10_000).await);
    assert_eq!(host_behavior.join_count().await, 2);
    assert!(host_behavior.has_join(&first_id).await);
    assert!(host_behavior.has_join(&second_id).await);

    let connected = host.context().connected_peers();
    assert_eq!(connected.len(), 2);

    first.disconnect().await;
    second.disconnect().await;
    host.disconnect().await;
}
