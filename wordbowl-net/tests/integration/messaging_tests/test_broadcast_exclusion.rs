use crate::integration::{init_tracing, join_client, start_host};
use std::sync::Arc;
use std::time::Duration;
use wordbowl_core::{Envelope, Payload, PeerId};
use wordbowl_net::MemoryStore;

#[tokio::test(flavor = "multi_thread")]
async fn test_broadcast_exclusion() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());

    let (room, host, host_behavior) = start_host(store.clone()).await;
    let (first_id, first, first_behavior) = join_client(store.clone(), &room).await;
    let (_second_id, second, second_behavior) = join_client(store, &room).await;
    assert!(host_behavior.wait_for_events(2, 10_000).await);

    let envelope = Envelope::new(PeerId::new(), Payload::UpdateTurn {});
    host.send_to_all_except(&envelope, &[first_id]).await;

    assert!(
        second_behavior.wait_for_messages(1, 10_000).await,
        "non-excluded client never got the broadcast"
    );
    assert_eq!(second_behavior.get_messages().await[0].method(), "UPDATE_TURN");

    // give a stray delivery time to surface before asserting absence
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(first_behavior.message_count().await, 0);

    first.disconnect().await;
    second.disconnect().await;
    host.disconnect().await;
}
