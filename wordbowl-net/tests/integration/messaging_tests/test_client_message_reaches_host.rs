use crate::integration::{init_tracing, join_client, start_host};
use std::sync::Arc;
use wordbowl_core::{Envelope, Payload, Player};
use wordbowl_net::MemoryStore;

#[tokio::test(flavor = "multi_thread")]
async fn test_client_message_reaches_host() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());

    let (room, host, host_behavior) = start_host(store.clone()).await;
    let (peer_id, client, _client_behavior) = join_client(store, &room).await;
    assert!(host_behavior.wait_for_events(1, 10_000).await);

    let player = Player::new(peer_id.clone(), "alice");
    client
        .send_to_host(&Envelope::new(peer_id.clone(), Payload::JoinGame(player)))
        .await;

    // join event plus the message
    assert!(
        host_behavior.wait_for_events(2, 10_000).await,
        "message never reached the host"
    );

    let messages = host_behavior.messages_from(&peer_id).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].method(), "JOIN_GAME");
    assert_eq!(messages[0].sender_id, peer_id);

    client.disconnect().await;
    host.disconnect().await;
}
