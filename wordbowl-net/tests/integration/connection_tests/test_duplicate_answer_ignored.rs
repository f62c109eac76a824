use crate::integration::{init_tracing, local_config};
use tokio::sync::mpsc;
use wordbowl_core::PeerId;
use wordbowl_net::PeerLink;

// The answer document can be delivered more than once by a replaying feed;
// only the first application may touch the connection.
#[tokio::test]
async fn test_duplicate_answer_ignored() {
    init_tracing();

    let (host_tx, _host_rx) = mpsc::channel(16);
    let (client_tx, _client_rx) = mpsc::channel(16);
    let peer_id = PeerId::new();

    let host_link = PeerLink::new_offering(peer_id.clone(), local_config(), host_tx)
        .await
        .expect("offering link");
    let client_link = PeerLink::new_answering(peer_id, local_config(), client_tx)
        .await
        .expect("answering link");

    let offer = host_link.create_offer().await.expect("create offer");
    let answer = client_link.answer_offer(&offer).await.expect("answer offer");

    host_link.accept_answer(&answer).await.expect("first answer");
    host_link
        .accept_answer(&answer)
        .await
        .expect("duplicate answer must be a no-op");

    let _ = host_link.close().await;
    let _ = client_link.close().await;
}
