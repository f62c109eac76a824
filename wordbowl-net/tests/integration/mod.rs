pub mod connection_tests;
pub mod messaging_tests;
pub mod multi_peer_tests;

use crate::utils::{TestClientBehavior, TestHostBehavior};
use std::sync::Arc;
use wordbowl_core::{PeerId, RoomId};
use wordbowl_net::{ClientService, HostService, MemoryStore, TransportConfig};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Loopback transport: no STUN, host candidates only.
pub fn local_config() -> TransportConfig {
    TransportConfig {
        ice_servers: vec![],
    }
}

pub async fn start_host(store: Arc<MemoryStore>) -> (RoomId, HostService, TestHostBehavior) {
    let behavior = TestHostBehavior::new();
    let service = HostService::new(store, local_config(), Arc::new(behavior.clone()));
    let room = service.create_room().await.expect("failed to create room");
    (room, service, behavior)
}

pub async fn join_client(
    store: Arc<MemoryStore>,
    room: &RoomId,
) -> (PeerId, ClientService, TestClientBehavior) {
    let behavior = TestClientBehavior::new();
    let service = ClientService::new(store, local_config(), Arc::new(behavior.clone()));
    let peer_id = service.request_join(room).await.expect("failed to join");
    (peer_id, service, behavior)
}
