use crate::integration::{init_tracing, local_config};
use crate::utils::TestClientBehavior;
use std::sync::Arc;
use wordbowl_core::RoomId;
use wordbowl_net::{ClientService, JoinError, MemoryStore};

#[tokio::test]
async fn test_unknown_room_rejected() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());

    let behavior = TestClientBehavior::new();
    let client = ClientService::new(store, local_config(), Arc::new(behavior));

    let result = client.request_join(&RoomId::from("zz99")).await;
    assert!(matches!(result, Err(JoinError::RoomNotFound(_))));
}
