use crate::store::{SignalingStore, StoreError};
use rand::Rng;
use tracing::debug;
use wordbowl_core::RoomId;

const ROOM_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ROOM_ID_LEN: usize = 4;

/// Draw a short random room id. Collisions are possible and are handled by
/// the retry loop in [`allocate_room_id`].
pub fn random_room_id() -> RoomId {
    let mut rng = rand::rng();
    let id: String = (0..ROOM_ID_LEN)
        .map(|_| ROOM_ID_ALPHABET[rng.random_range(0..ROOM_ID_ALPHABET.len())] as char)
        .collect();
    RoomId(id)
}

/// Read-before-write uniqueness: draw, check the store, redraw on a hit.
/// Unbounded on purpose — the id space is large enough that repeated
/// collisions mean the store is misbehaving, and store errors bail out.
pub async fn allocate_room_id<F>(
    store: &dyn SignalingStore,
    mut draw: F,
) -> Result<RoomId, StoreError>
where
    F: FnMut() -> RoomId,
{
    loop {
        let candidate = draw();
        if !store.room_exists(&candidate).await? {
            return Ok(candidate);
        }
        debug!(%candidate, "room id taken, drawing again");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn random_ids_have_expected_shape() {
        for _ in 0..100 {
            let id = random_room_id();
            assert_eq!(id.0.len(), 4);
            assert!(id.0.bytes().all(|b| ROOM_ID_ALPHABET.contains(&b)));
        }
    }

    #[tokio::test]
    async fn collision_on_first_draw_retries_exactly_once() {
        let store = MemoryStore::new();
        store.create_room(&RoomId::from("ab1c")).await.unwrap();

        let mut draws = 0;
        let sequence = ["ab1c", "zz99"];
        let id = allocate_room_id(&store, || {
            let id = RoomId::from(sequence[draws]);
            draws += 1;
            id
        })
        .await
        .unwrap();

        assert_eq!(id, RoomId::from("zz99"));
        assert_eq!(draws, 2);
    }

    #[tokio::test]
    async fn first_draw_wins_without_collision() {
        let store = MemoryStore::new();

        let mut draws = 0;
        let id = allocate_room_id(&store, || {
            draws += 1;
            RoomId::from("ab1c")
        })
        .await
        .unwrap();

        assert_eq!(id, RoomId::from("ab1c"));
        assert_eq!(draws, 1);
    }
}
