use tokio::sync::{Mutex, watch};
use wordbowl_core::{Envelope, GameState, Payload, Player, apply};
use wordbowl_net::LinkContext;

/// State shared between a [`GameService`](crate::GameService) handle and the
/// behavior hooks running inside the service loops. All mutation goes
/// through the methods here so the watch channel never misses an update.
pub(crate) struct GameInner {
    pub(crate) local: Mutex<Player>,
    pub(crate) state: Mutex<GameState>,
    pub(crate) state_tx: watch::Sender<GameState>,
}

impl GameInner {
    pub(crate) fn new(local: Player, state: GameState) -> Self {
        let (state_tx, _) = watch::channel(state.clone());
        Self {
            local: Mutex::new(local),
            state: Mutex::new(state),
            state_tx,
        }
    }

    /// Run one protocol message through the dispatch table and publish the
    /// resulting state to watchers.
    pub(crate) async fn apply_and_publish(&self, envelope: &Envelope) -> GameState {
        let mut state = self.state.lock().await;
        apply(&mut state, envelope);
        let snapshot = state.clone();
        drop(state);

        let _ = self.state_tx.send(snapshot.clone());
        snapshot
    }

    /// Direct host-side mutation (phase transitions and round setup that are
    /// local calls rather than wire methods).
    pub(crate) async fn mutate_and_publish(
        &self,
        mutate: impl FnOnce(&mut GameState),
    ) -> GameState {
        let mut state = self.state.lock().await;
        mutate(&mut state);
        let snapshot = state.clone();
        drop(state);

        let _ = self.state_tx.send(snapshot.clone());
        snapshot
    }

    /// Replace the mirror wholesale (client side of SYNC).
    pub(crate) async fn replace_and_publish(&self, snapshot: GameState) {
        *self.state.lock().await = snapshot.clone();
        let _ = self.state_tx.send(snapshot);
    }

    pub(crate) async fn local_id(&self) -> wordbowl_core::PeerId {
        self.local.lock().await.id.clone()
    }
}

/// Re-broadcast the entire current state to every open link. No diffing:
/// receivers replace their copy wholesale.
pub(crate) async fn broadcast_sync(inner: &GameInner, ctx: &LinkContext) {
    let snapshot = inner.state.lock().await.clone();
    let sender_id = inner.local_id().await;
    ctx.send_to_all_except(&Envelope::new(sender_id, Payload::Sync(snapshot)), &[])
        .await;
}
