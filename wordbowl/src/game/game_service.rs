use crate::game::client_game::ClientGame;
use crate::game::host_game::HostGame;
use crate::game::inner::{GameInner, broadcast_sync};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;
use wordbowl_core::{
    Envelope, GamePhase, GameState, Payload, PlayWordAction, Player, RoomId, TeamId,
};
use wordbowl_net::{
    ClientService, HostError, HostService, JoinError, SignalingStore, TransportConfig,
};

enum Role {
    Host(Arc<HostService>),
    Client(Arc<ClientService>),
}

/// Consumer-facing game API. One instance per participant: the host's
/// instance owns the authoritative state and fans out SYNC after every
/// mutation; a client's instance relays its calls to the host and mirrors
/// whatever comes back.
pub struct GameService {
    inner: Arc<GameInner>,
    role: Role,
}

impl GameService {
    /// Create a room and become its host. The host's own player is the
    /// first entry of the player list.
    pub async fn host_game(
        store: Arc<dyn SignalingStore>,
        config: TransportConfig,
        name: impl Into<String>,
    ) -> Result<(RoomId, Self), HostError> {
        let local = Player::new_host(name);
        let mut state = GameState::default();
        state.add_player(local.clone());
        state.init_teams();

        let inner = Arc::new(GameInner::new(local, state));
        let behavior = Arc::new(HostGame {
            inner: inner.clone(),
        });
        let service = Arc::new(HostService::new(store, config, behavior));
        let room = service.create_room().await?;

        Ok((
            room,
            Self {
                inner,
                role: Role::Host(service),
            },
        ))
    }

    /// Join an existing room as a client. Resolves once the channel to the
    /// host is open and the JOIN message is on its way; the local mirror
    /// stays empty until the first SYNC lands.
    pub async fn join_game(
        store: Arc<dyn SignalingStore>,
        config: TransportConfig,
        room: &RoomId,
        name: impl Into<String>,
    ) -> Result<Self, JoinError> {
        // placeholder id; the store assigns the real one at join-request
        // creation and on_channel_open installs it
        let local = Player::new(wordbowl_core::PeerId::new(), name);

        let inner = Arc::new(GameInner::new(local, GameState::default()));
        let behavior = Arc::new(ClientGame {
            inner: inner.clone(),
        });
        let service = Arc::new(ClientService::new(store, config, behavior));

        let assigned = service.request_join(room).await?;
        inner.local.lock().await.id = assigned;

        Ok(Self {
            inner,
            role: Role::Client(service),
        })
    }

    pub fn is_host(&self) -> bool {
        matches!(self.role, Role::Host(_))
    }

    pub async fn local_player(&self) -> Player {
        self.inner.local.lock().await.clone()
    }

    pub async fn state(&self) -> GameState {
        self.inner.state.lock().await.clone()
    }

    /// Observe every state change: local mutations on the host, applied
    /// SYNCs on a client. Phase changes surface here.
    pub fn watch_state(&self) -> watch::Receiver<GameState> {
        self.inner.state_tx.subscribe()
    }

    pub async fn join_team(&self, team_id: TeamId) {
        let player_id = self.inner.local_id().await;
        self.dispatch(Payload::JoinTeam { team_id, player_id }).await;
    }

    pub async fn play_word(&self, action: PlayWordAction) {
        let player_id = self.inner.local_id().await;
        let team_id = {
            let state = self.inner.state.lock().await;
            state
                .players
                .iter()
                .find(|p| p.id == player_id)
                .and_then(|p| p.team_id)
        };
        let Some(team_id) = team_id else {
            warn!("local player has no team; play_word ignored");
            return;
        };

        self.dispatch(Payload::PlayWord {
            action,
            team_id,
            player_id,
        })
        .await;
    }

    pub async fn update_turn(&self) {
        self.dispatch(Payload::UpdateTurn {}).await;
    }

    pub async fn update_words(&self, reset: bool, words: Vec<String>) {
        self.dispatch(Payload::UpdateWords { reset, words }).await;
    }

    pub async fn toggle_pause(&self) {
        self.dispatch(Payload::TogglePause {}).await;
    }

    pub async fn restart_game(&self) {
        self.dispatch(Payload::Restart {}).await;
    }

    /// Advance to the next phase. Phase transitions are direct local calls
    /// on the host; clients observe them through the SYNC that follows.
    pub async fn go_to_next_phase(&self) {
        self.host_mutation("go_to_next_phase", |state| state.next_phase())
            .await;
    }

    pub async fn go_to_begin_game(&self) {
        self.host_mutation("go_to_begin_game", |state| {
            state.phase = GamePhase::BeginGame;
        })
        .await;
    }

    /// Start the playing round: set up turn rotation, put the first word in
    /// play, and move to the playing-word phase.
    pub async fn go_to_playing_word(&self) {
        self.host_mutation("go_to_playing_word", |state| {
            state.init_round();
            state.phase = GamePhase::PlayingWord;
        })
        .await;
    }

    pub async fn disconnect(&self) {
        match &self.role {
            Role::Host(service) => service.disconnect().await,
            Role::Client(service) => service.disconnect().await,
        }
    }

    async fn dispatch(&self, payload: Payload) {
        let envelope = Envelope::new(self.inner.local_id().await, payload);
        match &self.role {
            Role::Host(service) => {
                self.inner.apply_and_publish(&envelope).await;
                broadcast_sync(&self.inner, &service.context()).await;
            }
            Role::Client(service) => service.send_to_host(&envelope).await,
        }
    }

    async fn host_mutation(&self, what: &str, mutate: impl FnOnce(&mut GameState)) {
        let Role::Host(service) = &self.role else {
            warn!(call = what, "phase transitions are host-driven; ignored");
            return;
        };

        self.inner.mutate_and_publish(mutate).await;
        broadcast_sync(&self.inner, &service.context()).await;
    }
}
