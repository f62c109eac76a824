use crate::error::HostError;
use crate::host::behavior::HostBehavior;
use crate::host::context::LinkContext;
use crate::signaling::{allocate_room_id, random_room_id, run_host_exchange};
use crate::store::{CandidateSide, SignalingStore};
use crate::transport::{PeerLink, TransportConfig, TransportEvent};
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use webrtc::data_channel::RTCDataChannel;
use wordbowl_core::{Envelope, PeerId, RoomId};

/// Soft watermark for concurrent in-flight signaling exchanges. Fan-out is
/// deliberately unbounded; beyond this we only log.
const IN_FLIGHT_WARN_THRESHOLD: usize = 32;

pub(crate) struct HostShared {
    pub(crate) store: Arc<dyn SignalingStore>,
    pub(crate) config: TransportConfig,
    pub(crate) behavior: Arc<dyn HostBehavior>,
    pub(crate) channels: Arc<DashMap<PeerId, Arc<RTCDataChannel>>>,
    pub(crate) links: Arc<DashMap<PeerId, PeerLink>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    room_id: Mutex<Option<RoomId>>,
    in_flight: AtomicUsize,
}

/// Host side of the star topology: one peer link per connected client,
/// multiplexing inbound messages into the behavior and fanning out sends.
pub struct HostService {
    shared: Arc<HostShared>,
}

impl HostService {
    pub fn new(
        store: Arc<dyn SignalingStore>,
        config: TransportConfig,
        behavior: Arc<dyn HostBehavior>,
    ) -> Self {
        Self {
            shared: Arc::new(HostShared {
                store,
                config,
                behavior,
                channels: Arc::new(DashMap::new()),
                links: Arc::new(DashMap::new()),
                tasks: Mutex::new(Vec::new()),
                room_id: Mutex::new(None),
                in_flight: AtomicUsize::new(0),
            }),
        }
    }

    /// Allocate a unique room id, persist the empty room document, and start
    /// listening for join requests. Fails only on store errors.
    pub async fn create_room(&self) -> Result<RoomId, HostError> {
        let room = allocate_room_id(self.shared.store.as_ref(), random_room_id).await?;
        self.shared.store.create_room(&room).await?;

        let (event_tx, event_rx) = mpsc::channel(256);

        let mut tasks = self.shared.tasks.lock().await;
        tasks.push(tokio::spawn(run_event_loop(
            self.shared.clone(),
            room.clone(),
            event_rx,
        )));
        tasks.push(tokio::spawn(run_join_listener(
            self.shared.clone(),
            room.clone(),
            event_tx,
        )));
        drop(tasks);

        *self.shared.room_id.lock().await = Some(room.clone());
        info!(%room, "created room");
        Ok(room)
    }

    pub async fn room_id(&self) -> Option<RoomId> {
        self.shared.room_id.lock().await.clone()
    }

    /// Clonable send handle over the open links.
    pub fn context(&self) -> LinkContext {
        LinkContext::new(self.shared.channels.clone())
    }

    pub async fn send_to_players(&self, envelope: &Envelope, player_ids: &[PeerId]) {
        self.context().send_to_players(envelope, player_ids).await;
    }

    pub async fn send_to_all_except(&self, envelope: &Envelope, excluded: &[PeerId]) {
        self.context().send_to_all_except(envelope, excluded).await;
    }

    /// Close every channel and connection, stop all listener and signaling
    /// tasks, and forget the room identity. Idempotent.
    pub async fn disconnect(&self) {
        for task in self.shared.tasks.lock().await.drain(..) {
            task.abort();
        }

        let peers: Vec<PeerId> = self
            .shared
            .links
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        for peer_id in peers {
            if let Some((_, link)) = self.shared.links.remove(&peer_id) {
                let _ = link.close().await;
            }
        }
        self.shared.channels.clear();

        *self.shared.room_id.lock().await = None;
        info!("host disconnected");
    }
}

/// Consume the added-only join-request feed, spawning one signaling
/// exchange per request. Requests are processed independently and
/// concurrently, without a cap.
async fn run_join_listener(
    shared: Arc<HostShared>,
    room: RoomId,
    event_tx: mpsc::Sender<TransportEvent>,
) {
    let mut requests = match shared.store.watch_join_requests(&room).await {
        Ok(rx) => rx,
        Err(e) => {
            error!(%room, error = %e, "failed to watch join requests");
            return;
        }
    };
    info!(%room, "listening for join requests");

    while let Some(peer_id) = requests.recv().await {
        info!(%peer_id, "new join request");

        let in_flight = shared.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        if in_flight > IN_FLIGHT_WARN_THRESHOLD {
            warn!(in_flight, "many signaling exchanges in flight");
        }

        let exchange_shared = shared.clone();
        let exchange_room = room.clone();
        let exchange_tx = event_tx.clone();
        let handle = tokio::spawn(async move {
            run_host_exchange(
                exchange_shared.clone(),
                exchange_room,
                peer_id,
                exchange_tx,
            )
            .await;
            exchange_shared.in_flight.fetch_sub(1, Ordering::Relaxed);
        });
        shared.tasks.lock().await.push(handle);
    }
}

/// The single loop through which all shared state is mutated: channel map
/// updates, behavior hooks, and candidate uploads all run here one event at
/// a time.
async fn run_event_loop(
    shared: Arc<HostShared>,
    room: RoomId,
    mut event_rx: mpsc::Receiver<TransportEvent>,
) {
    info!(%room, "host event loop started");
    let ctx = LinkContext::new(shared.channels.clone());

    while let Some(event) = event_rx.recv().await {
        match event {
            TransportEvent::ChannelOpen(peer_id, channel) => {
                info!(%peer_id, "peer fully joined");
                shared.channels.insert(peer_id.clone(), channel);
                shared.behavior.on_peer_joined(&ctx, peer_id).await;
            }

            TransportEvent::Message(peer_id, data) => {
                match serde_json::from_slice::<Envelope>(&data) {
                    Ok(envelope) => shared.behavior.on_message(&ctx, peer_id, envelope).await,
                    Err(e) => warn!(%peer_id, error = %e, "dropping undecodable frame"),
                }
            }

            TransportEvent::CandidateGenerated(peer_id, candidate) => {
                if let Err(e) = shared
                    .store
                    .append_candidate(&room, &peer_id, CandidateSide::Offer, &candidate)
                    .await
                {
                    warn!(%peer_id, error = %e, "failed to publish offer candidate");
                }
            }

            TransportEvent::Disconnected(peer_id) => {
                let was_open = shared.channels.remove(&peer_id).is_some();
                if let Some((_, link)) = shared.links.remove(&peer_id) {
                    let _ = link.close().await;
                }
                if was_open {
                    info!(%peer_id, "peer left");
                    shared.behavior.on_peer_left(&ctx, peer_id).await;
                }
            }
        }
    }

    info!(%room, "host event loop finished");
}
