use crate::client::behavior::ClientBehavior;
use crate::client::context::ClientContext;
use crate::error::JoinError;
use crate::signaling::run_client_exchange;
use crate::store::{CandidateSide, SignalingStore};
use crate::transport::{PeerLink, TransportConfig, TransportEvent};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use webrtc::data_channel::RTCDataChannel;
use wordbowl_core::{Envelope, PeerId, RoomId};

/// Client side of the star topology: exactly one peer link, to the host.
pub struct ClientService {
    store: Arc<dyn SignalingStore>,
    config: TransportConfig,
    behavior: Arc<dyn ClientBehavior>,
    channel: Arc<Mutex<Option<Arc<RTCDataChannel>>>>,
    link: Mutex<Option<PeerLink>>,
    ctx: Mutex<Option<ClientContext>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl ClientService {
    pub fn new(
        store: Arc<dyn SignalingStore>,
        config: TransportConfig,
        behavior: Arc<dyn ClientBehavior>,
    ) -> Self {
        Self {
            store,
            config,
            behavior,
            channel: Arc::new(Mutex::new(None)),
            link: Mutex::new(None),
            ctx: Mutex::new(None),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Execute the client half of the signaling exchange against the given
    /// room. Resolves with the assigned peer id once the data channel opens;
    /// there is no signaling timeout, so a dead room id never resolves.
    pub async fn request_join(&self, room: &RoomId) -> Result<PeerId, JoinError> {
        if self.link.lock().await.is_some() {
            return Err(JoinError::AlreadyJoined);
        }
        if !self.store.room_exists(room).await? {
            return Err(JoinError::RoomNotFound(room.clone()));
        }

        let peer_id = self.store.create_join_request(room).await?;
        info!(%peer_id, %room, "posted join request");

        let (event_tx, event_rx) = mpsc::channel(256);
        let link = PeerLink::new_answering(peer_id.clone(), self.config.clone(), event_tx)
            .await
            .map_err(JoinError::Transport)?;
        *self.link.lock().await = Some(link.clone());

        let ctx = ClientContext::new(peer_id.clone(), self.channel.clone());
        *self.ctx.lock().await = Some(ctx.clone());

        let (open_tx, open_rx) = oneshot::channel();

        let mut tasks = self.tasks.lock().await;
        tasks.push(tokio::spawn(run_event_loop(
            ctx,
            self.behavior.clone(),
            self.store.clone(),
            room.clone(),
            peer_id.clone(),
            event_rx,
            open_tx,
        )));
        tasks.push(tokio::spawn(run_client_exchange(
            self.store.clone(),
            room.clone(),
            peer_id.clone(),
            link,
        )));
        drop(tasks);

        open_rx.await.map_err(|_| JoinError::ChannelClosed)?;
        info!(%peer_id, %room, "joined; data channel open");
        Ok(peer_id)
    }

    pub async fn send_to_host(&self, envelope: &Envelope) {
        match self.ctx.lock().await.clone() {
            Some(ctx) => ctx.send_to_host(envelope).await,
            None => warn!(
                method = envelope.method(),
                "not joined; message to host dropped"
            ),
        }
    }

    pub async fn peer_id(&self) -> Option<PeerId> {
        self.ctx.lock().await.as_ref().map(|c| c.peer_id().clone())
    }

    /// Close the link and stop the watcher tasks. Idempotent.
    pub async fn disconnect(&self) {
        for task in self.tasks.lock().await.drain(..) {
            task.abort();
        }
        if let Some(link) = self.link.lock().await.take() {
            let _ = link.close().await;
        }
        *self.channel.lock().await = None;
        *self.ctx.lock().await = None;
        info!("client disconnected");
    }
}

async fn run_event_loop(
    ctx: ClientContext,
    behavior: Arc<dyn ClientBehavior>,
    store: Arc<dyn SignalingStore>,
    room: RoomId,
    peer_id: PeerId,
    mut event_rx: mpsc::Receiver<TransportEvent>,
    open_tx: oneshot::Sender<()>,
) {
    let mut open_tx = Some(open_tx);

    while let Some(event) = event_rx.recv().await {
        match event {
            TransportEvent::ChannelOpen(_, channel) => {
                ctx.set_channel(channel).await;
                if let Some(tx) = open_tx.take() {
                    let _ = tx.send(());
                }
                behavior.on_channel_open(&ctx).await;
            }

            TransportEvent::Message(_, data) => match serde_json::from_slice::<Envelope>(&data) {
                Ok(envelope) => behavior.on_message(&ctx, envelope).await,
                Err(e) => warn!(error = %e, "dropping undecodable frame from host"),
            },

            TransportEvent::CandidateGenerated(_, candidate) => {
                if let Err(e) = store
                    .append_candidate(&room, &peer_id, CandidateSide::Answer, &candidate)
                    .await
                {
                    warn!(error = %e, "failed to publish answer candidate");
                }
            }

            TransportEvent::Disconnected(_) => {
                info!("link to host closed");
                ctx.clear_channel().await;
            }
        }
    }
}
