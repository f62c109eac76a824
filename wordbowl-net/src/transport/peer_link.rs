use crate::store::SessionDescription;
use crate::transport::transport_config::TransportConfig;
use crate::transport::transport_event::TransportEvent;
use anyhow::{Context, Result};
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::data_channel::RTCDataChannel;
use webrtc::data_channel::data_channel_message::DataChannelMessage;
use webrtc::ice_transport::ice_candidate::RTCIceCandidate;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use wordbowl_core::{GAME_CHANNEL_LABEL, PeerId};

/// One end of a host-client transport session: the peer connection plus the
/// single bidirectional game data channel. The host side creates the channel
/// and the offer; the client side receives the channel and answers.
///
/// Cheap to clone; all clones drive the same underlying connection.
#[derive(Clone)]
pub struct PeerLink {
    pub peer_id: PeerId,
    peer_connection: Arc<RTCPeerConnection>,
}

impl PeerLink {
    /// Host side: allocate the connection and the game data channel.
    /// `event_tx` receives everything the link produces for the service loop.
    pub async fn new_offering(
        peer_id: PeerId,
        config: TransportConfig,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Result<Self> {
        let peer_connection = build_peer_connection(&config).await?;
        register_connection_callbacks(&peer_connection, &peer_id, &event_tx);

        let channel = peer_connection
            .create_data_channel(GAME_CHANNEL_LABEL, None)
            .await
            .context("failed to create game data channel")?;
        register_channel_callbacks(&channel, &peer_id, &event_tx);

        Ok(Self {
            peer_id,
            peer_connection,
        })
    }

    /// Client side: allocate the connection and wait for the host's channel
    /// to arrive via `on_data_channel`.
    pub async fn new_answering(
        peer_id: PeerId,
        config: TransportConfig,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Result<Self> {
        let peer_connection = build_peer_connection(&config).await?;
        register_connection_callbacks(&peer_connection, &peer_id, &event_tx);

        let dc_peer_id = peer_id.clone();
        let dc_tx = event_tx.clone();
        peer_connection.on_data_channel(Box::new(move |channel: Arc<RTCDataChannel>| {
            let peer_id = dc_peer_id.clone();
            let event_tx = dc_tx.clone();

            Box::pin(async move {
                debug!(label = %channel.label(), %peer_id, "incoming data channel");
                register_channel_callbacks(&channel, &peer_id, &event_tx);
            })
        }));

        Ok(Self {
            peer_id,
            peer_connection,
        })
    }

    /// Create the SDP offer and install it as the local description.
    pub async fn create_offer(&self) -> Result<SessionDescription> {
        let offer = self.peer_connection.create_offer(None).await?;
        self.peer_connection
            .set_local_description(offer.clone())
            .await?;
        Ok(SessionDescription::offer(offer.sdp))
    }

    /// Apply the remote offer and produce the local answer.
    pub async fn answer_offer(&self, remote: &SessionDescription) -> Result<SessionDescription> {
        let desc = RTCSessionDescription::offer(remote.sdp.clone())?;
        self.peer_connection.set_remote_description(desc).await?;

        let answer = self.peer_connection.create_answer(None).await?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    /// Apply the remote answer. Idempotent: once a remote description is
    /// set, later copies of the answer document are ignored.
    pub async fn accept_answer(&self, remote: &SessionDescription) -> Result<()> {
        if self.peer_connection.remote_description().await.is_some() {
            debug!(peer_id = %self.peer_id, "remote description already set; duplicate answer ignored");
            return Ok(());
        }

        let desc = RTCSessionDescription::answer(remote.sdp.clone())?;
        self.peer_connection.set_remote_description(desc).await?;
        Ok(())
    }

    /// Add a remote candidate observed on the counterpart's sub-collection.
    pub async fn add_remote_candidate(&self, candidate_json: &str) -> Result<()> {
        let candidate: webrtc::ice_transport::ice_candidate::RTCIceCandidateInit =
            serde_json::from_str(candidate_json).context("failed to parse ICE candidate JSON")?;
        self.peer_connection.add_ice_candidate(candidate).await?;
        Ok(())
    }

    pub async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}

async fn build_peer_connection(config: &TransportConfig) -> Result<Arc<RTCPeerConnection>> {
    let mut media_engine = MediaEngine::default();
    media_engine.register_default_codecs()?;
    let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

    let api = APIBuilder::new()
        .with_media_engine(media_engine)
        .with_interceptor_registry(registry)
        .build();

    let ice_servers = if config.ice_servers.is_empty() {
        vec![]
    } else {
        vec![RTCIceServer {
            urls: config.ice_servers.clone(),
            ..Default::default()
        }]
    };

    let rtc_config = RTCConfiguration {
        ice_servers,
        ..Default::default()
    };

    Ok(Arc::new(api.new_peer_connection(rtc_config).await?))
}

fn register_connection_callbacks(
    peer_connection: &Arc<RTCPeerConnection>,
    peer_id: &PeerId,
    event_tx: &mpsc::Sender<TransportEvent>,
) {
    // Connection-level failure is the only disconnect signal besides the
    // channel's own close event; the service loop deduplicates.
    let state_peer_id = peer_id.clone();
    let state_tx = event_tx.clone();
    peer_connection.on_peer_connection_state_change(Box::new(
        move |state: RTCPeerConnectionState| {
            let peer_id = state_peer_id.clone();
            let event_tx = state_tx.clone();

            Box::pin(async move {
                info!(%peer_id, ?state, "peer connection state changed");
                match state {
                    RTCPeerConnectionState::Failed
                    | RTCPeerConnectionState::Disconnected
                    | RTCPeerConnectionState::Closed => {
                        let _ = event_tx.send(TransportEvent::Disconnected(peer_id)).await;
                    }
                    _ => {}
                }
            })
        },
    ));

    // Trickle ICE: every local candidate goes out through the service loop,
    // which appends it to this side's candidate sub-collection.
    let ice_peer_id = peer_id.clone();
    let ice_tx = event_tx.clone();
    peer_connection.on_ice_candidate(Box::new(move |candidate: Option<RTCIceCandidate>| {
        let peer_id = ice_peer_id.clone();
        let event_tx = ice_tx.clone();

        Box::pin(async move {
            let Some(candidate) = candidate else { return };
            let Ok(json_candidate) = candidate.to_json() else {
                return;
            };
            let Ok(serialized) = serde_json::to_string(&json_candidate) else {
                return;
            };
            let _ = event_tx
                .send(TransportEvent::CandidateGenerated(peer_id, serialized))
                .await;
        })
    }));
}

fn register_channel_callbacks(
    channel: &Arc<RTCDataChannel>,
    peer_id: &PeerId,
    event_tx: &mpsc::Sender<TransportEvent>,
) {
    let open_channel = channel.clone();
    let open_peer_id = peer_id.clone();
    let open_tx = event_tx.clone();
    channel.on_open(Box::new(move || {
        let channel = open_channel.clone();
        let peer_id = open_peer_id.clone();
        let event_tx = open_tx.clone();

        Box::pin(async move {
            info!(%peer_id, "data channel open");
            let _ = event_tx
                .send(TransportEvent::ChannelOpen(peer_id, channel))
                .await;
        })
    }));

    let msg_peer_id = peer_id.clone();
    let msg_tx = event_tx.clone();
    channel.on_message(Box::new(move |message: DataChannelMessage| {
        let peer_id = msg_peer_id.clone();
        let event_tx = msg_tx.clone();

        Box::pin(async move {
            let data = Bytes::from(message.data.to_vec());
            let _ = event_tx.send(TransportEvent::Message(peer_id, data)).await;
        })
    }));

    let close_peer_id = peer_id.clone();
    let close_tx = event_tx.clone();
    channel.on_close(Box::new(move || {
        let peer_id = close_peer_id.clone();
        let event_tx = close_tx.clone();

        Box::pin(async move {
            info!(%peer_id, "data channel closed");
            let _ = event_tx.send(TransportEvent::Disconnected(peer_id)).await;
        })
    }));
}
