use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, warn};
use webrtc::data_channel::RTCDataChannel;
use webrtc::data_channel::data_channel_state::RTCDataChannelState;
use wordbowl_core::{Envelope, PeerId};

/// Handle over the client's single link to the host. Clients cannot message
/// each other; everything goes up the star through this.
#[derive(Clone)]
pub struct ClientContext {
    peer_id: PeerId,
    channel: Arc<Mutex<Option<Arc<RTCDataChannel>>>>,
}

impl ClientContext {
    pub(crate) fn new(peer_id: PeerId, channel: Arc<Mutex<Option<Arc<RTCDataChannel>>>>) -> Self {
        Self { peer_id, channel }
    }

    /// The id assigned at join-request creation.
    pub fn peer_id(&self) -> &PeerId {
        &self.peer_id
    }

    /// Fire-and-forget send to the host; dropped with a warning if the
    /// channel is missing or not open.
    pub async fn send_to_host(&self, envelope: &Envelope) {
        let data = match serde_json::to_vec(envelope) {
            Ok(bytes) => Bytes::from(bytes),
            Err(e) => {
                error!(method = envelope.method(), error = %e, "failed to encode envelope");
                return;
            }
        };

        let channel = self.channel.lock().await.clone();
        match channel {
            Some(channel) if channel.ready_state() == RTCDataChannelState::Open => {
                if let Err(e) = channel.send(&data).await {
                    error!(error = %e, "failed to send to host");
                }
            }
            _ => warn!(
                method = envelope.method(),
                "no open channel to host; message dropped"
            ),
        }
    }

    pub(crate) async fn set_channel(&self, channel: Arc<RTCDataChannel>) {
        *self.channel.lock().await = Some(channel);
    }

    pub(crate) async fn clear_channel(&self) {
        *self.channel.lock().await = None;
    }
}
