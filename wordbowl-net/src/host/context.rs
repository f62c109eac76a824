use bytes::Bytes;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::error;
use webrtc::data_channel::RTCDataChannel;
use webrtc::data_channel::data_channel_state::RTCDataChannelState;
use wordbowl_core::{Envelope, PeerId};

/// Handle over the host's open peer links. Safe to clone and hand to the
/// game layer; delivery is fire-and-forget with no acknowledgement or retry.
#[derive(Clone)]
pub struct LinkContext {
    channels: Arc<DashMap<PeerId, Arc<RTCDataChannel>>>,
}

impl LinkContext {
    pub(crate) fn new(channels: Arc<DashMap<PeerId, Arc<RTCDataChannel>>>) -> Self {
        Self { channels }
    }

    /// Unicast/multicast to an explicit allow-list. Peers without an open
    /// channel are silently skipped.
    pub async fn send_to_players(&self, envelope: &Envelope, player_ids: &[PeerId]) {
        let Some(data) = encode(envelope) else { return };

        for peer_id in player_ids {
            // clone out of the map so no guard is held across the send
            let channel = self.channels.get(peer_id).map(|entry| entry.value().clone());
            let Some(channel) = channel else { continue };
            if channel.ready_state() != RTCDataChannelState::Open {
                continue;
            }
            if let Err(e) = channel.send(&data).await {
                error!(%peer_id, error = %e, "failed to send to player");
            }
        }
    }

    /// Broadcast to every open channel not in the exclusion set.
    pub async fn send_to_all_except(&self, envelope: &Envelope, excluded: &[PeerId]) {
        let Some(data) = encode(envelope) else { return };

        let mut recipients = Vec::new();
        for entry in self.channels.iter() {
            if excluded.contains(entry.key()) {
                continue;
            }
            if entry.value().ready_state() != RTCDataChannelState::Open {
                continue;
            }
            recipients.push((entry.key().clone(), entry.value().clone()));
        }

        for (peer_id, channel) in recipients {
            let data = data.clone();
            tokio::spawn(async move {
                if let Err(e) = channel.send(&data).await {
                    error!(%peer_id, error = %e, "broadcast send failed");
                }
            });
        }
    }

    pub fn connected_peers(&self) -> Vec<PeerId> {
        self.channels
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn is_open(&self, peer_id: &PeerId) -> bool {
        self.channels
            .get(peer_id)
            .is_some_and(|entry| entry.value().ready_state() == RTCDataChannelState::Open)
    }
}

fn encode(envelope: &Envelope) -> Option<Bytes> {
    match serde_json::to_vec(envelope) {
        Ok(bytes) => Some(Bytes::from(bytes)),
        Err(e) => {
            error!(method = envelope.method(), error = %e, "failed to encode envelope");
            None
        }
    }
}
