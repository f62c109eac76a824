use crate::store::{CandidateSide, SignalingStore};
use crate::transport::PeerLink;
use std::sync::Arc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{error, info, warn};
use wordbowl_core::{PeerId, RoomId};

/// Client half of the signaling exchange: wait for the host's offer on our
/// own join-request document, answer it once, and keep applying the host's
/// candidates. Like the host side, a silent counterpart leaves this parked.
pub(crate) async fn run_client_exchange(
    store: Arc<dyn SignalingStore>,
    room: RoomId,
    peer_id: PeerId,
    link: PeerLink,
) {
    info!(%peer_id, %room, "starting client signaling exchange");

    let mut document_rx = match store.watch_join_request(&room, &peer_id).await {
        Ok(rx) => rx,
        Err(e) => {
            error!(%peer_id, error = %e, "failed to watch join request");
            return;
        }
    };
    let mut candidate_rx = match store
        .watch_candidates(&room, &peer_id, CandidateSide::Offer)
        .await
    {
        Ok(rx) => rx,
        Err(e) => {
            error!(%peer_id, error = %e, "failed to watch offer candidates");
            return;
        }
    };

    // Candidates may land on the feed before the offer itself does; they
    // cannot be applied until the remote description is set.
    let mut answered = false;
    let mut pending: Vec<String> = Vec::new();

    loop {
        tokio::select! {
            snapshot = document_rx.recv() => match snapshot {
                Some(snapshot) => {
                    if answered {
                        continue;
                    }
                    let Some(offer) = &snapshot.offer else {
                        continue;
                    };

                    let answer = match link.answer_offer(offer).await {
                        Ok(answer) => answer,
                        Err(e) => {
                            error!(%peer_id, error = %e, "failed to answer offer");
                            return;
                        }
                    };
                    if let Err(e) = store.set_answer(&room, &peer_id, &answer).await {
                        error!(%peer_id, error = %e, "failed to post answer");
                        return;
                    }
                    answered = true;

                    for candidate in pending.drain(..) {
                        if let Err(e) = link.add_remote_candidate(&candidate).await {
                            warn!(%peer_id, error = %e, "failed to add offer candidate");
                        }
                    }
                }
                None => break,
            },

            candidate = candidate_rx.recv() => match candidate {
                Some(candidate) => {
                    if !answered {
                        pending.push(candidate);
                        continue;
                    }
                    if let Err(e) = link.add_remote_candidate(&candidate).await {
                        warn!(%peer_id, error = %e, "failed to add offer candidate");
                    }
                }
                None => break,
            },
        }
    }

    // Drain whatever is left so late candidates are not lost when one feed
    // closes before the other.
    if answered {
        loop {
            match candidate_rx.try_recv() {
                Ok(candidate) => {
                    if let Err(e) = link.add_remote_candidate(&candidate).await {
                        warn!(%peer_id, error = %e, "failed to add offer candidate");
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}
