use crate::host::HostShared;
use crate::store::CandidateSide;
use crate::transport::{PeerLink, TransportEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use wordbowl_core::{PeerId, RoomId};

/// Host half of the signaling exchange for one join request: post the offer,
/// then keep applying the answer and the client's candidates as they appear.
///
/// There is no timeout or rollback — a client that never answers parks this
/// task until `disconnect()` aborts it, mirroring the store's own
/// no-expiry semantics.
pub(crate) async fn run_host_exchange(
    shared: Arc<HostShared>,
    room: RoomId,
    peer_id: PeerId,
    event_tx: mpsc::Sender<TransportEvent>,
) {
    info!(%peer_id, %room, "starting host signaling exchange");

    // A second request under an id we already serve replaces the old link.
    if let Some((_, stale)) = shared.links.remove(&peer_id) {
        warn!(%peer_id, "replacing existing link for re-joining peer");
        shared.channels.remove(&peer_id);
        let _ = stale.close().await;
    }

    let link =
        match PeerLink::new_offering(peer_id.clone(), shared.config.clone(), event_tx).await {
            Ok(link) => link,
            Err(e) => {
                error!(%peer_id, error = %e, "failed to create transport");
                return;
            }
        };
    shared.links.insert(peer_id.clone(), link.clone());

    let offer = match link.create_offer().await {
        Ok(offer) => offer,
        Err(e) => {
            error!(%peer_id, error = %e, "failed to create offer");
            return;
        }
    };
    if let Err(e) = shared.store.set_offer(&room, &peer_id, &offer).await {
        error!(%peer_id, error = %e, "failed to post offer");
        return;
    }

    let mut document_rx = match shared.store.watch_join_request(&room, &peer_id).await {
        Ok(rx) => rx,
        Err(e) => {
            error!(%peer_id, error = %e, "failed to watch join request");
            return;
        }
    };
    let mut candidate_rx = match shared
        .store
        .watch_candidates(&room, &peer_id, CandidateSide::Answer)
        .await
    {
        Ok(rx) => rx,
        Err(e) => {
            error!(%peer_id, error = %e, "failed to watch answer candidates");
            return;
        }
    };

    // The client's candidates can beat its answer onto the store; hold
    // them until the remote description is in place.
    let mut accepted = false;
    let mut pending: Vec<String> = Vec::new();

    loop {
        tokio::select! {
            snapshot = document_rx.recv() => match snapshot {
                Some(snapshot) => {
                    // accept_answer ignores duplicates once a remote
                    // description is set
                    let Some(answer) = &snapshot.answer else {
                        continue;
                    };
                    if let Err(e) = link.accept_answer(answer).await {
                        error!(%peer_id, error = %e, "failed to apply answer");
                        continue;
                    }
                    if !accepted {
                        accepted = true;
                        for candidate in pending.drain(..) {
                            if let Err(e) = link.add_remote_candidate(&candidate).await {
                                warn!(%peer_id, error = %e, "failed to add answer candidate");
                            }
                        }
                    }
                }
                None => break,
            },

            candidate = candidate_rx.recv() => match candidate {
                Some(candidate) => {
                    if !accepted {
                        pending.push(candidate);
                        continue;
                    }
                    if let Err(e) = link.add_remote_candidate(&candidate).await {
                        warn!(%peer_id, error = %e, "failed to add answer candidate");
                    }
                }
                None => break,
            },
        }
    }
}
