use serde::{Deserialize, Serialize};
use wordbowl_core::PeerId;

/// An SDP description as stored in a join-request document: `{sdp, type}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDescription {
    pub sdp: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl SessionDescription {
    pub fn offer(sdp: String) -> Self {
        Self {
            sdp,
            kind: "offer".to_owned(),
        }
    }

    pub fn answer(sdp: String) -> Self {
        Self {
            sdp,
            kind: "answer".to_owned(),
        }
    }
}

/// State of one join-request document at some point in time. Candidate
/// sub-collections are watched separately and are not part of the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinRequestSnapshot {
    pub id: PeerId,
    pub offer: Option<SessionDescription>,
    pub answer: Option<SessionDescription>,
}
