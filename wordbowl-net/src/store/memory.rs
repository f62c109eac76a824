use crate::store::capability::{CandidateSide, SignalingStore, StoreError};
use crate::store::types::{JoinRequestSnapshot, SessionDescription};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{Mutex, mpsc};
use wordbowl_core::{PeerId, RoomId};

/// An append-only collection with replay-then-live subscription semantics.
struct Feed<T: Clone> {
    items: Vec<T>,
    subscribers: Vec<mpsc::UnboundedSender<T>>,
}

impl<T: Clone> Default for Feed<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            subscribers: Vec::new(),
        }
    }
}

impl<T: Clone> Feed<T> {
    fn append(&mut self, item: T) {
        self.items.push(item.clone());
        self.subscribers.retain(|tx| tx.send(item.clone()).is_ok());
    }

    fn subscribe(&mut self) -> mpsc::UnboundedReceiver<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        for item in &self.items {
            let _ = tx.send(item.clone());
        }
        self.subscribers.push(tx);
        rx
    }
}

struct RequestDoc {
    offer: Option<SessionDescription>,
    answer: Option<SessionDescription>,
    offer_candidates: Feed<String>,
    answer_candidates: Feed<String>,
    watchers: Vec<mpsc::UnboundedSender<JoinRequestSnapshot>>,
}

impl RequestDoc {
    fn new() -> Self {
        Self {
            offer: None,
            answer: None,
            offer_candidates: Feed::default(),
            answer_candidates: Feed::default(),
            watchers: Vec::new(),
        }
    }

    fn snapshot(&self, id: &PeerId) -> JoinRequestSnapshot {
        JoinRequestSnapshot {
            id: id.clone(),
            offer: self.offer.clone(),
            answer: self.answer.clone(),
        }
    }

    fn notify(&mut self, id: &PeerId) {
        let snapshot = self.snapshot(id);
        self.watchers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

#[derive(Default)]
struct RoomDoc {
    requests: HashMap<PeerId, RequestDoc>,
    request_feed: Feed<PeerId>,
}

/// In-process implementation of the signaling store. Faithful to the
/// capability contract, including replay of existing items on subscribe,
/// so hosts that start listening late still see earlier join requests.
#[derive(Default)]
pub struct MemoryStore {
    rooms: Mutex<HashMap<RoomId, RoomDoc>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SignalingStore for MemoryStore {
    async fn create_room(&self, room: &RoomId) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(room) {
            return Err(StoreError::RoomExists(room.clone()));
        }
        rooms.insert(room.clone(), RoomDoc::default());
        Ok(())
    }

    async fn room_exists(&self, room: &RoomId) -> Result<bool, StoreError> {
        Ok(self.rooms.lock().await.contains_key(room))
    }

    async fn create_join_request(&self, room: &RoomId) -> Result<PeerId, StoreError> {
        let mut rooms = self.rooms.lock().await;
        let doc = rooms
            .get_mut(room)
            .ok_or_else(|| StoreError::RoomNotFound(room.clone()))?;

        let id = PeerId::new();
        doc.requests.insert(id.clone(), RequestDoc::new());
        doc.request_feed.append(id.clone());
        Ok(id)
    }

    async fn set_offer(
        &self,
        room: &RoomId,
        request: &PeerId,
        offer: &SessionDescription,
    ) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().await;
        let doc = request_doc(&mut rooms, room, request)?;
        doc.offer = Some(offer.clone());
        doc.notify(request);
        Ok(())
    }

    async fn set_answer(
        &self,
        room: &RoomId,
        request: &PeerId,
        answer: &SessionDescription,
    ) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().await;
        let doc = request_doc(&mut rooms, room, request)?;
        doc.answer = Some(answer.clone());
        doc.notify(request);
        Ok(())
    }

    async fn append_candidate(
        &self,
        room: &RoomId,
        request: &PeerId,
        side: CandidateSide,
        candidate: &str,
    ) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().await;
        let doc = request_doc(&mut rooms, room, request)?;
        match side {
            CandidateSide::Offer => doc.offer_candidates.append(candidate.to_owned()),
            CandidateSide::Answer => doc.answer_candidates.append(candidate.to_owned()),
        }
        Ok(())
    }

    async fn watch_join_requests(
        &self,
        room: &RoomId,
    ) -> Result<mpsc::UnboundedReceiver<PeerId>, StoreError> {
        let mut rooms = self.rooms.lock().await;
        let doc = rooms
            .get_mut(room)
            .ok_or_else(|| StoreError::RoomNotFound(room.clone()))?;
        Ok(doc.request_feed.subscribe())
    }

    async fn watch_join_request(
        &self,
        room: &RoomId,
        request: &PeerId,
    ) -> Result<mpsc::UnboundedReceiver<JoinRequestSnapshot>, StoreError> {
        let mut rooms = self.rooms.lock().await;
        let doc = request_doc(&mut rooms, room, request)?;
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(doc.snapshot(request));
        doc.watchers.push(tx);
        Ok(rx)
    }

    async fn watch_candidates(
        &self,
        room: &RoomId,
        request: &PeerId,
        side: CandidateSide,
    ) -> Result<mpsc::UnboundedReceiver<String>, StoreError> {
        let mut rooms = self.rooms.lock().await;
        let doc = request_doc(&mut rooms, room, request)?;
        Ok(match side {
            CandidateSide::Offer => doc.offer_candidates.subscribe(),
            CandidateSide::Answer => doc.answer_candidates.subscribe(),
        })
    }
}

fn request_doc<'a>(
    rooms: &'a mut HashMap<RoomId, RoomDoc>,
    room: &RoomId,
    request: &PeerId,
) -> Result<&'a mut RequestDoc, StoreError> {
    rooms
        .get_mut(room)
        .ok_or_else(|| StoreError::RoomNotFound(room.clone()))?
        .requests
        .get_mut(request)
        .ok_or_else(|| StoreError::RequestNotFound(request.clone()))
}
