use crate::game::inner::GameInner;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use wordbowl_core::{Envelope, Payload};
use wordbowl_net::{ClientBehavior, ClientContext};

/// Client-side message handling: announce ourselves the moment the channel
/// opens, and mirror whatever state the host syncs down.
pub(crate) struct ClientGame {
    pub(crate) inner: Arc<GameInner>,
}

#[async_trait]
impl ClientBehavior for ClientGame {
    async fn on_channel_open(&self, ctx: &ClientContext) {
        let player = {
            let mut local = self.inner.local.lock().await;
            local.id = ctx.peer_id().clone();
            local.clone()
        };

        ctx.send_to_host(&Envelope::new(player.id.clone(), Payload::JoinGame(player)))
            .await;
    }

    async fn on_message(&self, _ctx: &ClientContext, envelope: Envelope) {
        match envelope.payload {
            Payload::Sync(snapshot) => {
                self.inner.replace_and_publish(snapshot).await;
            }
            other => {
                // clients are thin mirrors; only SYNC matters here
                debug!(method = other.method(), "ignoring non-sync message");
            }
        }
    }
}
