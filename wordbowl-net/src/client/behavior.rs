use crate::client::context::ClientContext;
use async_trait::async_trait;
use wordbowl_core::Envelope;

/// Game-side hooks invoked by the client service loop.
#[async_trait]
pub trait ClientBehavior: Send + Sync + 'static {
    /// The data channel to the host opened. The game layer uses this to send
    /// its JOIN message immediately; `ctx.peer_id()` is the assigned id.
    async fn on_channel_open(&self, ctx: &ClientContext);

    /// A decoded message arrived from the host.
    async fn on_message(&self, ctx: &ClientContext, envelope: Envelope);
}
