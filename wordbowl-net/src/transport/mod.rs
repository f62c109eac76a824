mod peer_link;
mod transport_config;
mod transport_event;

pub use peer_link::PeerLink;
pub use transport_config::TransportConfig;
pub use transport_event::TransportEvent;
