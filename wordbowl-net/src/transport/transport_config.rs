/// STUN/TURN servers used while negotiating a peer link. Supplied by the
/// embedding application; the default is a public STUN server.
#[derive(Clone)]
pub struct TransportConfig {
    pub ice_servers: Vec<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec!["stun:stun.l.google.com:19302".to_owned()],
        }
    }
}
