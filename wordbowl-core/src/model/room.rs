use serde::{Deserialize, Serialize};
use std::fmt;

/// Short human-typable identity of a hosted game. Uniqueness is enforced by
/// the host's read-before-write retry loop at room creation, not here.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
pub struct RoomId(pub String);

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
