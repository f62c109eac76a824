mod apply;
mod envelope;

pub use apply::apply;
pub use envelope::{Envelope, Payload};
