mod client_exchange;
mod host_exchange;
mod room_id;

pub(crate) use client_exchange::run_client_exchange;
pub(crate) use host_exchange::run_host_exchange;
pub use room_id::{allocate_room_id, random_room_id};
