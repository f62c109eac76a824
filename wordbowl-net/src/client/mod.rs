mod behavior;
mod client_service;
mod context;

pub use behavior::ClientBehavior;
pub use client_service::ClientService;
pub use context::ClientContext;
