mod behavior;
mod context;
mod host_service;

pub use behavior::HostBehavior;
pub use context::LinkContext;
pub use host_service::HostService;
pub(crate) use host_service::HostShared;
