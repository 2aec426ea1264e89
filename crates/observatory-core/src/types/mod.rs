//! Shared domain types.

mod capability;
mod sandbox;
mod warm;

pub use capability::Capability;
pub use sandbox::Sandbox;
pub use warm::WarmStatus;
