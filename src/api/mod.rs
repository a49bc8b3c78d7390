//! Relay service HTTP surface

pub mod handler;
pub mod helpers;
pub mod router;

pub use handler::RelayState;
pub use router::build_router;
