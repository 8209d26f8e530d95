//! Handler implementations

pub mod channel;
pub mod file;
#[cfg(feature = "network")]
pub mod network;

pub use channel::ChannelHandler;
pub use file::{FileHandler, FileOptions};
#[cfg(feature = "network")]
pub use network::NetworkHandler;

pub use crate::core::Handler;
