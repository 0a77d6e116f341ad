//! relayd - relay chat daemon.
//!
//! Accepts TCP connections speaking the length-prefixed relay protocol,
//! lets each claim a unique display name, and relays broadcast and private
//! messages between the registered participants.

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;

pub use config::Config;
pub use network::Gateway;
pub use state::Registry;
