//! State management module.
//!
//! Contains the Registry (shared membership table) and per-session state.

mod registry;
mod session;

pub use registry::Registry;
pub use session::{SessionHandle, SessionId, SessionIdGenerator, SessionState};
