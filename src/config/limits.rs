//! Frame and queue limits configuration.

use relay_proto::MAX_FRAME_LEN;
use serde::Deserialize;

/// Frame and queue limits.
///
/// These bound how much a single peer can make the server buffer, either
/// in one incoming message or in its backlog of outgoing notices.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Largest accepted incoming payload in bytes (default: 65535).
    /// Longer frames are skipped and reported as malformed.
    #[serde(default = "default_max_frame_len")]
    pub max_frame_len: usize,
    /// Outgoing queue depth per session (default: 64).
    /// A full queue makes broadcasters wait for that peer.
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_frame_len: default_max_frame_len(),
            outbound_queue: default_outbound_queue(),
        }
    }
}

fn default_max_frame_len() -> usize {
    MAX_FRAME_LEN
}

fn default_outbound_queue() -> usize {
    64
}
