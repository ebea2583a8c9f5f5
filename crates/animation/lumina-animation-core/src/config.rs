//! Core configuration for lumina-animation-core.

use serde::{Deserialize, Serialize};

/// Configuration for the animator.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum playback events retained between drains; extra events are dropped.
    pub max_events: usize,
    /// Whether tracks without keyframes still deliver the scalar `0.0` fallback to their sink.
    pub dispatch_empty_tracks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_events: 1024,
            dispatch_empty_tracks: true,
        }
    }
}
