//! Error types for the animator.
//!
//! Only the strict `try_*` API surfaces these; the lenient API logs and drops them.

use thiserror::Error;

use crate::value::ValueShape;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimatorError {
    #[error("clip not found: {clip_id}")]
    ClipNotFound { clip_id: String },

    #[error("track not found: {track_id} in clip {clip_id}")]
    TrackNotFound { clip_id: String, track_id: String },

    #[error("keyframe not found: {keyframe_id} in track {track_id}")]
    KeyframeNotFound {
        track_id: String,
        keyframe_id: String,
    },

    #[error("value shape mismatch in track {track_id}: expected {expected}, got {actual}")]
    ShapeMismatch {
        track_id: String,
        expected: ValueShape,
        actual: ValueShape,
    },

    #[error("clip parse error: {reason}")]
    Parse { reason: String },
}

impl AnimatorError {
    /// True for the unknown-identifier class that the lenient API treats as a no-op.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ClipNotFound { .. } | Self::TrackNotFound { .. } | Self::KeyframeNotFound { .. }
        )
    }

    /// Get error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::ClipNotFound { .. } | Self::TrackNotFound { .. } | Self::KeyframeNotFound { .. } => {
                "lookup"
            }
            Self::ShapeMismatch { .. } => "validation",
            Self::Parse { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for AnimatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}
