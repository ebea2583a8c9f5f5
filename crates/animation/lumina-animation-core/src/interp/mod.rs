//! Interpolation modes and numeric blending between two keyframe values.
//!
//! The easing curve of the left keyframe is applied first (see [`crate::easing`]);
//! the functions here blend the endpoint values with the eased progress.

pub mod functions;

use serde::{Deserialize, Serialize};

pub use functions::{cubic_bezier, interpolate_scalar, interpolate_value, lerp, SegmentTangents};

/// Blending formula used between consecutive keyframes of a track.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterpolationKind {
    #[default]
    Linear,
    /// Holds the left value until the end of the segment.
    Step,
    /// Hermite smoothstep with zero-slope endpoints.
    Cubic,
    /// Cubic Bezier driven by the Y components of the keyframe tangents.
    Bezier,
}

impl InterpolationKind {
    pub fn name(&self) -> &'static str {
        match self {
            InterpolationKind::Linear => "linear",
            InterpolationKind::Step => "step",
            InterpolationKind::Cubic => "cubic",
            InterpolationKind::Bezier => "bezier",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_stored_form() {
        for kind in [
            InterpolationKind::Linear,
            InterpolationKind::Step,
            InterpolationKind::Cubic,
            InterpolationKind::Bezier,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }
}
