//! Stored clip JSON: the editor's on-disk clip format.
//!
//! Notes:
//! - Field names are camelCase (`objectId`, `tangentIn`, `loop`).
//! - Values are a number or an array of numbers.
//! - `easing`/`interpolation` default to "linear", `speed` to 1, `loop` to false.
//! - Parsing validates per-track shapes, sorts keyframes and extends the
//!   duration over them, so a parsed clip already satisfies the store's invariants.

use crate::data::AnimationClip;
use crate::errors::AnimatorError;

/// Parse a stored clip and normalize it.
pub fn parse_clip_json(s: &str) -> Result<AnimationClip, AnimatorError> {
    let mut clip: AnimationClip = serde_json::from_str(s)?;
    clip.normalize()?;
    Ok(clip)
}

/// Parse a JSON array of stored clips.
pub fn parse_clips_json(s: &str) -> Result<Vec<AnimationClip>, AnimatorError> {
    let mut clips: Vec<AnimationClip> = serde_json::from_str(s)?;
    for clip in &mut clips {
        clip.normalize()?;
    }
    Ok(clips)
}

/// Serialize a clip to pretty-printed stored JSON.
pub fn clip_to_json(clip: &AnimationClip) -> Result<String, AnimatorError> {
    Ok(serde_json::to_string_pretty(clip)?)
}
