//! Canonical clip/track/keyframe data model.
//!
//! Keyframe times are absolute seconds within the owning clip. Field names
//! serialize in camelCase to match the editor's stored clips.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::errors::AnimatorError;
use crate::interp::InterpolationKind;
use crate::value::{Value, ValueShape};

/// 2D tangent handle attached to a keyframe. Only `y` shapes Bezier segments.
///
/// Stored as an `[x, y]` pair.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Tangent {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Tangent {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Tangent> for (f64, f64) {
    fn from(t: Tangent) -> Self {
        (t.x, t.y)
    }
}

/// A timestamped value with an easing curve and optional Bezier tangents.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub id: String,
    /// Absolute time in seconds within the clip.
    pub time: f64,
    pub value: Value,
    /// Easing applied to the segment that starts at this keyframe.
    #[serde(default)]
    pub easing: Easing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tangent_in: Option<Tangent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tangent_out: Option<Tangent>,
}

impl Keyframe {
    pub fn new(id: impl Into<String>, time: f64, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            time,
            value: value.into(),
            easing: Easing::Linear,
            tangent_in: None,
            tangent_out: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_tangents(mut self, tangent_in: Option<Tangent>, tangent_out: Option<Tangent>) -> Self {
        self.tangent_in = tangent_in;
        self.tangent_out = tangent_out;
        self
    }
}

/// Partial keyframe edit; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyframeUpdate {
    #[serde(default)]
    pub time: Option<f64>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub easing: Option<Easing>,
    #[serde(default)]
    pub tangent_in: Option<Tangent>,
    #[serde(default)]
    pub tangent_out: Option<Tangent>,
}

impl KeyframeUpdate {
    fn apply_to(self, keyframe: &mut Keyframe) {
        if let Some(time) = self.time {
            keyframe.time = time;
        }
        if let Some(value) = self.value {
            keyframe.value = value;
        }
        if let Some(easing) = self.easing {
            keyframe.easing = easing;
        }
        if let Some(t) = self.tangent_in {
            keyframe.tangent_in = Some(t);
        }
        if let Some(t) = self.tangent_out {
            keyframe.tangent_out = Some(t);
        }
    }
}

/// One animated property of one scene object.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnimationTrack {
    pub id: String,
    /// Opaque id of the scene object this track drives.
    pub object_id: String,
    /// Property name on that object (e.g. "position", "opacity", "y").
    pub property: String,
    /// Keyframes in ascending time order.
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
    #[serde(default)]
    pub interpolation: InterpolationKind,
}

impl AnimationTrack {
    pub fn new(
        id: impl Into<String>,
        object_id: impl Into<String>,
        property: impl Into<String>,
        interpolation: InterpolationKind,
    ) -> Self {
        Self {
            id: id.into(),
            object_id: object_id.into(),
            property: property.into(),
            keyframes: Vec::new(),
            interpolation,
        }
    }

    pub fn with_keyframes(mut self, keyframes: Vec<Keyframe>) -> Self {
        self.keyframes = keyframes;
        self
    }

    /// Shape shared by every keyframe, taken from the first one.
    #[inline]
    pub fn shape(&self) -> Option<ValueShape> {
        self.keyframes.first().map(|k| k.value.shape())
    }

    /// Time of the last keyframe, or 0 for an empty track.
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.keyframes
            .iter()
            .map(|k| k.time)
            .fold(0.0, f64::max)
    }

    pub fn keyframe(&self, id: &str) -> Option<&Keyframe> {
        self.keyframes.iter().find(|k| k.id == id)
    }

    /// Stable ascending sort: keyframes with equal times keep their prior order.
    pub(crate) fn sort_keyframes(&mut self) {
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Check that every keyframe shares the first keyframe's shape.
    pub fn validate_shapes(&self) -> Result<(), AnimatorError> {
        let Some(expected) = self.shape() else {
            return Ok(());
        };
        for k in &self.keyframes {
            let actual = k.value.shape();
            if actual != expected {
                return Err(AnimatorError::ShapeMismatch {
                    track_id: self.id.clone(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Check `value` against the shape of the keyframes other than `skip_id`.
    fn check_shape(&self, value: &Value, skip_id: Option<&str>) -> Result<(), AnimatorError> {
        let expected = self
            .keyframes
            .iter()
            .find(|k| Some(k.id.as_str()) != skip_id)
            .map(|k| k.value.shape());
        match expected {
            Some(expected) if expected != value.shape() => Err(AnimatorError::ShapeMismatch {
                track_id: self.id.clone(),
                expected,
                actual: value.shape(),
            }),
            _ => Ok(()),
        }
    }

    /// Insert a keyframe and restore time order.
    pub(crate) fn insert_keyframe(&mut self, keyframe: Keyframe) -> Result<(), AnimatorError> {
        self.check_shape(&keyframe.value, None)?;
        self.keyframes.push(keyframe);
        self.sort_keyframes();
        Ok(())
    }

    /// Remove a keyframe by id, returning it if it existed.
    pub(crate) fn remove_keyframe(&mut self, id: &str) -> Option<Keyframe> {
        let pos = self.keyframes.iter().position(|k| k.id == id)?;
        Some(self.keyframes.remove(pos))
    }

    /// Merge `update` into the keyframe `id`. Returns the keyframe's new time.
    pub(crate) fn update_keyframe(
        &mut self,
        id: &str,
        update: KeyframeUpdate,
    ) -> Result<f64, AnimatorError> {
        if !self.keyframes.iter().any(|k| k.id == id) {
            return Err(AnimatorError::KeyframeNotFound {
                track_id: self.id.clone(),
                keyframe_id: id.to_string(),
            });
        }
        if let Some(value) = &update.value {
            self.check_shape(value, Some(id))?;
        }
        let resort = update.time.is_some();
        let mut time = 0.0;
        if let Some(k) = self.keyframes.iter_mut().find(|k| k.id == id) {
            update.apply_to(k);
            time = k.time;
        }
        if resort {
            self.sort_keyframes();
        }
        Ok(time)
    }
}

/// A named, timed bundle of tracks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnimationClip {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<AnimationTrack>,
    /// Duration in seconds; never less than the latest keyframe time.
    #[serde(default)]
    pub duration: f64,
    #[serde(rename = "loop", default)]
    pub looping: bool,
    #[serde(default = "default_speed")]
    pub speed: f64,
}

fn default_speed() -> f64 {
    1.0
}

impl AnimationClip {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tracks: Vec::new(),
            duration: 0.0,
            looping: false,
            speed: 1.0,
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_track(mut self, track: AnimationTrack) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn track(&self, id: &str) -> Option<&AnimationTrack> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub(crate) fn track_mut(&mut self, id: &str) -> Result<&mut AnimationTrack, AnimatorError> {
        let clip_id = &self.id;
        self.tracks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AnimatorError::TrackNotFound {
                clip_id: clip_id.clone(),
                track_id: id.to_string(),
            })
    }

    /// Latest keyframe time across all tracks.
    pub fn keyframe_end(&self) -> f64 {
        self.tracks
            .iter()
            .map(AnimationTrack::end_time)
            .fold(0.0, f64::max)
    }

    /// Raise the duration so it covers `time`. Never shrinks.
    #[inline]
    pub(crate) fn extend_duration(&mut self, time: f64) {
        self.duration = self.duration.max(time);
    }

    /// Validate track shapes, sort keyframes and extend the duration over them.
    pub fn normalize(&mut self) -> Result<(), AnimatorError> {
        for track in &mut self.tracks {
            track.validate_shapes()?;
            track.sort_keyframes();
        }
        let end = self.keyframe_end();
        self.extend_duration(end);
        Ok(())
    }
}
