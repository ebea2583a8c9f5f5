//! Lumina Animation Core (engine-agnostic)
//!
//! Keyframe clips, thirteen easing curves, four interpolation modes and a
//! per-clip playback state machine. The host drives [`Animator::update`] once
//! per frame; evaluated values reach the scene through registered sinks keyed
//! by `(object_id, property)`.

pub mod binding;
pub mod config;
pub mod data;
pub mod easing;
pub mod engine;
pub mod errors;
pub mod interp;
pub mod outputs;
pub mod playback;
pub mod sampling;
pub mod stored_clip;
pub mod value;

// Re-exports for consumers (scene/UI adapters)
pub use binding::{Sink, SinkKey, SinkRegistry};
pub use config::Config;
pub use data::{AnimationClip, AnimationTrack, Keyframe, KeyframeUpdate, Tangent};
pub use easing::Easing;
pub use engine::Animator;
pub use errors::AnimatorError;
pub use interp::InterpolationKind;
pub use outputs::PlaybackEvent;
pub use playback::{PlaybackPhase, PlaybackState};
pub use sampling::evaluate_track;
pub use stored_clip::{clip_to_json, parse_clip_json, parse_clips_json};
pub use value::{Value, ValueShape};
