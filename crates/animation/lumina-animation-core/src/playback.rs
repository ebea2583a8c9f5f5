//! Per-clip playback cursor and its state machine.

use serde::{Deserialize, Serialize};

use crate::data::AnimationClip;

/// Coarse phase of a playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackPhase {
    /// Not playing, cursor at 0.
    Stopped,
    /// Not playing, cursor frozen.
    Paused,
    Playing,
}

impl PlaybackPhase {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Paused => "paused",
            Self::Playing => "playing",
        }
    }
}

/// What happened to the cursor during one advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    Continued,
    /// Wrapped around the clip boundary (looping clips).
    Wrapped,
    /// Reached a boundary and stopped (non-looping clips).
    Ended,
}

/// Mutable runtime cursor of one clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub clip_id: String,
    pub is_playing: bool,
    /// Seconds into the clip.
    pub current_time: f64,
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Time multiplier; negative values play backwards.
    pub speed: f64,
}

impl PlaybackState {
    /// Initial (stopped) state for a freshly registered clip.
    pub fn for_clip(clip: &AnimationClip) -> Self {
        Self {
            clip_id: clip.id.clone(),
            is_playing: false,
            current_time: 0.0,
            looping: clip.looping,
            speed: clip.speed,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        if self.is_playing {
            PlaybackPhase::Playing
        } else if self.current_time == 0.0 {
            PlaybackPhase::Stopped
        } else {
            PlaybackPhase::Paused
        }
    }

    #[inline]
    pub fn play(&mut self) {
        self.is_playing = true;
    }

    #[inline]
    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    #[inline]
    pub fn stop(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
    }

    #[inline]
    pub fn seek(&mut self, time: f64) {
        self.current_time = time.max(0.0);
    }

    /// Move the cursor by `dt * speed` and apply the clip boundary policy.
    ///
    /// Forward past `duration`: looping wraps with `time % duration`, otherwise
    /// the cursor clamps to `duration` and playback stops without a rewind.
    /// Backward past 0: looping wraps into `[0, duration)`, otherwise the
    /// cursor clamps to 0 and playback stops.
    pub fn advance(&mut self, dt: f64, duration: f64) -> Advance {
        self.current_time += dt * self.speed;

        if self.current_time >= duration {
            if self.looping {
                wrap(&mut self.current_time, duration)
            } else {
                self.current_time = duration;
                self.is_playing = false;
                Advance::Ended
            }
        } else if self.current_time < 0.0 {
            if self.looping {
                wrap(&mut self.current_time, duration)
            } else {
                self.current_time = 0.0;
                self.is_playing = false;
                Advance::Ended
            }
        } else {
            Advance::Continued
        }
    }
}

/// Wrap a looping cursor into `[0, duration)`. A zero-length clip pins the
/// cursor at 0 and never reports a wrap.
#[inline]
fn wrap(time: &mut f64, duration: f64) -> Advance {
    if duration > 0.0 {
        *time = time.rem_euclid(duration);
        Advance::Wrapped
    } else {
        *time = 0.0;
        Advance::Continued
    }
}
