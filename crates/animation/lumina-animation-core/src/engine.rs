//! Animator: data ownership and public API.
//!
//! Methods:
//! - store: create_clip, add/remove/update_keyframe, remove_clip, dispose
//! - playback: play, pause, stop, seek, set_speed, set_looping
//! - sinks: register_callback, unregister_callback
//! - tick: update (advance → evaluate → dispatch)
//!
//! Controls only record a `PlaybackEvent` when they change the phase
//! (seek always records one).
//!
//! Every mutating call has a strict `try_*` form returning
//! `Result<(), AnimatorError>`. The plain forms are lenient: unknown ids are
//! a logged no-op, as are rejected keyframe shapes.

use indexmap::IndexMap;

use crate::binding::{Sink, SinkKey, SinkRegistry};
use crate::config::Config;
use crate::data::{AnimationClip, Keyframe, KeyframeUpdate};
use crate::errors::AnimatorError;
use crate::outputs::{EventLog, PlaybackEvent};
use crate::playback::{Advance, PlaybackPhase, PlaybackState};
use crate::sampling::evaluate_track;
use crate::value::Value;

/// Owns every clip, playback state and sink for one editing session.
///
/// Single-threaded and externally driven: the host calls
/// [`Animator::update`] once per rendered frame.
#[derive(Debug)]
pub struct Animator {
    cfg: Config,
    clips: IndexMap<String, AnimationClip>,
    states: IndexMap<String, PlaybackState>,
    sinks: SinkRegistry,
    events: EventLog,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Swallow an error from the strict API, keeping the lenient no-op contract.
fn lenient(op: &str, result: Result<(), AnimatorError>) {
    match result {
        Ok(()) => {}
        Err(err) if err.is_not_found() => log::debug!("{op}: ignored ({err})"),
        Err(err) => log::warn!("{op}: rejected ({err})"),
    }
}

impl Animator {
    /// Create an empty animator with the given config.
    pub fn new(cfg: Config) -> Self {
        Self {
            events: EventLog::with_capacity(cfg.max_events),
            cfg,
            clips: IndexMap::new(),
            states: IndexMap::new(),
            sinks: SinkRegistry::new(),
        }
    }

    // ----- store -----

    /// Register a clip (replacing any clip with the same id) and reset its playback state.
    pub fn try_create_clip(&mut self, mut clip: AnimationClip) -> Result<(), AnimatorError> {
        clip.normalize()?;
        let state = PlaybackState::for_clip(&clip);
        log::debug!(
            "create_clip '{}' ({} tracks, duration {}s)",
            clip.id,
            clip.tracks.len(),
            clip.duration
        );
        self.states.insert(clip.id.clone(), state);
        self.clips.insert(clip.id.clone(), clip);
        Ok(())
    }

    pub fn create_clip(&mut self, clip: AnimationClip) {
        lenient("create_clip", self.try_create_clip(clip));
    }

    /// Drop a clip and its playback state.
    pub fn try_remove_clip(&mut self, clip_id: &str) -> Result<(), AnimatorError> {
        self.states.shift_remove(clip_id);
        self.clips
            .shift_remove(clip_id)
            .map(|_| ())
            .ok_or_else(|| not_found(clip_id))
    }

    pub fn remove_clip(&mut self, clip_id: &str) {
        lenient("remove_clip", self.try_remove_clip(clip_id));
    }

    fn clip_mut(&mut self, clip_id: &str) -> Result<&mut AnimationClip, AnimatorError> {
        self.clips.get_mut(clip_id).ok_or_else(|| not_found(clip_id))
    }

    /// Insert a keyframe, keep the track sorted and extend the clip duration if needed.
    pub fn try_add_keyframe(
        &mut self,
        clip_id: &str,
        track_id: &str,
        keyframe: Keyframe,
    ) -> Result<(), AnimatorError> {
        let clip = self.clip_mut(clip_id)?;
        let time = keyframe.time;
        clip.track_mut(track_id)?.insert_keyframe(keyframe)?;
        clip.extend_duration(time);
        Ok(())
    }

    pub fn add_keyframe(&mut self, clip_id: &str, track_id: &str, keyframe: Keyframe) {
        lenient("add_keyframe", self.try_add_keyframe(clip_id, track_id, keyframe));
    }

    /// Remove a keyframe by id. The clip duration is left untouched.
    pub fn try_remove_keyframe(
        &mut self,
        clip_id: &str,
        track_id: &str,
        keyframe_id: &str,
    ) -> Result<(), AnimatorError> {
        let track = self.clip_mut(clip_id)?.track_mut(track_id)?;
        track
            .remove_keyframe(keyframe_id)
            .map(|_| ())
            .ok_or_else(|| AnimatorError::KeyframeNotFound {
                track_id: track_id.to_string(),
                keyframe_id: keyframe_id.to_string(),
            })
    }

    pub fn remove_keyframe(&mut self, clip_id: &str, track_id: &str, keyframe_id: &str) {
        lenient(
            "remove_keyframe",
            self.try_remove_keyframe(clip_id, track_id, keyframe_id),
        );
    }

    /// Merge `update` into a keyframe; re-sorts the track when the time changes.
    pub fn try_update_keyframe(
        &mut self,
        clip_id: &str,
        track_id: &str,
        keyframe_id: &str,
        update: KeyframeUpdate,
    ) -> Result<(), AnimatorError> {
        let clip = self.clip_mut(clip_id)?;
        let time = clip.track_mut(track_id)?.update_keyframe(keyframe_id, update)?;
        clip.extend_duration(time);
        Ok(())
    }

    pub fn update_keyframe(
        &mut self,
        clip_id: &str,
        track_id: &str,
        keyframe_id: &str,
        update: KeyframeUpdate,
    ) {
        lenient(
            "update_keyframe",
            self.try_update_keyframe(clip_id, track_id, keyframe_id, update),
        );
    }

    pub fn clip(&self, clip_id: &str) -> Option<&AnimationClip> {
        self.clips.get(clip_id)
    }

    /// All clips in registration order.
    pub fn clips(&self) -> impl Iterator<Item = &AnimationClip> {
        self.clips.values()
    }

    pub fn state(&self, clip_id: &str) -> Option<&PlaybackState> {
        self.states.get(clip_id)
    }

    /// Clear all clips, states, sinks and pending events. The animator stays usable.
    pub fn dispose(&mut self) {
        self.clips.clear();
        self.states.clear();
        self.sinks.clear();
        self.events.clear();
    }

    // ----- playback -----

    fn state_mut(&mut self, clip_id: &str) -> Result<&mut PlaybackState, AnimatorError> {
        self.states.get_mut(clip_id).ok_or_else(|| not_found(clip_id))
    }

    pub fn try_play(&mut self, clip_id: &str) -> Result<(), AnimatorError> {
        let state = self.state_mut(clip_id)?;
        if state.is_playing {
            return Ok(());
        }
        state.play();
        let time = state.current_time;
        self.events.push(PlaybackEvent::Started {
            clip_id: clip_id.to_string(),
            time,
        });
        Ok(())
    }

    pub fn play(&mut self, clip_id: &str) {
        lenient("play", self.try_play(clip_id));
    }

    pub fn try_pause(&mut self, clip_id: &str) -> Result<(), AnimatorError> {
        let state = self.state_mut(clip_id)?;
        if !state.is_playing {
            return Ok(());
        }
        state.pause();
        let time = state.current_time;
        self.events.push(PlaybackEvent::Paused {
            clip_id: clip_id.to_string(),
            time,
        });
        Ok(())
    }

    pub fn pause(&mut self, clip_id: &str) {
        lenient("pause", self.try_pause(clip_id));
    }

    pub fn try_stop(&mut self, clip_id: &str) -> Result<(), AnimatorError> {
        let state = self.state_mut(clip_id)?;
        if state.phase() == PlaybackPhase::Stopped {
            return Ok(());
        }
        state.stop();
        self.events.push(PlaybackEvent::Stopped {
            clip_id: clip_id.to_string(),
        });
        Ok(())
    }

    pub fn stop(&mut self, clip_id: &str) {
        lenient("stop", self.try_stop(clip_id));
    }

    pub fn try_seek(&mut self, clip_id: &str, time: f64) -> Result<(), AnimatorError> {
        let state = self.state_mut(clip_id)?;
        state.seek(time);
        let time = state.current_time;
        self.events.push(PlaybackEvent::Seeked {
            clip_id: clip_id.to_string(),
            time,
        });
        Ok(())
    }

    pub fn seek(&mut self, clip_id: &str, time: f64) {
        lenient("seek", self.try_seek(clip_id, time));
    }

    pub fn try_set_speed(&mut self, clip_id: &str, speed: f64) -> Result<(), AnimatorError> {
        self.state_mut(clip_id)?.speed = speed;
        Ok(())
    }

    pub fn set_speed(&mut self, clip_id: &str, speed: f64) {
        lenient("set_speed", self.try_set_speed(clip_id, speed));
    }

    pub fn try_set_looping(&mut self, clip_id: &str, looping: bool) -> Result<(), AnimatorError> {
        self.state_mut(clip_id)?.looping = looping;
        Ok(())
    }

    pub fn set_looping(&mut self, clip_id: &str, looping: bool) {
        lenient("set_looping", self.try_set_looping(clip_id, looping));
    }

    // ----- sinks -----

    /// Register the callback for `(object_id, property)`, replacing any previous one.
    pub fn register_callback<F>(&mut self, object_id: &str, property: &str, callback: F)
    where
        F: FnMut(&Value) + 'static,
    {
        self.sinks.register(object_id, property, Box::new(callback) as Sink);
    }

    pub fn unregister_callback(&mut self, object_id: &str, property: &str) -> bool {
        self.sinks.unregister(object_id, property)
    }

    pub fn has_callback(&self, object_id: &str, property: &str) -> bool {
        self.sinks.contains(object_id, property)
    }

    // ----- tick -----

    /// Advance every playing clip by `dt` seconds and push each track's value to its sink.
    ///
    /// Clips are visited in registration order, tracks in clip order.
    pub fn update(&mut self, dt: f64) {
        let Self {
            cfg,
            clips,
            states,
            sinks,
            events,
        } = self;

        for (clip_id, state) in states.iter_mut() {
            if !state.is_playing {
                continue;
            }
            let Some(clip) = clips.get(clip_id) else {
                continue;
            };

            match state.advance(dt, clip.duration) {
                Advance::Continued => {}
                Advance::Wrapped => events.push(PlaybackEvent::Looped {
                    clip_id: clip_id.clone(),
                    time: state.current_time,
                }),
                Advance::Ended => events.push(PlaybackEvent::Ended {
                    clip_id: clip_id.clone(),
                    time: state.current_time,
                }),
            }
            log::trace!("update '{}' t={}", clip_id, state.current_time);

            for track in &clip.tracks {
                if track.keyframes.is_empty() && !cfg.dispatch_empty_tracks {
                    continue;
                }
                if !sinks.contains(&track.object_id, &track.property) {
                    continue;
                }
                let value = evaluate_track(track, state.current_time);
                sinks.dispatch(&track.object_id, &track.property, &value);
            }
        }
    }

    /// Sample every track of a clip at `time` without touching playback state.
    pub fn evaluate_clip(&self, clip_id: &str, time: f64) -> Option<Vec<(SinkKey, Value)>> {
        let clip = self.clips.get(clip_id)?;
        Some(
            clip.tracks
                .iter()
                .filter(|t| !t.keyframes.is_empty() || self.cfg.dispatch_empty_tracks)
                .map(|t| {
                    (
                        SinkKey::new(t.object_id.as_str(), t.property.as_str()),
                        evaluate_track(t, time),
                    )
                })
                .collect(),
        )
    }

    /// Drain playback events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain()
    }
}

fn not_found(clip_id: &str) -> AnimatorError {
    AnimatorError::ClipNotFound {
        clip_id: clip_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AnimationTrack;
    use crate::interp::InterpolationKind;

    fn clip() -> AnimationClip {
        AnimationClip::new("c", "Clip").with_track(
            AnimationTrack::new("t", "ball", "y", InterpolationKind::Linear).with_keyframes(vec![
                Keyframe::new("k0", 0.0, 0.0),
                Keyframe::new("k1", 1.0, 10.0),
            ]),
        )
    }

    #[test]
    fn strict_api_reports_unknown_ids() {
        let mut a = Animator::default();
        a.create_clip(clip());
        assert!(matches!(
            a.try_play("nope"),
            Err(AnimatorError::ClipNotFound { .. })
        ));
        assert!(matches!(
            a.try_add_keyframe("c", "nope", Keyframe::new("x", 0.5, 1.0)),
            Err(AnimatorError::TrackNotFound { .. })
        ));
        assert!(matches!(
            a.try_remove_keyframe("c", "t", "nope"),
            Err(AnimatorError::KeyframeNotFound { .. })
        ));
    }

    #[test]
    fn controls_emit_events() {
        let mut a = Animator::default();
        a.create_clip(clip());
        a.play("c");
        a.update(2.0);
        let events = a.take_events();
        assert_eq!(
            events,
            vec![
                PlaybackEvent::Started {
                    clip_id: "c".into(),
                    time: 0.0
                },
                PlaybackEvent::Ended {
                    clip_id: "c".into(),
                    time: 1.0
                },
            ]
        );
        assert!(a.take_events().is_empty());
    }

    #[test]
    fn clip_without_sinks_still_advances() {
        let mut a = Animator::default();
        a.create_clip(clip());
        a.play("c");
        a.update(0.25);
        assert_eq!(a.state("c").map(|s| s.current_time), Some(0.25));
    }
}
