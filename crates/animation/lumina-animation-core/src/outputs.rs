//! Playback events emitted by controls and by the tick.
//!
//! Sinks carry the per-frame values; events carry the discrete transitions a
//! host may want to react to (timeline UI, chained clips). Drain them with
//! `Animator::take_events()`.

use serde::{Deserialize, Serialize};

/// Discrete playback signals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
#[non_exhaustive]
pub enum PlaybackEvent {
    #[serde(rename_all = "camelCase")]
    Started { clip_id: String, time: f64 },
    #[serde(rename_all = "camelCase")]
    Paused { clip_id: String, time: f64 },
    #[serde(rename_all = "camelCase")]
    Stopped { clip_id: String },
    #[serde(rename_all = "camelCase")]
    Seeked { clip_id: String, time: f64 },
    /// A looping clip wrapped around its boundary.
    #[serde(rename_all = "camelCase")]
    Looped { clip_id: String, time: f64 },
    /// A non-looping clip reached its boundary and stopped.
    #[serde(rename_all = "camelCase")]
    Ended { clip_id: String, time: f64 },
}

impl PlaybackEvent {
    pub fn clip_id(&self) -> &str {
        match self {
            PlaybackEvent::Started { clip_id, .. }
            | PlaybackEvent::Paused { clip_id, .. }
            | PlaybackEvent::Stopped { clip_id }
            | PlaybackEvent::Seeked { clip_id, .. }
            | PlaybackEvent::Looped { clip_id, .. }
            | PlaybackEvent::Ended { clip_id, .. } => clip_id,
        }
    }
}

/// Bounded event buffer.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<PlaybackEvent>,
    capacity: usize,
    dropped: usize,
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            capacity,
            dropped: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, event: PlaybackEvent) {
        if self.events.len() >= self.capacity {
            self.dropped += 1;
            log::warn!(
                "playback event buffer full ({}); dropping {:?}",
                self.capacity,
                event
            );
            return;
        }
        self.events.push(event);
    }

    /// Take all buffered events and reset the drop counter.
    pub fn drain(&mut self) -> Vec<PlaybackEvent> {
        self.dropped = 0;
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_beyond_capacity() {
        let mut log = EventLog::with_capacity(1);
        log.push(PlaybackEvent::Stopped { clip_id: "a".into() });
        log.push(PlaybackEvent::Stopped { clip_id: "b".into() });
        assert_eq!(log.dropped(), 1);
        let events = log.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].clip_id(), "a");
        assert!(log.is_empty());
        assert_eq!(log.dropped(), 0);
    }

    #[test]
    fn serializes_with_type_tag() {
        let e = PlaybackEvent::Ended {
            clip_id: "jump".into(),
            time: 1.0,
        };
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "ended");
        assert_eq!(json["clipId"], "jump");
        assert!(json.get("clip_id").is_none());

        let back: PlaybackEvent =
            serde_json::from_str(r#"{"type":"stopped","clipId":"jump"}"#).unwrap();
        assert_eq!(back.clip_id(), "jump");
    }
}
