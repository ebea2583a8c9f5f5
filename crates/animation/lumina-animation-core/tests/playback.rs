use lumina_animation_core::{
    AnimationClip, AnimationTrack, Animator, AnimatorError, Config, InterpolationKind, Keyframe,
    PlaybackEvent, PlaybackPhase,
};

fn animator_with(duration: f64, looping: bool) -> Animator {
    let mut a = Animator::default();
    a.create_clip(
        AnimationClip::new("c", "Clip")
            .with_duration(duration)
            .with_looping(looping)
            .with_track(
                AnimationTrack::new("t", "ball", "y", InterpolationKind::Linear)
                    .with_keyframes(vec![Keyframe::new("k", 0.0, 1.0)]),
            ),
    );
    a
}

#[test]
fn new_clip_starts_stopped_with_clip_settings() {
    let mut a = Animator::default();
    a.create_clip(
        AnimationClip::new("c", "Clip")
            .with_duration(2.0)
            .with_looping(true)
            .with_speed(0.5),
    );
    let s = a.state("c").unwrap();
    assert_eq!(s.clip_id, "c");
    assert_eq!(s.phase(), PlaybackPhase::Stopped);
    assert!(s.looping);
    assert_eq!(s.speed, 0.5);
}

#[test]
fn phase_transitions() {
    let mut a = animator_with(4.0, false);
    a.play("c");
    assert_eq!(a.state("c").unwrap().phase(), PlaybackPhase::Playing);
    a.update(1.0);
    a.pause("c");
    assert_eq!(a.state("c").unwrap().phase().name(), "paused");
    a.play("c");
    a.update(1.0);
    assert_eq!(a.state("c").unwrap().current_time, 2.0);
    a.stop("c");
    assert_eq!(a.state("c").unwrap().phase().name(), "stopped");
}

#[test]
fn seek_keeps_play_flag_and_clamps_at_zero() {
    let mut a = animator_with(4.0, false);
    a.play("c");
    a.seek("c", 3.0);
    assert!(a.state("c").unwrap().is_playing);
    a.seek("c", -2.0);
    assert_eq!(a.state("c").unwrap().current_time, 0.0);
    // Seeking past the end is allowed; the next tick applies the boundary.
    a.seek("c", 9.0);
    assert_eq!(a.state("c").unwrap().current_time, 9.0);
    a.update(0.0);
    let s = a.state("c").unwrap();
    assert_eq!(s.current_time, 4.0);
    assert!(!s.is_playing);
}

#[test]
fn set_looping_changes_boundary_policy() {
    let mut a = animator_with(2.0, false);
    a.set_looping("c", true);
    a.play("c");
    a.update(2.5);
    let s = a.state("c").unwrap();
    assert!(s.is_playing);
    assert_eq!(s.current_time, 0.5);

    a.set_looping("c", false);
    a.update(2.0);
    assert!(!a.state("c").unwrap().is_playing);
}

#[test]
fn unknown_clip_controls_are_noops() {
    let mut a = animator_with(1.0, false);
    let before = a.state("c").cloned();
    a.play("missing");
    a.pause("missing");
    a.stop("missing");
    a.seek("missing", 1.0);
    a.set_speed("missing", 3.0);
    a.set_looping("missing", true);
    assert_eq!(a.state("c").cloned(), before);
    assert!(a.state("missing").is_none());
    assert!(a.take_events().is_empty());

    assert_eq!(
        a.try_set_speed("missing", 1.0),
        Err(AnimatorError::ClipNotFound {
            clip_id: "missing".into()
        })
    );
}

#[test]
fn event_log_records_controls_in_order() {
    let mut a = animator_with(1.0, true);
    a.play("c");
    a.update(1.5);
    a.seek("c", 0.25);
    a.pause("c");
    a.stop("c");

    let events = a.take_events();
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match e {
            PlaybackEvent::Started { .. } => "started",
            PlaybackEvent::Looped { .. } => "looped",
            PlaybackEvent::Seeked { .. } => "seeked",
            PlaybackEvent::Paused { .. } => "paused",
            PlaybackEvent::Stopped { .. } => "stopped",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["started", "looped", "seeked", "paused", "stopped"]);
    assert!(events.iter().all(|e| e.clip_id() == "c"));
}

#[test]
fn event_log_is_bounded() {
    let mut a = Animator::new(Config {
        max_events: 2,
        ..Config::default()
    });
    a.create_clip(AnimationClip::new("c", "Clip").with_duration(1.0));
    for i in 0..5 {
        a.seek("c", i as f64 * 0.1);
    }
    assert_eq!(a.take_events().len(), 2);
}

#[test]
fn events_serialize_with_type_tag() {
    let ev = PlaybackEvent::Ended {
        clip_id: "c".into(),
        time: 1.0,
    };
    let json = serde_json::to_value(&ev).unwrap();
    assert_eq!(json["type"], "ended");
    assert_eq!(json["clip_id"], "c");
}

#[test]
fn repeated_controls_record_one_event() {
    let mut a = animator_with(4.0, false);
    a.play("c");
    a.play("c");
    a.update(1.0);
    a.pause("c");
    a.pause("c");
    a.stop("c");
    a.stop("c");
    let events = a.take_events();
    assert_eq!(
        events,
        vec![
            PlaybackEvent::Started {
                clip_id: "c".into(),
                time: 0.0
            },
            PlaybackEvent::Paused {
                clip_id: "c".into(),
                time: 1.0
            },
            PlaybackEvent::Stopped {
                clip_id: "c".into()
            },
        ]
    );

    // Stopping a fresh clip is not a transition either.
    let mut fresh = animator_with(4.0, false);
    fresh.stop("c");
    fresh.pause("c");
    assert!(fresh.take_events().is_empty());
}

#[test]
fn zero_length_looping_clip_does_not_report_loops() {
    let mut a = Animator::new(Config {
        max_events: 4,
        ..Config::default()
    });
    a.create_clip(AnimationClip::new("empty", "Empty").with_looping(true));
    a.play("empty");
    for _ in 0..10 {
        a.update(1.0 / 60.0);
    }
    let s = a.state("empty").unwrap();
    assert!(s.is_playing);
    assert_eq!(s.current_time, 0.0);
    assert_eq!(a.take_events().len(), 1);
}
