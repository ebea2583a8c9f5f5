//! Track sampling.
//!
//! Model:
//! - Each track has keyframes sorted by absolute time.
//! - Segment [Ki -> K(i+1)] progress is eased by Ki's easing curve, then
//!   blended with the track's interpolation mode.
//! - Outside the keyframe span the nearest endpoint value is held.

use crate::data::{AnimationTrack, Keyframe};
use crate::interp::{interpolate_value, SegmentTangents};
use crate::value::Value;

/// Where a query time falls relative to a track's keyframes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    /// Hold the keyframe at this index.
    Hold(usize),
    /// Blend keyframes `left` and `left + 1` at raw local progress.
    Between { left: usize, progress: f64 },
}

/// Find the segment that contains `time`.
/// Edge cases:
/// - Empty slice: `Hold(0)`; callers must check for emptiness first.
/// - Before the first keyframe or after the last: hold that endpoint.
/// - Zero-width segment: hold its right keyframe.
pub fn find_segment(keyframes: &[Keyframe], time: f64) -> Segment {
    let n = keyframes.len();
    if n <= 1 || time < keyframes[0].time {
        return Segment::Hold(0);
    }
    for i in 0..(n - 1) {
        let t0 = keyframes[i].time;
        let t1 = keyframes[i + 1].time;
        if time >= t0 && time <= t1 {
            let span = t1 - t0;
            if span <= 0.0 {
                return Segment::Hold(i + 1);
            }
            return Segment::Between {
                left: i,
                progress: (time - t0) / span,
            };
        }
    }
    Segment::Hold(n - 1)
}

/// Sample a track at an absolute clip time.
pub fn evaluate_track(track: &AnimationTrack, time: f64) -> Value {
    let keyframes = &track.keyframes;
    match keyframes.len() {
        // No keyframes: a neutral scalar 0.0 (fail-soft).
        0 => Value::Scalar(0.0),
        1 => keyframes[0].value.clone(),
        _ => match find_segment(keyframes, time) {
            Segment::Hold(i) => keyframes[i].value.clone(),
            Segment::Between { left, progress } => {
                let k1 = &keyframes[left];
                let k2 = &keyframes[left + 1];
                let eased = k1.easing.apply(progress);
                let tangents = SegmentTangents {
                    out_left: k1.tangent_out,
                    in_right: k2.tangent_in,
                };
                interpolate_value(&k1.value, &k2.value, eased, track.interpolation, tangents)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::InterpolationKind;

    fn keys(times: &[f64]) -> Vec<Keyframe> {
        times
            .iter()
            .enumerate()
            .map(|(i, t)| Keyframe::new(format!("k{i}"), *t, *t))
            .collect()
    }

    #[test]
    fn segments() {
        let k = keys(&[0.0, 1.0, 3.0]);
        assert_eq!(find_segment(&k, -1.0), Segment::Hold(0));
        assert_eq!(
            find_segment(&k, 0.5),
            Segment::Between {
                left: 0,
                progress: 0.5
            }
        );
        assert_eq!(
            find_segment(&k, 2.0),
            Segment::Between {
                left: 1,
                progress: 0.5
            }
        );
        assert_eq!(find_segment(&k, 4.0), Segment::Hold(2));
    }

    #[test]
    fn zero_width_segment_holds_right() {
        let mut k = keys(&[1.0, 1.0]);
        k[1].value = Value::Scalar(7.0);
        assert_eq!(find_segment(&k, 1.0), Segment::Hold(1));
        let track = AnimationTrack::new("t", "o", "p", InterpolationKind::Linear).with_keyframes(k);
        assert_eq!(evaluate_track(&track, 1.0), Value::Scalar(7.0));
    }

    #[test]
    fn empty_track_is_scalar_zero() {
        let t = AnimationTrack::new("t", "o", "p", InterpolationKind::Linear);
        assert_eq!(evaluate_track(&t, 3.0), Value::Scalar(0.0));
    }
}
