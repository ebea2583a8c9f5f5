//! Interpolation helpers:
//! - lerp (scalar linear blend)
//! - cubic_bezier (Bernstein form, endpoints first)
//! - interpolate_scalar (linear/step/cubic/bezier on one component)
//! - interpolate_value (component-wise over Value shapes)

use crate::data::Tangent;
use crate::interp::InterpolationKind;
use crate::value::Value;

/// Tangents that shape a Bezier segment: the left keyframe's outgoing tangent
/// and the right keyframe's incoming tangent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SegmentTangents {
    pub out_left: Option<Tangent>,
    pub in_right: Option<Tangent>,
}

/// Linear interpolation of scalars.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cubic Bezier through `p0` and `p3` with inner control values `p1`, `p2`.
#[inline]
pub fn cubic_bezier(p0: f64, p3: f64, p1: f64, p2: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;
    mt3 * p0 + 3.0 * mt2 * t * p1 + 3.0 * mt * t2 * p2 + t3 * p3
}

#[inline]
fn hermite(a: f64, b: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    a * (2.0 * t3 - 3.0 * t2 + 1.0) + b * (3.0 * t2 - 2.0 * t3)
}

/// Blend two scalars with already-eased progress `t`.
pub fn interpolate_scalar(
    a: f64,
    b: f64,
    t: f64,
    kind: InterpolationKind,
    tangents: SegmentTangents,
) -> f64 {
    match kind {
        InterpolationKind::Linear => lerp(a, b, t),
        InterpolationKind::Step => {
            if t < 1.0 {
                a
            } else {
                b
            }
        }
        InterpolationKind::Cubic => hermite(a, b, t),
        InterpolationKind::Bezier => match (tangents.out_left, tangents.in_right) {
            (Some(out), Some(inn)) => cubic_bezier(a, b, out.y, inn.y, t),
            _ => lerp(a, b, t),
        },
    }
}

/// Blend two values component-wise, using the same progress for every component.
///
/// Mismatched shapes hold the left value (fail-soft).
pub fn interpolate_value(
    a: &Value,
    b: &Value,
    t: f64,
    kind: InterpolationKind,
    tangents: SegmentTangents,
) -> Value {
    match (a, b) {
        (Value::Scalar(va), Value::Scalar(vb)) => {
            Value::Scalar(interpolate_scalar(*va, *vb, t, kind, tangents))
        }
        (Value::Vector(va), Value::Vector(vb)) if va.len() == vb.len() => Value::Vector(
            va.iter()
                .zip(vb.iter())
                .map(|(x, y)| interpolate_scalar(*x, *y, t, kind, tangents))
                .collect(),
        ),
        _ => {
            log::warn!(
                "{} interpolation of mismatched shapes {} and {}; holding left value",
                kind.name(),
                a.shape(),
                b.shape()
            );
            a.clone()
        }
    }
}
