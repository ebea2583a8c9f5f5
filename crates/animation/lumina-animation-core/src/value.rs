//! Core value shapes for keyframes and evaluated track outputs.
//!
//! A track animates either a single number (opacity, a position axis) or a
//! fixed-arity numeric vector (position, rotation, scale, color). Values
//! serialize untagged: a JSON number or a JSON array of numbers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse shape of a [`Value`], used to keep every keyframe of a track compatible.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueShape {
    Scalar,
    /// Vector with the given number of components.
    Vector(usize),
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Scalar => write!(f, "scalar"),
            ValueShape::Vector(n) => write!(f, "vector[{n}]"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl Value {
    /// Return the shape of this value.
    #[inline]
    pub fn shape(&self) -> ValueShape {
        match self {
            Value::Scalar(_) => ValueShape::Scalar,
            Value::Vector(v) => ValueShape::Vector(v.len()),
        }
    }

    #[inline]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Vector(_) => None,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> Option<&[f64]> {
        match self {
            Value::Scalar(_) => None,
            Value::Vector(v) => Some(v),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Vector(v)
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(v: [f64; N]) -> Self {
        Value::Vector(v.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_follow_arity() {
        assert_eq!(Value::Scalar(1.0).shape(), ValueShape::Scalar);
        assert_eq!(Value::from([1.0, 2.0, 3.0]).shape(), ValueShape::Vector(3));
    }

    #[test]
    fn untagged_json_forms() {
        let s: Value = serde_json::from_str("2.5").unwrap();
        assert_eq!(s, Value::Scalar(2.5));
        let v: Value = serde_json::from_str("[1, 0, 0.5]").unwrap();
        assert_eq!(v, Value::Vector(vec![1.0, 0.0, 0.5]));
        assert_eq!(serde_json::to_string(&Value::Scalar(1.0)).unwrap(), "1.0");
    }
}
