//! Sink registry: the side-effect boundary into the scene and UI collaborators.
//!
//! A sink is keyed by `(object_id, property)`, matching the pair carried by
//! each track. One callback per key; registering again replaces it.

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Callback receiving a track's evaluated value every tick.
pub type Sink = Box<dyn FnMut(&Value)>;

/// `(object_id, property)` pair addressing one sink.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkKey {
    pub object_id: String,
    pub property: String,
}

impl SinkKey {
    pub fn new(object_id: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            property: property.into(),
        }
    }
}

impl fmt::Display for SinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_id, self.property)
    }
}

/// Sinks grouped by object, then property, so lookups borrow `&str` keys.
#[derive(Default)]
pub struct SinkRegistry {
    sinks: HashMap<String, HashMap<String, Sink>>,
}

impl fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the sink for `(object_id, property)`.
    pub fn register(&mut self, object_id: &str, property: &str, sink: Sink) {
        self.sinks
            .entry_ref(object_id)
            .or_default()
            .insert(property.to_string(), sink);
    }

    /// Remove a sink, returning whether one was registered.
    pub fn unregister(&mut self, object_id: &str, property: &str) -> bool {
        let Some(props) = self.sinks.get_mut(object_id) else {
            return false;
        };
        let removed = props.remove(property).is_some();
        if props.is_empty() {
            self.sinks.remove(object_id);
        }
        removed
    }

    pub fn contains(&self, object_id: &str, property: &str) -> bool {
        self.sinks
            .get(object_id)
            .is_some_and(|props| props.contains_key(property))
    }

    pub fn get_mut(&mut self, object_id: &str, property: &str) -> Option<&mut Sink> {
        self.sinks.get_mut(object_id)?.get_mut(property)
    }

    /// Deliver `value` to the sink for `(object_id, property)`, if any.
    /// Returns whether a sink was invoked.
    pub fn dispatch(&mut self, object_id: &str, property: &str, value: &Value) -> bool {
        match self.get_mut(object_id, property) {
            Some(sink) => {
                sink(value);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sinks.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn clear(&mut self) {
        self.sinks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn registering_twice_replaces() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut reg = SinkRegistry::new();

        let first = Rc::clone(&seen);
        reg.register("ball", "y", Box::new(move |_| first.borrow_mut().push("first")));
        let second = Rc::clone(&seen);
        reg.register("ball", "y", Box::new(move |_| second.borrow_mut().push("second")));

        assert_eq!(reg.len(), 1);
        assert!(reg.dispatch("ball", "y", &Value::Scalar(1.0)));
        assert_eq!(*seen.borrow(), vec!["second"]);
    }

    #[test]
    fn unregister_and_missing_keys() {
        let mut reg = SinkRegistry::new();
        reg.register("cube", "opacity", Box::new(|_| {}));
        assert!(reg.contains("cube", "opacity"));
        assert!(!reg.dispatch("cube", "scale", &Value::Scalar(1.0)));
        assert!(reg.unregister("cube", "opacity"));
        assert!(!reg.unregister("cube", "opacity"));
        assert!(reg.is_empty());
    }
}
