//! Flat variable namespace for one run.

use crate::value::Value;
use std::collections::BTreeMap;

/// The single variable namespace of a run.
///
/// There is no lexical nesting. Procedure parameters temporarily overwrite
/// entries through [`Namespace::shadow`] and are put back by
/// [`Namespace::unshadow`].
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    bindings: BTreeMap<String, Value>,
}

/// What a [`Namespace::shadow`] call replaced, in binding order.
#[derive(Debug)]
#[must_use = "shadowed bindings must be handed back to `Namespace::unshadow`"]
pub struct Shadowed {
    saved: Vec<(String, Option<Value>)>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Bind or overwrite a variable.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of every binding.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.bindings.clone()
    }

    /// Bind each `(name, value)` pair, remembering what was there before.
    pub fn shadow(&mut self, bindings: Vec<(String, Value)>) -> Shadowed {
        let mut saved = Vec::with_capacity(bindings.len());
        for (name, value) in bindings {
            let prior = self.bindings.insert(name.clone(), value);
            saved.push((name, prior));
        }
        Shadowed { saved }
    }

    /// Undo a [`Namespace::shadow`]: drop each binding, then restore what it replaced.
    ///
    /// Runs in reverse binding order so a name shadowed twice ends at its
    /// original value.
    pub fn unshadow(&mut self, shadowed: Shadowed) {
        for (name, prior) in shadowed.saved.into_iter().rev() {
            self.bindings.remove(&name);
            if let Some(value) = prior {
                self.bindings.insert(name, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> Value {
        Value::Number(v)
    }

    #[test]
    fn test_set_get_overwrite() {
        let mut ns = Namespace::new();
        assert!(ns.get("x").is_none());
        ns.set("x", n(1.0));
        ns.set("x", n(2.0));
        assert_eq!(ns.get("x"), Some(&n(2.0)));
        assert_eq!(ns.len(), 1);
    }

    #[test]
    fn test_shadow_restores_existing_binding() {
        let mut ns = Namespace::new();
        ns.set("x", n(1.0));
        let saved = ns.shadow(vec![("x".into(), n(99.0))]);
        assert_eq!(ns.get("x"), Some(&n(99.0)));
        ns.unshadow(saved);
        assert_eq!(ns.get("x"), Some(&n(1.0)));
    }

    #[test]
    fn test_shadow_removes_fresh_binding() {
        let mut ns = Namespace::new();
        let saved = ns.shadow(vec![("y".into(), n(5.0))]);
        assert!(ns.contains("y"));
        ns.unshadow(saved);
        assert!(!ns.contains("y"));
        assert!(ns.is_empty());
    }

    #[test]
    fn test_unshadow_discards_body_writes() {
        let mut ns = Namespace::new();
        ns.set("x", n(1.0));
        let saved = ns.shadow(vec![("x".into(), n(2.0))]);
        ns.set("x", n(3.0));
        ns.set("other", n(4.0));
        ns.unshadow(saved);
        assert_eq!(ns.get("x"), Some(&n(1.0)));
        // Non-parameter writes made during the call stay.
        assert_eq!(ns.get("other"), Some(&n(4.0)));
    }

    #[test]
    fn test_duplicate_parameter_names() {
        let mut ns = Namespace::new();
        ns.set("a", n(0.0));
        let before = ns.snapshot();
        let saved = ns.shadow(vec![("a".into(), n(1.0)), ("a".into(), n(2.0))]);
        assert_eq!(ns.get("a"), Some(&n(2.0)));
        ns.unshadow(saved);
        assert_eq!(ns.snapshot(), before);
    }
}
