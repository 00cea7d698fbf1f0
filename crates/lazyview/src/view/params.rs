//! Shared parameters of a view instance

use crate::template::ParameterSet;
use toml::Value;

/// Parameters visible to every render of a [`View`](super::View)
///
/// On a name clash with call-local parameters the shared value wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterStore {
    values: ParameterSet,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Insert or overwrite
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn all(&self) -> &ParameterSet {
        &self.values
    }

    /// Scope for one render: call-local values, overridden by shared ones
    pub fn merged(&self, call: &ParameterSet) -> ParameterSet {
        let mut merged = call.clone();
        for (name, value) in &self.values {
            merged.insert(name.clone(), value.clone());
        }
        merged
    }
}

impl From<ParameterSet> for ParameterStore {
    fn from(values: ParameterSet) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::toml;

    #[test]
    fn test_set_overwrites_silently() {
        let mut store = ParameterStore::new();
        store.set("title", "First");
        store.set("title", "Second");
        assert_eq!(store.get("title").and_then(Value::as_str), Some("Second"));
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn test_has_and_get_missing() {
        let store = ParameterStore::from(toml! { count = 3 });
        assert!(store.has("count"));
        assert!(!store.has("missing"));
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_shared_value_wins_over_call_value() {
        let store = ParameterStore::from(toml! { x = "A" });
        let call = toml! {
            x = "B"
            y = "C"
        };

        let merged = store.merged(&call);
        assert_eq!(merged.get("x").and_then(Value::as_str), Some("A"));
        assert_eq!(merged.get("y").and_then(Value::as_str), Some("C"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let store = ParameterStore::from(toml! { x = 1 });
        let call = toml! { y = 2 };
        let _ = store.merged(&call);
        assert!(!store.has("y"));
        assert!(!call.contains_key("x"));
    }
}
