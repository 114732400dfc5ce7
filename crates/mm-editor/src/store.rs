//! Document persistence.
//!
//! The editor saves and loads JSON text through a `DocumentStore`. Hosts
//! back it with whatever they have (local storage, files); `MemoryStore`
//! keeps everything in process.

use std::collections::BTreeMap;

pub trait DocumentStore {
    /// Store `json` under `name`, replacing any previous document.
    fn save(&mut self, name: &str, json: &str);

    fn load(&self, name: &str) -> Option<String>;

    /// Returns `false` if nothing was stored under `name`.
    fn delete(&mut self, name: &str) -> bool;

    /// Stored document names, sorted.
    fn names(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn save(&mut self, name: &str, json: &str) {
        self.documents.insert(name.to_string(), json.to_string());
    }

    fn load(&self, name: &str) -> Option<String> {
        self.documents.get(name).cloned()
    }

    fn delete(&mut self, name: &str) -> bool {
        self.documents.remove(name).is_some()
    }

    fn names(&self) -> Vec<String> {
        self.documents.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn save_load_delete() {
        let mut store = MemoryStore::new();
        store.save("b", "{}");
        store.save("a", "[]");
        store.save("b", "{\"x\":1}");
        assert_eq!(store.names(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.load("b").as_deref(), Some("{\"x\":1}"));
        assert!(store.delete("a"));
        assert!(!store.delete("a"));
        assert_eq!(store.load("a"), None);
    }
}
