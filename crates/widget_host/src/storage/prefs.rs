//! Durable key-value preference storage contracts and in-process adapters.
//!
//! Values are JSON text stored per key. Every operation is asynchronous and may fail; callers
//! that treat a preference as best-effort (the theme preference, for example) are expected to
//! discard the error after reporting it.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for lightweight preference values (JSON stored as text per key).
pub trait PrefsStore {
    /// Loads a raw JSON string for a preference key.
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>>;

    /// Saves a raw JSON string for a preference key.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>>;

    /// Deletes a preference key.
    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for hosts without durable storage and baseline tests.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_pref<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string.
///
/// Clones share the same backing map, so a clone handed to a provider observes writes made
/// through the original.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Returns the raw JSON currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

#[derive(Debug, Clone, Default)]
/// Preference store whose every operation fails, standing in for an unavailable or full
/// browser store.
pub struct FailingPrefsStore {
    /// Error text returned by every call.
    pub message: String,
}

impl FailingPrefsStore {
    /// Creates a store that fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl PrefsStore for FailingPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Err(self.message.clone()) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { Err(self.message.clone()) })
    }

    fn delete_pref<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { Err(self.message.clone()) })
    }
}

/// Loads and deserializes a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub async fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_pref(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes and saves a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or store save fails.
pub async fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_pref(key, &raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_store_round_trip_and_delete() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;

        block_on(store_obj.save_pref("theme", "\"dark\"")).expect("save");
        assert_eq!(
            block_on(store_obj.load_pref("theme")).expect("load"),
            Some("\"dark\"".to_string())
        );
        block_on(store_obj.delete_pref("theme")).expect("delete");
        assert_eq!(block_on(store_obj.load_pref("theme")).expect("load"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn memory_store_clones_share_backing_map() {
        let store = MemoryPrefsStore::default();
        let clone = store.clone();
        block_on(clone.save_pref("theme", "\"light\"")).expect("save");
        assert_eq!(store.raw("theme"), Some("\"light\"".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn typed_helpers_round_trip_strings() {
        let store = MemoryPrefsStore::default();
        block_on(save_pref_with(&store, "theme", &"ocean".to_string())).expect("save typed");
        let loaded: Option<String> = block_on(load_pref_with(&store, "theme")).expect("load");
        assert_eq!(loaded.as_deref(), Some("ocean"));
    }

    #[test]
    fn typed_load_reports_malformed_json() {
        let store = MemoryPrefsStore::default();
        block_on(store.save_pref("theme", "not json")).expect("save raw");
        let loaded = block_on(load_pref_with::<_, String>(&store, "theme"));
        assert!(loaded.is_err());
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopPrefsStore;
        let store_obj: &dyn PrefsStore = &store;
        assert_eq!(block_on(store_obj.load_pref("k")).expect("load"), None);
        block_on(store_obj.save_pref("k", "{}")).expect("save");
        block_on(store_obj.delete_pref("k")).expect("delete");
    }

    #[test]
    fn failing_store_reports_its_message_everywhere() {
        let store = FailingPrefsStore::new("quota exceeded");
        assert_eq!(
            block_on(store.load_pref("k")),
            Err("quota exceeded".to_string())
        );
        assert_eq!(
            block_on(store.save_pref("k", "1")),
            Err("quota exceeded".to_string())
        );
        assert_eq!(
            block_on(store.delete_pref("k")),
            Err("quota exceeded".to_string())
        );
    }
}
