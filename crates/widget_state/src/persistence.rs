//! Best-effort theme persistence over a [`PrefsStore`].
//!
//! These helpers return the store's error text; the reactive layer logs it and moves on, since
//! the in-memory registry stays authoritative for the session.

use widget_host::{load_pref_with, save_pref_with, PrefsStore};

use crate::theme::ThemeEffect;

/// Loads the persisted theme name under `key`.
///
/// # Errors
///
/// Returns an error when the store fails or the stored value is not a JSON string.
pub async fn load_persisted_theme<S: PrefsStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<Option<String>, String> {
    load_pref_with(store, key).await
}

/// Stores `name` under `key` as a JSON string.
///
/// # Errors
///
/// Returns an error when the store write fails.
pub async fn persist_theme<S: PrefsStore + ?Sized>(
    store: &S,
    key: &str,
    name: &str,
) -> Result<(), String> {
    save_pref_with(store, key, &name).await
}

/// Deletes the persisted theme under `key`.
///
/// # Errors
///
/// Returns an error when the store delete fails.
pub async fn clear_persisted_theme<S: PrefsStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<(), String> {
    store.delete_pref(key).await
}

/// Executes the storage half of a registry effect. Change notifications are not storage work and
/// succeed trivially.
///
/// # Errors
///
/// Returns the store error for `Persist` and `ClearPersisted` effects.
pub async fn run_theme_effect<S: PrefsStore + ?Sized>(
    store: &S,
    effect: &ThemeEffect,
) -> Result<(), String> {
    match effect {
        ThemeEffect::Changed { .. } => Ok(()),
        ThemeEffect::Persist { key, name } => persist_theme(store, key, name).await,
        ThemeEffect::ClearPersisted { key } => clear_persisted_theme(store, key).await,
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use widget_host::{FailingPrefsStore, MemoryPrefsStore};

    use super::*;
    use crate::theme::{StyleDescriptor, ThemeRegistry, ThemeRegistryConfig};

    fn registry() -> ThemeRegistry {
        ThemeRegistry::new(
            [
                ("light", StyleDescriptor::new("l", "l", "l")),
                ("dark", StyleDescriptor::new("d", "d", "d")),
            ],
            ThemeRegistryConfig::new("light").persisted(),
        )
        .expect("registry")
    }

    #[test]
    fn effects_round_trip_through_the_store() {
        let store = MemoryPrefsStore::default();
        let mut themes = registry();

        for effect in themes.set_theme("dark") {
            block_on(run_theme_effect(&store, &effect)).expect("persist");
        }
        assert_eq!(store.raw("theme").as_deref(), Some("\"dark\""));

        let mut reloaded = registry();
        let persisted = block_on(load_persisted_theme(&store, "theme")).expect("load");
        reloaded.hydrate(persisted.as_deref().unwrap_or_default());
        assert_eq!(reloaded.active_theme_name(), "dark");

        for effect in reloaded.reset_theme() {
            block_on(run_theme_effect(&store, &effect)).expect("clear");
        }
        assert_eq!(store.raw("theme"), None);
    }

    #[test]
    fn store_failure_leaves_registry_authoritative() {
        let store = FailingPrefsStore::new("quota exceeded");
        let mut themes = registry();
        let failures: Vec<String> = themes
            .set_theme("dark")
            .iter()
            .filter_map(|effect| block_on(run_theme_effect(&store, effect)).err())
            .collect();

        assert_eq!(failures, vec!["quota exceeded".to_string()]);
        assert_eq!(themes.active_theme_name(), "dark");
        assert!(block_on(load_persisted_theme(&store, "theme")).is_err());
    }

    #[test]
    fn malformed_persisted_value_is_an_error() {
        let store = MemoryPrefsStore::default();
        block_on(store.save_pref("theme", "{not json")).expect("raw save");
        assert!(block_on(load_persisted_theme(&store, "theme")).is_err());
    }
}
