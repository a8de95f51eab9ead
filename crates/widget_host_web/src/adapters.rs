use widget_host::{NoopPrefsStore, PrefsStore, PrefsStoreFuture};

use crate::WebPrefsStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected preference storage strategy.
pub enum PrefsStrategy {
    /// Browser `localStorage`.
    Browser,
    /// Durable storage disabled; preferences last for the session only.
    Disabled,
}

/// Returns the compile-time selected preference strategy for the active build.
pub const fn selected_prefs_strategy() -> PrefsStrategy {
    #[cfg(feature = "prefs-noop")]
    {
        PrefsStrategy::Disabled
    }

    #[cfg(not(feature = "prefs-noop"))]
    {
        PrefsStrategy::Browser
    }
}

impl PrefsStrategy {
    /// Returns the strategy as a stable string token.
    pub fn name(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Disabled => "disabled",
        }
    }
}

/// Adapter enum that erases the concrete preference backend behind [`PrefsStore`].
#[derive(Debug, Clone, Copy)]
pub enum PrefsStoreAdapter {
    /// Browser-backed preference storage.
    Browser(WebPrefsStore),
    /// No-op fallback used when durable storage is switched off.
    Disabled(NoopPrefsStore),
}

impl PrefsStore for PrefsStoreAdapter {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.load_pref(key),
            Self::Disabled(store) => store.load_pref(key),
        }
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.save_pref(key, raw_json),
            Self::Disabled(store) => store.save_pref(key, raw_json),
        }
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.delete_pref(key),
            Self::Disabled(store) => store.delete_pref(key),
        }
    }
}

/// Builds the preference store adapter for the compile-time selected strategy.
pub fn prefs_store() -> PrefsStoreAdapter {
    match selected_prefs_strategy() {
        PrefsStrategy::Browser => PrefsStoreAdapter::Browser(WebPrefsStore),
        PrefsStrategy::Disabled => PrefsStoreAdapter::Disabled(NoopPrefsStore),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_matches_selected_strategy() {
        let adapter = prefs_store();
        match (selected_prefs_strategy(), adapter) {
            (PrefsStrategy::Browser, PrefsStoreAdapter::Browser(_))
            | (PrefsStrategy::Disabled, PrefsStoreAdapter::Disabled(_)) => {}
            (strategy, adapter) => panic!("strategy {strategy:?} built {adapter:?}"),
        }
    }

    #[test]
    fn strategy_names_are_stable() {
        assert_eq!(PrefsStrategy::Browser.name(), "browser");
        assert_eq!(PrefsStrategy::Disabled.name(), "disabled");
    }
}
