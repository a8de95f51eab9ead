//! Browser (`wasm32`) implementations of [`widget_host`] service contracts.
//!
//! The only durable capability the widget library needs is the preference store that remembers
//! the active theme across reloads. [`WebPrefsStore`] backs it with `window.localStorage`, and
//! [`prefs_store`] picks the compile-time selected adapter.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time store selection and the adapter handed to reactive providers.
pub mod adapters;
pub mod storage;

pub use adapters::{prefs_store, selected_prefs_strategy, PrefsStoreAdapter, PrefsStrategy};
pub use storage::local_prefs::WebPrefsStore;
