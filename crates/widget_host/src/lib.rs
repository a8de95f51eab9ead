//! Typed host-domain contracts shared by the widget state machines and browser adapters.
//!
//! This crate is the boundary for the durable key-value store the widget library consumes
//! (theme preference persistence) and for wall-clock time. Concrete browser storage lives in
//! `widget_host_web`; the state machines in `widget_state` only ever see the [`PrefsStore`]
//! trait.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;

pub use storage::prefs::{
    load_pref_with, save_pref_with, FailingPrefsStore, MemoryPrefsStore, NoopPrefsStore,
    PrefsStore, PrefsStoreFuture,
};
pub use time::unix_time_ms_now;
