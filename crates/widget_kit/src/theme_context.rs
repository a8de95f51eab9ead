//! Theme registry provider and consumer hooks.
//!
//! [`ThemeProvider`] owns the one shared [`ThemeRegistry`] for its subtree. Every mutation goes
//! through [`reduce_theme`]; the resulting [`ThemeEffect`] list is executed in order (change
//! callback first, then best-effort persistence). Persistence failures are logged and dropped.
#![allow(clippy::clone_on_copy)]

use std::rc::Rc;

use leptos::*;
use widget_host::PrefsStore;
use widget_state::{
    load_persisted_theme, resolve_theme_name, run_theme_effect, ClassPrefixResolver,
    StyleDescriptor, StyleResolver, ThemeEffect, ThemeError, ThemeRegistry, ThemeRegistryConfig,
    WidgetPalette, WidgetTokens,
};

#[derive(Debug, Clone, PartialEq)]
/// Registry mutations accepted by [`ThemeContext::dispatch`].
pub enum ThemeAction {
    /// Select a registered theme.
    Set(String),
    /// Advance to the next theme in cycle order.
    Toggle,
    /// Restore the initial theme and clear the persisted preference.
    Reset,
    /// Register or overwrite a theme.
    Add {
        /// Theme name.
        name: String,
        /// Style tokens for the theme.
        descriptor: StyleDescriptor,
    },
    /// Unregister a theme.
    Remove(String),
    /// Apply a persisted theme name without writing it back.
    Hydrate(String),
}

/// Applies `action` to `registry`.
///
/// # Errors
///
/// Returns the registry's [`ThemeError`] for unknown names and for removing the default theme.
pub fn reduce_theme(
    registry: &mut ThemeRegistry,
    action: ThemeAction,
) -> Result<Vec<ThemeEffect>, ThemeError> {
    match action {
        ThemeAction::Set(name) => registry.try_set_theme(&name),
        ThemeAction::Toggle => Ok(registry.toggle_theme()),
        ThemeAction::Reset => Ok(registry.reset_theme()),
        ThemeAction::Add { name, descriptor } => {
            registry.add_theme(name, descriptor);
            Ok(Vec::new())
        }
        ThemeAction::Remove(name) => registry.try_remove_theme(&name),
        ThemeAction::Hydrate(name) => {
            if registry.contains(&name) {
                Ok(registry.hydrate(&name))
            } else {
                Err(ThemeError::UnknownTheme(name))
            }
        }
    }
}

#[derive(Clone, Copy)]
/// Leptos context for reading the shared theme registry and dispatching [`ThemeAction`] values.
pub struct ThemeContext {
    /// Reactive registry snapshot.
    pub registry: RwSignal<ThemeRegistry>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<ThemeAction>,
    resolver: StoredValue<Rc<dyn StyleResolver>>,
}

impl ThemeContext {
    /// Dispatches a registry action.
    pub fn dispatch_action(&self, action: ThemeAction) {
        self.dispatch.call(action);
    }

    /// Reactive active theme name.
    pub fn active_theme_name(&self) -> String {
        self.registry.with(|registry| registry.active_theme_name().to_string())
    }

    /// Reactive descriptor of the active theme.
    pub fn active_theme(&self) -> StyleDescriptor {
        self.registry.with(|registry| registry.get_active_theme().clone())
    }

    /// Reactive preview lookup; never mutates the registry.
    pub fn preview_theme(&self, name: &str) -> StyleDescriptor {
        self.registry.with(|registry| registry.preview_theme(name).clone())
    }

    /// Reactive list of theme names in cycle order.
    pub fn available_theme_names(&self) -> Vec<String> {
        self.registry
            .with(|registry| registry.available_theme_names().to_vec())
    }

    /// Maps a semantic token through the provider's style resolver.
    pub fn resolve_token(&self, token: &str) -> String {
        self.resolver.with_value(|resolver| resolver.resolve(token))
    }

    /// Selects `name`; unknown names are ignored.
    pub fn set_theme(&self, name: impl Into<String>) {
        self.dispatch_action(ThemeAction::Set(name.into()));
    }

    /// Advances to the next theme.
    pub fn toggle_theme(&self) {
        self.dispatch_action(ThemeAction::Toggle);
    }

    /// Restores the initial theme.
    pub fn reset_theme(&self) {
        self.dispatch_action(ThemeAction::Reset);
    }

    /// Registers or overwrites a theme.
    pub fn add_theme(&self, name: impl Into<String>, descriptor: StyleDescriptor) {
        self.dispatch_action(ThemeAction::Add {
            name: name.into(),
            descriptor,
        });
    }

    /// Unregisters a theme; the default theme is kept.
    pub fn remove_theme(&self, name: impl Into<String>) {
        self.dispatch_action(ThemeAction::Remove(name.into()));
    }
}

fn build_registry(
    themes: Option<Vec<(String, StyleDescriptor)>>,
    config: Option<ThemeRegistryConfig>,
) -> ThemeRegistry {
    let config = config.unwrap_or_default();
    let built = match themes {
        Some(themes) => ThemeRegistry::new(themes, config),
        None => ThemeRegistry::builtin_with(config),
    };
    match built {
        Ok(registry) => registry,
        Err(err) => {
            logging::warn!("theme registry config rejected, using built-in themes: {err}");
            ThemeRegistry::builtin()
        }
    }
}

fn run_effects(
    effects: Vec<ThemeEffect>,
    store: StoredValue<Rc<dyn PrefsStore>>,
    on_change: Option<Callback<String>>,
) {
    for effect in effects {
        if let ThemeEffect::Changed { to, .. } = &effect {
            if let Some(on_change) = on_change.as_ref() {
                on_change.call(to.clone());
            }
            continue;
        }

        let store = store.get_value();
        spawn_local(async move {
            if let Err(err) = run_theme_effect(store.as_ref(), &effect).await {
                logging::warn!("theme preference write failed: {err}");
            }
        });
    }
}

fn install_boot_hydration(
    key: String,
    store: StoredValue<Rc<dyn PrefsStore>>,
    user_changed: StoredValue<bool>,
    dispatch: Callback<ThemeAction>,
) {
    let store = store.get_value();
    spawn_local(async move {
        match load_persisted_theme(store.as_ref(), &key).await {
            Ok(Some(name)) if user_changed.get_value() => {
                logging::log!("skipping persisted theme `{name}`: changed before hydration");
            }
            Ok(Some(name)) => {
                logging::log!("hydrating persisted theme `{name}`");
                dispatch.call(ThemeAction::Hydrate(name));
            }
            Ok(None) => {}
            Err(err) => logging::warn!("theme preference load failed: {err}"),
        }
    });
}

#[component]
/// Provides [`ThemeContext`] to descendant widgets and hydrates the persisted theme.
pub fn ThemeProvider(
    /// Named themes in cycle order. Defaults to the built-in light/dark pair.
    #[prop(optional)]
    themes: Option<Vec<(String, StyleDescriptor)>>,
    /// Registry settings, applied to `themes` or to the built-in pair. A rejected config falls
    /// back to the built-in defaults with a warning.
    #[prop(optional)]
    config: Option<ThemeRegistryConfig>,
    /// Durable preference store. Defaults to the browser store selected by feature.
    #[prop(optional)]
    store: Option<Rc<dyn PrefsStore>>,
    /// Token-to-presentation mapping. Defaults to passing tokens through.
    #[prop(optional)]
    style_resolver: Option<Rc<dyn StyleResolver>>,
    /// Fired with the new theme name after every effective change.
    #[prop(optional)]
    on_change: Option<Callback<String>>,
    children: Children,
) -> impl IntoView {
    let registry = create_rw_signal(build_registry(themes, config));
    let store = store_value(
        store.unwrap_or_else(|| Rc::new(widget_host_web::prefs_store()) as Rc<dyn PrefsStore>),
    );
    let resolver = store_value(style_resolver.unwrap_or_else(|| {
        Rc::new(ClassPrefixResolver { prefix: "" }) as Rc<dyn StyleResolver>
    }));
    let user_changed = store_value(false);

    let dispatch = Callback::new(move |action: ThemeAction| {
        if !matches!(action, ThemeAction::Hydrate(_)) {
            user_changed.set_value(true);
        }
        let mut next = registry.get_untracked();
        let previous = next.clone();

        match reduce_theme(&mut next, action) {
            Ok(effects) => {
                if next != previous {
                    registry.set(next);
                }
                run_effects(effects, store, on_change);
            }
            Err(err) => logging::warn!("theme action ignored: {err}"),
        }
    });

    let context = ThemeContext {
        registry,
        dispatch,
        resolver,
    };
    provide_context(context.clone());

    let persist_key = registry.with_untracked(|registry| {
        registry
            .config()
            .persist
            .then(|| registry.config().storage_key.clone())
    });
    if let Some(key) = persist_key {
        install_boot_hydration(key, store, user_changed, dispatch);
    }

    children().into_view()
}

/// Returns the current [`ThemeContext`].
///
/// # Panics
///
/// Panics if called outside [`ThemeProvider`].
pub fn use_theme_registry() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not provided; mount a ThemeProvider")
}

/// Returns the current [`ThemeContext`], if a provider is mounted.
pub fn try_use_theme_registry() -> Option<ThemeContext> {
    use_context::<ThemeContext>()
}

/// Effective theme name for one widget: explicit prop, then the registry, then `widget_default`.
pub fn use_resolved_theme(
    explicit: MaybeSignal<Option<String>>,
    widget_default: &'static str,
) -> Signal<String> {
    let context = try_use_theme_registry();
    Signal::derive(move || {
        let explicit = explicit.get();
        match context {
            Some(context) => context.registry.with(|registry| {
                resolve_theme_name(explicit.as_deref(), Some(registry), widget_default)
            }),
            None => resolve_theme_name(explicit.as_deref(), None, widget_default),
        }
    })
}

/// Palette tokens for the effective theme, [`WidgetTokens::UNKNOWN`] for unmapped names.
pub fn use_widget_tokens(
    explicit: MaybeSignal<Option<String>>,
    palette: WidgetPalette,
) -> Signal<WidgetTokens> {
    let default_theme = palette.theme_names().next().unwrap_or("light");
    let theme = use_resolved_theme(explicit, default_theme);
    Signal::derive(move || theme.with(|name| palette.resolve(name)))
}

/// Class list for the effective theme, resolved through the provider's style resolver.
pub(crate) fn use_widget_class(
    explicit: MaybeSignal<Option<String>>,
    palette: WidgetPalette,
) -> Signal<String> {
    let context = try_use_theme_registry();
    let tokens = use_widget_tokens(explicit, palette);
    Signal::derive(move || {
        let tokens = tokens.get();
        match context {
            Some(context) => [tokens.background, tokens.text, tokens.border]
                .iter()
                .map(|token| context.resolve_token(token))
                .collect::<Vec<_>>()
                .join(" "),
            None => tokens.class(),
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn registry() -> ThemeRegistry {
        ThemeRegistry::new(
            [
                ("light", StyleDescriptor::new("bg-l", "fg-l", "bd-l")),
                ("dark", StyleDescriptor::new("bg-d", "fg-d", "bd-d")),
            ],
            ThemeRegistryConfig::new("light").persisted(),
        )
        .expect("registry")
    }

    #[test]
    fn set_action_emits_change_then_persist() {
        let mut themes = registry();
        let effects = reduce_theme(&mut themes, ThemeAction::Set("dark".to_string()))
            .expect("set dark");
        assert_eq!(
            effects,
            vec![
                ThemeEffect::Changed {
                    from: "light".to_string(),
                    to: "dark".to_string(),
                },
                ThemeEffect::Persist {
                    key: "theme".to_string(),
                    name: "dark".to_string(),
                },
            ]
        );
    }

    #[test]
    fn unknown_names_are_errors_without_state_change() {
        let mut themes = registry();
        let before = themes.clone();
        assert_eq!(
            reduce_theme(&mut themes, ThemeAction::Set("sepia".to_string())),
            Err(ThemeError::UnknownTheme("sepia".to_string()))
        );
        assert_eq!(
            reduce_theme(&mut themes, ThemeAction::Hydrate("sepia".to_string())),
            Err(ThemeError::UnknownTheme("sepia".to_string()))
        );
        assert_eq!(themes, before);
    }

    #[test]
    fn hydrate_does_not_write_back() {
        let mut themes = registry();
        let effects = reduce_theme(&mut themes, ThemeAction::Hydrate("dark".to_string()))
            .expect("hydrate");
        assert!(effects
            .iter()
            .all(|effect| matches!(effect, ThemeEffect::Changed { .. })));
        assert_eq!(themes.active_theme_name(), "dark");
    }

    #[test]
    fn add_then_remove_active_theme_falls_back_to_default() {
        let mut themes = registry();
        reduce_theme(
            &mut themes,
            ThemeAction::Add {
                name: "sepia".to_string(),
                descriptor: StyleDescriptor::new("bg-s", "fg-s", "bd-s"),
            },
        )
        .expect("add");
        reduce_theme(&mut themes, ThemeAction::Set("sepia".to_string())).expect("set");
        reduce_theme(&mut themes, ThemeAction::Remove("sepia".to_string())).expect("remove");
        assert_eq!(themes.active_theme_name(), "light");
        assert_eq!(
            reduce_theme(&mut themes, ThemeAction::Remove("light".to_string())),
            Err(ThemeError::DefaultThemeProtected("light".to_string()))
        );
    }

    #[test]
    fn rejected_config_falls_back_to_builtin() {
        let themes = build_registry(
            Some(vec![(
                "solar".to_string(),
                StyleDescriptor::new("bg", "fg", "bd"),
            )]),
            Some(ThemeRegistryConfig::new("missing")),
        );
        assert_eq!(themes, ThemeRegistry::builtin());
    }

    #[test]
    fn config_applies_to_builtin_themes() {
        let themes = build_registry(None, Some(ThemeRegistryConfig::new("dark").persisted()));
        assert_eq!(themes.active_theme_name(), "dark");
        assert!(themes.config().persist);

        let themes = build_registry(None, Some(ThemeRegistryConfig::new("sepia")));
        assert_eq!(themes, ThemeRegistry::builtin());
    }
}
