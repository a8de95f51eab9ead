//! Theme registry: the active theme name, the named style descriptors, and the cycle order used
//! by "next theme".
//!
//! The registry is the only state shared across widget instances. It is mutated exclusively
//! through its own methods, which return [`ThemeEffect`] intents (change notification,
//! persistence) for the reactive layer to execute in order.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Preference key used for the persisted theme name unless configured otherwise.
pub const DEFAULT_THEME_STORAGE_KEY: &str = "theme";

/// Token value used by [`StyleDescriptor::unknown`].
pub const UNKNOWN_THEME_TOKEN: &str = "unknown-theme";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Opaque bundle of presentation tokens associated with one theme name.
pub struct StyleDescriptor {
    /// Background token (usually a class name).
    pub background: String,
    /// Foreground text token.
    pub text: String,
    /// Border token.
    pub border: String,
    /// Additional named tokens (accent, shadow, ...).
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl StyleDescriptor {
    /// Creates a descriptor from the three core tokens.
    pub fn new(
        background: impl Into<String>,
        text: impl Into<String>,
        border: impl Into<String>,
    ) -> Self {
        Self {
            background: background.into(),
            text: text.into(),
            border: border.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Adds or replaces a named extra token.
    pub fn with_token(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Looks up a token by name. The core tokens are addressable as `background`, `text`, and
    /// `border`.
    pub fn token(&self, name: &str) -> Option<&str> {
        match name {
            "background" => Some(self.background.as_str()),
            "text" => Some(self.text.as_str()),
            "border" => Some(self.border.as_str()),
            other => self.extra.get(other).map(String::as_str),
        }
    }

    /// Space-joined core tokens, ready to drop into a `class` attribute.
    pub fn class_list(&self) -> String {
        [&self.background, &self.text, &self.border]
            .into_iter()
            .filter(|token| !token.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Literal "unknown theme" descriptor rendered instead of crashing on a bad lookup.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_THEME_TOKEN, UNKNOWN_THEME_TOKEN, UNKNOWN_THEME_TOKEN)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Construction-time registry settings.
pub struct ThemeRegistryConfig {
    /// Theme active at mount and the target of [`ThemeRegistry::reset_theme`].
    pub initial_theme: String,
    /// Fallback theme used when the active theme disappears. Cannot be removed.
    pub default_theme: String,
    /// Whether theme changes are written to the durable preference store.
    pub persist: bool,
    /// Preference key for the persisted theme name.
    pub storage_key: String,
}

impl Default for ThemeRegistryConfig {
    fn default() -> Self {
        Self {
            initial_theme: "light".to_string(),
            default_theme: "light".to_string(),
            persist: false,
            storage_key: DEFAULT_THEME_STORAGE_KEY.to_string(),
        }
    }
}

impl ThemeRegistryConfig {
    /// Config whose initial and default theme are both `theme`.
    pub fn new(theme: impl Into<String>) -> Self {
        let theme = theme.into();
        Self {
            initial_theme: theme.clone(),
            default_theme: theme,
            ..Self::default()
        }
    }

    /// Overrides the fallback theme.
    pub fn with_default(mut self, theme: impl Into<String>) -> Self {
        self.default_theme = theme.into();
        self
    }

    /// Enables persistence under the configured storage key.
    pub fn persisted(mut self) -> Self {
        self.persist = true;
        self
    }

    /// Overrides the preference key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by registry mutations, in execution order.
pub enum ThemeEffect {
    /// The active theme changed; fire the change-notification callback.
    Changed {
        /// Previously active theme.
        from: String,
        /// Newly active theme.
        to: String,
    },
    /// Write `name` to the durable store under `key`.
    Persist {
        /// Preference key.
        key: String,
        /// Theme name to store.
        name: String,
    },
    /// Delete the persisted preference under `key`.
    ClearPersisted {
        /// Preference key.
        key: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Rejected registry operations. The infallible wrappers (`set_theme`, `remove_theme`) treat
/// these as no-ops.
pub enum ThemeError {
    /// The named theme is not registered.
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
    /// The configured default theme is the fallback target and stays registered.
    #[error("theme `{0}` is the registry default and cannot be removed")]
    DefaultThemeProtected(String),
    /// A registry needs at least one theme.
    #[error("theme registry needs at least one theme")]
    EmptyRegistry,
    /// The configured default theme is missing from the initial theme set.
    #[error("default theme `{0}` is not registered")]
    MissingDefault(String),
}

#[derive(Debug, Clone, PartialEq)]
/// Process-wide store of the active theme and the named style descriptors.
pub struct ThemeRegistry {
    active: String,
    themes: HashMap<String, StyleDescriptor>,
    order: Vec<String>,
    config: ThemeRegistryConfig,
    unknown: StyleDescriptor,
}

impl ThemeRegistry {
    /// Builds a registry from named descriptors. Insertion order becomes the toggle cycle order;
    /// a repeated name overwrites the earlier descriptor but keeps its position.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::EmptyRegistry`] for an empty theme set,
    /// [`ThemeError::MissingDefault`] when the default theme is absent, and
    /// [`ThemeError::UnknownTheme`] when the initial theme is absent.
    pub fn new<I, N>(themes: I, config: ThemeRegistryConfig) -> Result<Self, ThemeError>
    where
        I: IntoIterator<Item = (N, StyleDescriptor)>,
        N: Into<String>,
    {
        let mut map = HashMap::new();
        let mut order = Vec::new();
        for (name, descriptor) in themes {
            let name = name.into();
            if map.insert(name.clone(), descriptor).is_none() {
                order.push(name);
            }
        }

        if order.is_empty() {
            return Err(ThemeError::EmptyRegistry);
        }
        if !map.contains_key(&config.default_theme) {
            return Err(ThemeError::MissingDefault(config.default_theme));
        }
        if !map.contains_key(&config.initial_theme) {
            return Err(ThemeError::UnknownTheme(config.initial_theme));
        }

        Ok(Self {
            active: config.initial_theme.clone(),
            themes: map,
            order,
            config,
            unknown: StyleDescriptor::unknown(),
        })
    }

    /// Two-theme (`light`, `dark`) registry used when a host's theme set is rejected.
    pub fn builtin() -> Self {
        let config = ThemeRegistryConfig::default();
        let themes = builtin_themes();
        Self {
            active: config.initial_theme.clone(),
            order: themes.iter().map(|(name, _)| name.to_string()).collect(),
            themes: themes
                .into_iter()
                .map(|(name, descriptor)| (name.to_string(), descriptor))
                .collect(),
            config,
            unknown: StyleDescriptor::unknown(),
        }
    }

    /// The built-in `light`/`dark` pair under a host-supplied config.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`]: the config must name `light` or `dark` as its default and initial
    /// theme.
    pub fn builtin_with(config: ThemeRegistryConfig) -> Result<Self, ThemeError> {
        Self::new(builtin_themes(), config)
    }

    /// Currently selected theme key.
    pub fn active_theme_name(&self) -> &str {
        &self.active
    }

    /// Registry configuration.
    pub fn config(&self) -> &ThemeRegistryConfig {
        &self.config
    }

    /// Configured fallback theme.
    pub fn default_theme_name(&self) -> &str {
        &self.config.default_theme
    }

    /// Theme names in toggle-cycle order.
    pub fn available_theme_names(&self) -> &[String] {
        &self.order
    }

    /// Returns whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Raw descriptor lookup without fallback.
    pub fn descriptor(&self, name: &str) -> Option<&StyleDescriptor> {
        self.themes.get(name)
    }

    /// Resolves the active theme, falling back to the default theme's descriptor.
    pub fn get_active_theme(&self) -> &StyleDescriptor {
        self.themes
            .get(&self.active)
            .or_else(|| self.themes.get(&self.config.default_theme))
            .unwrap_or(&self.unknown)
    }

    /// Selects `name`. Unknown names leave the registry untouched.
    pub fn set_theme(&mut self, name: &str) -> Vec<ThemeEffect> {
        self.try_set_theme(name).unwrap_or_default()
    }

    /// Selects `name`, reporting unknown names.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnknownTheme`] when `name` is not registered.
    pub fn try_set_theme(&mut self, name: &str) -> Result<Vec<ThemeEffect>, ThemeError> {
        if !self.contains(name) {
            return Err(ThemeError::UnknownTheme(name.to_string()));
        }
        Ok(self.activate(name))
    }

    /// Advances to the next theme in cycle order, wrapping around.
    pub fn toggle_theme(&mut self) -> Vec<ThemeEffect> {
        if self.order.is_empty() {
            return Vec::new();
        }
        let next_index = self
            .order
            .iter()
            .position(|name| *name == self.active)
            .map(|index| (index + 1) % self.order.len())
            .unwrap_or(0);
        let next = self.order[next_index].clone();
        self.activate(&next)
    }

    /// Restores the configured initial theme and drops any persisted preference.
    pub fn reset_theme(&mut self) -> Vec<ThemeEffect> {
        let target = if self.contains(&self.config.initial_theme) {
            self.config.initial_theme.clone()
        } else {
            self.config.default_theme.clone()
        };

        let mut effects = Vec::new();
        if self.active != target {
            let from = std::mem::replace(&mut self.active, target.clone());
            effects.push(ThemeEffect::Changed { from, to: target });
        }
        if self.config.persist {
            effects.push(ThemeEffect::ClearPersisted {
                key: self.config.storage_key.clone(),
            });
        }
        effects
    }

    /// Inserts or overwrites a theme. New names join the end of the cycle order.
    pub fn add_theme(&mut self, name: impl Into<String>, descriptor: StyleDescriptor) {
        let name = name.into();
        if self.themes.insert(name.clone(), descriptor).is_none() {
            self.order.push(name);
        }
    }

    /// Removes a theme. Unknown names and the default theme are ignored.
    pub fn remove_theme(&mut self, name: &str) -> Vec<ThemeEffect> {
        self.try_remove_theme(name).unwrap_or_default()
    }

    /// Removes a theme, falling back to the default theme if it was active.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnknownTheme`] for unregistered names and
    /// [`ThemeError::DefaultThemeProtected`] for the configured default theme.
    pub fn try_remove_theme(&mut self, name: &str) -> Result<Vec<ThemeEffect>, ThemeError> {
        if !self.contains(name) {
            return Err(ThemeError::UnknownTheme(name.to_string()));
        }
        if name == self.config.default_theme {
            return Err(ThemeError::DefaultThemeProtected(name.to_string()));
        }

        self.themes.remove(name);
        self.order.retain(|entry| entry != name);

        if self.active == name {
            let fallback = self.config.default_theme.clone();
            return Ok(self.activate(&fallback));
        }
        Ok(Vec::new())
    }

    /// Pure lookup for hover previews; unknown names resolve to the initial theme.
    pub fn preview_theme(&self, name: &str) -> &StyleDescriptor {
        self.themes
            .get(name)
            .or_else(|| self.themes.get(&self.config.initial_theme))
            .or_else(|| self.themes.get(&self.config.default_theme))
            .unwrap_or(&self.unknown)
    }

    /// Applies a persisted theme name at boot. Emits only the change notification; the value
    /// came from the store, so it is not written back.
    pub fn hydrate(&mut self, name: &str) -> Vec<ThemeEffect> {
        if !self.contains(name) || self.active == name {
            return Vec::new();
        }
        let from = std::mem::replace(&mut self.active, name.to_string());
        vec![ThemeEffect::Changed {
            from,
            to: name.to_string(),
        }]
    }

    fn activate(&mut self, name: &str) -> Vec<ThemeEffect> {
        if self.active == name {
            return Vec::new();
        }

        let from = std::mem::replace(&mut self.active, name.to_string());
        let mut effects = vec![ThemeEffect::Changed {
            from,
            to: name.to_string(),
        }];
        if self.config.persist {
            effects.push(ThemeEffect::Persist {
                key: self.config.storage_key.clone(),
                name: name.to_string(),
            });
        }
        effects
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_themes() -> [(&'static str, StyleDescriptor); 2] {
    [
        (
            "light",
            StyleDescriptor::new("theme-light-bg", "theme-light-text", "theme-light-border"),
        ),
        (
            "dark",
            StyleDescriptor::new("theme-dark-bg", "theme-dark-text", "theme-dark-border"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn descriptor(prefix: &str) -> StyleDescriptor {
        StyleDescriptor::new(format!("{prefix}-bg"), format!("{prefix}-text"), format!("{prefix}-border"))
    }

    fn registry(config: ThemeRegistryConfig) -> ThemeRegistry {
        ThemeRegistry::new(
            [
                ("light", descriptor("light")),
                ("dark", descriptor("dark")),
                ("ocean", descriptor("ocean")),
            ],
            config,
        )
        .expect("registry")
    }

    #[test]
    fn construction_validates_default_and_initial_themes() {
        let empty: [(&str, StyleDescriptor); 0] = [];
        assert_eq!(
            ThemeRegistry::new(empty, ThemeRegistryConfig::default()),
            Err(ThemeError::EmptyRegistry)
        );
        assert_eq!(
            ThemeRegistry::new([("dark", descriptor("dark"))], ThemeRegistryConfig::new("light")),
            Err(ThemeError::MissingDefault("light".to_string()))
        );
        assert_eq!(
            ThemeRegistry::new(
                [("dark", descriptor("dark"))],
                ThemeRegistryConfig::new("sepia").with_default("dark")
            ),
            Err(ThemeError::UnknownTheme("sepia".to_string()))
        );
    }

    #[test]
    fn builtin_pair_takes_a_host_config() {
        let themes = ThemeRegistry::builtin_with(
            ThemeRegistryConfig::new("dark").persisted().with_storage_key("app.theme"),
        )
        .expect("builtin");
        assert_eq!(themes.active_theme_name(), "dark");
        assert!(themes.config().persist);
        assert_eq!(themes.config().storage_key, "app.theme");
        assert_eq!(themes.available_theme_names(), ["light", "dark"]);
        assert_eq!(
            ThemeRegistry::builtin_with(ThemeRegistryConfig::default()),
            Ok(ThemeRegistry::builtin())
        );
        assert_eq!(
            ThemeRegistry::builtin_with(ThemeRegistryConfig::new("ocean")),
            Err(ThemeError::MissingDefault("ocean".to_string()))
        );
    }

    #[test]
    fn unknown_names_leave_the_active_theme_unchanged() {
        let mut themes = registry(ThemeRegistryConfig::new("light").persisted());
        for name in ["", "Dark", "solarized", "light "] {
            assert!(themes.set_theme(name).is_empty());
            assert_eq!(themes.active_theme_name(), "light");
        }
        assert_eq!(
            themes.try_set_theme("solarized"),
            Err(ThemeError::UnknownTheme("solarized".to_string()))
        );
    }

    #[test]
    fn set_theme_notifies_then_persists() {
        let mut themes = registry(ThemeRegistryConfig::new("light").persisted());
        assert_eq!(
            themes.set_theme("dark"),
            vec![
                ThemeEffect::Changed {
                    from: "light".to_string(),
                    to: "dark".to_string()
                },
                ThemeEffect::Persist {
                    key: "theme".to_string(),
                    name: "dark".to_string()
                },
            ]
        );
        assert_eq!(themes.get_active_theme(), &descriptor("dark"));
        assert!(themes.set_theme("dark").is_empty(), "re-selecting is a no-op");
    }

    #[test]
    fn toggle_cycle_returns_to_start() {
        let mut themes = registry(ThemeRegistryConfig::new("dark"));
        let start = themes.active_theme_name().to_string();
        let mut seen = Vec::new();
        for _ in 0..themes.available_theme_names().len() {
            themes.toggle_theme();
            seen.push(themes.active_theme_name().to_string());
        }
        assert_eq!(seen, vec!["ocean", "light", "dark"]);
        assert_eq!(themes.active_theme_name(), start);
    }

    #[test]
    fn added_theme_is_previewable_without_activation() {
        let mut themes = registry(ThemeRegistryConfig::new("light"));
        let sepia = descriptor("sepia").with_token("accent", "sepia-accent");
        themes.add_theme("sepia", sepia.clone());

        assert_eq!(themes.preview_theme("sepia"), &sepia);
        assert_eq!(themes.active_theme_name(), "light");
        assert_eq!(themes.available_theme_names().last().map(String::as_str), Some("sepia"));
        assert_eq!(themes.preview_theme("sepia").token("accent"), Some("sepia-accent"));
    }

    #[test]
    fn overwriting_a_theme_keeps_its_cycle_position() {
        let mut themes = registry(ThemeRegistryConfig::new("light"));
        themes.add_theme("dark", descriptor("midnight"));
        assert_eq!(themes.available_theme_names(), ["light", "dark", "ocean"]);
        assert_eq!(themes.descriptor("dark"), Some(&descriptor("midnight")));
    }

    #[test]
    fn preview_of_unknown_name_falls_back_to_initial_theme() {
        let mut themes = registry(ThemeRegistryConfig::new("ocean").with_default("light"));
        themes.set_theme("dark");
        assert_eq!(themes.preview_theme("missing"), &descriptor("ocean"));
        assert_eq!(themes.active_theme_name(), "dark");
    }

    #[test]
    fn removing_the_active_theme_falls_back_to_default() {
        let mut themes = registry(ThemeRegistryConfig::new("light").persisted());
        themes.set_theme("ocean");
        let effects = themes.remove_theme("ocean");

        assert_eq!(themes.active_theme_name(), "light");
        assert_eq!(themes.get_active_theme(), &descriptor("light"));
        assert_eq!(themes.available_theme_names(), ["light", "dark"]);
        assert_eq!(
            effects.first(),
            Some(&ThemeEffect::Changed {
                from: "ocean".to_string(),
                to: "light".to_string()
            })
        );
    }

    #[test]
    fn default_theme_cannot_be_removed() {
        let mut themes = registry(ThemeRegistryConfig::new("dark").with_default("light"));
        assert_eq!(
            themes.try_remove_theme("light"),
            Err(ThemeError::DefaultThemeProtected("light".to_string()))
        );
        assert!(themes.remove_theme("light").is_empty());
        assert!(themes.contains("light"));
        assert!(themes.remove_theme("nope").is_empty());
    }

    #[test]
    fn removing_an_inactive_theme_keeps_the_selection() {
        let mut themes = registry(ThemeRegistryConfig::new("dark").with_default("light"));
        assert!(themes.remove_theme("ocean").is_empty());
        assert_eq!(themes.active_theme_name(), "dark");
        themes.toggle_theme();
        assert_eq!(themes.active_theme_name(), "light", "cycle skips the removed theme");
    }

    #[test]
    fn reset_restores_initial_and_clears_persistence() {
        let mut themes = registry(ThemeRegistryConfig::new("dark").with_default("light").persisted());
        themes.set_theme("ocean");
        assert_eq!(
            themes.reset_theme(),
            vec![
                ThemeEffect::Changed {
                    from: "ocean".to_string(),
                    to: "dark".to_string()
                },
                ThemeEffect::ClearPersisted {
                    key: "theme".to_string()
                },
            ]
        );
        assert_eq!(themes.active_theme_name(), "dark");
    }

    #[test]
    fn reset_falls_back_to_default_when_initial_was_removed() {
        let mut themes = registry(ThemeRegistryConfig::new("dark").with_default("light"));
        themes.remove_theme("dark");
        themes.set_theme("ocean");
        themes.reset_theme();
        assert_eq!(themes.active_theme_name(), "light");
    }

    #[test]
    fn hydrate_changes_without_persisting() {
        let mut themes = registry(ThemeRegistryConfig::new("light").persisted());
        assert_eq!(
            themes.hydrate("ocean"),
            vec![ThemeEffect::Changed {
                from: "light".to_string(),
                to: "ocean".to_string()
            }]
        );
        assert!(themes.hydrate("retro").is_empty());
        assert_eq!(themes.active_theme_name(), "ocean");
    }

    #[test]
    fn descriptor_class_list_skips_empty_tokens() {
        let descriptor = StyleDescriptor::new("bg", "", "border");
        assert_eq!(descriptor.class_list(), "bg border");
        assert_eq!(StyleDescriptor::unknown().token("text"), Some(UNKNOWN_THEME_TOKEN));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ThemeRegistryConfig =
            serde_json::from_str(r#"{"initial_theme":"dark","persist":true}"#).expect("config");
        assert_eq!(config.initial_theme, "dark");
        assert_eq!(config.default_theme, "light");
        assert_eq!(config.storage_key, DEFAULT_THEME_STORAGE_KEY);
        assert!(config.persist);
    }

    #[test]
    fn builtin_registry_is_consistent() {
        let mut themes = ThemeRegistry::default();
        assert_eq!(themes.available_theme_names(), ["light", "dark"]);
        assert!(themes.contains(themes.default_theme_name()));
        themes.toggle_theme();
        assert_eq!(themes.active_theme_name(), "dark");
    }
}
