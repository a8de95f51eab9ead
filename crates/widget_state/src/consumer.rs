//! Theme consumption for individual widgets.
//!
//! A widget resolves its effective theme name (explicit prop, then the shared registry, then a
//! default) and maps that name onto its own static token table. Unknown names never fail; they
//! render the literal [`WidgetTokens::UNKNOWN`] tokens.

use crate::theme::{ThemeRegistry, UNKNOWN_THEME_TOKEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Where a resolved theme name came from.
pub enum ThemeSource {
    /// The widget's own `theme` prop.
    Explicit,
    /// The shared registry's active theme.
    Registry,
    /// The registry default, or the widget default when no registry is mounted.
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Effective theme name for one widget render.
pub struct ResolvedTheme {
    /// Theme name to look up in the widget palette.
    pub name: String,
    /// Resolution step that produced `name`.
    pub source: ThemeSource,
}

/// Resolves a widget's theme: a non-blank explicit prop wins, then the registry's active theme,
/// then the registry default, then `widget_default`.
pub fn resolve_theme(
    explicit: Option<&str>,
    registry: Option<&ThemeRegistry>,
    widget_default: &str,
) -> ResolvedTheme {
    if let Some(name) = explicit.map(str::trim).filter(|name| !name.is_empty()) {
        return ResolvedTheme {
            name: name.to_string(),
            source: ThemeSource::Explicit,
        };
    }

    match registry {
        Some(registry) if registry.contains(registry.active_theme_name()) => ResolvedTheme {
            name: registry.active_theme_name().to_string(),
            source: ThemeSource::Registry,
        },
        Some(registry) => ResolvedTheme {
            name: registry.default_theme_name().to_string(),
            source: ThemeSource::Default,
        },
        None => ResolvedTheme {
            name: widget_default.to_string(),
            source: ThemeSource::Default,
        },
    }
}

/// Shorthand for [`resolve_theme`] returning just the name.
pub fn resolve_theme_name(
    explicit: Option<&str>,
    registry: Option<&ThemeRegistry>,
    widget_default: &str,
) -> String {
    resolve_theme(explicit, registry, widget_default).name
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Static presentation tokens for one widget under one theme.
pub struct WidgetTokens {
    /// Surface background token.
    pub background: &'static str,
    /// Foreground text token.
    pub text: &'static str,
    /// Border token.
    pub border: &'static str,
}

impl WidgetTokens {
    /// Tokens rendered when a theme name has no entry in a widget palette.
    pub const UNKNOWN: Self = Self {
        background: UNKNOWN_THEME_TOKEN,
        text: UNKNOWN_THEME_TOKEN,
        border: UNKNOWN_THEME_TOKEN,
    };

    /// Space-joined class list.
    pub fn class(&self) -> String {
        format!("{} {} {}", self.background, self.text, self.border)
    }

    /// Returns whether these are the unknown-theme tokens.
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

#[derive(Debug, Clone, Copy)]
/// Widget-local table from theme name to tokens.
pub struct WidgetPalette {
    entries: &'static [(&'static str, WidgetTokens)],
}

impl WidgetPalette {
    /// Wraps a static table.
    pub const fn new(entries: &'static [(&'static str, WidgetTokens)]) -> Self {
        Self { entries }
    }

    /// Tokens for `theme`, or [`WidgetTokens::UNKNOWN`].
    pub fn resolve(&self, theme: &str) -> WidgetTokens {
        self.entries
            .iter()
            .find(|(name, _)| *name == theme)
            .map(|(_, tokens)| *tokens)
            .unwrap_or(WidgetTokens::UNKNOWN)
    }

    /// Theme names this palette knows about.
    pub fn theme_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

/// Injected mapping from a semantic token to a concrete style string.
///
/// Implemented for closures so hosts can pass `|token| format!(...)` directly.
pub trait StyleResolver {
    /// Resolves `token` to a style string (class name, CSS variable, ...).
    fn resolve(&self, token: &str) -> String;
}

impl<F> StyleResolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve(&self, token: &str) -> String {
        self(token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Resolver that prefixes tokens, e.g. `ui` + `surface` → `ui-surface`.
pub struct ClassPrefixResolver {
    /// Prefix prepended to every token.
    pub prefix: &'static str,
}

impl StyleResolver for ClassPrefixResolver {
    fn resolve(&self, token: &str) -> String {
        if self.prefix.is_empty() {
            token.to_string()
        } else {
            format!("{}-{token}", self.prefix)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::theme::{StyleDescriptor, ThemeRegistryConfig};

    const PALETTE: WidgetPalette = WidgetPalette::new(&[
        (
            "light",
            WidgetTokens {
                background: "bg-white",
                text: "text-black",
                border: "border-gray",
            },
        ),
        (
            "dark",
            WidgetTokens {
                background: "bg-black",
                text: "text-white",
                border: "border-slate",
            },
        ),
    ]);

    fn registry() -> ThemeRegistry {
        ThemeRegistry::new(
            [
                ("light", StyleDescriptor::new("l", "l", "l")),
                ("dark", StyleDescriptor::new("d", "d", "d")),
            ],
            ThemeRegistryConfig::new("light"),
        )
        .expect("registry")
    }

    #[test]
    fn explicit_prop_wins_over_registry() {
        let mut registry = registry();
        registry.set_theme("dark");
        let resolved = resolve_theme(Some("light"), Some(&registry), "dark");
        assert_eq!(resolved.name, "light");
        assert_eq!(resolved.source, ThemeSource::Explicit);
    }

    #[test]
    fn blank_explicit_prop_defers_to_registry() {
        let mut registry = registry();
        registry.set_theme("dark");
        let resolved = resolve_theme(Some("  "), Some(&registry), "light");
        assert_eq!(
            resolved,
            ResolvedTheme {
                name: "dark".to_string(),
                source: ThemeSource::Registry
            }
        );
    }

    #[test]
    fn standalone_widget_uses_its_default() {
        assert_eq!(resolve_theme_name(None, None, "light"), "light");
    }

    #[test]
    fn unknown_theme_renders_unknown_tokens() {
        let tokens = PALETTE.resolve("solarized");
        assert!(tokens.is_unknown());
        assert_eq!(tokens.class(), "unknown-theme unknown-theme unknown-theme");
        assert_eq!(PALETTE.resolve("dark").background, "bg-black");
        assert_eq!(PALETTE.theme_names().collect::<Vec<_>>(), vec!["light", "dark"]);
    }

    #[test]
    fn resolvers_map_tokens() {
        let prefixed = ClassPrefixResolver { prefix: "ui" };
        assert_eq!(prefixed.resolve("surface"), "ui-surface");
        assert_eq!(ClassPrefixResolver { prefix: "" }.resolve("surface"), "surface");

        let css_var = |token: &str| format!("var(--{token})");
        assert_eq!(StyleResolver::resolve(&css_var, "accent"), "var(--accent)");
    }
}
