//! Key-name to intent mapping shared by menus, dropdowns, tabs, and accordions.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyIntent {
    /// Enter or Space: same as a click on the focused item.
    Activate,
    /// Escape: close the overlay-style group without touching its selection.
    Dismiss,
    Next,
    Previous,
    First,
    Last,
    Other,
}

impl KeyIntent {
    /// Maps a `KeyboardEvent.key` value. Left/Right and Up/Down are treated alike so the same
    /// mapping serves horizontal tab lists and vertical menus.
    pub fn from_key(key: &str) -> Self {
        match key {
            "Enter" | " " | "Spacebar" => Self::Activate,
            "Escape" | "Esc" => Self::Dismiss,
            "ArrowDown" | "ArrowRight" | "Down" | "Right" => Self::Next,
            "ArrowUp" | "ArrowLeft" | "Up" | "Left" => Self::Previous,
            "Home" => Self::First,
            "End" => Self::Last,
            _ => Self::Other,
        }
    }

    /// Returns whether the browser default for the key should be suppressed.
    pub fn is_handled(self) -> bool {
        !matches!(self, Self::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_keys_match_click() {
        for key in ["Enter", " ", "Spacebar"] {
            assert_eq!(KeyIntent::from_key(key), KeyIntent::Activate);
        }
    }

    #[test]
    fn navigation_and_dismissal_keys() {
        assert_eq!(KeyIntent::from_key("Escape"), KeyIntent::Dismiss);
        assert_eq!(KeyIntent::from_key("ArrowRight"), KeyIntent::Next);
        assert_eq!(KeyIntent::from_key("ArrowUp"), KeyIntent::Previous);
        assert_eq!(KeyIntent::from_key("Home"), KeyIntent::First);
        assert_eq!(KeyIntent::from_key("End"), KeyIntent::Last);
        assert_eq!(KeyIntent::from_key("a"), KeyIntent::Other);
        assert!(!KeyIntent::Other.is_handled());
    }
}
