use crate::storage::KeyValueStorage;
use ratatui::style::Color;

/// Storage key for the persisted theme preference.
pub const THEME_KEY: &str = "glass_diary_theme";

/// Owner of the display-mode flag. Independent of the entry store and
/// persisted under its own key as the literal `dark` or `light`.
pub struct ThemeState {
    dark: bool,
    storage: Box<dyn KeyValueStorage>,
}

impl ThemeState {
    /// Reads the persisted preference. `dark` maps to dark mode, any
    /// other present value to light mode, absence defaults to dark.
    pub fn load(storage: Box<dyn KeyValueStorage>) -> Self {
        let dark = match storage.get(THEME_KEY) {
            Ok(Some(value)) => value == "dark",
            Ok(None) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read theme preference");
                true
            }
        };
        ThemeState { dark, storage }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Flips the flag and persists the new value. A write failure is
    /// logged; the in-memory flag still flips.
    pub fn toggle(&mut self) {
        self.dark = !self.dark;
        let value = if self.dark { "dark" } else { "light" };
        if let Err(e) = self.storage.set(THEME_KEY, value) {
            tracing::warn!(error = %e, "failed to persist theme preference");
        }
    }

    pub fn palette(&self) -> Palette {
        if self.dark {
            Palette::dark()
        } else {
            Palette::light()
        }
    }
}

/// Colors for one display mode.
#[derive(Debug, Clone)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub text_dim: Color,
    pub accent: Color,
    pub accent_dim: Color,
    pub border: Color,
    pub danger: Color,
}

impl Palette {
    /// Amber on near-black.
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(5, 5, 5),        // #050505
            text: Color::Rgb(226, 232, 240),        // slate-200
            text_dim: Color::Rgb(100, 116, 139),    // slate-500
            accent: Color::Rgb(253, 230, 138),      // amber-200
            accent_dim: Color::Rgb(180, 83, 9),     // amber-700
            border: Color::Rgb(41, 37, 36),         // warm near-black
            danger: Color::Rgb(248, 113, 113),      // red-400
        }
    }

    /// Slate on ivory.
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(244, 244, 240),  // #f4f4f0
            text: Color::Rgb(30, 41, 59),           // slate-800
            text_dim: Color::Rgb(148, 163, 184),    // slate-400
            accent: Color::Rgb(180, 83, 9),         // amber-700
            accent_dim: Color::Rgb(217, 119, 6),    // amber-600
            border: Color::Rgb(214, 211, 209),      // stone-300
            danger: Color::Rgb(239, 68, 68),        // red-500
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::{FailingStorage, SharedStorage};

    #[test]
    fn defaults_to_dark_without_a_preference() {
        let theme = ThemeState::load(Box::new(SharedStorage::new()));
        assert!(theme.is_dark());
    }

    #[test]
    fn persisted_dark_maps_to_dark() {
        let storage = SharedStorage::new();
        storage.write(THEME_KEY, "dark");
        assert!(ThemeState::load(Box::new(storage)).is_dark());
    }

    #[test]
    fn any_other_present_value_maps_to_light() {
        for value in ["light", "Dark", "banana", ""] {
            let storage = SharedStorage::new();
            storage.write(THEME_KEY, value);
            assert!(!ThemeState::load(Box::new(storage)).is_dark(), "{value:?}");
        }
    }

    #[test]
    fn unreadable_storage_defaults_to_dark() {
        let theme = ThemeState::load(Box::new(FailingStorage));
        assert!(theme.is_dark());
    }

    #[test]
    fn toggle_persists_the_matching_literal() {
        let storage = SharedStorage::new();
        let mut theme = ThemeState::load(Box::new(storage.clone()));
        theme.toggle();
        assert!(!theme.is_dark());
        assert_eq!(storage.read(THEME_KEY).as_deref(), Some("light"));
        theme.toggle();
        assert!(theme.is_dark());
        assert_eq!(storage.read(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn double_toggle_returns_to_the_original_flag() {
        let mut theme = ThemeState::load(Box::new(SharedStorage::new()));
        let before = theme.is_dark();
        theme.toggle();
        theme.toggle();
        assert_eq!(theme.is_dark(), before);
    }

    #[test]
    fn toggle_still_flips_when_the_write_fails() {
        let mut theme = ThemeState::load(Box::new(FailingStorage));
        theme.toggle();
        assert!(!theme.is_dark());
    }
}
