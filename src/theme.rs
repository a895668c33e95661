use std::str::FromStr;

use codee::string::FromToStringCodec;
use leptos::prelude::*;

pub const STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    /// Name of the matching daisyUI theme.
    fn data_theme(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => f.write_str("Dark"),
            Theme::Light => f.write_str("Light"),
        }
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Dark" => Ok(Theme::Dark),
            "Light" => Ok(Theme::Light),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(String);

impl std::fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown theme: {}", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

/// Shared theme value. Themed elements hold copies of these handles and
/// subscribe by reading `theme`; they never own the value.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: Signal<Theme>,
    pub set_theme: WriteSignal<Theme>,
}

/// Load the stored theme, provide it to the tree and keep the document's
/// `data-theme` attribute in step with it.
pub fn provide_theme() -> ThemeContext {
    let (theme, set_theme, _) =
        leptos_use::storage::use_local_storage::<Theme, FromToStringCodec>(STORAGE_KEY);

    Effect::new(move |_| {
        let theme = theme.get();
        leptos::logging::log!("Theme: {}", theme);
        let Some(root) = document().document_element() else {
            return;
        };
        if let Err(e) = root.set_attribute("data-theme", theme.data_theme()) {
            leptos::logging::error!("Failed to apply theme {}: {:?}", theme, e);
        }
    });

    let context = ThemeContext { theme, set_theme };
    provide_context(context);
    context
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("No theme provided")
}

/// Class list that follows the current theme.
pub fn use_themed(dark: &'static str, light: &'static str) -> Signal<&'static str> {
    let ThemeContext { theme, .. } = use_theme();
    Signal::derive(move || match theme.get() {
        Theme::Dark => dark,
        Theme::Light => light,
    })
}

#[component]
pub fn ThemeSwitcher() -> impl IntoView {
    let ThemeContext { theme, set_theme } = use_theme();

    view! {
        <div class="join" role="group" aria-label="theme">
            {Theme::ALL
                .into_iter()
                .map(|option| {
                    view! {
                        <button
                            type="button"
                            class="btn btn-sm join-item"
                            class=("btn-active", move || theme.get() == option)
                            on:click=move |_| set_theme.set(option)
                        >
                            {option.to_string()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(theme.to_string().parse::<Theme>(), Ok(theme));
        }
    }

    #[test]
    fn stored_names_match_the_page() {
        assert_eq!(Theme::Dark.to_string(), "Dark");
        assert_eq!(Theme::Light.to_string(), "Light");
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            "Solarized".parse::<Theme>(),
            Err(UnknownTheme("Solarized".to_owned()))
        );
        assert!("dark".parse::<Theme>().is_err());
    }
}
