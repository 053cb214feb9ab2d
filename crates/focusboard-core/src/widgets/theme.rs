use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::storage::{save_json, KvStore};

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Icon for the toggle button: it shows the theme you would switch to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ValidationError::InvalidValue {
                field: "theme".into(),
                message: format!("expected 'light' or 'dark', got '{other}'"),
            }),
        }
    }
}

/// Stored theme, defaulting to light. Accepts both a JSON string and the
/// bare word older exports contain.
pub fn load_theme<S: KvStore + ?Sized>(store: &S) -> Result<Theme> {
    let Some(raw) = store.kv_get(THEME_KEY)? else {
        return Ok(Theme::default());
    };
    let theme = serde_json::from_str::<Theme>(&raw)
        .ok()
        .or_else(|| raw.parse().ok())
        .unwrap_or_else(|| {
            tracing::warn!(value = %raw, "unrecognized theme, using light");
            Theme::default()
        });
    Ok(theme)
}

pub fn save_theme<S: KvStore + ?Sized>(store: &S, theme: Theme) -> Result<()> {
    save_json(store, THEME_KEY, &theme)
}

/// Flip and persist the theme, returning the new one.
pub fn toggle_theme<S: KvStore + ?Sized>(store: &S) -> Result<Theme> {
    let next = load_theme(store)?.toggled();
    save_theme(store, next)?;
    Ok(next)
}
