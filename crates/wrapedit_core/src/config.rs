//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_EDITOR_HEIGHT, DEFAULT_WRAP_COLUMNS};
use crate::error::EditorError;
use crate::measure::Extent;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Environment variable toggling greedy word-wrap in multi-line editors.
pub const ENV_WORD_WRAP: &str = "WRAPEDIT_WORD_WRAP";
/// Environment variable toggling select-all when an editor gains focus.
pub const ENV_AUTO_SELECT: &str = "WRAPEDIT_AUTO_SELECT";
/// Environment variable for the editor width (`-1` stretches).
pub const ENV_EDITOR_WIDTH: &str = "WRAPEDIT_EDITOR_WIDTH";
/// Environment variable for the editor height (`-1` stretches).
pub const ENV_EDITOR_HEIGHT: &str = "WRAPEDIT_EDITOR_HEIGHT";
/// Environment variable for the headless wrap column count.
pub const ENV_COLUMNS: &str = "WRAPEDIT_COLUMNS";

/// Runtime configuration for wrapedit editors.
///
/// Serializable so a host can persist the user's toggles; fields missing from
/// a stored value take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub word_wrap: bool,
    pub auto_select: bool,
    pub width: Extent,
    pub height: Extent,
    /// Headless wrap columns; `0` means no limit.
    pub columns: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            word_wrap: true,
            auto_select: true,
            width: Extent::Stretch,
            height: Extent::Points(DEFAULT_EDITOR_HEIGHT),
            columns: DEFAULT_WRAP_COLUMNS,
        }
    }
}

/// Parse a boolean-like flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a column count. `0` disables wrapping limits, as `--columns 0` does.
///
/// # Errors
/// [`EditorError::InvalidSetting`] for non-numeric values.
pub fn parse_columns(value: &str) -> Result<usize, EditorError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| EditorError::InvalidSetting {
            key: ENV_COLUMNS.to_string(),
            value: value.to_string(),
        })
}

fn lookup_flag<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return default;
    };
    parse_env_flag(&value).unwrap_or_else(|| {
        warn!(
            "Unrecognized value for {}='{}'; expected 1/0/true/false/yes/no/on/off. Using default {}.",
            key, value, default
        );
        default
    })
}

fn lookup_parsed<F, T>(
    lookup: &F,
    key: &str,
    default: T,
    parse: impl Fn(&str) -> Result<T, EditorError>,
) -> T
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return default;
    };
    parse(&value).unwrap_or_else(|err| {
        warn!("{} ({}); using default", err, key);
        default
    })
}

impl EditorConfig {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`EditorConfig`] with defaults applied when env vars are
    /// missing or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Tests pass a closure over a map instead of touching the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            word_wrap: lookup_flag(&lookup, ENV_WORD_WRAP, defaults.word_wrap),
            auto_select: lookup_flag(&lookup, ENV_AUTO_SELECT, defaults.auto_select),
            width: lookup_parsed(&lookup, ENV_EDITOR_WIDTH, defaults.width, Extent::parse),
            height: lookup_parsed(&lookup, ENV_EDITOR_HEIGHT, defaults.height, Extent::parse),
            columns: lookup_parsed(&lookup, ENV_COLUMNS, defaults.columns, parse_columns),
        }
    }
}
