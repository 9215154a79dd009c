use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_MAX_BREADCRUMBS: usize = 8;
pub const DEFAULT_TRUNCATE_LENGTH: usize = 24;

/// Raw file shape. Values are kept as loose TOML values so that garbage
/// input (strings, negatives, NaN floats) can fall back per-field instead of
/// failing the whole load.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    max_breadcrumbs: Option<toml::Value>,
    truncate_length: Option<toml::Value>,
    enabled: Option<toml::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of prior breadcrumbs kept (the current location is
    /// always retained on top of this).
    pub max_breadcrumbs: usize,
    pub truncate_length: usize,
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_breadcrumbs: DEFAULT_MAX_BREADCRUMBS,
            truncate_length: DEFAULT_TRUNCATE_LENGTH,
            enabled: true,
        }
    }
}

impl Config {
    /// Load settings from the user config file. Every failure mode — missing
    /// file, unreadable file, broken TOML, invalid values — falls back to
    /// defaults silently; settings problems never surface to the user.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        let Ok(content) = std::fs::read_to_string(&config_path) else {
            return Self::default();
        };

        Self::from_toml(&content)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("trailv")
            .join("config.toml")
    }

    fn from_toml(content: &str) -> Self {
        let raw: RawConfig = toml::from_str(content).unwrap_or_default();
        Self {
            max_breadcrumbs: positive_or(raw.max_breadcrumbs.as_ref(), DEFAULT_MAX_BREADCRUMBS),
            truncate_length: positive_or(raw.truncate_length.as_ref(), DEFAULT_TRUNCATE_LENGTH),
            enabled: bool_or(raw.enabled.as_ref(), true),
        }
    }
}

/// Accept integers, finite floats, and numeric strings, all required to be
/// positive; anything else resolves to the default.
fn positive_or(value: Option<&toml::Value>, default: usize) -> usize {
    let parsed = match value {
        Some(toml::Value::Integer(i)) => Some(*i as f64),
        Some(toml::Value::Float(f)) => Some(*f),
        Some(toml::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() && n > 0.0 => n as usize,
        _ => default,
    }
}

fn bool_or(value: Option<&toml::Value>, default: bool) -> bool {
    match value {
        Some(toml::Value::Boolean(b)) => *b,
        Some(toml::Value::String(s)) => match s.trim() {
            "true" => true,
            "false" => false,
            _ => default,
        },
        _ => default,
    }
}
