use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, RwLock};

use crate::core::geometry::Size;
use crate::core::transcript::DEFAULT_WELCOME;
use crate::core::viewport::{IconLimits, IconSizing, DEFAULT_RELATIVE_FRACTION};

// ── Paths ─────────────────────────────────────────────────────────────────────

pub fn base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn config_dir() -> PathBuf {
    let d = dirs::config_dir()
        .map(|d| d.join("termlink"))
        .unwrap_or_else(base_dir);
    let _ = std::fs::create_dir_all(&d);
    d
}

pub fn settings_file() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn log_file() -> PathBuf {
    config_dir().join("termlink.log")
}

// ── JSON helpers ──────────────────────────────────────────────────────────────

/// `Ok(None)` when the file does not exist.
pub fn try_load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", path.display()));
        }
    };
    let value = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(value))
}

pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

// ── Settings ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconSizingMode {
    /// 50px square, resizable from its corner handle.
    Fixed,
    /// 5% of the panel on each axis, no handle.
    #[default]
    Relative,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub icon_sizing: IconSizingMode,
    #[serde(default = "default_fixed_icon_size")]
    pub fixed_icon_size: f32,
    #[serde(default = "default_relative_icon_fraction")]
    pub relative_icon_fraction: f32,
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
    #[serde(default = "default_native_ui_scale")]
    pub native_ui_scale: f32,
}

fn default_theme() -> String {
    "Green (Default)".into()
}

const fn default_fixed_icon_size() -> f32 {
    IconLimits::PIXELS.default_size
}

const fn default_relative_icon_fraction() -> f32 {
    DEFAULT_RELATIVE_FRACTION
}

fn default_welcome_message() -> String {
    DEFAULT_WELCOME.into()
}

const fn default_native_ui_scale() -> f32 {
    1.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            icon_sizing: IconSizingMode::Relative,
            fixed_icon_size: default_fixed_icon_size(),
            relative_icon_fraction: default_relative_icon_fraction(),
            welcome_message: default_welcome_message(),
            native_ui_scale: default_native_ui_scale(),
        }
    }
}

impl Settings {
    /// Native sizes come from the settings; the TUI works in cells and keeps
    /// its own default square.
    pub fn icon_sizing(&self, limits: IconLimits) -> IconSizing {
        match self.icon_sizing {
            IconSizingMode::Relative => IconSizing::Relative(self.icon_fraction()),
            IconSizingMode::Fixed => {
                let side = if limits == IconLimits::PIXELS {
                    self.fixed_icon_size
                } else {
                    limits.default_size
                };
                let side = side.min(limits.max).max(limits.min);
                let size = if limits == IconLimits::CELLS {
                    // Cells are roughly twice as tall as wide.
                    Size::new(side, (side / 2.0).ceil().max(limits.min))
                } else {
                    Size::new(side, side)
                };
                IconSizing::Fixed(size)
            }
        }
    }

    /// `relative_icon_fraction` kept within `(0, 1]`. Zero, negative and
    /// non-finite values fall back to the default.
    pub fn icon_fraction(&self) -> f32 {
        let fraction = self.relative_icon_fraction;
        if !fraction.is_finite() || fraction <= 0.0 {
            log::warn!(
                "relative_icon_fraction {fraction} out of range, using {DEFAULT_RELATIVE_FRACTION}"
            );
            return DEFAULT_RELATIVE_FRACTION;
        }
        fraction.min(1.0)
    }

    pub fn ui_scale(&self) -> f32 {
        self.native_ui_scale.clamp(0.75, 1.75)
    }
}

pub fn load_settings() -> Settings {
    let path = settings_file();
    match try_load_json::<Settings>(&path) {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            let settings = Settings::default();
            if let Err(err) = save_json(&path, &settings) {
                log::warn!("could not write default settings: {err:#}");
            }
            settings
        }
        Err(err) => {
            log::warn!("using default settings: {err:#}");
            Settings::default()
        }
    }
}

// ── Global mutable state ──────────────────────────────────────────────────────

static APP_SETTINGS: OnceLock<RwLock<Settings>> = OnceLock::new();

fn settings_lock() -> &'static RwLock<Settings> {
    APP_SETTINGS.get_or_init(|| RwLock::new(Settings::default()))
}

pub fn get_settings() -> Settings {
    settings_lock()
        .read()
        .map(|g| g.clone())
        .unwrap_or_default()
}

pub fn reload_settings() {
    let s = load_settings();
    if let Ok(mut guard) = settings_lock().write() {
        *guard = s;
    }
}

// ── Themes ────────────────────────────────────────────────────────────────────

use ratatui::style::Color;

pub const THEMES: &[(&str, Color)] = &[
    ("Green (Default)", Color::Green),
    ("White", Color::White),
    ("Amber", Color::Yellow),
    ("Blue", Color::Blue),
    ("Red", Color::Red),
    ("Purple", Color::Magenta),
    ("Light Blue", Color::Cyan),
];

pub fn theme_color(name: &str) -> Color {
    THEMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
        .unwrap_or(Color::Green)
}

pub fn current_theme_color() -> Color {
    theme_color(&get_settings().theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;
    use crate::core::viewport::{IconHit, Viewport};

    #[test]
    fn partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"Amber"}"#).unwrap();
        assert_eq!(settings.theme, "Amber");
        assert_eq!(settings.icon_sizing, IconSizingMode::Relative);
        assert_eq!(settings.fixed_icon_size, 50.0);
        assert_eq!(settings.relative_icon_fraction, 0.05);
        assert_eq!(settings.welcome_message, "Welcome to the Terminal App!");
    }

    #[test]
    fn sizing_mode_uses_snake_case() {
        let settings: Settings = serde_json::from_str(r#"{"icon_sizing":"fixed"}"#).unwrap();
        assert_eq!(settings.icon_sizing, IconSizingMode::Fixed);
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains(r#""icon_sizing":"relative""#));
    }

    #[test]
    fn unknown_theme_falls_back_to_green() {
        assert_eq!(theme_color("Amber"), Color::Yellow);
        assert_eq!(theme_color("Chartreuse"), Color::Green);
    }

    #[test]
    fn fixed_sizing_is_clamped_into_limits() {
        let settings = Settings {
            icon_sizing: IconSizingMode::Fixed,
            fixed_icon_size: 400.0,
            ..Settings::default()
        };
        assert_eq!(
            settings.icon_sizing(IconLimits::PIXELS),
            IconSizing::Fixed(Size::new(100.0, 100.0))
        );
        assert_eq!(
            settings.icon_sizing(IconLimits::CELLS),
            IconSizing::Fixed(Size::new(6.0, 3.0))
        );
    }

    #[test]
    fn relative_fraction_is_kept_inside_panel() {
        for (raw, expected) in [(1.5, 1.0), (-0.2, 0.05), (0.0, 0.05), (f32::NAN, 0.05)] {
            let settings = Settings {
                relative_icon_fraction: raw,
                ..Settings::default()
            };
            assert_eq!(
                settings.icon_sizing(IconLimits::PIXELS),
                IconSizing::Relative(expected)
            );
        }

        let settings: Settings =
            serde_json::from_str(r#"{"relative_icon_fraction":1.5}"#).unwrap();
        let mut viewport =
            Viewport::new(settings.icon_sizing(IconLimits::PIXELS), IconLimits::PIXELS);
        viewport.resize_panel(Size::new(800.0, 600.0));
        let icon = viewport.icon();
        assert_eq!(icon.origin, Point::new(0.0, 0.0));
        assert_eq!(icon.size, Size::new(800.0, 600.0));

        let settings: Settings =
            serde_json::from_str(r#"{"relative_icon_fraction":-0.2}"#).unwrap();
        let mut viewport =
            Viewport::new(settings.icon_sizing(IconLimits::PIXELS), IconLimits::PIXELS);
        viewport.resize_panel(Size::new(800.0, 600.0));
        assert_eq!(viewport.hit(viewport.icon().center()), IconHit::Body);
    }

    #[test]
    fn relative_sizing_passes_fraction_through() {
        let settings = Settings::default();
        assert_eq!(
            settings.icon_sizing(IconLimits::PIXELS),
            IconSizing::Relative(0.05)
        );
    }

    #[test]
    fn missing_file_loads_as_none() {
        let path = std::env::temp_dir().join("termlink-missing-settings-test.json");
        let _ = std::fs::remove_file(&path);
        let loaded: Option<Settings> = try_load_json(&path).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "termlink-bad-settings-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").unwrap();
        assert!(try_load_json::<Settings>(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn ui_scale_is_clamped() {
        let settings = Settings {
            native_ui_scale: 4.0,
            ..Settings::default()
        };
        assert_eq!(settings.ui_scale(), 1.75);
    }
}
