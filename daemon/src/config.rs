//! On-disk configuration and the resolved snapshot the core runs against.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::input::InputEvent;
use crate::platform::Platform;

/// Tunables are authored against a display this many pixels tall.
pub const REFERENCE_HEIGHT: u32 = 1080;

pub const DEFAULT_SPEED: u32 = 220;
pub const DEFAULT_CURSOR_SIZE: u32 = 7;
pub const DEFAULT_GRID_SIZE: u32 = 4;
pub const DEFAULT_GRID_BORDER_SIZE: u32 = 2;

/// File form of the configuration: one flat TOML table.
///
/// Binding values are key names in the backend's notation; they become
/// [`InputEvent`]s in [`Snapshot::resolve`]. Missing keys take their
/// defaults, so a partial (or absent) file is fine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enters normal mode from the daemon wait.
    pub activation_key: String,
    /// Enters hint mode from the daemon wait.
    pub hint_activation_key: String,
    /// Enters grid mode from the daemon wait.
    pub grid_activation_key: String,
    /// Enters screen selection from the daemon wait.
    pub screen_activation_key: String,
    /// Runs a single hint selection from the daemon wait.
    pub hint_oneshot_key: String,

    /// Switches normal mode to hint mode.
    pub hint: String,
    /// Switches normal mode to grid mode.
    pub grid: String,
    /// Switches normal mode to screen selection.
    pub screen: String,
    /// Ends the activation run from normal mode.
    pub exit: String,
    /// Ends grid mode without feeding the key back into normal mode.
    pub grid_exit: String,

    /// Pointer speed at the reference height.
    pub speed: u32,
    /// Drawn cursor size in pixels at the reference height.
    pub cursor_size: u32,
    /// Grid cell size in pixels at the reference height.
    pub grid_size: u32,
    /// Grid line thickness in pixels at the reference height.
    pub grid_border_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            activation_key: "A-M-c".to_string(),
            hint_activation_key: "A-M-x".to_string(),
            grid_activation_key: "A-M-g".to_string(),
            screen_activation_key: "A-M-s".to_string(),
            hint_oneshot_key: "A-M-l".to_string(),
            hint: "x".to_string(),
            grid: "g".to_string(),
            screen: "s".to_string(),
            exit: "esc".to_string(),
            grid_exit: "c".to_string(),
            speed: DEFAULT_SPEED,
            cursor_size: DEFAULT_CURSOR_SIZE,
            grid_size: DEFAULT_GRID_SIZE,
            grid_border_size: DEFAULT_GRID_BORDER_SIZE,
        }
    }
}

/// Loads the config file at `path`, returning `Config::default()` if the file does not exist.
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// The resolved activation bindings. Never null once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings {
    pub activation: InputEvent,
    pub hint_activation: InputEvent,
    pub grid_activation: InputEvent,
    pub screen_activation: InputEvent,
    pub hint_oneshot: InputEvent,
    pub hint: InputEvent,
    pub grid: InputEvent,
    pub screen: InputEvent,
    pub exit: InputEvent,
    pub grid_exit: InputEvent,
}

/// The immutable configuration snapshot consumed by the dispatch loops and
/// the state machine. Built once at startup; nothing touches it afterwards
/// except the one-time dimension normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub bindings: Bindings,
    pub speed: u32,
    pub cursor_size: u32,
    pub grid_size: u32,
    pub grid_border_size: u32,
}

impl Snapshot {
    /// Resolves every binding string through the backend's key table.
    ///
    /// Fails if any binding is not a name the backend recognises; the
    /// core never runs with an unresolved binding.
    pub fn resolve<P: Platform + ?Sized>(cfg: &Config, platform: &P) -> Result<Self> {
        let parse = |key: &str, value: &str| {
            platform
                .parse_binding(value)
                .ok_or_else(|| anyhow!("unrecognised binding {value:?} for {key}"))
        };

        Ok(Self {
            bindings: Bindings {
                activation: parse("activation_key", &cfg.activation_key)?,
                hint_activation: parse("hint_activation_key", &cfg.hint_activation_key)?,
                grid_activation: parse("grid_activation_key", &cfg.grid_activation_key)?,
                screen_activation: parse("screen_activation_key", &cfg.screen_activation_key)?,
                hint_oneshot: parse("hint_oneshot_key", &cfg.hint_oneshot_key)?,
                hint: parse("hint", &cfg.hint)?,
                grid: parse("grid", &cfg.grid)?,
                screen: parse("screen", &cfg.screen)?,
                exit: parse("exit", &cfg.exit)?,
                grid_exit: parse("grid_exit", &cfg.grid_exit)?,
            },
            speed: cfg.speed,
            cursor_size: cfg.cursor_size,
            grid_size: cfg.grid_size,
            grid_border_size: cfg.grid_border_size,
        })
    }

    /// Rescales the size and speed tunables from the reference height to
    /// the active screen, truncating. `screen_height` must be positive;
    /// the screen query never reports zero for an existing display.
    pub fn normalize_dimensions(&mut self, screen_height: u32) {
        debug_assert!(screen_height > 0, "screen query returned a zero height");
        self.speed = self.speed * screen_height / REFERENCE_HEIGHT;
        self.cursor_size = self.cursor_size * screen_height / REFERENCE_HEIGHT;
        self.grid_size = self.grid_size * screen_height / REFERENCE_HEIGHT;
        self.grid_border_size = self.grid_border_size * screen_height / REFERENCE_HEIGHT;
    }
}
