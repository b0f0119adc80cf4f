//! Persisted settings for oxidized-gx
//!
//! Settings are stored as a flat TOML document under the platform config
//! directory. Documents written by an incompatible (older) release are
//! rejected so the caller can fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Version written into every saved settings document.
pub const SETTINGS_VERSION: &str = "4.8.0";

/// Oldest settings document version that is still understood.
pub const MIN_COMPATIBLE_VERSION: &str = "4.7.0";

/// Default native resolution of the pointing ray reported by the remote.
pub const DEFAULT_POINTER_SPACE: (u16, u16) = (640, 480);

/// Number of selectable turbo buttons (indices `0..TURBO_BUTTON_COUNT`).
pub const TURBO_BUTTON_COUNT: u8 = 15;

/// Root settings document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

fn default_version() -> String {
    SETTINGS_VERSION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            input: InputConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

/// Which emulated peripherals are plugged into the two SNES ports.
///
/// Exactly one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmulationMode {
    /// Two standard joypads
    #[default]
    DualJoypad,
    /// Joypad on port 1, multitap with three more joypads on port 2
    MultiTap5,
    /// Joypad on port 1, Super Scope on port 2
    SuperScope,
    /// Mouse on port 1, joypad on port 2
    Mouse,
    /// Joypad on port 1, pair of Justifiers on port 2
    Justifier,
}

impl EmulationMode {
    /// Resolve the legacy per-device toggles into a single mode. When more
    /// than one is set the multitap wins, then Super Scope, mouse, Justifier.
    pub fn from_flags(multitap: bool, superscope: bool, mouse: bool, justifier: bool) -> Self {
        if multitap {
            EmulationMode::MultiTap5
        } else if superscope {
            EmulationMode::SuperScope
        } else if mouse {
            EmulationMode::Mouse
        } else if justifier {
            EmulationMode::Justifier
        } else {
            EmulationMode::DualJoypad
        }
    }

    /// Number of emulated joypads this mode drives.
    pub fn joypad_count(self) -> usize {
        match self {
            EmulationMode::MultiTap5 => 4,
            _ => 2,
        }
    }
}

/// Controller settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub mode: EmulationMode,
    /// Physical channel -> emulated joypad index
    #[serde(default = "default_player_mapping")]
    pub player_mapping: [u8; 4],
    #[serde(default = "default_true")]
    pub turbo_mode_enabled: bool,
    /// Index into the turbo button list (0 = right analog stick)
    #[serde(default)]
    pub turbo_mode_button: u8,
    #[serde(default = "default_true")]
    pub sound_sync: bool,
    /// Native width/height of the pointing ray coordinates
    #[serde(default = "default_pointer_space")]
    pub pointer_space: (u16, u16),
    /// Customised button map slices; missing slices keep their defaults
    #[serde(default)]
    pub button_maps: Vec<ButtonMapEntry>,
}

fn default_player_mapping() -> [u8; 4] {
    [0, 1, 2, 3]
}

fn default_true() -> bool {
    true
}

fn default_pointer_space() -> (u16, u16) {
    DEFAULT_POINTER_SPACE
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mode: EmulationMode::default(),
            player_mapping: default_player_mapping(),
            turbo_mode_enabled: true,
            turbo_mode_button: 0,
            sound_sync: true,
            pointer_space: DEFAULT_POINTER_SPACE,
            button_maps: Vec::new(),
        }
    }
}

/// One persisted (device class, controller type) slice of the button map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonMapEntry {
    /// Stable key, e.g. `btnmap_pad_gcpad`
    pub name: String,
    /// Physical button bitmask per logical slot
    pub buttons: Vec<u32>,
}

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Debug settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    #[serde(default)]
    pub log_level: LogLevel,
    #[serde(default)]
    pub log_to_file: bool,
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

fn default_log_path() -> PathBuf {
    PathBuf::from("oxidized-gx.log")
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_to_file: false,
            log_path: default_log_path(),
        }
    }
}

impl Config {
    /// Default location of the settings file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("oxidized-gx").join("config.toml"))
    }

    /// Load settings from the default location, returning defaults when no
    /// file exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            tracing::info!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Parse a settings document, checking its version and fixing invalid
    /// values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(text)?;
        check_version(&config.version)?;
        config.sanitize();
        Ok(config)
    }

    /// Serialize to a settings document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save settings to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut doc = self.clone();
        doc.version = SETTINGS_VERSION.to_string();
        fs::write(path, doc.to_toml_string()?)?;
        tracing::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Replace values that would misconfigure the decoder with defaults.
    pub fn sanitize(&mut self) {
        let input = &mut self.input;
        for (channel, slot) in input.player_mapping.iter_mut().enumerate() {
            if *slot > 3 {
                tracing::warn!("Channel {} mapped to invalid slot {}, resetting", channel, slot);
                *slot = channel as u8;
            }
        }
        if input.turbo_mode_button >= TURBO_BUTTON_COUNT {
            tracing::warn!("Invalid turbo button {}, resetting", input.turbo_mode_button);
            input.turbo_mode_button = 0;
        }
        if input.pointer_space.0 == 0 || input.pointer_space.1 == 0 {
            input.pointer_space = DEFAULT_POINTER_SPACE;
        }
    }
}

/// Parse a `major.minor.patch` version string.
pub fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}

fn check_version(found: &str) -> Result<(), ConfigError> {
    let minimum = parse_version(MIN_COMPATIBLE_VERSION);
    match parse_version(found) {
        Some(v) if Some(v) >= minimum => Ok(()),
        _ => Err(ConfigError::IncompatibleVersion {
            found: found.to_string(),
            minimum: MIN_COMPATIBLE_VERSION.to_string(),
        }),
    }
}
