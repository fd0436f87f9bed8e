//! Application configuration.
//!
//! Everything has a default, so an empty JSON object is a valid config. Native
//! builds read an optional file named by `TINTPAD_CONFIG`; the browser build
//! always uses defaults. Nothing is ever written back.

use std::path::PathBuf;

use egui::Key;
use serde::{Deserialize, Serialize};
use tintpad_gpu::GpuConfig;

use crate::error::{AppError, Result};
use crate::keybindings::{Action, KeyBindings};
use crate::ui_constants::window;

/// Current configuration file format version.
pub const CONFIG_VERSION: u32 = 1;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "TINTPAD_CONFIG";

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,
    pub window_title: String,
    /// Initial inner size in logical pixels
    pub window_size: (u32, u32),
    pub resizable: bool,
    pub log_level: LogLevel,
    /// TTF/OTF file to use instead of the built-in font (native only)
    pub font_path: Option<PathBuf>,
    /// Body text size in points
    pub font_size: f32,
    pub keybindings: KeyBindingsConfig,
    pub gpu: GpuSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            window_title: window::TITLE.to_string(),
            window_size: window::DEFAULT_SIZE,
            resizable: true,
            log_level: LogLevel::default(),
            font_path: None,
            font_size: crate::ui_constants::text::BODY,
            keybindings: KeyBindingsConfig::default(),
            gpu: GpuSettings::default(),
        }
    }
}

impl AppConfig {
    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(AppError::ConfigVersion {
                found: config.version,
                expected: CONFIG_VERSION,
            });
        }
        // Reject bad key names now rather than on first use
        config.keybindings.to_keybindings()?;

        Ok(config)
    }

    /// Load from the file named by `TINTPAD_CONFIG`, or defaults if unset.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from_path(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: PathBuf) -> Result<Self> {
        let json = std::fs::read_to_string(&path).map_err(|source| AppError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn gpu_config(&self) -> GpuConfig {
        self.gpu.to_gpu_config()
    }
}

/// Keybinding configuration section, using egui key names ("Space", "F1", "O").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindingsConfig {
    pub toggle_options: String,
    pub toggle_debug: String,
}

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self::from(&KeyBindings::default())
    }
}

impl From<&KeyBindings> for KeyBindingsConfig {
    fn from(bindings: &KeyBindings) -> Self {
        Self {
            toggle_options: bindings.key_for_action(Action::ToggleOptions).name().to_string(),
            toggle_debug: bindings.key_for_action(Action::ToggleDebug).name().to_string(),
        }
    }
}

impl KeyBindingsConfig {
    pub fn to_keybindings(&self) -> Result<KeyBindings> {
        let mut bindings = KeyBindings::default();
        bindings.set_key(Action::ToggleOptions, parse_key(&self.toggle_options)?);
        bindings.set_key(Action::ToggleDebug, parse_key(&self.toggle_debug)?);
        Ok(bindings)
    }
}

fn parse_key(name: &str) -> Result<Key> {
    Key::from_name(name).ok_or_else(|| AppError::UnknownKey(name.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PowerPreference {
    #[default]
    Default,
    LowPower,
    HighPerformance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PresentMode {
    #[default]
    Fifo,
    Mailbox,
    Immediate,
    AutoVsync,
    AutoNoVsync,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceFormat {
    #[default]
    Rgba8Unorm,
    Bgra8Unorm,
}

/// GPU section of the config, mapped onto [`GpuConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuSettings {
    pub power_preference: PowerPreference,
    pub present_mode: PresentMode,
    pub surface_format: SurfaceFormat,
    /// None keeps the platform default (4 native, 1 in the browser)
    pub msaa_samples: Option<u32>,
    pub max_frame_latency: u32,
}

impl Default for GpuSettings {
    fn default() -> Self {
        Self {
            power_preference: PowerPreference::default(),
            present_mode: PresentMode::default(),
            surface_format: SurfaceFormat::default(),
            msaa_samples: None,
            max_frame_latency: GpuConfig::default().max_frame_latency,
        }
    }
}

impl GpuSettings {
    pub fn to_gpu_config(&self) -> GpuConfig {
        let power = match self.power_preference {
            PowerPreference::Default => wgpu::PowerPreference::default(),
            PowerPreference::LowPower => wgpu::PowerPreference::LowPower,
            PowerPreference::HighPerformance => wgpu::PowerPreference::HighPerformance,
        };
        let present = match self.present_mode {
            PresentMode::Fifo => wgpu::PresentMode::Fifo,
            PresentMode::Mailbox => wgpu::PresentMode::Mailbox,
            PresentMode::Immediate => wgpu::PresentMode::Immediate,
            PresentMode::AutoVsync => wgpu::PresentMode::AutoVsync,
            PresentMode::AutoNoVsync => wgpu::PresentMode::AutoNoVsync,
        };
        let format = match self.surface_format {
            SurfaceFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
            SurfaceFormat::Bgra8Unorm => wgpu::TextureFormat::Bgra8Unorm,
        };

        let mut config = GpuConfig::default()
            .with_power_preference(power)
            .with_present_mode(present)
            .with_preferred_format(format)
            .with_max_frame_latency(self.max_frame_latency);
        if let Some(samples) = self.msaa_samples {
            config = config.with_msaa_samples(samples);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.window_size, window::DEFAULT_SIZE);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.keybindings, KeyBindingsConfig::default());
        assert!(config.font_path.is_none());
    }

    #[test]
    fn test_default_keybindings_round_trip_through_names() {
        let bindings = KeyBindingsConfig::default().to_keybindings().unwrap();
        assert_eq!(bindings, KeyBindings::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "log_level": "debug",
            "keybindings": { "toggle_debug": "F2" },
            "gpu": { "present_mode": "mailbox", "msaa_samples": 1 }
        }"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);

        let bindings = config.keybindings.to_keybindings().unwrap();
        assert_eq!(bindings.toggle_options, Key::Space);
        assert_eq!(bindings.toggle_debug, Key::F2);

        let gpu = config.gpu_config();
        assert_eq!(gpu.present_mode, wgpu::PresentMode::Mailbox);
        assert_eq!(gpu.msaa_samples, 1);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let json = r#"{ "keybindings": { "toggle_options": "NotAKey" } }"#;
        assert!(matches!(
            AppConfig::from_json(json),
            Err(AppError::UnknownKey(name)) if name == "NotAKey"
        ));
    }

    #[test]
    fn test_newer_version_rejected() {
        let json = format!(r#"{{ "version": {} }}"#, CONFIG_VERSION + 1);
        assert!(matches!(
            AppConfig::from_json(&json),
            Err(AppError::ConfigVersion { .. })
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            AppConfig::from_json("{ nope"),
            Err(AppError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = AppConfig::default();
        let parsed = AppConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed.window_title, config.window_title);
        assert_eq!(parsed.gpu, config.gpu);
    }
}
