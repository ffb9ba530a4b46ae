use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (state file and logs)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Easing function type for settle and return animations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Linear interpolation
    Linear,
    /// Decelerating curve: 1 - (1-t)^(2*factor)
    #[default]
    Decelerate,
    /// Cubic ease-out
    Cubic,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

/// Gesture and settle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Vertical travel (device-independent units) that counts as a full drag
    #[serde(default = "default_max_drag_distance")]
    pub max_drag_distance_dp: f32,
    /// Damping applied to the raw finger displacement
    #[serde(default = "default_drag_rate")]
    pub drag_rate: f32,
    /// Movement (device-independent units) before a press becomes a drag
    #[serde(default = "default_touch_slop")]
    pub touch_slop_dp: f32,
    /// Duration of the settle animation for a full drag
    #[serde(default = "default_max_offset_animation_ms")]
    pub max_offset_animation_ms: u64,
    /// Strength of the decelerate curve
    #[serde(default = "default_decelerate_factor")]
    pub decelerate_factor: f32,
    /// Pixels per device-independent unit
    #[serde(default = "default_density")]
    pub density: f32,
    /// Easing used when settling content to the target or start offset
    #[serde(default)]
    pub settle_easing: EasingType,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            max_drag_distance_dp: default_max_drag_distance(),
            drag_rate: default_drag_rate(),
            touch_slop_dp: default_touch_slop(),
            max_offset_animation_ms: default_max_offset_animation_ms(),
            decelerate_factor: default_decelerate_factor(),
            density: default_density(),
            settle_easing: EasingType::default(),
        }
    }
}

impl RefreshConfig {
    /// Full drag distance in pixels
    pub fn total_drag_distance(&self) -> f32 {
        dp_to_px(self.max_drag_distance_dp, self.density)
    }

    /// Touch slop in pixels
    pub fn touch_slop(&self) -> f32 {
        dp_to_px(self.touch_slop_dp, self.density)
    }

    pub fn max_offset_animation(&self) -> Duration {
        Duration::from_millis(self.max_offset_animation_ms)
    }
}

/// Typewriter animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// One carriage sweep (17 key steps)
    #[serde(default = "default_carriage_duration")]
    pub carriage_duration_ms: u64,
    /// Carriage snap-back between sweeps
    #[serde(default = "default_carriage_return_duration")]
    pub carriage_return_duration_ms: u64,
    /// Page turn that opens a refresh
    #[serde(default = "default_page_turn_duration")]
    pub page_turn_duration_ms: u64,
    /// Chance that a typed key becomes the space bar
    #[serde(default = "default_space_probability")]
    pub space_probability: f64,
    /// Sweeps typed onto one page before the page is replaced
    #[serde(default = "default_page_cycles")]
    pub page_cycles: u8,
    /// Fixed seed for reproducible key sequences
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            carriage_duration_ms: default_carriage_duration(),
            carriage_return_duration_ms: default_carriage_return_duration(),
            page_turn_duration_ms: default_page_turn_duration(),
            space_probability: default_space_probability(),
            page_cycles: default_page_cycles(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while something is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// How long the demo refresh takes
    #[serde(default = "default_refresh_delay")]
    pub refresh_delay_ms: u64,
    /// Number of rows in the demo list
    #[serde(default = "default_item_count")]
    pub item_count: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            refresh_delay_ms: default_refresh_delay(),
            item_count: default_item_count(),
        }
    }
}

/// Convert device-independent units to pixels
pub fn dp_to_px(dp: f32, density: f32) -> f32 {
    (dp * density).round()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("typewriter")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_drag_distance() -> f32 {
    140.0
}

fn default_drag_rate() -> f32 {
    0.85
}

fn default_touch_slop() -> f32 {
    8.0
}

fn default_max_offset_animation_ms() -> u64 {
    700
}

fn default_decelerate_factor() -> f32 {
    2.0
}

fn default_density() -> f32 {
    1.0
}

fn default_carriage_duration() -> u64 {
    2000
}

fn default_carriage_return_duration() -> u64 {
    500
}

fn default_page_turn_duration() -> u64 {
    500
}

fn default_space_probability() -> f64 {
    0.15
}

fn default_page_cycles() -> u8 {
    3
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_refresh_delay() -> u64 {
    8000
}

fn default_item_count() -> usize {
    25
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it is missing
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/typewriter/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("typewriter")
            .join("config.toml")
    }

    /// Get the persisted refresh state path
    pub fn state_path(&self) -> PathBuf {
        self.data_dir().join("state.json")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("typewriter.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_refresh_config() {
        let config = RefreshConfig::default();
        assert_eq!(config.total_drag_distance(), 140.0);
        assert_eq!(config.drag_rate, 0.85);
        assert_eq!(config.max_offset_animation(), Duration::from_millis(700));
        assert_eq!(config.settle_easing, EasingType::Decelerate);
    }

    #[test]
    fn test_density_scales_distances() {
        let config = RefreshConfig {
            density: 0.1,
            ..Default::default()
        };
        assert_eq!(config.total_drag_distance(), 14.0);
        assert_eq!(config.touch_slop(), 1.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [animation]
            seed = 7
            space_probability = 0.5

            [refresh]
            settle_easing = "cubic"
            "#,
        )
        .unwrap();
        assert_eq!(config.animation.seed, Some(7));
        assert_eq!(config.animation.space_probability, 0.5);
        assert_eq!(config.animation.carriage_duration_ms, 2000);
        assert_eq!(config.refresh.settle_easing, EasingType::Cubic);
        assert_eq!(config.ui.item_count, 25);
    }

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let mut config = AppConfig::default();
        config.ui.refresh_delay_ms = 1234;
        let text = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.ui.refresh_delay_ms, 1234);
    }
}
