use serde::{Deserialize, Serialize};
use std::sync::{Mutex, OnceLock};

pub const CONFIG_FILE: &str = "moltenglobe.toml";

static CONFIG: OnceLock<Mutex<SplitConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading from file on first use.
/// Falls back to compiled defaults when the file is missing or invalid, so
/// a bare checkout still runs.
pub fn get_config() -> SplitConfig {
    let config_mutex = CONFIG.get_or_init(|| {
        let config = SplitConfig::load_from_file(CONFIG_FILE).unwrap_or_default();
        Mutex::new(config)
    });
    config_mutex.lock().unwrap().clone()
}

pub fn reload_config() {
    if let Ok(new_config) = SplitConfig::load_from_file(CONFIG_FILE) {
        let config_mutex = CONFIG.get_or_init(|| Mutex::new(new_config.clone()));
        *config_mutex.lock().unwrap() = new_config;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub geometry: GeometryConfig,
    pub animation: AnimationConfig,
    pub detector: DetectorConfig,
    pub particles: ParticleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub radius: f32,
    pub core_radius: f32,
    pub lat_segments: usize,
    pub lon_segments: usize,
    pub texture_width: usize,
    pub texture_height: usize,
    pub texture_seed: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Seconds for the full idle -> split reveal.
    pub split_duration: f32,
    /// Seconds for the quicker reassembly undo.
    pub reassemble_duration: f32,
    /// Radians per second of idle globe yaw.
    pub idle_spin_rate: f32,
    /// Radians per second of lava-core spin while exposed.
    pub core_spin_rate: f32,
    /// Seconds for the click-to-recenter camera tween.
    pub camera_tween_duration: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Smoothed angular speed (radians/frame) that triggers the split.
    pub speed_threshold: f32,
    /// Number of speed samples in the smoothing window.
    pub history_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub upward_bias: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            core_radius: 1.85,
            lat_segments: 64,
            lon_segments: 64,
            texture_width: 1024,
            texture_height: 512,
            texture_seed: 1337,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            split_duration: 5.0,
            reassemble_duration: 3.0,
            idle_spin_rate: 0.1,
            core_spin_rate: 0.4,
            camera_tween_duration: 2.0,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            speed_threshold: 0.15,
            history_len: 10,
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 5000,
            upward_bias: 2.0,
        }
    }
}

impl SplitConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: SplitConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
