//! Runtime configuration loaded from YAML.
//!
//! Every section has defaults, so an empty file (or no file at all) gives
//! the three demo vessels in a 640x480 window:
//!
//! ```yaml
//! window:
//!   title: "vessel-lab"
//!   width: 640
//!   height: 480
//! layout:
//!   vessel_size: 140.0
//!   gap: 60.0
//! physics:
//!   particle_count: 40
//!   liquid_target: 0.7
//!   fill_rate: 0.05
//! hit:
//!   pad_x: 40.0
//!   pad_y: 40.0
//!   policy: all        # or "nearest"
//! seed: 42
//! vessels:
//!   - { id: 1, shape: box,  state: empty, label: "Box" }
//!   - { id: 2, shape: jar,  state: liquid, label: "Jar" }
//!   - { id: 3, shape: bowl, state: gas,   label: "Bowl" }
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::vessel::{default_vessels, VesselDescriptor, VesselId};
use crate::error::Error;

/// 設定値の検証エラー。
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("window size must be non-zero, got {width}x{height}")]
    WindowSize { width: u32, height: u32 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("particle_count must be non-zero")]
    NoParticles,
    #[error("radius_min ({min}) is larger than radius_max ({max})")]
    RadiusRange { min: f32, max: f32 },
    #[error("vessel id {0} appears more than once")]
    DuplicateVessel(VesselId),
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "vessel-lab".to_string(),
            width: 640,
            height: 480,
        }
    }
}

/// 容器の並べ方。
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub vessel_size: f32, // 一つの容器の枠（正方形）の一辺
    pub gap: f32,         // 容器どうしの間隔
    pub horizon: f32,     // 空と地面の境目（画面の高さに対する割合）
    pub jar_stretch: f32, // 瓶だけ少し背を高くする倍率
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            vessel_size: 140.0,
            gap: 60.0,
            horizon: 0.7,
            jar_stretch: 1.2,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub particle_count: usize,
    pub liquid_target: f32,
    pub fill_rate: f32,
    pub speed: f32, // 気体粒子の初速の各成分は -speed..speed
    pub radius_min: f32,
    pub radius_max: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            particle_count: 40,
            liquid_target: 0.7,
            fill_rate: 0.05,
            speed: 1.5,
            radius_min: 2.0,
            radius_max: 4.0,
        }
    }
}

/// クリックが複数の当たり判定に重なったときの扱い。
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HitPolicy {
    /// 重なった容器を全部通知する。
    #[default]
    All,
    /// 中心がいちばん近い容器だけ通知する。
    Nearest,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HitConfig {
    pub pad_x: f32,
    pub pad_y: f32,
    pub policy: HitPolicy,
}

impl Default for HitConfig {
    fn default() -> Self {
        Self {
            pad_x: 40.0,
            pad_y: 40.0,
            policy: HitPolicy::All,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub layout: LayoutConfig,
    pub physics: PhysicsConfig,
    pub hit: HitConfig,
    pub seed: Option<u64>,
    pub vessels: Vec<VesselDescriptor>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            layout: LayoutConfig::default(),
            physics: PhysicsConfig::default(),
            hit: HitConfig::default(),
            seed: None,
            vessels: default_vessels(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, Error> {
        let config: AppConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_yaml::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::WindowSize {
                width: self.window.width,
                height: self.window.height,
            });
        }
        positive("layout.vessel_size", self.layout.vessel_size)?;
        if self.layout.gap < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "layout.gap",
                value: self.layout.gap,
            });
        }
        within("layout.horizon", self.layout.horizon, 0.0, 1.0)?;
        positive("layout.jar_stretch", self.layout.jar_stretch)?;

        let physics = &self.physics;
        if physics.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        within("physics.liquid_target", physics.liquid_target, 0.0, 1.0)?;
        positive("physics.fill_rate", physics.fill_rate)?;
        within("physics.fill_rate", physics.fill_rate, 0.0, 1.0)?;
        positive("physics.speed", physics.speed)?;
        positive("physics.radius_min", physics.radius_min)?;
        if physics.radius_min > physics.radius_max {
            return Err(ConfigError::RadiusRange {
                min: physics.radius_min,
                max: physics.radius_max,
            });
        }

        let mut seen = HashSet::new();
        for vessel in &self.vessels {
            if !seen.insert(vessel.id) {
                return Err(ConfigError::DuplicateVessel(vessel.id));
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN もここで弾く
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn within(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
