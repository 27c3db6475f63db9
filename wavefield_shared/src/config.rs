//! Configuration system.
//!
//! Loads scene configuration from JSON strings (file IO left to app).
//! Every field has a default, so `{}` is a complete configuration.

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use crate::{
    color::Rgb,
    cursor::TouchAxisMode,
    field::FieldPalette,
    math::Vec3,
    viewport::{Viewport, MAX_PIXEL_RATIO},
};

/// Root scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub grid: GridConfig,
    pub mesh: MeshConfig,
    pub camera: CameraConfig,
    pub palette: PaletteConfig,
    pub renderer: RendererConfig,
    /// Initial viewport; hosts overwrite it with resize events.
    pub viewport: Viewport,
    pub input: InputConfig,
    /// Alpha mask for each point, relative to the asset root.
    pub particle_texture: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub length: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 200,
            length: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub scale: Vec3,
    /// Initial rotation about +Y in radians.
    pub rotation_y: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            scale: Vec3::new(20.0, 10.0, 20.0),
            rotation_y: -std::f32::consts::PI,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(6.0, 1.2, 6.0),
            fov_y_degrees: 75.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub high: Rgb,
    pub low: Rgb,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let palette = FieldPalette::default();
        Self {
            high: palette.high,
            low: palette.low,
        }
    }
}

impl From<PaletteConfig> for FieldPalette {
    fn from(p: PaletteConfig) -> Self {
        FieldPalette {
            high: p.high,
            low: p.low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub clear_color: Rgb,
    pub max_pixel_ratio: f32,
    /// Display refresh rate driving the tick scheduler.
    pub refresh_hz: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: Rgb::from_hex(0x151B26),
            max_pixel_ratio: MAX_PIXEL_RATIO,
            refresh_hz: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub touch_axis: TouchAxisMode,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            mesh: MeshConfig::default(),
            camera: CameraConfig::default(),
            palette: PaletteConfig::default(),
            renderer: RendererConfig::default(),
            viewport: Viewport::default(),
            input: InputConfig::default(),
            particle_texture: Some("textures/particles/1.png".to_string()),
        }
    }
}

impl SceneConfig {
    /// Parses config from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse scene config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects values the camera or scheduler cannot work with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.renderer.refresh_hz > 0, "renderer.refresh_hz must be positive");
        ensure!(
            self.renderer.max_pixel_ratio > 0.0,
            "renderer.max_pixel_ratio must be positive"
        );
        ensure!(
            self.viewport.device_pixel_ratio > 0.0,
            "viewport.device_pixel_ratio must be positive"
        );
        ensure!(
            self.camera.fov_y_degrees > 0.0 && self.camera.fov_y_degrees < 180.0,
            "camera.fov_y_degrees must be in (0, 180), got {}",
            self.camera.fov_y_degrees
        );
        ensure!(self.camera.near > 0.0, "camera.near must be positive");
        ensure!(
            self.camera.far > self.camera.near,
            "camera.far ({}) must exceed camera.near ({})",
            self.camera.far,
            self.camera.near
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default_scene() {
        let cfg = SceneConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, SceneConfig::default());
        assert_eq!(cfg.grid, GridConfig { width: 200, length: 200 });
        assert_eq!(cfg.camera.position, Vec3::new(6.0, 1.2, 6.0));
        assert_eq!(cfg.renderer.clear_color.to_string(), "#151B26");
        assert_eq!(
            cfg.particle_texture.as_deref(),
            Some("textures/particles/1.png")
        );
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = SceneConfig::from_json_str(
            r##"{
                "grid": { "width": 32 },
                "palette": { "low": "#000000" },
                "input": { "touch_axis": "legacy" },
                "particle_texture": null
            }"##,
        )
        .unwrap();
        assert_eq!(cfg.grid, GridConfig { width: 32, length: 200 });
        assert_eq!(cfg.palette.low, Rgb::BLACK);
        assert_eq!(cfg.palette.high, FieldPalette::default().high);
        assert_eq!(cfg.input.touch_axis, TouchAxisMode::Legacy);
        assert_eq!(cfg.particle_texture, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(SceneConfig::from_json_str(r#"{ "camera": { "near": 5, "far": 1 } }"#).is_err());
        assert!(SceneConfig::from_json_str(r#"{ "renderer": { "refresh_hz": 0 } }"#).is_err());
        assert!(SceneConfig::from_json_str(r#"{ "camera": { "fov_y_degrees": 180 } }"#).is_err());
        assert!(SceneConfig::from_json_str(r#"{ "palette": { "high": "teal" } }"#).is_err());
        assert!(
            SceneConfig::from_json_str(r#"{ "renderer": { "max_pixel_ratio": 0 } }"#).is_err()
        );
        assert!(
            SceneConfig::from_json_str(r#"{ "viewport": { "device_pixel_ratio": -1 } }"#).is_err()
        );
        assert!(SceneConfig::from_json_str(r#"{ "camera": { "near": 0 } }"#).is_err());
    }
}
