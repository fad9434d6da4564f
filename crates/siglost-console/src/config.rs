use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use siglost_morse::{MarkWidths, MorseDisplayConfig};
use siglost_noise::{NoiseBlender, StaticFieldConfig};

/// Every tunable of the panel. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    /// Morse unit in seconds.
    pub unit: f32,
    /// Seconds a keyed mark stays in the trail.
    pub retention: f32,
    pub gate_threshold: f32,
    pub dot_width: f32,
    /// Dash width as a multiple of the dot width.
    pub dash_ratio: f32,
    pub smoothing: f32,
    pub signal_floor: f32,
    pub static_floor: f32,
    pub bars: usize,
    pub static_intensity: f32,
    pub static_speed: f32,
    pub wave_threshold: f32,
    pub fps: f32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            unit: 0.1,
            retention: 5.0,
            gate_threshold: 0.05,
            dot_width: 1.0,
            dash_ratio: 3.0,
            smoothing: 0.3,
            signal_floor: 0.2,
            static_floor: 0.2,
            bars: 32,
            static_intensity: 0.5,
            static_speed: 0.1,
            wave_threshold: 0.3,
            fps: 60.0,
        }
    }
}

impl PanelConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn morse(&self) -> anyhow::Result<MorseDisplayConfig> {
        let widths = MarkWidths::with_ratio(self.dot_width, self.dash_ratio)
            .context("invalid mark widths")?;
        Ok(MorseDisplayConfig {
            unit: self.unit,
            retention: self.retention,
            gate_threshold: self.gate_threshold,
            widths,
        })
    }

    pub fn blender(&self) -> anyhow::Result<NoiseBlender> {
        NoiseBlender::builder()
            .smoothing(self.smoothing)
            .signal_floor(self.signal_floor)
            .static_floor(self.static_floor)
            .build()
            .context("invalid noise settings")
    }

    /// One static row under the bar meter.
    pub fn static_field(&self) -> StaticFieldConfig {
        StaticFieldConfig {
            width: self.bars as u32,
            height: 1,
            intensity: self.static_intensity,
            animation_speed: self.static_speed,
        }
    }

    /// Seconds per frame.
    pub fn frame_delta(&self) -> anyhow::Result<f32> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            anyhow::bail!("fps must be positive, got {}", self.fps);
        }
        Ok(1.0 / self.fps)
    }
}
