use crate::error::ConfigError;

/// Strength above which the carrier trace is drawn.
pub const DEFAULT_WAVE_THRESHOLD: f32 = 0.3;

/// Sine trace of the carrier drawn over the static once the signal is clear
/// enough. Returns vertical offsets from the centre line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalWave {
    height: f32,
    threshold: f32,
}

impl SignalWave {
    pub fn new(height: f32) -> Result<Self, ConfigError> {
        if !(height.is_finite() && height > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "wave height",
                value: height,
            });
        }
        Ok(Self {
            height,
            threshold: DEFAULT_WAVE_THRESHOLD,
        })
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn is_visible(&self, strength: f32) -> bool {
        strength > self.threshold
    }

    pub fn offset(&self, x: f32, time: f32, strength: f32) -> f32 {
        let strength = strength.clamp(0.0, 1.0);
        let amplitude = self.height * 0.2 * strength;
        let frequency = 0.05 + strength * 0.1;
        let phase = time * 5.0;
        (x * frequency + phase).sin() * amplitude
    }

    /// One offset per column, or `None` while the signal is too weak.
    pub fn trace(&self, width: usize, time: f32, strength: f32) -> Option<Vec<f32>> {
        if !self.is_visible(strength) {
            return None;
        }
        Some(
            (0..width)
                .map(|x| self.offset(x as f32, time, strength))
                .collect(),
        )
    }
}
