use crate::error::ConfigError;
use crate::hash::hash01;

const FIELD_SALT: u32 = 0x3C6E_F372;
/// Brightest a static pixel is drawn.
const MAX_PIXEL_ALPHA: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticFieldConfig {
    pub width: u32,
    pub height: u32,
    /// Share of pixels lit at zero signal.
    pub intensity: f32,
    /// Field clock rate relative to frame time.
    pub animation_speed: f32,
}

impl Default for StaticFieldConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 16,
            intensity: 0.5,
            animation_speed: 0.1,
        }
    }
}

/// Snow drawn over the display, thinning out as the signal strengthens.
///
/// Each pixel is hashed from its position and the field clock, so a frame is
/// fully determined by the clock value.
#[derive(Debug, Clone)]
pub struct StaticField {
    config: StaticFieldConfig,
    timer: f32,
}

impl StaticField {
    pub fn new(config: StaticFieldConfig) -> Result<Self, ConfigError> {
        if config.width == 0 || config.height == 0 {
            return Err(ConfigError::EmptyField {
                width: config.width,
                height: config.height,
            });
        }
        if !(0.0..=1.0).contains(&config.intensity) {
            return Err(ConfigError::IntensityOutOfRange(config.intensity));
        }
        if !(config.animation_speed.is_finite() && config.animation_speed > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "animation speed",
                value: config.animation_speed,
            });
        }
        Ok(Self { config, timer: 0.0 })
    }

    pub fn advance(&mut self, delta: f32) {
        if delta.is_finite() && delta > 0.0 {
            self.timer += delta * self.config.animation_speed;
        }
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// Alpha of the pixel at (x, y), or `None` when it stays dark.
    pub fn pixel(&self, x: u32, y: u32, strength: f32) -> Option<f32> {
        if x >= self.config.width || y >= self.config.height {
            return None;
        }
        let strength = if strength.is_nan() {
            0.0
        } else {
            strength.clamp(0.0, 1.0)
        };
        let amount = (1.0 - strength) * self.config.intensity;
        if amount <= 0.0 {
            return None;
        }
        let index = y * self.config.width + x;
        let noise = hash01(index ^ FIELD_SALT, self.timer.to_bits());
        (noise < amount).then(|| noise / amount * MAX_PIXEL_ALPHA)
    }

    /// Every lit pixel as `(x, y, alpha)`, row by row.
    pub fn lit_pixels(&self, strength: f32) -> impl Iterator<Item = (u32, u32, f32)> + '_ {
        let width = self.config.width;
        (0..self.config.height)
            .flat_map(move |y| (0..width).map(move |x| (x, y)))
            .filter_map(move |(x, y)| self.pixel(x, y, strength).map(|alpha| (x, y, alpha)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> StaticField {
        StaticField::new(StaticFieldConfig::default()).unwrap()
    }

    #[test]
    fn rejects_empty_or_bad_fields() {
        let empty = StaticFieldConfig {
            width: 0,
            ..StaticFieldConfig::default()
        };
        assert_eq!(
            StaticField::new(empty).unwrap_err(),
            ConfigError::EmptyField {
                width: 0,
                height: 16
            }
        );
        let loud = StaticFieldConfig {
            intensity: 1.5,
            ..StaticFieldConfig::default()
        };
        assert!(StaticField::new(loud).is_err());
    }

    #[test]
    fn full_signal_clears_the_static() {
        let field = field();
        assert_eq!(field.lit_pixels(1.0).count(), 0);
    }

    #[test]
    fn weaker_signal_lights_more_pixels() {
        let mut field = field();
        field.advance(0.5);
        let weak = field.lit_pixels(0.0).count();
        let strong = field.lit_pixels(0.8).count();
        assert!(weak > strong, "weak {weak} strong {strong}");
        let total = (field.width() * field.height()) as f32;
        // roughly half the field at intensity 0.5
        assert!((weak as f32 / total - 0.5).abs() < 0.15);
    }

    #[test]
    fn alpha_is_bounded_and_reproducible() {
        let mut field = field();
        field.advance(0.25);
        let first: Vec<_> = field.lit_pixels(0.2).collect();
        let again: Vec<_> = field.lit_pixels(0.2).collect();
        assert_eq!(first, again);
        assert!(first.iter().all(|&(_, _, a)| a >= 0.0 && a <= MAX_PIXEL_ALPHA));
    }

    #[test]
    fn pattern_changes_as_the_clock_runs() {
        let mut field = field();
        let before: Vec<_> = field.lit_pixels(0.0).collect();
        field.advance(1.0 / 60.0);
        let after: Vec<_> = field.lit_pixels(0.0).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn out_of_range_pixels_are_dark() {
        let field = field();
        assert_eq!(field.pixel(64, 0, 0.0), None);
        assert_eq!(field.pixel(0, 16, 0.0), None);
    }
}
