use crate::error::ConfigError;

const DEFAULT_SMOOTHING: f32 = 0.3;
/// Keeps bars visible at low levels. A visual choice, tune freely.
const DEFAULT_SIGNAL_FLOOR: f32 = 0.2;
const DEFAULT_STATIC_FLOOR: f32 = 0.2;

/// Base oscillation rate of the carrier term, in radians per second.
const SIGNAL_BASE_RATE: f32 = 2.0;
/// Extra rate gained at full strength.
const SIGNAL_STRENGTH_RATE: f32 = 8.0;
/// Phase offset between neighbouring entities.
const ENTITY_PHASE_STEP: f32 = 0.2;

/// Entity spacing and time scale shared by both static oscillators.
const STATIC_SPACING: f32 = 0.1;
const STATIC_TIME_SCALE: f32 = 2.0;

/// Result of one blend step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blend {
    /// Value to draw, within the blender's bounds.
    pub intensity: f32,
    /// State to pass back in as `previous` next frame.
    pub smoothed: f32,
}

/// Mixes a carrier oscillation with hashed static according to signal
/// strength, then eases each entity toward the mix.
///
/// Holds no per-entity state: callers thread `previous` through, so one
/// blender can serve any number of bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseBlender {
    smoothing: f32,
    signal_floor: f32,
    static_floor: f32,
    min_bound: f32,
    max_bound: f32,
}

impl Default for NoiseBlender {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            signal_floor: DEFAULT_SIGNAL_FLOOR,
            static_floor: DEFAULT_STATIC_FLOOR,
            min_bound: 0.0,
            max_bound: 1.0,
        }
    }
}

impl NoiseBlender {
    /// Create a builder with default settings.
    pub fn builder() -> NoiseBlenderBuilder {
        NoiseBlenderBuilder::new()
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min_bound, self.max_bound)
    }

    /// Carrier term: a squared sine, floored, scaled by strength.
    pub fn signal_component(&self, entity: usize, time: f32, strength: f32) -> f32 {
        let strength = clamp_unit(strength);
        let phase = time * (SIGNAL_BASE_RATE + SIGNAL_STRENGTH_RATE * strength)
            + entity as f32 * ENTITY_PHASE_STEP;
        let wave = phase.sin();
        (wave * wave).max(self.signal_floor) * strength
    }

    /// Static term: product of two drifting oscillators, floored, scaled by
    /// the missing strength.
    pub fn static_component(&self, entity: usize, time: f32, strength: f32) -> f32 {
        let strength = clamp_unit(strength);
        static_noise(entity, time).max(self.static_floor) * (1.0 - strength)
    }

    /// Unsmoothed mix, clamped to the bounds.
    pub fn target(&self, entity: usize, time: f32, strength: f32) -> f32 {
        let signal = self.signal_component(entity, time, strength);
        let noise = self.static_component(entity, time, strength);
        (signal + noise).clamp(self.min_bound, self.max_bound)
    }

    /// One smoothing step for `entity` from its previous smoothed value.
    pub fn intensity(&self, entity: usize, time: f32, strength: f32, previous: f32) -> Blend {
        let previous = clamp_unit(previous);
        let target = self.target(entity, time, strength);
        let smoothed = clamp_unit(previous + (target - previous) * self.smoothing);
        Blend {
            intensity: smoothed.clamp(self.min_bound, self.max_bound),
            smoothed,
        }
    }
}

/// Two sinusoids running against each other across the entities, each
/// remapped to [0, 1] and multiplied. Continuous in time, so bars drift
/// instead of jumping.
fn static_noise(entity: usize, time: f32) -> f32 {
    let p = entity as f32 * STATIC_SPACING;
    let t = time * STATIC_TIME_SCALE;
    let a = (p * 7.0 + t * 3.0).sin() * 0.5 + 0.5;
    let b = (p * 9.0 - t * 4.0).cos() * 0.5 + 0.5;
    a * b
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Builder for configuring a NoiseBlender.
#[derive(Debug, Clone)]
pub struct NoiseBlenderBuilder {
    blender: NoiseBlender,
}

impl Default for NoiseBlenderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseBlenderBuilder {
    pub fn new() -> Self {
        Self {
            blender: NoiseBlender::default(),
        }
    }

    /// Weight given to the new target each step, in (0, 1].
    pub fn smoothing(mut self, factor: f32) -> Self {
        self.blender.smoothing = factor;
        self
    }

    pub fn signal_floor(mut self, floor: f32) -> Self {
        self.blender.signal_floor = floor;
        self
    }

    pub fn static_floor(mut self, floor: f32) -> Self {
        self.blender.static_floor = floor;
        self
    }

    pub fn bounds(mut self, min: f32, max: f32) -> Self {
        self.blender.min_bound = min;
        self.blender.max_bound = max;
        self
    }

    /// Build the blender.
    pub fn build(self) -> Result<NoiseBlender, ConfigError> {
        let b = self.blender;
        if !(b.smoothing > 0.0 && b.smoothing <= 1.0) {
            return Err(ConfigError::SmoothingOutOfRange(b.smoothing));
        }
        for (name, value) in [("signal", b.signal_floor), ("static", b.static_floor)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::FloorOutOfRange { name, value });
            }
        }
        if !(0.0 <= b.min_bound && b.min_bound < b.max_bound && b.max_bound <= 1.0) {
            return Err(ConfigError::InvalidBounds {
                min: b.min_bound,
                max: b.max_bound,
            });
        }
        log::debug!(
            "noise blender: smoothing {} floors {}/{} bounds [{}, {}]",
            b.smoothing,
            b.signal_floor,
            b.static_floor,
            b.min_bound,
            b.max_bound
        );
        Ok(b)
    }
}
