use crate::blender::NoiseBlender;
use crate::error::ConfigError;

/// Per-entity smoothing state for one bar/wave visualizer.
#[derive(Debug, Clone)]
pub struct NoiseBank {
    blender: NoiseBlender,
    smoothed: Vec<f32>,
    intensities: Vec<f32>,
}

impl NoiseBank {
    pub fn new(blender: NoiseBlender, entities: usize) -> Result<Self, ConfigError> {
        if entities == 0 {
            return Err(ConfigError::NoEntities);
        }
        Ok(Self {
            blender,
            smoothed: vec![0.0; entities],
            intensities: vec![0.0; entities],
        })
    }

    /// Step every entity once and return the values to draw.
    pub fn update(&mut self, time: f32, strength: f32) -> &[f32] {
        for (entity, (smoothed, out)) in self
            .smoothed
            .iter_mut()
            .zip(self.intensities.iter_mut())
            .enumerate()
        {
            let blend = self.blender.intensity(entity, time, strength, *smoothed);
            *smoothed = blend.smoothed;
            *out = blend.intensity;
        }
        &self.intensities
    }

    pub fn intensities(&self) -> &[f32] {
        &self.intensities
    }

    pub fn smoothed(&self) -> &[f32] {
        &self.smoothed
    }

    pub fn len(&self) -> usize {
        self.smoothed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.smoothed.is_empty()
    }

    pub fn blender(&self) -> &NoiseBlender {
        &self.blender
    }

    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
        self.intensities.fill(0.0);
    }
}
