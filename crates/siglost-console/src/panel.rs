use anyhow::Context;
use siglost_morse::MorseDisplay;
use siglost_noise::{NoiseBank, SignalWave, StaticField};

use crate::config::PanelConfig;

/// Height used for the wave trace; the console only looks at its sign.
const WAVE_HEIGHT: f32 = 1.0;

/// The receiver face: Morse lamp and trail, bar meter, static row and
/// carrier trace, all stepped together once per frame.
pub struct RadioPanel {
    display: MorseDisplay,
    meter: NoiseBank,
    field: StaticField,
    wave: SignalWave,
    time: f32,
    strength: f32,
}

impl RadioPanel {
    pub fn new(config: &PanelConfig, message: &str) -> anyhow::Result<Self> {
        let mut display = MorseDisplay::new(config.morse()?).context("invalid morse settings")?;
        display.set_message(message);
        if display.message().is_none() {
            log::warn!("message {:?} has nothing to key", message);
        }

        let meter = NoiseBank::new(config.blender()?, config.bars).context("invalid bar count")?;
        let field = StaticField::new(config.static_field()).context("invalid static settings")?;
        let wave = SignalWave::new(WAVE_HEIGHT)?.with_threshold(config.wave_threshold);

        Ok(Self {
            display,
            meter,
            field,
            wave,
            time: 0.0,
            strength: 0.0,
        })
    }

    /// Step everything by one frame. Keying advances before the trail is
    /// aged, so marks finished this frame show up immediately.
    pub fn frame(&mut self, delta: f32, strength: f32) -> usize {
        let delta = delta.max(0.0);
        self.time += delta;
        self.strength = if strength.is_nan() {
            0.0
        } else {
            strength.clamp(0.0, 1.0)
        };

        let marks = self.display.update(delta, self.strength);
        self.meter.update(self.time, self.strength);
        self.field.advance(delta);
        marks
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn display(&self) -> &MorseDisplay {
        &self.display
    }

    pub fn meter(&self) -> &[f32] {
        self.meter.intensities()
    }

    pub fn field(&self) -> &StaticField {
        &self.field
    }

    pub fn wave_trace(&self) -> Option<Vec<f32>> {
        self.wave.trace(self.meter.len(), self.field.timer(), self.strength)
    }
}

/// Triangle sweep 0 -> 1 -> 0 over `period` seconds, like slowly tuning
/// across a station.
pub fn sweep_strength(time: f32, period: f32) -> f32 {
    if period.is_nan() || period <= 0.0 {
        return 0.0;
    }
    let phase = (time / period).rem_euclid(1.0);
    1.0 - (2.0 * phase - 1.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(message: &str) -> RadioPanel {
        let config = PanelConfig {
            unit: 0.125,
            bars: 8,
            ..PanelConfig::default()
        };
        RadioPanel::new(&config, message).unwrap()
    }

    #[test]
    fn frames_key_the_message_into_the_trail() {
        let mut panel = panel("SOS");
        let mut marks = 0;
        for _ in 0..240 {
            marks += panel.frame(0.125, 0.9);
        }
        assert!(marks >= 9);
        assert!(!panel.display().history().is_empty());
        assert_eq!(panel.meter().len(), 8);
        assert!(panel.wave_trace().is_some());
    }

    #[test]
    fn dead_air_keys_nothing() {
        let mut panel = panel("SOS");
        for _ in 0..100 {
            assert_eq!(panel.frame(0.1, 0.0), 0);
        }
        assert!(panel.wave_trace().is_none());
        assert!(panel.meter().iter().all(|&v| v >= 0.0 && v <= 1.0));
    }

    #[test]
    fn rejects_zero_bars() {
        let config = PanelConfig {
            bars: 0,
            ..PanelConfig::default()
        };
        assert!(RadioPanel::new(&config, "E").is_err());
    }

    #[test]
    fn sweep_is_a_triangle() {
        assert_eq!(sweep_strength(0.0, 4.0), 0.0);
        assert_eq!(sweep_strength(1.0, 4.0), 0.5);
        assert_eq!(sweep_strength(2.0, 4.0), 1.0);
        assert_eq!(sweep_strength(3.0, 4.0), 0.5);
        assert_eq!(sweep_strength(4.0, 4.0), 0.0);
        assert_eq!(sweep_strength(1.0, 0.0), 0.0);
    }
}
