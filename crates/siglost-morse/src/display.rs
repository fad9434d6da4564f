use crate::encode::{validate_unit, MarkKind, MorseEncoder};
use crate::error::ConfigError;
use crate::history::{HistoryBuffer, MarkWidths, RenderableMark, DEFAULT_RETENTION_SECS};
use crate::playback::PlaybackCursor;

pub const DEFAULT_UNIT_SECS: f32 = 0.1;
/// Below this strength the signal is too weak to read and keying holds.
pub const DEFAULT_GATE_THRESHOLD: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorseDisplayConfig {
    pub unit: f32,
    pub retention: f32,
    pub gate_threshold: f32,
    pub widths: MarkWidths,
}

impl Default for MorseDisplayConfig {
    fn default() -> Self {
        Self {
            unit: DEFAULT_UNIT_SECS,
            retention: DEFAULT_RETENTION_SECS,
            gate_threshold: DEFAULT_GATE_THRESHOLD,
            widths: MarkWidths::default(),
        }
    }
}

impl MorseDisplayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_unit(self.unit)?;
        if !(0.0..1.0).contains(&self.gate_threshold) {
            return Err(ConfigError::GateOutOfRange(self.gate_threshold));
        }
        MarkWidths::new(self.widths.dot, self.widths.dash)?;
        Ok(())
    }
}

/// One Morse visualizer: an encoder, the cursor playing its message and the
/// trail of marks it has keyed.
#[derive(Debug, Clone)]
pub struct MorseDisplay {
    encoder: MorseEncoder,
    cursor: PlaybackCursor,
    history: HistoryBuffer,
    gate_threshold: f32,
    widths: MarkWidths,
    strength: f32,
    playing: bool,
}

impl MorseDisplay {
    pub fn new(config: MorseDisplayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            encoder: MorseEncoder::new(config.unit)?,
            cursor: PlaybackCursor::new(),
            history: HistoryBuffer::new(config.retention)?,
            gate_threshold: config.gate_threshold,
            widths: config.widths,
            strength: 0.0,
            playing: true,
        })
    }

    /// Replace the message and rewind to its first mark. A paused display
    /// stays paused. A message with nothing encodable leaves it idle.
    pub fn set_message(&mut self, text: &str) {
        let sequence = self.encoder.encode(text);
        self.cursor.clear();
        self.cursor.start(sequence);
        if !self.playing {
            self.cursor.stop();
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.cursor.sequence().map(|seq| seq.text())
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        self.cursor.set_playing(playing);
    }

    /// Run one frame. Returns the number of marks completed this frame,
    /// which are already in the history with age zero.
    pub fn update(&mut self, delta: f32, strength: f32) -> usize {
        self.strength = if strength.is_nan() {
            0.0
        } else {
            strength.clamp(0.0, 1.0)
        };

        let completed = if self.is_gated() {
            Vec::new()
        } else {
            self.cursor.advance(delta)
        };

        self.history.tick(delta);
        for &kind in &completed {
            self.history.record(kind, self.strength);
        }
        completed.len()
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// True while the signal is too weak to key.
    pub fn is_gated(&self) -> bool {
        self.strength <= self.gate_threshold
    }

    pub fn is_active(&self) -> bool {
        self.active_mark().is_some()
    }

    pub fn is_dot(&self) -> bool {
        self.active_mark() == Some(MarkKind::Dot)
    }

    pub fn active_mark(&self) -> Option<MarkKind> {
        if self.is_gated() {
            return None;
        }
        self.cursor.active_mark()
    }

    /// Width of the mark being keyed; dashes grow with their progress.
    pub fn active_width(&self) -> Option<f32> {
        match self.active_mark()? {
            MarkKind::Dot => Some(self.widths.dot),
            MarkKind::Dash => {
                let progress = self.cursor.mark_progress().unwrap_or(1.0);
                Some(self.widths.dash * progress)
            }
        }
    }

    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn widths(&self) -> MarkWidths {
        self.widths
    }

    pub fn renderable_marks(&self) -> impl Iterator<Item = RenderableMark> + '_ {
        self.history.renderable_marks(self.widths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(unit: f32) -> MorseDisplay {
        MorseDisplay::new(MorseDisplayConfig {
            unit,
            ..MorseDisplayConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn rejects_bad_config() {
        let bad_unit = MorseDisplayConfig {
            unit: 0.0,
            ..MorseDisplayConfig::default()
        };
        assert_eq!(
            MorseDisplay::new(bad_unit).unwrap_err(),
            ConfigError::NonPositiveUnit(0.0)
        );

        let bad_gate = MorseDisplayConfig {
            gate_threshold: 1.0,
            ..MorseDisplayConfig::default()
        };
        assert!(MorseDisplay::new(bad_gate).is_err());

        let bad_retention = MorseDisplayConfig {
            retention: 0.0,
            ..MorseDisplayConfig::default()
        };
        assert!(MorseDisplay::new(bad_retention).is_err());
    }

    #[test]
    fn completed_mark_is_rendered_the_same_frame_with_age_zero() {
        let mut display = display(0.125);
        display.set_message("E");
        assert_eq!(display.update(0.125, 0.7), 1);

        let entries: Vec<_> = display.history().renderable_entries().copied().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, MarkKind::Dot);
        assert_eq!(entries[0].age, 0.0);
        assert_eq!(entries[0].strength, 0.7);
    }

    #[test]
    fn weak_signal_holds_keying() {
        let mut display = display(0.125);
        display.set_message("E");
        assert_eq!(display.update(1.0, 0.05), 0);
        assert!(!display.is_active());
        assert_eq!(display.cursor().elapsed(), 0.0);

        assert_eq!(display.update(0.0, 0.5), 0);
        assert!(display.is_active());
        assert!(display.is_dot());
    }

    #[test]
    fn history_keeps_aging_while_gated() {
        let mut display = display(0.125);
        display.set_message("E");
        display.update(0.125, 1.0);
        display.update(10.0, 0.0);
        assert!(display.history().is_empty());
    }

    #[test]
    fn unencodable_message_idles() {
        let mut display = display(0.1);
        display.set_message("E");
        display.set_message("%%%");
        assert!(display.message().is_none());
        assert_eq!(display.update(1.0, 1.0), 0);
        assert!(!display.is_active());
    }

    #[test]
    fn new_message_keeps_pause() {
        let mut display = display(0.125);
        display.set_message("E");
        display.set_playing(false);
        display.set_message("T");
        assert_eq!(display.message(), Some("T"));
        assert!(!display.cursor().is_playing());
        assert_eq!(display.update(1.0, 1.0), 0);

        display.set_playing(true);
        display.set_message("E");
        assert!(display.cursor().is_playing());
        assert_eq!(display.update(0.125, 1.0), 1);
    }

    #[test]
    fn dash_width_grows_while_keyed() {
        let mut display = display(0.125);
        display.set_message("T");
        display.update(0.1875, 1.0);
        let width = display.active_width().unwrap();
        assert!((width - 15.0).abs() < 1e-4);
    }
}
