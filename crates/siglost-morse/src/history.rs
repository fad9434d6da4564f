use std::collections::VecDeque;

use crate::encode::MarkKind;
use crate::error::ConfigError;

pub const DEFAULT_RETENTION_SECS: f32 = 5.0;
pub const DEFAULT_DOT_WIDTH: f32 = 10.0;
pub const DEFAULT_DASH_WIDTH: f32 = 30.0;

/// A mark that has already been keyed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    pub kind: MarkKind,
    /// Seconds since the mark completed.
    pub age: f32,
    /// Signal strength at the moment the mark completed.
    pub strength: f32,
}

/// Drawn widths for dots and dashes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkWidths {
    pub dot: f32,
    pub dash: f32,
}

impl Default for MarkWidths {
    fn default() -> Self {
        Self {
            dot: DEFAULT_DOT_WIDTH,
            dash: DEFAULT_DASH_WIDTH,
        }
    }
}

impl MarkWidths {
    pub fn new(dot: f32, dash: f32) -> Result<Self, ConfigError> {
        let valid = |w: f32| w.is_finite() && w > 0.0;
        if !valid(dot) || !valid(dash) {
            return Err(ConfigError::NonPositiveWidth { dot, dash });
        }
        Ok(Self { dot, dash })
    }

    /// Dash width as a multiple of the dot width.
    pub fn with_ratio(dot: f32, dash_ratio: f32) -> Result<Self, ConfigError> {
        Self::new(dot, dot * dash_ratio)
    }

    pub fn width(&self, kind: MarkKind) -> f32 {
        match kind {
            MarkKind::Dot => self.dot,
            MarkKind::Dash => self.dash,
        }
    }
}

/// Everything a drawing layer needs for one faded history mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderableMark {
    pub kind: MarkKind,
    pub alpha: f32,
    pub width: f32,
    pub strength: f32,
}

/// Recently keyed marks, aged every frame and dropped once older than the
/// retention window. Stored oldest first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<HistoryEntry>,
    retention: f32,
}

impl HistoryBuffer {
    pub fn new(retention: f32) -> Result<Self, ConfigError> {
        if !(retention.is_finite() && retention > 0.0) {
            log::warn!("rejecting history retention {}", retention);
            return Err(ConfigError::NonPositiveRetention(retention));
        }
        Ok(Self {
            entries: VecDeque::new(),
            retention,
        })
    }

    pub fn retention(&self) -> f32 {
        self.retention
    }

    pub fn record(&mut self, kind: MarkKind, strength: f32) {
        let strength = if strength.is_nan() {
            0.0
        } else {
            strength.clamp(0.0, 1.0)
        };
        self.entries.push_back(HistoryEntry {
            kind,
            age: 0.0,
            strength,
        });
    }

    /// Age every entry by `delta` seconds and prune the expired ones. An
    /// entry whose age equals the window survives this tick.
    pub fn tick(&mut self, delta: f32) {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        for entry in &mut self.entries {
            entry.age += delta;
        }
        let retention = self.retention;
        let before = self.entries.len();
        self.entries.retain(|entry| entry.age <= retention);
        let pruned = before - self.entries.len();
        if pruned > 0 {
            log::trace!("pruned {} history entries", pruned);
        }
    }

    pub fn renderable_entries(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    /// Entries with fade and width resolved, oldest first.
    pub fn renderable_marks(
        &self,
        widths: MarkWidths,
    ) -> impl Iterator<Item = RenderableMark> + '_ {
        self.entries.iter().map(move |entry| RenderableMark {
            kind: entry.kind,
            alpha: self.alpha(entry),
            width: widths.width(entry.kind),
            strength: entry.strength,
        })
    }

    /// Linear fade from 1 at emission to 0 at the end of the window.
    pub fn alpha(&self, entry: &HistoryEntry) -> f32 {
        (1.0 - entry.age / self.retention).clamp(0.0, 1.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
            retention: DEFAULT_RETENTION_SECS,
        }
    }
}
