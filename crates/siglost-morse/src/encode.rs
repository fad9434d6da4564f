use bitvec::vec::BitVec;

use crate::error::ConfigError;
use crate::table::pattern_for;

/// One element of an encoded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorseSymbol {
    Dot,
    Dash,
    IntraCharacterGap,
    InterCharacterGap,
    WordGap,
}

impl MorseSymbol {
    /// Length of the symbol in Morse units.
    pub fn units(self) -> u32 {
        match self {
            MorseSymbol::Dot | MorseSymbol::IntraCharacterGap => 1,
            MorseSymbol::Dash | MorseSymbol::InterCharacterGap => 3,
            MorseSymbol::WordGap => 7,
        }
    }

    /// The keyed mark this symbol represents, if it is not a gap.
    pub fn mark(self) -> Option<MarkKind> {
        match self {
            MorseSymbol::Dot => Some(MarkKind::Dot),
            MorseSymbol::Dash => Some(MarkKind::Dash),
            _ => None,
        }
    }

    pub fn is_mark(self) -> bool {
        self.mark().is_some()
    }
}

/// A keyed (tone-on) element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
    Dot,
    Dash,
}

impl From<MarkKind> for MorseSymbol {
    fn from(kind: MarkKind) -> Self {
        match kind {
            MarkKind::Dot => MorseSymbol::Dot,
            MarkKind::Dash => MorseSymbol::Dash,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent {
    pub symbol: MorseSymbol,
    /// Seconds.
    pub duration: f32,
}

/// The timed events for one message, plus the text and unit they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedSequence {
    text: String,
    unit: f32,
    events: Vec<TimedEvent>,
}

impl EncodedSequence {
    /// Wrap a hand-built event list, e.g. a custom keying pattern.
    /// Negative durations are clamped to zero.
    pub fn from_events(
        text: impl Into<String>,
        unit: f32,
        events: Vec<TimedEvent>,
    ) -> Result<Self, ConfigError> {
        validate_unit(unit)?;
        let events = events
            .into_iter()
            .map(|ev| TimedEvent {
                symbol: ev.symbol,
                duration: ev.duration.max(0.0),
            })
            .collect();
        Ok(Self {
            text: text.into(),
            unit,
            events,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn unit(&self) -> f32 {
        self.unit
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    pub fn get(&self, index: usize) -> Option<&TimedEvent> {
        self.events.get(index)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Length of one pass in seconds, excluding the loop pause.
    pub fn total_duration(&self) -> f32 {
        self.events.iter().map(|ev| ev.duration).sum()
    }

    pub fn mark_count(&self) -> usize {
        self.events.iter().filter(|ev| ev.symbol.is_mark()).count()
    }

    /// Marks in playback order.
    pub fn marks(&self) -> impl Iterator<Item = MarkKind> + '_ {
        self.events.iter().filter_map(|ev| ev.symbol.mark())
    }

    /// Keying pattern with one bit per unit (1 = key down).
    pub fn units(&self) -> BitVec {
        let mut bits = BitVec::new();
        for ev in &self.events {
            let count = (ev.duration / self.unit).round() as usize;
            push_units(&mut bits, ev.symbol.is_mark(), count);
        }
        bits
    }
}

/// Encoder bound to a fixed unit duration.
#[derive(Debug, Clone, Copy)]
pub struct MorseEncoder {
    unit: f32,
}

impl MorseEncoder {
    pub fn new(unit: f32) -> Result<Self, ConfigError> {
        validate_unit(unit)?;
        Ok(Self { unit })
    }

    pub fn unit(&self) -> f32 {
        self.unit
    }

    pub fn encode(&self, text: &str) -> EncodedSequence {
        let mut events = Vec::new();
        for ch in text.chars() {
            if ch == ' ' {
                push_event(&mut events, MorseSymbol::WordGap, self.unit);
            } else {
                let Some(pattern) = pattern_for(ch) else {
                    log::trace!("skipping unmapped character {:?}", ch);
                    continue;
                };
                emit_character(&mut events, pattern, self.unit);
            }
            push_event(&mut events, MorseSymbol::InterCharacterGap, self.unit);
        }

        log::debug!("encoded {:?} into {} timed events", text, events.len());

        EncodedSequence {
            text: text.to_string(),
            unit: self.unit,
            events,
        }
    }
}

/// Encode text with the given unit duration in seconds.
pub fn encode(text: &str, unit: f32) -> Result<EncodedSequence, ConfigError> {
    Ok(MorseEncoder::new(unit)?.encode(text))
}

pub(crate) fn validate_unit(unit: f32) -> Result<(), ConfigError> {
    if unit.is_finite() && unit > 0.0 {
        Ok(())
    } else {
        log::warn!("rejecting morse unit {}", unit);
        Err(ConfigError::NonPositiveUnit(unit))
    }
}

fn emit_character(events: &mut Vec<TimedEvent>, pattern: &str, unit: f32) {
    let mut marks = pattern.chars().peekable();
    while let Some(mark) = marks.next() {
        match mark {
            '.' => push_event(events, MorseSymbol::Dot, unit),
            '-' => push_event(events, MorseSymbol::Dash, unit),
            _ => {}
        }

        if marks.peek().is_some() {
            push_event(events, MorseSymbol::IntraCharacterGap, unit);
        }
    }
}

fn push_event(events: &mut Vec<TimedEvent>, symbol: MorseSymbol, unit: f32) {
    events.push(TimedEvent {
        symbol,
        duration: symbol.units() as f32 * unit,
    });
}

fn push_units(bits: &mut BitVec, value: bool, count: usize) {
    for _ in 0..count {
        bits.push(value);
    }
}
