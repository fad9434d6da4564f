use crate::encode::{EncodedSequence, MarkKind, MorseSymbol};

/// Extra silence inserted each time playback wraps, in units (one word gap).
pub const LOOP_PAUSE_UNITS: f32 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Idle,
    Playing,
}

/// Steps through an encoded message as frame time elapses, looping forever
/// with a word-gap pause between repetitions.
///
/// The loop pause is stored as a negative time credit on `elapsed`; while
/// that credit is outstanding the cursor reports no active mark.
#[derive(Debug, Clone, Default)]
pub struct PlaybackCursor {
    sequence: Option<EncodedSequence>,
    index: usize,
    elapsed: f32,
    playing: bool,
}

impl PlaybackCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin playing `sequence` from its first event.
    /// An empty sequence is ignored and the cursor keeps its current state.
    pub fn start(&mut self, sequence: EncodedSequence) {
        if sequence.is_empty() {
            log::debug!("ignoring empty sequence for {:?}", sequence.text());
            return;
        }
        log::debug!(
            "starting playback of {:?} ({} events)",
            sequence.text(),
            sequence.len()
        );
        self.sequence = Some(sequence);
        self.rewind();
        self.playing = true;
    }

    /// Stop and forget the current sequence.
    pub fn clear(&mut self) {
        self.sequence = None;
        self.rewind();
        self.playing = false;
    }

    /// Pause playback in place.
    pub fn stop(&mut self) {
        if self.playing {
            log::debug!("playback stopped at event {}", self.index);
        }
        self.playing = false;
    }

    /// Enabling always restarts from the beginning; disabling is [`stop`].
    ///
    /// [`stop`]: PlaybackCursor::stop
    pub fn set_playing(&mut self, playing: bool) {
        if !playing {
            self.stop();
            return;
        }
        if self.sequence.is_some() {
            self.rewind();
            self.playing = true;
        }
    }

    /// Advance by `delta` seconds and return the marks that finished, oldest
    /// first.
    ///
    /// At most one pass over the sequence is consumed per call, so an
    /// all-zero-duration sequence cannot spin forever. Any time left over
    /// carries into the next call.
    pub fn advance(&mut self, delta: f32) -> Vec<MarkKind> {
        let mut completed = Vec::new();
        if !self.playing {
            return completed;
        }
        let Some(sequence) = self.sequence.as_ref() else {
            return completed;
        };

        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.elapsed += delta;

        let events = sequence.events();
        let len = events.len();
        for _ in 0..len {
            let event = events[self.index];
            if self.elapsed < event.duration {
                break;
            }
            self.elapsed -= event.duration;
            if let Some(kind) = event.symbol.mark() {
                completed.push(kind);
            }
            self.index = (self.index + 1) % len;
            if self.index == 0 {
                self.elapsed -= LOOP_PAUSE_UNITS * sequence.unit();
                log::trace!("looped {:?}, pausing", sequence.text());
            }
        }

        completed
    }

    pub fn state(&self) -> CursorState {
        if self.playing {
            CursorState::Playing
        } else {
            CursorState::Idle
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True while a dot or dash is keyed.
    pub fn is_active(&self) -> bool {
        self.active_mark().is_some()
    }

    /// Whether the active mark is a dot. Only meaningful while
    /// [`is_active`](PlaybackCursor::is_active) holds.
    pub fn is_dot(&self) -> bool {
        self.active_mark() == Some(MarkKind::Dot)
    }

    pub fn active_mark(&self) -> Option<MarkKind> {
        if !self.playing || self.in_loop_pause() {
            return None;
        }
        self.current_symbol().and_then(MorseSymbol::mark)
    }

    /// Fraction of the active mark already keyed, in [0, 1].
    pub fn mark_progress(&self) -> Option<f32> {
        self.active_mark()?;
        let duration = self.sequence.as_ref()?.get(self.index)?.duration;
        if duration <= 0.0 {
            return Some(1.0);
        }
        Some((self.elapsed / duration).clamp(0.0, 1.0))
    }

    /// True while the pause between repetitions is running.
    pub fn in_loop_pause(&self) -> bool {
        self.elapsed < 0.0
    }

    pub fn current_symbol(&self) -> Option<MorseSymbol> {
        self.sequence
            .as_ref()
            .and_then(|seq| seq.get(self.index))
            .map(|ev| ev.symbol)
    }

    pub fn sequence(&self) -> Option<&EncodedSequence> {
        self.sequence.as_ref()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn rewind(&mut self) {
        self.index = 0;
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode, TimedEvent};

    fn cursor_for(text: &str, unit: f32) -> PlaybackCursor {
        let mut cursor = PlaybackCursor::new();
        cursor.start(encode(text, unit).unwrap());
        cursor
    }

    #[test]
    fn starts_idle() {
        let cursor = PlaybackCursor::new();
        assert_eq!(cursor.state(), CursorState::Idle);
        assert!(!cursor.is_active());
        assert!(cursor.current_symbol().is_none());
    }

    #[test]
    fn empty_sequence_is_ignored() {
        let mut cursor = PlaybackCursor::new();
        cursor.start(encode("###", 0.1).unwrap());
        assert_eq!(cursor.state(), CursorState::Idle);
        assert!(cursor.advance(1.0).is_empty());
    }

    #[test]
    fn single_dot_scenario() {
        let mut cursor = cursor_for("E", 0.1);
        assert!(cursor.is_active());
        assert!(cursor.is_dot());

        assert!(cursor.advance(0.05).is_empty());
        assert_eq!(cursor.advance(0.05), vec![MarkKind::Dot]);
        assert_eq!(cursor.index(), 1);
        assert!(!cursor.is_active());

        assert!(cursor.advance(0.3).is_empty());
        assert_eq!(cursor.index(), 0);
        assert!(cursor.in_loop_pause());
        assert!(!cursor.is_active());
        assert!((cursor.elapsed() + 0.7).abs() < 1e-6);
    }

    #[test]
    fn loop_pause_delays_next_mark_by_a_word_gap() {
        let mut cursor = cursor_for("E", 0.125);
        // one pass: dot (1u) + letter gap (3u)
        assert_eq!(cursor.advance(0.5), vec![MarkKind::Dot]);
        // 7u of silence, then the dot is keyed again
        cursor.advance(0.875 - 0.0625);
        assert!(!cursor.is_active());
        cursor.advance(0.0625);
        assert!(cursor.is_active());
        assert_eq!(cursor.advance(0.125), vec![MarkKind::Dot]);
    }

    #[test]
    fn dash_reports_not_dot() {
        let mut cursor = cursor_for("T", 0.1);
        assert!(cursor.is_active());
        assert!(!cursor.is_dot());
        cursor.advance(0.15);
        let progress = cursor.mark_progress().unwrap();
        assert!((progress - 0.5).abs() < 1e-5);
    }

    #[test]
    fn stop_retains_position_and_set_playing_restarts() {
        let mut cursor = cursor_for("A", 0.125);
        cursor.advance(0.25);
        assert_eq!(cursor.index(), 2);

        cursor.stop();
        assert!(!cursor.is_active());
        assert!(cursor.advance(5.0).is_empty());
        assert_eq!(cursor.index(), 2);

        cursor.set_playing(true);
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.elapsed(), 0.0);
        assert!(cursor.is_playing());
    }

    #[test]
    fn negative_and_nan_deltas_do_nothing() {
        let mut cursor = cursor_for("E", 0.1);
        assert!(cursor.advance(-1.0).is_empty());
        assert!(cursor.advance(f32::NAN).is_empty());
        assert_eq!(cursor.elapsed(), 0.0);
    }

    #[test]
    fn zero_duration_events_cannot_stall() {
        let seq = EncodedSequence::from_events(
            "zeros",
            0.1,
            vec![
                TimedEvent {
                    symbol: MorseSymbol::Dot,
                    duration: 0.0,
                },
                TimedEvent {
                    symbol: MorseSymbol::Dash,
                    duration: 0.0,
                },
            ],
        )
        .unwrap();
        let mut cursor = PlaybackCursor::new();
        cursor.start(seq);
        let emitted = cursor.advance(0.0);
        assert_eq!(emitted, vec![MarkKind::Dot, MarkKind::Dash]);
        assert!(cursor.in_loop_pause());
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut cursor = cursor_for("E", 0.1);
        cursor.clear();
        assert_eq!(cursor.state(), CursorState::Idle);
        assert!(cursor.sequence().is_none());
        cursor.set_playing(true);
        assert!(!cursor.is_playing());
    }
}
