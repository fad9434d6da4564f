pub mod display;
pub mod encode;
mod error;
pub mod history;
pub mod playback;
mod table;

pub use display::{MorseDisplay, MorseDisplayConfig};
pub use encode::{encode, EncodedSequence, MarkKind, MorseEncoder, MorseSymbol, TimedEvent};
pub use error::ConfigError;
pub use history::{HistoryBuffer, HistoryEntry, MarkWidths, RenderableMark};
pub use playback::{CursorState, PlaybackCursor};
pub use table::{morse_string, pattern_for};
