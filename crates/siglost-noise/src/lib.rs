pub mod bank;
pub mod blender;
mod error;
pub mod field;
pub mod hash;
pub mod wave;

pub use bank::NoiseBank;
pub use blender::{Blend, NoiseBlender, NoiseBlenderBuilder};
pub use error::ConfigError;
pub use field::{StaticField, StaticFieldConfig};
pub use wave::SignalWave;
