pub mod config;
pub mod error;
pub mod i18n;
pub mod settings;
pub mod tts;
pub mod wav;

pub use error::{Result, VoiceError};
