use thiserror::Error;

pub type Result<T> = std::result::Result<T, VoiceError>;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("WAV encoding error: {0}")]
    Wav(#[from] crate::wav::WavError),

    #[error("TTS error: {0}")]
    Tts(#[from] crate::tts::TtsError),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Settings error: {0}")]
    Settings(#[from] crate::settings::SettingsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
