//! Client for the hosted Gemini speech-synthesis endpoint.
//!
//! The model returns raw little-endian PCM as base64 inline data; the
//! client decodes it and packages it as a WAV container via [`crate::wav`].

use crate::i18n::Language;
use crate::wav::{self, WavFormat};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TtsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("No audio data in model response")]
    NoAudio,
    #[error("Audio payload decoding failed: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("Audio packaging failed: {0}")]
    Wav(#[from] wav::WavError),
}

#[derive(Debug, Clone)]
pub struct TtsConfig {
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash-preview-tts".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Prebuilt voice used when the caller does not override one.
pub fn voice_for_language(language: Language) -> &'static str {
    match language {
        Language::En => "Algenib",
        Language::Hi => "Achernar",
        Language::Kn => "Gacrux",
    }
}

/// Synthesized speech, already packaged as a WAV container.
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    pub wav: Vec<u8>,
    pub format: WavFormat,
}

impl SpeechAudio {
    /// Renders the container as a `data:audio/wav;base64,` URI.
    pub fn data_uri(&self) -> String {
        wav::to_data_uri(&self.wav)
    }

    /// Playback length of the packaged audio.
    pub fn duration_seconds(&self) -> f64 {
        (self.wav.len() - wav::HEADER_LEN) as f64 / self.format.byte_rate() as f64
    }
}

pub struct GeminiTts {
    client: Client,
    api_key: String,
    config: TtsConfig,
}

impl GeminiTts {
    pub fn new(api_key: String) -> Self {
        Self::with_config(api_key, TtsConfig::default())
    }

    pub fn with_config(api_key: String, config: TtsConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            config,
        }
    }

    /// Generate speech for the text, picking the voice from the language.
    pub async fn synthesize(
        &self,
        text: &str,
        language: Language,
    ) -> Result<SpeechAudio, TtsError> {
        self.synthesize_with_voice(text, voice_for_language(language))
            .await
    }

    /// Generate speech with a specific prebuilt voice
    pub async fn synthesize_with_voice(
        &self,
        text: &str,
        voice_name: &str,
    ) -> Result<SpeechAudio, TtsError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let payload = json!({
            "contents": [{ "parts": [{ "text": text }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": voice_name }
                    }
                }
            }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TtsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        let inline = extract_audio(&body).ok_or(TtsError::NoAudio)?;

        let pcm = STANDARD.decode(&inline.data)?;
        let format = WavFormat::mono(sample_rate_from_mime(&inline.mime_type));

        log::debug!(
            "TTS: received {} PCM bytes ({}) for voice {}",
            pcm.len(),
            inline.mime_type,
            voice_name
        );

        let wav = wav::encode(&pcm, &format)?;
        Ok(SpeechAudio { wav, format })
    }
}

// Response types, validated at the boundary instead of walking untyped JSON.

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

/// First inline audio part of the response, if any.
fn extract_audio(response: &GenerateContentResponse) -> Option<&InlineData> {
    response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| c.parts.iter())
        .find_map(|p| p.inline_data.as_ref())
}

/// Parses the `rate=` parameter of mime types like
/// `audio/L16;codec=pcm;rate=24000`. The model answers at 24 kHz; the
/// parameter is honored when present and defaulted otherwise.
fn sample_rate_from_mime(mime: &str) -> u32 {
    mime.split(';')
        .filter_map(|part| part.trim().strip_prefix("rate="))
        .find_map(|value| value.parse().ok())
        .unwrap_or(24_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    #[test]
    fn test_config_defaults() {
        let config = TtsConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash-preview-tts");
        assert_eq!(
            config.base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_voice_for_language() {
        assert_eq!(voice_for_language(Language::En), "Algenib");
        assert_eq!(voice_for_language(Language::Hi), "Achernar");
        assert_eq!(voice_for_language(Language::Kn), "Gacrux");
    }

    #[test]
    fn test_sample_rate_from_mime() {
        assert_eq!(
            sample_rate_from_mime("audio/L16;codec=pcm;rate=24000"),
            24_000
        );
        assert_eq!(sample_rate_from_mime("audio/L16; rate=16000"), 16_000);
        assert_eq!(sample_rate_from_mime("audio/L16"), 24_000);
        assert_eq!(sample_rate_from_mime("audio/L16;rate=banana"), 24_000);
    }

    #[test]
    fn test_extract_audio_from_response() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "ignored" },
                        { "inlineData": { "mimeType": "audio/L16;codec=pcm;rate=24000", "data": "AQIDBA==" } }
                    ]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();

        let inline = extract_audio(&response).unwrap();
        assert_eq!(inline.mime_type, "audio/L16;codec=pcm;rate=24000");
        assert_eq!(STANDARD.decode(&inline.data).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_response_without_audio() {
        let body = r#"{ "candidates": [{ "content": { "parts": [{ "text": "hello" }] } }] }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(extract_audio(&response).is_none());

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_audio(&empty).is_none());
    }

    #[test]
    fn test_speech_audio_packaging() {
        let pcm = vec![0u8; 48_000];
        let format = WavFormat::default();
        let audio = SpeechAudio {
            wav: wav::encode(&pcm, &format).unwrap(),
            format,
        };

        // 48000 bytes at 48000 bytes/sec is one second of audio
        assert!((audio.duration_seconds() - 1.0).abs() < 1e-9);
        assert!(audio.data_uri().starts_with(wav::DATA_URI_PREFIX));
    }

    #[test]
    fn test_client_creation() {
        let tts = GeminiTts::new("test_key".to_string());
        assert_eq!(tts.api_key, "test_key");
        assert_eq!(tts.config.model, "gemini-2.5-flash-preview-tts");
    }
}
