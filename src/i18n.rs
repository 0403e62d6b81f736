//! Typed message catalog for the assistant's user-facing strings.
//!
//! Lookups go through an exhaustive match, so adding a [`MessageId`]
//! without translating it for every [`Language`] fails to compile instead
//! of falling back at runtime.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Languages the assistant speaks.
///
/// Serialized (and displayed) as the BCP 47 tags the rest of the system
/// uses; the short forms `en`/`hi`/`kn` are accepted on parse.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum Language {
    #[serde(rename = "en-US")]
    #[strum(to_string = "en-US", serialize = "en")]
    En,
    #[serde(rename = "hi-IN")]
    #[strum(to_string = "hi-IN", serialize = "hi")]
    Hi,
    #[serde(rename = "kn-IN")]
    #[strum(to_string = "kn-IN", serialize = "kn")]
    Kn,
}

impl Language {
    /// Human-readable name, in the language itself.
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी (Hindi)",
            Language::Kn => "ಕನ್ನಡ (Kannada)",
        }
    }
}

/// Identifiers for every translatable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum MessageId {
    Greeting,
    Synthesizing,
    SpeechReady,
    SpeechFailed,
}

/// Catalog text for `id` in `language`.
pub fn text(language: Language, id: MessageId) -> &'static str {
    match language {
        Language::En => match id {
            MessageId::Greeting => "Hello! How can I help you today?",
            MessageId::Synthesizing => "Generating speech...",
            MessageId::SpeechReady => "Speech ready.",
            MessageId::SpeechFailed => "Could not generate speech.",
        },
        Language::Hi => match id {
            MessageId::Greeting => "नमस्ते! मैं आज आपकी कैसे मदद कर सकता हूँ?",
            MessageId::Synthesizing => "वाणी तैयार की जा रही है...",
            MessageId::SpeechReady => "वाणी तैयार है।",
            MessageId::SpeechFailed => "वाणी तैयार नहीं हो सकी।",
        },
        Language::Kn => match id {
            MessageId::Greeting => "ನಮಸ್ಕಾರ! ನಾನು ಇಂದು ನಿಮಗೆ ಹೇಗೆ ಸಹಾಯ ಮಾಡಬಹುದು?",
            MessageId::Synthesizing => "ಧ್ವನಿ ಸಿದ್ಧಪಡಿಸಲಾಗುತ್ತಿದೆ...",
            MessageId::SpeechReady => "ಧ್ವನಿ ಸಿದ್ಧವಾಗಿದೆ.",
            MessageId::SpeechFailed => "ಧ್ವನಿ ಸಿದ್ಧಪಡಿಸಲು ಸಾಧ್ಯವಾಗಲಿಲ್ಲ.",
        },
    }
}

/// Like [`text`], but degrades to the identifier name when a catalog entry
/// is blank. The degradation is logged, never silent.
pub fn text_or_id(language: Language, id: MessageId) -> String {
    let message = text(language, id);
    if message.is_empty() {
        log::warn!("missing {language} translation for {id}, showing identifier");
        id.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_catalog_is_complete() {
        for language in Language::iter() {
            for id in MessageId::iter() {
                assert!(
                    !text(language, id).is_empty(),
                    "blank catalog entry for {language}/{id}"
                );
            }
        }
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::En.to_string(), "en-US");
        assert_eq!(Language::Hi.to_string(), "hi-IN");
        assert_eq!(Language::Kn.to_string(), "kn-IN");
    }

    #[test]
    fn test_language_parses_short_and_full_tags() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("hi-IN".parse::<Language>().unwrap(), Language::Hi);
        assert_eq!("kn".parse::<Language>().unwrap(), Language::Kn);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_serde_round_trip() {
        let json = serde_json::to_string(&Language::Hi).unwrap();
        assert_eq!(json, "\"hi-IN\"");
        assert_eq!(serde_json::from_str::<Language>(&json).unwrap(), Language::Hi);
    }

    #[test]
    fn test_text_or_id_returns_catalog_text() {
        assert_eq!(
            text_or_id(Language::En, MessageId::SpeechReady),
            "Speech ready."
        );
    }
}
