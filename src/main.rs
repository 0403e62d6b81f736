use anyhow::Context;
use clap::{Parser, Subcommand};
use krishi_voice::{
    config::load_config,
    i18n::{self, Language, MessageId},
    settings::Settings,
    tts::GeminiTts,
    wav::{self, WavFormat},
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "krishi-voice",
    about = "Speech backend for the KrishiMitra farmer assistant"
)]
struct Cli {
    /// Settings file, read at startup and updated when --language changes it
    #[arg(long, default_value = "krishi-voice.json")]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Synthesize speech for a piece of advisory text
    Speak {
        text: String,

        /// Language of the text (en, hi, kn); persisted as the new default
        #[arg(long, value_parser = parse_language)]
        language: Option<Language>,

        /// Prebuilt voice name, overriding the per-language choice
        #[arg(long)]
        voice: Option<String>,

        /// Write the WAV container here instead of printing the data URI
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Package a raw little-endian PCM file as a WAV container
    Encode {
        pcm: PathBuf,

        #[arg(long, default_value_t = 1)]
        channels: u16,

        #[arg(long, default_value_t = 24_000)]
        rate: u32,

        #[arg(long, default_value_t = 2)]
        bytes_per_sample: u16,

        /// Print a data URI instead of writing a file
        #[arg(long)]
        uri: bool,

        /// Output path; defaults to the input with a .wav extension
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn parse_language(value: &str) -> Result<Language, String> {
    value
        .parse()
        .map_err(|_| format!("unknown language '{value}' (expected en, hi, or kn)"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Speak {
            text,
            language,
            voice,
            out,
        } => speak(&cli.settings, &text, language, voice, out).await,
        Command::Encode {
            pcm,
            channels,
            rate,
            bytes_per_sample,
            uri,
            out,
        } => encode(&pcm, channels, rate, bytes_per_sample, uri, out),
    }
}

async fn speak(
    settings_path: &PathBuf,
    text: &str,
    language: Option<Language>,
    voice: Option<String>,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut settings = Settings::load(settings_path)?;
    if let Some(language) = language {
        if language != settings.language {
            settings.language = language;
            settings.save(settings_path)?;
        }
    }
    let language = settings.language;

    eprintln!("{}", i18n::text(language, MessageId::Synthesizing));

    let api_config = load_config()?;
    let tts = GeminiTts::new(api_config.gemini_key().to_string());

    let voice = voice.or_else(|| settings.voice_override.clone());
    let result = match voice {
        Some(voice) => tts.synthesize_with_voice(text, &voice).await,
        None => tts.synthesize(text, language).await,
    };

    let audio = match result {
        Ok(audio) => audio,
        Err(e) => {
            eprintln!("{}", i18n::text(language, MessageId::SpeechFailed));
            return Err(e).context("speech synthesis failed");
        }
    };

    log::info!("synthesized {:.1}s of audio", audio.duration_seconds());

    match out {
        Some(path) => {
            fs::write(&path, &audio.wav)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => println!("{}", audio.data_uri()),
    }

    eprintln!("{}", i18n::text(language, MessageId::SpeechReady));
    Ok(())
}

fn encode(
    pcm_path: &PathBuf,
    channels: u16,
    rate: u32,
    bytes_per_sample: u16,
    uri: bool,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let pcm = fs::read(pcm_path).with_context(|| format!("reading {}", pcm_path.display()))?;
    let format = WavFormat {
        channels,
        sample_rate: rate,
        bytes_per_sample,
    };

    // Pass a trailing partial frame through, but tell the user about it.
    let block_align = format.block_align() as usize;
    if block_align > 0 && pcm.len() % block_align != 0 {
        log::warn!(
            "payload length {} is not a whole number of {}-byte frames",
            pcm.len(),
            block_align
        );
    }

    if uri {
        println!("{}", wav::encode_data_uri(&pcm, &format)?);
    } else {
        let out = out.unwrap_or_else(|| pcm_path.with_extension("wav"));
        fs::write(&out, wav::encode(&pcm, &format)?)
            .with_context(|| format!("writing {}", out.display()))?;
        println!("wrote {}", out.display());
    }

    Ok(())
}
