//! Gemini Assist CLI
//!
//! Command-line front end for the integration: validate a key, chat with the
//! conversation agent, synthesize and transcribe audio, call services and
//! inspect the options flow.

#![allow(clippy::print_stdout)]

mod audio;
mod host;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, bail};
use application::{ConversationInput, ConversationResponse, ports::HostTtsPort};
use clap::{Parser, Subcommand};
use domain::{OptionKey, OptionsMap, SpeechResultState};
use futures::stream;
use infrastructure::{
    AppConfig, Integration, OptionsFlow, OptionsStep, SetupFlow, UserInput, init_logging,
};
use serde_json::Value;

use crate::host::WavFileHost;

/// Gemini Assist CLI
#[derive(Parser)]
#[command(name = "gemini-assist")]
#[command(author, version, about = "Gemini conversation, TTS and STT from the command line", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an API key the way the setup flow does
    Validate {
        /// API key (falls back to the configured key)
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Entry title
        #[arg(long)]
        name: Option<String>,
    },

    /// List the entities a setup would create
    Entities,

    /// Send one or more chat turns to the conversation agent
    Chat {
        /// Messages, processed in order within one conversation
        #[arg(required = true)]
        messages: Vec<String>,

        /// Conversation id to continue
        #[arg(long)]
        conversation_id: Option<String>,

        /// Language of the turn
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Synthesize speech into a WAV file
    Speak {
        /// Text to speak
        message: String,

        /// Output file
        #[arg(short, long, default_value = "speech.wav")]
        output: PathBuf,

        #[arg(long)]
        voice: Option<String>,

        #[arg(long)]
        style: Option<String>,

        #[arg(long)]
        emotion: Option<String>,

        #[arg(long)]
        pace: Option<String>,

        #[arg(short, long)]
        language: Option<String>,
    },

    /// Transcribe a 16-bit PCM WAV file
    Transcribe {
        /// Input file
        input: PathBuf,

        /// Spoken language
        #[arg(short, long, default_value = "en-US")]
        language: String,
    },

    /// Call an integration service with a JSON payload
    ///
    /// Example: gemini-assist service speak_with_style '{"message": "Hi", "entity_id": "tts.gemini_ai_tts"}'
    Service {
        /// Service name
        name: String,

        /// JSON payload
        #[arg(default_value = "{}")]
        payload: String,

        /// Where `speak_with_style` writes its audio
        #[arg(short, long, default_value = "speech.wav")]
        output: PathBuf,
    },

    /// Show the options menu, a settings screen, or apply changes to it
    Settings {
        /// Screen to show (general, conversation, tts, stt)
        #[arg(long)]
        step: Option<String>,

        /// `key=value` changes for the screen; values are parsed as JSON when possible
        #[arg(long = "set", requires = "step")]
        changes: Vec<String>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    config.context("Failed to load configuration")
}

/// Parse `key=value`, reading the value as JSON and falling back to a string
fn parse_change(change: &str) -> anyhow::Result<(String, Value)> {
    let Some((key, raw)) = change.split_once('=') else {
        bail!("Expected key=value, got '{change}'");
    };
    let value =
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.trim().to_string(), value))
}

/// Per-call TTS options from the `speak` flags
fn speak_options(
    voice: Option<String>,
    style: Option<String>,
    emotion: Option<String>,
    pace: Option<String>,
) -> OptionsMap {
    [
        (OptionKey::Voice, voice),
        (OptionKey::Style, style),
        (OptionKey::Emotion, emotion),
        (OptionKey::Pace, pace),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| (key.as_str().to_string(), Value::String(v))))
    .collect()
}

fn set_up(config: AppConfig, output: PathBuf) -> anyhow::Result<Integration> {
    let host = Arc::new(WavFileHost::new(output));
    let port: Arc<dyn HostTtsPort> = Arc::<WavFileHost>::clone(&host);
    let integration = Integration::setup(config, port)?;
    host.attach(integration.tts());
    Ok(integration)
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;
    if cli.verbose > 0 {
        config.logging.filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Validate { api_key, name } => {
            let api_key = api_key
                .or_else(|| config.entry.api_key_str().map(str::to_string))
                .unwrap_or_default();
            let flow = SetupFlow::new(config.endpoints.clone());
            let input = UserInput {
                api_key,
                name,
                ..UserInput::default()
            };

            match flow.submit(input).await {
                Ok(entry) => println!("✅ API key valid, entry \"{}\" can be created", entry.title),
                Err(e) => {
                    println!("❌ {} ({e})", e.code());
                    std::process::exit(1);
                },
            }
        },

        Commands::Entities => {
            let integration = set_up(config, PathBuf::from("speech.wav"))?;
            println!("📦 Entities:");
            for entity in integration.entities() {
                println!("   {:<32} {}", entity.entity_id, entity.name);
            }
        },

        Commands::Chat {
            messages,
            mut conversation_id,
            language,
        } => {
            let integration = set_up(config, PathBuf::from("speech.wav"))?;
            let agent = integration.conversation();

            for message in messages {
                println!("💬 {message}");
                let result = agent
                    .process(ConversationInput {
                        text: message,
                        language: language.clone(),
                        conversation_id: conversation_id.clone(),
                    })
                    .await;

                match result.response {
                    ConversationResponse::Speech { text } => println!("🤖 {text}\n"),
                    ConversationResponse::Error { code, message } => {
                        println!("❌ {}: {message}\n", code.as_str());
                    },
                }
                conversation_id = result.conversation_id;
            }

            if let Some(id) = conversation_id {
                println!("🧵 Conversation: {id}");
            }
        },

        Commands::Speak {
            message,
            output,
            voice,
            style,
            emotion,
            pace,
            language,
        } => {
            let integration = set_up(config, output.clone())?;
            let options = speak_options(voice, style, emotion, pace);

            let audio = integration
                .tts()
                .get_tts_audio(&message, language.as_deref(), &options)
                .await?;
            tokio::fs::write(&output, &audio.data)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "🔊 Wrote {} bytes of {} to {}",
                audio.data.len(),
                audio.format,
                output.display()
            );
        },

        Commands::Transcribe { input, language } => {
            let integration = set_up(config, PathBuf::from("speech.wav"))?;
            let Some(stt) = integration.stt() else {
                bail!("Speech-to-text is not configured for this entry");
            };

            let pcm = audio::read_wav(&input, &language)?;
            let result = stt
                .process_audio_stream(&pcm.metadata, stream::iter(pcm.chunks()))
                .await;

            match result.result {
                SpeechResultState::Success => println!("📝 {}", result.text),
                SpeechResultState::Error => {
                    println!("❌ Transcription failed");
                    std::process::exit(1);
                },
            }
        },

        Commands::Service {
            name,
            payload,
            output,
        } => {
            let payload: Value =
                serde_json::from_str(&payload).context("Payload is not valid JSON")?;
            let integration = set_up(config, output.clone())?;
            integration.services().call(&name, payload).await?;
            println!("✅ {name} done");
            if name == "speak_with_style" {
                println!("🔊 Audio written to {}", output.display());
            }
        },

        Commands::Settings { step, changes } => {
            let mut flow = OptionsFlow::new(&config.options);

            let Some(step) = step else {
                println!("⚙️  Settings menu:");
                for step in flow.menu() {
                    println!("   {}", step.as_str());
                }
                println!();
                println!("{}", serde_json::to_string_pretty(&config.effective_settings())?);
                return Ok(());
            };
            let Some(step) = OptionsStep::from_id(&step) else {
                bail!("Unknown settings screen '{step}'");
            };

            if changes.is_empty() {
                println!("{}", serde_json::to_string_pretty(&flow.form(step))?);
            } else {
                let input = changes
                    .iter()
                    .map(|c| parse_change(c))
                    .collect::<anyhow::Result<OptionsMap>>()?;
                let stored = flow.submit(step, &input);
                println!("📋 Stored options ([options] in config.toml):");
                println!("{}", serde_json::to_string_pretty(&stored)?);
            }
        },
    }

    Ok(())
}
