//! Integration tests for CLI
//!
//! These tests verify CLI functionality without running actual commands,
//! but instead test the command parsing and structure.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

// Mock CLI structure for testing (mirrors main.rs)
#[derive(Parser)]
#[command(name = "gemini-assist")]
#[command(author, version, about = "Gemini conversation, TTS and STT from the command line", long_about = None)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    Validate {
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    Entities,
    Chat {
        #[arg(required = true)]
        messages: Vec<String>,
        #[arg(long)]
        conversation_id: Option<String>,
        #[arg(short, long)]
        language: Option<String>,
    },
    Speak {
        message: String,
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
    Transcribe {
        input: PathBuf,
        #[arg(short, long, default_value = "en-US")]
        language: String,
    },
    Service {
        name: String,
        #[arg(default_value = "{}")]
        payload: String,
        #[arg(short, long, default_value = "speech.wav")]
        output: PathBuf,
    },
    Settings {
        #[arg(long)]
        step: Option<String>,
        #[arg(long = "set", requires = "step")]
        changes: Vec<String>,
    },
}

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_validate_command() {
    let cli = parse_args(&["gemini-assist", "validate", "--api-key", "AIza-test"]).unwrap();
    if let Commands::Validate { api_key, name } = cli.command {
        assert_eq!(api_key.as_deref(), Some("AIza-test"));
        assert!(name.is_none());
    } else {
        panic!("Expected Validate command");
    }
}

#[test]
fn cli_parses_entities_command() {
    let cli = parse_args(&["gemini-assist", "entities"]).unwrap();
    assert!(matches!(cli.command, Commands::Entities));
}

#[test]
fn cli_parses_multi_turn_chat() {
    let cli = parse_args(&[
        "gemini-assist",
        "chat",
        "Hello",
        "And the weather?",
        "--conversation-id",
        "abc",
    ])
    .unwrap();
    if let Commands::Chat {
        messages,
        conversation_id,
        language,
    } = cli.command
    {
        assert_eq!(messages, vec!["Hello", "And the weather?"]);
        assert_eq!(conversation_id.as_deref(), Some("abc"));
        assert!(language.is_none());
    } else {
        panic!("Expected Chat command");
    }
}

#[test]
fn cli_chat_requires_a_message() {
    assert!(parse_args(&["gemini-assist", "chat"]).is_err());
}

#[test]
fn cli_parses_speak_with_style_flags() {
    let cli = parse_args(&[
        "gemini-assist",
        "speak",
        "Dinner is ready",
        "--voice",
        "Puck",
        "--style",
        "cheerful",
        "--pace",
        "slow",
        "-o",
        "dinner.wav",
    ])
    .unwrap();
    if let Commands::Speak {
        message,
        output,
        voice,
        style,
        emotion,
        pace,
        ..
    } = cli.command
    {
        assert_eq!(message, "Dinner is ready");
        assert_eq!(output, PathBuf::from("dinner.wav"));
        assert_eq!(voice.as_deref(), Some("Puck"));
        assert_eq!(style.as_deref(), Some("cheerful"));
        assert!(emotion.is_none());
        assert_eq!(pace.as_deref(), Some("slow"));
    } else {
        panic!("Expected Speak command");
    }
}

#[test]
fn cli_speak_defaults_output() {
    let cli = parse_args(&["gemini-assist", "speak", "Hi"]).unwrap();
    if let Commands::Speak { output, .. } = cli.command {
        assert_eq!(output, PathBuf::from("speech.wav"));
    } else {
        panic!("Expected Speak command");
    }
}

#[test]
fn cli_parses_transcribe_with_default_language() {
    let cli = parse_args(&["gemini-assist", "transcribe", "hello.wav"]).unwrap();
    if let Commands::Transcribe { input, language } = cli.command {
        assert_eq!(input, PathBuf::from("hello.wav"));
        assert_eq!(language, "en-US");
    } else {
        panic!("Expected Transcribe command");
    }
}

#[test]
fn cli_parses_service_call() {
    let cli = parse_args(&[
        "gemini-assist",
        "service",
        "set_default_voice",
        r#"{"voice": "Kore"}"#,
    ])
    .unwrap();
    if let Commands::Service { name, payload, .. } = cli.command {
        assert_eq!(name, "set_default_voice");
        assert_eq!(payload, r#"{"voice": "Kore"}"#);
    } else {
        panic!("Expected Service command");
    }
}

#[test]
fn cli_service_payload_defaults_to_empty_object() {
    let cli = parse_args(&["gemini-assist", "service", "clear_conversation"]).unwrap();
    if let Commands::Service { payload, .. } = cli.command {
        assert_eq!(payload, "{}");
    } else {
        panic!("Expected Service command");
    }
}

#[test]
fn cli_parses_settings_changes() {
    let cli = parse_args(&[
        "gemini-assist",
        "settings",
        "--step",
        "tts",
        "--set",
        "voice=Kore",
        "--set",
        "pace=fast",
    ])
    .unwrap();
    if let Commands::Settings { step, changes } = cli.command {
        assert_eq!(step.as_deref(), Some("tts"));
        assert_eq!(changes, vec!["voice=Kore", "pace=fast"]);
    } else {
        panic!("Expected Settings command");
    }
}

#[test]
fn cli_settings_changes_require_a_step() {
    assert!(parse_args(&["gemini-assist", "settings", "--set", "voice=Kore"]).is_err());
}

#[test]
fn cli_parses_global_config_after_subcommand() {
    let cli = parse_args(&["gemini-assist", "entities", "--config", "/etc/gemini.toml"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("/etc/gemini.toml")));
}

#[test]
fn cli_parses_verbosity_levels() {
    let cli = parse_args(&["gemini-assist", "-vvv", "entities"]).unwrap();
    assert_eq!(cli.verbose, 3);
}

#[test]
fn cli_rejects_unknown_command() {
    assert!(parse_args(&["gemini-assist", "backup"]).is_err());
}
