//! Property-based tests for settings resolution, speech styling and history
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::catalog::{CONTEXT_WINDOW, MAX_HISTORY_ENTRIES, MAX_TEXT_LENGTH};
use domain::{
    ConversationHistory, EffectiveSettings, OptionKey, OptionsMap, SYSTEM_PREAMBLE, SpeechStyle,
    format_dialogue, retain_recognized, truncate_message,
};
use proptest::prelude::*;
use serde_json::Value;

// ============================================================================
// Settings Property Tests
// ============================================================================

mod settings_tests {
    use super::*;

    fn unrecognised_key() -> impl Strategy<Value = String> {
        "[a-z_]{1,24}".prop_filter("must not be a recognised key", |k| {
            OptionKey::from_key(k).is_none()
        })
    }

    proptest! {
        #[test]
        fn unrecognised_keys_never_survive(
            keys in proptest::collection::vec(unrecognised_key(), 0..8),
            value in any::<i64>()
        ) {
            let overrides: OptionsMap = keys
                .iter()
                .map(|k| (k.clone(), Value::from(value)))
                .collect();

            let settings = EffectiveSettings::resolve(&overrides);
            prop_assert_eq!(&settings, &EffectiveSettings::default());
            prop_assert!(retain_recognized(&overrides).is_empty());
        }

        #[test]
        fn resolving_rendered_settings_is_identity(
            voice in "[A-Z][a-z]{2,10}",
            max_tokens in 1u32..10_000,
            context in 0usize..50,
            streaming in any::<bool>()
        ) {
            let mut overrides = OptionsMap::new();
            overrides.insert("voice".into(), voice.clone().into());
            overrides.insert("conversation_max_tokens".into(), max_tokens.into());
            overrides.insert("conversation_context_length".into(), context.into());
            overrides.insert("streaming".into(), streaming.into());

            let settings = EffectiveSettings::resolve(&overrides);
            prop_assert_eq!(&settings.voice, &voice);
            prop_assert_eq!(settings.conversation_max_tokens, max_tokens);

            let again = EffectiveSettings::resolve(&settings.to_options());
            prop_assert_eq!(again, settings);
        }

        #[test]
        fn string_values_for_numeric_keys_fall_back(text in ".*") {
            let mut overrides = OptionsMap::new();
            overrides.insert("stt_sample_rate".into(), Value::String(text));

            let settings = EffectiveSettings::resolve(&overrides);
            prop_assert_eq!(settings.stt_sample_rate, 16_000);
        }
    }
}

// ============================================================================
// Speech Style Property Tests
// ============================================================================

mod speech_style_tests {
    use super::*;

    proptest! {
        #[test]
        fn neutral_style_never_changes_message(message in ".*") {
            let style = SpeechStyle::default();
            prop_assert_eq!(style.enhance(&message), message);
        }

        #[test]
        fn styled_message_ends_with_original(
            style in prop::sample::select(domain::catalog::SPEECH_STYLES),
            emotion in prop::sample::select(domain::catalog::EMOTIONS),
            message in "[a-zA-Z ]{0,64}"
        ) {
            let enhanced = SpeechStyle::new(style, emotion, "normal").enhance(&message);
            prop_assert!(enhanced.ends_with(&message));
            if style != "natural" || emotion != "neutral" {
                prop_assert!(enhanced.starts_with("Say "));
                let suffix = format!(": {message}");
                prop_assert!(enhanced.ends_with(&suffix));
            }
        }

        #[test]
        fn truncation_never_exceeds_limit(message in "\\PC{0,200}", limit in 0usize..150) {
            let (clipped, was_clipped) = truncate_message(&message, limit);
            let count = message.chars().count();

            prop_assert!(clipped.chars().count() <= limit);
            prop_assert_eq!(was_clipped, count > limit);
            prop_assert!(message.starts_with(clipped.as_ref()));
        }
    }

    #[test]
    fn truncation_at_default_limit() {
        let message = "z".repeat(MAX_TEXT_LENGTH * 2);
        let (clipped, was_clipped) = truncate_message(&message, MAX_TEXT_LENGTH);
        assert!(was_clipped);
        assert_eq!(clipped.chars().count(), MAX_TEXT_LENGTH);
    }
}

// ============================================================================
// Conversation History Property Tests
// ============================================================================

mod history_tests {
    use super::*;

    proptest! {
        #[test]
        fn history_never_exceeds_cap(exchanges in 0usize..80) {
            let mut history = ConversationHistory::new();
            for i in 0..exchanges {
                history.record_exchange(format!("q{i}"), format!("a{i}"));
                prop_assert!(history.len() <= MAX_HISTORY_ENTRIES);
            }
            prop_assert_eq!(history.len(), (exchanges * 2).min(MAX_HISTORY_ENTRIES));
        }

        #[test]
        fn prompt_fits_window_or_is_reset(
            answer_len in 0usize..40_000,
            utterance in "[a-z ]{1,40}"
        ) {
            let mut history = ConversationHistory::new();
            history.record_exchange("question", "a".repeat(answer_len));

            let prompt = history.build_prompt(10, &utterance);
            let reset = format!("{SYSTEM_PREAMBLE}\nUser: {utterance}");
            prop_assert!(prompt.chars().count() <= CONTEXT_WINDOW || prompt == reset);
            prop_assert!(prompt.starts_with(SYSTEM_PREAMBLE));
            let last_line = format!("User: {utterance}");
            prop_assert!(prompt.ends_with(&last_line));
        }
    }
}

// ============================================================================
// Multi-speaker Property Tests
// ============================================================================

mod dialogue_tests {
    use super::*;

    proptest! {
        #[test]
        fn every_unlabelled_line_gets_cycled_speaker(
            lines in proptest::collection::vec("[a-z ]{0,20}", 1..12),
            speaker_count in 2usize..5
        ) {
            let speakers: Vec<String> = (0..speaker_count).map(|i| format!("S{i}")).collect();
            let message = lines.join("\n");

            let formatted = format_dialogue(&message, &speakers);
            let out: Vec<&str> = formatted.split('\n').collect();
            prop_assert_eq!(out.len(), lines.len());
            for (i, (line, original)) in out.iter().zip(&lines).enumerate() {
                let expected = format!("{}: {original}", speakers[i % speaker_count]);
                prop_assert_eq!(*line, expected.as_str());
            }
        }

        #[test]
        fn labelled_lines_are_untouched(
            lines in proptest::collection::vec("[a-z]{1,8}: [a-z ]{0,20}", 1..8)
        ) {
            let speakers = vec!["A".to_string(), "B".to_string()];
            let message = lines.join("\n");
            prop_assert_eq!(format_dialogue(&message, &speakers), message);
        }
    }
}
