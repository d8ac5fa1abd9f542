//! Speech style - natural-language delivery instructions for synthesis

use std::borrow::Cow;

use crate::catalog::{DEFAULT_EMOTION, DEFAULT_PACE, DEFAULT_STYLE};

/// Style, emotion and pace requested for one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechStyle {
    style: String,
    emotion: String,
    pace: String,
}

impl SpeechStyle {
    /// Create a style from its three tokens
    pub fn new(style: &str, emotion: &str, pace: &str) -> Self {
        Self {
            style: style.to_string(),
            emotion: emotion.to_string(),
            pace: pace.to_string(),
        }
    }

    /// Whether every token is at its neutral default
    pub fn is_neutral(&self) -> bool {
        self.style == DEFAULT_STYLE && self.emotion == DEFAULT_EMOTION && self.pace == DEFAULT_PACE
    }

    fn style_phrase(&self) -> Option<Cow<'static, str>> {
        let phrase = match self.style.as_str() {
            DEFAULT_STYLE => return None,
            "whisper" => "in a whisper",
            "dramatic" => "dramatically",
            "professional" => "in a professional tone",
            "friendly" => "in a friendly manner",
            "mysterious" => "mysteriously",
            "confident" => "confidently",
            other => return Some(Cow::Owned(format!("in a {other} way"))),
        };
        Some(Cow::Borrowed(phrase))
    }

    fn emotion_phrase(&self) -> Option<Cow<'static, str>> {
        let phrase = match self.emotion.as_str() {
            DEFAULT_EMOTION => return None,
            "happy" => "cheerfully",
            "excited" => "with excitement",
            "calm" => "calmly",
            "serious" => "seriously",
            other => return Some(Cow::Owned(format!("with {other}"))),
        };
        Some(Cow::Borrowed(phrase))
    }

    fn pace_phrase(&self) -> Option<&'static str> {
        match self.pace.as_str() {
            "very_slow" => Some("very slowly"),
            "slow" => Some("slowly"),
            "fast" => Some("quickly"),
            "very_fast" => Some("very quickly"),
            _ => None,
        }
    }

    /// Comma-joined delivery phrases, if any apply
    pub fn instruction(&self) -> Option<String> {
        let phrases: Vec<Cow<'static, str>> = [
            self.style_phrase(),
            self.emotion_phrase(),
            self.pace_phrase().map(Cow::Borrowed),
        ]
        .into_iter()
        .flatten()
        .collect();

        if phrases.is_empty() {
            None
        } else {
            Some(phrases.join(", "))
        }
    }

    /// Prefix `message` with the delivery instruction
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::SpeechStyle;
    ///
    /// let style = SpeechStyle::new("whisper", "happy", "slow");
    /// assert_eq!(
    ///     style.enhance("Good night"),
    ///     "Say in a whisper, cheerfully, slowly: Good night"
    /// );
    /// assert_eq!(
    ///     SpeechStyle::new("natural", "neutral", "normal").enhance("Hi"),
    ///     "Hi"
    /// );
    /// ```
    pub fn enhance(&self, message: &str) -> String {
        if self.is_neutral() {
            return message.to_string();
        }
        match self.instruction() {
            Some(instruction) => format!("Say {instruction}: {message}"),
            None => message.to_string(),
        }
    }
}

impl Default for SpeechStyle {
    fn default() -> Self {
        Self::new(DEFAULT_STYLE, DEFAULT_EMOTION, DEFAULT_PACE)
    }
}

/// Clip `message` to at most `max_chars` characters
///
/// Returns the possibly shortened message and whether it was clipped.
pub fn truncate_message(message: &str, max_chars: usize) -> (Cow<'_, str>, bool) {
    match message.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (Cow::Borrowed(&message[..byte_index]), true),
        None => (Cow::Borrowed(message), false),
    }
}
