//! Multi-speaker dialogue formatting

/// Label unlabelled lines of `message` with speakers in cycling order
///
/// Lines already containing `:` are treated as labelled and kept as-is;
/// they do not advance the speaker rotation. With fewer than two speakers
/// the message is returned unchanged.
///
/// # Examples
///
/// ```
/// use domain::format_dialogue;
///
/// let speakers = vec!["Alice".to_string(), "Bob".to_string()];
/// assert_eq!(
///     format_dialogue("Hi\nHello\nHow are you?", &speakers),
///     "Alice: Hi\nBob: Hello\nAlice: How are you?"
/// );
/// ```
pub fn format_dialogue(message: &str, speakers: &[String]) -> String {
    if speakers.len() < 2 {
        return message.to_string();
    }

    let mut next = 0usize;
    message
        .split('\n')
        .map(|line| {
            if line.contains(':') {
                line.to_string()
            } else {
                let speaker = &speakers[next % speakers.len()];
                next += 1;
                format!("{speaker}: {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
