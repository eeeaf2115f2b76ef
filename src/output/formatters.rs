//! Formatting utilities for terminal output

/// Gallows drawings for 0 through 6 wrong guesses
const GALLOWS: [[&str; 7]; 7] = [
    [
        "  +---+  ", "  |   |  ", "      |  ", "      |  ", "      |  ", "      |  ", "=========",
    ],
    [
        "  +---+  ", "  |   |  ", "  O   |  ", "      |  ", "      |  ", "      |  ", "=========",
    ],
    [
        "  +---+  ", "  |   |  ", "  O   |  ", "  |   |  ", "      |  ", "      |  ", "=========",
    ],
    [
        "  +---+  ", "  |   |  ", "  O   |  ", " /|   |  ", "      |  ", "      |  ", "=========",
    ],
    [
        "  +---+  ", "  |   |  ", "  O   |  ", " /|\\  |  ", "      |  ", "      |  ", "=========",
    ],
    [
        "  +---+  ", "  |   |  ", "  O   |  ", " /|\\  |  ", " /    |  ", "      |  ", "=========",
    ],
    [
        "  +---+  ", "  |   |  ", "  O   |  ", " /|\\  |  ", " / \\  |  ", "      |  ", "=========",
    ],
];

/// Gallows lines for the given number of wrong guesses
///
/// Counts past the last stage show the full figure.
#[must_use]
pub fn gallows(wrong_guesses: u32) -> &'static [&'static str; 7] {
    let stage = (wrong_guesses as usize).min(GALLOWS.len() - 1);
    &GALLOWS[stage]
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Remaining time as a bar
#[must_use]
pub fn time_bar(remaining_secs: u32, limit_secs: u32, width: usize) -> String {
    create_progress_bar(f64::from(remaining_secs), f64::from(limit_secs), width)
}

/// Urgency band of the countdown, used for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUrgency {
    Relaxed,
    Hurry,
    Critical,
}

/// Classify remaining time: critical at 10s or less, hurry at 20s or less
#[must_use]
pub const fn time_urgency(remaining_secs: u32) -> TimeUrgency {
    match remaining_secs {
        0..=10 => TimeUrgency::Critical,
        11..=20 => TimeUrgency::Hurry,
        _ => TimeUrgency::Relaxed,
    }
}

/// Guessed letters as a space separated, sorted list
#[must_use]
pub fn letter_list(letters: &[char]) -> String {
    let mut sorted = letters.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
