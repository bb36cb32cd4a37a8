//! The built-in Reading Club instruction table.

use narrate::prelude::*;

/// The fifteen voice instructions the app ships with, in playback-flow order.
/// The identifier becomes the output filename stem.
pub fn instruction_table() -> PromptTable {
    PromptTable::from_pairs([
        (
            "welcome",
            "Welcome to Reading Club! Let's learn the alphabet together!",
        ),
        ("click-to-start", "Tap anywhere to start learning!"),
        ("great-job", "Great job! You're doing amazing!"),
        ("try-again", "Almost there! Let's try that again!"),
        ("perfect", "Perfect! That was excellent!"),
        ("next-letter", "Wonderful! Let's move to the next letter!"),
        ("say-sound", "Now say this sound:"),
        ("listen-carefully", "Listen carefully to this sound"),
        ("your-turn", "Your turn! Say the sound now!"),
        ("too-quiet", "I can't hear you! Speak a bit louder!"),
        ("good-volume", "Good! That's the right volume!"),
        ("all-done", "Amazing! You've completed all the letters!"),
        ("ready", "Are you ready? Let's begin!"),
        ("keep-going", "Keep going! You're doing great!"),
        ("celebrate", "Yay! You did it! Time to celebrate!"),
    ])
    .expect("built-in instruction table is valid")
}
