//! Narrate - batch text-to-speech generation for instruction audio.
//!
//! This crate turns a fixed table of short prompts into audio files by
//! calling the OpenAI text-to-speech API once per entry and writing each
//! binary response to disk. The batch is strictly sequential; a failing
//! entry is recorded and skipped while the rest of the table still runs.

pub mod audio;
pub mod batch;
pub mod credential;
pub mod error;
pub mod openai;
pub mod prelude;

pub use error::{Error, Result, TtsError};
