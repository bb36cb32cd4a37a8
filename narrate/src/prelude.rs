//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use narrate::prelude::*;
//! ```

pub use crate::audio::{AudioFormat, SpeechRequest, SpeechResponse, TextToSpeechProvider, Voice};
pub use crate::batch::{
    BatchOptions, BatchReport, EntryOutcome, PromptEntry, PromptTable, WrittenFile,
    ESTIMATED_COST_USD,
};
pub use crate::credential::load_api_key;
pub use crate::error::{Error, Result, TtsError};
pub use crate::openai::{OpenAI, OpenAIConfig};
