//! OpenAI speech API client.
//!
//! This module provides integration with OpenAI's `/audio/speech` endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use narrate::openai::{OpenAI, OpenAIConfig};
//!
//! let client = OpenAI::new(OpenAIConfig::new("sk-..."))?;
//! let response = client.speech(&request).await?;
//! ```

mod client;
mod config;
mod speech;

pub use client::*;
pub use config::*;

/// High definition TTS model identifier - higher quality, higher latency.
pub const TTS_1_HD: &str = "tts-1-hd";
