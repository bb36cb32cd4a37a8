//! OpenAI speech endpoint implementation.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::audio::{SpeechRequest, SpeechResponse, TextToSpeechProvider, Voice};
use crate::error::{Result, TtsError};

use super::client::OpenAI;

/// Wire format for the `/audio/speech` request body.
#[derive(Debug, Clone, Serialize)]
struct OpenAISpeechRequest {
    pub model: String,
    pub input: String,
    pub voice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
}

impl From<&SpeechRequest> for OpenAISpeechRequest {
    fn from(request: &SpeechRequest) -> Self {
        Self {
            model: request.model.clone(),
            input: request.input.clone(),
            voice: request.voice.id.clone(),
            response_format: Some(request.response_format.as_str().to_owned()),
            speed: request.speed,
        }
    }
}

#[async_trait]
impl TextToSpeechProvider for OpenAI {
    async fn speech(&self, request: &SpeechRequest) -> Result<SpeechResponse> {
        let url = self.speech_url();
        let body = OpenAISpeechRequest::from(request);

        debug!(model = %body.model, voice = %body.voice, chars = body.input.len(), "sending speech request");

        let response = self
            .build_request(&url)
            .json(&body)
            .send()
            .await
            .map_err(TtsError::from)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status.as_u16(), &error_text).into());
        }

        let audio = response.bytes().await.map_err(TtsError::from)?.to_vec();

        debug!(bytes = audio.len(), "received audio payload");

        Ok(SpeechResponse::new(audio, request.response_format))
    }
}

impl OpenAI {
    /// List the voices the OpenAI speech endpoint supports.
    #[must_use]
    pub fn available_voices() -> Vec<Voice> {
        vec![
            Voice::new("alloy").description("A neutral, balanced voice"),
            Voice::new("ash").description("A warm, gentle voice"),
            Voice::new("ballad").description("A soft, melodic voice"),
            Voice::new("coral").description("A clear, professional voice"),
            Voice::new("echo").description("A crisp, energetic voice"),
            Voice::new("fable").description("An expressive, storytelling voice"),
            Voice::new("onyx").description("A deep, authoritative voice"),
            Voice::new("nova").description("A friendly, conversational voice"),
            Voice::new("sage").description("A calm, wise voice"),
            Voice::new("shimmer").description("A bright, optimistic voice"),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::audio::AudioFormat;

    mod wire_request {
        use super::*;

        #[test]
        fn serializes_required_fields() {
            let req = SpeechRequest::new("tts-1-hd", "Are you ready? Let's begin!", "nova");
            let wire = OpenAISpeechRequest::from(&req);
            let json = serde_json::to_value(&wire).unwrap();

            assert_eq!(json["model"], "tts-1-hd");
            assert_eq!(json["input"], "Are you ready? Let's begin!");
            assert_eq!(json["voice"], "nova");
            assert_eq!(json["response_format"], "mp3");
        }

        #[test]
        fn skips_speed_when_unset() {
            let req = SpeechRequest::new("tts-1", "Test", "alloy");
            let wire = OpenAISpeechRequest::from(&req);
            let json = serde_json::to_string(&wire).unwrap();

            assert!(!json.contains("speed"));
        }

        #[test]
        fn includes_speed_when_set() {
            let req = SpeechRequest::new("tts-1", "Test", "alloy").speed(1.5);
            let wire = OpenAISpeechRequest::from(&req);
            let json = serde_json::to_value(&wire).unwrap();

            assert!((json["speed"].as_f64().unwrap() - 1.5).abs() < 0.001);
        }

        #[test]
        fn carries_non_default_format() {
            let req = SpeechRequest::new("tts-1", "Test", "alloy").format(AudioFormat::Opus);
            let wire = OpenAISpeechRequest::from(&req);
            let json = serde_json::to_value(&wire).unwrap();

            assert_eq!(json["response_format"], "opus");
        }

        #[test]
        fn handles_unicode_input() {
            let req = SpeechRequest::new("tts-1-hd", "¡Bienvenidos! こんにちは", "nova");
            let wire = OpenAISpeechRequest::from(&req);
            let json = serde_json::to_value(&wire).unwrap();

            assert_eq!(json["input"], "¡Bienvenidos! こんにちは");
        }
    }

    mod voices {
        use super::*;

        #[test]
        fn lists_all_openai_voices() {
            let voices = OpenAI::available_voices();
            assert_eq!(voices.len(), 10);
        }

        #[test]
        fn contains_nova() {
            let voices = OpenAI::available_voices();
            assert!(voices.iter().any(|v| v.id == "nova"));
        }

        #[test]
        fn all_voices_have_descriptions() {
            for voice in OpenAI::available_voices() {
                assert!(voice.description.is_some(), "voice {} has no description", voice.id);
            }
        }
    }
}
