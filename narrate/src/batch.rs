//! Sequential batch synthesis.
//!
//! The runner walks a [`PromptTable`] in order, calls the provider once per
//! entry, and writes each audio payload to `<output_dir>/<id>.<ext>`. A
//! failing entry is recorded in the report and never aborts the batch; the
//! only fatal setup step is creating the output directory itself.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::audio::{AudioFormat, SpeechRequest, TextToSpeechProvider, Voice};
use crate::error::{Error, Result};
use crate::openai::TTS_1_HD;

/// Fixed cost estimate printed in the batch summary, in US dollars.
///
/// Fifteen short prompts at the `tts-1-hd` per-character rate come out to
/// roughly this figure.
pub const ESTIMATED_COST_USD: f64 = 0.15;

/// One prompt to synthesize: an identifier (used as the output filename stem)
/// and the text to speak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptEntry {
    /// Output filename stem. Unique within a table, non-empty.
    pub id: String,
    /// The sentence to synthesize. Non-empty.
    pub text: String,
}

impl PromptEntry {
    /// Create a new prompt entry.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// An ordered, immutable table of prompts.
///
/// Construction validates the table invariants: identifiers are unique and
/// non-empty, texts are non-empty. Entries keep their insertion order; the
/// batch processes them exactly in that order.
#[derive(Debug, Clone, Default)]
pub struct PromptTable {
    entries: Vec<PromptEntry>,
}

impl PromptTable {
    /// Build a table from entries, validating the invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTable`] on an empty identifier, empty text, or
    /// a duplicate identifier.
    pub fn new(entries: Vec<PromptEntry>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for entry in &entries {
            if entry.id.is_empty() {
                return Err(Error::invalid_table("empty identifier"));
            }
            if entry.text.is_empty() {
                return Err(Error::invalid_table(format!("empty text for '{}'", entry.id)));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(Error::invalid_table(format!(
                    "duplicate identifier '{}'",
                    entry.id
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Build a table from `(identifier, text)` pairs.
    ///
    /// # Errors
    ///
    /// Same invariants as [`PromptTable::new`].
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(id, text)| PromptEntry::new(id, text))
                .collect(),
        )
    }

    /// The entries in table order.
    #[must_use]
    pub fn entries(&self) -> &[PromptEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Options for one batch run: where the files go and the fixed synthesis
/// parameters applied to every entry.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory the audio files are written into. Created if absent.
    pub output_dir: PathBuf,
    /// TTS model used for every entry.
    pub model: String,
    /// Voice used for every entry.
    pub voice: Voice,
    /// Output encoding, also the file extension.
    pub format: AudioFormat,
}

impl BatchOptions {
    /// Create options with the stock parameters: `tts-1-hd`, the `nova`
    /// voice, MP3 output.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            model: TTS_1_HD.to_owned(),
            voice: Voice::new("nova"),
            format: AudioFormat::Mp3,
        }
    }

    /// Set the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the voice.
    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<Voice>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Set the output format.
    #[must_use]
    pub const fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }
}

/// A file written for a successful entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Full path of the output file.
    pub path: PathBuf,
    /// Payload size in bytes.
    pub bytes: usize,
}

/// Outcome of one entry: the file written, or a textual failure reason.
///
/// Request construction, network transfer, API rejection, and disk errors
/// all collapse into the same textual reason; the batch only needs enough
/// to log and count.
#[derive(Debug, Clone)]
pub struct EntryOutcome {
    /// The entry's identifier.
    pub id: String,
    /// Success payload or failure reason.
    pub result: std::result::Result<WrittenFile, String>,
}

impl EntryOutcome {
    /// Whether this entry produced a file.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Report of one completed batch: every entry's outcome, in table order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    outcomes: Vec<EntryOutcome>,
}

impl BatchReport {
    /// Per-entry outcomes in table order.
    #[must_use]
    pub fn outcomes(&self) -> &[EntryOutcome] {
        &self.outcomes
    }

    /// Number of entries that produced a file.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of entries that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Total number of entries attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// The fixed cost estimate for the run.
    #[must_use]
    pub const fn estimated_cost(&self) -> f64 {
        ESTIMATED_COST_USD
    }
}

/// Run the batch, discarding per-entry notifications.
///
/// # Errors
///
/// Fails only if the output directory cannot be created. Per-entry failures
/// are recorded in the report, never returned as `Err`.
pub async fn run(
    provider: &impl TextToSpeechProvider,
    table: &PromptTable,
    options: &BatchOptions,
) -> Result<BatchReport> {
    run_with_observer(provider, table, options, |_| {}).await
}

/// Run the batch, invoking `on_entry` after each entry completes.
///
/// Entries are processed strictly sequentially in table order: each network
/// round-trip and file write finishes before the next entry starts. The
/// observer fires once per entry, letting a caller report progress while the
/// batch is still running.
///
/// # Errors
///
/// Fails only if the output directory cannot be created.
pub async fn run_with_observer(
    provider: &impl TextToSpeechProvider,
    table: &PromptTable,
    options: &BatchOptions,
    mut on_entry: impl FnMut(&EntryOutcome),
) -> Result<BatchReport> {
    std::fs::create_dir_all(&options.output_dir)?;
    debug!(dir = %options.output_dir.display(), "output directory ready");

    let mut outcomes = Vec::with_capacity(table.len());

    for entry in table.entries() {
        let outcome = synthesize_entry(provider, entry, options).await;

        match &outcome.result {
            Ok(file) => {
                info!(id = %entry.id, bytes = file.bytes, "generated audio file");
            }
            Err(reason) => {
                warn!(id = %entry.id, %reason, "entry failed, continuing batch");
            }
        }

        on_entry(&outcome);
        outcomes.push(outcome);
    }

    Ok(BatchReport { outcomes })
}

/// Synthesize one entry and write its payload. Every failure is folded into
/// the outcome's textual reason.
async fn synthesize_entry(
    provider: &impl TextToSpeechProvider,
    entry: &PromptEntry,
    options: &BatchOptions,
) -> EntryOutcome {
    let request = SpeechRequest::new(&options.model, &entry.text, options.voice.clone())
        .format(options.format);

    let result = match provider.speech(&request).await {
        Ok(response) => {
            let path = options
                .output_dir
                .join(format!("{}.{}", entry.id, options.format.extension()));
            match std::fs::write(&path, &response.audio) {
                Ok(()) => Ok(WrittenFile {
                    path,
                    bytes: response.audio.len(),
                }),
                Err(err) => Err(err.to_string()),
            }
        }
        Err(err) => Err(err.to_string()),
    };

    EntryOutcome {
        id: entry.id.clone(),
        result,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::audio::SpeechResponse;
    use crate::error::TtsError;
    use async_trait::async_trait;
    use std::collections::HashSet;

    /// Test provider that fails for a configured set of inputs.
    struct MockProvider {
        fail_inputs: HashSet<String>,
    }

    impl MockProvider {
        fn always_ok() -> Self {
            Self {
                fail_inputs: HashSet::new(),
            }
        }

        fn failing_on(inputs: &[&str]) -> Self {
            Self {
                fail_inputs: inputs.iter().map(|s| (*s).to_owned()).collect(),
            }
        }
    }

    #[async_trait]
    impl TextToSpeechProvider for MockProvider {
        async fn speech(&self, request: &SpeechRequest) -> Result<SpeechResponse> {
            if self.fail_inputs.contains(&request.input) {
                return Err(TtsError::http_status(500, "synthesis failed").into());
            }
            Ok(SpeechResponse::new(
                request.input.clone().into_bytes(),
                request.response_format,
            ))
        }
    }

    fn two_entry_table() -> PromptTable {
        PromptTable::from_pairs([
            ("welcome", "Welcome to Reading Club!"),
            ("ready", "Are you ready? Let's begin!"),
        ])
        .unwrap()
    }

    mod prompt_table {
        use super::*;

        #[test]
        fn preserves_insertion_order() {
            let table = two_entry_table();
            let ids: Vec<_> = table.entries().iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, ["welcome", "ready"]);
        }

        #[test]
        fn rejects_duplicate_identifier() {
            let result = PromptTable::from_pairs([("a", "one"), ("a", "two")]);
            assert!(matches!(result, Err(Error::InvalidTable(_))));
        }

        #[test]
        fn rejects_empty_identifier() {
            let result = PromptTable::from_pairs([("", "one")]);
            assert!(matches!(result, Err(Error::InvalidTable(_))));
        }

        #[test]
        fn rejects_empty_text() {
            let result = PromptTable::from_pairs([("a", "")]);
            assert!(matches!(result, Err(Error::InvalidTable(_))));
        }
    }

    mod runner {
        use super::*;

        #[tokio::test]
        async fn all_success_writes_one_file_per_entry() {
            let dir = assert_fs::TempDir::new().unwrap();
            let provider = MockProvider::always_ok();
            let table = two_entry_table();
            let options = BatchOptions::new(dir.path());

            let report = run(&provider, &table, &options).await.unwrap();

            assert_eq!(report.succeeded(), 2);
            assert_eq!(report.failed(), 0);
            assert!(dir.path().join("welcome.mp3").exists());
            assert!(dir.path().join("ready.mp3").exists());
        }

        #[tokio::test]
        async fn failure_is_isolated_to_its_entry() {
            let dir = assert_fs::TempDir::new().unwrap();
            let provider = MockProvider::failing_on(&["Are you ready? Let's begin!"]);
            let table = two_entry_table();
            let options = BatchOptions::new(dir.path());

            let report = run(&provider, &table, &options).await.unwrap();

            assert_eq!(report.succeeded(), 1);
            assert_eq!(report.failed(), 1);
            assert!(dir.path().join("welcome.mp3").exists());
            assert!(!dir.path().join("ready.mp3").exists());
        }

        #[tokio::test]
        async fn later_entries_still_run_after_a_failure() {
            let dir = assert_fs::TempDir::new().unwrap();
            let provider = MockProvider::failing_on(&["Welcome to Reading Club!"]);
            let table = two_entry_table();
            let options = BatchOptions::new(dir.path());

            let report = run(&provider, &table, &options).await.unwrap();

            assert!(!report.outcomes()[0].is_success());
            assert!(report.outcomes()[1].is_success());
            assert!(dir.path().join("ready.mp3").exists());
        }

        #[tokio::test]
        async fn counts_always_sum_to_total() {
            let dir = assert_fs::TempDir::new().unwrap();
            let provider = MockProvider::failing_on(&["Are you ready? Let's begin!"]);
            let table = two_entry_table();
            let options = BatchOptions::new(dir.path());

            let report = run(&provider, &table, &options).await.unwrap();

            assert_eq!(report.succeeded() + report.failed(), report.total());
            assert_eq!(report.total(), table.len());
        }

        #[tokio::test]
        async fn observer_fires_once_per_entry_in_order() {
            let dir = assert_fs::TempDir::new().unwrap();
            let provider = MockProvider::always_ok();
            let table = two_entry_table();
            let options = BatchOptions::new(dir.path());

            let mut seen = Vec::new();
            run_with_observer(&provider, &table, &options, |outcome| {
                seen.push(outcome.id.clone());
            })
            .await
            .unwrap();

            assert_eq!(seen, ["welcome", "ready"]);
        }

        #[tokio::test]
        async fn directory_creation_is_idempotent() {
            let dir = assert_fs::TempDir::new().unwrap();
            let provider = MockProvider::always_ok();
            let table = two_entry_table();
            let options = BatchOptions::new(dir.path().join("audio").join("instructions"));

            run(&provider, &table, &options).await.unwrap();
            let report = run(&provider, &table, &options).await.unwrap();

            assert_eq!(report.succeeded(), 2);
        }

        #[tokio::test]
        async fn output_uses_configured_format_extension() {
            let dir = assert_fs::TempDir::new().unwrap();
            let provider = MockProvider::always_ok();
            let table = two_entry_table();
            let options = BatchOptions::new(dir.path()).with_format(AudioFormat::Wav);

            run(&provider, &table, &options).await.unwrap();

            assert!(dir.path().join("welcome.wav").exists());
            assert!(!dir.path().join("welcome.mp3").exists());
        }

        #[tokio::test]
        async fn payload_is_written_verbatim() {
            let dir = assert_fs::TempDir::new().unwrap();
            let provider = MockProvider::always_ok();
            let table = PromptTable::from_pairs([("hello", "hi there")]).unwrap();
            let options = BatchOptions::new(dir.path());

            run(&provider, &table, &options).await.unwrap();

            let written = std::fs::read(dir.path().join("hello.mp3")).unwrap();
            assert_eq!(written, b"hi there");
        }
    }
}
