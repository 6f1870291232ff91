use reqwest::blocking::multipart::{Form, Part};

use crate::config::RecognizerConfig;
use crate::error::ComparisonError;
use crate::pipeline::runtime::ComparisonEngine;
use crate::types::ComparisonResult;

const DEFAULT_LANGUAGE: &str = "en";
const AUDIO_MIME: &str = "audio/wav";

/// Blocking client for the external speech recognizer HTTP API.
///
/// The recognizer is the only I/O-bound, fallible collaborator of the
/// comparison pipeline; its failures never enter the comparison core.
pub struct TranscriptionClient {
    api_url: String,
    http: reqwest::blocking::Client,
}

impl TranscriptionClient {
    pub fn new(config: &RecognizerConfig) -> Result<Self, ComparisonError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ComparisonError::transcription("building http client", e))?;
        Ok(Self {
            api_url: config.api_url.clone(),
            http,
        })
    }

    /// Upload audio bytes and return the recognizer's transcript.
    pub fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
        language: &str,
    ) -> Result<String, ComparisonError> {
        tracing::info!(
            file_name,
            language,
            audio_bytes = audio.len(),
            "transcribing audio"
        );

        let file_part = Part::bytes(audio)
            .file_name(file_name.to_owned())
            .mime_str(AUDIO_MIME)
            .map_err(|e| ComparisonError::transcription("preparing audio upload", e))?;
        let form = Form::new()
            .part("file", file_part)
            .text("language", language.to_owned())
            .text("word_timestamps", "true");

        let response = self
            .http
            .post(&self.api_url)
            .multipart(form)
            .send()
            .map_err(|e| ComparisonError::transcription("calling recognizer api", e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, api_url = %self.api_url, "recognizer returned an error");
            return Err(ComparisonError::transcription(
                "recognizer api response",
                format!("unexpected status {status}"),
            ));
        }

        let body: serde_json::Value = response
            .json()
            .map_err(|e| ComparisonError::transcription("reading recognizer response", e))?;
        let transcript = extract_transcript(&body)?;
        tracing::info!(transcript = transcript.as_str(), "transcription complete");
        Ok(transcript)
    }
}

fn extract_transcript(body: &serde_json::Value) -> Result<String, ComparisonError> {
    body.get("text")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            ComparisonError::transcription(
                "parsing recognizer response",
                "missing or non-string 'text' field",
            )
        })
}

/// Orchestration entry point: transcribe an audio payload, then compare the
/// transcript against the expected text.
pub struct PracticeSession {
    client: TranscriptionClient,
    engine: ComparisonEngine,
}

impl PracticeSession {
    pub fn new(client: TranscriptionClient, engine: ComparisonEngine) -> Self {
        Self { client, engine }
    }

    pub fn practice(
        &self,
        audio: Vec<u8>,
        file_name: &str,
        language: Option<&str>,
        expected_text: &str,
    ) -> Result<ComparisonResult, ComparisonError> {
        tracing::info!(expected = expected_text, "starting practice comparison");
        let transcript =
            self.client
                .transcribe(audio, file_name, language.unwrap_or(DEFAULT_LANGUAGE))?;
        let result = self.engine.compare_texts(&transcript, expected_text)?;
        tracing::info!(accuracy = result.accuracy, "practice comparison complete");
        Ok(result)
    }
}
