//! Gemini text-to-speech over the REST `generateContent` endpoint.
//!
//! The request asks for an `AUDIO` response modality with a prebuilt voice;
//! the response carries base64 PCM in the first candidate's inline data.

use crate::{NarrationConfig, WavInfo, encode_wav};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use dreadcast_core::Story;
use dreadcast_error::{AdapterError, AdapterErrorKind, DreadcastResult};
use dreadcast_interface::{AudioArtifact, AudioArtifactBuilder, Narrator};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

//
// ─── WIRE TYPES ─────────────────────────────────────────────────────────────────
//

/// Body of a `generateContent` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns; TTS uses a single text turn
    pub contents: Vec<Content>,
    /// Output configuration
    pub generation_config: GenerationConfig,
}

/// A content turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Parts of the turn
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A text or inline-data part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Binary payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Base64 binary payload with its MIME type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// e.g. `audio/L16;codec=pcm;rate=24000`
    #[serde(default)]
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

/// Generation settings requesting audio output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Requested modalities (`["AUDIO"]`)
    pub response_modalities: Vec<String>,
    /// Voice selection
    pub speech_config: SpeechConfig,
}

/// Voice selection wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    /// Voice configuration
    pub voice_config: VoiceConfig,
}

/// Voice configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    /// Named prebuilt voice
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

/// A prebuilt voice by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    /// Voice name (e.g., "Kore")
    pub voice_name: String,
}

/// Body of a `generateContent` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// A generated candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content
    #[serde(default)]
    pub content: Option<Content>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentRequest {
    /// Build a TTS request for `text` spoken by `voice`.
    pub fn speech(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(text.into()),
                    inline_data: None,
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.into(),
                        },
                    },
                },
            },
        }
    }
}

impl GenerateContentResponse {
    /// First inline audio payload of the first candidate.
    pub fn audio(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }
}

impl InlineData {
    /// Sample rate stated in the MIME type (`...;rate=24000`), if any.
    pub fn sample_rate(&self) -> Option<u32> {
        self.mime_type
            .split(';')
            .filter_map(|param| param.trim().strip_prefix("rate="))
            .find_map(|rate| rate.parse().ok())
    }

    /// Decode the base64 payload.
    pub fn decode(&self) -> DreadcastResult<Vec<u8>> {
        STANDARD.decode(self.data.as_bytes()).map_err(|e| {
            AdapterError::new(AdapterErrorKind::Audio(format!(
                "Base64 decode error: {}",
                e
            )))
            .into()
        })
    }
}

/// Text sent to the TTS model for a story.
///
/// With `include_title` the title is read first, followed by a pause;
/// otherwise only the body is narrated.
pub fn narration_text(story: &Story, include_title: bool) -> String {
    if include_title {
        format!("{}.\n\n{}", story.title().trim_end_matches('.'), story.body())
    } else {
        story.body().to_string()
    }
}

//
// ─── CLIENT ─────────────────────────────────────────────────────────────────────
//

/// Gemini TTS narrator writing `<audio_dir>/<title>_<id>.wav`.
#[derive(Clone)]
pub struct GeminiNarrator {
    client: Client,
    api_key: String,
    config: NarrationConfig,
    audio_dir: PathBuf,
}

impl std::fmt::Debug for GeminiNarrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiNarrator")
            .field("model", &self.config.model)
            .field("voice", &self.config.voice)
            .field("audio_dir", &self.audio_dir)
            .finish_non_exhaustive()
    }
}

impl GeminiNarrator {
    /// Creates a new narrator.
    ///
    /// The API key comes from `config.api_key`, falling back to the
    /// `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No API key is configured
    /// - The HTTP client cannot be initialized
    #[instrument(skip_all, fields(model = %config.model, voice = %config.voice))]
    pub fn new(config: NarrationConfig, audio_dir: impl Into<PathBuf>) -> DreadcastResult<Self> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| AdapterError::new(AdapterErrorKind::MissingApiKey))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AdapterError::new(AdapterErrorKind::InvalidRequest(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self {
            client,
            api_key,
            config,
            audio_dir: audio_dir.into(),
        })
    }

    /// Override the voice for this narrator.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.config.voice = voice.into();
        self
    }

    /// Directory audio files are written to.
    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Call the API and return raw PCM plus its sample rate.
    async fn request_pcm(&self, text: String) -> DreadcastResult<(Vec<u8>, u32)> {
        let request = GenerateContentRequest::speech(text, self.config.voice.clone());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AdapterError::new(AdapterErrorKind::Network(e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AdapterError::new(AdapterErrorKind::Http {
                status_code: status,
                message: error_text,
            })
            .into());
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            AdapterError::new(AdapterErrorKind::InvalidResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        let inline = body.audio().ok_or_else(|| {
            let reason = body
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            AdapterError::new(AdapterErrorKind::InvalidResponse(format!(
                "Response contained no audio ({})",
                reason
            )))
        })?;

        let pcm = inline.decode()?;
        let sample_rate = inline.sample_rate().unwrap_or(self.config.sample_rate);
        debug!(bytes = pcm.len(), sample_rate, mime = %inline.mime_type, "Received audio");

        Ok((pcm, sample_rate))
    }
}

#[async_trait]
impl Narrator for GeminiNarrator {
    #[instrument(skip(self, story), fields(id = %story.id(), model = %self.config.model))]
    async fn synthesize(&self, story: &Story) -> DreadcastResult<AudioArtifact> {
        let (pcm, sample_rate) = self
            .request_pcm(narration_text(story, self.config.include_title))
            .await?;
        if pcm.is_empty() {
            return Err(AdapterError::new(AdapterErrorKind::Audio(
                "TTS returned empty audio".to_string(),
            ))
            .into());
        }

        let wav = encode_wav(&pcm, sample_rate, 1, 16)?;
        let info = WavInfo::parse(&wav)?;
        let path = self.audio_dir.join(format!("{}.wav", story.artifact_stem()));
        write_artifact(&path, &wav).await?;

        info!(
            path = %path.display(),
            duration_secs = info.duration_secs(),
            "Saved narration audio"
        );

        AudioArtifactBuilder::default()
            .path(path)
            .duration_secs(info.duration_secs())
            .sample_rate(sample_rate)
            .size_bytes(wav.len() as u64)
            .build()
            .map_err(|e| AdapterError::new(AdapterErrorKind::Audio(e.to_string())).into())
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

/// Write an artifact via temp file + rename, creating parent directories.
async fn write_artifact(path: &Path, bytes: &[u8]) -> DreadcastResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            AdapterError::new(AdapterErrorKind::Audio(format!(
                "Failed to create {}: {}",
                parent.display(),
                e
            )))
        })?;
    }

    let temp_path = path.with_extension("wav.tmp");
    tokio::fs::write(&temp_path, bytes).await.map_err(|e| {
        AdapterError::new(AdapterErrorKind::Audio(format!(
            "Failed to write {}: {}",
            temp_path.display(),
            e
        )))
    })?;
    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        AdapterError::new(AdapterErrorKind::Audio(format!(
            "Failed to move audio into place at {}: {}",
            path.display(),
            e
        )))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_request_shape() {
        let request = GenerateContentRequest::speech("Boo.", "Kore");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "Boo.");
        assert!(json["contents"][0]["parts"][0].get("inlineData").is_none());
        assert_eq!(json["generationConfig"]["responseModalities"][0], "AUDIO");
        assert_eq!(
            json["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
                ["voiceName"],
            "Kore"
        );
    }

    #[test]
    fn test_response_audio_extraction() {
        let body = r#"{
            "candidates": [{
                "content": {"parts": [{"inlineData": {
                    "mimeType": "audio/L16;codec=pcm;rate=24000",
                    "data": "AAABAAIA"
                }}]},
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let audio = response.audio().unwrap();

        assert_eq!(audio.sample_rate(), Some(24_000));
        assert_eq!(audio.decode().unwrap(), vec![0, 0, 1, 0, 2, 0]);
    }

    #[test]
    fn test_response_without_audio() {
        let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(response.audio().is_none());
    }

    #[test]
    fn test_sample_rate_missing_from_mime() {
        let inline = InlineData {
            mime_type: "audio/pcm".to_string(),
            data: String::new(),
        };
        assert_eq!(inline.sample_rate(), None);
    }

    fn door_story() -> Story {
        serde_json::from_str(
            r#"{"id":"abc","title":"The Door.","body":"Something knocked.","score":1,"created_at":"2025-10-01T00:00:00Z"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_narration_text_reads_title_then_body() {
        assert_eq!(
            narration_text(&door_story(), true),
            "The Door.\n\nSomething knocked."
        );
    }

    #[test]
    fn test_narration_text_body_only() {
        assert_eq!(narration_text(&door_story(), false), "Something knocked.");
    }

    #[tokio::test]
    async fn test_write_artifact_leaves_no_temp_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("story_1.wav");
        let wav = encode_wav(&[0u8; 480], 24_000, 1, 16).unwrap();

        write_artifact(&path, &wav).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), wav);
        assert!(!path.with_extension("wav.tmp").exists());
    }

    #[test]
    fn test_configured_key_builds_narrator() {
        let config = NarrationConfig {
            api_key: Some("test-key".to_string()),
            include_title: false,
            ..NarrationConfig::default()
        };
        let narrator = GeminiNarrator::new(config, "audio").unwrap();
        assert_eq!(narrator.audio_dir(), Path::new("audio"));
        assert_eq!(narrator.provider_name(), "gemini");
    }
}
