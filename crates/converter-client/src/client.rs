use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::error::{ConversionError, ConversionResult};
use crate::ConverterConfig;

/// Slide language accepted by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Russian,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Russian => "russian",
        }
    }
}

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pptx,
    Pdf,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pptx => "pptx",
            OutputFormat::Pdf => "pdf",
        }
    }
}

/// Kind of media file referenced by the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Media file uploaded alongside the document
#[derive(Debug, Clone)]
pub struct MediaAttachment {
    pub filename: String,
    pub kind: MediaKind,
    pub data: Vec<u8>,
}

/// One document conversion job
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub filename: String,
    pub document: Vec<u8>,
    pub language: Language,
    pub format: OutputFormat,
    pub media: Vec<MediaAttachment>,
}

/// Wire shape of the service reply
#[derive(Debug, Clone, Deserialize)]
struct ConvertResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    download_url: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// A finished conversion ready to download
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub filename: String,
    pub download_url: String,
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct ConverterClient {
    client: reqwest::Client,
    base_url: String,
}

impl ConverterClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    pub fn with_defaults() -> Self {
        let config = ConverterConfig::default();
        Self::new(config.base_url, config.timeout)
    }

    /// Convert a LaTeX document into slides or a PDF
    pub async fn convert(&self, request: ConversionRequest) -> ConversionResult<ConversionOutcome> {
        let filename = request.filename.clone();
        let response = self
            .client
            .post(format!("{}/convert", self.base_url))
            .multipart(build_form(request))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ConversionError::ServiceUnavailable(format!(
                "Status: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let parsed: ConvertResponse = serde_json::from_str(&body).map_err(|e| {
            ConversionError::InvalidResponse(format!("{}: {}", e, snippet(&body)))
        })?;

        let outcome = resolve_outcome(parsed)?;
        tracing::debug!("converted {} -> {}", filename, outcome.filename);
        Ok(outcome)
    }

    /// Fetch a converted document by its server-side filename
    pub async fn download(&self, filename: &str) -> ConversionResult<Vec<u8>> {
        let response = self.client.get(self.download_url(filename)).send().await?;

        if !response.status().is_success() {
            return Err(ConversionError::ServiceUnavailable(format!(
                "Status: {}",
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// URL a converted document is served from
    pub fn download_url(&self, filename: &str) -> String {
        format!("{}/download/{}", self.base_url, filename)
    }

    /// Check the service is reachable
    pub async fn health(&self) -> ConversionResult<bool> {
        let response = self.client.get(&self.base_url).send().await?;
        Ok(response.status().is_success())
    }
}

/// Assemble the multipart upload the service expects: the document under
/// `tex_file`, then numbered `media_<i>` parts with matching
/// `media_type_<i>` fields.
fn build_form(request: ConversionRequest) -> Form {
    let mut form = Form::new()
        .part(
            "tex_file",
            Part::bytes(request.document).file_name(request.filename),
        )
        .text("language", request.language.as_str())
        .text("format", request.format.as_str());

    for (index, media) in request.media.into_iter().enumerate() {
        form = form
            .part(
                format!("media_{}", index),
                Part::bytes(media.data).file_name(media.filename),
            )
            .text(format!("media_type_{}", index), media.kind.as_str());
    }

    form
}

/// Map a parsed reply to an outcome or a typed rejection
fn resolve_outcome(parsed: ConvertResponse) -> ConversionResult<ConversionOutcome> {
    if !parsed.success {
        let reason = parsed
            .error
            .or(parsed.message)
            .unwrap_or_else(|| "no reason given".to_string());
        return Err(ConversionError::Rejected(reason));
    }

    match (parsed.filename, parsed.download_url) {
        (Some(filename), Some(download_url)) => Ok(ConversionOutcome {
            filename,
            download_url,
            message: parsed.message,
        }),
        _ => Err(ConversionError::InvalidResponse(
            "success reply missing filename or download_url".to_string(),
        )),
    }
}

/// First part of a body, for error messages
fn snippet(body: &str) -> &str {
    let end = body
        .char_indices()
        .take(120)
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_strings() {
        assert_eq!(Language::English.as_str(), "english");
        assert_eq!(Language::Russian.as_str(), "russian");
        assert_eq!(OutputFormat::Pptx.as_str(), "pptx");
        assert_eq!(OutputFormat::Pdf.as_str(), "pdf");
        assert_eq!(MediaKind::Image.as_str(), "image");
        assert_eq!(MediaKind::Video.as_str(), "video");
    }

    #[test]
    fn test_language_serde_matches_form_fields() {
        let json = serde_json::to_string(&Language::Russian).unwrap();
        assert_eq!(json, r#""russian""#);
        let parsed: OutputFormat = serde_json::from_str(r#""pdf""#).unwrap();
        assert_eq!(parsed, OutputFormat::Pdf);
        assert!(serde_json::from_str::<Language>(r#""klingon""#).is_err());
    }

    #[test]
    fn test_download_url_shape() {
        let client = ConverterClient::new(
            "http://localhost:5000".to_string(),
            Duration::from_secs(5),
        );
        assert_eq!(
            client.download_url("deck_abc123.pptx"),
            "http://localhost:5000/download/deck_abc123.pptx"
        );
    }

    #[test]
    fn test_success_reply_resolves_outcome() {
        let parsed: ConvertResponse = serde_json::from_str(
            r#"{
                "success": true,
                "message": "Conversion successful",
                "download_url": "/download/deck_abc123.pptx",
                "filename": "deck_abc123.pptx"
            }"#,
        )
        .unwrap();

        let outcome = resolve_outcome(parsed).unwrap();
        assert_eq!(outcome.filename, "deck_abc123.pptx");
        assert_eq!(outcome.download_url, "/download/deck_abc123.pptx");
        assert_eq!(outcome.message.as_deref(), Some("Conversion successful"));
    }

    #[test]
    fn test_rejection_carries_service_reason() {
        let parsed: ConvertResponse =
            serde_json::from_str(r#"{"success": false, "error": "No tex_file provided"}"#).unwrap();

        match resolve_outcome(parsed) {
            Err(ConversionError::Rejected(reason)) => {
                assert_eq!(reason, "No tex_file provided");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_success_without_filename_is_invalid() {
        let parsed: ConvertResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(
            resolve_outcome(parsed),
            Err(ConversionError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let short = snippet("plain body");
        assert_eq!(short, "plain body");
        let long: String = "é".repeat(200);
        assert_eq!(snippet(&long).chars().count(), 120);
    }
}
