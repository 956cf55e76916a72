//! Converter Client
//!
//! HTTP client for the slide conversion service. Uploads a LaTeX
//! document plus any referenced media and gets back a link to the
//! rendered PPTX or PDF.

pub mod client;
pub mod error;

pub use client::{
    ConversionOutcome, ConversionRequest, ConverterClient, Language, MediaAttachment, MediaKind,
    OutputFormat,
};
pub use error::{ConversionError, ConversionResult};

use std::time::Duration;

/// Configuration for the converter service
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("CONVERTER_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            // conversions shell out to a renderer on the service side,
            // so allow far more than a typical request round trip
            timeout: Duration::from_secs(60),
        }
    }
}
