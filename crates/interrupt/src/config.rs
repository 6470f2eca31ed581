//! Configuration types for Interrupt encoding.
//!
//! This module provides configuration structures that control how records
//! are encoded and how decoded trees are printed. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! Configuration is resolved once, at startup, and handed to the
//! [`Encoder`](crate::Encoder) explicitly.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining encoder and output settings.
//! - [`EncoderConfig`] - Controls frame capture and the context depth cap.
//! - [`OutputConfig`] - Controls the JSON layout of decoded trees.
//!
//! # Example
//!
//! ```
//! # use interrupt::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.encoder().capture_call_site());
//! assert_eq!(config.encoder().max_context_depth(), 32);
//! ```

use serde::Deserialize;

/// Default depth cap for context values.
pub const DEFAULT_MAX_CONTEXT_DEPTH: usize = 32;

/// Top-level application configuration combining encoder and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Encoder configuration section.
    #[serde(default)]
    encoder: EncoderConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified encoder and output configurations.
    ///
    /// # Arguments
    ///
    /// * `encoder` - Encoder settings.
    /// * `output` - Decoded tree output settings.
    pub fn new(encoder: EncoderConfig, output: OutputConfig) -> Self {
        Self { encoder, output }
    }

    /// Returns the encoder configuration.
    pub fn encoder(&self) -> &EncoderConfig {
        &self.encoder
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Encoder configuration.
///
/// Fields that are not set fall back to their defaults: call-site capture
/// on, and a context depth cap of [`DEFAULT_MAX_CONTEXT_DEPTH`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Use the record's call site as its frame listing when no frames were given.
    capture_call_site: bool,

    /// Nesting depth past which context values are replaced by a placeholder.
    max_context_depth: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            capture_call_site: true,
            max_context_depth: DEFAULT_MAX_CONTEXT_DEPTH,
        }
    }
}

impl EncoderConfig {
    /// Creates a new [`EncoderConfig`].
    ///
    /// # Arguments
    ///
    /// * `capture_call_site` - Fall back to the record's call site for the frame listing.
    /// * `max_context_depth` - Depth cap for the context serializer.
    pub fn new(capture_call_site: bool, max_context_depth: usize) -> Self {
        Self {
            capture_call_site,
            max_context_depth,
        }
    }

    /// Returns whether the call site is used when the record has no frames.
    pub fn capture_call_site(&self) -> bool {
        self.capture_call_site
    }

    /// Returns the context depth cap.
    pub fn max_context_depth(&self) -> usize {
        self.max_context_depth
    }
}

/// Output configuration for decoded trees.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print decoded JSON.
    pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`].
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Returns whether decoded JSON is pretty-printed.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}
