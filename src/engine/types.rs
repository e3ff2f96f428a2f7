//! Event and error types shared between engine implementations and the
//! session layer.
//!
//! An engine delivers [`EngineEvent`]s over a `tokio::sync::mpsc` channel.
//! Every `Results` event is a *batch*: all hypotheses the engine has seen so
//! far in the current utterance window, each independently flagged final or
//! interim.  The session layer processes batches strictly in arrival order.

use thiserror::Error;

use crate::config::CaptureConfig;

// ---------------------------------------------------------------------------
// Hypothesis
// ---------------------------------------------------------------------------

/// A single recognition alternative.
///
/// `confidence` may be absent — some engines omit it for interim results.
/// Consumers substitute [`CaptureConfig::default_confidence`] in that case.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypothesis {
    /// The recognized text.
    pub text: String,
    /// Engine-reported confidence in `0.0..=1.0`, or `None` when the engine
    /// did not score this alternative.
    pub confidence: Option<f32>,
    /// `true` when the engine guarantees this text will not be revised by
    /// later events in the same utterance.
    pub is_final: bool,
}

impl Hypothesis {
    /// Build an interim (revisable) hypothesis.
    pub fn interim(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence: Some(confidence),
            is_final: false,
        }
    }

    /// Build a finalized (stable) hypothesis.
    pub fn finalized(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence: Some(confidence),
            is_final: true,
        }
    }

    /// Build a finalized hypothesis without a confidence score.
    pub fn finalized_unscored(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
            is_final: true,
        }
    }
}

// ---------------------------------------------------------------------------
// EngineEvent
// ---------------------------------------------------------------------------

/// Events an engine delivers to the session manager, in arrival order.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A batch of hypotheses for the current utterance window.
    Results(Vec<Hypothesis>),
    /// An engine-reported fault.  The engine is still expected to deliver a
    /// final [`EngineEvent::End`] afterwards.
    Error(ErrorCode),
    /// The engine stopped producing events — either because it was asked to
    /// stop or because the underlying capture terminated on its own.
    End,
}

// ---------------------------------------------------------------------------
// ErrorCode
// ---------------------------------------------------------------------------

/// Engine fault codes, mirroring the error vocabulary of platform
/// recognition services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorCode {
    /// No speech was detected during the listening window.  Transient; the
    /// session layer does not treat it as a fault worth auto-restarting.
    #[error("no-speech")]
    NoSpeech,

    /// Capture was aborted by the platform.
    #[error("aborted")]
    Aborted,

    /// The audio input device failed or disappeared.
    #[error("audio-capture")]
    AudioCapture,

    /// The recognition service could not be reached.
    #[error("network")]
    Network,

    /// Microphone permission was denied.
    #[error("not-allowed")]
    NotAllowed,

    /// Any other engine-specific code, passed through verbatim.
    #[error("{0}")]
    Other(String),
}

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

/// Failures of the fire-and-forget engine control calls.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// `start()` was called while the engine session is already active.
    ///
    /// Indicates a harmless race between an old session's `End` and a very
    /// fast restart — callers swallow it rather than surfacing a fault.
    #[error("engine is already capturing")]
    AlreadyActive,

    /// The engine could not begin capturing.
    #[error("engine start failed: {0}")]
    Start(String),
}

// ---------------------------------------------------------------------------
// EngineSettings
// ---------------------------------------------------------------------------

/// Fixed per-session engine configuration, handed to an engine once at
/// creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Locale tag, e.g. `"en-US"`.
    pub language: String,
    /// Keep capturing across utterance boundaries.
    pub continuous: bool,
    /// Deliver interim (revisable) hypotheses, not just finals.
    pub interim_results: bool,
    /// Maximum alternatives per result.
    pub max_alternatives: u32,
}

impl From<&CaptureConfig> for EngineSettings {
    fn from(config: &CaptureConfig) -> Self {
        Self {
            language: config.language.clone(),
            continuous: config.continuous,
            interim_results: config.interim_results,
            max_alternatives: config.max_alternatives,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
