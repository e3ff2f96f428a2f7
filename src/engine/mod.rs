//! Speech-recognition engine abstraction.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 SpeechEngine (trait)                    │
//! │                                                         │
//! │   start() / stop()          mpsc::Sender<EngineEvent>   │
//! │   (fire-and-forget)    ───▶ Results / Error / End       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! [`SpeechEngine`] is the injected seam between the session manager and the
//! platform capability that actually performs continuous speech-to-text.  An
//! implementation is constructed once per session with [`EngineSettings`]
//! and a `tokio::sync::mpsc::Sender<EngineEvent>`; control calls are
//! fire-and-forget and all recognition output flows back over the channel.
//!
//! The session layer holds `Option<Arc<dyn SpeechEngine>>` — `None` models
//! a host platform with no recognition capability at all, in which case the
//! session degrades to permanent no-ops rather than failing.

pub mod types;

pub use types::{EngineError, EngineEvent, EngineSettings, ErrorCode, Hypothesis};

// ---------------------------------------------------------------------------
// SpeechEngine trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to a continuous recognition engine.
///
/// # Contract
///
/// - `start` requests the engine begin producing [`EngineEvent`]s on the
///   channel it was constructed with.  Returns
///   [`EngineError::AlreadyActive`] when a session is already capturing.
/// - `stop` requests the engine halt.  The engine must still deliver one
///   final [`EngineEvent::End`] after a stop request, and is expected to
///   eventually deliver `End` after any [`EngineEvent::Error`] as well.
/// - Exactly one owner may drive these control calls at a time; the session
///   manager enforces this by owning the engine exclusively.
pub trait SpeechEngine: Send + Sync {
    /// Ask the engine to begin capturing and emitting events.
    fn start(&self) -> Result<(), EngineError>;

    /// Ask the engine to halt.  Fire-and-forget; the `End` event that
    /// follows drives the session state transition.
    fn stop(&self);
}

// Compile-time assertion: Arc<dyn SpeechEngine> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: std::sync::Arc<dyn SpeechEngine>) {}
};

// ---------------------------------------------------------------------------
// ScriptedEngine  (test-only)
// ---------------------------------------------------------------------------

/// A test double that records control calls and returns queued responses.
///
/// `start()` pops the next queued error, or succeeds when the queue is
/// empty.  Call counts let tests assert exactly how many times the session
/// manager drove each control operation.
#[cfg(test)]
pub struct ScriptedEngine {
    settings: EngineSettings,
    start_calls: std::sync::atomic::AtomicUsize,
    stop_calls: std::sync::atomic::AtomicUsize,
    queued_start_errors: std::sync::Mutex<std::collections::VecDeque<EngineError>>,
}

#[cfg(test)]
impl ScriptedEngine {
    /// Create a scripted engine whose `start()` always succeeds.
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            start_calls: std::sync::atomic::AtomicUsize::new(0),
            stop_calls: std::sync::atomic::AtomicUsize::new(0),
            queued_start_errors: std::sync::Mutex::new(std::collections::VecDeque::new()),
        }
    }

    /// Queue an error for the next `start()` call.  Subsequent calls pop
    /// further queued errors, then fall back to `Ok`.
    pub fn fail_next_start(&self, error: EngineError) {
        self.queued_start_errors.lock().unwrap().push_back(error);
    }

    /// Number of `start()` calls observed so far.
    pub fn start_count(&self) -> usize {
        self.start_calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Number of `stop()` calls observed so far.
    pub fn stop_count(&self) -> usize {
        self.stop_calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// The settings this engine was constructed with.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}

#[cfg(test)]
impl SpeechEngine for ScriptedEngine {
    fn start(&self) -> Result<(), EngineError> {
        self.start_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match self.queued_start_errors.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn stop(&self) {
        self.stop_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaptureConfig;

    fn settings() -> EngineSettings {
        EngineSettings::from(&CaptureConfig::default())
    }

    #[test]
    fn scripted_engine_counts_calls() {
        let engine = ScriptedEngine::new(settings());
        assert_eq!(engine.start_count(), 0);

        assert!(engine.start().is_ok());
        engine.stop();
        engine.stop();

        assert_eq!(engine.start_count(), 1);
        assert_eq!(engine.stop_count(), 2);
    }

    #[test]
    fn scripted_engine_pops_queued_errors_then_succeeds() {
        let engine = ScriptedEngine::new(settings());
        engine.fail_next_start(EngineError::AlreadyActive);

        assert!(matches!(
            engine.start().unwrap_err(),
            EngineError::AlreadyActive
        ));
        assert!(engine.start().is_ok());
    }

    #[test]
    fn scripted_engine_keeps_construction_settings() {
        let engine = ScriptedEngine::new(settings());
        assert_eq!(engine.settings().language, "en-US");
        assert_eq!(engine.settings().max_alternatives, 1);
    }

    #[test]
    fn arc_dyn_speech_engine_compiles() {
        // If this test compiles, the trait is object-safe.
        let engine: std::sync::Arc<dyn SpeechEngine> =
            std::sync::Arc::new(ScriptedEngine::new(settings()));
        let _ = engine.start();
    }
}
