//! Session manager — lifecycle and failure recovery around one speech
//! engine.
//!
//! # State machine
//!
//! ```text
//! Idle ──start()──▶ Listening
//!
//! Listening ──stop() … End──────────────▶ Idle        (user-stop path)
//! Listening ──End (unsolicited)─────────▶ Idle ──delay──▶ start() ──▶ Listening
//! Listening ──Error(no-speech)──────────▶ Idle        (no recovery here)
//! Listening ──Error(other)──────────────▶ Listening   (End drives the change)
//! ```
//!
//! The auto-restart is a spawned, abortable `tokio::time::sleep` task.
//! `stop()` and [`SessionManager::shutdown`] cancel it deterministically so
//! a stopped session can never be silently revived.
//!
//! Nothing here returns errors to the caller: faults degrade to no-ops or
//! log lines, and `transcript()` / `is_listening()` stay well-defined
//! throughout.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::CaptureConfig;
use crate::engine::{EngineError, EngineEvent, ErrorCode, SpeechEngine};

use super::transcript::TranscriptState;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Mutable state shared between the caller-facing handle, the event loop,
/// and the restart task.
#[derive(Debug, Default)]
struct SessionState {
    /// Accumulated transcript for this session.
    transcript: TranscriptState,
    /// Whether the engine is currently believed to be capturing.
    listening: bool,
    /// Set by `stop()` / `shutdown()`; cleared by `start()`.  Gates the
    /// unsolicited-end recovery path.
    stop_requested: bool,
}

/// Thread-safe handle to [`SessionState`].  Lock for short critical
/// sections only; never held across an `.await`.
type SharedSession = Arc<Mutex<SessionState>>;

// ---------------------------------------------------------------------------
// SessionManager
// ---------------------------------------------------------------------------

/// Owns the binding to one speech engine and turns its event stream into a
/// stable, resumable transcript with user-controlled start/stop semantics.
///
/// Cheap to clone — all state lives behind `Arc`s — so one clone can be
/// consumed by [`run`](Self::run) on the event loop while others serve the
/// caller-facing control surface.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use tokio::sync::mpsc;
/// use speech_session::{CaptureConfig, EngineEvent, SessionManager, SpeechEngine};
///
/// # async fn example(engine: Arc<dyn SpeechEngine>) {
/// let (event_tx, event_rx) = mpsc::channel::<EngineEvent>(32);
/// // `event_tx` goes to the engine implementation at construction time.
/// # let _ = event_tx;
///
/// let manager = SessionManager::new(Some(engine), CaptureConfig::default());
/// tokio::spawn(manager.clone().run(event_rx));
///
/// manager.start();
/// // ... UI polls manager.transcript() / manager.is_listening() ...
/// manager.stop();
/// # }
/// ```
#[derive(Clone)]
pub struct SessionManager {
    shared: SharedSession,
    /// `None` when the host platform offers no recognition capability; all
    /// control operations then degrade to no-ops.
    engine: Option<Arc<dyn SpeechEngine>>,
    config: CaptureConfig,
    /// Pending auto-restart task, if any.  Aborted on `stop()`/`shutdown()`.
    restart: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SessionManager {
    /// Create a session manager around `engine`.
    ///
    /// Passing `None` models a host without any recognition capability: the
    /// absence is reported once here at warning level, and every later
    /// control call is a safe no-op so the rest of the application can
    /// degrade to manual text entry.
    pub fn new(engine: Option<Arc<dyn SpeechEngine>>, config: CaptureConfig) -> Self {
        if engine.is_none() {
            log::warn!("session: no speech engine available; capture controls are disabled");
        }
        Self {
            shared: Arc::new(Mutex::new(SessionState::default())),
            engine,
            config,
            restart: Arc::new(Mutex::new(None)),
        }
    }

    // -----------------------------------------------------------------------
    // Control surface
    // -----------------------------------------------------------------------

    /// Request the engine begin producing recognition events.
    ///
    /// No-op when already listening or when no engine is available.  Never
    /// panics and never surfaces an error to the caller.
    pub fn start(&self) {
        let Some(engine) = &self.engine else {
            return;
        };

        {
            let st = self.shared.lock().unwrap();
            if st.listening {
                log::debug!("session: start() while already listening — ignored");
                return;
            }
        }

        match engine.start() {
            Ok(()) => {
                let mut st = self.shared.lock().unwrap();
                st.listening = true;
                st.stop_requested = false;
                log::debug!("session: listening");
            }
            Err(EngineError::AlreadyActive) => {
                // Race with a still-winding-down engine session — the
                // engine is in fact capturing, so just track that.
                let mut st = self.shared.lock().unwrap();
                st.listening = true;
                st.stop_requested = false;
                log::debug!("session: engine already active on start()");
            }
            Err(e) => {
                log::error!("session: engine start failed: {e}");
            }
        }
    }

    /// Request the engine stop producing events.
    ///
    /// Records the user-stop intent (so the unsolicited-end recovery never
    /// fires afterwards) and cancels any pending auto-restart.  No-op when
    /// neither listening nor awaiting a restart.
    pub fn stop(&self) {
        let had_restart = self.cancel_restart();

        {
            let mut st = self.shared.lock().unwrap();
            if !st.listening && !had_restart {
                return;
            }
            st.stop_requested = true;
            st.listening = false;
        }

        if let Some(engine) = &self.engine {
            engine.stop();
        }
        log::debug!("session: stop requested");
    }

    /// Clear the accumulated transcript.  Listening state is untouched.
    pub fn reset(&self) {
        self.shared.lock().unwrap().transcript.clear();
    }

    /// Tear the session down: cancel any pending restart and force-stop the
    /// engine regardless of state.
    pub fn shutdown(&self) {
        self.cancel_restart();

        {
            let mut st = self.shared.lock().unwrap();
            st.stop_requested = true;
            st.listening = false;
        }

        if let Some(engine) = &self.engine {
            engine.stop();
        }
        log::debug!("session: shut down");
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    /// The full transcript: committed segments space-joined, followed by
    /// the pending interim tail when one exists.
    pub fn transcript(&self) -> String {
        self.shared.lock().unwrap().transcript.transcript()
    }

    /// `true` iff the engine is currently believed to be capturing.
    pub fn is_listening(&self) -> bool {
        self.shared.lock().unwrap().listening
    }

    /// Snapshot of the transcript state (committed + pending parts).
    pub fn transcript_state(&self) -> TranscriptState {
        self.shared.lock().unwrap().transcript.clone()
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    /// Consume engine events until the channel closes.
    ///
    /// Spawn this on the runtime with a clone of the manager.  Events are
    /// processed strictly one at a time in arrival order, so committed
    /// segments always reflect temporal utterance order and no locking
    /// beyond the shared-state mutex is needed.
    pub async fn run(self, mut event_rx: mpsc::Receiver<EngineEvent>) {
        while let Some(event) = event_rx.recv().await {
            self.handle_event(event);
        }
        log::info!("session: engine event channel closed, event loop exiting");
    }

    /// Reduce a single engine event into the session state.
    fn handle_event(&self, event: EngineEvent) {
        match event {
            EngineEvent::Results(batch) => {
                let mut st = self.shared.lock().unwrap();
                st.transcript.apply_batch(
                    &batch,
                    self.config.confidence_floor,
                    self.config.default_confidence,
                );
            }
            EngineEvent::Error(ErrorCode::NoSpeech) => {
                // Absence of audio is not a fault worth recovering from at
                // this layer; a higher layer decides whether to start again.
                self.shared.lock().unwrap().listening = false;
                log::debug!("session: no speech detected, going idle");
            }
            EngineEvent::Error(code) => {
                // Diagnostic only — the engine delivers End afterwards and
                // that event drives the state transition.
                log::error!("session: engine error: {code}");
            }
            EngineEvent::End => self.handle_end(),
        }
    }

    /// Handle the engine's `End` event: go idle, then recover when the end
    /// was unsolicited and continuous mode is on.
    fn handle_end(&self) {
        let should_restart = {
            let mut st = self.shared.lock().unwrap();
            st.listening = false;
            !st.stop_requested && self.config.continuous
        };

        if should_restart {
            log::debug!(
                "session: unsolicited end, restarting in {}ms",
                self.config.restart_delay_ms
            );
            self.schedule_restart();
        } else {
            log::debug!("session: ended");
        }
    }

    // -----------------------------------------------------------------------
    // Auto-restart
    // -----------------------------------------------------------------------

    /// Spawn the delayed restart task, replacing (and aborting) any task
    /// already pending.
    fn schedule_restart(&self) {
        let Some(engine) = self.engine.clone() else {
            return;
        };
        let shared = Arc::clone(&self.shared);
        let delay = Duration::from_millis(self.config.restart_delay_ms);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            // The user may have stopped while we slept and lost the abort
            // race; honor the intent rather than reviving the session.
            if shared.lock().unwrap().stop_requested {
                return;
            }

            match engine.start() {
                Ok(()) => {
                    shared.lock().unwrap().listening = true;
                    log::debug!("session: auto-restarted");
                }
                Err(EngineError::AlreadyActive) => {
                    // Harmless race with a very fast caller-driven restart.
                    shared.lock().unwrap().listening = true;
                    log::debug!("session: auto-restart raced an active engine");
                }
                Err(e) => {
                    log::warn!("session: auto-restart failed: {e}");
                }
            }
        });

        let mut slot = self.restart.lock().unwrap();
        if let Some(old) = slot.replace(handle) {
            old.abort();
        }
    }

    /// Abort the pending restart task, if any.  Returns whether one existed.
    fn cancel_restart(&self) -> bool {
        match self.restart.lock().unwrap().take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
