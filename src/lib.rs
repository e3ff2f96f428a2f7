//! Continuous speech-capture session management.
//!
//! This crate is the core of a scripted mock-interview tool: it owns a live
//! recognition session against an externally-supplied speech engine, merges
//! the engine's streaming partial/final hypotheses into one coherent
//! transcript, filters low-confidence fragments, and recovers the session
//! when the engine terminates without being asked to.
//!
//! # Architecture
//!
//! ```text
//! caller ──start()/stop()/reset()──▶ SessionManager ──start/stop──▶ SpeechEngine
//!   ▲                                     │                            │
//!   └──── transcript() / is_listening() ──┘   ◀── Results/Error/End ───┘
//!                                                 (tokio mpsc channel)
//! ```
//!
//! * [`engine`] — the [`SpeechEngine`] seam, its event/error vocabulary,
//!   and the fixed per-session [`EngineSettings`].
//! * [`session`] — [`SessionManager`] (lifecycle + recovery state machine)
//!   and [`TranscriptState`] (committed segments + pending interim tail).
//! * [`config`] — [`CaptureConfig`] with TOML persistence.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use speech_session::{CaptureConfig, EngineEvent, SessionManager, SpeechEngine};
//!
//! # async fn example(engine: Arc<dyn SpeechEngine>) {
//! let (event_tx, event_rx) = mpsc::channel::<EngineEvent>(32);
//! // The platform engine implementation is constructed with `event_tx`.
//! # let _ = event_tx;
//!
//! let manager = SessionManager::new(Some(engine), CaptureConfig::default());
//! tokio::spawn(manager.clone().run(event_rx));
//!
//! manager.start();
//! // ... the UI polls manager.transcript() and manager.is_listening() ...
//! manager.stop();
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod session;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use config::{AppPaths, CaptureConfig};
pub use engine::{
    EngineError, EngineEvent, EngineSettings, ErrorCode, Hypothesis, SpeechEngine,
};
pub use session::{SessionManager, TranscriptState};
