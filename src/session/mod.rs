//! Speech-capture session layer.
//!
//! [`SessionManager`] wraps exactly one [`crate::engine::SpeechEngine`]
//! instance with a lifecycle (start / stop / reset / shutdown) and an
//! accumulation buffer, turning the engine's asynchronous, unreliable event
//! stream into a stable transcript:
//!
//! * [`TranscriptState`] merges streaming partial/final batches into
//!   committed segments plus a replaceable pending tail.
//! * [`SessionManager`] runs the state machine around the engine, including
//!   noise-floor filtering, graceful degradation when no engine exists, and
//!   automatic recovery when the engine terminates without being asked to.

pub mod manager;
pub mod transcript;

pub use manager::SessionManager;
pub use transcript::TranscriptState;
