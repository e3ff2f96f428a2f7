//! Transcript accumulation — merging streaming recognition batches into a
//! single coherent text.
//!
//! [`TranscriptState`] has two logical parts:
//!
//! * `committed` — ordered, append-only finalized segments.  Once a segment
//!   lands here it is immutable for the lifetime of the session.
//! * `pending` — the current best-guess interim tail, fully replaced on
//!   every batch, never appended to.
//!
//! Every batch — even one containing no finalized text — updates the
//! visible transcript immediately through `pending`, which is what gives
//! the caller low-latency feedback while the engine is still revising.

use crate::engine::Hypothesis;

// ---------------------------------------------------------------------------
// TranscriptState
// ---------------------------------------------------------------------------

/// Accumulated transcript for one capture session.
#[derive(Debug, Default, Clone)]
pub struct TranscriptState {
    /// Finalized segments in utterance order.  Append-only.
    committed: Vec<String>,
    /// Interim tail.  Replaced wholesale on every batch.
    pending: String,
}

impl TranscriptState {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one recognition batch into the transcript.
    ///
    /// For each hypothesis, in batch order:
    ///
    /// 1. Discard it when its effective confidence (engine-reported, or
    ///    `default_confidence` when absent) is at or below
    ///    `confidence_floor`.
    /// 2. Finals accumulate — trimmed, space-separated — into a single new
    ///    committed segment for the batch.
    /// 3. Interims concatenate with no separator: they are progressively
    ///    growing guesses of the same utterance, not independent segments.
    ///
    /// After the batch, `pending` is replaced by the (possibly empty)
    /// interim accumulation.
    pub fn apply_batch(
        &mut self,
        batch: &[Hypothesis],
        confidence_floor: f32,
        default_confidence: f32,
    ) {
        let mut finals = String::new();
        let mut interim = String::new();

        for hypothesis in batch {
            let confidence = hypothesis.confidence.unwrap_or(default_confidence);
            if confidence <= confidence_floor {
                continue;
            }

            if hypothesis.is_final {
                finals.push_str(hypothesis.text.trim());
                finals.push(' ');
            } else {
                interim.push_str(&hypothesis.text);
            }
        }

        let finals = finals.trim();
        if !finals.is_empty() {
            self.committed.push(finals.to_string());
        }
        self.pending = interim.trim().to_string();
    }

    /// The full transcript: committed segments joined by single spaces,
    /// followed by a space and the pending tail when one exists.
    pub fn transcript(&self) -> String {
        let committed = self.committed.join(" ");
        if self.pending.is_empty() {
            committed
        } else if committed.is_empty() {
            self.pending.clone()
        } else {
            format!("{} {}", committed, self.pending)
        }
    }

    /// The finalized segments, in utterance order.
    pub fn committed(&self) -> &[String] {
        &self.committed
    }

    /// The current interim tail (may be empty).
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Discard all accumulated text.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.pending.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Hypothesis;

    const FLOOR: f32 = 0.3;
    const DEFAULT_CONFIDENCE: f32 = 0.7;

    fn apply(state: &mut TranscriptState, batch: &[Hypothesis]) {
        state.apply_batch(batch, FLOOR, DEFAULT_CONFIDENCE);
    }

    // ---- Scenario A: single final hypothesis ---

    #[test]
    fn single_final_hypothesis_commits_immediately() {
        let mut state = TranscriptState::new();
        apply(&mut state, &[Hypothesis::finalized("hello world", 0.9)]);

        assert_eq!(state.transcript(), "hello world");
        assert_eq!(state.pending(), "");
        assert_eq!(state.committed(), &["hello world".to_string()]);
    }

    // ---- Scenario B: interim tail is replaced, not appended ---

    #[test]
    fn interim_tail_is_replaced_on_every_batch() {
        let mut state = TranscriptState::new();
        apply(&mut state, &[Hypothesis::interim("hel", 0.5)]);
        assert_eq!(state.transcript(), "hel");

        apply(&mut state, &[Hypothesis::interim("hello", 0.6)]);
        assert_eq!(state.transcript(), "hello");
        assert!(state.committed().is_empty());
    }

    #[test]
    fn batch_with_no_interims_clears_pending() {
        let mut state = TranscriptState::new();
        apply(&mut state, &[Hypothesis::interim("guess", 0.6)]);
        assert_eq!(state.pending(), "guess");

        apply(&mut state, &[Hypothesis::finalized("guessed", 0.9)]);
        assert_eq!(state.pending(), "");
        assert_eq!(state.transcript(), "guessed");
    }

    // ---- Noise-floor rejection ---

    #[test]
    fn low_confidence_text_never_appears() {
        let mut state = TranscriptState::new();
        apply(
            &mut state,
            &[
                Hypothesis::finalized("static", 0.1),
                Hypothesis::interim("hiss", 0.2),
            ],
        );
        assert_eq!(state.transcript(), "");
    }

    #[test]
    fn confidence_exactly_at_floor_is_rejected() {
        let mut state = TranscriptState::new();
        apply(&mut state, &[Hypothesis::finalized("borderline", FLOOR)]);
        assert_eq!(state.transcript(), "");
    }

    #[test]
    fn confidence_just_above_floor_is_kept() {
        let mut state = TranscriptState::new();
        apply(&mut state, &[Hypothesis::finalized("kept", FLOOR + 0.01)]);
        assert_eq!(state.transcript(), "kept");
    }

    #[test]
    fn missing_confidence_uses_default_and_passes_floor() {
        let mut state = TranscriptState::new();
        apply(&mut state, &[Hypothesis::finalized_unscored("unscored")]);
        // Default confidence (0.7) is above the 0.3 floor.
        assert_eq!(state.transcript(), "unscored");
    }

    // ---- Committed is append-only ---

    #[test]
    fn committed_segments_are_append_only_and_ordered() {
        let mut state = TranscriptState::new();
        apply(&mut state, &[Hypothesis::finalized("first", 0.9)]);
        apply(&mut state, &[Hypothesis::finalized("second", 0.9)]);
        apply(&mut state, &[Hypothesis::interim("thi", 0.5)]);

        assert_eq!(
            state.committed(),
            &["first".to_string(), "second".to_string()]
        );
        assert_eq!(state.transcript(), "first second thi");
    }

    #[test]
    fn multiple_finals_in_one_batch_become_one_segment() {
        let mut state = TranscriptState::new();
        apply(
            &mut state,
            &[
                Hypothesis::finalized("good", 0.9),
                Hypothesis::finalized("morning", 0.8),
            ],
        );
        assert_eq!(state.committed(), &["good morning".to_string()]);
    }

    #[test]
    fn final_text_is_trimmed_before_commit() {
        let mut state = TranscriptState::new();
        apply(&mut state, &[Hypothesis::finalized("  padded  ", 0.9)]);
        assert_eq!(state.committed(), &["padded".to_string()]);
    }

    // ---- Mixed batches ---

    #[test]
    fn mixed_batch_commits_finals_and_keeps_interim_tail() {
        let mut state = TranscriptState::new();
        apply(
            &mut state,
            &[
                Hypothesis::finalized("tell me about", 0.9),
                Hypothesis::interim("your exp", 0.6),
            ],
        );
        assert_eq!(state.transcript(), "tell me about your exp");
        assert_eq!(state.committed(), &["tell me about".to_string()]);
        assert_eq!(state.pending(), "your exp");
    }

    #[test]
    fn empty_batch_clears_pending_and_keeps_committed() {
        let mut state = TranscriptState::new();
        apply(&mut state, &[Hypothesis::finalized("kept", 0.9)]);
        apply(&mut state, &[Hypothesis::interim("tail", 0.6)]);
        apply(&mut state, &[]);

        assert_eq!(state.transcript(), "kept");
        assert_eq!(state.pending(), "");
    }

    // ---- clear ---

    #[test]
    fn clear_empties_both_parts() {
        let mut state = TranscriptState::new();
        apply(&mut state, &[Hypothesis::finalized("something", 0.9)]);
        apply(&mut state, &[Hypothesis::interim("more", 0.6)]);

        state.clear();
        assert_eq!(state.transcript(), "");
        assert!(state.committed().is_empty());
        assert_eq!(state.pending(), "");
    }

    // ---- transcript formatting ---

    #[test]
    fn pending_only_transcript_has_no_leading_space() {
        let mut state = TranscriptState::new();
        apply(&mut state, &[Hypothesis::interim("just a guess", 0.6)]);
        assert_eq!(state.transcript(), "just a guess");
    }

    #[test]
    fn empty_state_transcript_is_empty_string() {
        assert_eq!(TranscriptState::new().transcript(), "");
    }
}
