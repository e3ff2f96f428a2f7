//! Capture settings, defaults and TOML persistence.
//!
//! [`CaptureConfig`] implements `Serialize`, `Deserialize`, `Default` and
//! `Clone` so it can be round-tripped through TOML files and shared across
//! threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// CaptureConfig
// ---------------------------------------------------------------------------

/// Settings for the speech-capture session, serialised as `settings.toml`.
///
/// The first four fields configure the engine once at session creation (see
/// [`crate::engine::EngineSettings`]); the rest are session-manager
/// tunables.
///
/// # Persistence
///
/// ```rust,no_run
/// use speech_session::CaptureConfig;
///
/// // Load (returns Default when file is missing)
/// let config = CaptureConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Recognition locale tag (e.g. `"en-US"`).  Fixed per session.
    pub language: String,
    /// Keep the engine capturing across utterance boundaries, and recover
    /// automatically when it terminates without a stop request.
    pub continuous: bool,
    /// Ask the engine for interim (revisable) hypotheses in addition to
    /// finals.
    pub interim_results: bool,
    /// Maximum alternatives the engine reports per result.
    pub max_alternatives: u32,
    /// Hypotheses at or below this confidence are discarded as noise.
    pub confidence_floor: f32,
    /// Confidence assumed when the engine omits a score.  Kept at 0.7 for
    /// compatibility with earlier behaviour; a tunable, not a principled
    /// threshold.
    pub default_confidence: f32,
    /// Delay before re-issuing `start()` after an unsolicited engine end.
    pub restart_delay_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            language: "en-US".into(),
            continuous: true,
            interim_results: true,
            max_alternatives: 1,
            confidence_floor: 0.3,
            default_confidence: 0.7,
            restart_delay_ms: 50,
        }
    }
}

impl CaptureConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(CaptureConfig::default())` when the file does not exist
    /// yet (first-run scenario) so callers never need to special-case a
    /// missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
