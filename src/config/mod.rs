//! Configuration module.
//!
//! Provides [`CaptureConfig`] (session + engine settings), [`AppPaths`] for
//! cross-platform config directories, and TOML persistence via
//! `CaptureConfig::load` / `CaptureConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::CaptureConfig;
