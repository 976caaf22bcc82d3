//! Trivial `[section] key = value` config file reader.
//!
//! The shell only needs one section of configuration — where to find the
//! screensaver helper and how long the compositor should wait before
//! launching it. This is intentionally not a general-purpose config format;
//! it mirrors the kind of small hand-scanned reader the rest of the
//! ecosystem reaches for `scan_fmt` over, rather than pulling in a full
//! `serde`-based format for three fields.

use std::fs;
use std::path::Path;

use scan_fmt::scan_fmt;
use thiserror::Error;

/// Default screensaver timeout, in seconds, when the config omits `duration`.
pub const DEFAULT_SCREENSAVER_DURATION: u32 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed line {0}: {1:?}")]
    MalformedLine(usize, String),
}

/// Parsed `[screensaver]` section.
#[derive(Debug, Clone)]
pub struct ScreensaverConfig {
    /// Path to the screensaver binary. `None` disables the screensaver entirely.
    pub path: Option<String>,
    /// Idle duration, in seconds, before the screensaver is launched.
    pub duration: u32,
}

impl Default for ScreensaverConfig {
    fn default() -> Self {
        ScreensaverConfig {
            path: None,
            duration: DEFAULT_SCREENSAVER_DURATION,
        }
    }
}

/// Top-level shell configuration. Only the screensaver section exists today;
/// this struct is the extension point for future sections.
#[derive(Debug, Clone, Default)]
pub struct ShellConfig {
    pub screensaver: ScreensaverConfig,
}

impl ShellConfig {
    /// Load configuration from `path`. A missing file is not an error at
    /// this layer — callers that want defaults-on-missing should check
    /// existence first; this mirrors how small local config readers in the
    /// ecosystem are usually wired into their caller's own fallback logic.
    pub fn load(path: impl AsRef<Path>) -> Result<ShellConfig, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<ShellConfig, ConfigError> {
        let mut config = ShellConfig::default();
        let mut section = String::new();

        for (lineno, raw_line) in contents.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') {
                let name = scan_fmt!(line, "[{}]", String)
                    .map_err(|_| ConfigError::MalformedLine(lineno + 1, line.to_string()))?;
                section = name;
                continue;
            }

            let (key, value) = scan_fmt!(line, "{} = {[^\n]}", String, String)
                .map_err(|_| ConfigError::MalformedLine(lineno + 1, line.to_string()))?;
            let value = value.trim();

            match (section.as_str(), key.as_str()) {
                ("screensaver", "path") => config.screensaver.path = Some(value.to_string()),
                ("screensaver", "duration") => {
                    config.screensaver.duration = value
                        .parse()
                        .map_err(|_| ConfigError::MalformedLine(lineno + 1, line.to_string()))?;
                }
                _ => {
                    // unknown keys are ignored: config files grow forward-compatible
                    // knobs that older shells should simply not trip over.
                }
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_screensaver_section() {
        let cfg = ShellConfig::parse(
            "[screensaver]\npath = /usr/bin/ss\nduration = 120\n",
        )
        .unwrap();
        assert_eq!(cfg.screensaver.path.as_deref(), Some("/usr/bin/ss"));
        assert_eq!(cfg.screensaver.duration, 120);
    }

    #[test]
    fn defaults_when_section_absent() {
        let cfg = ShellConfig::parse("# nothing here\n").unwrap();
        assert!(cfg.screensaver.path.is_none());
        assert_eq!(cfg.screensaver.duration, DEFAULT_SCREENSAVER_DURATION);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = ShellConfig::parse("[screensaver]\nfoo = bar\nduration = 30\n").unwrap();
        assert_eq!(cfg.screensaver.duration, 30);
    }

    #[test]
    fn malformed_line_is_reported() {
        let err = ShellConfig::parse("[screensaver]\nthis is not kv\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedLine(2, _)));
    }
}
