//! Editor configuration

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::layout::{FontMetrics, LayoutConstraints, DEFAULT_MAX_PASSES};

/// Session settings. Every field has a default, so a partial JSON object
/// (or `{}`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub constraints: LayoutConstraints,
    pub font: FontMetrics,
    /// Quiet period after the last mutation before pagination runs
    pub debounce_ms: u64,
    pub autosave_interval_ms: u64,
    /// Simulated round trip of a save
    pub save_latency_ms: u64,
    pub max_pagination_passes: usize,
    pub presence_interval_ms: u64,
    pub activity_interval_ms: u64,
    /// Collaborator cursors that have not moved for this long are hidden
    pub cursor_max_age_ms: u64,
    pub chat_reply_probability: f64,
    /// Bounds of the simulated reply delay, lower inclusive
    pub chat_reply_delay_ms: (u64, u64),
    pub comment_excerpt_chars: usize,
    /// Seed for simulated presence and chat
    pub seed: u64,
    pub prefers_dark: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            constraints: LayoutConstraints::default(),
            font: FontMetrics::default(),
            debounce_ms: 500,
            autosave_interval_ms: 30_000,
            save_latency_ms: 800,
            max_pagination_passes: DEFAULT_MAX_PASSES,
            presence_interval_ms: 3_000,
            activity_interval_ms: 15_000,
            cursor_max_age_ms: 10_000,
            chat_reply_probability: 0.5,
            chat_reply_delay_ms: (3_000, 8_000),
            comment_excerpt_chars: 50,
            seed: 0x5EED,
            prefers_dark: false,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let c = &self.constraints;
        if c.content_width() <= 0.0 || c.content_height() <= 0.0 {
            return Err(Error::Config(format!(
                "margins leave no room for content on a {}x{} page",
                c.page_width, c.page_height
            )));
        }
        if !(0.0..=1.0).contains(&self.chat_reply_probability) {
            return Err(Error::Config(format!(
                "chatReplyProbability must be within 0..=1, got {}",
                self.chat_reply_probability
            )));
        }
        if self.font.line_height <= 0.0 {
            return Err(Error::Config("font lineHeight must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = EditorConfig::from_json(r#"{"debounceMs": 250, "chatReplyDelayMs": [100, 200]}"#).unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.chat_reply_delay_ms, (100, 200));
        assert_eq!(config.autosave_interval_ms, 30_000);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(EditorConfig::from_json("not json"), Err(Error::Config(_))));
        assert!(matches!(
            EditorConfig::from_json(r#"{"chatReplyProbability": 2.0}"#),
            Err(Error::Config(_))
        ));
    }
}
