//! Page configuration: the literal constants of the page plus the quiz vocabulary.
//!
//! With the `serde` feature the struct deserializes with `#[serde(default)]`, so a
//! JSON object only needs the fields it wants to override.

use crate::error::PageError;

/// Particles appended per pointer-move event.
pub const BURST_SIZE: usize = 5;
/// Delay between an answer and the next round.
pub const ROUND_DELAY_MS: u32 = 2_000;
/// Radius lost by every particle each frame.
pub const PARTICLE_DECAY: f64 = 0.1;
pub const PARTICLE_COLOR: &str = "rgba(255, 255, 255, 0.5)";
pub const PREFERRED_VOICE: &str = "Google UK English Female";

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageConfig {
    pub burst_size: usize,
    pub round_delay_ms: u32,
    pub particle_decay: f64,
    pub particle_color: String,
    /// Exact voice name; falls back to the host default when the catalog lacks it.
    pub preferred_voice: String,
    /// Speak every prompt a second time once the first utterance ends.
    pub repeat_prompt: bool,
    pub words: Vec<String>,
    /// Fixed RNG seed; entropy-seeded when `None`.
    pub seed: Option<u64>,
    pub canvas_id: String,
    pub input_id: String,
    pub message_id: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            burst_size: BURST_SIZE,
            round_delay_ms: ROUND_DELAY_MS,
            particle_decay: PARTICLE_DECAY,
            particle_color: PARTICLE_COLOR.to_string(),
            preferred_voice: PREFERRED_VOICE.to_string(),
            repeat_prompt: true,
            words: crate::WORD_LIST.iter().map(|w| w.to_string()).collect(),
            seed: None,
            canvas_id: "particleCanvas".to_string(),
            input_id: "userInput".to_string(),
            message_id: "message".to_string(),
        }
    }
}

impl PageConfig {
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PageError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PageError> {
        if self.words.is_empty() {
            return Err(PageError::EmptyWordList);
        }
        if self.burst_size == 0 {
            return Err(PageError::InvalidConfig("burst_size must be at least 1".into()));
        }
        if !self.particle_decay.is_finite() || self.particle_decay < 0.0 {
            return Err(PageError::InvalidConfig(format!(
                "particle_decay must be a non-negative number, got {}",
                self.particle_decay
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_constants() {
        let c = PageConfig::default();
        assert_eq!(c.burst_size, 5);
        assert_eq!(c.round_delay_ms, 2000);
        assert_eq!(c.words.len(), crate::WORD_LIST.len());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_words() {
        let c = PageConfig { words: Vec::new(), ..PageConfig::default() };
        assert!(matches!(c.validate(), Err(PageError::EmptyWordList)));
    }

    #[test]
    fn validate_rejects_bad_decay() {
        let c = PageConfig { particle_decay: f64::NAN, ..PageConfig::default() };
        assert!(matches!(c.validate(), Err(PageError::InvalidConfig(_))));
        let c = PageConfig { particle_decay: -0.5, ..PageConfig::default() };
        assert!(c.validate().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_overrides_only_named_fields() {
        let c = PageConfig::from_json(r#"{"words":["cat"],"round_delay_ms":500}"#).unwrap();
        assert_eq!(c.words, vec!["cat".to_string()]);
        assert_eq!(c.round_delay_ms, 500);
        assert_eq!(c.burst_size, BURST_SIZE);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_with_empty_words_is_rejected() {
        assert!(PageConfig::from_json(r#"{"words":[]}"#).is_err());
    }
}
