use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_MAX_CHUNK_SIZE: usize = 25_000;
const DEFAULT_CARD_COUNT: usize = 10;
const DEFAULT_QUESTION_COUNT: usize = 10;
const DEFAULT_SUMMARY_WORDS: usize = 300;
const MAX_RECORD_COUNT: usize = 50;
const MIN_SUMMARY_WORDS: usize = 10;
const MAX_SUMMARY_WORDS: usize = 5_000;

/// Detail tier governing topic count and hierarchy depth of a mindmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Few main topics, essentials only
    Basic,
    /// Main topics with supporting subtopics
    Moderate,
    /// Comprehensive subtopic breakdown
    Detailed,
    /// Extensive hierarchy with cross-references
    Comprehensive,
}

impl DetailLevel {
    /// Returns the ID string for this detail level.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Moderate => "moderate",
            Self::Detailed => "detailed",
            Self::Comprehensive => "comprehensive",
        }
    }

    /// Returns all detail levels in ascending order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Basic,
            Self::Moderate,
            Self::Detailed,
            Self::Comprehensive,
        ]
    }

    /// Parse a detail level from its string ID.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "basic" => Some(Self::Basic),
            "moderate" => Some(Self::Moderate),
            "detailed" => Some(Self::Detailed),
            "comprehensive" => Some(Self::Comprehensive),
            _ => None,
        }
    }
}

impl std::fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Content-shaping configuration for mindmap generation.
///
/// Derived from a document's complexity score via fixed bands, or supplied
/// directly through [`MindmapConfig::for_level`] when the caller wants manual
/// control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindmapConfig {
    /// Detail tier for topic selection
    pub detail_level: DetailLevel,

    /// Maximum markdown heading depth (3-6)
    pub max_levels: u8,

    /// Initial expansion depth hint for the rendering layer (1-2)
    pub expand_level: u8,
}

impl MindmapConfig {
    /// Selects a configuration from a complexity score.
    ///
    /// Bands are half-open; a score sitting exactly on a boundary belongs to
    /// the higher band. Negative or NaN scores clamp to the lowest band.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < 5.0 || score.is_nan() {
            Self::for_level(DetailLevel::Basic)
        } else if score < 15.0 {
            Self::for_level(DetailLevel::Moderate)
        } else if score < 30.0 {
            Self::for_level(DetailLevel::Detailed)
        } else {
            Self::for_level(DetailLevel::Comprehensive)
        }
    }

    /// Builds the configuration for an explicitly chosen detail level.
    ///
    /// Re-derives `max_levels` and `expand_level` from the same table as the
    /// score-based path.
    #[must_use]
    pub const fn for_level(level: DetailLevel) -> Self {
        let (max_levels, expand_level) = match level {
            DetailLevel::Basic => (3, 2),
            DetailLevel::Moderate => (4, 2),
            DetailLevel::Detailed => (5, 1),
            DetailLevel::Comprehensive => (6, 1),
        };
        Self {
            detail_level: level,
            max_levels,
            expand_level,
        }
    }
}

/// Difficulty tier for quiz generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Basic facts and definitions
    Easy,
    /// Analytical and application-based questions
    Medium,
    /// Critical thinking and synthesis
    Hard,
}

impl Difficulty {
    /// Returns the ID string for this difficulty.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse a difficulty from its string ID.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Connection settings for the generative model endpoint.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Base URL of the generateContent-style REST API
    pub api_base: String,

    /// Model identifier
    pub model: String,

    /// API key for the endpoint
    pub api_key: String,

    /// Per-call timeout in seconds; a timeout counts as a failed call
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: String::new(),
            timeout_secs: 60,
        }
    }
}

/// Configuration for the studykit pipeline.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Maximum characters per chunk sent to the model (soft ceiling)
    pub max_chunk_size: usize,

    /// Detail-level override; `None` selects from the complexity score
    pub detail_override: Option<DetailLevel>,

    /// Default number of flashcards to request
    pub card_count: usize,

    /// Default number of quiz questions to request
    pub question_count: usize,

    /// Default quiz difficulty
    pub difficulty: Difficulty,

    /// Default target summary length in words
    pub summary_words: usize,

    /// Model endpoint settings
    pub model: ModelConfig,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use studykit::Config;
    ///
    /// let config = Config::builder()
    ///     .max_chunk_size(20_000)
    ///     .card_count(15)
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `max_chunk_size` is zero
    /// - card or question counts fall outside 1..=50
    /// - summary word target falls outside 10..=5000
    /// - the model timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_size == 0 {
            return Err(Error::config("max_chunk_size must be greater than 0"));
        }

        if self.card_count == 0 || self.card_count > MAX_RECORD_COUNT {
            return Err(Error::config(format!(
                "card_count ({}) must be within 1..={MAX_RECORD_COUNT}",
                self.card_count
            )));
        }

        if self.question_count == 0 || self.question_count > MAX_RECORD_COUNT {
            return Err(Error::config(format!(
                "question_count ({}) must be within 1..={MAX_RECORD_COUNT}",
                self.question_count
            )));
        }

        if self.summary_words < MIN_SUMMARY_WORDS || self.summary_words > MAX_SUMMARY_WORDS {
            return Err(Error::config(format!(
                "summary_words ({}) must be within {MIN_SUMMARY_WORDS}..={MAX_SUMMARY_WORDS}",
                self.summary_words
            )));
        }

        if self.model.timeout_secs == 0 {
            return Err(Error::config("model timeout_secs must be greater than 0"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            detail_override: None,
            card_count: DEFAULT_CARD_COUNT,
            question_count: DEFAULT_QUESTION_COUNT,
            difficulty: Difficulty::Medium,
            summary_words: DEFAULT_SUMMARY_WORDS,
            model: ModelConfig::default(),
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    max_chunk_size: Option<usize>,
    detail_override: Option<DetailLevel>,
    card_count: Option<usize>,
    question_count: Option<usize>,
    difficulty: Option<Difficulty>,
    summary_words: Option<usize>,
    model: Option<ModelConfig>,
}

impl ConfigBuilder {
    /// Sets the maximum chunk size in characters.
    #[must_use]
    pub fn max_chunk_size(mut self, size: usize) -> Self {
        self.max_chunk_size = Some(size);
        self
    }

    /// Forces a specific detail level instead of score-based selection.
    #[must_use]
    pub fn detail_override(mut self, level: DetailLevel) -> Self {
        self.detail_override = Some(level);
        self
    }

    /// Sets the default flashcard count.
    #[must_use]
    pub fn card_count(mut self, count: usize) -> Self {
        self.card_count = Some(count);
        self
    }

    /// Sets the default quiz question count.
    #[must_use]
    pub fn question_count(mut self, count: usize) -> Self {
        self.question_count = Some(count);
        self
    }

    /// Sets the default quiz difficulty.
    #[must_use]
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Sets the default target summary length in words.
    #[must_use]
    pub fn summary_words(mut self, words: usize) -> Self {
        self.summary_words = Some(words);
        self
    }

    /// Sets the model endpoint configuration.
    #[must_use]
    pub fn model(mut self, model: ModelConfig) -> Self {
        self.model = Some(model);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            max_chunk_size: self.max_chunk_size.unwrap_or(DEFAULT_MAX_CHUNK_SIZE),
            detail_override: self.detail_override,
            card_count: self.card_count.unwrap_or(DEFAULT_CARD_COUNT),
            question_count: self.question_count.unwrap_or(DEFAULT_QUESTION_COUNT),
            difficulty: self.difficulty.unwrap_or(Difficulty::Medium),
            summary_words: self.summary_words.unwrap_or(DEFAULT_SUMMARY_WORDS),
            model: self.model.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::builder().build().unwrap();

        assert_eq!(config.max_chunk_size, DEFAULT_MAX_CHUNK_SIZE);
        assert_eq!(config.card_count, DEFAULT_CARD_COUNT);
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert!(config.detail_override.is_none());
    }

    #[test]
    fn test_invalid_chunk_size() {
        let result = Config::builder().max_chunk_size(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_card_count() {
        assert!(Config::builder().card_count(0).build().is_err());
        assert!(Config::builder().card_count(51).build().is_err());
        assert!(Config::builder().card_count(25).build().is_ok());
    }

    #[test]
    fn test_invalid_summary_words() {
        assert!(Config::builder().summary_words(5).build().is_err());
        assert!(Config::builder().summary_words(10_000).build().is_err());
        assert!(Config::builder().summary_words(500).build().is_ok());
    }

    #[test]
    fn test_band_selection() {
        assert_eq!(
            MindmapConfig::from_score(0.0).detail_level,
            DetailLevel::Basic
        );
        assert_eq!(
            MindmapConfig::from_score(4.9).detail_level,
            DetailLevel::Basic
        );
        assert_eq!(
            MindmapConfig::from_score(14.0).detail_level,
            DetailLevel::Moderate
        );
        assert_eq!(
            MindmapConfig::from_score(29.9).detail_level,
            DetailLevel::Detailed
        );
        assert_eq!(
            MindmapConfig::from_score(1000.0).detail_level,
            DetailLevel::Comprehensive
        );
    }

    #[test]
    fn test_band_boundaries_belong_to_higher_band() {
        assert_eq!(
            MindmapConfig::from_score(5.0).detail_level,
            DetailLevel::Moderate
        );
        assert_eq!(
            MindmapConfig::from_score(15.0).detail_level,
            DetailLevel::Detailed
        );
        assert_eq!(
            MindmapConfig::from_score(30.0).detail_level,
            DetailLevel::Comprehensive
        );
    }

    #[test]
    fn test_same_band_same_output() {
        assert_eq!(MindmapConfig::from_score(6.0), MindmapConfig::from_score(14.9));
        assert_eq!(MindmapConfig::from_score(16.0), MindmapConfig::from_score(22.5));
    }

    #[test]
    fn test_negative_and_nan_clamp_to_basic() {
        assert_eq!(
            MindmapConfig::from_score(-3.0).detail_level,
            DetailLevel::Basic
        );
        assert_eq!(
            MindmapConfig::from_score(f64::NAN).detail_level,
            DetailLevel::Basic
        );
    }

    #[test]
    fn test_override_matches_table() {
        let config = MindmapConfig::for_level(DetailLevel::Detailed);
        assert_eq!(config.max_levels, 5);
        assert_eq!(config.expand_level, 1);
        assert_eq!(config, MindmapConfig::from_score(20.0));
    }

    #[test]
    fn test_detail_level_id_round_trip() {
        for level in DetailLevel::all() {
            assert_eq!(DetailLevel::from_id(level.id()), Some(*level));
        }
        assert_eq!(DetailLevel::from_id("extreme"), None);
    }

    #[test]
    fn test_difficulty_id_round_trip() {
        for id in ["easy", "medium", "hard"] {
            assert_eq!(Difficulty::from_id(id).unwrap().id(), id);
        }
        assert_eq!(Difficulty::from_id("impossible"), None);
    }
}
