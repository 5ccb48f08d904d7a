use crate::{
    analysis::{analyze, TextStats},
    config::{Config, Difficulty, MindmapConfig},
    error::{Error, Result},
    model::{GeminiClient, TextModel},
    parser::{parse_flashcards, parse_quiz, Flashcard, QuizQuestion},
    prompt::PromptEngine,
    splitter::Splitter,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// A generated summary together with its length bookkeeping.
///
/// Target and actual word counts are both surfaced; no equality between them
/// is enforced — discrepancy is expected, not corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResult {
    /// The summary text
    pub summary: String,

    /// Word count the caller asked for
    pub target_word_count: usize,

    /// Whitespace-token count of the returned summary
    pub actual_word_count: usize,
}

impl SummaryResult {
    /// Creates a summary result, computing the actual word count.
    #[must_use]
    pub fn new(summary: String, target_word_count: usize) -> Self {
        let actual_word_count = summary.split_whitespace().count();
        Self {
            summary,
            target_word_count,
            actual_word_count,
        }
    }
}

/// Statistics and shaping configuration for one document, bundled for
/// display by the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Raw text statistics
    pub stats: TextStats,

    /// Mindmap configuration selected for this document
    pub mindmap_config: MindmapConfig,
}

/// Orchestrates generation of study artifacts from document text.
///
/// Drives the model across one or many chunks and consolidates multi-chunk
/// mindmap output. All state is local to one invocation; regeneration
/// supersedes, never merges.
pub struct Pipeline {
    config: Config,
    splitter: Splitter,
    prompts: PromptEngine,
    model: Box<dyn TextModel>,
}

impl Pipeline {
    /// Creates a pipeline with the given configuration and model client.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation or template
    /// registration fails.
    pub fn new(config: Config, model: Box<dyn TextModel>) -> Result<Self> {
        config.validate()?;

        let splitter = Splitter::new(&config);
        let prompts = PromptEngine::new()?;

        Ok(Self {
            config,
            splitter,
            prompts,
            model,
        })
    }

    /// Creates a pipeline backed by the default HTTP model client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the client cannot
    /// be constructed (e.g. missing API key).
    pub fn with_default_client(config: Config) -> Result<Self> {
        let client = GeminiClient::new(&config.model)?;
        Self::new(config, Box::new(client))
    }

    /// Analyzes document text and reports the statistics together with the
    /// mindmap configuration that generation would use.
    ///
    /// # Errors
    ///
    /// Returns an error for empty or whitespace-only input.
    pub fn analyze_document(&self, text: &str) -> Result<DocumentReport> {
        require_text(text)?;

        let stats = analyze(text);
        let mindmap_config = self.select_mindmap_config(&stats);

        Ok(DocumentReport {
            stats,
            mindmap_config,
        })
    }

    /// Generates a hierarchical markdown mindmap for the document.
    ///
    /// The shaping configuration is fixed once for the whole document. Text
    /// above the chunk limit is processed per chunk and consolidated with a
    /// single follow-up call; failed chunk calls are skipped, and the
    /// consolidation call is only issued if at least one chunk produced
    /// output.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, when the model fails on a
    /// single-chunk document, when every chunk call of a multi-chunk
    /// document fails, or when the final completion is blank.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub fn generate_mindmap(&self, text: &str) -> Result<String> {
        require_text(text)?;

        let stats = analyze(text);
        let config = self.select_mindmap_config(&stats);

        info!(
            "Document: {} words, complexity {:.1}, detail level {}, max {} levels",
            stats.word_count, stats.complexity_score, config.detail_level, config.max_levels
        );

        let chunks = self.splitter.chunk(text);

        if chunks.len() == 1 {
            self.mindmap_single(&stats, &config, &chunks[0])
        } else {
            self.mindmap_multi(&stats, &config, &chunks)
        }
    }

    fn mindmap_single(
        &self,
        stats: &TextStats,
        config: &MindmapConfig,
        chunk: &str,
    ) -> Result<String> {
        let prompt = self.prompts.mindmap(stats, config, chunk)?;
        let completion = self.model.complete(&prompt)?;

        if completion.is_blank() {
            return Err(Error::empty_completion("mindmap"));
        }

        Ok(completion.text.trim().to_string())
    }

    fn mindmap_multi(
        &self,
        stats: &TextStats,
        config: &MindmapConfig,
        chunks: &[String],
    ) -> Result<String> {
        info!("Text split into {} chunks; combining results", chunks.len());

        let mut fragments = Vec::with_capacity(chunks.len());

        for (i, chunk) in chunks.iter().enumerate() {
            let prompt = self.prompts.mindmap(stats, config, chunk)?;
            match self.model.complete(&prompt) {
                Ok(completion) if !completion.is_blank() => {
                    fragments.push(completion.text.trim().to_string());
                }
                Ok(_) => {
                    warn!("Chunk {}/{} returned no output; skipping", i + 1, chunks.len());
                }
                Err(e) => {
                    warn!("Chunk {}/{} failed: {e}; skipping", i + 1, chunks.len());
                }
            }
        }

        // Consolidating nothing would silently produce an empty mindmap;
        // fail before issuing the call instead.
        if fragments.is_empty() {
            return Err(Error::AllChunksFailed {
                chunks: chunks.len(),
            });
        }

        let combined = fragments.join("\n\n");
        let prompt = self.prompts.consolidate(config, &combined)?;
        let completion = self.model.complete(&prompt)?;

        if completion.is_blank() {
            return Err(Error::empty_completion("mindmap consolidation"));
        }

        Ok(completion.text.trim().to_string())
    }

    /// Generates flashcards from the document.
    ///
    /// Malformed cards in the model output are dropped; an empty vector is a
    /// valid result and left to the caller to interpret.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, a failed model call, or a blank
    /// completion.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub fn generate_flashcards(&self, text: &str, count: usize) -> Result<Vec<Flashcard>> {
        require_text(text)?;

        let prompt = self.prompts.flashcards(count, text)?;
        let completion = self.model.complete(&prompt)?;

        if completion.is_blank() {
            return Err(Error::empty_completion("flashcards"));
        }

        let cards = parse_flashcards(&completion.text);
        info!("Parsed {} of {count} requested flashcards", cards.len());

        Ok(cards)
    }

    /// Generates a multiple-choice quiz from the document.
    ///
    /// Blocks that do not parse into a full question are dropped; an empty
    /// vector is a valid result.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, a failed model call, or a blank
    /// completion.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub fn generate_quiz(
        &self,
        text: &str,
        count: usize,
        difficulty: Difficulty,
    ) -> Result<Vec<QuizQuestion>> {
        require_text(text)?;

        let prompt = self.prompts.quiz(count, difficulty, text)?;
        let completion = self.model.complete(&prompt)?;

        if completion.is_blank() {
            return Err(Error::empty_completion("quiz"));
        }

        let questions = parse_quiz(&completion.text);
        info!(
            "Parsed {} of {count} requested {difficulty} quiz questions",
            questions.len()
        );

        Ok(questions)
    }

    /// Generates a summary of roughly the requested length.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, a failed model call, or a blank
    /// completion.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub fn generate_summary(&self, text: &str, target_words: usize) -> Result<SummaryResult> {
        require_text(text)?;

        let prompt = self.prompts.summary(target_words, text)?;
        let completion = self.model.complete(&prompt)?;

        if completion.is_blank() {
            return Err(Error::empty_completion("summary"));
        }

        let result = SummaryResult::new(completion.text.trim().to_string(), target_words);
        info!(
            "Summary: {} words (target {})",
            result.actual_word_count, result.target_word_count
        );

        Ok(result)
    }

    /// Returns the pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    fn select_mindmap_config(&self, stats: &TextStats) -> MindmapConfig {
        self.config.detail_override.map_or_else(
            || MindmapConfig::from_score(stats.complexity_score),
            MindmapConfig::for_level,
        )
    }
}

fn require_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::empty_input("document text is empty"));
    }
    Ok(())
}
