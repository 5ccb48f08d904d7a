use crate::{
    analysis::TextStats,
    config::{DetailLevel, Difficulty, MindmapConfig},
    error::{Error, Result},
};
use tera::{Context, Tera};

const SUMMARY_CONCISE_LIMIT: usize = 100;
const SUMMARY_BRIEF_LIMIT: usize = 300;
const SUMMARY_MODERATE_LIMIT: usize = 600;

/// Renders task-specific model instructions.
///
/// Pure string templating: no side effects, no model calls. Tier-specific
/// instruction fragments live in dispatch tables below so the wording stays
/// auditable independent of the orchestration logic.
pub struct PromptEngine {
    tera: Tera,
}

impl PromptEngine {
    /// Creates a new prompt engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns an error if template registration fails.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_template("mindmap", include_str!("../templates/mindmap.tera"))
            .map_err(|e| Error::template("mindmap", e))?;
        tera.add_raw_template("consolidate", include_str!("../templates/consolidate.tera"))
            .map_err(|e| Error::template("consolidate", e))?;
        tera.add_raw_template("flashcards", include_str!("../templates/flashcards.tera"))
            .map_err(|e| Error::template("flashcards", e))?;
        tera.add_raw_template("quiz", include_str!("../templates/quiz.tera"))
            .map_err(|e| Error::template("quiz", e))?;
        tera.add_raw_template("summary", include_str!("../templates/summary.tera"))
            .map_err(|e| Error::template("summary", e))?;

        Ok(Self { tera })
    }

    /// Renders the mindmap generation prompt for one chunk of text.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn mindmap(
        &self,
        stats: &TextStats,
        config: &MindmapConfig,
        text: &str,
    ) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert("detail_level", config.detail_level.id());
        ctx.insert("max_levels", &config.max_levels);
        ctx.insert("word_count", &stats.word_count);
        ctx.insert("paragraph_count", &stats.paragraph_count);
        ctx.insert("focus", focus_fragment(config.detail_level));
        ctx.insert("text", text);

        self.render("mindmap", &ctx)
    }

    /// Renders the consolidation prompt over joined per-chunk mindmaps.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn consolidate(&self, config: &MindmapConfig, combined: &str) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert("detail_level", config.detail_level.id());
        ctx.insert("max_levels", &config.max_levels);
        ctx.insert("text", combined);

        self.render("consolidate", &ctx)
    }

    /// Renders the flashcard generation prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn flashcards(&self, card_count: usize, text: &str) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert("card_count", &card_count);
        ctx.insert("text", text);

        self.render("flashcards", &ctx)
    }

    /// Renders the quiz generation prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn quiz(&self, question_count: usize, difficulty: Difficulty, text: &str) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert("question_count", &question_count);
        ctx.insert("difficulty", difficulty.id());
        ctx.insert("difficulty_instructions", difficulty_clause(difficulty));
        ctx.insert("text", text);

        self.render("quiz", &ctx)
    }

    /// Renders the summary generation prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn summary(&self, target_words: usize, text: &str) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert("summary_type", summary_type_label(target_words));
        ctx.insert("word_count", &target_words);
        ctx.insert("text", text);

        self.render("summary", &ctx)
    }

    fn render(&self, template: &str, ctx: &Context) -> Result<String> {
        self.tera
            .render(template, ctx)
            .map_err(|e| Error::template(template, e))
    }
}

/// Structural emphasis instructions per detail tier.
const fn focus_fragment(level: DetailLevel) -> &'static str {
    match level {
        DetailLevel::Basic => {
            "\
- 3-5 main topics maximum
- Key concepts and definitions
- Essential relationships
- Keep it concise and clear"
        }
        DetailLevel::Moderate => {
            "\
- 4-7 main topics
- Important subtopics with explanations
- Key examples and details
- Connections between concepts
- Supporting evidence or data points"
        }
        DetailLevel::Detailed => {
            "\
- 6-10 main topics
- Comprehensive subtopic breakdown
- Specific examples, case studies, or applications
- Detailed explanations and context
- Cross-references and relationships
- Important quotes or key points"
        }
        DetailLevel::Comprehensive => {
            "\
- Comprehensive topic coverage (8-15 main topics)
- Extensive subtopic hierarchy
- Detailed examples, case studies, and applications
- In-depth explanations with context
- Multiple perspectives or viewpoints
- Supporting data, statistics, or evidence
- Cross-references and complex relationships
- Key quotes, definitions, and terminology"
        }
    }
}

/// Instructional clause per quiz difficulty.
const fn difficulty_clause(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => {
            "Focus on basic facts, definitions, and main concepts. Make questions straightforward."
        }
        Difficulty::Medium => {
            "Include analytical questions, relationships between concepts, and some application-based questions."
        }
        Difficulty::Hard => {
            "Create challenging questions requiring critical thinking, analysis, and application of concepts."
        }
    }
}

/// Descriptive summary-type label selected from the target word count.
///
/// Used purely for instructional framing, not enforcement.
#[must_use]
pub const fn summary_type_label(target_words: usize) -> &'static str {
    if target_words < SUMMARY_CONCISE_LIMIT {
        "concise"
    } else if target_words < SUMMARY_BRIEF_LIMIT {
        "brief"
    } else if target_words < SUMMARY_MODERATE_LIMIT {
        "moderate"
    } else {
        "detailed"
    }
}
