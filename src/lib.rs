//! # studykit
//!
//! Turns extracted document text into study artifacts by orchestrating a
//! generative text model.
//!
//! ## Features
//!
//! - Adaptive mindmap generation shaped by a document complexity score
//! - Paragraph-aligned chunking for documents beyond one model request
//! - Flashcard and quiz generation with lenient response parsing
//! - Summaries targeting a caller-chosen word count
//! - PDF and plain-text extraction for the CLI front end
//!
//! ## Quick Start
//!
//! ```no_run
//! use studykit::{Config, ModelConfig, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .model(ModelConfig {
//!         api_key: std::env::var("GEMINI_API_KEY")?,
//!         ..ModelConfig::default()
//!     })
//!     .build()?;
//!
//! let pipeline = Pipeline::with_default_client(config)?;
//! let mindmap = pipeline.generate_mindmap("extracted document text")?;
//! println!("{mindmap}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library follows a pipeline architecture:
//! 1. **Analysis**: Scores text complexity from basic statistics
//! 2. **Configuration**: Maps the score to a content-shaping detail tier
//! 3. **Splitter**: Divides oversized text into paragraph-aligned chunks
//! 4. **Pipeline**: Drives the model per chunk and consolidates the results
//! 5. **Parser**: Extracts typed records from free-form model output

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod analysis;
mod config;
mod error;
mod export;
mod extract;
mod model;
mod parser;
mod pipeline;
mod prompt;
mod splitter;

pub use analysis::{analyze, TextStats};
pub use config::{Config, ConfigBuilder, DetailLevel, Difficulty, MindmapConfig, ModelConfig};
pub use error::{Error, Result};
pub use export::{render_flashcards_markdown, render_quiz_markdown, Exporter};
pub use extract::extract_text;
pub use model::{Completion, GeminiClient, TextModel};
pub use parser::{parse_flashcards, parse_quiz, Flashcard, QuizQuestion};
pub use pipeline::{DocumentReport, Pipeline, SummaryResult};
pub use prompt::{summary_type_label, PromptEngine};
pub use splitter::Splitter;
