use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use studykit::{
    extract_text, Config, DetailLevel, Difficulty, Exporter, ModelConfig, Pipeline,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "studykit",
    version,
    about = "Turn documents into study artifacts",
    long_about = "Turn a document into study artifacts with a generative text model.\n\n\
    studykit extracts text from a PDF or plain-text file, scores its complexity, \
    and generates mindmaps, flashcards, quizzes, or summaries shaped to the \
    document. Large documents are chunked on paragraph boundaries and the \
    per-chunk results are consolidated automatically.\n\n\
    USAGE EXAMPLES:\n  \
      # Generate a mindmap from a PDF\n  \
      studykit mindmap --file lecture.pdf\n\n  \
      # Force a detail level and save the artifacts\n  \
      studykit mindmap --file lecture.pdf --detail comprehensive --out ./artifacts\n\n  \
      # Fifteen hard quiz questions\n  \
      studykit quiz --file notes.txt --questions 15 --difficulty hard"
)]
struct Cli {
    /// Source document (.pdf or any UTF-8 text file)
    #[arg(short, long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Output directory; artifacts print to stdout when omitted
    #[arg(short, long, global = true, value_name = "PATH")]
    out: Option<PathBuf>,

    /// API key for the model endpoint
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model identifier to request
    #[arg(long, global = true, default_value = "gemini-1.5-flash")]
    model: String,

    /// Per-call timeout in seconds
    #[arg(long, global = true, default_value_t = 60)]
    timeout: u64,

    /// Maximum characters per chunk
    #[arg(long, global = true, default_value_t = 25_000)]
    max_chunk_size: usize,

    /// Keep timestamped backups when overwriting artifacts
    #[arg(long, global = true)]
    backup: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a hierarchical markdown mindmap
    Mindmap {
        /// Force a detail level instead of score-based selection
        #[arg(long, value_enum)]
        detail: Option<CliDetailLevel>,
    },

    /// Generate question/answer flashcards
    Flashcards {
        /// Number of flashcards to request
        #[arg(long, default_value_t = 10)]
        cards: usize,
    },

    /// Generate a multiple-choice quiz
    Quiz {
        /// Number of questions to request
        #[arg(long, default_value_t = 10)]
        questions: usize,

        /// Question difficulty
        #[arg(long, value_enum, default_value = "medium")]
        difficulty: CliDifficulty,
    },

    /// Generate a summary of roughly the given length
    Summary {
        /// Target word count
        #[arg(long, default_value_t = 300)]
        words: usize,
    },

    /// Print document statistics and the selected mindmap configuration
    Analyze,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliDetailLevel {
    Basic,
    Moderate,
    Detailed,
    Comprehensive,
}

impl From<CliDetailLevel> for DetailLevel {
    fn from(level: CliDetailLevel) -> Self {
        match level {
            CliDetailLevel::Basic => Self::Basic,
            CliDetailLevel::Moderate => Self::Moderate,
            CliDetailLevel::Detailed => Self::Detailed,
            CliDetailLevel::Comprehensive => Self::Comprehensive,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliDifficulty {
    Easy,
    Medium,
    Hard,
}

impl From<CliDifficulty> for Difficulty {
    fn from(difficulty: CliDifficulty) -> Self {
        match difficulty {
            CliDifficulty::Easy => Self::Easy,
            CliDifficulty::Medium => Self::Medium,
            CliDifficulty::Hard => Self::Hard,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Pick up GEMINI_API_KEY from a local .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    setup_tracing(cli.verbose)?;

    let file = cli
        .file
        .as_deref()
        .context("--file is required; pass a PDF or text document")?;

    let text = extract_text(file).context("Failed to extract document text")?;

    let mut builder = Config::builder()
        .max_chunk_size(cli.max_chunk_size)
        .model(ModelConfig {
            model: cli.model.clone(),
            api_key: cli.api_key.clone().unwrap_or_default(),
            timeout_secs: cli.timeout,
            ..ModelConfig::default()
        });

    if let Command::Mindmap {
        detail: Some(level),
    } = &cli.command
    {
        builder = builder.detail_override((*level).into());
    }

    let config = builder.build().context("Failed to build configuration")?;
    let exporter = cli
        .out
        .as_ref()
        .map(|dir| Exporter::new(dir, cli.backup));

    // The analyze path needs no model client; everything else does.
    if matches!(cli.command, Command::Analyze) {
        let pipeline = Pipeline::new(config, Box::new(NoModel))?;
        let report = pipeline.analyze_document(&text)?;

        match &exporter {
            Some(exporter) => {
                exporter.write_report(&report)?;
            }
            None => println!("{}", serde_json::to_string_pretty(&report)?),
        }
        return Ok(());
    }

    let pipeline =
        Pipeline::with_default_client(config).context("Failed to create pipeline")?;

    match cli.command {
        Command::Mindmap { .. } => {
            let mindmap = pipeline
                .generate_mindmap(&text)
                .context("Mindmap generation failed")?;

            match &exporter {
                Some(exporter) => {
                    exporter.write_mindmap(&mindmap)?;
                }
                None => println!("{mindmap}"),
            }
        }

        Command::Flashcards { cards } => {
            let parsed = pipeline
                .generate_flashcards(&text, cards)
                .context("Flashcard generation failed")?;

            if parsed.is_empty() {
                anyhow::bail!("The model response contained no usable flashcards; try again");
            }

            match &exporter {
                Some(exporter) => {
                    exporter.write_flashcards(&parsed)?;
                }
                None => print!("{}", studykit::render_flashcards_markdown(&parsed)),
            }
        }

        Command::Quiz {
            questions,
            difficulty,
        } => {
            let parsed = pipeline
                .generate_quiz(&text, questions, difficulty.into())
                .context("Quiz generation failed")?;

            if parsed.is_empty() {
                anyhow::bail!("The model response contained no usable quiz questions; try again");
            }

            match &exporter {
                Some(exporter) => {
                    exporter.write_quiz(&parsed)?;
                }
                None => print!("{}", studykit::render_quiz_markdown(&parsed)),
            }
        }

        Command::Summary { words } => {
            let result = pipeline
                .generate_summary(&text, words)
                .context("Summary generation failed")?;

            eprintln!(
                "Summary: {} words (target {})",
                result.actual_word_count, result.target_word_count
            );

            match &exporter {
                Some(exporter) => {
                    exporter.write_summary(&result)?;
                }
                None => println!("{}", result.summary),
            }
        }

        Command::Analyze => unreachable!("handled above"),
    }

    Ok(())
}

/// Placeholder model for commands that never issue a call.
struct NoModel;

impl studykit::TextModel for NoModel {
    fn complete(&self, _prompt: &str) -> studykit::Result<studykit::Completion> {
        Err(studykit::Error::model("no model client configured"))
    }
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("studykit=info"),
        1 => EnvFilter::new("studykit=debug"),
        _ => EnvFilter::new("studykit=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();

    Ok(())
}
