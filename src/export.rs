use crate::{
    error::{Error, Result},
    parser::{Flashcard, QuizQuestion},
    pipeline::{DocumentReport, SummaryResult},
};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Writes generated artifacts to disk with atomic operations.
pub struct Exporter {
    output_dir: PathBuf,
    backup_existing: bool,
}

impl Exporter {
    /// Creates an exporter targeting the given directory.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, backup_existing: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            backup_existing,
        }
    }

    /// Writes the mindmap as markdown plus a minimal HTML rendering.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created or a file
    /// write fails.
    pub fn write_mindmap(&self, markdown: &str) -> Result<Vec<PathBuf>> {
        let md_path = self.write_artifact("mindmap.md", markdown)?;

        let html = format!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Mindmap</title></head>\n\
             <body><pre>{}</pre></body></html>\n",
            html_escape(markdown)
        );
        let html_path = self.write_artifact("mindmap.html", &html)?;

        Ok(vec![md_path, html_path])
    }

    /// Writes flashcards as JSON and as reviewable markdown.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or a file write fails.
    pub fn write_flashcards(&self, cards: &[Flashcard]) -> Result<Vec<PathBuf>> {
        let json = serde_json::to_string_pretty(cards)?;
        let json_path = self.write_artifact("flashcards.json", &json)?;

        let md_path = self.write_artifact("flashcards.md", &render_flashcards_markdown(cards))?;

        Ok(vec![json_path, md_path])
    }

    /// Writes the quiz as JSON and as reviewable markdown.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or a file write fails.
    pub fn write_quiz(&self, questions: &[QuizQuestion]) -> Result<Vec<PathBuf>> {
        let json = serde_json::to_string_pretty(questions)?;
        let json_path = self.write_artifact("quiz.json", &json)?;

        let md_path = self.write_artifact("quiz.md", &render_quiz_markdown(questions))?;

        Ok(vec![json_path, md_path])
    }

    /// Writes the summary as plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file write fails.
    pub fn write_summary(&self, result: &SummaryResult) -> Result<Vec<PathBuf>> {
        let path = self.write_artifact("summary.txt", &result.summary)?;
        Ok(vec![path])
    }

    /// Writes the document analysis report as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn write_report(&self, report: &DocumentReport) -> Result<Vec<PathBuf>> {
        let json = serde_json::to_string_pretty(report)?;
        let path = self.write_artifact("analysis.json", &json)?;
        Ok(vec![path])
    }

    fn write_artifact(&self, filename: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::io(&self.output_dir, e))?;

        let path = self.output_dir.join(filename);
        self.write_file_atomic(&path, content)?;

        info!("Wrote {}", path.display());
        Ok(path)
    }

    /// Writes a file atomically with optional backup.
    ///
    /// Content goes to a temporary file first, is synced, then renamed over
    /// the target so an interrupted write never leaves a truncated artifact.
    fn write_file_atomic(&self, path: &Path, content: &str) -> Result<()> {
        if path.exists() && self.backup_existing {
            backup_file(path)?;
        }

        let temp_path = path.with_extension("tmp");
        let mut temp_file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;

        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| Error::io(&temp_path, e))?;

        temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

        drop(temp_file);

        fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;

        Ok(())
    }
}

/// Creates a timestamped backup of an existing file.
fn backup_file(path: &Path) -> Result<()> {
    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S%3f");

    let filename = path
        .file_name()
        .ok_or_else(|| Error::config("Invalid file path"))?
        .to_string_lossy();

    let backup_name = format!("{filename}.backup.{timestamp}");
    let backup_path = path
        .parent()
        .ok_or_else(|| Error::config("Invalid file path"))?
        .join(backup_name);

    fs::copy(path, &backup_path).map_err(|e| Error::io(&backup_path, e))?;

    debug!("Created backup: {}", backup_path.display());
    Ok(())
}

/// Renders flashcards as a reviewable markdown document.
#[must_use]
pub fn render_flashcards_markdown(cards: &[Flashcard]) -> String {
    let mut out = format!("# Flashcards ({} cards)\n", cards.len());

    for (i, card) in cards.iter().enumerate() {
        out.push_str(&format!(
            "\n## Card {}\n\n**Q:** {}\n\n**A:** {}\n",
            i + 1,
            card.question,
            card.answer
        ));
    }

    out
}

/// Renders a quiz as a markdown document with an answer key at the end.
#[must_use]
pub fn render_quiz_markdown(questions: &[QuizQuestion]) -> String {
    let mut out = format!("# Quiz ({} questions)\n", questions.len());

    for (i, q) in questions.iter().enumerate() {
        out.push_str(&format!("\n## Question {}\n\n{}\n\n", i + 1, q.question));
        for option in &q.options {
            out.push_str(&format!("- {option}\n"));
        }
    }

    out.push_str("\n## Answer Key\n\n");
    for (i, q) in questions.iter().enumerate() {
        let correct = if q.correct.is_empty() { "?" } else { &q.correct };
        out.push_str(&format!("{}. **{}**", i + 1, correct));
        if !q.explanation.is_empty() {
            out.push_str(&format!(": {}", q.explanation));
        }
        out.push('\n');
    }

    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
