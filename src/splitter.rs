use crate::config::Config;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

const PARAGRAPH_SEPARATOR: &str = "\n\n";

static PARAGRAPH_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

/// Splits document text into paragraph-aligned chunks for model requests.
///
/// Chunk size is a soft ceiling: a single paragraph longer than the limit is
/// placed whole into its own chunk rather than split mid-paragraph. Callers
/// must not assume chunk length is strictly bounded.
pub struct Splitter {
    max_chunk_size: usize,
}

impl Splitter {
    /// Creates a new splitter from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            max_chunk_size: config.max_chunk_size,
        }
    }

    /// Creates a splitter with an explicit chunk size.
    #[must_use]
    pub const fn with_max_size(max_chunk_size: usize) -> Self {
        Self { max_chunk_size }
    }

    /// Splits text into ordered chunks.
    ///
    /// Text at or below the size limit is returned as a single chunk equal to
    /// the whole input. Larger text is split on blank-line boundaries and
    /// paragraphs are greedily packed into chunks of at most
    /// `max_chunk_size` characters.
    #[must_use]
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.len() <= self.max_chunk_size {
            return vec![text.to_string()];
        }

        let paragraphs: Vec<&str> = PARAGRAPH_BOUNDARY_RE
            .split(text)
            .filter(|p| !p.trim().is_empty())
            .collect();

        let mut chunks = Vec::new();
        let mut current = String::new();

        for paragraph in paragraphs {
            // `current` already carries a trailing separator, so the length
            // check accounts for the joined size of the finished chunk.
            if current.len() + paragraph.len() <= self.max_chunk_size {
                current.push_str(paragraph);
                current.push_str(PARAGRAPH_SEPARATOR);
            } else {
                if !current.is_empty() {
                    chunks.push(current.trim().to_string());
                }
                current = String::with_capacity(paragraph.len() + PARAGRAPH_SEPARATOR.len());
                current.push_str(paragraph);
                current.push_str(PARAGRAPH_SEPARATOR);

                if paragraph.len() > self.max_chunk_size {
                    warn!(
                        "Paragraph of {} chars exceeds chunk limit of {}; keeping it whole",
                        paragraph.len(),
                        self.max_chunk_size
                    );
                }
            }
        }

        if !current.is_empty() {
            chunks.push(current.trim().to_string());
        }

        debug!(
            "Split {} chars into {} chunks (limit {})",
            text.len(),
            chunks.len(),
            self.max_chunk_size
        );

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(word: &str, len: usize) -> String {
        let unit = format!("{word} ");
        let mut p = unit.repeat(len / unit.len() + 1);
        p.truncate(len);
        p
    }

    #[test]
    fn test_small_text_single_chunk() {
        let splitter = Splitter::with_max_size(100);
        let text = "short text\n\nwith two paragraphs";

        assert_eq!(splitter.chunk(text), vec![text.to_string()]);
    }

    #[test]
    fn test_text_exactly_at_limit() {
        let splitter = Splitter::with_max_size(10);
        let text = "aaaaaaaaaa";

        assert_eq!(splitter.chunk(text), vec![text.to_string()]);
    }

    #[test]
    fn test_greedy_packing() {
        let splitter = Splitter::with_max_size(100);
        let paragraphs: Vec<String> = (0..5).map(|_| paragraph("word", 40)).collect();
        let text = paragraphs.join("\n\n");
        assert!(text.len() > 100);

        let chunks = splitter.chunk(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert!(chunk.len() <= 100, "chunk of {} chars exceeds limit", chunk.len());
        }
    }

    #[test]
    fn test_paragraph_order_preserved() {
        let splitter = Splitter::with_max_size(30);
        let text = "alpha alpha alpha\n\nbeta beta beta\n\ngamma gamma gamma\n\ndelta delta delta";

        let chunks = splitter.chunk(&text);
        let rejoined: Vec<&str> = chunks
            .iter()
            .flat_map(|c| PARAGRAPH_BOUNDARY_RE.split(c))
            .collect();

        assert_eq!(
            rejoined,
            vec![
                "alpha alpha alpha",
                "beta beta beta",
                "gamma gamma gamma",
                "delta delta delta"
            ]
        );
    }

    #[test]
    fn test_oversized_paragraph_kept_whole() {
        let splitter = Splitter::with_max_size(50);
        let big = paragraph("big", 120);
        let text = format!("small one\n\n{big}\n\nsmall two");

        let chunks = splitter.chunk(&text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1], big.trim());
        assert!(chunks[1].len() > 50);
    }

    #[test]
    fn test_blank_line_runs_produce_no_empty_chunks() {
        let splitter = Splitter::with_max_size(20);
        let text = "first first first\n\n\n\n  \n\nsecond second second";

        let chunks = splitter.chunk(&text);

        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_forty_thousand_chars_two_chunks() {
        let splitter = Splitter::with_max_size(25_000);
        let paragraphs: Vec<String> = (0..40).map(|_| paragraph("lorem", 1_000)).collect();
        let text = paragraphs.join("\n\n");
        assert!(text.len() > 25_000 && text.len() < 50_000);

        let chunks = splitter.chunk(&text);

        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() <= 25_000));
    }
}
