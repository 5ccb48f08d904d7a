use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// Score weights. Tunable, but the exact values are load-bearing for the
// detail-level bands in `MindmapConfig::from_score`.
const WORD_WEIGHT: f64 = 0.4;
const SENTENCE_WEIGHT: f64 = 0.3;
const PARAGRAPH_WEIGHT: f64 = 0.2;
const HEADING_WEIGHT: f64 = 0.1;

static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

static PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

// A line that starts with a capital letter and carries no terminal
// punctuation anywhere — a heuristic proxy for a section title.
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[A-Z][^.!?\n]*$").expect("valid regex"));

/// Basic statistics and a complexity score for a piece of document text.
///
/// Created once per analysis call; not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStats {
    /// Whitespace-delimited word count
    pub word_count: usize,

    /// Total character count
    pub char_count: usize,

    /// Estimated sentence count (runs of terminal punctuation)
    pub sentence_count: usize,

    /// Blank-line-delimited paragraph count (floor of 1 for non-empty text)
    pub paragraph_count: usize,

    /// Heuristic count of lines that look like section titles
    pub heading_count: usize,

    /// Weighted complexity score derived from the counts above
    pub complexity_score: f64,
}

/// Analyzes raw text and produces [`TextStats`].
///
/// Empty input returns all-zero counts with a score of `0.0` rather than an
/// error.
///
/// # Examples
///
/// ```
/// let stats = studykit::analyze("One sentence. Another one!");
/// assert_eq!(stats.sentence_count, 2);
/// assert_eq!(stats.paragraph_count, 1);
/// ```
#[must_use]
pub fn analyze(text: &str) -> TextStats {
    if text.is_empty() {
        return TextStats {
            word_count: 0,
            char_count: 0,
            sentence_count: 0,
            paragraph_count: 0,
            heading_count: 0,
            complexity_score: 0.0,
        };
    }

    let word_count = text.split_whitespace().count();
    let char_count = text.chars().count();
    let sentence_count = SENTENCE_RE.find_iter(text).count();
    let paragraph_count = PARAGRAPH_RE.split(text.trim()).count().max(1);
    let heading_count = HEADING_RE.find_iter(text).count();

    let complexity_score = (word_count as f64 / 100.0) * WORD_WEIGHT
        + (sentence_count as f64 / 10.0) * SENTENCE_WEIGHT
        + (paragraph_count as f64 / 5.0) * PARAGRAPH_WEIGHT
        + (heading_count as f64 / 3.0) * HEADING_WEIGHT;

    TextStats {
        word_count,
        char_count,
        sentence_count,
        paragraph_count,
        heading_count,
        complexity_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_empty() {
        let stats = analyze("");

        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.char_count, 0);
        assert_eq!(stats.sentence_count, 0);
        assert_eq!(stats.paragraph_count, 0);
        assert_eq!(stats.heading_count, 0);
        assert_eq!(stats.complexity_score, 0.0);
    }

    #[test]
    fn test_word_and_char_counts() {
        let stats = analyze("alpha beta   gamma");
        assert_eq!(stats.word_count, 3);
        assert_eq!(stats.char_count, 18);
    }

    #[test]
    fn test_sentence_count_runs_collapse() {
        // "..." and "?!" each count as a single terminal run
        let stats = analyze("Wait... Really?! Yes.");
        assert_eq!(stats.sentence_count, 3);
    }

    #[test]
    fn test_paragraph_count() {
        let stats = analyze("first paragraph\n\nsecond paragraph\n \nthird");
        assert_eq!(stats.paragraph_count, 3);

        // No blank lines at all still counts as one paragraph
        let stats = analyze("just one\nparagraph here");
        assert_eq!(stats.paragraph_count, 1);
    }

    #[test]
    fn test_heading_count() {
        let text = "Introduction\n\nThis is body text. It has sentences.\n\nMethods And Materials\nmore body";
        let stats = analyze(text);
        assert_eq!(stats.heading_count, 2);
    }

    #[test]
    fn test_heading_requires_capital_start() {
        let stats = analyze("lowercase line\nAnother Line");
        assert_eq!(stats.heading_count, 1);
    }

    #[test]
    fn test_line_with_terminal_punctuation_is_not_heading() {
        let stats = analyze("This line ends badly.");
        assert_eq!(stats.heading_count, 0);
    }

    #[test]
    fn test_complexity_score_formula() {
        // 200 words, 20 sentences, 5 paragraphs, 3 headings:
        // 0.4*2 + 0.3*2 + 0.2*1 + 0.1*1 = 1.7
        let mut text = String::new();
        for p in 0..5 {
            if p > 0 {
                text.push_str("\n\n");
            }
            text.push_str("Heading Line\n");
            for _ in 0..4 {
                // 10 words per sentence, 4 sentences per paragraph
                text.push_str("one two three four five six seven eight nine ten. ");
            }
        }
        // Only 3 of the 5 heading lines should match: make two of them lowercase
        let text = text.replacen("Heading Line", "heading line", 2);

        let stats = analyze(&text);
        assert_eq!(stats.sentence_count, 20);
        assert_eq!(stats.paragraph_count, 5);
        assert_eq!(stats.heading_count, 3);
        // 5 paragraphs * (2 heading words + 40 body words) = 210 words
        assert_eq!(stats.word_count, 210);

        let expected = (210.0 / 100.0) * 0.4 + 2.0 * 0.3 + 1.0 * 0.2 + 1.0 * 0.1;
        assert!((stats.complexity_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_score_grows_with_volume() {
        let small = analyze("Short text. Two sentences here.");
        let large = analyze(&"Long sentence with many words repeated over. ".repeat(100));
        assert!(large.complexity_score > small.complexity_score);
    }
}
