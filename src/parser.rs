use serde::{Deserialize, Serialize};
use tracing::debug;

const CARD_MARKER: &str = "CARD";
const QUESTION_MARKER: &str = "QUESTION";
const OPTION_PREFIXES: [&str; 4] = ["A)", "B)", "C)", "D)"];

/// A question/answer study card.
///
/// Both fields are non-empty by construction: blocks missing either line are
/// dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Question side of the card
    pub question: String,

    /// Answer side of the card
    pub answer: String,
}

/// A multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question text
    pub question: String,

    /// Exactly four options, each carrying its `A)`-`D)` label
    pub options: Vec<String>,

    /// Expected correct label (`A`-`D`); may be empty if the model omitted it
    pub correct: String,

    /// Explanation of the correct answer; may be empty
    pub explanation: String,
}

impl QuizQuestion {
    /// Returns true if the given label matches the expected answer.
    #[must_use]
    pub fn is_correct(&self, label: &str) -> bool {
        !self.correct.is_empty() && self.correct == label
    }
}

/// Extracts flashcards from free-form model text.
///
/// The text is split on the literal `CARD` marker; anything before the first
/// marker is preamble and discarded. Within each block the first `Q:` line
/// and the first `A:` line are used. Blocks missing either line are dropped
/// silently — lenient parsing against an unreliable collaborator. Zero cards
/// is a valid outcome.
#[must_use]
pub fn parse_flashcards(text: &str) -> Vec<Flashcard> {
    let mut cards = Vec::new();

    for block in text.split(CARD_MARKER).skip(1) {
        let mut question = None;
        let mut answer = None;

        for line in block.lines() {
            let line = line.trim();
            if question.is_none() {
                if let Some(rest) = line.strip_prefix("Q:") {
                    question = Some(rest.trim().to_string());
                    continue;
                }
            }
            if answer.is_none() {
                if let Some(rest) = line.strip_prefix("A:") {
                    answer = Some(rest.trim().to_string());
                }
            }
        }

        match (question, answer) {
            (Some(q), Some(a)) if !q.is_empty() && !a.is_empty() => {
                cards.push(Flashcard {
                    question: q,
                    answer: a,
                });
            }
            _ => debug!("Dropping malformed flashcard block"),
        }
    }

    cards
}

/// Extracts quiz questions from free-form model text.
///
/// The text is split on the literal `QUESTION` marker with the preamble
/// discarded. Option lines are collected in encountered order, not reordered
/// by label. A block is accepted only with a non-empty question and exactly
/// four options; `CORRECT:` and `EXPLANATION:` are optional. Zero questions
/// is a valid outcome.
#[must_use]
pub fn parse_quiz(text: &str) -> Vec<QuizQuestion> {
    let mut questions = Vec::new();

    for block in text.split(QUESTION_MARKER).skip(1) {
        let mut question = None;
        let mut options = Vec::new();
        let mut correct = None;
        let mut explanation = None;

        for line in block.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if question.is_none() {
                if let Some(rest) = line.strip_prefix("Q:") {
                    question = Some(rest.trim().to_string());
                    continue;
                }
            }
            if OPTION_PREFIXES.iter().any(|p| line.starts_with(p)) {
                options.push(line.to_string());
                continue;
            }
            if correct.is_none() {
                if let Some(rest) = line.strip_prefix("CORRECT:") {
                    correct = Some(rest.trim().to_string());
                    continue;
                }
            }
            if explanation.is_none() {
                if let Some(rest) = line.strip_prefix("EXPLANATION:") {
                    explanation = Some(rest.trim().to_string());
                }
            }
        }

        let question = question.unwrap_or_default();
        if !question.is_empty() && options.len() == OPTION_PREFIXES.len() {
            questions.push(QuizQuestion {
                question,
                options,
                correct: correct.unwrap_or_default(),
                explanation: explanation.unwrap_or_default(),
            });
        } else {
            debug!(
                "Dropping malformed quiz block ({} options)",
                options.len()
            );
        }
    }

    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flashcards_basic() {
        let text = "\
Here are your cards:
CARD 1:
Q: What is photosynthesis?
A: Conversion of light into chemical energy.
CARD 2:
Q: Where does it occur?
A: In chloroplasts.";

        let cards = parse_flashcards(text);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "What is photosynthesis?");
        assert_eq!(cards[1].answer, "In chloroplasts.");
    }

    #[test]
    fn test_parse_flashcards_drops_incomplete_block() {
        let text = "\
CARD 1:
Q: First question?
A: First answer.
CARD 2:
Q: Second question?
A: Second answer.
CARD 3:
Q: Third question?
A: Third answer.
CARD 4:
Q: Missing its answer line?";

        let cards = parse_flashcards(text);

        assert_eq!(cards.len(), 3);
        assert!(cards.iter().all(|c| !c.answer.is_empty()));
    }

    #[test]
    fn test_parse_flashcards_first_occurrence_wins() {
        let text = "\
CARD 1:
Q: Real question?
A: Real answer.
Q: Stray duplicate line
A: Stray answer";

        let cards = parse_flashcards(text);

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "Real question?");
        assert_eq!(cards[0].answer, "Real answer.");
    }

    #[test]
    fn test_parse_flashcards_preamble_and_garbage() {
        assert!(parse_flashcards("No markers at all here.").is_empty());
        assert!(parse_flashcards("").is_empty());
    }

    #[test]
    fn test_parse_quiz_basic() {
        let text = "\
QUESTION 1:
Q: What powers photosynthesis?
A) Light
B) Sound
C) Heat
D) Pressure
CORRECT: A
EXPLANATION: Light drives the reaction.";

        let questions = parse_quiz(text);

        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.question, "What powers photosynthesis?");
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.options[0], "A) Light");
        assert_eq!(q.correct, "A");
        assert!(q.is_correct("A"));
        assert!(!q.is_correct("B"));
    }

    #[test]
    fn test_parse_quiz_rejects_three_options() {
        let text = "\
QUESTION 1:
Q: Incomplete question?
A) One
B) Two
C) Three
CORRECT: B
EXPLANATION: Still rejected without a fourth option.";

        assert!(parse_quiz(text).is_empty());
    }

    #[test]
    fn test_parse_quiz_optional_correct_and_explanation() {
        let text = "\
QUESTION 1:
Q: Which is a noble gas?
A) Helium
B) Oxygen
C) Nitrogen
D) Hydrogen";

        let questions = parse_quiz(text);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct, "");
        assert_eq!(questions[0].explanation, "");
        assert!(!questions[0].is_correct("A"));
    }

    #[test]
    fn test_parse_quiz_options_keep_encountered_order() {
        let text = "\
QUESTION 1:
Q: Scrambled labels?
B) Second listed first
A) First listed second
D) Fourth listed third
C) Third listed fourth
CORRECT: C";

        let questions = parse_quiz(text);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options[0], "B) Second listed first");
        assert_eq!(questions[0].options[3], "C) Third listed fourth");
    }

    #[test]
    fn test_parse_quiz_mixed_good_and_bad_blocks() {
        let text = "\
Intro chatter from the model.
QUESTION 1:
Q: Good one?
A) a
B) b
C) c
D) d
CORRECT: D
QUESTION 2:
A) options without a question line
B) b
C) c
D) d
QUESTION 3:
Q: Another good one?
A) a
B) b
C) c
D) d";

        let questions = parse_quiz(text);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "Good one?");
        assert_eq!(questions[1].question, "Another good one?");
    }

    #[test]
    fn test_flashcard_serde_round_trip() {
        let card = Flashcard {
            question: "Q".to_string(),
            answer: "A".to_string(),
        };
        let json = serde_json::to_string(&card).unwrap();
        let back: Flashcard = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
