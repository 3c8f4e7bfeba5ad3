//! Verdicts returned by the oracle.
//!
//! Whatever the judge behind the oracle produces is narrowed to one of four
//! outcomes before the game engine sees it. The vocabulary is closed: `win`,
//! `yes`, `no` and `unsure`. A negative answer to a guess is kept apart from a
//! negative answer to a question so the transcript can record it as a guess.

/// A determinate answer to a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Affirmative.
    Yes,
    /// Negative.
    No,
}

impl Answer {
    /// Parse an answer word, ignoring case, surrounding whitespace and
    /// trailing `.` or `!`.
    pub fn parse(s: &str) -> Option<Self> {
        let word = s.trim().trim_end_matches(['.', '!']).trim_end();
        if word.eq_ignore_ascii_case("yes") {
            Some(Self::Yes)
        } else if word.eq_ignore_ascii_case("no") {
            Some(Self::No)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
        }
    }
}

/// The oracle's classification of one player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The input names the secret item, exactly or by synonym.
    Win,
    /// The input was a clean yes/no question.
    PlainAnswer(Answer),
    /// The input was a guess that does not name the secret item.
    WrongGuess,
    /// The input is ambiguous, subjective, multi-part, or not a question.
    NeedsClarification,
}

impl Verdict {
    /// The word from the closed oracle vocabulary this verdict maps to.
    pub fn token(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::PlainAnswer(Answer::Yes) => "yes",
            Self::PlainAnswer(Answer::No) | Self::WrongGuess => "no",
            Self::NeedsClarification => "unsure",
        }
    }

    /// Whether this verdict spends one question from the budget.
    pub fn consumes_question(self) -> bool {
        !matches!(self, Self::NeedsClarification)
    }

    /// Response text shown when the oracle supplies none of its own.
    pub fn default_response(self) -> &'static str {
        match self {
            Self::Win => "Correct! You got it!",
            Self::PlainAnswer(Answer::Yes) => "Yes",
            Self::PlainAnswer(Answer::No) => "No",
            Self::WrongGuess => "No, that's not correct.",
            Self::NeedsClarification => "Could you be more specific?",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win => write!(f, "Win"),
            Self::PlainAnswer(answer) => write!(f, "{answer}"),
            Self::WrongGuess => write!(f, "Wrong Guess"),
            Self::NeedsClarification => write!(f, "Needs Clarification"),
        }
    }
}

/// A verdict together with the text to show the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The classified outcome.
    pub verdict: Verdict,
    /// Human-readable response from the oracle.
    pub content: String,
}

impl Evaluation {
    /// Build an evaluation, falling back to the verdict's default text when
    /// `content` is blank.
    pub fn new(verdict: Verdict, content: impl Into<String>) -> Self {
        let content = content.into();
        let content = if content.trim().is_empty() {
            verdict.default_response().to_string()
        } else {
            content.trim().to_string()
        };
        Self { verdict, content }
    }

    /// An evaluation carrying only the verdict's default text.
    pub fn bare(verdict: Verdict) -> Self {
        Self::new(verdict, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_answer_words() {
        assert_eq!(Answer::parse("Yes"), Some(Answer::Yes));
        assert_eq!(Answer::parse("  no "), Some(Answer::No));
        assert_eq!(Answer::parse("YES!"), Some(Answer::Yes));
        assert_eq!(Answer::parse("No."), Some(Answer::No));
    }

    #[test]
    fn parse_answer_rejects_anything_else() {
        assert_eq!(Answer::parse("maybe"), None);
        assert_eq!(Answer::parse("yes and no"), None);
        assert_eq!(Answer::parse("Yes, it is a fruit"), None);
        assert_eq!(Answer::parse(""), None);
    }

    #[test]
    fn tokens_stay_in_closed_vocabulary() {
        let all = [
            Verdict::Win,
            Verdict::PlainAnswer(Answer::Yes),
            Verdict::PlainAnswer(Answer::No),
            Verdict::WrongGuess,
            Verdict::NeedsClarification,
        ];
        for v in all {
            assert!(["win", "yes", "no", "unsure"].contains(&v.token()));
        }
    }

    #[test]
    fn only_clarification_is_free() {
        assert!(!Verdict::NeedsClarification.consumes_question());
        assert!(Verdict::Win.consumes_question());
        assert!(Verdict::WrongGuess.consumes_question());
        assert!(Verdict::PlainAnswer(Answer::No).consumes_question());
    }

    #[test]
    fn blank_content_uses_default() {
        let e = Evaluation::new(Verdict::NeedsClarification, "   ");
        assert_eq!(e.content, "Could you be more specific?");

        let e = Evaluation::new(Verdict::Win, " Correct! It was an apple. ");
        assert_eq!(e.content, "Correct! It was an apple.");
    }

    #[test]
    fn display() {
        assert_eq!(Verdict::PlainAnswer(Answer::Yes).to_string(), "Yes");
        assert_eq!(Verdict::WrongGuess.to_string(), "Wrong Guess");
    }
}
