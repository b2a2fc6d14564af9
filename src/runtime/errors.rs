use crate::compiler::GrammarError;
use std::error::Error;
use std::fmt;

/// Error raised by a [parse attempt](super::Parser::parse)
#[derive(Debug)]
pub enum ParseError {
    /// Grammar defect discovered while matching (e.g. a reference to a missing rule)
    ///
    /// Deliberately not absorbed by ordered choice: it aborts the whole parse.
    Grammar(GrammarError),

    /// No alternative of the requested rule matched the subject
    Unparsable(Unparsable),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Grammar(err) => write!(f, "{}", err),
            ParseError::Unparsable(err) => write!(f, "{}", err),
        }
    }
}

impl Error for ParseError {}

impl From<GrammarError> for ParseError {
    fn from(err: GrammarError) -> Self {
        ParseError::Grammar(err)
    }
}

/// Failed top-level match: the requested rule matched none of its alternatives at the beginning
/// of the subject
#[derive(Debug)]
pub struct Unparsable {
    rule: String,
    subject: String,
    position: usize,
}

impl Unparsable {
    /// Create a new top-level failure
    pub(crate) fn new(rule: &str, subject: &str, position: usize) -> Self {
        Self {
            rule: rule.to_owned(),
            subject: subject.to_owned(),
            position,
        }
    }

    /// Get the name of the rule that failed to match
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Get the subject the rule was matched against
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Get the farthest subject offset reached by any token attempt during the parse
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for Unparsable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Locate the failure's line and column in the subject
        let head = &self.subject[..self.position];
        let line_index = head.matches('\n').count();
        let line_start = head.rfind('\n').map(|at| at + 1).unwrap_or(0);
        let column = self.position - line_start;
        let line = self.subject.lines().nth(line_index).unwrap_or("");

        write!(
            f,
            "Rule [{}] could not match the subject\nAt line {}, column {}:\n\n{} | {}\n{}^",
            self.rule,
            line_index + 1,
            column + 1,
            line_index + 1,
            line,
            " ".repeat(column + (line_index + 1).to_string().len() + 3),
        )
    }
}

impl Error for Unparsable {}
