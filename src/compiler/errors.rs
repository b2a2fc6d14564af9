use std::error::Error;
use std::fmt;

/// Grammar defect, raised while compiling a grammar or on the first parse that reaches an
/// unresolvable reference
///
/// This is a configuration error on the host's side, never an input-data error: the runtime
/// refuses to absorb it as an ordinary match failure.
#[derive(Debug)]
pub struct GrammarError {
    content: GrammarErrorContent,
    accused: String,
}

impl GrammarError {
    /// Create a new grammar error accusing a piece of the grammar
    pub(crate) fn new(content: GrammarErrorContent, accused: impl Into<String>) -> Self {
        Self {
            content,
            accused: accused.into(),
        }
    }

    /// Shortcut for the defect raised when a bare identifier resolves to neither a rule nor an
    /// action
    pub(crate) fn missing_rule(name: &str) -> Self {
        Self::new(GrammarErrorContent::MissingRule, name)
    }

    /// Get the error's content
    pub fn content(&self) -> &GrammarErrorContent {
        &self.content
    }

    /// Get the piece of the grammar the error accuses
    pub fn accused(&self) -> &str {
        &self.accused
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.content {
            GrammarErrorContent::MissingLeftHandSide => {
                if self.accused.is_empty() {
                    write!(f, "Missing left hand side: no rule definition was found")
                } else {
                    write!(f, "Missing left hand side before {:?}", self.accused)
                }
            }
            GrammarErrorContent::DuplicateRule => {
                write!(f, "Rule [{}] is defined more than once", self.accused)
            }
            GrammarErrorContent::MissingRule => {
                write!(
                    f,
                    "Token [{}] names neither a rule nor an action",
                    self.accused
                )
            }
            GrammarErrorContent::BadPattern(err) => {
                write!(
                    f,
                    "Pattern [{}] is not a valid regular expression: {}",
                    self.accused, err
                )
            }
        }
    }
}

impl Error for GrammarError {}

/// Content of a [`GrammarError`]
#[derive(Debug)]
pub enum GrammarErrorContent {
    /// Text was found before the first rule's head, or the grammar defines no rule at all
    MissingLeftHandSide,

    /// The same rule name is defined twice
    DuplicateRule,

    /// A token shaped like an identifier resolves to neither a rule nor an action
    ///
    /// References are validated lazily, so this is only raised by the first parse that
    /// reaches the token.
    MissingRule,

    /// A terminal token is not a valid regular expression
    BadPattern(regex::Error),
}
