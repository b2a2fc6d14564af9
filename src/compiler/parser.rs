use super::errors::{GrammarError, GrammarErrorContent};
use super::utils::unpad_slice;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// A rule definition's head: whitespace, the rule's name, whitespace, `=`, whitespace
    static ref RULE_HEAD: Regex = Regex::new(r"\s([A-Za-z_]\w*)\s+=\s").unwrap();

    /// Separator between two alternatives of a rule's right-hand side
    static ref ALTERNATIVE_SEP: Regex = Regex::new(r"\s\|\s").unwrap();

    /// Shape of a bare identifier (a rule or action reference)
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_]\w*$").unwrap();
}

/// Compile a grammar's text into a [rule table](GrammarRules)
///
/// The table borrows the grammar text. References to other rules and to actions are *not*
/// resolved here: grammars are small and typically exercised immediately, so validation is left
/// to the first parse that reaches each reference, which keeps compilation a single linear pass.
pub fn parse_rules(grammar: &str) -> Result<GrammarRules, GrammarError> {
    // The head pattern requires surrounding whitespace, so rules sitting at the very beginning
    // or end of the text are only found on a padded copy. Every slice taken from the copy is
    // mapped back to the caller's string to keep the table borrowed.
    let padded = format!(" {} ", grammar);

    // Locate every rule head first
    let mut heads = Vec::new();

    for captures in RULE_HEAD.captures_iter(&padded) {
        let whole = captures.get(0).unwrap();
        let name = captures.get(1).unwrap();

        heads.push((
            whole.start(),
            whole.end(),
            unpad_slice(grammar, name.start(), name.end()),
        ));
    }

    if heads.is_empty() {
        return Err(GrammarError::new(
            GrammarErrorContent::MissingLeftHandSide,
            grammar.trim(),
        ));
    }

    // Reject content placed before the first rule's name
    let leading = &padded[..heads[0].0];

    if !leading.trim().is_empty() {
        return Err(GrammarError::new(
            GrammarErrorContent::MissingLeftHandSide,
            leading.trim(),
        ));
    }

    // The first rule declared is the default start rule
    let start = heads[0].2;

    let mut rules = HashMap::new();

    for (i, &(_, rhs_start, name)) in heads.iter().enumerate() {
        // The right-hand side runs up to the next rule's head (or the end of the text)
        let rhs_end = heads.get(i + 1).map(|next| next.0).unwrap_or(padded.len());
        let rhs = unpad_slice(grammar, rhs_start, rhs_end);

        // Detect duplicate rules
        if rules.contains_key(name) {
            return Err(GrammarError::new(GrammarErrorContent::DuplicateRule, name));
        }

        rules.insert(name, parse_alternatives(rhs)?);
    }

    Ok(GrammarRules { rules, start })
}

/// Split a rule's right-hand side into its alternatives
///
/// The split happens on a padded copy too, so a `|` at the very beginning or end of the
/// right-hand side produces an empty alternative — the idiom grammars use to terminate
/// recursion, as in `xs = x xs | `.
fn parse_alternatives(rhs: &str) -> Result<Vec<Alternative>, GrammarError> {
    let padded = format!(" {} ", rhs);

    let mut alternatives = Vec::new();
    let mut piece_start = 0;

    for sep in ALTERNATIVE_SEP.find_iter(&padded) {
        alternatives.push(parse_tokens(unpad_slice(rhs, piece_start, sep.start()))?);
        piece_start = sep.end();
    }

    alternatives.push(parse_tokens(unpad_slice(rhs, piece_start, padded.len()))?);

    Ok(alternatives)
}

/// Split an alternative into its classified tokens
fn parse_tokens(alternative: &str) -> Result<Alternative, GrammarError> {
    alternative.split_whitespace().map(Token::classify).collect()
}

/// Rule table compiled from a grammar's text by [`parse_rules`]
#[derive(Debug)]
pub struct GrammarRules<'g> {
    /// Rules, keyed by name
    rules: HashMap<&'g str, Vec<Alternative<'g>>>,

    /// Default start rule (the first rule defined in the grammar)
    start: &'g str,
}

impl<'g> GrammarRules<'g> {
    /// Get the default start rule's name
    pub fn start(&self) -> &'g str {
        self.start
    }

    /// Check if a rule is defined
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Get a rule's alternatives, in declaration order
    pub fn alternatives(&self, name: &str) -> Option<&[Alternative<'g>]> {
        self.rules.get(name).map(|alternatives| alternatives.as_slice())
    }

    /// Iterate over the defined rule names (in no particular order)
    pub fn names(&self) -> impl Iterator<Item = &'g str> + '_ {
        self.rules.keys().copied()
    }

    /// Get the table's own copy of a rule's name, suited for long-lived cache keys
    pub(crate) fn name_key(&self, name: &str) -> Option<&'g str> {
        self.rules.get_key_value(name).map(|(key, _)| *key)
    }
}

/// One alternative of a rule: the sequence of tokens it must match, left to right
pub type Alternative<'g> = Vec<Token<'g>>;

/// A single classified token of an alternative
///
/// Classification happens once, here in the compiler, so the engine never re-derives a token's
/// kind from its text; only the rule-or-action decision for [`Token::Ident`] is deferred to
/// match time.
#[derive(Debug)]
pub enum Token<'g> {
    /// `!token`: succeeds when the wrapped token fails, consuming nothing
    Not(Box<Token<'g>>),

    /// Bare identifier, resolved at match time against the rule table first, then the action
    /// table
    Ident(&'g str),

    /// `'…'`: matched verbatim
    Literal(&'g str),

    /// `/…/`, or any other shape: a regular expression matched at the current position
    Pattern(Regex),
}

impl<'g> Token<'g> {
    /// Classify a raw token by its lexical shape
    pub(crate) fn classify(raw: &'g str) -> Result<Self, GrammarError> {
        if raw.len() > 1 && raw.starts_with('!') {
            return Ok(Token::Not(Box::new(Token::classify(&raw[1..])?)));
        }

        if IDENTIFIER.is_match(raw) {
            return Ok(Token::Ident(raw));
        }

        if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
            return Ok(Token::Literal(&raw[1..raw.len() - 1]));
        }

        let pattern = if raw.len() > 2 && raw.starts_with('/') && raw.ends_with('/') {
            &raw[1..raw.len() - 1]
        } else {
            raw
        };

        // Patterns only ever match the beginning of the remaining subject, so they are anchored
        // once here instead of at every match attempt
        match Regex::new(&format!("^(?:{})", pattern)) {
            Ok(regex) => Ok(Token::Pattern(regex)),
            Err(err) => Err(GrammarError::new(
                GrammarErrorContent::BadPattern(err),
                raw,
            )),
        }
    }
}
