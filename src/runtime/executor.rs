use super::data::MatchState;
use super::errors::{ParseError, Unparsable};
use crate::compiler::{GrammarError, GrammarRules, Token};
use log::{debug, trace};
use std::collections::HashMap;
use std::fmt;

/// A compiled rule table paired with its action table
///
/// Obtained from [`compile`](crate::compile). The parser is reusable: every call to
/// [`parse`](Parser::parse) owns its working state, so independent subjects can be matched one
/// after the other (or from several threads, as the tables are never written to after
/// compilation).
#[derive(Debug)]
pub struct Parser<'g, V> {
    rules: GrammarRules<'g>,
    actions: Actions<V>,
}

impl<'g, V> Parser<'g, V> {
    /// Pair a rule table with an action table
    pub fn new(rules: GrammarRules<'g>, actions: Actions<V>) -> Self {
        Self { rules, actions }
    }

    /// Get the parser's rule table
    pub fn rules(&self) -> &GrammarRules<'g> {
        &self.rules
    }
}

impl<'g, V: Clone + From<String>> Parser<'g, V> {
    /// Match a subject against the grammar's default start rule (the first rule defined)
    ///
    /// On success, the values produced by the rule are returned; the match is not required to
    /// consume the whole subject (grammars demand it with a final `!/./` token).
    pub fn parse(&self, subject: &str) -> Result<Vec<V>, ParseError> {
        self.parse_rule(self.rules.start(), subject)
    }

    /// Match a subject against a named rule
    pub fn parse_rule(&self, rule: &str, subject: &str) -> Result<Vec<V>, ParseError> {
        let name = self
            .rules
            .name_key(rule)
            .ok_or_else(|| GrammarError::missing_rule(rule))?;

        debug!(
            "parsing rule [{}] against {} byte(s) of subject",
            rule,
            subject.len()
        );

        let mut session = Session {
            rules: &self.rules,
            actions: &self.actions,
            subject,
            memo: HashMap::new(),
        };

        match session.eval_rule(name, 0)? {
            MatchState::Matched { vals, .. } => Ok(vals),
            MatchState::Failed { far } => {
                Err(ParseError::Unparsable(Unparsable::new(rule, subject, far)))
            }
        }
    }
}

/// Working state owned by a single top-level parse call
///
/// The memo cache collapses re-evaluation of a rule at an already-visited position, which
/// bounds a whole parse to rules × positions attempts where naive backtracking descent can
/// revisit the same combination exponentially many times.
struct Session<'s, 'g, V> {
    rules: &'s GrammarRules<'g>,
    actions: &'s Actions<V>,
    subject: &'s str,
    memo: HashMap<(&'g str, usize), MatchState<V>>,
}

impl<'s, 'g, V: Clone + From<String>> Session<'s, 'g, V> {
    /// Evaluate a rule at a subject position, trying its alternatives in declaration order
    fn eval_rule(&mut self, name: &'g str, pos: usize) -> Result<MatchState<V>, GrammarError> {
        if let Some(state) = self.memo.get(&(name, pos)) {
            trace!("rule [{}] at {}: memoized", name, pos);
            return Ok(state.clone());
        }

        let rules = self.rules;
        let alternatives = match rules.alternatives(name) {
            Some(alternatives) => alternatives,
            None => return Err(GrammarError::missing_rule(name)),
        };

        trace!(
            "rule [{}] at {}: trying {} alternative(s)",
            name,
            pos,
            alternatives.len()
        );

        // Farthest offset reached by any token attempt, folded across failed alternatives too
        let mut farthest = pos;

        'alternatives: for tokens in alternatives {
            let mut at = pos;
            let mut vals = Vec::new();

            for token in tokens {
                let state = self.match_token(token, at, std::mem::take(&mut vals))?;
                farthest = farthest.max(state.far());

                match state {
                    MatchState::Matched {
                        end,
                        vals: threaded,
                        ..
                    } => {
                        at = end;
                        vals = threaded;
                    }
                    MatchState::Failed { .. } => continue 'alternatives,
                }
            }

            // First fully-matching alternative wins (ordered choice)
            let state = MatchState::Matched {
                end: at,
                far: farthest,
                vals,
            };

            self.memo.insert((name, pos), state.clone());
            return Ok(state);
        }

        let state = MatchState::Failed { far: farthest };

        self.memo.insert((name, pos), state.clone());
        Ok(state)
    }

    /// Match a single token at a subject position, threading the values accumulated by the
    /// current alternative
    fn match_token(
        &mut self,
        token: &Token<'g>,
        pos: usize,
        mut vals: Vec<V>,
    ) -> Result<MatchState<V>, GrammarError> {
        match token {
            // Negative lookahead: succeeds when the wrapped token fails, consuming nothing and
            // leaving the values untouched. The probe's own progress is discarded so negation
            // never extends the diagnostic frontier.
            Token::Not(inner) => match self.match_token(inner, pos, vals.clone())? {
                MatchState::Matched { .. } => Ok(MatchState::Failed { far: pos }),
                MatchState::Failed { .. } => Ok(MatchState::Matched {
                    end: pos,
                    far: pos,
                    vals,
                }),
            },

            Token::Ident(name) => {
                let name = *name;

                // Rules shadow actions of the same name
                if self.rules.contains(name) {
                    match self.eval_rule(name, pos)? {
                        MatchState::Matched {
                            end,
                            far,
                            vals: produced,
                        } => {
                            vals.extend(produced);
                            Ok(MatchState::Matched { end, far, vals })
                        }
                        failed => Ok(failed),
                    }
                } else if let Some(action) = self.actions.get(name) {
                    // The action replaces every pending value with its single result, and
                    // consumes no input
                    Ok(MatchState::Matched {
                        end: pos,
                        far: pos,
                        vals: vec![action(vals)],
                    })
                } else {
                    // An identifier naming nothing is a grammar defect, not a match failure: it
                    // propagates out of the ordered-choice loops instead of being absorbed as a
                    // failed alternative
                    Err(GrammarError::missing_rule(name))
                }
            }

            Token::Literal(text) => {
                if self.subject[pos..].starts_with(text) {
                    let end = pos + text.len();

                    Ok(MatchState::Matched {
                        end,
                        far: end,
                        vals,
                    })
                } else {
                    Ok(MatchState::Failed { far: pos })
                }
            }

            Token::Pattern(pattern) => match pattern.captures(&self.subject[pos..]) {
                Some(captures) => {
                    // Group 0 always exists; it only advances the position, while capture
                    // groups that participated in the match each produce a value
                    let end = pos + captures.get(0).unwrap().end();

                    for group in captures.iter().skip(1).flatten() {
                        vals.push(V::from(group.as_str().to_owned()));
                    }

                    Ok(MatchState::Matched {
                        end,
                        far: end,
                        vals,
                    })
                }
                None => Ok(MatchState::Failed { far: pos }),
            },
        }
    }
}

/// A single semantic action: receives every value accumulated so far by the current alternative
/// and produces the value that replaces them
pub type Action<V> = Box<dyn Fn(Vec<V>) -> V>;

/// Table of the host-supplied semantic actions a grammar can invoke by name
///
/// An action is invoked by using its name as a token, provided no rule of that name exists.
pub struct Actions<V> {
    table: HashMap<String, Action<V>>,
}

impl<V> Actions<V> {
    /// Create an empty action table
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Register an action under a name, replacing any previous action of that name
    pub fn define(
        &mut self,
        name: impl Into<String>,
        action: impl Fn(Vec<V>) -> V + 'static,
    ) -> &mut Self {
        self.table.insert(name.into(), Box::new(action));
        self
    }

    /// Get an action by name
    pub fn get(&self, name: &str) -> Option<&Action<V>> {
        self.table.get(name)
    }

    /// Check whether an action is registered under a name
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }
}

impl<V> Default for Actions<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Actions<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.table.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;
    use crate::compiler::GrammarErrorContent;

    fn bare<'g>(grammar: &'g str) -> Parser<'g, String> {
        compile(grammar, Actions::new()).unwrap()
    }

    #[test]
    fn ordered_choice_returns_the_first_match() {
        let parser = bare("S = /(a)/ | /(a)b/");

        // The second alternative would consume more, but the first one wins
        assert_eq!(parser.parse("ab").unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn negation_consumes_no_input() {
        let parser = bare("S = !'b' /(.)/");

        assert_eq!(parser.parse("a").unwrap(), vec!["a".to_string()]);

        match parser.parse("b") {
            Err(ParseError::Unparsable(unparsable)) => assert_eq!(unparsable.position(), 0),
            other => panic!("expected an unparsable failure, got {:?}", other),
        }
    }

    #[test]
    fn only_capture_groups_produce_values() {
        let parser = bare("S = /a(b)c/");

        assert_eq!(parser.parse("abc").unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn unmatched_capture_groups_are_skipped() {
        let parser = bare("S = /(x)?(y)/");

        assert_eq!(parser.parse("y").unwrap(), vec!["y".to_string()]);
    }

    #[test]
    fn actions_replace_the_pending_values() {
        let mut actions: Actions<String> = Actions::new();
        actions.define("count", |vals: Vec<String>| vals.len().to_string());

        let parser = compile("S = /(a)/ /(b)/ count", actions).unwrap();

        assert_eq!(parser.parse("ab").unwrap(), vec!["2".to_string()]);
    }

    #[test]
    fn rules_shadow_actions_of_the_same_name() {
        let mut actions: Actions<String> = Actions::new();
        actions.define("x", |_| "from the action".to_string());

        let parser = compile("S = x  x = 'a'", actions).unwrap();

        // The rule matched, so the action was never invoked
        assert_eq!(parser.parse("a").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn missing_identifiers_abort_the_whole_parse() {
        // A later alternative could match, but the defect must not be absorbed by ordered
        // choice
        let parser = bare("S = Missing | 'a'");

        match parser.parse("a") {
            Err(ParseError::Grammar(err)) => {
                assert!(matches!(err.content(), GrammarErrorContent::MissingRule));
                assert_eq!(err.accused(), "Missing");
            }
            other => panic!("expected a grammar defect, got {:?}", other),
        }
    }

    #[test]
    fn unknown_start_rules_are_a_grammar_defect() {
        let parser = bare("S = 'a'");

        match parser.parse_rule("Nope", "a") {
            Err(ParseError::Grammar(err)) => assert_eq!(err.accused(), "Nope"),
            other => panic!("expected a grammar defect, got {:?}", other),
        }
    }

    #[test]
    fn trailing_input_is_not_an_error() {
        let parser = bare("S = 'a'");

        assert_eq!(parser.parse("abc").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn end_of_input_can_be_demanded_with_a_negation() {
        let parser = bare("S = 'a' !/./");

        assert!(parser.parse("a").is_ok());

        match parser.parse("ab") {
            Err(ParseError::Unparsable(unparsable)) => assert_eq!(unparsable.position(), 1),
            other => panic!("expected an unparsable failure, got {:?}", other),
        }
    }

    #[test]
    fn memoized_rules_reproduce_their_values() {
        // Both alternatives evaluate `pair` at position 0; the second evaluation is served by
        // the memo cache and must produce the same values as the first
        let parser = bare("S = pair 'X' | pair 'Y'  pair = /(a)(b)/");

        assert_eq!(
            parser.parse("abY").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
