//! # Pegpack
//!
//! Pegpack is a tiny packrat parsing engine: it [compiles](compile) a textual PEG grammar into a
//! rule table, then matches subjects against it with memoized recursive descent, calling
//! host-supplied semantic actions to build the result values.
//!
//! Grammars are whitespace-insensitive lists of `Name = alternative | alternative` rules. Within
//! an alternative, a leading `!` negates a token, `'…'` matches its inner text verbatim, `/…/`
//! (or any token that is not a bare identifier) is a regular expression matched at the current
//! position whose capture groups produce values, and a bare identifier invokes another rule or
//! one of the host's [actions](runtime::Actions).
//!
//! Rule and action references are resolved lazily, so a grammar compiles even when it names a
//! rule that does not exist; the defect surfaces on the first parse that reaches the reference.
//! Left-recursive rules are not supported and recurse until the stack overflows.
//!
//! ## Usage
//!
//! ```rust
//! use pegpack::compile;
//! use pegpack::runtime::{builtin, Actions};
//!
//! // 1. Define the grammar
//! static GRAMMAR: &str = r"
//! greeting = word /\s+/ word join
//! word     = /([A-Za-z]+)/
//! ";
//!
//! // 2. Supply the semantic actions it names
//! let mut actions: Actions<String> = Actions::new();
//! actions.define("join", builtin::join);
//!
//! // 3. Compile the grammar into a reusable parser
//! let parser = compile(GRAMMAR, actions).unwrap_or_else(|err| panic!("{}", err));
//!
//! // 4. Match subjects against it
//! let values = parser.parse("Hello world").unwrap_or_else(|err| panic!("{}", err));
//! assert_eq!(values, vec!["Helloworld".to_string()]);
//! ```

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]

pub mod compiler;
pub mod runtime;

use compiler::GrammarError;
use runtime::{Actions, Parser};

/// Compile a grammar and pair it with an action table, producing a reusable [`Parser`].
///
/// The returned parser borrows the grammar text; the first rule defined in it becomes the
/// default start rule of [`Parser::parse`].
pub fn compile<'g, V>(
    grammar: &'g str,
    actions: Actions<V>,
) -> Result<Parser<'g, V>, GrammarError> {
    let rules = compiler::parse_rules(grammar)?;

    Ok(Parser::new(rules, actions))
}
