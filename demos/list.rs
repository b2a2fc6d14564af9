//! This file demonstrates how to collect a comma-separated list into one sequence value

use pegpack::compile;
use pegpack::runtime::Actions;

static LIST_GRAMMAR: &str = r"
list  = words gather
words = word ',' words | word
word  = /\s*([A-Za-z]+)\s*/
";

#[derive(Clone, Debug)]
enum Value {
    Text(String),
    Seq(Vec<Value>),
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Vec<Value>> for Value {
    fn from(vals: Vec<Value>) -> Self {
        Value::Seq(vals)
    }
}

impl AsRef<str> for Value {
    fn as_ref(&self) -> &str {
        match self {
            Value::Text(text) => text,
            Value::Seq(_) => "",
        }
    }
}

fn main() {
    env_logger::init();

    let parser = compile(LIST_GRAMMAR, Actions::<Value>::with_builtins())
        .unwrap_or_else(|err| panic!("{}", err));

    let values = parser
        .parse("peg, pack, rat")
        .unwrap_or_else(|err| panic!("{}", err));

    println!("{:?}", values);
}
