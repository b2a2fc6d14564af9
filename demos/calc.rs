//! This file demonstrates how to parse and evaluate small sum expressions with an action

use pegpack::compile;
use pegpack::runtime::Actions;

static SUM_GRAMMAR: &str = r"
Sum = num '+' Sum sum | num
num = /(\d+)/
";

/// Number produced by the grammar: captured digit runs convert on entry
#[derive(Clone, Debug)]
struct Number(i64);

impl From<String> for Number {
    fn from(digits: String) -> Self {
        Number(digits.parse().unwrap_or(0))
    }
}

fn main() {
    env_logger::init();

    let mut actions: Actions<Number> = Actions::new();

    actions.define("sum", |vals: Vec<Number>| {
        Number(vals.iter().map(|Number(n)| n).sum())
    });

    let parser = compile(SUM_GRAMMAR, actions).unwrap_or_else(|err| panic!("{}", err));

    for subject in ["1+2", "40+1+1", "7", "oops"] {
        match parser.parse(subject) {
            Ok(values) => println!("{:>6} = {:?}", subject, values),
            Err(err) => println!("{:>6} ! {}", subject, err),
        }
    }
}
