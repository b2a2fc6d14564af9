//! Engine properties checked over generated subjects.

use pegpack::compile;
use pegpack::runtime::{Actions, ParseError};
use proptest::prelude::*;

proptest! {
    #[test]
    fn digit_runs_round_trip(subject in "[0-9]{1,12}") {
        let parser = compile(r"num = /(\d+)/", Actions::<String>::new()).unwrap();

        prop_assert_eq!(parser.parse(&subject).unwrap(), vec![subject.clone()]);
    }

    #[test]
    fn parsing_is_deterministic(subject in "[ab]{0,24}") {
        // The pair rule overlaps with the single-character fallback, so longer subjects force
        // plenty of re-visited positions
        let parser = compile(
            "S = pair S |  pair = /(a)(b)/ | /(.)/",
            Actions::<String>::new(),
        )
        .unwrap();

        let first = parser.parse(&subject).unwrap();
        let second = parser.parse(&subject).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn failures_stay_inside_the_subject(subject in ".{0,24}") {
        let parser = compile("S = 'a' 'b'", Actions::<String>::new()).unwrap();

        match parser.parse(&subject) {
            Ok(_) => prop_assert!(subject.starts_with("ab")),
            Err(ParseError::Unparsable(unparsable)) => {
                prop_assert!(unparsable.position() <= subject.len());
            }
            Err(other) => prop_assert!(false, "unexpected grammar defect: {}", other),
        }
    }
}
