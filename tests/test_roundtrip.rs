//! Fuzzing the fuzzer: enumerate grammar-shaped strings with the engine
//! itself, then feed them back through the parser.

mod support;

use cfg_enumerate::parse::parse_grammar;

const META: &str = r#"Language "meta":
grammar = "Language \"g\": " rules;
rules = rule | rule " " rules;
rule = name " = " production ";";
name = "a" | "b";
production = term | term " | " production;
term = factor | factor " " term;
factor = atom | atom "*" | atom "+" | atom "?";
atom = "'x'" | name | "ℇ" | ";" | "(" production ")";
"#;

#[test]
fn test_enumerated_grammars_parse_and_stringify_stably() {
    let candidates: Vec<String> = support::language(META).sentences().take(400).collect();
    assert_eq!(candidates.len(), 400);

    let mut parsed = 0usize;
    for candidate in &candidates {
        let grammar = match parse_grammar(candidate) {
            Ok(grammar) => grammar,
            Err(_) => continue,
        };
        parsed += 1;
        let once = grammar.to_string();
        let twice = match parse_grammar(&once) {
            Ok(reparsed) => reparsed.to_string(),
            Err(error) => panic!("stringified grammar failed to reparse: {}: {}", once, error),
        };
        assert_eq!(once, twice, "unstable stringification for {:?}", candidate);
    }

    // At least 3% of the candidates must be grammars.
    assert!(
        parsed * 100 >= candidates.len() * 3,
        "only {} of {} candidates parsed",
        parsed,
        candidates.len()
    );
}
