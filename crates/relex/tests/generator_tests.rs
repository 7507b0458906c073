//! End-to-end scenarios over the 8-bit byte alphabet.

use relex::testing::{longest_match, table_accepts};
use relex::{GeneratorWarning, LexerGenerator, LexerTable};

fn table_for(productions: &[(&'static str, &str)]) -> LexerTable<u8, &'static str> {
    productions
        .iter()
        .fold(LexerGenerator::new(), |generator, &(info, regex)| {
            generator.production(info, regex)
        })
        .generate()
        .expect("productions are valid")
        .table
}

/// Follow the unique transition containing `symbol`, if any.
fn step(table: &LexerTable<u8, &str>, state: usize, symbol: u8) -> Option<usize> {
    table
        .state(state)
        .transitions
        .iter()
        .find(|t| t.chars.contains_symbol(symbol))
        .map(|t| t.next)
}

#[test]
fn single_literal_keyword() {
    let table = table_for(&[("KW", "if")]);
    assert_eq!(table.state_count(), 3);

    let s0 = table.start();
    assert!(!table.state(s0).terminal);
    assert_eq!(table.state(s0).transitions.len(), 1);

    let s1 = step(&table, s0, b'i').expect("transition on 'i'");
    assert_eq!(step(&table, s0, b'f'), None);
    assert!(!table.state(s1).terminal);

    let s2 = step(&table, s1, b'f').expect("transition on 'f'");
    assert!(table.state(s2).terminal);
    assert_eq!(table.state(s2).terminal_info, Some("KW"));
    assert!(table.state(s2).transitions.is_empty());
}

#[test]
fn priority_overlap_keyword_vs_identifier() {
    let table = table_for(&[("IF", "if"), ("ID", "[a-z]+")]);

    assert_eq!(table_accepts(&table, b"if"), Some(&"IF"));
    assert_eq!(table_accepts(&table, b"ifx"), Some(&"ID"));
    assert_eq!(table_accepts(&table, b"i"), Some(&"ID"));

    // the prefixes keep distinct terminals: "i" accepts as ID, "if" as IF,
    // and continuing past the keyword falls back to ID
    let s0 = table.start();
    let after_i = step(&table, s0, b'i').expect("transition on 'i'");
    assert_eq!(table.state(after_i).terminal_info, Some("ID"));
    let after_if = step(&table, after_i, b'f').expect("transition on 'f'");
    assert_eq!(table.state(after_if).terminal_info, Some("IF"));
    let after_ifx = step(&table, after_if, b'x').expect("transition on 'x'");
    assert_eq!(table.state(after_ifx).terminal_info, Some("ID"));
}

#[test]
fn complement_class_membership_over_all_bytes() {
    let table = table_for(&[("NOTABC", "[^abc]+")]);

    let start = table.state(table.start());
    assert_eq!(start.transitions.len(), 1);
    let edge = &start.transitions[0];
    for symbol in 0..=u8::MAX {
        let excluded = matches!(symbol, b'a' | b'b' | b'c');
        assert_eq!(
            edge.chars.contains_symbol(symbol),
            !excluded,
            "symbol {symbol:#04x}"
        );
    }

    assert_eq!(table_accepts(&table, b"xyz!"), Some(&"NOTABC"));
    assert_eq!(table_accepts(&table, b"xaz"), None);
    assert_eq!(table_accepts(&table, &[0x00, 0xff]), Some(&"NOTABC"));
}

#[test]
fn alternation_under_kleene_star() {
    let result = LexerGenerator::<u8, &'static str>::new()
        .production("LOOP", "(ab|ac)*")
        .generate()
        .expect("valid production");
    assert_eq!(
        result.warnings,
        vec![GeneratorWarning::EmptyProduction { production: 0 }]
    );
    let table = result.table;

    // minimal automaton: start (accepting), after-'a', and back to start
    assert_eq!(table.state_count(), 3);
    let s0 = table.start();
    assert!(table.state(s0).terminal, "empty string is accepted");

    let mid = step(&table, s0, b'a').expect("transition on 'a'");
    assert!(!table.state(mid).terminal);
    assert_eq!(step(&table, mid, b'b'), Some(s0));
    assert_eq!(step(&table, mid, b'c'), Some(s0));

    assert_eq!(table_accepts(&table, b"abacab"), Some(&"LOOP"));
    assert_eq!(table_accepts(&table, b"aba"), None);
}

#[test]
fn json_number_production() {
    let table = table_for(&[("NUM", r"-?(0|[1-9][0-9]*)(\.[0-9]+)?([Ee][+\-]?(0|[1-9][0-9]*))?")]);

    for accepted in ["0", "-0", "123", "1.5", "1e10", "-1.5e-3", "9E+2", "10.25e0"] {
        assert_eq!(
            table_accepts(&table, accepted.as_bytes()),
            Some(&"NUM"),
            "{accepted:?} must be accepted"
        );
    }
    for rejected in ["01", "1.", ".", "1e", "-", "+1", "1e+", "e5", "00"] {
        assert_eq!(
            table_accepts(&table, rejected.as_bytes()),
            None,
            "{rejected:?} must be rejected"
        );
    }

    // at the longest-prefix reading, "01" lexes as "0" and leaves the '1'
    assert_eq!(longest_match(&table, b"01"), Some((1, &"NUM")));
    assert_eq!(longest_match(&table, b"1.e"), Some((1, &"NUM")));
    assert_eq!(longest_match(&table, b"-1.5e-3,"), Some((7, &"NUM")));
}

#[test]
fn whitespace_and_identifier_keep_distinct_terminals() {
    let table = table_for(&[("WS", "[ \t\n\r]+"), ("ID", "[a-zA-Z_][a-zA-Z0-9_]*")]);

    let mut terminals: Vec<&str> = table
        .states()
        .iter()
        .filter_map(|s| s.terminal_info.as_ref().copied())
        .collect();
    terminals.sort_unstable();
    terminals.dedup();
    assert_eq!(terminals, vec!["ID", "WS"]);

    assert_eq!(table_accepts(&table, b"  \t\r\n"), Some(&"WS"));
    assert_eq!(table_accepts(&table, b"_ident9"), Some(&"ID"));
    assert_eq!(table_accepts(&table, b"9ident"), None);
    assert_eq!(table_accepts(&table, b" a"), None);
}

#[test]
fn generation_is_reproducible() {
    let build = || {
        LexerGenerator::<u8, u32>::new()
            .production(1, "-?(0|[1-9][0-9]*)")
            .production(2, "[a-zA-Z_][a-zA-Z0-9_]*")
            .production(3, "[ \t\n\r]+")
            .production(4, r"==|!=|<=|>=|<|>")
            .generate()
            .expect("valid productions")
            .table
    };
    let first = build();
    let second = build();
    assert_eq!(first, second);
}

#[test]
fn empty_matching_production_is_accepted_with_a_warning() {
    let result = LexerGenerator::<u8, &'static str>::new()
        .production("MAYBE", "x?")
        .generate()
        .expect("generates");
    assert_eq!(result.warnings.len(), 1);
    assert!(result.table.state(result.table.start()).terminal);
    assert_eq!(table_accepts(&result.table, b""), Some(&"MAYBE"));
}
