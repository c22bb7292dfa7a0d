#![no_main]
use std::sync::{Arc, LazyLock};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scsslex::{PatternRegistry, ScanError, Scanner, Token};

const PATTERNS: &[(&str, &str)] = &[
    (":", ":"),
    (",", ","),
    ("WS", r"[ \r\t\n]+"),
    ("LPAR", r"\(|\["),
    ("RPAR", r"\)|\]"),
    ("END", "$"),
    ("MUL", "[*]"),
    ("SUB", r"-\s"),
    ("STR", "'[^']*'"),
    ("UNITS", r"(?<!\s)(?:[a-zA-Z]+|%)(?![-\w])"),
    ("NUM", r"(?:\d+(?:\.\d*)?|\.\d+)"),
    ("OPT", "x*"),
    ("VAR", r"\$[-a-zA-Z0-9_]+"),
    ("KWID", r"[-a-zA-Z_][-a-zA-Z0-9_]*(?=\s*:)"),
    ("ID", "[-a-zA-Z_][-a-zA-Z0-9_]*"),
];

static REGISTRY: LazyLock<Arc<PatternRegistry>> =
    LazyLock::new(|| Arc::new(PATTERNS.iter().copied().collect()));

#[derive(Debug, Arbitrary)]
enum Op {
    Tokenize { index: u8, restrict: u16 },
    Next { restrict: u16 },
    Rewind(u8),
    Reset(String),
}

#[derive(Debug, Arbitrary)]
struct Input {
    ignore: u16,
    text: String,
    ops: Vec<Op>,
}

/// Pattern names selected by the bits of `mask`.
fn names(mask: u16) -> Vec<&'static str> {
    PATTERNS
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, (name, _))| *name)
        .collect()
}

fn check_history(scanner: &Scanner) {
    let tokens: Vec<&Token> = scanner.history().collect();
    for token in &tokens {
        assert!(token.end() <= scanner.input().len());
        assert!(token.end() <= scanner.position());
    }
    for pair in tokens.windows(2) {
        assert!(pair[0].end() <= pair[1].start());
        assert!(pair[0] != pair[1]);
    }
}

fn scan(input: Input) {
    let registry = Arc::clone(&REGISTRY);
    let mut scanner = Scanner::new(registry, names(input.ignore), input.text);

    for op in input.ops {
        let before = scanner.history().len();
        match op {
            Op::Tokenize { index, restrict } => {
                let index = usize::from(index);
                let restrict = names(restrict);
                match scanner.tokenize(index, Some(restrict.as_slice())) {
                    Ok(_) => assert!(index < scanner.history().len()),
                    Err(ScanError::InvalidPattern { name, message }) => {
                        panic!("pattern {name} failed to compile: {message}")
                    }
                    Err(_) => assert_eq!(scanner.history().len(), before),
                }
            }
            Op::Next { restrict } => {
                let restrict = names(restrict);
                if let Ok(token) = scanner.tokenize(before, Some(restrict.as_slice())) {
                    assert_eq!(scanner.tokenize(before, Some(restrict.as_slice())), Ok(token.clone()));
                    // Rewinding to 0 also replays ignored text skipped by
                    // failed scans, which may match differently.
                    if before > 0 {
                        scanner.rewind(before);
                        assert_eq!(scanner.tokenize(before, Some(restrict.as_slice())), Ok(token));
                    }
                }
            }
            Op::Rewind(index) => {
                let index = usize::from(index);
                scanner.rewind(index);
                assert_eq!(scanner.history().len(), before.min(index));
            }
            Op::Reset(text) => {
                scanner.reset(text);
                assert_eq!(scanner.history().len(), 0);
                assert_eq!(scanner.position(), 0);
            }
        }
        check_history(&scanner);
    }
}

fuzz_target!(|input: Input| scan(input));
