//! End-to-end behaviour through the public API only.

use core::fmt::Write;
use std::sync::Arc;

use scsslex::{
    BlockLocator, BlockStatus, LocatorError, PatternRegistry, SEPARATOR, ScanError, Scanner, locate_blocks,
};

fn declaration_scanner(input: &str) -> Scanner {
    let registry: PatternRegistry = [
        ("prop", "[a-z]+"),
        ("colon", ":"),
        ("ws", r"\s+"),
        ("value", "[a-z]+"),
        ("semi", ";"),
    ]
    .into_iter()
    .collect();
    Scanner::new(Arc::new(registry), ["ws"], input)
}

#[test]
fn rule_body_tokenizes_into_declaration() {
    let blocks = locate_blocks(".a { color: red; }");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].status, BlockStatus::Ok);
    assert_eq!(blocks[0].selector, ".a");
    assert_eq!(blocks[0].body, Some("color: red;"));

    let mut scanner = declaration_scanner(blocks[0].body.unwrap());
    let mut names = Vec::new();
    for ty in ["prop", "colon", "value", "semi"] {
        let token = scanner.tokenize(names.len(), Some(&[ty])).unwrap();
        names.push(token.name.to_string());
    }
    assert_eq!(names, ["prop", "colon", "value", "semi"]);
    assert!(scanner.history().all(|t| !scanner.text(t).trim().is_empty()));
    assert_eq!(
        scanner.tokenize(4, Some(&["prop"])),
        Err(ScanError::RestrictedToken {
            pos: 11,
            restrictions: vec!["prop".to_owned()],
        })
    );
}

#[test]
fn unbalanced_block_reports_one_error_then_ends() {
    let mut locator = BlockLocator::new("a { b: 1;");

    let block = locator.next_block();
    assert_eq!(block.status, BlockStatus::Error(LocatorError::UnterminatedBlock));
    assert_eq!(block.body, Some("b: 1;"));
    assert_eq!(block.error().map(|e| e.to_string()).as_deref(), Some("Block never closed"));

    let end = locator.next_block();
    assert!(end.is_end());
    assert_eq!(end.selector, "");
    assert_eq!(locator.position(), 0);
}

#[test]
fn preprocessed_source_carries_line_numbers() {
    let mut source = String::new();
    for (line, text) in ["@import 'reset';", ".a {", "  b: c;", "}", ".d { e: f; }"].iter().enumerate() {
        writeln!(source, "{SEPARATOR}{}{text}", line + 1).unwrap();
    }

    let summary: Vec<_> = locate_blocks(&source)
        .into_iter()
        .map(|b| (b.line_number, b.selector.into_owned()))
        .collect();
    assert_eq!(
        summary,
        [
            (1, "@import 'reset'".to_owned()),
            (2, ".a".to_owned()),
            (5, ".d".to_owned()),
        ]
    );
}

#[test]
fn registry_is_built_once_and_shared() {
    let mut registry = PatternRegistry::new();
    registry.setup([("num", "[0-9]+"), ("ws", " +")]);
    registry.setup([("num", "[0-9a-f]+"), ("word", "[a-z]+")]);
    registry.compile_all().unwrap();
    let registry = Arc::new(registry);

    let mut a = Scanner::new(Arc::clone(&registry), ["ws"], "12 ab");
    let mut b = Scanner::new(Arc::clone(&registry), [""; 0], "ab 12");
    assert_eq!(&*a.tokenize(0, None).unwrap().name, "num");
    assert_eq!(&*a.tokenize(1, None).unwrap().name, "word");
    assert_eq!(&*b.tokenize(0, None).unwrap().name, "word");
    assert_eq!(&*b.tokenize(1, None).unwrap().name, "ws");
}
