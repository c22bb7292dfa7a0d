#![no_main]
use std::cell::RefCell;

use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use scsslex::{Block, BlockLocator, LocatorOptions};

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

/// Stylesheet fragments that exercise every structural byte class.
static FRAGMENTS: &[&[u8]] = &[
    b".a",
    b", ",
    b" {",
    b"}",
    b";",
    b"\n",
    b"\n\n",
    b"color: red",
    b"#{$x}",
    b"#{",
    b"(",
    b")",
    b"url(a;b)",
    b"'",
    b"\"",
    b"'}'",
    b"\0",
    b"\x0012 ",
    b"@media (min-width: 1px)",
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// One time in ten, replace the input with a random sequence of fragments;
/// otherwise defer to libFuzzer's byte-level mutations.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size > 0 && !seed.is_multiple_of(10) {
        return fuzzer_mutate(data, size, max_size);
    }
    with_rng(|rng| {
        let mut written = 0;
        let count = rng.random_range(1..=64);
        for _ in 0..count {
            let fragment = FRAGMENTS[rng.random_range(0..FRAGMENTS.len())];
            if written + fragment.len() > max_size {
                break;
            }
            data[written..written + fragment.len()].copy_from_slice(fragment);
            written += fragment.len();
        }
        written
    })
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

fn is_content(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, ';' | '{' | '}' | '\0')
}

/// Run one pass, checking that it terminates with at most one error, and
/// return the content characters of every block, relocating bodies.
fn content(source: &str, options: LocatorOptions, depth: usize) -> String {
    let mut locator = BlockLocator::with_options(source, options);
    let mut out = String::new();
    let mut errors = 0;
    // One block per byte at most, plus the flush, error and end blocks.
    for _ in 0..source.len() + 3 {
        let block: Block<'_> = locator.next_block();
        if block.is_end() {
            assert!(errors <= 1, "{errors} errors in one pass");
            assert_eq!(locator.position(), 0);
            return out;
        }
        errors += usize::from(block.error().is_some());
        out.extend(block.selector.chars().filter(|&c| is_content(c)));
        if let Some(body) = block.body {
            assert!(body.len() < source.len());
            out.push_str(&content(body, options, depth + 1));
        }
    }
    panic!("locator did not terminate at depth {depth}");
}

fn locate(data: &[u8]) {
    let Some((&flags, data)) = data.split_first() else {
        return;
    };
    let source = String::from_utf8_lossy(data);
    let options = LocatorOptions {
        raw_bodies: flags & 1 != 0,
    };

    let located = content(&source, options, 0);
    // Line-number digits are stripped from normalized text, so only inputs
    // without hints are compared byte for byte.
    if !source.contains('\0') {
        let expected: String = source.chars().filter(|&c| is_content(c)).collect();
        assert_eq!(located, expected);
    }
}

fuzz_target!(|data: &[u8]| locate(data));
