// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Case conversion and identifier helpers shared by selectors, CSS output
//! and attribute key rewriting.

use lazy_static::lazy_static;
use nanoid::nanoid;
use regex::{Captures, Regex};

lazy_static! {
    static ref CAPITAL_RUN: Regex = Regex::new("[A-Z]+").unwrap();
}

/// Alphabet for [`get_unique`]: lowercase ASCII letters and digits.
const UNIQUE_ALPHABET: [char; 36] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Length of identifiers produced by [`get_unique`].
pub const UNIQUE_LENGTH: usize = 16;

/// Returns a short random identifier made of `[a-z0-9]`.
///
/// Used as the `data-id` that scopes a component instance's CSS variables.
pub fn get_unique() -> String {
    nanoid!(UNIQUE_LENGTH, &UNIQUE_ALPHABET)
}

/// Converts camelCase to kebab-case.
///
/// Every run of capitals starts a new word; a capital followed by a
/// lowercase letter starts a word of its own, so `HTMLParser` becomes
/// `html-parser`. Existing separators (`-`, `_`, spaces) are left alone and
/// are not normalized.
///
/// ```
/// use component_kit::strings::camel_to_kebab_case;
///
/// assert_eq!(camel_to_kebab_case("superCoolTestString"), "super-cool-test-string");
/// assert_eq!(camel_to_kebab_case("fontSizes"), "font-sizes");
/// ```
pub fn camel_to_kebab_case(input: &str) -> String {
    let dashed = CAPITAL_RUN.replace_all(input, |caps: &Captures| {
        let Some(run) = caps.get(0) else {
            return String::new();
        };
        let starts_word = input[run.end()..]
            .chars()
            .next()
            .is_some_and(|next| next.is_ascii_lowercase());

        // The last capital of an acronym followed by lowercase opens the next word.
        match run.as_str().len() {
            len if starts_word && len > 1 => {
                let (acronym, last) = run.as_str().split_at(len - 1);
                format!("-{}-{}", acronym, last)
            }
            _ => format!("-{}", run.as_str()),
        }
    });

    dashed.to_ascii_lowercase().trim_start_matches('-').to_string()
}

/// Converts kebab-case to camelCase: `button-link` becomes `buttonLink`.
pub fn kebab_to_camel_case(input: &str) -> String {
    let pascal: String = input.split('-').map(ucfirst).collect();
    lcfirst(&pascal)
}

/// Uppercases the first character.
pub fn ucfirst(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character.
pub fn lcfirst(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
