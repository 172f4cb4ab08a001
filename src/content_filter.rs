/// Profanity filter for chirp bodies
///
/// Words are separated by single spaces and compared case-insensitively
/// against the blocklist. Only whole words match: "kerfuffle!" or
/// "kerfuffled" pass through unchanged.

use std::collections::HashSet;

use lazy_static::lazy_static;

pub const MASK: &str = "****";

lazy_static! {
    static ref BLOCKLIST: HashSet<&'static str> =
        ["kerfuffle", "sharbert", "fornax"].into_iter().collect();
}

/// Mask every blocklisted word in `text`
pub fn filter(text: &str, blocklist: &HashSet<&str>) -> String {
    text.split(' ')
        .map(|word| {
            if blocklist.contains(word.to_lowercase().as_str()) {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mask words from the built-in blocklist
pub fn filter_profanity(text: &str) -> String {
    filter(text, &BLOCKLIST)
}
