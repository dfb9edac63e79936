// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Random (non-time-based) suffixes for staging and backup directory names.

use rand::Rng;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// An 8-character lowercase-alphanumeric suffix, unique enough to avoid
/// collisions between concurrently running processes without leaking
/// any ordering information (a timestamp would).
pub fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..8)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
#[path = "randsuffix_tests.rs"]
mod tests;
