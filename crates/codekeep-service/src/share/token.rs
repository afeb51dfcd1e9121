//! Share token generation.

use std::fmt::Debug;

use rand::Rng;

use codekeep_core::config::MIN_TOKEN_LENGTH;

/// Characters a share token is drawn from.
pub const SHARE_TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of candidate share tokens.
pub trait TokenSource: Send + Sync + Debug {
    /// Produce a new candidate token.
    fn generate(&self) -> String;
}

/// Random share tokens over `[0-9a-z]`.
///
/// Lengths below `MIN_TOKEN_LENGTH` are raised to it.
#[derive(Debug, Clone)]
pub struct ShareTokenGenerator {
    length: usize,
}

impl ShareTokenGenerator {
    /// Creates a generator producing tokens of `length` characters.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(MIN_TOKEN_LENGTH),
        }
    }

    /// Token length in characters.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for ShareTokenGenerator {
    fn default() -> Self {
        Self::new(MIN_TOKEN_LENGTH)
    }
}

impl TokenSource for ShareTokenGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| {
                let idx = rng.gen_range(0..SHARE_TOKEN_ALPHABET.len());
                SHARE_TOKEN_ALPHABET[idx] as char
            })
            .collect()
    }
}
