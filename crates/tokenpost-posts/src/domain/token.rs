//! Deletion token issuance.

use thiserror::Error;
use tokenpost_core::rng::DeterministicRng;

/// Letters and digits, the default token alphabet.
pub const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Reasons a `TokenPolicy` cannot be built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenPolicyError {
    /// Tokens must contain at least one character.
    #[error("token minimum length must be at least 1")]
    ZeroLength,

    /// `min_len` is greater than `max_len`.
    #[error("token length range {min}..={max} is empty")]
    EmptyRange {
        /// Requested minimum length.
        min: u32,
        /// Requested maximum length.
        max: u32,
    },

    /// The alphabet has no characters.
    #[error("token alphabet must not be empty")]
    EmptyAlphabet,
}

/// Shape of issued tokens: a length range and the characters to draw from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPolicy {
    min_len: u32,
    max_len: u32,
    alphabet: Vec<char>,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            min_len: 12,
            max_len: 24,
            alphabet: ALPHANUMERIC.chars().collect(),
        }
    }
}

impl TokenPolicy {
    /// Builds a policy; duplicate alphabet characters are kept and weigh more.
    ///
    /// # Errors
    ///
    /// Returns `TokenPolicyError` if the range or the alphabet is empty.
    pub fn new(min_len: u32, max_len: u32, alphabet: &str) -> Result<Self, TokenPolicyError> {
        if min_len == 0 {
            return Err(TokenPolicyError::ZeroLength);
        }
        if min_len > max_len {
            return Err(TokenPolicyError::EmptyRange {
                min: min_len,
                max: max_len,
            });
        }
        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(TokenPolicyError::EmptyAlphabet);
        }
        Ok(Self {
            min_len,
            max_len,
            alphabet,
        })
    }

    /// Shortest token this policy issues.
    #[must_use]
    pub fn min_len(&self) -> u32 {
        self.min_len
    }

    /// Longest token this policy issues.
    #[must_use]
    pub fn max_len(&self) -> u32 {
        self.max_len
    }

    /// Whether `c` may appear in an issued token.
    #[must_use]
    pub fn allows(&self, c: char) -> bool {
        self.alphabet.contains(&c)
    }
}

/// Issues a fresh token: a uniformly drawn length, then one uniformly drawn
/// alphabet character per position. Nothing about the post feeds into it.
pub fn issue_token(policy: &TokenPolicy, rng: &mut dyn DeterministicRng) -> String {
    let len = rng.next_u32_range(policy.min_len, policy.max_len);
    let last_index = u32::try_from(policy.alphabet.len() - 1).unwrap_or(u32::MAX);
    (0..len)
        .map(|_| {
            let index = rng.next_u32_range(0, last_index) as usize;
            policy.alphabet[index % policy.alphabet.len()]
        })
        .collect()
}
