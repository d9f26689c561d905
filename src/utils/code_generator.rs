//! Short code generation.
//!
//! Codes are drawn uniformly from a configurable URL-safe alphabet. The
//! generator says nothing about uniqueness; the store's unique constraint does.

use rand::Rng;

/// Default code alphabet: ASCII letters, digits, `_` and `-`.
pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Default code length.
pub const DEFAULT_CODE_LENGTH: usize = 8;

pub const MIN_CODE_LENGTH: usize = 4;
pub const MAX_CODE_LENGTH: usize = 64;

/// Codes that would shadow service routes.
const RESERVED_CODES: &[&str] = &["api", "health"];

/// Errors from an invalid generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeGeneratorError {
    #[error("Code length must be between 4 and 64, got {0}")]
    InvalidLength(usize),

    #[error("Code alphabet must contain at least 2 distinct characters")]
    AlphabetTooSmall,

    #[error("Code alphabet contains a character that is not URL-safe: {0:?}")]
    UnsafeCharacter(char),

    #[error("Code alphabet contains duplicate character {0:?}")]
    DuplicateCharacter(char),
}

/// Random short code generator.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl CodeGenerator {
    /// Creates a generator after checking that every character is an RFC 3986
    /// unreserved character and appears only once.
    ///
    /// # Errors
    ///
    /// Returns [`CodeGeneratorError`] if the length is out of range or the
    /// alphabet is too small, not URL-safe, or has duplicates.
    pub fn new(alphabet: &str, length: usize) -> Result<Self, CodeGeneratorError> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
            return Err(CodeGeneratorError::InvalidLength(length));
        }

        let mut chars: Vec<char> = Vec::with_capacity(alphabet.len());
        for c in alphabet.chars() {
            if !is_url_safe(c) {
                return Err(CodeGeneratorError::UnsafeCharacter(c));
            }
            if chars.contains(&c) {
                return Err(CodeGeneratorError::DuplicateCharacter(c));
            }
            chars.push(c);
        }

        if chars.len() < 2 {
            return Err(CodeGeneratorError::AlphabetTooSmall);
        }

        Ok(Self {
            alphabet: chars,
            length,
        })
    }

    /// Generates a random code that is not a reserved route name.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();

        loop {
            let code: String = (0..self.length)
                .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
                .collect();

            if !is_reserved(&code) {
                return code;
            }
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

fn is_url_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}

fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.iter().any(|r| r.eq_ignore_ascii_case(code))
}
