//! User Name Value Object
//!
//! A username is the public handle of an account, used for login, display,
//! and lookup. Matching is case-insensitive: mixed-case input is accepted
//! but the canonical form is lowercase, and all uniqueness and login
//! comparisons go through the canonical form.
//!
//! Processing order: NFKC normalization, trim, validation, lowercasing.
//!
//! ## Invariants
//! - Length: 3 to 30 characters (after normalization)
//! - ASCII letters, digits, and `_ . -` only
//! - Starts and ends with a letter, digit, or `_`
//! - No consecutive dots

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for a user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for a user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

/// Allowed special characters in a user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// Empty after normalization
    Empty,

    /// Shorter than [`USER_NAME_MIN_LENGTH`]
    TooShort { length: usize, min: usize },

    /// Longer than [`USER_NAME_MAX_LENGTH`]
    TooLong { length: usize, max: usize },

    /// Contains a character outside the allowed set
    InvalidCharacter { char: char, position: usize },

    /// Starts with a character other than a-z, 0-9, or _
    InvalidStart { char: char },

    /// Ends with a character other than a-z, 0-9, or _
    InvalidEnd { char: char },

    /// Contains consecutive dots (..)
    ConsecutiveDots,
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "User name cannot be empty"),
            Self::TooShort { length, min } => {
                write!(f, "User name is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "User name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only a-z, 0-9, _, ., - are allowed"
                )
            }
            Self::InvalidStart { char } => {
                write!(
                    f,
                    "User name cannot start with '{char}'. Must start with a-z, 0-9, or _"
                )
            }
            Self::InvalidEnd { char } => {
                write!(
                    f,
                    "User name cannot end with '{char}'. Must end with a-z, 0-9, or _"
                )
            }
            Self::ConsecutiveDots => {
                write!(f, "User name cannot contain consecutive dots (..)")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

/// Validated, normalized user name
///
/// # Storage
/// - `original`: the user's input (trimmed, NFKC normalized, preserves case)
/// - `canonical`: lowercase form for uniqueness and login comparison
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName {
    /// Original user input (preserves case)
    original: String,
    /// Canonical form (lowercase) for uniqueness
    canonical: String,
}

impl UserName {
    /// Create a new UserName from raw input
    ///
    /// Applies normalization (NFKC, trim) and validates.
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original = Self::normalize_original(input.as_ref());
        let canonical = original.to_lowercase();
        Self::validate(&canonical)?;
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Get the original user name (preserves case)
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Get the canonical (lowercase) user name
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Alias for canonical()
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        }
    }

    /// Normalize input string (trim and NFKC, preserve case)
    fn normalize_original(input: &str) -> String {
        input.nfkc().collect::<String>().trim().to_string()
    }

    /// Validate the canonical user name
    fn validate(canonical: &str) -> Result<(), UserNameError> {
        if canonical.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = canonical.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        for (pos, ch) in canonical.chars().enumerate() {
            if !Self::is_valid_char(ch) {
                return Err(UserNameError::InvalidCharacter {
                    char: ch,
                    position: pos,
                });
            }
        }

        let first_char = canonical.chars().next().unwrap();
        if !Self::is_valid_start_end_char(first_char) {
            return Err(UserNameError::InvalidStart { char: first_char });
        }

        let last_char = canonical.chars().next_back().unwrap();
        if !Self::is_valid_start_end_char(last_char) {
            return Err(UserNameError::InvalidEnd { char: last_char });
        }

        if canonical.contains("..") {
            return Err(UserNameError::ConsecutiveDots);
        }

        Ok(())
    }

    /// Check if character is valid in a user name
    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }

    /// Check if character is valid at start or end of a user name
    #[inline]
    fn is_valid_start_end_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserName")
            .field("original", &self.original)
            .field("canonical", &self.canonical)
            .finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UserName {
    type Error = UserNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod normalization {
        use super::*;

        #[test]
        fn test_trim_whitespace() {
            let name = UserName::new("  alice  ").unwrap();
            assert_eq!(name.as_str(), "alice");
        }

        #[test]
        fn test_case_insensitive_canonical() {
            let upper = UserName::new("ALICE").unwrap();
            let lower = UserName::new("alice").unwrap();
            assert_eq!(upper.canonical(), lower.canonical());
            assert_eq!(upper.original(), "ALICE");
        }

        #[test]
        fn test_mixed_case() {
            let name = UserName::new("AlIcE_123").unwrap();
            assert_eq!(name.as_str(), "alice_123");
        }

        #[test]
        fn test_nfkc_normalization() {
            // Full-width 'Ａ' (U+FF21) normalizes to ASCII
            let name = UserName::new("Ａlice").unwrap();
            assert_eq!(name.as_str(), "alice");
        }
    }

    mod length_validation {
        use super::*;

        #[test]
        fn test_empty_fails() {
            assert!(matches!(UserName::new(""), Err(UserNameError::Empty)));
            assert!(matches!(UserName::new("   "), Err(UserNameError::Empty)));
        }

        #[test]
        fn test_too_short() {
            assert!(matches!(
                UserName::new("ab"),
                Err(UserNameError::TooShort { length: 2, min: 3 })
            ));
        }

        #[test]
        fn test_boundaries() {
            assert!(UserName::new("abc").is_ok());
            assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
            assert!(matches!(
                UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)),
                Err(UserNameError::TooLong { .. })
            ));
        }
    }

    mod character_validation {
        use super::*;

        #[test]
        fn test_valid_names() {
            assert!(UserName::new("alice123").is_ok());
            assert!(UserName::new("alice_bob").is_ok());
            assert!(UserName::new("alice.bob").is_ok());
            assert!(UserName::new("alice-bob").is_ok());
        }

        #[test]
        fn test_invalid_special_char() {
            assert!(matches!(
                UserName::new("alice@bob"),
                Err(UserNameError::InvalidCharacter { char: '@', .. })
            ));
        }

        #[test]
        fn test_invalid_unicode() {
            assert!(matches!(
                UserName::new("日本語です"),
                Err(UserNameError::InvalidCharacter { .. })
            ));
        }

        #[test]
        fn test_invalid_start_end() {
            assert!(matches!(
                UserName::new(".alice"),
                Err(UserNameError::InvalidStart { char: '.' })
            ));
            assert!(matches!(
                UserName::new("alice-"),
                Err(UserNameError::InvalidEnd { char: '-' })
            ));
        }

        #[test]
        fn test_consecutive_dots() {
            assert!(matches!(
                UserName::new("alice..bob"),
                Err(UserNameError::ConsecutiveDots)
            ));
        }
    }
}
