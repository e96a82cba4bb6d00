//! Error types for the spell checking engine.
//!
//! Every fallible library operation returns [`TypoError`]. Parse failures
//! never escape [`crate::SpellChecker::new`]; they are recorded on the
//! engine and replaced by the fallback dictionary instead.

use std::fmt;

use thiserror::Error;

/// The main error type for dictionary loading and word checking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypoError {
    /// The requested `.aff`/`.dic` pair could not be located
    #[error("Dictionary not found: {0}")]
    DictionaryNotFound(String),

    /// The `.dic` content was empty or unusable
    #[error("Dictionary parse error: {0}")]
    DictionaryParse(String),

    /// The `.aff` content was empty or unusable
    #[error("Affix parse error: {0}")]
    AffixParse(String),

    /// `check`/`suggest` was called with an empty word
    #[error("Invalid word: {0}")]
    InvalidWord(String),

    /// The affix data asks for something this engine does not implement
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
}

/// Result type alias for operations that may fail with [`TypoError`].
pub type Result<T> = std::result::Result<T, TypoError>;

/// Stable, machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DictionaryNotFound,
    DictionaryParseError,
    AffixParseError,
    InvalidWord,
    UnsupportedFeature,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::DictionaryNotFound => "DICTIONARY_NOT_FOUND",
            ErrorKind::DictionaryParseError => "DICTIONARY_PARSE_ERROR",
            ErrorKind::AffixParseError => "AFFIX_PARSE_ERROR",
            ErrorKind::InvalidWord => "INVALID_WORD",
            ErrorKind::UnsupportedFeature => "UNSUPPORTED_FEATURE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TypoError {
    pub fn dictionary_not_found<S: Into<String>>(msg: S) -> Self {
        TypoError::DictionaryNotFound(msg.into())
    }

    pub fn dictionary_parse<S: Into<String>>(msg: S) -> Self {
        TypoError::DictionaryParse(msg.into())
    }

    pub fn affix_parse<S: Into<String>>(msg: S) -> Self {
        TypoError::AffixParse(msg.into())
    }

    pub fn invalid_word<S: Into<String>>(msg: S) -> Self {
        TypoError::InvalidWord(msg.into())
    }

    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        TypoError::UnsupportedFeature(msg.into())
    }

    /// The error code this error maps to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TypoError::DictionaryNotFound(_) => ErrorKind::DictionaryNotFound,
            TypoError::DictionaryParse(_) => ErrorKind::DictionaryParseError,
            TypoError::AffixParse(_) => ErrorKind::AffixParseError,
            TypoError::InvalidWord(_) => ErrorKind::InvalidWord,
            TypoError::UnsupportedFeature(_) => ErrorKind::UnsupportedFeature,
        }
    }
}
