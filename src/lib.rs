//! A Hunspell-compatible spell checking engine.
//!
//! Build a [`SpellChecker`] from the contents of an `.aff`/`.dic` pair and ask
//! it whether words are valid or what the best corrections are:
//!
//! ```
//! use typochk::{SpellChecker, TypoOptions};
//!
//! let aff = "SFX D Y 1\nSFX D 0 ed .\n";
//! let dic = "1\nwalk/D\n";
//! let checker = SpellChecker::new("en_US", aff, dic, TypoOptions::default());
//!
//! assert!(checker.check("walked").unwrap());
//! assert_eq!(checker.suggest("wlak").unwrap(), vec!["walk"]);
//! ```

pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod error;
pub mod parser;

pub use checker::{DictionarySource, DictionaryStats, SpellChecker};
pub use config::{Config, TypoOptions};
pub use error::{ErrorKind, Result, TypoError};

#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub error_count: usize,
    pub errors: Vec<SpellError>,
}

#[derive(Debug, Clone)]
pub struct SpellError {
    pub word: String,
    pub line: usize,
    pub column: usize,
    pub context: String,
    pub suggestions: Vec<String>,
}
