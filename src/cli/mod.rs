pub mod output;

use crate::checker::tokenizer::{tokenize, WordSpan};
use crate::{CheckResult, Config, SpellChecker, SpellError};
use anyhow::{Context, Result};
use log::warn;
use rayon::prelude::*;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Checks text files word by word with a [`SpellChecker`].
pub struct TextChecker {
    checker: SpellChecker,
    personal_words: HashSet<String>,
    ignore_patterns: Vec<Regex>,
}

impl TextChecker {
    pub fn new(checker: SpellChecker, config: &Config) -> Result<Self> {
        // Load personal dictionary
        let mut personal_words = HashSet::new();
        if let Some(personal_dict_path) = &config.personal_dictionary {
            if personal_dict_path.exists() {
                let content = fs::read_to_string(personal_dict_path)
                    .context("Failed to read personal dictionary")?;
                for line in content.lines() {
                    let word = line.trim();
                    if !word.is_empty() && !word.starts_with('#') {
                        personal_words.insert(word.to_lowercase());
                    }
                }
            }
        }

        // Compile ignore patterns
        let mut ignore_patterns = Vec::new();
        for pattern in &config.ignore_patterns {
            match Regex::new(pattern) {
                Ok(re) => ignore_patterns.push(re),
                Err(e) => warn!("Invalid regex pattern '{}': {}", pattern, e),
            }
        }

        Ok(Self {
            checker,
            personal_words,
            ignore_patterns,
        })
    }

    pub fn checker(&self) -> &SpellChecker {
        &self.checker
    }

    pub fn check_file(&self, file_path: &Path) -> Result<CheckResult> {
        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;
        self.check_text(&content)
    }

    /// Words are checked in parallel; the checker is read-only.
    pub fn check_text(&self, content: &str) -> Result<CheckResult> {
        let spans = tokenize(content);

        let errors = spans
            .par_iter()
            .filter(|span| !self.should_ignore(&span.text))
            .map(|span| self.check_span(span))
            .collect::<crate::Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        Ok(CheckResult {
            error_count: errors.len(),
            errors,
        })
    }

    fn check_span(&self, span: &WordSpan) -> crate::Result<Option<SpellError>> {
        if self.checker.check(&span.text)? {
            return Ok(None);
        }

        Ok(Some(SpellError {
            word: span.text.clone(),
            line: span.line,
            column: span.column,
            context: span.context.clone(),
            suggestions: self.checker.suggest(&span.text)?,
        }))
    }

    fn should_ignore(&self, word: &str) -> bool {
        // Skip single characters
        if word.chars().count() <= 1 {
            return true;
        }

        // Skip all numbers
        if word.chars().all(|c| c.is_numeric()) {
            return true;
        }

        if self.personal_words.contains(&word.to_lowercase()) {
            return true;
        }

        self.ignore_patterns.iter().any(|pattern| pattern.is_match(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypoOptions;
    use tempfile::tempdir;

    const AFF: &str = "SFX S Y 1\nSFX S 0 s .\n";
    const DIC: &str = "4\nthe/S\ncat/S\nsat\nmat/S\n";

    fn text_checker(config: &Config) -> TextChecker {
        let checker = SpellChecker::new("en_US", AFF, DIC, TypoOptions::default());
        TextChecker::new(checker, config).unwrap()
    }

    #[test]
    fn test_check_text() {
        let config = Config::default();
        let checker = text_checker(&config);

        let result = checker.check_text("The cats sat on teh mat").unwrap();
        let words: Vec<&str> = result.errors.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["on", "teh"]);
        assert_eq!(result.error_count, 2);

        let teh = &result.errors[1];
        assert_eq!(teh.column, 17);
        assert_eq!(teh.suggestions.first().map(String::as_str), Some("the"));
    }

    #[test]
    fn test_personal_dictionary_and_patterns() {
        let dir = tempdir().unwrap();
        let personal = dir.path().join("personal.txt");
        fs::write(&personal, "# mine\nteh\n").unwrap();

        let config = Config {
            personal_dictionary: Some(personal),
            ignore_patterns: vec![r"^o\w$".to_string(), "(".to_string()],
            ..Default::default()
        };
        let checker = text_checker(&config);

        let result = checker.check_text("The cat sat on teh mat").unwrap();
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_check_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "cat\nmatt\n").unwrap();

        let checker = text_checker(&Config::default());
        let result = checker.check_file(&path).unwrap();
        assert_eq!(result.error_count, 1);
        assert_eq!(result.errors[0].line, 2);
        assert!(checker.check_file(&dir.path().join("missing.txt")).is_err());
    }
}
