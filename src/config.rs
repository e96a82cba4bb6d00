use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Options accepted by [`crate::SpellChecker::new`].
///
/// Flag overrides replace whatever the affix file declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypoOptions {
    pub encoding: Option<String>,
    pub complex_prefixes: Option<bool>,
    pub forbidden_word: Option<String>,
    pub keep_case: Option<String>,
    pub need_affix: Option<String>,
    pub no_suggest: Option<String>,
    pub max_suggestions: usize,
    /// Reserved; suggestions are ranked by n-gram similarity only
    pub max_phonetic_suggestions: usize,
    pub max_compound_suggestions: usize,
    /// Language used when the checker is built with an empty language
    pub default_dictionary: Option<String>,
    pub debug: bool,
}

fn default_max_suggestions() -> usize {
    5
}

impl Default for TypoOptions {
    fn default() -> Self {
        Self {
            encoding: None,
            complex_prefixes: None,
            forbidden_word: None,
            keep_case: None,
            need_affix: None,
            no_suggest: None,
            max_suggestions: default_max_suggestions(),
            max_phonetic_suggestions: 2,
            max_compound_suggestions: 3,
            default_dictionary: None,
            debug: false,
        }
    }
}

/// Command-line configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub language: String,

    /// Directory holding `<language>.aff` / `<language>.dic` pairs
    #[serde(default)]
    pub dictionary_dir: Option<PathBuf>,

    #[serde(default)]
    pub personal_dictionary: Option<PathBuf>,

    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    #[serde(default)]
    pub options: TypoOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en_US".to_string(),
            dictionary_dir: None,
            personal_dictionary: None,
            ignore_patterns: vec![
                r"\b[A-Z0-9_]{2,}\b".to_string(),    // ALL_CAPS
                r"https?://\S+".to_string(),         // URLs
                r"\b[a-fA-F0-9]{32,}\b".to_string(), // Hashes
                r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}".to_string(), // Emails
            ],
            options: TypoOptions::default(),
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(
        language: Option<String>,
        personal_dict: Option<PathBuf>,
        cli_patterns: Vec<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(".typochk.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        // Apply CLI overrides
        if let Some(language) = language {
            config.language = language;
        }
        if let Some(dict) = personal_dict {
            config.personal_dictionary = Some(dict);
        }
        if !cli_patterns.is_empty() {
            config.ignore_patterns.extend(cli_patterns);
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // Merge logic: other's values override self's if they differ from defaults
        if other.language != "en_US" {
            self.language = other.language;
        }
        if other.dictionary_dir.is_some() {
            self.dictionary_dir = other.dictionary_dir;
        }
        if other.personal_dictionary.is_some() {
            self.personal_dictionary = other.personal_dictionary;
        }
        if !other.ignore_patterns.is_empty() {
            self.ignore_patterns = other.ignore_patterns;
        }
        if other.options != TypoOptions::default() {
            self.options = other.options;
        }
        self
    }

    /// Where dictionaries are looked up: the configured directory or the data dir.
    pub fn dictionary_dir(&self) -> Option<PathBuf> {
        self.dictionary_dir.clone().or_else(Self::data_dir)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "typochk").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "typochk").map(|dirs| dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.language, "en_US");
        assert_eq!(config.options.max_suggestions, 5);
        assert_eq!(config.options.max_phonetic_suggestions, 2);
        assert_eq!(config.options.max_compound_suggestions, 3);
        assert!(!config.options.debug);
    }

    #[test]
    fn test_merge_configs() {
        let base = Config::default();
        let override_config = Config {
            language: "de_DE".to_string(),
            options: TypoOptions {
                max_suggestions: 8,
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.language, "de_DE");
        assert_eq!(merged.options.max_suggestions, 8);
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("typochk.toml");
        fs::write(
            &path,
            "language = \"tr_TR\"\n\n[options]\nmax_suggestions = 3\nno_suggest = \"%\"\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.language, "tr_TR");
        assert_eq!(config.options.max_suggestions, 3);
        assert_eq!(config.options.no_suggest.as_deref(), Some("%"));
        // Unspecified options keep their defaults
        assert_eq!(config.options.max_compound_suggestions, 3);
        assert!(config.ignore_patterns.is_empty());
    }
}
