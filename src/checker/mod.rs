pub mod affix;
pub mod compound;
pub mod dictionary;
pub mod index;
pub mod suggestions;
pub mod tokenizer;
pub mod utils;

use crate::config::TypoOptions;
use crate::error::{Result, TypoError};
use affix::AffixProcessor;
use compound::{CompoundProcessor, CompoundSettings};
use dictionary::{create_fallback_dictionary, load_dictionary_with_language, Dictionary};
use index::SurfaceIndex;
use log::{debug, warn};
use serde::Serialize;
use suggestions::SuggestionGenerator;

/// Where the active dictionary came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    Parsed,
    /// The supplied data could not be parsed; `reason` says why
    Fallback { reason: TypoError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DictionaryStats {
    pub word_count: usize,
    pub affix_rule_count: usize,
    pub compound_rule_count: usize,
    pub surface_form_count: usize,
    pub fallback: bool,
}

/// Spell checking engine over one immutable dictionary.
///
/// Construction never fails: unusable affix or dictionary data is replaced by
/// a small fallback word list, which [`SpellChecker::dictionary_stats`] and
/// [`SpellChecker::source`] reveal. All methods take `&self`, so one checker
/// can be shared between threads.
pub struct SpellChecker {
    dictionary: Dictionary,
    index: SurfaceIndex,
    compound: CompoundSettings,
    options: TypoOptions,
    source: DictionarySource,
}

impl SpellChecker {
    pub fn new(language: &str, aff_data: &str, dic_data: &str, options: TypoOptions) -> Self {
        let language = if language.is_empty() {
            options
                .default_dictionary
                .clone()
                .unwrap_or_else(|| "en_US".to_string())
        } else {
            language.to_string()
        };

        match Self::build(&language, aff_data, dic_data, &options) {
            Ok((dictionary, index)) => {
                Self::assemble(dictionary, index, options, DictionarySource::Parsed)
            }
            Err(reason) => {
                if options.debug {
                    warn!("Falling back to built-in word list for '{}': {}", language, reason);
                } else {
                    debug!("Falling back to built-in word list for '{}': {}", language, reason);
                }

                let dictionary = create_fallback_dictionary(&language);
                let index = SurfaceIndex::build(&dictionary).unwrap_or_default();
                Self::assemble(dictionary, index, options, DictionarySource::Fallback { reason })
            }
        }
    }

    /// A checker backed only by the fallback word list.
    pub fn fallback(language: &str, options: TypoOptions) -> Self {
        Self::new(language, "", "", options)
    }

    fn build(
        language: &str,
        aff_data: &str,
        dic_data: &str,
        options: &TypoOptions,
    ) -> Result<(Dictionary, SurfaceIndex)> {
        let dictionary =
            load_dictionary_with_language(aff_data, dic_data, Some(language))?.with_options(options);
        let index = SurfaceIndex::build(&dictionary)?;
        Ok((dictionary, index))
    }

    fn assemble(
        dictionary: Dictionary,
        index: SurfaceIndex,
        options: TypoOptions,
        source: DictionarySource,
    ) -> Self {
        let compound = CompoundSettings::from_rules(&dictionary.compound_rules, dictionary.flag_type);
        Self {
            dictionary,
            index,
            compound,
            options,
            source,
        }
    }

    /// Whether `word` is spelled correctly.
    pub fn check(&self, word: &str) -> Result<bool> {
        let word = self.normalize_input(word)?;
        Ok(self.check_normalized(&word))
    }

    /// Ranked corrections for `word`; empty when the word is already correct.
    pub fn suggest(&self, word: &str) -> Result<Vec<String>> {
        let word = self.normalize_input(word)?;
        if self.check_normalized(&word) {
            return Ok(Vec::new());
        }

        Ok(SuggestionGenerator::new(&self.dictionary, self.options.max_suggestions).suggest(&word))
    }

    /// Ways of writing `word` as a compound, bounded by `max_compound_suggestions`.
    pub fn compound_suggestions(&self, word: &str) -> Result<Vec<String>> {
        let word = self.normalize_input(word)?;
        Ok(self
            .compound_processor()
            .get_compound_suggestions(&word, self.options.max_compound_suggestions))
    }

    pub fn dictionary_stats(&self) -> DictionaryStats {
        DictionaryStats {
            word_count: self.dictionary.words.len(),
            affix_rule_count: self.dictionary.rules.len(),
            compound_rule_count: self.dictionary.compound_rules.len(),
            surface_form_count: self.index.len(),
            fallback: self.is_fallback(),
        }
    }

    /// Raw flags of a dictionary word, if it is one.
    pub fn dictionary_word(&self, word: &str) -> Option<&str> {
        self.dictionary.word_flags(word)
    }

    /// Every form a dictionary word expands to; empty for unknown words.
    pub fn expanded_forms(&self, word: &str) -> Vec<String> {
        let key = self.dictionary.normalize(word);
        match self.dictionary.words.get(&key) {
            Some(flags) => self.affix_processor().expand_word(&key, flags),
            None => Vec::new(),
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn options(&self) -> &TypoOptions {
        &self.options
    }

    pub fn source(&self) -> &DictionarySource {
        &self.source
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, DictionarySource::Fallback { .. })
    }

    pub fn language(&self) -> &str {
        &self.dictionary.language
    }

    fn affix_processor(&self) -> AffixProcessor<'_> {
        AffixProcessor::new(&self.dictionary)
    }

    fn compound_processor(&self) -> CompoundProcessor<'_> {
        CompoundProcessor::new(&self.dictionary, &self.compound)
    }

    fn normalize_input(&self, word: &str) -> Result<String> {
        let word = word.trim();
        if word.is_empty() {
            return Err(TypoError::invalid_word("word must not be empty"));
        }
        Ok(self.dictionary.normalize(word))
    }

    fn check_normalized(&self, word: &str) -> bool {
        if let Some(flags) = self.dictionary.words.get(word) {
            if self
                .dictionary
                .has_flag(flags, self.dictionary.flags.forbidden_word.as_ref())
            {
                return false;
            }
            // ONLYINCOMPOUND words fall through to the compound check
            if !self.dictionary.is_compound_only(flags) {
                return self.affix_processor().is_valid_with_affixes(flags);
            }
        }

        if self.index.contains(word) {
            return true;
        }

        // Accepts "re" + any known word or expansion even without a "re"
        // prefix rule, and without the forbidden/needaffix checks above.
        // Kept for compatibility; pending product review.
        if let Some(rest) = word.strip_prefix("re") {
            if !rest.is_empty() && (self.dictionary.words.contains_key(rest) || self.index.contains(rest)) {
                return true;
            }
        }

        self.compound_processor().check_compound_word(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AFF: &str = "\
SET UTF-8
LANG en_US
FORBIDDENWORD !
NEEDAFFIX ?
NOSUGGEST %
COMPOUNDMIN 3
COMPOUNDFLAG X
ONLYINCOMPOUND O

SFX D Y 1
SFX D 0 ed .
";

    const DIC: &str = "7\nwalk/D\nroot/?D\nbadword/!\nsun/X\nflower/X\ndarn/%\nberry/XO\n";

    fn checker() -> SpellChecker {
        SpellChecker::new("en_US", AFF, DIC, TypoOptions::default())
    }

    #[test]
    fn test_check_paths() {
        let checker = checker();
        assert!(!checker.is_fallback());
        assert!(checker.check("walk").unwrap());
        assert!(checker.check("Walked").unwrap());
        assert!(!checker.check("walkedz").unwrap());
        assert!(!checker.check("badword").unwrap());
        assert!(!checker.check("root").unwrap());
        assert!(checker.check("rooted").unwrap());
        assert!(checker.check("sunflower").unwrap());
        assert!(checker.check("darn").unwrap());
    }

    #[test]
    fn test_only_in_compound() {
        let checker = checker();
        assert!(!checker.check("berry").unwrap());
        assert!(!checker.check("Berry").unwrap());
        assert!(checker.check("sunberry").unwrap());
        assert!(!checker.suggest("bery").unwrap().contains(&"berry".to_string()));
    }

    #[test]
    fn test_re_prefix_shortcut() {
        let checker = checker();
        assert!(checker.check("rewalk").unwrap());
        assert!(checker.check("rewalked").unwrap());
        // The shortcut skips the forbidden-word check
        assert!(checker.check("rebadword").unwrap());
        assert!(!checker.check("re").unwrap());
    }

    #[test]
    fn test_empty_word_is_an_error() {
        let checker = checker();
        assert!(matches!(checker.check(""), Err(TypoError::InvalidWord(_))));
        assert!(matches!(checker.suggest("  "), Err(TypoError::InvalidWord(_))));
    }

    #[test]
    fn test_suggest() {
        let checker = checker();
        assert!(checker.suggest("walk").unwrap().is_empty());
        let suggestions = checker.suggest("wakl").unwrap();
        assert_eq!(suggestions.first().map(String::as_str), Some("walk"));
        // NOSUGGEST words are never offered
        assert!(!checker.suggest("dran").unwrap().contains(&"darn".to_string()));
    }

    #[test]
    fn test_fallback_on_parse_failure() {
        let checker = SpellChecker::new("en_US", "", DIC, TypoOptions::default());
        assert!(checker.is_fallback());
        assert!(matches!(
            checker.source(),
            DictionarySource::Fallback {
                reason: TypoError::AffixParse(_)
            }
        ));
        let stats = checker.dictionary_stats();
        assert_eq!(stats.word_count, 17);
        assert_eq!(stats.affix_rule_count, 0);
        assert!(stats.fallback);
        assert!(checker.check("the").unwrap());
        assert!(!checker.check("xyzzy").unwrap());
    }

    #[test]
    fn test_introspection() {
        let checker = checker();
        let stats = checker.dictionary_stats();
        assert_eq!(stats.word_count, 7);
        assert_eq!(stats.affix_rule_count, 1);
        assert_eq!(stats.compound_rule_count, 3);
        assert!(!stats.fallback);

        assert_eq!(checker.dictionary_word("walk"), Some("D"));
        assert_eq!(checker.dictionary_word("walked"), None);
        assert_eq!(checker.expanded_forms("walk"), vec!["walk", "walked"]);
        assert!(checker.expanded_forms("nothing").is_empty());
        assert_eq!(
            checker.compound_suggestions("sunflower").unwrap(),
            vec!["sunflower", "sun-flower"]
        );
    }

    #[test]
    fn test_option_overrides() {
        let options = TypoOptions {
            forbidden_word: Some("D".to_string()),
            ..Default::default()
        };
        let checker = SpellChecker::new("en_US", AFF, DIC, options);
        assert!(!checker.check("walk").unwrap());
        assert!(checker.check("badword").unwrap());
    }

    #[test]
    fn test_default_language() {
        let options = TypoOptions {
            default_dictionary: Some("tr_TR".to_string()),
            ..Default::default()
        };
        let checker = SpellChecker::fallback("", options);
        assert_eq!(checker.language(), "tr_TR");
        assert!(checker.dictionary().case_sensitive);
    }
}
