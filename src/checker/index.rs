use crate::checker::affix::AffixProcessor;
use crate::checker::dictionary::Dictionary;
use crate::error::{Result, TypoError};
use fst::Set;
use log::debug;
use rayon::prelude::*;
use std::collections::BTreeSet;

/// Every surface form the dictionary can produce, built once at load time.
///
/// Answers "does any base word + rule combination yield this form?" with a
/// set lookup instead of re-expanding the whole dictionary per query.
#[derive(Default)]
pub struct SurfaceIndex {
    forms: Set<Vec<u8>>,
}

impl SurfaceIndex {
    pub fn build(dictionary: &Dictionary) -> Result<Self> {
        let processor = AffixProcessor::new(dictionary);

        let expansions: Vec<Vec<String>> = dictionary
            .words
            .par_iter()
            .filter(|(_, flags)| !dictionary.is_compound_only(flags))
            .map(|(word, flags)| processor.expand_word(word, flags))
            .collect();

        let forms: BTreeSet<String> = expansions
            .into_iter()
            .flatten()
            .map(|form| dictionary.normalize(&form))
            .filter(|form| !form.is_empty())
            .collect();

        let forms = Set::from_iter(forms)
            .map_err(|e| TypoError::dictionary_parse(format!("Failed to build surface index: {}", e)))?;

        debug!("Built surface index with {} forms", forms.len());

        Ok(Self { forms })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.forms.contains(word.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::dictionary::load_dictionary;

    #[test]
    fn test_index_contains_expansions() {
        let aff = "NEEDAFFIX ?\nSFX D Y 1\nSFX D 0 ed .\nPFX R Y 1\nPFX R 0 RE .\n";
        let dict = load_dictionary(aff, "walk/DR\nroot/?D\n").unwrap();
        let index = SurfaceIndex::build(&dict).unwrap();

        assert!(index.contains("walk"));
        assert!(index.contains("walked"));
        // Affix text is folded with the dictionary's case rules
        assert!(index.contains("rewalked"));
        assert!(index.contains("rooted"));
        assert!(!index.contains("root"));
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_index_normalizes_forms() {
        let aff = "IGNORE -\nONLYINCOMPOUND O\nSFX S Y 1\nSFX S 0 -s .\n";
        let dict = load_dictionary(aff, "e-mail/S\nberry/SO\n").unwrap();
        let index = SurfaceIndex::build(&dict).unwrap();

        assert!(index.contains("email"));
        assert!(index.contains("emails"));
        assert!(!index.contains("e-mail"));
        // Compound-only words contribute no stand-alone forms
        assert!(!index.contains("berry"));
        assert!(!index.contains("berrys"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_empty_index() {
        let index = SurfaceIndex::default();
        assert!(index.is_empty());
        assert!(!index.contains("anything"));
    }
}
