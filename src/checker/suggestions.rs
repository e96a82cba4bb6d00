use crate::checker::dictionary::Dictionary;
use crate::checker::utils::{length_delta, levenshtein, ngram_similarity, typo_variations};
use std::collections::HashSet;

/// N-gram candidates must be at least this similar.
const NGRAM_THRESHOLD: f64 = 0.5;
/// Words whose length differs by more than this are not n-gram candidates.
const NGRAM_MAX_LENGTH_DELTA: usize = 3;

/// Produces ranked corrections for a misspelled (already normalized) word.
pub struct SuggestionGenerator<'a> {
    dictionary: &'a Dictionary,
    max_suggestions: usize,
}

/// Candidates in discovery order, without duplicates.
struct Candidates {
    seen: HashSet<String>,
    words: Vec<String>,
}

impl Candidates {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            words: Vec::new(),
        }
    }

    fn add(&mut self, word: String) {
        if self.seen.insert(word.clone()) {
            self.words.push(word);
        }
    }

    fn len(&self) -> usize {
        self.words.len()
    }
}

impl<'a> SuggestionGenerator<'a> {
    pub fn new(dictionary: &'a Dictionary, max_suggestions: usize) -> Self {
        Self {
            dictionary,
            max_suggestions,
        }
    }

    /// Generate suggestions, cheapest strategies first
    pub fn suggest(&self, word: &str) -> Vec<String> {
        if self.max_suggestions == 0 {
            return Vec::new();
        }

        let mut candidates = Candidates::new();

        // 1. Transpositions and deletions that are dictionary words
        for variation in self.typo_candidates(word) {
            candidates.add(variation);
        }

        // 2. Close edit-distance matches
        if candidates.len() < self.max_suggestions {
            for candidate in self.edit_distance_candidates(word) {
                candidates.add(candidate);
            }
        }

        // 3. Similar n-gram profiles
        if candidates.len() < self.max_suggestions {
            for candidate in self.ngram_candidates(word) {
                candidates.add(candidate);
            }
        }

        // 4. Rescore everything together so pass order does not decide rank
        self.rank(word, candidates.words)
    }

    fn is_candidate(&self, word: &str, flags: &str) -> bool {
        self.dictionary.is_suggestable(flags) && !word.is_empty()
    }

    fn typo_candidates(&self, word: &str) -> Vec<String> {
        typo_variations(word)
            .into_iter()
            .filter(|variation| match self.dictionary.words.get(variation) {
                Some(flags) => self.is_candidate(variation, flags),
                None => false,
            })
            .collect()
    }

    fn edit_distance_candidates(&self, word: &str) -> Vec<String> {
        let radius = if word.chars().count() <= 4 { 1 } else { 2 };

        let mut matches: Vec<(usize, &String)> = self
            .dictionary
            .words
            .iter()
            .filter(|(candidate, flags)| {
                candidate.as_str() != word
                    && self.is_candidate(candidate, flags)
                    && length_delta(word, candidate) <= radius
            })
            .filter_map(|(candidate, _)| {
                let distance = levenshtein(word, candidate);
                (distance <= radius).then_some((distance, candidate))
            })
            .collect();

        matches.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
        matches.into_iter().map(|(_, w)| w.clone()).collect()
    }

    fn ngram_candidates(&self, word: &str) -> Vec<String> {
        let mut matches: Vec<(f64, &String)> = self
            .dictionary
            .words
            .iter()
            .filter(|(candidate, flags)| {
                candidate.as_str() != word
                    && self.is_candidate(candidate, flags)
                    && length_delta(word, candidate) <= NGRAM_MAX_LENGTH_DELTA
            })
            .filter_map(|(candidate, _)| {
                let similarity = ngram_similarity(word, candidate);
                (similarity > NGRAM_THRESHOLD).then_some((similarity, candidate))
            })
            .collect();

        matches.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        matches.into_iter().map(|(_, w)| w.clone()).collect()
    }

    fn rank(&self, word: &str, candidates: Vec<String>) -> Vec<String> {
        let mut scored: Vec<(f64, String)> = candidates
            .into_iter()
            .map(|candidate| (score(word, &candidate), candidate))
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored.truncate(self.max_suggestions);
        scored.into_iter().map(|(_, candidate)| candidate).collect()
    }
}

/// Combined similarity score used for the final ordering.
pub fn score(word: &str, candidate: &str) -> f64 {
    let mut score = 0.0;

    if word.chars().next() == candidate.chars().next() {
        score += 2.0;
    }

    let delta = length_delta(word, candidate);
    if delta == 0 {
        score += 1.0;
    }
    score -= 0.1 * delta as f64;
    score -= 0.5 * levenshtein(word, candidate) as f64;
    score += 3.0 * ngram_similarity(word, candidate);

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::dictionary::{create_fallback_dictionary, load_dictionary};

    #[test]
    fn test_transposition_recovery() {
        let dict = create_fallback_dictionary("en_US");
        let generator = SuggestionGenerator::new(&dict, 5);
        let suggestions = generator.suggest("teh");
        assert_eq!(suggestions.first().map(String::as_str), Some("the"));
    }

    #[test]
    fn test_edit_distance_and_ngrams() {
        let dict = load_dictionary(
            "SET UTF-8\n",
            "5\nhello\nhelp\nwalked\nwalking\nbalked\n",
        )
        .unwrap();
        let generator = SuggestionGenerator::new(&dict, 5);

        let suggestions = generator.suggest("helo");
        assert!(suggestions.contains(&"hello".to_string()));
        assert!(suggestions.contains(&"help".to_string()));

        let suggestions = generator.suggest("walkd");
        assert_eq!(suggestions.first().map(String::as_str), Some("walked"));
        assert!(suggestions.contains(&"balked".to_string()));
    }

    #[test]
    fn test_skips_unsuggestable_words() {
        let dict = load_dictionary(
            "NOSUGGEST %\nFORBIDDENWORD !\nNEEDAFFIX ?\n",
            "4\nshit/%\nshirt\nshut/!\nshot/?\n",
        )
        .unwrap();
        let generator = SuggestionGenerator::new(&dict, 5);
        let suggestions = generator.suggest("shiht");
        assert!(suggestions.contains(&"shirt".to_string()));
        assert!(!suggestions.contains(&"shit".to_string()));
        assert!(!suggestions.contains(&"shut".to_string()));
        assert!(!suggestions.contains(&"shot".to_string()));
    }

    #[test]
    fn test_respects_max_suggestions() {
        let dict = load_dictionary("SET UTF-8\n", "cat\ncar\ncap\ncab\ncan\ncad\n").unwrap();
        let generator = SuggestionGenerator::new(&dict, 3);
        let suggestions = generator.suggest("caz");
        assert_eq!(suggestions.len(), 3);
        // Ties are broken alphabetically
        assert_eq!(suggestions, vec!["cab", "cad", "can"]);

        let generator = SuggestionGenerator::new(&dict, 0);
        assert!(generator.suggest("caz").is_empty());
    }

    #[test]
    fn test_score_prefers_similar_words() {
        assert!(score("walkd", "walked") > score("walkd", "balked"));
        assert!(score("teh", "the") > score("teh", "a"));
    }
}
