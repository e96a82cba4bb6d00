//! String primitives shared by the affix, compound and suggestion code.

use crate::checker::dictionary::{AffixEntry, AffixKind};
use std::collections::HashMap;

/// Calculate Levenshtein distance between two strings
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two rows are enough for the distance itself
    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };

            curr_row[j + 1] = std::cmp::min(
                std::cmp::min(
                    prev_row[j + 1] + 1, // deletion
                    curr_row[j] + 1,     // insertion
                ),
                prev_row[j] + cost, // substitution
            );
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

/// Difference in character count between two words.
pub fn length_delta(a: &str, b: &str) -> usize {
    a.chars().count().abs_diff(b.chars().count())
}

/// Contiguous character n-grams of `word`; empty when the word is shorter than `n`.
pub fn ngrams(word: &str, n: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if n == 0 || chars.len() < n {
        return Vec::new();
    }
    chars.windows(n).map(|window| window.iter().collect()).collect()
}

/// Dice coefficient of two n-gram multisets: 2 * shared / (|a| + |b|).
pub fn dice_coefficient(a: &[String], b: &[String]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for gram in a {
        *counts.entry(gram.as_str()).or_insert(0) += 1;
    }

    let mut shared = 0;
    for gram in b {
        if let Some(count) = counts.get_mut(gram.as_str()) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    (2 * shared) as f64 / total as f64
}

/// Bigram and trigram similarity, weighting trigrams twice as heavily.
pub fn ngram_similarity(a: &str, b: &str) -> f64 {
    let bigrams = dice_coefficient(&ngrams(a, 2), &ngrams(b, 2));
    let trigrams = dice_coefficient(&ngrams(a, 3), &ngrams(b, 3));
    (bigrams + 2.0 * trigrams) / 3.0
}

/// Derive a word from `word` with one affix entry.
///
/// Returns `None` when the entry's condition does not match, when the
/// stripping text is not present, or when nothing would be left.
pub fn apply_affix(word: &str, entry: &AffixEntry, kind: AffixKind) -> Option<String> {
    if !entry.condition.matches(word, kind) {
        return None;
    }

    let derived = match kind {
        AffixKind::Prefix => {
            let rest = word.strip_prefix(entry.stripping.as_str())?;
            format!("{}{}", entry.affix, rest)
        }
        AffixKind::Suffix => {
            let stem = word.strip_suffix(entry.stripping.as_str())?;
            format!("{}{}", stem, entry.affix)
        }
    };

    if derived.is_empty() {
        None
    } else {
        Some(derived)
    }
}

/// Every adjacent transposition and single-character deletion of `word`.
pub fn typo_variations(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut variations: Vec<String> = Vec::with_capacity(chars.len() * 2);

    // Transpositions (swap adjacent)
    for i in 0..chars.len().saturating_sub(1) {
        if chars[i] == chars[i + 1] {
            continue;
        }
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        variations.push(swapped.iter().collect());
    }

    // Deletions
    for i in 0..chars.len() {
        let mut shortened = chars.clone();
        shortened.remove(i);
        variations.push(shortened.iter().collect());
    }

    let mut seen = std::collections::HashSet::new();
    variations.retain(|v| !v.is_empty() && v != word && seen.insert(v.clone()));
    variations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::dictionary::Condition;

    fn entry(stripping: &str, affix: &str, condition: &str) -> AffixEntry {
        AffixEntry {
            flag: "X".to_string(),
            stripping: stripping.to_string(),
            affix: affix.to_string(),
            condition: Condition::parse(condition),
            cont_flags: Vec::new(),
            morph_code: None,
        }
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("hello", "hello"), 0);
        assert_eq!(levenshtein("hello", "hallo"), 1);
        assert_eq!(levenshtein("hello", "world"), 4);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("teh", "the"), 2);
        assert_eq!(levenshtein("naïve", "naive"), 1);
    }

    #[test]
    fn test_levenshtein_metric_properties() {
        let words = ["kitten", "sitting", "mitten", "", "sit", "kitchen"];
        for a in &words {
            assert_eq!(levenshtein(a, a), 0);
            for b in &words {
                assert_eq!(levenshtein(a, b), levenshtein(b, a));
                for c in &words {
                    assert!(levenshtein(a, c) <= levenshtein(a, b) + levenshtein(b, c));
                }
            }
        }
    }

    #[test]
    fn test_ngrams_and_dice() {
        assert_eq!(ngrams("walk", 2), vec!["wa", "al", "lk"]);
        assert_eq!(ngrams("walk", 3), vec!["wal", "alk"]);
        assert!(ngrams("a", 2).is_empty());

        let a = ngrams("night", 2);
        let b = ngrams("nacht", 2);
        // Only "ht" is shared
        assert!((dice_coefficient(&a, &b) - 0.25).abs() < 1e-9);
        assert_eq!(dice_coefficient(&[], &[]), 0.0);

        assert!((ngram_similarity("walked", "walked") - 1.0).abs() < 1e-9);
        assert!(ngram_similarity("walked", "walkde") > 0.3);
    }

    #[test]
    fn test_apply_affix() {
        assert_eq!(
            apply_affix("walk", &entry("", "ed", "."), AffixKind::Suffix).as_deref(),
            Some("walked")
        );
        assert_eq!(
            apply_affix("carry", &entry("y", "ied", "[^aeiou]y"), AffixKind::Suffix).as_deref(),
            Some("carried")
        );
        assert_eq!(
            apply_affix("play", &entry("y", "ied", "[^aeiou]y"), AffixKind::Suffix),
            None
        );
        assert_eq!(
            apply_affix("do", &entry("", "un", "."), AffixKind::Prefix).as_deref(),
            Some("undo")
        );
        // Stripping text must be present
        assert_eq!(apply_affix("walk", &entry("x", "ed", "."), AffixKind::Suffix), None);
    }

    #[test]
    fn test_typo_variations() {
        let variations = typo_variations("teh");
        assert!(variations.contains(&"the".to_string()));
        assert!(variations.contains(&"eth".to_string()));
        assert!(variations.contains(&"te".to_string()));
        assert!(!variations.contains(&"teh".to_string()));

        // Identical neighbours produce no duplicate transpositions
        let variations = typo_variations("ll");
        assert_eq!(variations, vec!["l".to_string()]);
    }
}
