use crate::checker::dictionary::{CompoundRule, Dictionary, FlagType};
use std::collections::HashSet;

const DEFAULT_COMPOUND_MIN: usize = 3;

/// Compound directives interpreted once from the raw `COMPOUND*` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSettings {
    /// False when the affix file declared no compound directives at all
    pub enabled: bool,
    pub min: usize,
    /// Maximum number of parts; 0 means unbounded
    pub max: usize,
    pub begin_flags: HashSet<String>,
    pub middle_flags: HashSet<String>,
    pub end_flags: HashSet<String>,
    pub forbid_flags: HashSet<String>,
}

impl Default for CompoundSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            min: DEFAULT_COMPOUND_MIN,
            max: 0,
            begin_flags: HashSet::new(),
            middle_flags: HashSet::new(),
            end_flags: HashSet::new(),
            forbid_flags: HashSet::new(),
        }
    }
}

impl CompoundSettings {
    pub fn from_rules(rules: &[CompoundRule], flag_type: FlagType) -> Self {
        let mut settings = Self {
            enabled: !rules.is_empty(),
            ..Self::default()
        };

        for rule in rules {
            let flags = flag_type.parse(&rule.value);
            match rule.kind.as_str() {
                "COMPOUNDMIN" => {
                    if let Ok(min) = rule.value.trim().parse::<usize>() {
                        settings.min = min.max(1);
                    }
                }
                "COMPOUNDWORDMAX" | "COMPOUNDMAX" => {
                    if let Ok(max) = rule.value.trim().parse::<usize>() {
                        settings.max = max;
                    }
                }
                "COMPOUNDFLAG" => {
                    settings.begin_flags.extend(flags.iter().cloned());
                    settings.middle_flags.extend(flags.iter().cloned());
                    settings.end_flags.extend(flags);
                }
                "COMPOUNDBEGIN" => settings.begin_flags.extend(flags),
                "COMPOUNDMIDDLE" => settings.middle_flags.extend(flags),
                "COMPOUNDEND" | "COMPOUNDLAST" => settings.end_flags.extend(flags),
                "COMPOUNDFORBIDFLAG" => settings.forbid_flags.extend(flags),
                _ => {}
            }
        }

        settings
    }
}

/// Validates and splits words made of several dictionary words.
pub struct CompoundProcessor<'a> {
    dictionary: &'a Dictionary,
    settings: &'a CompoundSettings,
}

impl<'a> CompoundProcessor<'a> {
    pub fn new(dictionary: &'a Dictionary, settings: &'a CompoundSettings) -> Self {
        Self {
            dictionary,
            settings,
        }
    }

    /// Whether `word` splits into a valid sequence of compound parts.
    pub fn check_compound_word(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        if !self.settings.enabled || chars.len() < 2 * self.settings.min {
            return false;
        }
        self.can_complete(&chars, 0, 0, &mut HashSet::new())
    }

    /// Whether `fragment` may appear at the given position of a compound.
    pub fn is_valid_compound_part(&self, fragment: &str, is_beginning: bool, is_ending: bool) -> bool {
        if fragment.chars().count() < self.settings.min {
            return false;
        }

        let Some(raw_flags) = self.dictionary.word_flags(fragment) else {
            return false;
        };
        let flags = self.dictionary.parse_flags(raw_flags);

        let forbidden = flags.iter().any(|flag| {
            self.settings.forbid_flags.contains(flag)
                || self.dictionary.flags.forbidden_word.as_ref() == Some(flag)
        });
        if forbidden {
            return false;
        }

        let position_flags = if is_beginning {
            &self.settings.begin_flags
        } else if is_ending {
            &self.settings.end_flags
        } else {
            &self.settings.middle_flags
        };

        // ONLYINCOMPOUND words are ordinary parts here
        position_flags.is_empty() || flags.iter().any(|flag| position_flags.contains(flag))
    }

    /// Up to `max` splits joined without a separator, then hyphenated.
    pub fn get_compound_suggestions(&self, word: &str, max: usize) -> Vec<String> {
        let splits = self.find_splits(word, max);
        let mut suggestions: Vec<String> = Vec::new();

        let joined = splits.iter().map(|parts| parts.concat());
        let hyphenated = splits.iter().map(|parts| parts.join("-"));

        for candidate in joined.chain(hyphenated) {
            if suggestions.len() >= max {
                break;
            }
            if !suggestions.contains(&candidate) {
                suggestions.push(candidate);
            }
        }

        suggestions
    }

    /// Complete splits of `word`, stopping after `limit` of them.
    pub fn find_splits(&self, word: &str, limit: usize) -> Vec<Vec<String>> {
        let chars: Vec<char> = word.chars().collect();
        let mut splits = Vec::new();

        if !self.settings.enabled || limit == 0 || chars.len() < 2 * self.settings.min {
            return splits;
        }

        let mut dead_ends = HashSet::new();
        self.collect_splits(&chars, 0, &mut Vec::new(), &mut splits, limit, &mut dead_ends);
        splits
    }

    /// Key for a search position; part counts only matter under a fragment cap.
    fn position(&self, offset: usize, parts: usize) -> (usize, usize) {
        if self.settings.max == 0 {
            (offset, parts.min(1))
        } else {
            (offset, parts)
        }
    }

    /// Whether `chars[offset..]` completes a compound after `parts` parts.
    /// Positions known to fail are remembered in `dead_ends`.
    fn can_complete(
        &self,
        chars: &[char],
        offset: usize,
        parts: usize,
        dead_ends: &mut HashSet<(usize, usize)>,
    ) -> bool {
        let min = self.settings.min;
        let max = self.settings.max;
        let rest = &chars[offset..];
        if rest.len() < 2 * min || dead_ends.contains(&self.position(offset, parts)) {
            return false;
        }

        for split in min..=rest.len() - min {
            let left: String = rest[..split].iter().collect();
            if !self.is_valid_compound_part(&left, parts == 0, false) {
                continue;
            }

            let part_count = parts + 2;
            let right: String = rest[split..].iter().collect();
            if (max == 0 || part_count <= max) && self.is_valid_compound_part(&right, false, true) {
                return true;
            }
            if (max == 0 || part_count < max)
                && self.can_complete(chars, offset + split, parts + 1, dead_ends)
            {
                return true;
            }
        }

        dead_ends.insert(self.position(offset, parts));
        false
    }

    fn collect_splits(
        &self,
        chars: &[char],
        offset: usize,
        parts: &mut Vec<String>,
        splits: &mut Vec<Vec<String>>,
        limit: usize,
        dead_ends: &mut HashSet<(usize, usize)>,
    ) {
        let min = self.settings.min;
        let max = self.settings.max;
        let rest = &chars[offset..];
        if rest.len() < 2 * min {
            return;
        }

        for split in min..=rest.len() - min {
            if splits.len() >= limit {
                return;
            }

            let left: String = rest[..split].iter().collect();
            if !self.is_valid_compound_part(&left, parts.is_empty(), false) {
                continue;
            }

            let right: String = rest[split..].iter().collect();
            parts.push(left);

            let part_count = parts.len() + 1;
            if (max == 0 || part_count <= max) && self.is_valid_compound_part(&right, false, true) {
                let mut complete = parts.clone();
                complete.push(right);
                splits.push(complete);
            } else if (max == 0 || part_count < max)
                && self.can_complete(chars, offset + split, parts.len(), dead_ends)
            {
                self.collect_splits(chars, offset + split, parts, splits, limit, dead_ends);
            }

            parts.pop();
        }
    }
}
