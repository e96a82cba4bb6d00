use crate::checker::dictionary::{AffixKind, AffixRule, Dictionary};
use crate::checker::utils::apply_affix;
use std::collections::HashSet;

/// Continuation chains deeper than this are ignored, which also stops
/// cyclic continuation flags in malformed affix files.
const MAX_CONTINUATION_DEPTH: usize = 3;

/// Expands base words into the surface forms their affix flags produce.
pub struct AffixProcessor<'a> {
    dictionary: &'a Dictionary,
}

/// Ordered, de-duplicated collection of produced forms.
#[derive(Default)]
struct Forms {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl Forms {
    fn push(&mut self, form: String) {
        if self.seen.insert(form.clone()) {
            self.ordered.push(form);
        }
    }
}

impl<'a> AffixProcessor<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Self {
        Self { dictionary }
    }

    /// All surface forms producible from `base_word` with the given raw flags.
    ///
    /// The bare word is included unless it carries NEEDAFFIX.
    pub fn expand_word(&self, base_word: &str, flag_string: &str) -> Vec<String> {
        let flags = self.dictionary.parse_flags(flag_string);
        let mut forms = Forms::default();

        if self.is_valid_with_affixes(flag_string) {
            forms.push(base_word.to_string());
        }

        for flag in &flags {
            let Some(rule) = self.dictionary.rules.get(flag) else {
                continue;
            };

            for entry in &rule.entries {
                let Some(derived) = apply_affix(base_word, entry, rule.kind) else {
                    continue;
                };

                if !self.needs_more_affixes(&entry.cont_flags) {
                    forms.push(derived.clone());
                }

                // One prefix and one suffix may combine when both rules allow it
                if rule.cross_product && rule.kind == AffixKind::Suffix {
                    for other in self.cross_rules(&flags, rule.kind.opposite()) {
                        for other_entry in &other.entries {
                            if let Some(combined) = apply_affix(&derived, other_entry, other.kind)
                            {
                                forms.push(combined);
                            }
                        }
                    }
                }

                self.follow_continuations(&derived, &entry.cont_flags, 1, &mut forms);
            }
        }

        forms.ordered
    }

    /// Whether `surface` is among the forms `base_word` expands to.
    pub fn is_expansion_of(&self, surface: &str, base_word: &str, flag_string: &str) -> bool {
        self.expand_word(base_word, flag_string)
            .iter()
            .any(|form| form == surface)
    }

    /// A word may stand on its own unless it carries NEEDAFFIX.
    pub fn is_valid_with_affixes(&self, flag_string: &str) -> bool {
        !self
            .dictionary
            .has_flag(flag_string, self.dictionary.flags.need_affix.as_ref())
    }

    fn needs_more_affixes(&self, cont_flags: &[String]) -> bool {
        match &self.dictionary.flags.need_affix {
            Some(need_affix) => cont_flags.contains(need_affix),
            None => false,
        }
    }

    fn cross_rules(&self, flags: &[String], kind: AffixKind) -> Vec<&'a AffixRule> {
        let dictionary: &'a Dictionary = self.dictionary;
        flags
            .iter()
            .filter_map(|flag| dictionary.rules.get(flag))
            .filter(|rule| rule.kind == kind && rule.cross_product)
            .collect()
    }

    fn follow_continuations(
        &self,
        word: &str,
        cont_flags: &[String],
        depth: usize,
        forms: &mut Forms,
    ) {
        if depth > MAX_CONTINUATION_DEPTH {
            return;
        }

        for flag in cont_flags {
            let Some(rule) = self.dictionary.rules.get(flag) else {
                continue;
            };

            for entry in &rule.entries {
                let Some(derived) = apply_affix(word, entry, rule.kind) else {
                    continue;
                };

                if !self.needs_more_affixes(&entry.cont_flags) {
                    forms.push(derived.clone());
                }
                self.follow_continuations(&derived, &entry.cont_flags, depth + 1, forms);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::dictionary::load_dictionary;

    const AFF: &str = "\
NEEDAFFIX ?

PFX A Y 1
PFX A 0 re .

PFX U N 1
PFX U 0 un .

SFX D Y 3
SFX D 0 ed [^ey]
SFX D 0 d e
SFX D y ied [^aeiou]y

SFX S Y 1
SFX S 0 s/Z .

SFX Z Y 1
SFX Z 0 ness/Z .

SFX N Y 1
SFX N 0 ab/?M .

SFX M Y 1
SFX M 0 le .
";

    fn dictionary() -> Dictionary {
        load_dictionary(AFF, "walk/D\nbake/D\ncarry/D\nload/ADU\nroot/?D\nkind/S\nread/N\n").unwrap()
    }

    #[test]
    fn test_simple_suffix() {
        let dict = dictionary();
        let processor = AffixProcessor::new(&dict);
        let forms = processor.expand_word("walk", "D");
        assert_eq!(forms, vec!["walk", "walked"]);

        assert!(processor.expand_word("bake", "D").contains(&"baked".to_string()));
        assert!(processor.expand_word("carry", "D").contains(&"carried".to_string()));
        assert!(!processor.expand_word("carry", "D").contains(&"carryed".to_string()));
    }

    #[test]
    fn test_cross_product() {
        let dict = dictionary();
        let processor = AffixProcessor::new(&dict);
        let forms = processor.expand_word("load", "ADU");
        assert!(forms.contains(&"reload".to_string()));
        assert!(forms.contains(&"loaded".to_string()));
        assert!(forms.contains(&"reloaded".to_string()));
        assert!(forms.contains(&"unload".to_string()));
        // U does not allow cross products
        assert!(!forms.contains(&"unloaded".to_string()));
    }

    #[test]
    fn test_need_affix() {
        let dict = dictionary();
        let processor = AffixProcessor::new(&dict);
        let forms = processor.expand_word("root", "?D");
        assert_eq!(forms, vec!["rooted"]);
        assert!(!processor.is_valid_with_affixes("?D"));
        assert!(processor.is_valid_with_affixes("D"));
    }

    #[test]
    fn test_continuation_flags_are_bounded() {
        let dict = dictionary();
        let processor = AffixProcessor::new(&dict);
        let forms = processor.expand_word("kind", "S");
        assert!(forms.contains(&"kinds".to_string()));
        assert!(forms.contains(&"kindsness".to_string()));
        assert!(forms.contains(&"kindsnessnessness".to_string()));
        // Z continues into itself; the chain stops at the depth limit
        assert!(!forms.contains(&"kindsnessnessnessness".to_string()));
    }

    #[test]
    fn test_need_affix_continuation() {
        let dict = dictionary();
        let processor = AffixProcessor::new(&dict);
        let forms = processor.expand_word("read", "N");
        assert!(!forms.contains(&"readab".to_string()));
        assert!(forms.contains(&"readable".to_string()));
        assert!(processor.is_expansion_of("readable", "read", "N"));
        assert!(!processor.is_expansion_of("readab", "read", "N"));
    }

    #[test]
    fn test_unknown_flags_are_ignored() {
        let dict = dictionary();
        let processor = AffixProcessor::new(&dict);
        assert_eq!(processor.expand_word("walk", "QW"), vec!["walk"]);
    }
}
