use crate::config::TypoOptions;
use crate::error::{Result, TypoError};
use crate::parser::{parse_aff_file, parse_dic_entries};
use log::debug;
use std::collections::HashMap;
use std::str::FromStr;

/// Languages whose dotted/dotless I makes naive lowercasing lossy.
const CASE_SENSITIVE_LANGUAGES: [&str; 3] = ["tr", "az", "crh"];

/// Words used when no usable dictionary could be loaded.
const FALLBACK_WORDS: [&str; 17] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was",
];

/// How a raw flag string such as `ABC`, `AaBb` or `12,7` is split into flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagType {
    #[default]
    Char,
    Long,
    Num,
    Utf8,
}

impl FromStr for FlagType {
    type Err = TypoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "char" | "ascii" => Ok(FlagType::Char),
            "long" => Ok(FlagType::Long),
            "num" => Ok(FlagType::Num),
            "utf-8" | "utf8" => Ok(FlagType::Utf8),
            other => Err(TypoError::unsupported(format!("flag type '{}'", other))),
        }
    }
}

impl FlagType {
    /// Tokenize a raw flag string into individual flags.
    pub fn parse(&self, raw: &str) -> Vec<String> {
        let raw = raw.trim();
        match self {
            FlagType::Char | FlagType::Utf8 => raw.chars().map(String::from).collect(),
            FlagType::Long => {
                let chars: Vec<char> = raw.chars().collect();
                chars.chunks(2).map(|pair| pair.iter().collect()).collect()
            }
            FlagType::Num => raw
                .split(',')
                .map(str::trim)
                .filter(|flag| !flag.is_empty() && flag.chars().all(|c| c.is_ascii_digit()))
                .map(String::from)
                .collect(),
        }
    }

    /// Join flags back into the raw form this flag type reads.
    pub fn join(&self, flags: &[String]) -> String {
        match self {
            FlagType::Num => flags.join(","),
            _ => flags.concat(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

impl AffixKind {
    pub fn opposite(&self) -> Self {
        match self {
            AffixKind::Prefix => AffixKind::Suffix,
            AffixKind::Suffix => AffixKind::Prefix,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ConditionUnit {
    Any,
    Char(char),
    Class { negated: bool, chars: Vec<char> },
}

impl ConditionUnit {
    fn matches(&self, ch: char) -> bool {
        match self {
            ConditionUnit::Any => true,
            ConditionUnit::Char(c) => *c == ch,
            ConditionUnit::Class { negated, chars } => chars.contains(&ch) != *negated,
        }
    }
}

/// The pattern an affix entry's target region must match.
///
/// Supports `.`, literal characters and `[..]`/`[^..]` classes, each standing
/// for one character. Prefix conditions are aligned with the start of the
/// word, suffix conditions with its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    source: String,
    units: Vec<ConditionUnit>,
}

impl Condition {
    pub fn parse(source: &str) -> Self {
        let mut units = Vec::new();
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => units.push(ConditionUnit::Any),
                '[' => {
                    let negated = chars.next_if_eq(&'^').is_some();
                    let mut class = Vec::new();
                    for member in chars.by_ref() {
                        if member == ']' {
                            break;
                        }
                        class.push(member);
                    }
                    units.push(ConditionUnit::Class {
                        negated,
                        chars: class,
                    });
                }
                c => units.push(ConditionUnit::Char(c)),
            }
        }

        Self {
            source: source.to_string(),
            units,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the start (prefix) or end (suffix) of `word` satisfies the condition.
    pub fn matches(&self, word: &str, kind: AffixKind) -> bool {
        if self.source == "." {
            return true;
        }

        let chars: Vec<char> = word.chars().collect();
        if chars.len() < self.units.len() {
            return false;
        }

        let region = match kind {
            AffixKind::Prefix => &chars[..self.units.len()],
            AffixKind::Suffix => &chars[chars.len() - self.units.len()..],
        };

        self.units
            .iter()
            .zip(region)
            .all(|(unit, ch)| unit.matches(*ch))
    }
}

impl Default for Condition {
    fn default() -> Self {
        Self::parse(".")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixEntry {
    pub flag: String,
    pub stripping: String,
    pub affix: String,
    pub condition: Condition,
    pub cont_flags: Vec<String>,
    pub morph_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixRule {
    pub kind: AffixKind,
    pub flag: String,
    pub cross_product: bool,
    pub entries: Vec<AffixEntry>,
}

/// A `COMPOUND*`/`ONLYINCOMPOUND` directive kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundRule {
    pub kind: String,
    pub value: String,
}

/// Flags with a fixed meaning, as declared in the affix file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialFlags {
    pub forbidden_word: Option<String>,
    pub keep_case: Option<String>,
    pub need_affix: Option<String>,
    pub circumfix: Option<String>,
    pub no_suggest: Option<String>,
    pub only_in_compound: Option<String>,
}

/// Global options read from the affix file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffixOptions {
    pub encoding: Option<String>,
    pub flag_type: FlagType,
    pub language: Option<String>,
    pub ignore: Option<String>,
    pub complex_prefixes: bool,
}

/// Everything `parse_aff_file` extracts from an `.aff` blob.
#[derive(Debug, Clone, Default)]
pub struct AffixData {
    pub rules: HashMap<String, AffixRule>,
    pub flags: SpecialFlags,
    pub compound_rules: Vec<CompoundRule>,
    pub options: AffixOptions,
}

/// Parsed language data. Built once and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Dictionary {
    pub words: HashMap<String, String>,
    pub flags: SpecialFlags,
    pub rules: HashMap<String, AffixRule>,
    pub compound_rules: Vec<CompoundRule>,
    pub encoding: String,
    pub language: String,
    pub case_sensitive: bool,
    pub complex_prefixes: bool,
    pub flag_type: FlagType,
    pub ignore_chars: Vec<char>,
}

impl Dictionary {
    /// Split a raw flag string according to this dictionary's flag type.
    pub fn parse_flags(&self, raw: &str) -> Vec<String> {
        self.flag_type.parse(raw)
    }

    /// Whether a raw flag string carries `flag`; an undeclared flag never matches.
    pub fn has_flag(&self, raw: &str, flag: Option<&String>) -> bool {
        match flag {
            Some(flag) => self.parse_flags(raw).iter().any(|f| f == flag),
            None => false,
        }
    }

    /// Raw flags of a word, looked up with the dictionary's case rules.
    pub fn word_flags(&self, word: &str) -> Option<&str> {
        self.words.get(&self.normalize(word)).map(String::as_str)
    }

    /// Apply IGNORE characters and case folding to a lookup key.
    pub fn normalize(&self, word: &str) -> String {
        let stripped: String = if self.ignore_chars.is_empty() {
            word.to_string()
        } else {
            word.chars()
                .filter(|c| !self.ignore_chars.contains(c))
                .collect()
        };
        self.fold_case(&stripped)
    }

    pub fn fold_case(&self, word: &str) -> String {
        if self.case_sensitive {
            word.to_string()
        } else {
            word.to_lowercase()
        }
    }

    /// Apply caller overrides before the dictionary is handed to the engine.
    pub fn with_options(mut self, options: &TypoOptions) -> Self {
        if let Some(encoding) = &options.encoding {
            self.encoding = encoding.clone();
        }
        if let Some(complex_prefixes) = options.complex_prefixes {
            self.complex_prefixes = complex_prefixes;
        }

        let overrides = [
            (&options.forbidden_word, &mut self.flags.forbidden_word),
            (&options.keep_case, &mut self.flags.keep_case),
            (&options.need_affix, &mut self.flags.need_affix),
            (&options.no_suggest, &mut self.flags.no_suggest),
        ];
        for (value, slot) in overrides {
            if value.is_some() {
                *slot = value.clone();
            }
        }

        self
    }

    /// Whether a word with these flags may only appear inside compounds.
    pub fn is_compound_only(&self, raw_flags: &str) -> bool {
        self.has_flag(raw_flags, self.flags.only_in_compound.as_ref())
    }

    /// Words a suggestion may offer: not NOSUGGEST, FORBIDDENWORD, NEEDAFFIX
    /// or ONLYINCOMPOUND.
    pub fn is_suggestable(&self, raw_flags: &str) -> bool {
        if raw_flags.is_empty() {
            return true;
        }
        let flags = self.parse_flags(raw_flags);
        [
            &self.flags.no_suggest,
            &self.flags.forbidden_word,
            &self.flags.need_affix,
            &self.flags.only_in_compound,
        ]
        .iter()
        .all(|special| match special {
            Some(special) => !flags.contains(special),
            None => true,
        })
    }
}

fn language_code(language: &str) -> String {
    language
        .split(['_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

pub fn is_case_sensitive_language(language: &str) -> bool {
    CASE_SENSITIVE_LANGUAGES.contains(&language_code(language).as_str())
}

/// Parse an `.aff`/`.dic` pair into a [`Dictionary`].
pub fn load_dictionary(aff: &str, dic: &str) -> Result<Dictionary> {
    load_dictionary_with_language(aff, dic, None)
}

/// Like [`load_dictionary`], using `default_language` when the affix file has no `LANG`.
pub fn load_dictionary_with_language(
    aff: &str,
    dic: &str,
    default_language: Option<&str>,
) -> Result<Dictionary> {
    let affix_data = parse_aff_file(aff)?;
    let options = affix_data.options;
    let entries = parse_dic_entries(dic, options.flag_type)?;

    let language = options
        .language
        .clone()
        .or_else(|| default_language.map(str::to_string))
        .unwrap_or_default();
    let case_sensitive = is_case_sensitive_language(&language);

    let mut dictionary = Dictionary {
        words: HashMap::with_capacity(entries.len()),
        flags: affix_data.flags,
        rules: affix_data.rules,
        compound_rules: affix_data.compound_rules,
        encoding: options.encoding.unwrap_or_else(|| "UTF-8".to_string()),
        language,
        case_sensitive,
        complex_prefixes: options.complex_prefixes,
        flag_type: options.flag_type,
        ignore_chars: options.ignore.map(|s| s.chars().collect()).unwrap_or_default(),
    };

    // Keys go through the same normalization as lookups. Inserted in file
    // order so later duplicates win, also across case and IGNORE variants.
    for (word, flags) in entries {
        let key = dictionary.normalize(&word);
        if key.is_empty() {
            continue;
        }
        dictionary.words.insert(key, flags);
    }

    debug!(
        "Loaded dictionary '{}': {} words, {} affix rules, {} compound directives",
        dictionary.language,
        dictionary.words.len(),
        dictionary.rules.len(),
        dictionary.compound_rules.len()
    );

    Ok(dictionary)
}

/// A minimal stop-word dictionary that is always available.
pub fn create_fallback_dictionary(language: &str) -> Dictionary {
    let case_sensitive = is_case_sensitive_language(language);

    Dictionary {
        words: FALLBACK_WORDS
            .iter()
            .map(|word| (word.to_string(), String::new()))
            .collect(),
        flags: SpecialFlags::default(),
        rules: HashMap::new(),
        compound_rules: Vec::new(),
        encoding: "UTF-8".to_string(),
        language: language.to_string(),
        case_sensitive,
        complex_prefixes: false,
        flag_type: FlagType::Char,
        ignore_chars: Vec::new(),
    }
}
