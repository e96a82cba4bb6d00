use crate::checker::dictionary::{
    AffixData, AffixEntry, AffixKind, AffixRule, CompoundRule, Condition, FlagType,
};
use crate::error::{Result, TypoError};
use log::debug;

/// Parse `.aff` content into affix rules, special flags, compound directives
/// and global options.
///
/// Parsing is lenient: unknown directives and lines that do not have the
/// expected shape are skipped. Only empty content and an unsupported `FLAG`
/// type are errors.
pub fn parse_aff_file(content: &str) -> Result<AffixData> {
    if content.trim().is_empty() {
        return Err(TypoError::affix_parse("affix content is empty"));
    }

    let mut data = AffixData::default();
    // Continuation flags in blocks are split with the declared type even
    // when FLAG comes after them.
    data.options.flag_type = declared_flag_type(content)?;

    let mut lines = content.lines().map(str::trim);

    while let Some(line) = lines.next() {
        if is_skippable(line) {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let directive = tokens[0];
        let value = tokens.get(1).copied();

        match directive {
            "SET" => data.options.encoding = value.map(str::to_string),
            "LANG" => data.options.language = value.map(str::to_string),
            "IGNORE" => data.options.ignore = value.map(str::to_string),
            "COMPLEXPREFIXES" => {
                data.options.complex_prefixes = value.map_or(true, |v| v == "true")
            }
            "FORBIDDENWORD" => data.flags.forbidden_word = value.map(str::to_string),
            "KEEPCASE" => data.flags.keep_case = value.map(str::to_string),
            "NEEDAFFIX" | "PSEUDOROOT" => data.flags.need_affix = value.map(str::to_string),
            "CIRCUMFIX" => data.flags.circumfix = value.map(str::to_string),
            "NOSUGGEST" => data.flags.no_suggest = value.map(str::to_string),
            "ONLYINCOMPOUND" => {
                data.flags.only_in_compound = value.map(str::to_string);
                data.compound_rules.push(compound_rule(&tokens));
            }
            d if d.starts_with("COMPOUND") => data.compound_rules.push(compound_rule(&tokens)),
            "PFX" | "SFX" => {
                let kind = if directive == "PFX" {
                    AffixKind::Prefix
                } else {
                    AffixKind::Suffix
                };

                let Some((flag, cross_product, count)) = parse_header(&tokens) else {
                    debug!("Skipping malformed affix header: {}", line);
                    continue;
                };

                // The next `count` meaningful lines belong to this block
                let block: Vec<&str> = lines
                    .by_ref()
                    .filter(|l| !is_skippable(l))
                    .take(count)
                    .collect();

                let entries = block
                    .iter()
                    .filter_map(|entry| {
                        parse_entry(entry, directive, &flag, data.options.flag_type)
                    })
                    .collect::<Vec<_>>();

                add_rule(&mut data, kind, flag, cross_product, entries);
            }
            _ => {}
        }
    }

    debug!(
        "Parsed affix data: {} rules, {} compound directives",
        data.rules.len(),
        data.compound_rules.len()
    );

    Ok(data)
}

/// The flag type set by the last `FLAG` directive, `Char` when there is none.
fn declared_flag_type(content: &str) -> Result<FlagType> {
    let mut flag_type = FlagType::default();
    for line in content.lines().map(str::trim) {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("FLAG") {
            continue;
        }
        if let Some(value) = tokens.next() {
            flag_type = value.parse::<FlagType>()?;
        }
    }
    Ok(flag_type)
}

fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

fn compound_rule(tokens: &[&str]) -> CompoundRule {
    CompoundRule {
        kind: tokens[0].to_string(),
        value: tokens[1..].join(" "),
    }
}

/// `PFX|SFX flag Y|N count`
fn parse_header(tokens: &[&str]) -> Option<(String, bool, usize)> {
    if tokens.len() < 4 {
        return None;
    }
    let cross_product = match tokens[2] {
        "Y" => true,
        "N" => false,
        _ => return None,
    };
    let count = tokens[3].parse::<usize>().ok()?;
    Some((tokens[1].to_string(), cross_product, count))
}

/// `PFX|SFX flag stripping affix[/contflags] [condition] [morph...]`
fn parse_entry(line: &str, directive: &str, flag: &str, flag_type: FlagType) -> Option<AffixEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 4 || tokens[0] != directive || tokens[1] != flag {
        debug!("Skipping malformed affix entry: {}", line);
        return None;
    }

    let (affix, cont_flags) = match tokens[3].split_once('/') {
        Some((affix, flags)) => (affix, flag_type.parse(flags)),
        None => (tokens[3], Vec::new()),
    };

    let morph_code = if tokens.len() > 5 {
        Some(tokens[5..].join(" "))
    } else {
        None
    };

    Some(AffixEntry {
        flag: flag.to_string(),
        stripping: zero_as_empty(tokens[2]),
        affix: zero_as_empty(affix),
        condition: Condition::parse(tokens.get(4).copied().unwrap_or(".")),
        cont_flags,
        morph_code,
    })
}

fn zero_as_empty(value: &str) -> String {
    if value == "0" {
        String::new()
    } else {
        value.to_string()
    }
}

fn add_rule(
    data: &mut AffixData,
    kind: AffixKind,
    flag: String,
    cross_product: bool,
    entries: Vec<AffixEntry>,
) {
    match data.rules.get_mut(&flag) {
        Some(rule) if rule.kind == kind => rule.entries.extend(entries),
        _ => {
            data.rules.insert(
                flag.clone(),
                AffixRule {
                    kind,
                    flag,
                    cross_product,
                    entries,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AFF: &str = "\
# English-like sample
SET UTF-8
LANG en_US
TRY esianrtolcdugmphbyfvkwz
FORBIDDENWORD !
NEEDAFFIX ?
NOSUGGEST %
KEEPCASE K
CIRCUMFIX C

PFX A Y 1
PFX A 0 re .

SFX D Y 4
SFX D 0 d e
SFX D y ied [^aeiou]y
SFX D 0 ed [^ey]
SFX D 0 ed [aeiou]y

SFX S N 1
SFX S 0 s/D . po:plural

COMPOUNDMIN 2
COMPOUNDFLAG X
ONLYINCOMPOUND O
";

    #[test]
    fn test_global_options_and_flags() {
        let data = parse_aff_file(AFF).unwrap();
        assert_eq!(data.options.encoding.as_deref(), Some("UTF-8"));
        assert_eq!(data.options.language.as_deref(), Some("en_US"));
        assert_eq!(data.options.flag_type, FlagType::Char);
        assert_eq!(data.flags.forbidden_word.as_deref(), Some("!"));
        assert_eq!(data.flags.need_affix.as_deref(), Some("?"));
        assert_eq!(data.flags.no_suggest.as_deref(), Some("%"));
        assert_eq!(data.flags.keep_case.as_deref(), Some("K"));
        assert_eq!(data.flags.circumfix.as_deref(), Some("C"));
    }

    #[test]
    fn test_affix_blocks() {
        let data = parse_aff_file(AFF).unwrap();
        assert_eq!(data.rules.len(), 3);

        let prefix = &data.rules["A"];
        assert_eq!(prefix.kind, AffixKind::Prefix);
        assert!(prefix.cross_product);
        assert_eq!(prefix.entries[0].stripping, "");
        assert_eq!(prefix.entries[0].affix, "re");

        let suffix = &data.rules["D"];
        assert_eq!(suffix.kind, AffixKind::Suffix);
        assert_eq!(suffix.entries.len(), 4);
        assert_eq!(suffix.entries[1].stripping, "y");
        assert_eq!(suffix.entries[1].affix, "ied");
        assert_eq!(suffix.entries[1].condition.as_str(), "[^aeiou]y");
        assert!(suffix.entries.iter().all(|e| e.flag == "D"));

        let plural = &data.rules["S"];
        assert!(!plural.cross_product);
        assert_eq!(plural.entries[0].affix, "s");
        assert_eq!(plural.entries[0].cont_flags, vec!["D"]);
        assert_eq!(plural.entries[0].morph_code.as_deref(), Some("po:plural"));
    }

    #[test]
    fn test_compound_directives_are_raw() {
        let data = parse_aff_file(AFF).unwrap();
        let kinds: Vec<&str> = data.compound_rules.iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(kinds, vec!["COMPOUNDMIN", "COMPOUNDFLAG", "ONLYINCOMPOUND"]);
        assert_eq!(data.compound_rules[0].value, "2");
    }

    #[test]
    fn test_lenient_parsing() {
        let aff = "\
WHATEVER 1 2 3
SFX
SFX B Y x
SFX D Y 2
SFX D 0 ed .
this line is garbage
SFX E Y 1
SFX E 0 er .
";
        let data = parse_aff_file(aff).unwrap();
        assert_eq!(data.rules["D"].entries.len(), 1);
        assert_eq!(data.rules["E"].entries.len(), 1);
        assert!(!data.rules.contains_key("B"));
    }

    #[test]
    fn test_long_flags_in_continuations() {
        let aff = "FLAG long\nSFX Aa Y 1\nSFX Aa 0 s/BbCc .\n";
        let data = parse_aff_file(aff).unwrap();
        assert_eq!(data.options.flag_type, FlagType::Long);
        assert_eq!(data.rules["Aa"].entries[0].cont_flags, vec!["Bb", "Cc"]);
    }

    #[test]
    fn test_flag_declared_after_blocks() {
        let aff = "SFX Aa Y 1\nSFX Aa 0 s/BbCc .\nFLAG long\n";
        let data = parse_aff_file(aff).unwrap();
        assert_eq!(data.options.flag_type, FlagType::Long);
        assert_eq!(data.rules["Aa"].entries[0].cont_flags, vec!["Bb", "Cc"]);
    }

    #[test]
    fn test_only_in_compound_flag() {
        let data = parse_aff_file(AFF).unwrap();
        assert_eq!(data.flags.only_in_compound.as_deref(), Some("O"));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_aff_file(" \n"), Err(TypoError::AffixParse(_))));
        assert!(matches!(
            parse_aff_file("FLAG weird\n"),
            Err(TypoError::UnsupportedFeature(_))
        ));
    }
}
