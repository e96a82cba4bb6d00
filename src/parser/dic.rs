use crate::checker::dictionary::FlagType;
use crate::error::{Result, TypoError};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref WORD_COUNT: Regex = Regex::new(r"^\d+$").unwrap();
    // Morphological fields look like ` po:noun` or ` st:walk`
    static ref MORPH_FIELD: Regex = Regex::new(r"\s+[[:alpha:]]{2}:").unwrap();
}

/// Parse `.dic` content into a word -> raw flags map.
///
/// Duplicate words are not merged: the last entry for a word wins.
pub fn parse_dic_file(content: &str, flag_type: FlagType) -> Result<HashMap<String, String>> {
    Ok(parse_dic_entries(content, flag_type)?.into_iter().collect())
}

/// Parse `.dic` content into `(word, flags)` pairs in file order.
pub fn parse_dic_entries(content: &str, flag_type: FlagType) -> Result<Vec<(String, String)>> {
    if content.trim().is_empty() {
        return Err(TypoError::dictionary_parse("dictionary content is empty"));
    }

    let mut entries = Vec::new();
    let mut seen_content = false;

    for line in content.lines() {
        // Tab-prefixed lines are comments in Hunspell word lists
        if line.starts_with('\t') {
            continue;
        }

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let first_line = !seen_content;
        seen_content = true;
        if first_line && WORD_COUNT.is_match(line) {
            continue;
        }

        let line = strip_morphology(line);
        let (word, flags) = split_entry(line);
        let word = word.replace("\\/", "/");
        let word = word.trim();
        if word.is_empty() {
            continue;
        }

        let flags = flag_type.join(&flag_type.parse(flags));
        entries.push((word.to_string(), flags));
    }

    Ok(entries)
}

fn strip_morphology(line: &str) -> &str {
    let line = line.split('\t').next().unwrap_or(line);
    match MORPH_FIELD.find(line) {
        Some(found) => &line[..found.start()],
        None => line,
    }
}

/// Split on the first `/` that is not escaped as `\/`.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '\\' => escaped = !escaped,
            '/' if !escaped => return (&line[..i], &line[i + 1..]),
            _ => escaped = false,
        }
    }
    (line, "")
}
