use unicode_segmentation::UnicodeSegmentation;

/// A word found in a text, with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    pub text: String,
    pub line: usize,
    pub column: usize,
    pub context: String,
}

/// Extract all checkable words from plain text
pub fn tokenize(content: &str) -> Vec<WordSpan> {
    let mut spans = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        for (word, offset) in extract_words(line) {
            let context = get_context(line, offset, word.len());
            spans.push(WordSpan {
                text: word,
                line: line_num + 1,
                column: offset + 1,
                context,
            });
        }
    }

    spans
}

fn extract_words(text: &str) -> Vec<(String, usize)> {
    let mut words = Vec::new();
    let mut current_word = String::new();
    let mut word_start = 0;

    for (pos, grapheme) in text.grapheme_indices(true) {
        let ch = grapheme.chars().next().unwrap_or(' ');

        if ch.is_alphabetic() || ch == '\'' || ch == '_' {
            if current_word.is_empty() {
                word_start = pos;
            }
            current_word.push_str(grapheme);
        } else if !current_word.is_empty() {
            push_split(&mut words, &current_word, word_start);
            current_word.clear();
        }
    }

    // Handle last word
    if !current_word.is_empty() {
        push_split(&mut words, &current_word, word_start);
    }

    words
}

fn push_split(words: &mut Vec<(String, usize)>, word: &str, start: usize) {
    for (part, offset) in split_compound_word(word) {
        let leading = part.len() - part.trim_start_matches('\'').len();
        let part = part.trim_matches('\'');
        if part.chars().count() > 1 {
            words.push((part.to_string(), start + offset + leading));
        }
    }
}

/// Split camelCase and snake_case into individual words, keeping byte offsets
pub fn split_compound_word(word: &str) -> Vec<(String, usize)> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut current_start = 0;

    for (i, ch) in word.char_indices() {
        if ch == '_' {
            if !current.is_empty() {
                result.push((std::mem::take(&mut current), current_start));
            }
            current_start = i + ch.len_utf8();
        } else if ch.is_uppercase() && current.chars().last().is_some_and(|c| c.is_lowercase()) {
            result.push((std::mem::take(&mut current), current_start));
            current_start = i;
            current.push(ch);
        } else {
            current.push(ch);
        }
    }

    if !current.is_empty() {
        result.push((current, current_start));
    }

    result
}

fn get_context(line: &str, offset: usize, word_len: usize) -> String {
    let start = floor_char_boundary(line, offset.saturating_sub(20));
    let end = ceil_char_boundary(line, (offset + word_len + 20).min(line.len()));
    let context = &line[start..end];

    if start > 0 && end < line.len() {
        format!("...{}...", context)
    } else if start > 0 {
        format!("...{}", context)
    } else if end < line.len() {
        format!("{}...", context)
    } else {
        context.to_string()
    }
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    while !s.is_char_boundary(index) {
        index += 1;
    }
    index
}
