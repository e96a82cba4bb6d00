use crate::{CheckResult, DictionaryStats};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonError {
    file: String,
    line: usize,
    column: usize,
    word: String,
    suggestions: Vec<String>,
    context: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    files_checked: usize,
    total_errors: usize,
    errors: Vec<JsonError>,
}

/// Verdict for a single word from `typochk word`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordReport {
    pub word: String,
    pub correct: bool,
    pub suggestions: Vec<String>,
}

pub fn print_errors(
    file_path: &Path,
    result: &CheckResult,
    colored_output: bool,
    format: &OutputFormat,
) -> serde_json::Result<()> {
    match format {
        OutputFormat::Text => {
            print_text_errors(file_path, result, colored_output);
            Ok(())
        }
        OutputFormat::Json => print_json_errors(file_path, result),
    }
}

fn print_text_errors(file_path: &Path, result: &CheckResult, colored_output: bool) {
    if result.errors.is_empty() {
        return;
    }

    let file_name = file_path.display().to_string();

    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }

    for error in &result.errors {
        let line_info = format!("{}:{}", error.line, error.column);

        if colored_output {
            println!(
                "  {} {} {}",
                line_info.blue().bold(),
                error.word.red().bold(),
                format_context(&error.context, &error.word, colored_output)
            );
        } else {
            println!("  {} {} {}", line_info, error.word, &error.context);
        }

        if let Some(suggestions) = format_suggestions(&error.suggestions, colored_output) {
            println!("    {}", suggestions);
        }
    }
}

fn print_json_errors(file_path: &Path, result: &CheckResult) -> serde_json::Result<()> {
    let json_errors: Vec<JsonError> = result
        .errors
        .iter()
        .map(|e| JsonError {
            file: file_path.display().to_string(),
            line: e.line,
            column: e.column,
            word: e.word.clone(),
            suggestions: e.suggestions.clone(),
            context: e.context.clone(),
        })
        .collect();

    let output = JsonOutput {
        files_checked: 1,
        total_errors: result.error_count,
        errors: json_errors,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn format_suggestions(suggestions: &[String], colored: bool) -> Option<String> {
    if suggestions.is_empty() {
        return None;
    }

    if colored {
        let list = suggestions
            .iter()
            .map(|s| s.green().to_string())
            .collect::<Vec<_>>()
            .join(&", ".dimmed().to_string());
        Some(format!("{} {}", "→".dimmed(), list))
    } else {
        Some(format!("→ {}", suggestions.join(", ")))
    }
}

fn format_context(context: &str, word: &str, colored: bool) -> String {
    if colored {
        context.replace(word, &word.red().bold().to_string())
    } else {
        context.to_string()
    }
}

pub fn print_word_reports(
    reports: &[WordReport],
    colored: bool,
    format: &OutputFormat,
) -> serde_json::Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(reports)?);
        return Ok(());
    }

    for report in reports {
        let mark = match (report.correct, colored) {
            (true, true) => "✓".green().bold().to_string(),
            (false, true) => "✗".red().bold().to_string(),
            (true, false) => "✓".to_string(),
            (false, false) => "✗".to_string(),
        };
        println!("{} {}", mark, report.word);

        if let Some(suggestions) = format_suggestions(&report.suggestions, colored) {
            println!("    {}", suggestions);
        }
    }

    Ok(())
}

pub fn print_stats(
    language: &str,
    stats: &DictionaryStats,
    format: &OutputFormat,
) -> serde_json::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(stats)?),
        OutputFormat::Text => {
            println!("Language: {}", language);
            println!("  Words: {}", stats.word_count);
            println!("  Affix rules: {}", stats.affix_rule_count);
            println!("  Compound directives: {}", stats.compound_rule_count);
            println!("  Surface forms: {}", stats.surface_form_count);
            println!("  Fallback: {}", if stats.fallback { "yes" } else { "no" });
        }
    }
    Ok(())
}

pub fn print_check_summary(total_errors: usize, files: &[impl AsRef<Path>], colored: bool) {
    println!();
    if total_errors == 0 {
        if colored {
            println!("{}", "✓ No spelling errors found!".green().bold());
        } else {
            println!("✓ No spelling errors found!");
        }
    } else {
        let error_word = if total_errors == 1 { "error" } else { "errors" };
        let file_word = if files.len() == 1 { "file" } else { "files" };
        if colored {
            println!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total_errors.to_string().red().bold(),
                error_word,
                files.len(),
                file_word
            );
        } else {
            println!(
                "✗ {} {} found in {} {}",
                total_errors,
                error_word,
                files.len(),
                file_word
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_format_suggestions_plain() {
        let suggestions = vec!["the".to_string(), "tea".to_string()];
        assert_eq!(
            format_suggestions(&suggestions, false).as_deref(),
            Some("→ the, tea")
        );
        assert!(format_suggestions(&[], false).is_none());
    }
}
