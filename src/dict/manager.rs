use crate::error::TypoError;
use crate::{SpellChecker, TypoOptions};
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

// Hunspell pairs published as `dictionaries/<code>/index.{aff,dic}`
const DICTIONARY_BASE_URL: &str =
    "https://raw.githubusercontent.com/wooorm/dictionaries/main/dictionaries";

/// Locations of one language's `.aff`/`.dic` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryFiles {
    pub language: String,
    pub aff: PathBuf,
    pub dic: PathBuf,
}

impl DictionaryFiles {
    pub fn in_dir(dir: &Path, language: &str) -> Self {
        Self {
            language: language.to_string(),
            aff: dir.join(format!("{}.aff", language)),
            dic: dir.join(format!("{}.dic", language)),
        }
    }

    pub fn exists(&self) -> bool {
        self.aff.exists() && self.dic.exists()
    }

    /// Read both files; a missing file is reported as `DictionaryNotFound`.
    pub fn read(&self) -> Result<(String, String)> {
        if !self.exists() {
            return Err(TypoError::dictionary_not_found(format!(
                "{} (expected {} and {})",
                self.language,
                self.aff.display(),
                self.dic.display()
            ))
            .into());
        }

        let aff = fs::read_to_string(&self.aff)
            .with_context(|| format!("Failed to read affix file: {}", self.aff.display()))?;
        let dic = fs::read_to_string(&self.dic)
            .with_context(|| format!("Failed to read dictionary file: {}", self.dic.display()))?;
        Ok((aff, dic))
    }
}

/// Build a checker from files on disk, degrading to the fallback word list
/// when they are missing.
pub fn load_checker(files: &DictionaryFiles, options: TypoOptions) -> Result<SpellChecker> {
    match files.read() {
        Ok((aff, dic)) => Ok(SpellChecker::new(&files.language, &aff, &dic, options)),
        Err(e) if is_not_found(&e) => {
            log::warn!("{}; using the built-in fallback word list", e);
            Ok(SpellChecker::fallback(&files.language, options))
        }
        Err(e) => Err(e),
    }
}

fn is_not_found(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<TypoError>(),
        Some(TypoError::DictionaryNotFound(_))
    )
}

/// Languages with a complete pair in `dir`, sorted.
pub fn installed_languages(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut languages = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) != Some("aff") {
            continue;
        }
        if let Some(language) = path.file_stem().and_then(|s| s.to_str()) {
            if DictionaryFiles::in_dir(dir, language).exists() {
                languages.push(language.to_string());
            }
        }
    }

    languages.sort();
    Ok(languages)
}

pub fn list_dictionaries(dir: &Path) -> Result<()> {
    let languages = installed_languages(dir)?;

    if languages.is_empty() {
        println!("{}", "No dictionaries installed.".yellow());
        println!(
            "Run {} to download a dictionary.",
            "typochk dict download en_US".cyan()
        );
        return Ok(());
    }

    println!("{}", "Installed dictionaries:".bold());
    println!();

    for language in &languages {
        let files = DictionaryFiles::in_dir(dir, language);
        let size_kb = (fs::metadata(&files.aff)?.len() + fs::metadata(&files.dic)?.len()) / 1024;

        println!(
            "  {} {} ({})",
            "✓".green(),
            language.cyan().bold(),
            format!("{}KB", size_kb).dimmed()
        );
    }

    println!();
    println!("Dictionary directory: {}", dir.display().to_string().dimmed());

    Ok(())
}

/// Map a locale such as `en_US` to the remote dictionary code.
pub fn remote_code(language: &str) -> String {
    match language {
        "en_US" | "en-US" | "en" => "en".to_string(),
        other => other.replace('_', "-"),
    }
}

pub fn download_dictionary(language: &str, dir: &Path) -> Result<()> {
    let code = remote_code(language);
    println!(
        "{} dictionary for {} ({})...",
        "Downloading".cyan().bold(),
        language.yellow(),
        code.dimmed()
    );

    fs::create_dir_all(dir).context("Failed to create dictionary directory")?;
    let files = DictionaryFiles::in_dir(dir, language);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);

    for (extension, target) in [("aff", &files.aff), ("dic", &files.dic)] {
        let url = format!("{}/{}/index.{}", DICTIONARY_BASE_URL, code, extension);
        pb.set_message(format!("Fetching {}", url));

        let response = reqwest::blocking::get(&url)
            .with_context(|| format!("Failed to download {}", url))?;
        if !response.status().is_success() {
            pb.finish_and_clear();
            anyhow::bail!("Failed to download {}: HTTP {}", url, response.status());
        }

        let content = response.text()?;
        fs::write(target, content)
            .with_context(|| format!("Failed to write {}", target.display()))?;
    }
    pb.finish_with_message("Download complete");

    // Make sure what we fetched is usable before reporting success
    let checker = load_checker(&files, TypoOptions::default())?;
    if checker.is_fallback() {
        anyhow::bail!("Downloaded files for '{}' could not be parsed", language);
    }

    println!(
        "{} Dictionary installed: {} ({} words)",
        "✓".green().bold(),
        files.dic.display().to_string().cyan(),
        checker.dictionary_stats().word_count.to_string().yellow()
    );

    Ok(())
}

pub fn file_checksum(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let digest = Sha256::digest(&bytes);
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

pub fn show_info(language: &str, dir: &Path) -> Result<()> {
    let files = DictionaryFiles::in_dir(dir, language);

    if !files.exists() {
        println!(
            "{} Dictionary for {} not found.",
            "✗".red().bold(),
            language.yellow()
        );
        println!(
            "Run {} to download it.",
            format!("typochk dict download {}", language).cyan()
        );
        return Ok(());
    }

    println!("{}", format!("Dictionary: {}", language).bold());
    for path in [&files.aff, &files.dic] {
        println!("  Path: {}", path.display());
        println!("    Size: {} KB", fs::metadata(path)?.len() / 1024);
        println!("    SHA-256: {}", file_checksum(path)?);
    }

    let checker = load_checker(&files, TypoOptions::default())?;
    let stats = checker.dictionary_stats();
    if stats.fallback {
        println!("  {}", "Could not parse dictionary; fallback in use".red());
    }
    println!("  Words: {}", stats.word_count);
    println!("  Affix rules: {}", stats.affix_rule_count);
    println!("  Compound directives: {}", stats.compound_rule_count);
    println!("  Surface forms: {}", stats.surface_form_count);
    println!("  Flag type: {:?}", checker.dictionary().flag_type);

    Ok(())
}
