use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use env_logger::Builder;
use log::LevelFilter;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use typochk::cli::output::{self, OutputFormat, WordReport};
use typochk::cli::TextChecker;
use typochk::dict::{self, DictionaryFiles};
use typochk::{Config, SpellChecker};

#[derive(Parser, Debug)]
#[command(name = "typochk")]
#[command(version, about = "A Hunspell-compatible spell checker", long_about = None)]
struct Cli {
    /// Files to check
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Language/dictionary to use (e.g., en_US, de_DE, tr_TR)
    #[arg(short, long, global = true)]
    language: Option<String>,

    /// Affix file to load instead of an installed dictionary
    #[arg(long, value_name = "FILE", global = true)]
    aff: Option<PathBuf>,

    /// Dictionary file to load instead of an installed dictionary
    #[arg(long, value_name = "FILE", global = true)]
    dic: Option<PathBuf>,

    /// Directory holding installed dictionaries
    #[arg(long, value_name = "DIR", global = true)]
    dict_dir: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Exit with code 0 even if errors are found
    #[arg(long, global = true)]
    no_fail: bool,

    /// Pattern to ignore (regex)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Personal dictionary file
    #[arg(long)]
    personal_dict: Option<PathBuf>,

    /// Maximum number of suggestions per word
    #[arg(long, global = true)]
    max_suggestions: Option<usize>,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check individual words and print suggestions
    Word {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Show statistics for the loaded dictionary
    Stats,
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DictCommands {
    /// List installed dictionaries
    List,
    /// Download a dictionary
    Download {
        /// Language code (e.g., en_US, en_GB, fr_FR)
        language: String,
    },
    /// Show dictionary info
    Info {
        /// Language code
        language: String,
    },
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(cli.log_level())
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    match run(cli) {
        Ok(failed) => {
            if failed {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

/// Returns whether misspellings were found that should fail the run.
fn run(cli: Cli) -> Result<bool> {
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "typochk", &mut io::stdout());
        return Ok(false);
    }

    let mut config = Config::load(
        cli.language.clone(),
        cli.personal_dict.clone(),
        cli.ignore_pattern.clone(),
    )?;
    if let Some(dir) = &cli.dict_dir {
        config.dictionary_dir = Some(dir.clone());
    }
    if let Some(max) = cli.max_suggestions {
        config.options.max_suggestions = max;
    }
    if cli.verbose > 0 {
        config.options.debug = true;
    }

    let use_color = !cli.no_color;
    if !use_color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Some(Commands::Dict { action }) => {
            handle_dict_command(action, &config)?;
            Ok(false)
        }
        Some(Commands::Stats) => {
            let checker = build_checker(&cli, &config)?;
            output::print_stats(checker.language(), &checker.dictionary_stats(), &cli.format)?;
            Ok(false)
        }
        Some(Commands::Word { words }) => {
            let checker = build_checker(&cli, &config)?;
            let reports = words
                .iter()
                .map(|word| {
                    let correct = checker.check(word)?;
                    let suggestions = if correct {
                        Vec::new()
                    } else {
                        checker.suggest(word)?
                    };
                    Ok(WordReport {
                        word: word.clone(),
                        correct,
                        suggestions,
                    })
                })
                .collect::<typochk::Result<Vec<_>>>()?;

            output::print_word_reports(&reports, use_color, &cli.format)?;
            Ok(!cli.no_fail && reports.iter().any(|r| !r.correct))
        }
        None => check_files(&cli, &config, use_color),
    }
}

fn check_files(cli: &Cli, config: &Config, use_color: bool) -> Result<bool> {
    if cli.files.is_empty() {
        anyhow::bail!("No files specified. Use --help for usage information.");
    }

    let checker = TextChecker::new(build_checker(cli, config)?, config)?;

    let mut total_errors = 0;
    let mut missing = 0;
    for file_path in &cli.files {
        if !file_path.exists() {
            eprintln!("Error: File not found: {}", file_path.display());
            missing += 1;
            continue;
        }

        let result = checker.check_file(file_path)?;
        output::print_errors(file_path, &result, use_color, &cli.format)?;
        total_errors += result.error_count;
    }

    if cli.format == OutputFormat::Text {
        output::print_check_summary(total_errors, &cli.files, use_color);
    }

    if missing > 0 {
        anyhow::bail!("{} of {} input files could not be read", missing, cli.files.len());
    }

    Ok(total_errors > 0 && !cli.no_fail)
}

fn build_checker(cli: &Cli, config: &Config) -> Result<SpellChecker> {
    match (&cli.aff, &cli.dic) {
        (Some(aff_path), Some(dic_path)) => {
            let aff = fs::read_to_string(aff_path)
                .with_context(|| format!("Failed to read affix file: {}", aff_path.display()))?;
            let dic = fs::read_to_string(dic_path).with_context(|| {
                format!("Failed to read dictionary file: {}", dic_path.display())
            })?;
            Ok(SpellChecker::new(
                &config.language,
                &aff,
                &dic,
                config.options.clone(),
            ))
        }
        (None, None) => {
            let dir = dictionary_dir(config)?;
            dict::load_checker(
                &DictionaryFiles::in_dir(&dir, &config.language),
                config.options.clone(),
            )
        }
        _ => anyhow::bail!("--aff and --dic must be given together"),
    }
}

fn dictionary_dir(config: &Config) -> Result<PathBuf> {
    config
        .dictionary_dir()
        .context("Could not determine the dictionary directory; pass --dict-dir")
}

fn handle_dict_command(action: &DictCommands, config: &Config) -> Result<()> {
    let dir = dictionary_dir(config)?;
    match action {
        DictCommands::List => dict::manager::list_dictionaries(&dir)?,
        DictCommands::Download { language } => dict::manager::download_dictionary(language, &dir)?,
        DictCommands::Info { language } => dict::manager::show_info(language, &dir)?,
    }
    Ok(())
}
