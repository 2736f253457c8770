use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter};
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use serde::Serialize;
use turkic_parser_lib::corpus::normalize_token;
use turkic_parser_lib::output::Row;
use turkic_parser_lib::table::{read_frequency_table, write_analysis, write_unknown};
use turkic_parser_lib::{
    analyze_batch, analyze_word, enumerate_candidates, Candidate, Config, FrequencyTable, Note,
    RowOrder,
};

#[derive(Parser)]
#[command(
    name = "turkic-parser",
    about = "Morphological segmentation of Turkic manuscript transcriptions"
)]
struct Cli {
    /// Words to analyse. If omitted, reads words from stdin.
    #[arg(conflicts_with = "file")]
    words: Vec<String>,

    /// Analyse a frequency table (.csv) or a raw transcription and write an
    /// analysis table.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Where to write the analysis table. Defaults to
    /// `<stem>-morphological-analysis.csv` next to the input.
    #[arg(short, long, requires = "file")]
    output: Option<PathBuf>,

    /// Where to write the unanalysed words. Defaults to
    /// `<stem>-unknown-tokens.csv` next to the input, written only when some
    /// word is left unanalysed.
    #[arg(long, requires = "file")]
    unknown: Option<PathBuf>,

    /// Order table rows alphabetically instead of by first occurrence.
    #[arg(long)]
    alphabetical: bool,

    /// Number of worker threads. Defaults to the available parallelism.
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Load affixes, grammar and loanword signatures from this JSON file
    /// instead of the built-in resource.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show every legal segmentation, best first.
    #[arg(long)]
    all: bool,

    /// Show the top N segmentations per word.
    #[arg(short = 'n', long = "top")]
    top: Option<usize>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Log more (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Ranked<'a> {
    word: &'a str,
    candidates: Vec<Candidate>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("invalid configuration {}", path.display()))?,
        None => Config::embedded().context("built-in configuration is invalid")?,
    };

    if let Some(input) = &cli.file {
        return process_file(input, &config, &cli);
    }

    if cli.words.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            for token in line.split_whitespace() {
                process_word(token, &config, &cli)?;
            }
        }
    } else {
        for token in &cli.words {
            process_word(token, &config, &cli)?;
        }
    }
    Ok(())
}

fn process_word(token: &str, config: &Config, cli: &Cli) -> Result<()> {
    let Some(word) = normalize_token(token) else {
        log::warn!("skipping {token:?}: not a word");
        return Ok(());
    };

    let json = if cli.all || cli.top.is_some() {
        let mut candidates = match enumerate_candidates(&word, config) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{e}");
                return Ok(());
            }
        };
        if !cli.all {
            candidates.truncate(cli.top.unwrap_or(1));
        }
        to_json(&Ranked { word: &word, candidates }, cli.pretty)?
    } else {
        match analyze_word(&word, config) {
            Ok(result) => to_json(&result, cli.pretty)?,
            Err(e) => {
                log::warn!("{e}");
                return Ok(());
            }
        }
    };
    println!("{json}");
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    Ok(json?)
}

fn process_file(input: &Path, config: &Config, cli: &Cli) -> Result<()> {
    let table = load_table(input)?;
    let order = if cli.alphabetical {
        RowOrder::Alphabetical
    } else {
        RowOrder::FirstOccurrence
    };
    let entries = table.sorted(order);
    let words: Vec<&str> = entries.iter().map(|e| e.word.as_str()).collect();

    let jobs = cli.jobs.unwrap_or_else(|| {
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });
    let results = analyze_batch(&words, config, jobs);

    let mut rows = Vec::with_capacity(entries.len());
    let mut unknown = Vec::new();
    for (entry, result) in entries.iter().zip(results) {
        let result = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping {:?}: {e}", entry.word);
                continue;
            }
        };
        let row = Row::new(entry, &result);
        if result.note == Note::Unanalyzed {
            unknown.push(row.clone());
        }
        rows.push(row);
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));
    let file = File::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    write_analysis(BufWriter::new(file), &rows)
        .with_context(|| format!("failed to write {}", output.display()))?;

    let unknown_path = unknown_tokens_path(input, cli.unknown.as_deref(), !unknown.is_empty());
    if let Some(path) = &unknown_path {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_unknown(BufWriter::new(file), &unknown)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    print_summary(rows.len(), unknown.len());
    println!("Analysis written to: {}", output.display());
    if let Some(path) = &unknown_path {
        println!("Unanalysed words written to: {}", path.display());
    }
    Ok(())
}

fn load_table(input: &Path) -> Result<FrequencyTable> {
    let is_csv = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        let file =
            File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
        read_frequency_table(file)
            .with_context(|| format!("failed to read frequency table {}", input.display()))
    } else {
        let text = fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        Ok(FrequencyTable::from_transcription(text))
    }
}

fn print_summary(total: usize, unanalysed: usize) {
    let analysed = total - unanalysed;
    let pct = |n: usize| {
        if total == 0 {
            0.0
        } else {
            n as f64 * 100.0 / total as f64
        }
    };
    println!("Total words: {total}");
    println!("Analysed: {analysed} ({:.1}%)", pct(analysed));
    println!("Unanalysed: {unanalysed} ({:.1}%)", pct(unanalysed));
}

/// `<dir>/<stem>-<name>`, with the input's own `-transcription-table`,
/// `-transcription` or `-table` suffix removed from the stem.
fn sibling_path(input: &Path, name: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = ["-transcription-table", "-transcription", "-table"]
        .iter()
        .find_map(|suffix| stem.strip_suffix(suffix))
        .unwrap_or(&stem);
    input.with_file_name(format!("{stem}-{name}"))
}

fn default_output_path(input: &Path) -> PathBuf {
    sibling_path(input, "morphological-analysis.csv")
}

/// An explicit path is always written; otherwise the default is used only
/// when there is something to write.
fn unknown_tokens_path(input: &Path, explicit: Option<&Path>, any_unknown: bool) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if any_unknown => Some(sibling_path(input, "unknown-tokens.csv")),
        None => None,
    }
}
