//! OptionsAdapter: argv parsing into the core `Options` configuration
//! record, plus `-e`-driven recursive file discovery.
//!
//! Grounded on `original_source/options.cc`'s `Options` constructor loop /
//! `processFlag` switch (glued-value flags, `-x`/`-e` scoping, the
//! restricted-mode path filter) and `findFiles`'s recursive walk + sort. The
//! teacher's `clap` builder-API usage (`ak.rs`) is kept for the boolean and
//! valued flags; the glued-digit grammar clap can't express natively
//! (`-10`, `-m300`, `-p50`) is normalized by a pre-pass over raw argv first.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};
use ignore::WalkBuilder;

use crate::error::DupfindError;

const DEFAULT_MAX_REPORTS: usize = 5;
const DEFAULT_MIN_LENGTH: usize = 1;
const DEFAULT_PROXIMITY_PERCENT: u32 = 90;
const TOTAL_MODE_MIN_LENGTH: usize = 100;
const TOTAL_MODE_PROXIMITY_PERCENT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalMode {
    /// `-t`: exclude paths containing "test".
    ExcludeTests,
    /// `-T`: like `-t` but keep test paths.
    IncludeTests,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub max_reports: Option<usize>,
    pub min_length: usize,
    pub proximity_percent: u32,
    pub word_mode: bool,
    pub verbose: bool,
    pub total_mode: Option<TotalMode>,
    pub files: Vec<PathBuf>,
}

/// Outcome of parsing argv: either a ready-to-run configuration, or a
/// request to print usage and exit successfully (`-h`).
pub enum ParseOutcome {
    Run(Options),
    PrintUsage,
}

impl Options {
    /// Parse `argv` (excluding argv[0]) into a `ParseOutcome`.
    pub fn parse(argv: &[String]) -> Result<ParseOutcome, DupfindError> {
        if argv.iter().any(|a| a == "-h") {
            return Ok(ParseOutcome::PrintUsage);
        }

        let total_requested = argv.iter().any(|a| a == "-t");
        let total_all_requested = argv.iter().any(|a| a == "-T");

        let normalized = normalize_glued_flags(argv)?;
        let matches = build_command()
            .try_get_matches_from(std::iter::once("dupfind".to_string()).chain(normalized))
            .map_err(|e| DupfindError::Usage(e.to_string()))?;

        let mut max_reports = Some(DEFAULT_MAX_REPORTS);
        let mut min_length = DEFAULT_MIN_LENGTH;
        let mut proximity_percent = DEFAULT_PROXIMITY_PERCENT;

        if let Some(&count) = matches.get_one::<usize>("count") {
            max_reports = Some(count);
        }
        if let Some(&m) = matches.get_one::<usize>("min-length") {
            min_length = m;
            max_reports = None;
        }
        if let Some(&p) = matches.get_one::<u32>("proximity") {
            if !(1..=100).contains(&p) {
                return Err(DupfindError::Usage(
                    "proximity percent must be between 1 and 100".to_string(),
                ));
            }
            proximity_percent = p;
        }

        let total_mode = if total_requested {
            Some(TotalMode::ExcludeTests)
        } else if total_all_requested {
            Some(TotalMode::IncludeTests)
        } else {
            None
        };
        if total_mode.is_some() {
            min_length = TOTAL_MODE_MIN_LENGTH;
            proximity_percent = TOTAL_MODE_PROXIMITY_PERCENT;
            max_reports = None;
        }

        let word_mode = matches.get_flag("word");
        let verbose = matches.get_flag("verbose");

        let mut files = Vec::new();
        collect_discovered_files(&matches, total_mode, &mut files)?;
        collect_positional_files(&matches, total_mode, &mut files)?;

        if files.is_empty() {
            return Err(DupfindError::Usage(
                "dupfind: no input files (pass file paths or -e <suffix>)".to_string(),
            ));
        }

        Ok(ParseOutcome::Run(Options {
            max_reports,
            min_length,
            proximity_percent,
            word_mode,
            verbose,
            total_mode,
            files,
        }))
    }

    pub fn usage() -> String {
        build_command().render_long_help().to_string()
    }
}

fn build_command() -> Command {
    Command::new("dupfind")
        .disable_help_flag(true)
        .arg(Arg::new("count").long("count").value_parser(clap::value_parser!(usize)))
        .arg(
            Arg::new("min-length")
                .short('m')
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("proximity")
                .short('p')
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(Arg::new("word").short('w').action(ArgAction::SetTrue))
        .arg(Arg::new("verbose").short('v').action(ArgAction::SetTrue))
        .arg(Arg::new("total").short('t').action(ArgAction::SetTrue))
        .arg(Arg::new("total-all").short('T').action(ArgAction::SetTrue))
        .arg(Arg::new("exclude").short('x').action(ArgAction::Append))
        .arg(Arg::new("ending").short('e').action(ArgAction::Append))
        .arg(Arg::new("files").action(ArgAction::Append))
}

/// Rewrite argv so clap can parse it: a bare `-<digits>` becomes
/// `--count=<digits>`; `-m<digits>`/`-p<digits>` (value glued to the flag,
/// as the original `atoi(&arg[2])` parsing expects) are split into two
/// tokens. Anything else passes through unchanged.
fn normalize_glued_flags(argv: &[String]) -> Result<Vec<String>, DupfindError> {
    let mut out = Vec::with_capacity(argv.len());
    for arg in argv {
        if arg.len() > 1 && arg.starts_with('-') {
            let rest = &arg[1..];
            if rest.chars().all(|c| c.is_ascii_digit()) {
                out.push(format!("--count={rest}"));
                continue;
            }
            if let Some(digits) = rest.strip_prefix('m') {
                if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                    out.push("-m".to_string());
                    out.push(digits.to_string());
                    continue;
                }
            }
            if let Some(digits) = rest.strip_prefix('p') {
                if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                    out.push("-p".to_string());
                    out.push(digits.to_string());
                    continue;
                }
            }
        }
        out.push(arg.clone());
    }
    Ok(out)
}

/// Walk `-e`-discovered files, applying the `-x` substrings that preceded
/// each `-e` occurrence (cleared after use) and, when any `-t`/`-T` is
/// present anywhere in argv, excluding paths containing "test" as well.
fn collect_discovered_files(
    matches: &clap::ArgMatches,
    total_mode: Option<TotalMode>,
    files: &mut Vec<PathBuf>,
) -> Result<(), DupfindError> {
    let Some(ending_indices) = matches.indices_of("ending") else {
        return Ok(());
    };
    let endings: Vec<&String> = matches.get_many::<String>("ending").unwrap().collect();
    let exclude_values: Vec<&String> = matches
        .get_many::<String>("exclude")
        .map(|v| v.collect())
        .unwrap_or_default();
    let exclude_indices: Vec<usize> = matches.indices_of("exclude").map(|v| v.collect()).unwrap_or_default();

    let exclude_test_paths = matches!(total_mode, Some(TotalMode::ExcludeTests));

    let mut pending_excludes: Vec<&str> = Vec::new();
    let mut exclude_cursor = 0;

    for (ending_ix, ending_idx) in ending_indices.enumerate() {
        // Pending excludes are every `-x` that appeared before this `-e` and
        // after the previous one (scope resets after each `-e` is applied).
        while exclude_cursor < exclude_indices.len() && exclude_indices[exclude_cursor] < ending_idx {
            pending_excludes.push(exclude_values[exclude_cursor]);
            exclude_cursor += 1;
        }

        let suffix = endings[ending_ix];
        let mut found = Vec::new();
        // The original recurses unconditionally, with no .gitignore awareness;
        // turn off every standard filter so WalkBuilder matches that.
        let mut walker = WalkBuilder::new(".");
        walker
            .hidden(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false);
        for entry in walker.build() {
            let entry = entry.map_err(|e| DupfindError::Usage(format!("dupfind: {e}")))?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            let path_str = path.to_string_lossy();
            if !path_str.ends_with(suffix.as_str()) {
                continue;
            }
            if pending_excludes.iter().any(|ex| path_str.contains(ex)) {
                continue;
            }
            if exclude_test_paths && path_str.contains("test") {
                continue;
            }
            found.push(path.to_path_buf());
        }
        found.sort();
        files.extend(found);
        pending_excludes.clear();
    }
    Ok(())
}

fn collect_positional_files(
    matches: &clap::ArgMatches,
    total_mode: Option<TotalMode>,
    files: &mut Vec<PathBuf>,
) -> Result<(), DupfindError> {
    let Some(positional) = matches.get_many::<String>("files") else {
        return Ok(());
    };
    let restricted = matches!(total_mode, Some(TotalMode::ExcludeTests));
    for path in positional {
        if restricted && path.contains("test") {
            eprintln!("dupfind: skipping {path} (contains \"test\" under -t)");
            continue;
        }
        files.push(PathBuf::from(path));
    }
    Ok(())
}
