//! Core pipeline: OptionsAdapter -> Corpus -> Parser -> BookmarkContainer ->
//! Finder -> Reporter.
//!
//! Exposed as a library, separate from the `dupfind` binary, so integration
//! tests can drive a run directly and capture its stdout without spawning a
//! subprocess.

pub mod bookmark;
pub mod container;
pub mod corpus;
pub mod error;
pub mod finder;
pub mod options;
pub mod parser;
pub mod reporter;

use std::io::Write;

use container::BookmarkContainer;
use corpus::Corpus;
use error::DupfindError;
use finder::Finder;
use options::{Options, ParseOutcome};
use parser::Parser;
use reporter::{Reporter, ReportTotals};

/// Parse argv and run the full pipeline, writing the report to `out`.
/// Returns `Ok(())` on success (including `-h`, which prints usage and does
/// nothing else) or a `DupfindError` for any configuration/IO failure.
pub fn run(argv: &[String], out: &mut impl Write) -> Result<(), DupfindError> {
    match Options::parse(argv)? {
        ParseOutcome::PrintUsage => {
            write!(out, "{}", Options::usage()).ok();
            Ok(())
        }
        ParseOutcome::Run(options) => run_with_options(&options, out),
    }
}

/// Run the pipeline with an already-parsed `Options`. Used directly by
/// tests that want to skip argv parsing.
pub fn run_with_options(options: &Options, out: &mut impl Write) -> Result<(), DupfindError> {
    let mut corpus = Corpus::new();
    corpus.load_files(&options.files)?;

    let parser = Parser::new(options.word_mode);
    let (processed, bookmarks) = parser.process(&corpus);

    let mut container = BookmarkContainer::from_bookmarks(bookmarks);
    container.sort(&processed);

    let finder = Finder::new(options.min_length, options.proximity_percent);
    let mut reporter = Reporter::new(out, options.word_mode);

    let mut totals = ReportTotals::default();
    let mut report_number = 0usize;
    let mut io_error = None;

    finder.run(&mut container, &processed, options.max_reports, |container, duplication| {
        report_number += 1;
        let instance_bookmarks: Vec<_> = (duplication.index_of_1st_instance
            ..duplication.index_of_1st_instance + duplication.instances)
            .map(|ix| container.get(ix))
            .collect();
        match reporter.report(
            &corpus,
            &processed,
            &instance_bookmarks,
            duplication,
            report_number,
            options.verbose,
        ) {
            Ok(partial) => {
                totals.weighted_chars += partial.weighted_chars;
                totals.lines += partial.lines;
            }
            Err(e) => io_error = Some(e),
        }
    });

    if let Some(e) = io_error {
        return Err(DupfindError::Io {
            path: std::path::PathBuf::from("<stdout>"),
            source: e,
        });
    }

    if options.total_mode.is_some() {
        reporter
            .report_total(totals, processed.len())
            .map_err(|source| DupfindError::Io {
                path: std::path::PathBuf::from("<stdout>"),
                source,
            })?;
    }

    Ok(())
}
