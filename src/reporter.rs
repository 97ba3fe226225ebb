//! Reporter: formats a Duplication's instances to stdout, and the verbose
//! source dump.
//!
//! Grounded on `original_source/bookmark.cc`'s `report`/`order`/`details`
//! trio: ordinal-suffix formatting, and line counting that walks the
//! original buffer in lockstep with the processed one.

use std::io::{self, Write};

use crate::bookmark::Bookmark;
use crate::corpus::Corpus;
use crate::finder::Duplication;

/// Per-duplication accounting the caller accumulates across the whole run:
/// `weighted_chars` feeds the total-mode percentage, `lines` feeds the
/// total-mode line count (both are sums over every reported duplication).
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportTotals {
    pub weighted_chars: usize,
    pub lines: usize,
}

pub struct Reporter<'a, W: Write> {
    out: &'a mut W,
    word_mode: bool,
}

impl<'a, W: Write> Reporter<'a, W> {
    pub fn new(out: &'a mut W, word_mode: bool) -> Self {
        Self { out, word_mode }
    }

    /// Print one `Duplication`'s instances, in order, then (if `verbose`) the
    /// duplicated source region. `report_number` is this duplication's 1-based
    /// position among all duplications reported in this run (not the
    /// instance number within it). Returns the total character/instance
    /// weight (`longestSame * instances`) for total-mode accounting.
    pub fn report(
        &mut self,
        corpus: &Corpus,
        processed: &[u8],
        bookmarks: &[&Bookmark],
        duplication: &Duplication,
        report_number: usize,
        verbose: bool,
    ) -> io::Result<ReportTotals> {
        let mut first_instance_lines = 0;
        for (k, bookmark) in bookmarks.iter().enumerate() {
            let offset = bookmark.original_index;
            let file = corpus.file_name_of(offset);
            let line = corpus.line_number(offset);
            let ordinal = k + 1;
            let suffix = ordinal_suffix(ordinal);

            if k == 0 {
                let chars = duplication.longest_same;
                let lines = self.count_lines(corpus, processed, bookmark, chars);
                first_instance_lines = lines;
                writeln!(
                    self.out,
                    "{file}:{line}:Duplication {report_number} ({ordinal}{suffix} instance, {chars} characters, {lines} line{plural}).",
                    plural = if lines == 1 { "" } else { "s" },
                )?;
            } else {
                writeln!(
                    self.out,
                    "{file}:{line}:Duplication {report_number} ({ordinal}{suffix} instance).",
                )?;
            }
        }

        if verbose {
            if let Some(first) = bookmarks.first() {
                self.print_verbose_region(corpus, processed, first, duplication.longest_same)?;
            }
        }

        writeln!(self.out)?;
        Ok(ReportTotals {
            weighted_chars: duplication.longest_same * duplication.instances,
            lines: first_instance_lines,
        })
    }

    /// Print the final `Duplication = <n> lines, <pct> %` line of total mode.
    pub fn report_total(&mut self, totals: ReportTotals, processed_len: usize) -> io::Result<()> {
        let pct = (100 * totals.weighted_chars + processed_len / 2) / processed_len;
        writeln!(self.out, "Duplication = {total_lines} lines, {pct} %", total_lines = totals.lines)
    }

    /// Walk the original buffer forward from the bookmark's offset,
    /// synchronized with the processed buffer byte by byte, for exactly
    /// `char_count` processed characters. Returns the original-buffer index
    /// just past the last byte consumed and the number of non-blank lines
    /// touched along the way.
    fn walk_region(&self, corpus: &Corpus, processed: &[u8], bookmark: &Bookmark, char_count: usize) -> (usize, usize) {
        let processed_start = match bookmark.processed {
            Some(p) => p,
            None => return (bookmark.original_index, 0),
        };
        let original = corpus.bytes();
        let mut orig_ix = bookmark.original_index;
        let mut lines = 0usize;
        let mut current_line_has_content = false;

        for k in 0..char_count {
            let wanted = processed[processed_start + k];
            while orig_ix < original.len() {
                let b = original[orig_ix];
                let matches = b == wanted || (self.word_mode && b.is_ascii_whitespace() && wanted.is_ascii_whitespace());
                if matches {
                    break;
                }
                if b == b'\n' {
                    if current_line_has_content {
                        lines += 1;
                    }
                    current_line_has_content = false;
                }
                orig_ix += 1;
            }
            if orig_ix >= original.len() {
                break;
            }
            if original[orig_ix] == b'\n' {
                if current_line_has_content {
                    lines += 1;
                }
                current_line_has_content = false;
            } else if !original[orig_ix].is_ascii_whitespace() {
                current_line_has_content = true;
            }
            orig_ix += 1;
        }
        if current_line_has_content {
            lines += 1;
        }
        (orig_ix, lines)
    }

    fn count_lines(&self, corpus: &Corpus, processed: &[u8], bookmark: &Bookmark, char_count: usize) -> usize {
        self.walk_region(corpus, processed, bookmark, char_count).1
    }

    /// Print the original-text region covered by the first instance. Outside
    /// word mode, extend backward to the preceding newline so indentation is
    /// preserved.
    fn print_verbose_region(
        &mut self,
        corpus: &Corpus,
        processed: &[u8],
        bookmark: &Bookmark,
        longest_same: usize,
    ) -> io::Result<()> {
        let original = corpus.bytes();
        let mut start = bookmark.original_index;
        if !self.word_mode {
            while start > 0 && original[start - 1] != b'\n' {
                start -= 1;
            }
        }
        let (end, _) = self.walk_region(corpus, processed, bookmark, longest_same);
        self.out.write_all(&original[start..end])?;
        writeln!(self.out)
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, ..., `11th`, `12th`, `13th`, `21st`, ...
pub fn ordinal_suffix(n: usize) -> &'static str {
    let by100 = n % 100;
    if (11..=13).contains(&by100) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_suffixes_follow_english_rules() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(23), "rd");
        assert_eq!(ordinal_suffix(111), "th");
        assert_eq!(ordinal_suffix(101), "st");
    }
}
