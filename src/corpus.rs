//! Corpus: the concatenated original text of every loaded file.
//!
//! Grounded on `original_source/bookmark.cc`'s `readFileIntoString`/`addFile`
//! (file bytes + one sentinel byte, file records tracked by end offset) and,
//! for the file-walking UX, on the teacher's `data::write::Writer::store_directory`,
//! which shows a progress bar over a sorted file list while reading file bytes.

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::DupfindError;
use crate::parser::language::Language;

/// Reserved byte marking the end of each file's region. Never legal in input.
pub const SPECIAL_EOF: u8 = 0x07;

/// Number of files beyond which a progress bar is shown while loading (stderr only;
/// stdout, where the actual duplication report goes, stays untouched so the
/// determinism property in the system spec still holds).
const PROGRESS_THRESHOLD: usize = 64;

#[derive(Debug, Clone)]
pub struct FileRecord {
    pub name: String,
    pub end_offset: usize,
}

/// Owns the concatenation of every loaded file plus sentinel bytes.
pub struct Corpus {
    original: Vec<u8>,
    file_records: Vec<FileRecord>,
}

impl Corpus {
    pub fn new() -> Self {
        Self {
            original: Vec::new(),
            file_records: Vec::new(),
        }
    }

    /// Load every path in order, showing a progress bar for large file sets.
    pub fn load_files(&mut self, paths: &[PathBuf]) -> Result<(), DupfindError> {
        let show_progress = paths.len() > PROGRESS_THRESHOLD;
        let pb = if show_progress {
            let pb = ProgressBar::new(paths.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("=>-"),
            );
            Some(pb)
        } else {
            None
        };

        for path in paths {
            if let Some(pb) = &pb {
                pb.set_message(path.display().to_string());
            }
            self.add_file(path)?;
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        self.add_sentinel_record();
        Ok(())
    }

    /// Read one file's bytes, append them plus a sentinel byte, and record its region.
    pub fn add_file(&mut self, path: &Path) -> Result<(), DupfindError> {
        if path.is_dir() {
            return Err(DupfindError::IsADirectory(path.to_path_buf()));
        }
        let bytes = fs::read(path).map_err(|source| DupfindError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.original.extend_from_slice(&bytes);
        self.original.push(SPECIAL_EOF);
        self.file_records.push(FileRecord {
            name: path.display().to_string(),
            end_offset: self.original.len(),
        });
        Ok(())
    }

    /// Append a bounds-stop record with an empty name, used by `line_number`/`language_at`
    /// so the final real file doesn't need special-casing at the tail of the scan.
    pub fn add_sentinel_record(&mut self) {
        self.file_records.push(FileRecord {
            name: String::new(),
            end_offset: self.original.len(),
        });
    }

    pub fn total_length(&self) -> usize {
        self.original.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.original
    }

    pub fn byte_at(&self, i: usize) -> u8 {
        self.original[i]
    }

    pub fn file_records(&self) -> &[FileRecord] {
        &self.file_records
    }

    /// Index of the file record whose region contains `offset`.
    fn record_index(&self, offset: usize) -> usize {
        let mut ix = 0;
        while self.file_records[ix].end_offset <= offset {
            ix += 1;
        }
        ix
    }

    pub fn file_name_of(&self, offset: usize) -> &str {
        &self.file_records[self.record_index(offset)].name
    }

    /// 1-based line number of `offset` within its file, counting newlines since
    /// the previous file's end.
    pub fn line_number(&self, offset: usize) -> usize {
        let rec_ix = self.record_index(offset);
        let start = if rec_ix == 0 {
            0
        } else {
            self.file_records[rec_ix - 1].end_offset
        };
        let mut result = 1;
        for &b in &self.original[start..offset] {
            if b == b'\n' {
                result += 1;
            }
        }
        result
    }

    /// Language tag of the file containing `offset`, from that file's suffix.
    pub fn language_at(&self, offset: usize) -> Language {
        Language::for_file_name(self.file_name_of(offset))
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn file_records_track_end_offsets_and_sentinel_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_temp(dir.path(), "a.txt", "ab");
        let b = write_temp(dir.path(), "b.txt", "c");

        let mut corpus = Corpus::new();
        corpus.load_files(&[a, b]).unwrap();

        assert_eq!(corpus.total_length(), 2 + 1 + 1 + 1); // "ab"+EOF + "c"+EOF
        assert_eq!(corpus.byte_at(2), SPECIAL_EOF);
        assert_eq!(corpus.byte_at(4), SPECIAL_EOF);
        assert_eq!(corpus.file_name_of(0), corpus.file_records()[0].name);
        assert_eq!(corpus.file_name_of(3), corpus.file_records()[1].name);
    }

    #[test]
    fn line_number_counts_newlines_since_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_temp(dir.path(), "a.txt", "one\ntwo\nthree");

        let mut corpus = Corpus::new();
        corpus.load_files(&[a]).unwrap();

        assert_eq!(corpus.line_number(0), 1); // 'o' of "one"
        assert_eq!(corpus.line_number(4), 2); // 't' of "two"
        assert_eq!(corpus.line_number(8), 3); // 't' of "three"
    }

    #[test]
    fn directory_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut corpus = Corpus::new();
        let err = corpus.add_file(dir.path()).unwrap_err();
        assert!(matches!(err, DupfindError::IsADirectory(_)));
    }
}
