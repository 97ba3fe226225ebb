//! Parser: drives the normalization FSM over a Corpus, producing a processed
//! byte stream plus the Bookmarks anchored in it.
//!
//! Grounded on `original_source/parser.cc`'s `processChar`/`performAction`
//! loop. The per-language transition tables live in `table.rs`; this module
//! is the driver: byte iteration, SPECIAL_EOF/NUL handling, the pending-
//! bookmark flag, and the NORMAL fallback (the `#`/`import`/`using`
//! lookahead) that the historical snapshot in `original_source/` didn't yet
//! have but spec text calls for explicitly.

pub mod language;
pub mod table;

use crate::bookmark::Bookmark;
use crate::corpus::{Corpus, SPECIAL_EOF};
use table::{code_transition, text_transition, Action, State};

pub struct Parser {
    word_mode: bool,
}

impl Parser {
    pub fn new(word_mode: bool) -> Self {
        Self { word_mode }
    }

    /// Run the FSM over the whole corpus, returning the processed buffer and
    /// the bookmarks anchored in it.
    pub fn process(&self, corpus: &Corpus) -> (Vec<u8>, Vec<Bookmark>) {
        let original = corpus.bytes();
        let mut processed = Vec::with_capacity(original.len() + 1);
        let mut bookmarks = Vec::new();

        let mut state = State::Normal;
        // A bookmark is pending at the very start, per construction-time rule.
        let mut pending_bookmark = true;

        let mut i = 0;
        while i < original.len() {
            let byte = original[i];

            if byte == 0 {
                i += 1;
                continue;
            }

            if byte == SPECIAL_EOF {
                processed.push(byte);
                state = State::Normal;
                pending_bookmark = true;
                i += 1;
                continue;
            }

            let (new_state, action) = if self.word_mode {
                text_transition(state, byte)
            } else {
                let language = corpus.language_at(i);
                match code_transition(language, state, byte) {
                    Some(result) => result,
                    None => self.normal_fallback(original, i, state, pending_bookmark),
                }
            };

            state = new_state;
            self.perform_action(
                action,
                byte,
                i,
                &mut processed,
                &mut bookmarks,
                &mut pending_bookmark,
            );

            i += 1;
        }

        // Terminator for the comparison routines that walk the processed
        // buffer without a separate length bound.
        processed.push(0);

        (processed, bookmarks)
    }

    /// The NORMAL special case: fires only when no table rule matched and the
    /// current state is NORMAL. Decides whether to swallow the rest of the
    /// line (directives, `import`/`using`) or emit the byte as an ordinary
    /// character, possibly arming a new bookmark.
    fn normal_fallback(
        &self,
        original: &[u8],
        i: usize,
        state: State,
        pending_bookmark: bool,
    ) -> (State, Action) {
        debug_assert_eq!(state, State::Normal);
        let byte = original[i];

        if pending_bookmark && byte != b'}' {
            if byte == b'#' || starts_with_at(original, i, b"import") || starts_with_at(original, i, b"using") {
                return (State::SkipToEol, Action::Na);
            }
            return (State::Normal, Action::AddBookmarkAndChar);
        }
        (State::Normal, Action::AddChar)
    }

    fn perform_action(
        &self,
        action: Action,
        byte: u8,
        original_index: usize,
        processed: &mut Vec<u8>,
        bookmarks: &mut Vec<Bookmark>,
        pending_bookmark: &mut bool,
    ) {
        match action {
            Action::Na => {}
            Action::AddChar => {
                self.add_char(byte, original_index, processed, bookmarks, pending_bookmark);
            }
            Action::AddSlashAndChar => {
                // Bare append, same as the original's addChar() helper: a
                // comment-start byte that turned out not to start a comment
                // does not touch the bookmark container or pending_bookmark.
                processed.push(b'/');
                if !byte.is_ascii_whitespace() {
                    processed.push(byte);
                }
            }
            Action::AddBookmark => {
                *pending_bookmark = true;
            }
            Action::AddSpace => {
                // Word mode: a new word always starts a fresh bookmark,
                // independent of the pending-bookmark flag used in code mode.
                processed.push(b' ');
                bookmarks.push(Bookmark::new(original_index, processed.len()));
                processed.push(byte);
                *pending_bookmark = false;
            }
            Action::AddBookmarkAndChar => {
                *pending_bookmark = true;
                self.add_char(byte, original_index, processed, bookmarks, pending_bookmark);
            }
        }
    }

    /// Append `byte` to processed; if a bookmark is pending, anchor it here
    /// and disarm the pending flag. Exactly one bookmark attaches to the
    /// first ADD_CHAR following an ADD_BOOKMARK (or construction start).
    fn add_char(
        &self,
        byte: u8,
        original_index: usize,
        processed: &mut Vec<u8>,
        bookmarks: &mut Vec<Bookmark>,
        pending_bookmark: &mut bool,
    ) {
        if *pending_bookmark {
            bookmarks.push(Bookmark::new(original_index, processed.len()));
            *pending_bookmark = false;
        }
        processed.push(byte);
    }
}

fn starts_with_at(haystack: &[u8], offset: usize, needle: &[u8]) -> bool {
    haystack.len() >= offset + needle.len() && &haystack[offset..offset + needle.len()] == needle
}
