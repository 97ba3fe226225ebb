//! The normalization FSM's state/action types and transition table.
//!
//! Grounded on `original_source/parser.cc`'s `Matrix` (a `(state, event) ->
//! (newState, action)` map consulted with an exact-byte lookup then a
//! wildcard fallback) and `parser.hh`'s `Language`/`State`/`Action` enums,
//! extended with the per-language dispatch order the system spec calls for:
//! exact-language exact-byte, then ALL-table exact-byte, then ALL-table
//! wildcard. The language-specific rules below never collide on byte value
//! with each other, so a single ordered lookup suffices; there turned out to
//! be no case that needs an "exact-language wildcard" tier.

use super::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Normal,
    CommentStart,
    CComment,
    CCommentEnd,
    DoubleQuote,
    SingleQuote,
    EscapeDouble,
    EscapeSingle,
    SkipToEol,
    Space,
    Regexp,
    DoubleQuote1,
    DoubleQuote2,
    DoubleQuote3,
    DoubleQuote4,
    DoubleQuote5,
    SingleQuote1,
    SingleQuote2,
    SingleQuote3,
    SingleQuote4,
    SingleQuote5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Na,
    AddChar,
    AddSlashAndChar,
    AddBookmark,
    AddSpace,
    /// Arm a bookmark at the current byte and emit it in the same step.
    /// Only produced by the driver's NORMAL fallback (never by a table rule).
    AddBookmarkAndChar,
}

/// Code-mode transition for one `(language, state, byte)` triple.
///
/// Looks up language-specific overrides first (Erlang/Script/Python), then
/// falls back to the language-independent table shared by every language.
pub fn code_transition(language: Language, state: State, byte: u8) -> Option<(State, Action)> {
    language_override(language, state, byte).or_else(|| base_table(state, byte))
}

fn language_override(language: Language, state: State, byte: u8) -> Option<(State, Action)> {
    use Action::*;
    use State::*;
    match (language, state, byte) {
        (Language::Erlang, Normal, b'%') => Some((SkipToEol, Na)),
        (Language::Erlang, Normal, b'#') => Some((Normal, Na)),

        (Language::Script, Normal, b'/') => Some((Regexp, AddChar)),
        (Language::Script, Regexp, b'/') => Some((SkipToEol, Na)),
        (Language::Script, Regexp, b'*') => Some((CComment, Na)),
        (Language::Script, Regexp, b'\n') => Some((Normal, AddChar)),
        (Language::Script, Regexp, _) => Some((Regexp, AddChar)),

        (Language::Python, Normal, b'"') => Some((DoubleQuote1, Na)),
        (Language::Python, Normal, b'\'') => Some((SingleQuote1, Na)),

        _ => None,
    }
}

/// The language-independent table: comments, ordinary string/char literals,
/// line structure, and the Python triple-quote sub-automaton (whose entry
/// states are only reachable via the Python override above, so they live
/// here without needing their own language guard).
fn base_table(state: State, byte: u8) -> Option<(State, Action)> {
    use Action::*;
    use State::*;
    match (state, byte) {
        (Normal, b'/') => Some((CommentStart, Na)),
        (Normal, b'"') => Some((DoubleQuote, AddChar)),
        (Normal, b'\'') => Some((SingleQuote, AddChar)),
        (Normal, b'\n') => Some((Normal, AddBookmark)),
        (Normal, b' ') => Some((Normal, Na)),
        (Normal, b'\t') => Some((Normal, Na)),
        // '#' is not special-cased here: the driver's NORMAL fallback decides
        // between SKIP_TO_EOL and an ordinary char via lookahead (see below),
        // except where a language override (Erlang) intercepts it above.

        (DoubleQuote, b'\\') => Some((EscapeDouble, AddChar)),
        (DoubleQuote, b'"') => Some((Normal, AddChar)),
        (DoubleQuote, b'\n') => Some((Normal, AddBookmark)), // probably a mistake; kept as-is
        (DoubleQuote, _) => Some((DoubleQuote, AddChar)),

        (SingleQuote, b'\\') => Some((EscapeSingle, AddChar)),
        (SingleQuote, b'\'') => Some((Normal, AddChar)),
        (SingleQuote, b'\n') => Some((Normal, AddBookmark)), // probably a mistake; kept as-is
        (SingleQuote, _) => Some((SingleQuote, AddChar)),

        (EscapeSingle, _) => Some((SingleQuote, AddChar)),
        (EscapeDouble, _) => Some((DoubleQuote, AddChar)),

        (CommentStart, b'*') => Some((CComment, Na)),
        (CommentStart, b'/') => Some((SkipToEol, Na)),
        (CommentStart, _) => Some((Normal, AddSlashAndChar)),

        (SkipToEol, b'\n') => Some((Normal, AddBookmark)),

        (CComment, b'*') => Some((CCommentEnd, Na)),
        (CComment, _) => Some((CComment, Na)),
        (CCommentEnd, b'/') => Some((Normal, Na)),
        (CCommentEnd, b'*') => Some((CCommentEnd, Na)),
        (CCommentEnd, _) => Some((CComment, Na)),

        // Python triple-quote sub-automaton (double-quote side).
        (DoubleQuote1, b'"') => Some((DoubleQuote2, Na)),
        (DoubleQuote1, _) => Some((DoubleQuote, AddChar)),
        (DoubleQuote2, b'"') => Some((DoubleQuote3, Na)),
        (DoubleQuote2, _) => Some((Normal, Na)), // empty string "" collapses
        (DoubleQuote3, b'"') => Some((DoubleQuote4, AddChar)),
        (DoubleQuote3, _) => Some((DoubleQuote3, AddChar)),
        (DoubleQuote4, b'"') => Some((DoubleQuote5, AddChar)),
        (DoubleQuote4, _) => Some((DoubleQuote3, AddChar)),
        (DoubleQuote5, b'"') => Some((Normal, AddChar)),
        (DoubleQuote5, _) => Some((DoubleQuote3, AddChar)),

        // Python triple-quote sub-automaton (single-quote side).
        (SingleQuote1, b'\'') => Some((SingleQuote2, Na)),
        (SingleQuote1, _) => Some((SingleQuote, AddChar)),
        (SingleQuote2, b'\'') => Some((SingleQuote3, Na)),
        (SingleQuote2, _) => Some((Normal, Na)),
        (SingleQuote3, b'\'') => Some((SingleQuote4, AddChar)),
        (SingleQuote3, _) => Some((SingleQuote3, AddChar)),
        (SingleQuote4, b'\'') => Some((SingleQuote5, AddChar)),
        (SingleQuote4, _) => Some((SingleQuote3, AddChar)),
        (SingleQuote5, b'\'') => Some((Normal, AddChar)),
        (SingleQuote5, _) => Some((SingleQuote3, AddChar)),

        // Ordinary code bytes in NORMAL with no dedicated rule: handled by the
        // driver's NORMAL special case (lookahead for `#`/`import`/`using`),
        // not here, so this intentionally yields no transition.
        (Normal, _) => None,

        // Reached only via language_override (Script's Regexp, word mode's
        // Space); code_transition never lands here for other languages.
        (Space, _) => None,
        (Regexp, _) => None,
    }
}

/// Word-mode (`-w`) transition: whitespace collapses, runs of non-space
/// become single-bookmarked words.
pub fn text_transition(state: State, byte: u8) -> (State, Action) {
    match state {
        State::Space => {
            if byte.is_ascii_whitespace() {
                (State::Space, Action::Na)
            } else {
                (State::Normal, Action::AddSpace)
            }
        }
        _ => {
            if byte.is_ascii_whitespace() {
                (State::Space, Action::Na)
            } else {
                (State::Normal, Action::AddChar)
            }
        }
    }
}
