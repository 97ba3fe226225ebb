//! Filename-suffix-to-language dispatch for the normalization FSM.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    CFamily,
    Script,
    Erlang,
    Python,
    All,
}

const C_FAMILY_SUFFIXES: &[&str] = &[".c", ".cc", ".h", ".hh", ".hpp", ".cpp", ".java"];
const ERLANG_SUFFIXES: &[&str] = &[".erl", ".hrl"];
const SCRIPT_SUFFIXES: &[&str] = &[".rb", ".sh", ".js", ".pl"];

impl Language {
    /// Determine a file's language tag from its name suffix.
    pub fn for_file_name(name: &str) -> Language {
        let lower = name.to_ascii_lowercase();
        if C_FAMILY_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            Language::CFamily
        } else if ERLANG_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            Language::Erlang
        } else if SCRIPT_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            Language::Script
        } else if lower.ends_with(".py") {
            Language::Python
        } else {
            Language::All
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_suffix() {
        assert_eq!(Language::for_file_name("foo.c"), Language::CFamily);
        assert_eq!(Language::for_file_name("Foo.JAVA"), Language::CFamily);
        assert_eq!(Language::for_file_name("mod.erl"), Language::Erlang);
        assert_eq!(Language::for_file_name("header.hrl"), Language::Erlang);
        assert_eq!(Language::for_file_name("script.rb"), Language::Script);
        assert_eq!(Language::for_file_name("tool.pl"), Language::Script);
        assert_eq!(Language::for_file_name("lib.py"), Language::Python);
        assert_eq!(Language::for_file_name("README.md"), Language::All);
        assert_eq!(Language::for_file_name("no_suffix"), Language::All);
    }
}
