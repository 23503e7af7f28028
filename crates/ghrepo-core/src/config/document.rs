//! `config.ini` contents, parsed with `rust-ini`.
//!
//! A shared token can live in `[DEFAULT]`:
//!
//! ```ini
//! [DEFAULT]
//! token = ghp_shared
//!
//! [github]
//! ; falls back to DEFAULT when unset
//! ```
//!
//! Section and key names are case-insensitive. Values are taken literally
//! (no quote or escape processing) and indented lines continue the previous
//! value. Keys in a `[DEFAULT]` section, or before the first header, are
//! visible from every section.

use std::collections::HashMap;

use ::ini::{Ini, ParseOption};

/// Section whose keys every other section inherits.
pub const DEFAULT_SECTION: &str = "default";

/// A parsed INI document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IniDocument {
    sections: HashMap<String, HashMap<String, String>>,
}

impl IniDocument {
    /// Parse an INI document.
    ///
    /// # Errors
    ///
    /// Returns the `rust-ini` error (with line and column) for malformed
    /// input such as an unterminated section header.
    pub fn parse(content: &str) -> Result<Self, ::ini::ParseError> {
        let opts = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            enabled_indented_mutiline_value: true,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(content, opts)?;

        let mut doc = Self::default();
        for (section, props) in &ini {
            let section = section.unwrap_or(DEFAULT_SECTION);
            for (key, value) in props {
                doc.set(section, key, value);
            }
        }
        Ok(doc)
    }

    /// Look up a value, falling back to the `DEFAULT` section.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        let lookup = |name: &str| self.sections.get(name)?.get(&key);
        lookup(&section.to_lowercase())
            .or_else(|| lookup(DEFAULT_SECTION))
            .map(String::as_str)
    }

    /// Insert or replace a value.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.trim().to_lowercase())
            .or_default()
            .insert(key.trim().to_lowercase(), value.trim().to_string());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_should_parse_github_token() {
        let doc = IniDocument::parse("[github]\ntoken = ghp_abc123\n").unwrap();
        assert_eq!(doc.get("github", "token"), Some("ghp_abc123"));
    }

    #[test]
    fn test_should_match_section_and_key_case_insensitively() {
        let doc = IniDocument::parse("[GitHub]\nTOKEN=ghp_x").unwrap();
        assert_eq!(doc.get("github", "token"), Some("ghp_x"));
        assert_eq!(doc.get("GITHUB", "Token"), Some("ghp_x"));
    }

    #[test]
    fn test_should_skip_comments_and_accept_colon_separator() {
        let content = "# personal token\n\n; legacy\n[github]\ntoken : ghp_y  \n";
        let doc = IniDocument::parse(content).unwrap();
        assert_eq!(doc.get("github", "token"), Some("ghp_y"));
    }

    #[test]
    fn test_should_inherit_token_from_default_section() {
        let doc = IniDocument::parse("[DEFAULT]\ntoken = x\n\n[github]\n").unwrap();
        assert_eq!(doc.get("github", "token"), Some("x"));
    }

    #[test]
    fn test_should_prefer_section_value_over_default() {
        let doc = IniDocument::parse("[DEFAULT]\ntoken = shared\n[github]\ntoken = own\n").unwrap();
        assert_eq!(doc.get("github", "token"), Some("own"));
        assert_eq!(doc.get("gitlab", "token"), Some("shared"));
    }

    #[test]
    fn test_should_treat_leading_keys_as_defaults() {
        let doc = IniDocument::parse("token = top\n[gitlab]\nuser = me").unwrap();
        assert_eq!(doc.get("github", "token"), Some("top"));
    }

    #[test]
    fn test_should_accept_indented_continuation_lines() {
        let doc = IniDocument::parse("[github]\nnote = first\n  second\ntoken = t\n").unwrap();
        let note: Vec<&str> = doc.get("github", "note").unwrap().lines().map(str::trim).collect();
        assert_eq!(note, ["first", "second"]);
        assert_eq!(doc.get("github", "token"), Some("t"));
    }

    #[test]
    fn test_should_keep_quotes_and_backslashes_literally() {
        let doc = IniDocument::parse("[github]\ntoken = \"ghp_q\\z\"\n").unwrap();
        assert_eq!(doc.get("github", "token"), Some("\"ghp_q\\z\""));
    }

    #[test]
    fn test_should_keep_separators_inside_values() {
        let doc = IniDocument::parse("[api]\nurl = https://example.com:8443/a=b").unwrap();
        assert_eq!(doc.get("api", "url"), Some("https://example.com:8443/a=b"));
    }

    #[test]
    fn test_should_return_none_for_missing_key() {
        let doc = IniDocument::parse("[gitlab]\ntoken = x").unwrap();
        assert!(doc.get("github", "token").is_none());
        assert!(doc.get("gitlab", "user").is_none());
    }

    #[test]
    fn test_should_reject_unterminated_header() {
        assert!(IniDocument::parse("[github\ntoken = x").is_err());
    }

    #[test]
    fn test_should_set_values() {
        let mut doc = IniDocument::default();
        doc.set("GitHub", "Token", "t");
        assert_eq!(doc.get("github", "token"), Some("t"));
    }
}
