//! YAML front-matter extraction.
//!
//! Front-matter is a YAML mapping between two `---` lines at the very top of
//! a post. Delimiter lines may carry trailing whitespace and CRLF endings.

use std::collections::BTreeMap;

use serde_yaml::Value;

/// String-keyed front-matter values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter(BTreeMap<String, Value>);

impl FrontMatter {
    /// Parse a YAML block into front-matter.
    ///
    /// Empty or whitespace-only blocks (and an explicit `null`) yield an
    /// empty map.
    pub(crate) fn parse(yaml: &str) -> Result<Self, String> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_yaml::from_str(yaml).map_err(|e| format!("Invalid YAML: {e}"))?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(mapping) => {
                let mut fields = BTreeMap::new();
                for (key, value) in mapping {
                    let key = scalar_text(&key)
                        .ok_or_else(|| "front-matter keys must be scalars".to_owned())?;
                    fields.insert(key, value);
                }
                Ok(Self(fields))
            }
            _ => Err("front-matter must be a YAML mapping".to_owned()),
        }
    }

    /// Get a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a value as text.
    ///
    /// Strings are returned as-is, numbers and booleans are stringified.
    /// Missing keys and `null` give `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a message if the value is a sequence or mapping.
    pub fn text(&self, key: &str) -> Result<Option<String>, String> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => scalar_text(value)
                .map(Some)
                .ok_or_else(|| format!("'{key}' must be a string")),
        }
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

/// Split text into an optional YAML block and the remaining body.
///
/// Returns `Ok((None, text))` when the text does not open with a delimiter.
///
/// # Errors
///
/// Returns a message when the opening delimiter has no closing partner.
pub(crate) fn split(text: &str) -> Result<(Option<&str>, &str), String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let (first, mut rest) = text.split_once('\n').unwrap_or((text, ""));
    if !is_delimiter(first) {
        return Ok((None, text));
    }

    let yaml = rest;
    let mut offset = 0;
    while !rest.is_empty() {
        let (line, next) = rest.split_once('\n').unwrap_or((rest, ""));
        if is_delimiter(line) {
            return Ok((Some(&yaml[..offset]), next));
        }
        offset += rest.len() - next.len();
        rest = next;
    }

    Err("unterminated front-matter block (missing closing '---')".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_without_front_matter() {
        let (yaml, body) = split("# Hello\n\nText").unwrap();
        assert!(yaml.is_none());
        assert_eq!(body, "# Hello\n\nText");
    }

    #[test]
    fn test_split_basic() {
        let (yaml, body) = split("---\ntitle: Hi\n---\nBody\n").unwrap();
        assert_eq!(yaml, Some("title: Hi\n"));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_split_crlf_and_trailing_spaces() {
        let (yaml, body) = split("---  \r\ntitle: Hi\r\n--- \r\nBody").unwrap();
        assert_eq!(yaml, Some("title: Hi\r\n"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_empty_block() {
        let (yaml, body) = split("---\n---\nBody").unwrap();
        assert_eq!(yaml, Some(""));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_closing_delimiter_at_eof() {
        let (yaml, body) = split("---\ntitle: Hi\n---").unwrap();
        assert_eq!(yaml, Some("title: Hi\n"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_split_unterminated() {
        assert!(split("---\ntitle: Hi\nno end").is_err());
        assert!(split("---").is_err());
    }

    #[test]
    fn test_split_strips_bom() {
        let (yaml, _) = split("\u{feff}---\na: 1\n---\n").unwrap();
        assert_eq!(yaml, Some("a: 1\n"));
    }

    #[test]
    fn test_split_dashes_later_in_body_are_not_front_matter() {
        let (yaml, body) = split("Intro\n---\nMore").unwrap();
        assert!(yaml.is_none());
        assert_eq!(body, "Intro\n---\nMore");
    }

    #[test]
    fn test_parse_mapping() {
        let fm = FrontMatter::parse("title: Hello\ntags: [a, b]\ndraft: false").unwrap();
        assert_eq!(fm.len(), 3);
        assert_eq!(fm.text("title").unwrap(), Some("Hello".to_owned()));
        assert_eq!(fm.text("draft").unwrap(), Some("false".to_owned()));
        assert!(fm.text("tags").is_err());
        assert_eq!(fm.keys().collect::<Vec<_>>(), vec!["draft", "tags", "title"]);
    }

    #[test]
    fn test_parse_number_stringified() {
        let fm = FrontMatter::parse("title: 2024").unwrap();
        assert_eq!(fm.text("title").unwrap(), Some("2024".to_owned()));
    }

    #[test]
    fn test_parse_empty_and_null() {
        assert!(FrontMatter::parse("").unwrap().is_empty());
        assert!(FrontMatter::parse("  \n").unwrap().is_empty());
        assert!(FrontMatter::parse("~").unwrap().is_empty());
    }

    #[test]
    fn test_parse_missing_and_null_values() {
        let fm = FrontMatter::parse("title: ~").unwrap();
        assert_eq!(fm.text("title").unwrap(), None);
        assert_eq!(fm.text("summary").unwrap(), None);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = FrontMatter::parse("title: [unclosed").unwrap_err();
        assert!(err.starts_with("Invalid YAML"));
    }

    #[test]
    fn test_parse_non_mapping() {
        let err = FrontMatter::parse("- a\n- b").unwrap_err();
        assert!(err.contains("mapping"));
    }
}
