use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

/// Default location of the pattern definition file.
pub const DEFAULT_PATTERNS_FILE: &str = "./patterns.json";

/// The grid for one character: one row per week-column of the contribution
/// graph, seven day cells per row, index 0 = Sunday.
///
/// Deserialization rejects any row that is not exactly seven entries wide,
/// so a loaded pattern always satisfies the grid invariant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct GlyphPattern(Vec<[bool; 7]>);

impl GlyphPattern {
    /// Number of week-columns this glyph occupies.
    pub fn weeks(&self) -> usize {
        self.0.len()
    }

    /// The rows in week order.
    pub fn rows(&self) -> &[[bool; 7]] {
        &self.0
    }
}

#[cfg(test)]
impl From<Vec<[bool; 7]>> for GlyphPattern {
    fn from(rows: Vec<[bool; 7]>) -> Self {
        GlyphPattern(rows)
    }
}

/// Read-only store of glyph patterns, loaded once at startup.
///
/// The backing file is a JSON object keyed by single characters:
///
/// ```json
/// { "A": [[false, true, true, true, false, false, false],
///         [true, false, false, false, true, false, false]] }
/// ```
#[derive(Debug, Clone)]
pub struct Patterns {
    glyphs: BTreeMap<String, GlyphPattern>,
}

impl Patterns {
    /// Loads the pattern store from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the file is missing, unreadable,
    /// not valid JSON, contains a row that is not exactly seven booleans, or
    /// has a key that is not a single character.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let body = read_to_string(path).map_err(|e| {
            Error::Configuration(format!(
                "cannot read pattern file `{}`: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&body)
    }

    /// Parses a pattern store from a JSON string.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        let glyphs: BTreeMap<String, GlyphPattern> = serde_json::from_str(body)
            .map_err(|e| Error::Configuration(format!("invalid pattern file: {}", e)))?;

        for key in glyphs.keys() {
            if key.chars().count() != 1 {
                return Err(Error::Configuration(format!(
                    "pattern key `{}` is not a single character",
                    key
                )));
            }
        }

        Ok(Patterns { glyphs })
    }

    /// Looks up the pattern for `character`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no pattern is defined for the
    /// character — the pattern has not been authored yet, which the tool
    /// cannot recover from.
    pub fn lookup(&self, character: char) -> Result<&GlyphPattern, Error> {
        match self.glyphs.get(&character.to_string()) {
            Some(pattern) => Ok(pattern),
            None => Err(Error::Configuration(format!(
                "add the pattern `{}` to the patterns file",
                character
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Patterns;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "A": [[false, true, true, true, false, false, false],
              [true, false, false, false, true, false, false]],
        "I": [[true, true, true, true, true, true, true]]
    }"#;

    #[test]
    fn lookup_returns_loaded_pattern() {
        let patterns = Patterns::from_json(SAMPLE).expect("sample should parse");
        let a = patterns.lookup('A').expect("A is defined");
        assert_eq!(a.weeks(), 2);
        assert_eq!(
            a.rows()[0],
            [false, true, true, true, false, false, false]
        );
    }

    #[test]
    fn lookup_unknown_character_is_configuration_error() {
        let patterns = Patterns::from_json(SAMPLE).expect("sample should parse");
        let err = patterns.lookup('Z').unwrap_err();
        assert!(err.to_string().contains("add the pattern `Z`"));
    }

    #[test]
    fn short_row_is_rejected() {
        let result = Patterns::from_json(r#"{"X": [[true, false, true]]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn long_row_is_rejected() {
        let body = r#"{"X": [[true, true, true, true, true, true, true, true]]}"#;
        assert!(Patterns::from_json(body).is_err());
    }

    #[test]
    fn multi_character_key_is_rejected() {
        let body = r#"{"AB": [[true, true, true, true, true, true, true]]}"#;
        let err = Patterns::from_json(body).unwrap_err();
        assert!(err.to_string().contains("not a single character"));
    }

    #[test]
    fn missing_file_is_configuration_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let err = Patterns::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read pattern file"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
        write!(file, "{}", SAMPLE).expect("failed to write sample");

        let patterns = Patterns::load(file.path()).expect("sample file should load");
        assert!(patterns.lookup('I').is_ok());
    }
}
