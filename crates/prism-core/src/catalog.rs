//! Label catalog loading for classification output mapping.
//!
//! The catalog is an ordered list of labels read from a synset file at
//! startup. Line order is load-bearing: line *i* names the class the model
//! reports at output index *i*, so the file is read exactly as-is with no
//! sorting or cross-line deduplication.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Width of the synset id prefix on every catalog line.
const SYNSET_ID_LEN: usize = 9;

/// A single class label: a fixed-width synset id plus one or more
/// human-readable display names.
///
/// Names are a deduplicated set; their order carries no meaning. A
/// `BTreeSet` keeps serialization deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// WordNet synset id, e.g. "n01531178"
    pub synset_id: String,
    /// Display names for the class, e.g. {"goldfinch", "Carduelis carduelis"}
    pub names: BTreeSet<String>,
}

impl Label {
    /// Parse a label from one catalog line.
    ///
    /// The first 9 characters are the synset id; the remainder is split on
    /// commas into display names, each trimmed of surrounding whitespace.
    /// A sample line:
    ///
    /// ```text
    /// n01531178 goldfinch, Carduelis carduelis
    /// ```
    pub fn parse(line: &str) -> Result<Self, String> {
        let synset_id = line
            .get(..SYNSET_ID_LEN)
            .ok_or_else(|| format!("line shorter than {SYNSET_ID_LEN} characters"))?;

        let names: BTreeSet<String> = line[SYNSET_ID_LEN..]
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();

        if names.is_empty() {
            return Err("no display names after synset id".to_string());
        }

        Ok(Self {
            synset_id: synset_id.to_string(),
            names,
        })
    }

    /// The first display name in deterministic (sorted) order.
    pub fn primary_name(&self) -> &str {
        self.names
            .iter()
            .next()
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// An ordered, immutable sequence of labels where index *i* corresponds to
/// model output index *i*. Loaded once at startup and shared read-only
/// across concurrent requests.
#[derive(Debug)]
pub struct Catalog {
    labels: Vec<Label>,
}

impl Catalog {
    /// Load the catalog from a synset file, one label per line.
    ///
    /// Fails on the first unparseable line; the error carries the 1-based
    /// line number. Blank lines are not tolerated either, since skipping
    /// them would silently shift every subsequent class index. A file with
    /// no labels at all is rejected too: a classifier with zero classes
    /// can never produce a prediction, so that is a startup defect like
    /// any other catalog problem.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let labels = Self::parse(&content)?;
        if labels.is_empty() {
            return Err(CatalogError::Empty {
                path: path.to_path_buf(),
            });
        }

        tracing::info!("Loaded label catalog: {} classes from {:?}", labels.len(), path);

        Ok(Self { labels })
    }

    /// Parse catalog content that has already been read into memory.
    pub fn parse(content: &str) -> Result<Vec<Label>, CatalogError> {
        content
            .lines()
            .enumerate()
            .map(|(i, line)| {
                Label::parse(line).map_err(|message| CatalogError::ParseError {
                    line: i + 1,
                    message,
                })
            })
            .collect()
    }

    /// Build a catalog from pre-parsed labels. Used by tests and by callers
    /// that source labels from somewhere other than a synset file.
    pub fn from_labels(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    /// Number of classes in the catalog.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the catalog has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Look up the label for a class index.
    pub fn get(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// All labels in model output order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_goldfinch_line() {
        let label = Label::parse("n01531178 goldfinch, Carduelis carduelis").unwrap();
        assert_eq!(label.synset_id, "n01531178");
        let names: Vec<&str> = label.names.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["Carduelis carduelis", "goldfinch"]);
    }

    #[test]
    fn test_parse_trims_each_name() {
        let label = Label::parse("n02084071   dog ,  domestic dog , canine  ").unwrap();
        assert!(label.names.contains("dog"));
        assert!(label.names.contains("domestic dog"));
        assert!(label.names.contains("canine"));
        assert_eq!(label.names.len(), 3);
    }

    #[test]
    fn test_parse_deduplicates_names() {
        let label = Label::parse("n00000001 cat, cat, cat").unwrap();
        assert_eq!(label.names.len(), 1);
    }

    #[test]
    fn test_parse_rejects_short_line() {
        let err = Label::parse("n0153").unwrap_err();
        assert!(err.contains("shorter"));
    }

    #[test]
    fn test_parse_rejects_empty_name_set() {
        assert!(Label::parse("n01531178").is_err());
        assert!(Label::parse("n01531178   ,  , ").is_err());
    }

    #[test]
    fn test_load_preserves_line_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synset.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "n00000001 tench, Tinca tinca").unwrap();
        writeln!(f, "n00000002 goldfish, Carassius auratus").unwrap();
        writeln!(f, "n00000003 great white shark").unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(0).unwrap().synset_id, "n00000001");
        assert_eq!(catalog.get(1).unwrap().synset_id, "n00000002");
        assert_eq!(catalog.get(2).unwrap().synset_id, "n00000003");
        assert!(catalog.get(3).is_none());
    }

    #[test]
    fn test_load_reports_line_number_of_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synset.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "n00000001 tench").unwrap();
        writeln!(f, "bad").unwrap();

        let err = Catalog::load(&path).unwrap_err();
        match err {
            CatalogError::ParseError { line, .. } => assert_eq!(line, 2),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synset.txt");
        std::fs::write(&path, "").unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Empty { .. }));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = Catalog::load(Path::new("/nonexistent/synset.txt")).unwrap_err();
        assert!(matches!(err, CatalogError::ReadError { .. }));
    }

    #[test]
    fn test_primary_name() {
        let label = Label::parse("n01531178 goldfinch, Carduelis carduelis").unwrap();
        // BTreeSet order: capital letters sort before lowercase.
        assert_eq!(label.primary_name(), "Carduelis carduelis");
    }
}
