//! Ingestion options.

use crate::common::{Error, Result};
use crate::odf::elements::table_expansion::{RepeatPolicy, RowEmptiness};
use phf::{Set, phf_set};
use serde::{Deserialize, Serialize};

/// Strings treated as missing values unless `keep_default_na` is off.
static DEFAULT_NA_VALUES: Set<&'static str> = phf_set! {
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
};

/// How a grid is turned into a [`Frame`](super::Frame).
///
/// Row positions in `header` are relative to the rows left after `skiprows`
/// and `skip_footer` are applied.
///
/// # Examples
///
/// ```
/// use odfgrid::frame::ParseOptions;
///
/// let options = ParseOptions::default()
///     .with_skiprows(1)
///     .with_index_col(Some(0))
///     .with_na_values(["-"]);
/// assert_eq!(options.header, Some(0));
/// assert!(options.is_na("-"));
/// assert!(options.is_na("N/A"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Row holding the column labels, `None` for unlabelled columns
    pub header: Option<usize>,
    /// Leading rows to drop
    pub skiprows: usize,
    /// Trailing rows to drop
    pub skip_footer: usize,
    /// Column to lift out as the row index
    pub index_col: Option<usize>,
    /// Extra strings read as missing values
    pub na_values: Vec<String>,
    /// Whether the built-in missing-value strings apply
    pub keep_default_na: bool,
    /// Handling of repeated content cells and rows
    pub repeat_policy: RepeatPolicy,
    /// Which rows count as empty placeholders
    pub row_emptiness: RowEmptiness,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            header: Some(0),
            skiprows: 0,
            skip_footer: 0,
            index_col: None,
            na_values: Vec::new(),
            keep_default_na: true,
            repeat_policy: RepeatPolicy::default(),
            row_emptiness: RowEmptiness::default(),
        }
    }
}

impl ParseOptions {
    pub fn with_header(mut self, header: Option<usize>) -> Self {
        self.header = header;
        self
    }

    pub fn with_skiprows(mut self, skiprows: usize) -> Self {
        self.skiprows = skiprows;
        self
    }

    pub fn with_skip_footer(mut self, skip_footer: usize) -> Self {
        self.skip_footer = skip_footer;
        self
    }

    pub fn with_index_col(mut self, index_col: Option<usize>) -> Self {
        self.index_col = index_col;
        self
    }

    pub fn with_na_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.na_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_keep_default_na(mut self, keep: bool) -> Self {
        self.keep_default_na = keep;
        self
    }

    pub fn with_repeat_policy(mut self, policy: RepeatPolicy) -> Self {
        self.repeat_policy = policy;
        self
    }

    pub fn with_row_emptiness(mut self, emptiness: RowEmptiness) -> Self {
        self.row_emptiness = emptiness;
        self
    }

    /// Whether a string cell reads as a missing value.
    pub fn is_na(&self, value: &str) -> bool {
        (self.keep_default_na && DEFAULT_NA_VALUES.contains(value))
            || self.na_values.iter().any(|na| na == value)
    }

    /// Load options from YAML; absent keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse parse options from YAML: {}", e)))
    }

    /// Serialize options to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize parse options to YAML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.header, Some(0));
        assert!(options.keep_default_na);
        assert_eq!(options.repeat_policy, RepeatPolicy::ExpandCells);
        assert_eq!(options.row_emptiness, RowEmptiness::SingleChild);
        assert!(options.is_na("NaN"));
        assert!(!options.is_na("0"));
    }

    #[test]
    fn test_custom_na_values() {
        let options = ParseOptions::default()
            .with_keep_default_na(false)
            .with_na_values(["missing"]);
        assert!(options.is_na("missing"));
        assert!(!options.is_na("NA"));
        assert!(!options.is_na(""));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "header: null\nskiprows: 2\nindex_col: 0\nna_values: [\"-\"]\nrepeat_policy: expand_all\nrow_emptiness: all_cells_empty\n";
        let options = ParseOptions::from_yaml(yaml).unwrap();
        assert_eq!(options.header, None);
        assert_eq!(options.skiprows, 2);
        assert_eq!(options.index_col, Some(0));
        assert_eq!(options.na_values, vec!["-".to_string()]);
        assert_eq!(options.repeat_policy, RepeatPolicy::ExpandAll);
        assert_eq!(options.row_emptiness, RowEmptiness::AllCellsEmpty);
        // Unspecified keys keep defaults
        assert!(options.keep_default_na);
    }

    #[test]
    fn test_yaml_round_trip() {
        let options = ParseOptions::default()
            .with_skip_footer(3)
            .with_repeat_policy(RepeatPolicy::Strict);
        let yaml = options.to_yaml().unwrap();
        assert_eq!(ParseOptions::from_yaml(&yaml).unwrap(), options);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ParseOptions::from_yaml("repeat_policy: sometimes\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
