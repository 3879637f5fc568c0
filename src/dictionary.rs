use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, TerjemahError};

/// Bidirectional exact-match word/phrase lookup table built from
/// paired-column tabular uploads.
///
/// For every row of every uploaded table, both translation directions are
/// inserted for every ordered pair of distinct columns. Lookups are exact
/// full-token matches: no stemming, casing normalization, or punctuation
/// stripping. Later rows silently overwrite earlier ones sharing a key.
#[derive(Debug, Default, Clone)]
pub struct TranslationDictionary {
    entries: HashMap<String, String>,
}

impl TranslationDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from a batch of CSV files with header rows.
    ///
    /// A malformed file aborts the whole batch; there is no per-row
    /// recovery, the batch must be re-submitted.
    pub fn from_csv_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut dict = Self::new();
        for path in paths {
            let path = path.as_ref();
            let file = std::fs::File::open(path).map_err(|_| {
                TerjemahError::FileNotFound(path.display().to_string())
            })?;
            dict.load_reader(file).map_err(|e| {
                TerjemahError::DictionaryParse(format!("{}: {}", path.display(), e))
            })?;
        }
        info!("Dictionary built with {} entries", dict.len());
        Ok(dict)
    }

    /// Load one CSV table (header row expected) into the dictionary.
    ///
    /// A single-column table contributes nothing: no column pair exists.
    pub fn load_reader<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let columns = csv_reader.headers()?.len();

        let mut rows = 0usize;
        for record in csv_reader.records() {
            let record = record?;
            for i in 0..columns {
                for j in 0..columns {
                    if i == j {
                        continue;
                    }
                    let (Some(a), Some(b)) = (record.get(i), record.get(j)) else {
                        return Err(TerjemahError::DictionaryParse(format!(
                            "row {} has fewer than {} fields",
                            rows + 1,
                            columns
                        )));
                    };
                    self.insert_pair(a, b);
                }
            }
            rows += 1;
        }
        debug!("Loaded {} dictionary rows across {} columns", rows, columns);
        Ok(())
    }

    /// Insert one directed entry. Last write wins on key collision.
    pub fn insert_pair(&mut self, source: &str, target: &str) {
        self.entries
            .insert(source.to_string(), target.to_string());
    }

    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lexical pre-pass: replace each whitespace-delimited token by its
    /// dictionary entry if present, leaving unknown tokens alone.
    ///
    /// Tokens are rejoined with single spaces, so the original whitespace
    /// layout is not preserved. Empty or all-whitespace input is returned
    /// unchanged. Note the pass is not idempotent in general: a replacement
    /// value may itself be a dictionary key, so re-application can
    /// re-translate.
    pub fn apply(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }
        text.split_whitespace()
            .map(|token| self.lookup(token).unwrap_or(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
