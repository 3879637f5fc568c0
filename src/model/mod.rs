//! Classifier-backed translation models.
//!
//! One bag-of-words Naive Bayes classifier is trained per ordered language
//! pair found in the uploaded tables. This is a clearly labeled demo mode:
//! the label space is the set of target phrases seen in training, so
//! inference recalls memorized pairs and approximates everything else by
//! token overlap. It is not machine translation.

pub mod bayes;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, TerjemahError};
use crate::lang::{LanguageId, LanguagePair};
use bayes::{CountVectorizer, MultinomialNb};

/// One parsed training table: language-code headers plus data rows.
#[derive(Debug, Clone)]
pub struct TrainingTable {
    columns: Vec<LanguageId>,
    rows: Vec<Vec<String>>,
}

impl TrainingTable {
    /// Parse a CSV table with a header row of language codes.
    ///
    /// Header names are used verbatim as language identifiers, but must be
    /// valid codes; anything else is rejected here rather than at
    /// classifier-lookup time.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let columns = csv_reader
            .headers()?
            .iter()
            .map(|name| name.parse::<LanguageId>())
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(String::from).collect());
        }
        Ok(Self { columns, rows })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|_| TerjemahError::FileNotFound(path.display().to_string()))?;
        Self::from_reader(file)
    }
}

/// A fitted vectorizer/classifier pair for one ordered language pair.
pub struct PairModel {
    vectorizer: CountVectorizer,
    model: MultinomialNb,
    examples: usize,
}

impl PairModel {
    fn train(examples: &[String], labels: &[String]) -> Self {
        let vectorizer = CountVectorizer::fit(examples);
        let vectors: Vec<_> = examples.iter().map(|e| vectorizer.transform(e)).collect();
        let model = MultinomialNb::fit(&vectors, labels, vectorizer.vocabulary_size());
        Self {
            vectorizer,
            model,
            examples: examples.len(),
        }
    }

    pub fn predict(&self, text: &str) -> Option<String> {
        let vector = self.vectorizer.transform(text);
        self.model.predict(&vector).map(String::from)
    }

    pub fn example_count(&self) -> usize {
        self.examples
    }

    pub fn label_count(&self) -> usize {
        self.model.class_count()
    }
}

/// Trained classifiers keyed by ordered `(source, target)` language pair.
///
/// Built once per training invocation from the concatenation of all uploaded
/// tables; held in memory for the session and never incrementally updated.
/// `(A, B)` and `(B, A)` are trained independently.
#[derive(Default)]
pub struct ClassifierTable {
    models: HashMap<LanguagePair, PairModel>,
}

impl ClassifierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Train one classifier per ordered pair of distinct columns across the
    /// given CSV files. N distinct columns yield N x (N-1) models.
    pub fn train_from_csv_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let tables = paths
            .iter()
            .map(TrainingTable::from_file)
            .collect::<Result<Vec<_>>>()?;
        Self::train(&tables)
    }

    pub fn train(tables: &[TrainingTable]) -> Result<Self> {
        let mut languages: Vec<LanguageId> = Vec::new();
        for table in tables {
            for column in &table.columns {
                if !languages.contains(column) {
                    languages.push(column.clone());
                }
            }
        }

        let mut models = HashMap::new();
        for source in &languages {
            for target in &languages {
                if source == target {
                    continue;
                }
                let (examples, labels) = collect_pair(tables, source, target);
                if examples.is_empty() {
                    continue;
                }
                let pair = LanguagePair::new(source.clone(), target.clone());
                debug!(
                    "Training {} on {} examples",
                    pair,
                    examples.len()
                );
                models.insert(pair, PairModel::train(&examples, &labels));
            }
        }

        info!(
            "Trained {} classifier(s) across {} language(s)",
            models.len(),
            languages.len()
        );
        Ok(Self { models })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn contains(&self, pair: &LanguagePair) -> bool {
        self.models.contains_key(pair)
    }

    pub fn get(&self, pair: &LanguagePair) -> Option<&PairModel> {
        self.models.get(pair)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&LanguagePair, &PairModel)> {
        self.models.iter()
    }

    /// Predict a translation for `text` using the classifier trained for the
    /// given pair. An absent pair is a typed error, not a sentinel string.
    pub fn translate(&self, text: &str, pair: &LanguagePair) -> Result<String> {
        let model = self.models.get(pair).ok_or_else(|| {
            TerjemahError::UnsupportedLanguagePair {
                source_lang: pair.source.to_string(),
                target: pair.target.to_string(),
            }
        })?;
        model.predict(text).ok_or_else(|| {
            TerjemahError::UnsupportedLanguagePair {
                source_lang: pair.source.to_string(),
                target: pair.target.to_string(),
            }
        })
    }
}

/// Gather `(example, label)` column values for one ordered pair from every
/// table containing both columns.
fn collect_pair(
    tables: &[TrainingTable],
    source: &LanguageId,
    target: &LanguageId,
) -> (Vec<String>, Vec<String>) {
    let mut examples = Vec::new();
    let mut labels = Vec::new();
    for table in tables {
        let source_idx = table.columns.iter().position(|c| c == source);
        let target_idx = table.columns.iter().position(|c| c == target);
        let (Some(si), Some(ti)) = (source_idx, target_idx) else {
            continue;
        };
        for row in &table.rows {
            if let (Some(x), Some(y)) = (row.get(si), row.get(ti)) {
                examples.push(x.clone());
                labels.push(y.clone());
            }
        }
    }
    (examples, labels)
}
