use std::path::PathBuf;
use std::sync::Arc;

use crate::dictionary::TranslationDictionary;
use crate::error::Result;
use crate::model::ClassifierTable;

/// In-memory translation state for one invocation: the lookup dictionary and
/// the trained classifier table.
///
/// There is no process-wide singleton; a session is built explicitly and
/// passed to every translation entry point. Both tables are rebuilt from
/// scratch per upload batch and never mutated while in use.
#[derive(Clone, Default)]
pub struct Session {
    dictionary: Arc<TranslationDictionary>,
    classifiers: Arc<ClassifierTable>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from dictionary CSVs and classifier training CSVs.
    ///
    /// Either batch may be empty. A malformed file aborts the whole batch.
    pub fn from_files(dictionaries: &[PathBuf], training: &[PathBuf]) -> Result<Self> {
        let dictionary = if dictionaries.is_empty() {
            TranslationDictionary::new()
        } else {
            TranslationDictionary::from_csv_files(dictionaries)?
        };
        let classifiers = if training.is_empty() {
            ClassifierTable::new()
        } else {
            ClassifierTable::train_from_csv_files(training)?
        };
        Ok(Self {
            dictionary: Arc::new(dictionary),
            classifiers: Arc::new(classifiers),
        })
    }

    pub fn with_dictionary(dictionary: TranslationDictionary) -> Self {
        Self {
            dictionary: Arc::new(dictionary),
            classifiers: Arc::new(ClassifierTable::new()),
        }
    }

    pub fn from_parts(
        dictionary: Arc<TranslationDictionary>,
        classifiers: Arc<ClassifierTable>,
    ) -> Self {
        Self {
            dictionary,
            classifiers,
        }
    }

    pub fn dictionary(&self) -> Arc<TranslationDictionary> {
        Arc::clone(&self.dictionary)
    }

    pub fn classifiers(&self) -> Arc<ClassifierTable> {
        Arc::clone(&self.classifiers)
    }
}
