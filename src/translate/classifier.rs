use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::Translator;
use crate::error::Result;
use crate::lang::{self, LanguageId, LanguagePair};
use crate::model::ClassifierTable;
use crate::session::Session;

/// Classifier-backed translation: look up the trained model for the
/// `(source, target)` pair and predict a single label.
///
/// When no source language is configured, the span's language is identified
/// first; identification failure substitutes the `unknown` sentinel instead
/// of aborting, and the resulting pair lookup then fails with the usual
/// typed error.
pub struct ClassifierTranslator {
    classifiers: Arc<ClassifierTable>,
    source_language: Option<LanguageId>,
}

impl ClassifierTranslator {
    pub fn new(classifiers: Arc<ClassifierTable>, source_language: Option<LanguageId>) -> Self {
        Self {
            classifiers,
            source_language,
        }
    }

    fn resolve_source(&self, text: &str) -> LanguageId {
        match &self.source_language {
            Some(source) => source.clone(),
            None => {
                let identified = lang::identify(text);
                debug!("Identified source language: {}", identified);
                identified
            }
        }
    }
}

#[async_trait]
impl Translator for ClassifierTranslator {
    async fn translate(&self, text: &str, target: &LanguageId) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        let source = self.resolve_source(text);
        let pair = LanguagePair::new(source, target.clone());
        self.classifiers.translate(text, &pair)
    }
}

/// Convenience entry point: translate `text` with the models held by the
/// session, for an explicitly known language pair.
pub async fn translate_with_model(
    text: &str,
    source: &LanguageId,
    target: &LanguageId,
    session: &Session,
) -> Result<String> {
    let translator =
        ClassifierTranslator::new(session.classifiers(), Some(source.clone()));
    translator.translate(text, target).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TerjemahError;

    fn trained_table() -> Arc<ClassifierTable> {
        let csv = "id,en\nselamat pagi,good morning\nselamat malam,good night\n";
        let table = crate::model::TrainingTable::from_reader(csv.as_bytes()).unwrap();
        Arc::new(ClassifierTable::train(&[table]).unwrap())
    }

    fn code(s: &str) -> LanguageId {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_translates_with_explicit_source() {
        let translator = ClassifierTranslator::new(trained_table(), Some(code("id")));
        let result = translator
            .translate("selamat pagi", &code("en"))
            .await
            .unwrap();
        assert_eq!(result, "good morning");
    }

    #[tokio::test]
    async fn test_unsupported_pair_is_typed_error() {
        let translator = ClassifierTranslator::new(trained_table(), Some(code("th")));
        let err = translator
            .translate("selamat pagi", &code("en"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TerjemahError::UnsupportedLanguagePair { .. }
        ));
    }

    #[tokio::test]
    async fn test_translate_with_model_helper() {
        let session = Session::from_parts(
            Arc::new(crate::dictionary::TranslationDictionary::new()),
            trained_table(),
        );
        let result = translate_with_model("selamat pagi", &code("id"), &code("en"), &session)
            .await
            .unwrap();
        assert_eq!(result, "good morning");
    }

    #[tokio::test]
    async fn test_empty_input_is_noop() {
        let translator = ClassifierTranslator::new(trained_table(), Some(code("id")));
        assert_eq!(translator.translate("  ", &code("en")).await.unwrap(), "  ");
    }
}
