// Modular translation architecture
//
// Two implementations behind one trait, picked per session:
// - Remote: lexical pre-pass, then the external translation backend
// - Classifier: locally trained per-language-pair Naive Bayes lookup
//   (demo/fallback mode, not real machine translation)

pub mod classifier;
pub mod remote;

use async_trait::async_trait;

use crate::config::{Config, TranslationMode};
use crate::error::Result;
use crate::lang::LanguageId;
use crate::session::Session;

/// Main trait for translating one text span.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate a text span to the target language.
    async fn translate(&self, text: &str, target: &LanguageId) -> Result<String>;
}

/// Factory for creating translator instances.
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a translator for the session.
    ///
    /// `Auto` routes to the classifier when trained models exist and to the
    /// external backend otherwise.
    pub fn create_translator(config: &Config, session: &Session) -> Box<dyn Translator> {
        let use_classifier = match config.translate.mode {
            TranslationMode::Classifier => true,
            TranslationMode::Remote => false,
            TranslationMode::Auto => !session.classifiers().is_empty(),
        };

        if use_classifier {
            Box::new(classifier::ClassifierTranslator::new(
                session.classifiers(),
                config.translate.source_language.clone(),
            ))
        } else {
            Box::new(remote::RemoteTranslator::new(
                config.backend.clone(),
                session.dictionary(),
            ))
        }
    }
}
