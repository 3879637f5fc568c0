use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Translator;
use crate::config::BackendConfig;
use crate::dictionary::TranslationDictionary;
use crate::error::{Result, TerjemahError};
use crate::lang::LanguageId;

/// The opaque external translation boundary:
/// text + source ("auto" or a code) + target code -> translated text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

#[derive(Debug, Clone, Serialize)]
struct BackendRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
struct BackendResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// LibreTranslate-style HTTP backend.
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("HTTP client creation should not fail");
        Self { client, config }
    }
}

#[async_trait]
impl TranslationBackend for HttpBackend {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let url = format!("{}/translate", self.config.endpoint);
        let request = BackendRequest {
            q: text,
            source,
            target,
            api_key: self.config.api_key.as_deref(),
        };

        debug!("Sending translation request to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TerjemahError::Backend {
                text: text.to_string(),
                reason: format!("HTTP request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TerjemahError::Backend {
                text: text.to_string(),
                reason: format!("backend returned {}: {}", status, error_text),
            });
        }

        let body: BackendResponse =
            response.json().await.map_err(|e| TerjemahError::Backend {
                text: text.to_string(),
                reason: format!("failed to parse backend response: {}", e),
            })?;

        Ok(body.translated_text)
    }
}

/// External service adapter: applies the lexical pre-pass, skips empty
/// input, and delegates the rest to the backend with `source = "auto"`.
pub struct RemoteTranslator {
    backend: Box<dyn TranslationBackend>,
    dictionary: Arc<TranslationDictionary>,
    max_retries: u32,
}

impl RemoteTranslator {
    pub fn new(config: BackendConfig, dictionary: Arc<TranslationDictionary>) -> Self {
        let max_retries = config.max_retries;
        Self {
            backend: Box::new(HttpBackend::new(config)),
            dictionary,
            max_retries,
        }
    }

    #[cfg(test)]
    fn with_backend(
        backend: Box<dyn TranslationBackend>,
        dictionary: Arc<TranslationDictionary>,
        max_retries: u32,
    ) -> Self {
        Self {
            backend,
            dictionary,
            max_retries,
        }
    }
}

#[async_trait]
impl Translator for RemoteTranslator {
    async fn translate(&self, text: &str, target: &LanguageId) -> Result<String> {
        // Lexical pre-pass through the session dictionary first.
        let prepared = self.dictionary.apply(text);

        // Empty or all-whitespace input is a no-op, never a backend call.
        if prepared.trim().is_empty() {
            return Ok(prepared);
        }

        let attempts = self.max_retries.max(1);
        let mut last_reason = String::new();
        for attempt in 1..=attempts {
            match self
                .backend
                .translate(&prepared, "auto", target.as_str())
                .await
            {
                Ok(translation) => return Ok(translation),
                Err(TerjemahError::Backend { reason, .. }) => {
                    warn!("Backend attempt {}/{} failed: {}", attempt, attempts, reason);
                    last_reason = reason;
                }
                Err(e) => return Err(e),
            }
        }

        // The original text rides along so callers can keep it in place.
        Err(TerjemahError::Backend {
            text: text.to_string(),
            reason: format!("failed after {} attempts: {}", attempts, last_reason),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn dictionary(pairs: &[(&str, &str)]) -> Arc<TranslationDictionary> {
        let mut dict = TranslationDictionary::new();
        for (a, b) in pairs {
            dict.insert_pair(a, b);
        }
        Arc::new(dict)
    }

    fn target() -> LanguageId {
        "en".parse().unwrap()
    }

    #[tokio::test]
    async fn test_empty_input_never_calls_backend() {
        let mut backend = MockTranslationBackend::new();
        backend.expect_translate().never();

        let translator =
            RemoteTranslator::with_backend(Box::new(backend), dictionary(&[]), 3);
        assert_eq!(translator.translate("", &target()).await.unwrap(), "");
        assert_eq!(
            translator.translate("   \t", &target()).await.unwrap(),
            "   \t"
        );
    }

    #[tokio::test]
    async fn test_pre_pass_runs_before_backend() {
        let mut backend = MockTranslationBackend::new();
        backend
            .expect_translate()
            .with(eq("house besar"), eq("auto"), eq("en"))
            .times(1)
            .returning(|_, _, _| Ok("big house".to_string()));

        let translator = RemoteTranslator::with_backend(
            Box::new(backend),
            dictionary(&[("rumah", "house")]),
            3,
        );
        let result = translator.translate("rumah besar", &target()).await.unwrap();
        assert_eq!(result, "big house");
    }

    #[tokio::test]
    async fn test_backend_failure_preserves_original_text() {
        let mut backend = MockTranslationBackend::new();
        backend.expect_translate().times(2).returning(|text, _, _| {
            Err(TerjemahError::Backend {
                text: text.to_string(),
                reason: "quota exceeded".to_string(),
            })
        });

        let translator = RemoteTranslator::with_backend(
            Box::new(backend),
            dictionary(&[("rumah", "house")]),
            2,
        );
        let err = translator
            .translate("rumah besar", &target())
            .await
            .unwrap_err();
        match err {
            TerjemahError::Backend { text, .. } => assert_eq!(text, "rumah besar"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let mut backend = MockTranslationBackend::new();
        let mut calls = 0;
        backend.expect_translate().times(2).returning(move |_, _, _| {
            calls += 1;
            if calls == 1 {
                Err(TerjemahError::Backend {
                    text: String::new(),
                    reason: "transient".to_string(),
                })
            } else {
                Ok("hello".to_string())
            }
        });

        let translator =
            RemoteTranslator::with_backend(Box::new(backend), dictionary(&[]), 3);
        assert_eq!(translator.translate("halo", &target()).await.unwrap(), "hello");
    }
}
