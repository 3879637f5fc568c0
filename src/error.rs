use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerjemahError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dictionary parse error: {0}")]
    DictionaryParse(String),

    #[error("No trained model for language pair {source_lang} -> {target}")]
    UnsupportedLanguagePair { source_lang: String, target: String },

    #[error("Invalid language code: {0}")]
    Language(String),

    /// The backend call failed. The original text rides along untranslated so
    /// callers can keep the source text in place instead of writing error
    /// output into the document.
    #[error("Translation backend error: {reason}")]
    Backend { text: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, TerjemahError>;
