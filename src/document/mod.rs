// Format-specific document walkers.
//
// Each walker enumerates translatable text spans in a fixed traversal order,
// routes every non-empty span through the session's translator, and writes
// the result back in place. A failed span keeps its original text so one
// untranslatable paragraph never aborts the rest of the document, and error
// output never replaces content.

pub mod office;
pub mod plain;
pub mod subtitle;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::DocumentConfig;
use crate::error::{Result, TerjemahError};
use crate::lang::LanguageId;
use crate::translate::Translator;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Word,
    Spreadsheet,
    SlideDeck,
    Subtitle,
    WebSubtitle,
    PlainText,
    Tabular,
}

impl DocumentKind {
    /// Determine the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "docx" => Ok(Self::Word),
            "xlsx" => Ok(Self::Spreadsheet),
            "pptx" => Ok(Self::SlideDeck),
            "srt" => Ok(Self::Subtitle),
            "vtt" => Ok(Self::WebSubtitle),
            "txt" => Ok(Self::PlainText),
            "csv" => Ok(Self::Tabular),
            _ => Err(TerjemahError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// Per-document translation counters, for logging and structural checks.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentStats {
    /// Non-empty spans visited
    pub spans: usize,
    /// Spans successfully rewritten
    pub translated: usize,
    /// Spans kept untranslated after a span-scoped failure
    pub failed: usize,
}

/// Derive the output path: `{originalBaseName}_{targetLang}.{extension}`,
/// placed in `output_dir` or next to the input.
pub fn output_path(input: &Path, target: &LanguageId, output_dir: Option<&Path>) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| TerjemahError::Config("Invalid input filename".to_string()))?;
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| TerjemahError::UnsupportedFormat(input.display().to_string()))?;

    let directory = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    Ok(directory.join(format!("{}_{}.{}", stem, target, extension)))
}

/// Translate one document file, writing the result to `output`.
pub async fn translate_file(
    input: &Path,
    output: &Path,
    target: &LanguageId,
    translator: &dyn Translator,
    config: &DocumentConfig,
) -> Result<DocumentStats> {
    let kind = DocumentKind::from_path(input)?;
    if !input.exists() {
        return Err(TerjemahError::FileNotFound(input.display().to_string()));
    }

    info!("Translating {} -> {}", input.display(), output.display());
    let stats = match kind {
        DocumentKind::Word | DocumentKind::Spreadsheet | DocumentKind::SlideDeck => {
            office::translate_office(input, output, kind, target, translator, config).await?
        }
        DocumentKind::Subtitle | DocumentKind::WebSubtitle => {
            subtitle::translate_subtitle(input, output, target, translator).await?
        }
        DocumentKind::PlainText => plain::translate_text_file(input, output, target, translator).await?,
        DocumentKind::Tabular => plain::translate_csv(input, output, target, translator).await?,
    };

    info!(
        "Done: {} span(s), {} translated, {} kept untranslated",
        stats.spans, stats.translated, stats.failed
    );
    Ok(stats)
}

/// Span-scoped translation: returns `None` on failure so the caller keeps
/// the original text and the walk continues.
pub(crate) async fn translate_span(
    translator: &dyn Translator,
    text: &str,
    target: &LanguageId,
    stats: &mut DocumentStats,
) -> Option<String> {
    stats.spans += 1;
    match translator.translate(text, target).await {
        Ok(translation) => {
            stats.translated += 1;
            Some(translation)
        }
        Err(e) => {
            stats.failed += 1;
            warn!("Span kept untranslated: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(
            DocumentKind::from_path(Path::new("report.docx")).unwrap(),
            DocumentKind::Word
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("DECK.PPTX")).unwrap(),
            DocumentKind::SlideDeck
        );
        assert!(DocumentKind::from_path(Path::new("movie.mkv")).is_err());
        assert!(DocumentKind::from_path(Path::new("noextension")).is_err());
    }

    #[test]
    fn test_output_naming_convention() {
        let target: LanguageId = "en".parse().unwrap();
        let path = output_path(Path::new("/tmp/laporan tahunan.docx"), &target, None).unwrap();
        assert_eq!(path, Path::new("/tmp/laporan tahunan_en.docx"));

        let redirected = output_path(
            Path::new("slides.pptx"),
            &target,
            Some(Path::new("/out")),
        )
        .unwrap();
        assert_eq!(redirected, Path::new("/out/slides_en.pptx"));
    }
}
