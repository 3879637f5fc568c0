//! Subtitle walkers (SRT, WebVTT).
//!
//! Line-by-line traversal: cue indices, timestamp lines and format headers
//! are copied through untouched, only caption text lines are translated.
//! Line structure is preserved, so the cue count of the output matches the
//! input.

use std::path::Path;

use tokio::fs;

use super::{translate_span, DocumentStats};
use crate::error::Result;
use crate::lang::LanguageId;
use crate::translate::Translator;

pub async fn translate_subtitle(
    input: &Path,
    output: &Path,
    target: &LanguageId,
    translator: &dyn Translator,
) -> Result<DocumentStats> {
    let content = fs::read_to_string(input).await?;
    let mut stats = DocumentStats::default();
    let mut lines = Vec::new();

    for line in content.lines() {
        if is_caption_text(line) {
            match translate_span(translator, line, target, &mut stats).await {
                Some(translation) => lines.push(translation),
                None => lines.push(line.to_string()),
            }
        } else {
            lines.push(line.to_string());
        }
    }

    let mut rewritten = lines.join("\n");
    if content.ends_with('\n') {
        rewritten.push('\n');
    }
    fs::write(output, rewritten).await?;
    Ok(stats)
}

/// Whether a subtitle line carries caption text rather than cue plumbing.
fn is_caption_text(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    // Timestamp lines in both SRT and VTT.
    if trimmed.contains("-->") {
        return false;
    }
    // SRT cue indices (and bare VTT cue identifiers that are numeric).
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    // WebVTT headers and block keywords.
    if trimmed == "WEBVTT"
        || trimmed.starts_with("WEBVTT ")
        || trimmed.starts_with("NOTE")
        || trimmed.starts_with("STYLE")
        || trimmed.starts_with("REGION")
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::tempdir;

    struct UppercaseTranslator;

    #[async_trait]
    impl Translator for UppercaseTranslator {
        async fn translate(&self, text: &str, _target: &LanguageId) -> Result<String> {
            Ok(text.to_uppercase())
        }
    }

    #[test]
    fn test_caption_line_filter() {
        assert!(!is_caption_text("1"));
        assert!(!is_caption_text("00:00:01,000 --> 00:00:04,000"));
        assert!(!is_caption_text("00:00:01.000 --> 00:00:04.000"));
        assert!(!is_caption_text(""));
        assert!(!is_caption_text("WEBVTT"));
        assert!(!is_caption_text("NOTE internal comment"));
        assert!(is_caption_text("Selamat pagi semua"));
    }

    #[tokio::test]
    async fn test_srt_structure_preserved() {
        let srt = "1\n00:00:01,000 --> 00:00:04,000\nselamat pagi\n\n2\n00:00:05,000 --> 00:00:08,000\nterima kasih\n";
        let dir = tempdir().unwrap();
        let input = dir.path().join("movie.srt");
        let output = dir.path().join("movie_en.srt");
        fs::write(&input, srt).await.unwrap();

        let target: LanguageId = "en".parse().unwrap();
        let stats = translate_subtitle(&input, &output, &target, &UppercaseTranslator)
            .await
            .unwrap();

        let result = fs::read_to_string(&output).await.unwrap();
        assert_eq!(stats.spans, 2);
        assert_eq!(result.lines().count(), srt.lines().count());
        assert!(result.contains("SELAMAT PAGI"));
        assert!(result.contains("00:00:01,000 --> 00:00:04,000"));
        assert!(result.starts_with("1\n"));
    }

    #[tokio::test]
    async fn test_vtt_header_untouched() {
        let vtt = "WEBVTT\n\n00:00:01.000 --> 00:00:04.000\nhalo dunia\n";
        let dir = tempdir().unwrap();
        let input = dir.path().join("clip.vtt");
        let output = dir.path().join("clip_en.vtt");
        fs::write(&input, vtt).await.unwrap();

        let target: LanguageId = "en".parse().unwrap();
        translate_subtitle(&input, &output, &target, &UppercaseTranslator)
            .await
            .unwrap();

        let result = fs::read_to_string(&output).await.unwrap();
        assert!(result.starts_with("WEBVTT\n"));
        assert!(result.contains("HALO DUNIA"));
    }
}
