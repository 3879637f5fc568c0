//! Plain-text and tabular walkers.

use std::path::Path;

use tokio::fs;

use super::{translate_span, DocumentStats};
use crate::error::Result;
use crate::lang::LanguageId;
use crate::translate::Translator;

/// Translate a plain-text file line by line. Blank lines pass through, so
/// paragraph structure is preserved.
pub async fn translate_text_file(
    input: &Path,
    output: &Path,
    target: &LanguageId,
    translator: &dyn Translator,
) -> Result<DocumentStats> {
    let content = fs::read_to_string(input).await?;
    let mut stats = DocumentStats::default();
    let mut lines = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            lines.push(line.to_string());
            continue;
        }
        match translate_span(translator, line, target, &mut stats).await {
            Some(translation) => lines.push(translation),
            None => lines.push(line.to_string()),
        }
    }

    let mut rewritten = lines.join("\n");
    if content.ends_with('\n') {
        rewritten.push('\n');
    }
    fs::write(output, rewritten).await?;
    Ok(stats)
}

/// Translate a CSV file cell by cell, every row including the header.
/// Row and column counts are preserved; empty cells pass through.
pub async fn translate_csv(
    input: &Path,
    output: &Path,
    target: &LanguageId,
    translator: &dyn Translator,
) -> Result<DocumentStats> {
    let content = fs::read_to_string(input).await?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    let mut stats = DocumentStats::default();

    for record in reader.records() {
        let record = record?;
        let mut row = Vec::with_capacity(record.len());
        for cell in record.iter() {
            if cell.trim().is_empty() {
                row.push(cell.to_string());
                continue;
            }
            match translate_span(translator, cell, target, &mut stats).await {
                Some(translation) => row.push(translation),
                None => row.push(cell.to_string()),
            }
        }
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    fs::write(output, bytes).await?;
    Ok(stats)
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

    fn en() -> LanguageId {
        "en".parse().unwrap()
    }

    #[tokio::test]
    async fn test_text_file_preserves_blank_lines() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("note.txt");
        let output = dir.path().join("note_en.txt");
        fs::write(&input, "halo\n\ndunia\n").await.unwrap();

        let stats = translate_text_file(&input, &output, &en(), &UppercaseTranslator)
            .await
            .unwrap();

        let result = fs::read_to_string(&output).await.unwrap();
        assert_eq!(result, "HALO\n\nDUNIA\n");
        assert_eq!(stats.spans, 2);
    }

    #[tokio::test]
    async fn test_csv_cell_by_cell() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("table.csv");
        let output = dir.path().join("table_en.csv");
        fs::write(&input, "kota,negara\njakarta,indonesia\n")
            .await
            .unwrap();

        let stats = translate_csv(&input, &output, &en(), &UppercaseTranslator)
            .await
            .unwrap();

        let result = fs::read_to_string(&output).await.unwrap();
        assert_eq!(result, "KOTA,NEGARA\nJAKARTA,INDONESIA\n");
        assert_eq!(stats.spans, 4);
        assert_eq!(result.lines().count(), 2);
    }
}
