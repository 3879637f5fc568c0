//! Office Open XML walkers (docx, xlsx, pptx).
//!
//! These formats are OPC zip containers. The archive is rewritten entry by
//! entry: only the XML parts carrying document text are transformed, all
//! other entries are copied through untouched, which keeps styles, layout,
//! media and relationships intact.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use super::{translate_span, DocumentKind, DocumentStats};
use crate::config::{DocumentConfig, SlideTextMode};
use crate::error::Result;
use crate::lang::LanguageId;
use crate::translate::Translator;

pub async fn translate_office(
    input: &Path,
    output: &Path,
    kind: DocumentKind,
    target: &LanguageId,
    translator: &dyn Translator,
    config: &DocumentConfig,
) -> Result<DocumentStats> {
    let bytes = tokio::fs::read(input).await?;
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut stats = DocumentStats::default();

    // Slide decks can keep the original next to the translation, but only
    // when configured to; replacement is the default.
    let slide_mode = if kind == DocumentKind::SlideDeck {
        config.slide_text
    } else {
        SlideTextMode::Replace
    };

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        let name = file.name().to_string();
        let options = FileOptions::default().compression_method(file.compression());

        if file.is_dir() {
            writer.add_directory(name, options)?;
            continue;
        }

        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        drop(file);

        let transformed = if carries_text(kind, &name) {
            match kind {
                DocumentKind::Word => {
                    translate_text_nodes(&data, b"w:t", target, translator, slide_mode, &mut stats)
                        .await?
                }
                DocumentKind::SlideDeck => {
                    translate_text_nodes(&data, b"a:t", target, translator, slide_mode, &mut stats)
                        .await?
                }
                DocumentKind::Spreadsheet => {
                    translate_cell_strings(&data, target, translator, &mut stats).await?
                }
                _ => unreachable!("carries_text only matches office kinds"),
            }
        } else {
            data
        };

        writer.start_file(name, options)?;
        writer.write_all(&transformed)?;
    }

    let bytes = writer.finish()?.into_inner();
    tokio::fs::write(output, bytes).await?;
    Ok(stats)
}

/// Which archive entries hold translatable document text.
///
/// Word: the main body (paragraphs, then tables, in document order) plus
/// headers and footers. Slides: the slide parts, in slide/shape/run order.
/// Spreadsheets: the shared-string table and per-sheet inline strings.
fn carries_text(kind: DocumentKind, name: &str) -> bool {
    if !name.ends_with(".xml") {
        return false;
    }
    match kind {
        DocumentKind::Word => {
            name == "word/document.xml"
                || name.starts_with("word/header")
                || name.starts_with("word/footer")
        }
        DocumentKind::SlideDeck => name.starts_with("ppt/slides/slide"),
        DocumentKind::Spreadsheet => {
            name == "xl/sharedStrings.xml" || name.starts_with("xl/worksheets/")
        }
        _ => false,
    }
}

/// Rewrite the character content of every `<tag>` element (`w:t` for Word,
/// `a:t` for slides), leaving the rest of the XML stream untouched.
async fn translate_text_nodes(
    xml: &[u8],
    tag: &[u8],
    target: &LanguageId,
    translator: &dyn Translator,
    mode: SlideTextMode,
    stats: &mut DocumentStats,
) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut buf = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if e.name().as_ref() == tag {
                    in_text = true;
                }
                writer.write_event(Event::Start(e.to_owned()))?;
            }
            Event::End(e) => {
                if e.name().as_ref() == tag {
                    in_text = false;
                }
                writer.write_event(Event::End(e.to_owned()))?;
            }
            Event::Text(e) if in_text => {
                let original = e.unescape()?.into_owned();
                let rewritten = rewrite_span(&original, target, translator, mode, stats).await;
                writer.write_event(Event::Text(BytesText::new(&rewritten)))?;
            }
            Event::Eof => break,
            event => writer.write_event(event.into_owned())?,
        }
        buf.clear();
    }

    Ok(writer.into_inner().into_inner())
}

/// Rewrite spreadsheet strings: `<t>` nodes inside shared-string (`si`) or
/// inline-string (`is`) containers. Other `<t>` elements (formulas etc.) are
/// left alone.
async fn translate_cell_strings(
    xml: &[u8],
    target: &LanguageId,
    translator: &dyn Translator,
    stats: &mut DocumentStats,
) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut buf = Vec::new();
    let mut string_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                match e.name().as_ref() {
                    b"si" | b"is" => string_depth += 1,
                    b"t" if string_depth > 0 => in_text = true,
                    _ => {}
                }
                writer.write_event(Event::Start(e.to_owned()))?;
            }
            Event::End(e) => {
                match e.name().as_ref() {
                    b"si" | b"is" => string_depth = string_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {}
                }
                writer.write_event(Event::End(e.to_owned()))?;
            }
            Event::Text(e) if in_text => {
                let original = e.unescape()?.into_owned();
                let rewritten =
                    rewrite_span(&original, target, translator, SlideTextMode::Replace, stats)
                        .await;
                writer.write_event(Event::Text(BytesText::new(&rewritten)))?;
            }
            Event::Eof => break,
            event => writer.write_event(event.into_owned())?,
        }
        buf.clear();
    }

    Ok(writer.into_inner().into_inner())
}

async fn rewrite_span(
    original: &str,
    target: &LanguageId,
    translator: &dyn Translator,
    mode: SlideTextMode,
    stats: &mut DocumentStats,
) -> String {
    if original.trim().is_empty() {
        return original.to_string();
    }
    match translate_span(translator, original, target, stats).await {
        Some(translation) => match mode {
            SlideTextMode::Replace => translation,
            SlideTextMode::Bilingual => format!("{} / {}", original, translation),
        },
        None => original.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FixedTranslator {
        map: HashMap<String, String>,
    }

    #[async_trait]
    impl Translator for FixedTranslator {
        async fn translate(&self, text: &str, _target: &LanguageId) -> Result<String> {
            Ok(self
                .map
                .get(text)
                .cloned()
                .unwrap_or_else(|| text.to_string()))
        }
    }

    fn fixed(pairs: &[(&str, &str)]) -> FixedTranslator {
        FixedTranslator {
            map: pairs
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        }
    }

    fn en() -> LanguageId {
        "en".parse().unwrap()
    }

    #[tokio::test]
    async fn test_docx_text_nodes_rewritten() {
        let xml = br#"<?xml version="1.0"?><w:document><w:p><w:r><w:t>selamat pagi</w:t></w:r></w:p><w:p><w:r><w:t></w:t></w:r></w:p></w:document>"#;
        let translator = fixed(&[("selamat pagi", "good morning")]);
        let mut stats = DocumentStats::default();
        let out = translate_text_nodes(
            xml,
            b"w:t",
            &en(),
            &translator,
            SlideTextMode::Replace,
            &mut stats,
        )
        .await
        .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("<w:t>good morning</w:t>"));
        assert_eq!(stats.spans, 1);
        assert_eq!(stats.translated, 1);
    }

    #[tokio::test]
    async fn test_non_text_markup_untouched() {
        let xml = br#"<w:document><w:pPr><w:jc w:val="center"/></w:pPr><w:t>halo</w:t></w:document>"#;
        let translator = fixed(&[("halo", "hello")]);
        let mut stats = DocumentStats::default();
        let out = translate_text_nodes(
            xml,
            b"w:t",
            &en(),
            &translator,
            SlideTextMode::Replace,
            &mut stats,
        )
        .await
        .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(r#"<w:jc w:val="center"/>"#));
        assert!(out.contains("<w:t>hello</w:t>"));
    }

    #[tokio::test]
    async fn test_bilingual_slide_mode_concatenates() {
        let xml = br#"<p:sld><p:sp><a:p><a:r><a:t>halo</a:t></a:r></a:p></p:sp></p:sld>"#;
        let translator = fixed(&[("halo", "hello")]);
        let mut stats = DocumentStats::default();
        let out = translate_text_nodes(
            xml,
            b"a:t",
            &en(),
            &translator,
            SlideTextMode::Bilingual,
            &mut stats,
        )
        .await
        .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("<a:t>halo / hello</a:t>"));
    }

    #[tokio::test]
    async fn test_xlsx_only_string_cells_rewritten() {
        let xml = br#"<sst><si><t>halo</t></si></sst>"#;
        let translator = fixed(&[("halo", "hello")]);
        let mut stats = DocumentStats::default();
        let out = translate_cell_strings(xml, &en(), &translator, &mut stats)
            .await
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("<t>hello</t>"));

        // A <t> outside si/is containers stays untouched.
        let xml = br#"<worksheet><f><t>halo</t></f></worksheet>"#;
        let mut stats = DocumentStats::default();
        let out = translate_cell_strings(xml, &en(), &translator, &mut stats)
            .await
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("<t>halo</t>"));
        assert_eq!(stats.spans, 0);
    }

    #[tokio::test]
    async fn test_docx_archive_round_trip() {
        use tempfile::tempdir;

        let document_xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document><w:body><w:p><w:r><w:t>halo dunia</w:t></w:r></w:p></w:body></w:document>"#;
        let rels = r#"<?xml version="1.0"?><Relationships/>"#;

        let dir = tempdir().unwrap();
        let input = dir.path().join("surat.docx");
        let output = dir.path().join("surat_en.docx");

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/document.xml", FileOptions::default())
            .unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.start_file("_rels/.rels", FileOptions::default()).unwrap();
        zip.write_all(rels.as_bytes()).unwrap();
        std::fs::write(&input, zip.finish().unwrap().into_inner()).unwrap();

        let translator = fixed(&[("halo dunia", "hello world")]);
        let stats = translate_office(
            &input,
            &output,
            DocumentKind::Word,
            &en(),
            &translator,
            &DocumentConfig::default(),
        )
        .await
        .unwrap();
        assert_eq!(stats.translated, 1);

        // Same entry count, untouched entries preserved byte for byte.
        let bytes = std::fs::read(&output).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut body = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut body)
            .unwrap();
        assert!(body.contains("<w:t>hello world</w:t>"));
        let mut rels_out = String::new();
        archive
            .by_name("_rels/.rels")
            .unwrap()
            .read_to_string(&mut rels_out)
            .unwrap();
        assert_eq!(rels_out, rels);
    }

    #[test]
    fn test_entry_selection() {
        assert!(carries_text(DocumentKind::Word, "word/document.xml"));
        assert!(carries_text(DocumentKind::Word, "word/header1.xml"));
        assert!(!carries_text(DocumentKind::Word, "word/styles.xml"));
        assert!(!carries_text(DocumentKind::Word, "word/media/image1.png"));
        assert!(carries_text(DocumentKind::SlideDeck, "ppt/slides/slide1.xml"));
        assert!(!carries_text(
            DocumentKind::SlideDeck,
            "ppt/slideLayouts/slideLayout1.xml"
        ));
        assert!(carries_text(DocumentKind::Spreadsheet, "xl/sharedStrings.xml"));
        assert!(carries_text(
            DocumentKind::Spreadsheet,
            "xl/worksheets/sheet1.xml"
        ));
    }
}
