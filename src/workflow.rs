use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::document::{self, DocumentKind};
use crate::error::{Result, TerjemahError};
use crate::lang::LanguageId;
use crate::session::Session;
use crate::translate::TranslatorFactory;

/// Top-level orchestration: owns the configuration and the session state
/// and drives text, single-file and directory translation.
pub struct Workflow {
    config: Config,
    session: Session,
}

impl Workflow {
    pub fn new(config: Config, session: Session) -> Self {
        Self { config, session }
    }

    /// Translate a single text span.
    pub async fn translate_text(&self, text: &str, target: &LanguageId) -> Result<String> {
        let translator = TranslatorFactory::create_translator(&self.config, &self.session);
        translator.translate(text, target).await
    }

    /// Translate one document into each target language.
    ///
    /// Returns the written output paths, named
    /// `{originalBaseName}_{targetLang}.{extension}`.
    pub async fn translate_file(
        &self,
        input: &Path,
        targets: &[LanguageId],
        output_dir: Option<&Path>,
    ) -> Result<Vec<PathBuf>> {
        if !input.exists() {
            return Err(TerjemahError::FileNotFound(input.display().to_string()));
        }
        if let Some(dir) = output_dir {
            fs::create_dir_all(dir).await?;
        }

        let translator = TranslatorFactory::create_translator(&self.config, &self.session);
        let mut outputs = Vec::with_capacity(targets.len());
        for target in targets {
            let output = document::output_path(input, target, output_dir)?;
            document::translate_file(
                input,
                &output,
                target,
                translator.as_ref(),
                &self.config.document,
            )
            .await?;
            outputs.push(output);
        }
        Ok(outputs)
    }

    /// Translate every supported document under a directory.
    ///
    /// Failures are isolated per file: one bad document is logged and
    /// skipped, the rest of the batch still runs.
    pub async fn translate_directory(
        &self,
        input_dir: &Path,
        targets: &[LanguageId],
        output_dir: Option<&Path>,
    ) -> Result<()> {
        if !input_dir.is_dir() {
            return Err(TerjemahError::Config(
                "Input path is not a directory".to_string(),
            ));
        }

        let mut documents = Vec::new();
        for entry in WalkDir::new(input_dir).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file()
                && DocumentKind::from_path(entry.path()).is_ok()
            {
                documents.push(entry.path().to_path_buf());
            }
        }

        info!("Found {} document(s) to translate", documents.len());
        let progress = ProgressBar::new(documents.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .expect("static progress template is valid"),
        );

        for path in documents {
            progress.set_message(
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );
            match self.translate_file(&path, targets, output_dir).await {
                Ok(outputs) => {
                    info!("Translated {} into {} file(s)", path.display(), outputs.len())
                }
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        Ok(())
    }
}
