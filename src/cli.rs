use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a text snippet
    Text {
        /// Text to translate
        text: String,

        /// Target language code (e.g. en, id, ms)
        #[arg(short, long)]
        target_lang: String,

        /// Dictionary CSV files (paired columns, header row)
        #[arg(short, long)]
        dict: Vec<PathBuf>,

        /// Training CSV files for the classifier demo mode
        /// (language-code headers)
        #[arg(long)]
        train: Vec<PathBuf>,

        /// Source language for classifier lookups (identified when omitted)
        #[arg(short, long)]
        source_lang: Option<String>,

        /// Translation mode: auto, remote, classifier
        #[arg(long, default_value = "auto")]
        mode: String,
    },

    /// Translate a document file (docx, xlsx, pptx, srt, vtt, txt, csv)
    Document {
        /// Input document
        #[arg(short, long)]
        input: PathBuf,

        /// Target language codes (comma-separated)
        #[arg(short, long, default_value = "en")]
        target_langs: String,

        /// Output directory (next to the input when omitted)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Dictionary CSV files
        #[arg(short, long)]
        dict: Vec<PathBuf>,

        /// Training CSV files for the classifier demo mode
        #[arg(long)]
        train: Vec<PathBuf>,

        /// Translation mode: auto, remote, classifier
        #[arg(long, default_value = "auto")]
        mode: String,

        /// Write slide text as "original / translated" instead of replacing
        #[arg(long)]
        bilingual_slides: bool,
    },

    /// Translate every supported document in a directory
    Batch {
        /// Input directory
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Target language codes (comma-separated)
        #[arg(short, long, default_value = "en")]
        target_langs: String,

        /// Output directory (next to each input when omitted)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Dictionary CSV files
        #[arg(short, long)]
        dict: Vec<PathBuf>,

        /// Training CSV files for the classifier demo mode
        #[arg(long)]
        train: Vec<PathBuf>,

        /// Translation mode: auto, remote, classifier
        #[arg(long, default_value = "auto")]
        mode: String,

        /// Write slide text as "original / translated" instead of replacing
        #[arg(long)]
        bilingual_slides: bool,
    },

    /// Train classifiers from CSV files and report per-pair statistics
    Train {
        /// Training CSV files (language-code headers)
        files: Vec<PathBuf>,
    },

    /// Identify the language of a text snippet
    Detect {
        /// Text to identify
        text: String,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination path
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },
}
