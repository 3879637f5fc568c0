//! Terjemah - Document Translation Workflow
//!
//! Translates the textual content of txt, csv, docx, xlsx, pptx, srt and
//! vtt files into a target language, using either an external translation
//! backend or a locally trained per-language-pair classifier (a clearly
//! labeled demo mode, not real machine translation). A user-supplied
//! bidirectional dictionary is applied word by word before any backend call.

pub mod cli;
pub mod config;
pub mod dictionary;
pub mod document;
pub mod error;
pub mod lang;
pub mod model;
pub mod session;
pub mod translate;
pub mod workflow;
