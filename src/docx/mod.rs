//! Minimal WordprocessingML documents.
//!
//! [`model`] holds an in-memory document (headings, paragraphs, runs, a
//! footer), [`markup`] lays out plain text with a small markdown-like subset,
//! and [`package`] writes the result as a `.docx` zip container.

pub mod markup;
pub mod model;
pub mod package;

pub use markup::{inline_runs, layout};
pub use model::{Alignment, Block, Document, Paragraph, Run};
pub use package::{to_bytes, write_docx};

/// Errors raised while writing a document package
#[derive(Debug, thiserror::Error)]
pub enum DocxError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
