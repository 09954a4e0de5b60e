use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use regex::Regex;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{info, warn};

use super::output_dir::resolve_output_dir;
use super::{Tool, optional_str};
use crate::config::DocumentConfig;
use crate::context::UserContext;
use crate::docx::{self, Alignment, Document, Paragraph, Run};

const TITLE_SIZE_PT: u32 = 16;
const EXTENSION: &str = "docx";

static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid filename pattern"));
static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid separator pattern"));

/// Reduce `name` to word characters joined by underscores: `"My Report?!"` → `"My_Report"`
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned = DISALLOWED_CHARS.replace_all(name, "");
    SEPARATOR_RUNS
        .replace_all(cleaned.trim(), "_")
        .into_owned()
}

/// A document written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub file_name: String,
    pub path: PathBuf,
    /// Web-relative download URL when the file landed in a served directory
    pub url: Option<String>,
}

impl GeneratedDocument {
    /// Status text for the host
    pub fn message(&self) -> String {
        match &self.url {
            Some(url) => format!(
                "Document created and saved successfully!\n\n\
                 File name: {}\n\n\
                 Download link:\n{}\n\n\
                 Try opening this link in your browser. If it does not work, the file is on the server at: {}",
                self.file_name,
                url,
                self.path.display()
            ),
            None => format!(
                "Document created and saved successfully!\n\n\
                 File name: {}\n\
                 Server path: {}\n\n\
                 The document is stored on the server. To enable web downloads, ask an administrator to serve this directory.",
                self.file_name,
                self.path.display()
            ),
        }
    }
}

/// Tool generating a Word document from lightly formatted text
pub struct DocumentTool {
    config: DocumentConfig,
}

impl DocumentTool {
    pub fn new(config: DocumentConfig) -> Self {
        Self { config }
    }

    /// Lay out, package and save a document
    pub async fn generate(
        &self,
        text: &str,
        title: &str,
        file_name: Option<&str>,
        user: Option<&UserContext>,
    ) -> Result<GeneratedDocument> {
        let dir = resolve_output_dir(&self.config.output_dirs, &self.config.fallback_dir).await?;

        let now = Local::now();
        let file_name = format!("{}.{}", file_stem(title, file_name, &now), EXTENSION);
        let path = dir.join(&file_name);

        let user_name = user.and_then(|u| u.name.as_deref());
        let document = build_document(text, title, user_name, &now);
        let bytes = docx::to_bytes(&document).context("failed to package document")?;

        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;

        let url = self.download_url(&dir, &file_name);
        info!(path = %path.display(), web = url.is_some(), "document generated");

        Ok(GeneratedDocument {
            file_name,
            path,
            url,
        })
    }

    fn download_url(&self, dir: &Path, file_name: &str) -> Option<String> {
        if dir.to_string_lossy().contains("static") {
            Some(format!(
                "{}/{}",
                self.config.static_url_prefix.trim_end_matches('/'),
                file_name
            ))
        } else {
            None
        }
    }
}

/// Explicit names are used as given (sanitized); otherwise title plus timestamp
fn file_stem(title: &str, file_name: Option<&str>, now: &DateTime<Local>) -> String {
    if let Some(name) = file_name.filter(|n| !n.is_empty()) {
        let safe = sanitize_file_name(name);
        if !safe.is_empty() {
            return safe;
        }
        warn!(file_name = name, "file name has no usable characters, deriving from title");
    }

    let safe_title = sanitize_file_name(title);
    let safe_title = if safe_title.is_empty() {
        "document".to_string()
    } else {
        safe_title
    };
    format!("{}_{}", safe_title, now.format("%Y%m%d_%H%M%S"))
}

fn build_document(
    text: &str,
    title: &str,
    user_name: Option<&str>,
    now: &DateTime<Local>,
) -> Document {
    let mut document = Document::new();
    document.title = Some(title.to_string());
    document.creator = user_name.map(str::to_string);
    document.created = Some(now.with_timezone(&Utc));

    document.add_paragraph(
        Paragraph::new()
            .aligned(Alignment::Center)
            .with_run(Run::text(title).bold().size(TITLE_SIZE_PT)),
    );
    document.add_paragraph(Paragraph::new());
    document.extend(docx::layout(text));

    let mut footer = format!("Generated on {}", now.format("%d.%m.%Y %H:%M"));
    if let Some(name) = user_name {
        footer.push_str(&format!(" | User: {}", name));
    }
    document.footer = Some(
        Paragraph::new()
            .aligned(Alignment::Right)
            .with_run(Run::text(footer)),
    );

    document
}

#[async_trait]
impl Tool for DocumentTool {
    fn name(&self) -> &str {
        "generate_word_document"
    }

    fn description(&self) -> &str {
        "Generate and save a Word document with the provided text content. \
         The document will be saved on the server and a download link will be provided."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "document_text": {
                    "type": "string",
                    "description": "The text content to save in the Word document."
                },
                "document_title": {
                    "type": "string",
                    "description": "The title of the document.",
                    "default": self.config.default_title
                },
                "file_name": {
                    "type": "string",
                    "description": "Optional custom filename (without extension). If not provided, auto-generated based on title and timestamp.",
                    "default": ""
                }
            },
            "required": ["document_text"]
        })
    }

    async fn execute(&self, params: Value, user: Option<&UserContext>) -> Result<String> {
        let text = params["document_text"]
            .as_str()
            .context("missing 'document_text' parameter")?;
        let title =
            optional_str(&params, "document_title").unwrap_or(self.config.default_title.as_str());
        let file_name = optional_str(&params, "file_name");

        match self.generate(text, title, file_name, user).await {
            Ok(generated) => Ok(generated.message()),
            Err(e) => {
                warn!(error = %e, "document generation failed");
                Ok(format!("Error generating Word document: {:#}", e))
            }
        }
    }
}
