use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where generated documents are written and how they are linked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Candidate output directories, probed in order
    pub output_dirs: Vec<PathBuf>,

    /// Used when no candidate is writable
    pub fallback_dir: PathBuf,

    /// URL prefix under which web-served output directories are reachable
    pub static_url_prefix: String,

    /// Title used when the caller gives none
    pub default_title: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            output_dirs: vec![
                PathBuf::from("static/generated_docs"),
                PathBuf::from("backend/open_webui/static/generated_docs"),
                PathBuf::from("open_webui/static/generated_docs"),
                PathBuf::from("/app/backend/open_webui/static/generated_docs"),
            ],
            fallback_dir: PathBuf::from("data/uploads/lna"),
            static_url_prefix: "/static/generated_docs".to_string(),
            default_title: "Untitled Document".to_string(),
        }
    }
}
