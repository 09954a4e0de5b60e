use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PROBE_FILE: &str = ".write_probe";

/// Pick the first candidate directory that can be created and written to.
///
/// Each candidate is created if needed, then a throwaway file is written and
/// removed. If no candidate passes, `fallback` is created and returned
/// without probing.
pub async fn resolve_output_dir(candidates: &[PathBuf], fallback: &Path) -> Result<PathBuf> {
    for candidate in candidates {
        match probe(candidate).await {
            Ok(()) => {
                debug!(dir = %candidate.display(), "output directory is writable");
                return Ok(candidate.clone());
            }
            Err(e) => {
                debug!(dir = %candidate.display(), error = %e, "skipping output directory");
            }
        }
    }

    info!(dir = %fallback.display(), "no candidate directory writable, using fallback");
    tokio::fs::create_dir_all(fallback)
        .await
        .with_context(|| format!("failed to create directory: {}", fallback.display()))?;
    Ok(fallback.to_path_buf())
}

async fn probe(dir: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    let probe_path = dir.join(PROBE_FILE);
    tokio::fs::write(&probe_path, b"probe").await?;
    tokio::fs::remove_file(&probe_path).await
}
