#![allow(dead_code)]

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use assistant_tools::{DocumentConfig, ToolRegistry, ToolsConfig, WeatherConfig, default_registry};
use zip::ZipArchive;

/// Environment variable that is never set, so weather calls report a missing key.
pub const UNSET_KEY_ENV: &str = "ASSISTANT_TOOLS_E2E_UNSET_WEATHER_KEY";

/// Configuration writing documents under `root`.
pub fn test_config(root: &Path) -> ToolsConfig {
    ToolsConfig {
        weather: WeatherConfig {
            api_key_env: UNSET_KEY_ENV.to_string(),
            ..WeatherConfig::default()
        },
        documents: DocumentConfig {
            output_dirs: vec![root.join("static/generated_docs")],
            fallback_dir: root.join("data/uploads/lna"),
            ..DocumentConfig::default()
        },
    }
}

/// Registry with every tool, isolated to `root`.
pub fn create_test_registry(root: &Path) -> ToolRegistry {
    default_registry(&test_config(root)).expect("create registry")
}

/// All `.docx` files directly inside `dir`.
pub fn docx_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("read output dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "docx"))
        .collect();
    files.sort();
    files
}

/// Read one XML part out of a `.docx` file.
pub fn read_docx_part(path: &Path, part: &str) -> String {
    let bytes = std::fs::read(path).expect("read docx");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("open zip");
    let mut file = archive.by_name(part).expect("part exists");
    let mut content = String::new();
    file.read_to_string(&mut content).expect("read part");
    content
}
