mod common;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let config_path = dir.path().join("tools.toml");
    let config = format!(
        "[documents]\noutput_dirs = [{:?}]\nfallback_dir = {:?}\n",
        dir.path().join("static/generated_docs").display().to_string(),
        dir.path().join("data/uploads/lna").display().to_string(),
    );
    std::fs::write(&config_path, config).expect("write config");
    config_path
}

#[test]
fn test_help_shows_usage() {
    cargo_bin_cmd!("assistant-tools")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat assistant host"));
}

#[test]
fn test_version_shows_version() {
    cargo_bin_cmd!("assistant-tools")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("assistant-tools"));
}

#[test]
fn test_list_shows_every_tool() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    cargo_bin_cmd!("assistant-tools")
        .current_dir(tmp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("calculator")
                .and(predicate::str::contains("generate_word_document"))
                .and(predicate::str::contains("get_current_time"))
                .and(predicate::str::contains("get_current_weather"))
                .and(predicate::str::contains("get_user_name_and_email_and_id")),
        );
}

#[test]
fn test_list_json_includes_schemas() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    cargo_bin_cmd!("assistant-tools")
        .current_dir(tmp_dir.path())
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"equation\""));
}

#[test]
fn test_call_calculator() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    cargo_bin_cmd!("assistant-tools")
        .current_dir(tmp_dir.path())
        .args(["call", "calculator", "--params", r#"{"equation": "2+2"}"#])
        .assert()
        .success()
        .stdout("2+2 = 4\n");

    cargo_bin_cmd!("assistant-tools")
        .current_dir(tmp_dir.path())
        .args(["call", "calculator", "--params", r#"{"equation": "2+"}"#])
        .assert()
        .success()
        .stdout("Invalid equation\n");
}

#[test]
fn test_call_identity_with_user() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    cargo_bin_cmd!("assistant-tools")
        .current_dir(tmp_dir.path())
        .args([
            "call",
            "get_user_name_and_email_and_id",
            "--user",
            r#"{"name": "Ada", "email": "ada@example.com"}"#,
        ])
        .assert()
        .success()
        .stdout("User: Ada (Email: ada@example.com)\n");
}

#[test]
fn test_call_weather_without_key() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    cargo_bin_cmd!("assistant-tools")
        .current_dir(tmp_dir.path())
        .env_remove("OPENWEATHER_API_KEY")
        .args(["call", "get_current_weather", "--params", r#"{"city": "Oslo"}"#])
        .assert()
        .success()
        .stdout("API key is not set in the environment variable 'OPENWEATHER_API_KEY'.\n");
}

#[test]
fn test_call_generate_document() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    let config_path = write_config(&tmp_dir);

    cargo_bin_cmd!("assistant-tools")
        .current_dir(tmp_dir.path())
        .arg("--config")
        .arg(&config_path)
        .args([
            "call",
            "generate_word_document",
            "--params",
            r#"{"document_text": "Hello *world*", "file_name": "cli test"}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("cli_test.docx"));

    let path = tmp_dir.path().join("static/generated_docs/cli_test.docx");
    let xml = common::read_docx_part(&path, "word/document.xml");
    assert!(xml.contains(r#"<w:rPr><w:i/></w:rPr><w:t xml:space="preserve">world</w:t>"#));
}

#[test]
fn test_unknown_tool_fails_gracefully() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    cargo_bin_cmd!("assistant-tools")
        .current_dir(tmp_dir.path())
        .args(["call", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tool"));
}

#[test]
fn test_invalid_params_json_fails() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    cargo_bin_cmd!("assistant-tools")
        .current_dir(tmp_dir.path())
        .args(["call", "calculator", "--params", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--params must be valid JSON"));
}

#[test]
fn test_stdio_answers_requests() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    cargo_bin_cmd!("assistant-tools")
        .current_dir(tmp_dir.path())
        .arg("stdio")
        .write_stdin(concat!(
            r#"{"tool": "calculator", "params": {"equation": "6*7"}}"#,
            "\n",
            r#"{"tool": "get_user_name_and_email_and_id", "__user__": {"name": "Ada"}}"#,
            "\n"
        ))
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#"{"tool":"calculator","result":"6*7 = 42"}"#).and(
                predicate::str::contains(
                    r#"{"tool":"get_user_name_and_email_and_id","result":"User: Ada"}"#,
                ),
            ),
        );
}
