mod common;

use assistant_tools::UserContext;
use serde_json::json;
use tempfile::TempDir;

use common::{create_test_registry, docx_files, read_docx_part};

#[tokio::test]
async fn test_registry_exposes_all_tools() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    let registry = create_test_registry(tmp_dir.path());

    assert_eq!(
        registry.names(),
        vec![
            "calculator",
            "generate_word_document",
            "get_current_time",
            "get_current_weather",
            "get_user_name_and_email_and_id",
        ]
    );

    for tool in registry.all() {
        let schema = tool.schema();
        assert_eq!(schema["type"], "object", "{} schema", tool.name());
        let properties = schema["properties"].as_object().expect("properties");
        assert!(!properties.contains_key("__user__"));
        assert!(!properties.contains_key("user"));
    }
}

#[tokio::test]
async fn test_identity_uses_injected_user() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    let registry = create_test_registry(tmp_dir.path());

    let user = UserContext::new()
        .with_name("Ada")
        .with_id("42")
        .with_email("ada@example.com");
    let output = registry
        .invoke("get_user_name_and_email_and_id", json!({}), Some(&user))
        .await;
    assert_eq!(output, "User: Ada (ID: 42) (Email: ada@example.com)");

    let output = registry
        .invoke("get_user_name_and_email_and_id", json!({}), None)
        .await;
    assert_eq!(output, "User: Unknown");
}

#[tokio::test]
async fn test_calculator_through_registry() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    let registry = create_test_registry(tmp_dir.path());

    let output = registry
        .invoke("calculator", json!({"equation": "2+2"}), None)
        .await;
    assert_eq!(output, "2+2 = 4");

    let output = registry
        .invoke("calculator", json!({"equation": "2+"}), None)
        .await;
    assert_eq!(output, "Invalid equation");
}

#[tokio::test]
async fn test_clock_through_registry() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    let registry = create_test_registry(tmp_dir.path());

    let output = registry.invoke("get_current_time", json!({}), None).await;
    assert!(output.starts_with("Current Date and Time = "));
    assert!(output.ends_with(" AM") || output.ends_with(" PM"));
}

#[tokio::test]
async fn test_weather_without_key_reports_configuration_error() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    let registry = create_test_registry(tmp_dir.path());

    let output = registry
        .invoke("get_current_weather", json!({"city": "Berlin"}), None)
        .await;
    assert_eq!(
        output,
        format!(
            "API key is not set in the environment variable '{}'.",
            common::UNSET_KEY_ENV
        )
    );
}

#[tokio::test]
async fn test_generate_document_with_heading_and_bold_text() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    let registry = create_test_registry(tmp_dir.path());
    let user = UserContext::new().with_name("Ada");

    let output = registry
        .invoke(
            "generate_word_document",
            json!({
                "document_text": "# Heading\n\nSome **bold** text",
                "document_title": "Report"
            }),
            Some(&user),
        )
        .await;

    let out_dir = tmp_dir.path().join("static/generated_docs");
    let files = docx_files(&out_dir);
    assert_eq!(files.len(), 1);
    let file_name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("Report_"));
    assert!(file_name.ends_with(".docx"));
    assert!(output.contains(&file_name));
    assert!(output.contains(&format!("/static/generated_docs/{}", file_name)));

    let xml = read_docx_part(&files[0], "word/document.xml");
    assert!(xml.contains(
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t xml:space="preserve">Heading</w:t></w:r></w:p>"#
    ));
    assert!(xml.contains(concat!(
        r#"<w:r><w:t xml:space="preserve">Some </w:t></w:r>"#,
        r#"<w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">bold</w:t></w:r>"#,
        r#"<w:r><w:t xml:space="preserve"> text</w:t></w:r>"#
    )));
    assert!(xml.contains(
        r#"<w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/><w:sz w:val="32"/></w:rPr><w:t xml:space="preserve">Report</w:t>"#
    ));

    let footer = read_docx_part(&files[0], "word/footer1.xml");
    assert!(footer.contains("Generated on "));
    assert!(footer.contains(" | User: Ada"));

    let core = read_docx_part(&files[0], "docProps/core.xml");
    assert!(core.contains("<dc:title>Report</dc:title>"));
    assert!(core.contains("<dc:creator>Ada</dc:creator>"));
}

#[tokio::test]
async fn test_generate_document_with_explicit_file_name() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    let registry = create_test_registry(tmp_dir.path());

    let output = registry
        .invoke(
            "generate_word_document",
            json!({
                "document_text": "plain body",
                "file_name": "My Report?!"
            }),
            None,
        )
        .await;

    let path = tmp_dir.path().join("static/generated_docs/My_Report.docx");
    assert!(path.is_file());
    assert!(output.contains("My_Report.docx"));

    let xml = read_docx_part(&path, "word/document.xml");
    assert!(xml.contains("Untitled Document"));
}

#[tokio::test]
async fn test_generate_document_falls_back_to_data_directory() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    // occupy the static path with a file so it cannot become a directory
    std::fs::write(tmp_dir.path().join("static"), "not a dir").expect("write blocker");
    let registry = create_test_registry(tmp_dir.path());

    let output = registry
        .invoke(
            "generate_word_document",
            json!({"document_text": "body", "file_name": "notes"}),
            None,
        )
        .await;

    let path = tmp_dir.path().join("data/uploads/lna/notes.docx");
    assert!(path.is_file());
    assert!(output.contains("notes.docx"));
    assert!(output.contains(&path.display().to_string()));
    assert!(!output.contains("/static/generated_docs/"));
}

#[tokio::test]
async fn test_missing_document_text_is_reported() {
    let tmp_dir = TempDir::new().expect("create temp dir");
    let registry = create_test_registry(tmp_dir.path());

    let output = registry
        .invoke("generate_word_document", json!({}), None)
        .await;
    assert!(output.contains("missing 'document_text' parameter"));
}
