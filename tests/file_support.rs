//! Integration tests for binary manual formats (DOCX, PDF).
//!
//! DOCX paragraphs must come through as separate lines so section headers
//! are still detected; a corrupt PDF must fail the run without writing.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.push("manual-ingest");
    path
}

/// Minimal docx (ZIP) with one `<w:p>` per paragraph.
fn minimal_docx(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\"?><w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{}</w:body></w:document>",
        body
    );

    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
        zip.start_file(
            "word/document.xml",
            zip::write::SimpleFileOptions::default(),
        )
        .unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    buf
}

fn setup_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("config")).unwrap();

    let config_path = root.join("config/manual-ingest.toml");
    fs::write(
        &config_path,
        format!("[db]\npath = \"{}/data/manuals.sqlite\"\n", root.display()),
    )
    .unwrap();

    (tmp, config_path)
}

fn run(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(binary())
        .arg("--config")
        .arg(config_path)
        .args(args)
        .output()
        .unwrap();
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

#[test]
fn test_docx_sections_ingested() {
    let (tmp, config_path) = setup_env();
    let docx = tmp.path().join("manual2.docx");
    fs::write(
        &docx,
        minimal_docx(&[
            "1. Radio Protocol",
            "Use channel 4 for all yard traffic.",
            "2. Incident Reports",
            "File within one hour of the incident.",
        ]),
    )
    .unwrap();

    run(&config_path, &["init"]);
    let (stdout, stderr, success) = run(&config_path, &["ingest", docx.to_str().unwrap()]);
    assert!(success, "docx ingest failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("ingest manual2.docx"));
    assert!(stdout.contains("inserted: 2"));

    let (stdout, _, _) = run(&config_path, &["list", "--source", "manual2.docx", "--json"]);
    let entries: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(entries[0]["title"], "1. Radio Protocol");
    assert_eq!(entries[0]["content"], "Use channel 4 for all yard traffic.");
    assert_eq!(entries[0]["category"], "Dispatcher Training");
    assert_eq!(entries[1]["title"], "2. Incident Reports");
}

#[test]
fn test_corrupt_pdf_fails_without_writing() {
    let (tmp, config_path) = setup_env();
    let pdf = tmp.path().join("broken.pdf");
    fs::write(&pdf, b"this is not a pdf").unwrap();

    run(&config_path, &["init"]);
    let (_, stderr, success) = run(&config_path, &["ingest", pdf.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("PDF extraction failed"));

    let (stdout, _, _) = run(&config_path, &["list"]);
    assert!(stdout.contains("No entries found."));
}

#[test]
fn test_docx_without_document_xml_fails() {
    let (tmp, config_path) = setup_env();
    let path = tmp.path().join("empty.docx");
    {
        let file = fs::File::create(&path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("other.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.finish().unwrap();
    }

    run(&config_path, &["init"]);
    let (_, stderr, success) = run(&config_path, &["ingest", path.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("word/document.xml not found"));
}
