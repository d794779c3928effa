use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path =
            std::env::temp_dir().join(format!("formscan_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Minimal form definition JSON for seeding tests.
fn write_form(dir: &TempDir, id: u32, title: &str) -> PathBuf {
    let json = serde_json::json!({
        "id": id,
        "title": title,
        "definition": "<label>Name</label>[text* your-name \"John\"]\n[submit \"Send\"]",
    });
    let path = dir.join(&format!("form-{id}.json"));
    fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).expect("failed to write form");
    path
}

#[test]
fn test_list_outputs_id_title_pairs() {
    let dir = TempDir::new("list");
    write_form(&dir, 1, "Contact");
    write_form(&dir, 2, "Feedback");

    let out = Command::new(env!("CARGO_BIN_EXE_formscan"))
        .args(["list", "--forms-dir"])
        .arg(&dir.path)
        .output()
        .expect("failed to run formscan");
    assert!(out.status.success());

    let listed: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        listed,
        serde_json::json!([
            {"id": 1, "title": "Contact"},
            {"id": 2, "title": "Feedback"},
        ])
    );
}

#[test]
fn test_get_prints_parsed_schema() {
    let dir = TempDir::new("get");
    write_form(&dir, 7, "Contact");

    let out = Command::new(env!("CARGO_BIN_EXE_formscan"))
        .args(["get", "7", "--forms-dir"])
        .arg(&dir.path)
        .output()
        .expect("failed to run formscan");
    assert!(out.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(schema["id"], 7);
    assert_eq!(schema["title"], "Contact");
    assert_eq!(schema["elements"][0]["type"], "field");
    assert_eq!(schema["elements"][0]["label"], "Name");
    assert_eq!(schema["elements"][1]["type"], "submit");
}

#[test]
fn test_get_unknown_id_exits_not_found() {
    let dir = TempDir::new("get_missing");
    write_form(&dir, 1, "Contact");

    let out = Command::new(env!("CARGO_BIN_EXE_formscan"))
        .args(["get", "42", "--forms-dir"])
        .arg(&dir.path)
        .output()
        .expect("failed to run formscan");
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("no form with id 42"));
}

#[test]
fn test_no_source_is_provider_unavailable() {
    let out = Command::new(env!("CARGO_BIN_EXE_formscan"))
        .args(["list"])
        .output()
        .expect("failed to run formscan");
    assert_eq!(out.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&out.stderr).contains("not available"));
}

#[test]
fn test_parse_file_without_registry() {
    let dir = TempDir::new("parse");
    let path = dir.join("definition.txt");
    fs::write(&path, "intro [select menu include_blank \"A|a\"] [submit]").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_formscan"))
        .args(["parse"])
        .arg(&path)
        .output()
        .expect("failed to run formscan");
    assert!(out.status.success());

    let elements: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(elements[0]["type"], "text_block");
    assert_eq!(elements[1]["type"], "field");
    assert_eq!(elements[1]["options"][0]["label"], "---");
    assert_eq!(elements[2], serde_json::json!({"type": "submit", "label": "Send"}));
}

#[test]
fn test_parse_yaml_output() {
    let dir = TempDir::new("parse_yaml");
    let path = dir.join("definition.txt");
    fs::write(&path, "[text* your-name]").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_formscan"))
        .args(["parse", "--format", "yaml"])
        .arg(&path)
        .output()
        .expect("failed to run formscan");
    assert!(out.status.success());

    let rendered = String::from_utf8_lossy(&out.stdout);
    assert!(rendered.contains("type: field"));
    assert!(rendered.contains("name: your-name"));
}

#[test]
fn test_export_writes_per_form_files() {
    let dir = TempDir::new("export");
    write_form(&dir, 1, "Contact");
    write_form(&dir, 2, "Feedback");
    let out_dir = dir.join("schemas");

    let out = Command::new(env!("CARGO_BIN_EXE_formscan"))
        .args(["export", "--forms-dir"])
        .arg(&dir.path)
        .arg("--output")
        .arg(&out_dir)
        .args(["--jobs", "2"])
        .output()
        .expect("failed to run formscan");
    assert!(out.status.success());

    for id in [1, 2] {
        let written = fs::read_to_string(out_dir.join(format!("{id}.json"))).unwrap();
        let schema: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(schema["id"], id);
        assert!(schema["elements"].is_array());
    }
}
