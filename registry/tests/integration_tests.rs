use std::fs;
use std::path::PathBuf;

use form_schema_registry::{
    DefinitionSource, FormBundle, FormDefinition, FormRegistry, FormService, Manifest,
    RegistryError, ServiceError,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path =
            std::env::temp_dir().join(format!("form_registry_test_{name}_{}", std::process::id()));
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

fn contact_form(id: u32) -> FormDefinition {
    FormDefinition {
        id,
        title: format!("Contact form {id}"),
        definition: "<label>Name</label>[text* your-name \"John\"]\n[submit \"Send\"]".to_string(),
    }
}

fn write_json_form(dir: &TempDir, name: &str, form: &FormDefinition) {
    fs::write(dir.join(name), serde_json::to_string_pretty(form).unwrap())
        .expect("failed to write form file");
}

// ---------------------------------------------------------------------------
// Directory and bundle loading
// ---------------------------------------------------------------------------

#[test]
fn test_directory_loading_mixed_formats() {
    let dir = TempDir::new("dir_mixed");
    write_json_form(&dir, "contact.json", &contact_form(1));
    fs::write(
        dir.join("feedback.yaml"),
        "id: 2\ntitle: Feedback\ndefinition: \"[textarea your-message]\"\n",
    )
    .unwrap();

    let registry = FormRegistry::from_dir(&dir.path).unwrap();
    assert_eq!(registry.len(), 2);
    assert!(registry.contains(1));
    assert_eq!(registry.get(2).unwrap().title, "Feedback");

    let ids: Vec<u32> = registry.forms().iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_directory_ignores_unrelated_files() {
    let dir = TempDir::new("dir_unrelated");
    write_json_form(&dir, "contact.json", &contact_form(1));
    fs::write(dir.join("notes.txt"), "not a form").unwrap();

    let registry = FormRegistry::from_dir(&dir.path).unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_invalid_definition_file_reports_path() {
    let dir = TempDir::new("dir_invalid");
    fs::write(dir.join("broken.json"), "{not json").unwrap();

    let err = FormRegistry::from_dir(&dir.path).unwrap_err();
    match err {
        RegistryError::InvalidDefinition { path, .. } => assert!(path.contains("broken.json")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bundle_loading() {
    let dir = TempDir::new("bundle");
    let bundle = FormBundle {
        bundle_version: Some("1".to_string()),
        forms: vec![contact_form(10), contact_form(11)],
    };
    let path = dir.join("forms.json");
    fs::write(&path, serde_json::to_string(&bundle).unwrap()).unwrap();

    let registry = FormRegistry::from_bundle(&path).unwrap();
    assert_eq!(registry.len(), 2);
    assert!(registry.contains(10) && registry.contains(11));
}

#[test]
fn test_builder_first_source_wins_per_id() {
    let primary = TempDir::new("chain_primary");
    let fallback = TempDir::new("chain_fallback");

    let mut shadowed = contact_form(1);
    shadowed.title = "Shadowed".to_string();
    write_json_form(&primary, "one.json", &contact_form(1));
    write_json_form(&fallback, "one.json", &shadowed);
    write_json_form(&fallback, "two.json", &contact_form(2));

    let registry = FormRegistry::builder()
        .from_dir(&primary.path)
        .from_dir(&fallback.path)
        .build()
        .unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(1).unwrap().title, "Contact form 1");
    assert_eq!(registry.get(2).unwrap().title, "Contact form 2");
    assert!(matches!(registry.source(), DefinitionSource::Multiple(_)));
}

#[test]
fn test_builder_skips_broken_sources() {
    let dir = TempDir::new("chain_broken");
    write_json_form(&dir, "one.json", &contact_form(1));

    let registry = FormRegistry::builder()
        .from_dir(dir.join("missing"))
        .from_dir(&dir.path)
        .build()
        .unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_builder_with_all_sources_broken() {
    let dir = TempDir::new("chain_all_broken");
    let err = FormRegistry::builder()
        .from_dir(dir.join("missing"))
        .from_bundle(dir.join("missing.json"))
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistryError::NoSourcesAvailable));
}

// ---------------------------------------------------------------------------
// Service endpoints
// ---------------------------------------------------------------------------

#[test]
fn test_service_lists_forms_ordered_by_id() {
    let dir = TempDir::new("svc_list");
    write_json_form(&dir, "b.json", &contact_form(5));
    write_json_form(&dir, "a.json", &contact_form(2));

    let service = FormService::new(FormRegistry::from_dir(&dir.path).unwrap());
    let summaries = service.list_forms().unwrap();
    let ids: Vec<u32> = summaries.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2, 5]);
}

#[test]
fn test_service_parses_known_form() {
    let dir = TempDir::new("svc_get");
    write_json_form(&dir, "contact.json", &contact_form(1));

    let service = FormService::new(FormRegistry::from_dir(&dir.path).unwrap());
    let schema = service.form_schema(1).unwrap();

    assert_eq!(schema.id, 1);
    assert_eq!(schema.title, "Contact form 1");
    assert_eq!(schema.elements.len(), 2);

    let field = schema.elements[0].as_field().unwrap();
    assert_eq!(field.name, "your-name");
    assert_eq!(field.label.as_deref(), Some("Name"));
    assert!(field.required);
    assert_eq!(field.default_value.as_deref(), Some("John"));
}

#[test]
fn test_service_unknown_id_is_not_found() {
    let dir = TempDir::new("svc_missing");
    write_json_form(&dir, "contact.json", &contact_form(1));

    let service = FormService::new(FormRegistry::from_dir(&dir.path).unwrap());
    assert_eq!(service.form_schema(99), Err(ServiceError::NotFound(99)));
}

#[test]
fn test_detached_service_is_provider_unavailable() {
    let service = FormService::detached();
    assert_eq!(service.list_forms(), Err(ServiceError::ProviderUnavailable));
    assert_eq!(service.form_schema(1), Err(ServiceError::ProviderUnavailable));
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

#[test]
fn test_manifest_round_trip_and_staleness() {
    let dir = TempDir::new("manifest");
    write_json_form(&dir, "one.json", &contact_form(1));
    write_json_form(&dir, "two.json", &contact_form(2));
    let registry = FormRegistry::from_dir(&dir.path).unwrap();

    let mut manifest = Manifest::new("0.1.0");
    manifest.record(registry.get(1).unwrap());
    assert_eq!(manifest.stale_ids(&registry), vec![2]);

    manifest.record(registry.get(2).unwrap());
    assert!(manifest.stale_ids(&registry).is_empty());

    let path = dir.join("manifest.json");
    manifest.save(&path).unwrap();
    let loaded = Manifest::load(&path).unwrap();
    assert!(loaded.contains(1));
    assert!(loaded.is_current(registry.get(2).unwrap()));
}
