//! Manifest management for tracking definition bundle state.
//!
//! The manifest records per-form metadata so a serving layer can detect
//! when a stored definition changed underneath it: each entry carries the
//! SHA-256 checksum of the definition markup. A form should be re-parsed
//! when its checksum no longer matches the recorded value.
//!
//! # Examples
//!
//! ```no_run
//! use form_schema_registry::{FormDefinition, Manifest};
//!
//! let form = FormDefinition {
//!     id: 1,
//!     title: "Contact".to_string(),
//!     definition: "[text* your-name]".to_string(),
//! };
//!
//! let mut manifest = Manifest::new("0.1.0");
//! manifest.record(&form);
//! manifest.save("manifest.json").unwrap();
//!
//! let loaded = Manifest::load("manifest.json").unwrap();
//! assert!(loaded.is_current(&form));
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::loader::{FormDefinition, FormRegistry};

/// Metadata recorded for one form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormMetadata {
    /// Form title at record time.
    pub title: String,
    /// SHA-256 checksum (hex) of the definition markup.
    pub checksum: String,
    /// RFC 3339 timestamp of the record.
    pub recorded_at: String,
}

/// Tracks the recorded state of a set of form definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Version of the producing tool.
    pub manifest_version: String,
    /// RFC 3339 timestamp of manifest creation.
    pub generated_at: String,
    /// Per-form metadata keyed by form id.
    pub entries: HashMap<u32, FormMetadata>,
}

impl Manifest {
    /// Creates an empty manifest stamped with the current time.
    pub fn new(manifest_version: &str) -> Self {
        Self {
            manifest_version: manifest_version.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            entries: HashMap::new(),
        }
    }

    /// Records (or refreshes) the entry for a form.
    pub fn record(&mut self, form: &FormDefinition) {
        self.entries.insert(
            form.id,
            FormMetadata {
                title: form.title.clone(),
                checksum: definition_checksum(&form.definition),
                recorded_at: chrono::Utc::now().to_rfc3339(),
            },
        );
    }

    /// Whether an entry exists for the given id.
    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    /// Whether the recorded checksum still matches the form's markup.
    pub fn is_current(&self, form: &FormDefinition) -> bool {
        self.entries
            .get(&form.id)
            .is_some_and(|entry| entry.checksum == definition_checksum(&form.definition))
    }

    /// Ids in the registry whose definitions are unrecorded or stale,
    /// sorted ascending.
    pub fn stale_ids(&self, registry: &FormRegistry) -> Vec<u32> {
        let mut stale: Vec<u32> = registry
            .forms()
            .into_iter()
            .filter(|form| !self.is_current(form))
            .map(|form| form.id)
            .collect();
        stale.sort_unstable();
        stale
    }

    /// Writes the manifest as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), self)?;
        Ok(())
    }

    /// Reads a manifest written by [`Manifest::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}

/// SHA-256 checksum of a definition markup string, hex encoded.
pub fn definition_checksum(definition: &str) -> String {
    format!("{:x}", Sha256::digest(definition.as_bytes()))
}
