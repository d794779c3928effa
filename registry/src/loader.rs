//! Form definition loading with builder pattern and fallback chains.
//!
//! Provides [`FormRegistry`] for in-memory definition lookup and
//! [`RegistryBuilder`] for constructing a registry from multiple sources.
//! Definitions live one per file (JSON or YAML) in a directory, or many per
//! file in a single bundle document.
//!
//! # Loading patterns
//!
//! ```no_run
//! use form_schema_registry::FormRegistry;
//!
//! // Load from a directory of definition files
//! let registry = FormRegistry::from_dir("forms/").unwrap();
//! assert!(registry.get(1).is_some());
//!
//! // Use the builder for a fallback chain
//! let registry = FormRegistry::builder()
//!     .from_dir("forms/")
//!     .from_bundle("forms-bundle.json")
//!     .build()
//!     .unwrap();
//! ```
//!
//! All lookups are O(1) via the internal map.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{RegistryError, Result};

/// A stored form definition: identity plus the raw markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Numeric form id, unique within a registry.
    pub id: u32,
    /// Human-readable form title.
    pub title: String,
    /// The raw form-definition markup.
    pub definition: String,
}

/// A bundle document holding many definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormBundle {
    /// Optional bundle format version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_version: Option<String>,
    /// Contained definitions.
    pub forms: Vec<FormDefinition>,
}

/// Describes where a [`FormRegistry`] was loaded from.
#[derive(Debug, Clone)]
pub enum DefinitionSource {
    /// Loaded from a directory of individual definition files.
    Directory(PathBuf),
    /// Loaded from a single [`FormBundle`] file.
    Bundle(PathBuf),
    /// Loaded via a chain of multiple sources.
    Multiple(Vec<DefinitionSource>),
}

/// In-memory collection of form definitions with O(1) lookup by id.
#[derive(Debug)]
pub struct FormRegistry {
    forms: HashMap<u32, FormDefinition>,
    source: DefinitionSource,
}

impl FormRegistry {
    /// Returns a new [`RegistryBuilder`] for configuring a source chain.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Loads every `.json`/`.yaml`/`.yml` definition file in a directory.
    ///
    /// Files are read in sorted name order; a duplicate id within the
    /// directory is overwritten by the later file.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("json" | "yaml" | "yml")
                )
            })
            .collect();
        paths.sort();

        let mut forms = HashMap::new();
        for path in &paths {
            let definition: FormDefinition = parse_by_extension(path)?;
            forms.insert(definition.id, definition);
        }
        Ok(Self {
            forms,
            source: DefinitionSource::Directory(dir.to_path_buf()),
        })
    }

    /// Loads all definitions from a single bundle file.
    pub fn from_bundle(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bundle: FormBundle = parse_by_extension(path)?;
        let mut forms = HashMap::new();
        for definition in bundle.forms {
            forms.insert(definition.id, definition);
        }
        Ok(Self {
            forms,
            source: DefinitionSource::Bundle(path.to_path_buf()),
        })
    }

    /// Looks up a definition by id.
    pub fn get(&self, id: u32) -> Option<&FormDefinition> {
        self.forms.get(&id)
    }

    /// Whether a definition with this id exists.
    pub fn contains(&self, id: u32) -> bool {
        self.forms.contains_key(&id)
    }

    /// Number of stored definitions.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Whether the registry holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// All definitions, ordered by id.
    pub fn forms(&self) -> Vec<&FormDefinition> {
        let mut forms: Vec<&FormDefinition> = self.forms.values().collect();
        forms.sort_by_key(|form| form.id);
        forms
    }

    /// Where this registry was loaded from.
    pub fn source(&self) -> &DefinitionSource {
        &self.source
    }
}

fn parse_by_extension<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)?;
    let parsed = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        serde_json::from_str(&text).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&text).map_err(|e| e.to_string())
    };
    parsed.map_err(|reason| RegistryError::InvalidDefinition {
        path: path.display().to_string(),
        reason,
    })
}

enum SourceSpec {
    Dir(PathBuf),
    Bundle(PathBuf),
}

/// Builder assembling a registry from a chain of sources.
///
/// Sources are loaded in the order they were added; the first source to
/// supply a given id wins. Sources that fail to load are skipped with a
/// warning; the build fails with
/// [`RegistryError::NoSourcesAvailable`] only when no source loads at all.
#[derive(Default)]
pub struct RegistryBuilder {
    sources: Vec<SourceSpec>,
}

impl RegistryBuilder {
    /// Adds a directory source.
    pub fn from_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.sources.push(SourceSpec::Dir(dir.as_ref().to_path_buf()));
        self
    }

    /// Adds a bundle file source.
    pub fn from_bundle(mut self, path: impl AsRef<Path>) -> Self {
        self.sources
            .push(SourceSpec::Bundle(path.as_ref().to_path_buf()));
        self
    }

    /// Loads the chain into a single registry.
    pub fn build(self) -> Result<FormRegistry> {
        let mut forms: HashMap<u32, FormDefinition> = HashMap::new();
        let mut loaded: Vec<DefinitionSource> = Vec::new();

        for spec in self.sources {
            let result = match &spec {
                SourceSpec::Dir(dir) => FormRegistry::from_dir(dir),
                SourceSpec::Bundle(path) => FormRegistry::from_bundle(path),
            };
            match result {
                Ok(registry) => {
                    for (id, definition) in registry.forms {
                        forms.entry(id).or_insert(definition);
                    }
                    loaded.push(registry.source);
                }
                Err(err) => {
                    let path = match &spec {
                        SourceSpec::Dir(dir) => dir.display(),
                        SourceSpec::Bundle(path) => path.display(),
                    };
                    warn!(%path, error = %err, "skipping definition source");
                }
            }
        }

        let source = match loaded.len() {
            0 => return Err(RegistryError::NoSourcesAvailable),
            1 => loaded.remove(0),
            _ => DefinitionSource::Multiple(loaded),
        };
        Ok(FormRegistry { forms, source })
    }
}
