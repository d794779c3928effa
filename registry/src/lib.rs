//! Form definition storage, tag scanning, and the read-only form service.
//!
//! This crate is the provider side of the system. It loads raw form
//! definitions from disk, scans them for tags, and exposes the two
//! endpoints the outside world consumes:
//!
//! - [`FormService::list_forms`] — id/title pairs of every known form.
//! - [`FormService::form_schema`] — title plus parsed schema elements for
//!   one form id.
//!
//! # Quick start
//!
//! ```no_run
//! use form_schema_registry::{FormRegistry, FormService};
//!
//! let registry = FormRegistry::from_dir("forms/").unwrap();
//! let service = FormService::new(registry);
//!
//! for summary in service.list_forms().unwrap() {
//!     let schema = service.form_schema(summary.id).unwrap();
//!     println!("{}: {} elements", schema.title, schema.elements.len());
//! }
//! ```

mod error;
mod loader;
mod manifest;
mod scan;
mod service;

pub use error::{RegistryError, Result};
pub use loader::{DefinitionSource, FormBundle, FormDefinition, FormRegistry, RegistryBuilder};
pub use manifest::{FormMetadata, Manifest, definition_checksum};
pub use scan::scan_form_tags;
pub use service::{FormSchemaResponse, FormService, FormSummary, ServiceError};
