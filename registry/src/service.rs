//! The read-only form service: the JSON-facing API surface.
//!
//! Two operations, both side-effect free: list the known forms as id/title
//! pairs, and parse one form's definition into its schema elements. Every
//! call parses fresh; parsed schemas have no persisted lifecycle, so any
//! caching belongs to the layer in front of this one. A network-facing
//! collaborator wrapping this service owns concurrency: the service holds
//! no mutable state and may be shared across threads.

use form_schema_core::SchemaElement;
use form_schema_parser::parse_form;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::loader::FormRegistry;
use crate::scan::scan_form_tags;

/// Errors surfaced by the service endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The form-definition provider is not present. Fatal for the whole
    /// request; surfaced before any parsing is attempted.
    #[error("form provider is not available")]
    ProviderUnavailable,

    /// The requested form id has no definition.
    #[error("no form with id {0}")]
    NotFound(u32),
}

/// One row of the form listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSummary {
    /// Form id.
    pub id: u32,
    /// Form title.
    pub title: String,
}

/// Response payload of the schema endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchemaResponse {
    /// Form id.
    pub id: u32,
    /// Form title.
    pub title: String,
    /// Parsed schema elements, in source order.
    pub elements: Vec<SchemaElement>,
}

/// Read-only access to parsed form schemas.
///
/// # Examples
///
/// ```
/// use form_schema_registry::{FormService, ServiceError};
///
/// let service = FormService::detached();
/// assert_eq!(service.list_forms(), Err(ServiceError::ProviderUnavailable));
/// ```
#[derive(Debug)]
pub struct FormService {
    provider: Option<FormRegistry>,
}

impl FormService {
    /// Creates a service over a loaded registry.
    pub fn new(provider: FormRegistry) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Creates a service with no provider attached; every endpoint answers
    /// [`ServiceError::ProviderUnavailable`].
    pub fn detached() -> Self {
        Self { provider: None }
    }

    /// Lists the known forms as id/title pairs, ordered by id.
    pub fn list_forms(&self) -> Result<Vec<FormSummary>, ServiceError> {
        let provider = self.provider()?;
        Ok(provider
            .forms()
            .into_iter()
            .map(|form| FormSummary {
                id: form.id,
                title: form.title.clone(),
            })
            .collect())
    }

    /// Parses one form's definition into its schema.
    pub fn form_schema(&self, id: u32) -> Result<FormSchemaResponse, ServiceError> {
        let provider = self.provider()?;
        let form = provider.get(id).ok_or(ServiceError::NotFound(id))?;

        let tags = scan_form_tags(&form.definition);
        debug!(id, tags = tags.len(), "parsing form definition");
        let elements = parse_form(&form.definition, &tags);

        Ok(FormSchemaResponse {
            id: form.id,
            title: form.title.clone(),
            elements,
        })
    }

    fn provider(&self) -> Result<&FormRegistry, ServiceError> {
        self.provider
            .as_ref()
            .ok_or(ServiceError::ProviderUnavailable)
    }
}
