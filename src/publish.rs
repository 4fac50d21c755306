//! Publish use case for a data product descriptor version.
//!
//! Pipeline:
//!   1. Lifecycle guard (only approved products can be published)
//!   2. Variable substitution on the raw text
//!   3. Parse
//!   4. Validate and generate identity fields against the registered FQN
//!   5. Transition to `Published`
//!
//! The descriptor is owned by this function until it succeeds, so a document
//! that failed validation can never escape with half-generated fields.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use descriptor_types::DataProductDescriptor;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::descriptor::{parse_descriptor, substitute, validate_and_generate};
use crate::error::{RegistryError, RegistryResult};
use crate::lifecycle::{DataProductStatus, LifecycleAction};

#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// FQN the data product was registered under
    pub data_product_fqn: String,
    pub current_status: DataProductStatus,
    /// Raw descriptor JSON, possibly containing `${name}` variables
    pub content: String,
    pub variables: HashMap<String, String>,
    /// Reject documents that still contain unbound variables
    pub strict_variables: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishOutcome {
    pub descriptor: DataProductDescriptor,
    /// `info.id` after generation
    pub data_product_id: Option<String>,
    pub status: DataProductStatus,
    pub published_at: DateTime<Utc>,
}

pub fn publish_descriptor(request: PublishRequest) -> RegistryResult<PublishOutcome> {
    let status = request.current_status.apply(LifecycleAction::Publish)?;

    let substitution = substitute(&request.content, &request.variables);
    if request.strict_variables && !substitution.is_complete() {
        warn!(
            fqn = %request.data_product_fqn,
            unresolved = ?substitution.unresolved,
            "descriptor has unresolved variables"
        );
        return Err(RegistryError::UnresolvedVariables(substitution.unresolved));
    }

    let mut descriptor = parse_descriptor(&substitution.content)?;
    let data_product_id = {
        let populated = validate_and_generate(
            descriptor.as_mut(),
            Some(request.data_product_fqn.as_str()),
        )?;
        populated.info.as_ref().and_then(|i| i.id.clone())
    };
    let descriptor = descriptor.ok_or(RegistryError::MissingDescriptor)?;

    info!(
        fqn = %request.data_product_fqn,
        id = data_product_id.as_deref().unwrap_or_default(),
        "descriptor published"
    );

    Ok(PublishOutcome {
        descriptor,
        data_product_id,
        status,
        published_at: Utc::now(),
    })
}
