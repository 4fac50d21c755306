//! Inbound interface: descriptor text to document tree.
//!
//! The engine itself never parses; callers go through here first.

use descriptor_types::DataProductDescriptor;

use crate::error::RegistryResult;

/// Parse descriptor JSON. A literal `null` document yields `None`, which the
/// engine reports as a missing descriptor.
pub fn parse_descriptor(content: &str) -> RegistryResult<Option<DataProductDescriptor>> {
    let descriptor: Option<DataProductDescriptor> = serde_json::from_str(content)?;
    Ok(descriptor)
}

/// Pretty JSON rendering of a (possibly populated) descriptor.
pub fn to_pretty_json(descriptor: &DataProductDescriptor) -> RegistryResult<String> {
    Ok(serde_json::to_string_pretty(descriptor)?)
}
