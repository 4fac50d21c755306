//! Descriptor Types - Level 1 Foundation Types
//!
//! Pure data structures for the Data Product Descriptor Specification (DPDS)
//! document tree. This is the shape produced by the descriptor parser and
//! consumed (and, in generation mode, patched in place) by the registry's
//! validation engine.
//!
//! ## Critical Rules
//!
//! 1. **NO BUSINESS LOGIC** - Only data structures and field accessors
//! 2. **NO WORKSPACE DEPENDENCIES** - The registry crate depends on this one
//! 3. **SERIALIZABLE** - Everything round-trips through serde with camelCase keys
//!
//! Scalar fields are `Option<String>` so that an absent key and an explicit
//! empty string are both representable. Validation treats both as missing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// DOCUMENT ROOT
// ============================================================================

/// Root of a data product descriptor document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProductDescriptor {
    /// DPDS version envelope, e.g. `"1.0.0"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_product_descriptor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_components: Option<InterfaceComponents>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_components: Option<InternalComponents>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

// ============================================================================
// INFO SECTION
// ============================================================================

/// General information about the data product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact_points: Vec<ContactPoint>,
}

/// Accountable owner of the data product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDocs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ============================================================================
// INTERFACE COMPONENTS
// ============================================================================

/// The five port collections exposed by a data product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceComponents {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_ports: Vec<Port>,
    /// Required by DPDS, but may be empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_ports: Option<Vec<Port>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discovery_ports: Vec<Port>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observability_ports: Vec<Port>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub control_ports: Vec<Port>,
}

/// A single interface port.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promises: Option<Promises>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expectations: Option<Expectations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obligations: Option<Obligations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// What the port promises to its consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promises {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<StandardDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_policy: Option<StandardDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slo: Option<StandardDefinition>,
}

/// What the port expects from its consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expectations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<StandardDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<StandardDefinition>,
}

/// Contractual obligations attached to the port.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obligations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_and_conditions: Option<StandardDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_policy: Option<StandardDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla: Option<StandardDefinition>,
}

/// A specification-backed definition (API, policy, SLA, ...).
///
/// `definition` is opaque to the registry; only its presence is checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

// ============================================================================
// INTERNAL COMPONENTS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalComponents {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub application_components: Vec<ApplicationComponent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub infrastructural_components: Vec<InfrastructuralComponent>,
    /// Lifecycle stage name -> task info
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub lifecycle_info: BTreeMap<String, LifecycleTaskInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructuralComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

/// Provisioning details for one lifecycle stage. Opaque to validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleTaskInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Value>,
}

// ============================================================================
// REUSABLE COMPONENTS
// ============================================================================

/// Named, reusable component definitions referenced from elsewhere in the
/// document. Only the keys are validated by the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub input_ports: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub output_ports: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub discovery_ports: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub observability_ports: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub control_ports: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub application_components: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub infrastructural_components: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub apis: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub templates: BTreeMap<String, Value>,
}

impl Components {
    /// All nine maps paired with their JSON key, in document order.
    pub fn collections(&self) -> [(&'static str, &BTreeMap<String, Value>); 9] {
        [
            ("inputPorts", &self.input_ports),
            ("outputPorts", &self.output_ports),
            ("discoveryPorts", &self.discovery_ports),
            ("observabilityPorts", &self.observability_ports),
            ("controlPorts", &self.control_ports),
            ("applicationComponents", &self.application_components),
            ("infrastructuralComponents", &self.infrastructural_components),
            ("apis", &self.apis),
            ("templates", &self.templates),
        ]
    }
}

// ============================================================================
// IDENTITY ACCESSORS
// ============================================================================

/// Uniform access to the identity fields shared by every addressable entity.
pub trait IdentityFields {
    fn name(&self) -> Option<&str>;
    fn version(&self) -> Option<&str>;
    fn entity_type(&self) -> Option<&str>;
    fn id(&self) -> Option<&str>;
    fn fully_qualified_name(&self) -> Option<&str>;

    fn set_entity_type(&mut self, value: String);
    fn set_id(&mut self, value: String);
    fn set_fully_qualified_name(&mut self, value: String);
}

macro_rules! impl_identity_fields {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IdentityFields for $ty {
                fn name(&self) -> Option<&str> {
                    self.name.as_deref()
                }
                fn version(&self) -> Option<&str> {
                    self.version.as_deref()
                }
                fn entity_type(&self) -> Option<&str> {
                    self.entity_type.as_deref()
                }
                fn id(&self) -> Option<&str> {
                    self.id.as_deref()
                }
                fn fully_qualified_name(&self) -> Option<&str> {
                    self.fully_qualified_name.as_deref()
                }
                fn set_entity_type(&mut self, value: String) {
                    self.entity_type = Some(value);
                }
                fn set_id(&mut self, value: String) {
                    self.id = Some(value);
                }
                fn set_fully_qualified_name(&mut self, value: String) {
                    self.fully_qualified_name = Some(value);
                }
            }
        )*
    };
}

impl_identity_fields!(
    Info,
    Port,
    StandardDefinition,
    ApplicationComponent,
    InfrastructuralComponent,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_case_round_trip_keeps_absent_fields_absent() {
        let raw = json!({
            "dataProductDescriptor": "1.0.0",
            "info": {
                "fullyQualifiedName": "urn:dpds:acme:dataproducts:sales:1",
                "name": "sales",
                "version": "1.0.0",
                "domain": "commerce",
                "owner": { "id": "jane@acme.com" }
            },
            "interfaceComponents": { "outputPorts": [] }
        });

        let descriptor: DataProductDescriptor = serde_json::from_value(raw.clone()).unwrap();
        let info = descriptor.info.as_ref().unwrap();
        assert_eq!(info.domain.as_deref(), Some("commerce"));
        assert!(info.entity_type.is_none());

        let back = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_opaque_definition_is_preserved() {
        let raw = json!({
            "specification": "openapi",
            "definition": { "openapi": "3.0.0", "paths": {} }
        });
        let def: StandardDefinition = serde_json::from_value(raw).unwrap();
        assert_eq!(def.definition.unwrap()["openapi"], "3.0.0");
    }

    #[test]
    fn test_identity_setters() {
        let mut port = Port::default();
        port.set_entity_type("outputport".into());
        port.set_fully_qualified_name("urn:x".into());
        port.set_id("abc".into());
        assert_eq!(port.entity_type(), Some("outputport"));
        assert_eq!(port.fully_qualified_name(), Some("urn:x"));
        assert_eq!(port.id(), Some("abc"));
    }

    #[test]
    fn test_components_collections_cover_all_maps() {
        let mut components = Components::default();
        components.apis.insert("orders-api".into(), json!({}));
        let labels: Vec<&str> = components.collections().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels.len(), 9);
        assert!(labels.contains(&"templates"));
        let apis = components
            .collections()
            .into_iter()
            .find(|(l, _)| *l == "apis")
            .map(|(_, m)| m.len());
        assert_eq!(apis, Some(1));
    }
}
