//! Identity field generation.
//!
//! Pure, deterministic derivation of `fullyQualifiedName` and `id` values:
//!
//! ```text
//! component FQN   {dataProductFqn}:{typeSegment}:{name}
//! mesh namespace  everything before ":dataproducts:" in the data product FQN
//! definition FQN  {namespace}:{entityType}s:{name}:{version}
//! id              UUID v5 (SHA-1) over the FQN bytes
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdentityError;

/// Marker separating the mesh namespace from the data product part of an FQN.
pub const DATA_PRODUCTS_MARKER: &str = ":dataproducts:";

pub const DATA_PRODUCT_ENTITY_TYPE: &str = "dataproduct";
pub const APPLICATION_ENTITY_TYPE: &str = "application";
pub const INFRASTRUCTURE_ENTITY_TYPE: &str = "infrastructure";

// ── Port kinds ─────────────────────────────────────────────────

/// Which of the five interface collections a port belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortKind {
    InputPort,
    OutputPort,
    DiscoveryPort,
    ObservabilityPort,
    ControlPort,
}

impl PortKind {
    pub const ALL: [PortKind; 5] = [
        Self::InputPort,
        Self::OutputPort,
        Self::DiscoveryPort,
        Self::ObservabilityPort,
        Self::ControlPort,
    ];

    /// FQN type segment, e.g. `outputports`
    pub fn fqn_segment(&self) -> &'static str {
        match self {
            Self::InputPort => "inputports",
            Self::OutputPort => "outputports",
            Self::DiscoveryPort => "discoveryports",
            Self::ObservabilityPort => "observabilityports",
            Self::ControlPort => "controlports",
        }
    }

    /// Expected `entityType`, e.g. `outputport`
    pub fn entity_type(&self) -> &'static str {
        match self {
            Self::InputPort => "inputport",
            Self::OutputPort => "outputport",
            Self::DiscoveryPort => "discoveryport",
            Self::ObservabilityPort => "observabilityport",
            Self::ControlPort => "controlport",
        }
    }

    /// JSON key of the collection inside `interfaceComponents`
    pub fn collection(&self) -> &'static str {
        match self {
            Self::InputPort => "inputPorts",
            Self::OutputPort => "outputPorts",
            Self::DiscoveryPort => "discoveryPorts",
            Self::ObservabilityPort => "observabilityPorts",
            Self::ControlPort => "controlPorts",
        }
    }

    /// Human-readable label used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::InputPort => "input port",
            Self::OutputPort => "output port",
            Self::DiscoveryPort => "discovery port",
            Self::ObservabilityPort => "observability port",
            Self::ControlPort => "control port",
        }
    }
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entity_type())
    }
}

// ── Internal component kinds ───────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    Application,
    Infrastructural,
}

impl ComponentKind {
    pub fn fqn_segment(&self) -> &'static str {
        match self {
            Self::Application => "applicationcomponents",
            Self::Infrastructural => "infrastructuralcomponents",
        }
    }

    pub fn entity_type(&self) -> &'static str {
        match self {
            Self::Application => APPLICATION_ENTITY_TYPE,
            Self::Infrastructural => INFRASTRUCTURE_ENTITY_TYPE,
        }
    }

    pub fn collection(&self) -> &'static str {
        match self {
            Self::Application => "applicationComponents",
            Self::Infrastructural => "infrastructuralComponents",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Application => "application component",
            Self::Infrastructural => "infrastructural component",
        }
    }
}

// ── Standard definition context ────────────────────────────────

/// Semantic context a standard definition is reached through.
///
/// Everything under promises/expectations/obligations is an `Api`.
/// `Template` has no producer in the current document shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefinitionContext {
    Api,
    Template,
}

impl DefinitionContext {
    pub fn entity_type(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Template => "template",
        }
    }
}

// ── Generators ─────────────────────────────────────────────────

fn require<'a>(value: &'a str, argument: &'static str) -> Result<&'a str, IdentityError> {
    if value.is_empty() {
        Err(IdentityError::EmptyArgument(argument))
    } else {
        Ok(value)
    }
}

/// `{parent_fqn}:{type_segment}:{name}`
pub fn generate_component_fqn(
    parent_fqn: &str,
    type_segment: &str,
    name: &str,
) -> Result<String, IdentityError> {
    let parent = require(parent_fqn, "parentFqn")?;
    let segment = require(type_segment, "typeSegment")?;
    let name = require(name, "name")?;
    Ok(format!("{parent}:{segment}:{name}"))
}

/// Everything before the first `:dataproducts:` in a data product FQN.
pub fn extract_mesh_namespace(info_fqn: &str) -> Result<&str, IdentityError> {
    info_fqn
        .find(DATA_PRODUCTS_MARKER)
        .map(|idx| &info_fqn[..idx])
        .ok_or_else(|| IdentityError::MissingMeshNamespace(info_fqn.to_string()))
}

/// `{namespace}:{entity_type}s:{name}:{version}`, pluralised by appending `s`.
pub fn generate_standard_definition_fqn(
    namespace: &str,
    entity_type: &str,
    name: &str,
    version: &str,
) -> Result<String, IdentityError> {
    let namespace = require(namespace, "namespace")?;
    let entity_type = require(entity_type, "entityType")?;
    let name = require(name, "name")?;
    let version = require(version, "version")?;
    Ok(format!("{namespace}:{entity_type}s:{name}:{version}"))
}

/// Deterministic identifier for an entity: UUID v5 of the FQN bytes.
pub fn generate_id(fqn: &str) -> Result<String, IdentityError> {
    let fqn = require(fqn, "fqn")?;
    Ok(Uuid::new_v5(&Uuid::NAMESPACE_URL, fqn.as_bytes()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DP_FQN: &str = "urn:dpds:ns:dataproducts:p:1";

    #[test]
    fn test_component_fqn_concatenation() {
        assert_eq!(
            generate_component_fqn(DP_FQN, "inputports", "x").unwrap(),
            "urn:dpds:ns:dataproducts:p:1:inputports:x"
        );
    }

    #[test]
    fn test_component_fqn_rejects_empty_inputs() {
        assert_eq!(
            generate_component_fqn("", "inputports", "x"),
            Err(IdentityError::EmptyArgument("parentFqn"))
        );
        assert!(generate_component_fqn(DP_FQN, "", "x").is_err());
        assert!(generate_component_fqn(DP_FQN, "inputports", "").is_err());
    }

    #[test]
    fn test_extract_mesh_namespace() {
        assert_eq!(extract_mesh_namespace(DP_FQN).unwrap(), "urn:dpds:ns");
    }

    #[test]
    fn test_extract_mesh_namespace_uses_first_marker() {
        assert_eq!(
            extract_mesh_namespace("urn:a:dataproducts:b:dataproducts:c").unwrap(),
            "urn:a"
        );
    }

    #[test]
    fn test_extract_mesh_namespace_without_marker_fails() {
        let err = extract_mesh_namespace("urn:dpds:ns:products:p:1").unwrap_err();
        assert!(matches!(err, IdentityError::MissingMeshNamespace(_)));
    }

    #[test]
    fn test_standard_definition_fqn_pluralises_entity_type() {
        assert_eq!(
            generate_standard_definition_fqn("urn:dpds:ns", "api", "orders", "1.0.0").unwrap(),
            "urn:dpds:ns:apis:orders:1.0.0"
        );
    }

    #[test]
    fn test_generate_id_is_canonical_uuid_v5() {
        let id = generate_id(DP_FQN).unwrap();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 5);
        assert_eq!(id, parsed.hyphenated().to_string());
    }

    #[test]
    fn test_generate_id_rejects_empty_fqn() {
        assert_eq!(generate_id(""), Err(IdentityError::EmptyArgument("fqn")));
    }

    #[test]
    fn test_port_kind_tables() {
        let segments: Vec<&str> = PortKind::ALL.iter().map(|k| k.fqn_segment()).collect();
        assert_eq!(
            segments,
            ["inputports", "outputports", "discoveryports", "observabilityports", "controlports"]
        );
        for kind in PortKind::ALL {
            // segment is the plural of the entity type
            assert_eq!(kind.fqn_segment(), format!("{}s", kind.entity_type()));
        }
    }

    proptest! {
        #[test]
        fn prop_generate_id_is_deterministic(fqn in "[a-z:]{1,64}") {
            prop_assert_eq!(generate_id(&fqn).unwrap(), generate_id(&fqn).unwrap());
        }

        #[test]
        fn prop_generate_id_separates_distinct_fqns(a in "[a-z:]{1,32}", b in "[a-z:]{1,32}") {
            prop_assume!(a != b);
            prop_assert_ne!(generate_id(&a).unwrap(), generate_id(&b).unwrap());
        }
    }
}
