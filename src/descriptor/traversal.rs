//! Node-kind dispatch over the descriptor tree.
//!
//! One recursive walk, parameterised by [`Mode`]. For every node, in order:
//!   1. required-field presence
//!   2. semantic version format (when a version is present)
//!   3. entity type agreement with the node's position
//!   4. generation modes: fill `entityType`, then `fullyQualifiedName`, then `id`
//!   5. recurse with a [`Scope`] specialised for the child
//!
//! Steps 1-3 only run when the mode validates, step 4 only when it generates.

use descriptor_types::{
    ApplicationComponent, Components, DataProductDescriptor, Expectations, IdentityFields, Info,
    InfrastructuralComponent, InterfaceComponents, InternalComponents, Obligations, Port,
    Promises, StandardDefinition,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::context::ValidationContext;
use super::cursor::Cursor;
use super::identity::{
    self, ComponentKind, DefinitionContext, PortKind, DATA_PRODUCT_ENTITY_TYPE,
};
use super::semver;
use crate::error::{ErrorKind, FieldError, IdentityError};

/// What a traversal does to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Check only; the tree is never touched
    ValidateOnly,
    /// Check and fill missing identity fields in the same pass
    ValidateAndGenerate,
    /// Fill missing identity fields of an already-validated tree; no errors are collected
    GenerateOnly,
}

impl Mode {
    pub fn validates(&self) -> bool {
        matches!(self, Self::ValidateOnly | Self::ValidateAndGenerate)
    }

    pub fn generates(&self) -> bool {
        matches!(self, Self::ValidateAndGenerate | Self::GenerateOnly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidateOnly => "validate-only",
            Self::ValidateAndGenerate => "validate-and-generate",
            Self::GenerateOnly => "generate-only",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Traversal scope ────────────────────────────────────────────

/// Immutable traversal state for one node. Children receive specialised
/// copies, so nothing leaks between siblings.
#[derive(Debug, Clone, Default)]
pub struct Scope<'s> {
    path: String,
    port_kind: Option<PortKind>,
    definition_context: Option<DefinitionContext>,
    data_product_fqn: Option<&'s str>,
}

impl<'s> Scope<'s> {
    pub fn root(data_product_fqn: Option<&'s str>) -> Self {
        Self {
            data_product_fqn,
            ..Default::default()
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn port_kind(&self) -> Option<PortKind> {
        self.port_kind
    }

    pub fn definition_context(&self) -> Option<DefinitionContext> {
        self.definition_context
    }

    pub fn data_product_fqn(&self) -> Option<&'s str> {
        self.data_product_fqn
    }

    /// Dotted path of a field of the current node.
    pub fn field(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path, name)
        }
    }

    pub fn child(&self, name: &str) -> Self {
        Self {
            path: self.field(name),
            ..self.clone()
        }
    }

    pub fn index(&self, i: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, i),
            ..self.clone()
        }
    }

    pub fn with_port_kind(&self, kind: PortKind) -> Self {
        Self {
            port_kind: Some(kind),
            ..self.clone()
        }
    }

    pub fn with_definition_context(&self, context: DefinitionContext) -> Self {
        Self {
            definition_context: Some(context),
            ..self.clone()
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ── Walker ─────────────────────────────────────────────────────

/// Runs one traversal. Owns the run's [`ValidationContext`].
pub struct Walker {
    mode: Mode,
    ctx: ValidationContext,
}

impl Walker {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ctx: ValidationContext::new(),
        }
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.ctx.into_errors()
    }

    /// Walk a whole document.
    pub fn visit_descriptor(
        &mut self,
        mut root: Cursor<'_, DataProductDescriptor>,
        expected_fqn: Option<&str>,
    ) {
        // Info's FQN is never generated, so it can be captured before the walk.
        let data_product_fqn: Option<String> = root
            .get()
            .info
            .as_ref()
            .and_then(|info| present(info.fully_qualified_name.as_deref()))
            .map(str::to_string);

        if self.mode.validates() {
            let doc = root.get();
            // An absent info FQN is reported once, as a missing field, by `visit_info`.
            if let (Some(actual), Some(expected)) = (data_product_fqn.as_deref(), expected_fqn) {
                if actual != expected {
                    self.ctx.add_error(
                        "info.fullyQualifiedName",
                        ErrorKind::FqnMismatch,
                        format!(
                            "Fully qualified name '{actual}' does not match expected '{expected}'"
                        ),
                    );
                }
            }
            self.ctx.require(
                doc.data_product_descriptor.as_deref(),
                "dataProductDescriptor",
            );
            if doc.info.is_none() {
                self.ctx.require(None, "info");
            }
            if doc.interface_components.is_none() {
                self.ctx.require(None, "interfaceComponents");
            }
        }

        let scope = Scope::root(data_product_fqn.as_deref());

        if let Some(info) = root.optional(|d| &d.info, |d| &mut d.info) {
            self.visit_info(info, &scope.child("info"));
        }
        if let Some(interface) =
            root.optional(|d| &d.interface_components, |d| &mut d.interface_components)
        {
            self.visit_interface_components(interface, &scope.child("interfaceComponents"));
        }
        if let Some(internal) =
            root.optional(|d| &d.internal_components, |d| &mut d.internal_components)
        {
            self.visit_internal_components(internal, &scope.child("internalComponents"));
        }
        if let Some(components) = root.optional(|d| &d.components, |d| &mut d.components) {
            self.visit_components(components, &scope.child("components"));
        }
    }

    // ── Info ───────────────────────────────────────────────────

    fn visit_info(&mut self, mut info: Cursor<'_, Info>, scope: &Scope<'_>) {
        debug!(path = scope.path(), "visiting info");
        if self.mode.validates() {
            let node = info.get();
            self.ctx.require(
                node.fully_qualified_name.as_deref(),
                scope.field("fullyQualifiedName"),
            );
            self.ctx.require(node.name.as_deref(), scope.field("name"));
            self.ctx.require(node.version.as_deref(), scope.field("version"));
            self.ctx.require(node.domain.as_deref(), scope.field("domain"));
            match &node.owner {
                Some(owner) => {
                    self.ctx
                        .require(owner.id.as_deref(), scope.child("owner").field("id"));
                }
                None => {
                    self.ctx.require(None, scope.field("owner"));
                }
            }
        }
        // The data product FQN is the root of every other FQN; it is never derived.
        self.check_and_fill_identity(&mut info, scope, DATA_PRODUCT_ENTITY_TYPE, |_| Ok(None));
        // Contact points carry no required fields.
    }

    // ── Interface components ───────────────────────────────────

    fn visit_interface_components(
        &mut self,
        mut interface: Cursor<'_, InterfaceComponents>,
        scope: &Scope<'_>,
    ) {
        debug!(path = scope.path(), "visiting interface components");
        if self.mode.validates() && interface.get().output_ports.is_none() {
            self.ctx
                .require(None, scope.field(PortKind::OutputPort.collection()));
        }

        for kind in PortKind::ALL {
            let ports = match kind {
                PortKind::InputPort => {
                    interface.items(|i| &i.input_ports, |i| &mut i.input_ports)
                }
                PortKind::OutputPort => interface
                    .optional(|i| &i.output_ports, |i| &mut i.output_ports)
                    .map(Cursor::into_items)
                    .unwrap_or_default(),
                PortKind::DiscoveryPort => {
                    interface.items(|i| &i.discovery_ports, |i| &mut i.discovery_ports)
                }
                PortKind::ObservabilityPort => interface.items(
                    |i| &i.observability_ports,
                    |i| &mut i.observability_ports,
                ),
                PortKind::ControlPort => {
                    interface.items(|i| &i.control_ports, |i| &mut i.control_ports)
                }
            };
            let collection = scope.child(kind.collection()).with_port_kind(kind);
            for (i, port) in ports.into_iter().enumerate() {
                self.visit_port(port, &collection.index(i));
            }
        }
    }

    fn visit_port(&mut self, mut port: Cursor<'_, Port>, scope: &Scope<'_>) {
        let Some(kind) = scope.port_kind() else {
            return;
        };
        trace!(path = scope.path(), kind = %kind, "visiting port");

        if self.mode.validates() {
            let node = port.get();
            let name_path = scope.field("name");
            self.ctx.require(node.name.as_deref(), name_path.as_str());
            self.ctx.require(node.version.as_deref(), scope.field("version"));
            if let Some(name) = present(node.name.as_deref()) {
                self.ctx.add_port_name(kind, name, &name_path);
            }
        }

        let parent_fqn = scope.data_product_fqn();
        self.check_and_fill_identity(&mut port, scope, kind.entity_type(), |p| {
            match (parent_fqn, present(p.name.as_deref())) {
                (Some(parent), Some(name)) => {
                    identity::generate_component_fqn(parent, kind.fqn_segment(), name).map(Some)
                }
                _ => Ok(None),
            }
        });

        if let Some(promises) = port.optional(|p| &p.promises, |p| &mut p.promises) {
            let child = scope
                .child("promises")
                .with_definition_context(DefinitionContext::Api);
            self.visit_promises(promises, &child);
        }
        if let Some(expectations) = port.optional(|p| &p.expectations, |p| &mut p.expectations) {
            let child = scope
                .child("expectations")
                .with_definition_context(DefinitionContext::Api);
            self.visit_expectations(expectations, &child);
        }
        if let Some(obligations) = port.optional(|p| &p.obligations, |p| &mut p.obligations) {
            let child = scope
                .child("obligations")
                .with_definition_context(DefinitionContext::Api);
            self.visit_obligations(obligations, &child);
        }
    }

    fn visit_promises(&mut self, mut promises: Cursor<'_, Promises>, scope: &Scope<'_>) {
        if let Some(api) = promises.optional(|p| &p.api, |p| &mut p.api) {
            self.visit_standard_definition(api, &scope.child("api"));
        }
        if let Some(policy) =
            promises.optional(|p| &p.deprecation_policy, |p| &mut p.deprecation_policy)
        {
            self.visit_standard_definition(policy, &scope.child("deprecationPolicy"));
        }
        if let Some(slo) = promises.optional(|p| &p.slo, |p| &mut p.slo) {
            self.visit_standard_definition(slo, &scope.child("slo"));
        }
    }

    fn visit_expectations(&mut self, mut expectations: Cursor<'_, Expectations>, scope: &Scope<'_>) {
        if let Some(audience) = expectations.optional(|e| &e.audience, |e| &mut e.audience) {
            self.visit_standard_definition(audience, &scope.child("audience"));
        }
        if let Some(usage) = expectations.optional(|e| &e.usage, |e| &mut e.usage) {
            self.visit_standard_definition(usage, &scope.child("usage"));
        }
    }

    fn visit_obligations(&mut self, mut obligations: Cursor<'_, Obligations>, scope: &Scope<'_>) {
        if let Some(terms) = obligations.optional(
            |o| &o.terms_and_conditions,
            |o| &mut o.terms_and_conditions,
        ) {
            self.visit_standard_definition(terms, &scope.child("termsAndConditions"));
        }
        if let Some(billing) =
            obligations.optional(|o| &o.billing_policy, |o| &mut o.billing_policy)
        {
            self.visit_standard_definition(billing, &scope.child("billingPolicy"));
        }
        if let Some(sla) = obligations.optional(|o| &o.sla, |o| &mut o.sla) {
            self.visit_standard_definition(sla, &scope.child("sla"));
        }
    }

    fn visit_standard_definition(
        &mut self,
        mut definition: Cursor<'_, StandardDefinition>,
        scope: &Scope<'_>,
    ) {
        let context = scope
            .definition_context()
            .unwrap_or(DefinitionContext::Api);
        trace!(path = scope.path(), context = context.entity_type(), "visiting standard definition");

        if self.mode.validates() {
            let node = definition.get();
            self.ctx
                .require(node.specification.as_deref(), scope.field("specification"));
            let has_definition = node.definition.as_ref().is_some_and(|d| !d.is_null());
            if !has_definition {
                self.ctx.require(None, scope.field("definition"));
            }
        }

        let parent_fqn = scope.data_product_fqn();
        self.check_and_fill_identity(&mut definition, scope, context.entity_type(), |d| {
            match (
                parent_fqn,
                present(d.name.as_deref()),
                present(d.version.as_deref()),
            ) {
                (Some(parent), Some(name), Some(version)) => {
                    let namespace = identity::extract_mesh_namespace(parent)?;
                    identity::generate_standard_definition_fqn(
                        namespace,
                        context.entity_type(),
                        name,
                        version,
                    )
                    .map(Some)
                }
                _ => Ok(None),
            }
        });
    }

    // ── Internal components ────────────────────────────────────

    fn visit_internal_components(
        &mut self,
        mut internal: Cursor<'_, InternalComponents>,
        scope: &Scope<'_>,
    ) {
        debug!(path = scope.path(), "visiting internal components");
        let applications = scope.child(ComponentKind::Application.collection());
        for (i, component) in internal
            .items(
                |c| &c.application_components,
                |c| &mut c.application_components,
            )
            .into_iter()
            .enumerate()
        {
            self.visit_internal_component::<ApplicationComponent>(
                component,
                ComponentKind::Application,
                &applications.index(i),
            );
        }

        let infrastructure = scope.child(ComponentKind::Infrastructural.collection());
        for (i, component) in internal
            .items(
                |c| &c.infrastructural_components,
                |c| &mut c.infrastructural_components,
            )
            .into_iter()
            .enumerate()
        {
            self.visit_internal_component::<InfrastructuralComponent>(
                component,
                ComponentKind::Infrastructural,
                &infrastructure.index(i),
            );
        }

        // Lifecycle task info has no required fields; stages are only enumerated.
        for stage in internal.get().lifecycle_info.keys() {
            trace!(path = scope.path(), stage = %stage, "lifecycle stage");
        }
    }

    fn visit_internal_component<T: IdentityFields>(
        &mut self,
        mut component: Cursor<'_, T>,
        kind: ComponentKind,
        scope: &Scope<'_>,
    ) {
        trace!(path = scope.path(), kind = kind.entity_type(), "visiting internal component");
        if self.mode.validates() {
            let node = component.get();
            let name_path = scope.field("name");
            self.ctx.require(node.name(), name_path.as_str());
            if let Some(name) = present(node.name()) {
                self.ctx.add_component_name(kind, name, &name_path);
            }
        }

        let parent_fqn = scope.data_product_fqn();
        self.check_and_fill_identity(&mut component, scope, kind.entity_type(), |c| {
            match (parent_fqn, present(c.name())) {
                (Some(parent), Some(name)) => {
                    identity::generate_component_fqn(parent, kind.fqn_segment(), name).map(Some)
                }
                _ => Ok(None),
            }
        });
    }

    // ── Reusable components ────────────────────────────────────

    fn visit_components(&mut self, components: Cursor<'_, Components>, scope: &Scope<'_>) {
        debug!(path = scope.path(), "visiting components");
        if !self.mode.validates() {
            return;
        }
        // Keys only; the referenced values are not deep-validated here.
        for (label, collection) in components.get().collections() {
            let collection_label = scope.field(label);
            for key in collection.keys() {
                let key_path = if key.is_empty() {
                    collection_label.clone()
                } else {
                    format!("{collection_label}.{key}")
                };
                self.ctx.add_component_key(&collection_label, key, &key_path);
            }
        }
    }

    // ── Shared identity handling ───────────────────────────────

    /// Steps 2-4 for any addressable node: version format, entity type
    /// agreement, then generation of missing identity fields.
    ///
    /// `derive_fqn` returns `Ok(None)` when the inputs for an FQN are not
    /// available; an `Err` is reported against the node's
    /// `fullyQualifiedName` in validating modes and skipped otherwise.
    fn check_and_fill_identity<T, F>(
        &mut self,
        cursor: &mut Cursor<'_, T>,
        scope: &Scope<'_>,
        expected_entity_type: &str,
        derive_fqn: F,
    ) where
        T: IdentityFields,
        F: FnOnce(&T) -> Result<Option<String>, IdentityError>,
    {
        if self.mode.validates() {
            let node = cursor.get();
            if let Some(version) = present(node.version()) {
                if !semver::is_valid(version) {
                    self.ctx.add_error(
                        scope.field("version"),
                        ErrorKind::InvalidSemanticVersion,
                        semver::invalid_version_message(version),
                    );
                }
            }
            self.ctx.add_error_if_invalid_entity_type(
                node.entity_type(),
                expected_entity_type,
                &scope.field("entityType"),
            );
        }

        if !self.mode.generates() {
            return;
        }
        let Some(node) = cursor.get_mut() else {
            return;
        };

        if present(node.entity_type()).is_none() {
            node.set_entity_type(expected_entity_type.to_string());
        }

        if present(node.fully_qualified_name()).is_none() {
            match derive_fqn(&*node) {
                Ok(Some(fqn)) => node.set_fully_qualified_name(fqn),
                Ok(None) => {}
                Err(err) => {
                    if self.mode.validates() {
                        self.ctx.add_error(
                            scope.field("fullyQualifiedName"),
                            ErrorKind::FqnExtractionFailure,
                            err.to_string(),
                        );
                    } else {
                        debug!(path = scope.path(), error = %err, "skipping fqn generation");
                    }
                }
            }
        }

        if present(node.id()).is_none() {
            if let Some(Ok(id)) = present(node.fully_qualified_name()).map(identity::generate_id) {
                node.set_id(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flags() {
        assert!(Mode::ValidateOnly.validates());
        assert!(!Mode::ValidateOnly.generates());
        assert!(Mode::ValidateAndGenerate.validates());
        assert!(Mode::ValidateAndGenerate.generates());
        assert!(!Mode::GenerateOnly.validates());
        assert!(Mode::GenerateOnly.generates());
    }

    #[test]
    fn test_scope_paths() {
        let root = Scope::root(Some("urn:dpds:ns:dataproducts:p:1"));
        assert_eq!(root.field("info"), "info");
        let port = root
            .child("interfaceComponents")
            .child("outputPorts")
            .index(2);
        assert_eq!(port.path(), "interfaceComponents.outputPorts[2]");
        assert_eq!(port.field("version"), "interfaceComponents.outputPorts[2].version");
        assert_eq!(port.data_product_fqn(), Some("urn:dpds:ns:dataproducts:p:1"));
    }

    #[test]
    fn test_scope_specialisation_does_not_touch_parent() {
        let parent = Scope::root(None).child("interfaceComponents");
        let child = parent
            .with_port_kind(PortKind::ControlPort)
            .with_definition_context(DefinitionContext::Api);
        assert_eq!(child.port_kind(), Some(PortKind::ControlPort));
        assert_eq!(parent.port_kind(), None);
        assert_eq!(parent.definition_context(), None);
    }

    #[test]
    fn test_generate_only_collects_nothing() {
        let mut port = Port {
            version: Some("not-a-version".into()),
            entity_type: Some("inputport".into()),
            ..Default::default()
        };
        let mut walker = Walker::new(Mode::GenerateOnly);
        let scope = Scope::root(Some("urn:dpds:ns:dataproducts:p:1"))
            .child("interfaceComponents")
            .child("outputPorts")
            .with_port_kind(PortKind::OutputPort)
            .index(0);
        walker.visit_port(Cursor::Write(&mut port), &scope);
        assert!(walker.into_errors().is_empty());
        // Present entity type is kept even when it disagrees
        assert_eq!(port.entity_type.as_deref(), Some("inputport"));
        // No name, so no FQN and no id
        assert!(port.fully_qualified_name.is_none());
        assert!(port.id.is_none());
    }

    #[test]
    fn test_malformed_parent_fqn_reported_on_definition_when_validating() {
        let mut definition = StandardDefinition {
            name: Some("orders".into()),
            version: Some("1.0.0".into()),
            specification: Some("openapi".into()),
            definition: Some(serde_json::json!({})),
            ..Default::default()
        };
        let scope = Scope::root(Some("urn:no-marker"))
            .child("api")
            .with_definition_context(DefinitionContext::Api);

        let mut walker = Walker::new(Mode::ValidateAndGenerate);
        walker.visit_standard_definition(Cursor::Write(&mut definition), &scope);
        let errors = walker.into_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::FqnExtractionFailure);
        assert_eq!(errors[0].field_path, "api.fullyQualifiedName");
        assert_eq!(definition.entity_type.as_deref(), Some("api"));
        assert!(definition.fully_qualified_name.is_none());

        let mut walker = Walker::new(Mode::GenerateOnly);
        walker.visit_standard_definition(Cursor::Write(&mut definition), &scope);
        assert!(walker.into_errors().is_empty());
    }

    #[test]
    fn test_absent_info_fqn_is_only_reported_as_missing() {
        let doc = DataProductDescriptor {
            data_product_descriptor: Some("1.0.0".into()),
            info: Some(Info {
                name: Some("orders".into()),
                version: Some("1.0.0".into()),
                domain: Some("sales".into()),
                owner: Some(descriptor_types::Owner {
                    id: Some("owner@acme.com".into()),
                    name: None,
                }),
                ..Default::default()
            }),
            interface_components: Some(InterfaceComponents {
                output_ports: Some(vec![]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut walker = Walker::new(Mode::ValidateOnly);
        walker.visit_descriptor(Cursor::Read(&doc), Some("urn:dpds:ns:dataproducts:p:1"));
        let errors = walker.into_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field_path, "info.fullyQualifiedName");
        assert_eq!(errors[0].kind, ErrorKind::MissingRequiredField);
    }

    #[test]
    fn test_component_key_errors_carry_the_key() {
        let mut components = Components::default();
        components
            .input_ports
            .insert("a b".into(), serde_json::json!({}));
        components
            .input_ports
            .insert("c/d".into(), serde_json::json!({}));
        components.apis.insert(String::new(), serde_json::json!({}));

        let mut walker = Walker::new(Mode::ValidateOnly);
        walker.visit_components(Cursor::Read(&components), &Scope::root(None).child("components"));
        let paths: Vec<String> = walker
            .into_errors()
            .into_iter()
            .map(|e| e.field_path)
            .collect();
        assert_eq!(
            paths,
            vec![
                "components.inputPorts.a b",
                "components.inputPorts.c/d",
                "components.apis",
            ]
        );
    }
}
