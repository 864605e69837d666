// SPDX-License-Identifier: MIT OR Apache-2.0
//! Block type schemas and their registry.

use crate::connector::{Cardinality, CardinalitySpec, ConnectorCategory};
use crate::error::GraphError;
use crate::params::{coerce_usize, ParameterMap, ParameterStore};
use indexmap::IndexMap;
use std::sync::Arc;

/// Length spec of a variadic port template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LengthSpec {
    /// Fixed member count.
    Fixed(usize),
    /// Current member count of the variadic parameter group `key`
    /// (the original's `"<key>.length"` form).
    ParameterLength(String),
    /// Integer value of the scalar parameter `key`
    /// (the original's `"<key>.value"` form).
    ParameterValue(String),
}

impl LengthSpec {
    /// Length taken from the member count of parameter group `key`.
    pub fn length_of(key: impl Into<String>) -> Self {
        Self::ParameterLength(key.into())
    }

    /// Length taken from the integer value of scalar parameter `key`.
    pub fn value_of(key: impl Into<String>) -> Self {
        Self::ParameterValue(key.into())
    }

    /// Resolve the expanded size against the current parameter values.
    pub fn resolve(
        &self,
        params: &ParameterMap,
        store: &dyn ParameterStore,
    ) -> Result<usize, GraphError> {
        match self {
            Self::Fixed(n) => Ok(*n),
            Self::ParameterLength(key) => store.parameter_size(params, key),
            Self::ParameterValue(key) => params
                .get(key)
                .and_then(coerce_usize)
                .ok_or_else(|| GraphError::LengthResolution { key: key.clone() }),
        }
    }
}

impl From<usize> for LengthSpec {
    fn from(n: usize) -> Self {
        Self::Fixed(n)
    }
}

/// How display labels for expanded port members are produced.
///
/// A closed, tagged set: label generation is never arbitrary code
/// execution.
#[derive(Debug, Clone, Copy, Default)]
pub enum LabelStrategy {
    /// Replace a `#` placeholder in the template name with the 1-based
    /// member index.
    #[default]
    Placeholder,
    /// Pure function of the schema, the current parameters and the member
    /// index.
    Computed(fn(&BlockSchema, &ParameterMap, usize) -> String),
}

impl LabelStrategy {
    /// Produce the label for member `index` of `template`.
    pub fn apply(
        &self,
        schema: &BlockSchema,
        template: &PortTemplate,
        params: &ParameterMap,
        index: usize,
    ) -> String {
        match self {
            Self::Placeholder => template.name.replace('#', &(index + 1).to_string()),
            Self::Computed(f) => f(schema, params, index),
        }
    }
}

/// Template for a parameter, input or output port.
#[derive(Debug, Clone)]
pub struct PortTemplate {
    /// Port base name; `#` is the member-index placeholder in labels.
    pub name: String,
    /// Compact cardinality spec; `None` means the category default.
    pub card: Option<CardinalitySpec>,
    /// Present when the template expands to an indexed connector group.
    pub length: Option<LengthSpec>,
    /// Display-label strategy for expanded members.
    pub label: LabelStrategy,
    /// Render this parameter's value as the block title instead of
    /// deriving a connector for it (parameters only).
    pub as_title: bool,
    /// Default value (parameters only).
    pub default_value: Option<serde_json::Value>,
}

impl PortTemplate {
    /// A template with the category-default cardinality.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            card: None,
            length: None,
            label: LabelStrategy::default(),
            as_title: false,
            default_value: None,
        }
    }

    /// Set the cardinality spec (`.card(2)`, `.card("0-*")`).
    pub fn card(mut self, spec: impl Into<CardinalitySpec>) -> Self {
        self.card = Some(spec.into());
        self
    }

    /// Mark the template variadic with the given length spec.
    pub fn variadic(mut self, length: impl Into<LengthSpec>) -> Self {
        self.length = Some(length.into());
        self
    }

    /// Set the label strategy.
    pub fn with_label(mut self, strategy: LabelStrategy) -> Self {
        self.label = strategy;
        self
    }

    /// Use this parameter's value as the block title.
    pub fn as_title(mut self) -> Self {
        self.as_title = true;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// Static description of a kind of block.
///
/// Registered schemas are immutable and shared by every instance of the
/// type; identity is the `(name, module)` pair.
#[derive(Debug, Clone)]
pub struct BlockSchema {
    /// Type name, unique within its module.
    pub name: String,
    /// Module the type belongs to (`None` = built-in).
    pub module: Option<String>,
    /// Menu family; the empty string is the root family.
    pub family: String,
    /// Human-readable description.
    pub description: String,
    /// Parameter port templates, declaration order.
    pub parameters: Vec<PortTemplate>,
    /// Input port templates, declaration order.
    pub inputs: Vec<PortTemplate>,
    /// Output port templates, declaration order.
    pub outputs: Vec<PortTemplate>,
    /// Whether edges touching this block are ignored by loop analysis.
    pub loopable: bool,
}

impl BlockSchema {
    /// A schema with no ports, in the root family.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: None,
            family: String::new(),
            description: String::new(),
            parameters: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            loopable: false,
        }
    }

    /// Set the module.
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Set the family.
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a parameter template.
    pub fn parameter(mut self, template: PortTemplate) -> Self {
        self.parameters.push(template);
        self
    }

    /// Append an input template.
    pub fn input(mut self, template: PortTemplate) -> Self {
        self.inputs.push(template);
        self
    }

    /// Append an output template.
    pub fn output(mut self, template: PortTemplate) -> Self {
        self.outputs.push(template);
        self
    }

    /// Mark the type loopable: its edges are excluded from successor
    /// traversal, so feedback loops through it are not treated as cycles.
    pub fn loopable(mut self) -> Self {
        self.loopable = true;
        self
    }

    /// Registry identity of this schema.
    pub fn key(&self) -> SchemaKey {
        SchemaKey {
            name: self.name.clone(),
            module: self.module.clone(),
        }
    }

    /// The parameter template whose value titles the block, if any.
    pub fn title_parameter(&self) -> Option<&PortTemplate> {
        self.parameters.iter().find(|template| template.as_title)
    }

    /// All templates in derivation order: parameters, inputs, outputs.
    pub(crate) fn templates(
        &self,
    ) -> impl Iterator<Item = (ConnectorCategory, &PortTemplate)> {
        let parameters = self
            .parameters
            .iter()
            .map(|t| (ConnectorCategory::Parameter, t));
        let inputs = self.inputs.iter().map(|t| (ConnectorCategory::Input, t));
        let outputs = self.outputs.iter().map(|t| (ConnectorCategory::Output, t));
        parameters.chain(inputs).chain(outputs)
    }

    /// Check every template's cardinality spec.
    fn validate(&self) -> Result<(), GraphError> {
        for (category, template) in self.templates() {
            Cardinality::parse(
                template.card.as_ref(),
                category == ConnectorCategory::Output,
            )?;
        }
        Ok(())
    }
}

/// Registry identity of a schema: `(name, module)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaKey {
    /// Type name.
    pub name: String,
    /// Module, `None` for built-ins.
    pub module: Option<String>,
}

/// Registry of available block types.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: IndexMap<SchemaKey, Arc<BlockSchema>>,
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a schema under its `(name, module)` key.
    ///
    /// Re-registering an existing key replaces the previous schema;
    /// instances created from the old schema keep their reference.
    pub fn register(&mut self, schema: BlockSchema) -> Result<(), GraphError> {
        schema.validate()?;
        self.types.insert(schema.key(), Arc::new(schema));
        Ok(())
    }

    /// Look up a schema.
    pub fn lookup(
        &self,
        name: &str,
        module: Option<&str>,
    ) -> Result<Arc<BlockSchema>, GraphError> {
        let key = SchemaKey {
            name: name.to_string(),
            module: module.map(str::to_string),
        };
        self.types
            .get(&key)
            .cloned()
            .ok_or(GraphError::SchemaNotFound {
                name: key.name,
                module: key.module,
            })
    }

    /// All registered schemas, registration order.
    pub fn schemas(&self) -> impl Iterator<Item = &Arc<BlockSchema>> {
        self.types.values()
    }

    /// Schemas belonging to `family` (empty string = root family).
    pub fn schemas_in_family<'a>(
        &'a self,
        family: &'a str,
    ) -> impl Iterator<Item = &'a Arc<BlockSchema>> {
        self.types.values().filter(move |s| s.family == family)
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::JsonParameters;
    use serde_json::json;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = SchemaRegistry::new();
        registry.register(BlockSchema::new("Sum")).unwrap();
        registry
            .register(BlockSchema::new("Sum").module("dsp"))
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.lookup("Sum", None).is_ok());
        assert!(registry.lookup("Sum", Some("dsp")).is_ok());
        assert!(matches!(
            registry.lookup("Sum", Some("audio")),
            Err(GraphError::SchemaNotFound { .. })
        ));
    }

    #[test]
    fn test_reregister_replaces() {
        let mut registry = SchemaRegistry::new();
        registry
            .register(BlockSchema::new("Gate").description("v1"))
            .unwrap();
        registry
            .register(BlockSchema::new("Gate").description("v2"))
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("Gate", None).unwrap().description, "v2");
    }

    #[test]
    fn test_invalid_cardinality_rejected_at_register() {
        let mut registry = SchemaRegistry::new();
        let bad = BlockSchema::new("Broken").input(PortTemplate::new("in").card("9-3"));
        assert!(matches!(
            registry.register(bad),
            Err(GraphError::InvalidCardinality(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_length_spec_resolution() {
        let mut params = ParameterMap::new();
        params.insert("n".to_string(), json!(3));
        params.insert("m".to_string(), json!("5"));
        params.insert("choices".to_string(), json!(["a", "b"]));

        let store = JsonParameters;
        assert_eq!(LengthSpec::from(2).resolve(&params, &store).unwrap(), 2);
        assert_eq!(
            LengthSpec::value_of("n").resolve(&params, &store).unwrap(),
            3
        );
        assert_eq!(
            LengthSpec::value_of("m").resolve(&params, &store).unwrap(),
            5
        );
        assert_eq!(
            LengthSpec::length_of("choices")
                .resolve(&params, &store)
                .unwrap(),
            2
        );
        assert!(matches!(
            LengthSpec::value_of("missing").resolve(&params, &store),
            Err(GraphError::LengthResolution { .. })
        ));
        assert!(matches!(
            LengthSpec::value_of("choices").resolve(&params, &store),
            Err(GraphError::LengthResolution { .. })
        ));
    }

    #[test]
    fn test_family_queries() {
        let mut registry = SchemaRegistry::new();
        registry
            .register(BlockSchema::new("Sum").family("Arithmetic"))
            .unwrap();
        registry
            .register(BlockSchema::new("Product").family("Arithmetic"))
            .unwrap();
        registry.register(BlockSchema::new("Note")).unwrap();

        assert_eq!(registry.schemas_in_family("Arithmetic").count(), 2);
        assert_eq!(registry.schemas_in_family("").count(), 1);
    }

    #[test]
    fn test_title_parameter() {
        let schema = BlockSchema::new("Constant")
            .parameter(PortTemplate::new("value").as_title().with_default(json!(0)));
        assert_eq!(
            schema.title_parameter().map(|t| t.name.as_str()),
            Some("value")
        );
        assert!(BlockSchema::new("Sum").title_parameter().is_none());
    }
}
