// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parameter values and the parameter-provider seam.
//!
//! Parameter editing lives outside the engine; the engine only needs
//! defaults for fresh blocks, an opaque export form, and the sizes that
//! variadic length expressions resolve against.

use crate::error::GraphError;
use crate::schema::BlockSchema;
use indexmap::IndexMap;
use serde_json::Value;

/// Parameter values of a block instance, keyed by parameter name.
///
/// Values are opaque JSON to the engine; only the [`ParameterStore`]
/// interprets them.
pub type ParameterMap = IndexMap<String, Value>;

/// Narrow contract to the parameter-editing collaborator.
pub trait ParameterStore {
    /// Default parameter values for a freshly created block.
    fn defaults(&self, schema: &BlockSchema) -> ParameterMap;

    /// Opaque export form of a parameter mapping.
    fn export(&self, params: &ParameterMap) -> Value;

    /// Rebuild a parameter mapping from its export form.
    fn import(&self, data: &Value) -> Result<ParameterMap, GraphError>;

    /// Current member count of the variadic parameter group `key`.
    fn parameter_size(&self, params: &ParameterMap, key: &str) -> Result<usize, GraphError>;
}

/// Plain-JSON parameter provider.
///
/// Defaults come from the schema templates' `default_value`s, export is the
/// parameter map as a JSON object, and a variadic parameter group is any
/// array-valued parameter (its size is the array length).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParameters;

impl ParameterStore for JsonParameters {
    fn defaults(&self, schema: &BlockSchema) -> ParameterMap {
        schema
            .parameters
            .iter()
            .filter_map(|template| {
                template
                    .default_value
                    .as_ref()
                    .map(|value| (template.name.clone(), value.clone()))
            })
            .collect()
    }

    fn export(&self, params: &ParameterMap) -> Value {
        Value::Object(
            params
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    fn import(&self, data: &Value) -> Result<ParameterMap, GraphError> {
        match data {
            Value::Object(map) => Ok(map
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()),
            Value::Null => Ok(ParameterMap::new()),
            other => Err(GraphError::ImportMalformed(format!(
                "parameters must be an object, got {other}"
            ))),
        }
    }

    fn parameter_size(&self, params: &ParameterMap, key: &str) -> Result<usize, GraphError> {
        params
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::len)
            .ok_or_else(|| GraphError::LengthResolution {
                key: key.to_string(),
            })
    }
}

/// Integer coercion used by `<key>.value` length expressions: JSON integers
/// pass through, strings are parsed.
pub(crate) fn coerce_usize(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    }
}
