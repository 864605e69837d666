// SPDX-License-Identifier: MIT OR Apache-2.0
//! Boolean and routing block types.

use crate::error::GraphError;
use crate::params::ParameterMap;
use crate::schema::{BlockSchema, LabelStrategy, LengthSpec, PortTemplate, SchemaRegistry};
use serde_json::json;

/// Labels a selector input with the choice it routes, e.g. `on "high"`.
fn selector_choice_label(_schema: &BlockSchema, params: &ParameterMap, index: usize) -> String {
    match params
        .get("choices")
        .and_then(|v| v.as_array())
        .and_then(|choices| choices.get(index))
        .and_then(|v| v.as_str())
    {
        Some(choice) => format!("on {choice:?}"),
        None => format!("on #{}", index + 1),
    }
}

/// Create the logic block registry.
pub fn create_logic_registry() -> Result<SchemaRegistry, GraphError> {
    let mut registry = SchemaRegistry::new();

    registry.register(
        BlockSchema::new("And")
            .family("Boolean")
            .description("True when every input is true")
            .parameter(PortTemplate::new("n").with_default(json!(2)))
            .input(PortTemplate::new("In #").variadic(LengthSpec::value_of("n")))
            .output(PortTemplate::new("Out")),
    )?;

    registry.register(
        BlockSchema::new("Or")
            .family("Boolean")
            .description("True when any input is true")
            .parameter(PortTemplate::new("n").with_default(json!(2)))
            .input(PortTemplate::new("In #").variadic(LengthSpec::value_of("n")))
            .output(PortTemplate::new("Out")),
    )?;

    registry.register(
        BlockSchema::new("Not")
            .family("Boolean")
            .input(PortTemplate::new("In"))
            .output(PortTemplate::new("Out")),
    )?;

    registry.register(
        BlockSchema::new("Selector")
            .family("Routing")
            .description("Routes its input to the lane matching a choice")
            .parameter(PortTemplate::new("choices").with_default(json!(["a", "b"])))
            .input(PortTemplate::new("Value"))
            .output(
                PortTemplate::new("lane")
                    .variadic(LengthSpec::length_of("choices"))
                    .with_label(LabelStrategy::Computed(selector_choice_label)),
            ),
    )?;

    Ok(registry)
}
