// SPDX-License-Identifier: MIT OR Apache-2.0
//! Signal-processing block types: sources, sums, mixers and delays.
//!
//! The `Delay` type is loopable, so feedback loops routed through it are
//! not treated as cycles by successor traversal.

use crate::error::GraphError;
use crate::params::ParameterMap;
use crate::schema::{BlockSchema, LabelStrategy, LengthSpec, PortTemplate, SchemaRegistry};
use serde_json::json;

/// Per-channel mixer label showing the configured gain, e.g. `Ch 2 (x0.5)`.
fn mixer_channel_label(_schema: &BlockSchema, params: &ParameterMap, index: usize) -> String {
    let gain = params
        .get("gains")
        .and_then(|v| v.as_array())
        .and_then(|gains| gains.get(index))
        .and_then(serde_json::Value::as_f64)
        .unwrap_or(1.0);
    format!("Ch {} (x{gain})", index + 1)
}

/// Create the signal block registry.
pub fn create_signal_registry() -> Result<SchemaRegistry, GraphError> {
    let mut registry = SchemaRegistry::new();

    registry.register(
        BlockSchema::new("Constant")
            .family("Sources")
            .description("Emits a fixed value")
            .parameter(PortTemplate::new("value").as_title().with_default(json!(0)))
            .output(PortTemplate::new("Value")),
    )?;

    registry.register(
        BlockSchema::new("Oscillator")
            .family("Sources")
            .description("Periodic signal source")
            .parameter(PortTemplate::new("frequency").with_default(json!(440.0)))
            .parameter(PortTemplate::new("shape").with_default(json!("sine")))
            .output(PortTemplate::new("Signal")),
    )?;

    registry.register(
        BlockSchema::new("Sum")
            .family("Arithmetic")
            .description("Adds its inputs")
            .parameter(PortTemplate::new("n").with_default(json!(2)))
            .input(PortTemplate::new("Term #").variadic(LengthSpec::value_of("n")))
            .output(PortTemplate::new("Sum")),
    )?;

    registry.register(
        BlockSchema::new("Mixer")
            .family("Arithmetic")
            .description("Weighted sum; one channel per configured gain")
            .parameter(PortTemplate::new("gains").with_default(json!([1.0, 1.0])))
            .input(
                PortTemplate::new("ch")
                    .variadic(LengthSpec::length_of("gains"))
                    .with_label(LabelStrategy::Computed(mixer_channel_label)),
            )
            .output(PortTemplate::new("Mix")),
    )?;

    registry.register(
        BlockSchema::new("Delay")
            .family("Routing")
            .description("One-step delay; legal inside feedback loops")
            .loopable()
            .parameter(PortTemplate::new("steps").with_default(json!(1)))
            .input(PortTemplate::new("In"))
            .output(PortTemplate::new("Out")),
    )?;

    registry.register(
        BlockSchema::new("Scope")
            .family("Sinks")
            .description("Displays whatever it receives")
            .input(PortTemplate::new("Signal").card("1")),
    )?;

    Ok(registry)
}
