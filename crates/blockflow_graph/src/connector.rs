// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connector identity and cardinality.

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorCategory {
    /// Parameter port (editable value that can also carry edges)
    Parameter,
    /// Input port
    Input,
    /// Output port
    Output,
}

impl ConnectorCategory {
    /// Wire-format name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parameter => "parameter",
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for ConnectorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable endpoint identifier: category, base name and, for members of a
/// variadic group, the member index.
///
/// Equality is structural. The wire form is `<category>_<name>` or
/// `<category>_<name>_<index>` (`Display`/`FromStr`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectorId {
    category: ConnectorCategory,
    name: String,
    index: Option<u32>,
}

impl ConnectorId {
    /// Identifier for a plain (non-variadic) connector.
    pub fn new(category: ConnectorCategory, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            index: None,
        }
    }

    /// Identifier for one member of a variadic connector group.
    pub fn indexed(category: ConnectorCategory, name: impl Into<String>, index: u32) -> Self {
        Self {
            category,
            name: name.into(),
            index: Some(index),
        }
    }

    /// Shorthand for an input connector.
    pub fn input(name: impl Into<String>) -> Self {
        Self::new(ConnectorCategory::Input, name)
    }

    /// Shorthand for an output connector.
    pub fn output(name: impl Into<String>) -> Self {
        Self::new(ConnectorCategory::Output, name)
    }

    /// Shorthand for a parameter connector.
    pub fn parameter(name: impl Into<String>) -> Self {
        Self::new(ConnectorCategory::Parameter, name)
    }

    /// The connector's category.
    pub fn category(&self) -> ConnectorCategory {
        self.category
    }

    /// The connector's base name (without any variadic index).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variadic member index, if any.
    pub fn index(&self) -> Option<u32> {
        self.index
    }

    /// Whether this is an input connector.
    pub fn is_input(&self) -> bool {
        self.category == ConnectorCategory::Input
    }

    /// Whether this is an output connector.
    pub fn is_output(&self) -> bool {
        self.category == ConnectorCategory::Output
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}_{}_{}", self.category, self.name, index),
            None => write!(f, "{}_{}", self.category, self.name),
        }
    }
}

impl FromStr for ConnectorId {
    type Err = GraphError;

    /// Parses the wire form. A trailing integer segment is taken as the
    /// variadic index only when at least three segments are present.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GraphError::ImportMalformed(format!("bad connector id {s:?}"));

        let mut parts: Vec<&str> = s.split('_').collect();
        if parts.len() < 2 {
            return Err(malformed());
        }

        let category = match parts[0] {
            "parameter" => ConnectorCategory::Parameter,
            "input" => ConnectorCategory::Input,
            "output" => ConnectorCategory::Output,
            _ => return Err(malformed()),
        };

        let index = if parts.len() >= 3 {
            parts.last().and_then(|part| part.parse::<u32>().ok())
        } else {
            None
        };
        if index.is_some() {
            parts.pop();
        }

        let name = parts[1..].join("_");
        if name.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            category,
            name,
            index,
        })
    }
}

/// How many edges a connector may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cardinality {
    /// Minimum number of edges.
    pub min: u32,
    /// Maximum number of edges; `None` means unbounded.
    pub max: Option<u32>,
}

impl Cardinality {
    /// A bounded `min..=max` range.
    pub fn bounded(min: u32, max: u32) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// At least `min` edges, no upper bound.
    pub fn at_least(min: u32) -> Self {
        Self { min, max: None }
    }

    /// Whether a connector currently carrying `current` edges can accept
    /// one more. Always true when the maximum is unbounded.
    pub fn accepts(self, current: usize) -> bool {
        match self.max {
            None => true,
            Some(max) => current < max as usize,
        }
    }

    /// Parses a compact cardinality spec.
    ///
    /// - absent spec: `(0,1)`, or `(0,*)` for outputs
    /// - a single integer `n`: `(n,n)`
    /// - `"a-b"`: `(a,b)`, `b` may be `*` for unbounded
    /// - `"b"`: `(0,b)`
    pub fn parse(spec: Option<&CardinalitySpec>, is_output: bool) -> Result<Self, GraphError> {
        let Some(spec) = spec else {
            return Ok(if is_output {
                Self::at_least(0)
            } else {
                Self::bounded(0, 1)
            });
        };

        let card = match spec {
            CardinalitySpec::Exact(n) => Self::bounded(*n, *n),
            CardinalitySpec::Compact(text) => {
                let bound = |part: &str| -> Result<Option<u32>, GraphError> {
                    if part.trim() == "*" {
                        Ok(None)
                    } else {
                        part.trim()
                            .parse::<u32>()
                            .map(Some)
                            .map_err(|_| GraphError::InvalidCardinality(text.clone()))
                    }
                };

                match text.split_once('-') {
                    Some((lo, hi)) => {
                        let min = bound(lo)?
                            .ok_or_else(|| GraphError::InvalidCardinality(text.clone()))?;
                        Self { min, max: bound(hi)? }
                    }
                    None => Self {
                        min: 0,
                        max: bound(text)?,
                    },
                }
            }
        };

        if let Some(max) = card.max {
            if card.min > max {
                return Err(GraphError::InvalidCardinality(format!(
                    "{}-{}",
                    card.min, max
                )));
            }
        }

        Ok(card)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}-{}", self.min, max),
            None => write!(f, "{}-*", self.min),
        }
    }
}

/// Compact cardinality spec attached to a port template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardinalitySpec {
    /// A single integer `n`, meaning exactly `n` edges.
    Exact(u32),
    /// The compact string form: `"a-b"` or `"b"`, with `*` for unbounded.
    Compact(String),
}

impl From<u32> for CardinalitySpec {
    fn from(n: u32) -> Self {
        Self::Exact(n)
    }
}

impl From<&str> for CardinalitySpec {
    fn from(text: &str) -> Self {
        Self::Compact(text.to_string())
    }
}

impl From<String> for CardinalitySpec {
    fn from(text: String) -> Self {
        Self::Compact(text)
    }
}
