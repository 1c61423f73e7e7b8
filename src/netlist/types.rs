//! Core types for netlist representation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Component types supported by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentType {
    /// Resistor
    #[serde(rename = "R")]
    Resistor,
    /// Capacitor
    #[serde(rename = "C")]
    Capacitor,
    /// Inductor
    #[serde(rename = "L")]
    Inductor,
    /// Four-terminal device (drain, gate, source, bulk)
    #[serde(rename = "M")]
    FourTerminalDevice,
}

impl ComponentType {
    /// Parse a component type from the first character of a designator.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'R' => Some(Self::Resistor),
            'C' => Some(Self::Capacitor),
            'L' => Some(Self::Inductor),
            'M' => Some(Self::FourTerminalDevice),
            _ => None,
        }
    }

    /// The designator letter for this type.
    pub fn prefix(&self) -> char {
        match self {
            Self::Resistor => 'R',
            Self::Capacitor => 'C',
            Self::Inductor => 'L',
            Self::FourTerminalDevice => 'M',
        }
    }

    /// Get the expected number of nodes for this component type.
    pub fn expected_node_count(&self) -> usize {
        match self {
            Self::Resistor | Self::Capacitor | Self::Inductor => 2,
            Self::FourTerminalDevice => 4,
        }
    }

    /// Whether instances of this type reference a model card.
    pub fn takes_model(&self) -> bool {
        matches!(self, Self::FourTerminalDevice)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// A component instance parsed from the netlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Source line number for diagnostics
    #[serde(skip)]
    pub line: usize,
    /// Designator as written (e.g. `R1`)
    pub name: String,
    /// Component type selected by the designator letter
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Connected node names, length fixed by the type
    pub nodes: Vec<String>,
    /// Reference to a model card (four-terminal devices only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Numeric parameters (`value` for passive elements)
    pub params: BTreeMap<String, f64>,
}

impl Component {
    /// The model reference, if one is present and non-empty.
    pub fn model_ref(&self) -> Option<&str> {
        self.model.as_deref().filter(|m| !m.is_empty())
    }

    /// The `value` parameter of a passive element.
    pub fn value(&self) -> Option<f64> {
        self.params.get("value").copied()
    }
}

/// A device model card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Source line number
    #[serde(skip)]
    pub line: usize,
    /// Model name (key in the netlist's model map)
    pub name: String,
    /// Free-form model type from the source (not validated)
    #[serde(rename = "type")]
    pub model_type: String,
    /// Model parameters
    pub params: BTreeMap<String, f64>,
}

/// A simulation directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Source line number
    #[serde(skip)]
    pub line: usize,
    /// Upper-cased directive keyword (e.g. `TRAN`)
    #[serde(rename = "type")]
    pub command_type: String,
    /// Raw `key=value` options, only filled for analysis directives
    pub options: BTreeMap<String, String>,
}

impl Command {
    /// Analysis directives whose `key=value` options are recorded.
    pub const ANALYSES: [&'static str; 3] = ["TRAN", "AC", "DC"];

    /// Whether this directive is one of the interpreted analyses.
    pub fn is_analysis(&self) -> bool {
        Self::ANALYSES.contains(&self.command_type.as_str())
    }
}

/// Complete parsed netlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Netlist {
    /// Title from the first comment line
    pub title: String,
    /// All component instances
    pub components: Vec<Component>,
    /// All directives other than model cards
    pub commands: Vec<Command>,
    /// Model definitions keyed by name
    pub models: BTreeMap<String, Model>,
}

impl Netlist {
    /// Create a new empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing at all was parsed.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.components.is_empty()
            && self.commands.is_empty()
            && self.models.is_empty()
    }

    /// Reorder components and commands by origin line.
    pub fn sort_by_line(&mut self) {
        self.components.sort_by_key(|c| c.line);
        self.commands.sort_by_key(|c| c.line);
    }
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Soft problem; the statement was still recorded
    Warning,
    /// The offending statement was not recorded
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A non-fatal problem found on one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Source line number
    pub line: usize,
    /// Human-readable message
    pub message: String,
    /// Severity
    pub severity: Severity,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// Whether this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] Line {}: {}", self.severity, self.line, self.message)
    }
}
