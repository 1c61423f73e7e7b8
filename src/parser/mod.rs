//! Statement grammars for SPICE-style netlists.
//!
//! The parser is line-oriented: every line is classified independently and
//! handed to exactly one grammar, which is what lets the session fan lines
//! out across worker threads.
//!
//! # Grammar Overview
//!
//! ```text
//! line        = comment | model_card | directive | instance | empty
//! comment     = '*' { any_char }
//! model_card  = '.model' name type { param }
//! directive   = '.' keyword { option }
//! instance    = designator node node [node node] (value | model_ref) { any }
//!
//! param       = key '=' value
//! option      = key '=' raw_text
//! value       = number [unit_suffix] { any_char }
//! number      = { digit | '.' | '-' }
//! unit_suffix = 'T' | 'G' | 'M' | 'K' | 'k' | 'm' | 'u' | 'n' | 'p'
//! ```
//!
//! # Component Types
//!
//! | Type | Description | Syntax |
//! |------|-------------|--------|
//! | R | Resistor | `R<name> <n+> <n-> <value>` |
//! | C | Capacitor | `C<name> <n+> <n-> <value>` |
//! | L | Inductor | `L<name> <n+> <n-> <value>` |
//! | M | Four-terminal device | `M<name> <d> <g> <s> <b> <model>` |
//!
//! # Example
//!
//! ```text
//! * Common-source stage
//! .model nch NMOS (vto=0.7 kp=110u)
//! RD  vdd  out  10k
//! M1  out  in   0   0   nch
//! CL  out  0    1p
//! .tran tstep=1n tstop=10u
//! ```

mod command;
mod component;
mod lexer;
mod model;
mod value;

pub use command::parse_command;
pub use component::parse_component;
pub use lexer::{classify, tokenize, Statement};
pub use model::{parse_model, ParsedModel, RejectedParam};
pub use value::{multiplier, parse_value};

use crate::netlist::{Command, Component, Diagnostic, Model};

/// A statement that contributes to the netlist.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// Candidate title from a comment line
    Title(String),
    /// A component instance
    Component(Component),
    /// A model card
    Model(Model),
    /// A directive
    Command(Command),
}

/// Everything produced by a single line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineOutput {
    /// The recorded statement, if any
    pub parsed: Option<Parsed>,
    /// Diagnostics raised by the line
    pub diagnostics: Vec<Diagnostic>,
}

impl LineOutput {
    fn parsed(parsed: Parsed) -> Self {
        Self {
            parsed: Some(parsed),
            diagnostics: Vec::new(),
        }
    }

    fn error(line: usize, message: impl ToString) -> Self {
        Self {
            parsed: None,
            diagnostics: vec![Diagnostic::error(line, message.to_string())],
        }
    }
}

/// Route one source line to its grammar and parse it.
///
/// Statement failures never escape: they come back as ERROR diagnostics
/// with no statement. Model parameters that fail to decode are dropped and,
/// when `warn_dropped_params` is set, reported as WARNINGs.
pub fn parse_line(line: usize, text: &str, warn_dropped_params: bool) -> LineOutput {
    let statement = classify(text);
    tracing::trace!(line, kind = statement.kind(), "routing statement");

    match statement {
        Statement::Blank => LineOutput::default(),
        Statement::Comment(rest) if rest.is_empty() => LineOutput::default(),
        Statement::Comment(rest) => LineOutput::parsed(Parsed::Title(rest.to_string())),
        Statement::ModelCard(tokens) => match parse_model(line, &tokens) {
            Ok(ParsedModel { model, rejected }) => {
                let diagnostics = if warn_dropped_params {
                    rejected
                        .iter()
                        .map(|r| {
                            Diagnostic::warning(
                                line,
                                format!("invalid parameter {}: {}", r.key, r.error),
                            )
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                LineOutput {
                    parsed: Some(Parsed::Model(model)),
                    diagnostics,
                }
            }
            Err(e) => LineOutput::error(line, e),
        },
        Statement::Directive(tokens) => match parse_command(line, &tokens) {
            Ok(cmd) => LineOutput::parsed(Parsed::Command(cmd)),
            Err(e) => LineOutput::error(line, e),
        },
        Statement::Instance(tokens) => match parse_component(line, &tokens) {
            Ok(comp) => LineOutput::parsed(Parsed::Component(comp)),
            Err(e) => LineOutput::error(line, e),
        },
    }
}
