//! Netlist data model and semantic validation.
//!
//! This module provides the structured representation produced by a parse.
//! The [`Netlist`] holds all components, directives and model cards; the
//! [`Diagnostic`] list travels next to it rather than inside it.

mod types;
mod validate;

pub use types::*;
pub use validate::validate_netlist;
