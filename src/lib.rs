//! # Netlist Core
//!
//! A concurrent parser for SPICE-style circuit netlists.
//!
//! This library provides:
//! - Per-statement grammars for component instances, model cards and directives
//! - Decoding of numeric values with SI multiplier suffixes
//! - A worker pool that parses lines in parallel and assembles one netlist
//! - Non-fatal, per-line diagnostics instead of aborting on the first bad line
//! - A semantic pass that checks model references
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`parser`] - Statement classification and the per-kind grammars
//! - [`netlist`] - Netlist data model and semantic validation
//! - [`session`] - Concurrent orchestration and configuration
//! - [`error`] - Fatal and statement-level error types
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! netlist amplifier.sp --workers 4 --sorted
//! ```
//!
//! ### Library
//!
//! ```
//! let outcome = netlist_core::parse_str("* RC\nR1 in out 10k\nC1 out 0 100n\n").unwrap();
//! assert_eq!(outcome.netlist.title, "RC");
//! assert_eq!(outcome.netlist.components.len(), 2);
//! assert!(outcome.diagnostics.is_empty());
//! ```
//!
//! ## Error Model
//!
//! Only failing to open or read the input is fatal. Malformed statements
//! are skipped and reported as [`Diagnostic`]s next to the netlist.

pub mod error;
pub mod netlist;
pub mod parser;
pub mod session;

// Re-export main types for convenience
pub use error::{NetlistError, Result};
pub use netlist::{Command, Component, ComponentType, Diagnostic, Model, Netlist, Severity};
pub use session::{parse_file, parse_reader, parse_str, ParseOutcome, ParseSession, ParserConfig};
