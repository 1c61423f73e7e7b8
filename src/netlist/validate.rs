//! Semantic validation of a fully assembled netlist.

use super::{Diagnostic, Netlist};

/// Validate a netlist after parsing has completed.
///
/// Checks:
/// - Every component's model reference names a defined model card
///
/// Returns the diagnostics found; the caller appends them to its own list.
pub fn validate_netlist(netlist: &Netlist) -> Vec<Diagnostic> {
    netlist
        .components
        .iter()
        .filter_map(|comp| {
            let model = comp.model_ref()?;
            if netlist.models.contains_key(model) {
                None
            } else {
                Some(Diagnostic::error(
                    comp.line,
                    format!("undefined model: {}", model),
                ))
            }
        })
        .collect()
}
