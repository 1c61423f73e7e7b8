//! Grammar for directives other than model cards.

use std::collections::BTreeMap;

use super::lexer::split_assignment;
use crate::error::StatementError;
use crate::netlist::Command;

/// Parse a directive from the tokens following the `.` marker.
///
/// Every keyword is accepted. Only the analysis directives (`TRAN`, `AC`,
/// `DC`) record their `key=value` options; other directives keep an empty
/// option map whatever follows them.
pub fn parse_command(line: usize, tokens: &[&str]) -> Result<Command, StatementError> {
    let (keyword, args) = tokens.split_first().ok_or(StatementError::EmptyCommand)?;

    let mut command = Command {
        line,
        command_type: keyword.to_uppercase(),
        options: BTreeMap::new(),
    };

    if command.is_analysis() {
        command.options = args
            .iter()
            .filter_map(|arg| split_assignment(arg))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
    }

    Ok(command)
}
