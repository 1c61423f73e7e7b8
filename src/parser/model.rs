//! Grammar for `.model` cards.

use std::collections::BTreeMap;

use super::lexer::{is_identifier, split_assignment, tokenize};
use super::value::parse_value;
use crate::error::{StatementError, ValueError};
use crate::netlist::Model;

/// A model parameter whose value could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedParam {
    /// Parameter name
    pub key: String,
    /// Why the value was rejected
    pub error: ValueError,
}

/// Result of parsing a model card.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedModel {
    /// The model as recorded
    pub model: Model,
    /// Parameters dropped from the model
    pub rejected: Vec<RejectedParam>,
}

/// Parse a model card from the tokens following the `.model` keyword.
///
/// Parameters may be wrapped in parentheses, which may also be glued to
/// the type (`NMOS(vto=0.7)`). Tokens without `=` are ignored. A parameter
/// whose value fails to decode is left out of the model and listed in
/// [`ParsedModel::rejected`].
pub fn parse_model(line: usize, tokens: &[&str]) -> Result<ParsedModel, StatementError> {
    let body = tokens.join(" ").replace(['(', ')'], " ");
    let tokens = tokenize(&body);

    let (name, model_type, params) = match tokens.as_slice() {
        [name, model_type, params @ ..] if is_identifier(name) && is_identifier(model_type) => {
            (*name, *model_type, params)
        }
        _ => return Err(StatementError::InvalidModelSyntax),
    };

    let mut values = BTreeMap::new();
    let mut rejected = Vec::new();

    for (key, raw) in params.iter().filter_map(|p| split_assignment(p)) {
        match parse_value(raw) {
            Ok(v) => {
                values.insert(key.to_string(), v);
            }
            Err(error) => rejected.push(RejectedParam {
                key: key.to_string(),
                error,
            }),
        }
    }

    Ok(ParsedModel {
        model: Model {
            line,
            name: name.to_string(),
            model_type: model_type.to_string(),
            params: values,
        },
        rejected,
    })
}
