//! Grammar for component instance lines.

use std::collections::BTreeMap;

use super::lexer::is_identifier;
use super::value::parse_value;
use crate::error::StatementError;
use crate::netlist::{Component, ComponentType};

/// Parse a component instance from its tokens.
///
/// The shape is `<designator> <node>... <value-or-model>`, where the
/// designator's first letter fixes both the type and the node count.
/// Tokens past the value or model name are ignored.
pub fn parse_component(line: usize, tokens: &[&str]) -> Result<Component, StatementError> {
    let (&designator, rest) = tokens
        .split_first()
        .ok_or(StatementError::InvalidComponentSyntax)?;

    let first_char = designator
        .chars()
        .next()
        .filter(|c| c.is_ascii_alphabetic())
        .ok_or(StatementError::InvalidComponentSyntax)?;

    if !is_identifier(designator) || rest.len() < 2 {
        return Err(StatementError::InvalidComponentSyntax);
    }

    let component_type = ComponentType::from_prefix(first_char).ok_or(
        StatementError::UnsupportedComponentType(first_char.to_ascii_uppercase()),
    )?;

    let expected_nodes = component_type.expected_node_count();
    if rest.len() < expected_nodes + 1 {
        return Err(StatementError::InvalidComponentSyntax);
    }

    let nodes: Vec<String> = rest[..expected_nodes].iter().map(|n| n.to_string()).collect();
    let trailing = rest[expected_nodes];

    let mut params = BTreeMap::new();
    let mut model = None;

    if component_type.takes_model() {
        model = Some(trailing.to_string());
    } else {
        params.insert("value".to_string(), parse_value(trailing)?);
    }

    Ok(Component {
        line,
        name: designator.to_string(),
        component_type,
        nodes,
        model,
        params,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::ValueError;
    use crate::parser::lexer::tokenize;

    fn parse(text: &str) -> Result<Component, StatementError> {
        parse_component(1, &tokenize(text))
    }

    #[test]
    fn test_parse_resistor() {
        let comp = parse("R1 in out 10k").unwrap();
        assert_eq!(comp.component_type, ComponentType::Resistor);
        assert_eq!(comp.name, "R1");
        assert_eq!(comp.nodes, vec!["in", "out"]);
        assert_eq!(comp.params.len(), 1);
        assert_relative_eq!(comp.value().unwrap(), 10_000.0);
        assert_eq!(comp.model, None);
    }

    #[test]
    fn test_parse_lowercase_designator() {
        let comp = parse("c2 out 0 100n").unwrap();
        assert_eq!(comp.component_type, ComponentType::Capacitor);
        assert_relative_eq!(comp.value().unwrap(), 100e-9);

        let comp = parse("Lfilt a b 2.2m").unwrap();
        assert_eq!(comp.component_type, ComponentType::Inductor);
    }

    #[test]
    fn test_parse_four_terminal_device() {
        let comp = parse("M1 d g s b NMOS1").unwrap();
        assert_eq!(comp.component_type, ComponentType::FourTerminalDevice);
        assert_eq!(comp.nodes, vec!["d", "g", "s", "b"]);
        assert_eq!(comp.model_ref(), Some("NMOS1"));
        assert!(comp.params.is_empty());
    }

    #[test]
    fn test_unsupported_type() {
        assert_eq!(
            parse("Q1 c b e"),
            Err(StatementError::UnsupportedComponentType('Q'))
        );
        assert_eq!(
            parse("x1 a b sub"),
            Err(StatementError::UnsupportedComponentType('X'))
        );
    }

    #[test]
    fn test_invalid_syntax() {
        // Missing value
        assert_eq!(parse("R1 in out"), Err(StatementError::InvalidComponentSyntax));
        // Too few tokens overall
        assert_eq!(parse("R1 in"), Err(StatementError::InvalidComponentSyntax));
        assert_eq!(parse("Q1"), Err(StatementError::InvalidComponentSyntax));
        // Missing model name on a four-terminal device
        assert_eq!(parse("M1 d g s b"), Err(StatementError::InvalidComponentSyntax));
        // Designator must be an identifier starting with a letter
        assert_eq!(parse("1R a b 1k"), Err(StatementError::InvalidComponentSyntax));
        assert_eq!(parse("R-1 a b 1k"), Err(StatementError::InvalidComponentSyntax));
    }

    #[test]
    fn test_bad_value() {
        assert_eq!(
            parse("R1 a b 10x"),
            Err(StatementError::Value(ValueError::UnknownUnit('x')))
        );
        assert_eq!(
            parse("R1 a b abc"),
            Err(StatementError::Value(ValueError::InvalidNumber("abc".to_string())))
        );
    }

    #[test]
    fn test_trailing_tokens_ignored() {
        let comp = parse("R1 a b 1k tc=0.01").unwrap();
        assert_eq!(comp.params.len(), 1);
        assert_relative_eq!(comp.value().unwrap(), 1000.0);
    }
}
