//! Line tokenizer and statement classifier.
//!
//! Every trimmed line is split on whitespace and tagged with the kind of
//! statement it holds. The router in [`super::parse_line`] matches on the
//! tag, so dispatch is exhaustive over [`Statement`].

/// Marker that starts a comment (and title) line.
pub const COMMENT_MARKER: char = '*';

/// Marker that starts a directive line.
pub const DIRECTIVE_MARKER: char = '.';

/// Directive keyword for model cards (matched case-insensitively).
pub const MODEL_KEYWORD: &str = "model";

/// A classified netlist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    /// Empty or whitespace-only line
    Blank,
    /// Comment line; holds the text after the marker, trimmed
    Comment(&'a str),
    /// `.model` card; holds the tokens after the keyword
    ModelCard(Vec<&'a str>),
    /// Any other directive; holds the tokens after the marker, keyword first
    Directive(Vec<&'a str>),
    /// Component instance; holds all tokens, designator first
    Instance(Vec<&'a str>),
}

impl Statement<'_> {
    /// Short name of the statement kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Comment(_) => "comment",
            Self::ModelCard(_) => "model",
            Self::Directive(_) => "directive",
            Self::Instance(_) => "instance",
        }
    }
}

/// Split a line into whitespace-delimited tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Classify a single source line.
pub fn classify(line: &str) -> Statement<'_> {
    let line = line.trim();

    if line.is_empty() {
        return Statement::Blank;
    }

    if let Some(rest) = line.strip_prefix(COMMENT_MARKER) {
        return Statement::Comment(rest.trim());
    }

    if let Some(rest) = line.strip_prefix(DIRECTIVE_MARKER) {
        let mut tokens = tokenize(rest);
        if matches!(tokens.first(), Some(k) if k.eq_ignore_ascii_case(MODEL_KEYWORD)) {
            tokens.remove(0);
            return Statement::ModelCard(tokens);
        }
        return Statement::Directive(tokens);
    }

    Statement::Instance(tokenize(line))
}

/// Check that a token is a plain identifier (letters, digits and `_`).
pub fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split a `key=value` token at its first `=`.
///
/// Returns `None` for tokens without `=` or with an empty key.
pub fn split_assignment(token: &str) -> Option<(&str, &str)> {
    token
        .split_once('=')
        .filter(|(key, _)| !key.is_empty())
}
