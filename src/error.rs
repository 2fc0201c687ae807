//! Error types.
//!
//! Every error carries the byte offsets of the offending source text, so
//! the reporting layer can point into the grammar file. Validation errors
//! are collected exhaustively before they surface; syntax errors stop at
//! the first offense.

use std::error::Error;
use std::fmt;

use crate::grammar::Span;

/// A syntax error in grammar source text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    /// What went wrong.
    pub message: String,
    /// Where in the source text.
    pub span: Span,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at offset {}..{}",
            self.message, self.span.start, self.span.end
        )
    }
}

impl Error for ParseError {}

/// A structural error found while validating a grammar.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationError {
    /// Two rules share a name. Reported at the later declaration.
    DuplicateRule {
        /// The shared name.
        name: String,
        /// Offsets of the later declaration's name.
        span: Span,
    },
    /// A rule reference names no declared rule.
    RuleNotDeclared {
        /// The undeclared name.
        name: String,
        /// Offsets of the reference.
        span: Span,
    },
    /// A rule can never produce a finite sentence, so enumerating it
    /// would not make progress.
    InfiniteLoop {
        /// The non-productive rule's name.
        name: String,
        /// Offsets of the rule's name.
        span: Span,
    },
}

impl ValidationError {
    /// The error message, without location.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::DuplicateRule { .. } => "Duplicate rule",
            ValidationError::RuleNotDeclared { .. } => "Rule not declared",
            ValidationError::InfiniteLoop { .. } => {
                "Infinite loop detected in leftmost choice"
            }
        }
    }

    /// The offending rule or reference name.
    pub fn name(&self) -> &str {
        match self {
            ValidationError::DuplicateRule { name, .. }
            | ValidationError::RuleNotDeclared { name, .. }
            | ValidationError::InfiniteLoop { name, .. } => name,
        }
    }

    /// Offsets of the offending source text.
    pub fn span(&self) -> Span {
        match self {
            ValidationError::DuplicateRule { span, .. }
            | ValidationError::RuleNotDeclared { span, .. }
            | ValidationError::InfiniteLoop { span, .. } => *span,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: `{}` at offset {}..{}",
            self.message(),
            self.name(),
            self.span().start,
            self.span().end
        )
    }
}

impl Error for ValidationError {}

/// Any way constructing a [`crate::Language`] can fail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GrammarError {
    /// The source text is not a grammar.
    Parse(ParseError),
    /// The grammar is structurally unsound.
    Validation(ValidationError),
}

impl From<ParseError> for GrammarError {
    fn from(error: ParseError) -> Self {
        GrammarError::Parse(error)
    }
}

impl From<ValidationError> for GrammarError {
    fn from(error: ValidationError) -> Self {
        GrammarError::Validation(error)
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::Parse(error) => error.fmt(f),
            GrammarError::Validation(error) => error.fmt(f),
        }
    }
}

impl Error for GrammarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GrammarError::Parse(error) => Some(error),
            GrammarError::Validation(error) => Some(error),
        }
    }
}
