//! The grammar syntax tree.
//!
//! This is the boundary between the textual dialect and the enumeration
//! engine: [`crate::parse`] produces it, [`crate::validate`] checks it, and
//! compilation lowers it. The tree is immutable for the life of every
//! enumeration built from it.
//!
//! `Display` renders a tree back to canonical source text: double-quoted
//! literals, `ℇ` for the empty production, parentheses only where
//! precedence demands them. Parsing the rendered text yields a tree that
//! renders to the same text again.

use std::fmt;

/// Byte offsets of a region of grammar source text.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Creates a span from its start and end offsets.
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }
}

/// Postfix repetition operators.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RepeatOp {
    /// `*`: zero or more repetitions.
    ZeroOrMore,
    /// `+`: one or more repetitions.
    OneOrMore,
    /// `?`: zero or one occurrence.
    Optional,
}

/// One production of a grammar rule.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Production {
    /// Emits exactly the given string.
    Literal(String),
    /// Stands for the named rule's production.
    RuleRef {
        /// Name of the referenced rule.
        name: String,
        /// Offsets of the reference in the source text.
        span: Span,
    },
    /// Concatenation, in order. The empty sequence is the empty
    /// production `ℇ`.
    Sequence(Vec<Production>),
    /// Alternation, in order. The order is observable in enumeration.
    Choice(Vec<Production>),
    /// A postfix-operated production.
    Repeat {
        /// The operator.
        op: RepeatOp,
        /// The operand.
        production: Box<Production>,
    },
}

/// A named rule.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    /// The rule's name, unique within a valid grammar.
    pub name: String,
    /// Offsets of the rule's name in the source text.
    pub span: Span,
    /// Whether the rule is labelled (`name!`). Values of a labelled rule
    /// are interchangeable: only their coreference pattern across a
    /// sentence matters.
    pub labeled: bool,
    /// The rule's production.
    pub production: Production,
}

/// A grammar: a name and an ordered list of rules. The first rule is the
/// root of enumeration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grammar {
    /// The grammar's name.
    pub name: String,
    /// The rules, in declaration order.
    pub rules: Vec<Rule>,
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Language ")?;
        write_quoted(f, &self.name)?;
        writeln!(f, ":")?;
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.labeled {
            write!(f, "!")?;
        }
        write!(f, " = {};", self.production)
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_production(f, self, CHOICE)
    }
}

// Precedence contexts, loosest to tightest: alternatives bind loosest,
// juxtaposition next, postfix operands tightest.
const CHOICE: u8 = 0;
const SEQUENCE: u8 = 1;
const OPERAND: u8 = 2;

fn write_production(
    f: &mut fmt::Formatter<'_>,
    production: &Production,
    precedence: u8,
) -> fmt::Result {
    match production {
        Production::Literal(text) => write_quoted(f, text),
        Production::RuleRef { name, .. } => write!(f, "{}", name),
        Production::Sequence(parts) if parts.is_empty() => write!(f, "ℇ"),
        Production::Sequence(parts) => {
            let parenthesized = precedence >= OPERAND;
            if parenthesized {
                write!(f, "(")?;
            }
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write_production(f, part, SEQUENCE)?;
            }
            if parenthesized {
                write!(f, ")")?;
            }
            Ok(())
        }
        Production::Choice(alternatives) => {
            let parenthesized = precedence >= SEQUENCE;
            if parenthesized {
                write!(f, "(")?;
            }
            for (i, alternative) in alternatives.iter().enumerate() {
                if i > 0 {
                    write!(f, " | ")?;
                }
                write_production(f, alternative, CHOICE)?;
            }
            if parenthesized {
                write!(f, ")")?;
            }
            Ok(())
        }
        Production::Repeat { op, production } => {
            write_production(f, production, OPERAND)?;
            let symbol = match op {
                RepeatOp::ZeroOrMore => "*",
                RepeatOp::OneOrMore => "+",
                RepeatOp::Optional => "?",
            };
            write!(f, "{}", symbol)
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    write!(f, "\"")?;
    for ch in text.chars() {
        match ch {
            '\\' => write!(f, "\\\\")?,
            '"' => write!(f, "\\\"")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            other => write!(f, "{}", other)?,
        }
    }
    write!(f, "\"")
}
