//! The top-level entry points.

use std::rc::Rc;

use crate::compile::{compile, ProductionGraph};
use crate::error::GrammarError;
use crate::generate::{sentences, Sentences};
use crate::grammar::Grammar;
use crate::parse::parse_grammar;
use crate::validate::validate;

/// A validated, compiled grammar, ready to enumerate its sentences.
///
/// The compiled production graph is built once and shared read-only by
/// every enumeration; each [`Language::sentences`] call owns fresh cursors
/// and buffers.
#[derive(Debug)]
pub struct Language {
    grammar: Grammar,
    graph: Rc<ProductionGraph>,
}

impl Language {
    /// Validates and compiles a grammar, returning every validation error
    /// found.
    pub fn try_new(grammar: Grammar) -> Result<Language, Vec<GrammarError>> {
        let errors = validate(&grammar);
        if !errors.is_empty() {
            return Err(errors.into_iter().map(GrammarError::from).collect());
        }
        let graph = Rc::new(compile(&grammar));
        Ok(Language { grammar, graph })
    }

    /// Validates and compiles a grammar, returning the first error found.
    pub fn new(grammar: Grammar) -> Result<Language, GrammarError> {
        Language::try_new(grammar).map_err(first_error)
    }

    /// Parses, validates and compiles grammar source text, returning every
    /// error found. A syntax error precludes validation, so it arrives
    /// alone.
    pub fn try_parse(source: &str) -> Result<Language, Vec<GrammarError>> {
        let grammar =
            parse_grammar(source).map_err(|error| vec![GrammarError::from(error)])?;
        Language::try_new(grammar)
    }

    /// Parses, validates and compiles grammar source text, returning the
    /// first error found.
    pub fn parse(source: &str) -> Result<Language, GrammarError> {
        Language::try_parse(source).map_err(first_error)
    }

    /// The grammar this language was built from.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Returns a fresh, fair enumeration of every sentence of the
    /// language, starting from the first declared rule.
    pub fn sentences(&self) -> Sentences {
        sentences(Rc::clone(&self.graph))
    }
}

fn first_error(mut errors: Vec<GrammarError>) -> GrammarError {
    // Construction never produces an empty error list.
    errors.remove(0)
}
