//! Fair, exhaustive enumeration of the sentences of context-free grammars.
//!
//! Given a grammar in an EBNF-like dialect, [`Language`] lazily enumerates
//! every sentence of the described language, interleaving depth and breadth
//! so that for every length bound there is a finite index by which all
//! sentences within the bound have appeared. The intended use is fuzz
//! testing: exhaustive, progressively growing corpora of syntactically
//! valid inputs.
//!
//! ```
//! use cfg_enumerate::Language;
//!
//! let language = Language::parse(r#"Language "ab": foo = "a" | "b" foo;"#)?;
//! let first: Vec<String> = language.sentences().take(3).collect();
//! assert_eq!(first, ["a", "ba", "bba"]);
//! # Ok::<(), cfg_enumerate::GrammarError>(())
//! ```
//!
//! A rule marked with `!` is labelled: its values are interchangeable, and
//! sentences that differ only by a renaming of them are enumerated once, in
//! canonical form. Enumeration is deterministic, single-threaded and
//! pull-based; memory grows with the number of sentences produced, which is
//! the price of replaying the streams that fair interleaving re-reads.

pub mod buffered;
pub mod combination;
mod compile;
pub mod error;
mod generate;
pub mod grammar;
pub mod labelling;
pub mod language;
pub mod parse;
pub mod validate;

pub use crate::error::{GrammarError, ParseError, ValidationError};
pub use crate::generate::Sentences;
pub use crate::grammar::{Grammar, Production, RepeatOp, Rule, Span};
pub use crate::language::Language;
