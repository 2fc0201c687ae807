//! Grammar validation.
//!
//! Enumeration never fails once a grammar passes validation, so everything
//! that could make the fair traversal misbehave is rejected here: duplicate
//! rule names, references to undeclared rules, and rules that can never
//! produce a finite sentence. Productivity is computed as a fixpoint over
//! the rule set, in the manner of a right-hand-side closure: a literal and
//! the empty production are productive, a sequence needs every element, a
//! choice needs some alternative, `*` and `?` can always match nothing, and
//! `+` inherits from its operand.

use std::collections::HashMap;

use bit_vec::BitVec;
use log::debug;

use crate::error::ValidationError;
use crate::grammar::{Grammar, Production, RepeatOp};

/// Checks a grammar for structural soundness. Returns every error found,
/// in declaration order: duplicates and undeclared references first, then
/// the non-productive rules.
pub fn validate(grammar: &Grammar) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut rule_index: HashMap<&str, usize> = HashMap::new();
    for (index, rule) in grammar.rules.iter().enumerate() {
        if rule_index.contains_key(rule.name.as_str()) {
            errors.push(ValidationError::DuplicateRule {
                name: rule.name.clone(),
                span: rule.span,
            });
        } else {
            rule_index.insert(rule.name.as_str(), index);
        }
    }

    for rule in &grammar.rules {
        undeclared_refs(&rule.production, &rule_index, &mut errors);
    }

    let productive = productive_rules(grammar, &rule_index);
    for (index, rule) in grammar.rules.iter().enumerate() {
        if !productive[index] {
            errors.push(ValidationError::InfiniteLoop {
                name: rule.name.clone(),
                span: rule.span,
            });
        }
    }

    debug!(
        "validated grammar `{}`: {} rules, {} errors",
        grammar.name,
        grammar.rules.len(),
        errors.len()
    );
    errors
}

fn undeclared_refs(
    production: &Production,
    rules: &HashMap<&str, usize>,
    errors: &mut Vec<ValidationError>,
) {
    match production {
        Production::Literal(_) => {}
        Production::RuleRef { name, span } => {
            if !rules.contains_key(name.as_str()) {
                errors.push(ValidationError::RuleNotDeclared {
                    name: name.clone(),
                    span: *span,
                });
            }
        }
        Production::Sequence(parts) | Production::Choice(parts) => {
            for part in parts {
                undeclared_refs(part, rules, errors);
            }
        }
        Production::Repeat { production, .. } => undeclared_refs(production, rules, errors),
    }
}

/// Computes the set of productive rules to a fixpoint.
fn productive_rules(grammar: &Grammar, rules: &HashMap<&str, usize>) -> BitVec {
    let mut productive = BitVec::from_elem(grammar.rules.len(), false);
    loop {
        let mut changed = false;
        for (index, rule) in grammar.rules.iter().enumerate() {
            if !productive[index] && is_productive(&rule.production, &productive, rules) {
                productive.set(index, true);
                changed = true;
            }
        }
        if !changed {
            return productive;
        }
    }
}

fn is_productive(
    production: &Production,
    productive: &BitVec,
    rules: &HashMap<&str, usize>,
) -> bool {
    match production {
        Production::Literal(_) => true,
        Production::RuleRef { name, .. } => match rules.get(name.as_str()) {
            Some(&index) => productive[index],
            // Undeclared references are reported separately; counting them
            // as productive keeps one mistake at one error.
            None => true,
        },
        Production::Sequence(parts) => parts
            .iter()
            .all(|part| is_productive(part, productive, rules)),
        Production::Choice(alternatives) => alternatives
            .iter()
            .any(|alternative| is_productive(alternative, productive, rules)),
        Production::Repeat {
            op: RepeatOp::ZeroOrMore | RepeatOp::Optional,
            ..
        } => true,
        Production::Repeat {
            op: RepeatOp::OneOrMore,
            production,
        } => is_productive(production, productive, rules),
    }
}
