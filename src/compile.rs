//! Lowering of the syntax tree into a production graph.
//!
//! Rules may be self- or mutually recursive, so the graph is genuinely
//! cyclic. Construction runs in two passes: allocate one node per rule,
//! then populate bodies, closing cycles through the already-allocated
//! indices. Every reference to a rule shares that rule's node. The graph
//! is immutable once built.
//!
//! Postfix operators are rewritten into right-recursive choice and
//! sequence forms, so enumeration only ever sees four node kinds.

use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::grammar::{Grammar, Production, RepeatOp};

/// Index of a node in its production graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) fn usize(self) -> usize {
        self.0 as usize
    }
}

/// A compiled production.
#[derive(Clone, Debug)]
pub(crate) enum Node {
    /// Emits exactly one string.
    Literal(Rc<str>),
    /// Concatenation, in order. Empty is the empty production.
    Sequence(Vec<NodeId>),
    /// Alternation, in order.
    Choice(Vec<NodeId>),
    /// Marks a labelled rule's production.
    Labeled {
        /// The labelled rule's name.
        rule: Rc<str>,
        /// The rule's compiled body.
        production: NodeId,
    },
}

/// The compiled, possibly cyclic production graph of a grammar.
#[derive(Debug)]
pub(crate) struct ProductionGraph {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    rule_nodes: HashMap<Rc<str>, NodeId>,
    labeled: bool,
}

impl ProductionGraph {
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.usize()]
    }

    /// The first declared rule's node, if the grammar has any rule.
    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn rule_node(&self, name: &str) -> Option<NodeId> {
        self.rule_nodes.get(name).copied()
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether any rule of the grammar is labelled.
    pub(crate) fn has_labels(&self) -> bool {
        self.labeled
    }
}

/// Compiles a validated grammar.
///
/// # Panics
///
/// Panics on a reference to an undeclared rule; [`crate::validate`] rejects
/// those before compilation.
pub(crate) fn compile(grammar: &Grammar) -> ProductionGraph {
    let mut compiler = Compiler {
        nodes: Vec::new(),
        rule_nodes: HashMap::new(),
    };

    // Pass 1: a placeholder node per rule, so references bind before any
    // body exists.
    for rule in &grammar.rules {
        let id = compiler.push(Node::Sequence(Vec::new()));
        compiler
            .rule_nodes
            .entry(Rc::from(rule.name.as_str()))
            .or_insert(id);
    }

    // Pass 2: populate the bodies.
    for rule in &grammar.rules {
        let target = compiler.rule_nodes[rule.name.as_str()];
        let body = compiler.production(&rule.production);
        compiler.nodes[target.usize()] = if rule.labeled {
            Node::Labeled {
                rule: Rc::from(rule.name.as_str()),
                production: body,
            }
        } else {
            Node::Sequence(vec![body])
        };
    }

    let root = grammar
        .rules
        .first()
        .map(|rule| compiler.rule_nodes[rule.name.as_str()]);
    let labeled = grammar.rules.iter().any(|rule| rule.labeled);
    debug!(
        "compiled grammar `{}` into {} nodes",
        grammar.name,
        compiler.nodes.len()
    );
    ProductionGraph {
        nodes: compiler.nodes,
        root,
        rule_nodes: compiler.rule_nodes,
        labeled,
    }
}

struct Compiler {
    nodes: Vec<Node>,
    rule_nodes: HashMap<Rc<str>, NodeId>,
}

impl Compiler {
    fn production(&mut self, production: &Production) -> NodeId {
        match production {
            Production::Literal(text) => self.push(Node::Literal(Rc::from(text.as_str()))),
            Production::RuleRef { name, .. } => match self.rule_nodes.get(name.as_str()) {
                Some(&id) => id,
                None => panic!("compiled a grammar with an undeclared rule `{}`", name),
            },
            Production::Sequence(parts) => {
                let children = parts.iter().map(|part| self.production(part)).collect();
                self.push(Node::Sequence(children))
            }
            Production::Choice(alternatives) => {
                let children = alternatives
                    .iter()
                    .map(|alternative| self.production(alternative))
                    .collect();
                self.push(Node::Choice(children))
            }
            Production::Repeat {
                op: RepeatOp::ZeroOrMore,
                production,
            } => {
                // `X*` becomes `C = ℇ | X C`.
                let cycle = self.push(Node::Sequence(Vec::new()));
                let empty = self.push(Node::Sequence(Vec::new()));
                let item = self.production(production);
                let item_then_cycle = self.push(Node::Sequence(vec![item, cycle]));
                self.nodes[cycle.usize()] = Node::Choice(vec![empty, item_then_cycle]);
                cycle
            }
            Production::Repeat {
                op: RepeatOp::OneOrMore,
                production,
            } => {
                // `X+` becomes `S = X (ℇ | S)`.
                let cycle = self.push(Node::Sequence(Vec::new()));
                let item = self.production(production);
                let empty = self.push(Node::Sequence(Vec::new()));
                let more = self.push(Node::Choice(vec![empty, cycle]));
                self.nodes[cycle.usize()] = Node::Sequence(vec![item, more]);
                cycle
            }
            Production::Repeat {
                op: RepeatOp::Optional,
                production,
            } => {
                // `X?` becomes `ℇ | X`.
                let empty = self.push(Node::Sequence(Vec::new()));
                let item = self.production(production);
                self.push(Node::Choice(vec![empty, item]))
            }
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}
