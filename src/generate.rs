//! Lazy enumeration of skeletons and sentences.
//!
//! Every production node is a factory of skeleton streams: a literal yields
//! its one fragment, a sequence interleaves its head with the rest of the
//! sequence through [`every_combination`], a choice runs its alternatives
//! round-robin, and a label marker yields one placeholder fragment. All
//! construction is deferred until the first pull, which is what keeps
//! stream creation over a cyclic graph finite.
//!
//! Pulls recurse through the graph, so every enumeration carries a guard
//! against self-dependent first values: streams are deterministic, so a
//! node whose first value requires a fresh stream of the same node can
//! never produce one. Such a stream stays empty instead of recursing
//! without end, and a choice drops it like any other exhausted
//! alternative. The guard fires only on computations that could never
//! return, so it is invisible on every terminating grammar.
//!
//! When a grammar has labelled rules, enumeration runs in two phases:
//! skeletons with placeholders first, then each skeleton expanded through
//! the labelling enumerator.

use std::cell::RefCell;
use std::iter;
use std::rc::Rc;

use bit_vec::BitVec;

use crate::combination::{every_combination, every_combination_many};
use crate::compile::{Node, NodeId, ProductionGraph};
use crate::labelling::every_labelling;

/// One piece of a sentence skeleton: literal text, or a placeholder for a
/// value of the named labelled rule.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Fragment {
    Literal(Rc<str>),
    Label(Rc<str>),
}

type Skeleton = Vec<Fragment>;

type SkeletonStream = Box<dyn Iterator<Item = Skeleton>>;

/// Shared state of one enumeration: the compiled graph, and the set of
/// nodes whose streams are computing their first value on the current call
/// path.
#[derive(Clone)]
struct Generation {
    graph: Rc<ProductionGraph>,
    opening: Rc<RefCell<BitVec>>,
}

/// A node's skeleton stream. The underlying stream is built on the first
/// pull, which runs under the re-entrancy guard: a node whose first value
/// turns out to require itself stays empty.
struct NodeStream {
    generation: Generation,
    node: NodeId,
    expand_labels: bool,
    started: bool,
    inner: Option<SkeletonStream>,
}

impl Iterator for NodeStream {
    type Item = Skeleton;

    fn next(&mut self) -> Option<Skeleton> {
        if self.started {
            return self.inner.as_mut()?.next();
        }
        self.started = true;
        if self.generation.opening.borrow()[self.node.usize()] {
            // This node's first value is already being computed on the
            // current call path; a fresh stream would repeat the identical
            // computation and never return.
            return None;
        }
        self.generation
            .opening
            .borrow_mut()
            .set(self.node.usize(), true);
        let mut inner = open(self.generation.clone(), self.node, self.expand_labels);
        let first = inner.next();
        self.generation
            .opening
            .borrow_mut()
            .set(self.node.usize(), false);
        self.inner = Some(inner);
        first
    }
}

/// Runs streams concurrently: one value from each live stream per cycle, in
/// insertion order. Exhausted streams drop out; the round-robin ends when
/// none remain.
struct RoundRobin {
    streams: Vec<SkeletonStream>,
    position: usize,
}

impl Iterator for RoundRobin {
    type Item = Skeleton;

    fn next(&mut self) -> Option<Skeleton> {
        loop {
            if self.streams.is_empty() {
                return None;
            }
            if self.position >= self.streams.len() {
                self.position = 0;
            }
            match self.streams[self.position].next() {
                Some(skeleton) => {
                    self.position += 1;
                    return Some(skeleton);
                }
                None => {
                    self.streams.remove(self.position);
                }
            }
        }
    }
}

/// Returns a fresh skeleton stream for a node. With `expand_labels`,
/// labelled rules stream their bodies; without, each yields its one
/// placeholder.
fn skeletons(generation: Generation, node: NodeId, expand_labels: bool) -> SkeletonStream {
    Box::new(NodeStream {
        generation,
        node,
        expand_labels,
        started: false,
        inner: None,
    })
}

fn open(generation: Generation, node: NodeId, expand_labels: bool) -> SkeletonStream {
    // Clone the node's shape out of the graph so the stream can own it.
    let node = generation.graph.node(node).clone();
    match node {
        Node::Literal(text) => Box::new(iter::once(vec![Fragment::Literal(text)])),
        Node::Sequence(parts) => sequence_skeletons(generation, parts, expand_labels),
        Node::Choice(alternatives) => {
            if alternatives.len() == 1 {
                return skeletons(generation, alternatives[0], expand_labels);
            }
            let streams = alternatives
                .iter()
                .map(|&alternative| skeletons(generation.clone(), alternative, expand_labels))
                .collect();
            Box::new(RoundRobin {
                streams,
                position: 0,
            })
        }
        Node::Labeled { rule, production } => {
            if expand_labels {
                skeletons(generation, production, true)
            } else {
                Box::new(iter::once(vec![Fragment::Label(rule)]))
            }
        }
    }
}

fn sequence_skeletons(
    generation: Generation,
    parts: Vec<NodeId>,
    expand_labels: bool,
) -> SkeletonStream {
    if parts.is_empty() {
        return Box::new(iter::once(Vec::new()));
    }
    if parts.len() == 1 {
        return skeletons(generation, parts[0], expand_labels);
    }
    let head = skeletons(generation.clone(), parts[0], expand_labels);
    let rest = parts[1..].to_vec();
    let tail = sequence_skeletons(generation, rest, expand_labels);
    Box::new(
        every_combination(head, tail).map(|(mut prefix, suffix)| {
            prefix.extend(suffix);
            prefix
        }),
    )
}

/// The sentences of a language, fairly interleaved by depth and breadth.
///
/// Returned by [`crate::Language::sentences`]. Each instance owns its own
/// cursors and buffers; the compiled grammar behind it is shared and
/// read-only.
pub struct Sentences {
    stream: Box<dyn Iterator<Item = String>>,
}

impl Iterator for Sentences {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.stream.next()
    }
}

pub(crate) fn sentences(graph: Rc<ProductionGraph>) -> Sentences {
    let root = match graph.root() {
        Some(root) => root,
        None => {
            return Sentences {
                stream: Box::new(iter::empty()),
            }
        }
    };
    let generation = Generation {
        opening: Rc::new(RefCell::new(BitVec::from_elem(graph.node_count(), false))),
        graph,
    };
    let stream: Box<dyn Iterator<Item = String>> = if generation.graph.has_labels() {
        let expander = generation.clone();
        Box::new(
            skeletons(generation, root, false)
                .flat_map(move |skeleton| expand(expander.clone(), skeleton)),
        )
    } else {
        Box::new(skeletons(generation, root, true).map(|skeleton| concat(&skeleton)))
    };
    Sentences { stream }
}

fn concat(skeleton: &[Fragment]) -> String {
    let mut sentence = String::new();
    for fragment in skeleton {
        match fragment {
            Fragment::Literal(text) => sentence.push_str(text),
            Fragment::Label(rule) => panic!("unexpanded label `{}` in a sentence", rule),
        }
    }
    sentence
}

/// Expands one skeleton's placeholders into concrete sentences. The
/// expansion of any one skeleton is finite: each labelled rule contributes
/// the canonical labellings of its placeholder positions over at most that
/// many values.
fn expand(generation: Generation, skeleton: Skeleton) -> Box<dyn Iterator<Item = String>> {
    // Placeholder counts per rule, in order of first occurrence.
    let mut groups: Vec<(Rc<str>, usize)> = Vec::new();
    for fragment in &skeleton {
        if let Fragment::Label(rule) = fragment {
            match groups.iter_mut().find(|(name, _)| name == rule) {
                Some((_, count)) => *count += 1,
                None => groups.push((Rc::clone(rule), 1)),
            }
        }
    }
    if groups.is_empty() {
        return Box::new(iter::once(concat(&skeleton)));
    }

    let mut labelling_streams: Vec<Box<dyn Iterator<Item = Vec<String>>>> = Vec::new();
    for (rule, count) in &groups {
        let alphabet = distinct_values(generation.clone(), rule, *count);
        labelling_streams.push(Box::new(every_labelling(&alphabet, *count)));
    }
    let names: Vec<Rc<str>> = groups.iter().map(|(rule, _)| Rc::clone(rule)).collect();
    Box::new(
        every_combination_many(labelling_streams)
            .map(move |assignment| substitute(&skeleton, &names, &assignment)),
    )
}

/// Collects the first `count` distinct values of a labelled rule's
/// unlabelled expansion, from a fresh stream. A rule whose language is
/// smaller than `count` contributes what it has, whether its stream ends
/// or keeps repeating old values.
fn distinct_values(generation: Generation, rule: &str, count: usize) -> Vec<String> {
    let node = match generation.graph.rule_node(rule) {
        Some(node) => node,
        None => panic!("label `{}` does not name a rule", rule),
    };
    // An ambiguous rule repeats a value some number of times between
    // distinct ones; a rule that feeds on itself can repeat one value
    // forever. A run of repeats proportional to the graph size means the
    // expansion has nothing new left.
    let stale_limit = 8 * generation.graph.node_count().max(8);
    let mut stale = 0;
    let mut values = Vec::with_capacity(count);
    for skeleton in skeletons(generation.clone(), node, true) {
        let value = concat(&skeleton);
        if values.contains(&value) {
            stale += 1;
            if stale >= stale_limit {
                break;
            }
            continue;
        }
        values.push(value);
        stale = 0;
        if values.len() == count {
            break;
        }
    }
    values
}

fn substitute(skeleton: &[Fragment], names: &[Rc<str>], assignment: &[Vec<String>]) -> String {
    // The i-th occurrence of a rule's placeholder takes the i-th element of
    // the rule's labelling.
    let mut cursors = vec![0usize; names.len()];
    let mut sentence = String::new();
    for fragment in skeleton {
        match fragment {
            Fragment::Literal(text) => sentence.push_str(text),
            Fragment::Label(rule) => {
                let group = match names.iter().position(|name| name == rule) {
                    Some(group) => group,
                    None => panic!("label `{}` missing from its skeleton's groups", rule),
                };
                let labelling = &assignment[group];
                let index = cursors[group];
                cursors[group] += 1;
                match labelling.get(index) {
                    Some(value) => sentence.push_str(value),
                    None => panic!("ran out of labels for rule `{}`", rule),
                }
            }
        }
    }
    sentence
}
