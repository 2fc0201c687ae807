//! Fair interleaving of possibly-infinite streams.
//!
//! [`every_combination`] enumerates the cross product of two streams along
//! expanding diagonals: the pair of the i-th left and j-th right value
//! appears at an output index bounded by a function of `max(i, j)`, so no
//! pair waits on an infinite prefix of either stream. Both sides are
//! buffered, which is what makes the repeated sweeps possible; memory grows
//! with the frontier.

use std::mem;

use crate::buffered::BufferedIterable;

/// Yields every pair from the cross product of two streams, fairly.
///
/// For two streams of naturals starting at 1, the output begins
/// `(1,1) (2,1) (1,2) (2,2) (3,1) (3,2) (1,3) (2,3) (3,3) (4,1)`. If either
/// stream ends, the remaining cross pairs with the other stream still all
/// appear, and the output ends once both streams are exhausted.
pub fn every_combination<A, B, I, J>(left: I, right: J) -> EveryCombination<A, B>
where
    A: Clone + 'static,
    B: Clone + 'static,
    I: Iterator<Item = A> + 'static,
    J: Iterator<Item = B> + 'static,
{
    EveryCombination {
        left: BufferedIterable::new(left),
        right: BufferedIterable::new(right),
        frontier: 0,
        left_done: false,
        right_done: false,
        step: Step::PullLeft,
    }
}

/// Iterator over fair pair combinations. See [`every_combination`].
pub struct EveryCombination<A, B> {
    left: BufferedIterable<A>,
    right: BufferedIterable<B>,
    frontier: usize,
    left_done: bool,
    right_done: bool,
    step: Step<A, B>,
}

enum Step<A, B> {
    /// Pull the left value on the frontier.
    PullLeft,
    /// Pair the frontier's left value with every earlier right value.
    LeftSweep { value: A, index: usize },
    /// Pull the right value on the frontier.
    PullRight,
    /// Pair every left value up to the frontier with the frontier's right
    /// value.
    RightSweep { value: B, index: usize },
    Finished,
}

impl<A: Clone, B: Clone> Iterator for EveryCombination<A, B> {
    type Item = (A, B);

    fn next(&mut self) -> Option<(A, B)> {
        loop {
            match mem::replace(&mut self.step, Step::Finished) {
                Step::PullLeft => {
                    self.step = if self.left_done {
                        Step::PullRight
                    } else if let Some(value) = self.left.get(self.frontier) {
                        Step::LeftSweep { value, index: 0 }
                    } else {
                        self.left_done = true;
                        Step::PullRight
                    };
                }
                Step::LeftSweep { value, index } => {
                    if index < self.frontier {
                        if let Some(right) = self.right.get(index) {
                            self.step = Step::LeftSweep {
                                value: value.clone(),
                                index: index + 1,
                            };
                            return Some((value, right));
                        }
                    }
                    self.step = Step::PullRight;
                }
                Step::PullRight => {
                    self.step = if self.right_done {
                        self.end_of_cycle()
                    } else if let Some(value) = self.right.get(self.frontier) {
                        Step::RightSweep { value, index: 0 }
                    } else {
                        self.right_done = true;
                        self.end_of_cycle()
                    };
                }
                Step::RightSweep { value, index } => {
                    if index <= self.frontier {
                        if let Some(left) = self.left.get(index) {
                            self.step = Step::RightSweep {
                                value: value.clone(),
                                index: index + 1,
                            };
                            return Some((left, value));
                        }
                    }
                    self.step = self.end_of_cycle();
                }
                Step::Finished => return None,
            }
        }
    }
}

impl<A, B> EveryCombination<A, B> {
    fn end_of_cycle(&mut self) -> Step<A, B> {
        if self.left_done && self.right_done {
            Step::Finished
        } else {
            self.frontier += 1;
            Step::PullLeft
        }
    }
}

/// Yields every tuple from the cross product of any number of streams, with
/// the same fairness as [`every_combination`].
///
/// No streams yield exactly the empty tuple; a single stream yields
/// singleton tuples; otherwise the first stream is pair-interleaved with
/// the combinations of the rest and prepended.
pub fn every_combination_many<T>(
    mut streams: Vec<Box<dyn Iterator<Item = T>>>,
) -> Box<dyn Iterator<Item = Vec<T>>>
where
    T: Clone + 'static,
{
    if streams.is_empty() {
        return Box::new(std::iter::once(Vec::new()));
    }
    let head = streams.remove(0);
    if streams.is_empty() {
        return Box::new(head.map(|value| vec![value]));
    }
    let tail = every_combination_many(streams);
    Box::new(every_combination(head, tail).map(|(first, mut rest)| {
        rest.insert(0, first);
        rest
    }))
}
