//! Replayable buffering of single-pass iterators.

use std::cell::RefCell;
use std::rc::Rc;

/// Wraps a single-pass iterator so that any number of consumers can read it
/// from the start. Values are pulled from the source once, on first access,
/// and memoized for every later reader.
///
/// Clones share one buffer. Not for use across threads: every read may
/// mutate the shared cache.
pub struct BufferedIterable<T> {
    shared: Rc<RefCell<Buffer<T>>>,
}

struct Buffer<T> {
    source: Box<dyn Iterator<Item = T>>,
    items: Vec<T>,
    exhausted: bool,
}

impl<T> Clone for BufferedIterable<T> {
    fn clone(&self) -> Self {
        BufferedIterable {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: Clone> BufferedIterable<T> {
    /// Starts buffering the given source.
    pub fn new<I>(source: I) -> Self
    where
        I: Iterator<Item = T> + 'static,
    {
        BufferedIterable {
            shared: Rc::new(RefCell::new(Buffer {
                source: Box::new(source),
                items: Vec::new(),
                exhausted: false,
            })),
        }
    }

    /// Returns the value at `index`, pulling and memoizing source values as
    /// needed. Returns `None` when the source ends before `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        let mut buffer = self.shared.borrow_mut();
        while buffer.items.len() <= index && !buffer.exhausted {
            match buffer.source.next() {
                Some(item) => buffer.items.push(item),
                None => buffer.exhausted = true,
            }
        }
        buffer.items.get(index).cloned()
    }

    /// Returns an independent cursor replaying the stream from position 0.
    pub fn iter(&self) -> BufferedIter<T> {
        BufferedIter {
            buffer: self.clone(),
            position: 0,
        }
    }
}

/// An independent cursor over a [`BufferedIterable`].
pub struct BufferedIter<T> {
    buffer: BufferedIterable<T>,
    position: usize,
}

impl<T: Clone> Iterator for BufferedIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.buffer.get(self.position);
        if item.is_some() {
            self.position += 1;
        }
        item
    }
}
