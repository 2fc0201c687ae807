//! Enumeration of canonical labellings.
//!
//! A length-k labelling over an alphabet is canonical when the j-th
//! distinct symbol to appear, reading left to right, is always the j-th
//! alphabet symbol. Canonical labellings represent the set partitions of k
//! positions with at most `alphabet.len()` blocks, so enumerating them
//! enumerates coreference patterns: two sentences that differ only by a
//! renaming of labelled values collapse to one canonical form.

/// Yields every canonical length-`length` labelling over `alphabet`, in
/// lexicographic order of the position-to-block-index sequence.
///
/// With an empty alphabet nothing is yielded. Otherwise the first labelling
/// repeats `alphabet[0]` at every position:
///
/// ```
/// use cfg_enumerate::labelling::every_labelling;
///
/// let all: Vec<Vec<&str>> = every_labelling(&["a", "b"], 2).collect();
/// assert_eq!(all, [vec!["a", "a"], vec!["a", "b"]]);
/// ```
pub fn every_labelling<T: Clone>(alphabet: &[T], length: usize) -> Labellings<T> {
    let blocks = if alphabet.is_empty() {
        None
    } else {
        Some(vec![0; length])
    };
    Labellings {
        alphabet: alphabet.to_vec(),
        blocks,
    }
}

/// Iterator over canonical labellings. See [`every_labelling`].
pub struct Labellings<T> {
    alphabet: Vec<T>,
    /// Block index per position of the next labelling, or `None` once done.
    blocks: Option<Vec<usize>>,
}

impl<T: Clone> Iterator for Labellings<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        let blocks = self.blocks.as_mut()?;
        let item = blocks
            .iter()
            .map(|&block| self.alphabet[block].clone())
            .collect();
        if !advance(blocks, self.alphabet.len()) {
            self.blocks = None;
        }
        Some(item)
    }
}

/// Steps `blocks` to the next canonical sequence: the block index at a
/// position may exceed neither one more than the maximum before it nor the
/// last alphabet index. Returns false at the last sequence.
fn advance(blocks: &mut [usize], alphabet_len: usize) -> bool {
    // Position 0 always holds block 0.
    for position in (1..blocks.len()).rev() {
        let prefix_max = blocks[..position].iter().copied().max().unwrap_or(0);
        let bound = (prefix_max + 1).min(alphabet_len - 1);
        if blocks[position] < bound {
            blocks[position] += 1;
            for later in blocks[position + 1..].iter_mut() {
                *later = 0;
            }
            return true;
        }
    }
    false
}

#[test]
fn test_single_position() {
    let all: Vec<Vec<u8>> = every_labelling(&[7, 8, 9], 1).collect();
    assert_eq!(all, [vec![7]]);
}

#[test]
fn test_empty_alphabet() {
    assert_eq!(every_labelling::<u8>(&[], 5).count(), 0);
}
