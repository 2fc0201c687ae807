use cfg_enumerate::labelling::every_labelling;
use test_case::test_case;

#[test]
fn test_two_symbols_two_positions() {
    let all: Vec<Vec<&str>> = every_labelling(&["a", "b"], 2).collect();
    assert_eq!(all, [vec!["a", "a"], vec!["a", "b"]]);
}

#[test]
fn test_three_symbols_three_positions() {
    let all: Vec<Vec<&str>> = every_labelling(&["a", "b", "c"], 3).collect();
    assert_eq!(
        all,
        [
            vec!["a", "a", "a"],
            vec!["a", "a", "b"],
            vec!["a", "b", "a"],
            vec!["a", "b", "b"],
            vec!["a", "b", "c"]
        ]
    );
}

#[test]
fn test_empty_alphabet_yields_nothing() {
    assert_eq!(every_labelling::<char>(&[], 5).count(), 0);
}

#[test]
fn test_single_position_uses_the_first_symbol() {
    let all: Vec<Vec<&str>> = every_labelling(&["a", "b", "c"], 1).collect();
    assert_eq!(all, [vec!["a"]]);
}

#[test_case(2, 2)]
#[test_case(3, 3)]
#[test_case(3, 4)]
#[test_case(2, 4)]
#[test_case(4, 4)]
#[test_case(1, 5)]
#[test_case(5, 1)]
#[test_case(0, 5)]
#[test_case(0, 0)]
#[test_case(3, 0)]
#[test_case(5, 6)]
fn test_counts_match_set_partitions(alphabet_len: usize, length: usize) {
    let alphabet: Vec<usize> = (0..alphabet_len).collect();
    let count = every_labelling(&alphabet, length).count();
    assert_eq!(count, partitions_up_to(length, alphabet_len));
}

#[test_case(2, 3)]
#[test_case(4, 2)]
#[test_case(1, 4)]
fn test_first_labelling_repeats_the_first_symbol(alphabet_len: usize, length: usize) {
    let alphabet: Vec<usize> = (0..alphabet_len).collect();
    let first = every_labelling(&alphabet, length).next().unwrap();
    assert_eq!(first, vec![0; length]);
}

/// Number of set partitions of `k` positions with at most `m` blocks; zero
/// when the alphabet is empty, matching the enumerator.
fn partitions_up_to(k: usize, m: usize) -> usize {
    if m == 0 {
        return 0;
    }
    // Stirling numbers of the second kind.
    let mut stirling = vec![vec![0usize; k + 1]; k + 1];
    stirling[0][0] = 1;
    for n in 1..=k {
        for j in 1..=n {
            stirling[n][j] = j * stirling[n - 1][j] + stirling[n - 1][j - 1];
        }
    }
    (0..=m.min(k)).map(|j| stirling[k][j]).sum()
}
