use cfg_enumerate::buffered::BufferedIterable;
use cfg_enumerate::combination::{every_combination, every_combination_many};

#[test]
fn test_naturals_exact_order() {
    let first: Vec<(u32, u32)> = every_combination(1u32.., 1u32..).take(10).collect();
    assert_eq!(
        first,
        [
            (1, 1),
            (2, 1),
            (1, 2),
            (2, 2),
            (3, 1),
            (3, 2),
            (1, 3),
            (2, 3),
            (3, 3),
            (4, 1)
        ]
    );
}

#[test]
fn test_finite_streams_complete() {
    let all: Vec<(char, char)> = every_combination("abc".chars(), "abc".chars()).collect();
    assert_eq!(
        all,
        [
            ('a', 'a'),
            ('b', 'a'),
            ('a', 'b'),
            ('b', 'b'),
            ('c', 'a'),
            ('c', 'b'),
            ('a', 'c'),
            ('b', 'c'),
            ('c', 'c')
        ]
    );
}

#[test]
fn test_finite_left_infinite_right() {
    let first: Vec<(&str, u32)> =
        every_combination(["x", "y"].into_iter(), 1u32..).take(8).collect();
    assert_eq!(
        first,
        [
            ("x", 1),
            ("y", 1),
            ("x", 2),
            ("y", 2),
            ("x", 3),
            ("y", 3),
            ("x", 4),
            ("y", 4)
        ]
    );
}

#[test]
fn test_empty_streams() {
    let all: Vec<(u8, u8)> = every_combination(std::iter::empty(), 0u8..3).collect();
    assert!(all.is_empty());
    let all: Vec<(u8, u8)> = every_combination(0u8..3, std::iter::empty()).collect();
    assert!(all.is_empty());
}

#[test]
fn test_many_of_none_yields_the_empty_tuple() {
    let all: Vec<Vec<u8>> = every_combination_many(Vec::new()).collect();
    assert_eq!(all, [Vec::<u8>::new()]);
}

#[test]
fn test_many_of_one_yields_singletons() {
    let streams: Vec<Box<dyn Iterator<Item = u8>>> = vec![Box::new(0u8..3)];
    let all: Vec<Vec<u8>> = every_combination_many(streams).collect();
    assert_eq!(all, [vec![0], vec![1], vec![2]]);
}

#[test]
fn test_many_of_two() {
    let streams: Vec<Box<dyn Iterator<Item = u8>>> = vec![Box::new(0u8..2), Box::new(0u8..2)];
    let all: Vec<Vec<u8>> = every_combination_many(streams).collect();
    assert_eq!(all, [vec![0, 0], vec![1, 0], vec![0, 1], vec![1, 1]]);
}

#[test]
fn test_many_of_three() {
    let streams: Vec<Box<dyn Iterator<Item = u8>>> =
        vec![Box::new(0u8..2), Box::new(0u8..2), Box::new(0u8..2)];
    let all: Vec<Vec<u8>> = every_combination_many(streams).collect();
    assert_eq!(
        all,
        [
            vec![0, 0, 0],
            vec![1, 0, 0],
            vec![0, 1, 0],
            vec![1, 1, 0],
            vec![0, 0, 1],
            vec![1, 0, 1],
            vec![0, 1, 1],
            vec![1, 1, 1]
        ]
    );
}

#[test]
fn test_buffered_replay() {
    let buffered = BufferedIterable::new(0u8..5);
    let once: Vec<u8> = buffered.iter().collect();
    let twice: Vec<u8> = buffered.iter().collect();
    assert_eq!(once, [0, 1, 2, 3, 4]);
    assert_eq!(once, twice);
}

#[test]
fn test_buffered_cursors_advance_independently() {
    let buffered = BufferedIterable::new(0u8..4);
    let mut first = buffered.iter();
    let mut second = buffered.iter();
    assert_eq!(first.next(), Some(0));
    assert_eq!(first.next(), Some(1));
    assert_eq!(second.next(), Some(0));
    assert_eq!(first.next(), Some(2));
    assert_eq!(second.next(), Some(1));
    assert_eq!(second.next(), Some(2));
    assert_eq!(second.next(), Some(3));
    assert_eq!(second.next(), None);
    assert_eq!(first.next(), Some(3));
    assert_eq!(first.next(), None);
}

#[test]
fn test_buffered_index_access() {
    let buffered = BufferedIterable::new(10u8..13);
    assert_eq!(buffered.get(2), Some(12));
    assert_eq!(buffered.get(0), Some(10));
    assert_eq!(buffered.get(5), None);
    let all: Vec<u8> = buffered.iter().collect();
    assert_eq!(all, [10, 11, 12]);
}
