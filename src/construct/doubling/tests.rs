use super::doubling;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

macro_rules! bytes {
    ($range:expr) => {
        prop::collection::vec(any::<u8>(), $range)
    };
}

proptest! {
    #[test]
    fn doubling_correctness(s in bytes!(0..2048_usize)) {
        prop_assert!(check(&s[..]));
    }

    #[test]
    fn doubling_correctness_small_alphabet(s in prop::collection::vec(0..4u8, 0..2048_usize)) {
        prop_assert!(check(&s[..]));
    }
}

fn build(s: &[u8]) -> (Vec<u32>, Vec<u32>) {
    let mut sa = vec![0; s.len()];
    let mut rank = vec![0; s.len()];
    doubling(s, &mut sa[..], &mut rank[..]);
    (sa, rank)
}

fn naive(s: &[u8]) -> Vec<u32> {
    let mut sa: Vec<u32> = (0..s.len() as u32).collect();
    sa.sort_by(|&i, &j| Ord::cmp(&s[i as usize..], &s[j as usize..]));
    sa
}

fn check(s: &[u8]) -> bool {
    let (sa, rank) = build(s);
    if sa.len() != s.len() || rank.len() != s.len() {
        return false;
    }
    // sa and rank are mutual inverses; this also proves sa is a permutation
    for (r, &i) in sa.iter().enumerate() {
        if rank[i as usize] as usize != r {
            return false;
        }
    }
    // suffixes appear in strictly increasing order
    for r in 1..sa.len() {
        let x = &s[sa[r - 1] as usize..];
        let y = &s[sa[r] as usize..];
        if x >= y {
            return false;
        }
    }
    true
}

#[test]
fn sorts_banana() {
    let (sa, rank) = build(b"banana");
    assert_eq!(sa, vec![5, 3, 1, 0, 4, 2]);
    assert_eq!(rank, vec![3, 2, 5, 1, 4, 0]);
}

#[test]
fn sorts_mississippi() {
    let (sa, _) = build(b"mississippi");
    assert_eq!(sa, vec![10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);
}

#[test]
fn sorts_abracadabra() {
    let (sa, _) = build(b"abracadabra");
    assert_eq!(sa, vec![10, 7, 0, 3, 5, 8, 1, 4, 6, 9, 2]);
}

#[test]
fn sorts_single_byte() {
    let (sa, rank) = build(b"a");
    assert_eq!(sa, vec![0]);
    assert_eq!(rank, vec![0]);
}

#[test]
fn sorts_empty() {
    let (sa, rank) = build(b"");
    assert!(sa.is_empty() && rank.is_empty());
}

#[test]
fn sorts_very_short_texts() {
    for s in [&b"ab"[..], b"ba", b"aa", b"abc", b"cba", b"aab", b"aba"] {
        assert!(check(s), "failed on {:?}", s);
    }
}

#[test]
fn sorts_runs_of_one_byte() {
    let (sa, rank) = build(b"aaaa");
    assert_eq!(sa, vec![3, 2, 1, 0]);
    assert_eq!(rank, vec![3, 2, 1, 0]);
}

#[test]
fn sorts_long_run_of_one_byte() {
    // shortest-tail seeding is exercised once per doubling stage
    let s = vec![b'a'; 1024];
    let (sa, _) = build(&s[..]);
    for (r, &i) in sa.iter().enumerate() {
        assert_eq!(i as usize, 1023 - r);
    }
}

#[test]
fn matches_naive_sort_on_fibonacci_words() {
    let mut prev = b"b".to_vec();
    let mut word = b"a".to_vec();
    while word.len() < 600 {
        let snapshot = word.clone();
        word.extend_from_slice(&prev[..]);
        prev = snapshot;
    }
    let (sa, _) = build(&word[..]);
    assert_eq!(sa, naive(&word[..]));
}

#[test]
fn matches_naive_sort_on_random_quaternary_text() {
    let mut rng = StdRng::seed_from_u64(4);
    let s: Vec<u8> = (0..1024).map(|_| rng.gen_range(0..4u8) + b'a').collect();
    let (sa, _) = build(&s[..]);
    assert_eq!(sa, naive(&s[..]));
}

#[test]
fn matches_naive_sort_on_byte_permutation() {
    let mut s: Vec<u8> = (0..=255).collect();
    let mut rng = StdRng::seed_from_u64(255);
    s.shuffle(&mut rng);
    let (sa, _) = build(&s[..]);
    assert_eq!(sa, naive(&s[..]));
}

#[test]
fn deterministic_across_runs() {
    let mut rng = StdRng::seed_from_u64(7);
    let s: Vec<u8> = (0..4096).map(|_| rng.gen_range(0..16u8)).collect();
    assert_eq!(build(&s[..]), build(&s[..]));
}
