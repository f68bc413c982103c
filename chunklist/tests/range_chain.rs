// SPDX-License-Identifier: Apache-2.0

use std::collections::VecDeque;
use itertools::Itertools;
use pretty_assertions::assert_eq;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use chunklist::{ChunkList, RangeChain};

#[macro_use]
mod common;

#[test]
fn skips_empty_ranges() {
	let (a, b) = (vec![0, 1, 2], vec![3, 4]);
	let empty = Vec::new();
	let mut chain = RangeChain::new();
	chain.add(&a).add(&empty).add(&b);
	assert_eq!(chain.iter().copied().collect_vec(), (0..5).collect_vec());
	assert_eq!(chain.iter().rev().copied().collect_vec(), (0..5).rev().collect_vec());

	let mut only_empty = RangeChain::new();
	only_empty.add(&empty).add(&empty);
	assert!(only_empty.is_empty());
	assert_eq!(only_empty.iter().next(), None);
	assert_eq!(only_empty.iter().next_back(), None);
}

#[test]
fn chunk_ranges() {
	let list: ChunkList<u32, 16> = (0..10).collect();
	let chain: RangeChain<_> = list.chunks().rev().collect();
	assert_eq!(chain.range_count(), 3);
	assert_eq!(chain.iter().copied().collect_vec(), [8, 9, 4, 5, 6, 7, 0, 1, 2, 3]);

	let chain = RangeChain::from((0..list.chunk_count()).map(|i| list.chunk_range(i)).collect_vec());
	assert!(chain.iter().copied().eq(0..10));
}

#[test]
fn modify_through_chain() {
	let mut deque = VecDeque::from([1, 2, 3]);
	let mut array = [4, 5];
	let (front, back) = deque.as_mut_slices();
	let mut chain = RangeChain::new();
	chain.add(front).add(back).add(&mut array);
	for value in chain {
		*value *= 10;
	}
	assert_eq!(deque, [10, 20, 30]);
	assert_eq!(array, [40, 50]);
}

#[test]
fn size_hint() {
	let (a, empty) = ([0; 4], []);
	let chain = RangeChain::from(vec![a.iter(), empty.iter(), a.iter()]);
	let mut iter = chain.iter();
	assert_eq!(iter.size_hint(), (8, Some(8)));
	iter.next();
	iter.next_back();
	assert_eq!(iter.size_hint(), (6, Some(6)));

	let unbounded = RangeChain::from(vec![0.., 5..]);
	assert_eq!(unbounded.iter().size_hint(), (usize::MAX, None));
	assert!(unbounded.iter().take(3).eq(0..3));
}

#[quickcheck]
fn matches_concat(ranges: Vec<Vec<u8>>) -> TestResult {
	let chain: RangeChain<_> = ranges.iter().collect();
	let expected = ranges.concat();
	if chain.is_empty() != expected.is_empty() {
		return TestResult::error("emptiness differs")
	}

	let forward = chain.iter().copied().collect_vec();
	if forward != expected {
		return qc_assert_eq!(forward, expected)
	}
	qc_assert_eq!(
		chain.into_iter().rev().copied().collect_vec(),
		expected.into_iter().rev().collect_vec()
	)
}

#[quickcheck]
fn alternating_ends(ranges: Vec<Vec<u8>>) -> TestResult {
	let chain: RangeChain<_> = ranges.iter().collect();
	let mut iter = chain.iter();
	let mut front = Vec::new();
	let mut back = Vec::new();
	loop {
		match iter.next() {
			Some(&v) => front.push(v),
			None => break
		}
		match iter.next_back() {
			Some(&v) => back.push(v),
			None => break
		}
	}
	back.reverse();
	front.extend(back);
	qc_assert_eq!(front, ranges.concat())
}
