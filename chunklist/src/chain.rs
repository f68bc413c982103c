// SPDX-License-Identifier: Apache-2.0

//! Iteration over a chain of independently owned ranges as one sequence.

use std::iter::FusedIterator;
use std::vec;

/// A list of ranges, iterated one after another as a single sequence. Each range
/// is an iterator `I`, usually borrowing data owned elsewhere; the chain owns no
/// elements itself. Empty ranges are skipped.
///
/// ```
/// use chunklist::RangeChain;
///
/// let (a, b) = ([0, 1, 2], [3, 4]);
/// let mut chain = RangeChain::new();
/// chain.add(&a).add(&[]).add(&b);
/// assert!(chain.iter().copied().eq(0..5));
/// ```
#[derive(Clone, Debug)]
pub struct RangeChain<I> {
	ranges: Vec<I>,
}

impl<I> RangeChain<I> {
	/// Creates an empty chain.
	pub const fn new() -> Self {
		Self { ranges: Vec::new() }
	}

	/// Appends a range to the end of the chain.
	pub fn add(&mut self, range: impl IntoIterator<IntoIter = I>) -> &mut Self {
		self.ranges.push(range.into_iter());
		self
	}

	/// Returns the number of ranges, including empty ones.
	pub fn range_count(&self) -> usize { self.ranges.len() }

	/// Removes all ranges. The data they borrow is untouched.
	pub fn clear(&mut self) {
		self.ranges.clear();
	}
}

impl<I: Iterator + Clone> RangeChain<I> {
	/// Returns `true` if the chain yields no elements, either because it has no
	/// ranges or because all of them are empty.
	pub fn is_empty(&self) -> bool {
		self.ranges
			.iter()
			.all(|range| range.clone().next().is_none())
	}

	/// Iterates over the elements of every range in order, leaving the chain
	/// unchanged.
	pub fn iter(&self) -> Chain<I> {
		Chain::new(self.ranges.clone())
	}
}

impl<I> Default for RangeChain<I> {
	fn default() -> Self { Self::new() }
}

impl<I> From<Vec<I>> for RangeChain<I> {
	fn from(ranges: Vec<I>) -> Self {
		Self { ranges }
	}
}

impl<R: IntoIterator> FromIterator<R> for RangeChain<R::IntoIter> {
	fn from_iter<T: IntoIterator<Item = R>>(iter: T) -> Self {
		Self {
			ranges: iter.into_iter().map(IntoIterator::into_iter).collect()
		}
	}
}

impl<R: IntoIterator> Extend<R> for RangeChain<R::IntoIter> {
	fn extend<T: IntoIterator<Item = R>>(&mut self, iter: T) {
		self.ranges.extend(iter.into_iter().map(IntoIterator::into_iter));
	}
}

impl<I: Iterator> IntoIterator for RangeChain<I> {
	type Item = I::Item;
	type IntoIter = Chain<I>;

	/// Consumes the chain, iterating over the elements of every range in order.
	/// Unlike [`RangeChain::iter`], this works with ranges that can't be cloned,
	/// such as mutable slice iterators.
	fn into_iter(self) -> Chain<I> {
		Chain::new(self.ranges)
	}
}

impl<'a, I: Iterator + Clone> IntoIterator for &'a RangeChain<I> {
	type Item = I::Item;
	type IntoIter = Chain<I>;

	fn into_iter(self) -> Chain<I> { self.iter() }
}

/// An iterator over the elements of a [`RangeChain`].
///
/// This is double-ended when the ranges are, but never exact-size: the chain
/// gives no random access into its ranges, even when each range has it.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Chain<I> {
	ranges: vec::IntoIter<I>,
	front: Option<I>,
	back: Option<I>,
}

impl<I> Chain<I> {
	fn new(ranges: Vec<I>) -> Self {
		Self {
			ranges: ranges.into_iter(),
			front: None,
			back: None,
		}
	}
}

/// Calls `f` on the range in `slot`, clearing the slot once it's exhausted.
fn advance<I, T>(slot: &mut Option<I>, f: impl FnOnce(&mut I) -> Option<T>) -> Option<T> {
	let item = f(slot.as_mut()?);
	if item.is_none() {
		*slot = None;
	}
	item
}

impl<I: Iterator> Iterator for Chain<I> {
	type Item = I::Item;

	fn next(&mut self) -> Option<I::Item> {
		loop {
			if let item @ Some(_) = advance(&mut self.front, Iterator::next) {
				return item
			}

			match self.ranges.next() {
				Some(range) => self.front = Some(range),
				None => return advance(&mut self.back, Iterator::next)
			}
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let hints = self.front
			.iter()
			.chain(self.ranges.as_slice())
			.chain(&self.back)
			.map(Iterator::size_hint);
		hints.fold((0, Some(0)), |(lo, hi), (range_lo, range_hi)| (
			lo.saturating_add(range_lo),
			hi.zip(range_hi).and_then(|(a, b)| a.checked_add(b))
		))
	}
}

impl<I: DoubleEndedIterator> DoubleEndedIterator for Chain<I> {
	fn next_back(&mut self) -> Option<I::Item> {
		loop {
			if let item @ Some(_) = advance(&mut self.back, DoubleEndedIterator::next_back) {
				return item
			}

			match self.ranges.next_back() {
				Some(range) => self.back = Some(range),
				None => return advance(&mut self.front, DoubleEndedIterator::next_back)
			}
		}
	}
}

impl<I: Iterator> FusedIterator for Chain<I> { }

#[cfg(test)]
mod test {
	use std::collections::{BTreeMap, LinkedList};
	use pretty_assertions::assert_eq;
	use super::RangeChain;

	fn lists() -> (LinkedList<i32>, LinkedList<i32>, LinkedList<i32>) {
		([0, 1, 2].into(), [3, 4].into(), LinkedList::new())
	}

	#[test]
	fn iterate() {
		let (a1, a2, empty) = lists();
		let mut chain = RangeChain::new();
		chain.add(&a1).add(&empty).add(&a2);
		assert_eq!(chain.range_count(), 3);
		assert!(!chain.is_empty());

		let values: Vec<_> = chain.iter().copied().collect();
		assert_eq!(values, [0, 1, 2, 3, 4]);
		let values: Vec<_> = chain.iter().rev().copied().collect();
		assert_eq!(values, [4, 3, 2, 1, 0]);
	}

	#[test]
	fn mapped() {
		let b1 = BTreeMap::from([(0, 'a'), (1, 'b'), (2, 'c')]);
		let b2 = BTreeMap::from([(3, 'd')]);
		let chain: RangeChain<_> = [&b1, &b2].into_iter().collect();
		let mut count = 0;
		for (&key, &value) in &chain {
			assert_eq!(char::from(b'a' + key), value);
			count += 1;
		}
		assert_eq!(count, 4);
	}

	#[test]
	fn clear_and_empty() {
		let (a1, a2, empty) = lists();
		let mut chain = RangeChain::new();
		assert!(chain.is_empty());
		assert_eq!(chain.iter().next(), None);

		let mut drained = a2.iter();
		drained.by_ref().for_each(drop);
		chain.add(&empty).add(drained);
		assert!(chain.is_empty());
		assert_eq!(chain.range_count(), 2);
		assert_eq!(chain.iter().count(), 0);

		chain.add(&a1);
		assert!(!chain.is_empty());
		chain.clear();
		assert!(chain.is_empty());
		assert_eq!(a1.len(), 3, "clear should leave the ranges' data alone");
	}

	#[test]
	fn empty_ranges() {
		let (a1, a2, empty) = lists();
		let mut chain: RangeChain<_> = [&a1, &empty, &a2].into_iter().collect();
		chain.extend([&empty, &a1]);
		assert_eq!(chain.iter().count(), a1.len() * 2 + a2.len());
		assert_eq!(chain.iter().rev().count(), a1.len() * 2 + a2.len());
	}

	#[test]
	fn modify() {
		let mut a = [0, 1, 2];
		let mut b = [3, 4];
		let mut chain = RangeChain::new();
		chain.add(&mut a).add(&mut b);
		for value in chain {
			*value = -*value;
		}
		assert_eq!(a, [0, -1, -2]);
		assert_eq!(b, [-3, -4]);
	}

	#[test]
	fn meet_in_middle() {
		let (a, b, c) = ([0, 1], [2], [3, 4, 5]);
		let chain = RangeChain::from(vec![a.iter(), b.iter(), c.iter()]);
		let mut iter = chain.iter();
		assert_eq!(iter.next(), Some(&0));
		assert_eq!(iter.next_back(), Some(&5));
		assert_eq!(iter.size_hint(), (4, Some(4)));
		let rest: Vec<_> = iter.by_ref().copied().collect();
		assert_eq!(rest, [1, 2, 3, 4]);
		assert_eq!(iter.next(), None);
		assert_eq!(iter.next_back(), None);
	}

	#[test]
	fn split_ranges() {
		let words = "one two  three";
		let chain = RangeChain::from(vec![words.split(' '), "".split(' ')]);
		let pieces: Vec<_> = chain.into_iter().collect();
		assert_eq!(pieces, ["one", "two", "", "three", ""]);
	}
}
