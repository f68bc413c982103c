// SPDX-License-Identifier: Apache-2.0

//! Container shapes understood by nested iteration. An outer container is either
//! a sequence whose elements *are* the inner sequences (`Vec<Vec<T>>`), or a map
//! whose *values* are the inner sequences (`BTreeMap<K, Vec<T>>`). Which one
//! applies is decided by the [`Outer`] impl, at compile time.
//!
//! Outer containers that can only be walked forward, like `HashMap`, implement
//! [`Outer`] alone; those that can also be walked backward implement
//! [`DoubleEndedOuter`]. Backward cursor movement and reverse iteration are only
//! available for the latter. Inner sequences are addressed by index, so sets and
//! linked lists work as inner sequences too, at the cost of a walk per access.

use std::collections::{btree_map, hash_map, linked_list, vec_deque};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::ops::Bound::{Excluded, Unbounded};
use std::slice;

/// An inner container: a finite sequence of items addressable by index.
pub trait Sequence {
	type Item;

	/// Returns the number of items.
	fn len(&self) -> usize;

	/// Returns `true` if the sequence has no items.
	fn is_empty(&self) -> bool { self.len() == 0 }

	/// Returns a reference to the item at `index`, or `None` if out of bounds.
	fn get(&self, index: usize) -> Option<&Self::Item>;
}

/// A [`Sequence`] whose items can be mutated in place.
pub trait SequenceMut: Sequence {
	type IterMut<'a>: Iterator<Item = &'a mut Self::Item> where Self: 'a;

	/// Returns a mutable reference to the item at `index`, or `None` if out of
	/// bounds.
	fn get_mut(&mut self, index: usize) -> Option<&mut Self::Item>;

	/// Iterates mutably over all items, front-to-back.
	fn iter_mut(&mut self) -> Self::IterMut<'_>;
}

/// An outer container of [`Sequence`]s, navigated forward by position. Positions
/// are plain values (indices, keys) rather than borrows, so they stay meaningful
/// across mutation of the container.
pub trait Outer {
	/// A position of an inner sequence.
	type Pos: Clone + Eq;
	type Inner: Sequence;

	/// Returns the position of the first inner sequence, or `None` if there are
	/// none.
	fn first_pos(&self) -> Option<Self::Pos>;

	/// Returns the position following `pos`, or `None` if `pos` is the last.
	fn next_pos(&self, pos: &Self::Pos) -> Option<Self::Pos>;

	/// Returns the inner sequence at `pos`.
	fn inner(&self, pos: &Self::Pos) -> Option<&Self::Inner>;
}

/// An [`Outer`] container that can also be navigated backward.
pub trait DoubleEndedOuter: Outer {
	/// Returns the position of the last inner sequence, or `None` if there are
	/// none.
	fn last_pos(&self) -> Option<Self::Pos>;

	/// Returns the position preceding `pos`, or `None` if `pos` is the first.
	fn prev_pos(&self, pos: &Self::Pos) -> Option<Self::Pos>;
}

/// An [`Outer`] container whose inner sequences can be borrowed mutably.
pub trait OuterMut: Outer {
	type InnersMut<'a>: Iterator<Item = &'a mut Self::Inner> where Self: 'a;

	/// Returns the inner sequence at `pos` mutably.
	fn inner_mut(&mut self, pos: &Self::Pos) -> Option<&mut Self::Inner>;

	/// Iterates mutably over all inner sequences, front-to-back.
	fn inners_mut(&mut self) -> Self::InnersMut<'_>;
}

/// Walks to `index` from whichever end of `iter` is nearer.
fn walk<I: DoubleEndedIterator>(mut iter: I, len: usize, index: usize) -> Option<I::Item> {
	if index >= len { return None }

	if index < len / 2 {
		iter.nth(index)
	} else {
		iter.nth_back(len - 1 - index)
	}
}

fn first_index(len: usize) -> Option<usize> { (len > 0).then_some(0) }

fn last_index(len: usize) -> Option<usize> { len.checked_sub(1) }

fn next_index(pos: usize, len: usize) -> Option<usize> {
	let next = pos + 1;
	(next < len).then_some(next)
}

fn prev_index(pos: usize, len: usize) -> Option<usize> {
	pos.checked_sub(1).filter(|&prev| prev < len)
}

// Sequences

impl<T> Sequence for [T] {
	type Item = T;

	fn len(&self) -> usize { <[T]>::len(self) }

	fn get(&self, index: usize) -> Option<&T> { <[T]>::get(self, index) }
}

impl<T> SequenceMut for [T] {
	type IterMut<'a> = slice::IterMut<'a, T> where Self: 'a;

	fn get_mut(&mut self, index: usize) -> Option<&mut T> { <[T]>::get_mut(self, index) }

	fn iter_mut(&mut self) -> Self::IterMut<'_> { <[T]>::iter_mut(self) }
}

impl<T> Sequence for VecDeque<T> {
	type Item = T;

	fn len(&self) -> usize { VecDeque::len(self) }

	fn get(&self, index: usize) -> Option<&T> { VecDeque::get(self, index) }
}

impl<T> SequenceMut for VecDeque<T> {
	type IterMut<'a> = vec_deque::IterMut<'a, T> where Self: 'a;

	fn get_mut(&mut self, index: usize) -> Option<&mut T> { VecDeque::get_mut(self, index) }

	fn iter_mut(&mut self) -> Self::IterMut<'_> { VecDeque::iter_mut(self) }
}

impl<T> Sequence for LinkedList<T> {
	type Item = T;

	fn len(&self) -> usize { LinkedList::len(self) }

	fn get(&self, index: usize) -> Option<&T> { walk(self.iter(), self.len(), index) }
}

impl<T> SequenceMut for LinkedList<T> {
	type IterMut<'a> = linked_list::IterMut<'a, T> where Self: 'a;

	fn get_mut(&mut self, index: usize) -> Option<&mut T> {
		let len = self.len();
		walk(LinkedList::iter_mut(self), len, index)
	}

	fn iter_mut(&mut self) -> Self::IterMut<'_> { LinkedList::iter_mut(self) }
}

// Set items can't be mutated in place, so sets are only readable sequences. An
// unmodified set always iterates in the same order, so indices are stable until
// the set changes.

impl<T> Sequence for BTreeSet<T> {
	type Item = T;

	fn len(&self) -> usize { BTreeSet::len(self) }

	fn get(&self, index: usize) -> Option<&T> { walk(self.iter(), self.len(), index) }
}

impl<T, H> Sequence for HashSet<T, H> {
	type Item = T;

	fn len(&self) -> usize { HashSet::len(self) }

	fn get(&self, index: usize) -> Option<&T> { self.iter().nth(index) }
}

macro_rules! slice_sequence {
	($($ty:ty => [$($gen:tt)+]),+) => {
		$(
		impl<$($gen)+> Sequence for $ty {
			type Item = T;

			fn len(&self) -> usize { self.as_slice().len() }

			fn get(&self, index: usize) -> Option<&T> { self.as_slice().get(index) }
		}

		impl<$($gen)+> SequenceMut for $ty {
			type IterMut<'a> = slice::IterMut<'a, T> where Self: 'a;

			fn get_mut(&mut self, index: usize) -> Option<&mut T> {
				self.as_mut_slice().get_mut(index)
			}

			fn iter_mut(&mut self) -> Self::IterMut<'_> { self.as_mut_slice().iter_mut() }
		}
		)+
	};
}

slice_sequence! {
	Vec<T> => [T],
	[T; N] => [T, const N: usize]
}

// Outer containers, dereferenced directly

impl<S: Sequence> Outer for [S] {
	type Pos = usize;
	type Inner = S;

	fn first_pos(&self) -> Option<usize> { first_index(<[S]>::len(self)) }

	fn next_pos(&self, &pos: &usize) -> Option<usize> { next_index(pos, <[S]>::len(self)) }

	fn inner(&self, &pos: &usize) -> Option<&S> { <[S]>::get(self, pos) }
}

impl<S: Sequence> DoubleEndedOuter for [S] {
	fn last_pos(&self) -> Option<usize> { last_index(<[S]>::len(self)) }

	fn prev_pos(&self, &pos: &usize) -> Option<usize> { prev_index(pos, <[S]>::len(self)) }
}

impl<S: Sequence> OuterMut for [S] {
	type InnersMut<'a> = slice::IterMut<'a, S> where Self: 'a;

	fn inner_mut(&mut self, &pos: &usize) -> Option<&mut S> { <[S]>::get_mut(self, pos) }

	fn inners_mut(&mut self) -> Self::InnersMut<'_> { <[S]>::iter_mut(self) }
}

macro_rules! slice_outer {
	($($ty:ty => [$($gen:tt)+]),+) => {
		$(
		impl<$($gen)+> Outer for $ty {
			type Pos = usize;
			type Inner = S;

			fn first_pos(&self) -> Option<usize> { self.as_slice().first_pos() }

			fn next_pos(&self, pos: &usize) -> Option<usize> { self.as_slice().next_pos(pos) }

			fn inner(&self, pos: &usize) -> Option<&S> { Outer::inner(self.as_slice(), pos) }
		}

		impl<$($gen)+> DoubleEndedOuter for $ty {
			fn last_pos(&self) -> Option<usize> { self.as_slice().last_pos() }

			fn prev_pos(&self, pos: &usize) -> Option<usize> { self.as_slice().prev_pos(pos) }
		}

		impl<$($gen)+> OuterMut for $ty {
			type InnersMut<'a> = slice::IterMut<'a, S> where Self: 'a;

			fn inner_mut(&mut self, pos: &usize) -> Option<&mut S> {
				self.as_mut_slice().inner_mut(pos)
			}

			fn inners_mut(&mut self) -> Self::InnersMut<'_> { self.as_mut_slice().iter_mut() }
		}
		)+
	};
}

slice_outer! {
	Vec<S> => [S: Sequence],
	[S; N] => [S: Sequence, const N: usize]
}

impl<S: Sequence> Outer for VecDeque<S> {
	type Pos = usize;
	type Inner = S;

	fn first_pos(&self) -> Option<usize> { first_index(self.len()) }

	fn next_pos(&self, &pos: &usize) -> Option<usize> { next_index(pos, self.len()) }

	fn inner(&self, &pos: &usize) -> Option<&S> { VecDeque::get(self, pos) }
}

impl<S: Sequence> DoubleEndedOuter for VecDeque<S> {
	fn last_pos(&self) -> Option<usize> { last_index(self.len()) }

	fn prev_pos(&self, &pos: &usize) -> Option<usize> { prev_index(pos, self.len()) }
}

impl<S: Sequence> OuterMut for VecDeque<S> {
	type InnersMut<'a> = vec_deque::IterMut<'a, S> where Self: 'a;

	fn inner_mut(&mut self, &pos: &usize) -> Option<&mut S> { VecDeque::get_mut(self, pos) }

	fn inners_mut(&mut self) -> Self::InnersMut<'_> { VecDeque::iter_mut(self) }
}

/// Positions in a linked list are node indices, resolved by walking the list.
impl<S: Sequence> Outer for LinkedList<S> {
	type Pos = usize;
	type Inner = S;

	fn first_pos(&self) -> Option<usize> { first_index(self.len()) }

	fn next_pos(&self, &pos: &usize) -> Option<usize> { next_index(pos, self.len()) }

	fn inner(&self, &pos: &usize) -> Option<&S> { walk(self.iter(), self.len(), pos) }
}

impl<S: Sequence> DoubleEndedOuter for LinkedList<S> {
	fn last_pos(&self) -> Option<usize> { last_index(self.len()) }

	fn prev_pos(&self, &pos: &usize) -> Option<usize> { prev_index(pos, self.len()) }
}

impl<S: Sequence> OuterMut for LinkedList<S> {
	type InnersMut<'a> = linked_list::IterMut<'a, S> where Self: 'a;

	fn inner_mut(&mut self, &pos: &usize) -> Option<&mut S> {
		let len = self.len();
		walk(self.iter_mut(), len, pos)
	}

	fn inners_mut(&mut self) -> Self::InnersMut<'_> { self.iter_mut() }
}

// Outer containers, dereferenced through the mapped value

impl<K: Ord + Clone, S: Sequence> Outer for BTreeMap<K, S> {
	type Pos = K;
	type Inner = S;

	fn first_pos(&self) -> Option<K> {
		self.keys().next().cloned()
	}

	fn next_pos(&self, pos: &K) -> Option<K> {
		self.range::<K, _>((Excluded(pos), Unbounded))
			.next()
			.map(|(key, _)| key.clone())
	}

	fn inner(&self, pos: &K) -> Option<&S> { BTreeMap::get(self, pos) }
}

impl<K: Ord + Clone, S: Sequence> DoubleEndedOuter for BTreeMap<K, S> {
	fn last_pos(&self) -> Option<K> {
		self.keys().next_back().cloned()
	}

	fn prev_pos(&self, pos: &K) -> Option<K> {
		self.range::<K, _>(..pos)
			.next_back()
			.map(|(key, _)| key.clone())
	}
}

impl<K: Ord + Clone, S: Sequence> OuterMut for BTreeMap<K, S> {
	type InnersMut<'a> = btree_map::ValuesMut<'a, K, S> where Self: 'a;

	fn inner_mut(&mut self, pos: &K) -> Option<&mut S> { BTreeMap::get_mut(self, pos) }

	fn inners_mut(&mut self) -> Self::InnersMut<'_> { self.values_mut() }
}

/// A hash map is walked forward only, in its iteration order. That order is fixed
/// while the map is unmodified; inserting or removing keys may reorder it, so
/// cursors into a hash map only survive changes to the inner sequences.
impl<K, S, H> Outer for HashMap<K, S, H>
where K: Hash + Eq + Clone,
	  S: Sequence,
	  H: BuildHasher {
	type Pos = K;
	type Inner = S;

	fn first_pos(&self) -> Option<K> {
		self.keys().next().cloned()
	}

	fn next_pos(&self, pos: &K) -> Option<K> {
		let mut keys = self.keys();
		keys.find(|&key| key == pos)?;
		keys.next().cloned()
	}

	fn inner(&self, pos: &K) -> Option<&S> { HashMap::get(self, pos) }
}

impl<K, S, H> OuterMut for HashMap<K, S, H>
where K: Hash + Eq + Clone,
	  S: Sequence,
	  H: BuildHasher {
	type InnersMut<'a> = hash_map::ValuesMut<'a, K, S> where Self: 'a;

	fn inner_mut(&mut self, pos: &K) -> Option<&mut S> { HashMap::get_mut(self, pos) }

	fn inners_mut(&mut self) -> Self::InnersMut<'_> { self.values_mut() }
}
