// SPDX-License-Identifier: Apache-2.0

//! Iteration over nested containers as one flat sequence.
//!
//! A [`NestedCursor`] is a position in the flattened sequence of an [`Outer`]
//! container: either before the first element, at an element, or past the last
//! element. Cursors hold positions instead of borrows, so they can be kept while
//! the container is mutated and resolved again afterward. Empty inner sequences
//! are skipped in both directions; a cursor never rests on one. Moving backward
//! needs a [`DoubleEndedOuter`].
//!
//! [`NestedIter`] pairs a front and a back cursor into an iterator, double-ended
//! over a [`DoubleEndedOuter`]. [`NestedIterMut`] iterates mutably.

mod shape;

pub use shape::*;

use std::fmt;
use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;

/// The item type of a nested container.
pub type NestedItem<O> = <<O as Outer>::Inner as Sequence>::Item;

/// A position in the flattened sequence of an [`Outer`] container with outer
/// positions of type `P`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NestedCursor<P> {
	/// Before the first element.
	BeforeBegin,
	/// At an element, given by its outer position and its index in that inner
	/// sequence.
	At(P, usize),
	/// Past the last element.
	PastEnd,
}

impl<P: Clone + Eq> NestedCursor<P> {
	/// Returns a cursor at the first element of `outer`, or past the end if it
	/// has no elements.
	pub fn begin<O: Outer<Pos = P> + ?Sized>(outer: &O) -> Self {
		Self::seek_forward(outer, outer.first_pos(), 0)
	}

	/// Returns a past-the-end cursor.
	pub fn end() -> Self { Self::PastEnd }

	/// Returns a before-begin cursor.
	pub fn before_begin() -> Self { Self::BeforeBegin }

	/// Returns a cursor at `index` in the inner sequence at `pos`. If `index` is
	/// at or past the end of that sequence, the cursor moves forward to the next
	/// element, or past the end. An invalid `pos` gives a past-the-end cursor.
	pub fn new<O: Outer<Pos = P> + ?Sized>(outer: &O, pos: P, index: usize) -> Self {
		Self::seek_forward(outer, Some(pos), index)
	}

	/// Returns `true` if the cursor is at an element.
	pub fn is_at(&self) -> bool { matches!(self, Self::At(..)) }

	/// Returns `true` if the cursor is before the first element.
	pub fn is_before_begin(&self) -> bool { matches!(self, Self::BeforeBegin) }

	/// Returns `true` if the cursor is past the last element.
	pub fn is_past_end(&self) -> bool { matches!(self, Self::PastEnd) }

	/// Returns the outer position, if at an element.
	pub fn outer_pos(&self) -> Option<&P> {
		if let Self::At(pos, _) = self { Some(pos) } else { None }
	}

	/// Returns the index in the inner sequence, if at an element.
	pub fn inner_index(&self) -> Option<usize> {
		if let Self::At(_, index) = self { Some(*index) } else { None }
	}

	/// Returns a reference to the element at the cursor, or `None` at either end.
	pub fn get<'o, O>(&self, outer: &'o O) -> Option<&'o NestedItem<O>>
	where O: Outer<Pos = P> + ?Sized {
		let Self::At(pos, index) = self else { return None };
		outer.inner(pos)?.get(*index)
	}

	/// Returns a mutable reference to the element at the cursor, or `None` at
	/// either end.
	pub fn get_mut<'o, O>(&self, outer: &'o mut O) -> Option<&'o mut NestedItem<O>>
	where O: OuterMut<Pos = P> + ?Sized,
		  O::Inner: SequenceMut {
		let Self::At(pos, index) = self else { return None };
		outer.inner_mut(pos)?.get_mut(*index)
	}

	/// Moves to the next element, or past the end. A before-begin cursor moves to
	/// the first element; a past-the-end cursor stays.
	pub fn move_next<O: Outer<Pos = P> + ?Sized>(&mut self, outer: &O) -> &mut Self {
		*self = match self {
			Self::BeforeBegin => Self::seek_forward(outer, outer.first_pos(), 0),
			Self::At(pos, index) => Self::seek_forward(outer, Some(pos.clone()), *index + 1),
			Self::PastEnd => Self::PastEnd
		};
		self
	}

	/// Moves to the previous element, or before the beginning. A past-the-end
	/// cursor moves to the last element; a before-begin cursor stays.
	pub fn move_prev<O: DoubleEndedOuter<Pos = P> + ?Sized>(&mut self, outer: &O) -> &mut Self {
		*self = match self {
			Self::BeforeBegin => Self::BeforeBegin,
			Self::At(pos, 0) => {
				let prev = outer.prev_pos(pos);
				Self::seek_backward(outer, prev)
			}
			Self::At(pos, index) => Self::At(pos.clone(), *index - 1),
			Self::PastEnd => Self::seek_backward(outer, outer.last_pos())
		};
		self
	}

	/// Returns the cursor at the next element, leaving this one unchanged.
	pub fn next<O: Outer<Pos = P> + ?Sized>(&self, outer: &O) -> Self {
		let mut next = self.clone();
		next.move_next(outer);
		next
	}

	/// Returns the cursor at the previous element, leaving this one unchanged.
	pub fn prev<O: DoubleEndedOuter<Pos = P> + ?Sized>(&self, outer: &O) -> Self {
		let mut prev = self.clone();
		prev.move_prev(outer);
		prev
	}

	/// Finds the first element at or after `index` in `pos`, skipping empty inner
	/// sequences.
	fn seek_forward<O: Outer<Pos = P> + ?Sized>(
		outer: &O,
		mut pos: Option<P>,
		mut index: usize
	) -> Self {
		while let Some(cur) = pos {
			let Some(inner) = outer.inner(&cur) else { break };
			if index < inner.len() {
				return Self::At(cur, index)
			}

			pos = outer.next_pos(&cur);
			index = 0;
		}
		Self::PastEnd
	}

	/// Finds the last element at or before the end of `pos`, skipping empty inner
	/// sequences.
	fn seek_backward<O: DoubleEndedOuter<Pos = P> + ?Sized>(outer: &O, mut pos: Option<P>) -> Self {
		while let Some(cur) = pos {
			let Some(inner) = outer.inner(&cur) else { break };
			if let Some(last) = inner.len().checked_sub(1) {
				return Self::At(cur, last)
			}

			pos = outer.prev_pos(&cur);
		}
		Self::BeforeBegin
	}
}

/// An iterator over the elements of a nested container, between a front cursor
/// (inclusive) and a back cursor (exclusive). It's double-ended when the outer
/// container is a [`DoubleEndedOuter`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct NestedIter<'a, O: Outer + ?Sized> {
	outer: &'a O,
	front: NestedCursor<O::Pos>,
	back: NestedCursor<O::Pos>,
}

impl<'a, O: Outer + ?Sized> NestedIter<'a, O> {
	/// Iterates over all elements of `outer`.
	pub fn new(outer: &'a O) -> Self {
		Self::between(outer, NestedCursor::begin(outer), NestedCursor::PastEnd)
	}

	/// Iterates from `front` up to, but not including, `back`. The `back` cursor
	/// must be reachable from `front` by moving forward.
	///
	/// Both cursors are normalized first, as by [`NestedCursor::new`]: a cursor
	/// at the end of an inner sequence moves forward to the next element. A
	/// before-begin `front` starts at the first element, and a before-begin `back`
	/// gives an empty iterator.
	pub fn between(outer: &'a O, front: NestedCursor<O::Pos>, back: NestedCursor<O::Pos>) -> Self {
		let front = match front {
			NestedCursor::BeforeBegin => NestedCursor::begin(outer),
			NestedCursor::At(pos, index) => NestedCursor::new(outer, pos, index),
			NestedCursor::PastEnd => NestedCursor::PastEnd
		};
		let back = match back {
			NestedCursor::BeforeBegin => front.clone(),
			NestedCursor::At(pos, index) => NestedCursor::new(outer, pos, index),
			NestedCursor::PastEnd => NestedCursor::PastEnd
		};
		Self { outer, front, back }
	}

	/// Returns the cursor at the next element to be yielded from the front.
	pub fn front(&self) -> &NestedCursor<O::Pos> { &self.front }

	/// Returns the cursor following the next element to be yielded from the back.
	pub fn back(&self) -> &NestedCursor<O::Pos> { &self.back }

	/// Returns `true` if no elements remain.
	pub fn is_empty(&self) -> bool { self.front == self.back }
}

impl<O: Outer + ?Sized> Clone for NestedIter<'_, O> {
	fn clone(&self) -> Self {
		Self {
			outer: self.outer,
			front: self.front.clone(),
			back: self.back.clone(),
		}
	}
}

impl<O: Outer + ?Sized> Debug for NestedIter<'_, O> where O::Pos: Debug {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("NestedIter")
			.field("front", &self.front)
			.field("back", &self.back)
			.finish_non_exhaustive()
	}
}

impl<'a, O: Outer + ?Sized> Iterator for NestedIter<'a, O> {
	type Item = &'a NestedItem<O>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.is_empty() { return None }

		let item = self.front.get(self.outer)?;
		self.front.move_next(self.outer);
		Some(item)
	}
}

impl<'a, O: DoubleEndedOuter + ?Sized> DoubleEndedIterator for NestedIter<'a, O> {
	fn next_back(&mut self) -> Option<Self::Item> {
		if self.is_empty() { return None }

		self.back.move_prev(self.outer);
		self.back.get(self.outer)
	}
}

impl<O: Outer + ?Sized> FusedIterator for NestedIter<'_, O> { }

/// An iterator over mutable references to the elements of a nested container.
/// It's double-ended when both the outer container's and the inner sequences'
/// mutable iterators are.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct NestedIterMut<'a, O>
where O: OuterMut + ?Sized + 'a,
	  O::Inner: SequenceMut + 'a {
	inners: O::InnersMut<'a>,
	front: Option<<O::Inner as SequenceMut>::IterMut<'a>>,
	back: Option<<O::Inner as SequenceMut>::IterMut<'a>>,
}

impl<'a, O> NestedIterMut<'a, O>
where O: OuterMut + ?Sized + 'a,
	  O::Inner: SequenceMut + 'a {
	/// Iterates mutably over all elements of `outer`.
	pub fn new(outer: &'a mut O) -> Self {
		Self {
			inners: outer.inners_mut(),
			front: None,
			back: None,
		}
	}
}

impl<'a, O> Iterator for NestedIterMut<'a, O>
where O: OuterMut + ?Sized + 'a,
	  O::Inner: SequenceMut + 'a {
	type Item = &'a mut NestedItem<O>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some(item) = self.front.as_mut().and_then(Iterator::next) {
				return Some(item)
			}

			match self.inners.next() {
				Some(inner) => self.front = Some(SequenceMut::iter_mut(inner)),
				None => return self.back.as_mut()?.next()
			}
		}
	}
}

impl<'a, O> DoubleEndedIterator for NestedIterMut<'a, O>
where O: OuterMut + ?Sized + 'a,
	  O::Inner: SequenceMut + 'a,
	  O::InnersMut<'a>: DoubleEndedIterator,
	  <O::Inner as SequenceMut>::IterMut<'a>: DoubleEndedIterator {
	fn next_back(&mut self) -> Option<Self::Item> {
		loop {
			if let Some(item) = self.back.as_mut().and_then(DoubleEndedIterator::next_back) {
				return Some(item)
			}

			match self.inners.next_back() {
				Some(inner) => self.back = Some(SequenceMut::iter_mut(inner)),
				None => return self.front.as_mut()?.next_back()
			}
		}
	}
}

impl<'a, O> FusedIterator for NestedIterMut<'a, O>
where O: OuterMut + ?Sized + 'a,
	  O::Inner: SequenceMut + 'a,
	  O::InnersMut<'a>: FusedIterator { }
