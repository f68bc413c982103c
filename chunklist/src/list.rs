// SPDX-License-Identifier: Apache-2.0

//! A growable list of fixed-capacity chunks.

use std::{fmt, mem, slice};
use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};
use all_asserts::debug_assert_le;
use crate::{expect, invariant, DEFAULT_CHUNK_BYTES};
use crate::chunk::Chunk;
use crate::error::{Error, Result, Target};
use crate::nested::{DoubleEndedOuter, NestedCursor, NestedIter, NestedIterMut, Outer, OuterMut, Sequence, SequenceMut};

/// A position in a [`ChunkList`]: before the first element, at an element given
/// by its chunk index and offset in that chunk, or past the last element.
pub type Cursor = NestedCursor<usize>;

/// A growable sequence stored in [`Chunk`]s of about `C` bytes each.
///
/// Unlike a `Vec`, growing never moves elements: each chunk is allocated once and
/// kept until it's emptied from the tail or the list is cleared. Every chunk but
/// the last is full, and the last is non-empty unless the list is empty, so the
/// element at index `i` is always in chunk `i / CHUNK_CAPACITY`.
///
/// Chunks are exposed as slices through [`chunks`] and [`chunks_mut`], and as
/// iterators through [`chunk_range`], making them convenient units of batched or
/// parallel work.
///
/// [`chunks`]: Self::chunks
/// [`chunks_mut`]: Self::chunks_mut
/// [`chunk_range`]: Self::chunk_range
pub struct ChunkList<T, const C: usize = DEFAULT_CHUNK_BYTES> {
	chunks: Vec<Chunk<T, C>>,
	len: usize,
}

impl<T, const C: usize> ChunkList<T, C> {
	/// The number of elements in each chunk.
	pub const CHUNK_CAPACITY: usize = Chunk::<T, C>::CAPACITY;

	/// Creates an empty list. No chunks are allocated until an element is added.
	pub const fn new() -> Self {
		Self {
			chunks: Vec::new(),
			len: 0,
		}
	}

	/// Returns the number of elements.
	pub fn len(&self) -> usize { self.len }

	/// Returns `true` if the list has no elements.
	pub fn is_empty(&self) -> bool { self.len == 0 }

	/// Returns the number of allocated chunks.
	pub fn chunk_count(&self) -> usize { self.chunks.len() }

	/// Returns a reference to the element at `index`, or `None` if out of bounds.
	pub fn get(&self, index: usize) -> Option<&T> {
		if index >= self.len { return None }

		let (chunk, offset) = Self::locate(index);
		self.chunks.get(chunk)?.get(offset)
	}

	/// Returns a mutable reference to the element at `index`, or `None` if out of
	/// bounds.
	pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
		if index >= self.len { return None }

		let (chunk, offset) = Self::locate(index);
		self.chunks.get_mut(chunk)?.get_mut(offset)
	}

	/// Returns a reference to the element at `index`, or an out-of-range error.
	pub fn at(&self, index: usize) -> Result<&T> {
		self.get(index).ok_or_else(|| Error::out_of_range(Target::ChunkList, index, self.len))
	}

	/// Returns a mutable reference to the element at `index`, or an out-of-range
	/// error.
	pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
		let len = self.len;
		self.get_mut(index).ok_or_else(|| Error::out_of_range(Target::ChunkList, index, len))
	}

	/// Returns a reference to the first element, or `None` if empty.
	pub fn front(&self) -> Option<&T> { self.chunks.first()?.front() }

	/// Returns a mutable reference to the first element, or `None` if empty.
	pub fn front_mut(&mut self) -> Option<&mut T> { self.chunks.first_mut()?.front_mut() }

	/// Returns a reference to the last element, or `None` if empty.
	pub fn back(&self) -> Option<&T> { self.chunks.last()?.back() }

	/// Returns a mutable reference to the last element, or `None` if empty.
	pub fn back_mut(&mut self) -> Option<&mut T> { self.chunks.last_mut()?.back_mut() }

	/// Returns the live elements of the chunk at `index` as a slice, or `None` if
	/// there is no such chunk.
	pub fn chunk(&self, index: usize) -> Option<&[T]> {
		self.chunks.get(index).map(Chunk::as_slice)
	}

	/// Iterates over the live elements of each chunk, as slices.
	pub fn chunks(&self) -> impl DoubleEndedIterator<Item = &[T]> + ExactSizeIterator {
		self.chunks.iter().map(Chunk::as_slice)
	}

	/// Iterates over the live elements of each chunk, as mutable slices. The
	/// slices are disjoint, so they can be processed in parallel.
	pub fn chunks_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut [T]> + ExactSizeIterator {
		self.chunks.iter_mut().map(Chunk::as_mut_slice)
	}

	/// Returns an iterator spanning exactly the live elements of the chunk at
	/// `index`. The iterator is empty if there is no such chunk.
	pub fn chunk_range(&self, index: usize) -> Iter<'_, T, C> {
		let inner = if index < self.chunks.len() {
			NestedIter::between(
				self,
				NestedCursor::At(index, 0),
				NestedCursor::new(self, index + 1, 0)
			)
		} else {
			NestedIter::between(self, NestedCursor::PastEnd, NestedCursor::PastEnd)
		};
		Iter { list: self, inner }
	}

	/// Returns a cursor at the element at `index`, or past the end if out of
	/// bounds.
	pub fn cursor(&self, index: usize) -> Cursor {
		if index < self.len {
			let (chunk, offset) = Self::locate(index);
			NestedCursor::At(chunk, offset)
		} else {
			NestedCursor::PastEnd
		}
	}

	/// Returns a cursor at the first element, or past the end if empty.
	pub fn begin(&self) -> Cursor { NestedCursor::begin(self) }

	/// Returns a past-the-end cursor.
	pub fn end(&self) -> Cursor { NestedCursor::PastEnd }

	/// Returns the element at `cursor`, or `None` if the cursor is at either end
	/// or no longer points to a live element.
	pub fn get_at(&self, cursor: &Cursor) -> Option<&T> { cursor.get(self) }

	/// Returns the element at `cursor` mutably, or `None` if the cursor is at
	/// either end or no longer points to a live element.
	pub fn get_at_mut(&mut self, cursor: &Cursor) -> Option<&mut T> { cursor.get_mut(self) }

	/// Returns the index of the element at `cursor`. Before-begin maps to `0` and
	/// past-the-end maps to the length.
	pub fn index_of(&self, cursor: &Cursor) -> usize {
		match *cursor {
			NestedCursor::BeforeBegin => 0,
			NestedCursor::At(chunk, offset) => chunk * Self::CHUNK_CAPACITY + offset,
			NestedCursor::PastEnd => self.len,
		}
	}

	/// Iterates over elements front-to-back, in chunk order.
	pub fn iter(&self) -> Iter<'_, T, C> {
		Iter {
			list: self,
			inner: NestedIter::new(self),
		}
	}

	/// Iterates mutably over elements front-to-back, in chunk order.
	pub fn iter_mut(&mut self) -> IterMut<'_, T, C> {
		let remaining = self.len;
		IterMut {
			inner: NestedIterMut::new(self),
			remaining,
		}
	}

	/// Removes all elements and frees all chunks.
	pub fn clear(&mut self) {
		self.chunks.clear();
		self.len = 0;
	}

	/// Swaps the contents of two lists in constant time.
	pub fn swap(&mut self, other: &mut Self) {
		mem::swap(self, other);
	}

	fn locate(index: usize) -> (usize, usize) {
		(index / Self::CHUNK_CAPACITY, index % Self::CHUNK_CAPACITY)
	}

	fn chunks_for(len: usize) -> usize {
		let cap = Self::CHUNK_CAPACITY;
		len / cap + usize::from(len % cap != 0)
	}

	fn check(&self) {
		invariant!(
			self.chunks.last().map_or(self.len == 0, |last| !last.is_empty()),
			"last chunk should be non-empty unless the list is empty (length {})",
			self.len
		);
		invariant!(
			self.chunks.len() == Self::chunks_for(self.len),
			"{} chunks can't hold exactly {} elements",
			self.chunks.len(),
			self.len
		);
	}
}

impl<T: Default, const C: usize> ChunkList<T, C> {
	/// Appends `value`, allocating a new chunk first if the last one is full.
	pub fn push_back(&mut self, value: T) {
		let last = self.reserve_tail();
		expect!(self.chunks[last].push_back(value), "last chunk should have space");
		self.len += 1;
		self.check();
	}

	/// Removes the last element and returns it, freeing the last chunk if it
	/// becomes empty. Returns an underflow error if the list is empty.
	pub fn pop_back(&mut self) -> Result<T> {
		let Some(last) = self.chunks.last_mut() else {
			return Err(Error::underflow(Target::ChunkList))
		};

		let value = expect!(last.pop_back(), "last chunk should be non-empty");
		if last.is_empty() {
			self.chunks.pop();
		}
		self.len -= 1;
		self.check();
		Ok(value)
	}

	/// Resizes to `new_len`, filling new elements with default values. When
	/// shrinking, the removed elements are dropped and emptied chunks are freed.
	pub fn resize(&mut self, new_len: usize) {
		self.resize_with(new_len, T::default);
	}

	/// Resizes to `new_len`, filling new elements with values returned by `f`.
	pub fn resize_with(&mut self, new_len: usize, mut f: impl FnMut() -> T) {
		self.resize_by(new_len, |chunk, len| chunk.resize_with(len, &mut f));
	}

	/// Returns the index of a chunk with space for at least one more element,
	/// allocating it if needed.
	fn reserve_tail(&mut self) -> usize {
		if self.chunks.last().map_or(true, Chunk::is_full) {
			self.chunks.push(Chunk::new());
		}
		self.chunks.len() - 1
	}

	/// Shrinks to `new_len` by dropping whole trailing chunks, then truncating the
	/// new last chunk.
	fn shrink(&mut self, new_len: usize) {
		debug_assert_le!(new_len, self.len);
		let count = Self::chunks_for(new_len);
		self.chunks.truncate(count);
		if let Some(last) = self.chunks.last_mut() {
			let tail = new_len - (count - 1) * Self::CHUNK_CAPACITY;
			expect!(last.resize(tail), "truncating the last chunk should succeed");
		}
		self.len = new_len;
	}

	fn resize_by(&mut self, new_len: usize, mut grow: impl FnMut(&mut Chunk<T, C>, usize) -> Result) {
		if new_len <= self.len {
			self.shrink(new_len);
		} else {
			let mut remaining = new_len - self.len;
			while remaining > 0 {
				let last = self.reserve_tail();
				let chunk = &mut self.chunks[last];
				let step = remaining.min(chunk.limit());
				let target = chunk.len() + step;
				expect!(grow(chunk, target), "growth should fit in the last chunk");
				remaining -= step;
				self.len += step;
			}
		}
		self.check();
	}
}

impl<T: Default + Clone, const C: usize> ChunkList<T, C> {
	/// Resizes to `new_len`, filling new elements with clones of `value`.
	pub fn resize_fill(&mut self, new_len: usize, value: T) {
		self.resize_by(new_len, |chunk, len| chunk.resize_fill(len, value.clone()));
	}
}

impl<T, const C: usize> Default for ChunkList<T, C> {
	fn default() -> Self { Self::new() }
}

impl<T: Clone, const C: usize> Clone for ChunkList<T, C> {
	fn clone(&self) -> Self {
		Self {
			chunks: self.chunks.clone(),
			len: self.len,
		}
	}
}

impl<T: Debug, const C: usize> Debug for ChunkList<T, C> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

impl<T: PartialEq, const C: usize> PartialEq for ChunkList<T, C> {
	fn eq(&self, other: &Self) -> bool {
		self.len == other.len && itertools::equal(self, other)
	}
}

impl<T: Eq, const C: usize> Eq for ChunkList<T, C> { }

impl<T, const C: usize> Index<usize> for ChunkList<T, C> {
	type Output = T;

	fn index(&self, index: usize) -> &T {
		let len = self.len;
		self.get(index)
			.unwrap_or_else(|| panic!("index {index} is out of range for length {len}"))
	}
}

impl<T, const C: usize> IndexMut<usize> for ChunkList<T, C> {
	fn index_mut(&mut self, index: usize) -> &mut T {
		let len = self.len;
		self.get_mut(index)
			.unwrap_or_else(|| panic!("index {index} is out of range for length {len}"))
	}
}

impl<T: Default, const C: usize> Extend<T> for ChunkList<T, C> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.push_back(value);
		}
	}
}

impl<'a, T: Default + Copy + 'a, const C: usize> Extend<&'a T> for ChunkList<T, C> {
	fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
		self.extend(iter.into_iter().copied());
	}
}

impl<T: Default, const C: usize> FromIterator<T> for ChunkList<T, C> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut list = Self::new();
		list.extend(iter);
		list
	}
}

impl<'a, T, const C: usize> IntoIterator for &'a ChunkList<T, C> {
	type Item = &'a T;
	type IntoIter = Iter<'a, T, C>;

	fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T, const C: usize> IntoIterator for &'a mut ChunkList<T, C> {
	type Item = &'a mut T;
	type IntoIter = IterMut<'a, T, C>;

	fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

// Nesting

impl<T, const C: usize> Outer for ChunkList<T, C> {
	type Pos = usize;
	type Inner = Chunk<T, C>;

	fn first_pos(&self) -> Option<usize> { self.chunks.first_pos() }

	fn next_pos(&self, pos: &usize) -> Option<usize> { self.chunks.next_pos(pos) }

	fn inner(&self, pos: &usize) -> Option<&Chunk<T, C>> { self.chunks.inner(pos) }
}

impl<T, const C: usize> DoubleEndedOuter for ChunkList<T, C> {
	fn last_pos(&self) -> Option<usize> { self.chunks.last_pos() }

	fn prev_pos(&self, pos: &usize) -> Option<usize> { self.chunks.prev_pos(pos) }
}

impl<T, const C: usize> OuterMut for ChunkList<T, C> {
	type InnersMut<'a> = slice::IterMut<'a, Chunk<T, C>> where Self: 'a;

	fn inner_mut(&mut self, pos: &usize) -> Option<&mut Chunk<T, C>> { self.chunks.inner_mut(pos) }

	fn inners_mut(&mut self) -> Self::InnersMut<'_> { self.chunks.iter_mut() }
}

impl<T, const C: usize> Sequence for ChunkList<T, C> {
	type Item = T;

	fn len(&self) -> usize { self.len }

	fn get(&self, index: usize) -> Option<&T> { ChunkList::get(self, index) }
}

impl<T, const C: usize> SequenceMut for ChunkList<T, C> {
	type IterMut<'a> = IterMut<'a, T, C> where Self: 'a;

	fn get_mut(&mut self, index: usize) -> Option<&mut T> { ChunkList::get_mut(self, index) }

	fn iter_mut(&mut self) -> Self::IterMut<'_> { ChunkList::iter_mut(self) }
}

// Iterators

/// An iterator over the elements of a [`ChunkList`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T, const C: usize = DEFAULT_CHUNK_BYTES> {
	list: &'a ChunkList<T, C>,
	inner: NestedIter<'a, ChunkList<T, C>>,
}

impl<'a, T, const C: usize> Iter<'a, T, C> {
	/// Returns the cursor at the next element to be yielded from the front.
	pub fn front(&self) -> &Cursor { self.inner.front() }

	/// Returns the cursor following the next element to be yielded from the back.
	pub fn back(&self) -> &Cursor { self.inner.back() }
}

impl<T, const C: usize> Clone for Iter<'_, T, C> {
	fn clone(&self) -> Self {
		Self {
			list: self.list,
			inner: self.inner.clone(),
		}
	}
}

impl<T, const C: usize> Debug for Iter<'_, T, C> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Iter").field(&self.inner).finish()
	}
}

impl<'a, T, const C: usize> Iterator for Iter<'a, T, C> {
	type Item = &'a T;

	fn next(&mut self) -> Option<&'a T> { self.inner.next() }

	fn size_hint(&self) -> (usize, Option<usize>) {
		let len = self.len();
		(len, Some(len))
	}
}

impl<T, const C: usize> DoubleEndedIterator for Iter<'_, T, C> {
	fn next_back(&mut self) -> Option<Self::Item> { self.inner.next_back() }
}

impl<T, const C: usize> ExactSizeIterator for Iter<'_, T, C> {
	fn len(&self) -> usize {
		self.list.index_of(self.inner.back()) - self.list.index_of(self.inner.front())
	}
}

impl<T, const C: usize> FusedIterator for Iter<'_, T, C> { }

/// A mutable iterator over the elements of a [`ChunkList`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, T: 'a, const C: usize = DEFAULT_CHUNK_BYTES> {
	inner: NestedIterMut<'a, ChunkList<T, C>>,
	remaining: usize,
}

impl<T, const C: usize> Debug for IterMut<'_, T, C> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("IterMut")
			.field("remaining", &self.remaining)
			.finish_non_exhaustive()
	}
}

impl<'a, T: 'a, const C: usize> Iterator for IterMut<'a, T, C> {
	type Item = &'a mut T;

	fn next(&mut self) -> Option<&'a mut T> {
		let item = self.inner.next()?;
		self.remaining -= 1;
		Some(item)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<'a, T: 'a, const C: usize> DoubleEndedIterator for IterMut<'a, T, C> {
	fn next_back(&mut self) -> Option<&'a mut T> {
		let item = self.inner.next_back()?;
		self.remaining -= 1;
		Some(item)
	}
}

impl<'a, T: 'a, const C: usize> ExactSizeIterator for IterMut<'a, T, C> { }

impl<'a, T: 'a, const C: usize> FusedIterator for IterMut<'a, T, C> { }
