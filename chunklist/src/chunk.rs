// SPDX-License-Identifier: Apache-2.0

//! A fixed-capacity, contiguous run of elements.

use std::{fmt, iter, mem, slice};
use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut};
use all_asserts::debug_assert_le;
use crate::DEFAULT_CHUNK_BYTES;
use crate::error::{Error, Operation, Result, Target};
use crate::nested::{Sequence, SequenceMut};

/// Returns the number of `T` elements fitting in `bytes`. Zero-sized elements are
/// counted as one byte.
pub const fn capacity_of<T>(bytes: usize) -> usize {
	let size = mem::size_of::<T>();
	bytes / if size == 0 { 1 } else { size }
}

/// A fixed-capacity chunk of elements, taking about `C` bytes of contiguous heap
/// memory. The memory is allocated once, filled with default values, and never
/// reallocated; pointers into it stay valid for the lifetime of the chunk, even
/// when the chunk itself is moved.
///
/// Only the first [`len`] elements are *live*. The remaining slots always hold
/// default values: removing elements, by popping, shrinking, or clearing, drops
/// them and puts a default value back in their slot.
///
/// [`len`]: Self::len
pub struct Chunk<T, const C: usize = DEFAULT_CHUNK_BYTES> {
	buf: Box<[T]>,
	len: usize,
}

impl<T, const C: usize> Chunk<T, C> {
	/// The number of elements in a chunk.
	pub const CAPACITY: usize = capacity_of::<T>(C);

	const FITS_ONE: () = assert!(
		Self::CAPACITY > 0,
		"chunk byte size is too small to hold a single element"
	);

	/// Returns the number of live elements.
	pub fn len(&self) -> usize { self.len }
	/// Returns `true` if the chunk has no live elements.
	pub fn is_empty(&self) -> bool { self.len == 0 }
	/// Returns `true` if no more elements can be pushed.
	pub fn is_full(&self) -> bool { self.len == Self::CAPACITY }
	/// Returns the fixed capacity, [`CAPACITY`](Self::CAPACITY).
	pub fn capacity(&self) -> usize { Self::CAPACITY }
	/// Returns the number of elements that can be pushed before the chunk is full.
	pub fn limit(&self) -> usize { Self::CAPACITY - self.len }

	/// Returns a slice of the live elements.
	pub fn as_slice(&self) -> &[T] { &self.buf[..self.len] }

	/// Returns a mutable slice of the live elements.
	pub fn as_mut_slice(&mut self) -> &mut [T] { &mut self.buf[..self.len] }

	/// Returns a pointer to the first slot of the chunk's memory.
	pub fn as_ptr(&self) -> *const T { self.buf.as_ptr() }

	/// Returns a mutable pointer to the first slot of the chunk's memory.
	pub fn as_mut_ptr(&mut self) -> *mut T { self.buf.as_mut_ptr() }

	/// Returns a reference to the element at `index`, or `None` if out of bounds.
	pub fn get(&self, index: usize) -> Option<&T> { self.as_slice().get(index) }

	/// Returns a mutable reference to the element at `index`, or `None` if out of
	/// bounds.
	pub fn get_mut(&mut self, index: usize) -> Option<&mut T> { self.as_mut_slice().get_mut(index) }

	/// Returns a reference to the element at `index`, or an out-of-range error.
	pub fn at(&self, index: usize) -> Result<&T> {
		let len = self.len;
		self.get(index).ok_or_else(|| Error::out_of_range(Target::Chunk, index, len))
	}

	/// Returns a mutable reference to the element at `index`, or an out-of-range
	/// error.
	pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
		let len = self.len;
		self.get_mut(index).ok_or_else(|| Error::out_of_range(Target::Chunk, index, len))
	}

	/// Returns a reference to the first element, or `None` if empty.
	pub fn front(&self) -> Option<&T> { self.as_slice().first() }

	/// Returns a mutable reference to the first element, or `None` if empty.
	pub fn front_mut(&mut self) -> Option<&mut T> { self.as_mut_slice().first_mut() }

	/// Returns a reference to the last element, or `None` if empty.
	pub fn back(&self) -> Option<&T> { self.as_slice().last() }

	/// Returns a mutable reference to the last element, or `None` if empty.
	pub fn back_mut(&mut self) -> Option<&mut T> { self.as_mut_slice().last_mut() }

	/// Iterates over live elements front-to-back.
	pub fn iter(&self) -> slice::Iter<'_, T> { self.as_slice().iter() }

	/// Iterates mutably over live elements front-to-back.
	pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> { self.as_mut_slice().iter_mut() }

	/// Appends `value`, or returns an overflow error if the chunk is full. The
	/// value is dropped on error.
	pub fn push_back(&mut self, value: T) -> Result {
		if self.is_full() {
			return Err(Error::overflow(Target::Chunk, Operation::Push, self.len + 1, Self::CAPACITY))
		}

		self.buf[self.len] = value;
		self.len += 1;
		Ok(())
	}

	/// Swaps the memory and length of two chunks in constant time.
	pub fn swap(&mut self, other: &mut Self) {
		mem::swap(self, other);
	}

	fn check_resize(&self, new_len: usize) -> Result {
		if new_len > Self::CAPACITY {
			Err(Error::overflow(Target::Chunk, Operation::Resize, new_len, Self::CAPACITY))
		} else {
			Ok(())
		}
	}
}

impl<T: Default, const C: usize> Chunk<T, C> {
	/// Allocates a new, empty chunk.
	pub fn new() -> Self {
		#[allow(clippy::let_unit_value)]
		let () = Self::FITS_ONE;
		let buf: Box<[T]> = iter::repeat_with(T::default)
			.take(Self::CAPACITY)
			.collect();
		debug_assert_eq!(buf.len(), Self::CAPACITY);
		Self { buf, len: 0 }
	}

	/// Removes the last element and returns it, or returns an underflow error if
	/// the chunk is empty. A default value is left in its slot.
	pub fn pop_back(&mut self) -> Result<T> {
		if self.is_empty() {
			return Err(Error::underflow(Target::Chunk))
		}

		self.len -= 1;
		Ok(mem::take(&mut self.buf[self.len]))
	}

	/// Sets the number of live elements to `new_len`, filling new slots with
	/// default values. Shrinking drops the removed elements. Returns an overflow
	/// error, without changing the chunk, if `new_len` exceeds the capacity.
	pub fn resize(&mut self, new_len: usize) -> Result {
		self.resize_with(new_len, T::default)
	}

	/// Sets the number of live elements to `new_len`, filling new slots with the
	/// values returned by `f`. Returns an overflow error, without changing the
	/// chunk, if `new_len` exceeds the capacity.
	pub fn resize_with(&mut self, new_len: usize, f: impl FnMut() -> T) -> Result {
		self.check_resize(new_len)?;
		if new_len > self.len {
			self.buf[self.len..new_len].fill_with(f);
			self.len = new_len;
		} else {
			self.truncate(new_len);
		}
		Ok(())
	}

	/// Drops all elements. The chunk's memory is kept.
	pub fn clear(&mut self) {
		self.truncate(0);
	}

	/// Drops the elements past `new_len`, leaving default values in their slots.
	fn truncate(&mut self, new_len: usize) {
		debug_assert_le!(new_len, self.len);
		self.buf[new_len..self.len].fill_with(T::default);
		self.len = new_len;
	}
}

impl<T: Default + Clone, const C: usize> Chunk<T, C> {
	/// Sets the number of live elements to `new_len`, filling new slots with
	/// clones of `value`. Returns an overflow error, without changing the chunk,
	/// if `new_len` exceeds the capacity.
	pub fn resize_fill(&mut self, new_len: usize, value: T) -> Result {
		self.check_resize(new_len)?;
		if new_len > self.len {
			self.buf[self.len..new_len].fill(value);
			self.len = new_len;
		} else {
			self.truncate(new_len);
		}
		Ok(())
	}
}

impl<T: Default, const C: usize> Default for Chunk<T, C> {
	fn default() -> Self { Self::new() }
}

impl<T: Clone, const C: usize> Clone for Chunk<T, C> {
	fn clone(&self) -> Self {
		Self {
			buf: self.buf.clone(),
			len: self.len,
		}
	}
}

impl<T: Debug, const C: usize> Debug for Chunk<T, C> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

impl<T: PartialEq, const C: usize> PartialEq for Chunk<T, C> {
	fn eq(&self, other: &Self) -> bool {
		self.as_slice() == other.as_slice()
	}
}

impl<T: Eq, const C: usize> Eq for Chunk<T, C> { }

impl<T, const C: usize> Index<usize> for Chunk<T, C> {
	type Output = T;

	fn index(&self, index: usize) -> &T { &self.as_slice()[index] }
}

impl<T, const C: usize> IndexMut<usize> for Chunk<T, C> {
	fn index_mut(&mut self, index: usize) -> &mut T { &mut self.as_mut_slice()[index] }
}

impl<'a, T, const C: usize> IntoIterator for &'a Chunk<T, C> {
	type Item = &'a T;
	type IntoIter = slice::Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T, const C: usize> IntoIterator for &'a mut Chunk<T, C> {
	type Item = &'a mut T;
	type IntoIter = slice::IterMut<'a, T>;

	fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

impl<T, const C: usize> Sequence for Chunk<T, C> {
	type Item = T;

	fn len(&self) -> usize { self.len }

	fn get(&self, index: usize) -> Option<&T> { Chunk::get(self, index) }
}

impl<T, const C: usize> SequenceMut for Chunk<T, C> {
	type IterMut<'a> = slice::IterMut<'a, T> where Self: 'a;

	fn get_mut(&mut self, index: usize) -> Option<&mut T> { Chunk::get_mut(self, index) }

	fn iter_mut(&mut self) -> Self::IterMut<'_> { Chunk::iter_mut(self) }
}

#[cfg(test)]
mod test {
	use std::mem;
	use std::rc::Rc;
	use pretty_assertions::assert_eq;
	use quickcheck_macros::quickcheck;
	use super::{capacity_of, Chunk};

	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
	struct Unaligned {
		a: i32,
		b: u8,
	}

	type SmallChunk = Chunk<u32, 32>;

	fn counting() -> Chunk<i32> {
		let mut chunk = Chunk::new();
		for i in 0..3 {
			chunk.push_back(i).unwrap();
		}
		chunk
	}

	#[test]
	fn capacity() {
		assert_eq!(Chunk::<i32>::CAPACITY, 65536 / mem::size_of::<i32>());
		assert_eq!(Chunk::<Unaligned>::CAPACITY, 65536 / mem::size_of::<Unaligned>());
		assert_eq!(Chunk::<Unaligned, { 5 * mem::size_of::<Unaligned>() }>::new().capacity(), 5);
		assert_eq!(capacity_of::<()>(64), 64);
		assert_eq!(SmallChunk::CAPACITY, 8);
	}

	#[test]
	fn push_back() {
		let mut chunk = counting();
		assert_eq!(chunk.len(), 3);
		chunk.push_back(1).unwrap();
		chunk.push_back(2).unwrap();
		assert_eq!(chunk.len(), 5);
		for i in 0..Chunk::<i32>::CAPACITY - 5 {
			chunk.push_back(i as i32).unwrap();
		}
		assert!(chunk.is_full());

		let error = chunk.push_back(0).unwrap_err();
		assert!(error.kind().is_overflow());
		assert_eq!(chunk.len(), Chunk::<i32>::CAPACITY);
	}

	#[test]
	fn pop_back() {
		let mut chunk = counting();
		assert_eq!(chunk.pop_back(), Ok(2));
		assert_eq!(chunk.back(), Some(&1));
		assert_eq!(chunk.pop_back(), Ok(1));
		assert_eq!(chunk.pop_back(), Ok(0));
		assert!(chunk.is_empty());
		assert!(chunk.pop_back().unwrap_err().kind().is_underflow());
		assert!(Chunk::<Unaligned>::new().pop_back().is_err());
	}

	#[test]
	fn resize() {
		let mut chunk = counting();
		chunk.resize(10).unwrap();
		assert_eq!(chunk.len(), 10);
		assert_eq!(&chunk.as_slice()[..3], &[0, 1, 2]);
		assert_eq!(&chunk.as_slice()[3..], &[0; 7]);

		chunk.resize_fill(20, -1).unwrap();
		assert_eq!(chunk.len(), 20);
		assert_eq!(&chunk.as_slice()[..3], &[0, 1, 2]);
		assert!(chunk.as_slice()[10..].iter().all(|&n| n == -1));

		chunk.resize(5).unwrap();
		assert_eq!(chunk.as_slice(), &[0, 1, 2, 0, 0]);

		let mut chunk = Chunk::<Unaligned>::new();
		chunk.resize_fill(5, Unaligned { a: 2, b: 2 }).unwrap();
		assert!(chunk.iter().all(|v| *v == Unaligned { a: 2, b: 2 }));
		chunk.resize(0).unwrap();
		assert!(chunk.is_empty());
	}

	#[test]
	fn regrown_slots_are_default() {
		let mut chunk = Chunk::<i32>::new();
		for i in 10..13 {
			chunk.push_back(i).unwrap();
		}
		chunk.resize(1).unwrap();
		chunk.resize(3).unwrap();
		assert_eq!(chunk.as_slice(), &[10, 0, 0]);

		let mut next = 10;
		chunk.resize_with(5, || { next += 1; next }).unwrap();
		assert_eq!(chunk.as_slice(), &[10, 0, 0, 11, 12]);

		chunk.resize_fill(2, -1).unwrap();
		chunk.clear();
		chunk.resize(4).unwrap();
		assert_eq!(chunk.as_slice(), &[0; 4]);
	}

	#[test]
	fn removal_drops_elements() {
		let value = Rc::new(());
		let mut chunk = Chunk::<Option<Rc<()>>, 64>::new();
		for _ in 0..4 {
			chunk.push_back(Some(value.clone())).unwrap();
		}
		assert_eq!(Rc::strong_count(&value), 5);

		chunk.resize(3).unwrap();
		assert_eq!(Rc::strong_count(&value), 4);
		chunk.resize_with(1, || None).unwrap();
		assert_eq!(Rc::strong_count(&value), 2);
		chunk.resize_fill(2, None).unwrap();
		chunk.resize_fill(1, None).unwrap();
		assert_eq!(Rc::strong_count(&value), 2);
		chunk.clear();
		assert_eq!(Rc::strong_count(&value), 1);
	}

	#[test]
	fn resize_overflow() {
		let mut chunk = counting();
		let max = chunk.capacity();
		assert!(chunk.resize_fill(max + 1, 0).unwrap_err().kind().is_overflow());
		assert!(chunk.resize(max + 1).is_err());
		assert_eq!(chunk.len(), 3, "failed resize should not change the chunk");
		assert!(chunk.resize_fill(max, 0).is_ok());
		assert!(chunk.resize(max).is_ok());
	}

	#[test]
	fn clear() {
		let mut chunk = counting();
		assert!(!chunk.is_empty());
		chunk.clear();
		assert!(chunk.is_empty());
		chunk.push_back(2).unwrap();
		assert_eq!(chunk.as_slice(), &[2]);
	}

	#[test]
	fn access() {
		let mut chunk = counting();
		for i in 0..3 {
			assert_eq!(chunk[i], i as i32);
			assert_eq!(chunk.at(i), Ok(&(i as i32)));
			*chunk.at_mut(i).unwrap() = -(i as i32);
		}
		assert_eq!(chunk.as_slice(), &[0, -1, -2]);

		assert!(chunk.at(3).unwrap_err().kind().is_out_of_range());
		assert!(chunk.at(usize::MAX).is_err());
		assert!(chunk.at_mut(3).is_err());
		assert!(chunk.at_mut(2).is_ok());
		assert_eq!(chunk.len(), 3);
	}

	#[test]
	fn front_back() {
		let mut chunk = counting();
		assert_eq!(chunk.front(), Some(&0));
		assert_eq!(chunk.back(), Some(&2));
		*chunk.front_mut().unwrap() = 10;
		*chunk.back_mut().unwrap() = 20;
		assert_eq!(chunk.as_slice(), &[10, 1, 20]);
		assert_eq!(Chunk::<i32>::new().front(), None);
	}

	#[test]
	fn pointer_stable_on_push() {
		let mut chunk = counting();
		let ptr = chunk.as_ptr();
		let first: *const i32 = &chunk[0];
		chunk.push_back(3).unwrap();
		chunk.push_back(4).unwrap();
		assert_eq!(chunk.as_ptr(), ptr);
		assert_eq!(&chunk[0] as *const i32, first);
	}

	#[test]
	fn swap() {
		let mut a = counting();
		let mut b = Chunk::new();
		a.swap(&mut b);
		assert!(a.is_empty());
		assert_eq!(b.as_slice(), &[0, 1, 2]);
	}

	#[quickcheck]
	fn push_pop(values: Vec<u32>) {
		let mut chunk = SmallChunk::new();
		let fits = values.len().min(SmallChunk::CAPACITY);
		for (i, &v) in values.iter().enumerate() {
			assert_eq!(chunk.push_back(v).is_ok(), i < fits, "push {i}");
		}
		assert_eq!(chunk.as_slice(), &values[..fits]);
		for &v in values[..fits].iter().rev() {
			assert_eq!(chunk.pop_back(), Ok(v));
		}
		assert!(chunk.is_empty());
	}
}
