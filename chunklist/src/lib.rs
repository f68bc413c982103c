// Copyright 2023 Strixpyrr
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! ## How it works
//!
//! Elements are stored in fixed-capacity blocks of memory called *chunks*, about
//! 64KiB each by default. A [`ChunkList`] keeps its chunks in order, appending a
//! new one when the last fills up and freeing the last one when it's emptied.
//! Chunks are never reallocated, so elements never move as the list grows; a
//! pointer to an element stays valid until its chunk is freed.
//!
//! Every chunk but the last is full, and the last is never empty. Finding an
//! element by index is then a division by the chunk capacity. Chunks are exposed
//! as slices, so work over a list can be split along chunk boundaries.
//!
//! ### Nested iteration
//!
//! A chunk list is a container of containers. The [`nested`] module iterates any
//! such container as one flat sequence: vectors of vectors, linked lists of
//! sets, or maps whose values are sequences. Positions in the flat sequence are
//! held by [`NestedCursor`]s, which store indices and keys instead of borrows and
//! stay meaningful across mutation. Hash maps are walked forward only.
//!
//! ### Range chains
//!
//! A [`RangeChain`] strings independently owned ranges together into a single
//! sequence, without copying their elements.
//!
//! ### Errors
//!
//! Misusing a container, such as reading past its end or pushing onto a full
//! chunk, returns an [`Error`]. A broken internal invariant is a bug, reported
//! through the [`invariant`] hook before panicking.

pub mod chain;
pub mod chunk;
pub mod error;
pub mod invariant;
pub mod list;
pub mod nested;

pub use chain::{Chain, RangeChain};
pub use chunk::Chunk;
pub use error::{Error, ErrorKind, Result};
pub use list::{ChunkList, Cursor};
pub use nested::{NestedCursor, NestedIter, NestedIterMut};

/// The default chunk size in bytes.
pub const DEFAULT_CHUNK_BYTES: usize = 65536;
