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

use std::result;
use amplify_derive::Display;
use thiserror::Error;

pub type Result<T = ()> = result::Result<T, Error>;

/// The container an operation failed on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
pub enum Target {
	#[display("chunk")]
	Chunk,
	#[display("chunk list")]
	ChunkList,
}

/// The operation that failed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
pub enum Operation {
	#[display("access")]
	Access,
	#[display("push")]
	Push,
	#[display("pop")]
	Pop,
	#[display("resize")]
	Resize,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum ErrorKind {
	/// An index at or past the length of the container.
	#[error("index {index} is out of range for length {len}")]
	OutOfRange {
		index: usize,
		len: usize,
	},
	/// A length past the fixed capacity of a chunk.
	#[error("length {requested} overflows capacity {capacity}")]
	Overflow {
		requested: usize,
		capacity: usize,
	},
	/// Removal from an empty container.
	#[error("container is empty")]
	Underflow,
}

/// A recoverable error caused by misuse of a container's public contract. The
/// container is left unchanged when one is returned.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
#[error("{target} {op} failed; {kind}")]
pub struct Error {
	target: Target,
	op: Operation,
	kind: ErrorKind,
}

impl Error {
	pub(crate) fn new(target: Target, op: Operation, kind: ErrorKind) -> Self {
		Self { target, op, kind }
	}

	pub(crate) fn out_of_range(target: Target, index: usize, len: usize) -> Self {
		Self::new(target, Operation::Access, ErrorKind::OutOfRange { index, len })
	}

	pub(crate) fn overflow(target: Target, op: Operation, requested: usize, capacity: usize) -> Self {
		Self::new(target, op, ErrorKind::Overflow { requested, capacity })
	}

	pub(crate) fn underflow(target: Target) -> Self {
		Self::new(target, Operation::Pop, ErrorKind::Underflow)
	}

	/// Returns the container kind.
	pub fn target(&self) -> Target { self.target }

	/// Returns the operation kind.
	pub fn operation(&self) -> Operation { self.op }

	/// Returns the error kind.
	pub fn kind(&self) -> ErrorKind { self.kind }
}

impl ErrorKind {
	pub fn is_out_of_range(&self) -> bool {
		matches!(self, Self::OutOfRange { .. })
	}

	pub fn is_overflow(&self) -> bool {
		matches!(self, Self::Overflow { .. })
	}

	pub fn is_underflow(&self) -> bool {
		matches!(self, Self::Underflow)
	}
}
