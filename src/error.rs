use std::error::Error;
use std::fmt;

/// Failure modes of the allocator surface.
///
/// A failed operation never leaves the block directory inconsistent, and
/// errors are reported to the caller rather than retried internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocError {
  /// The backend could not move the heap boundary forward.
  OutOfMemory,
  /// The address lies outside the managed heap or does not line up with
  /// any live block header.
  InvalidFree,
  /// The block owning the address is already free.
  DoubleFree,
}

impl fmt::Display for AllocError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Self::OutOfMemory => write!(f, "heap backend cannot extend the boundary"),
      Self::InvalidFree => write!(f, "address does not belong to a live block"),
      Self::DoubleFree => write!(f, "block is already free"),
    }
  }
}

impl Error for AllocError {}
