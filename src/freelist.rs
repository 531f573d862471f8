//! First-fit free-list allocation over a growable heap.

use std::mem;

use log::debug;

use crate::{
  align,
  backend::HeapBackend,
  block::{Address, BlockStatus, HEADER_SIZE},
  directory::{BlockDirectory, Blocks},
  error::AllocError,
};

/// Default minimum chunk claimed from the backend per growth. Amortizes
/// the cost of repeated small requests.
pub const DEFAULT_GROWTH_INCREMENT: usize = 4096;

/// First-fit free-list allocator.
///
/// Owns the block directory and the backend; every operation goes through
/// this context object. Single-threaded as-is; wrap it in
/// [`LockedAllocator`](crate::LockedAllocator) to share it across threads.
pub struct FreeListAllocator<B: HeapBackend> {
  directory: BlockDirectory,
  backend: B,
  growth_increment: usize,
}

impl<B: HeapBackend> FreeListAllocator<B> {
  pub fn new(backend: B) -> Self {
    Self::with_growth_increment(backend, DEFAULT_GROWTH_INCREMENT)
  }

  pub fn with_growth_increment(
    backend: B,
    growth_increment: usize,
  ) -> Self {
    Self {
      directory: BlockDirectory::new(),
      backend,
      growth_increment,
    }
  }

  /// Allocates `size` payload bytes and returns the payload address.
  ///
  /// Zero-size requests are normalized to one word so every call yields a
  /// distinct, freeable block, and all requests are word-aligned. The
  /// lowest-address free block that fits is reused, splitting off the
  /// surplus when the remainder can host a header and at least one payload
  /// byte; the heap grows only when no free block fits. On
  /// [`AllocError::OutOfMemory`] the directory is left unchanged.
  pub fn alloc(
    &mut self,
    size: usize,
  ) -> Result<Address, AllocError> {
    // A request this close to usize::MAX cannot fit a header; reject it
    // before the size arithmetic wraps.
    if size > usize::MAX - HEADER_SIZE - mem::size_of::<usize>() {
      return Err(AllocError::OutOfMemory);
    }

    let size = align!(size.max(1));

    let address = match self.directory.find_free_of_size(size) {
      Some(address) => {
        debug!("alloc({size}): reusing block {address:#x}");
        address
      }
      None => self.grow_by(size)?,
    };

    Ok(self.take(address, size))
  }

  /// Releases the block owning `ptr`; `None` is a no-op.
  ///
  /// `ptr` must be a payload address previously returned by
  /// [`alloc`](Self::alloc) and not yet freed. An address outside the
  /// managed range, or one that does not line up with a live block header
  /// (for example a stale pointer to a block since absorbed by
  /// coalescing), fails with [`AllocError::InvalidFree`]; freeing a block
  /// that is already free fails with [`AllocError::DoubleFree`]. Failures
  /// leave the directory unchanged.
  ///
  /// A pointer that happens to coincide with another live block's payload
  /// address after reuse is undetectable and remains the caller's
  /// responsibility.
  pub fn free(
    &mut self,
    ptr: Option<Address>,
  ) -> Result<(), AllocError> {
    let Some(ptr) = ptr else {
      return Ok(());
    };

    let Some(head) = self.directory.head() else {
      return Err(AllocError::InvalidFree);
    };

    if ptr < head + HEADER_SIZE || ptr >= self.backend.current_boundary() {
      return Err(AllocError::InvalidFree);
    }

    let address = ptr - HEADER_SIZE;

    // The status field is only trustworthy once the address is known to
    // be a live block boundary.
    let Some(block) = self.directory.get(address) else {
      return Err(AllocError::InvalidFree);
    };

    if block.is_free() {
      return Err(AllocError::DoubleFree);
    }

    debug!("free({ptr:#x}): block {address:#x}");
    self.directory.set_status(address, BlockStatus::Free);

    // Next first: the freed block's own address stays stable for the
    // preceding-merge check.
    self.directory.merge_with_following(address);
    self.directory.merge_with_preceding(address);

    Ok(())
  }

  /// Lazy, restartable snapshot of the block directory in address order.
  ///
  /// Read-only; when the allocator is shared across threads this must run
  /// under the same lock as the mutating operations.
  pub fn blocks(&self) -> Blocks<'_> {
    self.directory.blocks()
  }

  /// Current end of the managed heap.
  pub fn boundary(&self) -> Address {
    self.backend.current_boundary()
  }

  pub fn growth_increment(&self) -> usize {
    self.growth_increment
  }

  /// Marks the block at `address` allocated, splitting off a free
  /// remainder when one fits, and returns the payload address.
  fn take(
    &mut self,
    address: Address,
    size: usize,
  ) -> Address {
    let payload_size = self.directory.payload_size_of(address);

    if payload_size > size + HEADER_SIZE {
      let remainder = self.directory.split(address, size);
      debug!("split {address:#x}: keeping {size}, remainder at {remainder:#x}");
    }

    self.directory.set_status(address, BlockStatus::Allocated);

    address + HEADER_SIZE
  }

  /// Claims more memory from the backend and appends a fresh free block
  /// covering the whole grant, returning the block's address.
  ///
  /// The request is rounded up to the growth increment. Backend failure
  /// leaves the directory untouched.
  fn grow_by(
    &mut self,
    size: usize,
  ) -> Result<Address, AllocError> {
    let requested = align!((size + HEADER_SIZE).max(self.growth_increment));
    let address = self.backend.extend(requested)?;

    debug!("grow: +{requested} bytes, new block {address:#x}");
    self.directory.append(address, requested - HEADER_SIZE);

    Ok(address)
  }
}
