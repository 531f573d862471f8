//! Coarse-grained locking for multi-threaded use.

use spin::{Mutex, MutexGuard};

use crate::{
  backend::HeapBackend, block::Address, error::AllocError, freelist::FreeListAllocator,
};

/// A [`FreeListAllocator`] behind a single coarse lock.
///
/// Every operation, including heap growth, runs with the lock held; growth
/// may block the calling thread while others wait, which is acceptable
/// since growth is rare relative to alloc/free. Diagnostics must run under
/// the same lock: take [`lock`](Self::lock) and enumerate through the
/// guard.
pub struct LockedAllocator<B: HeapBackend> {
  inner: Mutex<FreeListAllocator<B>>,
}

impl<B: HeapBackend> LockedAllocator<B> {
  pub const fn new(allocator: FreeListAllocator<B>) -> Self {
    Self {
      inner: Mutex::new(allocator),
    }
  }

  pub fn alloc(
    &self,
    size: usize,
  ) -> Result<Address, AllocError> {
    self.inner.lock().alloc(size)
  }

  pub fn free(
    &self,
    ptr: Option<Address>,
  ) -> Result<(), AllocError> {
    self.inner.lock().free(ptr)
  }

  /// Holds the allocator for a sequence of calls, e.g. a consistent block
  /// enumeration.
  pub fn lock(&self) -> MutexGuard<'_, FreeListAllocator<B>> {
    self.inner.lock()
  }
}

#[cfg(test)]
mod tests {
  use std::thread;

  use super::*;
  use crate::backend::FixedBackend;
  use crate::block::BlockStatus;

  #[test]
  fn threads_share_one_allocator_through_the_lock() {
    let allocator = LockedAllocator::new(FreeListAllocator::with_growth_increment(
      FixedBackend::new(0x8000, 1 << 20),
      64,
    ));

    thread::scope(|scope| {
      for _ in 0..4 {
        scope.spawn(|| {
          for _ in 0..64 {
            let ptr = allocator.alloc(24).expect("allocation");
            allocator.free(Some(ptr)).expect("free");
          }
        });
      }
    });

    // Every allocation was released, so only free blocks remain.
    let guard = allocator.lock();
    assert!(guard.blocks().all(|info| info.status == BlockStatus::Free));
    assert!(guard.blocks().count() >= 1);
  }
}
