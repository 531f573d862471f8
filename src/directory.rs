//! Address-ordered directory of every block spanning the heap.

use std::collections::BTreeMap;

use crate::block::{Address, Block, BlockInfo, BlockStatus, HEADER_SIZE};

/// Doubly-linked, address-ordered structure of all blocks covering the
/// managed heap.
///
/// Block records are stored keyed by their own address; the `preceding`/
/// `following` links carry the traversal order and `head`/`tail` make
/// append O(1). Neighboring blocks are always address-adjacent: a block `b`
/// with a following neighbor `n` satisfies
/// `n == b + HEADER_SIZE + payload_size(b)`.
pub(crate) struct BlockDirectory {
  blocks: BTreeMap<Address, Block>,
  head: Option<Address>,
  tail: Option<Address>,
}

impl BlockDirectory {
  pub(crate) fn new() -> Self {
    Self {
      blocks: BTreeMap::new(),
      head: None,
      tail: None,
    }
  }

  pub(crate) fn head(&self) -> Option<Address> {
    self.head
  }

  /// Looks the address up as a block boundary. A freed pointer must
  /// resolve to a live block before its status field can be trusted.
  pub(crate) fn get(
    &self,
    address: Address,
  ) -> Option<&Block> {
    self.blocks.get(&address)
  }

  pub(crate) fn payload_size_of(
    &self,
    address: Address,
  ) -> usize {
    self.blocks[&address].payload_size
  }

  pub(crate) fn set_status(
    &mut self,
    address: Address,
    status: BlockStatus,
  ) {
    debug_assert!(self.blocks.contains_key(&address));

    if let Some(block) = self.blocks.get_mut(&address) {
      block.status = status;
    }
  }

  /// First-fit search: the lowest-address free block with room for `size`
  /// payload bytes. Strictly address order, never best-fit.
  pub(crate) fn find_free_of_size(
    &self,
    size: usize,
  ) -> Option<Address> {
    let mut cursor = self.head;

    while let Some(address) = cursor {
      let block = &self.blocks[&address];

      if block.is_free() && block.payload_size >= size {
        return Some(address);
      }
      cursor = block.following;
    }

    None
  }

  /// Links a fresh free block after `tail`, or as `head` when the
  /// directory is empty. The caller supplies the address the backend
  /// handed out for the new region.
  pub(crate) fn append(
    &mut self,
    address: Address,
    payload_size: usize,
  ) {
    let block = Block {
      preceding: self.tail,
      following: None,
      payload_size,
      status: BlockStatus::Free,
    };

    if let Some(tail) = self.tail {
      if let Some(previous_tail) = self.blocks.get_mut(&tail) {
        previous_tail.following = Some(address);
      }
    } else {
      self.head = Some(address);
    }

    self.tail = Some(address);
    self.blocks.insert(address, block);
  }

  /// Carves the block at `address` into an exact-fit region plus a free
  /// remainder, returning the remainder's address.
  ///
  /// The caller guarantees `payload_size > requested + HEADER_SIZE`, so
  /// the remainder can host a header and at least one payload byte.
  pub(crate) fn split(
    &mut self,
    address: Address,
    requested: usize,
  ) -> Address {
    let (following, payload_size) = {
      let block = &self.blocks[&address];
      (block.following, block.payload_size)
    };

    debug_assert!(payload_size > requested + HEADER_SIZE);

    let remainder = address + HEADER_SIZE + requested;
    let remainder_block = Block {
      preceding: Some(address),
      following,
      payload_size: payload_size - requested - HEADER_SIZE,
      status: BlockStatus::Free,
    };

    if let Some(block) = self.blocks.get_mut(&address) {
      block.payload_size = requested;
      block.following = Some(remainder);
    }

    match following {
      Some(next) => {
        if let Some(block) = self.blocks.get_mut(&next) {
          block.preceding = Some(remainder);
        }
      }
      None => self.tail = Some(remainder),
    }

    self.blocks.insert(remainder, remainder_block);
    remainder
  }

  /// Absorbs the following block when it exists and is free. Returns
  /// whether a merge happened; a no-op otherwise.
  pub(crate) fn merge_with_following(
    &mut self,
    address: Address,
  ) -> bool {
    let following = match self.blocks[&address].following {
      Some(following) if self.blocks[&following].is_free() => following,
      _ => return false,
    };

    let absorbed = match self.blocks.remove(&following) {
      Some(absorbed) => absorbed,
      None => return false,
    };

    if let Some(block) = self.blocks.get_mut(&address) {
      block.payload_size += HEADER_SIZE + absorbed.payload_size;
      block.following = absorbed.following;
    }

    match absorbed.following {
      Some(next) => {
        if let Some(block) = self.blocks.get_mut(&next) {
          block.preceding = Some(address);
        }
      }
      None => self.tail = Some(address),
    }

    true
  }

  /// Merges the block at `address` into its preceding neighbor when that
  /// neighbor is free. Returns the preceding address as the canonical
  /// reference after a merge, the original address otherwise.
  pub(crate) fn merge_with_preceding(
    &mut self,
    address: Address,
  ) -> Address {
    let preceding = match self.blocks[&address].preceding {
      Some(preceding) if self.blocks[&preceding].is_free() => preceding,
      _ => return address,
    };

    // Absorbing this block into its predecessor is the forward merge seen
    // from the predecessor.
    if self.merge_with_following(preceding) {
      preceding
    } else {
      address
    }
  }

  pub(crate) fn blocks(&self) -> Blocks<'_> {
    Blocks {
      directory: self,
      cursor: self.head,
    }
  }
}

/// Lazy, restartable iterator over the block directory in address order.
pub struct Blocks<'a> {
  directory: &'a BlockDirectory,
  cursor: Option<Address>,
}

impl<'a> Iterator for Blocks<'a> {
  type Item = BlockInfo;

  fn next(&mut self) -> Option<BlockInfo> {
    let address = self.cursor?;
    let block = self.directory.blocks.get(&address)?;

    self.cursor = block.following;

    Some(BlockInfo {
      address,
      payload_size: block.payload_size,
      status: block.status,
      preceding: block.preceding,
      following: block.following,
    })
  }
}
