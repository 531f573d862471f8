//! # rmalloc - A First-Fit Free-List Memory Allocator
//!
//! This crate provides a **first-fit free-list allocator**: it manages a
//! growable heap region through a pluggable [`HeapBackend`] and services
//! alloc/free requests from an address-ordered directory of blocks, without
//! delegating to a platform allocator.
//!
//! ## Overview
//!
//! The heap is covered wall-to-wall by blocks, each either allocated or
//! free, chained in address order:
//!
//! ```text
//!   Free-List Allocator Concept:
//!
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                         HEAP MEMORY                                  │
//!   │                                                                      │
//!   │   ┌────────┬──────┬────────────┬──────┬───────────────────────────┐  │
//!   │   │ A1     │ free │ A2         │ free │ A3                        │  │
//!   │   └────────┴──────┴────────────┴──────┴───────────────────────────┘  │
//!   │   ▲                                                             ▲    │
//!   │   │                                                             │    │
//!   │  head                                                      boundary  │
//!   │                                                                      │
//!   └──────────────────────────────────────────────────────────────────────┘
//!
//!   alloc: first-fit scan from head; split the surplus off a reused block.
//!   free:  mark the block free, then merge with free neighbors.
//!   Growth only happens when no free block fits the request.
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   rmalloc
//!   ├── align      - Word-alignment macro (align!)
//!   ├── backend    - HeapBackend trait, SbrkBackend, FixedBackend
//!   ├── block      - Block metadata and the BlockInfo diagnostic record
//!   ├── directory  - Address-ordered block directory (search/split/merge)
//!   ├── freelist   - FreeListAllocator: the alloc/free surface
//!   └── locked     - LockedAllocator: coarse lock for shared use
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rmalloc::{AllocError, FixedBackend, FreeListAllocator};
//!
//! fn main() -> Result<(), AllocError> {
//!     // A deterministic in-process heap; use SbrkBackend for the real
//!     // program break.
//!     let mut allocator = FreeListAllocator::new(FixedBackend::new(0x1000, 1 << 16));
//!
//!     let ptr = allocator.alloc(64)?;
//!     allocator.free(Some(ptr))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Addresses are modeled as plain byte offsets, so every block is reachable
//! with arithmetic alone and the engine never touches raw memory itself.
//! Each block is described by a header-sized span of metadata preceding its
//! payload:
//!
//! ```text
//!   Single Block:
//!   ┌───────────────────────┬────────────────────────────────┐
//!   │    Block Header       │         Payload                │
//!   │  ┌─────────────────┐  │                                │
//!   │  │ preceding       │  │  ┌──────────────────────────┐  │
//!   │  │ following       │  │  │                          │  │
//!   │  │ payload_size: N │  │  │     N bytes usable       │  │
//!   │  │ status          │  │  │                          │  │
//!   │  └─────────────────┘  │  └──────────────────────────┘  │
//!   │     HEADER_SIZE       │                                │
//!   └───────────────────────┴────────────────────────────────┘
//!                           ▲
//!                           └── Address returned to the caller
//! ```
//!
//! When no free block fits, the allocator claims at least
//! [`DEFAULT_GROWTH_INCREMENT`] bytes from the backend (with
//! [`SbrkBackend`], by moving the program break) and appends a fresh free
//! block at the old boundary:
//!
//! ```text
//!   Program Memory Layout (SbrkBackend):
//!
//!   High Address ┌─────────────────────┐
//!                │       Stack         │ ↓ grows down
//!                │         │           │
//!                │         ▼           │
//!                │                     │
//!                │         ▲           │
//!                │         │           │
//!                │       Heap          │ ↑ grows up (sbrk)
//!                ├─────────────────────┤ ← Program Break = boundary
//!                │   Uninitialized     │
//!                │       Data          │
//!                ├─────────────────────┤
//!                │   Initialized       │
//!                │       Data          │
//!                ├─────────────────────┤
//!                │       Text          │
//!   Low Address  └─────────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Block reuse**: freed blocks are found again by a first-fit scan
//! - **Splitting**: oversized free blocks shed an exact-fit region
//! - **Coalescing**: adjacent free blocks merge to fight fragmentation
//! - **Misuse detection**: out-of-range and double frees are reported as
//!   [`AllocError`] values, never by terminating the process
//! - **Deterministic testing**: [`FixedBackend`] simulates a bounded heap
//!
//! ## Limitations
//!
//! - **First-fit only**: no best-fit or size-class policies
//! - **Word alignment only**: payloads are aligned to the machine word,
//!   nothing stricter
//! - **No shrinking**: the boundary never moves backward; freed memory is
//!   reused, not returned to the OS
//! - **Coarse locking**: multi-threaded use goes through a single
//!   [`LockedAllocator`] lock
pub mod align;
mod backend;
mod block;
mod directory;
mod error;
mod freelist;
mod locked;

pub use backend::{FixedBackend, HeapBackend, SbrkBackend};
pub use block::{Address, BlockInfo, BlockStatus, HEADER_SIZE};
pub use directory::Blocks;
pub use error::AllocError;
pub use freelist::{DEFAULT_GROWTH_INCREMENT, FreeListAllocator};
pub use locked::LockedAllocator;
