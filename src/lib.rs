//! # bytering - fixed-capacity circular byte buffer
//!
//! A byte ring for staging data between a producer and a consumer, e.g.
//! between an I/O read and a parser, without reallocating.
//!
//! ## Design
//!
//! - Capacity is fixed at construction; storage is allocated once, zeroed
//! - One slot is reserved so that `start == end` always means empty
//! - `write`/`read` copy all-or-nothing and never allocate
//! - Transfers crossing the end of storage are split into two copies
//! - Draining the buffer resets both cursors to offset 0
//! - Zero-copy workflow: `writable_chunk` → fill → `commit_write`,
//!   `readable_chunk` → consume → `commit_read`
//! - Single-threaded: no internal locking, synchronize externally
//!
//! ## Example
//!
//! ```
//! use bytering::{RingBuffer, RingBufferError};
//!
//! // 8 slots, 7 usable bytes
//! let mut rb = RingBuffer::new(8).unwrap();
//!
//! assert_eq!(rb.write(b"ABCDE").unwrap(), 5);
//!
//! let mut out = [0u8; 3];
//! rb.read(&mut out).unwrap();
//! assert_eq!(&out, b"ABC");
//!
//! rb.write(b"FG").unwrap();
//! assert_eq!(rb.read_to_vec(4).unwrap(), b"DEFG");
//!
//! // Writes are rejected whole when they don't fit
//! let err = rb.write(&[0u8; 8]).unwrap_err();
//! assert_eq!(err, RingBufferError::InsufficientSpace { requested: 8, available: 7 });
//! ```

#![warn(missing_docs)]

mod error;
mod ring_buffer;
mod storage;

pub use error::{Result, RingBufferError};
pub use ring_buffer::{RingBuffer, State};
