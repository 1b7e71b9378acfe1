use std::io;

use tracing::{debug, trace};

use crate::error::{Result, RingBufferError};
use crate::storage::Storage;

/// Coarse fill state of a [`RingBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No unread bytes; cursors are at offset 0
    Empty,
    /// Some unread bytes and some free space
    Partial,
    /// `capacity - 1` unread bytes; writes are rejected until a read
    Full,
}

/// Fixed-capacity circular byte buffer
///
/// - Single owner, no internal locking
/// - One slot is always kept free so `start == end` means empty
/// - `write`/`read` are all-or-nothing and never allocate
#[derive(Debug)]
pub struct RingBuffer {
    /// Backing bytes, `capacity` long
    storage: Storage,
    /// First unread byte
    start: usize,
    /// One past the last written byte
    end: usize,
}

impl RingBuffer {
    /// Create a new ring buffer with `capacity` byte slots
    ///
    /// One slot is reserved, so at most `capacity - 1` bytes can be stored.
    ///
    /// # Returns
    /// * `Ok(RingBuffer)` on success
    /// * `Err(RingBufferError::InvalidCapacity)` if `capacity` is 0
    /// * `Err(RingBufferError::Allocation)` if the storage cannot be allocated
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            debug!("rejected zero ring buffer capacity");
            return Err(RingBufferError::InvalidCapacity);
        }

        let storage = Storage::zeroed(capacity).inspect_err(|err| {
            debug!(capacity, %err, "ring buffer allocation failed");
        })?;
        debug!(capacity, "ring buffer created");

        Ok(RingBuffer {
            storage,
            start: 0,
            end: 0,
        })
    }

    /// Release the buffer's storage
    ///
    /// Equivalent to dropping the buffer.
    pub fn destroy(self) {
        trace!(capacity = self.capacity(), "ring buffer destroyed");
        drop(self);
    }

    /// Destroy the buffer held in `slot`, if any, leaving `None` behind
    ///
    /// Calling this again on the same slot is a no-op.
    pub fn destroy_in_place(slot: &mut Option<RingBuffer>) {
        if let Some(buffer) = slot.take() {
            buffer.destroy();
        }
    }

    /// Total number of byte slots, including the reserved one
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of unread bytes
    pub fn available_data(&self) -> usize {
        let capacity = self.capacity();
        (self.end + capacity - self.start) % capacity
    }

    /// Number of bytes that can be written before the buffer is full
    pub fn available_space(&self) -> usize {
        self.capacity() - 1 - self.available_data()
    }

    /// Whether there are no unread bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether no more bytes can be written
    ///
    /// A buffer with capacity 1 is both empty and full.
    pub fn is_full(&self) -> bool {
        self.available_space() == 0
    }

    /// Current fill state. Emptiness wins over fullness for capacity 1.
    pub fn state(&self) -> State {
        if self.is_empty() {
            State::Empty
        } else if self.is_full() {
            State::Full
        } else {
            State::Partial
        }
    }

    /// Append all of `data`, or nothing
    ///
    /// A write that runs past the end of storage continues at offset 0.
    ///
    /// # Returns
    /// * `Ok(data.len())` on success
    /// * `Err(RingBufferError::InsufficientSpace)` if `data` does not fit
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.normalize_if_empty();
        self.ensure_space(data.len())?;

        let capacity = self.capacity();
        let end = self.end;
        let first = data.len().min(capacity - end);
        let (head, tail) = data.split_at(first);

        let storage = self.storage.as_mut_slice();
        storage[end..end + first].copy_from_slice(head);
        storage[..tail.len()].copy_from_slice(tail);

        self.end = (end + data.len()) % capacity;
        trace!(len = data.len(), start = self.start, end = self.end, "wrote bytes");

        Ok(data.len())
    }

    /// Fill `target` completely with the oldest unread bytes and consume them
    ///
    /// # Returns
    /// * `Ok(target.len())` on success
    /// * `Err(RingBufferError::InsufficientData)` if fewer bytes are unread
    pub fn read(&mut self, target: &mut [u8]) -> Result<usize> {
        self.ensure_data(target.len())?;
        self.copy_out(target);
        self.advance_start(target.len());
        trace!(len = target.len(), start = self.start, end = self.end, "read bytes");

        Ok(target.len())
    }

    /// Read `amount` bytes into a new vector
    pub fn read_to_vec(&mut self, amount: usize) -> Result<Vec<u8>> {
        self.ensure_data(amount)?;
        let mut out = vec![0u8; amount];
        self.read(&mut out)?;
        Ok(out)
    }

    /// Like [`read`](Self::read), but leaves the bytes in the buffer
    pub fn peek(&self, target: &mut [u8]) -> Result<usize> {
        self.ensure_data(target.len())?;
        self.copy_out(target);
        Ok(target.len())
    }

    /// Discard all unread bytes
    pub fn clear(&mut self) {
        let discarded = self.available_data();
        self.advance_start(discarded);
        trace!(discarded, "cleared ring buffer");
    }

    /// Unread bytes in logical order, split at the wrap boundary
    ///
    /// The second slice is empty unless the data wraps.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        let storage = self.storage.as_slice();
        if self.end >= self.start {
            (&storage[self.start..self.end], &[])
        } else {
            (&storage[self.start..], &storage[..self.end])
        }
    }

    /// The contiguous run of unread bytes starting at the read cursor
    ///
    /// Pair with [`commit_read`](Self::commit_read) to consume without copying.
    pub fn readable_chunk(&self) -> &[u8] {
        self.as_slices().0
    }

    /// Consume `amount` unread bytes without copying them
    pub fn commit_read(&mut self, amount: usize) -> Result<usize> {
        self.ensure_data(amount)?;
        self.advance_start(amount);
        trace!(amount, start = self.start, end = self.end, "committed read");
        Ok(amount)
    }

    /// The contiguous run of free bytes starting at the write cursor
    ///
    /// Bytes placed here become readable after [`commit_write`](Self::commit_write).
    /// The run never crosses the end of storage, so it can be shorter than
    /// [`available_space`](Self::available_space).
    pub fn writable_chunk(&mut self) -> &mut [u8] {
        self.normalize_if_empty();
        let end = self.end;
        let run = self.contiguous_space();
        &mut self.storage.as_mut_slice()[end..end + run]
    }

    /// Publish `amount` bytes previously placed in [`writable_chunk`](Self::writable_chunk)
    ///
    /// # Returns
    /// * `Ok(amount)` on success
    /// * `Err(RingBufferError::InsufficientSpace)` if `amount` exceeds the free space
    /// * `Err(RingBufferError::FragmentedSpace)` if the free space is enough in
    ///   total but `amount` would cross the end of storage
    pub fn commit_write(&mut self, amount: usize) -> Result<usize> {
        self.ensure_space(amount)?;

        let contiguous = self.contiguous_space();
        if amount > contiguous {
            debug!(requested = amount, contiguous, "rejected fragmented commit");
            return Err(RingBufferError::FragmentedSpace {
                requested: amount,
                contiguous,
            });
        }

        self.end = (self.end + amount) % self.capacity();
        trace!(amount, start = self.start, end = self.end, "committed write");
        Ok(amount)
    }

    fn ensure_space(&self, requested: usize) -> Result<()> {
        let available = self.available_space();
        if requested > available {
            debug!(requested, available, "rejected write");
            return Err(RingBufferError::InsufficientSpace {
                requested,
                available,
            });
        }
        Ok(())
    }

    fn ensure_data(&self, requested: usize) -> Result<()> {
        let available = self.available_data();
        if requested > available {
            debug!(requested, available, "rejected read");
            return Err(RingBufferError::InsufficientData {
                requested,
                available,
            });
        }
        Ok(())
    }

    /// Length of the free run from `end` that keeps the reserved slot intact
    fn contiguous_space(&self) -> usize {
        if self.start > self.end {
            self.start - self.end - 1
        } else if self.start == 0 {
            self.capacity() - self.end - 1
        } else {
            self.capacity() - self.end
        }
    }

    /// Copy `target.len()` bytes from the read cursor. Caller checks the length.
    fn copy_out(&self, target: &mut [u8]) {
        let storage = self.storage.as_slice();
        let start = self.start;
        let first = target.len().min(self.capacity() - start);
        let (head, tail) = target.split_at_mut(first);

        head.copy_from_slice(&storage[start..start + first]);
        let tail_len = tail.len();
        tail.copy_from_slice(&storage[..tail_len]);
    }

    fn advance_start(&mut self, amount: usize) {
        self.start = (self.start + amount) % self.capacity();
        self.normalize_if_empty();
    }

    fn normalize_if_empty(&mut self) {
        if self.start == self.end && self.start != 0 {
            trace!(offset = self.start, "normalized empty ring buffer");
            self.start = 0;
            self.end = 0;
        }
    }
}

/// Reads as many unread bytes as fit in `buf`; returns 0 when empty
impl io::Read for RingBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let amount = buf.len().min(self.available_data());
        Ok(RingBuffer::read(self, &mut buf[..amount])?)
    }
}

/// Writes as many bytes as fit; returns 0 when full
impl io::Write for RingBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let amount = buf.len().min(self.available_space());
        Ok(RingBuffer::write(self, &buf[..amount])?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
