use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::error::{Result, RingBufferError};

/// Zero-initialized, exclusively-owned byte region backing a ring buffer.
pub(crate) struct Storage {
    data: NonNull<u8>,
    layout: Layout,
}

// Storage owns its allocation outright; shared access only hands out `&[u8]`.
unsafe impl Send for Storage {}
unsafe impl Sync for Storage {}

impl Storage {
    /// Allocate `capacity` zeroed bytes. `capacity` must be non-zero.
    pub(crate) fn zeroed(capacity: usize) -> Result<Self> {
        debug_assert!(capacity > 0);

        let layout = Layout::array::<u8>(capacity)
            .map_err(|_| RingBufferError::Allocation { capacity })?;

        // Safety: layout has a non-zero size
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        let data = NonNull::new(ptr).ok_or(RingBufferError::Allocation { capacity })?;

        Ok(Storage { data, layout })
    }

    pub(crate) fn len(&self) -> usize {
        self.layout.size()
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        // Safety: data points to `len` initialized bytes owned by self
        unsafe { std::slice::from_raw_parts(self.data.as_ptr(), self.len()) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        // Safety: as above, and `&mut self` guarantees exclusive access
        unsafe { std::slice::from_raw_parts_mut(self.data.as_ptr(), self.len()) }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("data", &self.data)
            .field("len", &self.len())
            .finish()
    }
}

impl Drop for Storage {
    fn drop(&mut self) {
        // Safety: allocated in `zeroed` with this exact layout
        unsafe { alloc::dealloc(self.data.as_ptr(), self.layout) }
    }
}
