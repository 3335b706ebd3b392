//! Injected host memory allocation
//!
//! Per-context host arrays are obtained from a caller-supplied
//! [`HostAllocator`] instead of the global allocator.

use std::alloc::Layout;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::error::{HpcError, HpcResult};

/// Source of host memory for sampling contexts
///
/// Any per-allocator state (the "user data" of a C-style callback pair) lives
/// in the implementing type.
pub trait HostAllocator {
    /// Allocate a block for `layout`; `None` signals exhaustion
    ///
    /// `layout` always has a non-zero size.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Release a block previously returned by [`HostAllocator::allocate`]
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate` on this allocator with the same
    /// `layout`, and must not be released twice.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<A: HostAllocator + ?Sized> HostAllocator for &A {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).deallocate(ptr, layout)
    }
}

/// Allocator backed by the process heap
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAllocator;

impl HostAllocator for SystemAllocator {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        // SAFETY: callers never pass a zero-sized layout.
        NonNull::new(unsafe { std::alloc::alloc(layout) })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        std::alloc::dealloc(ptr.as_ptr(), layout)
    }
}

/// Fixed-length array living in memory from a [`HostAllocator`]
///
/// The length is set at construction and never changes. The block is handed
/// back to the allocator exactly once, when the buffer is dropped.
pub struct HostBuffer<T: Copy + Default, A: HostAllocator> {
    ptr: NonNull<T>,
    len: usize,
    allocator: A,
    _owns: PhantomData<T>,
}

impl<T: Copy + Default, A: HostAllocator> HostBuffer<T, A> {
    /// Allocate `len` elements initialised to `T::default()`
    pub fn new(len: usize, allocator: A) -> HpcResult<Self> {
        let layout = Layout::array::<T>(len)
            .map_err(|_| HpcError::InvalidParameter(format!("{len} elements overflow a host allocation")))?;

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            let raw = allocator
                .allocate(layout)
                .ok_or(HpcError::OutOfHostMemory { bytes: layout.size() })?;
            let ptr = raw.cast::<T>();
            for i in 0..len {
                // SAFETY: the block holds `len` properly aligned elements.
                unsafe { ptr.as_ptr().add(i).write(T::default()) };
            }
            ptr
        };

        Ok(Self {
            ptr,
            len,
            allocator,
            _owns: PhantomData,
        })
    }

    fn layout(&self) -> Layout {
        // Validated in `new`.
        Layout::array::<T>(self.len).unwrap_or_else(|_| Layout::new::<T>())
    }
}

impl<T: Copy + Default, A: HostAllocator> Deref for HostBuffer<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        // SAFETY: `ptr` is valid for `len` initialised elements for our lifetime.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy + Default, A: HostAllocator> DerefMut for HostBuffer<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: as in `deref`, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy + Default, A: HostAllocator> Drop for HostBuffer<T, A> {
    fn drop(&mut self) {
        let layout = self.layout();
        if layout.size() != 0 {
            // SAFETY: allocated in `new` with this layout, released only here.
            unsafe { self.allocator.deallocate(self.ptr.cast(), layout) };
        }
    }
}

impl<T: Copy + Default + fmt::Debug, A: HostAllocator> fmt::Debug for HostBuffer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// SAFETY: the buffer uniquely owns its elements, like a `Box<[T]>`.
unsafe impl<T: Copy + Default + Send, A: HostAllocator + Send> Send for HostBuffer<T, A> {}
