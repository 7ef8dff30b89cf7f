//! Append-only record pools.
//!
//! Attributes, open-element frames and namespace bindings are stored in pools
//! whose logical length is tracked separately from the backing vector. Resetting
//! a pool only zeroes the logical length; records beyond it keep their string
//! allocations and are handed out again, cleared, the next time a slot is needed.

use std::mem;
use std::ops::Index;

/// A record whose content can be discarded while its allocations are kept.
pub(crate) trait Recycle: Default {
    fn recycle(&mut self);
}

pub(crate) struct Pool<T> {
    items: Vec<T>,
    len: usize,
}

impl<T: Recycle> Pool<T> {
    pub fn new() -> Self {
        Pool { items: Vec::new(), len: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of records which hold storage, live or not.
    #[cfg(test)]
    pub fn allocated(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items[..self.len]
    }

    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Takes the storage of the next free slot out of the pool.
    ///
    /// The returned record is empty. It is expected to come back through
    /// [`Pool::push`]; if it does not, the slot simply starts from scratch later.
    pub fn take_slot(&mut self) -> T {
        match self.items.get_mut(self.len) {
            Some(slot) => {
                let mut item = mem::take(slot);
                item.recycle();
                item
            }
            None => T::default(),
        }
    }

    pub fn push(&mut self, item: T) {
        if self.len < self.items.len() {
            self.items[self.len] = item;
        } else {
            self.items.push(item);
        }
        self.len += 1;
    }

    /// Grows the logical length by one and returns the recycled record in place.
    pub fn push_recycled(&mut self) -> &mut T {
        if self.len == self.items.len() {
            self.items.push(T::default());
        } else {
            self.items[self.len].recycle();
        }
        self.len += 1;
        &mut self.items[self.len - 1]
    }

    /// Shrinks the logical length by one, returning the removed record.
    ///
    /// The record stays valid until the slot is handed out again.
    pub fn pop(&mut self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(&self.items[self.len])
    }

    /// Forgets all live records without releasing their storage.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Forgets all records and releases their storage.
    pub fn release(&mut self) {
        self.items = Vec::new();
        self.len = 0;
    }
}

impl<T: Recycle> Index<usize> for Pool<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}
