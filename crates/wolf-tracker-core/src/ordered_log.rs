//! Insertion-ordered, array-backed sequence.

use crate::error::{ModelError, Result};

const INITIAL_CAPACITY: usize = 10;

/// Append/remove sequence that keeps insertion order.
///
/// Backing storage starts with room for ten elements and doubles whenever an
/// append finds it full. Removal shifts later elements left and never shrinks
/// the storage. Every index-taking operation accepts exactly `0..len()`.
#[derive(Debug, Clone)]
pub struct OrderedLog<T> {
    slots: Vec<Option<T>>,
    len: usize,
}

impl<T> Default for OrderedLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedLog<T> {
    /// Create an empty log with the initial capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: empty_slots(INITIAL_CAPACITY),
            len: 0,
        }
    }

    /// Number of stored elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the log holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the backing storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Append `value` after the last element, doubling storage when full.
    pub fn append(&mut self, value: T) {
        if self.len == self.slots.len() {
            self.grow();
        }
        self.slots[self.len] = Some(value);
        self.len += 1;
    }

    /// Replace the element at `index`, returning the previous one.
    ///
    /// # Errors
    /// Returns [`ModelError::IndexOutOfRange`] unless `index < len()`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        self.check(index)?;
        self.slots[index]
            .replace(value)
            .ok_or_else(|| ModelError::out_of_range(index, self.len))
    }

    /// Borrow the element at `index`.
    ///
    /// # Errors
    /// Returns [`ModelError::IndexOutOfRange`] unless `index < len()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check(index)?;
        self.slots[index]
            .as_ref()
            .ok_or_else(|| ModelError::out_of_range(index, self.len))
    }

    /// Remove the element at `index`, shifting later elements left by one.
    ///
    /// # Errors
    /// Returns [`ModelError::IndexOutOfRange`] unless `index < len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.check(index)?;
        let removed = self.slots[index]
            .take()
            .ok_or_else(|| ModelError::out_of_range(index, self.len))?;
        for i in index..self.len - 1 {
            self.slots.swap(i, i + 1);
        }
        self.len -= 1;
        Ok(removed)
    }

    /// Keep only the elements for which `keep` returns true, preserving order.
    ///
    /// Returns the number of removed elements. Survivors are compacted in a
    /// single forward pass, so adjacent matches are never skipped.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            let survives = self.slots[read].as_ref().is_some_and(&mut keep);
            if survives {
                self.slots.swap(write, read);
                write += 1;
            } else {
                self.slots[read] = None;
            }
        }
        let removed = self.len - write;
        self.len = write;
        removed
    }

    /// Iterate over the elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }

    /// Borrow the most recently appended element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.slots[i].as_ref())
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            Err(ModelError::out_of_range(index, self.len))
        }
    }

    fn grow(&mut self) {
        let mut grown = empty_slots(self.slots.len().max(1) * 2);
        for (target, source) in grown.iter_mut().zip(self.slots.iter_mut()) {
            *target = source.take();
        }
        self.slots = grown;
    }
}

impl<T: PartialEq> OrderedLog<T> {
    /// Index of the first element equal to `value`.
    #[must_use]
    pub fn position(&self, value: &T) -> Option<usize> {
        self.iter().position(|candidate| candidate == value)
    }

    /// Whether any element equals `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.position(value).is_some()
    }
}

fn empty_slots<T>(capacity: usize) -> Vec<Option<T>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}
