//! Singly-linked sequence kept in ascending order without duplicates.

use std::cmp::Ordering;

use crate::error::{ModelError, Result};

struct Node<T> {
    value: T,
    next: Link<T>,
}

type Link<T> = Option<Box<Node<T>>>;

/// Sorted, duplicate-free, singly-linked list.
///
/// Ordering and equality both come from [`Ord`]: two elements whose
/// comparison yields [`Ordering::Equal`] are duplicates.
pub struct SortedUniqueList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> Default for SortedUniqueList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SortedUniqueList<T> {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow the element at `index`.
    ///
    /// # Errors
    /// Returns [`ModelError::IndexOutOfRange`] unless `index < len()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.iter()
            .nth(index)
            .ok_or_else(|| ModelError::out_of_range(index, self.len))
    }

    /// Mutably borrow the element at `index`.
    ///
    /// Callers must not change anything the ordering depends on; take the
    /// element out with [`remove`](Self::remove) and re-[`add`](Self::add) it
    /// instead.
    ///
    /// # Errors
    /// Returns [`ModelError::IndexOutOfRange`] unless `index < len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.iter_mut()
            .nth(index)
            .ok_or_else(|| ModelError::out_of_range(index, len))
    }

    /// Remove and return the element at `index`.
    ///
    /// # Errors
    /// Returns [`ModelError::IndexOutOfRange`] unless `index < len()`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(ModelError::out_of_range(index, self.len));
        }
        let len = self.len;
        let slot = self.slot_mut(index);
        let node = slot
            .take()
            .ok_or_else(|| ModelError::out_of_range(index, len))?;
        *slot = node.next;
        self.len -= 1;
        Ok(node.value)
    }

    /// Iterate from the front.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Iterate mutably from the front. The same caveat as [`get_mut`](Self::get_mut) applies.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
        }
    }

    /// Link slot that holds (or would hold) the node at `index`.
    fn slot_mut(&mut self, index: usize) -> &mut Link<T> {
        let mut slot = &mut self.head;
        for _ in 0..index {
            match slot {
                Some(node) => slot = &mut node.next,
                None => break,
            }
        }
        slot
    }
}

impl<T: Ord> SortedUniqueList<T> {
    /// Insert `value` before the first element that is not less than it.
    ///
    /// # Errors
    /// Returns [`ModelError::DuplicateElement`] when an equal element exists;
    /// the list is left untouched.
    pub fn add(&mut self, value: T) -> Result<()> {
        let mut index = 0;
        for existing in self.iter() {
            match existing.cmp(&value) {
                Ordering::Less => index += 1,
                Ordering::Equal => return Err(ModelError::DuplicateElement),
                Ordering::Greater => break,
            }
        }
        let slot = self.slot_mut(index);
        let next = slot.take();
        *slot = Some(Box::new(Node { value, next }));
        self.len += 1;
        Ok(())
    }

    /// Whether an element comparing equal to `value` is present.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|existing| existing.cmp(value) == Ordering::Equal)
    }

    /// Index of the element comparing equal to `value`.
    #[must_use]
    pub fn position(&self, value: &T) -> Option<usize> {
        self.iter()
            .position(|existing| existing.cmp(value) == Ordering::Equal)
    }
}

impl<T> Drop for SortedUniqueList<T> {
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SortedUniqueList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over a [`SortedUniqueList`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

/// Mutable iterator over a [`SortedUniqueList`].
pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            &mut node.value
        })
    }
}
