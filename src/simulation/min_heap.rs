//! Binary min-heap priority queue
//!
//! Array-backed heap over `(priority, value)` pairs. Values are not
//! deduplicated and there is no decrease-key: callers push a new entry with a
//! better priority and skip stale ones when they pop.

#[derive(Debug, Clone)]
struct HeapEntry<T, P> {
    priority: P,
    value: T,
}

/// A min-priority queue. Order between equal priorities is unspecified.
#[derive(Debug, Clone)]
pub struct MinHeap<T, P: Ord> {
    entries: Vec<HeapEntry<T, P>>,
}

impl<T, P: Ord> Default for MinHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> MinHeap<T, P> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value with the lowest priority without removing it
    pub fn peek(&self) -> Option<&T> {
        self.entries.first().map(|entry| &entry.value)
    }

    /// Returns the lowest priority currently queued
    pub fn peek_priority(&self) -> Option<&P> {
        self.entries.first().map(|entry| &entry.priority)
    }

    pub fn push(&mut self, value: T, priority: P) {
        self.entries.push(HeapEntry { priority, value });
        self.sift_up(self.entries.len() - 1);
    }

    /// Removes and returns the value with the lowest priority
    pub fn pop(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }

        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let root = self.entries.pop()?;
        self.sift_down(0);
        Some(root.value)
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[index].priority < self.entries[parent].priority {
                self.entries.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();

        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.entries[left].priority < self.entries[smallest].priority {
                smallest = left;
            }
            if right < len && self.entries[right].priority < self.entries[smallest].priority {
                smallest = right;
            }
            if smallest == index {
                return;
            }

            self.entries.swap(index, smallest);
            index = smallest;
        }
    }
}
