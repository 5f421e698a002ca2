use std::sync::atomic::{AtomicUsize, Ordering};

/// Count of bulk-uploaded products not yet deployed to production
#[derive(Debug, Default)]
pub struct NewProductsCounter {
    count: AtomicUsize,
}

impl NewProductsCounter {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` products, returning the new total
    pub fn add(&self, count: usize) -> usize {
        self.count.fetch_add(count, Ordering::SeqCst) + count
    }

    /// Reset to zero, returning the previous total
    pub fn reset(&self) -> usize {
        self.count.swap(0, Ordering::SeqCst)
    }

    #[inline]
    #[must_use]
    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}
