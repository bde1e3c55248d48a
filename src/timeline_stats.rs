use std::sync::atomic::{AtomicU64, Ordering};

/// Counters reported by `/stats`, bumped by the grouping pipelines.
#[derive(Debug, Default)]
pub struct TimelineStats {
    pages: AtomicU64,
    transactions: AtomicU64,
    batches: AtomicU64,
    batched_transactions: AtomicU64,
}

impl TimelineStats {
    pub const fn new() -> Self {
        Self {
            pages: AtomicU64::new(0),
            transactions: AtomicU64::new(0),
            batches: AtomicU64::new(0),
            batched_transactions: AtomicU64::new(0),
        }
    }

    /// One page grouped into a history or queue timeline.
    pub fn record_page(&self, transactions: u64) {
        self.pages.fetch_add(1, Ordering::Relaxed);
        self.transactions.fetch_add(transactions, Ordering::Relaxed);
    }

    /// One batch computed; `size` may be zero.
    pub fn record_batch(&self, size: u64) {
        self.batches.fetch_add(1, Ordering::Relaxed);
        self.batched_transactions.fetch_add(size, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            pages: self.pages.load(Ordering::Relaxed),
            transactions: self.transactions.load(Ordering::Relaxed),
            batches: self.batches.load(Ordering::Relaxed),
            batched_transactions: self.batched_transactions.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TimelineSnapshot {
    pub pages: u64,
    pub transactions: u64,
    pub batches: u64,
    pub batched_transactions: u64,
}

pub static TIMELINE_STATS: TimelineStats = TimelineStats::new();
