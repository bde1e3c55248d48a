use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::TimelineError;
use crate::grouping::{
    get_batchable_transactions_capped, group_bulk_txs, group_conflicting_txs, group_txs_by_date,
};
use crate::models::{Page, TransactionListItem, TransactionSummary};
use crate::timeline_stats::TIMELINE_STATS;

/// A renderable unit: one transaction, or several that belong together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TxGroup {
    Single(TransactionSummary),
    /// Alternatives proposed for the same nonce; at most one can execute.
    Conflict {
        nonce: u64,
        transactions: Vec<TransactionSummary>,
    },
    /// Legs of one multi-part operation, e.g. an order settlement.
    Bulk {
        title: String,
        transactions: Vec<TransactionSummary>,
    },
}

impl TxGroup {
    pub fn transactions(&self) -> &[TransactionSummary] {
        match self {
            TxGroup::Single(tx) => std::slice::from_ref(tx),
            TxGroup::Conflict { transactions, .. } | TxGroup::Bulk { transactions, .. } => {
                transactions
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineItem {
    DateLabel { timestamp: i64 },
    Label { label: String },
    Transaction(TxGroup),
}

impl TimelineItem {
    pub fn group(&self) -> Option<&TxGroup> {
        match self {
            TimelineItem::Transaction(group) => Some(group),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedBucket {
    pub title: String,
    pub data: Vec<TxGroup>,
}

/// Decodes a gateway page. Result items are decoded one by one so a single
/// malformed entry doesn't take the whole page down with it.
pub fn parse_page(raw: &str) -> Result<Page, TimelineError> {
    let value: Value = serde_json::from_str(raw)?;
    page_from_value(value)
}

pub fn page_from_value(mut value: Value) -> Result<Page, TimelineError> {
    let results = match value.as_object_mut().and_then(|obj| obj.remove("results")) {
        Some(Value::Array(results)) => results,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => return Err(TimelineError::ResultsNotArray),
    };

    let mut page: Page = serde_json::from_value(value)?;
    page.results = results
        .into_iter()
        .enumerate()
        .filter_map(|(idx, raw)| match serde_json::from_value(raw) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!("skipping malformed list item #{}: {}", idx, err);
                None
            }
        })
        .collect();

    Ok(page)
}

fn count_transactions(items: &[TransactionListItem]) -> u64 {
    items
        .iter()
        .filter(|item| matches!(item, TransactionListItem::Transaction(_)))
        .count() as u64
}

/// History view: conflicts, then bulk settlement legs, then date buckets.
pub fn history_timeline(items: &[TransactionListItem], offset: &FixedOffset) -> Vec<GroupedBucket> {
    TIMELINE_STATS.record_page(count_transactions(items));

    let grouped = group_bulk_txs(group_conflicting_txs(items));
    group_txs_by_date(grouped, offset)
}

/// Queue view: same grouping as history, without date buckets. Section
/// labels are kept.
pub fn queue_timeline(items: &[TransactionListItem]) -> Vec<TimelineItem> {
    TIMELINE_STATS.record_page(count_transactions(items));

    group_bulk_txs(group_conflicting_txs(items))
}

/// Transactions from a queue page that can go into one batched execution.
pub fn batchable_from_queue(
    items: &[TransactionListItem],
    current_nonce: u64,
    limit: usize,
) -> Vec<TransactionSummary> {
    let queue = group_conflicting_txs(items);
    let batch = get_batchable_transactions_capped(&queue, current_nonce, limit);

    TIMELINE_STATS.record_batch(batch.len() as u64);
    batch
}
